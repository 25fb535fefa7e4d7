pub(crate) mod users;

pub use users::users_handler;
