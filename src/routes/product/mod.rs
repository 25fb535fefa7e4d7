pub(crate) mod add;
pub(crate) mod comment;

pub use add::add_handler;
pub use comment::comment_add_handler;
