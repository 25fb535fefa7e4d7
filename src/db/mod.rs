pub mod category;
pub mod comment;
pub mod product;
pub mod tag;
pub mod user;
