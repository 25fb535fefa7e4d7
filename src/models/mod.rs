mod category;
mod comment;
mod product;
mod tag;
mod user;

pub use category::Category;
pub use comment::Comment;
pub use product::{Product, ProductStatus};
pub use tag::Tag;
pub use user::User;
