pub mod comment;
pub mod product;
pub mod webhook;

pub use comment::CommentForm;
pub use product::SubmitProductForm;
