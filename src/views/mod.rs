mod product;

pub use product::{Author, CommentWithAuthor, ProductWithRelations};
