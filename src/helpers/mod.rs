pub(crate) mod json;
pub mod signature;
pub mod slug;

pub use json::*;
