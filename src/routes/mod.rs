pub mod health_checks;
pub(crate) mod pages;
pub(crate) mod product;
pub(crate) mod webhook;

pub use health_checks::*;
