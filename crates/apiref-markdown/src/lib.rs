pub mod emitters;
pub mod generator;

pub use generator::{INDEX_PATH, MarkdownGenerator};
