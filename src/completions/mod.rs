pub mod dynamic;
pub mod generator;

pub use dynamic::{complete_dynamic, complete_tags, CompletionContext};
pub use generator::generate_completions;
