pub mod client;
pub mod parse;
pub mod prompt;

pub use client::AnthropicClient;
pub use parse::{extract_json_array, parse_entity_names};
