// Parsers: placeholder scan of command templates, shell parameter lists

pub mod common;
pub mod literals;
pub mod placeholders;

pub use literals::parse_params;
pub use placeholders::{analyze, MixedPlaceholders, PlaceholderStyle};
