pub mod cache;
pub mod text;

pub use cache::{NormalizationCache, Normalize, Plain};
pub use text::{extract_street_name, extract_street_number, normalize_address, normalize_property_name};
