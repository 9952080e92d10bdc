pub mod property;
pub mod similarity;

pub use property::{match_property, tag_candidate, PropertyMatcher};
pub use similarity::similarity;
