use crate::error::{AppError, Result};

/// Minimum match score (0–100) for a candidate to be tagged as the subject property.
pub const MATCH_THRESHOLD: u8 = 60;

/// Candidates scored per blocking task in a batch run.
pub const BATCH_CHUNK_SIZE: usize = 64;

/// Maximum points contributed by each match signal.
pub mod match_weights {
    pub const STREET_NUMBER: u32 = 30;
    /// One street number is a prefix of the other ("12" vs "123").
    pub const STREET_NUMBER_PREFIX: u32 = 15;
    /// Street number missing on either side. Still counted toward the max.
    pub const STREET_NUMBER_MISSING: u32 = 10;

    pub const STREET_NAME: u32 = 25;
    /// Weight used for street names in the partial band.
    pub const STREET_NAME_PARTIAL: u32 = 20;

    pub const PROPERTY_NAME: u32 = 20;
    /// Flat credit when one name is contained in the other.
    pub const PROPERTY_NAME_SUBSTRING: u32 = 10;

    pub const FULL_ADDRESS: u32 = 15;

    /// City + state context, only counted when the subject carries either.
    pub const LOCATION: u32 = 10;
    pub const CITY: u32 = 5;
    pub const STATE: u32 = 5;
}

/// Similarity cut-offs (0–100) for each signal.
pub mod similarity_bands {
    pub const STREET_NAME_STRONG: u8 = 80;
    pub const STREET_NAME_PARTIAL: u8 = 60;

    pub const PROPERTY_NAME_STRONG: u8 = 70;
    pub const PROPERTY_NAME_PARTIAL: u8 = 50;

    pub const FULL_ADDRESS_MIN: u8 = 70;
}

/// Bands that decide a competitive edge's status.
pub mod edge_bands {
    /// Subject rents more than this % above competitors is a disadvantage,
    /// more than this % below is an advantage.
    pub const PRICING_PCT: f64 = 10.0;
    /// Average square footage difference.
    pub const SIZE_SQFT: f64 = 50.0;
    /// Difference in available unit counts.
    pub const AVAILABILITY_UNITS: i64 = 2;

    /// Percentile tiers standing in for amenity data.
    pub const AMENITY_ADVANTAGE_PERCENTILE: u8 = 60;
    pub const AMENITY_NEUTRAL_PERCENTILE: u8 = 40;
    pub const AMENITY_ADVANTAGE_EDGE: f64 = 75.0;
    pub const AMENITY_NEUTRAL_EDGE: f64 = 50.0;
    pub const AMENITY_DISADVANTAGE_EDGE: f64 = 25.0;
}

/// Pricing power composition and rule-table bands.
pub mod pricing_power {
    /// Percentile rank reported when no competitor rent is known.
    pub const DEFAULT_PERCENTILE: u8 = 50;
    pub const SIZE_BONUS: i32 = 10;
    pub const AMENITY_BONUS: i32 = 5;
    pub const SCORE_MIN: i32 = 0;
    pub const SCORE_MAX: i32 = 100;

    /// Above this percentile the subject is premium-positioned.
    pub const PREMIUM_PERCENTILE: u8 = 75;
    /// Below this percentile the subject sits in the bottom quartile.
    pub const BOTTOM_QUARTILE_PERCENTILE: u8 = 25;
}

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    /// Override for MATCH_THRESHOLD (MATCH_THRESHOLD)
    pub match_threshold: u8,
    /// Candidates per blocking task (BATCH_CHUNK_SIZE)
    pub batch_chunk_size: usize,
    /// Memoize normalization per raw string (NORMALIZATION_CACHE=on|off)
    pub normalization_cache: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            match_threshold: MATCH_THRESHOLD,
            batch_chunk_size: BATCH_CHUNK_SIZE,
            normalization_cache: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let match_threshold = match lookup("MATCH_THRESHOLD") {
            Some(raw) => raw
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|t| *t <= 100)
                .ok_or_else(|| {
                    AppError::Config("MATCH_THRESHOLD must be an integer in 0..=100".to_string())
                })?,
            None => MATCH_THRESHOLD,
        };

        let batch_chunk_size = match lookup("BATCH_CHUNK_SIZE") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    AppError::Config("BATCH_CHUNK_SIZE must be a positive integer".to_string())
                })?,
            None => BATCH_CHUNK_SIZE,
        };

        let normalization_cache = match lookup("NORMALIZATION_CACHE").as_deref().map(str::trim) {
            None | Some("") | Some("off") | Some("0") | Some("false") => false,
            Some("on") | Some("1") | Some("true") => true,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "NORMALIZATION_CACHE must be on or off, got {other:?}"
                )))
            }
        };

        Ok(Self {
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            match_threshold,
            batch_chunk_size,
            normalization_cache,
        })
    }
}
