use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::lenient;

// ---------------------------------------------------------------------------
// Identity matching
// ---------------------------------------------------------------------------

/// The property the user manages. Input to every match call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubjectDescriptor {
    pub name: String,
    pub address: String,
    pub city: Option<String>,
    pub state: Option<String>,
}

/// One scraped listing, already reduced to plain text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidateRecord {
    pub name: String,
    pub address: String,
    pub url: String,
}

/// Raw per-signal contribution to a match score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentScores {
    pub street_number: u32,
    pub street_name: u32,
    pub property_name: u32,
    pub full_address: u32,
    pub location: u32,
}

impl ComponentScores {
    pub fn total(&self) -> u32 {
        self.street_number + self.street_name + self.property_name + self.full_address + self.location
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// 0–100.
    pub score: u8,
    pub is_match: bool,
    /// One annotation per evaluated signal, in evaluation order.
    pub reasons: Vec<String>,
    pub component_scores: ComponentScores,
}

/// How the ingestion pipeline files a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateTag {
    Subject,
    Competitor,
}

impl std::fmt::Display for CandidateTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CandidateTag::Subject => write!(f, "subject"),
            CandidateTag::Competitor => write!(f, "competitor"),
        }
    }
}

// ---------------------------------------------------------------------------
// Unit inventory
// ---------------------------------------------------------------------------

/// A rentable unit as supplied by storage. Numeric fields are lenient:
/// numbers, numeric strings, null and absent are all accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UnitRecord {
    pub unit_type: Option<String>,
    #[serde(deserialize_with = "lenient::count")]
    pub bedrooms: Option<u32>,
    #[serde(deserialize_with = "lenient::amount")]
    pub bathrooms: Option<f64>,
    #[serde(deserialize_with = "lenient::amount")]
    pub square_footage: Option<f64>,
    #[serde(deserialize_with = "lenient::amount")]
    pub rent: Option<f64>,
    pub status: Option<String>,
    pub availability_date: Option<String>,
    pub property_id: String,
    pub is_subject: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BedroomType {
    #[serde(rename = "Studio")]
    Studio,
    #[serde(rename = "1BR")]
    OneBedroom,
    #[serde(rename = "2BR")]
    TwoBedroom,
    #[serde(rename = "3BR")]
    ThreeBedroom,
}

impl BedroomType {
    pub fn bedrooms(self) -> u32 {
        match self {
            BedroomType::Studio => 0,
            BedroomType::OneBedroom => 1,
            BedroomType::TwoBedroom => 2,
            BedroomType::ThreeBedroom => 3,
        }
    }

    pub fn from_bedrooms(count: u32) -> Option<Self> {
        match count {
            0 => Some(BedroomType::Studio),
            1 => Some(BedroomType::OneBedroom),
            2 => Some(BedroomType::TwoBedroom),
            3 => Some(BedroomType::ThreeBedroom),
            _ => None,
        }
    }
}

impl std::fmt::Display for BedroomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BedroomType::Studio => "Studio",
            BedroomType::OneBedroom => "1BR",
            BedroomType::TwoBedroom => "2BR",
            BedroomType::ThreeBedroom => "3BR",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvailabilityWindow {
    #[serde(rename = "now")]
    Now,
    #[serde(rename = "30days")]
    ThirtyDays,
    #[serde(rename = "60days")]
    SixtyDays,
}

impl std::fmt::Display for AvailabilityWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AvailabilityWindow::Now => "now",
            AvailabilityWindow::ThirtyDays => "30days",
            AvailabilityWindow::SixtyDays => "60days",
        };
        write!(f, "{s}")
    }
}

/// Inclusive numeric bounds. A missing or unreadable `min` is 0 and a
/// missing or unreadable `max` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    #[serde(default, deserialize_with = "lenient::lower_bound")]
    pub min: f64,
    #[serde(default = "unbounded", deserialize_with = "lenient::upper_bound")]
    pub max: f64,
}

pub(crate) fn unbounded() -> f64 {
    f64::MAX
}

impl NumericRange {
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// Empty set disables bedroom filtering.
    pub bedroom_types: BTreeSet<BedroomType>,
    pub price_range: Option<NumericRange>,
    pub square_footage_range: Option<NumericRange>,
    pub availability: Option<AvailabilityWindow>,
    pub amenities: Vec<String>,
    pub lease_terms: Vec<String>,
    pub floor_level: Option<String>,
    pub renovation_status: Option<String>,
}

// ---------------------------------------------------------------------------
// Competitive analytics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStatus {
    Advantage,
    Neutral,
    Disadvantage,
}

impl std::fmt::Display for EdgeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EdgeStatus::Advantage => "advantage",
            EdgeStatus::Neutral => "neutral",
            EdgeStatus::Disadvantage => "disadvantage",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitiveEdge {
    pub edge: f64,
    pub label: String,
    pub status: EdgeStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitiveEdges {
    pub pricing: CompetitiveEdge,
    pub size: CompetitiveEdge,
    pub availability: CompetitiveEdge,
    pub amenities: CompetitiveEdge,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredAnalysisResult {
    pub subject_avg_rent: f64,
    pub competitor_avg_rent: f64,
    pub subject_avg_sq_ft: f64,
    pub competitor_avg_sq_ft: f64,
    pub subject_unit_count: usize,
    pub competitor_unit_count: usize,
    /// 0–100.
    pub percentile_rank: u8,
    /// 0–100, clamped.
    pub pricing_power_score: u8,
    pub competitive_edges: CompetitiveEdges,
    pub competitive_advantages: Vec<String>,
    pub recommendations: Vec<String>,
}
