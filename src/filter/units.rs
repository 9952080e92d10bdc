use serde::Serialize;
use tracing::info;

use crate::filter::soft::{RentBandProxy, SoftFilterStrategy};
use crate::types::{AvailabilityWindow, FilterCriteria, NumericRange, UnitRecord};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterStats {
    pub input: usize,
    pub rejected_bedrooms: usize,
    pub rejected_price: usize,
    pub rejected_square_footage: usize,
    pub rejected_availability: usize,
    pub rejected_soft: usize,
    pub kept: usize,
}

/// Bedroom count for filtering: the explicit field, else parsed from the
/// unit type text. Anything unreadable counts as a studio.
pub fn bedroom_count(unit: &UnitRecord) -> u32 {
    unit.bedrooms
        .unwrap_or_else(|| unit.unit_type.as_deref().map(parse_unit_type).unwrap_or(0))
}

/// `"Studio"` → 0, `"2BR"` / `"2 Bed"` → 2, anything unreadable → 0.
pub fn parse_unit_type(unit_type: &str) -> u32 {
    let lower = unit_type.to_lowercase();
    if lower.contains("studio") {
        return 0;
    }
    lower
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect::<String>()
        .parse()
        .unwrap_or(0)
}

/// Status text reads as available right now.
pub fn is_available_now(status: Option<&str>) -> bool {
    let Some(status) = status else { return false };
    let lower = status.trim().to_lowercase();
    lower.contains("available") || lower.contains("immediate") || lower == "now"
}

fn is_occupied(status: Option<&str>) -> bool {
    status.is_some_and(|s| s.trim().eq_ignore_ascii_case("occupied"))
}

fn passes_availability(unit: &UnitRecord, window: AvailabilityWindow) -> bool {
    match window {
        AvailabilityWindow::Now => is_available_now(unit.status.as_deref()),
        AvailabilityWindow::ThirtyDays => !is_occupied(unit.status.as_deref()),
        // No filtering at this horizon.
        AvailabilityWindow::SixtyDays => true,
    }
}

/// Missing values pass: absent data never drops inventory.
fn within(range: Option<&NumericRange>, value: Option<f64>) -> bool {
    match (range, value) {
        (Some(range), Some(value)) => range.contains(value),
        _ => true,
    }
}

/// Applies [`FilterCriteria`] to a unit collection. Hard criteria (bedrooms,
/// price, size, availability) run first, then the soft-filter strategy.
pub struct UnitFilter {
    soft: Box<dyn SoftFilterStrategy>,
}

impl Default for UnitFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitFilter {
    pub fn new() -> Self {
        Self::with_strategy(Box::new(RentBandProxy))
    }

    pub fn with_strategy(soft: Box<dyn SoftFilterStrategy>) -> Self {
        Self { soft }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.soft.name()
    }

    /// Returns references into `units`, in input order.
    pub fn apply<'a>(
        &self,
        units: &'a [UnitRecord],
        criteria: &FilterCriteria,
    ) -> (Vec<&'a UnitRecord>, FilterStats) {
        let mut stats = FilterStats {
            input: units.len(),
            ..FilterStats::default()
        };

        let mut hard = Vec::with_capacity(units.len());
        for unit in units {
            if !criteria.bedroom_types.is_empty()
                && !criteria
                    .bedroom_types
                    .iter()
                    .any(|t| t.bedrooms() == bedroom_count(unit))
            {
                stats.rejected_bedrooms += 1;
                continue;
            }
            if !within(criteria.price_range.as_ref(), unit.rent) {
                stats.rejected_price += 1;
                continue;
            }
            if !within(criteria.square_footage_range.as_ref(), unit.square_footage) {
                stats.rejected_square_footage += 1;
                continue;
            }
            if let Some(window) = criteria.availability {
                if !passes_availability(unit, window) {
                    stats.rejected_availability += 1;
                    continue;
                }
            }
            hard.push(unit);
        }

        let before_soft = hard.len();
        let kept = self.soft.apply(hard, criteria);
        stats.rejected_soft = before_soft.saturating_sub(kept.len());
        stats.kept = kept.len();

        info!(
            input = stats.input,
            kept = stats.kept,
            strategy = self.soft.name(),
            "[FILTER] rejected: bedrooms={} price={} sqft={} availability={} soft={}",
            stats.rejected_bedrooms,
            stats.rejected_price,
            stats.rejected_square_footage,
            stats.rejected_availability,
            stats.rejected_soft,
        );

        (kept, stats)
    }
}

/// Filter with the default strategy and return owned copies.
pub fn filter_units(units: &[UnitRecord], criteria: &FilterCriteria) -> Vec<UnitRecord> {
    let (kept, _) = UnitFilter::new().apply(units, criteria);
    kept.into_iter().cloned().collect()
}
