//! Approximate filters for attributes the unit schema does not carry
//! (amenities, lease terms, floor level, renovation status).
//!
//! The default [`RentBandProxy`] reads each request as "premium" or
//! "budget" and keeps the matching half of the rent distribution. It is a
//! heuristic, not ground truth: swap in another [`SoftFilterStrategy`] once
//! authoritative attributes exist.

use tracing::debug;

use crate::types::{FilterCriteria, UnitRecord};

pub trait SoftFilterStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Narrow already hard-filtered units. Must return a subset of `units`.
    fn apply<'a>(&self, units: Vec<&'a UnitRecord>, criteria: &FilterCriteria) -> Vec<&'a UnitRecord>;
}

/// Applies no soft filtering.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassThrough;

impl SoftFilterStrategy for PassThrough {
    fn name(&self) -> &'static str {
        "pass_through"
    }

    fn apply<'a>(&self, units: Vec<&'a UnitRecord>, _criteria: &FilterCriteria) -> Vec<&'a UnitRecord> {
        units
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RentBand {
    /// rent ≥ median
    Upper,
    /// rent ≤ median
    Lower,
}

const SHORT_LEASE_TERMS: &[&str] = &["month-to-month", "month to month", "short", "3 month", "6 month"];
const HIGH_FLOOR_TERMS: &[&str] = &["high", "top", "penthouse"];
const LOW_FLOOR_TERMS: &[&str] = &["low", "ground", "garden", "first"];
const RENOVATED_TERMS: &[&str] = &["renovated", "updated", "new"];
const UNRENOVATED_TERMS: &[&str] = &["unrenovated", "original", "classic"];

fn mentions(text: &str, terms: &[&str]) -> bool {
    let lower = text.to_lowercase();
    terms.iter().any(|t| lower.contains(t))
}

fn amenity_band(amenities: &[String]) -> Option<RentBand> {
    amenities
        .iter()
        .any(|a| !a.trim().is_empty())
        .then_some(RentBand::Upper)
}

fn lease_band(terms: &[String]) -> Option<RentBand> {
    terms
        .iter()
        .any(|t| mentions(t, SHORT_LEASE_TERMS))
        .then_some(RentBand::Upper)
}

fn floor_band(level: Option<&str>) -> Option<RentBand> {
    let level = level?;
    if mentions(level, HIGH_FLOOR_TERMS) {
        Some(RentBand::Upper)
    } else if mentions(level, LOW_FLOOR_TERMS) {
        Some(RentBand::Lower)
    } else {
        None
    }
}

fn renovation_band(status: Option<&str>) -> Option<RentBand> {
    let status = status?;
    // "unrenovated" contains "renovated"; check the budget terms first.
    if mentions(status, UNRENOVATED_TERMS) {
        Some(RentBand::Lower)
    } else if mentions(status, RENOVATED_TERMS) {
        Some(RentBand::Upper)
    } else {
        None
    }
}

/// Median of the known rents, None when no rent is known.
fn median_rent(units: &[&UnitRecord]) -> Option<f64> {
    let mut rents: Vec<f64> = units.iter().filter_map(|u| u.rent).collect();
    if rents.is_empty() {
        return None;
    }
    rents.sort_by(|a, b| a.total_cmp(b));
    let mid = rents.len() / 2;
    Some(if rents.len() % 2 == 0 {
        (rents[mid - 1] + rents[mid]) / 2.0
    } else {
        rents[mid]
    })
}

/// Rent-percentile proxy for soft criteria. Units with unknown rent are kept.
#[derive(Debug, Default, Clone, Copy)]
pub struct RentBandProxy;

impl RentBandProxy {
    /// The single band requested by the criteria, if they agree on one.
    pub fn requested_band(criteria: &FilterCriteria) -> Option<RentBand> {
        let bands: Vec<RentBand> = [
            amenity_band(&criteria.amenities),
            lease_band(&criteria.lease_terms),
            floor_band(criteria.floor_level.as_deref()),
            renovation_band(criteria.renovation_status.as_deref()),
        ]
        .into_iter()
        .flatten()
        .collect();

        let upper = bands.contains(&RentBand::Upper);
        let lower = bands.contains(&RentBand::Lower);
        match (upper, lower) {
            (true, false) => Some(RentBand::Upper),
            (false, true) => Some(RentBand::Lower),
            (true, true) => {
                debug!("[FILTER] soft criteria request both rent bands; skipping proxy");
                None
            }
            (false, false) => None,
        }
    }
}

impl SoftFilterStrategy for RentBandProxy {
    fn name(&self) -> &'static str {
        "rent_band_proxy"
    }

    fn apply<'a>(&self, units: Vec<&'a UnitRecord>, criteria: &FilterCriteria) -> Vec<&'a UnitRecord> {
        let Some(band) = Self::requested_band(criteria) else {
            return units;
        };
        let Some(pivot) = median_rent(&units) else {
            return units;
        };

        debug!(?band, pivot, "[FILTER] applying rent band proxy");
        units
            .into_iter()
            .filter(|u| match (u.rent, band) {
                (None, _) => true,
                (Some(rent), RentBand::Upper) => rent >= pivot,
                (Some(rent), RentBand::Lower) => rent <= pivot,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(rent: Option<f64>) -> UnitRecord {
        UnitRecord {
            rent,
            ..UnitRecord::default()
        }
    }

    fn rents(units: &[&UnitRecord]) -> Vec<Option<f64>> {
        units.iter().map(|u| u.rent).collect()
    }

    #[test]
    fn amenities_keep_upper_half() {
        let pool = [unit(Some(1000.0)), unit(Some(1200.0)), unit(Some(1400.0)), unit(Some(1600.0))];
        let criteria = FilterCriteria {
            amenities: vec!["pool".to_string()],
            ..FilterCriteria::default()
        };
        let kept = RentBandProxy.apply(pool.iter().collect(), &criteria);
        assert_eq!(rents(&kept), vec![Some(1400.0), Some(1600.0)]);
    }

    #[test]
    fn ground_floor_keeps_lower_half_and_unknown_rent() {
        let pool = [unit(Some(900.0)), unit(None), unit(Some(1100.0)), unit(Some(1500.0))];
        let criteria = FilterCriteria {
            floor_level: Some("Ground".to_string()),
            ..FilterCriteria::default()
        };
        let kept = RentBandProxy.apply(pool.iter().collect(), &criteria);
        assert_eq!(rents(&kept), vec![Some(900.0), None, Some(1100.0)]);
    }

    #[test]
    fn conflicting_bands_cancel() {
        let criteria = FilterCriteria {
            amenities: vec!["gym".to_string()],
            renovation_status: Some("original finishes".to_string()),
            ..FilterCriteria::default()
        };
        assert_eq!(RentBandProxy::requested_band(&criteria), None);
    }

    #[test]
    fn unrenovated_reads_as_budget() {
        let criteria = FilterCriteria {
            renovation_status: Some("Unrenovated".to_string()),
            ..FilterCriteria::default()
        };
        assert_eq!(RentBandProxy::requested_band(&criteria), Some(RentBand::Lower));
    }

    #[test]
    fn short_lease_reads_as_premium() {
        let criteria = FilterCriteria {
            lease_terms: vec!["Month-to-Month".to_string()],
            ..FilterCriteria::default()
        };
        assert_eq!(RentBandProxy::requested_band(&criteria), Some(RentBand::Upper));
    }

    #[test]
    fn no_soft_criteria_or_no_rents_passes_through() {
        let pool = [unit(None), unit(None)];
        let criteria = FilterCriteria {
            amenities: vec!["pool".to_string()],
            ..FilterCriteria::default()
        };
        assert_eq!(RentBandProxy.apply(pool.iter().collect(), &criteria).len(), 2);

        let priced = [unit(Some(1.0)), unit(Some(2.0))];
        assert_eq!(
            RentBandProxy.apply(priced.iter().collect(), &FilterCriteria::default()).len(),
            2
        );
    }

    #[test]
    fn pass_through_ignores_criteria() {
        let pool = [unit(Some(1.0)), unit(Some(100.0))];
        let criteria = FilterCriteria {
            amenities: vec!["pool".to_string()],
            ..FilterCriteria::default()
        };
        assert_eq!(PassThrough.apply(pool.iter().collect(), &criteria).len(), 2);
    }
}
