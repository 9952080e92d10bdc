use tracing::info;

use crate::analytics::advice::{competitive_advantages, recommendations};
use crate::config::edge_bands as band;
use crate::config::pricing_power as pp;
use crate::filter::{is_available_now, FilterStats, UnitFilter};
use crate::types::{
    CompetitiveEdge, CompetitiveEdges, EdgeStatus, FilterCriteria, FilteredAnalysisResult, UnitRecord,
};

/// Mean of the known values, 0 when none are known.
fn mean(values: impl Iterator<Item = Option<f64>>) -> f64 {
    let (sum, n) = values
        .flatten()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Share of competitor units renting below the subject's average, 0–100.
/// 50 when no competitor rent is known.
pub fn percentile_rank(subject_avg_rent: f64, competitors: &[&UnitRecord]) -> u8 {
    let known: Vec<f64> = competitors.iter().filter_map(|u| u.rent).collect();
    if known.is_empty() {
        return pp::DEFAULT_PERCENTILE;
    }
    let below = known.iter().filter(|r| **r < subject_avg_rent).count();
    (100.0 * below as f64 / known.len() as f64).round() as u8
}

/// Rent premium of subject over competitors in percent. Paying more is a disadvantage.
pub fn pricing_edge(subject_avg_rent: f64, competitor_avg_rent: f64) -> CompetitiveEdge {
    let edge = if competitor_avg_rent == 0.0 {
        0.0
    } else {
        (subject_avg_rent - competitor_avg_rent) / competitor_avg_rent * 100.0
    };
    let status = if edge > band::PRICING_PCT {
        EdgeStatus::Disadvantage
    } else if edge < -band::PRICING_PCT {
        EdgeStatus::Advantage
    } else {
        EdgeStatus::Neutral
    };
    CompetitiveEdge {
        edge,
        label: format!("{edge:+.1}% vs market"),
        status,
    }
}

pub fn size_edge(subject_avg_sq_ft: f64, competitor_avg_sq_ft: f64) -> CompetitiveEdge {
    let edge = subject_avg_sq_ft - competitor_avg_sq_ft;
    let status = if edge > band::SIZE_SQFT {
        EdgeStatus::Advantage
    } else if edge < -band::SIZE_SQFT {
        EdgeStatus::Disadvantage
    } else {
        EdgeStatus::Neutral
    };
    CompetitiveEdge {
        edge,
        label: format!("{edge:+.0} sq ft"),
        status,
    }
}

pub fn availability_edge(subject_available: usize, competitor_available: usize) -> CompetitiveEdge {
    let edge = subject_available as i64 - competitor_available as i64;
    let status = if edge > band::AVAILABILITY_UNITS {
        EdgeStatus::Advantage
    } else if edge < -band::AVAILABILITY_UNITS {
        EdgeStatus::Disadvantage
    } else {
        EdgeStatus::Neutral
    };
    CompetitiveEdge {
        edge: edge as f64,
        label: format!("{edge:+} units"),
        status,
    }
}

/// Amenity data is not modeled; percentile tiers stand in for it.
pub fn amenities_edge(percentile_rank: u8) -> CompetitiveEdge {
    let (edge, label, status) = if percentile_rank > band::AMENITY_ADVANTAGE_PERCENTILE {
        (band::AMENITY_ADVANTAGE_EDGE, "Above market", EdgeStatus::Advantage)
    } else if percentile_rank > band::AMENITY_NEUTRAL_PERCENTILE {
        (band::AMENITY_NEUTRAL_EDGE, "At market", EdgeStatus::Neutral)
    } else {
        (band::AMENITY_DISADVANTAGE_EDGE, "Below market", EdgeStatus::Disadvantage)
    };
    CompetitiveEdge {
        edge,
        label: label.to_string(),
        status,
    }
}

fn bonus(status: EdgeStatus, points: i32) -> i32 {
    match status {
        EdgeStatus::Advantage => points,
        EdgeStatus::Disadvantage => -points,
        EdgeStatus::Neutral => 0,
    }
}

/// `clamp(percentile + size bonus + amenity bonus, 0, 100)`.
pub fn pricing_power_score(percentile_rank: u8, edges: &CompetitiveEdges) -> u8 {
    let raw = percentile_rank as i32
        + bonus(edges.size.status, pp::SIZE_BONUS)
        + bonus(edges.amenities.status, pp::AMENITY_BONUS);
    raw.clamp(pp::SCORE_MIN, pp::SCORE_MAX) as u8
}

/// Rank the subject against competitors over already-filtered units.
pub fn analyze(units: &[&UnitRecord]) -> FilteredAnalysisResult {
    let (subject, competitors): (Vec<&UnitRecord>, Vec<&UnitRecord>) =
        units.iter().copied().partition(|u| u.is_subject);

    let subject_avg_rent = mean(subject.iter().map(|u| u.rent));
    let competitor_avg_rent = mean(competitors.iter().map(|u| u.rent));
    let subject_avg_sq_ft = mean(subject.iter().map(|u| u.square_footage));
    let competitor_avg_sq_ft = mean(competitors.iter().map(|u| u.square_footage));

    let percentile_rank = percentile_rank(subject_avg_rent, &competitors);

    let available = |units: &[&UnitRecord]| {
        units
            .iter()
            .filter(|u| is_available_now(u.status.as_deref()))
            .count()
    };

    let competitive_edges = CompetitiveEdges {
        pricing: pricing_edge(subject_avg_rent, competitor_avg_rent),
        size: size_edge(subject_avg_sq_ft, competitor_avg_sq_ft),
        availability: availability_edge(available(&subject), available(&competitors)),
        amenities: amenities_edge(percentile_rank),
    };
    let pricing_power_score = pricing_power_score(percentile_rank, &competitive_edges);

    info!(
        subject_units = subject.len(),
        competitor_units = competitors.len(),
        percentile_rank,
        pricing_power_score,
        "[ANALYTICS] pricing={} size={} availability={} amenities={}",
        competitive_edges.pricing.status,
        competitive_edges.size.status,
        competitive_edges.availability.status,
        competitive_edges.amenities.status,
    );

    FilteredAnalysisResult {
        subject_avg_rent,
        competitor_avg_rent,
        subject_avg_sq_ft,
        competitor_avg_sq_ft,
        subject_unit_count: subject.len(),
        competitor_unit_count: competitors.len(),
        percentile_rank,
        pricing_power_score,
        competitive_advantages: competitive_advantages(percentile_rank, &competitive_edges),
        recommendations: recommendations(percentile_rank, &competitive_edges),
        competitive_edges,
    }
}

/// Filter then analyze in one pass.
pub fn analyze_filtered(
    units: &[UnitRecord],
    criteria: &FilterCriteria,
    filter: &UnitFilter,
) -> (FilteredAnalysisResult, FilterStats) {
    let (kept, stats) = filter.apply(units, criteria);
    (analyze(&kept), stats)
}
