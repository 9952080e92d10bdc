use crate::config::pricing_power::{BOTTOM_QUARTILE_PERCENTILE, PREMIUM_PERCENTILE};
use crate::types::{CompetitiveEdges, EdgeStatus};

pub const PREMIUM_POSITIONING: &str = "Premium market positioning";
pub const PRICED_BELOW_MARKET: &str = "Rents priced below competitor average";
pub const LARGER_UNITS: &str = "Larger average unit size than competitors";
pub const MORE_INVENTORY: &str = "More available inventory than competitors";
pub const AMENITIES_ABOVE_MARKET: &str = "Amenity positioning above market";

pub const REVIEW_PRICING: &str = "Review pricing: average rent is more than 10% above competitors";
pub const RAISE_TOWARD_MARKET: &str = "Consider gradual rent increases toward the competitor average";
pub const OFFSET_SMALLER_UNITS: &str = "Highlight layout and amenities to offset smaller unit sizes";
pub const HOLD_RENTS_FIRM: &str = "Limited availability supports holding rents firm";
pub const BOTTOM_QUARTILE: &str =
    "Rents sit in the bottom quartile of the market; evaluate room for increases";
pub const MAINTAIN_STRATEGY: &str = "Maintain current pricing strategy";

/// Strengths worth surfacing, in a fixed order.
pub fn competitive_advantages(percentile_rank: u8, edges: &CompetitiveEdges) -> Vec<String> {
    let mut out = Vec::new();
    if percentile_rank > PREMIUM_PERCENTILE {
        out.push(PREMIUM_POSITIONING);
    }
    if edges.pricing.status == EdgeStatus::Advantage {
        out.push(PRICED_BELOW_MARKET);
    }
    if edges.size.status == EdgeStatus::Advantage {
        out.push(LARGER_UNITS);
    }
    if edges.availability.status == EdgeStatus::Advantage {
        out.push(MORE_INVENTORY);
    }
    if edges.amenities.status == EdgeStatus::Advantage {
        out.push(AMENITIES_ABOVE_MARKET);
    }
    out.into_iter().map(str::to_string).collect()
}

/// Pricing actions derived from the numbers. Never empty.
pub fn recommendations(percentile_rank: u8, edges: &CompetitiveEdges) -> Vec<String> {
    let mut out = Vec::new();
    match edges.pricing.status {
        EdgeStatus::Disadvantage => out.push(REVIEW_PRICING),
        EdgeStatus::Advantage => out.push(RAISE_TOWARD_MARKET),
        EdgeStatus::Neutral => {}
    }
    if edges.size.status == EdgeStatus::Disadvantage {
        out.push(OFFSET_SMALLER_UNITS);
    }
    if edges.availability.status == EdgeStatus::Disadvantage {
        out.push(HOLD_RENTS_FIRM);
    }
    if percentile_rank < BOTTOM_QUARTILE_PERCENTILE {
        out.push(BOTTOM_QUARTILE);
    }
    if out.is_empty() {
        out.push(MAINTAIN_STRATEGY);
    }
    out.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CompetitiveEdge;
    use crate::types::EdgeStatus::{Advantage as A, Disadvantage as D, Neutral as N};

    fn edge(status: EdgeStatus) -> CompetitiveEdge {
        CompetitiveEdge {
            edge: 0.0,
            label: String::new(),
            status,
        }
    }

    fn edges(pricing: EdgeStatus, size: EdgeStatus, availability: EdgeStatus, amenities: EdgeStatus) -> CompetitiveEdges {
        CompetitiveEdges {
            pricing: edge(pricing),
            size: edge(size),
            availability: edge(availability),
            amenities: edge(amenities),
        }
    }

    #[test]
    fn premium_band_is_an_advantage() {
        let adv = competitive_advantages(80, &edges(N, N, N, A));
        assert_eq!(adv, vec![PREMIUM_POSITIONING, AMENITIES_ABOVE_MARKET]);
    }

    #[test]
    fn neutral_everything_has_no_advantages_and_maintains() {
        let e = edges(N, N, N, N);
        assert!(competitive_advantages(50, &e).is_empty());
        assert_eq!(recommendations(50, &e), vec![MAINTAIN_STRATEGY]);
    }

    #[test]
    fn pricing_disadvantage_triggers_review() {
        let recs = recommendations(90, &edges(D, N, N, A));
        assert_eq!(recs, vec![REVIEW_PRICING]);
    }

    #[test]
    fn weak_position_collects_every_applicable_rule_in_order() {
        let recs = recommendations(10, &edges(A, D, D, D));
        assert_eq!(
            recs,
            vec![RAISE_TOWARD_MARKET, OFFSET_SMALLER_UNITS, HOLD_RENTS_FIRM, BOTTOM_QUARTILE]
        );
        let adv = competitive_advantages(10, &edges(A, D, D, D));
        assert_eq!(adv, vec![PRICED_BELOW_MARKET]);
    }
}
