use std::sync::Arc;

use tracing::debug;

use crate::config::{match_weights as w, similarity_bands as band, Config, MATCH_THRESHOLD};
use crate::matcher::similarity::similarity;
use crate::normalizer::{extract_street_number, Normalize, Plain};
use crate::types::{CandidateRecord, CandidateTag, ComponentScores, MatchResult, SubjectDescriptor};

/// One signal's contribution plus the annotation explaining it.
struct Signal {
    points: u32,
    reason: String,
}

impl Signal {
    fn new(points: u32, reason: impl Into<String>) -> Self {
        Self {
            points,
            reason: reason.into(),
        }
    }
}

/// `round(sim / 100 * weight)`.
fn scaled(sim: u8, weight: u32) -> u32 {
    (sim as f64 / 100.0 * weight as f64).round() as u32
}

/// Decides whether a scraped candidate listing is the subject property.
///
/// Stateless apart from its configuration; cheap to clone and share across
/// workers. Normalization goes through a [`Normalize`] so a memo cache can
/// be slotted in without touching the scoring rules.
#[derive(Clone)]
pub struct PropertyMatcher {
    normalizer: Arc<dyn Normalize>,
    threshold: u8,
}

impl Default for PropertyMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyMatcher {
    pub fn new() -> Self {
        Self {
            normalizer: Arc::new(Plain),
            threshold: MATCH_THRESHOLD,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        let matcher = Self::new().with_threshold(cfg.match_threshold);
        if cfg.normalization_cache {
            matcher.with_normalizer(Arc::new(crate::normalizer::NormalizationCache::new()))
        } else {
            matcher
        }
    }

    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold.min(100);
        self
    }

    pub fn with_normalizer(mut self, normalizer: Arc<dyn Normalize>) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Score one (subject, candidate) pair.
    ///
    /// A blank street name, full address or property name on either side
    /// earns zero for that signal, even though `similarity("", "")` is 100
    /// and `""` is a substring of everything. Two records with nothing to
    /// compare must not match. Only the street-number signal keeps its
    /// partial credit for a missing value.
    pub fn score(&self, subject: &SubjectDescriptor, candidate: &CandidateRecord) -> MatchResult {
        let mut max_possible = w::STREET_NUMBER + w::STREET_NAME + w::PROPERTY_NAME + w::FULL_ADDRESS;

        let street_number = street_number_signal(&subject.address, &candidate.address);
        let street_name = street_name_signal(
            &self.normalizer.street_name(&subject.address),
            &self.normalizer.street_name(&candidate.address),
        );
        let property_name = self.property_name_signal(&subject.name, &candidate.name);

        let subject_address = self.normalizer.address(&subject.address);
        let candidate_address = self.normalizer.address(&candidate.address);
        let full_address = full_address_signal(&subject_address, &candidate_address);

        let mut signals = vec![street_number, street_name, property_name, full_address];
        let mut location_points = 0;
        if let Some(location) = self.location_signals(subject, &candidate_address) {
            max_possible += w::LOCATION;
            for signal in location {
                location_points += signal.points;
                signals.push(signal);
            }
        }

        let component_scores = ComponentScores {
            street_number: signals[0].points,
            street_name: signals[1].points,
            property_name: signals[2].points,
            full_address: signals[3].points,
            location: location_points,
        };
        let total = component_scores.total();

        let score = if max_possible == 0 {
            0
        } else {
            ((total as f64 / max_possible as f64) * 100.0).round().min(100.0) as u8
        };
        let is_match = max_possible > 0 && score >= self.threshold;

        debug!(
            score,
            is_match,
            total,
            max_possible,
            street_number = component_scores.street_number,
            street_name = component_scores.street_name,
            property_name = component_scores.property_name,
            full_address = component_scores.full_address,
            location = component_scores.location,
            "[MATCH] {:?} vs {:?} → {score}",
            subject.name,
            candidate.name,
        );

        MatchResult {
            score,
            is_match,
            reasons: signals.into_iter().map(|s| s.reason).collect(),
            component_scores,
        }
    }

    fn property_name_signal(&self, subject: &str, candidate: &str) -> Signal {
        let a = self.normalizer.property_name(subject);
        let b = self.normalizer.property_name(candidate);
        if a.is_empty() || b.is_empty() {
            return Signal::new(0, "Property name missing");
        }

        let sim = similarity(&a, &b);
        if sim >= band::PROPERTY_NAME_STRONG {
            Signal::new(w::PROPERTY_NAME, format!("Property name match ({sim}% similar)"))
        } else if sim >= band::PROPERTY_NAME_PARTIAL {
            Signal::new(
                scaled(sim, w::PROPERTY_NAME),
                format!("Property name partial match ({sim}% similar)"),
            )
        } else if a.contains(b.as_str()) || b.contains(a.as_str()) {
            Signal::new(
                w::PROPERTY_NAME_SUBSTRING,
                format!("Property name partial match ({b:?} / {a:?} contained)"),
            )
        } else {
            Signal::new(0, format!("Property name mismatch ({sim}% similar)"))
        }
    }

    /// None when the subject carries neither city nor state.
    fn location_signals(&self, subject: &SubjectDescriptor, candidate_address: &str) -> Option<Vec<Signal>> {
        let city = non_blank(subject.city.as_deref()).map(|c| self.normalizer.address(c));
        let state = non_blank(subject.state.as_deref()).map(|s| self.normalizer.address(s));
        if city.is_none() && state.is_none() {
            return None;
        }

        let mut signals = Vec::with_capacity(2);
        if let Some(city) = city {
            signals.push(context_signal("City", &city, w::CITY, candidate_address));
        }
        if let Some(state) = state {
            signals.push(context_signal("State", &state, w::STATE, candidate_address));
        }
        Some(signals)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn context_signal(label: &str, needle: &str, points: u32, candidate_address: &str) -> Signal {
    if !needle.is_empty() && candidate_address.contains(needle) {
        Signal::new(points, format!("{label} match ({needle})"))
    } else {
        Signal::new(0, format!("{label} mismatch ({needle} not in candidate address)"))
    }
}

fn street_number_signal(subject: &str, candidate: &str) -> Signal {
    let a = extract_street_number(subject);
    let b = extract_street_number(candidate);

    if a.is_empty() || b.is_empty() {
        Signal::new(w::STREET_NUMBER_MISSING, "Street number missing (partial credit)")
    } else if a == b {
        Signal::new(w::STREET_NUMBER, format!("Street number match ({a})"))
    } else if a.starts_with(b.as_str()) || b.starts_with(a.as_str()) {
        Signal::new(w::STREET_NUMBER_PREFIX, format!("Street number partial match ({a} / {b})"))
    } else {
        Signal::new(0, format!("Street number mismatch ({a} / {b})"))
    }
}

fn street_name_signal(a: &str, b: &str) -> Signal {
    if a.is_empty() || b.is_empty() {
        return Signal::new(0, "Street name missing");
    }

    let sim = similarity(a, b);
    if sim >= band::STREET_NAME_STRONG {
        Signal::new(scaled(sim, w::STREET_NAME), format!("Street name match ({sim}% similar)"))
    } else if sim >= band::STREET_NAME_PARTIAL {
        Signal::new(
            scaled(sim, w::STREET_NAME_PARTIAL),
            format!("Street name partial match ({sim}% similar)"),
        )
    } else {
        Signal::new(0, format!("Street name mismatch ({sim}% similar)"))
    }
}

fn full_address_signal(subject: &str, candidate: &str) -> Signal {
    if subject.is_empty() || candidate.is_empty() {
        return Signal::new(0, "Full address missing");
    }
    let sim = similarity(subject, candidate);
    if sim >= band::FULL_ADDRESS_MIN {
        Signal::new(scaled(sim, w::FULL_ADDRESS), format!("Full address match ({sim}% similar)"))
    } else {
        Signal::new(0, format!("Full address mismatch ({sim}% similar)"))
    }
}

/// Score with the default matcher (plain normalization, default threshold).
pub fn match_property(subject: &SubjectDescriptor, candidate: &CandidateRecord) -> MatchResult {
    PropertyMatcher::new().score(subject, candidate)
}

/// File a scored candidate as the subject itself or as a competitor.
pub fn tag_candidate(result: &MatchResult) -> CandidateTag {
    if result.is_match {
        CandidateTag::Subject
    } else {
        CandidateTag::Competitor
    }
}
