use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use super::text::{extract_street_name, normalize_address, normalize_property_name};

/// Normalization as seen by the matcher.
pub trait Normalize: Send + Sync {
    fn address(&self, raw: &str) -> String;
    fn property_name(&self, raw: &str) -> String;
    /// Street portion of a raw address, as produced by [`extract_street_name`].
    fn street_name(&self, raw: &str) -> String;
}

/// Recomputes on every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct Plain;

impl Normalize for Plain {
    fn address(&self, raw: &str) -> String {
        normalize_address(raw)
    }

    fn property_name(&self, raw: &str) -> String {
        normalize_property_name(raw)
    }

    fn street_name(&self, raw: &str) -> String {
        extract_street_name(raw)
    }
}

/// Memoizes normalization per raw input string. Shared across batch workers.
#[derive(Debug, Default)]
pub struct NormalizationCache {
    /// raw address → normalized address
    addresses: DashMap<String, String>,
    /// raw name → normalized name
    names: DashMap<String, String>,
    /// raw address → street name
    streets: DashMap<String, String>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl NormalizationCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lookup(&self, map: &DashMap<String, String>, raw: &str, f: fn(&str) -> String) -> String {
        if let Some(hit) = map.get(raw) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return hit.value().clone();
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        let normalized = f(raw);
        map.insert(raw.to_string(), normalized.clone());
        normalized
    }

    /// (hits, misses) since creation.
    pub fn stats(&self) -> (u64, u64) {
        (
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }

    pub fn len(&self) -> usize {
        self.addresses.len() + self.names.len() + self.streets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Normalize for NormalizationCache {
    fn address(&self, raw: &str) -> String {
        self.lookup(&self.addresses, raw, normalize_address)
    }

    fn property_name(&self, raw: &str) -> String {
        self.lookup(&self.names, raw, normalize_property_name)
    }

    fn street_name(&self, raw: &str) -> String {
        self.lookup(&self.streets, raw, extract_street_name)
    }
}
