use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::info;

use crate::batch::latency::LatencyStats;
use crate::config::Config;
use crate::error::Result;
use crate::matcher::{tag_candidate, PropertyMatcher};
use crate::types::{CandidateRecord, CandidateTag, MatchResult, SubjectDescriptor};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaggedCandidate {
    pub candidate: CandidateRecord,
    pub result: MatchResult,
    pub tag: CandidateTag,
}

/// Scores many candidates against one subject on tokio's blocking pool.
/// Candidates are independent, so chunks run without coordination and
/// results are reassembled in input order.
pub struct BatchMatcher {
    matcher: PropertyMatcher,
    chunk_size: usize,
    /// Every sample since construction. Each run also keeps its own.
    latency: LatencyStats,
}

impl BatchMatcher {
    pub fn new(matcher: PropertyMatcher, chunk_size: usize) -> Self {
        Self {
            matcher,
            chunk_size: chunk_size.max(1),
            latency: LatencyStats::new(),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(PropertyMatcher::from_config(cfg), cfg.batch_chunk_size)
    }

    pub fn latency(&self) -> &LatencyStats {
        &self.latency
    }

    pub async fn run(
        &self,
        subject: SubjectDescriptor,
        candidates: Vec<CandidateRecord>,
    ) -> Result<Vec<TaggedCandidate>> {
        let total = candidates.len();
        let subject = Arc::new(subject);
        let run_latency = Arc::new(LatencyStats::new());

        let mut handles = Vec::with_capacity(total.div_ceil(self.chunk_size));
        let mut remaining = candidates.into_iter();
        loop {
            let chunk: Vec<CandidateRecord> = remaining.by_ref().take(self.chunk_size).collect();
            if chunk.is_empty() {
                break;
            }
            let matcher = self.matcher.clone();
            let subject = Arc::clone(&subject);
            let latency = Arc::clone(&run_latency);
            handles.push(tokio::task::spawn_blocking(move || {
                score_chunk(&matcher, &subject, chunk, &latency)
            }));
        }

        let mut tagged = Vec::with_capacity(total);
        for handle in handles {
            tagged.extend(handle.await?);
        }

        let matches = tagged.iter().filter(|t| t.tag == CandidateTag::Subject).count();
        let (p50, p95, p99) = run_latency.percentiles();
        self.latency.merge(&run_latency);
        info!(
            candidates = total,
            matches,
            "[BATCH] scored {total} candidates against {:?} | matches: {matches} | run latency p50={}us p95={}us p99={}us",
            subject.name,
            p50.unwrap_or(0),
            p95.unwrap_or(0),
            p99.unwrap_or(0),
        );

        Ok(tagged)
    }
}

/// Score a slice of candidates sequentially.
pub fn score_chunk(
    matcher: &PropertyMatcher,
    subject: &SubjectDescriptor,
    chunk: Vec<CandidateRecord>,
    latency: &LatencyStats,
) -> Vec<TaggedCandidate> {
    chunk
        .into_iter()
        .map(|candidate| {
            let started = Instant::now();
            let result = matcher.score(subject, &candidate);
            latency.record(started.elapsed());
            let tag = tag_candidate(&result);
            TaggedCandidate {
                candidate,
                result,
                tag,
            }
        })
        .collect()
}

/// Highest-scoring candidate tagged as the subject. Ties keep the earliest.
pub fn best_match(tagged: &[TaggedCandidate]) -> Option<&TaggedCandidate> {
    tagged
        .iter()
        .filter(|t| t.tag == CandidateTag::Subject)
        .fold(None, |best: Option<&TaggedCandidate>, t| match best {
            Some(b) if b.result.score >= t.result.score => Some(b),
            _ => Some(t),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject() -> SubjectDescriptor {
        SubjectDescriptor {
            name: "Oakwood Apartments".to_string(),
            address: "222 Main St, Springfield, IL".to_string(),
            city: Some("Springfield".to_string()),
            state: Some("IL".to_string()),
        }
    }

    fn candidate(name: &str, address: &str, url: &str) -> CandidateRecord {
        CandidateRecord {
            name: name.to_string(),
            address: address.to_string(),
            url: url.to_string(),
        }
    }

    fn candidates() -> Vec<CandidateRecord> {
        vec![
            candidate("Harbor View", "9 Pier Way, Portland, ME", "a"),
            candidate("Oakwood", "222 Main Street, Springfield, IL", "b"),
            candidate("Elm Court", "100 Elm St, Springfield, IL", "c"),
            candidate("Oakwood Residences", "22 Main St, Springfield, IL", "d"),
            candidate("Maple Commons", "5 Maple Ave, Shelbyville, IL", "e"),
        ]
    }

    #[tokio::test]
    async fn batch_preserves_order_and_matches_sequential_scoring() {
        let batch = BatchMatcher::new(PropertyMatcher::new(), 2);
        let tagged = batch.run(subject(), candidates()).await.unwrap();

        let urls: Vec<&str> = tagged.iter().map(|t| t.candidate.url.as_str()).collect();
        assert_eq!(urls, vec!["a", "b", "c", "d", "e"]);

        let matcher = PropertyMatcher::new();
        for t in &tagged {
            assert_eq!(t.result, matcher.score(&subject(), &t.candidate));
        }
        assert_eq!(batch.latency().len(), 5);
    }

    #[tokio::test]
    async fn batch_tags_subject_and_competitors() {
        let batch = BatchMatcher::new(PropertyMatcher::new(), 64);
        let tagged = batch.run(subject(), candidates()).await.unwrap();

        assert_eq!(tagged[0].tag, CandidateTag::Competitor);
        assert_eq!(tagged[1].tag, CandidateTag::Subject);

        let best = best_match(&tagged).unwrap();
        assert_eq!(best.candidate.url, "b");
    }

    #[tokio::test]
    async fn cumulative_latency_spans_runs() {
        let batch = BatchMatcher::new(PropertyMatcher::new(), 3);
        batch.run(subject(), candidates()).await.unwrap();
        batch.run(subject(), candidates()[..2].to_vec()).await.unwrap();
        assert_eq!(batch.latency().len(), 7);
    }

    #[tokio::test]
    async fn empty_batch_is_empty() {
        let batch = BatchMatcher::new(PropertyMatcher::new(), 0);
        let tagged = batch.run(subject(), Vec::new()).await.unwrap();
        assert!(tagged.is_empty());
        assert!(best_match(&tagged).is_none());
    }

    #[test]
    fn best_match_prefers_earliest_on_ties() {
        let matcher = PropertyMatcher::new();
        let latency = LatencyStats::new();
        let twin = candidate("Oakwood", "222 Main Street, Springfield, IL", "first");
        let mut second = twin.clone();
        second.url = "second".to_string();

        let tagged = score_chunk(&matcher, &subject(), vec![twin, second], &latency);
        assert_eq!(best_match(&tagged).unwrap().candidate.url, "first");
    }
}
