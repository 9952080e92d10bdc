use serde::{Deserialize, Serialize};

use crate::analytics::analyze_filtered;
use crate::batch::{best_match, BatchMatcher, TaggedCandidate};
use crate::config::Config;
use crate::error::Result;
use crate::filter::{FilterStats, UnitFilter};
use crate::types::{CandidateRecord, FilterCriteria, FilteredAnalysisResult, SubjectDescriptor, UnitRecord};

/// One unit of work for the engine, as read from a request file.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Request {
    Match {
        subject: SubjectDescriptor,
        #[serde(default)]
        candidates: Vec<CandidateRecord>,
    },
    Analyze {
        #[serde(default)]
        units: Vec<UnitRecord>,
        #[serde(default)]
        criteria: FilterCriteria,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Response {
    #[serde(rename_all = "camelCase")]
    Match {
        candidates: Vec<TaggedCandidate>,
        /// URL of the best-scoring subject match, if any.
        best_match: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Analyze {
        analysis: FilteredAnalysisResult,
        filter_stats: FilterStats,
    },
}

pub fn parse_request(raw: &str) -> Result<Request> {
    Ok(serde_json::from_str(raw)?)
}

pub async fn handle(cfg: &Config, request: Request) -> Result<Response> {
    match request {
        Request::Match { subject, candidates } => {
            let batch = BatchMatcher::from_config(cfg);
            let candidates = batch.run(subject, candidates).await?;
            let best_match = best_match(&candidates).map(|t| t.candidate.url.clone());
            Ok(Response::Match {
                candidates,
                best_match,
            })
        }
        Request::Analyze { units, criteria } => {
            let (analysis, filter_stats) = analyze_filtered(&units, &criteria, &UnitFilter::new());
            Ok(Response::Analyze {
                analysis,
                filter_stats,
            })
        }
    }
}
