use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub type AuthorId = i64;

/// Prediction recorded when no label can be read from the model output.
pub const UNPARSEABLE_PREDICTION: AuthorId = -1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledText {
    pub text: String,
    #[serde(rename = "labels", alias = "label")]
    pub label: AuthorId,
}

/// One row of the raw blog corpus; every other column is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct BlogPost {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSetEntry {
    pub query_author: AuthorId,
    pub query_text: String,
    pub candidate_authors: Vec<AuthorId>,
    pub candidate_texts: BTreeMap<AuthorId, String>,
}

impl CandidateSetEntry {
    /// Exemplars in `candidate_authors` order.
    pub fn exemplars(&self) -> Vec<(AuthorId, &str)> {
        self.candidate_authors
            .iter()
            .filter_map(|author| {
                self.candidate_texts
                    .get(author)
                    .map(|text| (*author, text.as_str()))
            })
            .collect()
    }
}

/// Candidate sets keyed by the positional index of their test row.
pub type CandidateSets = BTreeMap<usize, CandidateSetEntry>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub input_text: String,
    pub true_author: AuthorId,
    pub raw_model_output: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub accuracy: f64,
    pub macro_precision: f64,
    pub macro_recall: f64,
    pub macro_f1: f64,
    pub micro_precision: f64,
    pub micro_recall: f64,
    pub micro_f1: f64,
}

impl MetricsReport {
    pub fn entries(&self) -> [(&'static str, f64); 7] {
        [
            ("accuracy", self.accuracy),
            ("macro_precision", self.macro_precision),
            ("macro_recall", self.macro_recall),
            ("macro_f1", self.macro_f1),
            ("micro_precision", self.micro_precision),
            ("micro_recall", self.micro_recall),
            ("micro_f1", self.micro_f1),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub author: AuthorId,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputFingerprint {
    pub path: String,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PrepareRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub generated_at: String,
    pub source: InputFingerprint,
    pub seed: u64,
    pub num_authors: usize,
    pub author_ids: Vec<String>,
    pub train_count: usize,
    pub val_count: usize,
    pub test_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SampleRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub generated_at: String,
    pub train: InputFingerprint,
    pub test: InputFingerprint,
    pub seed: u64,
    pub candidate_authors: Vec<AuthorId>,
    pub entry_count: usize,
    pub output_path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassifyRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub started_at: String,
    pub finished_at: String,
    pub model: String,
    pub candidate_sets: InputFingerprint,
    pub prompt_template: Option<String>,
    pub max_retries: u32,
    pub initial_backoff_ms: u64,
    pub total_count: usize,
    pub succeeded_count: usize,
    pub failed_count: usize,
    pub output_path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub manifest_version: u32,
    pub generated_at: String,
    pub input: InputFingerprint,
    pub parse_mode: String,
    pub total_count: usize,
    pub unparseable_count: usize,
    pub empty_output_count: usize,
    pub metrics: MetricsReport,
    pub per_class: Vec<ClassMetrics>,
}
