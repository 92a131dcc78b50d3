use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cli::ClassifyArgs;
use crate::model::{AuthorId, CandidateSetEntry, CandidateSets, ClassifyRunManifest, ResultRecord};
use crate::util::{
    ensure_input_file, fingerprint, now_utc_string, prepare_output_file, read_json,
    utc_compact_string, write_csv_records, write_json_pretty,
};

mod batch;
mod client;
mod gemini;
mod prompt;
mod retry;
mod run;

pub use batch::{PromptedClassifier, SYSTEM_INSTRUCTION};
pub use client::{GenerationError, GenerationRequest, TextGenerator};
pub use gemini::{DEFAULT_BASE_URL, GeminiClient};
pub use prompt::PromptTemplate;
pub use retry::{RetryPolicy, Sleeper, ThreadSleeper};
pub use run::run;
