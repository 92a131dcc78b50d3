use std::collections::BTreeMap;

use anyhow::{Result, bail};
use chrono::Utc;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};

use crate::cli::SampleArgs;
use crate::model::{AuthorId, CandidateSetEntry, CandidateSets, LabeledText, SampleRunManifest};
use crate::util::{
    ensure_input_file, fingerprint, now_utc_string, prepare_output_file, read_csv_records,
    utc_compact_string, write_json_pretty,
};

mod builder;
mod grouping;
mod run;
#[cfg(test)]
mod tests;

pub use builder::build_candidate_sets;
pub use grouping::AuthorGroups;
pub use run::run;
