use std::collections::{BTreeMap, BTreeSet};

use anyhow::{Context, Result, bail};
use regex::Regex;
use tracing::info;

use crate::cli::{ParseMode, ScoreArgs};
use crate::model::{
    AuthorId, ClassMetrics, MetricsReport, ResultRecord, ScoreReport, UNPARSEABLE_PREDICTION,
};
use crate::util::{
    ensure_input_file, fingerprint, now_utc_string, read_csv_records, write_json_pretty,
};

mod metrics;
mod parse;
mod run;

pub use metrics::{Evaluation, compute_metrics, evaluate_records};
pub use parse::{PredictionParser, parse_model_output};
pub use run::run;
