use super::*;

/// Strict label parsing: the whole output, minus surrounding whitespace,
/// must be an integer. Anything else yields [`UNPARSEABLE_PREDICTION`].
///
/// Outputs such as `"Author 3"` are deliberately not rescued here, which
/// undercounts correct answers wrapped in extra words.
pub fn parse_model_output(raw: &str) -> AuthorId {
    raw.trim()
        .parse::<AuthorId>()
        .unwrap_or(UNPARSEABLE_PREDICTION)
}

#[derive(Debug, Clone)]
pub struct PredictionParser {
    mode: ParseMode,
    integer_pattern: Regex,
}

impl PredictionParser {
    pub fn new(mode: ParseMode) -> Result<Self> {
        let integer_pattern =
            Regex::new(r"-?\d+").context("failed to compile integer extraction regex")?;
        Ok(Self {
            mode,
            integer_pattern,
        })
    }

    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    pub fn parse(&self, raw: &str) -> AuthorId {
        match self.mode {
            ParseMode::Strict => parse_model_output(raw),
            ParseMode::FirstInteger => self.first_integer(raw),
        }
    }

    fn first_integer(&self, raw: &str) -> AuthorId {
        self.integer_pattern
            .find(raw)
            .and_then(|found| found.as_str().parse::<AuthorId>().ok())
            .unwrap_or(UNPARSEABLE_PREDICTION)
    }
}
