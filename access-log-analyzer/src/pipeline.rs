use tracing::{debug, info, warn};

use crate::{error::ParseError, parser::LineParser, store::RecordStore};

const EXCERPT_CHARS: usize = 120;

/// A line that was skipped during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub line_number: usize,
    pub excerpt: String,
    pub error: ParseError,
}

#[derive(Debug, Default)]
pub struct Ingested {
    pub store: RecordStore,
    pub diagnostics: Vec<Diagnostic>,
}

impl Ingested {
    pub fn skipped(&self) -> usize {
        self.diagnostics.len()
    }
}

/// Parses a batch of lines into a [`RecordStore`], one pipeline per run.
#[derive(Debug, Default)]
pub struct Pipeline {
    parser: LineParser,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn run<I, S>(&self, lines: I) -> Ingested
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = Ingested::default();
        for (idx, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            match self.parser.parse(line) {
                Ok(record) => out.store.append(record),
                Err(error) => {
                    let excerpt: String = line.chars().take(EXCERPT_CHARS).collect();
                    warn!(line = idx + 1, %error, %excerpt, "skipping unparseable line");
                    out.diagnostics.push(Diagnostic {
                        line_number: idx + 1,
                        excerpt,
                        error,
                    });
                }
            }
        }
        debug!(records = out.store.len(), "append phase complete");
        info!(
            records = out.store.len(),
            skipped = out.skipped(),
            "ingest finished"
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asserting::prelude::*;

    const GOOD: &str = r#"203.0.113.5 - - [10/Oct/2023:13:55:36 +0000] "GET /index.html HTTP/1.1" 200 1024 "-" "Mozilla/5.0 Testbot/1.0" "-""#;

    #[test]
    fn empty_input_yields_empty_store() {
        let ingested = Pipeline::new().run(Vec::<String>::new());
        assert_that!(ingested.store.is_empty()).is_true();
        assert_that!(ingested.diagnostics).is_empty();
    }

    #[test]
    fn garbage_lines_are_skipped_not_fatal() {
        let garbage = ["", "not a log line", "203.0.113.5 - - [xx] \"GET /\" 200"];
        let mut lines = Vec::new();
        for g in garbage {
            lines.push(GOOD.to_string());
            lines.push(g.to_string());
        }
        lines.push(GOOD.to_string());

        let ingested = Pipeline::new().run(&lines);
        assert_eq!(ingested.store.len(), 4);
        assert_eq!(ingested.skipped(), 3);
        let numbers: Vec<_> = ingested.diagnostics.iter().map(|d| d.line_number).collect();
        assert_eq!(numbers, [2, 4, 6]);
        assert_eq!(ingested.diagnostics[1].excerpt, "not a log line");
    }

    #[test]
    fn excerpt_is_truncated() {
        let long = "x".repeat(EXCERPT_CHARS * 3);
        let ingested = Pipeline::new().run([long.as_str()]);
        assert_that!(ingested.diagnostics[0].excerpt.chars().count()).is_equal_to(EXCERPT_CHARS);
    }

    #[test]
    fn bad_timestamp_is_reported_as_such() {
        let line = GOOD.replace("10/Oct/2023", "10/Okt/2023");
        let ingested = Pipeline::new().run([line]);
        assert_that!(ingested.store.is_empty()).is_true();
        assert!(matches!(
            ingested.diagnostics[0].error,
            ParseError::MalformedTimestamp { .. }
        ));
    }
}
