use std::{str::FromStr, sync::LazyLock};

use chrono::DateTime;
use regex::Regex;

use crate::{
    error::ParseError,
    models::{LogRecord, Method, TIMESTAMP_FORMAT},
};

// 203.0.113.5 - - [10/Oct/2023:13:55:36 +0000] "GET /index.html HTTP/1.1" 200 1024 "-" "Mozilla/5.0" "-"
static LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"^(?P<ip>\S+) - - \[(?P<timestamp>[^\]]*)\] "(?P<request>[^"]*)" "#,
        r#"(?P<status>[0-9]{3}) (?P<size>[0-9]+|-) "(?P<referrer>[^"]*)" "(?P<user_agent>[^"]*)" "-"$"#,
    ))
    .expect("valid line pattern")
});

/// Turns raw access-log lines into [`LogRecord`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct LineParser;

impl LineParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, line: &str) -> Result<LogRecord, ParseError> {
        let caps = LINE_PATTERN.captures(line).ok_or(ParseError::NoMatch)?;

        let raw_ts = &caps["timestamp"];
        let timestamp = DateTime::parse_from_str(raw_ts, TIMESTAMP_FORMAT).map_err(|source| {
            ParseError::MalformedTimestamp {
                raw: raw_ts.into(),
                source,
            }
        })?;

        let (method, url, protocol) = split_request(&caps["request"]);

        let status = parse_number::<u16>("status", &caps["status"])?;
        let size = match &caps["size"] {
            "-" => None,
            raw => Some(parse_number::<u64>("size", raw)?),
        };

        Ok(LogRecord::new(
            caps["ip"].parse().map_err(|_| ParseError::NoMatch)?,
            timestamp,
            method,
            url,
            protocol,
            status,
            size,
            caps["referrer"].into(),
            caps["user_agent"].parse().map_err(|_| ParseError::NoMatch)?,
        ))
    }
}

/// A recognized leading method is followed by the url. Anything else is
/// taken as the url itself, which covers bare `"-"` request lines.
fn split_request(request: &str) -> (Option<Method>, String, Option<String>) {
    let (first, rest) = match request.split_once(' ') {
        Some((first, rest)) => (first, Some(rest)),
        None => (request, None),
    };
    match Method::from_token(first) {
        Some(method) => {
            let (url, protocol) = match rest {
                Some(rest) => match rest.split_once(' ') {
                    Some((url, protocol)) => (url, Some(protocol)),
                    None => (rest, None),
                },
                None => ("", None),
            };
            (Some(method), url.into(), protocol.map(Into::into))
        }
        None => (None, first.into(), rest.map(Into::into)),
    }
}

fn parse_number<T: FromStr>(field: &'static str, raw: &str) -> Result<T, ParseError> {
    raw.parse().map_err(|_| ParseError::Field {
        field,
        raw: raw.into(),
    })
}

impl FromStr for LogRecord {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LineParser.parse(s)
    }
}
