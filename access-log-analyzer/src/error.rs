use derive_more::{Display, Error};

/// Why a single line was rejected. Never fatal to a run.
#[derive(Debug, Display, Error, Clone, PartialEq)]
pub enum ParseError {
    #[display("line does not match the access log layout")]
    NoMatch,
    #[display("malformed timestamp {raw:?}")]
    MalformedTimestamp {
        raw: String,
        source: chrono::ParseError,
    },
    #[display("{field} value {raw:?} is out of range")]
    Field {
        field: &'static str,
        raw: String,
    },
}

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsError {
    #[display("failure rate is undefined: no bot requests were recorded")]
    DivisionUndefined,
}
