use std::fmt;

use chrono::{DateTime, FixedOffset};
use derive_getters::Getters;
use derive_more::Display;

use crate::invariants::{ClientAddr, UserAgent};

/// Timestamp layout inside the brackets: `10/Oct/2023:13:55:36 +0000`.
pub const TIMESTAMP_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    #[display("GET")]
    Get,
    #[display("HEAD")]
    Head,
    #[display("POST")]
    Post,
    #[display("PUT")]
    Put,
    #[display("DELETE")]
    Delete,
    #[display("OPTIONS")]
    Options,
    #[display("TRACE")]
    Trace,
    #[display("PATCH")]
    Patch,
}

impl Method {
    /// Exact, case-sensitive match against the request-line token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "GET" => Some(Self::Get),
            "HEAD" => Some(Self::Head),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            "DELETE" => Some(Self::Delete),
            "OPTIONS" => Some(Self::Options),
            "TRACE" => Some(Self::Trace),
            "PATCH" => Some(Self::Patch),
            _ => None,
        }
    }
}

/// One parsed access-log line. Built once by the parser and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct LogRecord {
    ip: ClientAddr,
    timestamp: DateTime<FixedOffset>,
    #[getter(skip)]
    method: Option<Method>,
    /// Request target, or the first request-line token when no method was recognized.
    url: String,
    protocol: Option<String>,
    #[getter(skip)]
    status: u16,
    #[getter(skip)]
    size: Option<u64>,
    referrer: String,
    user_agent: UserAgent,
    #[getter(skip)]
    is_bot: bool,
}

impl LogRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        ip: ClientAddr,
        timestamp: DateTime<FixedOffset>,
        method: Option<Method>,
        url: String,
        protocol: Option<String>,
        status: u16,
        size: Option<u64>,
        referrer: String,
        user_agent: UserAgent,
    ) -> Self {
        let is_bot = user_agent.looks_like_bot();
        Self {
            ip,
            timestamp,
            method,
            url,
            protocol,
            status,
            size,
            referrer,
            user_agent,
            is_bot,
        }
    }

    pub fn method(&self) -> Option<Method> {
        self.method
    }

    /// The method as logged, or `""` when the request line had none.
    pub fn method_str(&self) -> String {
        self.method.map(|m| m.to_string()).unwrap_or_default()
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn size(&self) -> Option<u64> {
        self.size
    }

    pub fn is_bot(&self) -> bool {
        self.is_bot
    }

    pub fn request_line(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(3);
        let method = self.method.map(|m| m.to_string());
        if let Some(m) = method.as_deref() {
            parts.push(m);
        }
        if self.method.is_none() || !self.url.is_empty() || self.protocol.is_some() {
            parts.push(&self.url);
        }
        if let Some(p) = self.protocol.as_deref() {
            parts.push(p);
        }
        parts.join(" ")
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = match self.size {
            Some(bytes) => bytes.to_string(),
            None => "-".into(),
        };
        write!(
            f,
            r#"{} - - [{}] "{}" {} {} "{}" "{}" "-""#,
            self.ip,
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.request_line(),
            self.status,
            size,
            self.referrer,
            self.user_agent,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asserting::prelude::*;
    use chrono::TimeZone;

    fn record(method: Option<Method>, url: &str, protocol: Option<&str>, ua: &str) -> LogRecord {
        LogRecord::new(
            "10.0.0.1".parse().unwrap(),
            FixedOffset::east_opt(3600)
                .unwrap()
                .with_ymd_and_hms(2024, 2, 29, 23, 30, 0)
                .unwrap(),
            method,
            url.into(),
            protocol.map(Into::into),
            200,
            None,
            "-".into(),
            ua.parse().unwrap(),
        )
    }

    #[test]
    fn method_tokens_are_case_sensitive() {
        assert_that!(Method::from_token("PATCH")).is_equal_to(Some(Method::Patch));
        assert_that!(Method::from_token("get")).is_none();
        assert_that!(Method::from_token("-")).is_none();
    }

    #[test]
    fn is_bot_follows_user_agent() {
        assert!(record(Some(Method::Get), "/", None, "AhrefsBot/7.0").is_bot());
        assert!(!record(Some(Method::Get), "/", None, "curl/8.4.0").is_bot());
    }

    #[test]
    fn display_writes_the_line_template() {
        let r = record(Some(Method::Get), "/feed", Some("HTTP/2.0"), "curl/8.4.0");
        assert_eq!(
            r.to_string(),
            r#"10.0.0.1 - - [29/Feb/2024:23:30:00 +0100] "GET /feed HTTP/2.0" 200 - "-" "curl/8.4.0" "-""#
        );
    }

    #[test]
    fn request_line_without_method_is_just_the_token() {
        let r = record(None, "-", None, "curl/8.4.0");
        assert_eq!(r.request_line(), "-");
        assert_eq!(r.method_str(), "");
    }
}
