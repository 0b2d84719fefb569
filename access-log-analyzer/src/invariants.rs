use std::str::FromStr;

use derive_more::{AsRef, Debug, Display};
use serde::Serialize;

/// Client address exactly as logged. Not validated as an IP.
#[derive(Debug, Display, AsRef, Clone, PartialEq, Eq, Hash)]
pub struct ClientAddr(String);

impl ClientAddr {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for ClientAddr {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.into()))
    }
}

#[derive(Debug, Display, AsRef, Clone, PartialEq, Eq, Hash)]
pub struct UserAgent(String);

impl UserAgent {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// A request is a bot request when its agent contains "bot" in any case.
    pub fn looks_like_bot(&self) -> bool {
        self.0.to_lowercase().contains("bot")
    }
}

impl FromStr for UserAgent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.into()))
    }
}

#[derive(Debug, Display, AsRef, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BotName(String);

impl BotName {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for BotName {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asserting::prelude::*;

    #[test]
    fn bot_detection_ignores_case() {
        let ua: UserAgent = "Mozilla/5.0 (compatible; GoogleBOT/2.1)".parse().unwrap();
        assert_that!(ua.looks_like_bot()).is_true();

        let ua: UserAgent = "Mozilla/5.0 (X11; Linux x86_64)".parse().unwrap();
        assert_that!(ua.looks_like_bot()).is_false();
    }

    #[test]
    fn bot_names_order_by_bytes() {
        let mut names = vec![BotName::from("bingbot"), BotName::from("Applebot")];
        names.sort();
        assert_eq!(names[0].as_str(), "Applebot");
    }
}
