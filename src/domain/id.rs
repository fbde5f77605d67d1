//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sporting event identifier - newtype for type safety.
///
/// The inner String is private to ensure all construction goes through
/// the defined constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(String);

impl EventId {
    /// Create a new `EventId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the event ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EventId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Bookmaker key (e.g. `pinnacle`, `draftkings`).
///
/// Keys are normalized to lowercase so weight-table lookups are
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct BookName(String);

impl BookName {
    /// Create a new `BookName`, lowercasing the key.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into().trim().to_ascii_lowercase())
    }

    /// Get the book key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for BookName {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for BookName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Market key as reported by the provider (e.g. `h2h`, `totals`,
/// `player_points`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarketKey(String);

impl MarketKey {
    /// Create a new `MarketKey` from a string.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the market key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable label: `player_points` becomes `Points`.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.0
            .trim_start_matches("player_")
            .split('_')
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for MarketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for MarketKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for MarketKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_name_is_normalized() {
        assert_eq!(BookName::new(" Pinnacle "), BookName::from("pinnacle"));
        let parsed: BookName = serde_json::from_str("\"DraftKings\"").unwrap();
        assert_eq!(parsed.as_str(), "draftkings");
    }

    #[test]
    fn test_market_key_display_name() {
        assert_eq!(MarketKey::from("player_points").display_name(), "Points");
        assert_eq!(
            MarketKey::from("player_points_rebounds_assists").display_name(),
            "Points Rebounds Assists"
        );
        assert_eq!(MarketKey::from("h2h").display_name(), "H2h");
    }
}
