use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the six FLAMES outcomes. Variant order is the lookup order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Flames {
    Friends,
    Love,
    Affection,
    Marriage,
    Enemies,
    Siblings,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown FLAMES label: {0}")]
pub struct ParseFlamesError(pub String);

impl Flames {
    pub const ALL: [Flames; 6] = [
        Flames::Friends,
        Flames::Love,
        Flames::Affection,
        Flames::Marriage,
        Flames::Enemies,
        Flames::Siblings,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Flames::Friends => "Friends",
            Flames::Love => "Love",
            Flames::Affection => "Affection",
            Flames::Marriage => "Marriage",
            Flames::Enemies => "Enemies",
            Flames::Siblings => "Siblings",
        }
    }
}

impl fmt::Display for Flames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Flames {
    type Err = ParseFlamesError;

    /// Exact, case-sensitive match against the label text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Flames::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| ParseFlamesError(s.to_string()))
    }
}
