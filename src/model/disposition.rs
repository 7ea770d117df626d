//! What to do with a composed message.

use std::fmt;
use std::str::FromStr;

use crate::error::ChatError;

/// The three-way outcome chosen for a composed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Append to the sent collection and rewrite the sent-messages file.
    Send,
    /// Append to the drafts file only.
    Store,
    /// Keep in memory for this session, never persisted.
    Disregard,
}

impl Disposition {
    /// Map the numbered menu choice (1 = send, 2 = store, 3 = disregard).
    pub fn from_choice(choice: u32) -> Option<Self> {
        match choice {
            1 => Some(Self::Send),
            2 => Some(Self::Store),
            3 => Some(Self::Disregard),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Send => "send",
            Self::Store => "store",
            Self::Disregard => "disregard",
        }
    }
}

impl FromStr for Disposition {
    type Err = ChatError;

    /// Accepts the menu number or the action name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<u32>() {
            return Self::from_choice(n)
                .ok_or_else(|| ChatError::InvalidDisposition(trimmed.to_string()));
        }
        match trimmed.to_lowercase().as_str() {
            "send" => Ok(Self::Send),
            "store" => Ok(Self::Store),
            "disregard" => Ok(Self::Disregard),
            _ => Err(ChatError::InvalidDisposition(trimmed.to_string())),
        }
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
