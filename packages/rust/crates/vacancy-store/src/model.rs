//! Saved search query model and its canonical line form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Chat identifier as issued by the transport (Telegram chat ids may be negative).
pub type ChatId = i64;

const CANONICAL_FIELD_COUNT: usize = 4;

/// Work-experience bucket understood by the vacancies API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Experience {
    /// No experience filter.
    #[default]
    Any,
    /// Candidates without experience.
    NoExperience,
    /// One to three years.
    Between1And3,
    /// Three to six years.
    Between3And6,
    /// More than six years.
    MoreThan6,
}

impl Experience {
    /// Map a command token (`-`, `0`, `1-3`, `3-6`, `6`) to a bucket.
    ///
    /// Anything unrecognised, including `-`, means no filter.
    pub fn from_command_token(token: &str) -> Self {
        match token {
            "0" => Self::NoExperience,
            "1-3" => Self::Between1And3,
            "3-6" => Self::Between3And6,
            "6" => Self::MoreThan6,
            _ => Self::Any,
        }
    }

    /// Token used in the canonical query line. Never contains whitespace.
    pub const fn canonical_token(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::NoExperience => "noExperience",
            Self::Between1And3 => "between1And3",
            Self::Between3And6 => "between3And6",
            Self::MoreThan6 => "moreThan6",
        }
    }

    /// Value of the `experience` search parameter; `None` leaves the filter out.
    pub const fn api_id(self) -> Option<&'static str> {
        match self {
            Self::Any => None,
            Self::NoExperience => Some("noExperience"),
            Self::Between1And3 => Some("between1And3"),
            Self::Between3And6 => Some("between3And6"),
            Self::MoreThan6 => Some("moreThan6"),
        }
    }

    /// Human-readable bucket name shown in chat replies.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::NoExperience => "no-experience",
            Self::Between1And3 => "1-3 years",
            Self::Between3And6 => "3-6 years",
            Self::MoreThan6 => "6+ years",
        }
    }
}

impl fmt::Display for Experience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Experience {
    type Err = StoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "any" => Ok(Self::Any),
            "noExperience" => Ok(Self::NoExperience),
            "between1And3" => Ok(Self::Between1And3),
            "between3And6" => Ok(Self::Between3And6),
            "moreThan6" => Ok(Self::MoreThan6),
            other => Err(StoreError::InvalidRecord(format!(
                "unknown experience bucket `{other}`"
            ))),
        }
    }
}

/// One saved search. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query {
    /// Search area id (region).
    pub area: u32,
    /// Professional role id.
    pub role: u32,
    /// Keyword token.
    pub text: String,
    /// Experience bucket.
    pub experience: Experience,
}

impl Query {
    /// Build a query from its four fields.
    pub fn new(area: u32, role: u32, text: impl Into<String>, experience: Experience) -> Self {
        Self {
            area,
            role,
            text: text.into(),
            experience,
        }
    }

    /// Space-joined `area role text experience` line.
    ///
    /// This is the persisted payload and the hash input of the record key, so
    /// [`Query::from_canonical`] must invert it exactly.
    pub fn canonical(&self) -> String {
        format!(
            "{} {} {} {}",
            self.area,
            self.role,
            self.text,
            self.experience.canonical_token()
        )
    }

    /// Decode a canonical line. Anything other than four space-separated fields is corrupt.
    pub fn from_canonical(line: &str) -> Result<Self, StoreError> {
        let parts: Vec<&str> = line.trim_end_matches(['\n', '\r']).split(' ').collect();
        if parts.len() != CANONICAL_FIELD_COUNT {
            return Err(StoreError::InvalidRecord(format!(
                "expected {CANONICAL_FIELD_COUNT} fields, got {}: `{line}`",
                parts.len()
            )));
        }
        let area = parse_id(parts[0], "area")?;
        let role = parse_id(parts[1], "role")?;
        let text = parts[2];
        if text.is_empty() {
            return Err(StoreError::InvalidRecord(format!(
                "empty keyword in `{line}`"
            )));
        }
        let experience = parts[3].parse::<Experience>()?;
        Ok(Self::new(area, role, text, experience))
    }
}

fn parse_id(raw: &str, field: &str) -> Result<u32, StoreError> {
    raw.parse::<u32>()
        .map_err(|_| StoreError::InvalidRecord(format!("invalid {field} id `{raw}`")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_line_inverts() {
        let query = Query::new(1, 96, "golang", Experience::Between1And3);
        assert_eq!(query.canonical(), "1 96 golang between1And3");
        assert_eq!(Query::from_canonical(&query.canonical()).ok(), Some(query));
    }

    #[test]
    fn wrong_field_count_is_corrupt() {
        assert!(matches!(
            Query::from_canonical("1 96 golang"),
            Err(StoreError::InvalidRecord(_))
        ));
        assert!(matches!(
            Query::from_canonical("1 96 go lang any"),
            Err(StoreError::InvalidRecord(_))
        ));
    }

    #[test]
    fn empty_experience_token_is_corrupt() {
        assert!(matches!(
            Query::from_canonical("1 96 golang "),
            Err(StoreError::InvalidRecord(_))
        ));
    }

    #[test]
    fn command_tokens_map_to_buckets() {
        assert_eq!(Experience::from_command_token("-"), Experience::Any);
        assert_eq!(Experience::from_command_token("0"), Experience::NoExperience);
        assert_eq!(Experience::from_command_token("6"), Experience::MoreThan6);
        assert_eq!(Experience::Between3And6.label(), "3-6 years");
        assert_eq!(Experience::Any.api_id(), None);
    }
}
