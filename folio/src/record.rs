//! Record fields and lifecycle status

use crate::frontmatter::Frontmatter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lifecycle stage of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Work in progress; the status of every new record
    #[default]
    Draft,
    /// Ready for review
    Review,
    /// Live on the site
    Published,
    /// Retired
    Archived,
}

/// Returned when text names no known status
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid status '{0}'. Use draft, review, published or archived.")]
pub struct ParseStatusError(pub String);

impl Status {
    /// Every status, in lifecycle order
    pub const ALL: [Status; 4] = [
        Status::Draft,
        Status::Review,
        Status::Published,
        Status::Archived,
    ];

    /// Lowercase name as stored in frontmatter
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Draft => "draft",
            Status::Review => "review",
            Status::Published => "published",
            Status::Archived => "archived",
        }
    }

    /// Parse user input, falling back to [`Status::Draft`] on anything
    /// unrecognised. The second value is the warning to surface when the
    /// fallback was used.
    pub fn parse_lenient(input: &str) -> (Status, Option<String>) {
        match input.parse() {
            Ok(status) => (status, None),
            Err(ParseStatusError(value)) => {
                let warning = format!("Invalid status '{value}'. Using draft.");
                tracing::warn!("{}", warning);
                (Status::Draft, Some(warning))
            }
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| ParseStatusError(s.trim().to_string()))
    }
}

/// The metadata fields Folio reads from a record.
///
/// Values are taken as stored: `status` is not validated here so that
/// search can report and filter whatever a file actually says.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecordFields {
    /// Title, empty when absent
    pub title: String,
    /// Raw status text
    pub status: String,
    /// Series name, empty when the record is not part of one
    pub series: String,
    /// Free-text summary
    pub summary: String,
    /// Tags in file order
    pub tags: Vec<String>,
}

impl RecordFields {
    /// Read the known fields out of a metadata block
    pub fn from_frontmatter(frontmatter: &Frontmatter) -> Self {
        Self {
            title: frontmatter.scalar("title"),
            status: frontmatter.scalar("status"),
            series: frontmatter.scalar("series"),
            summary: frontmatter.scalar("summary"),
            tags: frontmatter.tags(),
        }
    }
}
