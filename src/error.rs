//! Error types for the loot filter engine.
//!
//! Parsing failures are item-scoped: a `ParseError` means "skip this item",
//! never "stop the scan". Profile errors are profile-scoped in the same way.

use std::fmt;

pub type Result<T> = std::result::Result<T, ParseError>;

/// Failure to turn one tooltip block into an [`Item`](crate::item::Item).
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// An affix line still contains digits after cleanup but none of the
    /// decoding alternatives accepted it. Usually new game wording.
    UnknownFormat { line: String, cleaned: String },
    /// A unique or mythic whose name is missing from the unique dictionary.
    UnknownUnique(String),
    /// A legendary whose display name contains no known aspect name.
    UnknownAspect(String),
    /// The detector emitted a block too short to classify.
    EmptyBlock,
    /// Neither the category landmark nor the item power line was found.
    MissingLandmark { item_type: String },
}

impl ParseError {
    /// True when the failure points at outdated dictionary data rather than
    /// a tooltip layout the parser does not understand.
    pub fn is_stale_data(&self) -> bool {
        matches!(
            self,
            ParseError::UnknownUnique(_) | ParseError::UnknownAspect(_)
        )
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnknownFormat { line, cleaned } => {
                write!(f, "Unknown affix format: {line:?} (cleaned: {cleaned:?})")
            }
            ParseError::UnknownUnique(name) => write!(
                f,
                "Unknown unique item: {name} (game data may be stale or mistranslated)"
            ),
            ParseError::UnknownAspect(name) => write!(
                f,
                "No known legendary aspect in item name: {name} (game data may be stale)"
            ),
            ParseError::EmptyBlock => write!(f, "Tooltip block is too short to classify"),
            ParseError::MissingLandmark { item_type } => {
                write!(f, "No layout landmark found for {item_type}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// A profile document that could not be accepted.
///
/// Each variant names the profile so a loader can report it and keep loading
/// the remaining profiles.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("profile {profile}: invalid YAML: {message}")]
    Yaml { profile: String, message: String },

    #[error("profile {profile}: document is empty")]
    Empty { profile: String },

    #[error("profile {profile}: unknown {kind} `{name}`")]
    UnknownName {
        profile: String,
        kind: &'static str,
        name: String,
    },

    #[error("profile {profile}: {message}")]
    Invalid { profile: String, message: String },

    #[error(
        "profile {profile}: filter `{filter}` sets minGreaterAffixCount on an affix pool. \
         This is the old profile format. Move minGreaterAffixCount up to the `{filter}` \
         filter itself and mark the pool entries that must be greater affixes with \
         `greater: true`, e.g. `- {{name: critical_strike_chance, greater: true}}`"
    )]
    LegacyPoolGreaterCount { profile: String, filter: String },
}

impl ProfileError {
    /// Name of the profile this error belongs to.
    pub fn profile(&self) -> &str {
        match self {
            ProfileError::Yaml { profile, .. }
            | ProfileError::Empty { profile }
            | ProfileError::UnknownName { profile, .. }
            | ProfileError::Invalid { profile, .. }
            | ProfileError::LegacyPoolGreaterCount { profile, .. } => profile,
        }
    }
}

/// Failure to start or run the ingestion pipeline.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to spawn {0} thread: {1}")]
    Spawn(&'static str, std::io::Error),

    #[error("{0} thread panicked")]
    Panicked(&'static str),
}
