//! Configuration for evaluation policies and the ingestion pipeline.
//!
//! Profiles decide which items match; the global configuration decides what
//! happens to the items no profile speaks about. Both are plain values that
//! callers pass in explicitly.

use serde::Deserialize;

/// What to do with uniques that no profile mentions.
///
/// # Policy Comparison
///
/// | Policy | Unmatched unique | Mythic |
/// |--------|------------------|--------|
/// | `Favorite` | kept, executor favorites it | kept |
/// | `Ignore` | kept, left unmarked | kept |
/// | `Junk` | dropped | kept |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UniquePolicy {
    #[default]
    Favorite,
    Ignore,
    Junk,
}

/// Whether legendaries that matched no affix filter are kept for their aspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectPolicy {
    /// Never keep for the aspect alone.
    None,
    /// Keep only when salvaging would upgrade the codex.
    #[default]
    Upgrade,
    /// Keep every legendary.
    All,
}

/// What to do with items whose only value is a cosmetic unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CosmeticPolicy {
    /// Cosmetic unlocks never save an item.
    Junk,
    /// Keep the item when it unlocks a new look.
    #[default]
    Ignore,
}

/// Global evaluation policies.
///
/// # Examples
///
/// ```rust
/// use loot_filter_engine::config::{GlobalConfig, UniquePolicy};
///
/// // Strict: junk everything that is not explicitly wanted
/// let strict = GlobalConfig::strict();
/// assert_eq!(strict.handle_uniques, UniquePolicy::Junk);
///
/// // Defaults favor keeping things
/// let relaxed = GlobalConfig::default().with_junk_rares(true);
/// assert!(relaxed.junk_rares);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Fallback for uniques no profile names.
    ///
    /// **Default**: `Favorite`
    pub handle_uniques: UniquePolicy,

    /// Fallback for legendaries that matched no affix filter.
    ///
    /// **Default**: `Upgrade`
    pub keep_aspects: AspectPolicy,

    /// Fallback for cosmetic-only value.
    ///
    /// **Default**: `Ignore`
    pub handle_cosmetics: CosmeticPolicy,

    /// Treat rares like common and magic items (dropped before any rule).
    ///
    /// **Default**: false
    pub junk_rares: bool,

    /// Leave escalation sigils untouched instead of running the sigil rule.
    ///
    /// **Default**: false
    pub ignore_escalation_sigils: bool,
}

impl GlobalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only what profiles ask for.
    pub fn strict() -> Self {
        Self {
            handle_uniques: UniquePolicy::Junk,
            keep_aspects: AspectPolicy::None,
            handle_cosmetics: CosmeticPolicy::Junk,
            junk_rares: true,
            ignore_escalation_sigils: false,
        }
    }

    /// Keep anything that might be useful later.
    pub fn collector() -> Self {
        Self {
            handle_uniques: UniquePolicy::Favorite,
            keep_aspects: AspectPolicy::All,
            handle_cosmetics: CosmeticPolicy::Ignore,
            junk_rares: false,
            ignore_escalation_sigils: true,
        }
    }

    /// Parse from a YAML or JSON mapping; absent keys take defaults.
    pub fn from_yaml_str(source: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(source)
    }

    pub fn with_handle_uniques(mut self, policy: UniquePolicy) -> Self {
        self.handle_uniques = policy;
        self
    }

    pub fn with_keep_aspects(mut self, policy: AspectPolicy) -> Self {
        self.keep_aspects = policy;
        self
    }

    pub fn with_handle_cosmetics(mut self, policy: CosmeticPolicy) -> Self {
        self.handle_cosmetics = policy;
        self
    }

    pub fn with_junk_rares(mut self, enable: bool) -> Self {
        self.junk_rares = enable;
        self
    }

    pub fn with_ignore_escalation_sigils(mut self, enable: bool) -> Self {
        self.ignore_escalation_sigils = enable;
        self
    }
}

/// Sizing for the reader → detector pipeline.
///
/// # Queue Sizing Guidelines
///
/// | Capacity | Behavior when the detector stalls |
/// |----------|-----------------------------------|
/// | 1-10 | reader blocks almost immediately |
/// | 100 | a few full tooltips buffered (default) |
/// | 1000+ | long bursts absorbed, more memory |
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Bounded queue depth between the reader and detector threads. A full
    /// queue blocks the reader; fragments are never dropped.
    ///
    /// **Default**: 100
    pub queue_capacity: usize,

    /// Consecutive failed reads from the fragment source before the reader
    /// gives up on the session.
    ///
    /// **Default**: 16
    pub max_consecutive_read_errors: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 100,
            max_consecutive_read_errors: 16,
        }
    }
}

impl IngestConfig {
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }

    pub fn with_max_consecutive_read_errors(mut self, count: usize) -> Self {
        self.max_consecutive_read_errors = count;
        self
    }
}
