//! Stream ingestion: raw screen-reader fragments in, one line block per item out.
//!
//! The screen-reader feed has no framing. Every tooltip ends with a hint
//! such as "Right mouse button", so the detector buffers fragments until it
//! sees such a hint and then scans backward for the line the tooltip started
//! on:
//!
//! | Scan backward, first line that | Result |
//! |--------------------------------|--------|
//! | contains an ignorable header (`AFFIXES`) | skipped |
//! | starts with a category prefix (`Nightmare Sigil`, `TRIBUTE OF`, ...) | block start |
//! | is uppercase with at least 3 letters | block start |
//!
//! No start line means the hint was noise; the buffer keeps growing until
//! the next hint. Segmentation is best effort.
//!
//! ```rust
//! use loot_filter_engine::ingest::ItemDetector;
//!
//! let mut detector = ItemDetector::new();
//! assert!(detector.ingest("BAND OF FIRST BREATH").is_none());
//! assert!(detector.ingest("Unique Ring").is_none());
//! let block = detector.ingest("Right mouse button").unwrap();
//! assert_eq!(block.len(), 3);
//! ```

pub mod pipeline;

pub use pipeline::{FragmentSource, IngestPipeline, IterSource, ReaderSource};

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use std::sync::LazyLock;

/// Markup and encoding leftovers removed from every fragment.
const ARTIFACTS: [&str; 6] = [
    "&apos;",
    "&quot;",
    "[FAVORITED ITEM]. ",
    "ￂﾠ",
    "(Spiritborn Only)",
    "[MARKED AS JUNK]. ",
];

/// Fragments that contain a trigger phrase without ending a tooltip.
const DENYLIST: [&str; 1] = ["Champions who earn the favor of"];

/// Hints that close every item tooltip. Matched case-insensitively.
const TRIGGERS: [&str; 2] = ["mouse button", "action button"];

const IGNORED_HEADERS: [&str; 3] = ["COMPASS AFFIXES", "DUNGEON AFFIXES", "AFFIXES"];

/// First lines of categories whose title is not uppercase.
const CATEGORY_PREFIXES: [&str; 5] = [
    "Compass",
    "Escalation Sigil",
    "Nightmare Sigil",
    "TRIBUTE OF",
    "WHISPERING KEY",
];

const MIN_SHOUTY_LETTERS: usize = 3;

static ARTIFACT_MATCHER: LazyLock<AhoCorasick> = LazyLock::new(|| {
    AhoCorasickBuilder::new()
        .match_kind(MatchKind::LeftmostFirst)
        .build(ARTIFACTS)
        .expect("invalid artifact patterns")
});

static DENYLIST_MATCHER: LazyLock<AhoCorasick> =
    LazyLock::new(|| AhoCorasick::new(DENYLIST).expect("invalid denylist patterns"));

static TRIGGER_MATCHER: LazyLock<AhoCorasick> = LazyLock::new(|| {
    AhoCorasickBuilder::new()
        .ascii_case_insensitive(true)
        .build(TRIGGERS)
        .expect("invalid trigger patterns")
});

static HEADER_MATCHER: LazyLock<AhoCorasick> =
    LazyLock::new(|| AhoCorasick::new(IGNORED_HEADERS).expect("invalid header patterns"));

/// Strip known artifacts and surrounding whitespace.
pub fn normalize(fragment: &str) -> String {
    ARTIFACT_MATCHER
        .replace_all(fragment, &[""; ARTIFACTS.len()])
        .trim()
        .to_string()
}

/// Uppercase item titles: at least three ASCII letters and no lowercase.
fn is_shouty(line: &str) -> bool {
    let letters = line.chars().filter(char::is_ascii_alphabetic).count();
    letters >= MIN_SHOUTY_LETTERS
        && line.chars().any(char::is_uppercase)
        && !line.chars().any(char::is_lowercase)
}

/// Index of the line the most recent tooltip started on.
pub fn find_item_start(lines: &[String]) -> Option<usize> {
    lines.iter().enumerate().rev().find_map(|(idx, line)| {
        if HEADER_MATCHER.is_match(line) {
            return None;
        }
        let starts = CATEGORY_PREFIXES.iter().any(|p| line.starts_with(p)) || is_shouty(line);
        starts.then_some(idx)
    })
}

/// Stateful boundary detector. Owns the fragment buffer, so a single
/// detector must see every fragment of a session in arrival order.
#[derive(Debug, Default)]
pub struct ItemDetector {
    buffer: Vec<String>,
}

impl ItemDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one fragment. Returns a complete block when this fragment ended
    /// an item tooltip.
    pub fn ingest(&mut self, fragment: &str) -> Option<Vec<String>> {
        let fragment = normalize(fragment);
        let is_trigger =
            !DENYLIST_MATCHER.is_match(&fragment) && TRIGGER_MATCHER.is_match(&fragment);
        self.buffer.push(fragment);

        if !is_trigger {
            return None;
        }
        let Some(start) = find_item_start(&self.buffer) else {
            tracing::trace!(buffered = self.buffer.len(), "Trigger without item start");
            return None;
        };

        let block = self.buffer.split_off(start);
        self.buffer.clear();
        tracing::debug!(lines = block.len(), title = %block[0], "Detected item block");
        Some(block)
    }

    /// Fragments buffered since the last emitted block.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(detector: &mut ItemDetector, fragments: &[&str]) -> Vec<Vec<String>> {
        fragments
            .iter()
            .filter_map(|fragment| detector.ingest(fragment))
            .collect()
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("[FAVORITED ITEM]. HARLEQUIN CREST "), "HARLEQUIN CREST");
        assert_eq!(normalize("Ramaladni&apos;s Magnum Opus"), "Ramaladnis Magnum Opus");
        assert_eq!(normalize("  Skill (Spiritborn Only)"), "Skill");
        assert_eq!(normalize("[MARKED AS JUNK]. Rare Helm"), "Rare Helm");
    }

    #[test]
    fn test_block_starts_at_last_title() {
        let mut detector = ItemDetector::new();
        let blocks = feed(
            &mut detector,
            &[
                "Inventory",
                "ASCENDANT HELM",
                "Legendary Helm",
                "800 Item Power",
                "Right mouse button",
            ],
        );
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0][0], "ASCENDANT HELM");
        assert_eq!(blocks[0].len(), 4);
        assert_eq!(detector.pending(), 0);
    }

    #[test]
    fn test_affix_headers_are_skipped() {
        let mut detector = ItemDetector::new();
        let blocks = feed(
            &mut detector,
            &[
                "Nightmare Sigil",
                "Common Nightmare Sigil",
                "Ancient Reservoir in Dry Steppes",
                "DUNGEON AFFIXES",
                "Cold Resist",
                "Action button: use",
            ],
        );
        assert_eq!(blocks[0][0], "Nightmare Sigil");
        assert_eq!(blocks[0].len(), 6);
    }

    #[test]
    fn test_denylisted_trigger_is_ignored() {
        let mut detector = ItemDetector::new();
        let blocks = feed(
            &mut detector,
            &[
                "TRIBUTE OF PRIDE",
                "Champions who earn the favor of the mouse button",
                "Legendary Tribute",
                "Right Mouse Button",
            ],
        );
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].len(), 4);
    }

    #[test]
    fn test_noise_trigger_keeps_buffer() {
        let mut detector = ItemDetector::new();
        assert!(detector.ingest("press the mouse button").is_none());
        assert_eq!(detector.pending(), 1);
        assert!(detector.ingest("ROYAL RUBY").is_none());
        let block = detector.ingest("Right mouse button").unwrap();
        assert_eq!(block, ["ROYAL RUBY", "Right mouse button"]);
    }

    #[test]
    fn test_shouty_detection() {
        assert!(is_shouty("HARLEQUIN CREST"));
        assert!(is_shouty("TYRAEL'S MIGHT"));
        assert!(!is_shouty("800 IP"));
        assert!(!is_shouty("Legendary Helm"));
        assert!(!is_shouty("1,370"));
    }
}
