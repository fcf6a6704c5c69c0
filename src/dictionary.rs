//! Canonical name dictionaries.
//!
//! Game text is resolved against these tables: affix lines by minimum edit
//! distance, unique names exactly, legendary aspects by substring of the item
//! name. The tables are loaded once and shared read-only (`Arc<Dictionaries>`).
//!
//! # On-disk layout
//!
//! | File | Shape |
//! |------|-------|
//! | `affixes.json` | `{ "id": "display" }` (required) |
//! | `uniques.json` | `{ "id": { "desc": "...", "num_inherents": 2 } }` |
//! | `aspects.json` | `{ "id": "display" }` |
//! | `sigils.json` | `{ "dungeons": {..}, "minor": {..}, "major": {..}, "positive": {..} }` |
//! | `tributes.json` | `{ "id": "display" }` |

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use strsim::levenshtein;

/// Unique item entry: aspect description plus the optional number of
/// inherent lines this unique shows (overrides the per-type default).
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct UniqueEntry {
    #[serde(default, rename = "desc")]
    pub description: String,
    #[serde(default)]
    pub num_inherents: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct SigilFile {
    #[serde(default)]
    dungeons: BTreeMap<String, String>,
    #[serde(default)]
    minor: BTreeMap<String, String>,
    #[serde(default)]
    major: BTreeMap<String, String>,
    #[serde(default)]
    positive: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct Dictionaries {
    affixes: BTreeMap<String, String>,
    uniques: BTreeMap<String, UniqueEntry>,
    legendary_aspects: BTreeMap<String, String>,
    /// Legendary ids, longest first, so substring search finds the most
    /// specific name before any shorter one contained in it.
    legendary_search_order: Vec<String>,
    sigils: BTreeMap<String, String>,
    tributes: BTreeMap<String, String>,
}

impl Dictionaries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every table from a language directory.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let affixes: BTreeMap<String, String> = read_json(&dir.join("affixes.json"))?
            .with_context(|| format!("affixes.json is missing in {}", dir.display()))?;
        let uniques: BTreeMap<String, UniqueEntry> =
            read_json(&dir.join("uniques.json"))?.unwrap_or_default();
        let aspects: BTreeMap<String, String> =
            read_json(&dir.join("aspects.json"))?.unwrap_or_default();
        let sigil_file: SigilFile = read_json(&dir.join("sigils.json"))?.unwrap_or_default();
        let tributes: BTreeMap<String, String> =
            read_json(&dir.join("tributes.json"))?.unwrap_or_default();

        let mut sigils = sigil_file.dungeons;
        sigils.extend(sigil_file.minor);
        sigils.extend(sigil_file.major);
        sigils.extend(sigil_file.positive);

        tracing::debug!(
            dir = %dir.display(),
            affixes = affixes.len(),
            uniques = uniques.len(),
            aspects = aspects.len(),
            sigils = sigils.len(),
            tributes = tributes.len(),
            "Loaded dictionaries"
        );

        Ok(Self::new()
            .with_affixes(affixes)
            .with_uniques(uniques)
            .with_legendary_aspects(aspects)
            .with_sigils(sigils)
            .with_tributes(tributes))
    }

    pub fn with_affixes<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.affixes
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn with_uniques<I, K>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, UniqueEntry)>,
        K: Into<String>,
    {
        self.uniques
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v)));
        self
    }

    pub fn with_legendary_aspects<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.legendary_aspects
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        let mut order: Vec<String> = self.legendary_aspects.keys().cloned().collect();
        order.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        self.legendary_search_order = order;
        self
    }

    pub fn with_sigils<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.sigils
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn with_tributes<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.tributes
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Closest affix id to a raw tooltip line.
    ///
    /// Ties go to the alphabetically first id. With an empty table the
    /// canonical form of the text itself is returned.
    pub fn resolve_affix(&self, text: &str) -> String {
        let canonical = canonicalize(text);
        if self.affixes.is_empty() || self.affixes.contains_key(&canonical) {
            return canonical;
        }
        self.affixes
            .keys()
            .min_by_key(|id| levenshtein(&canonical, id))
            .cloned()
            .unwrap_or(canonical)
    }

    pub fn has_affix(&self, id: &str) -> bool {
        self.affixes.contains_key(id)
    }

    /// Unique id for a canonical item name. Falls back to a match that
    /// ignores underscores, since the reader feed sometimes drops spaces.
    pub fn resolve_unique(&self, name: &str) -> Option<&str> {
        if let Some((id, _)) = self.uniques.get_key_value(name) {
            return Some(id.as_str());
        }
        let squashed = name.replace('_', "");
        self.uniques
            .keys()
            .find(|id| id.replace('_', "") == squashed)
            .map(String::as_str)
    }

    pub fn unique_inherent_count(&self, unique_id: &str) -> Option<usize> {
        self.uniques.get(unique_id).and_then(|u| u.num_inherents)
    }

    /// First legendary aspect id contained in the canonical item name.
    pub fn resolve_legendary_aspect(&self, item_name: &str) -> Option<&str> {
        self.legendary_search_order
            .iter()
            .find(|id| item_name.contains(id.as_str()))
            .map(String::as_str)
    }

    pub fn has_legendary_aspect(&self, id: &str) -> bool {
        self.legendary_aspects.contains_key(id)
    }

    pub fn has_sigil(&self, id: &str) -> bool {
        self.sigils.contains_key(id)
    }

    /// Tribute id, accepting the `tribute_of_` shorthand.
    pub fn resolve_tribute(&self, name: &str) -> Option<String> {
        let prefixed = format!("tribute_of_{name}");
        if self.tributes.contains_key(&prefixed) {
            Some(prefixed)
        } else if self.tributes.contains_key(name) {
            Some(name.to_string())
        } else {
            None
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.is_file() {
        return Ok(None);
    }
    let raw =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let parsed =
        serde_json::from_str(&raw).with_context(|| format!("invalid JSON in {}", path.display()))?;
    Ok(Some(parsed))
}

/// Snake_case id from free text: letters and spaces only, lowercased,
/// whitespace collapsed.
///
/// `"+17.0% Movement Speed [16.5 - 20.0]%"` becomes `"movement_speed"`.
pub fn canonicalize(text: &str) -> String {
    let letters: String = text
        .chars()
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .collect();
    letters
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Snake_case id from an item or dungeon name. Unlike [`canonicalize`]
/// this keeps digits.
pub fn correct_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .replace(['\'', ',', '(', ')'], "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}
