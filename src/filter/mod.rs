//! Filter rule evaluator.
//!
//! [`should_keep`] is a pure function of the item, a profile snapshot and the
//! global configuration. It dispatches on the item category:
//!
//! | Order | Applies to | Rule |
//! |-------|------------|------|
//! | 1 | sigils, escalation sigils | sigil blacklist / whitelist |
//! | 2 | tributes | tribute name / rarity |
//! | 3 | no type, no power, junk rarity | dropped |
//! | 4 | uniques, mythics | unique filters, then `handle_uniques` |
//! | 5 | everything else | affix filters, then aspect upgrades for legendaries |
//! | 6 | anything not kept so far | cosmetic unlock |
//!
//! A result with `keep == false` never carries matches.

mod affix;
mod fallback;
mod pool;
mod sigil;
mod tribute;
mod unique;

use crate::config::GlobalConfig;
use crate::item::{Affix, Item, ItemType, Rarity};
use crate::profile::ProfileSet;
use serde::Serialize;

/// One filter that accepted the item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedFilter {
    /// `profile.filter`, or a bare name for policy fallbacks (`default`,
    /// `AspectUpgrades`, `Cosmetics`).
    pub profile_qualified_name: String,
    pub matched_affixes: Vec<Affix>,
    pub did_match_aspect: bool,
}

impl MatchedFilter {
    pub fn new(name: impl Into<String>, matched_affixes: Vec<Affix>) -> Self {
        Self {
            profile_qualified_name: name.into(),
            matched_affixes,
            did_match_aspect: false,
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    pub fn with_aspect(mut self) -> Self {
        self.did_match_aspect = true;
        self
    }
}

/// Evaluator output for one item.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FilterResult {
    pub keep: bool,
    pub matched: Vec<MatchedFilter>,
    /// The item's unique aspect is named by some unique filter.
    pub unique_aspect_in_profile: bool,
    /// Every unique filter seen was aspect-only.
    pub all_unique_filters_are_aspects: bool,
}

impl FilterResult {
    /// Kept iff anything matched.
    pub fn from_matches(matched: Vec<MatchedFilter>) -> Self {
        Self {
            keep: !matched.is_empty(),
            matched,
            ..Self::default()
        }
    }

    pub(crate) fn kept(matched: Vec<MatchedFilter>) -> Self {
        Self {
            keep: true,
            matched,
            ..Self::default()
        }
    }

    /// Names of the matched filters, in match order.
    pub fn matched_names(&self) -> Vec<&str> {
        self.matched
            .iter()
            .map(|m| m.profile_qualified_name.as_str())
            .collect()
    }
}

/// Decide whether `item` is worth keeping.
///
/// Neither the item nor the profiles are modified; calling this twice with
/// the same inputs gives equal results.
pub fn should_keep(item: &Item, profiles: &ProfileSet, config: &GlobalConfig) -> FilterResult {
    match item.item_type {
        Some(ItemType::EscalationSigil) if config.ignore_escalation_sigils => {
            return FilterResult::kept(Vec::new());
        }
        Some(ItemType::Sigil | ItemType::EscalationSigil) => {
            return sigil::check(item, profiles);
        }
        Some(ItemType::Tribute) => return tribute::check(item, profiles),
        _ => {}
    }

    let junk = item.rarity.is_junk(config.junk_rares) && !item.cosmetic_upgrade;
    if item.item_type.is_none() || item.power.is_none() || junk {
        return FilterResult::default();
    }

    let result = if item.rarity.is_unique_or_mythic() {
        unique::check(item, profiles, config)
    } else {
        let by_affix = affix::check(item, profiles);
        if by_affix.keep || item.rarity != Rarity::Legendary {
            by_affix
        } else {
            fallback::check_aspect_upgrade(item, profiles, config)
        }
    };

    if result.keep {
        result
    } else {
        fallback::check_cosmetic(item, config)
    }
}
