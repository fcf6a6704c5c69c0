//! Sigil rule: per-profile blacklist and whitelist with a priority flag.
//!
//! # Decision Table
//!
//! | Blacklist | Whitelist | Sigil is in | Profile keeps |
//! |-----------|-----------|-------------|---------------|
//! | empty | empty | - | yes |
//! | empty | set | - | iff in whitelist |
//! | set | empty | - | iff not in blacklist |
//! | set | set | both | `priority` decides |
//! | set | set | one or none | iff in whitelist and not in blacklist |

use super::{FilterResult, MatchedFilter};
use crate::item::{Affix, Item};
use crate::profile::{ProfileSet, SigilCondition, SigilFilter, SigilPriority};

fn listed(entries: &[SigilCondition], name: &str, affixes: &[&Affix]) -> bool {
    entries.iter().any(|entry| {
        let named = entry.name == name || affixes.iter().any(|a| a.name == entry.name);
        let condition_ok = entry.conditions.is_empty()
            || affixes.iter().any(|a| entry.conditions.contains(&a.name));
        named && condition_ok
    })
}

pub(crate) fn profile_keeps(filter: &SigilFilter, item: &Item) -> bool {
    let affixes: Vec<&Affix> = item.affixes.iter().chain(&item.inherent).collect();
    let in_blacklist = listed(&filter.blacklist, &item.name, &affixes);
    let in_whitelist = listed(&filter.whitelist, &item.name, &affixes);

    match (filter.blacklist.is_empty(), filter.whitelist.is_empty()) {
        (true, true) => true,
        (true, false) => in_whitelist,
        (false, true) => !in_blacklist,
        (false, false) if in_blacklist && in_whitelist => {
            filter.priority == SigilPriority::Whitelist
        }
        (false, false) => in_whitelist && !in_blacklist,
    }
}

pub(crate) fn check(item: &Item, profiles: &ProfileSet) -> FilterResult {
    if !profiles.has_sigil_filters() {
        tracing::info!(sigil = %item.name, "No sigil filters, keeping sigil");
        return FilterResult::from_matches(vec![MatchedFilter::named("default")]);
    }

    let matched = profiles
        .profiles()
        .iter()
        .filter_map(|profile| {
            let filter = profile.sigils.as_ref()?;
            if !profile_keeps(filter, item) {
                return None;
            }
            tracing::info!(profile = %profile.name, sigil = %item.name, "Matched sigil filter");
            Some(MatchedFilter::named(format!("{}.Sigils", profile.name)))
        })
        .collect();

    FilterResult::from_matches(matched)
}
