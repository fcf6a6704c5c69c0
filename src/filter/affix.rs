//! Affix rule: item filters from every profile's `Affixes` section.

use super::pool::match_pools;
use super::{FilterResult, MatchedFilter};
use crate::item::{AffixKind, Item};
use crate::profile::{ItemFilter, ProfileSet};

fn applies(filter: &ItemFilter, item: &Item) -> bool {
    let type_ok = match item.item_type {
        Some(t) => filter.item_types.is_empty() || filter.item_types.contains(&t),
        None => false,
    };
    type_ok && item.power.is_some_and(|power| filter.min_power <= power)
}

pub(crate) fn check(item: &Item, profiles: &ProfileSet) -> FilterResult {
    if !profiles.has_affix_filters() {
        return FilterResult::kept(Vec::new());
    }

    let affixes: Vec<_> = item
        .affixes
        .iter()
        .filter(|a| a.kind != AffixKind::Tempered)
        .collect();
    let inherents: Vec<_> = item.inherent.iter().collect();
    let greater_count = item.greater_affix_count();

    let mut matched = Vec::new();
    for profile in profiles.profiles() {
        for filter in &profile.affix_filters {
            if !applies(filter, item) || greater_count < filter.min_greater_affix_count {
                continue;
            }
            let Some(mut found) =
                match_pools(&filter.affix_pools, &affixes, filter.min_greater_affix_count)
            else {
                continue;
            };
            let Some(found_inherents) =
                match_pools(&filter.inherent_pools, &inherents, filter.min_greater_affix_count)
            else {
                continue;
            };
            found.extend(found_inherents);

            tracing::info!(
                profile = %profile.name,
                filter = %filter.name,
                affixes = ?found.iter().map(|a| a.name.as_str()).collect::<Vec<_>>(),
                "Matched affix filter"
            );
            matched.push(MatchedFilter::new(
                format!("{}.{}", profile.name, filter.name),
                found,
            ));
        }
    }

    FilterResult::from_matches(matched)
}
