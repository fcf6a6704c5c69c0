//! Unique rule: uniques and mythics against every profile's `Uniques`.

use super::pool::match_requirements;
use super::{FilterResult, MatchedFilter};
use crate::config::{GlobalConfig, UniquePolicy};
use crate::item::{Affix, Aspect, Item, Rarity};
use crate::profile::{AspectRequirement, ProfileSet, UniqueFilter};

/// Slack for rolls whose decimal range does not divide exactly in f64.
const ROLL_EPSILON: f64 = 1e-9;

fn aspect_matches(requirement: Option<&AspectRequirement>, item: &Item) -> bool {
    let Some(requirement) = requirement else {
        return true;
    };
    let Some(aspect) = &item.aspect else {
        return false;
    };
    if requirement.name != aspect.name {
        return false;
    }
    match requirement.value {
        None => true,
        // Chaos uniques roll their aspect at the maximum
        Some(_) if item.is_chaos => true,
        Some(target) => aspect
            .value
            .is_some_and(|v| requirement.comparison.accepts(v, target)),
    }
}

/// Roll position check. A roll exactly at the threshold passes.
pub(crate) fn in_percent_range(threshold: u32, aspect: Option<&Aspect>) -> bool {
    if threshold == 0 {
        return true;
    }
    let Some((value, lo, hi)) =
        aspect.and_then(|a| Some((a.value?, a.min_value?, a.max_value?)))
    else {
        return true;
    };

    if hi > lo {
        (value - lo) / (hi - lo) + ROLL_EPSILON >= f64::from(threshold) / 100.0
    } else if hi < lo {
        // smaller is better
        (value - hi) / (lo - hi)
            <= f64::from(100u32.saturating_sub(threshold)) / 100.0 + ROLL_EPSILON
    } else {
        true
    }
}

fn filter_matches(filter: &UniqueFilter, item: &Item, affixes: &[&Affix]) -> bool {
    if filter.mythic && item.rarity != Rarity::Mythic {
        return false;
    }
    let type_ok = match item.item_type {
        Some(t) => filter.item_types.is_empty() || filter.item_types.contains(&t),
        None => false,
    };
    if !type_ok || !item.power.is_some_and(|p| filter.min_power <= p) {
        return false;
    }
    if !aspect_matches(filter.aspect.as_ref(), item) {
        return false;
    }
    let count = filter.affixes.len();
    if match_requirements(&filter.affixes, count, count, affixes, filter.min_greater_affix_count)
        .is_none()
    {
        return false;
    }
    item.greater_affix_count() >= filter.min_greater_affix_count
        && in_percent_range(filter.min_percent_of_aspect, item.aspect.as_ref())
}

pub(crate) fn check(item: &Item, profiles: &ProfileSet, config: &GlobalConfig) -> FilterResult {
    let policy_keeps = config.handle_uniques != UniquePolicy::Junk;
    let is_mythic = item.rarity == Rarity::Mythic;

    if !profiles.has_unique_filters() {
        return FilterResult {
            keep: policy_keeps || is_mythic,
            all_unique_filters_are_aspects: true,
            ..FilterResult::default()
        };
    }

    let affixes: Vec<&Affix> = item.affixes.iter().collect();
    let aspect_name = item.aspect.as_ref().map(|a| a.name.as_str());

    let mut matched = Vec::new();
    let mut all_aspects = true;
    let mut aspect_in_profile = false;

    for profile in profiles.profiles() {
        for filter in &profile.uniques {
            match &filter.aspect {
                None => all_aspects = false,
                Some(wanted) if Some(wanted.name.as_str()) == aspect_name => {
                    aspect_in_profile = true
                }
                Some(_) => {}
            }
            if !filter_matches(filter, item, &affixes) {
                continue;
            }

            let label = aspect_name.unwrap_or(&item.name);
            let owner = filter.profile_alias.as_deref().unwrap_or(&profile.name);
            tracing::info!(profile = %profile.name, aspect = label, "Matched unique filter");
            matched.push(MatchedFilter::new(format!("{owner}.{label}"), Vec::new()).with_aspect());
        }
    }

    let mut result = FilterResult::from_matches(matched);
    result.all_unique_filters_are_aspects = all_aspects;
    result.unique_aspect_in_profile = aspect_in_profile;

    if !result.keep && (is_mythic || (all_aspects && !aspect_in_profile && policy_keeps)) {
        result.keep = true;
    }
    result
}
