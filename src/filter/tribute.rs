//! Tribute rule.

use super::{FilterResult, MatchedFilter};
use crate::item::{Item, Rarity};
use crate::profile::{ProfileSet, TributeFilter};

fn matches(filter: &TributeFilter, item: &Item) -> bool {
    let name_ok = filter
        .name
        .as_deref()
        .map_or(true, |name| item.name.starts_with(name));
    let rarity_ok = filter.rarities.is_empty() || filter.rarities.contains(&item.rarity);
    name_ok && rarity_ok
}

pub(crate) fn check(item: &Item, profiles: &ProfileSet) -> FilterResult {
    if item.rarity == Rarity::Mythic || !profiles.has_tribute_filters() {
        return FilterResult::from_matches(vec![MatchedFilter::named("default")]);
    }

    let matched = profiles
        .profiles()
        .iter()
        .filter(|profile| profile.tributes.iter().any(|f| matches(f, item)))
        .map(|profile| {
            tracing::info!(profile = %profile.name, tribute = %item.name, "Matched tribute filter");
            MatchedFilter::named(format!("{}.Tributes", profile.name))
        })
        .collect();

    FilterResult::from_matches(matched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemType;
    use crate::profile::Profile;

    fn tribute(rarity: Rarity) -> Item {
        let mut item = Item::new(rarity, Some(ItemType::Tribute));
        item.name = "tribute_of_pride".to_string();
        item
    }

    fn set(filter: TributeFilter) -> ProfileSet {
        ProfileSet::new(vec![Profile::new("boss").with_tribute(filter)])
    }

    #[test]
    fn test_name_prefix_and_rarity() {
        let by_name = TributeFilter {
            name: Some("tribute_of_pride".to_string()),
            rarities: Vec::new(),
        };
        let result = check(&tribute(Rarity::Rare), &set(by_name));
        assert!(result.keep);
        assert_eq!(result.matched[0].profile_qualified_name, "boss.Tributes");

        let legendary_only = TributeFilter {
            name: None,
            rarities: vec![Rarity::Legendary],
        };
        assert!(!check(&tribute(Rarity::Rare), &set(legendary_only.clone())).keep);
        assert!(check(&tribute(Rarity::Legendary), &set(legendary_only)).keep);

        let other = TributeFilter {
            name: Some("tribute_of_harmony".to_string()),
            rarities: vec![Rarity::Legendary],
        };
        assert!(!check(&tribute(Rarity::Legendary), &set(other)).keep);
    }

    #[test]
    fn test_mythic_and_default_keep() {
        let never = TributeFilter {
            name: Some("tribute_of_harmony".to_string()),
            rarities: Vec::new(),
        };
        assert!(check(&tribute(Rarity::Mythic), &set(never)).keep);

        let result = check(&tribute(Rarity::Rare), &ProfileSet::default());
        assert!(result.keep);
        assert_eq!(result.matched[0].profile_qualified_name, "default");
    }
}
