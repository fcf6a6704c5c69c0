//! Rules that only run once the profile filters have passed on an item:
//! legendary aspect upgrades and cosmetic unlocks.

use super::{FilterResult, MatchedFilter};
use crate::config::{AspectPolicy, CosmeticPolicy, GlobalConfig};
use crate::item::Item;
use crate::profile::ProfileSet;

pub(crate) fn check_aspect_upgrade(
    item: &Item,
    profiles: &ProfileSet,
    config: &GlobalConfig,
) -> FilterResult {
    if item.codex_upgrade {
        if let Some(aspect) = &item.aspect {
            let matched: Vec<_> = profiles
                .profiles()
                .iter()
                .filter(|p| p.aspect_upgrades.contains(&aspect.name))
                .map(|p| {
                    tracing::info!(profile = %p.name, aspect = %aspect.name, "Matched aspect upgrade");
                    MatchedFilter::named(format!("{}.AspectUpgrades", p.name)).with_aspect()
                })
                .collect();
            if !matched.is_empty() {
                return FilterResult::from_matches(matched);
            }
        }
    }

    let keep = match config.keep_aspects {
        AspectPolicy::None => false,
        AspectPolicy::Upgrade => item.codex_upgrade,
        AspectPolicy::All => true,
    };
    if !keep {
        return FilterResult::default();
    }
    tracing::info!(item = %item.name, "Keeping legendary for its aspect");
    FilterResult::from_matches(vec![MatchedFilter::named("AspectUpgrades").with_aspect()])
}

pub(crate) fn check_cosmetic(item: &Item, config: &GlobalConfig) -> FilterResult {
    match config.handle_cosmetics {
        CosmeticPolicy::Ignore if item.cosmetic_upgrade => {
            tracing::info!(item = %item.name, "Keeping new cosmetic");
            FilterResult::from_matches(vec![MatchedFilter::named("Cosmetics")])
        }
        _ => FilterResult::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Aspect, ItemType, Rarity};
    use crate::profile::Profile;

    fn legendary(codex_upgrade: bool) -> Item {
        let mut item = Item::new(Rarity::Legendary, Some(ItemType::Helm));
        item.power = Some(800);
        item.aspect = Some(Aspect::new("of_disobedience"));
        item.codex_upgrade = codex_upgrade;
        item
    }

    #[test]
    fn test_profile_aspect_upgrade() {
        let profiles = ProfileSet::new(vec![Profile::new("barb").with_aspect_upgrade("of_disobedience")]);
        let config = GlobalConfig::default().with_keep_aspects(AspectPolicy::None);

        let result = check_aspect_upgrade(&legendary(true), &profiles, &config);
        assert!(result.keep);
        assert_eq!(result.matched[0].profile_qualified_name, "barb.AspectUpgrades");
        assert!(result.matched[0].did_match_aspect);

        assert!(!check_aspect_upgrade(&legendary(false), &profiles, &config).keep);
    }

    #[test]
    fn test_aspect_policy() {
        let profiles = ProfileSet::default();
        let policy = |p| GlobalConfig::default().with_keep_aspects(p);

        assert!(!check_aspect_upgrade(&legendary(true), &profiles, &policy(AspectPolicy::None)).keep);
        assert!(check_aspect_upgrade(&legendary(true), &profiles, &policy(AspectPolicy::Upgrade)).keep);
        assert!(!check_aspect_upgrade(&legendary(false), &profiles, &policy(AspectPolicy::Upgrade)).keep);

        let all = check_aspect_upgrade(&legendary(false), &profiles, &policy(AspectPolicy::All));
        assert!(all.keep);
        assert_eq!(all.matched[0].profile_qualified_name, "AspectUpgrades");
    }

    #[test]
    fn test_cosmetic_policy() {
        let mut item = legendary(false);
        assert!(!check_cosmetic(&item, &GlobalConfig::default()).keep);

        item.cosmetic_upgrade = true;
        let result = check_cosmetic(&item, &GlobalConfig::default());
        assert!(result.keep);
        assert_eq!(result.matched[0].profile_qualified_name, "Cosmetics");

        let junk = GlobalConfig::default().with_handle_cosmetics(CosmeticPolicy::Junk);
        assert!(!check_cosmetic(&item, &junk).keep);
    }
}
