//! Profile model: the user-authored filters the evaluator reads.
//!
//! All types here are plain values. The evaluator only borrows them; nothing
//! in a [`ProfileSet`] changes during evaluation. Reloading means building a
//! new set and swapping it into a [`ProfileStore`].

mod loader;

pub use loader::load_profile;

use crate::item::{ItemType, Rarity};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};

/// Direction of a value constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    /// Rolled value must be at least the target.
    #[default]
    Larger,
    /// Rolled value must be at most the target.
    Smaller,
}

impl Comparison {
    pub fn accepts(self, value: f64, target: f64) -> bool {
        match self {
            Comparison::Larger => value >= target,
            Comparison::Smaller => value <= target,
        }
    }
}

/// One entry of an affix pool or a unique's affix list.
#[derive(Debug, Clone, PartialEq)]
pub struct AffixRequirement {
    pub name: String,
    pub value: Option<f64>,
    pub comparison: Comparison,
    /// Marked as a greater affix the filter cares about.
    pub want_greater: bool,
}

impl AffixRequirement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            comparison: Comparison::Larger,
            want_greater: false,
        }
    }

    pub fn with_value(mut self, value: f64, comparison: Comparison) -> Self {
        self.value = Some(value);
        self.comparison = comparison;
        self
    }

    pub fn greater(mut self) -> Self {
        self.want_greater = true;
        self
    }
}

/// Group of requirements with a satisfied-count window.
#[derive(Debug, Clone, PartialEq)]
pub struct AffixPool {
    pub requirements: Vec<AffixRequirement>,
    pub min_count: usize,
    pub max_count: usize,
}

impl AffixPool {
    /// Pool that needs every requirement.
    pub fn new(requirements: Vec<AffixRequirement>) -> Self {
        let count = requirements.len();
        Self {
            requirements,
            min_count: count,
            max_count: count,
        }
    }

    pub fn with_counts(mut self, min_count: usize, max_count: usize) -> Self {
        self.min_count = min_count;
        self.max_count = max_count;
        self
    }
}

/// A named item filter from a profile's `Affixes` section.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFilter {
    pub name: String,
    /// Empty means any type.
    pub item_types: Vec<ItemType>,
    pub min_power: i32,
    pub min_greater_affix_count: usize,
    pub affix_pools: Vec<AffixPool>,
    pub inherent_pools: Vec<AffixPool>,
}

impl ItemFilter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            item_types: Vec::new(),
            min_power: 0,
            min_greater_affix_count: 0,
            affix_pools: Vec::new(),
            inherent_pools: Vec::new(),
        }
    }

    pub fn with_item_types(mut self, item_types: impl IntoIterator<Item = ItemType>) -> Self {
        self.item_types = item_types.into_iter().collect();
        self
    }

    pub fn with_min_power(mut self, min_power: i32) -> Self {
        self.min_power = min_power;
        self
    }

    pub fn with_min_greater_affix_count(mut self, count: usize) -> Self {
        self.min_greater_affix_count = count;
        self
    }

    pub fn with_affix_pool(mut self, pool: AffixPool) -> Self {
        self.affix_pools.push(pool);
        self
    }

    pub fn with_inherent_pool(mut self, pool: AffixPool) -> Self {
        self.inherent_pools.push(pool);
        self
    }
}

/// Aspect constraint of a unique filter.
#[derive(Debug, Clone, PartialEq)]
pub struct AspectRequirement {
    pub name: String,
    pub value: Option<f64>,
    pub comparison: Comparison,
}

impl AspectRequirement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            comparison: Comparison::Larger,
        }
    }

    pub fn with_value(mut self, value: f64, comparison: Comparison) -> Self {
        self.value = Some(value);
        self.comparison = comparison;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UniqueFilter {
    pub aspect: Option<AspectRequirement>,
    /// Every entry must match; there is no count window.
    pub affixes: Vec<AffixRequirement>,
    pub item_types: Vec<ItemType>,
    pub profile_alias: Option<String>,
    pub min_greater_affix_count: usize,
    /// Minimum roll position inside the aspect range, 0..=100.
    pub min_percent_of_aspect: u32,
    pub min_power: i32,
    /// Only applies to mythic items.
    pub mythic: bool,
}

impl UniqueFilter {
    pub fn for_aspect(aspect: AspectRequirement) -> Self {
        Self {
            aspect: Some(aspect),
            ..Self::default()
        }
    }
}

/// Which list wins when a sigil appears on both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SigilPriority {
    #[default]
    Blacklist,
    Whitelist,
}

/// Dungeon or sigil affix, optionally only when another affix is also rolled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigilCondition {
    pub name: String,
    pub conditions: Vec<String>,
}

impl SigilCondition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            conditions: Vec::new(),
        }
    }

    pub fn when_any(mut self, conditions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.conditions = conditions.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SigilFilter {
    pub blacklist: Vec<SigilCondition>,
    pub whitelist: Vec<SigilCondition>,
    pub priority: SigilPriority,
}

/// Tribute name prefix and rarity set; an absent part matches anything.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TributeFilter {
    pub name: Option<String>,
    pub rarities: Vec<Rarity>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Profile {
    pub name: String,
    pub affix_filters: Vec<ItemFilter>,
    /// Legendary aspect ids worth keeping for a codex upgrade.
    pub aspect_upgrades: Vec<String>,
    pub sigils: Option<SigilFilter>,
    pub tributes: Vec<TributeFilter>,
    pub uniques: Vec<UniqueFilter>,
}

impl Profile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_affix_filter(mut self, filter: ItemFilter) -> Self {
        self.affix_filters.push(filter);
        self
    }

    pub fn with_aspect_upgrade(mut self, aspect: impl Into<String>) -> Self {
        self.aspect_upgrades.push(aspect.into());
        self
    }

    pub fn with_sigils(mut self, sigils: SigilFilter) -> Self {
        self.sigils = Some(sigils);
        self
    }

    pub fn with_tribute(mut self, tribute: TributeFilter) -> Self {
        self.tributes.push(tribute);
        self
    }

    pub fn with_unique(mut self, unique: UniqueFilter) -> Self {
        self.uniques.push(unique);
        self
    }
}

/// Profiles evaluated together, in load order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileSet {
    profiles: Vec<Profile>,
}

impl ProfileSet {
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self { profiles }
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn get(&self, name: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    pub fn has_affix_filters(&self) -> bool {
        self.profiles.iter().any(|p| !p.affix_filters.is_empty())
    }

    pub fn has_unique_filters(&self) -> bool {
        self.profiles.iter().any(|p| !p.uniques.is_empty())
    }

    pub fn has_sigil_filters(&self) -> bool {
        self.profiles.iter().any(|p| p.sigils.is_some())
    }

    pub fn has_tribute_filters(&self) -> bool {
        self.profiles.iter().any(|p| !p.tributes.is_empty())
    }
}

/// Shared, swappable profile snapshot.
///
/// Readers take an `Arc` snapshot and evaluate against it; a reload replaces
/// the snapshot as a whole, so an evaluation never sees half of a reload.
#[derive(Debug, Default)]
pub struct ProfileStore {
    current: RwLock<Arc<ProfileSet>>,
}

impl ProfileStore {
    pub fn new(profiles: ProfileSet) -> Self {
        Self {
            current: RwLock::new(Arc::new(profiles)),
        }
    }

    pub fn snapshot(&self) -> Arc<ProfileSet> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Swap in a new set. Returns the previous one.
    pub fn replace(&self, profiles: ProfileSet) -> Arc<ProfileSet> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        tracing::info!(profiles = profiles.len(), "Replaced profile snapshot");
        std::mem::replace(&mut *guard, Arc::new(profiles))
    }
}
