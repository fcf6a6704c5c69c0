//! Parsed item model.
//!
//! An [`Item`] is built once per tooltip block by the parser and then only
//! read: the evaluator takes `&Item` and never mutates it.

mod item_type;
mod rarity;

pub use item_type::ItemType;
pub use rarity::Rarity;

use serde::Serialize;

/// How an affix line was rolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AffixKind {
    #[default]
    Normal,
    /// Rolled without a tooltip range: a boosted roll.
    Greater,
    /// Fixed slot every item of the type carries.
    Inherent,
    Rerolled,
    Tempered,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Affix {
    /// Canonical snake_case dictionary id.
    pub name: String,
    /// Tooltip line as received.
    pub text: String,
    pub value: Option<f64>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub kind: AffixKind,
}

impl Affix {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: String::new(),
            value: None,
            min_value: None,
            max_value: None,
            kind: AffixKind::Normal,
        }
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min_value = Some(min);
        self.max_value = Some(max);
        self
    }

    pub fn with_kind(mut self, kind: AffixKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn is_greater(&self) -> bool {
        self.kind == AffixKind::Greater
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aspect {
    pub name: String,
    pub text: String,
    pub value: Option<f64>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
}

impl Aspect {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: String::new(),
            value: None,
            min_value: None,
            max_value: None,
        }
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min_value = Some(min);
        self.max_value = Some(max);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Item {
    pub rarity: Rarity,
    /// `None` for anything the parser could not place; never matches a filter.
    pub item_type: Option<ItemType>,
    pub power: Option<i32>,
    /// Canonical snake_case display name (dungeon name for sigils).
    pub name: String,
    pub affixes: Vec<Affix>,
    pub inherent: Vec<Affix>,
    pub aspect: Option<Aspect>,
    pub sanctified: bool,
    pub is_chaos: bool,
    pub is_in_shop: bool,
    pub codex_upgrade: bool,
    pub cosmetic_upgrade: bool,
}

impl Item {
    pub fn new(rarity: Rarity, item_type: Option<ItemType>) -> Self {
        Self {
            rarity,
            item_type,
            ..Default::default()
        }
    }

    /// Greater affixes among the random affixes, tempered ones excluded.
    pub fn greater_affix_count(&self) -> usize {
        self.affixes
            .iter()
            .filter(|a| a.kind != AffixKind::Tempered && a.is_greater())
            .count()
    }
}
