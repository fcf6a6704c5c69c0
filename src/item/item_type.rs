//! Item categories as they appear on the tooltip type line.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ItemType {
    // Weapons
    Axe,
    Axe2H,
    Bow,
    Crossbow2H,
    Dagger,
    Focus,
    Glaive,
    Mace,
    Mace2H,
    Polearm,
    Quarterstaff,
    Scythe,
    Scythe2H,
    Staff,
    Sword,
    Sword2H,
    Tome,
    Wand,
    // Armor
    Boots,
    ChestArmor,
    Gloves,
    Helm,
    Legs,
    // Jewelry
    Amulet,
    Ring,
    Shield,
    // Mapping
    Compass,
    Sigil,
    EscalationSigil,
    Tribute,
    // Everything else
    Cache,
    Consumable,
    Cosmetic,
    Elixir,
    Gem,
    Incense,
    LairBossKey,
    Material,
    Rune,
    WhisperingWood,
}

const ALL: [ItemType; 40] = [
    ItemType::Axe,
    ItemType::Axe2H,
    ItemType::Bow,
    ItemType::Crossbow2H,
    ItemType::Dagger,
    ItemType::Focus,
    ItemType::Glaive,
    ItemType::Mace,
    ItemType::Mace2H,
    ItemType::Polearm,
    ItemType::Quarterstaff,
    ItemType::Scythe,
    ItemType::Scythe2H,
    ItemType::Staff,
    ItemType::Sword,
    ItemType::Sword2H,
    ItemType::Tome,
    ItemType::Wand,
    ItemType::Boots,
    ItemType::ChestArmor,
    ItemType::Gloves,
    ItemType::Helm,
    ItemType::Legs,
    ItemType::Amulet,
    ItemType::Ring,
    ItemType::Shield,
    ItemType::Compass,
    ItemType::Sigil,
    ItemType::EscalationSigil,
    ItemType::Tribute,
    ItemType::Cache,
    ItemType::Consumable,
    ItemType::Cosmetic,
    ItemType::Elixir,
    ItemType::Gem,
    ItemType::Incense,
    ItemType::LairBossKey,
    ItemType::Material,
    ItemType::Rune,
    ItemType::WhisperingWood,
];

impl ItemType {
    /// Lowercased tooltip wording.
    pub fn display_name(self) -> &'static str {
        match self {
            ItemType::Axe => "axe",
            ItemType::Axe2H => "two-handed axe",
            ItemType::Bow => "bow",
            ItemType::Crossbow2H => "crossbow",
            ItemType::Dagger => "dagger",
            ItemType::Focus => "focus",
            ItemType::Glaive => "glaive",
            ItemType::Mace => "mace",
            ItemType::Mace2H => "two-handed mace",
            ItemType::Polearm => "polearm",
            ItemType::Quarterstaff => "quarterstaff",
            ItemType::Scythe => "scythe",
            ItemType::Scythe2H => "two-handed scythe",
            ItemType::Staff => "staff",
            ItemType::Sword => "sword",
            ItemType::Sword2H => "two-handed sword",
            ItemType::Tome => "tome",
            ItemType::Wand => "wand",
            ItemType::Boots => "boots",
            ItemType::ChestArmor => "chest armor",
            ItemType::Gloves => "gloves",
            ItemType::Helm => "helm",
            ItemType::Legs => "pants",
            ItemType::Amulet => "amulet",
            ItemType::Ring => "ring",
            ItemType::Shield => "shield",
            ItemType::Compass => "compass",
            ItemType::Sigil => "nightmare sigil",
            ItemType::EscalationSigil => "escalation sigil",
            ItemType::Tribute => "tribute",
            ItemType::Cache => "cache",
            ItemType::Consumable => "consumable",
            ItemType::Cosmetic => "cosmetic",
            ItemType::Elixir => "elixir",
            ItemType::Gem => "gem",
            ItemType::Incense => "incense",
            ItemType::LairBossKey => "boss key",
            ItemType::Material => "material",
            ItemType::Rune => "rune",
            ItemType::WhisperingWood => "whispering wood",
        }
    }

    fn ident(self) -> &'static str {
        match self {
            ItemType::Axe => "Axe",
            ItemType::Axe2H => "Axe2H",
            ItemType::Bow => "Bow",
            ItemType::Crossbow2H => "Crossbow2H",
            ItemType::Dagger => "Dagger",
            ItemType::Focus => "Focus",
            ItemType::Glaive => "Glaive",
            ItemType::Mace => "Mace",
            ItemType::Mace2H => "Mace2H",
            ItemType::Polearm => "Polearm",
            ItemType::Quarterstaff => "Quarterstaff",
            ItemType::Scythe => "Scythe",
            ItemType::Scythe2H => "Scythe2H",
            ItemType::Staff => "Staff",
            ItemType::Sword => "Sword",
            ItemType::Sword2H => "Sword2H",
            ItemType::Tome => "Tome",
            ItemType::Wand => "Wand",
            ItemType::Boots => "Boots",
            ItemType::ChestArmor => "ChestArmor",
            ItemType::Gloves => "Gloves",
            ItemType::Helm => "Helm",
            ItemType::Legs => "Legs",
            ItemType::Amulet => "Amulet",
            ItemType::Ring => "Ring",
            ItemType::Shield => "Shield",
            ItemType::Compass => "Compass",
            ItemType::Sigil => "Sigil",
            ItemType::EscalationSigil => "EscalationSigil",
            ItemType::Tribute => "Tribute",
            ItemType::Cache => "Cache",
            ItemType::Consumable => "Consumable",
            ItemType::Cosmetic => "Cosmetic",
            ItemType::Elixir => "Elixir",
            ItemType::Gem => "Gem",
            ItemType::Incense => "Incense",
            ItemType::LairBossKey => "LairBossKey",
            ItemType::Material => "Material",
            ItemType::Rune => "Rune",
            ItemType::WhisperingWood => "WhisperingWood",
        }
    }

    /// Exact lookup of a gear type-line remainder ("chest armor", "two-handed sword").
    pub fn from_gear_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        ALL.into_iter()
            .filter(|t| t.is_gear())
            .find(|t| t.display_name() == name)
    }

    pub fn is_weapon(self) -> bool {
        matches!(
            self,
            ItemType::Axe
                | ItemType::Axe2H
                | ItemType::Bow
                | ItemType::Crossbow2H
                | ItemType::Dagger
                | ItemType::Focus
                | ItemType::Glaive
                | ItemType::Mace
                | ItemType::Mace2H
                | ItemType::Polearm
                | ItemType::Quarterstaff
                | ItemType::Scythe
                | ItemType::Scythe2H
                | ItemType::Staff
                | ItemType::Sword
                | ItemType::Sword2H
                | ItemType::Tome
                | ItemType::Wand
        )
    }

    pub fn is_armor(self) -> bool {
        matches!(
            self,
            ItemType::Boots
                | ItemType::ChestArmor
                | ItemType::Gloves
                | ItemType::Helm
                | ItemType::Legs
        )
    }

    pub fn is_jewelry(self) -> bool {
        matches!(self, ItemType::Amulet | ItemType::Ring)
    }

    /// Equipment that goes through affix decoding.
    pub fn is_gear(self) -> bool {
        self.is_weapon() || self.is_armor() || self.is_jewelry() || self == ItemType::Shield
    }

    pub fn is_sigil(self) -> bool {
        matches!(self, ItemType::Sigil | ItemType::EscalationSigil)
    }
}

/// Accepts tooltip wording ("chest armor") or identifiers ("ChestArmor",
/// "chest_armor"), ignoring case and separators.
impl FromStr for ItemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let squash = |v: &str| -> String {
            v.chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
                .to_lowercase()
        };
        let wanted = squash(s);
        ALL.into_iter()
            .find(|t| squash(t.ident()) == wanted || squash(t.display_name()) == wanted)
            .ok_or_else(|| format!("unknown item type `{s}`"))
    }
}

impl TryFrom<String> for ItemType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ItemType> for String {
    fn from(value: ItemType) -> Self {
        value.ident().to_string()
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gear_name_lookup_is_exact() {
        assert_eq!(ItemType::from_gear_name("Chest Armor"), Some(ItemType::ChestArmor));
        assert_eq!(ItemType::from_gear_name("two-handed sword"), Some(ItemType::Sword2H));
        assert_eq!(ItemType::from_gear_name("chest"), None);
        assert_eq!(ItemType::from_gear_name("compass"), None);
    }

    #[test]
    fn test_parse_accepts_identifiers_and_wording() {
        assert_eq!("ChestArmor".parse::<ItemType>(), Ok(ItemType::ChestArmor));
        assert_eq!("chest_armor".parse::<ItemType>(), Ok(ItemType::ChestArmor));
        assert_eq!("Two-Handed Axe".parse::<ItemType>(), Ok(ItemType::Axe2H));
        assert_eq!("pants".parse::<ItemType>(), Ok(ItemType::Legs));
        assert!("trousers".parse::<ItemType>().is_err());
    }

    #[test]
    fn test_categories_are_disjoint() {
        for item_type in ALL {
            let flags = [
                item_type.is_weapon(),
                item_type.is_armor(),
                item_type.is_jewelry(),
                item_type == ItemType::Shield,
            ];
            assert!(flags.iter().filter(|f| **f).count() <= 1, "{item_type:?}");
        }
    }

    #[test]
    fn test_display_names_unique() {
        let mut names: Vec<_> = ALL.iter().map(|t| t.display_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ALL.len());
    }
}
