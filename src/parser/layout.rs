//! Tooltip layout: where inherent, affix and aspect lines sit in a gear block.
//!
//! Every literal the layout depends on lives in the tables below so a wording
//! change in game text shows up as a failing test here instead of a silent
//! misparse somewhere else.

use super::text::{cleaned, find_line};
use crate::error::{ParseError, Result};
use crate::item::{ItemType, Rarity};

/// Lines that, found where a 4th affix would be, mean the item only rolled 3.
///
/// | Rarity | Prefixes (lowercase) |
/// |--------|----------------------|
/// | Rare | `empty socket`, `requires level`, `properties lost when equipped` |
/// | Legendary | `imprinted:` (a 3-affix rare upgraded by imprinting) |
pub(crate) const THREE_AFFIX_MARKERS: [(Rarity, &[&str]); 2] = [
    (
        Rarity::Rare,
        &["empty socket", "requires level", "properties lost when equipped"],
    ),
    (Rarity::Legendary, &["imprinted:"]),
];

/// Header lines that may directly follow the item power line and precede the
/// first affix when no category landmark is present.
pub(crate) const HEADER_CONTINUATIONS: [&str; 3] = ["quality", "masterwork", "armory loadout"];

pub(crate) const ITEM_POWER: &str = "item power";

pub(crate) const DEFAULT_AFFIX_COUNT: usize = 4;

/// Category landmark and how many lines after it the affixes begin.
///
/// A weapon's DPS line is followed by damage-per-hit and attacks-per-second.
pub(crate) fn landmark(item_type: ItemType) -> Option<(&'static str, usize)> {
    if item_type.is_weapon() {
        Some(("damage per second", 3))
    } else if item_type.is_armor() || item_type == ItemType::Shield {
        Some(("armor", 1))
    } else if item_type.is_jewelry() {
        Some(("all resist", 1))
    } else {
        None
    }
}

/// Inherent lines before the random affixes. A unique's dictionary override
/// wins over the per-type default.
pub(crate) fn inherent_count(
    item_type: ItemType,
    rarity: Rarity,
    unique_override: Option<usize>,
) -> usize {
    if rarity.is_unique_or_mythic() {
        if let Some(count) = unique_override {
            return count;
        }
    }
    if item_type.is_weapon() || item_type == ItemType::Boots {
        1
    } else if item_type == ItemType::Shield {
        3
    } else {
        0
    }
}

fn three_affix_markers(rarity: Rarity) -> &'static [&'static str] {
    THREE_AFFIX_MARKERS
        .iter()
        .find(|(r, _)| *r == rarity)
        .map(|(_, markers)| *markers)
        .unwrap_or(&[])
}

/// Line ranges of one gear block. All indices are clamped to the block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Layout {
    pub start: usize,
    pub inherent_count: usize,
    pub affix_count: usize,
    pub aspect_line: Option<usize>,
}

impl Layout {
    pub(crate) fn locate(
        block: &[String],
        item_type: ItemType,
        rarity: Rarity,
        unique_override: Option<usize>,
    ) -> Result<Self> {
        let start = Self::affix_start(block, item_type)?;
        let inherent_count = inherent_count(item_type, rarity, unique_override);

        let mut affix_count = DEFAULT_AFFIX_COUNT;
        if let Some(line) = block.get(start + inherent_count + DEFAULT_AFFIX_COUNT - 1) {
            let lower = line.trim().to_lowercase();
            if three_affix_markers(rarity)
                .iter()
                .any(|marker| lower.starts_with(marker))
            {
                affix_count = DEFAULT_AFFIX_COUNT - 1;
            }
        }

        let aspect_line = Some(start + inherent_count + affix_count)
            .filter(|idx| rarity.has_aspect() && *idx < block.len());

        Ok(Self {
            start,
            inherent_count,
            affix_count,
            aspect_line,
        })
    }

    fn affix_start(block: &[String], item_type: ItemType) -> Result<usize> {
        if let Some((marker, offset)) = landmark(item_type) {
            if let Some(idx) = block.iter().position(|line| cleaned(line) == marker) {
                return Ok(idx + offset);
            }
        }

        let mut base = find_line(block, ITEM_POWER).ok_or_else(|| ParseError::MissingLandmark {
            item_type: item_type.to_string(),
        })?;
        while let Some(next) = block.get(base + 1) {
            let lower = next.to_lowercase();
            if !HEADER_CONTINUATIONS.iter().any(|h| lower.contains(h)) {
                break;
            }
            base += 1;
        }
        Ok(base + 1)
    }

    pub(crate) fn inherent_lines<'a>(&self, block: &'a [String]) -> &'a [String] {
        clamp(block, self.start, self.start + self.inherent_count)
    }

    pub(crate) fn affix_lines<'a>(&self, block: &'a [String]) -> &'a [String] {
        let from = self.start + self.inherent_count;
        clamp(block, from, from + self.affix_count)
    }
}

fn clamp(block: &[String], from: usize, to: usize) -> &[String] {
    let from = from.min(block.len());
    let to = to.min(block.len());
    &block[from..to]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_marker_table_covers_rare_and_legendary_only() {
        assert_eq!(three_affix_markers(Rarity::Rare).len(), 3);
        assert_eq!(three_affix_markers(Rarity::Legendary), &["imprinted:"]);
        assert!(three_affix_markers(Rarity::Unique).is_empty());
        for (_, markers) in THREE_AFFIX_MARKERS {
            for marker in markers {
                assert_eq!(*marker, marker.to_lowercase());
            }
        }
    }

    #[test]
    fn test_inherent_counts() {
        assert_eq!(inherent_count(ItemType::Sword, Rarity::Legendary, None), 1);
        assert_eq!(inherent_count(ItemType::Boots, Rarity::Rare, None), 1);
        assert_eq!(inherent_count(ItemType::Shield, Rarity::Legendary, None), 3);
        assert_eq!(inherent_count(ItemType::Helm, Rarity::Legendary, None), 0);
        assert_eq!(inherent_count(ItemType::Ring, Rarity::Unique, Some(2)), 2);
        // Override only applies to uniques and mythics
        assert_eq!(inherent_count(ItemType::Ring, Rarity::Legendary, Some(2)), 0);
    }

    #[test]
    fn test_rare_with_empty_socket_has_three_affixes() {
        let lines = block(&[
            "DREAD VISAGE",
            "Rare Helm",
            "750 Item Power",
            "350 Armor",
            "+8.0% Cooldown Reduction [6.0 - 9.0]%",
            "+120 Maximum Life [100 - 140]",
            "+30 Strength [25 - 35]",
            "Empty Socket",
            "Requires Level 60",
        ]);
        let layout = Layout::locate(&lines, ItemType::Helm, Rarity::Rare, None).unwrap();
        assert_eq!(layout.start, 4);
        assert_eq!(layout.affix_count, 3);
        assert_eq!(layout.aspect_line, None);
        assert_eq!(layout.affix_lines(&lines).len(), 3);
        assert!(layout.inherent_lines(&lines).is_empty());
    }

    #[test]
    fn test_rare_with_four_affixes() {
        let lines = block(&[
            "DREAD VISAGE",
            "Rare Helm",
            "750 Item Power",
            "350 Armor",
            "+8.0% Cooldown Reduction [6.0 - 9.0]%",
            "+120 Maximum Life [100 - 140]",
            "+30 Strength [25 - 35]",
            "+5 Intelligence [3 - 8]",
            "Empty Socket",
        ]);
        let layout = Layout::locate(&lines, ItemType::Helm, Rarity::Rare, None).unwrap();
        assert_eq!(layout.affix_count, 4);
    }

    #[test]
    fn test_imprinted_legendary_has_three_affixes() {
        let lines = block(&[
            "GRIM HELM OF DISOBEDIENCE",
            "Legendary Helm",
            "750 Item Power",
            "350 Armor",
            "+8.0% Cooldown Reduction [6.0 - 9.0]%",
            "+120 Maximum Life [100 - 140]",
            "+30 Strength [25 - 35]",
            "Imprinted: You gain 1.0% [0.5 - 1.0]% increased Armor for 4 seconds",
        ]);
        let layout = Layout::locate(&lines, ItemType::Helm, Rarity::Legendary, None).unwrap();
        assert_eq!(layout.affix_count, 3);
        assert_eq!(layout.aspect_line, Some(7));
    }

    #[test]
    fn test_weapon_start_skips_damage_lines() {
        let lines = block(&[
            "ASCENDANT QUARTERSTAFF OF UNYIELDING HITS",
            "Ancestral Legendary Quarterstaff",
            "800 Item Power",
            "596 Damage Per Second",
            "[434 - 650] Damage per Hit",
            "1.10 Attacks per Second (Fast)",
            "45% Block Chance [45]%",
        ]);
        let layout =
            Layout::locate(&lines, ItemType::Quarterstaff, Rarity::Legendary, None).unwrap();
        assert_eq!(layout.start, 6);
        assert_eq!(layout.inherent_lines(&lines), &lines[6..7]);
        // Truncated block: slices are clamped rather than panicking
        assert!(layout.affix_lines(&lines).is_empty());
        assert_eq!(layout.aspect_line, None);
    }

    #[test]
    fn test_jewelry_falls_back_to_item_power_and_skips_header() {
        let lines = block(&[
            "GALVANICAZURITE",
            "Ancestral Unique Ring",
            "800 Item Power",
            "Masterwork: 4/12",
            "+12.5% Resistance to All Elements [12.5]%",
        ]);
        let layout = Layout::locate(&lines, ItemType::Ring, Rarity::Unique, Some(2)).unwrap();
        assert_eq!(layout.start, 4);
    }

    #[test]
    fn test_missing_landmark() {
        let lines = block(&["NAME", "Legendary Helm", "Sell Value: 1 Gold"]);
        let err = Layout::locate(&lines, ItemType::Helm, Rarity::Legendary, None).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingLandmark {
                item_type: "helm".to_string()
            }
        );
    }
}
