//! Structural parser: one tooltip block in, one [`Item`] out.
//!
//! Parsing runs in fixed stages:
//!
//! 1. [`classify`] picks the item category from the title and type line.
//! 2. Sigils are handled by [`sigil`] and returned.
//! 3. Non-gear categories are returned as classified.
//! 4. Gear gets its flags, then [`layout`] finds the inherent, affix and
//!    aspect lines, which [`affix`] and [`aspect`] decode.
//!
//! Any failure is scoped to the block: callers log it and move on to the next
//! item.

pub(crate) mod affix;
pub(crate) mod aspect;
pub(crate) mod classify;
pub(crate) mod layout;
pub(crate) mod sigil;
pub(crate) mod text;

use crate::dictionary::Dictionaries;
use crate::error::{ParseError, Result};
use crate::item::{AffixKind, Item, Rarity};
use layout::{Layout, ITEM_POWER};
use std::sync::Arc;
use text::{any_line_contains, find_line, first_number};

const SHOP_MARKERS: [&str; 1] = ["to purchase"];
const CODEX_MARKERS: [&str; 2] = ["upgrades an aspect in the codex of power", "unlocks new aspect"];
const COSMETIC_MARKERS: [&str; 1] = ["unlocks new look on salvage"];
const SANCTIFIED: &str = "sanctified";

/// Parses tooltip blocks against a shared dictionary snapshot.
#[derive(Debug, Clone)]
pub struct ItemParser {
    dictionaries: Arc<Dictionaries>,
}

impl ItemParser {
    pub fn new(dictionaries: Arc<Dictionaries>) -> Self {
        Self { dictionaries }
    }

    pub fn dictionaries(&self) -> &Dictionaries {
        &self.dictionaries
    }

    /// Parse one block as emitted by the item detector.
    ///
    /// # Errors
    ///
    /// * [`ParseError::EmptyBlock`] when the block has no type line
    /// * [`ParseError::UnknownUnique`] / [`ParseError::UnknownAspect`] when the
    ///   item name is missing from the dictionaries
    /// * [`ParseError::MissingLandmark`] when a gear block has neither its
    ///   category landmark nor an item power line
    /// * [`ParseError::UnknownFormat`] when an affix line cannot be decoded
    pub fn parse(&self, block: &[String]) -> Result<Item> {
        let (rule, mut item) = classify::classify(block)?;
        tracing::trace!(rule, name = %item.name, "Classified block");

        item.is_in_shop = any_line_contains(block, &SHOP_MARKERS);
        item.power = find_line(block, ITEM_POWER)
            .and_then(|idx| first_number(&block[idx]))
            .map(|power| power as i32);

        let item_type = match item.item_type {
            Some(t) if t.is_sigil() => {
                sigil::decode_sigil(block, &mut item);
                return Ok(item);
            }
            Some(t) if t.is_gear() => t,
            _ => return Ok(item),
        };

        item.codex_upgrade = any_line_contains(block, &CODEX_MARKERS);
        item.cosmetic_upgrade |= any_line_contains(block, &COSMETIC_MARKERS);
        item.sanctified = block
            .iter()
            .any(|line| line.trim().eq_ignore_ascii_case(SANCTIFIED));

        if item.sanctified || matches!(item.rarity, Rarity::Common | Rarity::Magic) {
            return Ok(item);
        }

        let mut unique_override = None;
        if item.rarity.is_unique_or_mythic() {
            let id = self
                .dictionaries
                .resolve_unique(&item.name)
                .ok_or_else(|| ParseError::UnknownUnique(item.name.clone()))?;
            item.name = id.to_string();
            unique_override = self.dictionaries.unique_inherent_count(id);
        }

        let legendary_aspect = if item.rarity == Rarity::Legendary {
            let id = self
                .dictionaries
                .resolve_legendary_aspect(&item.name)
                .ok_or_else(|| ParseError::UnknownAspect(item.name.clone()))?;
            Some(id.to_string())
        } else {
            None
        };

        let layout = Layout::locate(block, item_type, item.rarity, unique_override)?;

        for line in layout.inherent_lines(block) {
            let mut inherent = affix::decode_affix(line, &self.dictionaries)?;
            inherent.kind = AffixKind::Inherent;
            item.inherent.push(inherent);
        }
        for line in layout.affix_lines(block) {
            item.affixes
                .push(affix::decode_affix(line, &self.dictionaries)?);
        }

        if let Some(idx) = layout.aspect_line {
            let text = &block[idx];
            item.aspect = Some(match item.rarity {
                Rarity::Mythic => aspect::decode_mythic_aspect(text, &item.name),
                Rarity::Unique => aspect::decode_aspect(text, &item.name),
                _ => aspect::decode_aspect(text, legendary_aspect.as_deref().unwrap_or_default()),
            });
        }

        Ok(item)
    }
}
