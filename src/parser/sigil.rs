//! Sigil blocks: dungeon name plus two rolled affixes.

use super::text::cleaned;
use crate::dictionary::{canonicalize, correct_name};
use crate::item::{Affix, Item};

const NAME_LINE: usize = 2;
/// Affix name lines when the block has no `AFFIXES` header.
const LEGACY_AFFIX_LINES: [usize; 2] = [4, 6];
/// Affix names alternate with their description lines after the header.
const AFFIX_OFFSETS: [usize; 2] = [1, 3];

/// Index of the `AFFIXES` / `DUNGEON AFFIXES` header, if any.
fn affix_header(block: &[String]) -> Option<usize> {
    block
        .iter()
        .enumerate()
        .skip(NAME_LINE + 1)
        .find(|(_, line)| cleaned(line).ends_with("affixes"))
        .map(|(idx, _)| idx)
}

pub(crate) fn decode_sigil(block: &[String], item: &mut Item) {
    if let Some(line) = block.get(NAME_LINE) {
        let dungeon = line.split(" in ").next().unwrap_or(line.as_str());
        item.name = correct_name(dungeon);
    }

    let lines = match affix_header(block) {
        Some(header) => AFFIX_OFFSETS.map(|offset| header + offset),
        None => {
            tracing::debug!(name = %item.name, "Sigil has no affix header, using fixed offsets");
            LEGACY_AFFIX_LINES
        }
    };

    item.affixes = lines
        .iter()
        .filter_map(|idx| block.get(*idx))
        .map(|text| {
            let mut affix = Affix::new(canonicalize(text));
            affix.text = text.clone();
            affix
        })
        .collect();
}
