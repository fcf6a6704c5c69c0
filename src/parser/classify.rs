//! Step one of parsing: decide what kind of item a block describes.
//!
//! Classification looks at the first two lines only (the title and the type
//! line) and walks [`RULES`] top to bottom; the first rule whose predicate
//! holds builds the base item. Order is part of the contract:
//!
//! | # | Rule | Test |
//! |---|------|------|
//! | 1 | compass | title starts with `Compass` |
//! | 2 | nightmare sigil | title starts with `Nightmare Sigil` |
//! | 3 | escalation sigil | title starts with `Escalation Sigil` |
//! | 4 | tribute | title starts with `TRIBUTE OF` |
//! | 5 | whispering key | title starts with `WHISPERING KEY` |
//! | 6 | summoning material | type line ends with `summoning` |
//! | 7 | gem | type line ends with `gem` |
//! | 8 | cache | type line ends with `cache` |
//! | 9 | whispering wood | type line ends with `whispering wood` |
//! | 10 | cosmetic | type line starts with `cosmetic` |
//! | 11 | boss key | type line ends with `boss key` |
//! | 12 | rune | type line contains `rune of` |
//! | 13 | elixir | type line ends with `elixir` |
//! | 14 | incense | type line ends with `incense` |
//! | 15 | consumable | type line ends with `consumable` or `scroll` |
//! | 16 | gear | always |
//!
//! Title rules run before type-line rules because a tribute or sigil type
//! line can end in words the material rules look for. Elixir and incense are
//! checked before the generic consumable suffixes, and cosmetics before boss
//! keys, since a cosmetic's type line may name the item it skins.

use super::text::strip_parenthesized;
use crate::dictionary::correct_name;
use crate::error::{ParseError, Result};
use crate::item::{Item, ItemType, Rarity};

/// Title and type line of a block.
pub(crate) struct Header<'a> {
    pub title: &'a str,
    pub type_line: &'a str,
    type_lower: String,
}

impl<'a> Header<'a> {
    pub(crate) fn new(block: &'a [String]) -> Result<Self> {
        match block {
            [title, type_line, ..] => Ok(Self {
                title: title.trim(),
                type_line: type_line.trim(),
                type_lower: type_line.trim().to_lowercase(),
            }),
            _ => Err(ParseError::EmptyBlock),
        }
    }
}

pub(crate) struct Rule {
    pub name: &'static str,
    pub applies: fn(&Header<'_>) -> bool,
    pub build: fn(&Header<'_>) -> Item,
}

pub(crate) const RULES: [Rule; 16] = [
    Rule {
        name: "compass",
        applies: |h| h.title.starts_with("Compass"),
        build: |_| Item::new(Rarity::Common, Some(ItemType::Compass)),
    },
    Rule {
        name: "nightmare sigil",
        applies: |h| h.title.starts_with("Nightmare Sigil"),
        build: |_| Item::new(Rarity::Common, Some(ItemType::Sigil)),
    },
    Rule {
        name: "escalation sigil",
        applies: |h| h.title.starts_with("Escalation Sigil"),
        build: |_| Item::new(Rarity::Common, Some(ItemType::EscalationSigil)),
    },
    Rule {
        name: "tribute",
        applies: |h| h.title.starts_with("TRIBUTE OF"),
        build: tribute,
    },
    Rule {
        name: "whispering key",
        applies: |h| h.title.starts_with("WHISPERING KEY"),
        build: |_| Item::new(Rarity::Common, Some(ItemType::Consumable)),
    },
    Rule {
        name: "summoning material",
        applies: |h| h.type_lower.ends_with("summoning"),
        build: |_| Item::new(Rarity::Common, Some(ItemType::Material)),
    },
    Rule {
        name: "gem",
        applies: |h| h.type_lower.ends_with("gem"),
        build: |_| Item::new(Rarity::Common, Some(ItemType::Gem)),
    },
    Rule {
        name: "cache",
        applies: |h| h.type_lower.ends_with("cache"),
        build: |_| Item::new(Rarity::Common, Some(ItemType::Cache)),
    },
    Rule {
        name: "whispering wood",
        applies: |h| h.type_lower.ends_with("whispering wood"),
        build: |_| Item::new(Rarity::Common, Some(ItemType::WhisperingWood)),
    },
    Rule {
        name: "cosmetic",
        applies: |h| h.type_lower.starts_with("cosmetic"),
        build: |_| {
            let mut item = Item::new(Rarity::Common, Some(ItemType::Cosmetic));
            item.cosmetic_upgrade = true;
            item
        },
    },
    Rule {
        name: "boss key",
        applies: |h| h.type_lower.ends_with("boss key"),
        build: |_| Item::new(Rarity::Common, Some(ItemType::LairBossKey)),
    },
    Rule {
        name: "rune",
        applies: |h| h.type_lower.contains("rune of"),
        build: |h| {
            let prefix = h.type_lower.split("rune of").next().unwrap_or_default();
            Item::new(Rarity::from_token(prefix.trim()), Some(ItemType::Rune))
        },
    },
    Rule {
        name: "elixir",
        applies: |h| h.type_lower.ends_with("elixir"),
        build: |h| leading_rarity(h, ItemType::Elixir),
    },
    Rule {
        name: "incense",
        applies: |h| h.type_lower.ends_with("incense"),
        build: |h| leading_rarity(h, ItemType::Incense),
    },
    Rule {
        name: "consumable",
        applies: |h| h.type_lower.ends_with("consumable") || h.type_lower.ends_with("scroll"),
        build: |h| leading_rarity(h, ItemType::Consumable),
    },
    Rule {
        name: "gear",
        applies: |_| true,
        build: gear,
    },
];

fn first_token(text: &str) -> &str {
    text.split_whitespace().next().unwrap_or_default()
}

fn leading_rarity(header: &Header<'_>, item_type: ItemType) -> Item {
    Item::new(Rarity::from_token(first_token(header.type_line)), Some(item_type))
}

/// `TRIBUTE OF ...` title, `<Rarity> <Name>` type line.
fn tribute(header: &Header<'_>) -> Item {
    let mut tokens = header.type_line.split_whitespace();
    let rarity = tokens.next().map(Rarity::from_token).unwrap_or_default();
    let mut item = Item::new(rarity, Some(ItemType::Tribute));
    item.name = correct_name(&tokens.collect::<Vec<_>>().join(" "));
    item
}

/// `[Ancestral] [Chaos] <Rarity> <Type> [(annotation)]`. An unknown type
/// leaves `item_type` empty, which no filter ever matches.
fn gear(header: &Header<'_>) -> Item {
    let stripped = strip_parenthesized(&header.type_lower)
        .replace("ancestral", "")
        .replace("chaos", "");
    let mut tokens = stripped.split_whitespace();
    let rarity = tokens.next().map(Rarity::from_token).unwrap_or_default();
    let type_name = tokens.collect::<Vec<_>>().join(" ");

    let mut item = Item::new(rarity, ItemType::from_gear_name(&type_name));
    item.name = correct_name(header.title);
    item.is_chaos = header.type_lower.contains("chaos");
    item
}

/// Classify a block. Returns the name of the rule that fired with the base
/// item it built. Items a rule leaves unnamed are named after the title.
pub(crate) fn classify(block: &[String]) -> Result<(&'static str, Item)> {
    let header = Header::new(block)?;
    let rule = RULES
        .iter()
        .find(|rule| (rule.applies)(&header))
        .ok_or(ParseError::EmptyBlock)?;
    let mut item = (rule.build)(&header);
    if item.name.is_empty() {
        item.name = correct_name(header.title);
    }
    Ok((rule.name, item))
}
