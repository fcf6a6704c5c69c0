//! Item rarity tiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum Rarity {
    #[default]
    Common,
    Magic,
    Rare,
    Legendary,
    Unique,
    Mythic,
}

impl Rarity {
    pub const ALL: [Rarity; 6] = [
        Rarity::Common,
        Rarity::Magic,
        Rarity::Rare,
        Rarity::Legendary,
        Rarity::Unique,
        Rarity::Mythic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Magic => "magic",
            Rarity::Rare => "rare",
            Rarity::Legendary => "legendary",
            Rarity::Unique => "unique",
            Rarity::Mythic => "mythic",
        }
    }

    /// Rarity of a tooltip type-line token. Unknown tokens are `Common`.
    pub fn from_token(token: &str) -> Self {
        token.parse().unwrap_or(Rarity::Common)
    }

    /// Legendaries, uniques and mythics carry an aspect line.
    pub fn has_aspect(self) -> bool {
        matches!(self, Rarity::Legendary | Rarity::Unique | Rarity::Mythic)
    }

    pub fn is_unique_or_mythic(self) -> bool {
        matches!(self, Rarity::Unique | Rarity::Mythic)
    }

    /// Rarities dropped before any rule runs.
    pub fn is_junk(self, junk_rares: bool) -> bool {
        match self {
            Rarity::Common | Rarity::Magic => true,
            Rarity::Rare => junk_rares,
            _ => false,
        }
    }
}

impl FromStr for Rarity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Rarity::ALL
            .into_iter()
            .find(|rarity| rarity.as_str() == lowered)
            .ok_or_else(|| format!("unknown rarity `{s}`"))
    }
}

impl TryFrom<String> for Rarity {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rarity> for String {
    fn from(value: Rarity) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
