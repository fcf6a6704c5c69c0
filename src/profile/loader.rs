//! Profile documents: YAML in, validated [`Profile`] out.
//!
//! Entries accept the same shorthand forms profile authors write by hand:
//!
//! ```yaml
//! Affixes:
//!   - Helm:
//!       itemType: helm
//!       minPower: 700
//!       minGreaterAffixCount: 1
//!       affixPool:
//!         - count:
//!             - cooldown_reduction                      # name only
//!             - [maximum_life, 800]                     # name, value
//!             - [ultimate_cooldown, 10, smaller]        # name, value, comparison
//!             - {name: armor, greater: true}            # full form
//!           minCount: 2
//! AspectUpgrades: [of_disobedience]
//! Sigils:
//!   blacklist: [cold_resist, [armor_breakers, drifting_shade]]
//!   priority: whitelist
//! Tributes: [legendary, pride, {rarities: [unique, mythic]}]
//! Uniques:
//!   - aspect: [galvanic_azurite, 50]
//!     minPercentOfAspect: 80
//! ```

use super::{
    AffixPool, AffixRequirement, AspectRequirement, Comparison, ItemFilter, Profile, ProfileSet,
    SigilCondition, SigilFilter, SigilPriority, TributeFilter, UniqueFilter,
};
use crate::dictionary::{correct_name, Dictionaries};
use crate::error::ProfileError;
use crate::item::{ItemType, Rarity};
use serde::Deserialize;
use std::collections::BTreeMap;

const MAX_GREATER_AFFIX_COUNT: usize = 3;
const MAX_PERCENT_OF_ASPECT: u32 = 100;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListPart {
    Number(f64),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRequirementMap {
    name: String,
    #[serde(default)]
    value: Option<f64>,
    #[serde(default)]
    comparison: Comparison,
    #[serde(default)]
    greater: bool,
}

/// `name`, `[name, value, comparison]` or the full map.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawRequirement {
    Name(String),
    List(Vec<ListPart>),
    Full(RawRequirementMap),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct RawPool {
    count: Vec<RawRequirement>,
    #[serde(default)]
    min_count: Option<usize>,
    #[serde(default)]
    max_count: Option<usize>,
    /// Old profile format; only read to reject it with a useful message.
    #[serde(default)]
    min_greater_affix_count: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct RawItemFilter {
    #[serde(default)]
    affix_pool: Vec<RawPool>,
    #[serde(default)]
    inherent_pool: Vec<RawPool>,
    #[serde(default)]
    item_type: OneOrMany<ItemType>,
    #[serde(default)]
    min_greater_affix_count: usize,
    #[serde(default)]
    min_power: i32,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSigilCondition {
    Name(String),
    List(Vec<String>),
    Full {
        name: String,
        #[serde(default)]
        condition: Vec<String>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSigilFilter {
    #[serde(default)]
    blacklist: Vec<RawSigilCondition>,
    #[serde(default)]
    whitelist: Vec<RawSigilCondition>,
    #[serde(default)]
    priority: SigilPriority,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTribute {
    Text(String),
    Rarities(Vec<Rarity>),
    Full {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        rarities: OneOrMany<Rarity>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct RawUnique {
    #[serde(default)]
    aspect: Option<RawRequirement>,
    #[serde(default)]
    affix: Vec<RawRequirement>,
    #[serde(default)]
    item_type: OneOrMany<ItemType>,
    #[serde(default)]
    profile_alias: Option<String>,
    #[serde(default)]
    min_greater_affix_count: usize,
    #[serde(default)]
    min_percent_of_aspect: u32,
    #[serde(default)]
    min_power: i32,
    #[serde(default)]
    mythic: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawProfile {
    #[serde(rename = "Affixes", default)]
    affixes: Vec<BTreeMap<String, RawItemFilter>>,
    #[serde(rename = "AspectUpgrades", default)]
    aspect_upgrades: Vec<String>,
    #[serde(rename = "Sigils", default)]
    sigils: Option<RawSigilFilter>,
    #[serde(rename = "Tributes", default)]
    tributes: Vec<RawTribute>,
    #[serde(rename = "Uniques", default)]
    uniques: Vec<RawUnique>,
}

/// Converts raw documents into model types, checking names against the
/// dictionaries as it goes.
struct Validator<'a> {
    profile: &'a str,
    dictionaries: &'a Dictionaries,
}

impl Validator<'_> {
    fn invalid(&self, message: impl Into<String>) -> ProfileError {
        ProfileError::Invalid {
            profile: self.profile.to_string(),
            message: message.into(),
        }
    }

    fn unknown(&self, kind: &'static str, name: &str) -> ProfileError {
        ProfileError::UnknownName {
            profile: self.profile.to_string(),
            kind,
            name: name.to_string(),
        }
    }

    fn requirement(&self, raw: RawRequirement) -> Result<AffixRequirement, ProfileError> {
        let requirement = match raw {
            RawRequirement::Name(name) => AffixRequirement::new(name),
            RawRequirement::List(parts) => self.requirement_from_list(parts)?,
            RawRequirement::Full(map) => AffixRequirement {
                name: map.name,
                value: map.value,
                comparison: map.comparison,
                want_greater: map.greater,
            },
        };
        Ok(requirement)
    }

    fn requirement_from_list(&self, parts: Vec<ListPart>) -> Result<AffixRequirement, ProfileError> {
        if parts.is_empty() || parts.len() > 3 {
            return Err(self.invalid("an affix list must have 1 to 3 entries: [name, value, comparison]"));
        }
        let mut parts = parts.into_iter();
        let name = match parts.next() {
            Some(ListPart::Text(name)) => name,
            _ => return Err(self.invalid("the first entry of an affix list must be its name")),
        };
        let mut requirement = AffixRequirement::new(name);
        match parts.next() {
            Some(ListPart::Number(value)) => requirement.value = Some(value),
            Some(ListPart::Text(text)) => {
                return Err(self.invalid(format!(
                    "affix `{}`: value must be a number, got `{text}`",
                    requirement.name
                )))
            }
            None => {}
        }
        match parts.next() {
            Some(ListPart::Text(text)) => {
                requirement.comparison = match text.trim().to_lowercase().as_str() {
                    "larger" => Comparison::Larger,
                    "smaller" => Comparison::Smaller,
                    _ => {
                        return Err(self.invalid(format!(
                            "affix `{}`: comparison must be larger or smaller, got `{text}`",
                            requirement.name
                        )))
                    }
                }
            }
            Some(ListPart::Number(_)) => {
                return Err(self.invalid(format!(
                    "affix `{}`: comparison must be larger or smaller",
                    requirement.name
                )))
            }
            None => {}
        }
        Ok(requirement)
    }

    fn affix_requirement(&self, raw: RawRequirement) -> Result<AffixRequirement, ProfileError> {
        let requirement = self.requirement(raw)?;
        if !self.dictionaries.has_affix(&requirement.name) {
            return Err(self.unknown("affix", &requirement.name));
        }
        Ok(requirement)
    }

    fn pool(&self, filter: &str, raw: RawPool) -> Result<AffixPool, ProfileError> {
        if raw.min_greater_affix_count.is_some_and(|count| count > 0) {
            return Err(ProfileError::LegacyPoolGreaterCount {
                profile: self.profile.to_string(),
                filter: filter.to_string(),
            });
        }
        if raw.count.is_empty() {
            return Err(self.invalid(format!("filter `{filter}`: an affix pool must not be empty")));
        }
        let requirements = raw
            .count
            .into_iter()
            .map(|r| self.affix_requirement(r))
            .collect::<Result<Vec<_>, _>>()?;

        let pool = match (raw.min_count, raw.max_count) {
            (None, None) => AffixPool::new(requirements),
            (min, max) => AffixPool {
                requirements,
                min_count: min.unwrap_or(0),
                max_count: max.unwrap_or(usize::MAX),
            },
        };
        if pool.min_count > pool.max_count {
            return Err(self.invalid(format!(
                "filter `{filter}`: minCount ({}) must not exceed maxCount ({})",
                pool.min_count, pool.max_count
            )));
        }
        Ok(pool)
    }

    fn item_filter(&self, name: String, raw: RawItemFilter) -> Result<ItemFilter, ProfileError> {
        if raw.min_greater_affix_count > MAX_GREATER_AFFIX_COUNT {
            return Err(self.invalid(format!(
                "filter `{name}`: minGreaterAffixCount must be between 0 and {MAX_GREATER_AFFIX_COUNT}"
            )));
        }
        let affix_pools = raw
            .affix_pool
            .into_iter()
            .map(|p| self.pool(&name, p))
            .collect::<Result<Vec<_>, _>>()?;
        let inherent_pools = raw
            .inherent_pool
            .into_iter()
            .map(|p| self.pool(&name, p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ItemFilter {
            name,
            item_types: raw.item_type.into_vec(),
            min_power: raw.min_power,
            min_greater_affix_count: raw.min_greater_affix_count,
            affix_pools,
            inherent_pools,
        })
    }

    fn unique(&self, raw: RawUnique) -> Result<UniqueFilter, ProfileError> {
        if raw.min_percent_of_aspect > MAX_PERCENT_OF_ASPECT {
            return Err(self.invalid(format!(
                "minPercentOfAspect must be at most {MAX_PERCENT_OF_ASPECT}, got {}",
                raw.min_percent_of_aspect
            )));
        }
        let aspect = match raw.aspect {
            Some(raw_aspect) => {
                let requirement = self.requirement(raw_aspect)?;
                if requirement.want_greater {
                    return Err(self.invalid(format!(
                        "aspect `{}`: greater only applies to affixes",
                        requirement.name
                    )));
                }
                let name = correct_name(&requirement.name);
                let id = self
                    .dictionaries
                    .resolve_unique(&name)
                    .ok_or_else(|| self.unknown("unique aspect", &name))?;
                Some(AspectRequirement {
                    name: id.to_string(),
                    value: requirement.value,
                    comparison: requirement.comparison,
                })
            }
            None => None,
        };
        let affixes = raw
            .affix
            .into_iter()
            .map(|r| self.affix_requirement(r))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(UniqueFilter {
            aspect,
            affixes,
            item_types: raw.item_type.into_vec(),
            profile_alias: raw.profile_alias.filter(|alias| !alias.is_empty()),
            min_greater_affix_count: raw.min_greater_affix_count,
            min_percent_of_aspect: raw.min_percent_of_aspect,
            min_power: raw.min_power,
            mythic: raw.mythic,
        })
    }

    fn sigil_condition(&self, raw: RawSigilCondition) -> Result<SigilCondition, ProfileError> {
        let condition = match raw {
            RawSigilCondition::Name(name) => SigilCondition::new(name),
            RawSigilCondition::List(mut names) => {
                if names.is_empty() {
                    return Err(self.invalid("a sigil list entry must not be empty"));
                }
                let name = names.remove(0);
                SigilCondition::new(name).when_any(names)
            }
            RawSigilCondition::Full { name, condition } => {
                SigilCondition::new(name).when_any(condition)
            }
        };
        for name in std::iter::once(&condition.name).chain(&condition.conditions) {
            if !self.dictionaries.has_sigil(name) {
                return Err(self.unknown("sigil", name));
            }
        }
        Ok(condition)
    }

    fn sigils(&self, raw: RawSigilFilter) -> Result<SigilFilter, ProfileError> {
        let blacklist = raw
            .blacklist
            .into_iter()
            .map(|c| self.sigil_condition(c))
            .collect::<Result<Vec<_>, _>>()?;
        let whitelist = raw
            .whitelist
            .into_iter()
            .map(|c| self.sigil_condition(c))
            .collect::<Result<Vec<_>, _>>()?;

        let overlap: Vec<&str> = blacklist
            .iter()
            .filter(|entry| whitelist.contains(entry))
            .map(|entry| entry.name.as_str())
            .collect();
        if !overlap.is_empty() {
            return Err(self.invalid(format!(
                "sigil blacklist and whitelist must not overlap: {}",
                overlap.join(", ")
            )));
        }

        Ok(SigilFilter {
            blacklist,
            whitelist,
            priority: raw.priority,
        })
    }

    fn tribute_name(&self, name: &str) -> Result<String, ProfileError> {
        self.dictionaries
            .resolve_tribute(name)
            .ok_or_else(|| self.unknown("tribute", name))
    }

    fn tribute(&self, raw: RawTribute) -> Result<TributeFilter, ProfileError> {
        let filter = match raw {
            RawTribute::Text(text) => match text.parse::<Rarity>() {
                Ok(rarity) => TributeFilter {
                    name: None,
                    rarities: vec![rarity],
                },
                Err(_) => TributeFilter {
                    name: Some(self.tribute_name(&text)?),
                    rarities: Vec::new(),
                },
            },
            RawTribute::Rarities(rarities) => {
                if rarities.is_empty() {
                    return Err(self.invalid("a tribute rarity list must not be empty"));
                }
                TributeFilter {
                    name: None,
                    rarities,
                }
            }
            RawTribute::Full { name, rarities } => TributeFilter {
                name: name
                    .filter(|n| !n.is_empty())
                    .map(|n| self.tribute_name(&n))
                    .transpose()?,
                rarities: rarities.into_vec(),
            },
        };
        Ok(filter)
    }

    fn profile(&self, raw: RawProfile) -> Result<Profile, ProfileError> {
        let mut profile = Profile::new(self.profile);

        for entry in raw.affixes {
            for (name, filter) in entry {
                profile.affix_filters.push(self.item_filter(name, filter)?);
            }
        }
        for aspect in raw.aspect_upgrades {
            if !self.dictionaries.has_legendary_aspect(&aspect) {
                return Err(self.unknown("aspect", &aspect));
            }
            profile.aspect_upgrades.push(aspect);
        }
        profile.sigils = raw.sigils.map(|s| self.sigils(s)).transpose()?;
        profile.tributes = raw
            .tributes
            .into_iter()
            .map(|t| self.tribute(t))
            .collect::<Result<Vec<_>, _>>()?;
        profile.uniques = raw
            .uniques
            .into_iter()
            .map(|u| self.unique(u))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(profile)
    }
}

/// Parse and validate one profile document.
pub fn load_profile(
    name: &str,
    source: &str,
    dictionaries: &Dictionaries,
) -> Result<Profile, ProfileError> {
    let yaml_error = |e: serde_yaml::Error| ProfileError::Yaml {
        profile: name.to_string(),
        message: e.to_string(),
    };

    let value: serde_yaml::Value = serde_yaml::from_str(source).map_err(yaml_error)?;
    if value.is_null() {
        return Err(ProfileError::Empty {
            profile: name.to_string(),
        });
    }
    let raw: RawProfile = serde_yaml::from_value(value).map_err(yaml_error)?;

    let validator = Validator {
        profile: name,
        dictionaries,
    };
    let profile = validator.profile(raw)?;

    let mut sections = Vec::new();
    if !profile.affix_filters.is_empty() {
        sections.push("Affixes");
    }
    if !profile.aspect_upgrades.is_empty() {
        sections.push("AspectUpgrades");
    }
    if profile.sigils.is_some() {
        sections.push("Sigils");
    }
    if !profile.tributes.is_empty() {
        sections.push("Tributes");
    }
    if !profile.uniques.is_empty() {
        sections.push("Uniques");
    }
    tracing::info!(profile = name, sections = ?sections, "Loaded profile");

    Ok(profile)
}

impl ProfileSet {
    /// Load many `(name, yaml)` documents. A profile that fails is reported
    /// and left out; the others still load.
    pub fn from_documents<'a, I>(documents: I, dictionaries: &Dictionaries) -> (Self, Vec<ProfileError>)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut profiles = Vec::new();
        let mut errors = Vec::new();

        for (name, source) in documents {
            match load_profile(name, source, dictionaries) {
                Ok(profile) => profiles.push(profile),
                Err(e) => {
                    tracing::error!(profile = name, error = %e, "Rejected profile");
                    errors.push(e);
                }
            }
        }

        if profiles.is_empty() {
            tracing::warn!("No profiles loaded, nothing will match");
        }

        (Self::new(profiles), errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionaries() -> Dictionaries {
        Dictionaries::new()
            .with_affixes([
                ("armor", "Armor"),
                ("cooldown_reduction", "Cooldown Reduction"),
                ("maximum_life", "Maximum Life"),
                ("ultimate_cooldown", "Ultimate Cooldown"),
            ])
            .with_legendary_aspects([("of_disobedience", "of Disobedience")])
            .with_sigils([
                ("ancient_reservoir", "Ancient Reservoir"),
                ("armor_breakers", "Armor Breakers"),
                ("cold_resist", "Cold Resist"),
                ("drifting_shade", "Drifting Shade"),
            ])
            .with_tributes([("tribute_of_pride", "Tribute of Pride")])
            .with_uniques([("galvanic_azurite", Default::default())])
    }

    fn load(source: &str) -> Result<Profile, ProfileError> {
        load_profile("test", source, &dictionaries())
    }

    #[test]
    fn test_affix_shorthand_forms() {
        let profile = load(
            r#"
Affixes:
  - Helm:
      itemType: helm
      minPower: 700
      minGreaterAffixCount: 1
      affixPool:
        - count:
            - cooldown_reduction
            - [maximum_life, 800]
            - [ultimate_cooldown, 10, smaller]
            - {name: armor, greater: true}
          minCount: 2
"#,
        )
        .unwrap();

        let filter = &profile.affix_filters[0];
        assert_eq!(filter.name, "Helm");
        assert_eq!(filter.item_types, vec![ItemType::Helm]);
        assert_eq!(filter.min_power, 700);
        assert_eq!(filter.min_greater_affix_count, 1);

        let pool = &filter.affix_pools[0];
        assert_eq!(pool.min_count, 2);
        assert_eq!(pool.max_count, usize::MAX);
        assert_eq!(pool.requirements[0], AffixRequirement::new("cooldown_reduction"));
        assert_eq!(
            pool.requirements[1],
            AffixRequirement::new("maximum_life").with_value(800.0, Comparison::Larger)
        );
        assert_eq!(
            pool.requirements[2],
            AffixRequirement::new("ultimate_cooldown").with_value(10.0, Comparison::Smaller)
        );
        assert_eq!(pool.requirements[3], AffixRequirement::new("armor").greater());
    }

    #[test]
    fn test_pool_counts_default_to_length() {
        let profile = load(
            "Affixes:\n  - Any:\n      affixPool:\n        - count: [armor, maximum_life]\n",
        )
        .unwrap();
        let pool = &profile.affix_filters[0].affix_pools[0];
        assert_eq!((pool.min_count, pool.max_count), (2, 2));
        assert!(profile.affix_filters[0].item_types.is_empty());
    }

    #[test]
    fn test_legacy_pool_greater_count() {
        let err = load(
            "Affixes:\n  - Helm:\n      affixPool:\n        - count: [armor]\n          minGreaterAffixCount: 1\n",
        )
        .unwrap_err();
        assert_eq!(
            err,
            ProfileError::LegacyPoolGreaterCount {
                profile: "test".to_string(),
                filter: "Helm".to_string()
            }
        );
        assert!(err.to_string().contains("greater: true"));
    }

    #[test]
    fn test_zero_pool_greater_count_is_tolerated() {
        let profile = load(
            "Affixes:\n  - Helm:\n      affixPool:\n        - count: [armor]\n          minGreaterAffixCount: 0\n",
        );
        assert!(profile.is_ok());
    }

    #[test]
    fn test_validation_errors() {
        let cases = [
            (
                "Affixes:\n  - Helm:\n      affixPool:\n        - count: [armr]\n",
                "unknown affix `armr`",
            ),
            (
                "Affixes:\n  - Helm:\n      affixPool:\n        - count: [armor]\n          minCount: 2\n          maxCount: 1\n",
                "must not exceed maxCount",
            ),
            (
                "Affixes:\n  - Helm:\n      affixPool:\n        - count: []\n",
                "must not be empty",
            ),
            (
                "Affixes:\n  - Helm:\n      minGreaterAffixCount: 4\n",
                "between 0 and 3",
            ),
            (
                "Uniques:\n  - aspect: galvanic_azurite\n    minPercentOfAspect: 101\n",
                "at most 100",
            ),
            (
                "Uniques:\n  - aspect: tibaults_will\n",
                "unknown unique aspect `tibaults_will`",
            ),
            ("AspectUpgrades: [of_nothing]\n", "unknown aspect `of_nothing`"),
            ("Tributes: [envy]\n", "unknown tribute `envy`"),
            (
                "Sigils:\n  blacklist: [cold_resist]\n  whitelist: [cold_resist]\n",
                "must not overlap: cold_resist",
            ),
            ("Sigils:\n  blacklist: [hot_resist]\n", "unknown sigil `hot_resist`"),
        ];
        for (source, expected) in cases {
            let err = load(source).unwrap_err();
            assert!(
                err.to_string().contains(expected),
                "{source:?}: expected {expected:?}, got {err}"
            );
            assert_eq!(err.profile(), "test");
        }
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = load("Affixes:\n  - Helm:\n      itemTyp: helm\n").unwrap_err();
        assert!(matches!(err, ProfileError::Yaml { .. }));
        let err = load("Aspects: []\n").unwrap_err();
        assert!(matches!(err, ProfileError::Yaml { .. }));
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(
            load("").unwrap_err(),
            ProfileError::Empty {
                profile: "test".to_string()
            }
        );
    }

    #[test]
    fn test_sigil_conditions() {
        let profile = load(
            "Sigils:\n  blacklist:\n    - cold_resist\n    - [armor_breakers, drifting_shade]\n    - {name: ancient_reservoir, condition: [cold_resist]}\n  priority: whitelist\n",
        )
        .unwrap();
        let sigils = profile.sigils.unwrap();
        assert_eq!(sigils.priority, SigilPriority::Whitelist);
        assert_eq!(sigils.blacklist[0], SigilCondition::new("cold_resist"));
        assert_eq!(
            sigils.blacklist[1],
            SigilCondition::new("armor_breakers").when_any(["drifting_shade"])
        );
        assert_eq!(
            sigils.blacklist[2],
            SigilCondition::new("ancient_reservoir").when_any(["cold_resist"])
        );
        assert!(sigils.whitelist.is_empty());
    }

    #[test]
    fn test_tribute_forms() {
        let profile = load(
            "Tributes:\n  - Legendary\n  - pride\n  - [unique, mythic]\n  - {name: tribute_of_pride, rarities: rare}\n",
        )
        .unwrap();
        assert_eq!(profile.tributes[0].rarities, vec![Rarity::Legendary]);
        assert_eq!(profile.tributes[0].name, None);
        assert_eq!(profile.tributes[1].name.as_deref(), Some("tribute_of_pride"));
        assert_eq!(
            profile.tributes[2].rarities,
            vec![Rarity::Unique, Rarity::Mythic]
        );
        assert_eq!(profile.tributes[3].name.as_deref(), Some("tribute_of_pride"));
        assert_eq!(profile.tributes[3].rarities, vec![Rarity::Rare]);
    }

    #[test]
    fn test_unique_filter() {
        let profile = load(
            "Uniques:\n  - aspect: [Galvanic Azurite, 50]\n    affix: [{name: maximum_life, greater: true}]\n    itemType: [ring]\n    profileAlias: sorc\n    minGreaterAffixCount: 1\n    minPercentOfAspect: 80\n    mythic: false\n",
        )
        .unwrap();
        let unique = &profile.uniques[0];
        assert_eq!(
            unique.aspect,
            Some(AspectRequirement::new("galvanic_azurite").with_value(50.0, Comparison::Larger))
        );
        assert_eq!(unique.affixes, vec![AffixRequirement::new("maximum_life").greater()]);
        assert_eq!(unique.item_types, vec![ItemType::Ring]);
        assert_eq!(unique.profile_alias.as_deref(), Some("sorc"));
        assert_eq!(unique.min_percent_of_aspect, 80);
    }

    #[test]
    fn test_from_documents_keeps_good_profiles() {
        let documents = [
            ("good", "AspectUpgrades: [of_disobedience]\n"),
            ("broken", "Affixes: [\n"),
            ("stale", "AspectUpgrades: [of_nothing]\n"),
        ];
        let (set, errors) = ProfileSet::from_documents(documents, &dictionaries());
        assert_eq!(set.len(), 1);
        assert_eq!(set.profiles()[0].name, "good");
        let rejected: Vec<_> = errors.iter().map(|e| e.profile()).collect();
        assert_eq!(rejected, ["broken", "stale"]);
    }
}
