//! Pool matching, shared by the affix and unique rules.
//!
//! A pool succeeds as a whole or not at all. After the count window, the
//! greater affix threshold `T` of the owning filter is checked against the
//! `G` requirements flagged `want_greater`:
//!
//! | Condition | Mode | Pool fails when |
//! |-----------|------|-----------------|
//! | `G == 0` or `T == 0` | off | never |
//! | `T > G` | hard | any flagged requirement is not matched by a greater affix |
//! | `T <= G` | flexible | fewer than `T` flagged requirements matched greater affixes |

use crate::item::Affix;
use crate::profile::{AffixPool, AffixRequirement};

/// Whether `affix` satisfies the name and optional value constraint.
pub(crate) fn satisfies(requirement: &AffixRequirement, name: &str, value: Option<f64>) -> bool {
    if requirement.name != name {
        return false;
    }
    match requirement.value {
        None => true,
        Some(target) => value.is_some_and(|v| requirement.comparison.accepts(v, target)),
    }
}

/// Match `requirements` against `affixes` with a satisfied-count window.
///
/// Each requirement looks at the first affix carrying its name. Returns the
/// matched affixes in requirement order, or `None` when the pool fails.
pub(crate) fn match_requirements(
    requirements: &[AffixRequirement],
    min_count: usize,
    max_count: usize,
    affixes: &[&Affix],
    min_greater: usize,
) -> Option<Vec<Affix>> {
    let mut matched = Vec::new();
    let mut flagged = 0;
    let mut flagged_greater = 0;

    for requirement in requirements {
        let hit = affixes
            .iter()
            .find(|a| a.name == requirement.name)
            .filter(|a| satisfies(requirement, &a.name, a.value));
        if requirement.want_greater {
            flagged += 1;
            if hit.is_some_and(|a| a.is_greater()) {
                flagged_greater += 1;
            }
        }
        if let Some(affix) = hit {
            matched.push((*affix).clone());
        }
    }

    if !(min_count..=max_count).contains(&matched.len()) {
        return None;
    }

    if flagged > 0 && min_greater > 0 {
        let hard = min_greater > flagged;
        let ok = if hard {
            flagged_greater == flagged
        } else {
            flagged_greater >= min_greater
        };
        if !ok {
            return None;
        }
    }

    Some(matched)
}

pub(crate) fn match_pool(pool: &AffixPool, affixes: &[&Affix], min_greater: usize) -> Option<Vec<Affix>> {
    match_requirements(
        &pool.requirements,
        pool.min_count,
        pool.max_count,
        affixes,
        min_greater,
    )
}

/// Every pool must match; the matches are concatenated.
pub(crate) fn match_pools(pools: &[AffixPool], affixes: &[&Affix], min_greater: usize) -> Option<Vec<Affix>> {
    let mut all = Vec::new();
    for pool in pools {
        all.extend(match_pool(pool, affixes, min_greater)?);
    }
    Some(all)
}
