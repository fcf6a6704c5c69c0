//! Line-level text helpers shared by the parser stages.

use regex::Regex;
use std::sync::LazyLock;

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+(?:\.[0-9]+)?").expect("invalid number regex"));

static PARENTHESES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*?\)").expect("invalid parentheses regex"));

/// First number in a line, thousands separators ignored.
///
/// `"Sell Value: 19,254 Gold"` yields `19254.0`.
pub(crate) fn first_number(line: &str) -> Option<f64> {
    let without_commas = line.replace(',', "");
    NUMBER_RE
        .find(&without_commas)
        .and_then(|m| m.as_str().parse().ok())
}

/// Letters and single spaces, lowercased. Used to compare a line against a
/// literal landmark such as `"damage per second"`.
pub(crate) fn cleaned(line: &str) -> String {
    let letters: String = line
        .chars()
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .collect();
    letters
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Drop every `(...)` group, e.g. compare annotations on the type line.
pub(crate) fn strip_parenthesized(line: &str) -> String {
    PARENTHESES_RE.replace_all(line, "").into_owned()
}

pub(crate) fn has_digit(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
}

/// Index of the first line whose lowercase form contains `needle`.
pub(crate) fn find_line(block: &[String], needle: &str) -> Option<usize> {
    block
        .iter()
        .position(|line| line.to_lowercase().contains(needle))
}

pub(crate) fn any_line_contains(block: &[String], needles: &[&str]) -> bool {
    block.iter().any(|line| {
        let lower = line.to_lowercase();
        needles.iter().any(|n| lower.contains(n))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_first_number() {
        assert_eq!(first_number("800 Item Power"), Some(800.0));
        assert_eq!(first_number("Sell Value: 19,254 Gold"), Some(19254.0));
        assert_eq!(first_number("1.10 Attacks per Second (Fast)"), Some(1.10));
        assert_eq!(first_number("Empty Socket"), None);
    }

    #[test]
    fn test_cleaned() {
        assert_eq!(cleaned("596 Damage Per Second"), "damage per second");
        assert_eq!(cleaned("905 Armor"), "armor");
        assert_eq!(cleaned("+130 Armor [130]"), "armor");
        assert_eq!(cleaned("1.10 Attacks per Second (Fast)"), "attacks per second fast");
    }

    #[test]
    fn test_strip_parenthesized() {
        assert_eq!(
            strip_parenthesized("Legendary Ring (Equipped)").trim(),
            "Legendary Ring"
        );
        assert_eq!(strip_parenthesized("(a) b (c)").trim(), "b");
    }

    #[test]
    fn test_find_line_is_case_insensitive() {
        let lines = block(&["NAME", "Rare Helm", "750 Item Power"]);
        assert_eq!(find_line(&lines, "item power"), Some(2));
        assert_eq!(find_line(&lines, "armor"), None);
        assert!(any_line_contains(&lines, &["rare", "nothing"]));
    }
}
