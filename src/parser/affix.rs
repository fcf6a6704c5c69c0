//! Affix line decoding.
//!
//! A tooltip affix line is cleaned of cosmetic tokens and then tried against
//! [`ALTERNATIVES`] in order. The first alternative that accepts the line
//! decides value, range and whether the roll is a greater affix.

use super::text::{first_number, has_digit};
use crate::dictionary::Dictionaries;
use crate::error::{ParseError, Result};
use crate::item::{Affix, AffixKind};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Removed in this order before any pattern runs.
const REPLACEMENTS: [&str; 6] = ["%", "+", ",", "[+]", "[x]", "per 5 Seconds"];

static COMPARE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*\)").expect("invalid compare regex"));

static TIMED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)for ([0-9]+(?:\.[0-9]+)?) seconds").expect("invalid timed regex")
});

static INT_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<value>[0-9]+)[^0-9]+\[(?P<min>[0-9]+) - (?P<max>[0-9]+)\]")
        .expect("invalid integer range regex")
});

static FLOAT_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<value>[0-9]+\.[0-9]+).+?\[(?P<min>[0-9]+\.[0-9]+) - (?P<max>[0-9]+\.[0-9]+)\]",
    )
    .expect("invalid float range regex")
});

static SINGLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<value>[.0-9]+)[^0-9]+\[(?P<only>[.0-9]+)\]").expect("invalid single regex")
});

static GREATER_BRACKET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<value>[0-9]+\.[0-9]+)\s*\[\s*\]").expect("invalid greater bracket regex")
});

/// Numbers recovered from one affix line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Decoded {
    pub value: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub greater: bool,
}

type Alternative = (&'static str, fn(&str) -> Option<Decoded>);

/// Decoding alternatives, tried top to bottom. The first one that accepts
/// the cleaned line wins.
pub(crate) const ALTERNATIVES: [Alternative; 5] = [
    ("integer range", int_range),
    ("float range", float_range),
    ("single value", single_value),
    ("greater bracket", greater_bracket),
    ("bare greater", bare_greater),
];

fn number(caps: &Captures<'_>, group: &str) -> Option<f64> {
    caps.name(group).and_then(|m| m.as_str().parse().ok())
}

fn ranged(re: &Regex, text: &str) -> Option<Decoded> {
    let caps = re.captures(text)?;
    Some(Decoded {
        value: Some(number(&caps, "value")?),
        min: Some(number(&caps, "min")?),
        max: Some(number(&caps, "max")?),
        greater: false,
    })
}

fn int_range(text: &str) -> Option<Decoded> {
    ranged(&INT_RANGE_RE, text)
}

fn float_range(text: &str) -> Option<Decoded> {
    ranged(&FLOAT_RANGE_RE, text)
}

fn single_value(text: &str) -> Option<Decoded> {
    let caps = SINGLE_RE.captures(text)?;
    let only = number(&caps, "only")?;
    Some(Decoded {
        value: Some(number(&caps, "value")?),
        min: Some(only),
        max: Some(only),
        greater: false,
    })
}

fn greater_bracket(text: &str) -> Option<Decoded> {
    let caps = GREATER_BRACKET_RE.captures(text)?;
    Some(Decoded {
        value: Some(number(&caps, "value")?),
        min: None,
        max: None,
        greater: true,
    })
}

/// Greater affixes are shown without their roll range, so a number with no
/// bracket anywhere on the line marks one.
fn bare_greater(text: &str) -> Option<Decoded> {
    if text.contains(['[', ']']) {
        return None;
    }
    Some(Decoded {
        value: Some(first_number(text)?),
        min: None,
        max: None,
        greater: true,
    })
}

/// Strip cosmetic tokens and compare annotations from an affix or aspect
/// line.
///
/// A duration such as `for 7 Seconds` is removed together with its `[7]`
/// bracket so the bracket is never read as a roll.
pub(crate) fn clean_line(text: &str) -> String {
    let mut cleaned = text.to_string();
    for token in REPLACEMENTS {
        cleaned = cleaned.replace(token, "");
    }
    cleaned = COMPARE_RE.replace_all(&cleaned, "").into_owned();

    let timed = TIMED_RE.captures(&cleaned).and_then(|caps| {
        let phrase = caps.get(0)?.as_str().to_string();
        let seconds = caps.get(1)?.as_str().to_string();
        Some((phrase, seconds))
    });
    if let Some((phrase, seconds)) = timed {
        cleaned = cleaned
            .replace(&phrase, "")
            .replace(&format!("[{seconds}]"), "");
    }

    cleaned.trim().to_string()
}

/// Run the alternatives over an already cleaned line.
pub(crate) fn decode_numbers(cleaned: &str) -> Option<Decoded> {
    ALTERNATIVES.iter().find_map(|(_, alternative)| alternative(cleaned))
}

/// Decode one affix line and resolve its dictionary name.
pub(crate) fn decode_affix(text: &str, dictionaries: &Dictionaries) -> Result<Affix> {
    let cleaned = clean_line(text);
    let mut affix = Affix::new(dictionaries.resolve_affix(text));
    affix.text = text.to_string();

    match decode_numbers(&cleaned) {
        Some(decoded) => {
            affix.value = decoded.value;
            affix.min_value = decoded.min;
            affix.max_value = decoded.max;
            if decoded.greater {
                affix.kind = AffixKind::Greater;
            }
        }
        None if has_digit(&cleaned) => {
            return Err(ParseError::UnknownFormat {
                line: text.to_string(),
                cleaned,
            });
        }
        None => {}
    }

    Ok(affix)
}
