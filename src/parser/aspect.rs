//! Aspect line decoding.

use super::affix::clean_line;
use super::text::first_number;
use crate::item::Aspect;
use regex::Regex;
use std::sync::LazyLock;

static ASPECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<value>[0-9]+\.?[0-9]*)[^0-9]+\[(?P<min>[0-9]+\.?[0-9]*) - (?P<max>[0-9]+\.?[0-9]*)\]",
    )
    .expect("invalid aspect regex")
});

/// Decode a legendary or unique aspect line.
///
/// Aspects without a rolled range are text-only and carry no numbers.
pub(crate) fn decode_aspect(text: &str, name: &str) -> Aspect {
    let mut aspect = Aspect::new(name);
    aspect.text = text.to_string();

    let cleaned = clean_line(text);
    if let Some(caps) = ASPECT_RE.captures(&cleaned) {
        let group = |g: &str| caps.name(g).and_then(|m| m.as_str().parse::<f64>().ok());
        aspect.value = group("value");
        aspect.min_value = group("min");
        aspect.max_value = group("max");
    }
    aspect
}

/// Mythic aspects roll at a fixed value: the first number on the line.
pub(crate) fn decode_mythic_aspect(text: &str, name: &str) -> Aspect {
    let mut aspect = Aspect::new(name);
    aspect.text = text.to_string();
    aspect.value = first_number(text);
    aspect
}
