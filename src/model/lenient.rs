//! Lenient field decoding for spreadsheet-backed payloads.
//!
//! Sheet cells come back typed by whatever the sheet guessed: ages may be
//! strings, phone numbers may be numbers, empty cells may be null.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Cell {
    Number(f64),
    Text(String),
    Flag(bool),
}

impl Cell {
    fn into_text(self) -> String {
        match self {
            Cell::Text(s) => s,
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", n as i64),
            Cell::Number(n) => n.to_string(),
            Cell::Flag(b) => b.to_string(),
        }
    }

    fn into_count(self) -> Option<u32> {
        match self {
            Cell::Number(n) if n.is_finite() => Some(if n <= 0.0 { 0 } else { n.trunc() as u32 }),
            Cell::Number(_) | Cell::Flag(_) => None,
            Cell::Text(s) => parse_leading_int(&s),
        }
    }
}

/// Integer prefix of `s`, the way a browser's `parseInt` reads form input.
/// Negative values clamp to zero.
pub(crate) fn parse_leading_int(s: &str) -> Option<u32> {
    let s = s.trim();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    if negative {
        return Some(0);
    }
    Some(digits[..end].parse::<u64>().map_or(u32::MAX, |v| v.min(u32::MAX as u64) as u32))
}

pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Cell>::deserialize(deserializer)?
        .map(Cell::into_text)
        .unwrap_or_default())
}

pub(crate) fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Cell>::deserialize(deserializer)?
        .map(Cell::into_text)
        .filter(|s| !s.is_empty()))
}

pub(crate) fn age<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Cell>::deserialize(deserializer)?
        .and_then(Cell::into_count)
        .unwrap_or(0))
}

pub(crate) fn family_size<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Cell>::deserialize(deserializer)?
        .and_then(Cell::into_count)
        .unwrap_or(1)
        .max(1))
}

pub(crate) fn medical_needs<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let text = string(deserializer)?;
    if text.trim().is_empty() {
        Ok(super::MEDICAL_NONE.to_string())
    } else {
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("42"), Some(42));
        assert_eq!(parse_leading_int(" 7 คน"), Some(7));
        assert_eq!(parse_leading_int("-3"), Some(0));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
    }
}
