//! Identifiers of tracked individuals

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Stable identifier of one tracked animal.
///
/// Identifiers are kept as their trimmed text so both numeric tags
/// (`1043`) and textual ones (`HUJI-7`) are supported. Integer-valued text
/// is stored in canonical form, so `007`, `7` and `7.0` name the same
/// individual. Ordering is numeric
/// when both sides are integers, so `9` sorts before `10`; otherwise the text
/// is compared lexicographically. Numeric identifiers sort before textual
/// ones.
///
/// # Examples
///
/// ```
/// use storkwatch_analysis::individual::IndividualId;
///
/// let mut ids = vec![
///     IndividualId::new("10"),
///     IndividualId::new("9"),
///     IndividualId::new("A2"),
/// ];
/// ids.sort();
/// assert_eq!(ids, [IndividualId::new("9"), IndividualId::new("10"), IndividualId::new("A2")]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize, derive_more::Display)]
#[serde(transparent)]
pub struct IndividualId(String);

impl IndividualId {
    #[must_use]
    pub fn new(id: &str) -> Self {
        let id = id.trim();
        match parse_integer(id) {
            Some(value) => Self(value.to_string()),
            None => Self(id.to_owned()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn numeric(&self) -> Option<i128> {
        self.0.parse().ok()
    }
}

/// Parses integers, allowing a zero fraction such as `1043.0`.
fn parse_integer(text: &str) -> Option<i128> {
    let integral = match text.split_once('.') {
        Some((integral, fraction)) if fraction.bytes().all(|b| b == b'0') => integral,
        Some(_) => return None,
        None => text,
    };
    integral.parse().ok()
}

impl From<&str> for IndividualId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<u32> for IndividualId {
    fn from(id: u32) -> Self {
        Self(id.to_string())
    }
}

impl Ord for IndividualId {
    fn cmp(&self, other: &Self) -> Ordering {
        let by_value = match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_value.then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for IndividualId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(IndividualId::new(" 17 "), IndividualId::from(17_u32));
        assert_eq!(IndividualId::new(" 17 ").as_str(), "17");
    }

    #[test]
    fn test_numeric_ordering() {
        assert!(IndividualId::from(2_u32) < IndividualId::from(10_u32));
        assert!(IndividualId::new("-3") < IndividualId::new("1"));
    }

    #[test]
    fn test_integer_spellings_name_one_individual() {
        assert_eq!(IndividualId::new("007"), IndividualId::from(7_u32));
        assert_eq!(IndividualId::new("1043.0"), IndividualId::from(1043_u32));
        assert_eq!(IndividualId::new("1043.").as_str(), "1043");
        assert_eq!(IndividualId::new("-0").as_str(), "0");
    }

    #[test]
    fn test_non_integer_text_is_kept() {
        assert_eq!(IndividualId::new("7.5").as_str(), "7.5");
        assert_eq!(IndividualId::new("HUJI-07").as_str(), "HUJI-07");
        assert_eq!(IndividualId::new(".0").as_str(), ".0");
        assert!(IndividualId::new("7.5") > IndividualId::new("8"));
    }

    #[test]
    fn test_textual_ordering() {
        assert!(IndividualId::new("B1") < IndividualId::new("B2"));
        assert!(IndividualId::from(999_u32) < IndividualId::new("A"));
    }
}
