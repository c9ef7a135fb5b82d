// ── Identifier resolution ──
//
// A caller-supplied string is either a numeric ID or a name. Anything that
// parses as a base-10 `i64` (including "007") is treated as an ID first.

use tracing::warn;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identifier<'a> {
    Id(i64),
    Name(&'a str),
}

impl<'a> Identifier<'a> {
    pub fn parse(raw: &'a str) -> Self {
        raw.parse::<i64>().map_or(Self::Name(raw), Self::Id)
    }
}

/// Reduce the result of an exact-name list to at most one entity.
///
/// Names are meant to be unique per project, but nothing enforces that at
/// the type level, so more than one match is reported rather than guessed.
pub(crate) fn single_match<T>(
    kind: &'static str,
    name: &str,
    mut matches: Vec<T>,
) -> Result<Option<T>, CoreError> {
    match matches.len() {
        0 | 1 => Ok(matches.pop()),
        count => {
            warn!(kind, name, count, "name lookup matched more than one entity");
            Err(CoreError::AmbiguousName {
                kind,
                name: name.to_owned(),
                matches: count,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_strings_are_ids() {
        assert_eq!(Identifier::parse("42"), Identifier::Id(42));
        assert_eq!(Identifier::parse("007"), Identifier::Id(7));
    }

    #[test]
    fn everything_else_is_a_name() {
        assert_eq!(Identifier::parse("my-volume"), Identifier::Name("my-volume"));
        assert_eq!(Identifier::parse("42a"), Identifier::Name("42a"));
        assert_eq!(Identifier::parse(""), Identifier::Name(""));
        assert_eq!(
            Identifier::parse("99999999999999999999"),
            Identifier::Name("99999999999999999999")
        );
    }

    #[test]
    fn zero_or_one_match_resolves() {
        assert_eq!(single_match::<u8>("volume", "data", vec![]).ok(), Some(None));
        assert_eq!(single_match("volume", "data", vec![7]).ok(), Some(Some(7)));
    }

    #[test]
    fn duplicate_names_are_ambiguous() {
        let err = single_match("firewall", "web", vec![1, 2]).err();
        assert!(matches!(
            err,
            Some(CoreError::AmbiguousName { kind: "firewall", matches: 2, .. })
        ));
    }
}
