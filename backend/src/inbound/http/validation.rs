//! Shared validation helpers for inbound HTTP adapters.

use serde::{Deserialize, Deserializer};

use crate::domain::{Error, not_found};

/// Parse a path identifier. A malformed id names no resource, so it is
/// reported exactly like a missing one.
pub(crate) fn parse_resource_id<'a, T, E>(
    raw: &'a str,
    kind: &str,
    parse: impl FnOnce(&'a str) -> Result<T, E>,
) -> Result<T, Error> {
    parse(raw).map_err(|_| not_found(kind))
}

/// Deserialise a nullable field of a partial update.
///
/// Use with `#[serde(default, deserialize_with = "double_option")]`: an absent
/// field stays `None`, an explicit `null` becomes `Some(None)`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, JobId};
    use rstest::rstest;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        salary: Option<Option<i64>>,
    }

    #[rstest]
    #[case("{}", None)]
    #[case(r#"{"salary":null}"#, Some(None))]
    #[case(r#"{"salary":90000}"#, Some(Some(90_000)))]
    fn double_option_distinguishes_null_from_absent(
        #[case] body: &str,
        #[case] expected: Option<Option<i64>>,
    ) {
        let patch: Patch = serde_json::from_str(body).expect("patch");
        assert_eq!(patch.salary, expected);
    }

    #[rstest]
    fn malformed_ids_read_as_not_found() {
        let err = parse_resource_id("42", "job", JobId::new).expect_err("invalid");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err, not_found("job"));
    }
}
