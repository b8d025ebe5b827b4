//! Column filter values and their query token form.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// A single column's filter value.
///
/// `Scalar` comes from free-text inputs; `Many` comes from columns that
/// declare a discrete option set (multi-select). Which variant a column
/// uses is declared on its [`FilterMode`](crate::table::FilterMode).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Scalar(String),
    Many(Vec<String>),
}

impl FilterValue {
    /// Free-text filter value.
    pub fn scalar(value: impl Into<String>) -> Self {
        FilterValue::Scalar(value.into())
    }

    /// Multi-select filter value.
    pub fn many<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterValue::Many(values.into_iter().map(Into::into).collect())
    }

    /// An empty value encodes to an absent key.
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Scalar(value) => value.is_empty(),
            FilterValue::Many(values) => values.is_empty(),
        }
    }
}

/// Encodes a filter value as a single query token.
///
/// Scalars pass through verbatim. List elements are percent-escaped before
/// joining so elements containing the separator survive a round-trip. An
/// empty value encodes to `None`: clearing a filter removes its key from
/// the store instead of leaving a stale `key=` entry.
pub fn encode_filter_value(value: &FilterValue) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    match value {
        FilterValue::Scalar(value) => Some(value.clone()),
        FilterValue::Many(values) => Some(
            values
                .iter()
                .map(|element| urlencoding::encode(element).into_owned())
                .collect::<Vec<_>>()
                .join(","),
        ),
    }
}

/// Decodes a raw query token into a filter value.
///
/// Returns `None` when the token is absent or empty. Scalar columns take
/// the token whole. List columns split on every comma, best-effort:
/// elements whose percent-escapes do not decode are kept verbatim rather
/// than dropping the key.
pub fn decode_filter_value(raw: Option<&str>, list_variant: bool) -> Option<FilterValue> {
    let raw = raw?;
    if raw.is_empty() {
        return None;
    }
    if !list_variant {
        return Some(FilterValue::Scalar(raw.to_string()));
    }
    let elements = raw.split(',').map(unescape_element).collect();
    Some(FilterValue::Many(elements))
}

fn unescape_element(element: &str) -> String {
    match urlencoding::decode(element) {
        Ok(Cow::Borrowed(decoded)) => decoded.to_string(),
        Ok(Cow::Owned(decoded)) => decoded,
        Err(_) => element.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_passes_through() {
        let value = FilterValue::scalar("acme, inc");
        let encoded = encode_filter_value(&value).unwrap();
        assert_eq!(encoded, "acme, inc");
        assert_eq!(decode_filter_value(Some(&encoded), false), Some(value));
    }

    #[test]
    fn test_list_round_trips_with_separator_in_elements() {
        let value = FilterValue::many(["a,b", "c"]);
        let encoded = encode_filter_value(&value).unwrap();
        assert_eq!(encoded, "a%2Cb,c");
        assert_eq!(decode_filter_value(Some(&encoded), true), Some(value));
    }

    #[test]
    fn test_empty_encodes_to_absent_key() {
        assert_eq!(encode_filter_value(&FilterValue::scalar("")), None);
        assert_eq!(
            encode_filter_value(&FilterValue::Many(Vec::new())),
            None
        );
    }

    #[test]
    fn test_absent_and_empty_decode_to_none() {
        assert_eq!(decode_filter_value(None, false), None);
        assert_eq!(decode_filter_value(Some(""), true), None);
    }

    #[test]
    fn test_tolerant_split_keeps_malformed_elements() {
        // "%zz" is not a valid escape; the element survives verbatim.
        let decoded = decode_filter_value(Some("ok,%zz"), true);
        assert_eq!(decoded, Some(FilterValue::many(["ok", "%zz"])));
    }
}
