//! Sort descriptors and their query token form.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Sort direction for ordering results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Token form, exactly `asc` or `desc`.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }

    /// Parses the exact tokens `asc`/`desc`; anything else is rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "asc" => Some(Direction::Asc),
            "desc" => Some(Direction::Desc),
            _ => None,
        }
    }

    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }
}

/// One entry of the ordered sort list: a column id plus a direction.
///
/// The sort state of a table is a `Vec<SortKey>` whose first element is the
/// primary sort key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub column: String,
    pub direction: Direction,
}

impl SortKey {
    /// Ascending sort on a column.
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: Direction::Asc,
        }
    }

    /// Descending sort on a column.
    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: Direction::Desc,
        }
    }
}

/// Encodes a sort list as comma-joined `column.direction` tokens.
///
/// Order is significant and preserved: the first token is the primary key.
pub fn encode_sort(keys: &[SortKey]) -> String {
    keys.iter()
        .map(|key| format!("{}.{}", key.column, key.direction.as_str()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Decodes a sort token list against the set of sortable column ids.
///
/// Malformed tokens, unknown columns, and directions other than exactly
/// `asc`/`desc` are dropped individually; the rest of the list survives.
/// Tokens split on their last `.` so column ids containing dots parse.
pub fn decode_sort(raw: &str, known_columns: &HashSet<String>) -> Vec<SortKey> {
    raw.split(',')
        .filter(|token| !token.is_empty())
        .filter_map(|token| {
            let parsed = token.rsplit_once('.').and_then(|(column, direction)| {
                Direction::parse(direction).map(|direction| SortKey {
                    column: column.to_string(),
                    direction,
                })
            });
            match parsed {
                Some(key) if known_columns.contains(&key.column) => Some(key),
                _ => {
                    log::debug!("dropping sort token '{}'", token);
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn test_encode_preserves_order() {
        let keys = vec![SortKey::desc("revenue"), SortKey::asc("name")];
        assert_eq!(encode_sort(&keys), "revenue.desc,name.asc");
    }

    #[test]
    fn test_round_trip() {
        let keys = vec![SortKey::asc("name"), SortKey::desc("created")];
        let decoded = decode_sort(&encode_sort(&keys), &known(&["name", "created"]));
        assert_eq!(decoded, keys);
    }

    #[test]
    fn test_unknown_columns_dropped_individually() {
        let decoded = decode_sort("ghost.asc,name.desc", &known(&["name"]));
        assert_eq!(decoded, vec![SortKey::desc("name")]);
    }

    #[test]
    fn test_malformed_tokens_dropped() {
        let decoded = decode_sort("name.up,name,,name.desc", &known(&["name"]));
        assert_eq!(decoded, vec![SortKey::desc("name")]);
    }

    #[test]
    fn test_dotted_column_ids_parse() {
        let decoded = decode_sort("owner.name.asc", &known(&["owner.name"]));
        assert_eq!(decoded, vec![SortKey::asc("owner.name")]);
    }

    #[test]
    fn test_empty_input() {
        assert!(decode_sort("", &known(&["name"])).is_empty());
        assert_eq!(encode_sort(&[]), "");
    }
}
