use std::collections::BTreeMap;

use serde::Deserialize;
use utoipa::IntoParams;

pub const PAGE_PARAM: &str = "page";
pub const PER_PAGE_PARAM: &str = "per_page";
pub const ORDER_PARAM: &str = "order";

pub const DEFAULT_PAGE: i64 = 0;
pub const DEFAULT_PER_PAGE: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField {
    pub field: String,
    pub order: SortOrder,
}

/// Documentation-only view of the reserved collection parameters; any other
/// query parameter is an equality filter on the field of the same name.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Zero-based page index, default 0.
    pub page: Option<i64>,
    /// Rows per page, default 10.
    pub per_page: Option<i64>,
    /// Comma separated fields; `-field` sorts descending, `field` or `+field` ascending.
    pub order: Option<String>,
}

/// Collection criteria derived from a request query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: i64,
    pub per_page: i64,
    pub order: Vec<SortField>,
    pub filters: BTreeMap<String, String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            order: Vec::new(),
            filters: BTreeMap::new(),
        }
    }
}

impl ListQuery {
    /// Builds criteria from raw query pairs. Later duplicates win. Values are
    /// passed through unchecked; range clamping belongs to the storage layer.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut query = ListQuery::default();
        for (key, value) in pairs {
            let key = key.into();
            let value = value.into();
            match key.as_str() {
                PAGE_PARAM => query.page = value.trim().parse().unwrap_or(DEFAULT_PAGE),
                PER_PAGE_PARAM => {
                    query.per_page = value.trim().parse().unwrap_or(DEFAULT_PER_PAGE)
                }
                ORDER_PARAM => query.order = parse_order(&value),
                _ => {
                    query.filters.insert(key, value);
                }
            }
        }
        query
    }
}

/// `-creation_date,name` -> `[(creation_date, Desc), (name, Asc)]`.
///
/// Empty tokens are kept as empty field names so the caller can reject them.
pub fn parse_order(raw: &str) -> Vec<SortField> {
    raw.split(',')
        .map(|token| {
            let token = token.trim();
            match token.strip_prefix('-') {
                Some(field) => SortField {
                    field: field.to_string(),
                    order: SortOrder::Desc,
                },
                None => SortField {
                    field: token.strip_prefix('+').unwrap_or(token).to_string(),
                    order: SortOrder::Asc,
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sort(field: &str, order: SortOrder) -> SortField {
        SortField {
            field: field.to_string(),
            order,
        }
    }

    #[test]
    fn defaults_when_nothing_given() {
        let query = ListQuery::from_pairs(Vec::<(String, String)>::new());
        assert_eq!(query.page, 0);
        assert_eq!(query.per_page, 10);
        assert!(query.order.is_empty());
        assert!(query.filters.is_empty());
    }

    #[test]
    fn reserved_keys_are_removed_from_filters() {
        let query = ListQuery::from_pairs([
            ("name", "foo"),
            ("email", "example@example.com"),
            ("page", "2"),
            ("per_page", "25"),
            ("order", "+name"),
        ]);
        assert_eq!(query.page, 2);
        assert_eq!(query.per_page, 25);
        assert_eq!(query.order, vec![sort("name", SortOrder::Asc)]);
        assert_eq!(query.filters.len(), 2);
        assert_eq!(query.filters["name"], "foo");
        assert_eq!(query.filters["email"], "example@example.com");
    }

    #[test]
    fn order_prefixes_select_direction() {
        assert_eq!(
            parse_order("+creation_date,-username,name"),
            vec![
                sort("creation_date", SortOrder::Asc),
                sort("username", SortOrder::Desc),
                sort("name", SortOrder::Asc),
            ]
        );
    }

    #[test]
    fn decoded_plus_sign_is_treated_as_ascending() {
        // `order=+name` reaches us as " name" after form decoding.
        assert_eq!(parse_order(" name"), vec![sort("name", SortOrder::Asc)]);
    }

    #[test]
    fn empty_tokens_are_kept() {
        assert_eq!(
            parse_order("name,,-"),
            vec![
                sort("name", SortOrder::Asc),
                sort("", SortOrder::Asc),
                sort("", SortOrder::Desc),
            ]
        );
    }

    #[test]
    fn out_of_range_pagination_passes_through() {
        let query = ListQuery::from_pairs([("page", "-3"), ("per_page", "100000")]);
        assert_eq!(query.page, -3);
        assert_eq!(query.per_page, 100_000);
    }

    #[test]
    fn unparsable_pagination_falls_back_to_defaults() {
        let query = ListQuery::from_pairs([("page", "abc"), ("per_page", "")]);
        assert_eq!(query.page, DEFAULT_PAGE);
        assert_eq!(query.per_page, DEFAULT_PER_PAGE);
    }

    #[test]
    fn last_duplicate_wins() {
        let query = ListQuery::from_pairs([("status", "1"), ("status", "0")]);
        assert_eq!(query.filters["status"], "0");
    }
}
