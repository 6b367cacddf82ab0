// Copyright 2025 Cowboy AI, LLC.

//! Filter, sort and paginate pipeline shared by every searchable repository
//!
//! ```mermaid
//! graph LR
//!     A[all items] -->|SearchSpec::matches| B[filtered]
//!     B -->|total| T[count]
//!     B -->|stable sort| C[sorted]
//!     C -->|offset .. offset + per_page| D[page]
//! ```

use chrono::{DateTime, Utc};
use std::fmt::Debug;

use super::query_support::{SearchParams, SearchResult, SortDirection};

/// A comparable property value used as a sort key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    /// Text, compared by code point
    Text(String),
    /// Whole number
    Integer(i64),
    /// Point in time
    Timestamp(DateTime<Utc>),
    /// Boolean flag
    Flag(bool),
}

/// Search behavior of one repository
///
/// Implemented by a marker type per aggregate so the in-memory and store
/// repositories share exactly the same filter and sort semantics.
pub trait SearchSpec<E>: Send + Sync + 'static {
    /// Domain specific filter shape
    type Filter: Clone + Debug + Send + Sync + 'static;

    /// Properties a caller may sort by
    const SORTABLE_FIELDS: &'static [&'static str];

    /// True when `item` passes `filter`
    fn matches(filter: &Self::Filter, item: &E) -> bool;

    /// Sort key of `item` for `field`
    fn sort_value(item: &E, field: &str) -> Option<SortValue>;

    /// Ordering used when no allow-listed sort was requested
    fn default_sort() -> Option<(&'static str, SortDirection)> {
        None
    }
}

/// Run the search pipeline over `items` (in storage order)
pub fn search_items<E, S>(items: Vec<E>, params: &SearchParams<S::Filter>) -> SearchResult<E, S::Filter>
where
    S: SearchSpec<E>,
{
    let mut filtered: Vec<E> = match params.filter() {
        Some(filter) => items
            .into_iter()
            .filter(|item| S::matches(filter, item))
            .collect(),
        None => items,
    };
    let total = filtered.len();

    let requested = params
        .sort()
        .filter(|field| S::SORTABLE_FIELDS.iter().any(|allowed| allowed == field))
        .map(|field| (field, params.sort_dir().unwrap_or_default()));
    if let Some((field, direction)) = requested.or_else(|| S::default_sort()) {
        sort_items::<E, S>(&mut filtered, field, direction);
    }

    let page = filtered
        .into_iter()
        .skip(params.offset())
        .take(params.per_page())
        .collect();
    SearchResult::new(page, total, params)
}

/// Stable sort by one property; ties keep their relative order
fn sort_items<E, S: SearchSpec<E>>(items: &mut [E], field: &str, direction: SortDirection) {
    items.sort_by(|a, b| {
        let ordering = S::sort_value(a, field).cmp(&S::sort_value(b, field));
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::SearchInput;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        rank: i64,
    }

    struct RowSearch;

    impl SearchSpec<Row> for RowSearch {
        type Filter = String;
        const SORTABLE_FIELDS: &'static [&'static str] = &["name"];

        fn matches(filter: &String, item: &Row) -> bool {
            item.name.contains(filter.as_str())
        }

        fn sort_value(item: &Row, field: &str) -> Option<SortValue> {
            match field {
                "name" => Some(SortValue::Text(item.name.to_string())),
                "rank" => Some(SortValue::Integer(item.rank)),
                _ => None,
            }
        }
    }

    fn rows(names: &[&'static str]) -> Vec<Row> {
        names
            .iter()
            .enumerate()
            .map(|(rank, name)| Row {
                name: *name,
                rank: rank as i64,
            })
            .collect()
    }

    fn names(result: &SearchResult<Row, String>) -> Vec<&'static str> {
        result.items.iter().map(|row| row.name).collect()
    }

    #[test]
    fn test_sort_by_allow_listed_field() {
        let items = rows(&["b", "a", "d", "e", "c"]);

        let asc = SearchParams::new(SearchInput::new().sort("name"));
        assert_eq!(
            names(&search_items::<_, RowSearch>(items.clone(), &asc)),
            vec!["a", "b", "c", "d", "e"]
        );

        let desc = SearchParams::new(SearchInput::new().sort("name").sort_dir("desc"));
        assert_eq!(
            names(&search_items::<_, RowSearch>(items, &desc)),
            vec!["e", "d", "c", "b", "a"]
        );
    }

    #[test]
    fn test_sort_outside_allow_list_keeps_storage_order() {
        let items = rows(&["b", "a", "c"]);
        let params = SearchParams::new(SearchInput::new().sort("rank").sort_dir("desc"));
        assert_eq!(
            names(&search_items::<_, RowSearch>(items, &params)),
            vec!["b", "a", "c"]
        );
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let items = vec![
            Row { name: "same", rank: 1 },
            Row { name: "same", rank: 2 },
            Row { name: "a", rank: 3 },
        ];
        let params = SearchParams::new(SearchInput::new().sort("name").sort_dir("desc"));
        let result = search_items::<_, RowSearch>(items, &params);
        let ranks: Vec<i64> = result.items.iter().map(|row| row.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_filter_then_sort_then_paginate() {
        let items = rows(&["xb", "a", "xa", "xc", "b"]);
        let params = SearchParams::new(
            SearchInput::new()
                .page(2)
                .per_page(2)
                .sort("name")
                .filter("x".to_string()),
        );

        let result = search_items::<_, RowSearch>(items, &params);
        assert_eq!(names(&result), vec!["xc"]);
        assert_eq!(result.total, 3);
        assert_eq!(result.last_page, 2);
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let params = SearchParams::new(SearchInput::new().page(9));
        let result = search_items::<_, RowSearch>(rows(&["a", "b"]), &params);
        assert!(result.items.is_empty());
        assert_eq!(result.total, 2);
        assert_eq!(result.current_page, 9);
    }
}
