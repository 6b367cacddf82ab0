// Copyright 2025 Cowboy AI, LLC.

//! Search parameters and results for searchable repositories
//!
//! [`SearchInput`] carries loosely typed values as they arrive from outside
//! the domain; [`SearchParams`] coerces them into valid values without ever
//! failing.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::entity::Entity;
use crate::errors::DomainResult;

/// Page used when the input page is missing or invalid
pub const DEFAULT_PAGE: usize = 1;

/// Page size used when the input page size is missing or invalid
pub const DEFAULT_PER_PAGE: usize = 15;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Sort in ascending order
    #[default]
    Asc,
    /// Sort in descending order
    Desc,
}

impl SortDirection {
    /// Parse case-insensitively; anything unknown is ascending
    pub fn parse_lossy(value: &str) -> Self {
        if value.eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

/// Raw search input
///
/// `page` and `per_page` accept any JSON value (numbers, numeric strings) the
/// way a request DTO would deliver them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchInput<F> {
    /// Requested page
    pub page: Option<Value>,
    /// Requested page size
    pub per_page: Option<Value>,
    /// Requested sort field
    pub sort: Option<String>,
    /// Requested sort direction
    pub sort_dir: Option<String>,
    /// Domain specific filter
    pub filter: Option<F>,
}

impl<F> Default for SearchInput<F> {
    fn default() -> Self {
        Self {
            page: None,
            per_page: None,
            sort: None,
            sort_dir: None,
            filter: None,
        }
    }
}

impl<F> SearchInput<F> {
    /// Empty input
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page
    pub fn page(mut self, page: impl Into<Value>) -> Self {
        self.page = Some(page.into());
        self
    }

    /// Set the page size
    pub fn per_page(mut self, per_page: impl Into<Value>) -> Self {
        self.per_page = Some(per_page.into());
        self
    }

    /// Set the sort field
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Set the sort direction
    pub fn sort_dir(mut self, sort_dir: impl Into<String>) -> Self {
        self.sort_dir = Some(sort_dir.into());
        self
    }

    /// Set the filter
    pub fn filter(mut self, filter: F) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Convert the filter, keeping every other field
    pub fn map_filter<G>(self, f: impl FnOnce(F) -> G) -> SearchInput<G> {
        SearchInput {
            page: self.page,
            per_page: self.per_page,
            sort: self.sort,
            sort_dir: self.sort_dir,
            filter: self.filter.map(f),
        }
    }
}

/// Validated search parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams<F> {
    page: usize,
    per_page: usize,
    sort: Option<String>,
    sort_dir: Option<SortDirection>,
    filter: Option<F>,
}

impl<F> Default for SearchParams<F> {
    fn default() -> Self {
        Self::new(SearchInput::default())
    }
}

impl<F> SearchParams<F> {
    /// Coerce raw input into valid parameters
    ///
    /// # Examples
    ///
    /// ```rust
    /// use catalog_domain::{SearchInput, SearchParams, SortDirection};
    ///
    /// let params = SearchParams::<String>::new(
    ///     SearchInput::new().page("2").per_page(-1).sort("name").sort_dir("DESC"),
    /// );
    /// assert_eq!(params.page(), 2);
    /// assert_eq!(params.per_page(), 15);
    /// assert_eq!(params.sort(), Some("name"));
    /// assert_eq!(params.sort_dir(), Some(SortDirection::Desc));
    /// ```
    pub fn new(input: SearchInput<F>) -> Self {
        let page = input
            .page
            .as_ref()
            .and_then(positive_integer)
            .unwrap_or(DEFAULT_PAGE);
        let per_page = match &input.per_page {
            Some(Value::Bool(_)) => None,
            Some(value) => positive_integer(value),
            None => None,
        }
        .unwrap_or(DEFAULT_PER_PAGE);
        let sort = input.sort.filter(|sort| !sort.is_empty());
        let sort_dir = sort.as_ref().map(|_| {
            input
                .sort_dir
                .as_deref()
                .map(SortDirection::parse_lossy)
                .unwrap_or_default()
        });

        Self {
            page,
            per_page,
            sort,
            sort_dir,
            filter: input.filter,
        }
    }

    /// Page number, starting at 1
    pub fn page(&self) -> usize {
        self.page
    }

    /// Page size
    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Requested sort field
    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    /// Sort direction; present exactly when a sort field is
    pub fn sort_dir(&self) -> Option<SortDirection> {
        self.sort_dir
    }

    /// Domain specific filter
    pub fn filter(&self) -> Option<&F> {
        self.filter.as_ref()
    }

    /// Index of the first item on the requested page
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }
}

/// Numeric value of a loose JSON input, when it is a positive integer
fn positive_integer(value: &Value) -> Option<usize> {
    let number = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            text.parse::<f64>().ok()?
        }
        Value::Bool(true) => 1.0,
        _ => return None,
    };
    if number.is_finite() && number >= 1.0 && number.fract() == 0.0 && number <= usize::MAX as f64
    {
        Some(number as usize)
    } else {
        None
    }
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult<E, F> {
    /// Items on this page, never more than `per_page`
    pub items: Vec<E>,
    /// Number of items matching the filter before pagination
    pub total: usize,
    /// Page number of this result
    pub current_page: usize,
    /// Page size
    pub per_page: usize,
    /// Last page number, at least 1
    pub last_page: usize,
    /// Applied sort field
    pub sort: Option<String>,
    /// Applied sort direction
    pub sort_dir: Option<SortDirection>,
    /// Applied filter
    pub filter: Option<F>,
}

impl<E, F: Clone> SearchResult<E, F> {
    /// Build a result page for the given parameters
    pub fn new(items: Vec<E>, total: usize, params: &SearchParams<F>) -> Self {
        let per_page = params.per_page();
        Self {
            items,
            total,
            current_page: params.page(),
            per_page,
            last_page: total.div_ceil(per_page.max(1)).max(1),
            sort: params.sort.clone(),
            sort_dir: params.sort_dir,
            filter: params.filter.clone(),
        }
    }
}

impl<E, F> SearchResult<E, F> {
    /// Map the items to a different type
    pub fn map<U, M>(self, f: M) -> SearchResult<U, F>
    where
        M: FnMut(E) -> U,
    {
        SearchResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            current_page: self.current_page,
            per_page: self.per_page,
            last_page: self.last_page,
            sort: self.sort,
            sort_dir: self.sort_dir,
            filter: self.filter,
        }
    }
}

impl<E: Entity, F: Serialize> SearchResult<E, F> {
    /// Serialize with items in their entity wire shape
    pub fn to_json(&self) -> DomainResult<Value> {
        let page = SearchResult {
            items: self.items.iter().map(Entity::to_json).collect::<Vec<_>>(),
            total: self.total,
            current_page: self.current_page,
            per_page: self.per_page,
            last_page: self.last_page,
            sort: self.sort.clone(),
            sort_dir: self.sort_dir,
            filter: self.filter.as_ref(),
        };
        Ok(serde_json::to_value(page)?)
    }
}
