// src/filter.rs
//! Request-parameter → filter resolution
//!
//! Turns raw `search` / `search_field` / `order` / `sort` / `offset` /
//! `limit` strings into a typed [`FilterSpec`]. Field names are checked
//! against the per-kind allowlist; sensitive fields can never be searched or
//! ordered on.

use std::collections::BTreeMap;
use std::fmt;

use crate::consts::UNSET;
use crate::db::Record;
use crate::error::{Result, VaultError};
use crate::model::SensitiveFields;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        })
    }
}

/// Resolved search/sort/pagination options for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    /// Free-text substring, empty when unset.
    pub search: String,
    /// Restricts `search` to one field; `None` searches every searchable field.
    pub search_field: Option<String>,
    /// Sort column, empty for the default `id` order.
    pub order: String,
    pub direction: SortDirection,
    /// `UNSET` (-1) or a non-negative offset.
    pub offset: i64,
    /// `UNSET` (-1) or a non-negative limit.
    pub limit: i64,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            search: String::new(),
            search_field: None,
            order: String::new(),
            direction: SortDirection::Asc,
            offset: UNSET,
            limit: UNSET,
        }
    }
}

impl FilterSpec {
    /// Both offset and limit must be set for pagination to apply.
    pub fn pagination(&self) -> Option<(i64, i64)> {
        (self.offset >= 0 && self.limit >= 0).then_some((self.offset, self.limit))
    }

    pub fn string_args(&self) -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            ("search", self.search.clone()),
            ("order", self.order.clone()),
            ("sort", self.direction.to_string()),
        ])
    }

    pub fn int_args(&self) -> BTreeMap<&'static str, i64> {
        BTreeMap::from([("offset", self.offset), ("limit", self.limit)])
    }
}

/// Per-kind allowlist of searchable and orderable fields.
#[derive(Debug, Clone)]
pub struct FilterResolver {
    kind: &'static str,
    searchable: &'static [&'static str],
    orderable: Vec<&'static str>,
}

impl FilterResolver {
    /// Build the resolver for a record kind.
    ///
    /// Fails closed if the kind declares a sensitive field as searchable.
    pub fn for_record<E: Record + SensitiveFields>() -> Result<Self> {
        Self::new(E::TABLE, E::SEARCHABLE, E::SENSITIVE_FIELDS)
    }

    pub fn new(
        kind: &'static str,
        searchable: &'static [&'static str],
        sensitive: &[&str],
    ) -> Result<Self> {
        if let Some(field) = searchable.iter().find(|f| sensitive.contains(f)) {
            return Err(VaultError::InvalidFilterField(format!(
                "{kind}: sensitive field `{field}` cannot be searchable"
            )));
        }
        let mut orderable = vec!["id", "created_at", "updated_at"];
        orderable.extend_from_slice(searchable);
        Ok(Self {
            kind,
            searchable,
            orderable,
        })
    }

    pub fn orderable(&self) -> &[&'static str] {
        &self.orderable
    }

    pub fn searchable(&self) -> &'static [&'static str] {
        self.searchable
    }

    /// Resolve raw request parameters. Unknown keys are ignored.
    pub fn resolve<I, K, V>(&self, params: I) -> Result<FilterSpec>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut spec = FilterSpec::default();

        for (key, value) in params {
            let value = value.as_ref().trim();
            match key.as_ref() {
                "search" => spec.search = value.to_string(),
                "search_field" if !value.is_empty() => {
                    if !self.searchable.iter().any(|f| *f == value) {
                        return Err(self.rejected("search", value));
                    }
                    spec.search_field = Some(value.to_string());
                }
                "order" if !value.is_empty() => {
                    if !self.orderable.iter().any(|f| *f == value) {
                        return Err(self.rejected("order", value));
                    }
                    spec.order = value.to_string();
                }
                "sort" if !value.is_empty() => {
                    spec.direction = match value.to_ascii_lowercase().as_str() {
                        "asc" => SortDirection::Asc,
                        "desc" => SortDirection::Desc,
                        other => {
                            return Err(VaultError::Validation(format!(
                                "sort must be asc or desc, got `{other}`"
                            )))
                        }
                    }
                }
                "offset" => spec.offset = parse_non_negative(value),
                "limit" => spec.limit = parse_non_negative(value),
                _ => {}
            }
        }

        Ok(spec)
    }

    fn rejected(&self, option: &str, field: &str) -> VaultError {
        VaultError::InvalidFilterField(format!(
            "{}: cannot {option} on `{field}`",
            self.kind
        ))
    }
}

// Malformed pagination is treated as absent rather than failing the request
fn parse_non_negative(raw: &str) -> i64 {
    match raw.parse::<i64>() {
        Ok(n) if n >= 0 => n,
        _ => UNSET,
    }
}
