//! Filter state for the transaction list and the dashboard, and how it turns into
//! query parameters.
//!
//! An empty category selection means "no category filter": the `categoryId` key is
//! left out of the query entirely. There is no separate "all" sentinel for
//! categories; choosing "all" just clears the selection. The transaction list's type
//! filter does have one (`ALL`), the dashboard's does not.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use crate::format::format_query_date;
use crate::{EntityId, TransactionType, UnknownTransactionType};

pub const START_DATE_PARAM: &str = "startDate";
pub const END_DATE_PARAM: &str = "endDate";
pub const TYPE_PARAM: &str = "type";
pub const CATEGORY_PARAM: &str = "categoryId";

/// Multi-select of category ids, kept in the order they were picked
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySelection {
    ids: Vec<EntityId>,
}

impl CategorySelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` if absent, remove it if present
    pub fn toggle(&mut self, id: EntityId) {
        if let Some(position) = self.ids.iter().position(|selected| *selected == id) {
            self.ids.remove(position);
        } else {
            self.ids.push(id);
        }
    }

    /// Back to "all categories", which is the empty selection
    pub fn select_all(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.ids.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityId> {
        self.ids.iter()
    }

    /// Comma-joined ids, or `None` when nothing is selected
    pub fn to_param(&self) -> Option<String> {
        if self.ids.is_empty() {
            return None;
        }
        let joined = self
            .ids
            .iter()
            .map(EntityId::as_str)
            .collect::<Vec<_>>()
            .join(",");
        Some(joined)
    }
}

impl FromIterator<EntityId> for CategorySelection {
    fn from_iter<I: IntoIterator<Item = EntityId>>(iter: I) -> Self {
        let mut selection = Self::new();
        for id in iter {
            if !selection.contains(&id) {
                selection.ids.push(id);
            }
        }
        selection
    }
}

/// Type filter of the transaction list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    Only(TransactionType),
}

impl TypeFilter {
    pub const ALL_SENTINEL: &'static str = "ALL";

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeFilter::All => Self::ALL_SENTINEL,
            TypeFilter::Only(kind) => kind.as_str(),
        }
    }

    /// Query value, `None` for the `ALL` sentinel
    pub fn to_param(&self) -> Option<&'static str> {
        match self {
            TypeFilter::All => None,
            TypeFilter::Only(kind) => Some(kind.as_str()),
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeFilter {
    type Err = UnknownTransactionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::ALL_SENTINEL {
            Ok(TypeFilter::All)
        } else {
            s.parse().map(TypeFilter::Only)
        }
    }
}

/// A user action on a filter bar
#[derive(Debug, Clone, PartialEq)]
pub enum FilterEvent {
    SetStartDate(Option<NaiveDate>),
    SetEndDate(Option<NaiveDate>),
    SetType(TypeFilter),
    ToggleCategory(EntityId),
    SelectAllCategories,
    /// The "filter" button
    Apply,
    /// The "clear" button
    Clear,
}

/// Filters of the transaction list page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub kind: TypeFilter,
    pub categories: CategorySelection,
}

impl TransactionFilter {
    /// Apply an event. Returns `true` when exactly one refetch must follow.
    ///
    /// Date and type edits wait for [`FilterEvent::Apply`]; category changes and
    /// [`FilterEvent::Clear`] refetch right away.
    pub fn handle(&mut self, event: FilterEvent) -> bool {
        match event {
            FilterEvent::SetStartDate(date) => {
                self.start_date = date;
                false
            }
            FilterEvent::SetEndDate(date) => {
                self.end_date = date;
                false
            }
            FilterEvent::SetType(kind) => {
                self.kind = kind;
                false
            }
            FilterEvent::ToggleCategory(id) => {
                self.categories.toggle(id);
                true
            }
            FilterEvent::SelectAllCategories => {
                self.categories.select_all();
                true
            }
            FilterEvent::Apply => true,
            FilterEvent::Clear => {
                *self = Self::default();
                true
            }
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Query pairs in a fixed order: start date, end date, type, categories
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = date_pairs(self.start_date, self.end_date);
        if let Some(kind) = self.kind.to_param() {
            pairs.push((TYPE_PARAM, kind.to_string()));
        }
        if let Some(ids) = self.categories.to_param() {
            pairs.push((CATEGORY_PARAM, ids));
        }
        pairs
    }
}

/// Filters of the dashboard. The dashboard shows one type at a time, so the type
/// is always sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub chart_type: TransactionType,
    pub categories: CategorySelection,
}

impl DashboardFilter {
    /// Apply an event. Returns `true` when exactly one refetch must follow.
    ///
    /// Clearing keeps the chart type: it is a view toggle, not a filter.
    pub fn handle(&mut self, event: FilterEvent) -> bool {
        match event {
            FilterEvent::SetStartDate(date) => {
                self.start_date = date;
                false
            }
            FilterEvent::SetEndDate(date) => {
                self.end_date = date;
                false
            }
            FilterEvent::SetType(TypeFilter::Only(kind)) => {
                let changed = self.chart_type != kind;
                self.chart_type = kind;
                changed
            }
            FilterEvent::SetType(TypeFilter::All) => false,
            FilterEvent::ToggleCategory(id) => {
                self.categories.toggle(id);
                true
            }
            FilterEvent::SelectAllCategories => {
                self.categories.select_all();
                true
            }
            FilterEvent::Apply => true,
            FilterEvent::Clear => {
                *self = Self {
                    chart_type: self.chart_type,
                    ..Self::default()
                };
                true
            }
        }
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = date_pairs(self.start_date, self.end_date);
        pairs.push((TYPE_PARAM, self.chart_type.as_str().to_string()));
        if let Some(ids) = self.categories.to_param() {
            pairs.push((CATEGORY_PARAM, ids));
        }
        pairs
    }

    /// The list query that accompanies the dashboard: same dates and categories,
    /// every type.
    pub fn recent_transactions_filter(&self) -> TransactionFilter {
        TransactionFilter {
            start_date: self.start_date,
            end_date: self.end_date,
            kind: TypeFilter::All,
            categories: self.categories.clone(),
        }
    }
}

fn date_pairs(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    if let Some(date) = start {
        pairs.push((START_DATE_PARAM, format_query_date(date)));
    }
    if let Some(date) = end {
        pairs.push((END_DATE_PARAM, format_query_date(date)));
    }
    pairs
}

/// `path?k=v&...`, or just `path` when there is nothing to send.
///
/// Values are percent-encoded, except that the commas joining category ids
/// stay literal.
pub fn endpoint_with_query(path: &str, pairs: &[(&'static str, String)]) -> String {
    if pairs.is_empty() {
        return path.to_string();
    }

    let query = pairs
        .iter()
        .map(|(key, value)| {
            let encoded = value
                .split(',')
                .map(|part| urlencoding::encode(part).into_owned())
                .collect::<Vec<_>>()
                .join(",");
            format!("{key}={encoded}")
        })
        .collect::<Vec<_>>()
        .join("&");
    format!("{path}?{query}")
}
