use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod filters;
pub mod format;
pub mod http;
pub mod notice;
pub mod session;
pub mod sorting;
pub mod validation;

pub use api::ExpenseApi;
pub use config::ApiConfig;
pub use error::ApiError;
pub use export::{ExportArtifact, ExportError, ExportFormat};
pub use filters::{CategorySelection, DashboardFilter, FilterEvent, TransactionFilter, TypeFilter};
pub use notice::{Notice, NoticeKind};
pub use session::{MemorySessionStore, SessionStore};
pub use sorting::{SortDirection, SortKey, SortState};
pub use validation::{FormField, FormState, LoginField, RegisterField, TransactionField};

/// Server-assigned identifier. The API sends numbers or strings; both are kept as text
/// so they can be joined into query parameters and compared without caring about origin.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Signed(i64),
            Unsigned(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Signed(n) => EntityId(n.to_string()),
            RawId::Unsigned(n) => EntityId(n.to_string()),
            RawId::Text(s) => EntityId(s),
        })
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

/// Direction of money flow. Amounts are always stored positive; the sign comes from here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Income,
    #[default]
    Expense,
}

impl TransactionType {
    /// Wire value used in payloads and query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
        }
    }

    /// Human-readable label for lists and exports
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            TransactionType::Income => TransactionType::Expense,
            TransactionType::Expense => TransactionType::Income,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTransactionType(pub String);

impl fmt::Display for UnknownTransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown transaction type: {}", self.0)
    }
}

impl std::error::Error for UnknownTransactionType {}

impl FromStr for TransactionType {
    type Err = UnknownTransactionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INCOME" => Ok(TransactionType::Income),
            "EXPENSE" => Ok(TransactionType::Expense),
            other => Err(UnknownTransactionType(other.to_string())),
        }
    }
}

/// Category as listed by the server. Categories are created server-side when a
/// transaction references a name that does not exist yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<TransactionType>,
}

/// Categories whose name contains `query`, ignoring case. An empty query matches everything.
pub fn filter_categories<'a>(categories: &'a [Category], query: &str) -> Vec<&'a Category> {
    let needle = query.to_lowercase();
    categories
        .iter()
        .filter(|category| category.name.to_lowercase().contains(&needle))
        .collect()
}

/// Transaction view model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: EntityId,
    pub title: String,
    /// Always positive; see `kind` for direction
    #[serde(deserialize_with = "format::deserialize_amount")]
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(deserialize_with = "format::deserialize_api_date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub note: Option<String>,
}

impl Transaction {
    /// Amount with the sign implied by the transaction type
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    pub fn category_name(&self) -> Option<&str> {
        self.category
            .as_ref()
            .map(|category| category.name.as_str())
            .filter(|name| !name.is_empty())
    }

    pub fn note_text(&self) -> &str {
        self.note.as_deref().unwrap_or("")
    }
}

/// Body for creating or updating a transaction. The category travels by name and
/// is upserted by the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPayload {
    pub title: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category_name: String,
    pub date: NaiveDate,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub name: String,
}

/// Response of `/auth/signin`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Totals for the selected period
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[serde(default, deserialize_with = "format::deserialize_amount_or_zero")]
    pub total_income: f64,
    #[serde(default, deserialize_with = "format::deserialize_amount_or_zero")]
    pub total_expense: f64,
    #[serde(default, deserialize_with = "format::deserialize_amount_or_zero")]
    pub balance: f64,
}

/// One slice of the per-category breakdown
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryTotal {
    #[serde(default)]
    pub category: String,
    #[serde(default, alias = "value", deserialize_with = "format::deserialize_amount_or_zero")]
    pub total: f64,
}

/// Aggregate returned by `/api/dashboard`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Dashboard {
    #[serde(default)]
    pub summary: DashboardSummary,
    #[serde(rename = "pieChartData", default)]
    pub breakdown: Vec<CategoryTotal>,
}

impl Dashboard {
    /// Sum of all category totals
    pub fn breakdown_total(&self) -> f64 {
        self.breakdown.iter().map(|slice| slice.total).sum()
    }

    /// Share of a category in percent, 0 when nothing was recorded
    pub fn share_percent(&self, slice: &CategoryTotal) -> f64 {
        let total = self.breakdown_total();
        if total > 0.0 {
            slice.total / total * 100.0
        } else {
            0.0
        }
    }
}

/// Number of rows in the dashboard's recent list
pub const RECENT_TRANSACTIONS_LIMIT: usize = 5;

/// The first rows of a list as returned by the server
pub fn recent_transactions(transactions: &[Transaction]) -> &[Transaction] {
    &transactions[..transactions.len().min(RECENT_TRANSACTIONS_LIMIT)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: EntityId::from(id),
            name: name.to_string(),
            kind: Some(TransactionType::Expense),
        }
    }

    #[test]
    fn test_entity_id_accepts_numbers_and_strings() {
        let numeric: EntityId = serde_json::from_value(json!(42)).unwrap();
        let text: EntityId = serde_json::from_value(json!("abc-1")).unwrap();

        assert_eq!(numeric.as_str(), "42");
        assert_eq!(text.as_str(), "abc-1");
        assert_eq!(serde_json::to_value(&numeric).unwrap(), json!("42"));
    }

    #[test]
    fn test_transaction_type_wire_values() {
        assert_eq!(serde_json::to_value(TransactionType::Income).unwrap(), json!("INCOME"));
        assert_eq!("EXPENSE".parse::<TransactionType>().unwrap(), TransactionType::Expense);
        assert!("ALL".parse::<TransactionType>().is_err());
        assert_eq!(TransactionType::Income.toggled(), TransactionType::Expense);
    }

    #[test]
    fn test_transaction_deserializes_server_shape() {
        let tx: Transaction = serde_json::from_value(json!({
            "id": 7,
            "title": "Lunch",
            "amount": "120.50",
            "type": "EXPENSE",
            "category": { "id": 3, "name": "Food", "type": "EXPENSE" },
            "date": "2025-03-14T00:00:00.000Z",
            "note": null
        }))
        .unwrap();

        assert_eq!(tx.id.as_str(), "7");
        assert_eq!(tx.amount, 120.5);
        assert_eq!(tx.signed_amount(), -120.5);
        assert_eq!(tx.category_name(), Some("Food"));
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
        assert_eq!(tx.note_text(), "");
    }

    #[test]
    fn test_transaction_without_category() {
        let tx: Transaction = serde_json::from_value(json!({
            "id": "t1",
            "title": "Salary",
            "amount": 30000,
            "type": "INCOME",
            "date": "2025-01-31"
        }))
        .unwrap();

        assert!(tx.category.is_none());
        assert_eq!(tx.category_name(), None);
        assert_eq!(tx.signed_amount(), 30000.0);
    }

    #[test]
    fn test_payload_uses_server_field_names() {
        let payload = TransactionPayload {
            title: "Taxi".to_string(),
            amount: 85.0,
            kind: TransactionType::Expense,
            category_name: "Travel".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            note: String::new(),
        };

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "title": "Taxi",
                "amount": 85.0,
                "type": "EXPENSE",
                "categoryName": "Travel",
                "date": "2025-02-01",
                "note": ""
            })
        );
    }

    #[test]
    fn test_dashboard_breakdown_accepts_value_alias() {
        let dashboard: Dashboard = serde_json::from_value(json!({
            "summary": { "totalIncome": 1000, "totalExpense": "250.5", "balance": null },
            "pieChartData": [
                { "category": "Food", "total": 150 },
                { "category": "Travel", "value": 50 }
            ]
        }))
        .unwrap();

        assert_eq!(dashboard.summary.total_expense, 250.5);
        assert_eq!(dashboard.summary.balance, 0.0);
        assert_eq!(dashboard.breakdown_total(), 200.0);
        assert_eq!(dashboard.share_percent(&dashboard.breakdown[0]), 75.0);
    }

    #[test]
    fn test_share_percent_of_empty_breakdown() {
        let dashboard = Dashboard::default();
        let slice = CategoryTotal {
            category: "Food".to_string(),
            total: 0.0,
        };
        assert_eq!(dashboard.share_percent(&slice), 0.0);
    }

    #[test]
    fn test_recent_transactions_keeps_server_order() {
        let list: Vec<Transaction> = (1..=7)
            .map(|n| Transaction {
                id: EntityId::from(n as i64),
                title: format!("tx {n}"),
                amount: n as f64,
                kind: TransactionType::Expense,
                category: None,
                date: NaiveDate::from_ymd_opt(2025, 1, n).unwrap(),
                note: None,
            })
            .collect();

        let recent = recent_transactions(&list);
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].title, "tx 1");
        assert_eq!(recent_transactions(&list[..2]).len(), 2);
    }

    #[test]
    fn test_filter_categories_ignores_case() {
        let categories = vec![category("1", "Food"), category("2", "Fast food"), category("3", "Rent")];

        let names: Vec<&str> = filter_categories(&categories, "FOOD")
            .into_iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Food", "Fast food"]);
        assert_eq!(filter_categories(&categories, "").len(), 3);
    }
}
