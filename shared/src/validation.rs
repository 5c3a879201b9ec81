//! Form validation engine shared by the login, register and transaction forms.
//!
//! Each form is a field enum implementing [`FormField`]. [`FormState`] tracks
//! values, errors and which fields were touched. An error is only visible once its
//! field has been touched (blurred once, or by a submit attempt); after that it is
//! recomputed on every change.

use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use crate::format::{format_query_date, parse_input_date, today};
use crate::{LoginRequest, RegisterRequest, Transaction, TransactionPayload, TransactionType};

pub const USERNAME_MIN_CHARS: usize = 3;
pub const PASSWORD_MIN_CHARS: usize = 6;
pub const NAME_MIN_CHARS: usize = 2;
pub const TITLE_MAX_CHARS: usize = 100;

/// A field of one form, with its validation rule
pub trait FormField: Copy + Eq + Hash + Debug + 'static {
    /// Every field of the form, in display order
    const ALL: &'static [Self];

    /// Error message for `value`, or `None` when it is acceptable
    fn validate(self, value: &str) -> Option<&'static str>;
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoginField {
    Username,
    Password,
}

impl FormField for LoginField {
    const ALL: &'static [Self] = &[LoginField::Username, LoginField::Password];

    fn validate(self, value: &str) -> Option<&'static str> {
        match self {
            LoginField::Username => validate_username(value),
            LoginField::Password => validate_password(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterField {
    Name,
    Username,
    Password,
}

impl FormField for RegisterField {
    const ALL: &'static [Self] = &[RegisterField::Name, RegisterField::Username, RegisterField::Password];

    fn validate(self, value: &str) -> Option<&'static str> {
        match self {
            RegisterField::Name => {
                if value.trim().is_empty() {
                    Some("Please enter your full name")
                } else if char_len(value) < NAME_MIN_CHARS {
                    Some("Name must be at least 2 characters")
                } else {
                    None
                }
            }
            RegisterField::Username => validate_username(value),
            RegisterField::Password => validate_password(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionField {
    Title,
    Amount,
    Type,
    CategoryName,
    Date,
    Note,
}

impl FormField for TransactionField {
    const ALL: &'static [Self] = &[
        TransactionField::Title,
        TransactionField::Amount,
        TransactionField::Type,
        TransactionField::CategoryName,
        TransactionField::Date,
        TransactionField::Note,
    ];

    fn validate(self, value: &str) -> Option<&'static str> {
        match self {
            TransactionField::Title => {
                if value.trim().is_empty() {
                    Some("Please enter a title")
                } else if char_len(value) > TITLE_MAX_CHARS {
                    Some("Title must not exceed 100 characters")
                } else {
                    None
                }
            }
            TransactionField::Amount => match parse_amount(value) {
                Some(_) => None,
                None => Some("Amount must be greater than 0"),
            },
            TransactionField::CategoryName => {
                if value.trim().is_empty() {
                    Some("Please select or enter a category")
                } else {
                    None
                }
            }
            TransactionField::Date => match parse_input_date(value) {
                Some(_) => None,
                None => Some("Please select a date"),
            },
            TransactionField::Type | TransactionField::Note => None,
        }
    }
}

fn validate_username(value: &str) -> Option<&'static str> {
    if value.trim().is_empty() {
        Some("Please enter a username")
    } else if char_len(value) < USERNAME_MIN_CHARS {
        Some("Username must be at least 3 characters")
    } else {
        None
    }
}

fn validate_password(value: &str) -> Option<&'static str> {
    if value.is_empty() {
        Some("Please enter a password")
    } else if char_len(value) < PASSWORD_MIN_CHARS {
        Some("Password must be at least 6 characters")
    } else {
        None
    }
}

/// A finite number strictly greater than zero
pub fn parse_amount(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount > 0.0)
}

/// Values, errors and touched fields of one form
#[derive(Debug, Clone, PartialEq)]
pub struct FormState<F: FormField> {
    values: HashMap<F, String>,
    errors: HashMap<F, &'static str>,
    touched: HashSet<F>,
}

impl<F: FormField> Default for FormState<F> {
    fn default() -> Self {
        Self {
            values: HashMap::new(),
            errors: HashMap::new(),
            touched: HashSet::new(),
        }
    }
}

impl<F: FormField> FormState<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Untouched form with initial values
    pub fn with_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (F, V)>,
        V: Into<String>,
    {
        Self {
            values: values.into_iter().map(|(field, value)| (field, value.into())).collect(),
            ..Self::default()
        }
    }

    pub fn value(&self, field: F) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// New input for `field`. Errors are only recomputed once it has been touched.
    pub fn change(&mut self, field: F, value: impl Into<String>) {
        self.values.insert(field, value.into());
        if self.touched.contains(&field) {
            self.revalidate(field);
        }
    }

    /// The user left `field`: mark it touched and validate it
    pub fn blur(&mut self, field: F) {
        self.touched.insert(field);
        self.revalidate(field);
    }

    /// Validate every field and mark all of them touched.
    /// Returns `true` when the form can be submitted.
    pub fn validate_all(&mut self) -> bool {
        self.errors = F::ALL
            .iter()
            .filter_map(|field| field.validate(self.value(*field)).map(|message| (*field, message)))
            .collect();
        self.touched = F::ALL.iter().copied().collect();
        self.errors.is_empty()
    }

    /// Error to show for `field`, hidden until the field is touched
    pub fn error(&self, field: F) -> Option<&'static str> {
        if self.touched.contains(&field) {
            self.errors.get(&field).copied()
        } else {
            None
        }
    }

    pub fn is_touched(&self, field: F) -> bool {
        self.touched.contains(&field)
    }

    /// Values back to `values`, no errors, nothing touched
    pub fn reset<I, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = (F, V)>,
        V: Into<String>,
    {
        *self = Self::with_values(values);
    }

    fn revalidate(&mut self, field: F) {
        match field.validate(self.value(field)) {
            Some(message) => {
                self.errors.insert(field, message);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }
}

impl FormState<LoginField> {
    pub fn login_request(&self) -> LoginRequest {
        LoginRequest {
            username: self.value(LoginField::Username).to_string(),
            password: self.value(LoginField::Password).to_string(),
        }
    }
}

impl FormState<RegisterField> {
    pub fn register_request(&self) -> RegisterRequest {
        RegisterRequest {
            username: self.value(RegisterField::Username).to_string(),
            password: self.value(RegisterField::Password).to_string(),
            name: self.value(RegisterField::Name).to_string(),
        }
    }
}

impl FormState<TransactionField> {
    /// Blank form for a new transaction: expense, dated today
    pub fn new_transaction() -> Self {
        Self::new_transaction_on(today())
    }

    pub fn new_transaction_on(date: NaiveDate) -> Self {
        Self::with_values([
            (TransactionField::Type, TransactionType::Expense.as_str().to_string()),
            (TransactionField::Date, format_query_date(date)),
        ])
    }

    /// Form prefilled from an existing transaction
    pub fn edit_transaction(tx: &Transaction) -> Self {
        Self::with_values([
            (TransactionField::Title, tx.title.clone()),
            (TransactionField::Amount, tx.amount.to_string()),
            (TransactionField::Type, tx.kind.as_str().to_string()),
            (TransactionField::CategoryName, tx.category_name().unwrap_or_default().to_string()),
            (TransactionField::Date, format_query_date(tx.date)),
            (TransactionField::Note, tx.note_text().to_string()),
        ])
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.value(TransactionField::Type).parse().unwrap_or_default()
    }

    /// Payload to send, `None` if amount or date do not parse. Call after
    /// [`FormState::validate_all`] succeeded.
    pub fn transaction_payload(&self) -> Option<TransactionPayload> {
        Some(TransactionPayload {
            title: self.value(TransactionField::Title).to_string(),
            amount: parse_amount(self.value(TransactionField::Amount))?,
            kind: self.transaction_type(),
            category_name: self.value(TransactionField::CategoryName).to_string(),
            date: parse_input_date(self.value(TransactionField::Date))?,
            note: self.value(TransactionField::Note).to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, EntityId};

    #[test]
    fn test_username_rules() {
        assert_eq!(LoginField::Username.validate(""), Some("Please enter a username"));
        assert_eq!(LoginField::Username.validate("   "), Some("Please enter a username"));
        assert_eq!(
            LoginField::Username.validate("ab"),
            Some("Username must be at least 3 characters")
        );
        assert_eq!(LoginField::Username.validate("abc"), None);
    }

    #[test]
    fn test_password_rules() {
        assert_eq!(LoginField::Password.validate(""), Some("Please enter a password"));
        assert_eq!(
            LoginField::Password.validate("12345"),
            Some("Password must be at least 6 characters")
        );
        assert_eq!(LoginField::Password.validate("      "), None);
    }

    #[test]
    fn test_name_rules() {
        assert_eq!(RegisterField::Name.validate(" "), Some("Please enter your full name"));
        assert_eq!(RegisterField::Name.validate("A"), Some("Name must be at least 2 characters"));
        assert_eq!(RegisterField::Name.validate("Al"), None);
    }

    #[test]
    fn test_title_rules() {
        assert_eq!(TransactionField::Title.validate(""), Some("Please enter a title"));
        assert_eq!(TransactionField::Title.validate(&"x".repeat(100)), None);
        assert_eq!(
            TransactionField::Title.validate(&"x".repeat(101)),
            Some("Title must not exceed 100 characters")
        );
    }

    #[test]
    fn test_amount_rules() {
        for bad in ["", "0", "0.00", "-5", "-0.01", "abc", "12abc", "NaN", "inf"] {
            assert_eq!(
                TransactionField::Amount.validate(bad),
                Some("Amount must be greater than 0"),
                "{bad:?} should be rejected"
            );
        }
        for good in ["1", "0.01", "12.5", " 99 ", "1e3"] {
            assert_eq!(TransactionField::Amount.validate(good), None, "{good:?} should pass");
        }
    }

    #[test]
    fn test_category_and_date_rules() {
        assert_eq!(
            TransactionField::CategoryName.validate("  "),
            Some("Please select or enter a category")
        );
        assert_eq!(TransactionField::Date.validate(""), Some("Please select a date"));
        assert_eq!(TransactionField::Date.validate("2025-01-01"), None);
        assert_eq!(TransactionField::Date.validate("2025-02-30"), Some("Please select a date"));
        assert_eq!(TransactionField::Date.validate("01/02/2025"), Some("Please select a date"));
        assert_eq!(TransactionField::Note.validate(""), None);
    }

    #[test]
    fn test_impossible_date_blocks_submit() {
        let mut form = FormState::with_values([
            (TransactionField::Title, "Coffee"),
            (TransactionField::Amount, "5"),
            (TransactionField::CategoryName, "Food"),
            (TransactionField::Date, "2025-02-30"),
        ]);

        assert!(!form.validate_all());
        assert_eq!(form.error(TransactionField::Date), Some("Please select a date"));

        form.change(TransactionField::Date, "2025-02-28");
        assert!(form.validate_all());
        assert!(form.transaction_payload().is_some());
    }

    #[test]
    fn test_errors_hidden_until_blur() {
        let mut form = FormState::<LoginField>::new();

        form.change(LoginField::Username, "a");
        assert_eq!(form.error(LoginField::Username), None);

        form.blur(LoginField::Username);
        assert_eq!(
            form.error(LoginField::Username),
            Some("Username must be at least 3 characters")
        );

        form.change(LoginField::Username, "alice");
        assert_eq!(form.error(LoginField::Username), None);

        form.change(LoginField::Username, "al");
        assert_eq!(
            form.error(LoginField::Username),
            Some("Username must be at least 3 characters")
        );
        assert!(!form.is_touched(LoginField::Password));
    }

    #[test]
    fn test_short_username_fails_before_submit() {
        let mut form = FormState::with_values([
            (LoginField::Username, "ab"),
            (LoginField::Password, "secret1"),
        ]);

        assert!(!form.validate_all());
        assert_eq!(
            form.error(LoginField::Username),
            Some("Username must be at least 3 characters")
        );
        assert_eq!(form.error(LoginField::Password), None);
        assert!(form.is_touched(LoginField::Password));
    }

    #[test]
    fn test_validate_all_replaces_stale_errors() {
        let mut form = FormState::<RegisterField>::new();
        assert!(!form.validate_all());
        assert!(form.error(RegisterField::Name).is_some());

        form.change(RegisterField::Name, "Alice");
        form.change(RegisterField::Username, "alice");
        form.change(RegisterField::Password, "secret1");
        assert!(form.validate_all());
        assert_eq!(form.error(RegisterField::Name), None);

        let request = form.register_request();
        assert_eq!(request.name, "Alice");
        assert_eq!(request.username, "alice");
    }

    #[test]
    fn test_reset_clears_touched_and_errors() {
        let mut form = FormState::<LoginField>::new();
        form.validate_all();
        form.reset([(LoginField::Username, "bob")]);

        assert_eq!(form.value(LoginField::Username), "bob");
        assert!(!form.is_touched(LoginField::Username));
        assert_eq!(form.error(LoginField::Password), None);
    }

    #[test]
    fn test_new_transaction_defaults() {
        let day = NaiveDate::from_ymd_opt(2025, 7, 4).unwrap();
        let mut form = FormState::new_transaction_on(day);

        assert_eq!(form.transaction_type(), TransactionType::Expense);
        assert_eq!(form.value(TransactionField::Date), "2025-07-04");
        assert!(!form.validate_all());
        assert!(form.error(TransactionField::Title).is_some());
        assert!(form.error(TransactionField::Amount).is_some());
        assert_eq!(form.error(TransactionField::Date), None);
    }

    #[test]
    fn test_transaction_payload_from_valid_form() {
        let day = NaiveDate::from_ymd_opt(2025, 7, 4).unwrap();
        let mut form = FormState::new_transaction_on(day);
        form.change(TransactionField::Title, "Coffee");
        form.change(TransactionField::Amount, "65.5");
        form.change(TransactionField::CategoryName, "Drinks");
        form.change(TransactionField::Type, "INCOME");

        assert!(form.validate_all());
        let payload = form.transaction_payload().unwrap();
        assert_eq!(payload.amount, 65.5);
        assert_eq!(payload.kind, TransactionType::Income);
        assert_eq!(payload.category_name, "Drinks");
        assert_eq!(payload.date, day);
        assert_eq!(payload.note, "");
    }

    #[test]
    fn test_edit_form_is_prefilled() {
        let tx = Transaction {
            id: EntityId::from("4"),
            title: "Rent".to_string(),
            amount: 12000.0,
            kind: TransactionType::Expense,
            category: Some(Category {
                id: EntityId::from("2"),
                name: "Housing".to_string(),
                kind: Some(TransactionType::Expense),
            }),
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            note: Some("June".to_string()),
        };

        let form = FormState::edit_transaction(&tx);

        assert_eq!(form.value(TransactionField::Amount), "12000");
        assert_eq!(form.value(TransactionField::CategoryName), "Housing");
        assert_eq!(form.value(TransactionField::Date), "2025-06-01");
        assert_eq!(form.value(TransactionField::Note), "June");
        assert_eq!(form.error(TransactionField::Title), None);
    }
}
