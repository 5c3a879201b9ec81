pub mod use_categories;
pub mod use_dashboard;
pub mod use_form;
pub mod use_transactions;
