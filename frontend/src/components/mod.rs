pub mod category_filter;
pub mod dashboard;
pub mod date_picker;
pub mod export_menu;
pub mod filter_bar;
pub mod forms;
pub mod navbar;
pub mod toast;
pub mod transaction_modal;
pub mod transactions;
