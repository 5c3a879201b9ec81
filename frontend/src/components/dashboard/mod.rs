pub mod category_breakdown;
pub mod dashboard_page;
pub mod summary_cards;

pub use category_breakdown::CategoryBreakdown;
pub use dashboard_page::DashboardPage;
pub use summary_cards::SummaryCards;
