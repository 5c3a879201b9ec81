use shared::format::format_money;
use shared::DashboardSummary;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SummaryCardsProps {
    pub summary: DashboardSummary,
}

#[function_component(SummaryCards)]
pub fn summary_cards(props: &SummaryCardsProps) -> Html {
    let summary = &props.summary;
    let balance_class = if summary.balance < 0.0 {
        "amount negative"
    } else {
        "amount positive"
    };
    let balance_sign = if summary.balance < 0.0 { "-" } else { "" };

    html! {
        <div class="summary-cards">
            <div class="summary-card income">
                <span class="summary-label">{"Total income"}</span>
                <span class="amount positive">{format_money(summary.total_income)}</span>
            </div>
            <div class="summary-card expense">
                <span class="summary-label">{"Total expense"}</span>
                <span class="amount negative">{format_money(summary.total_expense)}</span>
            </div>
            <div class="summary-card balance">
                <span class="summary-label">{"Balance"}</span>
                <span class={balance_class}>{format!("{balance_sign}{}", format_money(summary.balance))}</span>
            </div>
        </div>
    }
}
