use shared::format::format_money;
use shared::{Dashboard, FilterEvent, TransactionType, TypeFilter};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CategoryBreakdownProps {
    pub dashboard: Dashboard,
    pub chart_type: TransactionType,
    pub on_event: Callback<FilterEvent>,
}

/// Per-category totals of the selected type, with their share of the whole
#[function_component(CategoryBreakdown)]
pub fn category_breakdown(props: &CategoryBreakdownProps) -> Html {
    let tab = |kind: TransactionType| {
        let on_event = props.on_event.clone();
        let onclick = Callback::from(move |_: MouseEvent| {
            on_event.emit(FilterEvent::SetType(TypeFilter::Only(kind)));
        });
        html! {
            <button
                type="button"
                class={classes!("tab", (props.chart_type == kind).then_some("active"))}
                {onclick}
            >
                {kind.label()}
            </button>
        }
    };

    let body = if props.dashboard.breakdown.is_empty() {
        html! { <div class="empty-state">{"No data for this period"}</div> }
    } else {
        html! {
            <ul class="breakdown-list">
                {for props.dashboard.breakdown.iter().map(|slice| {
                    let share = props.dashboard.share_percent(slice);
                    html! {
                        <li class="breakdown-row" key={slice.category.clone()}>
                            <span class="breakdown-category">{&slice.category}</span>
                            <span class="breakdown-bar">
                                <span class="breakdown-fill" style={format!("width: {share:.1}%")}></span>
                            </span>
                            <span class="breakdown-total">{format_money(slice.total)}</span>
                            <span class="breakdown-share">{format!("{share:.1}%")}</span>
                        </li>
                    }
                })}
            </ul>
        }
    };

    html! {
        <section class="category-breakdown">
            <div class="breakdown-header">
                <h3>{"By category"}</h3>
                <div class="tabs">
                    {tab(TransactionType::Expense)}
                    {tab(TransactionType::Income)}
                </div>
            </div>
            {body}
        </section>
    }
}
