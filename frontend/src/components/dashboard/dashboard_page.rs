use shared::export::RECENT_EXPORT_PREFIX;
use yew::prelude::*;

use super::category_breakdown::CategoryBreakdown;
use super::summary_cards::SummaryCards;
use crate::components::export_menu::ExportMenu;
use crate::components::filter_bar::FilterBar;
use crate::components::transaction_modal::TransactionModal;
use crate::components::transactions::TransactionTable;
use crate::hooks::use_categories::use_categories;
use crate::hooks::use_dashboard::use_dashboard;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct DashboardPageProps {
    pub api_client: ApiClient,
}

#[function_component(DashboardPage)]
pub fn dashboard_page(props: &DashboardPageProps) -> Html {
    let dashboard = use_dashboard(&props.api_client);
    let categories = use_categories(&props.api_client);

    let creating = use_state(|| false);

    let state = &dashboard.state;
    let actions = &dashboard.actions;

    let on_create = {
        let creating = creating.clone();
        Callback::from(move |_: MouseEvent| creating.set(true))
    };
    let on_close = {
        let creating = creating.clone();
        Callback::from(move |_: ()| creating.set(false))
    };
    let on_saved = {
        let creating = creating.clone();
        let refresh = actions.refresh.clone();
        Callback::from(move |_: ()| {
            creating.set(false);
            refresh.emit(());
        })
    };

    let modal = if *creating {
        html! {
            <TransactionModal
                api_client={props.api_client.clone()}
                on_close={on_close}
                on_saved={on_saved}
            />
        }
    } else {
        html! {}
    };

    html! {
        <section class="dashboard-page">
            <div class="page-header">
                <h2>{"Dashboard"}</h2>
                <button class="btn btn-primary" onclick={on_create}>{"Add transaction"}</button>
            </div>
            <FilterBar
                start_date={state.filter.start_date}
                end_date={state.filter.end_date}
                categories={(*categories).clone()}
                selection={state.filter.categories.clone()}
                on_event={actions.on_filter.clone()}
            />
            <SummaryCards summary={state.dashboard.summary.clone()} />
            <CategoryBreakdown
                dashboard={state.dashboard.clone()}
                chart_type={state.filter.chart_type}
                on_event={actions.on_filter.clone()}
            />
            <section class="recent-transactions">
                <div class="page-header">
                    <h3>{"Recent transactions"}</h3>
                    <ExportMenu transactions={state.recent.clone()} prefix={RECENT_EXPORT_PREFIX} />
                </div>
                <TransactionTable
                    transactions={state.recent.clone()}
                    loading={state.loading}
                    empty_message="No recent transactions"
                />
            </section>
            {modal}
        </section>
    }
}
