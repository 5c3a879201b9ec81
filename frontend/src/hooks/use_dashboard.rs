use shared::{recent_transactions, Dashboard, DashboardFilter, FilterEvent, Notice, Transaction};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::toast::use_toaster;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Clone, PartialEq)]
pub struct DashboardState {
    pub dashboard: Dashboard,
    /// First rows of the list for the same dates and categories, any type
    pub recent: Vec<Transaction>,
    pub loading: bool,
    pub filter: DashboardFilter,
}

pub struct UseDashboardResult {
    pub state: DashboardState,
    pub actions: UseDashboardActions,
}

#[derive(Clone, PartialEq)]
pub struct UseDashboardActions {
    /// Refetch with the current filters, e.g. after a transaction was added
    pub refresh: Callback<()>,
    pub on_filter: Callback<FilterEvent>,
}

#[hook]
pub fn use_dashboard(api_client: &ApiClient) -> UseDashboardResult {
    let dashboard = use_state(Dashboard::default);
    let recent = use_state(Vec::<Transaction>::new);
    let loading = use_state(|| true);
    let filter = use_state(DashboardFilter::default);
    let toaster = use_toaster();

    let fetch = {
        let api_client = api_client.clone();
        let dashboard = dashboard.clone();
        let recent = recent.clone();
        let loading = loading.clone();
        let toaster = toaster.clone();

        use_callback((), move |filter: DashboardFilter, _| {
            let api_client = api_client.clone();
            let dashboard = dashboard.clone();
            let recent = recent.clone();
            let loading = loading.clone();
            let toaster = toaster.clone();

            spawn_local(async move {
                loading.set(true);
                Logger::debug_with_component("dashboard", &format!("Fetching dashboard with {filter:?}"));

                match api_client.dashboard(&filter).await {
                    Ok(data) => dashboard.set(data),
                    Err(e) => {
                        Logger::error_with_component("dashboard", &format!("Failed to fetch dashboard: {e}"));
                        toaster.notify(Notice::from_error(&e, "Failed to load dashboard"));
                    }
                }

                match api_client
                    .transactions(&filter.recent_transactions_filter())
                    .await
                {
                    Ok(list) => recent.set(recent_transactions(&list).to_vec()),
                    Err(e) => {
                        Logger::warn_with_component("dashboard", &format!("Failed to fetch recent transactions: {e}"));
                    }
                }

                loading.set(false);
            });
        })
    };

    {
        let fetch = fetch.clone();
        use_effect_with((), move |_| {
            fetch.emit(DashboardFilter::default());
            || ()
        });
    }

    let refresh = {
        let fetch = fetch.clone();
        let filter = filter.clone();
        Callback::from(move |_: ()| fetch.emit((*filter).clone()))
    };

    let on_filter = {
        let filter = filter.clone();
        Callback::from(move |event: FilterEvent| {
            let mut next = (*filter).clone();
            let refetch = next.handle(event);
            filter.set(next.clone());
            if refetch {
                fetch.emit(next);
            }
        })
    };

    UseDashboardResult {
        state: DashboardState {
            dashboard: (*dashboard).clone(),
            recent: (*recent).clone(),
            loading: *loading,
            filter: (*filter).clone(),
        },
        actions: UseDashboardActions { refresh, on_filter },
    }
}
