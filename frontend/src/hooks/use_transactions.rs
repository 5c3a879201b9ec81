use shared::{FilterEvent, Notice, SortKey, SortState, Transaction, TransactionFilter};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::toast::use_toaster;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Clone, PartialEq)]
pub struct TransactionState {
    /// Rows in display order
    pub transactions: Vec<Transaction>,
    pub loading: bool,
    pub filter: TransactionFilter,
    pub sort: SortState,
}

pub struct UseTransactionsResult {
    pub state: TransactionState,
    pub actions: UseTransactionsActions,
}

#[derive(Clone, PartialEq)]
pub struct UseTransactionsActions {
    /// Refetch with the current filters, e.g. after a save or delete
    pub refresh: Callback<()>,
    pub on_filter: Callback<FilterEvent>,
    pub on_sort: Callback<SortKey>,
}

#[hook]
pub fn use_transactions(api_client: &ApiClient) -> UseTransactionsResult {
    let transactions = use_state(Vec::<Transaction>::new);
    let loading = use_state(|| true);
    let filter = use_state(TransactionFilter::default);
    let sort = use_state(SortState::default);
    let toaster = use_toaster();

    let fetch = {
        let api_client = api_client.clone();
        let transactions = transactions.clone();
        let loading = loading.clone();
        let toaster = toaster.clone();

        use_callback((), move |filter: TransactionFilter, _| {
            let api_client = api_client.clone();
            let transactions = transactions.clone();
            let loading = loading.clone();
            let toaster = toaster.clone();

            spawn_local(async move {
                loading.set(true);
                Logger::debug_with_component("transactions", &format!("Fetching transactions with {filter:?}"));

                match api_client.transactions(&filter).await {
                    Ok(list) => transactions.set(list),
                    Err(e) => {
                        Logger::error_with_component("transactions", &format!("Failed to fetch transactions: {e}"));
                        toaster.notify(Notice::from_error(&e, "Failed to load transactions"));
                    }
                }

                loading.set(false);
            });
        })
    };

    {
        let fetch = fetch.clone();
        use_effect_with((), move |_| {
            fetch.emit(TransactionFilter::default());
            || ()
        });
    }

    let refresh = {
        let fetch = fetch.clone();
        let filter = filter.clone();
        Callback::from(move |_: ()| fetch.emit((*filter).clone()))
    };

    let on_filter = {
        let fetch = fetch.clone();
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

    let on_sort = {
        let sort = sort.clone();
        Callback::from(move |key: SortKey| sort.set((*sort).toggle(key)))
    };

    UseTransactionsResult {
        state: TransactionState {
            transactions: sort.apply(&transactions),
            loading: *loading,
            filter: (*filter).clone(),
            sort: *sort,
        },
        actions: UseTransactionsActions {
            refresh,
            on_filter,
            on_sort,
        },
    }
}
