use shared::export::TRANSACTIONS_EXPORT_PREFIX;
use shared::Transaction;
use yew::prelude::*;

use super::transaction_table::TransactionTable;
use crate::components::export_menu::ExportMenu;
use crate::components::filter_bar::FilterBar;
use crate::components::transaction_modal::TransactionModal;
use crate::hooks::use_categories::use_categories;
use crate::hooks::use_transactions::use_transactions;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct TransactionsPageProps {
    pub api_client: ApiClient,
}

/// Which dialog is open
#[derive(Clone, PartialEq)]
enum Dialog {
    Closed,
    Create,
    Edit(Transaction),
}

#[function_component(TransactionsPage)]
pub fn transactions_page(props: &TransactionsPageProps) -> Html {
    let transactions = use_transactions(&props.api_client);
    let categories = use_categories(&props.api_client);
    let dialog = use_state(|| Dialog::Closed);

    let state = &transactions.state;
    let actions = &transactions.actions;

    let on_create = {
        let dialog = dialog.clone();
        Callback::from(move |_: MouseEvent| dialog.set(Dialog::Create))
    };
    let on_select = {
        let dialog = dialog.clone();
        Callback::from(move |tx: Transaction| dialog.set(Dialog::Edit(tx)))
    };
    let on_close = {
        let dialog = dialog.clone();
        Callback::from(move |_: ()| dialog.set(Dialog::Closed))
    };
    let on_saved = {
        let dialog = dialog.clone();
        let refresh = actions.refresh.clone();
        Callback::from(move |_: ()| {
            dialog.set(Dialog::Closed);
            refresh.emit(());
        })
    };

    let modal = match &*dialog {
        Dialog::Closed => html! {},
        Dialog::Create => html! {
            <TransactionModal
                key="create"
                api_client={props.api_client.clone()}
                on_close={on_close}
                on_saved={on_saved}
            />
        },
        Dialog::Edit(tx) => html! {
            <TransactionModal
                key={format!("edit-{}", tx.id)}
                api_client={props.api_client.clone()}
                editing={tx.clone()}
                on_close={on_close}
                on_saved={on_saved}
            />
        },
    };

    html! {
        <section class="transactions-page">
            <div class="page-header">
                <h2>{"Transactions"}</h2>
                <div class="page-actions">
                    <ExportMenu
                        transactions={state.transactions.clone()}
                        prefix={TRANSACTIONS_EXPORT_PREFIX}
                    />
                    <button class="btn btn-primary" onclick={on_create}>{"Add transaction"}</button>
                </div>
            </div>
            <FilterBar
                start_date={state.filter.start_date}
                end_date={state.filter.end_date}
                kind={state.filter.kind}
                categories={(*categories).clone()}
                selection={state.filter.categories.clone()}
                on_event={actions.on_filter.clone()}
            />
            <TransactionTable
                transactions={state.transactions.clone()}
                loading={state.loading}
                sort={state.sort}
                on_sort={actions.on_sort.clone()}
                on_select={on_select}
            />
            {modal}
        </section>
    }
}
