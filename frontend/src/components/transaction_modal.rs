use shared::{filter_categories, FormState, Notice, Transaction, TransactionField, TransactionType};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::components::forms::TextField;
use crate::components::toast::use_toaster;
use crate::hooks::use_categories::use_categories;
use crate::hooks::use_form::use_form;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct TransactionModalProps {
    pub api_client: ApiClient,
    /// Transaction being edited, `None` to create one
    #[prop_or_default]
    pub editing: Option<Transaction>,
    pub on_close: Callback<()>,
    /// Called after a successful save or delete
    pub on_saved: Callback<()>,
}

/// Create/edit dialog. Mount it only while open so the form starts fresh.
#[function_component(TransactionModal)]
pub fn transaction_modal(props: &TransactionModalProps) -> Html {
    let editing = props.editing.clone();
    let form = use_form(move || match &editing {
        Some(tx) => FormState::edit_transaction(tx),
        None => FormState::new_transaction(),
    });
    let categories = use_categories(&props.api_client);
    let saving = use_state(|| false);
    let toaster = use_toaster();

    let on_submit = {
        let api_client = props.api_client.clone();
        let editing_id = props.editing.as_ref().map(|tx| tx.id.clone());
        let payload = form.form.transaction_payload();
        let validate_all = form.actions.validate_all.clone();
        let saving = saving.clone();
        let toaster = toaster.clone();
        let on_saved = props.on_saved.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *saving || !validate_all.emit(()) {
                return;
            }
            let Some(payload) = payload.clone() else {
                return;
            };

            let api_client = api_client.clone();
            let editing_id = editing_id.clone();
            let saving = saving.clone();
            let toaster = toaster.clone();
            let on_saved = on_saved.clone();

            saving.set(true);
            spawn_local(async move {
                let result = match &editing_id {
                    Some(id) => api_client.update_transaction(id, &payload).await,
                    None => api_client.create_transaction(&payload).await,
                };
                saving.set(false);

                match result {
                    Ok(()) => {
                        let message = if editing_id.is_some() {
                            "Transaction updated"
                        } else {
                            "Transaction added"
                        };
                        toaster.notify(Notice::success(message));
                        on_saved.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component("transaction-modal", &format!("Save failed: {e}"));
                        toaster.notify(Notice::from_error(&e, "Failed to save transaction"));
                    }
                }
            });
        })
    };

    let on_delete = props.editing.as_ref().map(|tx| {
        let api_client = props.api_client.clone();
        let id = tx.id.clone();
        let saving = saving.clone();
        let toaster = toaster.clone();
        let on_saved = props.on_saved.clone();

        Callback::from(move |_: MouseEvent| {
            if *saving || !gloo::dialogs::confirm("Delete this transaction?") {
                return;
            }
            let api_client = api_client.clone();
            let id = id.clone();
            let saving = saving.clone();
            let toaster = toaster.clone();
            let on_saved = on_saved.clone();

            saving.set(true);
            spawn_local(async move {
                let result = api_client.delete_transaction(&id).await;
                saving.set(false);
                match result {
                    Ok(()) => {
                        toaster.notify(Notice::success("Transaction deleted"));
                        on_saved.emit(());
                    }
                    Err(e) => toaster.notify(Notice::from_error(&e, "Failed to delete transaction")),
                }
            });
        })
    });

    let input_for = |field: TransactionField| {
        let on_change = form.actions.on_change.clone();
        let on_blur = form.actions.on_blur.clone();
        (
            Callback::from(move |value: String| on_change.emit((field, value))),
            Callback::from(move |_: ()| on_blur.emit(field)),
        )
    };
    let (title_input, title_blur) = input_for(TransactionField::Title);
    let (amount_input, amount_blur) = input_for(TransactionField::Amount);
    let (category_input, category_blur) = input_for(TransactionField::CategoryName);
    let (date_input, date_blur) = input_for(TransactionField::Date);

    let on_type_change = {
        let on_change = form.actions.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_change.emit((TransactionField::Type, select.value()));
        })
    };

    let on_note_input = {
        let on_change = form.actions.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            on_change.emit((TransactionField::Note, area.value()));
        })
    };

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let on_backdrop_click = on_cancel.clone();
    let on_modal_click = Callback::from(|e: MouseEvent| e.stop_propagation());

    let suggestions = filter_categories(&categories, form.form.value(TransactionField::CategoryName));
    let current_type = form.form.transaction_type();
    let title = if props.editing.is_some() {
        "Edit transaction"
    } else {
        "Add transaction"
    };

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal" onclick={on_modal_click}>
                <h3 class="modal-title">{title}</h3>
                <form class="transaction-form" onsubmit={on_submit} novalidate=true>
                    <TextField
                        label="Title"
                        name="title"
                        value={form.form.value(TransactionField::Title).to_string()}
                        error={form.form.error(TransactionField::Title)}
                        disabled={*saving}
                        on_input={title_input}
                        on_blur={title_blur}
                    />
                    <TextField
                        label="Amount"
                        name="amount"
                        input_type="number"
                        value={form.form.value(TransactionField::Amount).to_string()}
                        error={form.form.error(TransactionField::Amount)}
                        disabled={*saving}
                        on_input={amount_input}
                        on_blur={amount_blur}
                    />
                    <div class="form-group">
                        <label for="type">{"Type"}</label>
                        <select id="type" onchange={on_type_change} disabled={*saving}>
                            {for [TransactionType::Expense, TransactionType::Income].iter().map(|kind| html! {
                                <option value={kind.as_str()} selected={*kind == current_type}>
                                    {kind.label()}
                                </option>
                            })}
                        </select>
                    </div>
                    <TextField
                        label="Category"
                        name="category"
                        placeholder="Pick or type a new category"
                        list={AttrValue::Static("category-suggestions")}
                        value={form.form.value(TransactionField::CategoryName).to_string()}
                        error={form.form.error(TransactionField::CategoryName)}
                        disabled={*saving}
                        on_input={category_input}
                        on_blur={category_blur}
                    />
                    <datalist id="category-suggestions">
                        {for suggestions.iter().map(|category| html! {
                            <option value={category.name.clone()} />
                        })}
                    </datalist>
                    <TextField
                        label="Date"
                        name="date"
                        input_type="date"
                        value={form.form.value(TransactionField::Date).to_string()}
                        error={form.form.error(TransactionField::Date)}
                        disabled={*saving}
                        on_input={date_input}
                        on_blur={date_blur}
                    />
                    <div class="form-group">
                        <label for="note">{"Note"}</label>
                        <textarea
                            id="note"
                            value={form.form.value(TransactionField::Note).to_string()}
                            oninput={on_note_input}
                            disabled={*saving}
                        />
                    </div>
                    <div class="modal-actions">
                        {if let Some(on_delete) = on_delete {
                            html! {
                                <button type="button" class="btn btn-danger" onclick={on_delete} disabled={*saving}>
                                    {"Delete"}
                                </button>
                            }
                        } else {
                            html! {}
                        }}
                        <button type="button" class="btn btn-secondary" onclick={on_cancel}>{"Cancel"}</button>
                        <button type="submit" class="btn btn-primary" disabled={*saving}>
                            {if *saving { "Saving..." } else { "Save" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
