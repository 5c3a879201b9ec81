use shared::format::{format_display_date, format_money};
use shared::{SortDirection, SortKey, SortState, Transaction, TransactionType};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TransactionTableProps {
    pub transactions: Vec<Transaction>,
    pub loading: bool,
    /// Present when the table offers sortable headers
    #[prop_or_default]
    pub sort: Option<SortState>,
    #[prop_or_default]
    pub on_sort: Option<Callback<SortKey>>,
    /// Row click, e.g. to open the edit dialog
    #[prop_or_default]
    pub on_select: Option<Callback<Transaction>>,
    #[prop_or(AttrValue::Static("No transactions found"))]
    pub empty_message: AttrValue,
}

fn sort_indicator(sort: Option<SortState>, key: SortKey) -> &'static str {
    match sort {
        Some(state) if state.key == key => match state.direction {
            SortDirection::Asc => " ▲",
            SortDirection::Desc => " ▼",
        },
        _ => "",
    }
}

#[function_component(TransactionTable)]
pub fn transaction_table(props: &TransactionTableProps) -> Html {
    let header = |label: &'static str, key: SortKey| match &props.on_sort {
        Some(on_sort) => {
            let on_sort = on_sort.clone();
            let onclick = Callback::from(move |_: MouseEvent| on_sort.emit(key));
            html! {
                <th class="sortable" {onclick}>{label}{sort_indicator(props.sort, key)}</th>
            }
        }
        None => html! { <th>{label}</th> },
    };

    if props.loading {
        return html! { <div class="loading">{"Loading transactions..."}</div> };
    }

    if props.transactions.is_empty() {
        return html! { <div class="empty-state">{&props.empty_message}</div> };
    }

    html! {
        <div class="table-container">
            <table class="transactions-table">
                <thead>
                    <tr>
                        {header("Date", SortKey::Date)}
                        <th>{"Title"}</th>
                        <th>{"Category"}</th>
                        {header("Amount", SortKey::Amount)}
                        <th>{"Note"}</th>
                    </tr>
                </thead>
                <tbody>
                    {for props.transactions.iter().map(|transaction| {
                        let amount_class = match transaction.kind {
                            TransactionType::Income => "amount positive",
                            TransactionType::Expense => "amount negative",
                        };
                        let sign = match transaction.kind {
                            TransactionType::Income => "+",
                            TransactionType::Expense => "-",
                        };
                        let onclick = props.on_select.clone().map(|on_select| {
                            let transaction = transaction.clone();
                            Callback::from(move |_: MouseEvent| on_select.emit(transaction.clone()))
                        });

                        html! {
                            <tr key={transaction.id.as_str().to_string()} {onclick}>
                                <td class="date">{format_display_date(transaction.date)}</td>
                                <td class="description">{&transaction.title}</td>
                                <td class="category">{transaction.category_name().unwrap_or("-")}</td>
                                <td class={amount_class}>
                                    {format!("{sign}{}", format_money(transaction.amount))}
                                </td>
                                <td class="note">{transaction.note_text()}</td>
                            </tr>
                        }
                    })}
                </tbody>
            </table>
        </div>
    }
}
