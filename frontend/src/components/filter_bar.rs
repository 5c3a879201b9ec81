use chrono::NaiveDate;
use shared::{Category, CategorySelection, FilterEvent, TransactionType, TypeFilter};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use super::category_filter::CategoryFilter;
use super::date_picker::DatePicker;

#[derive(Properties, PartialEq)]
pub struct FilterBarProps {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Type selector for the list; `None` hides it
    #[prop_or_default]
    pub kind: Option<TypeFilter>,
    pub categories: Vec<Category>,
    pub selection: CategorySelection,
    pub on_event: Callback<FilterEvent>,
}

/// Date range, optional type, categories and the filter/clear buttons
#[function_component(FilterBar)]
pub fn filter_bar(props: &FilterBarProps) -> Html {
    let emit = |event: fn(Option<NaiveDate>) -> FilterEvent| {
        let on_event = props.on_event.clone();
        Callback::from(move |date: Option<NaiveDate>| on_event.emit(event(date)))
    };

    let on_type_change = {
        let on_event = props.on_event.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(kind) = select.value().parse::<TypeFilter>() {
                on_event.emit(FilterEvent::SetType(kind));
            }
        })
    };

    let on_apply = {
        let on_event = props.on_event.clone();
        Callback::from(move |_: MouseEvent| on_event.emit(FilterEvent::Apply))
    };
    let on_clear = {
        let on_event = props.on_event.clone();
        Callback::from(move |_: MouseEvent| on_event.emit(FilterEvent::Clear))
    };

    let type_select = match props.kind {
        Some(current) => html! {
            <label class="type-filter">
                <span>{"Type"}</span>
                <select onchange={on_type_change}>
                    {for [
                        TypeFilter::All,
                        TypeFilter::Only(TransactionType::Income),
                        TypeFilter::Only(TransactionType::Expense),
                    ]
                    .iter()
                    .map(|kind| {
                        let label = match kind {
                            TypeFilter::All => "All",
                            TypeFilter::Only(kind) => kind.label(),
                        };
                        html! {
                            <option value={kind.as_str()} selected={*kind == current}>{label}</option>
                        }
                    })}
                </select>
            </label>
        },
        None => html! {},
    };

    html! {
        <div class="filter-bar">
            <div class="filter-row">
                <DatePicker label="From" value={props.start_date} on_change={emit(FilterEvent::SetStartDate)} />
                <DatePicker label="To" value={props.end_date} on_change={emit(FilterEvent::SetEndDate)} />
                {type_select}
                <button type="button" class="btn btn-primary" onclick={on_apply}>{"Filter"}</button>
                <button type="button" class="btn btn-secondary" onclick={on_clear}>{"Clear"}</button>
            </div>
            <CategoryFilter
                categories={props.categories.clone()}
                selection={props.selection.clone()}
                on_event={props.on_event.clone()}
            />
        </div>
    }
}
