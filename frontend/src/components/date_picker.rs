use chrono::NaiveDate;
use shared::format::{format_query_date, parse_input_date};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct DatePickerProps {
    pub label: AttrValue,
    /// Selected date, or `None` when the filter is unset
    pub value: Option<NaiveDate>,
    pub on_change: Callback<Option<NaiveDate>>,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(DatePicker)]
pub fn date_picker(props: &DatePickerProps) -> Html {
    let onchange = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit(parse_input_date(&input.value()));
        })
    };

    let value = props.value.map(format_query_date).unwrap_or_default();

    html! {
        <label class="date-picker">
            <span class="date-picker-label">{&props.label}</span>
            <input type="date" {value} {onchange} disabled={props.disabled} />
        </label>
    }
}
