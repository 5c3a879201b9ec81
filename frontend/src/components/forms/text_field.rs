use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TextFieldProps {
    pub label: AttrValue,
    pub name: AttrValue,
    pub value: AttrValue,
    #[prop_or(AttrValue::Static("text"))]
    pub input_type: AttrValue,
    #[prop_or_default]
    pub placeholder: AttrValue,
    /// Visible validation message
    #[prop_or_default]
    pub error: Option<&'static str>,
    #[prop_or_default]
    pub disabled: bool,
    pub on_input: Callback<String>,
    pub on_blur: Callback<()>,
    #[prop_or_default]
    pub list: Option<AttrValue>,
}

/// Labelled input with its inline error
#[function_component(TextField)]
pub fn text_field(props: &TextFieldProps) -> Html {
    let oninput = {
        let on_input = props.on_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_input.emit(input.value());
        })
    };
    let onblur = {
        let on_blur = props.on_blur.clone();
        Callback::from(move |_: FocusEvent| on_blur.emit(()))
    };

    html! {
        <div class={classes!("form-group", props.error.is_some().then_some("has-error"))}>
            <label for={props.name.clone()}>{&props.label}</label>
            <input
                id={props.name.clone()}
                name={props.name.clone()}
                type={props.input_type.clone()}
                value={props.value.clone()}
                placeholder={props.placeholder.clone()}
                list={props.list.clone()}
                disabled={props.disabled}
                {oninput}
                {onblur}
            />
            {if let Some(error) = props.error {
                html! { <div class="form-error">{error}</div> }
            } else {
                html! {}
            }}
        </div>
    }
}
