use shared::{FormState, Notice, RegisterField};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::text_field::TextField;
use crate::components::toast::use_toaster;
use crate::hooks::use_form::use_form;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct RegisterFormProps {
    pub api_client: ApiClient,
    /// Called once the account exists; the user signs in next
    pub on_success: Callback<()>,
    pub on_login: Callback<()>,
}

#[function_component(RegisterForm)]
pub fn register_form(props: &RegisterFormProps) -> Html {
    let form = use_form(FormState::<RegisterField>::new);
    let submitting = use_state(|| false);
    let toaster = use_toaster();

    let on_submit = {
        let api_client = props.api_client.clone();
        let on_success = props.on_success.clone();
        let request = form.form.register_request();
        let validate_all = form.actions.validate_all.clone();
        let submitting = submitting.clone();
        let toaster = toaster.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting || !validate_all.emit(()) {
                return;
            }

            let api_client = api_client.clone();
            let on_success = on_success.clone();
            let request = request.clone();
            let submitting = submitting.clone();
            let toaster = toaster.clone();

            submitting.set(true);
            spawn_local(async move {
                match api_client.register(&request).await {
                    Ok(()) => {
                        toaster.notify(Notice::success("Registration successful, please sign in"));
                        on_success.emit(());
                    }
                    Err(e) => toaster.notify(Notice::from_error(&e, "Registration failed")),
                }
                submitting.set(false);
            });
        })
    };

    let input = |field: RegisterField, label: &'static str, input_type: &'static str| {
        let on_change = form.actions.on_change.clone();
        let on_blur = form.actions.on_blur.clone();
        html! {
            <TextField
                {label}
                name={format!("{field:?}").to_lowercase()}
                {input_type}
                value={form.form.value(field).to_string()}
                error={form.form.error(field)}
                disabled={*submitting}
                on_input={Callback::from(move |value: String| on_change.emit((field, value)))}
                on_blur={Callback::from(move |_: ()| on_blur.emit(field))}
            />
        }
    };

    let on_login = {
        let on_login = props.on_login.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_login.emit(());
        })
    };

    html! {
        <div class="auth-card">
            <h2>{"Create account"}</h2>
            <form class="auth-form" onsubmit={on_submit} novalidate=true>
                {input(RegisterField::Name, "Full name", "text")}
                {input(RegisterField::Username, "Username", "text")}
                {input(RegisterField::Password, "Password", "password")}
                <button type="submit" class="btn btn-primary" disabled={*submitting}>
                    {if *submitting { "Creating account..." } else { "Register" }}
                </button>
            </form>
            <p class="auth-switch">
                {"Already registered? "}
                <a href="#" onclick={on_login}>{"Sign in"}</a>
            </p>
        </div>
    }
}
