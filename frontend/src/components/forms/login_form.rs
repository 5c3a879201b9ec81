use shared::{FormState, LoginField, Notice};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::text_field::TextField;
use crate::components::toast::use_toaster;
use crate::hooks::use_form::use_form;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct LoginFormProps {
    pub api_client: ApiClient,
    pub on_success: Callback<()>,
    pub on_register: Callback<()>,
}

#[function_component(LoginForm)]
pub fn login_form(props: &LoginFormProps) -> Html {
    let form = use_form(FormState::<LoginField>::new);
    let submitting = use_state(|| false);
    let toaster = use_toaster();

    let on_submit = {
        let api_client = props.api_client.clone();
        let on_success = props.on_success.clone();
        let request = form.form.login_request();
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
                match api_client.login(&request).await {
                    Ok(_) if api_client.is_authenticated() => {
                        Logger::info_with_component("login-form", "Signed in");
                        toaster.notify(Notice::success("Signed in successfully"));
                        on_success.emit(());
                    }
                    Ok(response) => {
                        let message = response.message.unwrap_or_else(|| "Sign in failed".to_string());
                        toaster.notify(Notice::error(message));
                    }
                    Err(e) => toaster.notify(Notice::from_error(&e, "Sign in failed")),
                }
                submitting.set(false);
            });
        })
    };

    let field = |field: LoginField| {
        let on_change = form.actions.on_change.clone();
        let on_blur = form.actions.on_blur.clone();
        (
            Callback::from(move |value: String| on_change.emit((field, value))),
            Callback::from(move |_: ()| on_blur.emit(field)),
        )
    };
    let (username_input, username_blur) = field(LoginField::Username);
    let (password_input, password_blur) = field(LoginField::Password);

    let on_register = {
        let on_register = props.on_register.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_register.emit(());
        })
    };

    html! {
        <div class="auth-card">
            <h2>{"Sign in"}</h2>
            <form class="auth-form" onsubmit={on_submit} novalidate=true>
                <TextField
                    label="Username"
                    name="username"
                    value={form.form.value(LoginField::Username).to_string()}
                    error={form.form.error(LoginField::Username)}
                    disabled={*submitting}
                    on_input={username_input}
                    on_blur={username_blur}
                />
                <TextField
                    label="Password"
                    name="password"
                    input_type="password"
                    value={form.form.value(LoginField::Password).to_string()}
                    error={form.form.error(LoginField::Password)}
                    disabled={*submitting}
                    on_input={password_input}
                    on_blur={password_blur}
                />
                <button type="submit" class="btn btn-primary" disabled={*submitting}>
                    {if *submitting { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
            <p class="auth-switch">
                {"No account yet? "}
                <a href="#" onclick={on_register}>{"Register"}</a>
            </p>
        </div>
    }
}
