use yew::prelude::*;

mod components;
mod hooks;
mod route;
mod services;

use components::dashboard::DashboardPage;
use components::forms::{LoginForm, RegisterForm};
use components::navbar::Navbar;
use components::toast::ToastProvider;
use components::transactions::TransactionsPage;
use route::Route;
use services::api::ApiClient;
use services::logging::Logger;

#[function_component(App)]
fn app() -> Html {
    let api_client = use_memo((), |_| ApiClient::new());
    let api_client = (*api_client).clone();

    let route = use_state(|| {
        if api_client.is_authenticated() {
            Route::Dashboard
        } else {
            Route::Login
        }
    });

    let navigate = {
        let route = route.clone();
        Callback::from(move |next: Route| route.set(next))
    };

    let go_to = |next: Route| {
        let navigate = navigate.clone();
        Callback::from(move |_: ()| navigate.emit(next))
    };

    let on_logout = {
        let api_client = api_client.clone();
        let navigate = navigate.clone();
        Callback::from(move |_: ()| {
            api_client.logout();
            Logger::info_with_component("app", "Signed out");
            navigate.emit(Route::Login);
        })
    };

    let current = route.resolve(api_client.is_authenticated());

    let page = match current {
        Route::Login => html! {
            <LoginForm
                api_client={api_client.clone()}
                on_success={go_to(Route::Dashboard)}
                on_register={go_to(Route::Register)}
            />
        },
        Route::Register => html! {
            <RegisterForm
                api_client={api_client.clone()}
                on_success={go_to(Route::Login)}
                on_login={go_to(Route::Login)}
            />
        },
        Route::Dashboard => html! { <DashboardPage api_client={api_client.clone()} /> },
        Route::Transactions => html! { <TransactionsPage api_client={api_client.clone()} /> },
    };

    html! {
        <ToastProvider>
            {if current.requires_auth() {
                html! { <Navbar {current} on_navigate={navigate.clone()} {on_logout} /> }
            } else {
                html! {}
            }}
            <main class="container">
                {page}
            </main>
        </ToastProvider>
    }
}

fn main() {
    services::logging::init();
    yew::Renderer::<App>::new().render();
}
