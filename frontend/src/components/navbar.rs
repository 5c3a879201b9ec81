use yew::prelude::*;

use crate::route::Route;

#[derive(Properties, PartialEq)]
pub struct NavbarProps {
    pub current: Route,
    pub on_navigate: Callback<Route>,
    pub on_logout: Callback<()>,
}

#[function_component(Navbar)]
pub fn navbar(props: &NavbarProps) -> Html {
    let link = |route: Route| {
        let on_navigate = props.on_navigate.clone();
        let onclick = Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_navigate.emit(route);
        });
        let class = classes!("nav-link", (props.current == route).then_some("active"));
        html! {
            <a href="#" {class} {onclick}>{route.title()}</a>
        }
    };

    let on_logout = {
        let on_logout = props.on_logout.clone();
        Callback::from(move |_: MouseEvent| on_logout.emit(()))
    };

    html! {
        <header class="header">
            <div class="container">
                <h1>{"Expense Tracker"}</h1>
                <nav class="header-right">
                    {link(Route::Dashboard)}
                    {link(Route::Transactions)}
                    <button class="btn btn-secondary" onclick={on_logout}>{"Log out"}</button>
                </nav>
            </div>
        </header>
    }
}
