use shared::{Category, CategorySelection, FilterEvent};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CategoryFilterProps {
    pub categories: Vec<Category>,
    pub selection: CategorySelection,
    pub on_event: Callback<FilterEvent>,
}

/// Multi-select category chips. "All" clears the selection.
#[function_component(CategoryFilter)]
pub fn category_filter(props: &CategoryFilterProps) -> Html {
    let on_all = {
        let on_event = props.on_event.clone();
        Callback::from(move |_: MouseEvent| on_event.emit(FilterEvent::SelectAllCategories))
    };

    html! {
        <div class="category-filter">
            <button
                type="button"
                class={classes!("chip", props.selection.is_empty().then_some("selected"))}
                onclick={on_all}
            >
                {"All"}
            </button>
            {for props.categories.iter().map(|category| {
                let selected = props.selection.contains(&category.id);
                let onclick = {
                    let on_event = props.on_event.clone();
                    let id = category.id.clone();
                    Callback::from(move |_: MouseEvent| on_event.emit(FilterEvent::ToggleCategory(id.clone())))
                };
                html! {
                    <button
                        type="button"
                        key={category.id.as_str().to_string()}
                        class={classes!("chip", selected.then_some("selected"))}
                        {onclick}
                    >
                        {&category.name}
                    </button>
                }
            })}
        </div>
    }
}
