use shared::Category;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;

/// Categories loaded once on mount. Stays empty if the request fails.
#[hook]
pub fn use_categories(api_client: &ApiClient) -> UseStateHandle<Vec<Category>> {
    let categories = use_state(Vec::<Category>::new);

    {
        let api_client = api_client.clone();
        let categories = categories.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                categories.set(api_client.categories().await);
            });
            || ()
        });
    }

    categories
}
