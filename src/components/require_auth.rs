use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::routes;
use crate::state::use_api;

/// Renders `children` only when a token is stored, otherwise sends the
/// visitor to the login page.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let api = use_api();

    view! {
        <Show
            when=move || api.is_authenticated()
            fallback=|| view! { <Redirect path=routes::LOGIN /> }
        >
            {children()}
        </Show>
    }
}
