use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::auth;
use crate::routes;
use crate::session::SessionContext;
use crate::state::{self, use_api};

#[component]
pub fn Navbar() -> impl IntoView {
    let api = use_api();
    let session_ctx = expect_context::<SessionContext>();
    let navigate = use_navigate();

    let logout = move |_| {
        let target = match state::credentials() {
            Some(creds) => auth::logout(&creds),
            None => routes::LOGIN,
        };
        api.signed_out();
        session_ctx.clear();
        navigate(target, Default::default());
    };

    view! {
        <nav class="navbar">
            <a href=routes::HOME class="navbar-brand">
                <span class="navbar-title">"VisaFlow"</span>
                <span class="navbar-subtitle">"Immigration made simple"</span>
            </a>
            <ul class="nav-list">
                <Show
                    when=move || api.is_authenticated()
                    fallback=|| view! {
                        <li class="nav-item">
                            <a href=routes::LOGIN class="nav-link">"Log in"</a>
                        </li>
                        <li class="nav-item">
                            <a href=routes::SIGNUP class="btn btn-primary">"Get started"</a>
                        </li>
                    }
                >
                    <li class="nav-item">
                        <a href=routes::DASHBOARD class="nav-link">"Dashboard"</a>
                    </li>
                    <li class="nav-item">
                        <a href=routes::VISA_SELECT class="nav-link">"New application"</a>
                    </li>
                    <li class="nav-item nav-user">
                        {move || api.user.get().map(|u| u.display_name()).unwrap_or_default()}
                    </li>
                </Show>
            </ul>
            <button
                class="btn btn-secondary"
                on:click=logout
                style:display=move || if api.is_authenticated() { "inline-block" } else { "none" }
            >
                "Log out"
            </button>
        </nav>
    }
}
