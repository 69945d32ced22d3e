use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::api::types::LoginRequest;
use crate::auth;
use crate::routes;
use crate::state::{self, use_api};

#[component]
pub fn LoginPage() -> impl IntoView {
    let api = use_api();
    let navigate = use_navigate();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_loading, set_is_loading) = signal(false);
    let (error_message, set_error_message) = signal::<Option<String>>(None);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(creds) = state::credentials() else {
            set_error_message.set(Some(state::STORAGE_UNAVAILABLE.to_string()));
            return;
        };
        let request = LoginRequest {
            email: email.get(),
            password: password.get(),
        };
        let client = api.client();
        let navigate = navigate.clone();

        set_is_loading.set(true);
        set_error_message.set(None);
        spawn_local(async move {
            match auth::login(&client, &creds, &request).await {
                Ok(outcome) => {
                    api.signed_in(&outcome);
                    navigate(outcome.redirect, Default::default());
                }
                Err(e) => {
                    set_error_message.set(Some(e));
                    set_is_loading.set(false);
                }
            }
        });
    };

    view! {
        <div class="page auth-page">
            <h2>"Welcome back"</h2>
            <p class="page-description">"Log in to continue your application."</p>

            <form class="auth-form" on:submit=submit>
                <div class="form-group">
                    <label for="login-email">"Email"</label>
                    <input
                        id="login-email"
                        type="email"
                        class="input"
                        autocomplete="email"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                        disabled=move || is_loading.get()
                    />
                </div>
                <div class="form-group">
                    <label for="login-password">"Password"</label>
                    <input
                        id="login-password"
                        type="password"
                        class="input input-password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        disabled=move || is_loading.get()
                    />
                </div>

                {move || error_message.get().map(|err| view! {
                    <div class="form-error">
                        <span class="status-text status-error">{err}</span>
                    </div>
                })}

                <button type="submit" class="btn btn-primary" disabled=move || is_loading.get()>
                    {move || if is_loading.get() { "Logging in..." } else { "Log in" }}
                </button>
            </form>

            <p class="auth-switch">
                "New here? "
                <a href=routes::SIGNUP>"Create an account"</a>
            </p>
        </div>
    }
}
