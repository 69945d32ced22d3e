use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::api::types::SignupRequest;
use crate::auth::{self, MIN_PASSWORD_LEN};
use crate::routes;
use crate::state::{self, use_api};

#[component]
pub fn SignupPage() -> impl IntoView {
    let api = use_api();
    let navigate = use_navigate();

    let (first_name, set_first_name) = signal(String::new());
    let (last_name, set_last_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (phone, set_phone) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_loading, set_is_loading) = signal(false);
    let (error_message, set_error_message) = signal::<Option<String>>(None);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let request = SignupRequest {
            email: email.get(),
            password: password.get(),
            first_name: first_name.get(),
            last_name: last_name.get(),
            phone: phone.get(),
        };

        // Validate before touching storage or the network.
        if let Err(e) = auth::validate_signup(&request) {
            set_error_message.set(Some(e.user_message(auth::SIGNUP_FAILED)));
            return;
        }
        let Some(creds) = state::credentials() else {
            set_error_message.set(Some(state::STORAGE_UNAVAILABLE.to_string()));
            return;
        };
        let client = api.client();
        let navigate = navigate.clone();

        set_is_loading.set(true);
        set_error_message.set(None);
        spawn_local(async move {
            match auth::signup(&client, &creds, &request).await {
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
            <h2>"Create your account"</h2>
            <p class="page-description">"It takes a minute, and your progress is saved as you go."</p>

            <form class="auth-form" on:submit=submit>
                <div class="input-row">
                    <div class="form-group">
                        <label for="signup-first">"First name"</label>
                        <input
                            id="signup-first"
                            type="text"
                            class="input"
                            autocomplete="given-name"
                            prop:value=move || first_name.get()
                            on:input=move |ev| set_first_name.set(event_target_value(&ev))
                            disabled=move || is_loading.get()
                        />
                    </div>
                    <div class="form-group">
                        <label for="signup-last">"Last name"</label>
                        <input
                            id="signup-last"
                            type="text"
                            class="input"
                            autocomplete="family-name"
                            prop:value=move || last_name.get()
                            on:input=move |ev| set_last_name.set(event_target_value(&ev))
                            disabled=move || is_loading.get()
                        />
                    </div>
                </div>
                <div class="form-group">
                    <label for="signup-email">"Email"</label>
                    <input
                        id="signup-email"
                        type="email"
                        class="input"
                        autocomplete="email"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                        disabled=move || is_loading.get()
                    />
                </div>
                <div class="form-group">
                    <label for="signup-phone">"Phone (optional)"</label>
                    <input
                        id="signup-phone"
                        type="tel"
                        class="input"
                        autocomplete="tel"
                        prop:value=move || phone.get()
                        on:input=move |ev| set_phone.set(event_target_value(&ev))
                        disabled=move || is_loading.get()
                    />
                </div>
                <div class="form-group">
                    <label for="signup-password">"Password"</label>
                    <input
                        id="signup-password"
                        type="password"
                        class="input input-password"
                        autocomplete="new-password"
                        placeholder=format!("At least {} characters", MIN_PASSWORD_LEN)
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
                    {move || if is_loading.get() { "Creating account..." } else { "Sign up" }}
                </button>
            </form>

            <p class="auth-switch">
                "Already registered? "
                <a href=routes::LOGIN>"Log in"</a>
            </p>
        </div>
    }
}
