use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use wasm_bindgen_futures::spawn_local;

use crate::api::types::Application;
use crate::api::{ApiClient, FetchTransport};
use crate::components::form_generator::FormGenerator;
use crate::components::progress_bar::ProgressBar;
use crate::components::status_badge::{BadgeStatus, StatusBadge};
use crate::format::format_optional_timestamp;
use crate::routes;
use crate::session::SessionContext;
use crate::state::use_api;
use crate::visa::visa_label;

#[component]
pub fn ApplicationDetailPage() -> impl IntoView {
    let api = use_api();
    let session_ctx = expect_context::<SessionContext>();
    let params = use_params_map();

    let (loading, set_loading) = signal(true);
    let (application, set_application) = signal::<Option<Application>>(None);
    let (error, set_error) = signal::<Option<String>>(None);
    let (session_error, set_session_error) = signal::<Option<String>>(None);
    let (refreshing, set_refreshing) = signal(false);

    let load_session = move |client: ApiClient<FetchTransport>, session_id: String| {
        set_refreshing.set(true);
        spawn_local(async move {
            let result = client.get_session(&session_id).await;
            if !session_ctx.is_current(&session_id) {
                return;
            }
            match result {
                Ok(session) => {
                    session_ctx.accept(&session_id, session);
                    set_session_error.set(None);
                }
                Err(e) => set_session_error.set(Some(e.user_message("Could not load your progress"))),
            }
            set_refreshing.set(false);
        });
    };

    // Reload whenever the route's id changes
    Effect::new(move |_| {
        let id = params.with(|p| p.get("id")).unwrap_or_default();
        if id.is_empty() {
            return;
        }
        let client = api.client();
        session_ctx.clear();
        set_application.set(None);
        set_refreshing.set(false);
        set_session_error.set(None);
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = client.get_application(&id).await;
            // The route may have moved on (or the page unmounted) while this was in flight
            let still_shown = params
                .try_with_untracked(|p| p.get("id"))
                .flatten()
                .is_some_and(|current| current == id);
            if !still_shown {
                return;
            }
            match result {
                Ok(app) => {
                    let session_id = app.session_key().to_string();
                    session_ctx.track(Some(session_id.clone()));
                    set_application.set(Some(app));
                    load_session(client, session_id);
                }
                Err(e) => set_error.set(Some(e.user_message("Could not load this application"))),
            }
            set_loading.set(false);
        });
    });

    let refresh = move |_| {
        if let Some(app) = application.get_untracked() {
            load_session(api.client(), app.session_key().to_string());
        }
    };

    view! {
        <div class="page application-page">
            <a href=routes::DASHBOARD class="back-link">"\u{2190} Back to dashboard"</a>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <p class="loading">"Loading application..."</p> }
            >
                {move || error.get().map(|e| view! {
                    <div class="form-error">
                        <span class="status-text status-error">{e}</span>
                    </div>
                })}

                {move || application.get().map(|app| {
                    let status = BadgeStatus::for_application(&app.status);
                    view! {
                        <h2>{visa_label(&app.visa_type)}</h2>
                        <div class="application-status">
                            <StatusBadge label="Application" status=status detail=app.status.clone() />
                            <span class="application-updated">
                                {format!(
                                    "Started {}",
                                    format_optional_timestamp(app.created_at.as_deref())
                                )}
                            </span>
                        </div>
                    }
                })}

                <section class="progress-section">
                    {move || {
                        let pct = session_ctx.progress();
                        let answered = session_ctx
                            .session
                            .with(|s| s.as_ref().map(|s| s.answered_count()).unwrap_or(0));
                        view! {
                            <ProgressBar percentage=pct label="Application progress" />
                            <StatusBadge
                                label="Questionnaire"
                                status=BadgeStatus::for_completion(pct)
                                detail=format!("{} questions answered", answered)
                            />
                        }
                    }}
                    <button
                        class="btn btn-secondary"
                        on:click=refresh
                        disabled=move || refreshing.get()
                    >
                        {move || if refreshing.get() { "Refreshing..." } else { "Refresh progress" }}
                    </button>
                    {move || session_error.get().map(|e| view! {
                        <span class="status-text status-error">{e}</span>
                    })}
                </section>

                <Show when=move || application.with(|a| a.is_some())>
                    <FormGenerator />
                </Show>
            </Show>
        </div>
    }
}
