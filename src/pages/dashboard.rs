use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::types::Application;
use crate::components::status_badge::{BadgeStatus, StatusBadge};
use crate::format::format_optional_timestamp;
use crate::routes;
use crate::state::use_api;
use crate::visa::visa_label;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let api = use_api();

    let (loading, set_loading) = signal(true);
    let (applications, set_applications) = signal::<Vec<Application>>(vec![]);
    let (error, set_error) = signal::<Option<String>>(None);

    // Load applications on mount
    Effect::new(move |_| {
        let client = api.client();
        spawn_local(async move {
            match client.list_applications().await {
                Ok(list) => {
                    set_applications.set(list);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e.user_message("Could not load your applications"))),
            }
            set_loading.set(false);
        });
    });

    let greeting = move || {
        api.user
            .get()
            .map(|u| format!("Welcome, {}", u.display_name()))
            .unwrap_or_else(|| "Welcome".to_string())
    };

    view! {
        <div class="page dashboard-page">
            <h2>{greeting}</h2>
            <p class="page-description">"Pick up where you left off or start a new application."</p>

            <a href=routes::VISA_SELECT class="btn btn-primary">"Start a new application"</a>

            <section class="applications">
                <h3>"Your applications"</h3>
                <Show
                    when=move || !loading.get()
                    fallback=|| view! { <p class="loading">"Loading applications..."</p> }
                >
                    {move || {
                        if let Some(err) = error.get() {
                            return view! {
                                <div class="form-error">
                                    <span class="status-text status-error">{err}</span>
                                </div>
                            }.into_any();
                        }
                        let list = applications.get();
                        if list.is_empty() {
                            return view! {
                                <p class="empty-state">"You haven't started an application yet."</p>
                            }.into_any();
                        }
                        view! {
                            <ul class="application-list">
                                {list.into_iter().map(|app| {
                                    let href = routes::application_detail(&app.id);
                                    let status = BadgeStatus::for_application(&app.status);
                                    let detail = match app.completion_percentage {
                                        Some(pct) => format!("{} · {}% complete", app.status, pct),
                                        None => app.status.clone(),
                                    };
                                    view! {
                                        <li class="application-item">
                                            <a href=href class="application-link">
                                                <StatusBadge label=visa_label(&app.visa_type) status=status detail=detail />
                                                <span class="application-updated">
                                                    {format!(
                                                        "Updated {}",
                                                        format_optional_timestamp(
                                                            app.updated_at.as_deref().or(app.created_at.as_deref())
                                                        )
                                                    )}
                                                </span>
                                            </a>
                                        </li>
                                    }
                                }).collect::<Vec<_>>()}
                            </ul>
                        }.into_any()
                    }}
                </Show>
            </section>
        </div>
    }
}
