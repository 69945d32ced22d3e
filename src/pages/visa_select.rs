use leptos::prelude::*;
use leptos_router::components::Redirect;
use wasm_bindgen_futures::spawn_local;

use crate::components::visa_card::VisaCard;
use crate::state::use_api;
use crate::visa::{self, find_visa, visas_in, VisaCategory, VisaInfo, VISA_CATALOG};

const CATEGORIES: [VisaCategory; 5] = [
    VisaCategory::Work,
    VisaCategory::Study,
    VisaCategory::Visit,
    VisaCategory::Family,
    VisaCategory::Investment,
];

/// Two-step wizard: choose a visa type, then confirm to create the application.
#[component]
pub fn VisaSelectPage() -> impl IntoView {
    let api = use_api();

    let (category, set_category) = signal::<Option<VisaCategory>>(None);
    let (selected, set_selected) = signal::<Option<String>>(None);
    let (confirming, set_confirming) = signal(false);
    let (is_creating, set_is_creating) = signal(false);
    let (error_message, set_error_message) = signal::<Option<String>>(None);
    let (created_route, set_created_route) = signal::<Option<String>>(None);

    let create = move |_| {
        let Some(code) = selected.get_untracked() else {
            set_error_message.set(Some("Please choose a visa type".to_string()));
            return;
        };
        let client = api.client();

        set_is_creating.set(true);
        set_error_message.set(None);
        spawn_local(async move {
            match visa::start_application(&client, &code).await {
                Ok(route) => set_created_route.set(Some(route)),
                Err(e) => {
                    set_error_message.set(Some(e));
                    set_is_creating.set(false);
                }
            }
        });
    };

    view! {
        <div class="page visa-select-page">
            {move || created_route.get().map(|path| view! { <Redirect path=path /> })}

            <h2>"Choose your visa"</h2>
            <p class="page-description">
                "Not sure which one fits? Filter by what you plan to do in the US."
            </p>

            <Show
                when=move || confirming.get()
                fallback=move || view! {
                    <div class="category-tabs">
                        <button
                            class=move || if category.get().is_none() { "tab tab-active" } else { "tab" }
                            on:click=move |_| set_category.set(None)
                        >
                            "All"
                        </button>
                        {CATEGORIES.iter().map(|&c| view! {
                            <button
                                class=move || if category.get() == Some(c) { "tab tab-active" } else { "tab" }
                                on:click=move |_| set_category.set(Some(c))
                            >
                                {c.label()}
                            </button>
                        }).collect::<Vec<_>>()}
                    </div>

                    <div class="card-grid">
                        {move || {
                            let current = selected.get();
                            let visas: Vec<&'static VisaInfo> = match category.get() {
                                Some(c) => visas_in(c).collect(),
                                None => VISA_CATALOG.iter().collect(),
                            };
                            visas
                                .into_iter()
                                .map(|info| view! {
                                    <VisaCard
                                        info=info
                                        selected=current.as_deref() == Some(info.code)
                                        on_select=move |code: String| set_selected.set(Some(code))
                                    />
                                })
                                .collect::<Vec<_>>()
                        }}
                    </div>

                    <button
                        class="btn btn-primary"
                        disabled=move || selected.get().is_none()
                        on:click=move |_| set_confirming.set(true)
                    >
                        "Continue"
                    </button>
                }
            >
                {move || selected.get().and_then(|code| find_visa(&code)).map(|info| view! {
                    <div class="visa-confirm card">
                        <h3>{format!("{} - {}", info.code, info.name)}</h3>
                        <p>{info.summary}</p>
                        <p class="hint">{format!("Typical processing time: {}", info.processing_time)}</p>
                    </div>
                })}

                {move || error_message.get().map(|e| view! {
                    <div class="form-error">
                        <span class="status-text status-error">{e}</span>
                    </div>
                })}

                <div class="button-row">
                    <button
                        class="btn btn-secondary"
                        on:click=move |_| set_confirming.set(false)
                        disabled=move || is_creating.get()
                    >
                        "Back"
                    </button>
                    <button
                        class="btn btn-primary"
                        on:click=create
                        disabled=move || is_creating.get()
                    >
                        {move || if is_creating.get() { "Creating..." } else { "Start application" }}
                    </button>
                </div>
            </Show>
        </div>
    }
}
