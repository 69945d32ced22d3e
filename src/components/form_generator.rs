use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::types::GeneratedForm;
use crate::components::status_badge::{BadgeStatus, StatusBadge};
use crate::format::format_optional_timestamp;
use crate::forms::{self, BrowserDownload};
use crate::session::{SessionContext, FORM_GENERATION_THRESHOLD};
use crate::state::use_api;
use crate::visa::visa_label;

/// Generates the USCIS form for the current session and downloads it.
///
/// Reads the session from `SessionContext`; disabled until the session
/// reaches the generation threshold.
#[component]
pub fn FormGenerator() -> impl IntoView {
    let api = use_api();
    let session_ctx = expect_context::<SessionContext>();

    let (is_generating, set_is_generating) = signal(false);
    let (is_downloading, set_is_downloading) = signal(false);
    let (form, set_form) = signal::<Option<GeneratedForm>>(None);
    let (saved_as, set_saved_as) = signal::<Option<String>>(None);
    let (error_message, set_error_message) = signal::<Option<String>>(None);

    let ready = move || {
        session_ctx
            .session
            .with(|s| s.as_ref().map(|s| s.can_generate_form()).unwrap_or(false))
    };

    let generate = move |_| {
        let Some(session) = session_ctx.session.get_untracked() else {
            return;
        };
        let client = api.client();
        set_is_generating.set(true);
        set_error_message.set(None);
        set_form.set(None);
        set_saved_as.set(None);
        spawn_local(async move {
            match forms::generate_form(&client, &session).await {
                Ok(generated) => set_form.set(Some(generated)),
                Err(e) => set_error_message.set(Some(e)),
            }
            set_is_generating.set(false);
        });
    };

    let download = move |_| {
        let Some(generated) = form.get_untracked() else {
            return;
        };
        let client = api.client();
        set_is_downloading.set(true);
        set_error_message.set(None);
        spawn_local(async move {
            match forms::download_form(&client, &BrowserDownload, &generated).await {
                Ok(filename) => set_saved_as.set(Some(filename)),
                Err(e) => set_error_message.set(Some(e)),
            }
            set_is_downloading.set(false);
        });
    };

    let discard = move |_| {
        set_form.set(None);
        set_saved_as.set(None);
        set_error_message.set(None);
    };

    view! {
        <section class="form-generator">
            <h3>"USCIS Form"</h3>
            <p class="section-description">
                "Generate the official form pre-filled with your answers."
            </p>

            <button
                class="btn btn-primary"
                on:click=generate
                disabled=move || is_generating.get() || !ready()
            >
                {move || if is_generating.get() { "Generating..." } else { "Generate Form" }}
            </button>

            <Show when=move || !ready()>
                <p class="hint">
                    {move || format!(
                        "Complete at least {}% of your application to unlock form generation ({}% so far).",
                        FORM_GENERATION_THRESHOLD,
                        session_ctx.progress(),
                    )}
                </p>
            </Show>

            {move || error_message.get().map(|e| view! {
                <div class="form-error">
                    <span class="status-text status-error">{e}</span>
                </div>
            })}

            {move || form.get().map(|f| {
                let status = BadgeStatus::for_completion(f.completion_percentage);
                let detail = format!("{}% complete", f.completion_percentage);
                view! {
                    <div class="generated-form">
                        <StatusBadge label=format!("Form {}", f.form_type) status=status detail=detail />
                        <dl class="form-meta">
                            <dt>"Visa"</dt>
                            <dd>{visa_label(&f.visa_type)}</dd>
                            <dt>"Generated"</dt>
                            <dd>{format_optional_timestamp(f.generated_at.as_deref())}</dd>
                            <dt>"Reference"</dt>
                            <dd>{f.form_id.clone()}</dd>
                        </dl>
                        <div class="button-row">
                            <button
                                class="btn btn-primary"
                                on:click=download
                                disabled=move || is_downloading.get()
                            >
                                {move || if is_downloading.get() { "Downloading..." } else { "Download PDF" }}
                            </button>
                            <button class="btn btn-secondary" on:click=discard>"Discard"</button>
                        </div>
                    </div>
                }
            })}

            {move || saved_as.get().map(|name| view! {
                <span class="status-text status-saved">{format!("Saved as {}", name)}</span>
            })}
        </section>
    }
}
