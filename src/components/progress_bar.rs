use leptos::prelude::*;

use crate::session::FORM_GENERATION_THRESHOLD;

#[component]
pub fn ProgressBar(
    /// Completion, 0-100
    percentage: u8,
    #[prop(optional, into)] label: Option<String>,
) -> impl IntoView {
    let pct = percentage.min(100);
    let fill_class = if pct >= 100 {
        "progress-fill progress-done"
    } else if pct >= FORM_GENERATION_THRESHOLD {
        "progress-fill progress-ready"
    } else {
        "progress-fill"
    };

    view! {
        <div class="progress">
            <div class="progress-header">
                <span class="progress-label">{label.unwrap_or_else(|| "Progress".to_string())}</span>
                <span class="progress-value">{format!("{}%", pct)}</span>
            </div>
            <div
                class="progress-track"
                role="progressbar"
                aria-valuemin="0"
                aria-valuemax="100"
                aria-valuenow=pct.to_string()
            >
                <div class=fill_class style:width=format!("{}%", pct)></div>
            </div>
        </div>
    }
}
