use leptos::prelude::*;

use crate::visa::VisaInfo;

#[component]
pub fn VisaCard(
    info: &'static VisaInfo,
    #[prop(into)] on_select: Callback<String>,
    #[prop(default = false)] selected: bool,
) -> impl IntoView {
    let class = if selected {
        "visa-card visa-card-selected"
    } else {
        "visa-card"
    };
    let code = info.code.to_string();

    view! {
        <div class=class on:click=move |_| on_select.run(code.clone())>
            <div class="visa-card-header">
                <span class="visa-code">{info.code}</span>
                <span class="visa-category">{info.category.label()}</span>
            </div>
            <h3 class="visa-name">{info.name}</h3>
            <p class="visa-summary">{info.summary}</p>
            <ul class="visa-requirements">
                {info.requirements.iter().map(|&r| view! { <li>{r}</li> }).collect::<Vec<_>>()}
            </ul>
            <div class="visa-card-footer">
                <span class="spec-label">"Typical processing"</span>
                <span class="spec-value">{info.processing_time}</span>
            </div>
        </div>
    }
}
