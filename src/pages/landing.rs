use leptos::prelude::*;

use crate::routes;
use crate::state::use_api;
use crate::visa::VISA_CATALOG;

#[component]
pub fn LandingPage() -> impl IntoView {
    let api = use_api();
    let signed_in = api.token.with_untracked(|t| t.is_some());
    let (cta_href, cta_label) = if signed_in {
        (routes::DASHBOARD, "Go to your dashboard")
    } else {
        (routes::SIGNUP, "Start your application")
    };

    view! {
        <div class="page landing-page">
            <section class="hero">
                <h1>"Your US visa application, guided step by step"</h1>
                <p class="page-description">
                    "Answer plain-language questions and let our assistant prepare your USCIS forms."
                </p>
                <div class="button-row">
                    <a href=cta_href class="btn btn-primary">{cta_label}</a>
                    <Show when=move || !api.is_authenticated()>
                        <a href=routes::LOGIN class="btn btn-secondary">"I already have an account"</a>
                    </Show>
                </div>
            </section>

            <div class="card-grid">
                <div class="card">
                    <h3>"Pick your visa"</h3>
                    <p>"Compare work, study, visit, family and investor categories side by side."</p>
                </div>
                <div class="card">
                    <h3>"Track progress"</h3>
                    <p>"See how far along each application is and what is still missing."</p>
                </div>
                <div class="card">
                    <h3>"Download forms"</h3>
                    <p>"Generate pre-filled USCIS PDFs as soon as you have answered enough."</p>
                </div>
            </div>

            <section class="visa-teaser">
                <h3>"Supported visas"</h3>
                <ul class="visa-chip-list">
                    {VISA_CATALOG.iter().map(|v| view! {
                        <li class="visa-chip" title=v.summary>
                            <strong>{v.code}</strong>
                            " "
                            {v.name}
                        </li>
                    }).collect::<Vec<_>>()}
                </ul>
            </section>

            <div class="how-it-works">
                <h3>"How It Works"</h3>
                <div class="steps">
                    <div class="step">
                        <span class="step-number">"1"</span>
                        <div class="step-content">
                            <strong>"Create an account"</strong>
                            <p>"Your progress is saved so you can come back any time"</p>
                        </div>
                    </div>
                    <div class="step">
                        <span class="step-number">"2"</span>
                        <div class="step-content">
                            <strong>"Answer questions"</strong>
                            <p>"We only ask what your visa category needs"</p>
                        </div>
                    </div>
                    <div class="step">
                        <span class="step-number">"3"</span>
                        <div class="step-content">
                            <strong>"Get your forms"</strong>
                            <p>"Download the completed PDF and review it before filing"</p>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
