use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;

use crate::components::navbar::Navbar;
use crate::components::require_auth::RequireAuth;
use crate::config::AppConfig;
use crate::pages::application_detail::ApplicationDetailPage;
use crate::pages::dashboard::DashboardPage;
use crate::pages::landing::LandingPage;
use crate::pages::login::LoginPage;
use crate::pages::signup::SignupPage;
use crate::pages::visa_select::VisaSelectPage;
use crate::session::SessionContext;
use crate::state::ApiContext;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    provide_context(ApiContext::load(&config));
    provide_context(SessionContext::new());

    view! {
        <Router>
            <div class="app-layout">
                <Navbar />
                <main class="content">
                    <Routes fallback=|| view! { <p>"Page not found"</p> }>
                        <Route path=path!("/") view=LandingPage />
                        <Route path=path!("/login") view=LoginPage />
                        <Route path=path!("/signup") view=SignupPage />
                        <Route
                            path=path!("/dashboard")
                            view=|| view! { <RequireAuth><DashboardPage /></RequireAuth> }
                        />
                        <Route
                            path=path!("/visa-select")
                            view=|| view! { <RequireAuth><VisaSelectPage /></RequireAuth> }
                        />
                        <Route
                            path=path!("/applications/:id")
                            view=|| view! { <RequireAuth><ApplicationDetailPage /></RequireAuth> }
                        />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
