use crate::config::AppConfig;
use crate::pages::{HomePage, LoginPage, NotePage, RootPage, SignupPage};
use crate::state::{AppContext, AppState};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    provide_context(AppContext(AppState::new(&config)));

    view! {
        <Router>
            <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-amber-900">"Not found"</div> }>
                <Route path=path!("") view=RootPage />
                <Route path=path!("login") view=LoginPage />
                <Route path=path!("signup") view=SignupPage />
                <Route path=path!("home") view=HomePage />
                <Route path=path!("notes/:note_id") view=NotePage />
            </Routes>
        </Router>
    }
}
