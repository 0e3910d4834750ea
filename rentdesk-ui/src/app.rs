//! App Root Component
//!
//! Router, route guards and global providers.

use leptos::*;
use leptos_router::*;

use rentdesk::routing::{guard, GuardDecision, Route as AppRoute};

use crate::components::{Layout, Toast};
use crate::pages::{Admin, Dashboard, Expenses, Invoices, Login, Properties, Register, Tenants};
use crate::state::{provide_global_state, GlobalState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();

    view! {
        <Router>
            <Routes>
                <Route path="/login" view=|| view! { <Guarded route=AppRoute::Login><Login /></Guarded> } />
                <Route path="/register" view=|| view! { <Guarded route=AppRoute::Register><Register /></Guarded> } />
                <Route path="/admin" view=|| view! { <Guarded route=AppRoute::Admin><Admin /></Guarded> } />
                <Route path="/dashboard" view=|| view! { <Shell route=AppRoute::Dashboard><Dashboard /></Shell> } />
                <Route path="/properties" view=|| view! { <Shell route=AppRoute::Properties><Properties /></Shell> } />
                <Route path="/tenants" view=|| view! { <Shell route=AppRoute::Tenants><Tenants /></Shell> } />
                <Route path="/invoices" view=|| view! { <Shell route=AppRoute::Invoices><Invoices /></Shell> } />
                <Route path="/expenses" view=|| view! { <Shell route=AppRoute::Expenses><Expenses /></Shell> } />
                <Route path="/*any" view=Fallback />
            </Routes>
            <Toast />
        </Router>
    }
}

/// Render `children` only when the guard allows `route` for the current
/// session; otherwise redirect. Re-evaluated on login and logout.
#[component]
fn Guarded(route: AppRoute, children: ChildrenFn) -> impl IntoView {
    let state = expect_context::<GlobalState>();

    move || match state.session.with(|s| guard(s.as_ref(), &route)) {
        GuardDecision::Render(_) => children().into_view(),
        redirect => {
            let path = redirect.target().path().to_string();
            view! { <Redirect path=path /> }.into_view()
        }
    }
}

/// Guarded page inside the sidebar layout
#[component]
fn Shell(route: AppRoute, children: ChildrenFn) -> impl IntoView {
    view! {
        <Guarded route=route>
            <Layout children=children.clone() />
        </Guarded>
    }
}

/// Any other path: the guard picks the user's home (or login)
#[component]
fn Fallback() -> impl IntoView {
    let location = use_location();
    let route = AppRoute::from_path(&location.pathname.get_untracked());

    view! {
        <Guarded route=route>
            <NotFound />
        </Guarded>
    }
}

/// Never shown in practice: unknown paths always redirect
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <A href="/login" class="px-6 py-3 bg-blue-600 text-white rounded-lg font-medium">
                "Go to Login"
            </A>
        </div>
    }
}
