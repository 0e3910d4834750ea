//! Layout Shell
//!
//! Sidebar navigation, breadcrumb header and logout for the authenticated
//! pages.

use leptos::*;
use leptos_router::*;

use rentdesk::notify::Notification;
use rentdesk::routing::{breadcrumbs, NAV_ITEMS};

use crate::state::GlobalState;

/// Sidebar + header around a page
#[component]
pub fn Layout(children: ChildrenFn) -> impl IntoView {
    view! {
        <div class="min-h-screen flex bg-gray-100 text-gray-900">
            <Sidebar />
            <div class="flex-1 flex flex-col">
                <Header />
                <main class="flex-1 p-6">{children()}</main>
            </div>
        </div>
    }
}

#[component]
fn Sidebar() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let logout = move |_| {
        state.logout();
        state.notify(Notification::logged_out());
    };

    view! {
        <aside class="w-60 bg-gray-900 text-gray-100 flex flex-col">
            <A href="/dashboard" class="flex items-center space-x-3 px-6 h-16 border-b border-gray-800">
                <span class="text-2xl">"🏘"</span>
                <span class="text-xl font-bold">"RentDesk"</span>
            </A>

            <nav class="flex-1 py-4 space-y-1">
                {NAV_ITEMS.iter().map(|item| view! {
                    <A
                        href=item.path
                        class="flex items-center space-x-3 px-6 py-2 text-gray-300 hover:text-white hover:bg-gray-800 transition-colors"
                        active_class="bg-gray-800 text-white"
                    >
                        <span>{item.icon}</span>
                        <span>{item.label}</span>
                    </A>
                }).collect_view()}
            </nav>

            <button
                on:click=logout
                class="m-4 px-4 py-2 rounded-lg bg-gray-800 hover:bg-red-600 transition-colors"
            >
                "Logout"
            </button>
        </aside>
    }
}

#[component]
fn Header() -> impl IntoView {
    let location = use_location();

    view! {
        <header class="h-16 bg-white border-b border-gray-200 flex items-center px-6">
            <ol class="flex items-center space-x-2 text-sm text-gray-500">
                {move || {
                    let trail = breadcrumbs(&location.pathname.get());
                    let last = trail.len().saturating_sub(1);
                    trail.into_iter().enumerate().map(|(i, (label, href))| {
                        if i == last {
                            view! { <li class="font-semibold text-gray-900">{label}</li> }.into_view()
                        } else {
                            view! {
                                <li><A href=href class="hover:text-gray-900">{label}</A></li>
                                <li>"/"</li>
                            }.into_view()
                        }
                    }).collect_view()
                }}
            </ol>
        </header>
    }
}
