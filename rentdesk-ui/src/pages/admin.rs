//! Admin Panel
//!
//! Accounts awaiting approval, with search, sortable columns and
//! approve/deny actions. Administrators land here instead of the dashboard.

use leptos::*;

use rentdesk::listing::{visible, PendingUserColumn, SortConfig};
use rentdesk::models::{PendingUser, RecordId};
use rentdesk::notify::Notification;
use rentdesk::ApiResult;

use crate::api;
use crate::components::{Loading, SearchBox, SortHeader};
use crate::state::GlobalState;

#[component]
pub fn Admin() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    let users = create_rw_signal(Vec::<PendingUser>::new());
    let loading = create_rw_signal(true);
    let search = create_rw_signal(String::new());
    let sort = create_rw_signal(Some(SortConfig::<PendingUserColumn>::default()));

    let fetch = move || {
        loading.set(true);
        spawn_local(async move {
            match api::fetch_pending_users().await {
                Ok(list) => users.set(list),
                Err(e) => state.report(
                    Notification::request_failed(&e, "Failed to fetch pending users."),
                    &e,
                ),
            }
            loading.set(false);
        });
    };
    fetch();

    let decide = move |id: RecordId, approve: bool| {
        spawn_local(async move {
            let result: ApiResult<()> = if approve {
                api::approve_user(id).await
            } else {
                api::deny_user(id).await
            };
            match result {
                Ok(()) => {
                    let message = if approve { "User approved." } else { "User denied." };
                    state.notify(Notification::success(message));
                    fetch();
                }
                Err(e) => {
                    let what = if approve { "Failed to approve user." } else { "Failed to deny user." };
                    state.report(Notification::request_failed(&e, what), &e);
                }
            }
        });
    };

    let rows = create_memo(move |_| {
        users.with(|list| visible(list, sort.get().as_ref(), &search.get()))
    });

    let logout = move |_| {
        state.logout();
        state.notify(Notification::logged_out());
    };

    view! {
        <div class="min-h-screen bg-gray-100 text-gray-900">
            <header class="h-16 bg-gray-900 text-white flex items-center justify-between px-6">
                <div class="flex items-center space-x-3">
                    <span class="text-2xl">"🏘"</span>
                    <span class="text-xl font-bold">"RentDesk Admin Panel"</span>
                </div>
                <button on:click=logout class="px-4 py-2 rounded-lg bg-gray-800 hover:bg-red-600 transition-colors">
                    "Logout"
                </button>
            </header>

            <main class="p-6 space-y-6">
                <div class="flex items-center justify-between">
                    <div>
                        <h1 class="text-3xl font-bold">"Pending Users"</h1>
                        <p class="text-gray-500 mt-1">"Accounts waiting for your approval"</p>
                    </div>
                    <SearchBox value=search placeholder="Search by email..." />
                </div>

                <div class="bg-white rounded-xl shadow overflow-x-auto">
                    <table class="min-w-full divide-y divide-gray-200">
                        <thead class="bg-gray-50">
                            <tr>
                                {PendingUserColumn::ALL.into_iter().map(|column| view! {
                                    <SortHeader label=column.label() key=column sort=sort />
                                }).collect_view()}
                                <th class="px-4 py-3" />
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-gray-100">
                            {move || rows.get().into_iter().map(|user| {
                                let id = user.id;
                                view! {
                                    <tr class="hover:bg-gray-50">
                                        <td class="px-4 py-3">{user.id}</td>
                                        <td class="px-4 py-3 font-medium">{user.email}</td>
                                        <td class="px-4 py-3">{user.date_requested.format("%Y-%m-%d %H:%M").to_string()}</td>
                                        <td class="px-4 py-3 text-right space-x-2 whitespace-nowrap">
                                            <button
                                                on:click=move |_| decide(id, true)
                                                class="px-3 py-1 rounded bg-green-600 hover:bg-green-700 text-white text-sm"
                                            >
                                                "Approve"
                                            </button>
                                            <button
                                                on:click=move |_| decide(id, false)
                                                class="px-3 py-1 rounded bg-red-600 hover:bg-red-700 text-white text-sm"
                                            >
                                                "Deny"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }).collect_view()}
                        </tbody>
                    </table>
                    {move || {
                        if loading.get() && users.with(Vec::is_empty) {
                            view! { <Loading /> }.into_view()
                        } else if rows.with(Vec::is_empty) {
                            view! { <p class="text-center text-gray-500 py-8">"No pending users."</p> }.into_view()
                        } else {
                            ().into_view()
                        }
                    }}
                </div>
            </main>
        </div>
    }
}
