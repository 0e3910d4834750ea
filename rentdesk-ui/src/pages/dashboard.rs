//! Dashboard Page
//!
//! Portfolio totals, the monthly income vs expense chart, recent activity
//! and shortcuts to the add forms.

use leptos::*;
use leptos_router::*;

use rentdesk::models::{format_money, Activity, ActivityKind, DashboardSummary};
use rentdesk::notify::Notification;
use rentdesk::routing::QUICK_ACTIONS;

use crate::api;
use crate::components::{CardSkeleton, Chart};
use crate::state::GlobalState;

#[component]
pub fn Dashboard() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let summary = create_rw_signal(None::<DashboardSummary>);

    spawn_local(async move {
        match api::fetch_dashboard().await {
            Ok(data) => summary.set(Some(data)),
            Err(e) => state.report(
                Notification::request_failed(&e, "Failed to load dashboard."),
                &e,
            ),
        }
    });

    let chart_data = Signal::derive(move || {
        summary.with(|s| s.as_ref().map(|s| s.chart_data.clone()).unwrap_or_default())
    });

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Dashboard"</h1>
                <p class="text-gray-500 mt-1">"Overview of your rental portfolio"</p>
            </div>

            <div class="grid grid-cols-2 lg:grid-cols-4 gap-4">
                {move || match summary.get() {
                    Some(s) => view! {
                        <SummaryCard label="Total Properties" value=s.total_properties.to_string() icon="🏢" />
                        <SummaryCard label="Total Tenants" value=s.total_tenants.to_string() icon="👥" />
                        <SummaryCard label="Income" value=format_money(s.income) icon="💰" />
                        <SummaryCard label="Expenses" value=format_money(s.expenses) icon="💸" />
                    }.into_view(),
                    None => (0..4).map(|_| view! { <CardSkeleton /> }).collect_view(),
                }}
            </div>

            <div class="grid lg:grid-cols-3 gap-6">
                <section class="lg:col-span-2 bg-white rounded-xl p-6 shadow">
                    <h2 class="text-xl font-semibold mb-4">"Income vs Expenses"</h2>
                    <Chart data=chart_data />
                </section>

                <section class="bg-white rounded-xl p-6 shadow">
                    <h2 class="text-xl font-semibold mb-4">"Recent Activity"</h2>
                    {move || {
                        let activity = summary
                            .with(|s| s.as_ref().map(|s| s.recent_activity.clone()).unwrap_or_default());
                        if activity.is_empty() {
                            view! { <p class="text-gray-500">"No recent activity"</p> }.into_view()
                        } else {
                            view! {
                                <ul class="divide-y divide-gray-100">
                                    {activity.into_iter().map(|a| view! { <ActivityRow activity=a /> }).collect_view()}
                                </ul>
                            }.into_view()
                        }
                    }}
                </section>
            </div>

            <section class="bg-white rounded-xl p-6 shadow">
                <h2 class="text-xl font-semibold mb-4">"Quick Actions"</h2>
                <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                    {QUICK_ACTIONS.iter().map(|action| view! {
                        <A
                            href=action.path
                            class="flex flex-col items-center p-4 rounded-lg border border-gray-200 hover:bg-gray-50"
                        >
                            <span class="text-2xl">{action.icon}</span>
                            <span class="mt-2 text-sm font-medium">{action.label}</span>
                        </A>
                    }).collect_view()}
                </div>
            </section>
        </div>
    }
}

#[component]
fn SummaryCard(label: &'static str, value: String, icon: &'static str) -> impl IntoView {
    view! {
        <div class="bg-white rounded-xl p-4 shadow">
            <div class="flex items-center justify-between">
                <span class="text-sm text-gray-500">{label}</span>
                <span class="text-xl">{icon}</span>
            </div>
            <p class="text-2xl font-bold mt-2">{value}</p>
        </div>
    }
}

#[component]
fn ActivityRow(activity: Activity) -> impl IntoView {
    let color = match activity.kind {
        ActivityKind::Invoice => "text-green-600",
        ActivityKind::Expense => "text-red-600",
    };

    view! {
        <li class="py-3 flex items-center justify-between">
            <div>
                <p class="font-medium">{activity.title.clone()}</p>
                <p class="text-xs text-gray-500">{activity.date.clone()}</p>
            </div>
            <span class=format!("font-semibold {}", color)>
                {format!("{}{}", activity.sign(), format_money(activity.amount))}
            </span>
        </li>
    }
}
