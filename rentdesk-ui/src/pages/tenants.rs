//! Tenants Page
//!
//! Searchable, sortable tenant table with a details panel.

use leptos::*;

use rentdesk::listing::{visible, SortConfig, TenantColumn};
use rentdesk::models::{format_money, Property, Tenant, TenantDraft, NOT_AVAILABLE};

use crate::components::{
    Field, FormButtons, Loading, Modal, PageHeader, SearchBox, SelectField, SortHeader,
};
use crate::state::{use_lookup, use_records, FormMode, Records};

#[component]
pub fn Tenants() -> impl IntoView {
    let records = use_records::<Tenant>();
    let properties = use_lookup::<Property>();

    let search = create_rw_signal(String::new());
    let sort = create_rw_signal(None::<SortConfig<TenantColumn>>);
    let selected = create_rw_signal(None::<Tenant>);

    let rows = create_memo(move |_| {
        records
            .items
            .with(|items| visible(items, sort.get().as_ref(), &search.get()))
    });

    let property_name = move |id| {
        properties.with(|list| {
            list.iter()
                .find(|p: &&Property| p.id == id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        })
    };

    view! {
        <div class="space-y-6">
            <PageHeader
                title="Tenants"
                subtitle="People renting your units"
                add_label="+ Add Tenant"
                on_add=move |_| records.open_create()
            />

            {move || records.form.get().map(|_| view! { <TenantForm records=records properties=properties /> })}

            <SearchBox value=search placeholder="Search by name..." />

            <div class="grid lg:grid-cols-3 gap-6">
                <div class="lg:col-span-2 bg-white rounded-xl shadow overflow-x-auto">
                    <table class="min-w-full divide-y divide-gray-200">
                        <thead class="bg-gray-50">
                            <tr>
                                <SortHeader label=TenantColumn::Name.label() key=TenantColumn::Name sort=sort />
                                <th class="px-4 py-3 text-left text-xs font-semibold uppercase text-gray-500">"Phone"</th>
                                <th class="px-4 py-3 text-left text-xs font-semibold uppercase text-gray-500">"Property"</th>
                                <SortHeader label=TenantColumn::StartDate.label() key=TenantColumn::StartDate sort=sort />
                                <SortHeader label=TenantColumn::Rent.label() key=TenantColumn::Rent sort=sort />
                                <th class="px-4 py-3" />
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-gray-100">
                            {move || rows.get().into_iter().map(|tenant| {
                                let id = tenant.id;
                                let for_details = tenant.clone();
                                view! {
                                    <tr
                                        on:click=move |_| selected.set(Some(for_details.clone()))
                                        class="hover:bg-gray-50 cursor-pointer"
                                    >
                                        <td class="px-4 py-3 font-medium">{tenant.full_name.clone()}</td>
                                        <td class="px-4 py-3">{tenant.phone.clone()}</td>
                                        <td class="px-4 py-3">{property_name(tenant.property_id)}</td>
                                        <td class="px-4 py-3">{tenant.start_date.to_string()}</td>
                                        <td class="px-4 py-3">{format_money(tenant.rent_amount)}</td>
                                        <td class="px-4 py-3 text-right space-x-2 whitespace-nowrap">
                                            <button
                                                on:click=move |ev| { ev.stop_propagation(); records.open_edit(id) }
                                                class="text-blue-600 hover:underline"
                                            >
                                                "Edit"
                                            </button>
                                            <button
                                                on:click=move |ev| {
                                                    ev.stop_propagation();
                                                    if selected.with_untracked(|s| s.as_ref().map(|t| t.id) == Some(id)) {
                                                        selected.set(None);
                                                    }
                                                    records.delete(id)
                                                }
                                                class="text-red-600 hover:underline"
                                            >
                                                "Delete"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }).collect_view()}
                        </tbody>
                    </table>
                    {move || {
                        if records.loading.get() && records.items.with(Vec::is_empty) {
                            view! { <Loading /> }.into_view()
                        } else if rows.with(Vec::is_empty) {
                            view! { <p class="text-center text-gray-500 py-8">"No tenants found."</p> }.into_view()
                        } else {
                            ().into_view()
                        }
                    }}
                </div>

                <TenantDetails selected=selected property_name=Callback::new(property_name) />
            </div>
        </div>
    }
}

#[component]
fn TenantDetails(selected: RwSignal<Option<Tenant>>, property_name: Callback<i64, String>) -> impl IntoView {
    view! {
        <aside class="bg-white rounded-xl shadow p-6">
            <h2 class="text-lg font-semibold mb-4">"Tenant Details"</h2>
            {move || match selected.get() {
                None => view! {
                    <p class="text-gray-500">"Select a tenant to see their details."</p>
                }.into_view(),
                Some(tenant) => {
                    let rows = [
                        ("Full Name", tenant.full_name.clone()),
                        ("Phone", tenant.phone.clone()),
                        ("Address", tenant.address.clone()),
                        ("Property", property_name.call(tenant.property_id)),
                        ("Start Date", tenant.start_date.to_string()),
                        ("Rent", format_money(tenant.rent_amount)),
                    ];
                    view! {
                        <dl class="space-y-3">
                            {rows.into_iter().map(|(label, value)| view! {
                                <div>
                                    <dt class="text-xs uppercase text-gray-500">{label}</dt>
                                    <dd class="font-medium">{value}</dd>
                                </div>
                            }).collect_view()}
                        </dl>
                        <button
                            on:click=move |_| selected.set(None)
                            class="mt-6 px-3 py-1 text-sm rounded bg-gray-100 hover:bg-gray-200"
                        >
                            "Close"
                        </button>
                    }.into_view()
                }
            }}
        </aside>
    }
}

#[component]
fn TenantForm(records: Records<Tenant>, properties: RwSignal<Vec<Property>>) -> impl IntoView {
    let initial = records.initial();
    let field = |f: fn(&TenantDraft) -> String| {
        create_rw_signal(initial.as_ref().map(f).unwrap_or_default())
    };
    let property_id = field(|d| d.property_id.to_string());
    let full_name = field(|d| d.full_name.clone());
    let phone = field(|d| d.phone.clone());
    let address = field(|d| d.address.clone());
    let start_date = field(|d| d.start_date.to_string());
    let rent = field(|d| d.rent_amount.to_string());

    let options = Signal::derive(move || {
        properties.with(|list| {
            list.iter()
                .map(|p| (p.id.to_string(), p.name.clone()))
                .collect::<Vec<_>>()
        })
    });

    let editing = matches!(records.form.get_untracked(), Some(FormMode::Edit(_)));
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        records.submit(TenantDraft::from_form(
            &property_id.get_untracked(),
            &full_name.get_untracked(),
            &phone.get_untracked(),
            &address.get_untracked(),
            &start_date.get_untracked(),
            &rent.get_untracked(),
        ));
    };

    view! {
        <Modal title=if editing { "Edit Tenant" } else { "Add Tenant" } on_close=move |_| records.close()>
            <form on:submit=on_submit class="space-y-4">
                <SelectField label="Property" value=property_id options=options placeholder="Select a property" />
                <Field label="Full Name" value=full_name />
                <Field label="Phone" value=phone input_type="tel" />
                <Field label="Address" value=address />
                <Field label="Start Date" value=start_date input_type="date" />
                <Field label="Rent Amount" value=rent input_type="number" />
                <FormButtons
                    on_cancel=move |_| records.close()
                    submitting=records.submitting
                    label=if editing { "Update" } else { "Add" }
                />
            </form>
        </Modal>
    }
}
