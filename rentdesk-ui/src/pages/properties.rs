//! Properties Page
//!
//! Property cards with add, edit and delete.

use leptos::*;

use rentdesk::models::{Property, PropertyDraft};

use crate::components::{Field, FormButtons, Loading, Modal, PageHeader};
use crate::state::{use_records, FormMode, Records};

#[component]
pub fn Properties() -> impl IntoView {
    let records = use_records::<Property>();

    view! {
        <div class="space-y-6">
            <PageHeader
                title="Properties"
                subtitle="Buildings and units you manage"
                add_label="+ Add Property"
                on_add=move |_| records.open_create()
            />

            {move || records.form.get().map(|_| view! { <PropertyForm records=records /> })}

            {move || {
                if records.loading.get() && records.items.with(Vec::is_empty) {
                    return view! { <Loading /> }.into_view();
                }
                let items = records.items.get();
                if items.is_empty() {
                    view! {
                        <p class="text-center text-gray-500 py-12">"No properties yet. Add your first one!"</p>
                    }.into_view()
                } else {
                    view! {
                        <div class="grid md:grid-cols-2 lg:grid-cols-3 gap-4">
                            {items.into_iter().map(|p| view! { <PropertyCard property=p records=records /> }).collect_view()}
                        </div>
                    }.into_view()
                }
            }}
        </div>
    }
}

#[component]
fn PropertyCard(property: Property, records: Records<Property>) -> impl IntoView {
    let id = property.id;

    view! {
        <div class="bg-white rounded-xl p-5 shadow">
            <h3 class="text-lg font-semibold">{property.name}</h3>
            <p class="text-gray-500 text-sm mt-1">{property.address}</p>
            <p class="mt-3 text-sm">
                <span class="font-semibold">{property.total_units}</span>
                " units"
            </p>
            <div class="flex space-x-2 mt-4">
                <button
                    on:click=move |_| records.open_edit(id)
                    class="px-3 py-1 text-sm rounded bg-gray-100 hover:bg-gray-200"
                >
                    "Edit"
                </button>
                <button
                    on:click=move |_| records.delete(id)
                    class="px-3 py-1 text-sm rounded bg-red-50 text-red-600 hover:bg-red-100"
                >
                    "Delete"
                </button>
            </div>
        </div>
    }
}

#[component]
fn PropertyForm(records: Records<Property>) -> impl IntoView {
    let initial = records.initial();
    let name = create_rw_signal(initial.as_ref().map(|d| d.name.clone()).unwrap_or_default());
    let address = create_rw_signal(initial.as_ref().map(|d| d.address.clone()).unwrap_or_default());
    let units = create_rw_signal(
        initial
            .as_ref()
            .map(|d| d.total_units.to_string())
            .unwrap_or_default(),
    );

    let editing = matches!(records.form.get_untracked(), Some(FormMode::Edit(_)));
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        records.submit(PropertyDraft::from_form(
            &name.get_untracked(),
            &address.get_untracked(),
            &units.get_untracked(),
        ));
    };

    view! {
        <Modal title=if editing { "Edit Property" } else { "Add Property" } on_close=move |_| records.close()>
            <form on:submit=on_submit class="space-y-4">
                <Field label="Name" value=name placeholder="e.g., Apartment A" />
                <Field label="Address" value=address />
                <Field label="Total Units" value=units input_type="number" />
                <FormButtons
                    on_cancel=move |_| records.close()
                    submitting=records.submitting
                    label=if editing { "Update" } else { "Add" }
                />
            </form>
        </Modal>
    }
}
