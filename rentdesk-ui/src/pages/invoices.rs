//! Invoices Page
//!
//! Invoices joined with tenant and property names, status tags and
//! receipts for paid invoices.

use leptos::*;

use rentdesk::models::{
    format_money, EnrichedInvoice, Invoice, InvoiceDraft, InvoiceStatus, Property, Tenant,
};
use rentdesk::notify::Notification;
use rentdesk::receipt::Receipt;

use crate::components::{
    random_receipt_number, Field, FormButtons, Loading, Modal, PageHeader, ReceiptModal,
    SelectField,
};
use crate::state::{use_lookup, use_records, FormMode, GlobalState, Records};

#[component]
pub fn Invoices() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let records = use_records::<Invoice>();
    let tenants = use_lookup::<Tenant>();
    let properties = use_lookup::<Property>();
    let receipt = create_rw_signal(None::<Receipt>);

    let rows = create_memo(move |_| {
        let invoices = records.items.get();
        tenants.with(|t| properties.with(|p| EnrichedInvoice::enrich_all(invoices, t, p)))
    });

    let open_receipt = move |invoice: &EnrichedInvoice| {
        let today = chrono::Local::now().date_naive();
        match Receipt::for_invoice(invoice, random_receipt_number(), today) {
            Ok(r) => receipt.set(Some(r)),
            Err(e) => state.notify(Notification::warning("Receipt unavailable").with_description(e.to_string())),
        }
    };

    view! {
        <div class="space-y-6">
            <PageHeader
                title="Invoices"
                subtitle="Rent billed to your tenants"
                add_label="+ Add Invoice"
                on_add=move |_| records.open_create()
            />

            {move || records.form.get().map(|_| view! { <InvoiceForm records=records tenants=tenants /> })}

            {move || receipt.get().map(|r| view! {
                <ReceiptModal receipt=r on_close=move |_| receipt.set(None) />
            })}

            <div class="bg-white rounded-xl shadow overflow-x-auto">
                <table class="min-w-full divide-y divide-gray-200">
                    <thead class="bg-gray-50">
                        <tr>
                            {["Tenant", "Property", "Amount", "Due Date", "Status", "Paid Date", ""]
                                .into_iter()
                                .map(|h| view! {
                                    <th class="px-4 py-3 text-left text-xs font-semibold uppercase text-gray-500">{h}</th>
                                })
                                .collect_view()}
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-gray-100">
                        {move || rows.get().into_iter().map(|row| {
                            let id = row.invoice.id;
                            let paid = row.invoice.is_paid();
                            let for_receipt = row.clone();
                            view! {
                                <tr class="hover:bg-gray-50">
                                    <td class="px-4 py-3 font-medium">{row.tenant_name.clone()}</td>
                                    <td class="px-4 py-3">{row.property_name.clone()}</td>
                                    <td class="px-4 py-3">{format_money(row.invoice.amount)}</td>
                                    <td class="px-4 py-3">{row.invoice.due_date.to_string()}</td>
                                    <td class="px-4 py-3"><StatusTag status=row.invoice.status /></td>
                                    <td class="px-4 py-3">
                                        {row.invoice.paid_date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())}
                                    </td>
                                    <td class="px-4 py-3 text-right space-x-2 whitespace-nowrap">
                                        {paid.then(|| view! {
                                            <button
                                                on:click=move |_| open_receipt(&for_receipt)
                                                class="text-green-600 hover:underline"
                                            >
                                                "Receipt"
                                            </button>
                                        })}
                                        <button on:click=move |_| records.open_edit(id) class="text-blue-600 hover:underline">
                                            "Edit"
                                        </button>
                                        <button on:click=move |_| records.delete(id) class="text-red-600 hover:underline">
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
                        view! { <p class="text-center text-gray-500 py-8">"No invoices yet."</p> }.into_view()
                    } else {
                        ().into_view()
                    }
                }}
            </div>
        </div>
    }
}

#[component]
fn StatusTag(status: InvoiceStatus) -> impl IntoView {
    let color = match status {
        InvoiceStatus::Paid => "bg-green-100 text-green-700",
        InvoiceStatus::Pending => "bg-yellow-100 text-yellow-700",
        InvoiceStatus::Overdue => "bg-red-100 text-red-700",
    };

    view! {
        <span class=format!("px-2 py-0.5 rounded-full text-xs font-semibold {}", color)>
            {status.label()}
        </span>
    }
}

#[component]
fn InvoiceForm(records: Records<Invoice>, tenants: RwSignal<Vec<Tenant>>) -> impl IntoView {
    let initial = records.initial();
    let field = |f: fn(&InvoiceDraft) -> String| {
        create_rw_signal(initial.as_ref().map(f).unwrap_or_default())
    };
    let tenant_id = field(|d| d.tenant_id.to_string());
    let amount = field(|d| d.amount.to_string());
    let due_date = field(|d| d.due_date.to_string());
    let status = create_rw_signal(
        initial
            .as_ref()
            .map(|d| d.status)
            .unwrap_or_default()
            .as_str()
            .to_string(),
    );
    let paid_date = field(|d| d.paid_date.map(|p| p.to_string()).unwrap_or_default());

    let tenant_options = Signal::derive(move || {
        tenants.with(|list| {
            list.iter()
                .map(|t| (t.id.to_string(), t.full_name.clone()))
                .collect::<Vec<_>>()
        })
    });
    let status_options = Signal::derive(|| {
        InvoiceStatus::ALL
            .iter()
            .map(|s| (s.as_str().to_string(), s.label().to_string()))
            .collect::<Vec<_>>()
    });

    let editing = matches!(records.form.get_untracked(), Some(FormMode::Edit(_)));
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        records.submit(InvoiceDraft::from_form(
            &tenant_id.get_untracked(),
            &amount.get_untracked(),
            &due_date.get_untracked(),
            &status.get_untracked(),
            &paid_date.get_untracked(),
        ));
    };

    view! {
        <Modal title=if editing { "Edit Invoice" } else { "Add Invoice" } on_close=move |_| records.close()>
            <form on:submit=on_submit class="space-y-4">
                <SelectField label="Tenant" value=tenant_id options=tenant_options placeholder="Select a tenant" />
                <Field label="Amount" value=amount input_type="number" />
                <Field label="Due Date" value=due_date input_type="date" />
                <SelectField label="Status" value=status options=status_options placeholder="Select a status" />
                {move || (status.get() == InvoiceStatus::Paid.as_str()).then(|| view! {
                    <Field label="Paid Date" value=paid_date input_type="date" />
                })}
                <FormButtons
                    on_cancel=move |_| records.close()
                    submitting=records.submitting
                    label=if editing { "Update" } else { "Add" }
                />
            </form>
        </Modal>
    }
}
