//! HttpClient against the development server on an ephemeral port

mod common;

use chrono::NaiveDate;
use std::sync::Arc;

use common::spawn_server;
use rentdesk::api::{ApiError, HttpClient, RentalApi};
use rentdesk::config::ServerConfig;
use rentdesk::crud::CrudPage;
use rentdesk::listing::{visible, SortConfig};
use rentdesk::models::{
    Credentials, EnrichedInvoice, Invoice, InvoiceDraft, InvoiceStatus, Property, PropertyDraft,
    Registration, Tenant, TenantDraft, NOT_AVAILABLE,
};
use rentdesk::notify::{Notification, NotificationLevel};
use rentdesk::receipt::{Receipt, ReceiptError};
use rentdesk::session::{FileStorage, MemoryStorage, Session, SessionContext};

const ADMIN_EMAIL: &str = "admin@rentdesk.local";
const ADMIN_PASSWORD: &str = "admin";

struct Harness {
    context: SessionContext<MemoryStorage>,
    client: Arc<HttpClient>,
}

async fn harness(config: ServerConfig) -> Harness {
    let url = spawn_server(config).await;
    let context = SessionContext::from_storage(MemoryStorage::new());
    let client = Arc::new(HttpClient::new(url, context.subscribe()).unwrap());
    Harness { context, client }
}

impl Harness {
    async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let response = self
            .client
            .login(&Credentials::new(email, password))
            .await?;
        let session = Session::from(response);
        self.context.login(session.clone()).unwrap();
        Ok(session)
    }

    /// Register, approve as admin and sign in as the new user
    async fn approved_user(&self, email: &str) -> Session {
        self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
        self.client
            .register(&Registration::new(email, "pw", "pw").unwrap())
            .await
            .unwrap();
        let pending = self.client.pending_users().await.unwrap();
        let user = pending.iter().find(|u| u.email == email).unwrap();
        self.client.approve_user(user.id).await.unwrap();

        self.context.logout().unwrap();
        self.login(email, "pw").await.unwrap()
    }
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[tokio::test]
async fn test_admin_login() {
    let h = harness(ServerConfig::default()).await;

    let session = h.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();

    assert!(session.is_admin);
    assert!(h.context.is_admin());
    assert_eq!(
        session.claims().and_then(|c| c.email).as_deref(),
        Some(ADMIN_EMAIL)
    );
    assert!(h.client.pending_users().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_bad_credentials() {
    let h = harness(ServerConfig::default()).await;

    let err = h.login(ADMIN_EMAIL, "wrong").await.unwrap_err();

    assert_eq!(err, ApiError::Unauthorized("Invalid email or password.".to_string()));
    assert!(h.context.current().is_none());
    let notification = Notification::login_failed(&err);
    assert_eq!(notification.level, NotificationLevel::Error);
}

#[tokio::test]
async fn test_pending_account_is_warned() {
    let h = harness(ServerConfig::default()).await;
    h.client
        .register(&Registration::new("new@example.com", "pw", "pw").unwrap())
        .await
        .unwrap();

    let err = h.login("new@example.com", "pw").await.unwrap_err();

    assert!(matches!(err, ApiError::Forbidden(_)));
    assert_eq!(Notification::login_failed(&err).level, NotificationLevel::Warning);
}

#[tokio::test]
async fn test_duplicate_registration_message() {
    let h = harness(ServerConfig::default()).await;

    let err = h
        .client
        .register(&Registration::new(ADMIN_EMAIL, "pw", "pw").unwrap())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(409));
    assert_eq!(err.message(), "Email is already registered.");
}

#[tokio::test]
async fn test_denied_account_cannot_log_in() {
    let h = harness(ServerConfig::default()).await;
    h.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
    for email in ["b@example.com", "a@example.com"] {
        h.client
            .register(&Registration::new(email, "pw", "pw").unwrap())
            .await
            .unwrap();
    }

    let pending = h.client.pending_users().await.unwrap();
    let by_email = visible(
        &pending,
        Some(&SortConfig::ascending(rentdesk::listing::PendingUserColumn::Email)),
        "",
    );
    assert_eq!(by_email[0].email, "a@example.com");

    let denied = pending.iter().find(|u| u.email == "b@example.com").unwrap();
    h.client.deny_user(denied.id).await.unwrap();
    assert_eq!(h.client.pending_users().await.unwrap().len(), 1);

    let err = h.login("b@example.com", "pw").await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized(_)));
}

#[tokio::test]
async fn test_user_cannot_use_admin_endpoints() {
    let h = harness(ServerConfig::default()).await;
    let session = h.approved_user("owner@example.com").await;
    assert!(!session.is_admin);

    let err = h.client.pending_users().await.unwrap_err();

    assert!(matches!(err, ApiError::Forbidden(_)));
}

#[tokio::test]
async fn test_logout_stops_authenticated_calls() {
    let h = harness(ServerConfig::default()).await;
    h.approved_user("owner@example.com").await;
    assert!(h.client.list_properties().await.is_ok());

    h.context.logout().unwrap();

    assert_eq!(
        h.client.list_properties().await.unwrap_err(),
        ApiError::NotAuthenticated
    );
}

#[tokio::test]
async fn test_records_enrichment_and_receipt() {
    let h = harness(ServerConfig::default()).await;
    h.approved_user("owner@example.com").await;
    let api: Arc<dyn RentalApi> = h.client.clone();

    let mut properties = CrudPage::<Property>::new(Arc::clone(&api));
    properties.open_create();
    properties
        .submit(PropertyDraft::from_form("Apartment A", "123 Main St", "12").unwrap())
        .await
        .unwrap();
    let property_id = properties.records()[0].id;

    let mut tenants = CrudPage::<Tenant>::new(Arc::clone(&api));
    tenants.open_create();
    tenants
        .submit(TenantDraft {
            property_id,
            full_name: "Sara Haddad".to_string(),
            phone: "555-0101".to_string(),
            address: String::new(),
            start_date: date("2024-01-01"),
            rent_amount: 850.0,
        })
        .await
        .unwrap();
    let tenant_id = tenants.records()[0].id;

    let mut invoices = CrudPage::<Invoice>::new(Arc::clone(&api));
    invoices.open_create();
    let tenant = tenant_id.to_string();
    let paid = InvoiceDraft::from_form(&tenant, "850", "2024-03-01", "paid", "2024-03-03").unwrap();
    invoices.submit(paid).await.unwrap();
    invoices.open_create();
    invoices
        .submit(InvoiceDraft::from_form(&tenant, "850", "2024-04-01", "", "").unwrap())
        .await
        .unwrap();
    assert_eq!(invoices.records().len(), 2);

    let enriched = EnrichedInvoice::enrich_all(
        invoices.records().to_vec(),
        tenants.records(),
        properties.records(),
    );
    assert_eq!(enriched[0].tenant_name, "Sara Haddad");
    assert_eq!(enriched[0].property_name, "Apartment A");

    let receipt = Receipt::for_invoice(&enriched[0], 42, date("2024-03-04")).unwrap();
    assert_eq!(receipt.file_name(), format!("receipt-{}.html", enriched[0].invoice.id));
    assert!(receipt.render_html().contains("Sara Haddad"));

    let err = Receipt::for_invoice(&enriched[1], 43, date("2024-04-02")).unwrap_err();
    assert!(matches!(err, ReceiptError::NotPaid { .. }));

    // Deleting the tenant leaves its invoices in place
    tenants.delete(tenant_id).await.unwrap();
    invoices.load().await.unwrap();
    let orphaned = EnrichedInvoice::enrich_all(
        invoices.records().to_vec(),
        tenants.records(),
        properties.records(),
    );
    assert_eq!(orphaned.len(), 2);
    assert_eq!(orphaned[0].tenant_name, NOT_AVAILABLE);
    assert_eq!(orphaned[0].property_name, NOT_AVAILABLE);

    let summary = h.client.dashboard().await.unwrap();
    assert_eq!(summary.total_properties, 1);
    assert_eq!(summary.total_tenants, 0);
    assert_eq!(summary.income, 850.0);
}

#[tokio::test]
async fn test_invoice_marked_paid_without_paid_date() {
    let h = harness(ServerConfig::default()).await;
    h.approved_user("owner@example.com").await;

    h.client
        .create_property(&PropertyDraft::from_form("House B", "456 Oak Ave", "1").unwrap())
        .await
        .unwrap();
    let property_id = h.client.list_properties().await.unwrap()[0].id;
    h.client
        .create_tenant(&TenantDraft {
            property_id,
            full_name: "Omar Said".to_string(),
            phone: String::new(),
            address: String::new(),
            start_date: date("2024-02-01"),
            rent_amount: 700.0,
        })
        .await
        .unwrap();
    let tenant = h.client.list_tenants().await.unwrap()[0].id.to_string();

    let api: Arc<dyn RentalApi> = h.client.clone();
    let mut invoices = CrudPage::<Invoice>::new(api);
    invoices.open_create();
    let pending = InvoiceDraft::from_form(&tenant, "700", "2024-05-01", "pending", "").unwrap();
    invoices.submit(pending).await.unwrap();
    let id = invoices.records()[0].id;

    let mut draft = invoices.open_edit(id).unwrap();
    draft.status = InvoiceStatus::Paid;
    assert_eq!(draft.paid_date, None);

    let done = invoices.submit(draft).await.unwrap();
    assert_eq!(
        done.description.as_deref(),
        Some("Invoice updated successfully.")
    );
    let stored = h.client.get_invoice(id).await.unwrap();
    assert!(stored.is_paid());
    assert_eq!(stored.paid_date, None);
}

#[tokio::test]
async fn test_invalid_reference_is_reported() {
    let h = harness(ServerConfig::default()).await;
    h.approved_user("owner@example.com").await;
    let api: Arc<dyn RentalApi> = h.client.clone();

    let mut tenants = CrudPage::<Tenant>::new(api);
    tenants.open_create();
    let err = tenants
        .submit(TenantDraft {
            property_id: 77,
            full_name: "Nobody".to_string(),
            phone: String::new(),
            address: String::new(),
            start_date: date("2024-01-01"),
            rent_amount: 100.0,
        })
        .await
        .unwrap_err();

    assert_eq!(
        err.notification.description.as_deref(),
        Some("Failed to add tenant. No property with id 77.")
    );
    assert!(tenants.form().is_some());
}

#[tokio::test]
async fn test_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let url = spawn_server(ServerConfig::default()).await;

    {
        let context = SessionContext::from_storage(FileStorage::open(&path).unwrap());
        let client = HttpClient::new(url.clone(), context.subscribe()).unwrap();
        let response = client
            .login(&Credentials::new(ADMIN_EMAIL, ADMIN_PASSWORD))
            .await
            .unwrap();
        context.login(Session::from(response)).unwrap();
    }

    let context = SessionContext::from_storage(FileStorage::open(&path).unwrap());
    assert!(context.is_admin());
    let client = HttpClient::new(url, context.subscribe()).unwrap();
    assert!(client.pending_users().await.unwrap().is_empty());
}
