//! CRUD page controller
//!
//! Every record page works the same way: fetch the list on mount, open a
//! blank form for "Add" or a pre-filled one for "Edit", submit with POST or
//! PUT, delete with DELETE, and refetch after each change. [`CrudPage`]
//! holds that cycle once; [`CrudResource`] binds a record type to its
//! endpoints.
//!
//! There are no optimistic updates. A failed request leaves the list as it
//! was and comes back as a [`PageError`]: the notification to show, plus the
//! request error so callers can drop a rejected session.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::api::{ApiError, ApiResult, RentalApi};
use crate::models::{
    Expense, ExpenseDraft, Invoice, InvoiceDraft, Property, PropertyDraft, RecordId, Tenant,
    TenantDraft,
};
use crate::notify::{self, Notification};

pub use crate::notify::FormMode;

/// A record type managed through a CRUD page
#[async_trait]
pub trait CrudResource: Clone + Send + Sync + 'static {
    type Draft: Clone + Send + Sync;

    /// Lowercase display noun ("property")
    const NOUN: &'static str;

    fn id(&self) -> RecordId;
    fn to_draft(&self) -> Self::Draft;

    async fn list(api: &dyn RentalApi) -> ApiResult<Vec<Self>>;
    async fn create(api: &dyn RentalApi, draft: &Self::Draft) -> ApiResult<()>;
    async fn update(api: &dyn RentalApi, id: RecordId, draft: &Self::Draft) -> ApiResult<()>;
    async fn delete(api: &dyn RentalApi, id: RecordId) -> ApiResult<()>;
}

/// A page action that did not go through
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{notification}")]
pub struct PageError {
    pub notification: Notification,
    /// The failed request; `None` when nothing was sent
    pub error: Option<ApiError>,
}

impl PageError {
    fn request(err: ApiError, what: &str) -> Self {
        Self {
            notification: Notification::request_failed(&err, what),
            error: Some(err),
        }
    }

    fn local(notification: Notification) -> Self {
        Self {
            notification,
            error: None,
        }
    }

    /// The server rejected the session's token
    pub fn is_auth_failure(&self) -> bool {
        self.error.as_ref().is_some_and(ApiError::is_auth_failure)
    }
}

/// The open add/edit form
#[derive(Debug, Clone, PartialEq)]
pub struct FormState<D> {
    pub mode: FormMode,
    /// Pre-filled values; `None` for a blank form
    pub initial: Option<D>,
}

/// List and form state of one CRUD page
pub struct CrudPage<R: CrudResource> {
    api: Arc<dyn RentalApi>,
    records: Vec<R>,
    form: Option<FormState<R::Draft>>,
    loaded: bool,
}

impl<R: CrudResource> CrudPage<R> {
    pub fn new(api: Arc<dyn RentalApi>) -> Self {
        Self {
            api,
            records: Vec::new(),
            form: None,
            loaded: false,
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn find(&self, id: RecordId) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn form(&self) -> Option<&FormState<R::Draft>> {
        self.form.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Fetch the list, replacing what is shown only on success
    pub async fn load(&mut self) -> Result<usize, PageError> {
        match R::list(self.api.as_ref()).await {
            Ok(records) => {
                tracing::debug!("Loaded {} {} records", records.len(), R::NOUN);
                self.records = records;
                self.loaded = true;
                Ok(self.records.len())
            }
            Err(e) => {
                tracing::warn!("Failed to fetch {} list: {}", R::NOUN, e);
                Err(PageError::request(e, &notify::list_failed(R::NOUN)))
            }
        }
    }

    pub fn open_create(&mut self) {
        self.form = Some(FormState {
            mode: FormMode::Create,
            initial: None,
        });
    }

    /// Open the form pre-filled from a loaded record
    pub fn open_edit(&mut self, id: RecordId) -> Result<R::Draft, PageError> {
        let draft = self
            .find(id)
            .map(R::to_draft)
            .ok_or_else(|| PageError::local(not_found::<R>(id)))?;

        self.form = Some(FormState {
            mode: FormMode::Edit(id),
            initial: Some(draft.clone()),
        });
        Ok(draft)
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// POST or PUT the draft according to the open form, then refetch
    ///
    /// The form stays open when the request fails so the input is not lost.
    pub async fn submit(&mut self, draft: R::Draft) -> Result<Notification, PageError> {
        let mode = self.form.as_ref().map(|f| f.mode).ok_or_else(|| {
            PageError::local(Notification::error("Error").with_description("No form is open."))
        })?;

        let result = match mode {
            FormMode::Create => R::create(self.api.as_ref(), &draft).await,
            FormMode::Edit(id) => R::update(self.api.as_ref(), id, &draft).await,
        };

        if let Err(e) = result {
            tracing::warn!("Failed to {} {}: {}", mode.verb(), R::NOUN, e);
            return Err(PageError::request(e, &mode.failed(R::NOUN)));
        }

        self.form = None;
        self.refetch().await;
        Ok(mode.succeeded(R::NOUN))
    }

    /// DELETE the record, then refetch
    pub async fn delete(&mut self, id: RecordId) -> Result<Notification, PageError> {
        if let Err(e) = R::delete(self.api.as_ref(), id).await {
            tracing::warn!("Failed to delete {} {}: {}", R::NOUN, id, e);
            return Err(PageError::request(e, &notify::delete_failed(R::NOUN)));
        }

        self.refetch().await;
        Ok(Notification::record_changed(R::NOUN, "deleted"))
    }

    async fn refetch(&mut self) {
        if let Err(err) = self.load().await {
            tracing::warn!("List refresh failed after change: {}", err);
        }
    }
}

fn not_found<R: CrudResource>(id: RecordId) -> Notification {
    Notification::error("Error").with_description(format!("No {} with id {}.", R::NOUN, id))
}

// ============================================
// Bindings
// ============================================

#[async_trait]
impl CrudResource for Property {
    type Draft = PropertyDraft;
    const NOUN: &'static str = "property";

    fn id(&self) -> RecordId {
        self.id
    }

    fn to_draft(&self) -> PropertyDraft {
        Property::to_draft(self)
    }

    async fn list(api: &dyn RentalApi) -> ApiResult<Vec<Self>> {
        api.list_properties().await
    }

    async fn create(api: &dyn RentalApi, draft: &PropertyDraft) -> ApiResult<()> {
        api.create_property(draft).await
    }

    async fn update(api: &dyn RentalApi, id: RecordId, draft: &PropertyDraft) -> ApiResult<()> {
        api.update_property(id, draft).await
    }

    async fn delete(api: &dyn RentalApi, id: RecordId) -> ApiResult<()> {
        api.delete_property(id).await
    }
}

#[async_trait]
impl CrudResource for Tenant {
    type Draft = TenantDraft;
    const NOUN: &'static str = "tenant";

    fn id(&self) -> RecordId {
        self.id
    }

    fn to_draft(&self) -> TenantDraft {
        Tenant::to_draft(self)
    }

    async fn list(api: &dyn RentalApi) -> ApiResult<Vec<Self>> {
        api.list_tenants().await
    }

    async fn create(api: &dyn RentalApi, draft: &TenantDraft) -> ApiResult<()> {
        api.create_tenant(draft).await
    }

    async fn update(api: &dyn RentalApi, id: RecordId, draft: &TenantDraft) -> ApiResult<()> {
        api.update_tenant(id, draft).await
    }

    async fn delete(api: &dyn RentalApi, id: RecordId) -> ApiResult<()> {
        api.delete_tenant(id).await
    }
}

#[async_trait]
impl CrudResource for Invoice {
    type Draft = InvoiceDraft;
    const NOUN: &'static str = "invoice";

    fn id(&self) -> RecordId {
        self.id
    }

    fn to_draft(&self) -> InvoiceDraft {
        Invoice::to_draft(self)
    }

    async fn list(api: &dyn RentalApi) -> ApiResult<Vec<Self>> {
        api.list_invoices().await
    }

    async fn create(api: &dyn RentalApi, draft: &InvoiceDraft) -> ApiResult<()> {
        api.create_invoice(draft).await
    }

    async fn update(api: &dyn RentalApi, id: RecordId, draft: &InvoiceDraft) -> ApiResult<()> {
        api.update_invoice(id, draft).await
    }

    async fn delete(api: &dyn RentalApi, id: RecordId) -> ApiResult<()> {
        api.delete_invoice(id).await
    }
}

#[async_trait]
impl CrudResource for Expense {
    type Draft = ExpenseDraft;
    const NOUN: &'static str = "expense";

    fn id(&self) -> RecordId {
        self.id
    }

    fn to_draft(&self) -> ExpenseDraft {
        Expense::to_draft(self)
    }

    async fn list(api: &dyn RentalApi) -> ApiResult<Vec<Self>> {
        api.list_expenses().await
    }

    async fn create(api: &dyn RentalApi, draft: &ExpenseDraft) -> ApiResult<()> {
        api.create_expense(draft).await
    }

    async fn update(api: &dyn RentalApi, id: RecordId, draft: &ExpenseDraft) -> ApiResult<()> {
        api.update_expense(id, draft).await
    }

    async fn delete(api: &dyn RentalApi, id: RecordId) -> ApiResult<()> {
        api.delete_expense(id).await
    }
}
