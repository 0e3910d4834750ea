//! Command execution
//!
//! Each command resolves its route, passes the guard, then talks to the API
//! through the same page controllers the dashboard uses. Failures surface as
//! the notification text the dashboard would show, with a non-zero exit.

use anyhow::{anyhow, bail, Context};
use chrono::{Local, Utc};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

use super::output::{self, print_record, print_records, OutputFormat, Tabular};
use super::{
    AdminCommand, Cli, Commands, ExpenseCommand, ExpenseFields, InvoiceCommand, InvoiceFields,
    PropertyCommand, PropertyFields, TenantCommand, TenantFields,
};
use crate::api::{ApiError, HttpClient, RentalApi};
use crate::config::{generate_default_config, Config};
use crate::crud::{CrudPage, CrudResource, PageError};
use crate::listing::{visible, PendingUserColumn, SortConfig, SortDirection, TenantColumn};
use crate::models::{
    Credentials, EnrichedInvoice, Expense, ExpenseDraft, Invoice, InvoiceDraft, Property,
    PropertyDraft, RecordId, Registration, Tenant, TenantDraft, ValidationError,
};
use crate::notify::Notification;
use crate::receipt::Receipt;
use crate::routing::{guard, home_for, GuardDecision, Route};
use crate::session::{FileStorage, Session, SessionContext};

/// Command-line fields that become a record draft
///
/// Unset fields fall back to `base`, the record being edited; on create
/// they are blank and rejected where the form would reject them.
pub trait DraftFields {
    type Draft;

    fn into_draft(self, base: Option<&Self::Draft>) -> Result<Self::Draft, ValidationError>;
}

fn pick(value: Option<String>, base: Option<String>) -> String {
    value.or(base).unwrap_or_default()
}

impl DraftFields for PropertyFields {
    type Draft = PropertyDraft;

    fn into_draft(self, base: Option<&PropertyDraft>) -> Result<PropertyDraft, ValidationError> {
        PropertyDraft::from_form(
            &pick(self.name, base.map(|b| b.name.clone())),
            &pick(self.address, base.map(|b| b.address.clone())),
            &pick(self.units, base.map(|b| b.total_units.to_string())),
        )
    }
}

impl DraftFields for TenantFields {
    type Draft = TenantDraft;

    fn into_draft(self, base: Option<&TenantDraft>) -> Result<TenantDraft, ValidationError> {
        TenantDraft::from_form(
            &pick(self.property, base.map(|b| b.property_id.to_string())),
            &pick(self.name, base.map(|b| b.full_name.clone())),
            &pick(self.phone, base.map(|b| b.phone.clone())),
            &pick(self.address, base.map(|b| b.address.clone())),
            &pick(self.start_date, base.map(|b| b.start_date.to_string())),
            &pick(self.rent, base.map(|b| b.rent_amount.to_string())),
        )
    }
}

impl DraftFields for InvoiceFields {
    type Draft = InvoiceDraft;

    fn into_draft(self, base: Option<&InvoiceDraft>) -> Result<InvoiceDraft, ValidationError> {
        InvoiceDraft::from_form(
            &pick(self.tenant, base.map(|b| b.tenant_id.to_string())),
            &pick(self.amount, base.map(|b| b.amount.to_string())),
            &pick(self.due_date, base.map(|b| b.due_date.to_string())),
            &pick(self.status, base.map(|b| b.status.as_str().to_string())),
            &pick(
                self.paid_date,
                base.and_then(|b| b.paid_date).map(|d| d.to_string()),
            ),
        )
    }
}

impl DraftFields for ExpenseFields {
    type Draft = ExpenseDraft;

    fn into_draft(self, base: Option<&ExpenseDraft>) -> Result<ExpenseDraft, ValidationError> {
        ExpenseDraft::from_form(
            &pick(self.description, base.map(|b| b.description.clone())),
            &pick(self.amount, base.map(|b| b.amount.to_string())),
            &pick(self.date, base.map(|b| b.date.to_string())),
            &pick(self.category, base.map(|b| b.category.clone())),
        )
    }
}

/// Why a guarded command cannot run, if it cannot
pub(crate) fn redirect_message(decision: &GuardDecision, route: &Route) -> Option<String> {
    match decision {
        GuardDecision::Render(_) => None,
        GuardDecision::RedirectToLogin => Some(
            "Not logged in. Run `rentdesk login <email> --password <password>` first.".to_string(),
        ),
        GuardDecision::RedirectToAdmin => Some(format!(
            "{} is not available to administrators. Use `rentdesk admin pending`.",
            route.title()
        )),
        GuardDecision::RedirectToDashboard => Some(format!(
            "{} requires an administrator account. Use `rentdesk dashboard`.",
            route.title()
        )),
    }
}

fn failure(notification: Notification) -> anyhow::Error {
    anyhow!(notification.to_string())
}

fn invalid(err: ValidationError) -> anyhow::Error {
    failure(Notification::error("Error").with_description(err.to_string()))
}

/// Run a parsed command line
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.api_url {
        config.api.url = url;
    }

    if let Commands::Config { output } = &cli.command {
        return write_config(output.as_deref());
    }

    let storage = FileStorage::open(config.session.path())?;
    let context = SessionContext::from_storage(storage);

    if let Some(route) = cli.command.route() {
        let decision = guard(context.current().as_ref(), &route);
        if let Some(message) = redirect_message(&decision, &route) {
            tracing::debug!(route = %route, target = %decision.target(), "Command redirected");
            bail!(message);
        }
    }

    let client =
        HttpClient::with_timeout(&config.api.url, context.subscribe(), config.api.timeout())?;
    tracing::debug!("Using API at {}", client.base_url());

    let app = App {
        api: Arc::new(client),
        context,
        format: cli.format,
    };
    app.dispatch(cli.command).await
}

fn write_config(output: Option<&Path>) -> anyhow::Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Config written to {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

struct App {
    api: Arc<dyn RentalApi>,
    context: SessionContext<FileStorage>,
    format: OutputFormat,
}

impl App {
    async fn dispatch(&self, command: Commands) -> anyhow::Result<()> {
        match command {
            Commands::Login { email, password } => self.login(&email, &password).await,
            Commands::Register {
                email,
                password,
                confirm,
            } => self.register(&email, &password, &confirm).await,
            Commands::Logout => self.logout(),
            Commands::Whoami => self.whoami(),
            Commands::Dashboard => self.dashboard().await,
            Commands::Properties { action } => self.properties(action).await,
            Commands::Tenants { action } => self.tenants(action).await,
            Commands::Invoices { action } => self.invoices(action).await,
            Commands::Expenses { action } => self.expenses(action).await,
            Commands::Admin { action } => self.admin(action).await,
            Commands::Config { output } => write_config(output.as_deref()),
        }
    }

    /// Turn a failed request into the user-facing error
    fn request_failed(&self, err: ApiError) -> anyhow::Error {
        self.rejected(Notification::from_error(&err), Some(&err))
    }

    fn page_failed(&self, err: PageError) -> anyhow::Error {
        self.rejected(err.notification, err.error.as_ref())
    }

    /// A rejected token also ends the stored session
    fn rejected(&self, notification: Notification, err: Option<&ApiError>) -> anyhow::Error {
        let auth_failure = err.is_some_and(ApiError::is_auth_failure);
        if auth_failure && self.context.is_authenticated() {
            if let Err(e) = self.context.logout() {
                tracing::warn!("Failed to clear session: {}", e);
            }
            return anyhow!("{} Log in again.", notification);
        }
        failure(notification)
    }

    fn report(&self, outcome: Result<Notification, PageError>) -> anyhow::Result<()> {
        let notification = outcome.map_err(|e| self.page_failed(e))?;
        println!("{}", notification);
        Ok(())
    }

    async fn login(&self, email: &str, password: &str) -> anyhow::Result<()> {
        let response = self
            .api
            .login(&Credentials::new(email.trim(), password))
            .await
            .map_err(|e| failure(Notification::login_failed(&e)))?;

        let session = Session::from(response);
        self.context.login(session.clone())?;

        println!("{}", Notification::login_succeeded());
        println!("Home: {}", home_for(&session).title());
        Ok(())
    }

    async fn register(&self, email: &str, password: &str, confirm: &str) -> anyhow::Result<()> {
        let registration = Registration::new(email, password, confirm)
            .map_err(|e| failure(Notification::registration_failed(&ApiError::Validation(e))))?;

        self.api
            .register(&registration)
            .await
            .map_err(|e| failure(Notification::registration_failed(&e)))?;

        println!("{}", Notification::registration_succeeded());
        Ok(())
    }

    fn logout(&self) -> anyhow::Result<()> {
        self.context.logout()?;
        println!("{}", Notification::logged_out());
        Ok(())
    }

    fn whoami(&self) -> anyhow::Result<()> {
        let Some(session) = self.context.current() else {
            println!("Not logged in.");
            return Ok(());
        };

        println!("{}", describe_session(&session, Utc::now().timestamp()));
        println!("Session file: {}", self.context.store().storage().path().display());
        Ok(())
    }

    async fn dashboard(&self) -> anyhow::Result<()> {
        let summary = self
            .api
            .dashboard()
            .await
            .map_err(|e| self.request_failed(e))?;

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
            OutputFormat::Table => println!("{}", output::render_dashboard(&summary)),
        }
        Ok(())
    }

    // ============================================
    // Record pages
    // ============================================

    async fn load<R: CrudResource>(&self) -> anyhow::Result<CrudPage<R>> {
        let mut page = CrudPage::<R>::new(Arc::clone(&self.api));
        page.load().await.map_err(|e| self.page_failed(e))?;
        Ok(page)
    }

    async fn list<R>(&self, empty_hint: &str) -> anyhow::Result<()>
    where
        R: CrudResource + Tabular + Serialize,
    {
        let page = self.load::<R>().await?;
        print_records(page.records(), self.format, empty_hint)
    }

    async fn add<R, F>(&self, fields: F) -> anyhow::Result<()>
    where
        R: CrudResource,
        F: DraftFields<Draft = R::Draft>,
    {
        let draft = fields.into_draft(None).map_err(invalid)?;
        let mut page = CrudPage::<R>::new(Arc::clone(&self.api));
        page.open_create();
        self.report(page.submit(draft).await)
    }

    async fn edit<R, F>(&self, id: RecordId, fields: F) -> anyhow::Result<()>
    where
        R: CrudResource,
        F: DraftFields<Draft = R::Draft>,
    {
        let mut page = self.load::<R>().await?;
        let base = page.open_edit(id).map_err(|e| self.page_failed(e))?;
        let draft = fields.into_draft(Some(&base)).map_err(invalid)?;
        self.report(page.submit(draft).await)
    }

    async fn delete<R: CrudResource>(&self, id: RecordId) -> anyhow::Result<()> {
        let mut page = CrudPage::<R>::new(Arc::clone(&self.api));
        self.report(page.delete(id).await)
    }

    async fn properties(&self, action: PropertyCommand) -> anyhow::Result<()> {
        match action {
            PropertyCommand::List => {
                self.list::<Property>("No properties yet. Add one with `rentdesk properties add`.")
                    .await
            }
            PropertyCommand::Show { id } => {
                let property = self
                    .api
                    .get_property(id)
                    .await
                    .map_err(|e| self.request_failed(e))?;
                print_record(&property, self.format)
            }
            PropertyCommand::Add(fields) => self.add::<Property, _>(fields).await,
            PropertyCommand::Edit { id, fields } => self.edit::<Property, _>(id, fields).await,
            PropertyCommand::Delete { id } => self.delete::<Property>(id).await,
        }
    }

    async fn tenants(&self, action: TenantCommand) -> anyhow::Result<()> {
        match action {
            TenantCommand::List {
                search,
                sort,
                order,
            } => {
                let direction: SortDirection = order.parse().map_err(|e: String| anyhow!(e))?;
                let sort = sort
                    .map(|column| column.parse::<TenantColumn>())
                    .transpose()
                    .map_err(|e| anyhow!(e))?
                    .map(|column| SortConfig::new(column, direction));

                let page = self.load::<Tenant>().await?;
                let rows = visible(page.records(), sort.as_ref(), search.as_deref().unwrap_or(""));
                let hint = if page.records().is_empty() {
                    "No tenants yet. Add one with `rentdesk tenants add`."
                } else {
                    "No tenants match the search."
                };
                print_records(&rows, self.format, hint)
            }
            TenantCommand::Show { id } => {
                let tenant = self
                    .api
                    .get_tenant(id)
                    .await
                    .map_err(|e| self.request_failed(e))?;
                print_record(&tenant, self.format)
            }
            TenantCommand::Add(fields) => self.add::<Tenant, _>(fields).await,
            TenantCommand::Edit { id, fields } => self.edit::<Tenant, _>(id, fields).await,
            TenantCommand::Delete { id } => self.delete::<Tenant>(id).await,
        }
    }

    /// Tenants and properties used to name invoice rows
    async fn lookups(&self) -> anyhow::Result<(Vec<Tenant>, Vec<Property>)> {
        let (tenants, properties) =
            tokio::join!(self.api.list_tenants(), self.api.list_properties());
        let tenants = tenants.map_err(|e| self.request_failed(e))?;
        let properties = properties.map_err(|e| self.request_failed(e))?;
        Ok((tenants, properties))
    }

    async fn enriched_invoice(&self, id: RecordId) -> anyhow::Result<EnrichedInvoice> {
        let invoice = self
            .api
            .get_invoice(id)
            .await
            .map_err(|e| self.request_failed(e))?;
        let (tenants, properties) = self.lookups().await?;
        Ok(EnrichedInvoice::enrich(invoice, &tenants, &properties))
    }

    async fn invoices(&self, action: InvoiceCommand) -> anyhow::Result<()> {
        match action {
            InvoiceCommand::List => {
                let page = self.load::<Invoice>().await?;
                let (tenants, properties) = self.lookups().await?;
                let rows =
                    EnrichedInvoice::enrich_all(page.records().to_vec(), &tenants, &properties);
                print_records(
                    &rows,
                    self.format,
                    "No invoices yet. Add one with `rentdesk invoices add`.",
                )
            }
            InvoiceCommand::Show { id } => {
                let invoice = self.enriched_invoice(id).await?;
                print_record(&invoice, self.format)
            }
            InvoiceCommand::Add(fields) => self.add::<Invoice, _>(fields).await,
            InvoiceCommand::Edit { id, fields } => self.edit::<Invoice, _>(id, fields).await,
            InvoiceCommand::Delete { id } => self.delete::<Invoice>(id).await,
            InvoiceCommand::Receipt { id, output, text } => {
                let invoice = self.enriched_invoice(id).await?;
                let receipt = Receipt::for_invoice(
                    &invoice,
                    Receipt::random_number(),
                    Local::now().date_naive(),
                )?;

                if text {
                    println!("{}", receipt.render_text());
                    return Ok(());
                }

                match output {
                    Some(path) => {
                        let path = if path.is_dir() {
                            path.join(receipt.file_name())
                        } else {
                            path
                        };
                        std::fs::write(&path, receipt.render_html())
                            .with_context(|| format!("Failed to write {}", path.display()))?;
                        println!("Receipt written to {}", path.display());
                    }
                    None => println!("{}", receipt.render_html()),
                }
                Ok(())
            }
        }
    }

    async fn expenses(&self, action: ExpenseCommand) -> anyhow::Result<()> {
        match action {
            ExpenseCommand::List => {
                self.list::<Expense>("No expenses yet. Add one with `rentdesk expenses add`.")
                    .await
            }
            ExpenseCommand::Show { id } => {
                let expense = self
                    .api
                    .get_expense(id)
                    .await
                    .map_err(|e| self.request_failed(e))?;
                print_record(&expense, self.format)
            }
            ExpenseCommand::Add(fields) => self.add::<Expense, _>(fields).await,
            ExpenseCommand::Edit { id, fields } => self.edit::<Expense, _>(id, fields).await,
            ExpenseCommand::Delete { id } => self.delete::<Expense>(id).await,
        }
    }

    // ============================================
    // Admin panel
    // ============================================

    async fn admin(&self, action: AdminCommand) -> anyhow::Result<()> {
        match action {
            AdminCommand::Pending {
                search,
                sort,
                order,
            } => {
                let sort = pending_sort(sort.as_deref(), order.as_deref())?;
                let users = self
                    .api
                    .pending_users()
                    .await
                    .map_err(|e| self.request_failed(e))?;
                let rows = visible(&users, Some(&sort), search.as_deref().unwrap_or(""));
                print_records(&rows, self.format, "No pending users.")
            }
            AdminCommand::Approve { id } => {
                self.api
                    .approve_user(id)
                    .await
                    .map_err(|e| self.request_failed(e))?;
                println!("{}", Notification::success("User approved."));
                Ok(())
            }
            AdminCommand::Deny { id } => {
                self.api
                    .deny_user(id)
                    .await
                    .map_err(|e| self.request_failed(e))?;
                println!("{}", Notification::success("User denied."));
                Ok(())
            }
        }
    }
}

/// One-line account summary for `whoami`; `now` is unix seconds
fn describe_session(session: &Session, now: i64) -> String {
    let claims = session.claims();
    let email = claims
        .as_ref()
        .and_then(|c| c.email.clone())
        .unwrap_or_else(|| "unknown account".to_string());
    let role = if session.is_admin { "administrator" } else { "user" };

    match claims {
        Some(c) if c.is_expired_at(now) => {
            format!("{} ({}), token expired. Log in again.", email, role)
        }
        _ => format!("{} ({})", email, role),
    }
}

/// Sort for the pending list: newest first unless a column or order is given
fn pending_sort(
    column: Option<&str>,
    order: Option<&str>,
) -> anyhow::Result<SortConfig<PendingUserColumn>> {
    let default = SortConfig::<PendingUserColumn>::default();
    let key = match column {
        Some(c) => c.parse().map_err(|e: String| anyhow!(e))?,
        None => default.key,
    };
    let direction = match (order, column) {
        (Some(o), _) => o.parse().map_err(|e: String| anyhow!(e))?,
        (None, Some(_)) => SortDirection::Ascending,
        (None, None) => default.direction,
    };
    Ok(SortConfig::new(key, direction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InvoiceStatus;
    use chrono::NaiveDate;

    #[test]
    fn test_redirect_messages() {
        let user = Session::new("t", false);
        let admin = Session::new("t", true);

        let decision = guard(None, &Route::Properties);
        assert!(redirect_message(&decision, &Route::Properties)
            .unwrap()
            .contains("rentdesk login"));

        let decision = guard(Some(&admin), &Route::Tenants);
        assert!(redirect_message(&decision, &Route::Tenants)
            .unwrap()
            .contains("admin pending"));

        let decision = guard(Some(&user), &Route::Admin);
        assert!(redirect_message(&decision, &Route::Admin)
            .unwrap()
            .contains("requires an administrator"));

        let decision = guard(Some(&user), &Route::Invoices);
        assert_eq!(redirect_message(&decision, &Route::Invoices), None);
    }

    #[test]
    fn test_edit_keeps_unset_fields() {
        let base = TenantDraft {
            property_id: 2,
            full_name: "Sara Haddad".to_string(),
            phone: "555-0101".to_string(),
            address: String::new(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            rent_amount: 850.0,
        };
        let fields = TenantFields {
            rent: Some("900".to_string()),
            ..Default::default()
        };

        let draft = fields.into_draft(Some(&base)).unwrap();
        assert_eq!(draft.rent_amount, 900.0);
        assert_eq!(draft.full_name, "Sara Haddad");
        assert_eq!(draft.start_date, base.start_date);
    }

    #[test]
    fn test_add_requires_fields() {
        let err = PropertyFields::default().into_draft(None).unwrap_err();
        assert_eq!(err, ValidationError::Required("name"));
    }

    #[test]
    fn test_invoice_paid_date_from_base() {
        let base = InvoiceDraft {
            tenant_id: 1,
            amount: 900.0,
            due_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            status: InvoiceStatus::Paid,
            paid_date: NaiveDate::from_ymd_opt(2024, 3, 3),
        };

        let draft = InvoiceFields::default().into_draft(Some(&base)).unwrap();
        assert_eq!(draft, base);

        let overdue = InvoiceFields {
            status: Some("overdue".to_string()),
            ..Default::default()
        };
        let draft = overdue.into_draft(Some(&base)).unwrap();
        assert_eq!(draft.status, InvoiceStatus::Overdue);
        assert_eq!(draft.paid_date, base.paid_date);
    }

    #[test]
    fn test_describe_session() {
        use crate::session::{encode_token, TokenClaims};

        let claims = TokenClaims {
            email: Some("owner@example.com".to_string()),
            exp: Some(1_700_000_000),
            ..Default::default()
        };
        let session = Session::new(encode_token(&claims, "sig"), false);

        assert_eq!(describe_session(&session, 1_600_000_000), "owner@example.com (user)");
        assert_eq!(
            describe_session(&session, 1_700_000_000),
            "owner@example.com (user), token expired. Log in again."
        );

        let opaque = Session::new("opaque", true);
        assert_eq!(describe_session(&opaque, 0), "unknown account (administrator)");
    }

    #[test]
    fn test_pending_sort() {
        let default = pending_sort(None, None).unwrap();
        assert_eq!(default, SortConfig::default());

        let by_email = pending_sort(Some("email"), None).unwrap();
        assert_eq!(
            by_email,
            SortConfig::new(PendingUserColumn::Email, SortDirection::Ascending)
        );

        let oldest = pending_sort(None, Some("asc")).unwrap();
        assert_eq!(oldest.key, PendingUserColumn::DateRequested);
        assert_eq!(oldest.direction, SortDirection::Ascending);

        assert!(pending_sort(Some("phone"), None).is_err());
    }
}
