//! Application State
//!
//! In-memory tables shared by all handlers. Wrapped in Arc for sharing
//! across async tasks; every table sits behind one RwLock so a request sees
//! a consistent snapshot.

use chrono::{DateTime, Datelike, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

use crate::config::ServerConfig;
use crate::models::{
    Expense, Invoice, InvoiceStatus, PendingUser, Property, RecordId, Tenant,
};

/// Shared application state for all handlers
pub struct AppState {
    pub db: RwLock<Database>,
    pub config: Arc<ServerConfig>,
    pub start_time: Instant,
}

impl AppState {
    /// Create state with the configured admin account seeded
    pub fn new(config: ServerConfig) -> Self {
        let mut db = Database::default();
        db.add_account(&config.admin_email, &config.admin_password, true, AccountStatus::Active);
        if config.seed_sample_data {
            db.seed_sample_data();
        }

        Self {
            db: RwLock::new(db),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatus {
    Pending,
    Active,
}

/// A user account
///
/// Passwords are kept as given: this server only exists for local
/// development and tests.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: RecordId,
    pub email: String,
    pub password: String,
    pub is_admin: bool,
    pub status: AccountStatus,
    pub date_requested: DateTime<Utc>,
}

impl Account {
    pub fn to_pending_user(&self) -> PendingUser {
        PendingUser {
            id: self.id,
            email: self.email.clone(),
            date_requested: self.date_requested,
        }
    }
}

/// Rows keyed by server-assigned id, in id order
#[derive(Debug, Clone)]
pub struct Table<T> {
    rows: BTreeMap<RecordId, T>,
    next_id: RecordId,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T: Clone> Table<T> {
    /// Insert a row built from its newly assigned id
    pub fn insert_with<F: FnOnce(RecordId) -> T>(&mut self, build: F) -> RecordId {
        let id = self.next_id;
        self.next_id += 1;
        self.rows.insert(id, build(id));
        id
    }

    pub fn get(&self, id: RecordId) -> Option<&T> {
        self.rows.get(&id)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.rows.contains_key(&id)
    }

    /// Replace an existing row; false when there is none
    pub fn replace(&mut self, id: RecordId, row: T) -> bool {
        match self.rows.get_mut(&id) {
            Some(existing) => {
                *existing = row;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: RecordId) -> Option<T> {
        self.rows.remove(&id)
    }

    pub fn list(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// All server-side data
#[derive(Debug, Default)]
pub struct Database {
    pub accounts: Table<Account>,
    /// Issued token → account id
    pub tokens: HashMap<String, RecordId>,
    pub properties: Table<Property>,
    pub tenants: Table<Tenant>,
    pub invoices: Table<Invoice>,
    pub expenses: Table<Expense>,
}

impl Database {
    pub fn add_account(
        &mut self,
        email: &str,
        password: &str,
        is_admin: bool,
        status: AccountStatus,
    ) -> RecordId {
        let email = email.trim().to_string();
        let password = password.to_string();
        self.accounts.insert_with(|id| Account {
            id,
            email,
            password,
            is_admin,
            status,
            date_requested: Utc::now(),
        })
    }

    pub fn find_account_by_email(&self, email: &str) -> Option<&Account> {
        let email = email.trim();
        self.accounts
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email))
    }

    /// Account behind a bearer token, if the token was issued here
    pub fn account_for_token(&self, token: &str) -> Option<&Account> {
        self.tokens
            .get(token)
            .and_then(|id| self.accounts.get(*id))
    }

    /// Drop every token issued to an account
    pub fn revoke_tokens(&mut self, account_id: RecordId) {
        self.tokens.retain(|_, id| *id != account_id);
    }

    pub fn pending_users(&self) -> Vec<PendingUser> {
        self.accounts
            .iter()
            .filter(|a| a.status == AccountStatus::Pending)
            .map(Account::to_pending_user)
            .collect()
    }

    fn seed_sample_data(&mut self) {
        let today = Utc::now().date_naive();
        let month_start = today.with_day0(0).unwrap_or(today);

        for (name, address, units) in [
            ("Apartment A", "123 Main St", 12),
            ("House B", "456 Oak Ave", 1),
            ("Villa C", "789 Pine Rd", 3),
        ] {
            self.properties.insert_with(|id| Property {
                id,
                name: name.to_string(),
                address: address.to_string(),
                total_units: units,
            });
        }

        for (property_id, full_name, phone, rent) in [
            (1, "Sara Haddad", "555-0101", 850.0),
            (1, "Omar Saleh", "555-0102", 900.0),
            (2, "Lina Nasser", "555-0103", 1450.0),
        ] {
            self.tenants.insert_with(|id| Tenant {
                id,
                property_id,
                full_name: full_name.to_string(),
                phone: phone.to_string(),
                address: String::new(),
                start_date: month_start,
                rent_amount: rent,
            });
        }

        for (tenant_id, amount, status) in [
            (1, 850.0, InvoiceStatus::Paid),
            (2, 900.0, InvoiceStatus::Pending),
            (3, 1450.0, InvoiceStatus::Overdue),
        ] {
            self.invoices.insert_with(|id| Invoice {
                id,
                tenant_id,
                amount,
                due_date: month_start,
                status,
                paid_date: (status == InvoiceStatus::Paid).then_some(today),
            });
        }

        self.expenses.insert_with(|id| Expense {
            id,
            description: "Plumbing repair".to_string(),
            amount: 240.0,
            date: today,
            category: "Maintenance".to_string(),
        });
    }
}
