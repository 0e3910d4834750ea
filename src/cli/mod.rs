//! RentDesk CLI
//!
//! Terminal front end for the rental dashboard:
//! - Sign in, register and sign out
//! - Dashboard summary
//! - Properties, tenants, invoices and expenses (list, show, add, edit, delete)
//! - Printable invoice receipts
//! - Account approval for administrators
//!
//! Every command belongs to a dashboard route and goes through the same
//! guard as the web UI before any request is made.

mod commands;
pub mod output;

pub use commands::{run, DraftFields};
pub use output::OutputFormat;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::models::RecordId;
use crate::routing::Route;

#[derive(Parser, Debug)]
#[command(name = "rentdesk")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Rental property management from the terminal")]
#[command(long_about = "RentDesk manages properties, tenants, invoices and expenses.\nSign in with `rentdesk login`; administrators approve new accounts with `rentdesk admin`.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ./rentdesk.toml, then the user config directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API server URL (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store the session
    Login {
        email: String,
        #[arg(short, long)]
        password: String,
    },

    /// Request a new account (an administrator must approve it)
    Register {
        email: String,
        #[arg(short, long)]
        password: String,
        /// Repeat the password
        #[arg(long)]
        confirm: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the current session
    Whoami,

    /// Portfolio summary, monthly chart and recent activity
    Dashboard,

    /// Manage properties
    Properties {
        #[command(subcommand)]
        action: PropertyCommand,
    },

    /// Manage tenants
    Tenants {
        #[command(subcommand)]
        action: TenantCommand,
    },

    /// Manage invoices and print receipts
    Invoices {
        #[command(subcommand)]
        action: InvoiceCommand,
    },

    /// Manage expenses
    Expenses {
        #[command(subcommand)]
        action: ExpenseCommand,
    },

    /// Review account requests (administrators only)
    Admin {
        #[command(subcommand)]
        action: AdminCommand,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Commands {
    /// Dashboard route the command acts on; `None` for local-only commands
    pub fn route(&self) -> Option<Route> {
        match self {
            Commands::Login { .. } => Some(Route::Login),
            Commands::Register { .. } => Some(Route::Register),
            Commands::Dashboard => Some(Route::Dashboard),
            Commands::Properties { .. } => Some(Route::Properties),
            Commands::Tenants { .. } => Some(Route::Tenants),
            Commands::Invoices { .. } => Some(Route::Invoices),
            Commands::Expenses { .. } => Some(Route::Expenses),
            Commands::Admin { .. } => Some(Route::Admin),
            Commands::Logout | Commands::Whoami | Commands::Config { .. } => None,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum PropertyCommand {
    /// List all properties
    List,
    /// Show one property
    Show { id: RecordId },
    /// Add a property
    Add(PropertyFields),
    /// Change a property; omitted fields keep their value
    Edit {
        id: RecordId,
        #[command(flatten)]
        fields: PropertyFields,
    },
    /// Delete a property
    Delete { id: RecordId },
}

#[derive(Args, Debug, Default)]
pub struct PropertyFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    /// Number of units
    #[arg(long)]
    pub units: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum TenantCommand {
    /// List tenants
    List {
        /// Case-insensitive match on the tenant's name
        #[arg(short, long)]
        search: Option<String>,
        /// Sort column (name, start_date, rent)
        #[arg(long)]
        sort: Option<String>,
        /// Sort order (asc, desc)
        #[arg(long, default_value = "asc")]
        order: String,
    },
    /// Show one tenant
    Show { id: RecordId },
    /// Add a tenant
    Add(TenantFields),
    /// Change a tenant; omitted fields keep their value
    Edit {
        id: RecordId,
        #[command(flatten)]
        fields: TenantFields,
    },
    /// Delete a tenant (their invoices are kept)
    Delete { id: RecordId },
}

#[derive(Args, Debug, Default)]
pub struct TenantFields {
    /// Property the tenant rents in
    #[arg(long)]
    pub property: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    /// Lease start (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<String>,
    /// Monthly rent
    #[arg(long)]
    pub rent: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum InvoiceCommand {
    /// List invoices with tenant and property names
    List,
    /// Show one invoice
    Show { id: RecordId },
    /// Add an invoice
    Add(InvoiceFields),
    /// Change an invoice; omitted fields keep their value
    Edit {
        id: RecordId,
        #[command(flatten)]
        fields: InvoiceFields,
    },
    /// Delete an invoice
    Delete { id: RecordId },
    /// Render the receipt of a paid invoice
    Receipt {
        id: RecordId,
        /// Write a printable HTML document (a directory gets receipt-<id>.html)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print plain text instead of HTML
        #[arg(long)]
        text: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct InvoiceFields {
    /// Tenant being billed
    #[arg(long)]
    pub tenant: Option<String>,
    #[arg(long)]
    pub amount: Option<String>,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due_date: Option<String>,
    /// pending, paid or overdue
    #[arg(long)]
    pub status: Option<String>,
    /// Payment date for paid invoices (YYYY-MM-DD)
    #[arg(long)]
    pub paid_date: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ExpenseCommand {
    /// List all expenses
    List,
    /// Show one expense
    Show { id: RecordId },
    /// Add an expense
    Add(ExpenseFields),
    /// Change an expense; omitted fields keep their value
    Edit {
        id: RecordId,
        #[command(flatten)]
        fields: ExpenseFields,
    },
    /// Delete an expense
    Delete { id: RecordId },
}

#[derive(Args, Debug, Default)]
pub struct ExpenseFields {
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub amount: Option<String>,
    /// Date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// Accounts awaiting approval
    Pending {
        /// Case-insensitive match on the email
        #[arg(short, long)]
        search: Option<String>,
        /// Sort column (id, email, date_requested); newest requests first by default
        #[arg(long)]
        sort: Option<String>,
        /// Sort order (asc, desc)
        #[arg(long)]
        order: Option<String>,
    },
    /// Approve a pending account
    Approve { id: RecordId },
    /// Deny a pending account
    Deny { id: RecordId },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_edit_with_partial_fields() {
        let cli = Cli::try_parse_from([
            "rentdesk", "tenants", "edit", "4", "--rent", "950", "--format", "json",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Tenants {
                action: TenantCommand::Edit { id, fields },
            } => {
                assert_eq!(id, 4);
                assert_eq!(fields.rent.as_deref(), Some("950"));
                assert!(fields.name.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_command_routes() {
        let cli = Cli::try_parse_from(["rentdesk", "admin", "approve", "7"]).unwrap();
        assert_eq!(cli.command.route(), Some(Route::Admin));

        let cli = Cli::try_parse_from(["rentdesk", "logout"]).unwrap();
        assert_eq!(cli.command.route(), None);
    }
}
