//! Routes, guards and layout shell metadata
//!
//! The app has three areas: a public area (login, register), the admin
//! panel, and the general authenticated pages. [`guard`] decides, from the
//! current session alone, whether a route renders or where to redirect.
//! A token that is present is trusted here; the server rejects bad ones.

use std::fmt;

use crate::session::Session;

/// A navigable location
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Admin,
    Dashboard,
    Properties,
    Tenants,
    Invoices,
    Expenses,
    Unknown(String),
}

impl Route {
    /// Resolve a path; trailing slashes and case are ignored
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim().trim_end_matches('/');
        match trimmed.to_ascii_lowercase().as_str() {
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/admin" => Route::Admin,
            "/dashboard" => Route::Dashboard,
            "/properties" => Route::Properties,
            "/tenants" => Route::Tenants,
            "/invoices" => Route::Invoices,
            "/expenses" => Route::Expenses,
            _ if trimmed.is_empty() => Route::Unknown("/".to_string()),
            _ => Route::Unknown(trimmed.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Admin => "/admin",
            Route::Dashboard => "/dashboard",
            Route::Properties => "/properties",
            Route::Tenants => "/tenants",
            Route::Invoices => "/invoices",
            Route::Expenses => "/expenses",
            Route::Unknown(path) => path,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Register => "Register",
            Route::Admin => "Admin Panel",
            Route::Dashboard => "Dashboard",
            Route::Properties => "Properties",
            Route::Tenants => "Tenants",
            Route::Invoices => "Invoices",
            Route::Expenses => "Expenses",
            Route::Unknown(_) => "Not Found",
        }
    }

    /// Reachable without a session
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }

    pub fn is_admin_area(&self) -> bool {
        matches!(self, Route::Admin)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of a guard check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    RedirectToLogin,
    RedirectToAdmin,
    RedirectToDashboard,
    Render(Route),
}

impl GuardDecision {
    /// Where the user ends up
    pub fn target(&self) -> Route {
        match self {
            GuardDecision::RedirectToLogin => Route::Login,
            GuardDecision::RedirectToAdmin => Route::Admin,
            GuardDecision::RedirectToDashboard => Route::Dashboard,
            GuardDecision::Render(route) => route.clone(),
        }
    }

    pub fn is_render(&self) -> bool {
        matches!(self, GuardDecision::Render(_))
    }
}

/// Decide whether `route` renders for `session`
///
/// - login and register always render
/// - no session: login
/// - admin outside the admin area: admin
/// - non-admin on the admin area: dashboard
/// - unknown paths: the user's home (admin or dashboard)
pub fn guard(session: Option<&Session>, route: &Route) -> GuardDecision {
    if route.is_public() {
        return GuardDecision::Render(route.clone());
    }

    let Some(session) = session else {
        return GuardDecision::RedirectToLogin;
    };

    match (session.is_admin, route) {
        (true, Route::Admin) => GuardDecision::Render(Route::Admin),
        (true, _) => GuardDecision::RedirectToAdmin,
        (false, Route::Admin) | (false, Route::Unknown(_)) => GuardDecision::RedirectToDashboard,
        (false, route) => GuardDecision::Render(route.clone()),
    }
}

/// Landing route after a successful login
pub fn home_for(session: &Session) -> Route {
    if session.is_admin {
        Route::Admin
    } else {
        Route::Dashboard
    }
}

/// Sidebar entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
    pub icon: &'static str,
}

impl NavItem {
    pub const fn new(label: &'static str, path: &'static str, icon: &'static str) -> Self {
        Self { label, path, icon }
    }
}

/// Sidebar of the authenticated area, in display order
pub const NAV_ITEMS: [NavItem; 5] = [
    NavItem::new("Dashboard", "/dashboard", "🏠"),
    NavItem::new("Properties", "/properties", "🏢"),
    NavItem::new("Tenants", "/tenants", "👥"),
    NavItem::new("Invoices", "/invoices", "🧾"),
    NavItem::new("Expenses", "/expenses", "💸"),
];

/// Dashboard shortcuts to the add forms
pub const QUICK_ACTIONS: [NavItem; 4] = [
    NavItem::new("Add Property", "/properties", "🏢"),
    NavItem::new("Add Tenant", "/tenants", "👥"),
    NavItem::new("Add Invoice", "/invoices", "🧾"),
    NavItem::new("Add Expense", "/expenses", "💸"),
];

/// Breadcrumb trail for the header: `Home` followed by each path segment
pub fn breadcrumbs(path: &str) -> Vec<(String, String)> {
    let mut trail = vec![("Home".to_string(), "/".to_string())];
    let mut current = String::new();

    for segment in path.split('/').filter(|s| !s.is_empty()) {
        current.push('/');
        current.push_str(segment);

        let label = match Route::from_path(&current) {
            Route::Unknown(_) => capitalize(segment),
            route => route.title().to_string(),
        };
        trail.push((label, current.clone()));
    }

    trail
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROTECTED: [Route; 5] = [
        Route::Dashboard,
        Route::Properties,
        Route::Tenants,
        Route::Invoices,
        Route::Expenses,
    ];

    #[test]
    fn test_from_path() {
        assert_eq!(Route::from_path("/tenants/"), Route::Tenants);
        assert_eq!(Route::from_path("/Invoices?page=2"), Route::Invoices);
        assert_eq!(Route::from_path("/"), Route::Unknown("/".to_string()));
        assert_eq!(Route::from_path("/reports"), Route::Unknown("/reports".to_string()));
        assert_eq!(Route::Expenses.path(), "/expenses");
    }

    #[test]
    fn test_no_session_redirects_to_login() {
        for route in PROTECTED.iter().chain([Route::Admin].iter()) {
            assert_eq!(guard(None, route), GuardDecision::RedirectToLogin);
        }
        assert_eq!(
            guard(None, &Route::Unknown("/x".to_string())),
            GuardDecision::RedirectToLogin
        );
    }

    #[test]
    fn test_public_routes_always_render() {
        let admin = Session::new("t", true);
        for route in [Route::Login, Route::Register] {
            assert_eq!(guard(None, &route), GuardDecision::Render(route.clone()));
            assert_eq!(guard(Some(&admin), &route), GuardDecision::Render(route.clone()));
        }
    }

    #[test]
    fn test_admin_is_kept_in_admin_area() {
        let admin = Session::new("t", true);
        for route in PROTECTED.iter() {
            assert_eq!(guard(Some(&admin), route), GuardDecision::RedirectToAdmin);
        }
        assert_eq!(guard(Some(&admin), &Route::Admin), GuardDecision::Render(Route::Admin));
        assert_eq!(
            guard(Some(&admin), &Route::from_path("/")),
            GuardDecision::RedirectToAdmin
        );
    }

    #[test]
    fn test_non_admin_is_kept_out_of_admin_area() {
        let user = Session::new("t", false);
        assert_eq!(guard(Some(&user), &Route::Admin), GuardDecision::RedirectToDashboard);
        for route in PROTECTED.iter() {
            assert_eq!(guard(Some(&user), route), GuardDecision::Render(route.clone()));
        }
        assert_eq!(
            guard(Some(&user), &Route::from_path("/nowhere")),
            GuardDecision::RedirectToDashboard
        );
    }

    #[test]
    fn test_breadcrumbs() {
        let trail = breadcrumbs("/invoices/42");
        assert_eq!(
            trail,
            vec![
                ("Home".to_string(), "/".to_string()),
                ("Invoices".to_string(), "/invoices".to_string()),
                ("42".to_string(), "/invoices/42".to_string()),
            ]
        );
        assert_eq!(breadcrumbs("/").len(), 1);
    }

    #[test]
    fn test_nav_items_resolve_to_titled_routes() {
        for item in NAV_ITEMS {
            let route = Route::from_path(item.path);
            assert!(!matches!(route, Route::Unknown(_)), "{}", item.path);
            assert_eq!(route.title(), item.label);
        }
        for item in QUICK_ACTIONS {
            assert!(!matches!(Route::from_path(item.path), Route::Unknown(_)));
            assert!(item.label.starts_with("Add "));
        }
    }
}
