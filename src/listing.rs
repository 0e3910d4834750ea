//! Client-side sorting and searching
//!
//! Lists are small and fully loaded, so every view is recomputed from the
//! fetched records: sort by the active column, then keep what matches the
//! search term. Nothing here mutates the fetched list itself.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::models::{PendingUser, Tenant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reverse(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    /// Header indicator
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "ascending"),
            SortDirection::Descending => write!(f, "descending"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(format!("unknown sort order '{}' (expected asc or desc)", other)),
        }
    }
}

/// Active sort column and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig<K> {
    pub key: K,
    pub direction: SortDirection,
}

impl<K: Copy + PartialEq> SortConfig<K> {
    pub fn new(key: K, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    pub fn ascending(key: K) -> Self {
        Self::new(key, SortDirection::Ascending)
    }

    /// Header click: the active ascending column flips to descending,
    /// anything else sorts ascending by the clicked column
    pub fn toggle(&mut self, key: K) {
        if self.key == key && self.direction == SortDirection::Ascending {
            self.direction = SortDirection::Descending;
        } else {
            self.key = key;
            self.direction = SortDirection::Ascending;
        }
    }

    /// Direction to show next to `key`'s header, if it is the active one
    pub fn indicator(&self, key: K) -> Option<SortDirection> {
        (self.key == key).then_some(self.direction)
    }
}

/// Records that can be ordered by a column
pub trait Sortable {
    type Column: Copy + PartialEq;

    /// Ascending comparison by `column`; should be a total order
    fn compare_by(&self, other: &Self, column: Self::Column) -> Ordering;
}

/// Records matched by a free-text search
pub trait Searchable {
    /// Text the search term is matched against
    fn search_text(&self) -> &str;

    /// Case-insensitive substring match; a blank term matches everything
    fn matches(&self, term: &str) -> bool {
        let term = term.trim();
        term.is_empty()
            || self
                .search_text()
                .to_lowercase()
                .contains(&term.to_lowercase())
    }
}

pub fn sort_records<T: Sortable>(records: &mut [T], sort: &SortConfig<T::Column>) {
    records.sort_by(|a, b| sort.direction.apply(a.compare_by(b, sort.key)));
}

pub fn search_records<'a, T: Searchable>(records: &'a [T], term: &str) -> Vec<&'a T> {
    records.iter().filter(|r| r.matches(term)).collect()
}

/// What a table shows: the records sorted (when a sort is active) and then
/// filtered by the search term
pub fn visible<T>(records: &[T], sort: Option<&SortConfig<T::Column>>, term: &str) -> Vec<T>
where
    T: Sortable + Searchable + Clone,
{
    let mut rows = records.to_vec();
    if let Some(sort) = sort {
        sort_records(&mut rows, sort);
    }
    rows.retain(|r| r.matches(term));
    rows
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

fn compare_amount(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

// ============================================
// Pending users (admin panel)
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PendingUserColumn {
    Id,
    Email,
    DateRequested,
}

impl PendingUserColumn {
    pub const ALL: [PendingUserColumn; 3] = [
        PendingUserColumn::Id,
        PendingUserColumn::Email,
        PendingUserColumn::DateRequested,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PendingUserColumn::Id => "ID",
            PendingUserColumn::Email => "Email",
            PendingUserColumn::DateRequested => "Date Requested",
        }
    }
}

impl FromStr for PendingUserColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "id" => Ok(PendingUserColumn::Id),
            "email" => Ok(PendingUserColumn::Email),
            "date" | "date_requested" | "requested" => Ok(PendingUserColumn::DateRequested),
            other => Err(format!("unknown column '{}' (expected id, email or date)", other)),
        }
    }
}

/// Newest requests first
impl Default for SortConfig<PendingUserColumn> {
    fn default() -> Self {
        SortConfig::new(PendingUserColumn::DateRequested, SortDirection::Descending)
    }
}

impl Sortable for PendingUser {
    type Column = PendingUserColumn;

    fn compare_by(&self, other: &Self, column: PendingUserColumn) -> Ordering {
        let primary = match column {
            PendingUserColumn::Id => self.id.cmp(&other.id),
            PendingUserColumn::Email => compare_text(&self.email, &other.email),
            PendingUserColumn::DateRequested => self.date_requested.cmp(&other.date_requested),
        };
        primary.then_with(|| self.id.cmp(&other.id))
    }
}

impl Searchable for PendingUser {
    fn search_text(&self) -> &str {
        &self.email
    }
}

// ============================================
// Tenants
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TenantColumn {
    Name,
    StartDate,
    Rent,
}

impl TenantColumn {
    pub const ALL: [TenantColumn; 3] = [
        TenantColumn::Name,
        TenantColumn::StartDate,
        TenantColumn::Rent,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TenantColumn::Name => "Full Name",
            TenantColumn::StartDate => "Start Date",
            TenantColumn::Rent => "Rent",
        }
    }
}

impl FromStr for TenantColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" | "full_name" => Ok(TenantColumn::Name),
            "start" | "start_date" => Ok(TenantColumn::StartDate),
            "rent" | "rent_amount" => Ok(TenantColumn::Rent),
            other => Err(format!("unknown column '{}' (expected name, start or rent)", other)),
        }
    }
}

impl Sortable for Tenant {
    type Column = TenantColumn;

    fn compare_by(&self, other: &Self, column: TenantColumn) -> Ordering {
        let primary = match column {
            TenantColumn::Name => compare_text(&self.full_name, &other.full_name),
            TenantColumn::StartDate => self.start_date.cmp(&other.start_date),
            TenantColumn::Rent => compare_amount(self.rent_amount, other.rent_amount),
        };
        primary.then_with(|| self.id.cmp(&other.id))
    }
}

impl Searchable for Tenant {
    fn search_text(&self) -> &str {
        &self.full_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn user(id: i64, email: &str, day: u32) -> PendingUser {
        PendingUser {
            id,
            email: email.to_string(),
            date_requested: Utc.with_ymd_and_hms(2024, 5, day, 8, 0, 0).unwrap(),
        }
    }

    fn users() -> Vec<PendingUser> {
        vec![
            user(1, "carol@example.com", 3),
            user(2, "Alice@Example.com", 1),
            user(3, "bob@rentals.io", 2),
            user(4, "alice@example.com", 2),
        ]
    }

    fn ids(rows: &[PendingUser]) -> Vec<i64> {
        rows.iter().map(|u| u.id).collect()
    }

    #[test]
    fn test_toggle() {
        let mut sort = SortConfig::<PendingUserColumn>::default();
        assert_eq!(sort.key, PendingUserColumn::DateRequested);
        assert_eq!(sort.direction, SortDirection::Descending);

        // descending on the same column goes back to ascending
        sort.toggle(PendingUserColumn::DateRequested);
        assert_eq!(sort.direction, SortDirection::Ascending);

        sort.toggle(PendingUserColumn::DateRequested);
        assert_eq!(sort.direction, SortDirection::Descending);

        sort.toggle(PendingUserColumn::Email);
        assert_eq!(sort, SortConfig::ascending(PendingUserColumn::Email));
        assert_eq!(sort.indicator(PendingUserColumn::Id), None);
    }

    #[test]
    fn test_default_sort_is_newest_first() {
        let rows = visible(&users(), Some(&SortConfig::default()), "");
        assert_eq!(ids(&rows), vec![1, 4, 3, 2]);
    }

    #[test]
    fn test_email_descending_is_reverse_of_ascending() {
        let asc = visible(&users(), Some(&SortConfig::ascending(PendingUserColumn::Email)), "");
        let desc = visible(
            &users(),
            Some(&SortConfig::new(PendingUserColumn::Email, SortDirection::Descending)),
            "",
        );

        let mut reversed = ids(&asc);
        reversed.reverse();
        assert_eq!(ids(&desc), reversed);
        assert_eq!(ids(&asc), vec![2, 4, 3, 1]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let all = users();
        let rows = visible(&all, None, "EXAMPLE");
        assert_eq!(ids(&rows), vec![1, 2, 4]);

        let expected: Vec<i64> = all
            .iter()
            .filter(|u| u.email.to_lowercase().contains("ice@"))
            .map(|u| u.id)
            .collect();
        assert_eq!(ids(&visible(&all, None, "ice@")), expected);

        assert_eq!(visible(&all, None, "  ").len(), all.len());
        assert!(search_records(&all, "nobody").is_empty());
    }

    #[test]
    fn test_tenant_search_and_rent_sort() {
        let tenant = |id: i64, name: &str, rent: f64| Tenant {
            id,
            property_id: 1,
            full_name: name.to_string(),
            phone: String::new(),
            address: String::new(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, id as u32).unwrap(),
            rent_amount: rent,
        };
        let tenants = vec![
            tenant(1, "Sara Haddad", 900.0),
            tenant(2, "Omar Saleh", 750.0),
            tenant(3, "Lina Haddad", 1200.0),
        ];

        let rows = visible(&tenants, Some(&SortConfig::ascending(TenantColumn::Rent)), "haddad");
        let names: Vec<&str> = rows.iter().map(|t| t.full_name.as_str()).collect();
        assert_eq!(names, vec!["Sara Haddad", "Lina Haddad"]);
    }

    #[test]
    fn test_parse_columns() {
        assert_eq!("date".parse::<PendingUserColumn>(), Ok(PendingUserColumn::DateRequested));
        assert_eq!("desc".parse::<SortDirection>(), Ok(SortDirection::Descending));
        assert!("size".parse::<TenantColumn>().is_err());
    }
}
