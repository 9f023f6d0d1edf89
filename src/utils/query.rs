use std::str::FromStr;

use strum_macros::{Display, EnumString};
use tracing::debug;

/// Closed set of sortable employee columns. The list view dispatches on the
/// `orderByString` query parameter; anything outside this set is rejected at
/// parse time and the result keeps its natural order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum SortField {
    Id,
    FirstName,
    LastName,
    Gender,
    Birth,
    Address,
    Phone,
    Email,
    Department,
}

impl SortField {
    /// Ascending ORDER BY for the field, tie-broken by id. Id needs no
    /// tie-break since it is unique.
    pub fn order_clause(self) -> &'static str {
        match self {
            SortField::Id => "ORDER BY id",
            SortField::FirstName => "ORDER BY first_name, id",
            SortField::LastName => "ORDER BY last_name, id",
            SortField::Gender => "ORDER BY gender, id",
            SortField::Birth => "ORDER BY birth, id",
            SortField::Address => "ORDER BY address, id",
            SortField::Phone => "ORDER BY phone, id",
            SortField::Email => "ORDER BY email, id",
            SortField::Department => "ORDER BY department, id",
        }
    }

    /// Parse the raw query-string value. `None` for absent, empty, or
    /// unrecognized input; the caller falls back to natural order.
    pub fn parse(raw: Option<&str>) -> Option<SortField> {
        let raw = raw?.trim();
        if raw.is_empty() {
            return None;
        }
        match SortField::from_str(raw) {
            Ok(field) => Some(field),
            Err(_) => {
                debug!(order_by = raw, "Unrecognized sort field, keeping natural order");
                None
            }
        }
    }
}

/// WHERE fragment and its positional binds for the free-text search box:
/// exact match on the decimal id, substring match on either name. Comparison
/// case rules follow the column collation.
#[derive(Debug)]
pub struct SearchFilter {
    pub clause: &'static str,
    pub binds: Vec<String>,
}

pub fn search_filter(term: &str) -> SearchFilter {
    let like = format!("%{}%", term);
    SearchFilter {
        clause: "(CAST(id AS CHAR) = ? OR first_name LIKE ? OR last_name LIKE ?)",
        binds: vec![term.to_string(), like.clone(), like],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_sort_field_parses_from_its_column_header_name() {
        for (raw, field) in [
            ("Id", SortField::Id),
            ("FirstName", SortField::FirstName),
            ("LastName", SortField::LastName),
            ("Gender", SortField::Gender),
            ("Birth", SortField::Birth),
            ("Address", SortField::Address),
            ("Phone", SortField::Phone),
            ("Email", SortField::Email),
            ("Department", SortField::Department),
        ] {
            assert_eq!(SortField::parse(Some(raw)), Some(field));
        }
    }

    #[test]
    fn unknown_empty_or_absent_sort_values_fall_back_to_natural_order() {
        assert_eq!(SortField::parse(Some("Salary")), None);
        assert_eq!(SortField::parse(Some("firstname")), None);
        assert_eq!(SortField::parse(Some("  ")), None);
        assert_eq!(SortField::parse(None), None);
    }

    #[test]
    fn order_clauses_tie_break_on_id_except_for_id_itself() {
        assert_eq!(SortField::Id.order_clause(), "ORDER BY id");
        for field in [
            SortField::FirstName,
            SortField::LastName,
            SortField::Gender,
            SortField::Birth,
            SortField::Address,
            SortField::Phone,
            SortField::Email,
            SortField::Department,
        ] {
            assert!(field.order_clause().ends_with(", id"), "{field} missing tie-break");
            assert!(!field.order_clause().contains("DESC"));
        }
    }

    #[test]
    fn search_filter_binds_exact_id_then_two_likes() {
        let filter = search_filter("Ann");
        assert_eq!(filter.binds, vec!["Ann", "%Ann%", "%Ann%"]);
        assert_eq!(filter.clause.matches('?').count(), 3);
        assert!(filter.clause.contains("OR"));
    }
}
