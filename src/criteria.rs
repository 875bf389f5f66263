use crate::table::{Table, normalize};
use anyhow::{Result, bail};
use std::collections::HashMap;

const FUNCTION_COLUMN: &str = "function";
const REQUIREMENT_COLUMN: &str = "requirement";
const AREA_COLUMN: &str = "business area";

/// Lookup tables built from the criteria file: normalized function name to
/// normalized requirement level, and normalized function name to business
/// area (kept as read). Functions missing from these maps are invisible to
/// scoring.
#[derive(Debug, Clone, Default)]
pub struct CriteriaMap {
    requirement: HashMap<String, String>,
    area: HashMap<String, String>,
}

impl CriteriaMap {
    pub fn from_table(table: &Table) -> Result<CriteriaMap> {
        let function_idx = role_column(table, FUNCTION_COLUMN)?;
        let requirement_idx = role_column(table, REQUIREMENT_COLUMN)?;
        let area_idx = role_column(table, AREA_COLUMN)?;

        let mut map = CriteriaMap::default();
        for row in table.rows() {
            let function = row.cell(function_idx).normalized();
            if function.is_empty() {
                continue;
            }
            // Repeated function names: the later row wins, silently.
            map.requirement
                .insert(function.clone(), row.cell(requirement_idx).normalized());
            let area = row.cell(area_idx);
            if area.is_empty() {
                map.area.remove(&function);
            } else {
                map.area.insert(function, area.as_str().to_string());
            }
        }
        Ok(map)
    }

    pub fn requirement(&self, function: &str) -> Option<&str> {
        self.requirement
            .get(&normalize(function))
            .map(String::as_str)
    }

    pub fn area(&self, function: &str) -> Option<&str> {
        self.area.get(&normalize(function)).map(String::as_str)
    }

    pub fn function_count(&self) -> usize {
        self.requirement.len()
    }
}

fn role_column(table: &Table, role: &str) -> Result<usize> {
    let mut matches = table
        .headers()
        .iter()
        .enumerate()
        .filter(|(_, header)| normalize(header) == role);
    let Some((idx, _)) = matches.next() else {
        bail!("criteria file is missing required column '{role}'");
    };
    if matches.next().is_some() {
        bail!("criteria file has ambiguous column '{role}'");
    }
    Ok(idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Value;

    fn criteria_table(rows: &[(&str, &str, &str)]) -> Table {
        let mut table = Table::new(vec![
            "Function".into(),
            "Requirement".into(),
            "Business Area".into(),
        ]);
        for (function, requirement, area) in rows {
            table.push_row(vec![
                Value::from_cell(function),
                Value::from_cell(requirement),
                Value::from_cell(area),
            ]);
        }
        table
    }

    #[test]
    fn builds_both_mappings() {
        let map = CriteriaMap::from_table(&criteria_table(&[
            ("LoginSSO", "Critical", "Security"),
            ("AuditLog", "Not Required", "Compliance"),
        ]))
        .unwrap();

        assert_eq!(map.requirement("loginsso"), Some("critical"));
        assert_eq!(map.area("loginsso"), Some("Security"));
        assert_eq!(map.requirement("auditlog"), Some("not required"));
        assert_eq!(map.function_count(), 2);
    }

    #[test]
    fn lookups_are_case_and_whitespace_insensitive_on_both_sides() {
        let map =
            CriteriaMap::from_table(&criteria_table(&[("  LoginSSO ", "CRITICAL", "Security")]))
                .unwrap();

        assert_eq!(map.requirement(" LOGINSSO  "), Some("critical"));
        assert_eq!(map.area("loginsso"), Some("Security"));
        assert_eq!(map.requirement("other"), None);
    }

    #[test]
    fn area_text_is_kept_as_read() {
        let map = CriteriaMap::from_table(&criteria_table(&[("F1", "useful", "Customer Care ")]))
            .unwrap();
        assert_eq!(map.area("f1"), Some("Customer Care "));
    }

    #[test]
    fn later_rows_overwrite_earlier() {
        let map = CriteriaMap::from_table(&criteria_table(&[
            ("LoginSSO", "useful", "Security"),
            ("loginsso ", "critical", "Identity"),
        ]))
        .unwrap();

        assert_eq!(map.requirement("LoginSSO"), Some("critical"));
        assert_eq!(map.area("LoginSSO"), Some("Identity"));
        assert_eq!(map.function_count(), 1);
    }

    #[test]
    fn rows_without_function_are_skipped() {
        let map = CriteriaMap::from_table(&criteria_table(&[
            ("", "critical", "Security"),
            ("   ", "critical", "Security"),
            ("F1", "useful", ""),
        ]))
        .unwrap();

        assert_eq!(map.function_count(), 1);
        // An empty area cell leaves the function unmapped, so scoring falls
        // back to the configured label.
        assert_eq!(map.area("f1"), None);
        assert_eq!(map.requirement("f1"), Some("useful"));
    }

    #[test]
    fn header_roles_resolve_case_insensitively() {
        let mut table = Table::new(vec![
            " BUSINESS AREA ".into(),
            "function".into(),
            "Requirement".into(),
        ]);
        table.push_row(vec![
            Value::from_cell("Security"),
            Value::from_cell("LoginSSO"),
            Value::from_cell("critical"),
        ]);

        let map = CriteriaMap::from_table(&table).unwrap();
        assert_eq!(map.requirement("loginsso"), Some("critical"));
        assert_eq!(map.area("loginsso"), Some("Security"));
    }

    #[test]
    fn missing_column_is_a_distinct_error() {
        let table = Table::new(vec!["Function".into(), "Requirement".into()]);
        let err = CriteriaMap::from_table(&table).unwrap_err();
        assert!(
            err.to_string()
                .contains("missing required column 'business area'")
        );
    }

    #[test]
    fn duplicate_role_header_is_rejected() {
        let table = Table::new(vec![
            "Function".into(),
            "FUNCTION ".into(),
            "Requirement".into(),
            "Business Area".into(),
        ]);
        let err = CriteriaMap::from_table(&table).unwrap_err();
        assert!(err.to_string().contains("ambiguous column 'function'"));
    }
}
