//! Per-column value filters.
//!
//! Filters are a map from column index to the list of accepted values.
//! A row passes when every filtered column matches one of its accepted
//! values (AND across columns, OR within a column). Column 0 is the
//! synthetic 1-based row ordinal rendered by the tables.

use std::collections::BTreeMap;

use super::normalize::normalize_for_comparison;

/// Rows expose their filterable cells by column index; the engine
/// itself supplies column 0.
pub trait FilterableRow {
    fn filter_cell(&self, col: usize) -> String;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnFilters {
    map: BTreeMap<usize, Vec<String>>,
}

impl ColumnFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn has_filter(&self, col: usize) -> bool {
        self.map.contains_key(&col)
    }

    pub fn active_columns(&self) -> Vec<usize> {
        self.map.keys().copied().collect()
    }

    pub fn values(&self, col: usize) -> &[String] {
        self.map.get(&col).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_selected(&self, col: usize, value: &str) -> bool {
        let value = value.trim();
        self.values(col).iter().any(|v| v == value)
    }

    /// Symmetric difference on one value. A column whose last value is
    /// removed disappears from the map; an empty list is never stored.
    pub fn toggle(&mut self, col: usize, value: &str) {
        let value = value.trim().to_string();
        let list = self.map.entry(col).or_default();
        match list.iter().position(|v| *v == value) {
            Some(pos) => {
                list.remove(pos);
            }
            None => list.push(value),
        }
        if self.map.get(&col).is_some_and(Vec::is_empty) {
            self.map.remove(&col);
        }
    }

    /// Replaces the column's selection with a single value. Used by
    /// single-choice columns such as the SLA base column.
    pub fn select_only(&mut self, col: usize, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            self.map.remove(&col);
        } else {
            self.map.insert(col, vec![value.to_string()]);
        }
    }

    pub fn clear_column(&mut self, col: usize) {
        self.map.remove(&col);
    }

    pub fn clear_all(&mut self) {
        self.map.clear();
    }

    fn row_passes<R: FilterableRow>(&self, ordinal: usize, row: &R) -> bool {
        self.map.iter().all(|(col, selected)| {
            let cell = if *col == 0 {
                ordinal.to_string()
            } else {
                row.filter_cell(*col)
            };
            let cell = normalize_for_comparison(&cell);
            selected
                .iter()
                .any(|value| normalize_for_comparison(value) == cell)
        })
    }
}

/// Applies the filters; ordinals are assigned before filtering, so a
/// filter on column 0 addresses the rows' original positions.
pub fn apply_column_filters<R: FilterableRow + Clone>(
    rows: &[R],
    filters: &ColumnFilters,
) -> Vec<R> {
    if filters.is_empty() {
        return rows.to_vec();
    }
    rows.iter()
        .enumerate()
        .filter(|(idx, row)| filters.row_passes(idx + 1, *row))
        .map(|(_, row)| row.clone())
        .collect()
}

/// Distinct values of one rendered column, for the filter dropdowns.
/// Column 0 enumerates the row ordinals.
pub fn unique_column_values<R: FilterableRow>(rows: &[R], col: usize) -> Vec<String> {
    if col == 0 {
        return (1..=rows.len()).map(|n| n.to_string()).collect();
    }
    let mut seen = std::collections::BTreeSet::new();
    let mut values = Vec::new();
    for row in rows {
        let value = row.filter_cell(col).trim().to_string();
        if value.is_empty() {
            continue;
        }
        if seen.insert(normalize_for_comparison(&value)) {
            values.push(value);
        }
    }
    values.sort_by_key(|v| v.to_lowercase());
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Cells(Vec<&'static str>);

    impl FilterableRow for Cells {
        fn filter_cell(&self, col: usize) -> String {
            self.0.get(col - 1).copied().unwrap_or("").to_string()
        }
    }

    fn rows() -> Vec<Cells> {
        vec![
            Cells(vec!["João", "BASE NORTE"]),
            Cells(vec!["Maria", "base norte"]),
            Cells(vec!["Pedro", "Base Sul"]),
        ]
    }

    #[test]
    fn test_empty_filters_pass_everything() {
        let filtered = apply_column_filters(&rows(), &ColumnFilters::new());
        assert_eq!(filtered.len(), 3);
    }

    #[test]
    fn test_match_is_trimmed_and_case_insensitive() {
        let mut filters = ColumnFilters::new();
        filters.toggle(2, "  Base Norte ");
        let filtered = apply_column_filters(&rows(), &filters);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.filter_cell(1) != "Pedro"));
    }

    #[test]
    fn test_and_across_columns_or_within() {
        let mut filters = ColumnFilters::new();
        filters.toggle(1, "João");
        filters.toggle(1, "Pedro");
        filters.toggle(2, "base norte");
        let filtered = apply_column_filters(&rows(), &filters);
        assert_eq!(filtered, vec![Cells(vec!["João", "BASE NORTE"])]);
    }

    #[test]
    fn test_ordinal_column() {
        let mut filters = ColumnFilters::new();
        filters.toggle(0, "2");
        let filtered = apply_column_filters(&rows(), &filters);
        assert_eq!(filtered, vec![Cells(vec!["Maria", "base norte"])]);
    }

    #[test]
    fn test_toggle_never_stores_empty_list() {
        let mut filters = ColumnFilters::new();
        filters.toggle(1, "João");
        assert!(filters.has_filter(1));
        filters.toggle(1, "João");
        assert!(!filters.has_filter(1));
        assert!(filters.is_empty());
    }

    #[test]
    fn test_select_only_replaces_selection() {
        let mut filters = ColumnFilters::new();
        filters.toggle(2, "Base Sul");
        filters.select_only(2, "Base Norte");
        assert_eq!(filters.values(2), ["Base Norte"]);
        filters.select_only(2, "");
        assert!(!filters.has_filter(2));
    }

    #[test]
    fn test_unique_column_values_dedupes_case_insensitively() {
        let unique = unique_column_values(&rows(), 2);
        assert_eq!(unique, ["BASE NORTE", "Base Sul"]);
        assert_eq!(unique_column_values(&rows(), 0), ["1", "2", "3"]);
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let mut filters = ColumnFilters::new();
        filters.toggle(2, "base norte");
        let once = apply_column_filters(&rows(), &filters);
        let twice = apply_column_filters(&once, &filters);
        assert_eq!(once, twice);
    }
}
