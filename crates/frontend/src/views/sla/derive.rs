//! Pure derivation for the SLA page: what the table and the per-base
//! summary show for a given filter/sort/page state.

use std::collections::BTreeSet;

use contracts::sla::{BaseIndicador, MotoristaIndicador};

use crate::pipeline::filter::{apply_column_filters, ColumnFilters};
use crate::pipeline::group::agrupar_por_base;
use crate::pipeline::normalize::normalize_for_comparison;
use crate::pipeline::paginate::paginate;
use crate::pipeline::sort::{sort_motoristas, SortState};
use crate::pipeline::view::{motoristas_to_table, TableView};

/// Column index of the base column in the rendered table (0 is the
/// ordinal column).
pub const BASE_COL: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct SlaDerived {
    /// Rows surviving city + column filters, pre-sort. The per-base
    /// summary aggregates exactly these.
    pub filtered: Vec<MotoristaIndicador>,
    pub por_base: Vec<BaseIndicador>,
    pub table: TableView,
    pub total_filtered: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub start: usize,
}

pub fn derive(
    por_motorista: &[MotoristaIndicador],
    filters: &ColumnFilters,
    selected_cidades: &[String],
    sort: SortState,
    page: usize,
    rows_per_page: u32,
) -> SlaDerived {
    let by_cidade: Vec<MotoristaIndicador> = if selected_cidades.is_empty() {
        por_motorista.to_vec()
    } else {
        let wanted: Vec<String> = selected_cidades
            .iter()
            .map(|c| normalize_for_comparison(c))
            .collect();
        por_motorista
            .iter()
            .filter(|m| {
                m.cidades
                    .iter()
                    .any(|cidade| wanted.contains(&normalize_for_comparison(cidade)))
            })
            .cloned()
            .collect()
    };

    let filtered = apply_column_filters(&by_cidade, filters);
    let por_base = agrupar_por_base(&filtered);

    let mut sorted = filtered.clone();
    sort_motoristas(&mut sorted, sort);

    let slice = paginate(&sorted, page, rows_per_page as usize);
    let table = motoristas_to_table(&slice.page_rows, slice.start);

    SlaDerived {
        total_filtered: filtered.len(),
        filtered,
        por_base,
        table,
        total_pages: slice.total_pages,
        current_page: slice.current_page,
        start: slice.start,
    }
}

/// The base column is single-choice: picking a value replaces any
/// previous selection, picking the current one again clears it.
/// Returns the value to persist, `None` when the column was cleared.
pub fn choose_base(filters: &mut ColumnFilters, value: &str) -> Option<String> {
    if filters.is_selected(BASE_COL, value) {
        filters.clear_column(BASE_COL);
        None
    } else {
        filters.select_only(BASE_COL, value);
        Some(value.trim().to_string())
    }
}

/// City choices offered by the city filter. When a base filter is
/// active only cities of drivers from that base appear.
pub fn cidades_options(
    por_motorista: &[MotoristaIndicador],
    filters: &ColumnFilters,
) -> Vec<String> {
    let base_filter: Vec<String> = filters
        .values(BASE_COL)
        .iter()
        .map(|v| normalize_for_comparison(v))
        .collect();
    let mut set = BTreeSet::new();
    for m in por_motorista {
        if !base_filter.is_empty()
            && !base_filter.contains(&normalize_for_comparison(m.base_display()))
        {
            continue;
        }
        for cidade in &m.cidades {
            let cidade = cidade.trim();
            if !cidade.is_empty() {
                set.insert(cidade.to_string());
            }
        }
    }
    let mut options: Vec<String> = set.into_iter().collect();
    options.sort_by_key(|c| c.to_lowercase());
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::sort::{SortDir, SortKey};

    fn motorista(nome: &str, base: &str, e: u64, n: u64, cidades: &[&str]) -> MotoristaIndicador {
        MotoristaIndicador {
            nome: nome.into(),
            base: Some(base.into()),
            total_entregues: e,
            nao_entregues: n,
            total: Some(e + n),
            percentual_sla: crate::pipeline::group::percentual_sla(e, n),
            cidades: cidades.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        }
    }

    fn fixture() -> Vec<MotoristaIndicador> {
        vec![
            motorista("Ana", "Norte", 9, 1, &["Lisboa"]),
            motorista("Bruno", "Sul", 5, 5, &["Porto"]),
            motorista("Carla", "Norte", 7, 3, &["Lisboa", "Sintra"]),
        ]
    }

    #[test]
    fn test_summary_follows_filters() {
        let mut filters = ColumnFilters::new();
        filters.toggle(BASE_COL, "norte");
        let derived = derive(&fixture(), &filters, &[], SortState::default(), 1, 25);
        assert_eq!(derived.total_filtered, 2);
        assert_eq!(derived.por_base.len(), 1);
        assert_eq!(derived.por_base[0].nome, "Norte");
        assert_eq!(derived.por_base[0].total, 20);
        assert_eq!(derived.por_base[0].percentual_sla, 80.0);
    }

    #[test]
    fn test_city_filter_is_case_insensitive() {
        let derived = derive(
            &fixture(),
            &ColumnFilters::new(),
            &["  LISBOA ".to_string()],
            SortState::default(),
            1,
            25,
        );
        let nomes: Vec<&str> = derived
            .filtered
            .iter()
            .map(|m| m.nome.as_str())
            .collect();
        assert_eq!(nomes, ["Ana", "Carla"]);
    }

    #[test]
    fn test_page_clamps_after_filtering() {
        let mut filters = ColumnFilters::new();
        filters.toggle(BASE_COL, "Sul");
        let derived = derive(&fixture(), &filters, &[], SortState::default(), 7, 25);
        assert_eq!(derived.current_page, 1);
        assert_eq!(derived.table.body_rows.len(), 1);
    }

    #[test]
    fn test_sorted_rows_feed_the_table() {
        let derived = derive(
            &fixture(),
            &ColumnFilters::new(),
            &[],
            SortState {
                sort_by: SortKey::PercentualSla,
                sort_dir: SortDir::Desc,
            },
            1,
            25,
        );
        let first = &derived.table.body_rows[0];
        assert_eq!(first.values[0], "Ana");
        assert_eq!(first.values[5], "90%");
    }

    #[test]
    fn test_base_choice_is_single_select() {
        let mut filters = ColumnFilters::new();
        assert_eq!(choose_base(&mut filters, "Norte"), Some("Norte".to_string()));
        assert_eq!(filters.values(BASE_COL), ["Norte"]);

        // a second pick replaces, never accumulates
        assert_eq!(choose_base(&mut filters, " Sul "), Some("Sul".to_string()));
        assert_eq!(filters.values(BASE_COL), ["Sul"]);

        // picking the current value again clears the column
        assert_eq!(choose_base(&mut filters, "Sul"), None);
        assert!(!filters.has_filter(BASE_COL));
    }

    #[test]
    fn test_cidades_options_respect_base_filter() {
        let rows = fixture();
        assert_eq!(
            cidades_options(&rows, &ColumnFilters::new()),
            ["Lisboa", "Porto", "Sintra"]
        );
        let mut filters = ColumnFilters::new();
        filters.select_only(BASE_COL, "Norte");
        assert_eq!(cidades_options(&rows, &filters), ["Lisboa", "Sintra"]);
    }

}
