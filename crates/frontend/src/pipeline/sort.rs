//! Sort state and ordering for the per-driver indicator table.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use contracts::sla::MotoristaIndicador;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Nome,
    Base,
    Total,
    TotalEntregues,
    NaoEntregues,
    PercentualSla,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    Asc,
    Desc,
}

/// Dropdown entries, in display order.
pub const SORT_OPTIONS: &[(SortKey, SortDir, &str)] = &[
    (SortKey::Nome, SortDir::Asc, "Nome (A–Z)"),
    (SortKey::Nome, SortDir::Desc, "Nome (Z–A)"),
    (SortKey::Base, SortDir::Asc, "Base (A–Z)"),
    (SortKey::Base, SortDir::Desc, "Base (Z–A)"),
    (SortKey::Total, SortDir::Desc, "Total (maior)"),
    (SortKey::Total, SortDir::Asc, "Total (menor)"),
    (SortKey::TotalEntregues, SortDir::Desc, "Entregues (maior)"),
    (SortKey::TotalEntregues, SortDir::Asc, "Entregues (menor)"),
    (SortKey::NaoEntregues, SortDir::Desc, "Não entregues (maior)"),
    (SortKey::NaoEntregues, SortDir::Asc, "Não entregues (menor)"),
    (SortKey::PercentualSla, SortDir::Desc, "% SLA (maior)"),
    (SortKey::PercentualSla, SortDir::Asc, "% SLA (menor)"),
];

/// Persisted as JSON under one localStorage key. Anything that does not
/// parse into the allow-listed enums falls back to the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    #[serde(rename = "sortBy")]
    pub sort_by: SortKey,
    #[serde(rename = "sortDir")]
    pub sort_dir: SortDir,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            sort_by: SortKey::Nome,
            sort_dir: SortDir::Asc,
        }
    }
}

impl SortState {
    pub fn from_json(raw: &str) -> SortState {
        serde_json::from_str(raw).unwrap_or_default()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Stable sort; rows comparing equal keep their upstream order.
pub fn sort_motoristas(rows: &mut [MotoristaIndicador], state: SortState) {
    rows.sort_by(|a, b| {
        let ord = match state.sort_by {
            SortKey::Nome => cmp_text(&a.nome, &b.nome),
            SortKey::Base => cmp_text(a.base_display(), b.base_display()),
            SortKey::Total => a.total_value().cmp(&b.total_value()),
            SortKey::TotalEntregues => a.total_entregues.cmp(&b.total_entregues),
            SortKey::NaoEntregues => a.nao_entregues.cmp(&b.nao_entregues),
            SortKey::PercentualSla => a
                .percentual_sla
                .partial_cmp(&b.percentual_sla)
                .unwrap_or(Ordering::Equal),
        };
        match state.sort_dir {
            SortDir::Asc => ord,
            SortDir::Desc => ord.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn motorista(nome: &str, base: Option<&str>, total: u64, pct: f64) -> MotoristaIndicador {
        MotoristaIndicador {
            nome: nome.into(),
            base: base.map(Into::into),
            total: Some(total),
            percentual_sla: pct,
            ..Default::default()
        }
    }

    #[test]
    fn test_state_json_round_trip() {
        let state = SortState {
            sort_by: SortKey::PercentualSla,
            sort_dir: SortDir::Desc,
        };
        let json = state.to_json();
        assert_eq!(json, r#"{"sortBy":"percentualSla","sortDir":"desc"}"#);
        assert_eq!(SortState::from_json(&json), state);
    }

    #[test]
    fn test_invalid_persisted_state_falls_back() {
        assert_eq!(
            SortState::from_json(r#"{"sortBy":"altura","sortDir":"asc"}"#),
            SortState::default()
        );
        assert_eq!(SortState::from_json("not json"), SortState::default());
        assert_eq!(SortState::from_json(""), SortState::default());
    }

    #[test]
    fn test_name_sort_case_insensitive() {
        let mut rows = vec![
            motorista("bruno", None, 0, 0.0),
            motorista("Ana", None, 0, 0.0),
            motorista("carla", None, 0, 0.0),
        ];
        sort_motoristas(&mut rows, SortState::default());
        let nomes: Vec<&str> = rows.iter().map(|m| m.nome.as_str()).collect();
        assert_eq!(nomes, ["Ana", "bruno", "carla"]);
    }

    #[test]
    fn test_numeric_sort_desc() {
        let mut rows = vec![
            motorista("a", None, 3, 10.0),
            motorista("b", None, 30, 95.5),
            motorista("c", None, 12, 50.0),
        ];
        sort_motoristas(
            &mut rows,
            SortState {
                sort_by: SortKey::Total,
                sort_dir: SortDir::Desc,
            },
        );
        let totals: Vec<u64> = rows.iter().map(|m| m.total_value()).collect();
        assert_eq!(totals, [30, 12, 3]);
    }

    #[test]
    fn test_missing_base_sorts_as_placeholder() {
        let mut rows = vec![
            motorista("a", Some("Zona Sul"), 0, 0.0),
            motorista("b", None, 0, 0.0),
            motorista("c", Some("Aeroporto"), 0, 0.0),
        ];
        sort_motoristas(
            &mut rows,
            SortState {
                sort_by: SortKey::Base,
                sort_dir: SortDir::Asc,
            },
        );
        let nomes: Vec<&str> = rows.iter().map(|m| m.nome.as_str()).collect();
        // "(sem base)" sorts before letters
        assert_eq!(nomes, ["b", "c", "a"]);
    }

    #[test]
    fn test_sort_stability_on_ties() {
        let mut rows = vec![
            motorista("primeiro", None, 5, 0.0),
            motorista("segundo", None, 5, 0.0),
            motorista("terceiro", None, 5, 0.0),
        ];
        sort_motoristas(
            &mut rows,
            SortState {
                sort_by: SortKey::Total,
                sort_dir: SortDir::Desc,
            },
        );
        let nomes: Vec<&str> = rows.iter().map(|m| m.nome.as_str()).collect();
        assert_eq!(nomes, ["primeiro", "segundo", "terceiro"]);
    }
}
