//! SLA indicator payloads (`GET /api/importe-tabela-sla/indicadores`).

use serde::{Deserialize, Serialize};

use crate::marks::SEM_BASE;

/// Per-driver aggregate computed server-side at import time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MotoristaIndicador {
    pub nome: String,
    pub base: Option<String>,
    pub total_entregues: u64,
    pub nao_entregues: u64,
    pub total: Option<u64>,
    pub percentual_sla: f64,
    pub entradas_galpao: u64,
    pub cidades: Vec<String>,
}

impl MotoristaIndicador {
    /// Base for display and grouping; blank bases fall into `(sem base)`.
    pub fn base_display(&self) -> &str {
        match self.base.as_deref() {
            Some(base) if !base.trim().is_empty() => base,
            _ => SEM_BASE,
        }
    }

    /// Older payloads omit `total`; reconstruct it from the outcomes.
    pub fn total_value(&self) -> u64 {
        self.total
            .unwrap_or(self.total_entregues + self.nao_entregues)
    }
}

/// Per-base aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BaseIndicador {
    pub nome: String,
    pub total_entregues: u64,
    pub nao_entregues: u64,
    pub total: u64,
    pub percentual_sla: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndicadoresResponse {
    pub por_motorista: Vec<MotoristaIndicador>,
    pub por_base: Vec<BaseIndicador>,
    pub header: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_motorista_wire_names() {
        let m: MotoristaIndicador = serde_json::from_value(json!({
            "nome": "João",
            "base": "Base Sul",
            "totalEntregues": 9,
            "naoEntregues": 1,
            "total": 10,
            "percentualSla": 90.0,
            "entradasGalpao": 2,
            "cidades": ["Lisboa"]
        }))
        .unwrap();
        assert_eq!(m.total_entregues, 9);
        assert_eq!(m.entradas_galpao, 2);
        assert_eq!(m.base_display(), "Base Sul");
    }

    #[test]
    fn test_base_display_fallback() {
        let m = MotoristaIndicador {
            base: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(m.base_display(), SEM_BASE);
        let m = MotoristaIndicador::default();
        assert_eq!(m.base_display(), SEM_BASE);
    }

    #[test]
    fn test_total_value_fallback() {
        let m = MotoristaIndicador {
            total_entregues: 3,
            nao_entregues: 2,
            total: None,
            ..Default::default()
        };
        assert_eq!(m.total_value(), 5);
    }
}
