//! Per-user configuration stored server-side under the auth profile.
//!
//! The schema is explicit and versioned. Unknown or invalid persisted
//! values never fail deserialization; the accessors fall back to the
//! documented defaults instead.

use serde::{Deserialize, Serialize};

pub const CONFIG_VERSION: u32 = 1;

pub const VALID_ROWS_PER_PAGE: &[u32] = &[10, 25, 50, 100, 200, 500];
pub const DEFAULT_ROWS_PER_PAGE: u32 = 25;

pub const VALID_TEMAS: &[&str] = &["claro", "escuro"];
pub const DEFAULT_TEMA: &str = "claro";

/// Rendering styles of the SLA progress indicator.
pub const VALID_ACOMPANHAMENTO: &[&str] = &["texto", "circular", "vertical", "horizontal"];
pub const DEFAULT_ACOMPANHAMENTO: &str = "texto";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub versao: u32,
    pub linhas_por_pagina: u32,
    pub tema: String,
    pub bases_sla: Vec<String>,
    pub sla_acompanhamento_pct: String,
    pub incluir_nao_entregues_outras_datas: bool,
    pub tipos_bipagem_motorista: Vec<String>,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            versao: CONFIG_VERSION,
            linhas_por_pagina: DEFAULT_ROWS_PER_PAGE,
            tema: DEFAULT_TEMA.to_string(),
            bases_sla: Vec::new(),
            sla_acompanhamento_pct: DEFAULT_ACOMPANHAMENTO.to_string(),
            incluir_nao_entregues_outras_datas: false,
            tipos_bipagem_motorista: Vec::new(),
        }
    }
}

impl UserConfig {
    /// Rows per page validated against the allow-list.
    pub fn rows_per_page(&self) -> u32 {
        if VALID_ROWS_PER_PAGE.contains(&self.linhas_por_pagina) {
            self.linhas_por_pagina
        } else {
            DEFAULT_ROWS_PER_PAGE
        }
    }

    pub fn tema(&self) -> &str {
        let tema = self.tema.trim();
        if VALID_TEMAS.contains(&tema) {
            tema
        } else {
            DEFAULT_TEMA
        }
    }

    pub fn acompanhamento(&self) -> String {
        let value = self.sla_acompanhamento_pct.trim().to_lowercase();
        if VALID_ACOMPANHAMENTO.contains(&value.as_str()) {
            value
        } else {
            DEFAULT_ACOMPANHAMENTO.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = UserConfig::default();
        assert_eq!(config.versao, CONFIG_VERSION);
        assert_eq!(config.rows_per_page(), 25);
        assert_eq!(config.tema(), "claro");
        assert_eq!(config.acompanhamento(), "texto");
        assert!(!config.incluir_nao_entregues_outras_datas);
    }

    #[test]
    fn test_partial_bag_deserializes() {
        let config: UserConfig =
            serde_json::from_value(json!({"linhas_por_pagina": 100})).unwrap();
        assert_eq!(config.rows_per_page(), 100);
        assert_eq!(config.tema(), "claro");
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config: UserConfig = serde_json::from_value(json!({
            "linhas_por_pagina": 33,
            "tema": "neon",
            "sla_acompanhamento_pct": "Espiral"
        }))
        .unwrap();
        assert_eq!(config.rows_per_page(), DEFAULT_ROWS_PER_PAGE);
        assert_eq!(config.tema(), DEFAULT_TEMA);
        assert_eq!(config.acompanhamento(), DEFAULT_ACOMPANHAMENTO);
    }

    #[test]
    fn test_acompanhamento_normalizes_case() {
        let config = UserConfig {
            sla_acompanhamento_pct: "  Circular ".into(),
            ..Default::default()
        };
        assert_eq!(config.acompanhamento(), "circular");
    }
}
