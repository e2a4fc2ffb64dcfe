//! Response shapes of the imported-table endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One row of a stored import table, already flattened server-side to a
/// list of cell strings in header order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// One page of an imported table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TablePage {
    #[serde(default)]
    pub data: Vec<TableRow>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub header: Option<Vec<String>>,
}

/// One motorista-collection document: a flat column-name to cell-value
/// record, kept loose because the sheet layout varies between imports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderDoc(pub serde_json::Map<String, Value>);

impl OrderDoc {
    /// Cell as display text. Absent and `null` cells become the empty
    /// string, numbers and booleans their plain rendering.
    pub fn field(&self, key: &str) -> String {
        match self.0.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            Some(other) => other.to_string(),
        }
    }
}

/// One page of motorista documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderDocPage {
    #[serde(default)]
    pub data: Vec<OrderDoc>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasResponse {
    #[serde(default)]
    pub datas: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedResponse {
    #[serde(default)]
    pub saved: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdatedResponse {
    #[serde(default)]
    pub updated: u64,
    #[serde(default)]
    pub inserted: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeletedResponse {
    #[serde(default)]
    pub deleted: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_doc_field_coercion() {
        let doc: OrderDoc = serde_json::from_value(json!({
            "Base de entrega": "Base Norte",
            "Total": 12,
            "Ativo": true,
            "Obs": null
        }))
        .unwrap();
        assert_eq!(doc.field("Base de entrega"), "Base Norte");
        assert_eq!(doc.field("Total"), "12");
        assert_eq!(doc.field("Ativo"), "true");
        assert_eq!(doc.field("Obs"), "");
        assert_eq!(doc.field("inexistente"), "");
    }

    #[test]
    fn test_table_page_defaults() {
        let page: TablePage = serde_json::from_str("{}").unwrap();
        assert_eq!(page.total, 0);
        assert!(page.data.is_empty());
        assert!(page.header.is_none());
    }

    #[test]
    fn test_table_row_rename() {
        let row: TableRow =
            serde_json::from_value(json!({"_id": "abc", "values": ["x", "y"]})).unwrap();
        assert_eq!(row.id, "abc");
        assert_eq!(row.values, vec!["x", "y"]);
    }
}
