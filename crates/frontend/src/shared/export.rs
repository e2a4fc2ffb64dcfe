//! CSV download of the currently rendered table.

use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::pipeline::view::TableView;

fn csv_cell(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Semicolon-separated with a UTF-8 BOM so Excel opens accented text
/// correctly.
pub fn build_csv(table: &TableView) -> String {
    let mut csv = String::from("\u{FEFF}");
    csv.push_str(
        &table
            .header_values
            .iter()
            .map(|h| csv_cell(h))
            .collect::<Vec<_>>()
            .join(";"),
    );
    csv.push('\n');
    for row in &table.body_rows {
        csv.push_str(
            &row.values
                .iter()
                .map(|v| csv_cell(v))
                .collect::<Vec<_>>()
                .join(";"),
        );
        csv.push('\n');
    }
    csv
}

/// Triggers a browser download through a temporary object URL.
pub fn download_csv(file_stem: &str, table: &TableView) -> Result<(), String> {
    let csv = build_csv(table);

    let blob_parts = js_sys::Array::new();
    blob_parts.push(&wasm_bindgen::JsValue::from_str(&csv));

    let blob_props = BlobPropertyBag::new();
    blob_props.set_type("text/csv;charset=utf-8;");

    let blob = Blob::new_with_str_sequence_and_options(&blob_parts, &blob_props)
        .map_err(|e| format!("Failed to create blob: {:?}", e))?;

    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|e| format!("Failed to create URL: {:?}", e))?;

    let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
    let document = window.document().ok_or_else(|| "no document".to_string())?;

    let a = document
        .create_element("a")
        .map_err(|e| format!("Failed to create element: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    a.set_href(&url);
    let filename = format!(
        "{}_{}.csv",
        file_stem,
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    );
    a.set_download(&filename);
    a.click();

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::view::BodyRow;

    #[test]
    fn test_build_csv_escapes_and_joins() {
        let table = TableView {
            header_values: vec!["Motorista".into(), "% SLA".into()],
            body_rows: vec![BodyRow {
                id: "r0".into(),
                values: vec!["Zé \"Rápido\"".into(), "98.3%".into()],
            }],
        };
        let csv = build_csv(&table);
        assert!(csv.starts_with('\u{FEFF}'));
        assert!(csv.contains("\"Motorista\";\"% SLA\"\n"));
        assert!(csv.contains("\"Zé \"\"Rápido\"\"\";\"98.3%\"\n"));
    }
}
