//! CSV export of table data via browser download.

use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Types that can be exported as CSV rows.
pub trait CsvExportavel {
    /// Column headers
    fn headers() -> Vec<&'static str>;

    /// One CSV row worth of values
    fn to_csv_row(&self) -> Vec<String>;
}

/// Export a list as a CSV file and trigger the browser download.
pub fn export_to_csv<T: CsvExportavel>(data: &[T], filename: &str) -> Result<(), String> {
    if data.is_empty() {
        return Err("Nenhum dado para exportar".to_string());
    }

    let mut csv_content = String::new();

    // UTF-8 BOM so Excel decodes accented names correctly
    csv_content.push('\u{FEFF}');

    let headers = T::headers();
    csv_content.push_str(&headers.join(";"));
    csv_content.push('\n');

    for item in data {
        let row = item.to_csv_row();
        let escaped_row: Vec<String> = row.iter().map(|cell| escape_csv_cell(cell)).collect();
        csv_content.push_str(&escaped_row.join(";"));
        csv_content.push('\n');
    }

    let blob = create_csv_blob(&csv_content)?;
    download_blob(&blob, filename)?;

    Ok(())
}

/// Quote a cell when it contains the separator, quotes or line breaks.
fn escape_csv_cell(cell: &str) -> String {
    if cell.contains(';') || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        let escaped = cell.replace('"', "\"\"");
        format!("\"{}\"", escaped)
    } else {
        cell.to_string()
    }
}

fn create_csv_blob(content: &str) -> Result<Blob, String> {
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type("text/csv;charset=utf-8;");

    Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    document
        .body()
        .ok_or("No body element")?
        .append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;

    anchor.click();

    document
        .body()
        .ok_or("No body element")?
        .remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_csv_cell() {
        assert_eq!(escape_csv_cell("Lactose"), "Lactose");
        assert_eq!(escape_csv_cell("a;b"), "\"a;b\"");
        assert_eq!(escape_csv_cell("diz \"x\""), "\"diz \"\"x\"\"\"");
        assert_eq!(escape_csv_cell("a\nb"), "\"a\nb\"");
    }
}
