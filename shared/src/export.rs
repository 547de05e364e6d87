//! Download URLs for the server-side CSV/XLSX export.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::form_urlencoded;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `/api/<resource>/export?fmt=<fmt>&f<i>=<filter>` for every non-empty
/// column filter `i`.
pub fn export_url(resource: &str, fmt: ExportFormat, filters: &[String]) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("fmt", fmt.as_str());
    for (column, value) in filters.iter().enumerate() {
        if !value.trim().is_empty() {
            query.append_pair(&format!("f{column}"), value);
        }
    }
    format!("/api/{resource}/export?{}", query.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_url_without_filters() {
        assert_eq!(
            export_url("egresos", ExportFormat::Xlsx, &[]),
            "/api/egresos/export?fmt=xlsx"
        );
    }

    #[test]
    fn test_export_url_keeps_column_indices() {
        let filters = vec![
            String::new(),
            "NEQUI".to_string(),
            " ".to_string(),
            "PAGO NÓMINA".to_string(),
        ];
        assert_eq!(
            export_url("egresos", ExportFormat::Csv, &filters),
            "/api/egresos/export?fmt=csv&f1=NEQUI&f3=PAGO+N%C3%93MINA"
        );
    }
}
