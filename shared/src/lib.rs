use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod export;
pub mod filter;
pub mod form;
pub mod money;
pub mod pivot;
pub mod table;
pub mod validation;

pub use catalog::{Catalog, CategoryFieldSet, FieldInput, FieldKey, FieldSpec};
pub use export::{export_url, ExportFormat};
pub use filter::{MatchMode, SearchableSelect, TableFilter};
pub use form::{ExpenseForm, FieldDescriptor, IncomeForm, TransferForm};
pub use money::{MoneyFormat, MoneyInput, MoneyMask};
pub use pivot::{AmountBasis, PivotAggregator, PivotTable, Selection};
pub use table::TableRow;
pub use validation::{FormValidator, ValidationError, ValidationErrors};

/// Timestamp format used by the API in every `fecha` field.
pub const FECHA_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Request for registering an income (`POST /api/ingresos`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngresoRequest {
    /// Masked display amount, e.g. `"$ 1.234,50"`
    pub monto: String,
    pub semestre: String,
    pub cuenta: String,
    pub detalle: String,
    pub wompi_metodo: Option<String>,
    pub incluir_linea_usuario: bool,
    pub linea: Option<String>,
    pub usuario: Option<String>,
}

/// Request for registering an expense (`POST /api/egresos`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EgresoRequest {
    pub monto: String,
    pub cuenta: String,
    pub metodo: String,
    pub semestre: String,
    pub categoria: String,
    pub mes: Option<String>,
    pub nombre_carro: Option<String>,
    pub motivo_carro: Option<String>,
    pub razon: Option<String>,
    pub autorizo: String,
    pub responsable: String,
}

/// Request for moving money between two accounts (`POST /api/transferencias`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferenciaRequest {
    pub monto: String,
    pub origen: String,
    pub destino: String,
    pub semestre: String,
    pub nota: Option<String>,
}

/// Successful response of every create endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRecordResponse {
    pub ok: bool,
    pub message: String,
}

/// Body of a rejected request.
///
/// `detail` is usually a message, but validation failures of the server
/// framework send a list of objects instead.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ApiErrorBody {
    /// Human-readable message, when the server sent one.
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            Some(serde_json::Value::Array(items)) => items
                .iter()
                .find_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .map(str::to_string),
            _ => None,
        }
    }
}

/// One row of `GET /api/ingresos`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngresoRow {
    pub fecha: String,
    pub cantidad: String,
    pub semestre: String,
    pub banco: String,
    pub metodo: String,
    #[serde(default)]
    pub linea: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub extra: String,
}

/// One row of `GET /api/egresos`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EgresoRow {
    pub fecha: String,
    pub cuenta: String,
    pub metodo: String,
    /// Net amount
    pub cantidad: String,
    /// Amount including the bank levy
    #[serde(default)]
    pub cantidad_real: String,
    pub semestre: String,
    pub categoria: String,
    #[serde(default)]
    pub razon: String,
    #[serde(default)]
    pub autorizo: String,
    #[serde(default)]
    pub responsable: String,
}

/// One row of `GET /api/transferencias`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferenciaRow {
    pub fecha: String,
    pub cantidad: String,
    pub origen: String,
    pub destino: String,
    pub semestre: String,
    #[serde(default)]
    pub nota: String,
}

/// One row of `GET /api/saldos`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaldoRow {
    pub cuenta: String,
    pub saldo: String,
}

/// Any record the API returns, as seen by the aggregators
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionRow {
    Income(IngresoRow),
    Expense(EgresoRow),
    Transfer(TransferenciaRow),
}

impl TransactionRow {
    pub fn date(&self) -> &str {
        match self {
            TransactionRow::Income(row) => &row.fecha,
            TransactionRow::Expense(row) => &row.fecha,
            TransactionRow::Transfer(row) => &row.fecha,
        }
    }

    /// Primary amount as sent by the API (net amount for expenses)
    pub fn amount(&self) -> &str {
        match self {
            TransactionRow::Income(row) => &row.cantidad,
            TransactionRow::Expense(row) => &row.cantidad,
            TransactionRow::Transfer(row) => &row.cantidad,
        }
    }

    /// Account the amount is booked against (origin for transfers)
    pub fn account(&self) -> &str {
        match self {
            TransactionRow::Income(row) => &row.banco,
            TransactionRow::Expense(row) => &row.cuenta,
            TransactionRow::Transfer(row) => &row.origen,
        }
    }

    pub fn period(&self) -> &str {
        match self {
            TransactionRow::Income(row) => &row.semestre,
            TransactionRow::Expense(row) => &row.semestre,
            TransactionRow::Transfer(row) => &row.semestre,
        }
    }

    /// Parsed `fecha`, `None` when the server sent something unexpected
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        parse_fecha(self.date())
    }
}

impl From<IngresoRow> for TransactionRow {
    fn from(row: IngresoRow) -> Self {
        TransactionRow::Income(row)
    }
}

impl From<EgresoRow> for TransactionRow {
    fn from(row: EgresoRow) -> Self {
        TransactionRow::Expense(row)
    }
}

impl From<TransferenciaRow> for TransactionRow {
    fn from(row: TransferenciaRow) -> Self {
        TransactionRow::Transfer(row)
    }
}

/// Parse an API timestamp such as `"14/03/2026 09:15:00"`
pub fn parse_fecha(fecha: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(fecha.trim(), FECHA_FORMAT).ok()
}
