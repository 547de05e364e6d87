//! Tabular rendering of fetched records.

use crate::money::MoneyMask;
use crate::{parse_fecha, EgresoRow, IngresoRow, SaldoRow, TransferenciaRow};
use std::cmp::Reverse;

/// A record shown as one line of a filterable table.
pub trait TableRow {
    /// Path segment of the record's API resource (`/api/<resource>`).
    const RESOURCE: &'static str;

    fn headers() -> &'static [&'static str];

    /// Cell texts in header order, amounts in currency styling.
    fn cells(&self, mask: &MoneyMask) -> Vec<String>;

    /// API timestamp, when the record has one.
    fn fecha(&self) -> Option<&str> {
        None
    }
}

fn money(mask: &MoneyMask, amount: &str) -> String {
    mask.format_currency(mask.parse(amount))
}

impl TableRow for IngresoRow {
    const RESOURCE: &'static str = "ingresos";

    fn headers() -> &'static [&'static str] {
        &["FECHA", "CANTIDAD", "SEMESTRE", "BANCO", "MÉTODO", "LÍNEA", "USER", "EXTRA"]
    }

    fn cells(&self, mask: &MoneyMask) -> Vec<String> {
        vec![
            self.fecha.clone(),
            money(mask, &self.cantidad),
            self.semestre.clone(),
            self.banco.clone(),
            self.metodo.clone(),
            self.linea.clone(),
            self.user.clone(),
            self.extra.clone(),
        ]
    }

    fn fecha(&self) -> Option<&str> {
        Some(&self.fecha)
    }
}

impl TableRow for EgresoRow {
    const RESOURCE: &'static str = "egresos";

    fn headers() -> &'static [&'static str] {
        &[
            "FECHA", "CUENTA", "MÉTODO", "CANTIDAD", "CANTIDAD REAL", "SEMESTRE", "CATEGORÍA", "RAZÓN",
            "AUTORIZÓ", "RESPONSABLE",
        ]
    }

    fn cells(&self, mask: &MoneyMask) -> Vec<String> {
        vec![
            self.fecha.clone(),
            self.cuenta.clone(),
            self.metodo.clone(),
            money(mask, &self.cantidad),
            money(mask, &self.cantidad_real),
            self.semestre.clone(),
            self.categoria.clone(),
            self.razon.clone(),
            self.autorizo.clone(),
            self.responsable.clone(),
        ]
    }

    fn fecha(&self) -> Option<&str> {
        Some(&self.fecha)
    }
}

impl TableRow for TransferenciaRow {
    const RESOURCE: &'static str = "transferencias";

    fn headers() -> &'static [&'static str] {
        &["FECHA", "CANTIDAD", "ORIGEN", "DESTINO", "SEMESTRE", "NOTA"]
    }

    fn cells(&self, mask: &MoneyMask) -> Vec<String> {
        vec![
            self.fecha.clone(),
            money(mask, &self.cantidad),
            self.origen.clone(),
            self.destino.clone(),
            self.semestre.clone(),
            self.nota.clone(),
        ]
    }

    fn fecha(&self) -> Option<&str> {
        Some(&self.fecha)
    }
}

impl TableRow for SaldoRow {
    const RESOURCE: &'static str = "saldos";

    fn headers() -> &'static [&'static str] {
        &["CUENTA", "SALDO"]
    }

    fn cells(&self, mask: &MoneyMask) -> Vec<String> {
        vec![self.cuenta.clone(), money(mask, &self.saldo)]
    }
}

/// Sort newest first. Rows with an unreadable timestamp go last, in their
/// original order.
pub fn sort_newest_first<T: TableRow>(rows: &mut [T]) {
    rows.sort_by_key(|row| Reverse(row.fecha().and_then(parse_fecha)));
}

/// Render every row into cell texts.
pub fn render_cells<T: TableRow>(rows: &[T], mask: &MoneyMask) -> Vec<Vec<String>> {
    rows.iter().map(|row| row.cells(mask)).collect()
}
