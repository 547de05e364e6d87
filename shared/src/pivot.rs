//! Client-side aggregation of fetched rows.
//!
//! Everything here is recomputed from scratch on every refresh or selection
//! change; no table is updated incrementally.
//!
//! ## Buckets
//! - **Period cells**: (account, period) running sums over the configured
//!   account and period axes. Rows outside the axes are skipped.
//! - **Interest**: income rows whose method is the catalog's interest detail
//!   go to a per-account interest bucket instead of a period cell. The
//!   bucket counts towards the account total.

use crate::catalog::Catalog;
use crate::money::MoneyMask;
use crate::{EgresoRow, IngresoRow, TransactionRow, TransferenciaRow};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Account × period sums with an interest column.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotTable {
    accounts: Vec<String>,
    periods: Vec<String>,
    cells: Vec<Vec<Decimal>>,
    interest: Vec<Decimal>,
}

/// One rendered line of a [`PivotTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct PivotRow<'a> {
    pub account: &'a str,
    pub cells: &'a [Decimal],
    pub interest: Decimal,
    pub total: Decimal,
}

impl PivotTable {
    pub fn new(accounts: &[String], periods: &[String]) -> Self {
        Self {
            accounts: accounts.to_vec(),
            periods: periods.to_vec(),
            cells: vec![vec![Decimal::ZERO; periods.len()]; accounts.len()],
            interest: vec![Decimal::ZERO; accounts.len()],
        }
    }

    fn account_index(&self, account: &str) -> Option<usize> {
        self.accounts.iter().position(|a| a == account)
    }

    fn period_index(&self, period: &str) -> Option<usize> {
        self.periods.iter().position(|p| p == period)
    }

    /// Add to a period cell. Returns `false` when the row is off the axes.
    pub fn add(&mut self, account: &str, period: &str, amount: Decimal) -> bool {
        match (self.account_index(account), self.period_index(period)) {
            (Some(a), Some(p)) => {
                accumulate(&mut self.cells[a][p], amount);
                true
            }
            _ => false,
        }
    }

    /// Add to the interest bucket of an account.
    pub fn add_interest(&mut self, account: &str, amount: Decimal) -> bool {
        match self.account_index(account) {
            Some(a) => {
                accumulate(&mut self.interest[a], amount);
                true
            }
            None => false,
        }
    }

    pub fn accounts(&self) -> &[String] {
        &self.accounts
    }

    pub fn periods(&self) -> &[String] {
        &self.periods
    }

    pub fn cell(&self, account: &str, period: &str) -> Decimal {
        match (self.account_index(account), self.period_index(period)) {
            (Some(a), Some(p)) => self.cells[a][p],
            _ => Decimal::ZERO,
        }
    }

    pub fn interest(&self, account: &str) -> Decimal {
        self.account_index(account)
            .map(|a| self.interest[a])
            .unwrap_or(Decimal::ZERO)
    }

    /// Period cells plus interest of one account.
    pub fn row_total(&self, account: &str) -> Decimal {
        self.account_index(account)
            .map(|a| self.total_at(a))
            .unwrap_or(Decimal::ZERO)
    }

    fn total_at(&self, a: usize) -> Decimal {
        checked_sum(self.cells[a].iter().copied().chain([self.interest[a]]))
    }

    pub fn column_total(&self, period: &str) -> Decimal {
        self.period_index(period)
            .map(|p| checked_sum(self.cells.iter().map(|row| row[p])))
            .unwrap_or(Decimal::ZERO)
    }

    pub fn interest_total(&self) -> Decimal {
        checked_sum(self.interest.iter().copied())
    }

    pub fn grand_total(&self) -> Decimal {
        checked_sum((0..self.accounts.len()).map(|a| self.total_at(a)))
    }

    /// Whether any interest was booked.
    pub fn has_interest(&self) -> bool {
        self.interest.iter().any(|v| !v.is_zero())
    }

    pub fn rows(&self) -> impl Iterator<Item = PivotRow<'_>> {
        self.accounts.iter().enumerate().map(move |(a, account)| PivotRow {
            account,
            cells: &self.cells[a],
            interest: self.interest[a],
            total: self.total_at(a),
        })
    }

    /// One series per account, one value per period. Interest is left out.
    pub fn stacked_series(&self) -> Vec<ChartSeries> {
        self.accounts
            .iter()
            .zip(&self.cells)
            .map(|(account, cells)| ChartSeries {
                label: account.clone(),
                values: cells.clone(),
            })
            .collect()
    }

    /// One slice per account holding its row total.
    pub fn account_slices(&self) -> Vec<DonutSlice> {
        self.accounts
            .iter()
            .enumerate()
            .map(|(a, account)| DonutSlice {
                label: account.clone(),
                value: self.total_at(a),
            })
            .collect()
    }
}

/// A stacked-bar dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub label: String,
    pub values: Vec<Decimal>,
}

/// A donut chart slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonutSlice {
    pub label: String,
    pub value: Decimal,
}

/// Which expense amount feeds the tables and charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AmountBasis {
    /// `cantidad`
    #[default]
    Net,
    /// `cantidad_real`, including the bank levy
    Real,
}

/// Accounts and semesters currently selected in the expense summary chips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub accounts: BTreeSet<String>,
    pub semesters: BTreeSet<String>,
}

impl Selection {
    /// Everything selected.
    pub fn all(catalog: &Catalog) -> Self {
        Self {
            accounts: catalog.accounts.iter().cloned().collect(),
            semesters: catalog.semesters.iter().cloned().collect(),
        }
    }

    pub fn toggle_account(&mut self, account: &str) {
        toggle(&mut self.accounts, account);
    }

    pub fn toggle_semester(&mut self, semester: &str) {
        toggle(&mut self.semesters, semester);
    }

    pub fn contains(&self, account: &str, semester: &str) -> bool {
        self.accounts.contains(account) && self.semesters.contains(semester)
    }
}

fn toggle(set: &mut BTreeSet<String>, item: &str) {
    if !set.remove(item) {
        set.insert(item.to_string());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IncomeKpis {
    pub count: usize,
    pub total: Decimal,
    pub average: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncomeSummary {
    pub table: PivotTable,
    pub kpis: IncomeKpis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExpenseKpis {
    pub count: usize,
    pub net_total: Decimal,
    pub real_total: Decimal,
    /// Real minus net: what the bank levy cost.
    pub difference: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseSummary {
    pub net: PivotTable,
    pub real: PivotTable,
    pub categories_net: Vec<(String, Decimal)>,
    pub categories_real: Vec<(String, Decimal)>,
    pub kpis: ExpenseKpis,
}

impl ExpenseSummary {
    pub fn table(&self, basis: AmountBasis) -> &PivotTable {
        match basis {
            AmountBasis::Net => &self.net,
            AmountBasis::Real => &self.real,
        }
    }

    pub fn category_totals(&self, basis: AmountBasis) -> &[(String, Decimal)] {
        match basis {
            AmountBasis::Net => &self.categories_net,
            AmountBasis::Real => &self.categories_real,
        }
    }

    pub fn category_slices(&self, basis: AmountBasis) -> Vec<DonutSlice> {
        self.category_totals(basis)
            .iter()
            .map(|(label, value)| DonutSlice {
                label: label.clone(),
                value: *value,
            })
            .collect()
    }
}

/// Add `amount` into `total`. An amount that would overflow the total is
/// counted as zero.
fn accumulate(total: &mut Decimal, amount: Decimal) {
    match total.checked_add(amount) {
        Some(sum) => *total = sum,
        None => {
            let current = *total;
            tracing::warn!(total = %current, %amount, "sum overflows, counting amount as zero");
        }
    }
}

fn checked_sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values.into_iter().fold(Decimal::ZERO, |mut total, value| {
        accumulate(&mut total, value);
        total
    })
}

/// Builds the summaries over the catalog's account and semester axes.
#[derive(Debug, Clone)]
pub struct PivotAggregator {
    accounts: Vec<String>,
    periods: Vec<String>,
    categories: Vec<String>,
    interest_detail: String,
    mask: MoneyMask,
}

impl PivotAggregator {
    pub fn new(catalog: &Catalog) -> Self {
        Self::with_mask(catalog, MoneyMask::new())
    }

    pub fn with_mask(catalog: &Catalog, mask: MoneyMask) -> Self {
        Self {
            accounts: catalog.accounts.clone(),
            periods: catalog.semesters.clone(),
            categories: catalog.expense_categories.clone(),
            interest_detail: catalog.interest_detail.clone(),
            mask,
        }
    }

    fn empty_table(&self) -> PivotTable {
        PivotTable::new(&self.accounts, &self.periods)
    }

    /// Pivot any mix of rows on their primary amount (net for expenses).
    pub fn pivot(&self, rows: &[TransactionRow]) -> PivotTable {
        let mut table = self.empty_table();
        let mut skipped = 0usize;
        for row in rows {
            let amount = self.mask.parse(row.amount());
            let booked = match row {
                TransactionRow::Income(income) if income.metodo == self.interest_detail => {
                    table.add_interest(&income.banco, amount)
                }
                _ => table.add(row.account(), row.period(), amount),
            };
            if !booked {
                skipped += 1;
            }
        }
        tracing::debug!(rows = rows.len(), skipped, "pivot recomputed");
        table
    }

    pub fn income_summary(&self, rows: &[IngresoRow]) -> IncomeSummary {
        let rows: Vec<TransactionRow> = rows.iter().cloned().map(TransactionRow::from).collect();
        let total = checked_sum(rows.iter().map(|r| self.mask.parse(r.amount())));
        let count = rows.len();
        let average = if count == 0 {
            Decimal::ZERO
        } else {
            (total / Decimal::from(count)).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        };

        IncomeSummary {
            table: self.pivot(&rows),
            kpis: IncomeKpis {
                count,
                total,
                average,
            },
        }
    }

    /// Summarize the expense rows inside `selection`.
    pub fn expense_summary(&self, rows: &[EgresoRow], selection: &Selection) -> ExpenseSummary {
        let mut net = self.empty_table();
        let mut real = self.empty_table();
        let mut categories_net = vec![Decimal::ZERO; self.categories.len()];
        let mut categories_real = vec![Decimal::ZERO; self.categories.len()];
        let mut kpis = ExpenseKpis::default();

        for row in rows.iter().filter(|r| selection.contains(&r.cuenta, &r.semestre)) {
            let amount_net = self.mask.parse(&row.cantidad);
            let amount_real = self.mask.parse(&row.cantidad_real);

            kpis.count += 1;
            accumulate(&mut kpis.net_total, amount_net);
            accumulate(&mut kpis.real_total, amount_real);

            net.add(&row.cuenta, &row.semestre, amount_net);
            real.add(&row.cuenta, &row.semestre, amount_real);

            if let Some(c) = self.categories.iter().position(|c| *c == row.categoria) {
                accumulate(&mut categories_net[c], amount_net);
                accumulate(&mut categories_real[c], amount_real);
            }
        }
        kpis.difference = kpis.real_total.checked_sub(kpis.net_total).unwrap_or_else(|| {
            tracing::warn!(real = %kpis.real_total, net = %kpis.net_total, "difference overflows, using zero");
            Decimal::ZERO
        });

        tracing::debug!(
            rows = rows.len(),
            selected = kpis.count,
            "expense summary recomputed"
        );

        let label = |values: Vec<Decimal>| -> Vec<(String, Decimal)> {
            self.categories.iter().cloned().zip(values).collect()
        };
        ExpenseSummary {
            net,
            real,
            categories_net: label(categories_net),
            categories_real: label(categories_real),
            kpis,
        }
    }

    /// Transfers bucketed by origin account × period.
    pub fn transfer_summary(&self, rows: &[TransferenciaRow]) -> PivotTable {
        let rows: Vec<TransactionRow> = rows.iter().cloned().map(TransactionRow::from).collect();
        self.pivot(&rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ingreso(banco: &str, semestre: &str, metodo: &str, cantidad: &str) -> IngresoRow {
        IngresoRow {
            fecha: "14/03/2026 09:15:00".to_string(),
            cantidad: cantidad.to_string(),
            semestre: semestre.to_string(),
            banco: banco.to_string(),
            metodo: metodo.to_string(),
            linea: String::new(),
            user: String::new(),
            extra: String::new(),
        }
    }

    fn egreso(cuenta: &str, semestre: &str, categoria: &str, neto: &str, real: &str) -> EgresoRow {
        EgresoRow {
            fecha: "14/03/2026 09:15:00".to_string(),
            cuenta: cuenta.to_string(),
            metodo: "PAGO".to_string(),
            cantidad: neto.to_string(),
            cantidad_real: real.to_string(),
            semestre: semestre.to_string(),
            categoria: categoria.to_string(),
            razon: String::new(),
            autorizo: "TT".to_string(),
            responsable: "TT".to_string(),
        }
    }

    #[test]
    fn test_expense_cells_accumulate() {
        let catalog = Catalog::default();
        let aggregator = PivotAggregator::new(&catalog);
        let rows: Vec<TransactionRow> = vec![
            egreso("NEQUI", "126", "OCIO", "100.000,00", "100.400,00").into(),
            egreso("NEQUI", "126", "OCIO", "50.000,50", "50.200,50").into(),
        ];

        let table = aggregator.pivot(&rows);
        assert_eq!(table.cell("NEQUI", "126"), dec!(150000.50));
        assert_eq!(table.row_total("NEQUI"), dec!(150000.50));
        assert_eq!(table.column_total("126"), dec!(150000.50));
        assert_eq!(table.grand_total(), dec!(150000.50));
    }

    #[test]
    fn test_totals_are_order_independent() {
        let catalog = Catalog::default();
        let aggregator = PivotAggregator::new(&catalog);
        let rows = vec![
            ingreso("NEQUI", "126", "NEQUI", "1.000,00"),
            ingreso("DAVIVIENDA", "226", "DAVIPLATA", "2.500,25"),
            ingreso("NEQUI", "226", "PAGO INTERESES", "12,10"),
            ingreso("BANCOLOMBIA_1423", "126", "WOMPI", "300.000"),
            ingreso("EFECTY", "526", "GIRO NACIONAL", "75.000,00"),
        ];
        let forward = aggregator.income_summary(&rows);

        let mut reversed = rows.clone();
        reversed.reverse();
        let mut rotated = rows.clone();
        rotated.rotate_left(2);

        for permutation in [reversed, rotated] {
            let summary = aggregator.income_summary(&permutation);
            assert_eq!(summary, forward);
        }
        assert_eq!(forward.table.grand_total(), dec!(378512.35));
    }

    #[test]
    fn test_interest_has_its_own_bucket() {
        let catalog = Catalog::default();
        let aggregator = PivotAggregator::new(&catalog);
        let rows = vec![
            ingreso("NEQUI", "126", "PAGO INTERESES", "10,00"),
            ingreso("NEQUI", "126", "NEQUI", "90,00"),
        ];

        let summary = aggregator.income_summary(&rows);
        let table = &summary.table;
        assert_eq!(table.cell("NEQUI", "126"), dec!(90));
        assert_eq!(table.interest("NEQUI"), dec!(10));
        assert_eq!(table.row_total("NEQUI"), dec!(100));
        assert_eq!(table.column_total("126"), dec!(90));
        assert_eq!(table.interest_total(), dec!(10));
        assert_eq!(table.grand_total(), dec!(100));
        assert!(table.has_interest());
    }

    #[test]
    fn test_rows_off_axes_are_skipped_but_counted_in_kpis() {
        let catalog = Catalog::default();
        let aggregator = PivotAggregator::new(&catalog);
        let rows = vec![
            ingreso("CAJA MENOR", "126", "EFECTIVO", "500,00"),
            ingreso("NEQUI", "999", "NEQUI", "250,00"),
            ingreso("NEQUI", "126", "NEQUI", "250,00"),
        ];

        let summary = aggregator.income_summary(&rows);
        assert_eq!(summary.table.grand_total(), dec!(250));
        assert_eq!(summary.kpis.count, 3);
        assert_eq!(summary.kpis.total, dec!(1000));
        assert_eq!(summary.kpis.average, dec!(333.33));
    }

    #[test]
    fn test_empty_income_summary() {
        let catalog = Catalog::default();
        let summary = PivotAggregator::new(&catalog).income_summary(&[]);
        assert_eq!(summary.kpis, IncomeKpis::default());
        assert_eq!(summary.table.grand_total(), Decimal::ZERO);
        assert_eq!(summary.table.rows().count(), catalog.accounts.len());
    }

    #[test]
    fn test_malformed_amount_counts_as_zero() {
        let catalog = Catalog::default();
        let aggregator = PivotAggregator::new(&catalog);
        let rows = vec![
            ingreso("NEQUI", "126", "NEQUI", "abc"),
            ingreso("NEQUI", "126", "NEQUI", "5,00"),
        ];
        let summary = aggregator.income_summary(&rows);
        assert_eq!(summary.table.cell("NEQUI", "126"), dec!(5));
    }

    #[test]
    fn test_overflowing_amounts_do_not_panic() {
        let catalog = Catalog::default();
        let aggregator = PivotAggregator::new(&catalog);
        let huge = "79.228.162.514.264.337.593.543.950.335";

        let rows = vec![
            ingreso("NEQUI", "126", "NEQUI", huge),
            ingreso("NEQUI", "126", "NEQUI", huge),
            ingreso("DAVIVIENDA", "126", "DAVIVIENDA", huge),
        ];
        let summary = aggregator.income_summary(&rows);
        assert_eq!(summary.kpis.count, 3);
        assert_eq!(summary.kpis.total, Decimal::MAX);
        assert_eq!(summary.table.cell("NEQUI", "126"), Decimal::MAX);
        assert_eq!(summary.table.column_total("126"), Decimal::MAX);
        assert_eq!(summary.table.grand_total(), Decimal::MAX);

        let rows = vec![
            egreso("NEQUI", "126", "MERCADO", huge, huge),
            egreso("NEQUI", "126", "MERCADO", huge, "1,00"),
        ];
        let summary = aggregator.expense_summary(&rows, &Selection::all(&catalog));
        assert_eq!(summary.kpis.net_total, Decimal::MAX);
        assert_eq!(summary.kpis.real_total, Decimal::MAX);
        assert_eq!(summary.kpis.difference, Decimal::ZERO);
        let mercado = summary
            .category_totals(AmountBasis::Net)
            .iter()
            .find(|(category, _)| category == "MERCADO")
            .map(|(_, total)| *total);
        assert_eq!(mercado, Some(Decimal::MAX));
        assert_eq!(summary.net.cell("NEQUI", "126"), Decimal::MAX);
    }

    #[test]
    fn test_expense_summary_net_and_real() {
        let catalog = Catalog::default();
        let aggregator = PivotAggregator::new(&catalog);
        let rows = vec![
            egreso("NEQUI", "126", "MERCADO", "100.000,00", "100.400,00"),
            egreso("DAVIVIENDA", "226", "CARROS", "20.000,00", "20.080,00"),
            egreso("DAVIVIENDA", "226", "SIN CATEGORIA", "1.000,00", "1.000,00"),
        ];

        let summary = aggregator.expense_summary(&rows, &Selection::all(&catalog));
        assert_eq!(summary.kpis.count, 3);
        assert_eq!(summary.kpis.net_total, dec!(121000));
        assert_eq!(summary.kpis.real_total, dec!(121480));
        assert_eq!(summary.kpis.difference, dec!(480));

        assert_eq!(summary.table(AmountBasis::Net).cell("DAVIVIENDA", "226"), dec!(21000));
        assert_eq!(summary.table(AmountBasis::Real).cell("DAVIVIENDA", "226"), dec!(21080));

        let categories = summary.category_totals(AmountBasis::Net);
        assert_eq!(categories.len(), catalog.expense_categories.len());
        assert_eq!(categories[0].0, catalog.expense_categories[0]);
        let carros = categories.iter().find(|(c, _)| c == "CARROS").unwrap();
        assert_eq!(carros.1, dec!(20000));

        let slices = summary.category_slices(AmountBasis::Real);
        let mercado = slices.iter().find(|s| s.label == "MERCADO").unwrap();
        assert_eq!(mercado.value, dec!(100400));
    }

    #[test]
    fn test_selection_filters_everything() {
        let catalog = Catalog::default();
        let aggregator = PivotAggregator::new(&catalog);
        let rows = vec![
            egreso("NEQUI", "126", "OCIO", "10,00", "10,04"),
            egreso("DAVIVIENDA", "126", "OCIO", "20,00", "20,08"),
            egreso("NEQUI", "226", "OCIO", "30,00", "30,12"),
        ];

        let mut selection = Selection::all(&catalog);
        selection.toggle_account("DAVIVIENDA");
        selection.toggle_semester("226");
        let summary = aggregator.expense_summary(&rows, &selection);
        assert_eq!(summary.kpis.count, 1);
        assert_eq!(summary.kpis.net_total, dec!(10));
        assert_eq!(summary.net.grand_total(), dec!(10));

        selection.toggle_account("DAVIVIENDA");
        let summary = aggregator.expense_summary(&rows, &selection);
        assert_eq!(summary.kpis.count, 2);
    }

    #[test]
    fn test_chart_datasets() {
        let catalog = Catalog::default();
        let aggregator = PivotAggregator::new(&catalog);
        let rows: Vec<TransactionRow> = vec![
            ingreso("NEQUI", "226", "NEQUI", "40,00").into(),
            ingreso("NEQUI", "126", "PAGO INTERESES", "2,00").into(),
        ];
        let table = aggregator.pivot(&rows);

        let series = table.stacked_series();
        assert_eq!(series.len(), catalog.accounts.len());
        let nequi = series.iter().find(|s| s.label == "NEQUI").unwrap();
        assert_eq!(nequi.values.len(), catalog.semesters.len());
        assert_eq!(nequi.values.iter().copied().sum::<Decimal>(), dec!(40));

        let slices = table.account_slices();
        let nequi = slices.iter().find(|s| s.label == "NEQUI").unwrap();
        assert_eq!(nequi.value, dec!(42));
    }

    #[test]
    fn test_transfers_bucket_by_origin() {
        let catalog = Catalog::default();
        let aggregator = PivotAggregator::new(&catalog);
        let rows = vec![TransferenciaRow {
            fecha: "01/02/2026 10:00:00".to_string(),
            cantidad: "500,00".to_string(),
            origen: "DAVIVIENDA".to_string(),
            destino: "NEQUI".to_string(),
            semestre: "226".to_string(),
            nota: String::new(),
        }];
        let table = aggregator.transfer_summary(&rows);
        assert_eq!(table.cell("DAVIVIENDA", "226"), dec!(500));
        assert_eq!(table.row_total("NEQUI"), Decimal::ZERO);
    }
}
