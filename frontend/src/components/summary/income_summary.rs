use std::rc::Rc;

use shared::{Catalog, IngresoRow, MoneyMask, PivotAggregator};
use yew::prelude::*;

use super::{KpiCard, PivotTableView};
use crate::components::charts::{DonutChart, StackedBarChart};
use crate::hooks::use_rows;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct IncomeSummaryViewProps {
    pub api_client: ApiClient,
    pub catalog: Rc<Catalog>,
}

/// Income totals per account and semester, with interest payments apart.
#[function_component(IncomeSummaryView)]
pub fn income_summary_view(props: &IncomeSummaryViewProps) -> Html {
    let rows = use_rows::<IngresoRow>(&props.api_client);
    let summary = use_memo(
        (props.catalog.clone(), rows.state.rows.clone()),
        |(catalog, rows)| PivotAggregator::new(catalog).income_summary(rows),
    );
    let mask = MoneyMask::new();
    let kpis = summary.kpis;

    html! {
        <section class="summary">
            <div class="summary-header">
                <h2>{"RESUMEN DE INGRESOS"}</h2>
                <button class="btn" onclick={rows.actions.refresh.reform(|_: MouseEvent| ())}>
                    {"ACTUALIZAR"}
                </button>
            </div>

            {if let Some(error) = rows.state.error.as_ref() {
                html! { <div class="form-message error">{error}</div> }
            } else { html! {} }}

            <div class="kpis">
                <KpiCard label="TOTAL" value={mask.format_currency(kpis.total)} />
                <KpiCard label="# REGISTROS" value={kpis.count.to_string()} />
                <KpiCard label="PROMEDIO" value={mask.format_currency(kpis.average)} />
            </div>

            <PivotTableView
                title="INGRESOS POR CUENTA Y SEMESTRE"
                table={summary.table.clone()}
                interest_label={Some(AttrValue::from("INTERESES"))}
            />

            <div class="charts">
                <StackedBarChart
                    title="INGRESOS POR SEMESTRE"
                    periods={summary.table.periods().to_vec()}
                    series={summary.table.stacked_series()}
                />
                <DonutChart title="PARTICIPACIÓN POR CUENTA" slices={summary.table.account_slices()} />
            </div>
        </section>
    }
}
