use std::rc::Rc;

use shared::{Catalog, PivotAggregator, TransferenciaRow};
use yew::prelude::*;

use super::PivotTableView;
use crate::components::charts::StackedBarChart;
use crate::hooks::use_rows;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct TransferSummaryViewProps {
    pub api_client: ApiClient,
    pub catalog: Rc<Catalog>,
}

#[function_component(TransferSummaryView)]
pub fn transfer_summary_view(props: &TransferSummaryViewProps) -> Html {
    let rows = use_rows::<TransferenciaRow>(&props.api_client);
    let table = use_memo(
        (props.catalog.clone(), rows.state.rows.clone()),
        |(catalog, rows)| PivotAggregator::new(catalog).transfer_summary(rows),
    );

    html! {
        <section class="summary">
            <div class="summary-header">
                <h2>{"RESUMEN DE TRANSFERENCIAS"}</h2>
                <button class="btn" onclick={rows.actions.refresh.reform(|_: MouseEvent| ())}>
                    {"ACTUALIZAR"}
                </button>
            </div>
            <PivotTableView title="TRANSFERENCIAS POR CUENTA DE ORIGEN" table={(*table).clone()} />
            <StackedBarChart
                title="TRANSFERENCIAS POR SEMESTRE"
                periods={table.periods().to_vec()}
                series={table.stacked_series()}
            />
        </section>
    }
}
