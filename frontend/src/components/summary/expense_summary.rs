use std::rc::Rc;

use shared::{AmountBasis, Catalog, EgresoRow, MoneyMask, PivotAggregator, Selection};
use yew::prelude::*;

use super::{KpiCard, PivotTableView};
use crate::components::charts::{DonutChart, StackedBarChart};
use crate::hooks::use_rows;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct ExpenseSummaryViewProps {
    pub api_client: ApiClient,
    pub catalog: Rc<Catalog>,
}

#[derive(Properties, PartialEq)]
struct ChipsProps {
    options: Vec<String>,
    selected: Vec<String>,
    on_toggle: Callback<String>,
}

#[function_component(Chips)]
fn chips(props: &ChipsProps) -> Html {
    html! {
        <div class="chips">
            {for props.options.iter().map(|option| {
                let active = props.selected.contains(option);
                let onclick = {
                    let on_toggle = props.on_toggle.clone();
                    let option = option.clone();
                    Callback::from(move |_: MouseEvent| on_toggle.emit(option.clone()))
                };
                html! {
                    <button type="button" class={classes!("chip", active.then_some("active"))} {onclick}>
                        {option}
                    </button>
                }
            })}
        </div>
    }
}

/// Expense totals restricted to the chosen accounts and semesters.
///
/// The net/real switch picks which amount feeds the pivot, the category
/// table and the charts. The KPIs always show both.
#[function_component(ExpenseSummaryView)]
pub fn expense_summary_view(props: &ExpenseSummaryViewProps) -> Html {
    let rows = use_rows::<EgresoRow>(&props.api_client);
    let selection = {
        let catalog = props.catalog.clone();
        use_state(move || Selection::all(&catalog))
    };
    let basis = use_state(AmountBasis::default);

    let summary = use_memo(
        (props.catalog.clone(), rows.state.rows.clone(), (*selection).clone()),
        |(catalog, rows, selection)| PivotAggregator::new(catalog).expense_summary(rows, selection),
    );
    let mask = MoneyMask::new();
    let kpis = summary.kpis;
    let table = summary.table(*basis);

    let on_account = {
        let selection = selection.clone();
        Callback::from(move |account: String| {
            let mut next = (*selection).clone();
            next.toggle_account(&account);
            selection.set(next);
        })
    };
    let on_semester = {
        let selection = selection.clone();
        Callback::from(move |semester: String| {
            let mut next = (*selection).clone();
            next.toggle_semester(&semester);
            selection.set(next);
        })
    };
    let basis_button = |value: AmountBasis, label: &'static str| {
        let onclick = {
            let basis = basis.clone();
            Callback::from(move |_: MouseEvent| basis.set(value))
        };
        html! {
            <button type="button" class={classes!("btn", (*basis == value).then_some("active"))} {onclick}>
                {label}
            </button>
        }
    };
    let basis_label = match *basis {
        AmountBasis::Net => "NETO",
        AmountBasis::Real => "REAL",
    };

    html! {
        <section class="summary">
            <div class="summary-header">
                <h2>{"RESUMEN DE EGRESOS"}</h2>
                <button class="btn" onclick={rows.actions.refresh.reform(|_: MouseEvent| ())}>
                    {"ACTUALIZAR"}
                </button>
            </div>

            {if let Some(error) = rows.state.error.as_ref() {
                html! { <div class="form-message error">{error}</div> }
            } else { html! {} }}

            <div class="filters">
                <Chips
                    options={props.catalog.accounts.clone()}
                    selected={selection.accounts.iter().cloned().collect::<Vec<_>>()}
                    on_toggle={on_account}
                />
                <Chips
                    options={props.catalog.semesters.clone()}
                    selected={selection.semesters.iter().cloned().collect::<Vec<_>>()}
                    on_toggle={on_semester}
                />
                <div class="basis-toggle">
                    {basis_button(AmountBasis::Net, "NETO")}
                    {basis_button(AmountBasis::Real, "REAL")}
                </div>
            </div>

            <div class="kpis">
                <KpiCard label="TOTAL NETO" value={mask.format_currency(kpis.net_total)} />
                <KpiCard label="TOTAL REAL" value={mask.format_currency(kpis.real_total)} />
                <KpiCard label="DIFERENCIA" value={mask.format_currency(kpis.difference)} />
                <KpiCard label="# REGISTROS" value={kpis.count.to_string()} />
            </div>

            <PivotTableView title="EGRESOS NETOS" table={summary.net.clone()} />
            <PivotTableView title="EGRESOS REALES" table={summary.real.clone()} />

            <section class="card pivot">
                <h3>{format!("EGRESOS POR CATEGORÍA ({})", basis_label)}</h3>
                <table class="pivot-table">
                    <thead>
                        <tr><th>{"CATEGORÍA"}</th><th>{"TOTAL"}</th></tr>
                    </thead>
                    <tbody>
                        {for summary.category_totals(*basis).iter().map(|(category, total)| html! {
                            <tr>
                                <td>{category}</td>
                                <td class="amount">{mask.format_currency(*total)}</td>
                            </tr>
                        })}
                    </tbody>
                </table>
            </section>

            <div class="charts">
                <StackedBarChart
                    title={format!("EGRESOS POR SEMESTRE ({})", basis_label)}
                    periods={table.periods().to_vec()}
                    series={table.stacked_series()}
                />
                <DonutChart
                    title={format!("PARTICIPACIÓN POR CATEGORÍA ({})", basis_label)}
                    slices={summary.category_slices(*basis)}
                />
            </div>
        </section>
    }
}
