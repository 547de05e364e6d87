use shared::{MoneyMask, PivotTable};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PivotTableViewProps {
    pub title: AttrValue,
    pub table: PivotTable,
    /// Label of the extra column fed by interest payments
    #[prop_or_default]
    pub interest_label: Option<AttrValue>,
}

/// Accounts down, periods across, totals on the right and at the bottom.
#[function_component(PivotTableView)]
pub fn pivot_table_view(props: &PivotTableViewProps) -> Html {
    let mask = MoneyMask::new();
    let table = &props.table;
    let interest_label = props.interest_label.clone();
    let money = |value| mask.format_currency(value);

    html! {
        <section class="card pivot">
            <h3>{&props.title}</h3>
            <div class="table-container">
                <table class="pivot-table">
                    <thead>
                        <tr>
                            <th>{"CUENTA"}</th>
                            {for table.periods().iter().map(|p| html! { <th>{p}</th> })}
                            {for interest_label.iter().map(|label| html! { <th>{label}</th> })}
                            <th>{"TOTAL"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {for table.rows().map(|row| html! {
                            <tr>
                                <td class="account">{row.account}</td>
                                {for row.cells.iter().map(|v| html! { <td class="amount">{money(*v)}</td> })}
                                {if interest_label.is_some() {
                                    html! { <td class="amount">{money(row.interest)}</td> }
                                } else { html! {} }}
                                <td class="amount total">{money(row.total)}</td>
                            </tr>
                        })}
                    </tbody>
                    <tfoot>
                        <tr>
                            <td>{"TOTAL"}</td>
                            {for table.periods().iter().map(|p| html! {
                                <td class="amount">{money(table.column_total(p))}</td>
                            })}
                            {if interest_label.is_some() {
                                html! { <td class="amount">{money(table.interest_total())}</td> }
                            } else { html! {} }}
                            <td class="amount total">{money(table.grand_total())}</td>
                        </tr>
                    </tfoot>
                </table>
            </div>
        </section>
    }
}
