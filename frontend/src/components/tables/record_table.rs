use std::rc::Rc;

use shared::table::render_cells;
use shared::{ExportFormat, MoneyMask, TableFilter, TableRow};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct RecordTableProps<T: TableRow + PartialEq + 'static> {
    pub title: AttrValue,
    pub rows: Rc<Vec<T>>,
    pub loading: bool,
    #[prop_or_default]
    pub error: Option<String>,
    /// Offer CSV/XLSX downloads of the filtered rows
    #[prop_or_default]
    pub export: Option<ApiClient>,
}

/// Table of fetched records with a text filter above every column.
#[function_component(RecordTable)]
pub fn record_table<T>(props: &RecordTableProps<T>) -> Html
where
    T: TableRow + PartialEq + 'static,
{
    let headers = T::headers();
    let filter = use_state(|| TableFilter::new(headers.len()));
    let cells = use_memo(props.rows.clone(), |rows| render_cells(rows, &MoneyMask::new()));
    let visible = filter.visible_rows(cells.as_slice());

    let on_filter = |column: usize| {
        let filter = filter.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*filter).clone();
            next.set(column, &input.value());
            filter.set(next);
        })
    };

    let export_button = |fmt: ExportFormat| -> Html {
        let Some(api_client) = props.export.clone() else {
            return html! {};
        };
        let filters = filter.predicates().to_vec();
        let onclick = Callback::from(move |_: MouseEvent| {
            let url = api_client.export_url(T::RESOURCE, fmt, &filters);
            Logger::info_with_component("RecordTable", &format!("exporting {}", url));
            let navigated = web_sys::window()
                .ok_or_else(|| "no window".to_string())
                .and_then(|window| window.location().set_href(&url).map_err(|e| format!("{:?}", e)));
            if let Err(reason) = navigated {
                Logger::error_with_component("RecordTable", &export_failure(&url, &reason));
            }
        });
        html! {
            <button type="button" class="btn" {onclick}>
                {format!("EXPORTAR {}", fmt.as_str().to_uppercase())}
            </button>
        }
    };

    html! {
        <section class="card records">
            <div class="records-header">
                <h2>{&props.title}</h2>
                <div class="records-actions">
                    {export_button(ExportFormat::Csv)}
                    {export_button(ExportFormat::Xlsx)}
                </div>
            </div>

            {if let Some(error) = props.error.as_ref() {
                html! { <div class="form-message error">{error}</div> }
            } else { html! {} }}

            <div class="table-container">
                <table class="records-table">
                    <thead>
                        <tr>
                            {for headers.iter().map(|h| html! { <th>{*h}</th> })}
                        </tr>
                        <tr class="filters">
                            {for (0..headers.len()).map(|column| html! {
                                <th>
                                    <input
                                        type="text"
                                        class="filter"
                                        placeholder="Filtrar"
                                        value={filter.predicates()[column].clone()}
                                        oninput={on_filter(column)}
                                    />
                                </th>
                            })}
                        </tr>
                    </thead>
                    <tbody>
                        {if props.loading && cells.is_empty() {
                            html! {
                                <tr><td class="loading" colspan={headers.len().to_string()}>{"Cargando..."}</td></tr>
                            }
                        } else {
                            html! {
                                <>
                                    {for visible.iter().map(|&index| html! {
                                        <tr>
                                            {for cells[index].iter().map(|cell| html! { <td>{cell}</td> })}
                                        </tr>
                                    })}
                                </>
                            }
                        }}
                    </tbody>
                </table>
            </div>
            <div class="records-footer">
                {format!("{} de {} registros", visible.len(), cells.len())}
            </div>
        </section>
    }
}

fn export_failure(url: &str, reason: &str) -> String {
    format!("export to {} failed: {}", url, reason)
}
