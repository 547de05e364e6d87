pub mod record_table;

pub use record_table::RecordTable;

use serde::de::DeserializeOwned;
use shared::TableRow;
use yew::prelude::*;

use crate::hooks::use_rows;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct RecordsPageProps {
    pub api_client: ApiClient,
    pub title: AttrValue,
    #[prop_or_default]
    pub exportable: bool,
}

/// Fetches one resource and shows it in a [`RecordTable`].
#[function_component(RecordsPage)]
pub fn records_page<T>(props: &RecordsPageProps) -> Html
where
    T: TableRow + DeserializeOwned + Clone + PartialEq + 'static,
{
    let rows = use_rows::<T>(&props.api_client);
    let export = props.exportable.then(|| props.api_client.clone());

    html! {
        <>
            <div class="page-actions">
                <button class="btn" onclick={rows.actions.refresh.reform(|_: MouseEvent| ())}>
                    {"ACTUALIZAR"}
                </button>
            </div>
            <RecordTable<T>
                title={props.title.clone()}
                rows={rows.state.rows.clone()}
                loading={rows.state.loading}
                error={rows.state.error.clone()}
                {export}
            />
        </>
    }
}
