use std::rc::Rc;

use serde::de::DeserializeOwned;
use shared::TableRow;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Clone, PartialEq)]
pub struct RowsState<T> {
    pub rows: Rc<Vec<T>>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct UseRowsResult<T> {
    pub state: RowsState<T>,
    pub actions: UseRowsActions,
}

#[derive(Clone, PartialEq)]
pub struct UseRowsActions {
    pub refresh: Callback<()>,
}

/// Fetch the records of one resource on mount and on every refresh.
#[hook]
pub fn use_rows<T>(api_client: &ApiClient) -> UseRowsResult<T>
where
    T: TableRow + DeserializeOwned + Clone + 'static,
{
    let rows = use_state(|| Rc::new(Vec::<T>::new()));
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);

    let refresh = {
        let api_client = api_client.clone();
        let rows = rows.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            let rows = rows.clone();
            let loading = loading.clone();
            let error = error.clone();

            spawn_local(async move {
                loading.set(true);

                match api_client.list::<T>().await {
                    Ok(data) => {
                        Logger::debug_with_component(
                            "use_rows",
                            &format!("loaded {} rows from /api/{}", data.len(), T::RESOURCE),
                        );
                        rows.set(Rc::new(data));
                        error.set(None);
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "use_rows",
                            &format!("failed to load /api/{}: {}", T::RESOURCE, e),
                        );
                        error.set(Some(e.to_string()));
                    }
                }

                loading.set(false);
            });
        })
    };

    {
        let refresh = refresh.clone();
        use_effect_with((), move |_| {
            refresh.emit(());
            || ()
        });
    }

    let state = RowsState {
        rows: (*rows).clone(),
        loading: *loading,
        error: (*error).clone(),
    };

    UseRowsResult {
        state,
        actions: UseRowsActions { refresh },
    }
}
