use shared::{Catalog, EgresoRow, IngresoRow, TransferenciaRow};
use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::forms::{NewExpenseForm, NewIncomeForm, NewTransferForm};
use components::header::{Header, Page};
use components::summary::{BalancesView, ExpenseSummaryView, IncomeSummaryView, TransferSummaryView};
use components::tables::RecordsPage;
use services::api::ApiClient;
use services::logging::Logger;

#[function_component(App)]
fn app() -> Html {
    let api_client = ApiClient::new();
    let catalog = use_memo((), |_| Catalog::default());
    let page = use_state(|| Page::NuevoIngreso);

    let on_navigate = {
        let page = page.clone();
        Callback::from(move |next: Page| {
            Logger::debug_with_component("App", &format!("navigate to {}", next.title()));
            page.set(next);
        })
    };

    let content = match *page {
        Page::NuevoIngreso => html! {
            <NewIncomeForm api_client={api_client.clone()} catalog={catalog.clone()} />
        },
        Page::NuevoEgreso => html! {
            <NewExpenseForm api_client={api_client.clone()} catalog={catalog.clone()} />
        },
        Page::NuevaTransferencia => html! {
            <NewTransferForm api_client={api_client.clone()} catalog={catalog.clone()} />
        },
        Page::Ingresos => html! {
            <RecordsPage<IngresoRow> api_client={api_client.clone()} title="INGRESOS" exportable={true} />
        },
        Page::Egresos => html! {
            <RecordsPage<EgresoRow> api_client={api_client.clone()} title="EGRESOS" exportable={true} />
        },
        Page::Transferencias => html! {
            <RecordsPage<TransferenciaRow> api_client={api_client.clone()} title="TRANSFERENCIAS" />
        },
        Page::ResumenIngresos => html! {
            <IncomeSummaryView api_client={api_client.clone()} catalog={catalog.clone()} />
        },
        Page::ResumenEgresos => html! {
            <ExpenseSummaryView api_client={api_client.clone()} catalog={catalog.clone()} />
        },
        Page::ResumenTransferencias => html! {
            <TransferSummaryView api_client={api_client.clone()} catalog={catalog.clone()} />
        },
        Page::Saldos => html! { <BalancesView api_client={api_client.clone()} /> },
    };

    html! {
        <>
            <Header current={*page} {on_navigate} />
            <main class="main">
                <div class="container">
                    {content}
                </div>
            </main>
        </>
    }
}

fn main() {
    services::logging::init_tracing();
    yew::Renderer::<App>::new().render();
}
