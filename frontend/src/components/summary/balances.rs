use rust_decimal::Decimal;
use shared::{MoneyMask, SaldoRow};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct BalancesViewProps {
    pub api_client: ApiClient,
}

/// Current balance of every account plus the overall sum.
#[function_component(BalancesView)]
pub fn balances_view(props: &BalancesViewProps) -> Html {
    let balances = use_state(Vec::<SaldoRow>::new);
    let error = use_state(|| None::<String>);

    {
        let api_client = props.api_client.clone();
        let balances = balances.clone();
        let error = error.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match api_client.saldos().await {
                    Ok(rows) => balances.set(rows),
                    Err(e) => {
                        Logger::error_with_component("BalancesView", &format!("failed to load balances: {}", e));
                        error.set(Some(e.to_string()));
                    }
                }
            });
            || ()
        });
    }

    let mask = MoneyMask::new();
    let total: Decimal = balances.iter().map(|b| mask.parse(&b.saldo)).sum();

    html! {
        <section class="card balances">
            <h2>{"SALDOS"}</h2>
            {if let Some(error) = (*error).as_ref() {
                html! { <div class="form-message error">{error}</div> }
            } else { html! {} }}
            <table class="pivot-table">
                <thead>
                    <tr><th>{"CUENTA"}</th><th>{"SALDO"}</th></tr>
                </thead>
                <tbody>
                    {for balances.iter().map(|b| html! {
                        <tr>
                            <td>{&b.cuenta}</td>
                            <td class="amount">{mask.format_currency(mask.parse(&b.saldo))}</td>
                        </tr>
                    })}
                </tbody>
                <tfoot>
                    <tr>
                        <td>{"TOTAL"}</td>
                        <td class="amount total">{mask.format_currency(total)}</td>
                    </tr>
                </tfoot>
            </table>
        </section>
    }
}
