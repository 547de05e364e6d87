use std::rc::Rc;

use shared::{Catalog, FormValidator, MoneyInput, TransferForm};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{updater, MoneyField, SelectField, TextField};
use crate::hooks::use_submission;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct NewTransferFormProps {
    pub api_client: ApiClient,
    pub catalog: Rc<Catalog>,
}

#[function_component(NewTransferForm)]
pub fn new_transfer_form(props: &NewTransferFormProps) -> Html {
    let form = use_state(TransferForm::default);
    let submission = use_submission("NewTransferForm");
    let catalog = props.catalog.clone();

    let on_amount = updater(&form, |f: &mut TransferForm, monto: MoneyInput| f.monto = monto);
    let on_origin = updater(&form, |f: &mut TransferForm, v: String| f.origen = v);
    let on_destination = updater(&form, |f: &mut TransferForm, v: String| f.destino = v);
    let on_semester = updater(&form, |f: &mut TransferForm, v: String| f.semestre = v);
    let on_note = updater(&form, |f: &mut TransferForm, v: String| f.nota = v);

    let onsubmit = {
        let form = form.clone();
        let submission = submission.clone();
        let api_client = props.api_client.clone();
        let catalog = catalog.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if submission.is_submitting() {
                return;
            }

            let request = match FormValidator::new(&catalog).validate_transfer(&form) {
                Ok(request) => request,
                Err(errors) => {
                    submission.reject(&errors);
                    return;
                }
            };

            let form = form.clone();
            let submission = submission.clone();
            let api_client = api_client.clone();
            submission.start();
            spawn_local(async move {
                let result = api_client.create_transferencia(&request).await;
                if submission.finish(result) {
                    form.set(TransferForm::default());
                }
            });
        })
    };

    let disabled = submission.is_submitting();

    html! {
        <section class="card entry-form">
            <h2>{"NUEVA TRANSFERENCIA"}</h2>
            <form class="grid" {onsubmit}>
                <MoneyField id="t_monto" label="MONTO" value={form.monto.clone()} on_change={on_amount} {disabled} />
                <SelectField
                    id="t_origen"
                    label="ORIGEN"
                    options={catalog.accounts.clone()}
                    value={form.origen.clone()}
                    on_change={on_origin}
                    required={true}
                    {disabled}
                />
                <SelectField
                    id="t_destino"
                    label="DESTINO"
                    options={catalog.accounts.clone()}
                    value={form.destino.clone()}
                    on_change={on_destination}
                    required={true}
                    {disabled}
                />
                <SelectField
                    id="t_semestre"
                    label="SEMESTRE"
                    options={catalog.semesters.clone()}
                    value={form.semestre.clone()}
                    on_change={on_semester}
                    required={true}
                    {disabled}
                />
                <TextField id="t_nota" label="NOTA" value={form.nota.clone()} on_change={on_note} {disabled} />
                <button type="submit" class="btn primary" {disabled}>
                    {if disabled { "GUARDANDO..." } else { "GUARDAR TRANSFERENCIA" }}
                </button>
            </form>
        </section>
    }
}
