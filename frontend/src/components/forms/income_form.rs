use std::rc::Rc;

use shared::{Catalog, FieldKey, FormValidator, IncomeForm, MoneyInput};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::{updater, DynamicFields, MoneyField, SelectField};
use crate::hooks::use_submission;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct NewIncomeFormProps {
    pub api_client: ApiClient,
    pub catalog: Rc<Catalog>,
}

#[function_component(NewIncomeForm)]
pub fn new_income_form(props: &NewIncomeFormProps) -> Html {
    let form = use_state(IncomeForm::default);
    let submission = use_submission("NewIncomeForm");
    let catalog = props.catalog.clone();

    let fields = form.fields(&catalog);
    let values: Vec<String> = fields
        .iter()
        .map(|f| form.field_value(f.key).to_string())
        .collect();

    let on_amount = updater(&form, |f: &mut IncomeForm, monto: MoneyInput| f.monto = monto);
    let on_semester = updater(&form, |f: &mut IncomeForm, v: String| f.semestre = v);
    let on_account = updater(&form, |f: &mut IncomeForm, v: String| f.select_account(&v));
    let on_field = {
        let catalog = catalog.clone();
        updater(&form, move |f: &mut IncomeForm, (key, v): (FieldKey, String)| {
            f.set_field(&catalog, key, &v)
        })
    };
    let on_toggle = {
        let on_toggle = updater(&form, |f: &mut IncomeForm, checked: bool| f.set_include_line_user(checked));
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_toggle.emit(input.checked());
        })
    };

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

            let request = match FormValidator::new(&catalog).validate_income(&form) {
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
                let result = api_client.create_ingreso(&request).await;
                if submission.finish(result) {
                    form.set(IncomeForm::default());
                }
            });
        })
    };

    let disabled = submission.is_submitting();

    html! {
        <section class="card entry-form">
            <h2>{"NUEVO INGRESO"}</h2>
            <form class="grid" {onsubmit}>
                <MoneyField id="monto" label="MONTO" value={form.monto.clone()} on_change={on_amount} {disabled} />
                <SelectField
                    id="semestre"
                    label="SEMESTRE"
                    options={catalog.semesters.clone()}
                    value={form.semestre.clone()}
                    on_change={on_semester}
                    required={true}
                    {disabled}
                />
                <SelectField
                    id="cuenta"
                    label="CUENTA"
                    options={catalog.accounts.clone()}
                    value={form.cuenta.clone()}
                    on_change={on_account}
                    required={true}
                    {disabled}
                />
                <DynamicFields {fields} {values} on_change={on_field} {disabled} />
                <div class="field checkbox">
                    <label>
                        <input
                            type="checkbox"
                            id="incluirLineaUsuario"
                            checked={form.incluir_linea_usuario}
                            onchange={on_toggle}
                            {disabled}
                        />
                        {" INCLUIR LÍNEA Y USUARIO"}
                    </label>
                </div>
                <button type="submit" class="btn primary" {disabled}>
                    {if disabled { "GUARDANDO..." } else { "GUARDAR INGRESO" }}
                </button>
            </form>
        </section>
    }
}
