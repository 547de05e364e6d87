use std::rc::Rc;

use shared::{Catalog, ExpenseForm, FieldKey, FormValidator, MoneyInput};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{updater, DynamicFields, MoneyField, SelectField, TextField};
use crate::hooks::use_submission;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct NewExpenseFormProps {
    pub api_client: ApiClient,
    pub catalog: Rc<Catalog>,
}

#[function_component(NewExpenseForm)]
pub fn new_expense_form(props: &NewExpenseFormProps) -> Html {
    let form = {
        let catalog = props.catalog.clone();
        use_state(move || ExpenseForm::new(&catalog))
    };
    let submission = use_submission("NewExpenseForm");
    let catalog = props.catalog.clone();

    let fields = form.fields().to_vec();
    let values: Vec<String> = fields
        .iter()
        .map(|f| form.extra_input(f.key).to_string())
        .collect();

    let on_amount = updater(&form, |f: &mut ExpenseForm, monto: MoneyInput| f.monto = monto);
    let on_account = updater(&form, |f: &mut ExpenseForm, v: String| f.cuenta = v);
    let on_method = updater(&form, |f: &mut ExpenseForm, v: String| f.metodo = v);
    let on_semester = updater(&form, |f: &mut ExpenseForm, v: String| f.semestre = v);
    let on_authorizer = updater(&form, |f: &mut ExpenseForm, v: String| f.autorizo = v);
    let on_responsible = updater(&form, |f: &mut ExpenseForm, v: String| f.responsable = v);
    let on_category = {
        let catalog = catalog.clone();
        updater(&form, move |f: &mut ExpenseForm, v: String| {
            f.select_category(&catalog, &v);
            Logger::debug_with_component(
                "NewExpenseForm",
                &format!("category {} shows {} extra fields", v, f.fields().len()),
            );
        })
    };
    let on_field = updater(&form, |f: &mut ExpenseForm, (key, v): (FieldKey, String)| {
        f.set_extra(key, &v);
    });

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

            let request = match FormValidator::new(&catalog).validate_expense(&form) {
                Ok(request) => request,
                Err(errors) => {
                    submission.reject(&errors);
                    return;
                }
            };

            let form = form.clone();
            let submission = submission.clone();
            let api_client = api_client.clone();
            let catalog = catalog.clone();
            submission.start();
            spawn_local(async move {
                let result = api_client.create_egreso(&request).await;
                if submission.finish(result) {
                    form.set(ExpenseForm::new(&catalog));
                }
            });
        })
    };

    let disabled = submission.is_submitting();

    html! {
        <section class="card entry-form">
            <h2>{"NUEVO EGRESO"}</h2>
            <form class="grid" {onsubmit}>
                <MoneyField id="e_monto" label="MONTO" value={form.monto.clone()} on_change={on_amount} {disabled} />
                <SelectField
                    id="e_cuenta"
                    label="CUENTA"
                    options={catalog.accounts.clone()}
                    value={form.cuenta.clone()}
                    on_change={on_account}
                    required={true}
                    {disabled}
                />
                <TextField
                    id="e_metodo"
                    label="MÉTODO"
                    value={form.metodo.clone()}
                    on_change={on_method}
                    required={true}
                    {disabled}
                />
                <SelectField
                    id="e_semestre"
                    label="SEMESTRE"
                    options={catalog.semesters.clone()}
                    value={form.semestre.clone()}
                    on_change={on_semester}
                    required={true}
                    {disabled}
                />
                <SelectField
                    id="e_categoria"
                    label="CATEGORÍA"
                    options={catalog.expense_categories.clone()}
                    value={form.categoria().to_string()}
                    on_change={on_category}
                    searchable={true}
                    required={true}
                    {disabled}
                />
                <DynamicFields {fields} {values} on_change={on_field} {disabled} />
                <TextField
                    id="e_autorizo"
                    label="AUTORIZÓ"
                    value={form.autorizo.clone()}
                    on_change={on_authorizer}
                    {disabled}
                />
                <TextField
                    id="e_responsable"
                    label="RESPONSABLE"
                    value={form.responsable.clone()}
                    on_change={on_responsible}
                    {disabled}
                />
                <button type="submit" class="btn primary" {disabled}>
                    {if disabled { "GUARDANDO..." } else { "GUARDAR EGRESO" }}
                </button>
            </form>
        </section>
    }
}
