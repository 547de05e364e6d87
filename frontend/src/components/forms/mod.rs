pub mod dynamic_fields;
pub mod expense_form;
pub mod income_form;
pub mod money_field;
pub mod select_field;
pub mod text_field;
pub mod transfer_form;

pub use dynamic_fields::DynamicFields;
pub use expense_form::NewExpenseForm;
pub use income_form::NewIncomeForm;
pub use money_field::MoneyField;
pub use select_field::SelectField;
pub use text_field::TextField;
pub use transfer_form::NewTransferForm;

use yew::prelude::*;

/// Callback that applies `apply` to a copy of the form state and stores it.
pub(crate) fn updater<S, V>(state: &UseStateHandle<S>, apply: impl Fn(&mut S, V) + 'static) -> Callback<V>
where
    S: Clone + 'static,
    V: 'static,
{
    let state = state.clone();
    Callback::from(move |value: V| {
        let mut next = (*state).clone();
        apply(&mut next, value);
        state.set(next);
    })
}
