use shared::MoneyInput;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct MoneyFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub value: MoneyInput,
    pub on_change: Callback<MoneyInput>,
    #[prop_or_default]
    pub disabled: bool,
}

/// Amount input masked on every keystroke and restyled on blur.
#[function_component(MoneyField)]
pub fn money_field(props: &MoneyFieldProps) -> Html {
    let oninput = {
        let value = props.value.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = value.clone();
            next.edit(&input.value());
            // Re-render may keep the same display; force the DOM back to it.
            input.set_value(next.display());
            on_change.emit(next);
        })
    };

    let onblur = {
        let value = props.value.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |_: FocusEvent| {
            let mut next = value.clone();
            next.blur();
            on_change.emit(next);
        })
    };

    html! {
        <div class="field">
            <label for={props.id.clone()}>{&props.label}</label>
            <input
                type="text"
                id={props.id.clone()}
                inputmode="decimal"
                placeholder="$ 0"
                autocomplete="off"
                value={props.value.display().to_string()}
                {oninput}
                {onblur}
                disabled={props.disabled}
            />
        </div>
    }
}
