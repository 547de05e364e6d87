use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TextFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub value: String,
    pub on_change: Callback<String>,
    #[prop_or_default]
    pub required: bool,
    #[prop_or_default]
    pub disabled: bool,
}

/// Free-text input that upper-cases as the user types.
#[function_component(TextField)]
pub fn text_field(props: &TextFieldProps) -> Html {
    let oninput = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit(input.value().to_uppercase());
        })
    };

    html! {
        <div class={classes!("field", props.required.then_some("required"))}>
            <label for={props.id.clone()}>{&props.label}</label>
            <input
                type="text"
                id={props.id.clone()}
                value={props.value.clone()}
                {oninput}
                disabled={props.disabled}
            />
        </div>
    }
}
