use shared::{FieldDescriptor, FieldInput, FieldKey};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::SelectField;

#[derive(Properties, PartialEq)]
pub struct DynamicFieldsProps {
    pub fields: Vec<FieldDescriptor>,
    /// Current value of each field, parallel to `fields`
    pub values: Vec<String>,
    pub on_change: Callback<(FieldKey, String)>,
    #[prop_or_default]
    pub disabled: bool,
}

/// Renders the injected fields of a form from their descriptors.
#[function_component(DynamicFields)]
pub fn dynamic_fields(props: &DynamicFieldsProps) -> Html {
    html! {
        <div class="dynamic-fields">
            {for props.fields.iter().enumerate().map(|(index, field)| {
                let value = props.values.get(index).cloned().unwrap_or_default();
                let key = field.key;
                let label = if field.required {
                    format!("{} *", field.label)
                } else {
                    field.label.clone()
                };

                match &field.input {
                    FieldInput::Select(options) => {
                        let on_change = props.on_change.reform(move |v: String| (key, v));
                        html! {
                            <SelectField
                                key={field.id.clone()}
                                id={field.id.clone()}
                                {label}
                                options={options.clone()}
                                {value}
                                {on_change}
                                searchable={true}
                                required={field.required}
                                disabled={props.disabled}
                            />
                        }
                    }
                    FieldInput::Text => {
                        let on_change = props.on_change.clone();
                        let oninput = Callback::from(move |e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            on_change.emit((key, input.value().to_uppercase()));
                        });
                        html! {
                            <div key={field.id.clone()} class={classes!("field", field.required.then_some("required"))}>
                                <label for={field.id.clone()}>{label}</label>
                                <input
                                    type="text"
                                    id={field.id.clone()}
                                    {value}
                                    {oninput}
                                    disabled={props.disabled}
                                />
                            </div>
                        }
                    }
                }
            })}
        </div>
    }
}
