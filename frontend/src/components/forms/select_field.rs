use shared::SearchableSelect;
use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SelectFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub options: Vec<String>,
    pub value: String,
    pub on_change: Callback<String>,
    /// Show a search box that narrows the options, ignoring accents
    #[prop_or_default]
    pub searchable: bool,
    #[prop_or_default]
    pub required: bool,
    #[prop_or_default]
    pub disabled: bool,
}

/// Select with a `-` placeholder, optionally searchable.
#[function_component(SelectField)]
pub fn select_field(props: &SelectFieldProps) -> Html {
    let search = {
        let options = props.options.clone();
        use_state(move || SearchableSelect::new(&options))
    };

    {
        // Another field set reuses this select: drop the stale search.
        let search = search.clone();
        use_effect_with(props.options.clone(), move |options| {
            let mut next = (*search).clone();
            if next.set_options(options) {
                search.set(next);
            }
            || ()
        });
    }

    let mut select = (*search).clone();
    select.set_options(&props.options);
    let query = select.query().to_string();
    let visible: Vec<String> = select.visible_options().into_iter().map(str::to_string).collect();

    let onsearch = {
        let search = search.clone();
        let options = props.options.clone();
        let value = props.value.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*search).clone();
            next.set_options(&options);
            next.set_query("");
            next.select(&value);
            next.set_query(&input.value());
            if next.value() != value {
                on_change.emit(next.value().to_string());
            }
            search.set(next);
        })
    };

    let onchange = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target().and_then(|t| t.dyn_into::<HtmlSelectElement>().ok()) {
                on_change.emit(select.value());
            }
        })
    };

    html! {
        <div class={classes!("field", props.required.then_some("required"))}>
            <label for={props.id.clone()}>{&props.label}</label>
            {if props.searchable {
                html! {
                    <input
                        type="search"
                        class="select-search"
                        placeholder="Buscar..."
                        value={query}
                        oninput={onsearch}
                        disabled={props.disabled}
                    />
                }
            } else { html! {} }}
            <div class="select-wrap">
                <select id={props.id.clone()} {onchange} disabled={props.disabled}>
                    {for visible.iter().map(|option| {
                        let text = if option.is_empty() { "-" } else { option.as_str() };
                        html! {
                            <option value={option.clone()} selected={*option == props.value}>
                                {text}
                            </option>
                        }
                    })}
                </select>
            </div>
        </div>
    }
}
