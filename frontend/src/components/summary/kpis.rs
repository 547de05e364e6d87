use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct KpiCardProps {
    pub label: AttrValue,
    pub value: AttrValue,
}

#[function_component(KpiCard)]
pub fn kpi_card(props: &KpiCardProps) -> Html {
    html! {
        <div class="kpi">
            <span class="kpi-label">{&props.label}</span>
            <span class="kpi-value">{&props.value}</span>
        </div>
    }
}
