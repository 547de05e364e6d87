use yew::prelude::*;

/// Every screen reachable from the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    NuevoIngreso,
    NuevoEgreso,
    NuevaTransferencia,
    Ingresos,
    Egresos,
    Transferencias,
    ResumenIngresos,
    ResumenEgresos,
    ResumenTransferencias,
    Saldos,
}

impl Page {
    pub const ALL: [Page; 10] = [
        Page::NuevoIngreso,
        Page::NuevoEgreso,
        Page::NuevaTransferencia,
        Page::Ingresos,
        Page::Egresos,
        Page::Transferencias,
        Page::ResumenIngresos,
        Page::ResumenEgresos,
        Page::ResumenTransferencias,
        Page::Saldos,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Page::NuevoIngreso => "NUEVO INGRESO",
            Page::NuevoEgreso => "NUEVO EGRESO",
            Page::NuevaTransferencia => "NUEVA TRANSFERENCIA",
            Page::Ingresos => "INGRESOS",
            Page::Egresos => "EGRESOS",
            Page::Transferencias => "TRANSFERENCIAS",
            Page::ResumenIngresos => "RESUMEN INGRESOS",
            Page::ResumenEgresos => "RESUMEN EGRESOS",
            Page::ResumenTransferencias => "RESUMEN TRANSFERENCIAS",
            Page::Saldos => "SALDOS",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub current: Page,
    pub on_navigate: Callback<Page>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    html! {
        <header class="header">
            <div class="container">
                <h1>{"FINANZAS"}</h1>
                <nav class="header-nav">
                    {for Page::ALL.iter().map(|&page| {
                        let onclick = props.on_navigate.reform(move |_: MouseEvent| page);
                        html! {
                            <button
                                type="button"
                                class={classes!("nav-link", (page == props.current).then_some("active"))}
                                {onclick}
                            >
                                {page.title()}
                            </button>
                        }
                    })}
                </nav>
            </div>
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_page_has_a_distinct_title() {
        let mut titles: Vec<_> = Page::ALL.iter().map(Page::title).collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), Page::ALL.len());
    }
}
