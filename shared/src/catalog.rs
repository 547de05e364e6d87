//! Static configuration tables.
//!
//! Every list the forms and summaries depend on lives in a [`Catalog`] value
//! that is built once and handed to the renderer, the validator and the
//! aggregators. Nothing reads these tables from globals.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Input control of an injected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldInput {
    /// A select restricted to the listed options.
    Select(Vec<String>),
    /// Free text, upper-cased as the user types.
    Text,
}

/// Identifies a field that is injected into a form depending on its state.
///
/// The first four are the extras of expense categories; the rest belong to
/// the income form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FieldKey {
    CarName,
    CarMotive,
    Reason,
    Month,
    Detail,
    WompiMethod,
    Line,
    User,
}

impl FieldKey {
    /// DOM id of the injected control.
    pub fn element_id(&self) -> &'static str {
        match self {
            FieldKey::CarName => "e_nombre_carro",
            FieldKey::CarMotive => "e_motivo_carro",
            FieldKey::Reason => "e_razon",
            FieldKey::Month => "e_mes",
            FieldKey::Detail => "detalle",
            FieldKey::WompiMethod => "wompiMetodo",
            FieldKey::Line => "linea",
            FieldKey::User => "usuario",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FieldKey::CarName => "NOMBRE CARRO",
            FieldKey::CarMotive => "MOTIVO",
            FieldKey::Reason => "RAZÓN",
            FieldKey::Month => "MES",
            FieldKey::Detail => "DETALLE",
            FieldKey::WompiMethod => "MÉTODO DE PAGO (WOMPI)",
            FieldKey::Line => "LÍNEA",
            FieldKey::User => "USUARIO",
        }
    }
}

/// One extra field of a category, before it is turned into a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub key: FieldKey,
    pub input: FieldInput,
    pub required: bool,
}

impl FieldSpec {
    pub fn select(key: FieldKey, options: &[String]) -> Self {
        Self {
            key,
            input: FieldInput::Select(options.to_vec()),
            required: true,
        }
    }

    pub fn text(key: FieldKey, required: bool) -> Self {
        Self {
            key,
            input: FieldInput::Text,
            required,
        }
    }
}

/// Extra fields required by one expense category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFieldSet {
    pub fields: Vec<FieldSpec>,
    pub requires_month: bool,
}

/// All static tables of the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub semesters: Vec<String>,
    pub accounts: Vec<String>,
    pub details_by_account: BTreeMap<String, Vec<String>>,
    pub lines: Vec<String>,
    pub employees: Vec<String>,
    pub months: Vec<String>,
    pub expense_categories: Vec<String>,
    pub car_names: Vec<String>,
    pub car_motives: Vec<String>,
    pub wompi_methods: Vec<String>,
    /// Income detail that marks a row as an interest payment.
    pub interest_detail: String,
    /// Income detail that needs a WOMPI payment method.
    pub wompi_detail: String,
    /// Account prefix for which the WOMPI rule applies.
    pub wompi_account_prefix: String,
    pub category_fields: BTreeMap<String, CategoryFieldSet>,
}

impl Catalog {
    /// Detail options offered for an income account.
    pub fn details_for(&self, account: &str) -> &[String] {
        self.details_by_account
            .get(account)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Field set of a category; `None` for unknown or empty categories.
    pub fn category_field_set(&self, category: &str) -> Option<&CategoryFieldSet> {
        self.category_fields.get(category)
    }

    pub fn requires_month(&self, category: &str) -> bool {
        self.category_field_set(category)
            .map(|set| set.requires_month)
            .unwrap_or(false)
    }

    /// Whether an income needs a WOMPI payment method.
    pub fn needs_wompi_method(&self, account: &str, detail: &str) -> bool {
        account.starts_with(&self.wompi_account_prefix) && detail == self.wompi_detail
    }

    pub fn is_account(&self, account: &str) -> bool {
        self.accounts.iter().any(|a| a == account)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Catalog {
    fn default() -> Self {
        let semesters = strings(&["126", "226", "326", "426", "526"]);
        let employees = strings(&[
            "DIANA GOMEZ", "BRAYAN PRIMICIERO", "ANDREA GELVES", "HERNAN DIAZ", "DAVID CORDON",
            "JULIANA RIVERA", "ASTRID RODRIGUEZ", "ALEXIS GOMEZ", "ANGELA FERNANDEZ", "IVAN MONSALVE",
            "JHOSEP CABRERA", "JUANCARLO HIDALGO", "FAYBER SALAMANCA", "JAVIER MATIZ", "CAROLINA MACIAS",
            "KARIME GOMEZ", "LADY JAIMES", "JOHAN SUAREZ", "FELIPE TORRES", "JESUS TORRES",
            "MARLON JOYA", "ZULAY RODRIGUEZ", "STELLA CORZO", "LILIANA BARRERA", "NATALIA JOYA",
            "MARTHA RAMIREZ", "LADY GOMEZ", "AMPARO IZAQUITA", "MAIRA SANDOVAL", "MADELEYNE CORZO",
            "CINTHIA CIFUENTES", "DANIELA RIAÑO", "PAOLA CACERES", "MONICA GUARIN", "NICOLLE LEÓN",
        ]);
        let car_names = strings(&["VERSA", "MAZDA", "QASHQAI"]);
        let car_motives = strings(&["MANTENIMIENTO", "SOAT", "IMPUESTOS", "TODO-RIESGO", "TECNICOMECANICO"]);

        let bancolombia = strings(&["BANCOLOMBIA", "WOMPI", "NEQUI", "CORRESPONSAL", "PAGO INTERESES"]);
        let mut details_by_account = BTreeMap::new();
        details_by_account.insert("BANCOLOMBIA_1423".to_string(), bancolombia.clone());
        details_by_account.insert("BANCOLOMBIA_2807".to_string(), bancolombia);
        details_by_account.insert(
            "NEQUI".to_string(),
            strings(&[
                "NEQUI", "NEQUI TRANSFIYA", "RECARGA BANCOLOMBIA", "RECARGA PSE",
                "RECARGA CORRESPONSAL", "PAGO INTERESES", "REVERSIÓN PAGO", "OTROS BANCOS",
            ]),
        );
        details_by_account.insert(
            "DAVIVIENDA".to_string(),
            strings(&["DAVIVIENDA", "DAVIPLATA", "CORRESPONSAL", "PAGO INTERESES"]),
        );
        details_by_account.insert("EFECTY".to_string(), strings(&["GIRO NACIONAL"]));

        let mut category_fields = BTreeMap::new();
        let mut add = |names: &[&str], fields: Vec<FieldSpec>, requires_month: bool| {
            for name in names {
                category_fields.insert(
                    name.to_string(),
                    CategoryFieldSet {
                        fields: fields.clone(),
                        requires_month,
                    },
                );
            }
        };

        add(
            &["CARROS"],
            vec![
                FieldSpec::select(FieldKey::CarName, &car_names),
                FieldSpec::select(FieldKey::CarMotive, &car_motives),
                FieldSpec::text(FieldKey::Reason, true),
            ],
            false,
        );
        add(
            &["DEVOLUCIÓN"],
            vec![FieldSpec::select(
                FieldKey::Reason,
                &strings(&["CANCELACIÓN", "PAGO DE MAS", "MALA MIGRACIÓN"]),
            )],
            false,
        );
        add(
            &["ADELANTO", "PAGO_NÓMINA", "VIATICOS", "PRIMAS"],
            vec![FieldSpec::select(FieldKey::Reason, &employees)],
            true,
        );
        add(
            &["BASE DE DATOS"],
            vec![FieldSpec::select(FieldKey::Reason, &semesters)],
            false,
        );
        add(
            &["ITAÚ-APTOS", "MERCADO"],
            vec![FieldSpec::select(
                FieldKey::Reason,
                &strings(&["JESÚS", "FELIPE", "MARLON"]),
            )],
            true,
        );
        add(
            &["SOFTWARE"],
            vec![FieldSpec::select(
                FieldKey::Reason,
                &strings(&[
                    "CAPITAL_BRANCH", "GOOGLE_STORAGE", "LOOM", "PROTON", "PUBLICIDAD", "RECARGA_CELULAR",
                ]),
            )],
            false,
        );
        add(
            &["IMPUESTOS"],
            vec![FieldSpec::select(
                FieldKey::Reason,
                &strings(&["INDUSTRIA_Y_COMERCIO", "RENTA", "IVA", "RETEFUENTE"]),
            )],
            true,
        );
        add(&["SEGURIDAD_SOCIAL"], Vec::new(), true);
        add(&["CESANTIAS"], Vec::new(), false);

        Self {
            semesters,
            accounts: strings(&["NEQUI", "BANCOLOMBIA_2807", "BANCOLOMBIA_1423", "DAVIVIENDA", "EFECTY"]),
            details_by_account,
            lines: strings(&["L1", "L2", "L3", "L4", "L5", "L6", "L7"]),
            employees,
            months: strings(&[
                "ENERO", "FEBRERO", "MARZO", "ABRIL", "MAYO", "JUNIO", "JULIO", "AGOSTO",
                "SEPTIEMBRE", "OCTUBRE", "NOVIEMBRE", "DICIEMBRE",
            ]),
            expense_categories: strings(&[
                "DEVOLUCIÓN", "ADELANTO", "CARROS", "BASE DE DATOS", "FAMILIA", "FUTBOL_TT", "INVENTARIO",
                "INVERSIONES", "ITAÚ-APTOS", "MERCADO", "OCIO", "PAGO_NÓMINA", "SOFTWARE", "VIAJES",
                "VIATICOS", "IMPUESTOS", "SEGURIDAD_SOCIAL", "PRIMAS", "CESANTIAS",
            ]),
            car_names,
            car_motives,
            wompi_methods: strings(&["PSE", "TC"]),
            interest_detail: "PAGO INTERESES".to_string(),
            wompi_detail: "WOMPI".to_string(),
            wompi_account_prefix: "BANCOLOMBIA_".to_string(),
            category_fields,
        }
    }
}
