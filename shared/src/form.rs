//! Dynamic form rendering.
//!
//! Which extra controls a form shows depends on its state: the expense form
//! injects fields per category, the income form injects a detail select per
//! account, a WOMPI payment method for WOMPI payments into Bancolombia, and
//! line/user fields behind a checkbox. The functions here map (catalog, form
//! state) to a list of [`FieldDescriptor`]s; the UI only draws them.

use crate::catalog::{Catalog, FieldInput, FieldKey, FieldSpec};
use crate::money::MoneyInput;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A control the UI must render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub key: FieldKey,
    pub id: String,
    pub label: String,
    pub input: FieldInput,
    pub required: bool,
}

impl FieldDescriptor {
    pub fn from_spec(spec: &FieldSpec) -> Self {
        Self::new(spec.key, spec.input.clone(), spec.required)
    }

    pub fn new(key: FieldKey, input: FieldInput, required: bool) -> Self {
        Self {
            key,
            id: key.element_id().to_string(),
            label: key.label().to_string(),
            input,
            required,
        }
    }

    /// Options of a select, empty for text fields.
    pub fn options(&self) -> &[String] {
        match &self.input {
            FieldInput::Select(options) => options,
            FieldInput::Text => &[],
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.input, FieldInput::Text)
    }
}

/// Extra fields of the expense form for a category.
///
/// Unknown and empty categories get a single optional free-text reason.
/// Categories that require a month always end with a required month select.
pub fn expense_fields(catalog: &Catalog, category: &str) -> Vec<FieldDescriptor> {
    let Some(set) = catalog.category_field_set(category) else {
        return vec![FieldDescriptor::new(FieldKey::Reason, FieldInput::Text, false)];
    };

    let mut fields: Vec<FieldDescriptor> = set.fields.iter().map(FieldDescriptor::from_spec).collect();
    if set.requires_month {
        fields.push(FieldDescriptor::new(
            FieldKey::Month,
            FieldInput::Select(catalog.months.clone()),
            true,
        ));
    }
    fields
}

/// Extra fields of the income form.
pub fn income_fields(catalog: &Catalog, form: &IncomeForm) -> Vec<FieldDescriptor> {
    let mut fields = vec![FieldDescriptor::new(
        FieldKey::Detail,
        FieldInput::Select(catalog.details_for(&form.cuenta).to_vec()),
        true,
    )];

    if catalog.needs_wompi_method(&form.cuenta, &form.detalle) {
        fields.push(FieldDescriptor::new(
            FieldKey::WompiMethod,
            FieldInput::Select(catalog.wompi_methods.clone()),
            true,
        ));
    }

    if form.incluir_linea_usuario {
        fields.push(FieldDescriptor::new(
            FieldKey::Line,
            FieldInput::Select(catalog.lines.clone()),
            true,
        ));
        fields.push(FieldDescriptor::new(FieldKey::User, FieldInput::Text, true));
    }

    fields
}

/// State of the income entry form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IncomeForm {
    pub monto: MoneyInput,
    pub semestre: String,
    pub cuenta: String,
    pub detalle: String,
    pub wompi_metodo: String,
    pub incluir_linea_usuario: bool,
    pub linea: String,
    pub usuario: String,
}

impl IncomeForm {
    /// Changing the account repopulates the detail list, so the previous
    /// detail and payment method no longer apply.
    pub fn select_account(&mut self, account: &str) {
        self.cuenta = account.to_string();
        self.detalle.clear();
        self.wompi_metodo.clear();
    }

    pub fn select_detail(&mut self, catalog: &Catalog, detail: &str) {
        self.detalle = detail.to_string();
        if !catalog.needs_wompi_method(&self.cuenta, &self.detalle) {
            self.wompi_metodo.clear();
        }
    }

    pub fn set_include_line_user(&mut self, include: bool) {
        self.incluir_linea_usuario = include;
        if !include {
            self.linea.clear();
            self.usuario.clear();
        }
    }

    pub fn set_usuario(&mut self, value: &str) {
        self.usuario = value.to_uppercase();
    }

    pub fn fields(&self, catalog: &Catalog) -> Vec<FieldDescriptor> {
        income_fields(catalog, self)
    }

    /// Value of an injected income field.
    pub fn field_value(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::Detail => &self.detalle,
            FieldKey::WompiMethod => &self.wompi_metodo,
            FieldKey::Line => &self.linea,
            FieldKey::User => &self.usuario,
            _ => "",
        }
    }

    /// Route an edit of an injected field to the matching setter.
    pub fn set_field(&mut self, catalog: &Catalog, key: FieldKey, value: &str) {
        match key {
            FieldKey::Detail => self.select_detail(catalog, value),
            FieldKey::WompiMethod => self.wompi_metodo = value.to_string(),
            FieldKey::Line => self.linea = value.to_string(),
            FieldKey::User => self.set_usuario(value),
            other => tracing::debug!(?other, "not an income field"),
        }
    }
}

/// State of the expense entry form.
///
/// The category drives which extras exist; values of extras that are not
/// injected for the current category are never kept.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpenseForm {
    pub monto: MoneyInput,
    pub cuenta: String,
    pub metodo: String,
    pub semestre: String,
    pub autorizo: String,
    pub responsable: String,
    categoria: String,
    fields: Vec<FieldDescriptor>,
    extras: BTreeMap<FieldKey, String>,
}

impl ExpenseForm {
    pub fn new(catalog: &Catalog) -> Self {
        let mut form = Self::default();
        form.select_category(catalog, "");
        form
    }

    /// Drop every injected field and inject the set of `category`.
    pub fn select_category(&mut self, catalog: &Catalog, category: &str) {
        self.categoria = category.to_string();
        self.extras.clear();
        self.fields = expense_fields(catalog, category);
        tracing::debug!(category, fields = self.fields.len(), "expense fields injected");
    }

    pub fn categoria(&self) -> &str {
        &self.categoria
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Set the value of an injected field. Text is upper-cased; edits of
    /// fields that are not injected are ignored and `false` is returned.
    pub fn set_extra(&mut self, key: FieldKey, value: &str) -> bool {
        let Some(field) = self.fields.iter().find(|f| f.key == key) else {
            tracing::debug!(?key, category = %self.categoria, "ignoring edit of a field that is not shown");
            return false;
        };
        let value = if field.is_text() {
            value.to_uppercase()
        } else {
            value.to_string()
        };
        self.extras.insert(key, value);
        true
    }

    /// Raw value of an injected field as typed, `""` when unset.
    pub fn extra_input(&self, key: FieldKey) -> &str {
        self.extras.get(&key).map(String::as_str).unwrap_or("")
    }

    /// Value of an injected field, `None` when empty or not injected.
    pub fn extra(&self, key: FieldKey) -> Option<&str> {
        self.extras
            .get(&key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// State of the transfer entry form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransferForm {
    pub monto: MoneyInput,
    pub origen: String,
    pub destino: String,
    pub semestre: String,
    pub nota: String,
}
