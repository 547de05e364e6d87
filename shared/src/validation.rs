//! Submission checks for the entry forms.
//!
//! [`FormValidator`] re-checks every rule against the [`Catalog`] before a
//! request body is built, whatever the form currently shows. All failing
//! checks are collected; the UI reports the first one.

use crate::catalog::{Catalog, FieldInput, FieldKey};
use crate::form::{ExpenseForm, IncomeForm, TransferForm};
use crate::money::MoneyInput;
use crate::{EgresoRequest, IngresoRequest, TransferenciaRequest};
use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;

/// A rule a form failed. `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Ingrese un MONTO válido")]
    InvalidAmount,

    #[error("Complete los campos obligatorios")]
    MissingRequired { field: &'static str },

    #[error("Seleccione MÉTODO DE PAGO (WOMPI)")]
    MissingWompiMethod,

    #[error("LÍNEA y USUARIO son obligatorios cuando se marca la casilla")]
    MissingLineUser,

    #[error("MES es obligatorio para esta categoría")]
    MissingMonth,

    #[error("NOMBRE CARRO y MOTIVO son obligatorios")]
    MissingCarDetails,

    #[error("RAZÓN es obligatoria para CARROS")]
    MissingCarReason,

    #[error("RAZÓN es obligatoria para esta categoría")]
    MissingReason,

    #[error("Valor no válido para {field}: {value}")]
    InvalidOption { field: &'static str, value: String },

    #[error("ORIGEN y DESTINO deben ser diferentes")]
    SameAccountTransfer,
}

/// Every rule a form failed, in check order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn first(&self) -> &ValidationError {
        &self.0[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    pub fn contains(&self, error: &ValidationError) -> bool {
        self.0.contains(error)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first())
    }
}

impl std::error::Error for ValidationErrors {}

/// Accumulates failures while a form is checked.
#[derive(Default)]
struct Checks {
    errors: Vec<ValidationError>,
}

impl Checks {
    fn amount(&mut self, monto: &MoneyInput) {
        if monto.is_empty() || monto.value() <= Decimal::ZERO {
            self.errors.push(ValidationError::InvalidAmount);
        }
    }

    /// Value must be present and, when present, one of `options`.
    fn select(&mut self, field: &'static str, value: &str, options: &[String]) {
        let value = value.trim();
        if value.is_empty() {
            self.push_missing(field);
        } else if !options.iter().any(|o| o == value) {
            self.errors.push(ValidationError::InvalidOption {
                field,
                value: value.to_string(),
            });
        }
    }

    /// Free text that must not be blank.
    fn required(&mut self, field: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.push_missing(field);
        }
    }

    fn push_missing(&mut self, field: &'static str) {
        // Several empty selects still produce a single "complete the fields" entry.
        if !self
            .errors
            .iter()
            .any(|e| matches!(e, ValidationError::MissingRequired { .. }))
        {
            self.errors.push(ValidationError::MissingRequired { field });
        }
    }

    fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    fn finish<T>(self, build: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(build())
        } else {
            tracing::debug!(count = self.errors.len(), first = %self.errors[0], "form rejected");
            Err(ValidationErrors(self.errors))
        }
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_uppercase())
}

fn upper(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Checks the entry forms and turns them into request bodies.
pub struct FormValidator<'a> {
    catalog: &'a Catalog,
}

impl<'a> FormValidator<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn validate_income(&self, form: &IncomeForm) -> Result<IngresoRequest, ValidationErrors> {
        let catalog = self.catalog;
        let mut checks = Checks::default();

        checks.amount(&form.monto);
        checks.select("SEMESTRE", &form.semestre, &catalog.semesters);
        checks.select("CUENTA", &form.cuenta, &catalog.accounts);
        checks.select("DETALLE", &form.detalle, catalog.details_for(&form.cuenta));

        let needs_wompi = catalog.needs_wompi_method(form.cuenta.trim(), form.detalle.trim());
        if needs_wompi {
            if form.wompi_metodo.trim().is_empty() {
                checks.push(ValidationError::MissingWompiMethod);
            } else {
                checks.select("MÉTODO DE PAGO (WOMPI)", &form.wompi_metodo, &catalog.wompi_methods);
            }
        }

        if form.incluir_linea_usuario {
            if form.linea.trim().is_empty() || form.usuario.trim().is_empty() {
                checks.push(ValidationError::MissingLineUser);
            } else {
                checks.select("LÍNEA", &form.linea, &catalog.lines);
            }
        }

        checks.finish(|| IngresoRequest {
            monto: form.monto.display().to_string(),
            semestre: upper(&form.semestre),
            cuenta: upper(&form.cuenta),
            detalle: upper(&form.detalle),
            wompi_metodo: if needs_wompi { optional(&form.wompi_metodo) } else { None },
            incluir_linea_usuario: form.incluir_linea_usuario,
            linea: if form.incluir_linea_usuario { optional(&form.linea) } else { None },
            usuario: if form.incluir_linea_usuario { optional(&form.usuario) } else { None },
        })
    }

    pub fn validate_expense(&self, form: &ExpenseForm) -> Result<EgresoRequest, ValidationErrors> {
        let catalog = self.catalog;
        let mut checks = Checks::default();
        let categoria = form.categoria().trim();

        checks.amount(&form.monto);
        checks.select("CUENTA", &form.cuenta, &catalog.accounts);
        checks.required("MÉTODO", &form.metodo);
        checks.select("SEMESTRE", &form.semestre, &catalog.semesters);
        checks.select("CATEGORÍA", categoria, &catalog.expense_categories);

        let extra = |key: FieldKey| form.extra(key).unwrap_or("");
        if let Some(set) = catalog.category_field_set(categoria) {
            let field = |key: FieldKey| set.fields.iter().find(|f| f.key == key);

            if field(FieldKey::CarName).is_some() {
                if extra(FieldKey::CarName).is_empty() || extra(FieldKey::CarMotive).is_empty() {
                    checks.push(ValidationError::MissingCarDetails);
                }
                if extra(FieldKey::Reason).is_empty() {
                    checks.push(ValidationError::MissingCarReason);
                }
            } else if let Some(reason) = field(FieldKey::Reason).filter(|f| f.required) {
                if extra(FieldKey::Reason).is_empty() {
                    checks.push(ValidationError::MissingReason);
                } else if let FieldInput::Select(options) = &reason.input {
                    checks.select("RAZÓN", extra(FieldKey::Reason), options);
                }
            }

            for key in [FieldKey::CarName, FieldKey::CarMotive] {
                if let (Some(spec), value) = (field(key), extra(key)) {
                    if let (FieldInput::Select(options), false) = (&spec.input, value.is_empty()) {
                        checks.select(key.label(), value, options);
                    }
                }
            }

            if set.requires_month {
                if extra(FieldKey::Month).is_empty() {
                    checks.push(ValidationError::MissingMonth);
                } else {
                    checks.select("MES", extra(FieldKey::Month), &catalog.months);
                }
            }
        }

        checks.finish(|| {
            let month_required = catalog.requires_month(categoria);
            EgresoRequest {
                monto: form.monto.display().to_string(),
                cuenta: upper(&form.cuenta),
                metodo: upper(&form.metodo),
                semestre: upper(&form.semestre),
                categoria: upper(categoria),
                mes: if month_required { optional(extra(FieldKey::Month)) } else { None },
                nombre_carro: optional(extra(FieldKey::CarName)),
                motivo_carro: optional(extra(FieldKey::CarMotive)),
                razon: optional(extra(FieldKey::Reason)),
                autorizo: upper(&form.autorizo),
                responsable: upper(&form.responsable),
            }
        })
    }

    pub fn validate_transfer(
        &self,
        form: &TransferForm,
    ) -> Result<TransferenciaRequest, ValidationErrors> {
        let catalog = self.catalog;
        let mut checks = Checks::default();

        checks.amount(&form.monto);
        checks.select("ORIGEN", &form.origen, &catalog.accounts);
        checks.select("DESTINO", &form.destino, &catalog.accounts);
        checks.select("SEMESTRE", &form.semestre, &catalog.semesters);

        let origen = form.origen.trim();
        if !origen.is_empty() && origen == form.destino.trim() {
            checks.push(ValidationError::SameAccountTransfer);
        }

        checks.finish(|| TransferenciaRequest {
            monto: form.monto.display().to_string(),
            origen: upper(&form.origen),
            destino: upper(&form.destino),
            semestre: upper(&form.semestre),
            nota: optional(&form.nota),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(raw: &str) -> MoneyInput {
        let mut monto = MoneyInput::default();
        monto.edit(raw);
        monto.blur();
        monto
    }

    fn income(cuenta: &str, detalle: &str) -> IncomeForm {
        let catalog = Catalog::default();
        let mut form = IncomeForm {
            monto: amount("250000"),
            semestre: "126".to_string(),
            ..IncomeForm::default()
        };
        form.select_account(cuenta);
        form.select_detail(&catalog, detalle);
        form
    }

    fn expense(catalog: &Catalog, categoria: &str) -> ExpenseForm {
        let mut form = ExpenseForm::new(catalog);
        form.monto = amount("80000");
        form.cuenta = "NEQUI".to_string();
        form.metodo = "PAGO".to_string();
        form.semestre = "226".to_string();
        form.autorizo = "JESÚS".to_string();
        form.responsable = "TT".to_string();
        form.select_category(catalog, categoria);
        form
    }

    fn transfer(origen: &str, destino: &str) -> TransferForm {
        TransferForm {
            monto: amount("1.000"),
            origen: origen.to_string(),
            destino: destino.to_string(),
            semestre: "126".to_string(),
            nota: String::new(),
        }
    }

    #[test]
    fn test_wompi_without_method_is_rejected() {
        let catalog = Catalog::default();
        let validator = FormValidator::new(&catalog);
        let form = income("BANCOLOMBIA_1423", "WOMPI");

        let errors = validator.validate_income(&form).unwrap_err();
        assert_eq!(errors.first(), &ValidationError::MissingWompiMethod);
        assert_eq!(errors.to_string(), "Seleccione MÉTODO DE PAGO (WOMPI)");
    }

    #[test]
    fn test_wompi_with_method_builds_request() {
        let catalog = Catalog::default();
        let validator = FormValidator::new(&catalog);
        let mut form = income("BANCOLOMBIA_1423", "WOMPI");
        form.wompi_metodo = "PSE".to_string();

        let request = validator.validate_income(&form).unwrap();
        assert_eq!(request.monto, "$ 250.000,00");
        assert_eq!(request.wompi_metodo.as_deref(), Some("PSE"));
        assert_eq!(request.linea, None);
        assert!(!request.incluir_linea_usuario);
    }

    #[test]
    fn test_wompi_method_is_dropped_for_other_details() {
        let catalog = Catalog::default();
        let validator = FormValidator::new(&catalog);
        let mut form = income("NEQUI", "NEQUI");
        form.wompi_metodo = "TC".to_string();

        let request = validator.validate_income(&form).unwrap();
        assert_eq!(request.wompi_metodo, None);
    }

    #[test]
    fn test_line_user_required_when_checked() {
        let catalog = Catalog::default();
        let validator = FormValidator::new(&catalog);
        let mut form = income("NEQUI", "NEQUI");
        form.set_include_line_user(true);
        form.linea = "L2".to_string();

        let errors = validator.validate_income(&form).unwrap_err();
        assert_eq!(errors.first(), &ValidationError::MissingLineUser);

        form.set_usuario("maria");
        let request = validator.validate_income(&form).unwrap();
        assert_eq!(request.usuario.as_deref(), Some("MARIA"));
        assert_eq!(request.linea.as_deref(), Some("L2"));
    }

    #[test]
    fn test_detail_must_belong_to_account() {
        let catalog = Catalog::default();
        let validator = FormValidator::new(&catalog);
        let mut form = income("EFECTY", "GIRO NACIONAL");
        form.detalle = "WOMPI".to_string();

        let errors = validator.validate_income(&form).unwrap_err();
        assert!(matches!(
            errors.first(),
            ValidationError::InvalidOption { field: "DETALLE", .. }
        ));
    }

    #[test]
    fn test_invalid_amount_comes_first() {
        let catalog = Catalog::default();
        let validator = FormValidator::new(&catalog);
        let mut form = income("", "");
        form.monto = MoneyInput::default();

        let errors = validator.validate_income(&form).unwrap_err();
        assert_eq!(errors.first(), &ValidationError::InvalidAmount);
        assert_eq!(errors.to_string(), "Ingrese un MONTO válido");
        assert_eq!(
            errors
                .iter()
                .filter(|e| matches!(e, ValidationError::MissingRequired { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn test_same_account_transfer_is_rejected() {
        let catalog = Catalog::default();
        let validator = FormValidator::new(&catalog);

        let errors = validator.validate_transfer(&transfer("NEQUI", "NEQUI")).unwrap_err();
        assert_eq!(errors.first(), &ValidationError::SameAccountTransfer);
        assert_eq!(errors.to_string(), "ORIGEN y DESTINO deben ser diferentes");
    }

    #[test]
    fn test_transfer_request() {
        let catalog = Catalog::default();
        let validator = FormValidator::new(&catalog);
        let mut form = transfer("NEQUI", "DAVIVIENDA");
        form.nota = "  arriendo ".to_string();

        let request = validator.validate_transfer(&form).unwrap();
        assert_eq!(request.monto, "$ 1.000,00");
        assert_eq!(request.nota.as_deref(), Some("ARRIENDO"));

        form.nota = "   ".to_string();
        assert_eq!(validator.validate_transfer(&form).unwrap().nota, None);
    }

    #[test]
    fn test_carros_requires_every_field() {
        let catalog = Catalog::default();
        let validator = FormValidator::new(&catalog);
        let mut form = expense(&catalog, "CARROS");

        let errors = validator.validate_expense(&form).unwrap_err();
        assert_eq!(errors.first(), &ValidationError::MissingCarDetails);
        assert!(errors.contains(&ValidationError::MissingCarReason));

        form.set_extra(FieldKey::CarName, "VERSA");
        form.set_extra(FieldKey::CarMotive, "SOAT");
        let errors = validator.validate_expense(&form).unwrap_err();
        assert_eq!(errors.first(), &ValidationError::MissingCarReason);

        form.set_extra(FieldKey::Reason, "renovación anual");
        let request = validator.validate_expense(&form).unwrap();
        assert_eq!(request.nombre_carro.as_deref(), Some("VERSA"));
        assert_eq!(request.motivo_carro.as_deref(), Some("SOAT"));
        assert_eq!(request.razon.as_deref(), Some("RENOVACIÓN ANUAL"));
        assert_eq!(request.mes, None);
    }

    #[test]
    fn test_car_option_outside_catalog_is_rejected() {
        let catalog = Catalog::default();
        let validator = FormValidator::new(&catalog);
        let mut form = expense(&catalog, "CARROS");
        form.set_extra(FieldKey::CarName, "TESLA");
        form.set_extra(FieldKey::CarMotive, "SOAT");
        form.set_extra(FieldKey::Reason, "X");

        let errors = validator.validate_expense(&form).unwrap_err();
        assert!(matches!(
            errors.first(),
            ValidationError::InvalidOption { field: "NOMBRE CARRO", .. }
        ));
    }

    #[test]
    fn test_month_categories_need_month() {
        let catalog = Catalog::default();
        let validator = FormValidator::new(&catalog);
        let mut form = expense(&catalog, "PAGO_NÓMINA");
        form.set_extra(FieldKey::Reason, "DIANA GOMEZ");

        let errors = validator.validate_expense(&form).unwrap_err();
        assert_eq!(errors.first(), &ValidationError::MissingMonth);
        assert_eq!(errors.to_string(), "MES es obligatorio para esta categoría");

        form.set_extra(FieldKey::Month, "MARZO");
        let request = validator.validate_expense(&form).unwrap();
        assert_eq!(request.mes.as_deref(), Some("MARZO"));
        assert_eq!(request.razon.as_deref(), Some("DIANA GOMEZ"));
    }

    #[test]
    fn test_reason_select_required() {
        let catalog = Catalog::default();
        let validator = FormValidator::new(&catalog);
        let mut form = expense(&catalog, "SOFTWARE");

        let errors = validator.validate_expense(&form).unwrap_err();
        assert_eq!(errors.first(), &ValidationError::MissingReason);

        form.set_extra(FieldKey::Reason, "LOOM");
        assert!(validator.validate_expense(&form).is_ok());
    }

    #[test]
    fn test_free_text_reason_is_optional() {
        let catalog = Catalog::default();
        let validator = FormValidator::new(&catalog);
        let mut form = expense(&catalog, "OCIO");

        let request = validator.validate_expense(&form).unwrap();
        assert_eq!(request.razon, None);
        assert_eq!(request.categoria, "OCIO");

        form.set_extra(FieldKey::Reason, "cine");
        let request = validator.validate_expense(&form).unwrap();
        assert_eq!(request.razon.as_deref(), Some("CINE"));
    }

    #[test]
    fn test_missing_selects_reported_once() {
        let catalog = Catalog::default();
        let validator = FormValidator::new(&catalog);
        let mut form = expense(&catalog, "CESANTIAS");
        form.cuenta.clear();
        form.metodo.clear();

        let errors = validator.validate_expense(&form).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.to_string(), "Complete los campos obligatorios");
    }

    #[test]
    fn test_method_and_signers_are_free_text() {
        let catalog = Catalog::default();
        let validator = FormValidator::new(&catalog);
        let mut form = expense(&catalog, "CESANTIAS");
        form.metodo = "efectivo".to_string();
        form.autorizo = " maría pérez ".to_string();
        form.responsable.clear();

        let request = validator.validate_expense(&form).unwrap();
        assert_eq!(request.metodo, "EFECTIVO");
        assert_eq!(request.autorizo, "MARÍA PÉREZ");
        assert_eq!(request.responsable, "");

        form.metodo = "   ".to_string();
        let errors = validator.validate_expense(&form).unwrap_err();
        assert_eq!(
            errors.first(),
            &ValidationError::MissingRequired { field: "MÉTODO" }
        );
    }
}
