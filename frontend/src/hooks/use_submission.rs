use gloo::dialogs::alert;
use shared::{CreateRecordResponse, ValidationErrors};
use yew::prelude::*;

use crate::services::api::ApiError;
use crate::services::logging::Logger;

/// Submission status of one entry form.
///
/// Outcomes are reported with a browser alert: the first validation message,
/// the server's `detail`, or the server's success message.
#[derive(Clone, PartialEq)]
pub struct Submission {
    component: &'static str,
    submitting: UseStateHandle<bool>,
}

impl Submission {
    pub fn is_submitting(&self) -> bool {
        *self.submitting
    }

    pub fn reject(&self, errors: &ValidationErrors) {
        Logger::warn_with_component(
            self.component,
            &format!("rejected before sending ({} failed checks): {}", errors.len(), errors),
        );
        alert(&errors.to_string());
    }

    pub fn start(&self) {
        self.submitting.set(true);
    }

    /// Report the outcome of the request; `true` when the record was saved.
    pub fn finish(&self, result: Result<CreateRecordResponse, ApiError>) -> bool {
        self.submitting.set(false);
        match result {
            Ok(response) => {
                Logger::info_with_component(self.component, &response.message);
                alert(&response.message);
                true
            }
            Err(e) => {
                Logger::error_with_component(self.component, &e.to_string());
                alert(&e.to_string());
                false
            }
        }
    }
}

#[hook]
pub fn use_submission(component: &'static str) -> Submission {
    let submitting = use_state(|| false);
    Submission {
        component,
        submitting,
    }
}
