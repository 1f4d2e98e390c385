use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicBool, Ordering},
};

use boomabrovers_contact::Field;
use strum::VariantArray;

use crate::{ContactFields, FieldErrors, Transport, validate};

const FALLBACK_MESSAGE: &str = "Failed to send message. Please try again later.";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
    Success,
    Error(String),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("a submission is already in flight")]
    Busy,

    #[error("{} field(s) need attention", .0.len())]
    Invalid(FieldErrors),
}

#[derive(Default)]
struct FormState {
    fields: ContactFields,
    errors: FieldErrors,
    state: SubmitState,
}

struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Holds the form and sends it through a transport, one attempt at a time.
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    in_flight: AtomicBool,
    form: Mutex<FormState>,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            in_flight: AtomicBool::new(false),
            form: Mutex::default(),
        }
    }

    fn form(&self) -> MutexGuard<'_, FormState> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_field(&self, field: Field, value: impl Into<String>) {
        self.form().fields.set(field, value);
    }

    pub fn set_fields(&self, fields: ContactFields) {
        self.form().fields = fields;
    }

    pub fn fields(&self) -> ContactFields {
        self.form().fields.clone()
    }

    pub fn errors(&self) -> FieldErrors {
        self.form().errors.clone()
    }

    pub fn state(&self) -> SubmitState {
        self.form().state.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Validates then delivers. Returns the state the form settled in.
    pub async fn submit(&self) -> Result<SubmitState, SubmitError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Submission rejected, another one is in flight");

            return Err(SubmitError::Busy);
        }

        let _guard = InFlight(&self.in_flight);

        let fields = {
            let mut form = self.form();
            let errors = validate(&form.fields);
            form.errors = errors.clone();

            if !errors.is_empty() {
                form.state = SubmitState::Idle;

                return Err(SubmitError::Invalid(errors));
            }

            form.state = SubmitState::Submitting;
            form.fields.clone()
        };

        let state = match self.transport.deliver(&fields).await {
            Ok(_) => {
                tracing::info!("Contact form delivered");

                SubmitState::Success
            }
            Err(err) => {
                tracing::warn!(error = %err, "Contact form delivery failed");

                let message = err.to_string();
                if message.is_empty() {
                    SubmitState::Error(FALLBACK_MESSAGE.to_owned())
                } else {
                    SubmitState::Error(message)
                }
            }
        };

        let mut form = self.form();
        if state == SubmitState::Success {
            // Edits made while the request was out are kept.
            for field in Field::VARIANTS {
                if form.fields.get(*field) == fields.get(*field) {
                    form.fields.set(*field, String::new());
                }
            }
        }
        form.state = state.clone();

        Ok(state)
    }
}
