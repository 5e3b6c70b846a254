use std::cell::Cell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, HtmlButtonElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use super::dom;
use super::notifications::Notifier;
use crate::config::{ContactMode, InteractionConfig};
use crate::contact::{
    delegation_failure_message, ContactError, ContactFields, DelegationError, Field, MailDraft, ValidatedContact,
    MAIL_CLIENT_MESSAGE, SENDING_LABEL, SUCCESS_MESSAGE,
};
use crate::log::{log_event, LogLevel};
use crate::notification::Severity;

const CONTACT_FORM_SELECTOR: &str = ".contact__form, #contact-form";
const SUBMIT_BUTTON_SELECTOR: &str = "button[type=\"submit\"]";

struct ContactFormBinding {
    config: InteractionConfig,
    notifier: Notifier,
    form: HtmlFormElement,
    submit: Option<HtmlButtonElement>,
    in_flight: Cell<bool>,
}

impl ContactFormBinding {
    fn field_value(&self, field: Field) -> String {
        let selector = format!("[name=\"{}\"]", field.as_str());
        let Some(element) = self.form.query_selector(&selector).ok().flatten() else {
            return String::new();
        };

        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(textarea) = element.dyn_ref::<HtmlTextAreaElement>() {
            textarea.value()
        } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            String::new()
        }
    }

    fn read_fields(&self) -> ContactFields {
        ContactFields {
            name: self.field_value(Field::Name),
            email: self.field_value(Field::Email),
            subject: self.field_value(Field::Subject),
            message: self.field_value(Field::Message),
        }
    }

    fn reject(&self, error: &ContactError) {
        let field = match error {
            ContactError::MissingField(field) => Some(field.as_str()),
            ContactError::InvalidEmail => None,
        };
        log_event(
            &self.config,
            LogLevel::Info,
            "contact_validation_failed",
            serde_json::json!({
                "error_class": error.error_class(),
                "field": field,
            }),
        );
        self.notifier.show(error.to_string(), Severity::Error);
    }

    fn set_busy(&self) -> Option<String> {
        self.in_flight.set(true);
        let submit = self.submit.as_ref()?;
        let original = submit.text_content();
        submit.set_text_content(Some(SENDING_LABEL));
        submit.set_disabled(true);
        original
    }

    fn set_idle(&self, label: Option<String>) {
        self.in_flight.set(false);
        if let Some(submit) = self.submit.as_ref() {
            if let Some(label) = label.as_deref() {
                submit.set_text_content(Some(label));
            }
            submit.set_disabled(false);
        }
    }

    async fn deliver(&self, contact: &ValidatedContact) -> Result<&'static str, DelegationError> {
        match &self.config.contact.mode {
            ContactMode::Simulated { delay_ms } => {
                TimeoutFuture::new(*delay_ms).await;
                Ok(SUCCESS_MESSAGE)
            }
            ContactMode::Mailto { recipient } => {
                open_mail_client(&MailDraft::compose(recipient, contact))?;
                Ok(MAIL_CLIENT_MESSAGE)
            }
            ContactMode::Endpoint { url } => {
                post_contact(url, contact).await?;
                Ok(SUCCESS_MESSAGE)
            }
        }
    }

    fn finish(&self, outcome: Result<&'static str, DelegationError>) {
        match outcome {
            Ok(message) => {
                self.form.reset();
                log_event(&self.config, LogLevel::Info, "contact_submitted", serde_json::json!({}));
                self.notifier.show(message, Severity::Success);
            }
            Err(error) => {
                log_event(
                    &self.config,
                    LogLevel::Warn,
                    "contact_delegation_failed",
                    serde_json::json!({ "message": error.to_string() }),
                );
                self.notifier.show(
                    delegation_failure_message(self.config.contact.fallback_address()),
                    Severity::Error,
                );
            }
        }
    }
}

fn open_mail_client(draft: &MailDraft) -> Result<(), DelegationError> {
    let win = window().ok_or_else(|| DelegationError::MailClient("window unavailable".to_string()))?;
    win.location()
        .set_href(&draft.to_uri())
        .map_err(|error| DelegationError::MailClient(format!("{error:?}")))
}

async fn post_contact(url: &str, contact: &ValidatedContact) -> Result<(), DelegationError> {
    let response = Request::post(url)
        .json(contact)
        .map_err(|error| DelegationError::Transport(error.to_string()))?
        .send()
        .await
        .map_err(|error| DelegationError::Transport(error.to_string()))?;

    if !response.ok() {
        return Err(DelegationError::EndpointStatus(response.status()));
    }

    Ok(())
}

fn handle_submit(binding: Rc<ContactFormBinding>) {
    if binding.in_flight.get() {
        return;
    }

    let contact = match binding.read_fields().validate() {
        Ok(contact) => contact,
        Err(error) => {
            binding.reject(&error);
            return;
        }
    };

    let label = binding.set_busy();
    spawn_local(async move {
        let outcome = binding.deliver(&contact).await;
        binding.set_idle(label);
        binding.finish(outcome);
    });
}

pub(crate) struct ContactFormHandler {
    _listener: EventListener,
}

impl ContactFormHandler {
    pub(crate) fn init(config: &InteractionConfig, notifier: Notifier) -> Option<Self> {
        let form = dom::query(CONTACT_FORM_SELECTOR)?.dyn_into::<HtmlFormElement>().ok()?;
        let submit = form
            .query_selector(SUBMIT_BUTTON_SELECTOR)
            .ok()
            .flatten()
            .and_then(|button| button.dyn_into::<HtmlButtonElement>().ok());

        let binding = Rc::new(ContactFormBinding {
            config: config.clone(),
            notifier,
            form: form.clone(),
            submit,
            in_flight: Cell::new(false),
        });

        let listener = EventListener::new_with_options(
            &form,
            "submit",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                handle_submit(binding.clone());
            },
        );

        Some(Self { _listener: listener })
    }
}
