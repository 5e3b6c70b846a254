use std::sync::OnceLock;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

pub const SUCCESS_MESSAGE: &str = "Thank you for your message! I will get back to you within 24 hours.";
pub const MAIL_CLIENT_MESSAGE: &str = "Your email client has been opened with your message ready to send.";
pub const SENDING_LABEL: &str = "Sending Message...";

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Characters `encodeURIComponent` leaves untouched.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }
}

/// Display text doubles as the toast message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("Please fill in all required fields.")]
    MissingField(Field),
    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

impl ContactError {
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "missing_field",
            Self::InvalidEmail => "invalid_email",
        }
    }
}

#[derive(Debug, Error)]
pub enum DelegationError {
    #[error("mail client could not be opened: {0}")]
    MailClient(String),
    #[error("contact endpoint returned status {0}")]
    EndpointStatus(u16),
    #[error("contact endpoint unreachable: {0}")]
    Transport(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    pub fn validate(&self) -> Result<ValidatedContact, ContactError> {
        if let Some(missing) = Field::ALL
            .into_iter()
            .find(|field| self.get(*field).trim().is_empty())
        {
            return Err(ContactError::MissingField(missing));
        }

        let email = self.email.trim();
        if !is_valid_email(email) {
            return Err(ContactError::InvalidEmail);
        }

        Ok(ValidatedContact {
            name: self.name.trim().to_string(),
            email: email.to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidatedContact {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

pub fn is_valid_email(value: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"))
        .is_match(value)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MailDraft {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl MailDraft {
    pub fn compose(recipient: &str, contact: &ValidatedContact) -> Self {
        Self {
            recipient: recipient.to_string(),
            subject: contact.subject.clone(),
            body: format!(
                "Name: {}\nEmail: {}\n\n{}",
                contact.name, contact.email, contact.message
            ),
        }
    }

    pub fn to_uri(&self) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.recipient,
            utf8_percent_encode(&self.subject, URI_COMPONENT),
            utf8_percent_encode(&self.body, URI_COMPONENT),
        )
    }
}

pub fn delegation_failure_message(fallback_address: Option<&str>) -> String {
    match fallback_address {
        Some(address) => format!("Could not send your message. Please email {address} directly."),
        None => "Could not send your message. Please try again later.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactFields {
        ContactFields {
            name: " Ada Lovelace ".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Gearbox design".to_string(),
            message: "Could we talk about tolerances?".to_string(),
        }
    }

    #[test]
    fn valid_form_is_trimmed() {
        let contact = filled().validate().expect("valid form");
        assert_eq!(contact.name, "Ada Lovelace");
        assert_eq!(contact.email, "ada@example.com");
    }

    #[test]
    fn blank_message_is_missing() {
        let fields = ContactFields {
            message: "   ".to_string(),
            ..filled()
        };
        assert_eq!(fields.validate(), Err(ContactError::MissingField(Field::Message)));
        assert_eq!(
            ContactError::MissingField(Field::Message).to_string(),
            "Please fill in all required fields."
        );
    }

    #[test]
    fn first_missing_field_is_reported() {
        assert_eq!(
            ContactFields::default().validate(),
            Err(ContactError::MissingField(Field::Name))
        );
    }

    #[test]
    fn email_shape_is_checked() {
        let fields = ContactFields {
            email: "bad-email".to_string(),
            ..filled()
        };
        assert_eq!(fields.validate(), Err(ContactError::InvalidEmail));

        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email("a@@c.de"));
        assert!(!is_valid_email("@c.de"));
    }

    #[test]
    fn mailto_uri_encodes_like_uri_component() {
        let contact = filled().validate().expect("valid form");
        let draft = MailDraft::compose("me@example.com", &contact);

        assert_eq!(
            draft.to_uri(),
            "mailto:me@example.com?subject=Gearbox%20design&body=Name%3A%20Ada%20Lovelace%0AEmail%3A%20ada%40example.com%0A%0ACould%20we%20talk%20about%20tolerances%3F"
        );
    }

    #[test]
    fn failure_message_names_fallback_address() {
        assert_eq!(
            delegation_failure_message(Some("me@example.com")),
            "Could not send your message. Please email me@example.com directly."
        );
        assert!(delegation_failure_message(None).contains("try again"));
    }
}
