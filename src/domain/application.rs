//! Candidate (writer/guide) applications submitted through the site.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::email::Email;
use super::error::DomainError;

/// Maximum length of the free-text message.
pub const MESSAGE_MAX: usize = 5000;

/// Raw form payload as posted by the browser. Every field is optional so
/// validation can report all problems at once.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub experience: Option<String>,
    pub message: Option<String>,
}

/// A validated application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateApplication {
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub position: String,
    pub experience: String,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
}

impl CandidateApplication {
    /// Validate a form, collecting every field error.
    ///
    /// # Errors
    ///
    /// Returns all [`DomainError`]s found, one per offending field.
    pub fn from_form(form: ApplicationForm, now: DateTime<Utc>) -> Result<Self, Vec<DomainError>> {
        let mut errors = Vec::new();

        let name = required(form.name, "name", &mut errors);
        let position = required(form.position, "position", &mut errors);
        let experience = required(form.experience, "experience", &mut errors);
        let message = required(form.message, "message", &mut errors);
        if message.chars().count() > MESSAGE_MAX {
            errors.push(DomainError::TooLong {
                field: "message",
                max: MESSAGE_MAX,
            });
        }

        let email = match form.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
            None => {
                errors.push(DomainError::MissingField { field: "email" });
                None
            }
            Some(raw) => match Email::parse(raw) {
                Ok(email) => Some(email),
                Err(e) => {
                    errors.push(e);
                    None
                }
            },
        };

        match email {
            Some(email) if errors.is_empty() => Ok(Self {
                name,
                email,
                phone: form
                    .phone
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty()),
                position,
                experience,
                message,
                submitted_at: now,
            }),
            _ => Err(errors),
        }
    }
}

fn required(value: Option<String>, field: &'static str, errors: &mut Vec<DomainError>) -> String {
    let value = value.map(|v| v.trim().to_string()).unwrap_or_default();
    if value.is_empty() {
        errors.push(DomainError::MissingField { field });
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ApplicationForm {
        ApplicationForm {
            name: Some("Jordan Reel".into()),
            email: Some("jordan@example.com".into()),
            phone: Some(" ".into()),
            position: Some("Staff writer".into()),
            experience: Some("Ten years guiding on the Snake River".into()),
            message: Some("I'd love to write about fly fishing.".into()),
        }
    }

    #[test]
    fn valid_form_is_accepted() {
        let app = CandidateApplication::from_form(form(), Utc::now()).unwrap();
        assert_eq!(app.name, "Jordan Reel");
        assert_eq!(app.phone, None);
    }

    #[test]
    fn all_missing_fields_are_reported() {
        let errors = CandidateApplication::from_form(ApplicationForm::default(), Utc::now()).unwrap_err();
        let fields: Vec<String> = errors.iter().map(ToString::to_string).collect();
        assert_eq!(errors.len(), 5);
        assert!(fields.contains(&"email is required".to_string()));
        assert!(fields.contains(&"name is required".to_string()));
    }

    #[test]
    fn invalid_email_is_reported() {
        let mut form = form();
        form.email = Some("not-an-email".into());
        let errors = CandidateApplication::from_form(form, Utc::now()).unwrap_err();
        assert!(matches!(errors.as_slice(), [DomainError::InvalidEmail { .. }]));
    }

    #[test]
    fn overlong_message_is_rejected() {
        let mut form = form();
        form.message = Some("x".repeat(MESSAGE_MAX + 1));
        let errors = CandidateApplication::from_form(form, Utc::now()).unwrap_err();
        assert!(matches!(errors.as_slice(), [DomainError::TooLong { field: "message", .. }]));
    }
}
