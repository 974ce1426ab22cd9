//! Candidate application submission.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::domain::application::{ApplicationForm, CandidateApplication};
use crate::domain::error::DomainError;
use crate::error::{Error, Result};
use crate::port::outbound::form::FormSink;

/// Why a submission was not accepted.
#[derive(Debug)]
pub enum SubmitError {
    /// Field validation failed; one entry per offending field.
    Invalid(Vec<DomainError>),
    /// The spreadsheet webhook is not configured.
    Unavailable,
    /// The webhook rejected or failed the request.
    Upstream(Error),
}

impl SubmitError {
    /// Names of the fields that failed validation.
    #[must_use]
    pub fn fields(&self) -> Vec<&'static str> {
        match self {
            Self::Invalid(errors) => errors
                .iter()
                .filter_map(|e| match e {
                    DomainError::MissingField { field } | DomainError::TooLong { field, .. } => Some(*field),
                    DomainError::InvalidEmail { .. } => Some("email"),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(errors) => {
                let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
                write!(f, "invalid application: {}", messages.join("; "))
            }
            Self::Unavailable => f.write_str("applications are not being accepted right now"),
            Self::Upstream(e) => write!(f, "{e}"),
        }
    }
}

/// Flat record for the spreadsheet webhook.
#[must_use]
pub fn sheet_record(application: &CandidateApplication) -> Value {
    json!({
        "formType": "application",
        "timestamp": application.submitted_at.to_rfc3339(),
        "name": application.name,
        "email": application.email.as_str(),
        "phone": application.phone.as_deref().unwrap_or_default(),
        "position": application.position,
        "experience": application.experience,
        "message": application.message,
    })
}

/// Validate a form and forward it to the sink.
///
/// # Errors
/// See [`SubmitError`]. Validation runs before the sink is consulted, so an
/// invalid form is reported even when no sink is configured.
pub async fn submit(
    sink: Option<&dyn FormSink>,
    form: ApplicationForm,
    now: DateTime<Utc>,
) -> std::result::Result<CandidateApplication, SubmitError> {
    let application = CandidateApplication::from_form(form, now).map_err(SubmitError::Invalid)?;
    let sink = sink.ok_or(SubmitError::Unavailable)?;

    forward(sink, &application).await.map_err(|e| {
        warn!(email = %application.email, error = %e, "Application webhook failed");
        SubmitError::Upstream(e)
    })?;
    info!(position = %application.position, "Application received");
    Ok(application)
}

async fn forward(sink: &dyn FormSink, application: &CandidateApplication) -> Result<()> {
    sink.submit(&sheet_record(application)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::fakes::RecordingSink;

    fn form() -> ApplicationForm {
        ApplicationForm {
            name: Some("Avery".into()),
            email: Some("avery@example.com".into()),
            phone: Some("555-0100".into()),
            position: Some("Gear reviewer".into()),
            experience: Some("Tournament bass angler".into()),
            message: Some("Happy to test reels.".into()),
        }
    }

    #[tokio::test]
    async fn forwards_flat_record() {
        let sink = RecordingSink::default();
        let app = submit(Some(&sink), form(), Utc::now()).await.unwrap();
        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["formType"], "application");
        assert_eq!(records[0]["email"], "avery@example.com");
        assert_eq!(records[0]["timestamp"], app.submitted_at.to_rfc3339());
    }

    #[tokio::test]
    async fn invalid_form_lists_fields_even_without_sink() {
        let mut bad = form();
        bad.position = None;
        bad.email = Some("x".into());
        let err = submit(None, bad, Utc::now()).await.unwrap_err();
        let mut fields = err.fields();
        fields.sort_unstable();
        assert_eq!(fields, ["email", "position"]);
    }

    #[tokio::test]
    async fn missing_sink_is_unavailable() {
        let err = submit(None, form(), Utc::now()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Unavailable));
    }

    #[tokio::test]
    async fn sink_failure_is_upstream() {
        let sink = RecordingSink::failing();
        let err = submit(Some(&sink), form(), Utc::now()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Upstream(_)));
    }
}
