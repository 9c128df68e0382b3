use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use chrono::{DateTime, Utc};

use crate::domain::{EmailAddress, FormValue, NewContactSubmission, RequiredText};
use crate::store_client::{StoreClient, StoreError};
use crate::utils::{error_chain_fmt, ErrorBody, SuccessBody, UNEXPECTED_ERROR_MESSAGE};

pub const CONTACT_TABLE: &str = "contact_submissions";

#[derive(serde::Deserialize)]
pub struct ContactFormData {
    #[serde(default)]
    name: FormValue,
    #[serde(default)]
    email: FormValue,
    #[serde(default)]
    role: FormValue,
    #[serde(default)]
    message: FormValue,
}

impl TryFrom<ContactFormData> for NewContactSubmission {
    type Error = String;

    fn try_from(value: ContactFormData) -> Result<Self, Self::Error> {
        let missing = |_| "Missing required fields".to_string();
        let name = RequiredText::parse(value.name.into_text()).map_err(missing)?;
        let email = RequiredText::parse(value.email.into_text()).map_err(missing)?;
        let role = RequiredText::parse(value.role.into_text()).map_err(missing)?;
        // Same grammar as the waitlist: one validator for every form.
        let email = EmailAddress::parse(email.into_inner())
            .map_err(|_| "Please enter a valid email address".to_string())?;
        Ok(Self {
            name,
            email,
            role,
            message: value.message.into_text().unwrap_or_default(),
        })
    }
}

#[derive(thiserror::Error)]
pub enum ContactError {
    #[error("{0}")]
    ValidationError(String),
    #[error("Failed to store your submission. Please try again.")]
    StoreError(#[source] StoreError),
    #[error("{}", UNEXPECTED_ERROR_MESSAGE)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for ContactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<StoreError> for ContactError {
    fn from(e: StoreError) -> Self {
        if e.is_unreachable() {
            ContactError::UnexpectedError(anyhow::Error::new(e))
        } else {
            ContactError::StoreError(e)
        }
    }
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContactError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ContactError::StoreError(_) | ContactError::UnexpectedError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody::new(self))
    }
}

#[tracing::instrument(
    name = "Recording a contact form submission",
    skip(body, store_client),
    fields(contact_email = tracing::field::Empty, contact_role = tracing::field::Empty)
)]
pub async fn submit_contact(
    body: web::Json<ContactFormData>,
    store_client: web::Data<StoreClient>,
) -> Result<HttpResponse, ContactError> {
    let submission: NewContactSubmission =
        body.0.try_into().map_err(ContactError::ValidationError)?;
    let span = tracing::Span::current();
    span.record("contact_email", &tracing::field::display(&submission.email));
    span.record("contact_role", &submission.role.as_ref());

    insert_contact_submission(&store_client, &submission)
        .await
        .map_err(|e| {
            let e = ContactError::from(e);
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "Failed to store contact submission"
            );
            e
        })?;

    Ok(HttpResponse::Ok().json(SuccessBody::new("Form submitted successfully")))
}

#[derive(serde::Serialize)]
struct ContactRow<'a> {
    name: &'a str,
    email: &'a str,
    role: &'a str,
    message: &'a str,
    created_at: DateTime<Utc>,
}

#[tracing::instrument(
    name = "Saving contact submission in the store",
    skip(store_client, submission)
)]
pub async fn insert_contact_submission(
    store_client: &StoreClient,
    submission: &NewContactSubmission,
) -> Result<(), StoreError> {
    let row = ContactRow {
        name: submission.name.as_ref(),
        email: submission.email.as_ref(),
        role: submission.role.as_ref(),
        message: &submission.message,
        created_at: Utc::now(),
    };
    store_client.insert(CONTACT_TABLE, &row).await
}
