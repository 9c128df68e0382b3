use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use chrono::{DateTime, Utc};

use crate::domain::{EmailAddress, FormValue, NewWaitlistEntry};
use crate::store_client::{StoreClient, StoreError};
use crate::utils::{error_chain_fmt, ErrorBody, SuccessBody, UNEXPECTED_ERROR_MESSAGE};

pub const WAITLIST_TABLE: &str = "waitlist";

#[derive(serde::Deserialize)]
pub struct WaitlistFormData {
    #[serde(default)]
    email: FormValue,
}

impl TryFrom<WaitlistFormData> for NewWaitlistEntry {
    type Error = String;

    fn try_from(value: WaitlistFormData) -> Result<Self, Self::Error> {
        let email = value
            .email
            .into_text()
            .ok_or_else(|| "Email is required".to_string())?;
        let email = EmailAddress::parse(email)
            .map_err(|_| "Please enter a valid email address".to_string())?;
        Ok(Self { email })
    }
}

#[derive(thiserror::Error)]
pub enum WaitlistError {
    #[error("{0}")]
    ValidationError(String),
    #[error("This email is already on our waitlist")]
    Conflict(#[source] StoreError),
    #[error("Failed to join waitlist. Please try again.")]
    StoreError(#[source] StoreError),
    #[error("{}", UNEXPECTED_ERROR_MESSAGE)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for WaitlistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<StoreError> for WaitlistError {
    fn from(e: StoreError) -> Self {
        if e.is_unique_violation() {
            WaitlistError::Conflict(e)
        } else if e.is_unreachable() {
            WaitlistError::UnexpectedError(anyhow::Error::new(e))
        } else {
            WaitlistError::StoreError(e)
        }
    }
}

impl ResponseError for WaitlistError {
    fn status_code(&self) -> StatusCode {
        match self {
            WaitlistError::ValidationError(_) => StatusCode::BAD_REQUEST,
            WaitlistError::Conflict(_) => StatusCode::CONFLICT,
            WaitlistError::StoreError(_) | WaitlistError::UnexpectedError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody::new(self))
    }
}

#[tracing::instrument(
    name = "Adding an email to the waitlist",
    skip(body, store_client),
    fields(waitlist_email = tracing::field::Empty)
)]
pub async fn join_waitlist(
    body: web::Json<WaitlistFormData>,
    store_client: web::Data<StoreClient>,
) -> Result<HttpResponse, WaitlistError> {
    let new_entry: NewWaitlistEntry = body.0.try_into().map_err(WaitlistError::ValidationError)?;
    tracing::Span::current().record(
        "waitlist_email",
        &tracing::field::display(&new_entry.email),
    );

    insert_waitlist_entry(&store_client, &new_entry)
        .await
        .map_err(|e| {
            let e = WaitlistError::from(e);
            if e.status_code().is_server_error() {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Failed to store waitlist entry"
                );
            }
            e
        })?;

    Ok(HttpResponse::Ok().json(SuccessBody::new("Successfully joined waitlist!")))
}

#[derive(serde::Serialize)]
struct WaitlistRow<'a> {
    email: &'a str,
    created_at: DateTime<Utc>,
}

#[tracing::instrument(name = "Saving waitlist entry in the store", skip(store_client, new_entry))]
pub async fn insert_waitlist_entry(
    store_client: &StoreClient,
    new_entry: &NewWaitlistEntry,
) -> Result<(), StoreError> {
    let row = WaitlistRow {
        email: new_entry.email.as_ref(),
        created_at: Utc::now(),
    };
    store_client.insert(WAITLIST_TABLE, &row).await
}
