use anyhow::Context;
use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, Secret};

/// Postgres SQLSTATE for `unique_violation`.
pub const UNIQUE_VIOLATION: &str = "23505";

/// Inserts rows into the hosted table store through its REST interface.
///
/// Build it once at startup and share it: `reqwest::Client` pools
/// connections internally.
pub struct StoreClient {
    http_client: Client,
    base_url: Url,
    access_key: Secret<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Row violates a uniqueness constraint: {message}")]
    UniqueViolation { message: String },
    #[error("Store rejected the insert with status {status}: {message}")]
    Rejected {
        status: StatusCode,
        code: Option<String>,
        message: String,
    },
    #[error("Failed to reach the store")]
    Unreachable(#[source] reqwest::Error),
}

impl StoreError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, StoreError::UniqueViolation { .. })
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, StoreError::Unreachable(_))
    }
}

/// Error payload returned by the store on a failed insert.
#[derive(serde::Deserialize)]
struct StoreErrorBody {
    code: Option<String>,
    message: Option<String>,
}

impl StoreClient {
    pub fn new(
        base_url: String,
        access_key: Secret<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, anyhow::Error> {
        let base_url = Url::parse(&base_url)
            .with_context(|| format!("{} is not a valid store URL", base_url))?;
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build the store HTTP client")?;
        Ok(Self {
            http_client,
            base_url,
            access_key,
        })
    }

    /// Insert a single row into `table`.
    ///
    /// Exactly one request is issued; failures are never retried here.
    #[tracing::instrument(name = "Inserting a row into the store", skip(self, row))]
    pub async fn insert<T>(&self, table: &str, row: &T) -> Result<(), StoreError>
    where
        T: serde::Serialize,
    {
        let url = self.table_url(table);
        let response = self
            .http_client
            .post(url)
            .header("apikey", self.access_key.expose_secret())
            .bearer_auth(self.access_key.expose_secret())
            .header("Prefer", "return=minimal")
            .json(&[row])
            .send()
            .await
            .map_err(StoreError::Unreachable)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.map_err(StoreError::Unreachable)?;
        Err(rejection_from(status, &body))
    }

    fn table_url(&self, table: &str) -> String {
        format!(
            "{}/rest/v1/{}",
            self.base_url.as_str().trim_end_matches('/'),
            table
        )
    }
}

fn rejection_from(status: StatusCode, body: &str) -> StoreError {
    match serde_json::from_str::<StoreErrorBody>(body) {
        Ok(StoreErrorBody { code, message }) => {
            let message = message.unwrap_or_else(|| body.to_string());
            if code.as_deref() == Some(UNIQUE_VIOLATION) {
                StoreError::UniqueViolation { message }
            } else {
                StoreError::Rejected {
                    status,
                    code,
                    message,
                }
            }
        }
        Err(_) => StoreError::Rejected {
            status,
            code: None,
            message: body.to_string(),
        },
    }
}
