use crate::core::ClassificationApi;
use crate::domain::model::{AccessToken, Credentials};
use crate::utils::error::Result;

/// Exchanges the client credentials for a bearer token. The token is never refreshed;
/// every invocation of the flow obtains its own.
pub async fn authenticate<A: ClassificationApi + ?Sized>(
    api: &A,
    credentials: &Credentials,
) -> Result<AccessToken> {
    tracing::info!("🔑 Authenticating client {}", credentials.client_id);
    let token = api.authenticate(credentials).await?;
    tracing::debug!("Access token obtained");
    Ok(token)
}
