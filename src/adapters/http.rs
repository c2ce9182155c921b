use crate::domain::model::{
    AccessToken, Credentials, NewRemoteProduct, ProjectName, RemoteProductDetail,
    RemoteProductSummary, TokenResponse,
};
use crate::domain::ports::{ClassificationApi, ConfigProvider};
use crate::utils::error::{Result, SyncError};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.traide.ai/v1/";

/// Outcome of a request that reached the server.
#[derive(Debug)]
pub enum ApiResponse {
    Success { status: StatusCode, body: String },
    Failure { status: StatusCode, text: String },
}

impl ApiResponse {
    async fn read(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            Ok(ApiResponse::Success { status, body: text })
        } else {
            Ok(ApiResponse::Failure { status, text })
        }
    }
}

pub struct HttpClassificationApi {
    base_url: Url,
    client: Client,
}

impl HttpClassificationApi {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            client: builder.build()?,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::with_timeout(config.base_url(), config.request_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn project_endpoint(&self, path: &str, project: &ProjectName) -> Result<Url> {
        let mut url = self.endpoint(path)?;
        url.query_pairs_mut()
            .append_pair("project_name", project.as_str());
        Ok(url)
    }

    fn product_detail_endpoint(&self, product_id: &str) -> Result<Url> {
        let mut url = self.endpoint("product")?;
        url.path_segments_mut()
            .map_err(|_| SyncError::UrlError(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .push(product_id);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<ApiResponse> {
        let response = request.send().await?;
        tracing::debug!(
            "{} responded with status {}",
            response.url().path(),
            response.status()
        );
        ApiResponse::read(response).await
    }
}

/// `Url::join` drops the last path segment unless the base ends with a slash.
fn normalize_base_url(base_url: &str) -> Result<Url> {
    if base_url.ends_with('/') {
        Ok(Url::parse(base_url)?)
    } else {
        Ok(Url::parse(&format!("{}/", base_url))?)
    }
}

#[async_trait]
impl ClassificationApi for HttpClassificationApi {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AccessToken> {
        let url = self.endpoint("auth/token")?;
        tracing::debug!("Requesting access token from {}", url);

        match self.send(self.client.post(url).json(credentials)).await? {
            ApiResponse::Success { status, body } => {
                let token: TokenResponse = serde_json::from_str(&body)?;
                if token.access_token.is_empty() {
                    return Err(SyncError::AuthError {
                        status: status.as_u16(),
                        message: "response carried an empty access_token".to_string(),
                    });
                }
                Ok(AccessToken::new(token.access_token))
            }
            ApiResponse::Failure { status, text } => Err(SyncError::AuthError {
                status: status.as_u16(),
                message: text,
            }),
        }
    }

    async fn create_project(&self, token: &AccessToken, project: &ProjectName) -> Result<()> {
        let url = self.project_endpoint("project", project)?;
        let request = self.client.post(url).bearer_auth(token.as_str());

        match self.send(request).await? {
            ApiResponse::Success { .. } => Ok(()),
            ApiResponse::Failure { status, text } => Err(SyncError::ProjectCreationError {
                project: project.to_string(),
                status: status.as_u16(),
                message: text,
            }),
        }
    }

    async fn upload_product(&self, token: &AccessToken, product: &NewRemoteProduct) -> Result<()> {
        let url = self.endpoint("product")?;
        let request = self
            .client
            .post(url)
            .bearer_auth(token.as_str())
            .json(product);

        match self.send(request).await? {
            ApiResponse::Success { .. } => Ok(()),
            ApiResponse::Failure { status, text } => Err(SyncError::ProductUploadError {
                external_id: product.external_id.clone(),
                status: status.as_u16(),
                message: text,
            }),
        }
    }

    async fn list_products(
        &self,
        token: &AccessToken,
        project: &ProjectName,
    ) -> Result<Vec<RemoteProductSummary>> {
        let url = self.project_endpoint("product", project)?;
        let request = self.client.get(url).bearer_auth(token.as_str());

        match self.send(request).await? {
            ApiResponse::Success { body, .. } => Ok(serde_json::from_str(&body)?),
            ApiResponse::Failure { status, text } => Err(SyncError::QueryError {
                resource: format!("products of project '{}'", project),
                status: status.as_u16(),
                message: text,
            }),
        }
    }

    async fn get_product(
        &self,
        token: &AccessToken,
        product_id: &str,
    ) -> Result<RemoteProductDetail> {
        let url = self.product_detail_endpoint(product_id)?;
        let request = self.client.get(url).bearer_auth(token.as_str());

        match self.send(request).await? {
            ApiResponse::Success { body, .. } => Ok(serde_json::from_str(&body)?),
            ApiResponse::Failure { status, text } => Err(SyncError::QueryError {
                resource: format!("classification of product {}", product_id),
                status: status.as_u16(),
                message: text,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn credentials() -> Credentials {
        Credentials {
            client_id: "client-1".to_string(),
            client_secret: "secret-1".to_string(),
        }
    }

    #[test]
    fn test_base_url_without_trailing_slash() {
        let api = HttpClassificationApi::new("https://api.traide.ai/v1").unwrap();
        assert_eq!(
            api.endpoint("auth/token").unwrap().as_str(),
            "https://api.traide.ai/v1/auth/token"
        );
    }

    #[test]
    fn test_product_id_is_path_encoded() {
        let api = HttpClassificationApi::new(DEFAULT_BASE_URL).unwrap();
        assert_eq!(
            api.product_detail_endpoint("a/b").unwrap().as_str(),
            "https://api.traide.ai/v1/product/a%2Fb"
        );
    }

    #[tokio::test]
    async fn test_authenticate_returns_token() {
        let server = MockServer::start_async().await;
        let auth_mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/auth/token").json_body(serde_json::json!({
                    "client_id": "client-1",
                    "client_secret": "secret-1"
                }));
                then.status(200)
                    .json_body(serde_json::json!({"access_token": "token-abc"}));
            })
            .await;

        let api = HttpClassificationApi::new(&server.url("/v1/")).unwrap();
        let token = api.authenticate(&credentials()).await.unwrap();

        auth_mock.assert_async().await;
        assert_eq!(token.as_str(), "token-abc");
    }

    #[tokio::test]
    async fn test_authenticate_rejected() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/auth/token");
                then.status(401).body("invalid client");
            })
            .await;

        let api = HttpClassificationApi::new(&server.url("/v1/")).unwrap();
        let err = api.authenticate(&credentials()).await.unwrap_err();

        match err {
            SyncError::AuthError { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "invalid client");
            }
            other => panic!("expected AuthError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_token_is_an_auth_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/auth/token");
                then.status(200).json_body(serde_json::json!({"access_token": ""}));
            })
            .await;

        let api = HttpClassificationApi::new(&server.url("/v1/")).unwrap();
        let err = api.authenticate(&credentials()).await.unwrap_err();

        assert!(matches!(err, SyncError::AuthError { status: 200, .. }));
    }

    #[tokio::test]
    async fn test_create_project_failure_carries_server_text() {
        let server = MockServer::start_async().await;
        let project_mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/project")
                    .query_param("project_name", "weekly-batch")
                    .header("authorization", "Bearer token-abc");
                then.status(409).body("project already exists");
            })
            .await;

        let api = HttpClassificationApi::new(&server.url("/v1/")).unwrap();
        let err = api
            .create_project(&AccessToken::new("token-abc"), &ProjectName::new("weekly-batch"))
            .await
            .unwrap_err();

        project_mock.assert_async().await;
        match err {
            SyncError::ProjectCreationError {
                project,
                status,
                message,
            } => {
                assert_eq!(project, "weekly-batch");
                assert_eq!(status, 409);
                assert_eq!(message, "project already exists");
            }
            other => panic!("expected ProjectCreationError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_and_get_products() {
        let server = MockServer::start_async().await;
        let list_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v1/product")
                    .query_param("project_name", "weekly-batch")
                    .header("authorization", "Bearer token-abc");
                then.status(200)
                    .json_body(serde_json::json!([{"product_id": 41, "external_id": "123"}]));
            })
            .await;
        let detail_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v1/product/41")
                    .header("authorization", "Bearer token-abc");
                then.status(200).json_body(serde_json::json!({
                    "external_id": "123",
                    "classifications": []
                }));
            })
            .await;

        let api = HttpClassificationApi::new(&server.url("/v1/")).unwrap();
        let token = AccessToken::new("token-abc");

        let products = api
            .list_products(&token, &ProjectName::new("weekly-batch"))
            .await
            .unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].product_id, "41");

        let detail = api.get_product(&token, &products[0].product_id).await.unwrap();
        assert_eq!(detail.external_id, "123");
        assert!(detail.classifications.is_empty());

        list_mock.assert_async().await;
        detail_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_product_failure_is_query_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/product/7");
                then.status(500).body("boom");
            })
            .await;

        let api = HttpClassificationApi::new(&server.url("/v1/")).unwrap();
        let err = api
            .get_product(&AccessToken::new("t"), "7")
            .await
            .unwrap_err();

        assert!(matches!(err, SyncError::QueryError { status: 500, .. }));
        assert!(err.to_string().contains("boom"));
    }
}
