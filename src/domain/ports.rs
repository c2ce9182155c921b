use crate::domain::model::{
    AccessToken, Credentials, NewRemoteProduct, Product, ProjectName, RemoteProductDetail,
    RemoteProductSummary,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ProductStore: Send + Sync {
    fn load(&self) -> impl std::future::Future<Output = Result<Vec<Product>>> + Send;
    fn save(&self, products: &[Product]) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn credentials(&self) -> Credentials;
    fn request_timeout(&self) -> Option<Duration>;
    fn project_prefix(&self) -> &str;
    fn products_input(&self) -> &str;
    fn products_output(&self) -> &str;
}

/// The remote classification service. Every call fails on a non-2xx response.
#[async_trait]
pub trait ClassificationApi: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AccessToken>;
    async fn create_project(&self, token: &AccessToken, project: &ProjectName) -> Result<()>;
    async fn upload_product(&self, token: &AccessToken, product: &NewRemoteProduct) -> Result<()>;
    async fn list_products(
        &self,
        token: &AccessToken,
        project: &ProjectName,
    ) -> Result<Vec<RemoteProductSummary>>;
    async fn get_product(&self, token: &AccessToken, product_id: &str)
        -> Result<RemoteProductDetail>;
}
