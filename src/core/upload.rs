use crate::core::ClassificationApi;
use crate::domain::model::{AccessToken, NewRemoteProduct, Product, ProjectName};
use crate::utils::error::Result;

/// Uploads products one at a time, in input order.
pub struct ProductUploader<'a, A: ClassificationApi + ?Sized> {
    api: &'a A,
    token: &'a AccessToken,
}

impl<'a, A: ClassificationApi + ?Sized> ProductUploader<'a, A> {
    pub fn new(api: &'a A, token: &'a AccessToken) -> Self {
        Self { api, token }
    }

    /// Stops at the first rejected product. Products uploaded before it stay in the
    /// remote project.
    pub async fn upload_all(&self, project: &ProjectName, products: &[Product]) -> Result<usize> {
        tracing::info!(
            "📤 Uploading {} products to project '{}'",
            products.len(),
            project
        );

        for (index, product) in products.iter().enumerate() {
            let payload = NewRemoteProduct::from_product(product, project);
            tracing::debug!(
                "📤 {}/{}: {} ({})",
                index + 1,
                products.len(),
                payload.external_id,
                payload.article_number
            );
            self.api.upload_product(self.token, &payload).await?;
        }

        Ok(products.len())
    }
}
