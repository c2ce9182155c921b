use crate::core::ClassificationApi;
use crate::domain::model::{AccessToken, NomenclatureType, Product, ProjectName, RemoteProductDetail};
use crate::utils::error::{Result, SyncError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedProduct {
    pub external_id: String,
    pub tariff_number: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollReport {
    pub remote_products: usize,
    pub classified: Vec<ClassifiedProduct>,
    /// External ids without a finalized combined-nomenclature classification yet.
    pub pending: Vec<String>,
}

/// One pass over the project's products. Nothing is re-checked; run it again later
/// for products still pending.
pub struct ClassificationPoller<'a, A: ClassificationApi + ?Sized> {
    api: &'a A,
    token: &'a AccessToken,
}

impl<'a, A: ClassificationApi + ?Sized> ClassificationPoller<'a, A> {
    pub fn new(api: &'a A, token: &'a AccessToken) -> Self {
        Self { api, token }
    }

    pub async fn poll(&self, project: &ProjectName, products: &mut [Product]) -> Result<PollReport> {
        let summaries = self.api.list_products(self.token, project).await?;
        tracing::info!(
            "🔍 Project '{}' holds {} products",
            project,
            summaries.len()
        );

        let mut report = PollReport {
            remote_products: summaries.len(),
            ..PollReport::default()
        };

        for summary in &summaries {
            let detail = self.api.get_product(self.token, &summary.product_id).await?;
            tracing::debug!(
                "Product {} (external id {}) has {} classifications",
                summary.product_id,
                detail.external_id,
                detail.classifications.len()
            );

            match apply_classification(&detail, products)? {
                Some(tariff_number) => report.classified.push(ClassifiedProduct {
                    external_id: detail.external_id.clone(),
                    tariff_number,
                }),
                None => report.pending.push(detail.external_id.clone()),
            }
        }

        tracing::info!(
            "✅ {} classified, {} pending",
            report.classified.len(),
            report.pending.len()
        );
        Ok(report)
    }
}

/// Writes the finalized combined-nomenclature tariff number of `detail` into the matching
/// local product and returns it. The first combined-nomenclature entry wins.
pub fn apply_classification(
    detail: &RemoteProductDetail,
    products: &mut [Product],
) -> Result<Option<String>> {
    let combined = detail
        .classifications
        .iter()
        .filter(|c| c.nomenclature_type == NomenclatureType::CombinedNomenclature)
        .count();
    if combined > 1 {
        tracing::warn!(
            "Product {} has {} combined nomenclature classifications, using the first",
            detail.external_id,
            combined
        );
    }

    let Some(classification) = detail
        .combined_nomenclature()
        .filter(|c| c.is_finalized())
    else {
        return Ok(None);
    };

    let product = products
        .iter_mut()
        .find(|p| p.id == detail.external_id)
        .ok_or_else(|| SyncError::LookupError {
            external_id: detail.external_id.clone(),
        })?;

    let Some(tariff_number) = classification.tariff_number.as_deref() else {
        tracing::warn!(
            "Product {} is finalized without a tariff number",
            detail.external_id
        );
        return Ok(None);
    };

    tracing::info!(
        "🏷️ {} ({}) -> {}",
        product.id,
        product.article_number,
        tariff_number
    );
    product.tariff_number = Some(tariff_number.to_string());
    Ok(Some(tariff_number.to_string()))
}
