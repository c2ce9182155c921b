use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A product record as it lives in the ERP export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub article_number: String,
    pub name: String,
    pub weight: String,
    pub dimensions: String,
    #[serde(default)]
    pub tariff_number: Option<String>,
}

impl Product {
    /// Free text the remote AI classifies on.
    pub fn description(&self) -> String {
        format!(
            "{}\nWeight: {}\nDimensions: {}",
            self.name, self.weight, self.dimensions
        )
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}

/// Bearer token, valid for this process only.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Body of `POST /product`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRemoteProduct {
    pub external_id: String,
    pub product_name: String,
    pub article_number: String,
    pub description: String,
    pub project_name: String,
}

impl NewRemoteProduct {
    pub fn from_product(product: &Product, project: &ProjectName) -> Self {
        Self {
            external_id: product.id.clone(),
            product_name: product.name.clone(),
            article_number: product.article_number.clone(),
            description: product.description(),
            project_name: project.as_str().to_string(),
        }
    }
}

/// Entry of the project product list. Only the id is used.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteProductSummary {
    #[serde(deserialize_with = "string_or_number")]
    pub product_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteProductDetail {
    #[serde(deserialize_with = "string_or_number")]
    pub external_id: String,
    #[serde(default)]
    pub classifications: Vec<Classification>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NomenclatureType {
    CombinedNomenclature,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Classification {
    pub nomenclature_type: NomenclatureType,
    #[serde(default)]
    pub tariff_number: Option<String>,
    #[serde(default)]
    pub finalized_at: Option<String>,
}

impl Classification {
    pub fn is_finalized(&self) -> bool {
        self.finalized_at.is_some()
    }
}

impl RemoteProductDetail {
    /// First combined-nomenclature classification, finalized or not.
    pub fn combined_nomenclature(&self) -> Option<&Classification> {
        self.classifications
            .iter()
            .find(|c| c.nomenclature_type == NomenclatureType::CombinedNomenclature)
    }

    /// Tariff number of the combined-nomenclature classification once it is finalized.
    pub fn finalized_tariff_number(&self) -> Option<&str> {
        self.combined_nomenclature()
            .filter(|c| c.is_finalized())
            .and_then(|c| c.tariff_number.as_deref())
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}
