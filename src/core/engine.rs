use crate::core::auth::authenticate;
use crate::core::poller::{ClassificationPoller, PollReport};
use crate::core::project::{create_project, project_name_for, DEFAULT_PROJECT_PREFIX};
use crate::core::upload::ProductUploader;
use crate::core::ClassificationApi;
use crate::domain::model::{Credentials, Product, ProjectName};
use crate::utils::error::Result;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub project: ProjectName,
    pub uploaded: usize,
    pub poll: PollReport,
}

/// Drives the classification flow against a remote service. Every step is awaited
/// before the next one starts and the first failure aborts the whole flow.
pub struct ClassificationSync<A: ClassificationApi> {
    api: A,
    credentials: Credentials,
    project_prefix: String,
}

impl<A: ClassificationApi> ClassificationSync<A> {
    pub fn new(api: A, credentials: Credentials) -> Self {
        Self {
            api,
            credentials,
            project_prefix: DEFAULT_PROJECT_PREFIX.to_string(),
        }
    }

    pub fn with_project_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.project_prefix = prefix.into();
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn project_name(&self, date: NaiveDate) -> ProjectName {
        project_name_for(&self.project_prefix, date)
    }

    /// Authenticate, create the project for `date`, upload `products` and poll once.
    pub async fn run(&self, products: &mut [Product], date: NaiveDate) -> Result<SyncReport> {
        tracing::info!("🚀 Starting classification sync for {} products", products.len());

        let token = authenticate(&self.api, &self.credentials).await?;

        let project = self.project_name(date);
        create_project(&self.api, &token, &project).await?;

        let uploaded = ProductUploader::new(&self.api, &token)
            .upload_all(&project, products)
            .await?;

        let poll = ClassificationPoller::new(&self.api, &token)
            .poll(&project, products)
            .await?;

        Ok(SyncReport {
            project,
            uploaded,
            poll,
        })
    }

    /// Authenticate and poll an existing project.
    pub async fn poll(&self, project: &ProjectName, products: &mut [Product]) -> Result<PollReport> {
        tracing::info!("🚀 Polling classifications of project '{}'", project);

        let token = authenticate(&self.api, &self.credentials).await?;
        ClassificationPoller::new(&self.api, &token)
            .poll(project, products)
            .await
    }
}
