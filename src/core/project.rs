use crate::core::ClassificationApi;
use crate::domain::model::{AccessToken, ProjectName};
use crate::utils::error::Result;
use chrono::{Datelike, NaiveDate};

pub const DEFAULT_PROJECT_PREFIX: &str = "Daily Classification";

/// `"<prefix> <year>-<month>-<day>"`, month and day without zero padding.
///
/// Running twice on the same day yields the same name; the service then refuses
/// the second project and the caller is expected to `poll` the existing one.
pub fn project_name_for(prefix: &str, date: NaiveDate) -> ProjectName {
    ProjectName::new(format!(
        "{} {}-{}-{}",
        prefix,
        date.year(),
        date.month(),
        date.day()
    ))
}

pub async fn create_project<A: ClassificationApi + ?Sized>(
    api: &A,
    token: &AccessToken,
    project: &ProjectName,
) -> Result<()> {
    tracing::info!("📁 Creating project '{}'", project);
    api.create_project(token, project).await
}
