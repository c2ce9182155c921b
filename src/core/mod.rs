pub mod auth;
pub mod engine;
pub mod poller;
pub mod project;
pub mod upload;

pub use crate::domain::model::{Credentials, Product, ProjectName};
pub use crate::domain::ports::{ClassificationApi, ConfigProvider, ProductStore};
pub use crate::utils::error::Result;
