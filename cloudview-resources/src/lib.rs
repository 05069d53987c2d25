//! AWS and Kubernetes resources for cloudview
//!
//! Each resource module declares the resource's field schema, its detail-page
//! fieldsets and the list columns offered as selects. [`CloudCatalog`] ties
//! them to the registries, the record store and the view composer.
//!
//! ```rust,ignore
//! let catalog = CloudCatalog::open(ConfigProvider::new().load()?).await?;
//! let tree = catalog.render_detail(&volume)?;
//! ```

pub mod aws;
pub mod catalog;
pub mod common;
pub mod defaults;
pub mod error;
pub mod k8s;

pub use aws::iam_role::{IamRoleResolver, RoleDirectory, StaticRoleDirectory};
pub use aws::key_pair::PrivateKeyStash;
pub use aws::security_group::{rules_fallback, LinkBuilder, NO_PERMISSIONS_MESSAGE};
pub use catalog::CloudCatalog;
pub use defaults::{cloud_schema_defaults, cloud_view_defaults};
pub use error::{ResourceError, Result};
