//! Domain models and types for pii-risk.
//!
//! The domain layer is pure data: the closed canonical taxonomy, the three closed
//! vendor taxonomies, the error hierarchy and the [`Result`] alias. Nothing here
//! performs I/O.
//!
//! # Example
//!
//! ```rust
//! use pii_risk::domain::{PiiType, Provider, ProviderEntity};
//!
//! # fn example() -> pii_risk::domain::Result<()> {
//! let pii_type: PiiType = "email_address".parse()?;
//! assert_eq!(pii_type.as_str(), "EMAIL_ADDRESS");
//!
//! let entity = ProviderEntity::from_wire(Provider::Aws, "SSN");
//! assert!(entity.is_some());
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod symbols;

pub mod errors;
pub mod providers;
pub mod result;
pub mod taxonomy;

// Re-export commonly used types for convenience
pub use errors::RiskError;
pub use providers::{AwsEntityType, AzureEntityType, PresidioEntityType, Provider, ProviderEntity};
pub use result::Result;
pub use taxonomy::{
    ClusterMembershipType, DhsCategory, HipaaCategory, MetadataType, NistCategory, PiiType,
    RiskLevel, RiskLevelDefinition,
};
