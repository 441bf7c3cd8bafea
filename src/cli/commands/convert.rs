//! Convert command implementation
//!
//! Translates a provider wire value to its canonical type, or a canonical
//! type to the provider's entity type.

use super::{load_table, report_failure};
use crate::config::RiskConfig;
use crate::core::reconcile::TypeReconciler;
use crate::domain::{PiiType, Provider};
use clap::{ArgGroup, Args};

/// Arguments for the convert command
#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("direction")
        .required(true)
        .args(["to_canonical", "from_canonical"])
))]
pub struct ConvertArgs {
    /// Detection provider (presidio, azure, aws)
    #[arg(short, long)]
    pub provider: Provider,

    /// Provider entity string to convert to a canonical type
    #[arg(long, value_name = "WIRE")]
    pub to_canonical: Option<String>,

    /// Canonical type to convert to the provider's entity type
    #[arg(long, value_name = "TYPE")]
    pub from_canonical: Option<PiiType>,
}

impl ConvertArgs {
    /// Execute the convert command
    pub async fn execute(&self, config: &RiskConfig) -> anyhow::Result<i32> {
        let table = match load_table(config) {
            Ok(t) => t,
            Err(e) => return Ok(report_failure("Failed to load mapping table", &e)),
        };
        let reconciler = TypeReconciler::new(table);

        if let Some(ref wire) = self.to_canonical {
            return Ok(match reconciler.wire_to_canonical(self.provider, wire) {
                Ok(pii_type) => {
                    println!("✅ {}:{} → {}", self.provider, wire, pii_type);
                    0
                }
                Err(e) => report_failure("No canonical equivalent", &e),
            });
        }

        if let Some(pii_type) = self.from_canonical {
            return Ok(match reconciler.canonical_to_provider(pii_type, self.provider) {
                Ok(entity) => {
                    println!(
                        "✅ {} → {}:{} (wire value {})",
                        pii_type,
                        self.provider,
                        entity.symbol(),
                        entity.wire_value()
                    );
                    0
                }
                Err(e) => report_failure("No provider equivalent", &e),
            });
        }

        Ok(2)
    }
}
