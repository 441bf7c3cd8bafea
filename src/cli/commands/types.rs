//! Types command implementation

use super::{load_table, report_failure};
use crate::config::RiskConfig;
use crate::core::mapping::PiiMapping;
use crate::domain::{ClusterMembershipType, HipaaCategory, RiskLevel};
use clap::Args;

/// Arguments for the types command
#[derive(Args, Debug)]
pub struct TypesArgs {
    /// Only types at this risk level (1, 2 or 3)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=3))]
    pub risk_level: Option<u8>,

    /// Only types in this HIPAA category (PHI, NON_PHI)
    #[arg(long)]
    pub hipaa: Option<HipaaCategory>,

    /// Only types in this cluster, e.g. CONTACT_INFORMATION
    #[arg(long)]
    pub cluster: Option<ClusterMembershipType>,

    /// Print the matching rows as JSON
    #[arg(long)]
    pub json: bool,
}

impl TypesArgs {
    /// Execute the types command
    pub async fn execute(&self, config: &RiskConfig) -> anyhow::Result<i32> {
        let table = match load_table(config) {
            Ok(t) => t,
            Err(e) => return Ok(report_failure("Failed to load mapping table", &e)),
        };

        let risk_level = match self.risk_level.map(RiskLevel::try_from).transpose() {
            Ok(level) => level,
            Err(e) => return Ok(report_failure("Invalid risk level", &e)),
        };

        let rows: Vec<&PiiMapping> = table
            .rows()
            .iter()
            .filter(|row| self.matches(row, risk_level))
            .collect();

        tracing::debug!(matched = rows.len(), total = table.len(), "Filtered taxonomy");

        if self.json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
            return Ok(0);
        }

        println!("📋 {} of {} PII types", rows.len(), table.len());
        println!();
        for row in rows {
            println!(
                "  {:<40} level {}  {:<8} {}",
                row.pii_type.as_str(),
                row.risk_level,
                row.hipaa_category.as_str(),
                row.cluster_membership_type
            );
        }

        Ok(0)
    }

    fn matches(&self, row: &PiiMapping, risk_level: Option<RiskLevel>) -> bool {
        risk_level.map_or(true, |level| row.risk_level == level)
            && self.hipaa.map_or(true, |hipaa| row.hipaa_category == hipaa)
            && self
                .cluster
                .map_or(true, |cluster| row.cluster_membership_type == cluster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mapping::MappingTable;

    fn args() -> TypesArgs {
        TypesArgs {
            risk_level: None,
            hipaa: None,
            cluster: None,
            json: false,
        }
    }

    #[test]
    fn test_filters_combine() {
        let table = MappingTable::builtin().unwrap();
        let filter = TypesArgs {
            risk_level: Some(3),
            hipaa: Some(HipaaCategory::Phi),
            ..args()
        };
        let level = Some(RiskLevel::Identifiable);
        let matched: Vec<_> = table
            .rows()
            .iter()
            .filter(|row| filter.matches(row, level))
            .collect();
        assert!(!matched.is_empty());
        assert!(matched
            .iter()
            .all(|row| row.risk_level == RiskLevel::Identifiable
                && row.hipaa_category == HipaaCategory::Phi));
    }

    #[test]
    fn test_no_filter_matches_everything() {
        let table = MappingTable::builtin().unwrap();
        let unfiltered = args();
        assert!(table.rows().iter().all(|row| unfiltered.matches(row, None)));
    }

    #[tokio::test]
    async fn test_execute_lists_types() {
        let filter = TypesArgs {
            cluster: Some(ClusterMembershipType::ContactInformation),
            ..args()
        };
        assert_eq!(filter.execute(&RiskConfig::default()).await.unwrap(), 0);
    }
}
