//! Canonical type mapping table
//!
//! The table binds every canonical type to its classification axes and to zero or
//! more provider cross-references. It is built once, validated fail-fast, and then
//! shared read-only as `Arc<MappingTable>`.

use crate::domain::errors::RiskError;
use crate::domain::result::Result;
use crate::domain::{
    AwsEntityType, AzureEntityType, ClusterMembershipType, DhsCategory, HipaaCategory,
    NistCategory, PiiType, PresidioEntityType, Provider, ProviderEntity, RiskLevel,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// Packaged mapping data
const BUILTIN_MAPPINGS: &str = include_str!("../../data/pii_type_mappings.toml");

/// One mapping row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiiMapping {
    pub pii_type: PiiType,
    /// Human description of the information category
    pub information_type: String,
    pub cluster_membership_type: ClusterMembershipType,
    pub nist_category: NistCategory,
    pub dhs_category: DhsCategory,
    pub hipaa_category: HipaaCategory,
    pub risk_level: RiskLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presidio: Option<PresidioEntityType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure: Option<AzureEntityType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws: Option<AwsEntityType>,
}

impl PiiMapping {
    /// The row's reference for `provider`, if the provider has an equivalent
    pub fn provider_ref(&self, provider: Provider) -> Option<ProviderEntity> {
        match provider {
            Provider::Presidio => self.presidio.map(ProviderEntity::Presidio),
            Provider::Azure => self.azure.map(ProviderEntity::Azure),
            Provider::Aws => self.aws.map(ProviderEntity::Aws),
        }
    }
}

/// Row shape as written in the TOML file
#[derive(Debug, Deserialize)]
struct RawMapping {
    pii_type: String,
    information_type: String,
    cluster_membership_type: String,
    nist_category: String,
    dhs_category: String,
    hipaa_category: String,
    risk_level: i64,
    presidio: Option<String>,
    azure: Option<String>,
    aws: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawMappingFile {
    #[serde(default)]
    mapping: Vec<RawMapping>,
}

#[derive(Serialize)]
struct MappingFile<'a> {
    mapping: &'a [PiiMapping],
}

impl RawMapping {
    fn into_mapping(self, position: usize) -> Result<PiiMapping> {
        let row = format!("row {} ({})", position + 1, self.pii_type);
        let invalid = |field: &str, value: &str| {
            RiskError::Configuration(format!("Invalid {field} '{value}' in mapping {row}"))
        };

        let pii_type = PiiType::from_symbol(&self.pii_type)
            .ok_or_else(|| invalid("pii_type", &self.pii_type))?;
        let cluster_membership_type = self
            .cluster_membership_type
            .parse::<ClusterMembershipType>()
            .map_err(|_| invalid("cluster_membership_type", &self.cluster_membership_type))?;
        let nist_category = self
            .nist_category
            .parse::<NistCategory>()
            .map_err(|_| invalid("nist_category", &self.nist_category))?;
        let dhs_category = self
            .dhs_category
            .parse::<DhsCategory>()
            .map_err(|_| invalid("dhs_category", &self.dhs_category))?;
        let hipaa_category = self
            .hipaa_category
            .parse::<HipaaCategory>()
            .map_err(|_| invalid("hipaa_category", &self.hipaa_category))?;
        let risk_level = u8::try_from(self.risk_level)
            .ok()
            .and_then(|level| RiskLevel::try_from(level).ok())
            .ok_or_else(|| invalid("risk_level", &self.risk_level.to_string()))?;

        let presidio = match self.presidio.as_deref() {
            Some(symbol) => Some(
                PresidioEntityType::from_symbol(symbol)
                    .ok_or_else(|| invalid("presidio reference", symbol))?,
            ),
            None => None,
        };
        let azure = match self.azure.as_deref() {
            Some(symbol) => Some(
                AzureEntityType::from_symbol(symbol)
                    .ok_or_else(|| invalid("azure reference", symbol))?,
            ),
            None => None,
        };
        let aws = match self.aws.as_deref() {
            Some(symbol) => Some(
                AwsEntityType::from_symbol(symbol)
                    .ok_or_else(|| invalid("aws reference", symbol))?,
            ),
            None => None,
        };

        Ok(PiiMapping {
            pii_type,
            information_type: self.information_type,
            cluster_membership_type,
            nist_category,
            dhs_category,
            hipaa_category,
            risk_level,
            presidio,
            azure,
            aws,
        })
    }
}

/// Immutable canonical mapping table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingTable {
    rows: Vec<PiiMapping>,
    index: HashMap<PiiType, usize>,
}

impl MappingTable {
    /// Builds the packaged table
    pub fn builtin() -> Result<Self> {
        Self::from_toml(BUILTIN_MAPPINGS)
    }

    /// Loads a table from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RiskError::Configuration(format!(
                "Failed to read mapping table {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml(&content)
    }

    /// Parses a table from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: RawMappingFile = toml::from_str(content)?;

        let rows = file
            .mapping
            .into_iter()
            .enumerate()
            .map(|(position, raw)| raw.into_mapping(position))
            .collect::<Result<Vec<_>>>()?;

        Self::from_rows(rows)
    }

    /// Builds a table from already-typed rows
    ///
    /// Rows keep their order. Duplicate canonical types and provider references
    /// shared by two rows are rejected.
    pub fn from_rows(rows: Vec<PiiMapping>) -> Result<Self> {
        let mut index = HashMap::with_capacity(rows.len());
        let mut owners: HashMap<ProviderEntity, PiiType> = HashMap::new();

        for (position, row) in rows.iter().enumerate() {
            if index.insert(row.pii_type, position).is_some() {
                return Err(RiskError::Configuration(format!(
                    "Duplicate mapping row for {}",
                    row.pii_type
                )));
            }

            for provider in Provider::ALL {
                if let Some(reference) = row.provider_ref(*provider) {
                    if let Some(owner) = owners.insert(reference, row.pii_type) {
                        return Err(RiskError::Configuration(format!(
                            "{} reference {} is claimed by both {} and {}",
                            provider,
                            reference.symbol(),
                            owner,
                            row.pii_type
                        )));
                    }
                }
            }
        }

        tracing::debug!(rows = rows.len(), "Mapping table built");

        Ok(Self { rows, index })
    }

    /// Exact-match lookup
    pub fn lookup(&self, pii_type: PiiType) -> Result<&PiiMapping> {
        self.get(pii_type)
            .ok_or_else(|| RiskError::UnknownPiiType(pii_type.to_string()))
    }

    /// Upper-cases `name`, parses it and looks it up
    pub fn lookup_name(&self, name: &str) -> Result<&PiiMapping> {
        let pii_type: PiiType = name.parse()?;
        self.lookup(pii_type)
    }

    pub fn get(&self, pii_type: PiiType) -> Option<&PiiMapping> {
        self.index.get(&pii_type).map(|&i| &self.rows[i])
    }

    /// Row holding `reference`, if any
    pub fn find_by_provider_ref(&self, reference: ProviderEntity) -> Option<&PiiMapping> {
        self.rows
            .iter()
            .find(|row| row.provider_ref(reference.provider()) == Some(reference))
    }

    pub fn all_types(&self) -> BTreeSet<PiiType> {
        self.rows.iter().map(|row| row.pii_type).collect()
    }

    pub fn types_by_risk_level(&self, level: RiskLevel) -> BTreeSet<PiiType> {
        self.filter_types(|row| row.risk_level == level)
    }

    pub fn types_by_hipaa_category(&self, category: HipaaCategory) -> BTreeSet<PiiType> {
        self.filter_types(|row| row.hipaa_category == category)
    }

    pub fn types_by_cluster(&self, cluster: ClusterMembershipType) -> BTreeSet<PiiType> {
        self.filter_types(|row| row.cluster_membership_type == cluster)
    }

    /// Rows in file order
    pub fn rows(&self) -> &[PiiMapping] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Renders the table back to the packaged TOML layout
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(&MappingFile {
            mapping: &self.rows,
        })
        .map_err(|e| RiskError::Serialization(e.to_string()))
    }

    fn filter_types(&self, predicate: impl Fn(&PiiMapping) -> bool) -> BTreeSet<PiiType> {
        self.rows
            .iter()
            .filter(|row| predicate(row))
            .map(|row| row.pii_type)
            .collect()
    }
}

impl Serialize for MappingTable {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        MappingFile {
            mapping: &self.rows,
        }
        .serialize(serializer)
    }
}
