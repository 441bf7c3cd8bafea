//! Bidirectional translation between canonical and provider entity types
//!
//! Conversions that fail because a provider has no equivalent concept return
//! [`RiskError::UnsupportedConversion`]. Callers doing best-effort reconciliation
//! skip those items and continue.

use crate::core::mapping::MappingTable;
use crate::domain::errors::RiskError;
use crate::domain::result::Result;
use crate::domain::{MetadataType, PiiType, Provider, ProviderEntity};
use std::sync::Arc;

/// Literal wire spellings resolved before any automatic matching.
///
/// Covers SSN/bank/ITIN spellings that differ from the symbol-derived names, the
/// date values that both canonical date rows could claim, and the two passport
/// spellings that converge on `US_PASSPORT_NUMBER`.
const WIRE_OVERRIDES: &[(Provider, &str, PiiType)] = &[
    (Provider::Presidio, "US_SSN", PiiType::UsSocialSecurityNumber),
    (Provider::Presidio, "US_BANK_NUMBER", PiiType::UsBankAccountNumber),
    (Provider::Presidio, "US_PASSPORT", PiiType::UsPassportNumber),
    (Provider::Presidio, "DATE_TIME", PiiType::Date),
    (Provider::Aws, "SSN", PiiType::UsSocialSecurityNumber),
    (Provider::Aws, "BANK_ACCOUNT_NUMBER", PiiType::UsBankAccountNumber),
    (
        Provider::Aws,
        "US_INDIVIDUAL_TAX_IDENTIFICATION_NUMBER",
        PiiType::UsIndividualTaxpayerIdentification,
    ),
    (Provider::Aws, "DATE_TIME", PiiType::Date),
    (Provider::Azure, "DateTime", PiiType::Date),
    (Provider::Azure, "USUKPassportNumber", PiiType::UsPassportNumber),
];

/// Canonical type for a metadata presence flag
pub fn metadata_type_to_canonical(metadata: MetadataType) -> PiiType {
    match metadata {
        MetadataType::Location => PiiType::Location,
        MetadataType::Url => PiiType::Url,
        MetadataType::ScreenName => PiiType::ScreenName,
        MetadataType::Name => PiiType::Person,
        // Account correlation risk is scored even without text content
        MetadataType::UserId => PiiType::SocialNetworkProfile,
    }
}

/// Reconciliation service over a shared mapping table
#[derive(Debug, Clone)]
pub struct TypeReconciler {
    table: Arc<MappingTable>,
}

impl TypeReconciler {
    pub fn new(table: Arc<MappingTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &MappingTable {
        &self.table
    }

    /// Provider entity type for a canonical type
    ///
    /// Fails with `UnknownPiiType` when the table has no row, and with
    /// `UnsupportedConversion` when the row has no reference for `provider`.
    pub fn canonical_to_provider(
        &self,
        pii_type: PiiType,
        provider: Provider,
    ) -> Result<ProviderEntity> {
        self.table
            .lookup(pii_type)?
            .provider_ref(provider)
            .ok_or_else(|| RiskError::unsupported(pii_type.as_str(), provider.as_str()))
    }

    /// Canonical type owning a provider reference
    pub fn provider_to_canonical(&self, entity: ProviderEntity) -> Result<PiiType> {
        self.table
            .find_by_provider_ref(entity)
            .map(|row| row.pii_type)
            .ok_or_else(|| RiskError::unsupported(entity.to_string(), "canonical"))
    }

    /// Canonical type for a literal string emitted by `provider`
    ///
    /// Resolution order: the override table, the provider's wire values, the
    /// provider's symbols, then canonical symbols whose row references `provider`.
    pub fn wire_to_canonical(&self, provider: Provider, wire: &str) -> Result<PiiType> {
        let wire = wire.trim();

        if let Some(pii_type) = Self::override_for(provider, wire) {
            if self.table.get(pii_type).is_some() {
                return Ok(pii_type);
            }
        }

        if let Some(entity) = ProviderEntity::from_wire(provider, wire) {
            if let Ok(pii_type) = self.provider_to_canonical(entity) {
                return Ok(pii_type);
            }
        }

        let upper = wire.to_uppercase();
        if let Some(entity) = ProviderEntity::from_symbol(provider, &upper) {
            if let Ok(pii_type) = self.provider_to_canonical(entity) {
                return Ok(pii_type);
            }
        }

        if let Some(row) = PiiType::from_symbol(&upper).and_then(|t| self.table.get(t)) {
            if row.provider_ref(provider).is_some() {
                return Ok(row.pii_type);
            }
        }

        Err(RiskError::unsupported(
            format!("{provider}:{wire}"),
            "canonical",
        ))
    }

    /// Canonical type for a metadata key such as `screen_name`
    pub fn metadata_to_canonical(&self, key: &str) -> Result<PiiType> {
        MetadataType::from_key(key)
            .map(metadata_type_to_canonical)
            .ok_or_else(|| RiskError::unsupported(format!("metadata:{}", key.trim()), "canonical"))
    }

    fn override_for(provider: Provider, wire: &str) -> Option<PiiType> {
        WIRE_OVERRIDES
            .iter()
            .find(|(p, literal, _)| *p == provider && literal.eq_ignore_ascii_case(wire))
            .map(|(_, _, pii_type)| *pii_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AwsEntityType, AzureEntityType, PresidioEntityType};

    fn reconciler() -> TypeReconciler {
        TypeReconciler::new(Arc::new(MappingTable::builtin().unwrap()))
    }

    #[test]
    fn test_round_trip_where_reference_exists() {
        let reconciler = reconciler();
        for row in reconciler.table().rows() {
            for provider in Provider::ALL {
                match row.provider_ref(*provider) {
                    Some(_) => {
                        let entity = reconciler
                            .canonical_to_provider(row.pii_type, *provider)
                            .unwrap();
                        assert_eq!(
                            reconciler.provider_to_canonical(entity).unwrap(),
                            row.pii_type
                        );
                    }
                    None => {
                        let err = reconciler
                            .canonical_to_provider(row.pii_type, *provider)
                            .unwrap_err();
                        assert!(err.is_unsupported_conversion());
                    }
                }
            }
        }
    }

    #[test]
    fn test_canonical_to_azure_passport() {
        let entity = reconciler()
            .canonical_to_provider(PiiType::UsPassportNumber, Provider::Azure)
            .unwrap();
        assert_eq!(entity, ProviderEntity::Azure(AzureEntityType::UsukPassportNumber));
        assert_eq!(entity.symbol(), "USUK_PASSPORT_NUMBER");
    }

    #[test]
    fn test_passport_spellings_converge() {
        let reconciler = reconciler();
        let spellings = [
            (Provider::Presidio, "US_PASSPORT"),
            (Provider::Azure, "USUKPassportNumber"),
            (Provider::Aws, "PASSPORT_NUMBER"),
        ];
        for (provider, wire) in spellings {
            assert_eq!(
                reconciler.wire_to_canonical(provider, wire).unwrap(),
                PiiType::UsPassportNumber
            );
        }
    }

    #[test]
    fn test_wire_overrides() {
        let reconciler = reconciler();
        assert_eq!(
            reconciler.wire_to_canonical(Provider::Presidio, "US_SSN").unwrap(),
            PiiType::UsSocialSecurityNumber
        );
        assert_eq!(
            reconciler.wire_to_canonical(Provider::Aws, "SSN").unwrap(),
            PiiType::UsSocialSecurityNumber
        );
        assert_eq!(
            reconciler
                .wire_to_canonical(Provider::Presidio, "US_BANK_NUMBER")
                .unwrap(),
            PiiType::UsBankAccountNumber
        );
        assert_eq!(
            reconciler
                .wire_to_canonical(Provider::Aws, "US_INDIVIDUAL_TAX_IDENTIFICATION_NUMBER")
                .unwrap(),
            PiiType::UsIndividualTaxpayerIdentification
        );
        for (provider, wire) in [
            (Provider::Presidio, "DATE_TIME"),
            (Provider::Aws, "DATE_TIME"),
            (Provider::Azure, "DateTime"),
        ] {
            assert_eq!(
                reconciler.wire_to_canonical(provider, wire).unwrap(),
                PiiType::Date
            );
        }
    }

    #[test]
    fn test_wire_value_lookup() {
        let reconciler = reconciler();
        assert_eq!(
            reconciler.wire_to_canonical(Provider::Aws, "NAME").unwrap(),
            PiiType::Person
        );
        assert_eq!(
            reconciler.wire_to_canonical(Provider::Azure, "Email").unwrap(),
            PiiType::EmailAddress
        );
        assert_eq!(
            reconciler.wire_to_canonical(Provider::Presidio, "IBAN_CODE").unwrap(),
            PiiType::InternationalBankingAccountNumber
        );
        assert_eq!(
            reconciler.wire_to_canonical(Provider::Aws, "USERNAME").unwrap(),
            PiiType::ScreenName
        );
    }

    #[test]
    fn test_name_matching_fallback() {
        let reconciler = reconciler();
        // Provider symbol rather than wire value
        assert_eq!(
            reconciler
                .wire_to_canonical(Provider::Presidio, "credit_card_number")
                .unwrap(),
            PiiType::CreditCardNumber
        );
        // Canonical symbol whose row references the provider
        assert_eq!(
            reconciler
                .wire_to_canonical(Provider::Aws, "CREDIT_CARD_NUMBER")
                .unwrap(),
            PiiType::CreditCardNumber
        );
    }

    #[test]
    fn test_wire_without_equivalent() {
        let reconciler = reconciler();
        for (provider, wire) in [
            (Provider::Aws, "PIN"),
            (Provider::Aws, "RACE"),
            (Provider::Azure, "Organization"),
            (Provider::Presidio, "UK_NHS"),
            (Provider::Presidio, "SOMETHING_NEW"),
        ] {
            let err = reconciler.wire_to_canonical(provider, wire).unwrap_err();
            assert!(err.is_unsupported_conversion(), "{provider}:{wire}");
        }
    }

    #[test]
    fn test_provider_to_canonical_without_row() {
        let err = reconciler()
            .provider_to_canonical(ProviderEntity::Aws(AwsEntityType::MacAddress))
            .unwrap_err();
        assert!(err.is_unsupported_conversion());
    }

    #[test]
    fn test_distinct_date_references() {
        let reconciler = reconciler();
        assert_eq!(
            reconciler
                .provider_to_canonical(ProviderEntity::Presidio(PresidioEntityType::DateTime))
                .unwrap(),
            PiiType::DateTime
        );
        assert!(reconciler
            .canonical_to_provider(PiiType::DateTime, Provider::Aws)
            .unwrap_err()
            .is_unsupported_conversion());
    }

    #[test]
    fn test_metadata_mapping() {
        let reconciler = reconciler();
        assert_eq!(reconciler.metadata_to_canonical("name").unwrap(), PiiType::Person);
        assert_eq!(
            reconciler.metadata_to_canonical("USER_ID").unwrap(),
            PiiType::SocialNetworkProfile
        );
        assert_eq!(
            reconciler.metadata_to_canonical("screen_name").unwrap(),
            PiiType::ScreenName
        );
        assert_eq!(reconciler.metadata_to_canonical("location").unwrap(), PiiType::Location);
        assert_eq!(reconciler.metadata_to_canonical("url").unwrap(), PiiType::Url);
        assert!(reconciler
            .metadata_to_canonical("favorite_color")
            .unwrap_err()
            .is_unsupported_conversion());
    }

    #[test]
    fn test_unknown_row_in_fixture_table() {
        let table = MappingTable::from_rows(Vec::new()).unwrap();
        let reconciler = TypeReconciler::new(Arc::new(table));
        assert!(matches!(
            reconciler.canonical_to_provider(PiiType::EmailAddress, Provider::Aws),
            Err(RiskError::UnknownPiiType(_))
        ));
    }
}
