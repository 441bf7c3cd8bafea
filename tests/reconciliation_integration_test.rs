//! Integration tests for provider/canonical reconciliation

use pii_risk::core::{MappingTable, TypeReconciler};
use pii_risk::domain::{PiiType, Provider, ProviderEntity, RiskError};
use std::sync::Arc;

fn reconciler() -> TypeReconciler {
    TypeReconciler::new(Arc::new(MappingTable::builtin().unwrap()))
}

#[test]
fn test_round_trip_where_both_sides_exist() {
    let reconciler = reconciler();
    let mut checked = 0;
    for row in reconciler.table().rows() {
        for provider in Provider::ALL {
            if row.provider_ref(*provider).is_none() {
                continue;
            }
            let entity = reconciler
                .canonical_to_provider(row.pii_type, *provider)
                .unwrap();
            assert_eq!(entity.provider(), *provider);
            assert_eq!(
                reconciler.provider_to_canonical(entity).unwrap(),
                row.pii_type,
                "{provider}:{entity}"
            );
            checked += 1;
        }
    }
    assert!(checked > 0);
}

#[test]
fn test_missing_reference_is_unsupported() {
    let reconciler = reconciler();
    let mut checked = 0;
    for row in reconciler.table().rows() {
        for provider in Provider::ALL {
            if row.provider_ref(*provider).is_some() {
                continue;
            }
            let err = reconciler
                .canonical_to_provider(row.pii_type, *provider)
                .unwrap_err();
            assert!(err.is_unsupported_conversion(), "{} {provider}", row.pii_type);
            checked += 1;
        }
    }
    assert!(checked > 0);
}

#[test]
fn test_passport_spellings_reconcile_to_one_type() {
    let reconciler = reconciler();
    let presidio = reconciler
        .wire_to_canonical(Provider::Presidio, "US_PASSPORT")
        .unwrap();
    let azure = reconciler
        .wire_to_canonical(Provider::Azure, "USUKPassportNumber")
        .unwrap();
    let aws = reconciler
        .wire_to_canonical(Provider::Aws, "PASSPORT_NUMBER")
        .unwrap();

    assert_eq!(presidio, PiiType::UsPassportNumber);
    assert_eq!(azure, presidio);
    assert_eq!(aws, presidio);
}

#[test]
fn test_wire_values_resolve_through_entities() {
    let reconciler = reconciler();
    let entity = ProviderEntity::from_wire(Provider::Aws, "SSN").unwrap();
    assert_eq!(
        reconciler.provider_to_canonical(entity).unwrap(),
        PiiType::UsSocialSecurityNumber
    );
    assert_eq!(
        reconciler.wire_to_canonical(Provider::Azure, "Email").unwrap(),
        PiiType::EmailAddress
    );
}

#[test]
fn test_unknown_canonical_type_is_hard_failure() {
    let err = "NOT_A_TYPE".parse::<PiiType>().unwrap_err();
    assert!(matches!(err, RiskError::UnknownPiiType(_)));
    assert!(!err.is_unsupported_conversion());
}

#[test]
fn test_metadata_keys_reconcile() {
    let reconciler = reconciler();
    assert_eq!(
        reconciler.metadata_to_canonical("screen_name").unwrap(),
        PiiType::ScreenName
    );
    assert_eq!(
        reconciler.metadata_to_canonical("user_id").unwrap(),
        PiiType::SocialNetworkProfile
    );
    assert!(reconciler
        .metadata_to_canonical("shoe_size")
        .unwrap_err()
        .is_unsupported_conversion());
}
