//! Vendor detection taxonomies
//!
//! Each vendor enumeration is closed. A variant's symbol equals the canonical symbol
//! where an exact equivalent exists, and its wire value is the literal string the
//! vendor returns in detection responses.

use crate::domain::errors::RiskError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// External detection provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Microsoft Presidio analyzer
    Presidio,
    /// Azure AI Language PII detection
    Azure,
    /// AWS Comprehend PII detection
    Aws,
}

impl Provider {
    pub const ALL: &'static [Provider] = &[Provider::Presidio, Provider::Azure, Provider::Aws];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Presidio => "presidio",
            Provider::Azure => "azure",
            Provider::Aws => "aws",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "presidio" | "msft_presidio" => Ok(Provider::Presidio),
            "azure" => Ok(Provider::Azure),
            "aws" | "comprehend" | "aws_comprehend" => Ok(Provider::Aws),
            other => Err(RiskError::Validation(format!(
                "Unknown provider '{other}'. Must be one of: presidio, azure, aws"
            ))),
        }
    }
}

provider_enum! {
    /// Presidio analyzer entity types
    ///
    /// `Date` and `DateTime` share the `DATE_TIME` wire value; they exist as
    /// separate variants so each canonical date row owns a distinct reference.
    pub enum PresidioEntityType {
        PhoneNumber => ("PHONE_NUMBER", "PHONE_NUMBER"),
        EmailAddress => ("EMAIL_ADDRESS", "EMAIL_ADDRESS"),
        AbaRoutingNumber => ("ABA_ROUTING_NUMBER", "ABA_ROUTING_NUMBER"),
        IpAddress => ("IP_ADDRESS", "IP_ADDRESS"),
        Date => ("DATE", "DATE_TIME"),
        DateTime => ("DATE_TIME", "DATE_TIME"),
        Address => ("ADDRESS", "ADDRESS"),
        Age => ("AGE", "AGE"),
        Person => ("PERSON", "PERSON"),
        Crypto => ("CRYPTO", "CRYPTO"),
        Url => ("URL", "URL"),
        Location => ("LOCATION", "LOCATION"),
        MedicalLicense => ("MEDICAL_LICENSE", "MEDICAL_LICENSE"),
        Nrp => ("NRP", "NRP"),
        CreditCardNumber => ("CREDIT_CARD_NUMBER", "CREDIT_CARD"),
        UsSocialSecurityNumber => ("US_SOCIAL_SECURITY_NUMBER", "US_SSN"),
        UsBankAccountNumber => ("US_BANK_ACCOUNT_NUMBER", "US_BANK_NUMBER"),
        UsDriversLicenseNumber => ("US_DRIVERS_LICENSE_NUMBER", "US_DRIVER_LICENSE"),
        UsPassportNumber => ("US_PASSPORT_NUMBER", "US_PASSPORT"),
        UsIndividualTaxpayerIdentification => ("US_INDIVIDUAL_TAXPAYER_IDENTIFICATION", "US_ITIN"),
        InternationalBankingAccountNumber => ("INTERNATIONAL_BANKING_ACCOUNT_NUMBER", "IBAN_CODE"),
        UkNationalHealthNumber => ("UK_NATIONAL_HEALTH_NUMBER", "UK_NHS"),
        AuBusinessNumber => ("AU_BUSINESS_NUMBER", "AU_ABN"),
        AuCompanyNumber => ("AU_COMPANY_NUMBER", "AU_ACN"),
        AuMedicalAccountNumber => ("AU_MEDICAL_ACCOUNT_NUMBER", "AU_MEDICARE"),
        AuTaxFileNumber => ("AU_TAX_FILE_NUMBER", "AU_TFN"),
        EsTaxIdentificationNumber => ("ES_TAX_IDENTIFICATION_NUMBER", "ES_NIF"),
        SgNationalRegistrationIdentityCardNumber => ("SG_NATIONAL_REGISTRATION_IDENTITY_CARD_NUMBER", "SG_NRIC_FIN"),
    }
}

provider_enum! {
    /// Azure AI Language PII categories
    pub enum AzureEntityType {
        PhoneNumber => ("PHONE_NUMBER", "PhoneNumber"),
        EmailAddress => ("EMAIL_ADDRESS", "Email"),
        AbaRoutingNumber => ("ABA_ROUTING_NUMBER", "ABARoutingNumber"),
        IpAddress => ("IP_ADDRESS", "IPAddress"),
        Date => ("DATE", "Date"),
        DateTime => ("DATE_TIME", "DateTime"),
        Address => ("ADDRESS", "Address"),
        Age => ("AGE", "Age"),
        Person => ("PERSON", "Person"),
        CreditCardNumber => ("CREDIT_CARD_NUMBER", "CreditCardNumber"),
        Url => ("URL", "URL"),
        UsDriversLicenseNumber => ("US_DRIVERS_LICENSE_NUMBER", "USDriversLicenseNumber"),
        UsSocialSecurityNumber => ("US_SOCIAL_SECURITY_NUMBER", "USSocialSecurityNumber"),
        UsBankAccountNumber => ("US_BANK_ACCOUNT_NUMBER", "USBankAccountNumber"),
        /// Combined US/UK passport; converges on the canonical US passport type
        UsukPassportNumber => ("USUK_PASSPORT_NUMBER", "USUKPassportNumber"),
        UsIndividualTaxpayerIdentification => ("US_INDIVIDUAL_TAXPAYER_IDENTIFICATION", "USIndividualTaxpayerIdentification"),
        InternationalBankingAccountNumber => ("INTERNATIONAL_BANKING_ACCOUNT_NUMBER", "InternationalBankingAccountNumber"),
        AuBusinessNumber => ("AU_BUSINESS_NUMBER", "AUBusinessNumber"),
        AuCompanyNumber => ("AU_COMPANY_NUMBER", "AUCompanyNumber"),
        AuMedicalAccountNumber => ("AU_MEDICAL_ACCOUNT_NUMBER", "AUMedicalAccountNumber"),
        AuTaxFileNumber => ("AU_TAX_FILE_NUMBER", "AUTaxFileNumber"),
        SwiftCode => ("SWIFT_CODE", "SWIFTCode"),
        Organization => ("ORGANIZATION", "Organization"),
        PersonType => ("PERSON_TYPE", "PersonType"),
        UkNationalHealthNumber => ("UK_NATIONAL_HEALTH_NUMBER", "UKNationalHealthNumber"),
    }
}

provider_enum! {
    /// AWS Comprehend PII entity types
    pub enum AwsEntityType {
        EmailAddress => ("EMAIL_ADDRESS", "EMAIL"),
        Address => ("ADDRESS", "ADDRESS"),
        Person => ("PERSON", "NAME"),
        PhoneNumber => ("PHONE_NUMBER", "PHONE"),
        Date => ("DATE", "DATE_TIME"),
        Url => ("URL", "URL"),
        Age => ("AGE", "AGE"),
        Username => ("USERNAME", "USERNAME"),
        Password => ("PASSWORD", "PASSWORD"),
        CreditDebitNumber => ("CREDIT_DEBIT_NUMBER", "CREDIT_DEBIT_NUMBER"),
        CreditDebitCvv => ("CREDIT_DEBIT_CVV", "CREDIT_DEBIT_CVV"),
        CreditDebitExpiry => ("CREDIT_DEBIT_EXPIRY", "CREDIT_DEBIT_EXPIRY"),
        Pin => ("PIN", "PIN"),
        UsDriversLicenseNumber => ("US_DRIVERS_LICENSE_NUMBER", "DRIVER_ID"),
        LicensePlateNumber => ("LICENSE_PLATE_NUMBER", "LICENSE_PLATE"),
        VehicleIdentificationNumber => ("VEHICLE_IDENTIFICATION_NUMBER", "VEHICLE_IDENTIFICATION_NUMBER"),
        InternationalBankingAccountNumber => ("INTERNATIONAL_BANKING_ACCOUNT_NUMBER", "INTERNATIONAL_BANK_ACCOUNT_NUMBER"),
        SwiftCode => ("SWIFT_CODE", "SWIFT_CODE"),
        Crypto => ("CRYPTO", "CRYPTO_WALLET_ADDRESS"),
        IpAddress => ("IP_ADDRESS", "IP_ADDRESS"),
        Ipv6Address => ("IPV6_ADDRESS", "IPV6_ADDRESS"),
        MacAddress => ("MAC_ADDRESS", "MAC_ADDRESS"),
        AwsAccessKey => ("AWS_ACCESS_KEY", "AWS_ACCESS_KEY"),
        AwsSecretKey => ("AWS_SECRET_KEY", "AWS_SECRET_KEY"),
        UsPassportNumber => ("US_PASSPORT_NUMBER", "PASSPORT_NUMBER"),
        UsSocialSecurityNumber => ("US_SOCIAL_SECURITY_NUMBER", "SSN"),
        UsBankAccountNumber => ("US_BANK_ACCOUNT_NUMBER", "BANK_ACCOUNT_NUMBER"),
        AbaRoutingNumber => ("ABA_ROUTING_NUMBER", "BANK_ROUTING"),
        UsIndividualTaxpayerIdentification => ("US_INDIVIDUAL_TAXPAYER_IDENTIFICATION", "US_INDIVIDUAL_TAXPAYER_IDENTIFICATION"),
        UkNationalHealthServiceNumber => ("UK_NATIONAL_HEALTH_SERVICE_NUMBER", "UK_NATIONAL_HEALTH_SERVICE_NUMBER"),
        UkUniqueTaxpayerReferenceNumber => ("UK_UNIQUE_TAXPAYER_REFERENCE_NUMBER", "UK_UNIQUE_TAXPAYER_REFERENCE_NUMBER"),
        UkNationalInsuranceNumber => ("UK_NATIONAL_INSURANCE_NUMBER", "UK_NATIONAL_INSURANCE_NUMBER"),
        CaHealthNumber => ("CA_HEALTH_NUMBER", "CA_HEALTH_NUMBER"),
        CaSocialInsuranceNumber => ("CA_SOCIAL_INSURANCE_NUMBER", "CA_SOCIAL_INSURANCE_NUMBER"),
        InAadhaar => ("IN_AADHAAR", "IN_AADHAAR"),
        InVoterNumber => ("IN_VOTER_NUMBER", "IN_VOTER_NUMBER"),
        InPermanentAccountNumber => ("IN_PERMANENT_ACCOUNT_NUMBER", "IN_PERMANENT_ACCOUNT_NUMBER"),
        InNrega => ("IN_NREGA", "IN_NREGA"),
        All => ("ALL", "ALL"),
    }
}

/// A provider-specific entity type, tagged with its provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "provider", content = "entity_type", rename_all = "lowercase")]
pub enum ProviderEntity {
    Presidio(PresidioEntityType),
    Azure(AzureEntityType),
    Aws(AwsEntityType),
}

impl ProviderEntity {
    pub fn provider(&self) -> Provider {
        match self {
            ProviderEntity::Presidio(_) => Provider::Presidio,
            ProviderEntity::Azure(_) => Provider::Azure,
            ProviderEntity::Aws(_) => Provider::Aws,
        }
    }

    /// Cross-reference symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            ProviderEntity::Presidio(t) => t.symbol(),
            ProviderEntity::Azure(t) => t.symbol(),
            ProviderEntity::Aws(t) => t.symbol(),
        }
    }

    /// Literal string the provider emits
    pub fn wire_value(&self) -> &'static str {
        match self {
            ProviderEntity::Presidio(t) => t.wire_value(),
            ProviderEntity::Azure(t) => t.wire_value(),
            ProviderEntity::Aws(t) => t.wire_value(),
        }
    }

    /// Resolves a cross-reference symbol within one provider's taxonomy
    pub fn from_symbol(provider: Provider, symbol: &str) -> Option<Self> {
        match provider {
            Provider::Presidio => PresidioEntityType::from_symbol(symbol).map(Self::Presidio),
            Provider::Azure => AzureEntityType::from_symbol(symbol).map(Self::Azure),
            Provider::Aws => AwsEntityType::from_symbol(symbol).map(Self::Aws),
        }
    }

    /// Resolves a wire value within one provider's taxonomy
    pub fn from_wire(provider: Provider, wire: &str) -> Option<Self> {
        match provider {
            Provider::Presidio => PresidioEntityType::from_wire(wire).map(Self::Presidio),
            Provider::Azure => AzureEntityType::from_wire(wire).map(Self::Azure),
            Provider::Aws => AwsEntityType::from_wire(wire).map(Self::Aws),
        }
    }

    /// Every entity type a provider declares
    pub fn all_for(provider: Provider) -> Vec<ProviderEntity> {
        match provider {
            Provider::Presidio => PresidioEntityType::ALL
                .iter()
                .copied()
                .map(Self::Presidio)
                .collect(),
            Provider::Azure => AzureEntityType::ALL.iter().copied().map(Self::Azure).collect(),
            Provider::Aws => AwsEntityType::ALL.iter().copied().map(Self::Aws).collect(),
        }
    }
}

impl fmt::Display for ProviderEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.provider(), self.wire_value())
    }
}
