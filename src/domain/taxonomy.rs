//! Canonical PII taxonomy and classification axes
//!
//! The canonical types follow the Milne et al. (2018) inventory plus the provider-driven
//! additions (`CRYPTO`, `NRP`, the AU identifiers, ...). Every axis value has a
//! symbol used on the wire and in the mapping table, and a human label used in
//! reports.

use crate::domain::errors::RiskError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

symbol_enum! {
    /// Canonical PII type
    ///
    /// The set is closed for a release. Names crossing into the risk assessor are
    /// always these upper-case symbols, never a provider's wire value.
    pub enum PiiType {
        PlaceOfBirth => "PLACE_OF_BIRTH",
        Race => "RACE",
        Height => "HEIGHT",
        Weight => "WEIGHT",
        MaritalStatus => "MARITAL_STATUS",
        CountryOfCitizenship => "COUNTRY_OF_CITIZENSHIP",
        ShoppingBehavior => "SHOPPING_BEHAVIOR",
        Zipcode => "ZIPCODE",
        NumberOfChildren => "NUMBER_OF_CHILDREN",
        JobTitle => "JOB_TITLE",
        Hometown => "HOMETOWN",
        IncomeLevel => "INCOME_LEVEL",
        Occupation => "OCCUPATION",
        Gender => "GENDER",
        /// Birth date
        Date => "DATE",
        ScreenName => "SCREEN_NAME",
        /// Nationality, religion, political affiliation
        Nrp => "NRP",
        SexualPreference => "SEXUAL_PREFERENCE",
        EmailAddress => "EMAIL_ADDRESS",
        VoicePrint => "VOICE_PRINT",
        IpAddress => "IP_ADDRESS",
        PhoneNumber => "PHONE_NUMBER",
        Address => "ADDRESS",
        WorkAddress => "WORK_ADDRESS",
        WorkContactInformation => "WORK_CONTACT_INFORMATION",
        WorkPhoneNumber => "WORK_PHONE_NUMBER",
        FamilyFriendContactInformation => "FAMILY_FRIEND_CONTACT_INFORMATION",
        SocialNetworkProfile => "SOCIAL_NETWORK_PROFILE",
        PictureFace => "PICTURE_FACE",
        MothersMaidenName => "MOTHERS_MAIDEN_NAME",
        HandwritingSample => "HANDWRITING_SAMPLE",
        UsDriversLicenseNumber => "US_DRIVERS_LICENSE_NUMBER",
        VehicleRegistrationNumber => "VEHICLE_REGISTRATION_NUMBER",
        LicensePlateNumber => "LICENSE_PLATE_NUMBER",
        CreditCardNumber => "CREDIT_CARD_NUMBER",
        CreditScore => "CREDIT_SCORE",
        AbaRoutingNumber => "ABA_ROUTING_NUMBER",
        InternationalBankingAccountNumber => "INTERNATIONAL_BANKING_ACCOUNT_NUMBER",
        UsBankAccountNumber => "US_BANK_ACCOUNT_NUMBER",
        DigitalSignature => "DIGITAL_SIGNATURE",
        MedicalHistory => "MEDICAL_HISTORY",
        DnaProfile => "DNA_PROFILE",
        Fingerprint => "FINGERPRINT",
        HomeAddress => "HOME_ADDRESS",
        UsSocialSecurityNumber => "US_SOCIAL_SECURITY_NUMBER",
        /// GPS location
        Location => "LOCATION",
        SecurityAccessCodes => "SECURITY_ACCESS_CODES",
        Password => "PASSWORD",
        HealthInsuranceId => "HEALTH_INSURANCE_ID",
        UsPassportNumber => "US_PASSPORT_NUMBER",
        Age => "AGE",
        Person => "PERSON",
        Crypto => "CRYPTO",
        Url => "URL",
        DateTime => "DATE_TIME",
        MedicalLicense => "MEDICAL_LICENSE",
        UsIndividualTaxpayerIdentification => "US_INDIVIDUAL_TAXPAYER_IDENTIFICATION",
        AuBusinessNumber => "AU_BUSINESS_NUMBER",
        AuCompanyNumber => "AU_COMPANY_NUMBER",
        AuMedicalAccountNumber => "AU_MEDICAL_ACCOUNT_NUMBER",
        AuTaxFileNumber => "AU_TAX_FILE_NUMBER",
        SwiftCode => "SWIFT_CODE",
    }
}

impl FromStr for PiiType {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_symbol(&s.to_uppercase())
            .ok_or_else(|| RiskError::UnknownPiiType(s.trim().to_string()))
    }
}

impl fmt::Display for PiiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifiability level on the Schwartz–Solove continuum
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum RiskLevel {
    /// Placeholder level when nothing was detected
    #[default]
    NonIdentifiable = 1,
    SemiIdentifiable = 2,
    Identifiable = 3,
}

impl RiskLevel {
    pub const ALL: &'static [RiskLevel] = &[
        RiskLevel::NonIdentifiable,
        RiskLevel::SemiIdentifiable,
        RiskLevel::Identifiable,
    ];

    /// Ordinal value (1, 2 or 3)
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Ordinal value as a score for aggregation
    pub fn score(&self) -> f64 {
        f64::from(self.value())
    }

    /// Fixed 1:1 definition for this level
    pub fn definition(&self) -> RiskLevelDefinition {
        match self {
            RiskLevel::NonIdentifiable => RiskLevelDefinition::NonIdentifiable,
            RiskLevel::SemiIdentifiable => RiskLevelDefinition::SemiIdentifiable,
            RiskLevel::Identifiable => RiskLevelDefinition::Identifiable,
        }
    }
}

impl TryFrom<u8> for RiskLevel {
    type Error = RiskError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(RiskLevel::NonIdentifiable),
            2 => Ok(RiskLevel::SemiIdentifiable),
            3 => Ok(RiskLevel::Identifiable),
            other => Err(RiskError::Validation(format!(
                "Invalid risk level {other}. Must be one of: 1, 2, 3"
            ))),
        }
    }
}

impl From<RiskLevel> for u8 {
    fn from(level: RiskLevel) -> Self {
        level.value()
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Human-readable definition of a [`RiskLevel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RiskLevelDefinition {
    #[default]
    #[serde(rename = "Non-Identifiable")]
    NonIdentifiable,
    #[serde(rename = "Semi-Identifiable")]
    SemiIdentifiable,
    #[serde(rename = "Identifiable")]
    Identifiable,
}

impl RiskLevelDefinition {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevelDefinition::NonIdentifiable => "Non-Identifiable",
            RiskLevelDefinition::SemiIdentifiable => "Semi-Identifiable",
            RiskLevelDefinition::Identifiable => "Identifiable",
        }
    }
}

impl fmt::Display for RiskLevelDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

symbol_enum! {
    /// Thematic grouping for reports; not used in scoring
    pub enum ClusterMembershipType {
        BasicDemographics => "BASIC_DEMOGRAPHICS",
        PersonalPreferences => "PERSONAL_PREFERENCES",
        ContactInformation => "CONTACT_INFORMATION",
        CommunityInteraction => "COMMUNITY_INTERACTION",
        FinancialInformation => "FINANCIAL_INFORMATION",
        SecureIdentifiers => "SECURE_IDENTIFIERS",
    }
}

impl ClusterMembershipType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::BasicDemographics => "Basic Demographics",
            Self::PersonalPreferences => "Personal Preferences",
            Self::ContactInformation => "Contact Information",
            Self::CommunityInteraction => "Community Interaction",
            Self::FinancialInformation => "Financial Information",
            Self::SecureIdentifiers => "Secure Identifiers",
        }
    }
}

symbol_enum! {
    /// NIST SP 800-122 classification
    pub enum NistCategory {
        Linkable => "LINKABLE",
        DirectlyPii => "DIRECTLY_PII",
    }
}

impl NistCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Linkable => "Linkable",
            Self::DirectlyPii => "Directly PII",
        }
    }
}

symbol_enum! {
    /// DHS handbook classification
    pub enum DhsCategory {
        NotMentioned => "NOT_MENTIONED",
        Linkable => "LINKABLE",
        StandAlonePii => "STAND_ALONE_PII",
    }
}

impl DhsCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotMentioned => "Not Mentioned",
            Self::Linkable => "Linkable",
            Self::StandAlonePii => "Stand Alone PII",
        }
    }
}

symbol_enum! {
    /// HIPAA protected health information status
    pub enum HipaaCategory {
        Phi => "PHI",
        NonPhi => "NON_PHI",
    }
}

impl HipaaCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Phi => "Protected Health Information",
            Self::NonPhi => "Not Protected Health Information",
        }
    }
}

// Display prints the label; FromStr accepts the symbol or the label.
macro_rules! labelled_axis {
    ($($name:ident => $what:literal),+ $(,)?) => {
        $(
            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }

            impl FromStr for $name {
                type Err = RiskError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    let trimmed = s.trim();
                    Self::from_symbol(trimmed)
                        .or_else(|| {
                            Self::ALL
                                .iter()
                                .copied()
                                .find(|v| v.label().eq_ignore_ascii_case(trimmed))
                        })
                        .ok_or_else(|| {
                            RiskError::Validation(format!("Unknown {}: {}", $what, trimmed))
                        })
                }
            }
        )+
    };
}

labelled_axis! {
    ClusterMembershipType => "cluster membership type",
    NistCategory => "NIST category",
    DhsCategory => "DHS category",
    HipaaCategory => "HIPAA category",
}

/// Social-platform metadata presence flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataType {
    Location,
    Url,
    ScreenName,
    /// Display name
    Name,
    UserId,
}

impl MetadataType {
    pub const ALL: &'static [MetadataType] = &[
        MetadataType::Location,
        MetadataType::Url,
        MetadataType::ScreenName,
        MetadataType::Name,
        MetadataType::UserId,
    ];

    /// Lower-case key used in metadata maps
    pub fn key(&self) -> &'static str {
        match self {
            MetadataType::Location => "location",
            MetadataType::Url => "url",
            MetadataType::ScreenName => "screen_name",
            MetadataType::Name => "name",
            MetadataType::UserId => "user_id",
        }
    }

    /// Case-insensitive key match
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_lowercase();
        Self::ALL.iter().copied().find(|m| m.key() == key)
    }
}

impl fmt::Display for MetadataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
