//! Logical contact fields and the header mapping table
//!
//! Every spreadsheet column the importer understands is identified by a
//! [`ContactField`]. The [`FieldMappingTable`] pairs each field with the
//! human-readable column header expected in the sheet, and is reversed into a
//! [`HeaderLookup`] for matching actual headers case- and whitespace-insensitively.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A logical field identifier, independent of the sheet's column header text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactField {
    GivenName,
    FamilyName,
    Company,
    JobTitle,
    EmailWork,
    EmailPersonal,
    EmailOther,
    PhoneWork,
    PhoneMobile,
    PhoneHome,
    Notes,
    Website,
    AddressStreetWork,
    AddressCityWork,
    AddressRegionWork,
    AddressPostalCodeWork,
    AddressCountryWork,
}

impl ContactField {
    /// All fields in declaration order
    pub const ALL: [ContactField; 17] = [
        ContactField::GivenName,
        ContactField::FamilyName,
        ContactField::Company,
        ContactField::JobTitle,
        ContactField::EmailWork,
        ContactField::EmailPersonal,
        ContactField::EmailOther,
        ContactField::PhoneWork,
        ContactField::PhoneMobile,
        ContactField::PhoneHome,
        ContactField::Notes,
        ContactField::Website,
        ContactField::AddressStreetWork,
        ContactField::AddressCityWork,
        ContactField::AddressRegionWork,
        ContactField::AddressPostalCodeWork,
        ContactField::AddressCountryWork,
    ];

    /// The camelCase identifier used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactField::GivenName => "givenName",
            ContactField::FamilyName => "familyName",
            ContactField::Company => "company",
            ContactField::JobTitle => "jobTitle",
            ContactField::EmailWork => "emailWork",
            ContactField::EmailPersonal => "emailPersonal",
            ContactField::EmailOther => "emailOther",
            ContactField::PhoneWork => "phoneWork",
            ContactField::PhoneMobile => "phoneMobile",
            ContactField::PhoneHome => "phoneHome",
            ContactField::Notes => "notes",
            ContactField::Website => "website",
            ContactField::AddressStreetWork => "addressStreetWork",
            ContactField::AddressCityWork => "addressCityWork",
            ContactField::AddressRegionWork => "addressRegionWork",
            ContactField::AddressPostalCodeWork => "addressPostalCodeWork",
            ContactField::AddressCountryWork => "addressCountryWork",
        }
    }

    /// Column header used when no override is configured
    pub fn default_header(&self) -> &'static str {
        match self {
            ContactField::GivenName => "Given Name",
            ContactField::FamilyName => "Family Name",
            ContactField::Company => "Company",
            ContactField::JobTitle => "Job Title",
            ContactField::EmailWork => "Work Email",
            ContactField::EmailPersonal => "Personal Email",
            ContactField::EmailOther => "Other Email",
            ContactField::PhoneWork => "Work Phone",
            ContactField::PhoneMobile => "Mobile Phone",
            ContactField::PhoneHome => "Home Phone",
            ContactField::Notes => "Notes",
            ContactField::Website => "Website",
            ContactField::AddressStreetWork => "Work Street",
            ContactField::AddressCityWork => "Work City",
            ContactField::AddressRegionWork => "Work Region",
            ContactField::AddressPostalCodeWork => "Work Postal Code",
            ContactField::AddressCountryWork => "Work Country",
        }
    }
}

impl std::fmt::Display for ContactField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ContactField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ContactField::ALL
            .iter()
            .copied()
            .find(|field| field.as_str().to_lowercase() == wanted)
            .ok_or_else(|| {
                format!(
                    "Unknown contact field: '{}'. Valid fields: {}",
                    s,
                    ContactField::ALL
                        .iter()
                        .map(|f| f.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}

/// Normalize a header cell for matching: trimmed and lower-cased
pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Static pairing of logical fields with sheet column headers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMappingTable {
    headers: BTreeMap<ContactField, String>,
}

impl Default for FieldMappingTable {
    fn default() -> Self {
        Self {
            headers: ContactField::ALL
                .iter()
                .map(|f| (*f, f.default_header().to_string()))
                .collect(),
        }
    }
}

impl FieldMappingTable {
    /// Default table with the given per-field header overrides applied
    pub fn with_overrides(overrides: &BTreeMap<ContactField, String>) -> Self {
        let mut table = Self::default();
        for (field, header) in overrides {
            table.headers.insert(*field, header.clone());
        }
        table
    }

    /// Header text configured for a field
    pub fn header(&self, field: ContactField) -> &str {
        self.headers
            .get(&field)
            .map(String::as_str)
            .unwrap_or_else(|| field.default_header())
    }

    /// Iterate (field, header) pairs in field declaration order
    pub fn iter(&self) -> impl Iterator<Item = (ContactField, &str)> {
        self.headers.iter().map(|(f, h)| (*f, h.as_str()))
    }

    /// Build the reverse header -> field lookup
    ///
    /// If two fields share a normalized header, the later field wins.
    pub fn lookup(&self) -> HeaderLookup {
        HeaderLookup {
            by_header: self
                .iter()
                .map(|(field, header)| (normalize_header(header), field))
                .collect(),
        }
    }
}

/// Reverse lookup from normalized header text to logical field
#[derive(Debug, Clone, Default)]
pub struct HeaderLookup {
    by_header: HashMap<String, ContactField>,
}

impl HeaderLookup {
    /// Resolve a raw or normalized header to its field, if mapped
    pub fn resolve(&self, header: &str) -> Option<ContactField> {
        self.by_header.get(&normalize_header(header)).copied()
    }
}
