//! Contact resource in the directory API's JSON shape
//!
//! Sub-collections are plain ordered vectors; empty ones are never serialized,
//! so a submitted request body carries no empty arrays.

use serde::{Deserialize, Serialize};

/// One entry of the `names` collection
///
/// Either a given/family pair (both always set, possibly empty) or a
/// display name on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Name {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Name {
    pub fn personal(given: &str, family: &str) -> Self {
        Self {
            given_name: Some(given.to_string()),
            family_name: Some(family.to_string()),
            display_name: None,
        }
    }

    pub fn display(display: &str) -> Self {
        Self {
            display_name: Some(display.to_string()),
            ..Default::default()
        }
    }

    /// True when every name part is absent or whitespace-only
    pub fn is_blank(&self) -> bool {
        [&self.given_name, &self.family_name, &self.display_name]
            .into_iter()
            .all(|part| part.as_deref().map_or(true, |s| s.trim().is_empty()))
    }
}

/// Email address type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailType {
    Work,
    Home,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress {
    pub value: String,
    #[serde(rename = "type")]
    pub kind: EmailType,
}

/// Phone number type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhoneType {
    Work,
    Mobile,
    Home,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber {
    pub value: String,
    #[serde(rename = "type")]
    pub kind: PhoneType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub name: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Content type of a biography entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentType {
    TextPlain,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Biography {
    pub value: String,
    pub content_type: ContentType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Url {
    pub value: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A postal address; only populated parts are serialized
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Address {
    /// True when no location part is set (the type tag does not count)
    pub fn is_empty(&self) -> bool {
        self.street_address.is_none()
            && self.city.is_none()
            && self.region.is_none()
            && self.postal_code.is_none()
            && self.country.is_none()
    }
}

/// The request body used to create one directory contact
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResource {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<Name>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub email_addresses: Vec<EmailAddress>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phone_numbers: Vec<PhoneNumber>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub organizations: Vec<Organization>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub biographies: Vec<Biography>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<Url>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<Address>,
}

impl ContactResource {
    /// True when any collection other than `names` has entries
    pub fn has_non_name_data(&self) -> bool {
        !self.email_addresses.is_empty()
            || !self.phone_numbers.is_empty()
            || !self.organizations.is_empty()
            || !self.biographies.is_empty()
            || !self.urls.is_empty()
            || !self.addresses.is_empty()
    }

    /// Short human-readable label for progress output
    pub fn label(&self) -> String {
        let Some(name) = self.names.first() else {
            return "(unnamed)".to_string();
        };
        if let Some(display) = name.display_name.as_deref().filter(|s| !s.trim().is_empty()) {
            return display.to_string();
        }
        let full = format!(
            "{} {}",
            name.given_name.as_deref().unwrap_or_default(),
            name.family_name.as_deref().unwrap_or_default()
        );
        let full = full.trim();
        if full.is_empty() {
            "(unnamed)".to_string()
        } else {
            full.to_string()
        }
    }
}
