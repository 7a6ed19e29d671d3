//! Build and validate a contact resource from a field dictionary
//!
//! Construction happens in two stages. [`ContactDraft`] accumulates the
//! sub-collections in a fixed order, and [`ContactDraft::finalize`] runs the
//! name-presence and name-substance checks. A resource is only returned once
//! it has passed both.

use std::collections::HashSet;
use thiserror::Error;

use super::dictionary::{is_blank, FieldDictionary};
use super::field::ContactField;
use super::resource::{
    Address, Biography, ContactResource, ContentType, EmailAddress, EmailType, Name, Organization,
    PhoneNumber, PhoneType, Url,
};

/// A row that cannot become a directory contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InsufficientData {
    #[error("given name, family name and company are all blank")]
    MissingNameAndCompany,

    #[error("no name could be derived for the contact")]
    NoName,

    #[error("name is blank and no other contact details are present")]
    BlankName,
}

/// Build a contact resource from one row's fields
pub fn build_contact(fields: &FieldDictionary) -> Result<ContactResource, InsufficientData> {
    if fields.is_blank(ContactField::GivenName)
        && fields.is_blank(ContactField::FamilyName)
        && fields.is_blank(ContactField::Company)
    {
        return Err(InsufficientData::MissingNameAndCompany);
    }

    let mut draft = ContactDraft::default();
    draft
        .add_personal_name(fields)
        .add_emails(fields)
        .add_phones(fields)
        .add_organization(fields)
        .add_fallback_name(fields)
        .add_note(fields)
        .add_website(fields)
        .add_work_address(fields);
    draft.finalize()
}

/// Sub-collections accumulated while reading a row
#[derive(Debug, Default)]
pub struct ContactDraft {
    resource: ContactResource,
    seen_emails: HashSet<String>,
}

impl ContactDraft {
    fn add_personal_name(&mut self, fields: &FieldDictionary) -> &mut Self {
        if !fields.is_blank(ContactField::GivenName) || !fields.is_blank(ContactField::FamilyName) {
            self.resource.names.push(Name::personal(
                fields.get(ContactField::GivenName),
                fields.get(ContactField::FamilyName),
            ));
        }
        self
    }

    /// The first occurrence of an address wins, compared case-insensitively
    fn add_emails(&mut self, fields: &FieldDictionary) -> &mut Self {
        let candidates = [
            (ContactField::EmailWork, EmailType::Work),
            (ContactField::EmailPersonal, EmailType::Home),
            (ContactField::EmailOther, EmailType::Other),
        ];
        for (field, kind) in candidates {
            let value = fields.get(field);
            if is_blank(value) {
                continue;
            }
            if self.seen_emails.insert(value.to_lowercase()) {
                self.resource.email_addresses.push(EmailAddress {
                    value: value.to_string(),
                    kind,
                });
            }
        }
        self
    }

    fn add_phones(&mut self, fields: &FieldDictionary) -> &mut Self {
        let candidates = [
            (ContactField::PhoneWork, PhoneType::Work),
            (ContactField::PhoneMobile, PhoneType::Mobile),
            (ContactField::PhoneHome, PhoneType::Home),
        ];
        for (field, kind) in candidates {
            let value = fields.get(field);
            if !is_blank(value) {
                self.resource.phone_numbers.push(PhoneNumber {
                    value: value.to_string(),
                    kind,
                });
            }
        }
        self
    }

    fn add_organization(&mut self, fields: &FieldDictionary) -> &mut Self {
        if !fields.is_blank(ContactField::Company) || !fields.is_blank(ContactField::JobTitle) {
            self.resource.organizations.push(Organization {
                name: fields.get(ContactField::Company).to_string(),
                title: fields.get(ContactField::JobTitle).to_string(),
                kind: "work".to_string(),
            });
        }
        self
    }

    /// Company stands in as the display name when no personal name exists
    fn add_fallback_name(&mut self, fields: &FieldDictionary) -> &mut Self {
        if self.resource.names.is_empty() && !fields.is_blank(ContactField::Company) {
            self.resource
                .names
                .push(Name::display(fields.get(ContactField::Company)));
        }
        self
    }

    fn add_note(&mut self, fields: &FieldDictionary) -> &mut Self {
        if !fields.is_blank(ContactField::Notes) {
            self.resource.biographies.push(Biography {
                value: fields.get(ContactField::Notes).to_string(),
                content_type: ContentType::TextPlain,
            });
        }
        self
    }

    fn add_website(&mut self, fields: &FieldDictionary) -> &mut Self {
        if !fields.is_blank(ContactField::Website) {
            self.resource.urls.push(Url {
                value: fields.get(ContactField::Website).to_string(),
                kind: "website".to_string(),
            });
        }
        self
    }

    fn add_work_address(&mut self, fields: &FieldDictionary) -> &mut Self {
        let part = |field: ContactField| {
            let value = fields.get(field);
            (!is_blank(value)).then(|| value.to_string())
        };
        let mut address = Address {
            street_address: part(ContactField::AddressStreetWork),
            city: part(ContactField::AddressCityWork),
            region: part(ContactField::AddressRegionWork),
            postal_code: part(ContactField::AddressPostalCodeWork),
            country: part(ContactField::AddressCountryWork),
            kind: None,
        };
        if !address.is_empty() {
            address.kind = Some("work".to_string());
            self.resource.addresses.push(address);
        }
        self
    }

    /// Validate the accumulated resource
    ///
    /// Empty collections are dropped at serialization time, so only the
    /// name checks remain.
    pub fn finalize(self) -> Result<ContactResource, InsufficientData> {
        let resource = self.resource;
        if resource.names.is_empty() {
            return Err(InsufficientData::NoName);
        }
        // A blank name is tolerated when other details carry the record.
        if resource.names.iter().all(Name::is_blank) && !resource.has_non_name_data() {
            return Err(InsufficientData::BlankName);
        }
        Ok(resource)
    }
}
