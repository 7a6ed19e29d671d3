//! Contacts module - mapping spreadsheet rows to directory contact resources

pub mod builder;
pub mod dictionary;
pub mod field;
pub mod resource;

pub use builder::{build_contact, ContactDraft, InsufficientData};
pub use dictionary::{is_blank, FieldDictionary};
pub use field::{normalize_header, ContactField, FieldMappingTable, HeaderLookup};
pub use resource::ContactResource;
