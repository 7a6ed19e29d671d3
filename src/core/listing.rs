//! Directory listing - fetch one page of domain entries and summarize them

use serde::Serialize;

use crate::core::directory::{
    DirectoryClient, DirectoryError, DirectoryPerson, DirectorySource, ListRequest, ListedValue,
};

/// Maximum entries fetched per listing
pub const PAGE_SIZE: u32 = 50;

/// Person fields requested from the directory
pub const READ_MASK: [&str; 4] = ["names", "emailAddresses", "phoneNumbers", "biographies"];

/// Directory sources included in the listing
pub const SOURCES: [DirectorySource; 2] = [DirectorySource::DomainContact, DirectorySource::DomainProfile];

/// The fixed single-page listing request
pub fn list_request() -> ListRequest {
    ListRequest {
        read_mask: READ_MASK.to_vec(),
        page_size: PAGE_SIZE,
        sources: SOURCES.to_vec(),
    }
}

/// One-line view of a directory entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntrySummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

fn first_value(values: &[ListedValue]) -> Option<String> {
    values
        .first()
        .and_then(|v| v.value.as_deref())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl EntrySummary {
    pub fn from_person(person: &DirectoryPerson) -> Self {
        Self {
            name: preferred_name(person),
            email: first_value(&person.email_addresses),
            phone: first_value(&person.phone_numbers),
            note: first_value(&person.biographies),
        }
    }
}

/// Display name, else "given family", else "N/A"
pub fn preferred_name(person: &DirectoryPerson) -> String {
    let Some(name) = person.names.first() else {
        return "N/A".to_string();
    };
    if let Some(display) = name.display_name.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        return display.to_string();
    }
    let full = format!(
        "{} {}",
        name.given_name.as_deref().unwrap_or_default(),
        name.family_name.as_deref().unwrap_or_default()
    );
    let full = full.trim();
    if full.is_empty() {
        "N/A".to_string()
    } else {
        full.to_string()
    }
}

impl std::fmt::Display for EntrySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Name: {}", self.name)?;
        if let Some(email) = &self.email {
            write!(f, ", Email: {}", email)?;
        }
        if let Some(phone) = &self.phone {
            write!(f, ", Phone: {}", phone)?;
        }
        if let Some(note) = &self.note {
            write!(f, ", Note: {}", note)?;
        }
        Ok(())
    }
}

/// A single page of summarized directory entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DirectoryListing {
    pub total: usize,
    pub entries: Vec<EntrySummary>,
    /// A continuation token was returned; more entries exist beyond this page
    pub has_more: bool,
}

/// Fetch and summarize one page of domain contacts and profiles
pub fn list_directory(client: &dyn DirectoryClient) -> Result<DirectoryListing, DirectoryError> {
    let response = client.list_directory_people(&list_request()).map_err(|e| {
        tracing::error!(error = %e, "directory listing failed");
        e
    })?;

    let entries: Vec<EntrySummary> = response.people.iter().map(EntrySummary::from_person).collect();
    let listing = DirectoryListing {
        total: entries.len(),
        entries,
        has_more: response
            .next_page_token
            .as_deref()
            .is_some_and(|t| !t.is_empty()),
    };
    tracing::info!(total = listing.total, has_more = listing.has_more, "listed directory entries");
    Ok(listing)
}
