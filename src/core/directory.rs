//! Directory API client - create contacts and list directory entries
//!
//! [`DirectoryClient`] is the seam between the import/listing flows and the
//! remote service. [`HttpDirectoryClient`] talks to a People-style REST API
//! with a bearer token over a blocking HTTP client; tests substitute their
//! own implementation.

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::contacts::resource::{ContactResource, Name};

/// Errors returned by the directory API capability
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Directory API not available: no access token configured (set access_token or CONTACTSYNC_ACCESS_TOKEN)")]
    NotConfigured,

    #[error("Directory API request failed: {0}")]
    Transport(String),

    #[error("Directory API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        details: serde_json::Value,
    },

    #[error("Unexpected directory API response: {0}")]
    Decode(String),
}

/// Directory source types that can be listed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectorySource {
    DomainContact,
    DomainProfile,
}

impl DirectorySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DirectorySource::DomainContact => "DIRECTORY_SOURCE_TYPE_DOMAIN_CONTACT",
            DirectorySource::DomainProfile => "DIRECTORY_SOURCE_TYPE_DOMAIN_PROFILE",
        }
    }
}

/// Parameters of a single-page directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub read_mask: Vec<&'static str>,
    pub page_size: u32,
    pub sources: Vec<DirectorySource>,
}

impl ListRequest {
    /// Query-string pairs in API order
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("readMask", self.read_mask.join(",")),
            ("pageSize", self.page_size.to_string()),
        ];
        for source in &self.sources {
            query.push(("sources", source.as_str().to_string()));
        }
        query
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListedValue {
    #[serde(default)]
    pub value: Option<String>,
}

/// One directory entry as returned by the listing call
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryPerson {
    #[serde(default)]
    pub names: Vec<Name>,
    #[serde(default)]
    pub email_addresses: Vec<ListedValue>,
    #[serde(default)]
    pub phone_numbers: Vec<ListedValue>,
    #[serde(default)]
    pub biographies: Vec<ListedValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    #[serde(default)]
    pub people: Vec<DirectoryPerson>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Result of a successful contact creation
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedContact {
    #[serde(default)]
    pub resource_name: String,
    #[serde(default)]
    pub names: Vec<Name>,
}

/// Remote directory operations used by import and listing
pub trait DirectoryClient {
    /// Create one contact
    fn create_contact(&self, contact: &ContactResource) -> Result<CreatedContact, DirectoryError>;

    /// Fetch a single page of directory entries
    fn list_directory_people(&self, request: &ListRequest) -> Result<ListResponse, DirectoryError>;
}

/// Error body shape: `{"error": {"code", "message", "status", "details"}}`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    details: serde_json::Value,
}

/// Blocking HTTP client for the directory API
pub struct HttpDirectoryClient {
    base_url: String,
    token: String,
    client: Client,
}

impl HttpDirectoryClient {
    /// Create a client; an absent token means the API is not available
    pub fn new(base_url: &str, token: Option<&str>, timeout: Duration) -> Result<Self, DirectoryError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(DirectoryError::NotConfigured)?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("contactsync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DirectoryError::Transport(e.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            client,
        })
    }

    fn url(&self, method: &str) -> String {
        format!("{}/v1/people:{}", self.base_url, method)
    }

    fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, DirectoryError> {
        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| DirectoryError::Transport(e.to_string()))?;
        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }
        serde_json::from_str(&body).map_err(|e| DirectoryError::Decode(e.to_string()))
    }
}

impl DirectoryClient for HttpDirectoryClient {
    fn create_contact(&self, contact: &ContactResource) -> Result<CreatedContact, DirectoryError> {
        tracing::debug!(url = %self.url("createContact"), "creating contact");
        let resp = self
            .client
            .post(self.url("createContact"))
            .bearer_auth(&self.token)
            .json(contact)
            .send()
            .map_err(|e| DirectoryError::Transport(e.to_string()))?;
        Self::decode(resp)
    }

    fn list_directory_people(&self, request: &ListRequest) -> Result<ListResponse, DirectoryError> {
        tracing::debug!(url = %self.url("listDirectoryPeople"), page_size = request.page_size, "listing directory");
        let resp = self
            .client
            .get(self.url("listDirectoryPeople"))
            .bearer_auth(&self.token)
            .query(&request.query())
            .send()
            .map_err(|e| DirectoryError::Transport(e.to_string()))?;
        Self::decode(resp)
    }
}

/// Build an API error from a non-success response body
pub fn api_error(status: u16, body: &str) -> DirectoryError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            let message = match envelope.error.status {
                Some(code) if !envelope.error.message.is_empty() => {
                    format!("{} ({})", envelope.error.message, code)
                }
                Some(code) => code,
                None => envelope.error.message,
            };
            DirectoryError::Api {
                status,
                message,
                details: envelope.error.details,
            }
        }
        Err(_) => DirectoryError::Api {
            status,
            message: body.trim().to_string(),
            details: serde_json::Value::Null,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_is_not_configured() {
        let result = HttpDirectoryClient::new(DEFAULT_URL, None, Duration::from_secs(1));
        assert!(matches!(result, Err(DirectoryError::NotConfigured)));
        let result = HttpDirectoryClient::new(DEFAULT_URL, Some("  "), Duration::from_secs(1));
        assert!(matches!(result, Err(DirectoryError::NotConfigured)));
    }

    const DEFAULT_URL: &str = "https://people.example.com/";

    #[test]
    fn test_urls_strip_trailing_slash() {
        let client = HttpDirectoryClient::new(DEFAULT_URL, Some("tok"), Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.url("createContact"),
            "https://people.example.com/v1/people:createContact"
        );
    }

    #[test]
    fn test_list_query() {
        let request = ListRequest {
            read_mask: vec!["names", "emailAddresses"],
            page_size: 50,
            sources: vec![DirectorySource::DomainContact, DirectorySource::DomainProfile],
        };
        assert_eq!(
            request.query(),
            vec![
                ("readMask", "names,emailAddresses".to_string()),
                ("pageSize", "50".to_string()),
                ("sources", "DIRECTORY_SOURCE_TYPE_DOMAIN_CONTACT".to_string()),
                ("sources", "DIRECTORY_SOURCE_TYPE_DOMAIN_PROFILE".to_string()),
            ]
        );
    }

    #[test]
    fn test_api_error_parses_envelope() {
        let body = r#"{"error": {"code": 400, "message": "Invalid email", "status": "INVALID_ARGUMENT", "details": [{"field": "emailAddresses"}]}}"#;
        match api_error(400, body) {
            DirectoryError::Api {
                status,
                message,
                details,
            } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid email (INVALID_ARGUMENT)");
                assert_eq!(details[0]["field"], "emailAddresses");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_api_error_plain_body() {
        match api_error(503, "  Service Unavailable\n") {
            DirectoryError::Api { message, details, .. } => {
                assert_eq!(message, "Service Unavailable");
                assert!(details.is_null());
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_list_response_tolerates_missing_collections() {
        let body = r#"{"people": [{"resourceName": "people/1"}, {"names": [{"displayName": "Ann"}], "emailAddresses": [{"value": "ann@co.com", "type": "work"}]}], "nextPageToken": "abc"}"#;
        let response: ListResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.people.len(), 2);
        assert!(response.people[0].names.is_empty());
        assert_eq!(response.people[1].names[0].display_name.as_deref(), Some("Ann"));
        assert_eq!(response.next_page_token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_empty_list_response() {
        let response: ListResponse = serde_json::from_str("{}").unwrap();
        assert!(response.people.is_empty());
        assert!(response.next_page_token.is_none());
    }

    #[test]
    fn test_created_contact_decodes() {
        let body = r#"{"resourceName": "people/c123", "etag": "x", "names": [{"givenName": "Jane", "familyName": "Doe", "displayName": "Jane Doe"}]}"#;
        let created: CreatedContact = serde_json::from_str(body).unwrap();
        assert_eq!(created.resource_name, "people/c123");
        assert_eq!(created.names[0].given_name.as_deref(), Some("Jane"));
    }
}
