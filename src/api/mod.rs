//! Remote users endpoint: record types and the HTTP client that loads them.

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use serde::{Deserialize, Deserializer};
use tracing::{debug, info};

use crate::error::FetchError;

pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/users";
/// Pause between the response headers and body decode, so the loading
/// status is visible for at least this long.
pub const DEFAULT_LOADING_DELAY: Duration = Duration::from_millis(350);
const USER_AGENT: &str = concat!("user-cards/", env!("CARGO_PKG_VERSION"));

/// One user record as served by the endpoint. Fields not listed here are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct User {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub company: Option<Company>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Company {
    #[serde(default)]
    pub name: Option<String>,
}

impl User {
    pub fn city(&self) -> Option<&str> {
        self.address.as_ref()?.city.as_deref().filter(|c| !c.is_empty())
    }

    pub fn company_name(&self) -> Option<&str> {
        self.company.as_ref()?.name.as_deref().filter(|c| !c.is_empty())
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref().filter(|p| !p.is_empty())
    }

    pub fn website(&self) -> Option<&str> {
        self.website.as_deref().filter(|w| !w.is_empty())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Client for the users endpoint. Issues a single GET per call; no timeout, no retry.
pub struct UsersClient {
    client: Client,
    endpoint: Url,
    loading_delay: Duration,
}

impl UsersClient {
    /// # Errors
    ///
    /// Returns `FetchError::Network` when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, loading_delay: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            endpoint,
            loading_delay,
        })
    }

    /// Fetch the full users list.
    ///
    /// # Errors
    ///
    /// `FetchError::Network` on transport or decode failure, `FetchError::Http`
    /// when the status is outside 2xx.
    pub async fn fetch_users(&self) -> Result<Vec<User>, FetchError> {
        debug!(endpoint = %self.endpoint, "requesting users");
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        tokio::time::sleep(self.loading_delay).await;
        let users: Vec<User> = response.json().await?;
        info!(count = users.len(), "users fetched");
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_record_and_ignores_extra_fields() {
        let raw = r#"{
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": {"street": "Kulas Light", "city": "Gwenborough"},
            "phone": "1-770-736-8031 x56442",
            "website": "hildegard.org",
            "company": {"name": "Romaguera-Crona", "bs": "harness real-time e-markets"}
        }"#;
        let user: User = serde_json::from_str(raw).unwrap();
        assert_eq!(user.name, "Leanne Graham");
        assert_eq!(user.city(), Some("Gwenborough"));
        assert_eq!(user.company_name(), Some("Romaguera-Crona"));
        assert_eq!(user.phone(), Some("1-770-736-8031 x56442"));
        assert_eq!(user.website(), Some("hildegard.org"));
    }

    #[test]
    fn missing_or_null_name_and_email_become_empty() {
        let user: User = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert_eq!(user.name, "");
        assert_eq!(user.email, "");
        assert!(user.address.is_none());
    }

    #[test]
    fn empty_optional_values_read_as_absent() {
        let user: User = serde_json::from_str(
            r#"{"name":"a","email":"b","phone":"","website":"","address":{"city":""},"company":{}}"#,
        )
        .unwrap();
        assert_eq!(user.city(), None);
        assert_eq!(user.company_name(), None);
        assert_eq!(user.phone(), None);
        assert_eq!(user.website(), None);
    }
}
