//! Remote data access: the read-only users API.
//!
//! Two endpoints, `GET {base}/users` and `GET {base}/users/{id}`. No
//! caching, no retry; every failure is mapped to a [`FetchError`] at this
//! boundary and handled by the views.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{FetchError, Result};

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

const LIST_CONTEXT: &str = "Failed to fetch users";
const DETAIL_CONTEXT: &str = "Failed to fetch user";
const LIST_NETWORK_ERROR: &str = "Network error";
const DETAIL_NETWORK_ERROR: &str = "Network error occurred while fetching user";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
    pub geo: Geo,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Company {
    pub name: String,
    #[serde(rename = "catchPhrase")]
    pub catch_phrase: String,
    pub bs: String,
}

/// One user record, exactly as the server returns it. Never mutated after
/// deserialization.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub company: Company,
    pub address: Address,
}

/// Blocking client for the users API.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::blocking::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the full user collection.
    pub fn fetch_all_users(&self) -> std::result::Result<Vec<User>, FetchError> {
        let url = format!("{}/users", self.base_url);
        debug!(%url, "fetching user list");
        let response = self.http.get(&url).send().map_err(|e| {
            warn!(error = %e, "user list request failed");
            FetchError::network(LIST_NETWORK_ERROR)
        })?;
        let status = response.status();
        if !status.is_success() {
            return Err(status_error(LIST_CONTEXT, status));
        }
        response.json::<Vec<User>>().map_err(|e| {
            warn!(error = %e, "user list body did not decode");
            FetchError::network(LIST_NETWORK_ERROR)
        })
    }

    /// Fetch a single user by identifier.
    pub fn fetch_user_by_id(&self, id: u64) -> std::result::Result<User, FetchError> {
        let url = format!("{}/users/{}", self.base_url, id);
        debug!(%url, "fetching user");
        let response = self.http.get(&url).send().map_err(|e| {
            warn!(error = %e, id, "user request failed");
            FetchError::network(DETAIL_NETWORK_ERROR)
        })?;
        let status = response.status();
        if !status.is_success() {
            return Err(status_error(DETAIL_CONTEXT, status));
        }
        response.json::<User>().map_err(|e| {
            warn!(error = %e, id, "user body did not decode");
            FetchError::network(DETAIL_NETWORK_ERROR)
        })
    }
}

fn status_error(context: &str, status: reqwest::StatusCode) -> FetchError {
    let text = status.canonical_reason().unwrap_or("Unknown Status");
    FetchError::new(format!("{}: {}", context, text), status.as_u16())
}
