//! Typed HTTP client for the data API.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use courtside_core::{Collection, Record};

use crate::error::ClientError;
use crate::session::Session;

/// Client for the data API's HTTP surface.
///
/// Mutations attach the session's bearer token when one is held; a 401
/// from the server surfaces as [`ClientError::Unauthorized`] so callers
/// can clear the session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Session,
}

#[derive(Serialize)]
struct CommandBody<'a> {
    #[serde(rename = "type")]
    collection: &'a str,
    action: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
}

#[derive(Deserialize)]
struct ItemEnvelope {
    item: Record,
}

#[derive(Deserialize)]
struct TokenEnvelope {
    token: String,
}

#[derive(Deserialize)]
struct MessageEnvelope {
    message: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: String,
}

impl ApiClient {
    /// Create a client against the given API base URL.
    #[must_use]
    pub fn new(base_url: Url, session: Session) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            session,
        }
    }

    /// The session whose token this client presents.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    fn endpoint(&self, path: &str) -> Url {
        self.base_url
            .join(path)
            .unwrap_or_else(|_| self.base_url.clone())
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized);
        }
        if !status.is_success() {
            let message = response
                .json::<ErrorEnvelope>()
                .await
                .map_or_else(|_| "unknown error".to_string(), |body| body.error);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn command(&self, body: CommandBody<'_>) -> Result<reqwest::Response, ClientError> {
        let mut request = self.http.post(self.endpoint("/api/data")).json(&body);
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }
        Self::check(request.send().await?).await
    }

    /// Log in with the admin password, storing the issued token in the
    /// session.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Unauthorized`] on a wrong password.
    pub async fn login(&self, password: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.endpoint("/api/auth"))
            .json(&serde_json::json!({ "password": password }))
            .send()
            .await?;
        let body: TokenEnvelope = Self::check(response).await?.json().await?;
        self.session.set_token(body.token);
        Ok(())
    }

    /// Fetch the full record list for a collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn fetch(&self, collection: Collection) -> Result<Vec<Record>, ClientError> {
        let response = self
            .http
            .get(self.endpoint("/api/data"))
            .query(&[("type", collection.as_str())])
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Create a record server-side, returning it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn create(
        &self,
        collection: Collection,
        record: &Record,
    ) -> Result<Record, ClientError> {
        let response = self
            .command(CommandBody {
                collection: collection.as_str(),
                action: "create",
                data: Some(record.clone().into()),
                id: None,
            })
            .await?;
        let body: ItemEnvelope = response.json().await?;
        Ok(body.item)
    }

    /// Merge fields into the record with the given id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn update(
        &self,
        collection: Collection,
        id: &str,
        patch: &serde_json::Map<String, Value>,
    ) -> Result<Record, ClientError> {
        let response = self
            .command(CommandBody {
                collection: collection.as_str(),
                action: "update",
                data: Some(Value::Object(patch.clone())),
                id: Some(id),
            })
            .await?;
        let body: ItemEnvelope = response.json().await?;
        Ok(body.item)
    }

    /// Delete the record with the given id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn delete(&self, collection: Collection, id: &str) -> Result<(), ClientError> {
        self.command(CommandBody {
            collection: collection.as_str(),
            action: "delete",
            data: None,
            id: Some(id),
        })
        .await?;
        Ok(())
    }

    /// Replace a collection's contents wholesale.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn save(
        &self,
        collection: Collection,
        records: &[Record],
    ) -> Result<(), ClientError> {
        self.command(CommandBody {
            collection: collection.as_str(),
            action: "save",
            data: Some(serde_json::to_value(records).unwrap_or(Value::Array(Vec::new()))),
            id: None,
        })
        .await?;
        Ok(())
    }

    /// Ask the server to seed default content.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn seed(&self) -> Result<String, ClientError> {
        let response = self
            .http
            .post(self.endpoint("/api/seed"))
            .send()
            .await?;
        let body: MessageEnvelope = Self::check(response).await?.json().await?;
        Ok(body.message)
    }
}
