//! Listing, detail, delete, login and statistics calls.
//!
//! # Example
//!
//! ```ignore
//! use console_lib::api::Resource;
//! use console_lib::api::query::{ListParams, SortSpec};
//!
//! let page = client
//!     .list_records(Resource::Users, &ListParams::new().sort_by(SortSpec::asc("email")))
//!     .await?;
//!
//! for user in page.results() {
//!     println!("{:?}", user.get_str("email"));
//! }
//! ```

use log::info;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_json::json;

use crate::ConsoleClient;
use crate::api::Resource;
use crate::api::query::ListParams;
use crate::api::query::PageResult;
use crate::auth::LoginResponse;
use crate::error::ApiError;
use crate::error::AuthError;
use crate::error::Error;
use crate::model::Record;

impl ConsoleClient {
    /// Fetches one page of a resource listing.
    pub async fn list<R: DeserializeOwned>(
        &self,
        resource: Resource,
        params: &ListParams,
    ) -> Result<PageResult<R>, Error> {
        self.get_json(resource.list_path(), &params.to_query_pairs())
            .await
    }

    /// Fetches one page of a resource listing as [`Record`]s keyed by the
    /// resource's id field.
    pub async fn list_records(
        &self,
        resource: Resource,
        params: &ListParams,
    ) -> Result<PageResult<Record>, Error> {
        let page: PageResult<Record> = self.list(resource, params).await?;
        Ok(page.map(|record| record.with_id_field(resource.id_field())))
    }

    /// Fetches a single item.
    pub async fn get(&self, resource: Resource, id: &str) -> Result<Record, Error> {
        let value: Value = self.get_json(&resource.item_path(id), &[]).await?;
        Record::from_value(value)
            .map(|record| record.with_id_field(resource.id_field()))
            .ok_or_else(|| Error::Api(ApiError::parse("expected a JSON object")))
    }

    /// Deletes a single item.
    pub async fn delete(&self, resource: Resource, id: &str) -> Result<(), Error> {
        if !resource.supports_delete() {
            return Err(Error::Api(ApiError::Unsupported {
                resource: resource.name().to_string(),
                operation: "delete",
            }));
        }
        self.send_empty(Method::DELETE, &resource.item_path(id))
            .await?;
        info!("deleted {} {}", resource, id);
        Ok(())
    }

    /// Signs an operator in and returns the issued tokens.
    ///
    /// This call is sent without an authorization header, so any client
    /// (including one built with [`NoTokenProvider`](crate::auth::NoTokenProvider))
    /// can perform it.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, Error> {
        let body = json!({ "email": email, "password": password });
        self.send_json(Method::POST, "/auth/login/admin", &body, false)
            .await
            .map_err(|err| match err.status_code() {
                Some(401) => Error::Auth(AuthError::InvalidCredentials),
                _ => err,
            })
    }

    /// Fetches the dashboard statistics.
    pub async fn statistics(&self) -> Result<Value, Error> {
        self.get_json("/admin/statistics", &[]).await
    }
}
