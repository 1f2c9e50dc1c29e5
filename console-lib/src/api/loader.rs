//! Page loaders feeding the remote data table.

use std::future::Future;
use std::marker::PhantomData;

use async_trait::async_trait;

use crate::ConsoleClient;
use crate::api::Resource;
use crate::api::query::ListParams;
use crate::api::query::PageResult;
use crate::error::Error;
use crate::model::Record;

/// The single data source of a remote data table.
///
/// A loader maps one set of [`ListParams`] to one page of rows. It must not
/// keep state between calls; the table owns all caching.
#[async_trait]
pub trait Loader<R>: Send + Sync {
    /// Loads the page described by `params`.
    async fn load(&self, params: ListParams) -> Result<PageResult<R>, Error>;
}

/// Loader bound to one REST resource.
#[derive(Clone)]
pub struct ResourceLoader {
    client: ConsoleClient,
    resource: Resource,
}

impl ResourceLoader {
    /// Creates a loader for `resource`.
    pub fn new(client: ConsoleClient, resource: Resource) -> Self {
        Self { client, resource }
    }

    /// Returns the resource this loader reads.
    pub fn resource(&self) -> Resource {
        self.resource
    }
}

#[async_trait]
impl Loader<Record> for ResourceLoader {
    async fn load(&self, params: ListParams) -> Result<PageResult<Record>, Error> {
        self.client.list_records(self.resource, &params).await
    }
}

/// Loader backed by an async closure.
///
/// # Example
///
/// ```
/// use console_lib::api::FnLoader;
/// use console_lib::api::query::PageResult;
/// use console_lib::model::Record;
///
/// let loader = FnLoader::new(|_params| async { Ok(PageResult::<Record>::default()) });
/// ```
pub struct FnLoader<R, F> {
    f: F,
    _row: PhantomData<fn() -> R>,
}

impl<R, F, Fut> FnLoader<R, F>
where
    F: Fn(ListParams) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<PageResult<R>, Error>> + Send + 'static,
{
    /// Wraps `f` as a loader.
    pub fn new(f: F) -> Self {
        Self {
            f,
            _row: PhantomData,
        }
    }
}

#[async_trait]
impl<R, F, Fut> Loader<R> for FnLoader<R, F>
where
    R: Send + 'static,
    F: Fn(ListParams) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<PageResult<R>, Error>> + Send + 'static,
{
    async fn load(&self, params: ListParams) -> Result<PageResult<R>, Error> {
        (self.f)(params).await
    }
}
