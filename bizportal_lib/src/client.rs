//! Entry point for the portal API: one shared pipeline, grouped by department.

use bizportal_api::{
    endpoints, normalize, Client, ClientConfig, ListQuery, Listing, LoginRedirect, Session,
};

use crate::error::PortalError;
use crate::messages::{classify_error, report};
use crate::portal::{Accounting, Auth, Dashboard, Hr, It, Marketing, Operations, Sales};

/// Portal client owning the HTTP pipeline and the session it decorates
/// requests with.
///
/// Department groups borrow the pipeline, so every call shares the same auth
/// headers, retry policy and 401 handling.
#[derive(Clone)]
pub struct PortalClient {
    inner: Client,
}

impl PortalClient {
    /// Creates a client from explicit settings.
    pub fn new(config: ClientConfig, session: Session) -> Result<Self, PortalError> {
        tracing::debug!("Portal API at {}", config.base_url);
        let inner = Client::new(config, session).map_err(classify_error)?;
        Ok(Self { inner })
    }

    /// Creates a client with default settings and a custom base URL. Used for testing.
    pub fn with_base_url(base_url: &str, session: Session) -> Result<Self, PortalError> {
        Self::new(ClientConfig::new(base_url), session)
    }

    /// Registers the hook fired when the backend rejects the session.
    pub fn on_unauthorized(self, hook: LoginRedirect) -> Self {
        Self {
            inner: self.inner.on_unauthorized(hook),
        }
    }

    pub fn session(&self) -> &Session {
        self.inner.session()
    }

    /// The underlying pipeline, for endpoints without a typed wrapper.
    pub fn api(&self) -> &Client {
        &self.inner
    }

    pub fn auth(&self) -> Auth<'_> {
        Auth::new(&self.inner)
    }

    pub fn hr(&self) -> Hr<'_> {
        Hr::new(&self.inner)
    }

    pub fn sales(&self) -> Sales<'_> {
        Sales::new(&self.inner)
    }

    pub fn it(&self) -> It<'_> {
        It::new(&self.inner)
    }

    pub fn marketing(&self) -> Marketing<'_> {
        Marketing::new(&self.inner)
    }

    pub fn operations(&self) -> Operations<'_> {
        Operations::new(&self.inner)
    }

    pub fn accounting(&self) -> Accounting<'_> {
        Accounting::new(&self.inner)
    }

    pub fn dashboard(&self) -> Dashboard<'_> {
        Dashboard::new(&self.inner)
    }

    /// Lists a collection by its logical endpoint name, e.g. `"sales.orders"`.
    ///
    /// Items stay untyped JSON. Unknown names fail before any request is sent.
    pub async fn list_named(
        &self,
        name: &str,
        query: &ListQuery,
    ) -> Result<Listing, PortalError> {
        let path = endpoints::lookup(name)
            .ok_or_else(|| PortalError::InvalidInput(format!("unknown endpoint '{}'", name)))?;
        let value = self
            .inner
            .get_json(path, query.to_query_pairs())
            .await
            .map_err(|e| report(&format!("list {}", name), e))?;
        Ok(normalize(value).into_listing())
    }
}

impl From<Client> for PortalClient {
    fn from(inner: Client) -> Self {
        Self { inner }
    }
}
