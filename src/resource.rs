use std::error::Error;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use url::Url;

use crate::traits::IdTokenSource;

/// Just a wrapper around the API base URL and a way to get credentials
#[derive(Clone)]
pub struct Resource {
    url: Url,
    token_source: Arc<dyn IdTokenSource + Send + Sync>,
}

impl Resource {
    pub fn new(url: Url, token_source: Arc<dyn IdTokenSource + Send + Sync>) -> Self {
        Self { url, token_source }
    }

    pub fn url(&self) -> &Url { &self.url }

    /// The identity token to attach to the next request
    pub fn id_token(&self) -> String {
        self.token_source.id_token()
    }

    /// Build the URL of an API route, by appending `segments` to the path of the base URL.
    ///
    /// Segments are percent-encoded, so that opaque task IDs are safe to use.
    pub fn combine(&self, segments: &[&str]) -> Result<Url, Box<dyn Error>> {
        let mut built = self.url.clone();
        built.path_segments_mut()
            .map_err(|_| format!("{} cannot be used as a base URL", self.url))?
            .pop_if_empty()
            .extend(segments);
        Ok(built)
    }
}

impl Debug for Resource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resource")
            .field("url", &self.url.as_str())
            .finish()
    }
}


/// An identity token that never changes
#[derive(Clone, Debug)]
pub struct StaticToken {
    token: String,
}

impl StaticToken {
    pub fn new<S: ToString>(token: S) -> Self {
        Self { token: token.to_string() }
    }
}

impl IdTokenSource for StaticToken {
    fn id_token(&self) -> String {
        self.token.clone()
    }
}
