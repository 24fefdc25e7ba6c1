pub mod http_transport;
pub mod retriever;

use std::io::Read;

use crate::app::Result;
use crate::domain::Locator;

pub use http_transport::HttpTransport;
pub use retriever::{RetryPolicy, Retriever, CHUNK_SIZE, MAX_CONTENT_LENGTH};

/// A response whose headers have arrived and whose body is still unread.
///
/// Dropping the response releases the underlying connection.
pub struct Response {
    /// The address the transport ultimately requested, after redirects.
    pub final_address: String,
    pub content_length: Option<u64>,
    pub body: Box<dyn Read + Send>,
}

impl std::fmt::Debug for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Response")
            .field("final_address", &self.final_address)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

/// Blocking HTTP request issuance.
///
/// Implementations follow redirects themselves and report failures
/// (connection, DNS, timeout, non-success status) as errors.
pub trait Transport {
    fn request(&self, locator: &Locator) -> Result<Response>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn request(&self, locator: &Locator) -> Result<Response> {
        (**self).request(locator)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn request(&self, locator: &Locator) -> Result<Response> {
        (**self).request(locator)
    }
}
