use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;
use std::thread;
use std::time::Duration;

use crate::app::{Result, RetrieverError};
use crate::charset::TextEncoding;
use crate::domain::Locator;
use crate::fetcher::{Response, Transport};

/// Size of each read from a response body.
pub const CHUNK_SIZE: usize = 8192;

/// Largest declared content length that will be streamed (`i32::MAX`).
pub const MAX_CONTENT_LENGTH: u64 = i32::MAX as u64;

/// Bounded retry for request issuance.
///
/// Only the request itself is retried. Once headers have arrived, a failure
/// while reading the body is returned as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(2))
    }
}

/// Fetches resources through a [`Transport`], retrying failed requests.
pub struct Retriever<T> {
    transport: T,
    policy: RetryPolicy,
}

impl<T: Transport> Retriever<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            policy: RetryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    #[cfg(test)]
    fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch the whole body into memory.
    ///
    /// Returns the body and the locator the transport ended up at.
    pub fn fetch_bytes(&self, locator: &Locator) -> Result<(Vec<u8>, Locator)> {
        let mut buffer = Vec::new();
        let (_, resolved) = self.fetch_into(locator, &mut buffer)?;
        Ok((buffer, resolved))
    }

    pub fn fetch_text(
        &self,
        locator: &Locator,
        encoding: TextEncoding,
    ) -> Result<(String, Locator)> {
        let (bytes, resolved) = self.fetch_bytes(locator)?;
        Ok((encoding.decode(&bytes), resolved))
    }

    /// Stream the body into `sink`, returning the byte count.
    pub fn fetch_into<W: Write>(&self, locator: &Locator, sink: &mut W) -> Result<(u64, Locator)> {
        let (response, resolved) = self.open(locator)?;
        check_length(&response)?;
        let count = stream(response, sink)?;
        Ok((count, resolved))
    }

    /// Stream the body into a new file at `path`, replacing any existing file.
    ///
    /// The file is only created once a request has succeeded and passed the
    /// size check. If reading the body fails part way, the truncated file is
    /// left in place.
    pub fn fetch_to_file(&self, locator: &Locator, path: impl AsRef<Path>) -> Result<Locator> {
        let path = path.as_ref();
        let (response, resolved) = self.open(locator)?;
        check_length(&response)?;

        let mut file = File::create(path)?;
        let count = stream(response, &mut file)?;
        file.flush()?;

        tracing::info!("Wrote {} bytes to {}", count, path.display());
        Ok(resolved)
    }

    /// Find the locator `locator` redirects to. The body is never read.
    pub fn resolve_final_locator(&self, locator: &Locator) -> Result<Locator> {
        let (response, resolved) = self.open(locator)?;
        drop(response);
        Ok(resolved)
    }

    fn open(&self, locator: &Locator) -> Result<(Response, Locator)> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let error = match self.attempt(locator) {
                Ok(opened) => return Ok(opened),
                Err(e) => e,
            };

            tracing::warn!(
                "Attempt {}/{} for {} failed: {}",
                attempt,
                max_attempts,
                locator.address(),
                error
            );

            if attempt >= max_attempts {
                tracing::error!(
                    "Giving up on {} after {} attempts",
                    locator.address(),
                    attempt
                );
                return Err(RetrieverError::RetrievalExhausted {
                    attempts: attempt,
                    source: Box::new(error),
                });
            }

            thread::sleep(self.policy.delay);
            attempt += 1;
        }
    }

    fn attempt(&self, locator: &Locator) -> Result<(Response, Locator)> {
        let response = self.transport.request(locator)?;
        let resolved = Locator::new(response.final_address.clone())?;
        Ok((response, resolved))
    }
}

fn check_length(response: &Response) -> Result<()> {
    match response.content_length {
        Some(length) if length > MAX_CONTENT_LENGTH => {
            Err(RetrieverError::OversizedResource { length })
        }
        _ => Ok(()),
    }
}

fn stream<W: Write>(mut response: Response, sink: &mut W) -> Result<u64> {
    let mut buf = [0u8; CHUNK_SIZE];
    let mut total = 0u64;

    loop {
        let count = match response.body.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(RetrieverError::StreamRead(e)),
        };
        sink.write_all(&buf[..count])?;
        total += count as u64;
    }

    tracing::debug!("Streamed {} bytes from {}", total, response.final_address);
    Ok(total)
}
