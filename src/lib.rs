//! # Retriever
//!
//! Fetch http(s) resources reliably, discover the character encoding of
//! textual content, and report the address actually served after redirects.
//!
//! ## Architecture
//!
//! ```text
//! Locator → Retriever → Transport → (bytes | text | file | final Locator)
//!                ↘ charset
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! # Print a page, sniffing its charset
//! retriever text --detect https://www.rust-lang.org/
//!
//! # Save a file
//! retriever download https://example.com/archive.tar.gz archive.tar.gz
//!
//! # Where does a short link end up?
//! retriever resolve https://example.com/short
//! ```
//!
//! ## Modules
//!
//! - [`app`]: Application context and error types
//! - [`charset`]: Charset sniffing and decoding
//! - [`cli`]: Command-line interface definitions
//! - [`config`]: Configuration file handling
//! - [`domain`]: The [`Locator`](domain::Locator) value type
//! - [`fetcher`]: Transports and the retrying retriever
//! - [`menu`]: Interactive numbered menus

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires configuration, transport
/// and retriever together.
pub mod app;

/// Charset discovery from content markers.
///
/// - [`resolve`](charset::resolve): sniff a declared encoding from ASCII-decoded text
/// - [`TextEncoding`](charset::TextEncoding): how a body is decoded
pub mod charset;

/// Command-line interface using clap.
///
/// - `text <url>` - Print a resource as text
/// - `bytes <url>` - Report a resource's size
/// - `download <url> <path>` - Save a resource to a file
/// - `resolve <url>` - Print the final address
/// - `menu <url>` - Interactive menu
pub mod cli;

/// Configuration loaded from `~/.config/retriever/config.toml`.
pub mod config;

/// Core domain values.
pub mod domain;

/// HTTP retrieval.
///
/// - [`Transport`](fetcher::Transport): blocking request trait
/// - [`HttpTransport`](fetcher::HttpTransport): reqwest-based implementation
/// - [`Retriever`](fetcher::Retriever): retry, size guard and streaming
pub mod fetcher;

/// Numbered text menus bound to producer closures.
pub mod menu;
