#![forbid(unsafe_code)]

//! Client-side OAuth 1.0 ([RFC 5849]) request signing.
//!
//! Given an outbound HTTP request and a set of credentials, this crate
//! normalizes the protocol parameters, assembles the signature base
//! string, signs it with the configured signature method (the HMAC
//! family, PLAINTEXT, or RSA-SHA1), and attaches the result either to
//! the URL query or to an `Authorization` header.
//!
//! ```
//! use oauth1_sign::request::OwnedHttpRequest;
//! use oauth1_sign::{sign, OAuthParameters, TransmissionMode};
//! use url::Url;
//!
//! let url = Url::parse("https://api.example.com/endpoint")?;
//! let mut request = OwnedHttpRequest::new("GET", url);
//! let parameters = OAuthParameters::new("consumer-key", "consumer-secret");
//! sign(&mut request, &parameters, TransmissionMode::Header)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! This is not an HTTP client: transport, the token-endpoint flow, and
//! the request body are entirely the caller's concern.
//!
//! [RFC 5849]: https://www.rfc-editor.org/rfc/rfc5849

mod algorithm;
mod base_string;
mod encode;
mod error;
mod parameters;
pub mod request;
mod signer;

pub use algorithm::{HashAlgorithm, SignatureMethod};
pub use encode::percent_encode;
pub use error::{EncryptionError, SignError};
pub use parameters::OAuthParameters;
pub use signer::{sign, TransmissionMode};
