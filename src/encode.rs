//! Percent-encoding as required by RFC 5849 section 3.6.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

/// Every byte outside the RFC 3986 unreserved set
/// (`A-Z a-z 0-9 - . _ ~`) must be escaped.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode `input`, escaping every byte outside the unreserved
/// set as uppercase `%XX`.
///
/// Stateless and infallible; safe to call from any number of threads.
pub fn percent_encode(input: &str) -> String {
    percent_encoding::percent_encode(input.as_bytes(), OAUTH_ENCODE_SET).to_string()
}
