//! Signature base string construction (RFC 5849 section 3.4.1).

use bytes::BytesMut;
use url::Url;

use crate::encode::percent_encode;
use crate::error::EncryptionError;

/// Base string URI per RFC 5849 section 3.4.1.2: scheme and host
/// lowercased, default ports omitted, query and fragment stripped.
pub(crate) fn base_string_url(url: &Url) -> String {
    let scheme = url.scheme();
    let mut result = String::with_capacity(url.as_str().len());
    result.push_str(scheme);
    result.push_str("://");
    if let Some(host) = url.host_str() {
        result.push_str(&host.to_ascii_lowercase());
    }
    if let Some(port) = url.port() {
        match (scheme, port) {
            ("http", 80) | ("https", 443) => {}
            _ => {
                result.push(':');
                result.push_str(&port.to_string());
            }
        }
    }
    result.push_str(url.path());
    result
}

/// Assemble the string to be signed:
/// `UPPERCASE(method) & "&" & enc(url) & "&" & enc(parameter_string)`.
///
/// The method is uppercased but otherwise taken as-is; any token is
/// accepted. The parameter string arrives raw and is encoded here in one
/// pass together with its separators, so each value ends up escaped
/// exactly once in the result.
pub(crate) fn build(
    method: &str,
    base_url: &str,
    parameter_string: &str,
) -> Result<String, EncryptionError> {
    let mut buf = BytesMut::with_capacity(method.len() + base_url.len() * 3 + parameter_string.len() * 3 + 2);
    buf.extend_from_slice(method.to_ascii_uppercase().as_bytes());
    buf.extend_from_slice(b"&");
    buf.extend_from_slice(percent_encode(base_url).as_bytes());
    buf.extend_from_slice(b"&");
    buf.extend_from_slice(percent_encode(parameter_string).as_bytes());
    String::from_utf8(buf.to_vec()).map_err(|_| EncryptionError::EncodingError)
}
