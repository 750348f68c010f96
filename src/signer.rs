//! The signing pipeline: validate, build the base string, sign, attach.

use tracing::{debug, trace};

use crate::algorithm::compute_signature;
use crate::base_string;
use crate::encode::percent_encode;
use crate::error::SignError;
use crate::parameters::{authorization_header, pair_string, OAuthParameters};
use crate::request::HttpRequest;

/// Where the protocol parameters are placed on the outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransmissionMode {
    /// Appended to the URL query component, values percent-encoded.
    QueryString,
    /// Carried in an `Authorization: OAuth …` header; the URL is left
    /// untouched.
    Header,
    /// Request-body form parameters. Not implemented; signing fails
    /// fast with [`SignError::UnsupportedTransmission`].
    FormData,
}

/// Sign `request` in place with the given per-request parameters.
///
/// The pipeline is strictly sequential: protocol parameters are merged
/// and sorted with the URL's existing query pairs, the base string is
/// assembled and signed, and only then is the request mutated. On any
/// error the request is returned unchanged; there is no partial success
/// and no retry, since signing is deterministic given its inputs.
///
/// Every parameter the server will see participates in the signature,
/// for header transmission as well as query transmission, as RFC 5849
/// section 3.4.1.3.1 requires.
pub fn sign<R: HttpRequest>(
    request: &mut R,
    parameters: &OAuthParameters,
    mode: TransmissionMode,
) -> Result<(), SignError> {
    if mode == TransmissionMode::FormData {
        return Err(SignError::UnsupportedTransmission);
    }

    let method = request.method().to_owned();
    if method.is_empty() {
        return Err(SignError::BadRequest);
    }
    let url = request.url().ok_or(SignError::BadRequest)?;
    if url.cannot_be_a_base() {
        return Err(SignError::BadRequest);
    }

    debug!(
        signature_method = %parameters.signature_method,
        ?mode,
        "signing request"
    );

    let mut signature_pairs: Vec<(String, String)> = parameters.query_items();
    signature_pairs.extend(
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned())),
    );
    signature_pairs.sort_unstable();

    let base_string = base_string::build(
        &method,
        &base_string::base_string_url(&url),
        &pair_string(&signature_pairs),
    )?;
    trace!(%base_string, "signature base string");

    let signature = compute_signature(parameters, &base_string)?;

    let mut items = parameters.query_items();
    items.push(("oauth_signature".to_owned(), signature));
    items.sort_unstable();

    if mode == TransmissionMode::QueryString {
        let oauth_query: String = items
            .iter()
            .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        // The existing query is preserved byte-for-byte; only the OAuth
        // pairs are appended after it.
        let combined = match url.query() {
            Some(existing) if !existing.is_empty() => format!("{existing}&{oauth_query}"),
            _ => oauth_query,
        };
        let mut url = url;
        url.set_query(Some(&combined));
        request.set_url(&url);
    } else {
        let header = authorization_header(&items)?;
        request.insert_header("Authorization", &header);
    }
    Ok(())
}
