//! OAuth protocol parameters and their canonical serialized forms.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use bytes::BytesMut;
use rand::RngExt;

use crate::algorithm::SignatureMethod;
use crate::encode::percent_encode;
use crate::error::EncryptionError;

/// Credentials and protocol parameters for a single signing attempt.
///
/// Construct one per outgoing request: [`OAuthParameters::new`] draws a
/// fresh nonce and timestamp, so two instances never collide on the
/// `(consumer key, nonce, timestamp)` triple servers use for replay
/// detection. The value is consumed synchronously by [`sign`](crate::sign)
/// and holds no shared mutable state, so independent requests may be
/// signed concurrently without locks.
#[derive(Clone)]
pub struct OAuthParameters {
    pub(crate) consumer_key: String,
    pub(crate) consumer_secret: String,
    pub(crate) token: Option<String>,
    pub(crate) token_secret: Option<String>,
    pub(crate) signature_method: SignatureMethod,
    pub(crate) version: String,
    pub(crate) nonce: String,
    pub(crate) timestamp: String,
    pub(crate) callback: Option<String>,
    pub(crate) verifier: Option<String>,
    pub(crate) rsa_private_key: Option<String>,
}

impl OAuthParameters {
    /// Create parameters for one request with a generated nonce and the
    /// current Unix time, signing with HMAC-SHA1 unless reconfigured.
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            token: None,
            token_secret: None,
            signature_method: SignatureMethod::default(),
            version: "1.0".to_string(),
            nonce: generate_nonce(),
            timestamp: generate_timestamp(),
            callback: None,
            verifier: None,
            rsa_private_key: None,
        }
    }

    /// Attach token credentials issued by the server (temporary or
    /// access token).
    pub fn token(mut self, token: impl Into<String>, secret: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self.token_secret = Some(secret.into());
        self
    }

    /// Select the signature method. Defaults to HMAC-SHA1.
    pub fn signature_method(mut self, method: SignatureMethod) -> Self {
        self.signature_method = method;
        self
    }

    /// Override the generated nonce with a caller-supplied value.
    pub fn nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = nonce.into();
        self
    }

    /// Override the generated timestamp (decimal Unix seconds).
    pub fn timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    /// Override the protocol version emitted as `oauth_version`.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set `oauth_callback` for the temporary-credentials request step.
    pub fn callback(mut self, callback: impl Into<String>) -> Self {
        self.callback = Some(callback.into());
        self
    }

    /// Set `oauth_verifier` for the access-token exchange step.
    pub fn verifier(mut self, verifier: impl Into<String>) -> Self {
        self.verifier = Some(verifier.into());
        self
    }

    /// Supply the PEM-encoded RSA private key used by RSA-SHA1.
    /// Both PKCS#8 and PKCS#1 framing are accepted.
    pub fn rsa_private_key(mut self, pem: impl Into<String>) -> Self {
        self.rsa_private_key = Some(pem.into());
        self
    }

    /// Canonical protocol pairs, sorted by key then value, byte-wise
    /// ascending. Absent optional parameters are excluded entirely and
    /// never emitted with an empty value. `oauth_signature` is not part
    /// of this set; the signer appends it after signing.
    pub(crate) fn oauth_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs: Vec<(&'static str, &str)> = vec![
            ("oauth_consumer_key", self.consumer_key.as_str()),
            ("oauth_nonce", self.nonce.as_str()),
            ("oauth_signature_method", self.signature_method.name()),
            ("oauth_timestamp", self.timestamp.as_str()),
            ("oauth_version", self.version.as_str()),
        ];
        if let Some(token) = self.token.as_deref().filter(|t| !t.is_empty()) {
            pairs.push(("oauth_token", token));
        }
        if let Some(callback) = self.callback.as_deref().filter(|c| !c.is_empty()) {
            pairs.push(("oauth_callback", callback));
        }
        if let Some(verifier) = self.verifier.as_deref().filter(|v| !v.is_empty()) {
            pairs.push(("oauth_verifier", verifier));
        }
        pairs.sort_unstable();
        pairs
    }

    /// The canonical pairs as owned name/value items, in sorted order,
    /// suitable for appending to a URL query component.
    pub fn query_items(&self) -> Vec<(String, String)> {
        self.oauth_pairs()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    /// The canonical pairs rendered `k1=v1&k2=v2`. No percent-encoding
    /// is applied here; the base-string builder encodes the assembled
    /// string exactly once.
    pub fn parameter_string(&self) -> String {
        pair_string(&self.oauth_pairs())
    }
}

// Secrets stay out of logs and panic messages.
impl fmt::Debug for OAuthParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthParameters")
            .field("consumer_key", &self.consumer_key)
            .field("token", &self.token)
            .field("signature_method", &self.signature_method)
            .field("nonce", &self.nonce)
            .field("timestamp", &self.timestamp)
            .field("callback", &self.callback)
            .field("verifier", &self.verifier)
            .finish_non_exhaustive()
    }
}

/// Render pairs as `k1=v1&k2=v2`, with no separator emitted for an
/// empty list.
pub(crate) fn pair_string<K: AsRef<str>, V: AsRef<str>>(pairs: &[(K, V)]) -> String {
    let mut out = String::new();
    for (index, (key, value)) in pairs.iter().enumerate() {
        if index > 0 {
            out.push('&');
        }
        out.push_str(key.as_ref());
        out.push('=');
        out.push_str(value.as_ref());
    }
    out
}

/// Render pairs as an `OAuth ` header value: comma-separated
/// `key="value"` items with each value percent-encoded before quoting,
/// keys left bare.
pub(crate) fn authorization_header<K: AsRef<str>, V: AsRef<str>>(
    pairs: &[(K, V)],
) -> Result<String, EncryptionError> {
    let mut buf = BytesMut::with_capacity(64 + pairs.len() * 32);
    buf.extend_from_slice(b"OAuth ");
    for (index, (key, value)) in pairs.iter().enumerate() {
        if index > 0 {
            buf.extend_from_slice(b", ");
        }
        buf.extend_from_slice(key.as_ref().as_bytes());
        buf.extend_from_slice(b"=\"");
        buf.extend_from_slice(percent_encode(value.as_ref()).as_bytes());
        buf.extend_from_slice(b"\"");
    }
    String::from_utf8(buf.to_vec()).map_err(|_| EncryptionError::EncodingError)
}

/// 32 hex characters from 16 cryptographically random bytes.
pub(crate) fn generate_nonce() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    hex::encode(bytes)
}

/// Decimal Unix seconds.
pub(crate) fn generate_timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixed(params: OAuthParameters) -> OAuthParameters {
        params.nonce("7d8f3e4a").timestamp("137131201")
    }

    #[test]
    fn pairs_are_sorted_regardless_of_construction_order() {
        let params = fixed(OAuthParameters::new("ck", "cs"))
            .verifier("v")
            .callback("http://client.example/cb")
            .token("tk", "ts");
        let keys: Vec<&str> = params.oauth_pairs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "oauth_callback",
                "oauth_consumer_key",
                "oauth_nonce",
                "oauth_signature_method",
                "oauth_timestamp",
                "oauth_token",
                "oauth_verifier",
                "oauth_version",
            ]
        );
    }

    #[test]
    fn absent_optionals_are_excluded() {
        let params = fixed(OAuthParameters::new("ck", "cs"));
        let rendered = params.parameter_string();
        assert!(!rendered.contains("oauth_token"));
        assert!(!rendered.contains("oauth_callback"));
        assert!(!rendered.contains("oauth_verifier"));
    }

    #[test]
    fn empty_optionals_are_treated_as_absent() {
        let params = fixed(OAuthParameters::new("ck", "cs")).token("", "");
        assert!(!params.parameter_string().contains("oauth_token"));
    }

    #[test]
    fn parameter_string_is_raw_and_has_no_dangling_separator() {
        let params = fixed(OAuthParameters::new("ck", "cs")).nonce("a b");
        let rendered = params.parameter_string();
        assert_eq!(
            rendered,
            "oauth_consumer_key=ck&oauth_nonce=a b&oauth_signature_method=HMAC-SHA1\
             &oauth_timestamp=137131201&oauth_version=1.0"
        );
        assert!(!rendered.ends_with('&'));
    }

    #[test]
    fn generated_nonces_are_unique_hex() {
        let a = generate_nonce();
        let b = generate_nonce();
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
        assert!(a.bytes().all(|b| b.is_ascii_hexdigit()));
    }

    #[test]
    fn generated_timestamp_is_decimal_seconds() {
        let ts = generate_timestamp();
        assert!(ts.parse::<u64>().is_ok());
    }

    #[test]
    fn fresh_instances_never_share_a_nonce() {
        let a = OAuthParameters::new("ck", "cs");
        let b = OAuthParameters::new("ck", "cs");
        assert_ne!(a.nonce, b.nonce);
    }

    #[test]
    fn empty_pair_list_renders_empty() {
        let pairs: Vec<(String, String)> = Vec::new();
        assert_eq!(pair_string(&pairs), "");
    }

    #[test]
    fn header_values_are_encoded_and_quoted() {
        let pairs = vec![
            ("oauth_consumer_key", "ck"),
            ("oauth_signature", "a+b/c="),
        ];
        assert_eq!(
            authorization_header(&pairs).unwrap(),
            "OAuth oauth_consumer_key=\"ck\", oauth_signature=\"a%2Bb%2Fc%3D\""
        );
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let params = OAuthParameters::new("ck", "very-secret").token("tk", "token-secret");
        let debugged = format!("{params:?}");
        assert!(!debugged.contains("very-secret"));
        assert!(!debugged.contains("token-secret"));
    }
}
