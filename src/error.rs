//! Error types surfaced by the signing pipeline.
//!
//! Every failure is terminal for the signing attempt it occurred in:
//! signing is deterministic given its inputs, so nothing here is worth
//! retrying, and no component logs-and-swallows an error on the way up.

use thiserror::Error;

/// Errors returned by [`sign`](crate::sign).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignError {
    /// The request carries no absolute URL or no HTTP method.
    #[error("request is missing an absolute URL or an HTTP method")]
    BadRequest,

    /// Form-data parameter transmission is deliberately not implemented.
    #[error("form-data parameter transmission is not implemented")]
    UnsupportedTransmission,

    /// A signature backend rejected its inputs or failed to sign.
    #[error(transparent)]
    Encryption(#[from] EncryptionError),
}

/// Errors produced by the signature backends.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncryptionError {
    /// The base string to sign was empty.
    #[error("cannot sign an empty message")]
    EmptyMessage,

    /// No usable key material: both secrets were empty, or no RSA
    /// private key was supplied for RSA-SHA1.
    #[error("signing key material is empty")]
    EmptyKey,

    /// A signature method name did not match any supported method.
    #[error("unsupported signature method: {0}")]
    UnexpectedHashType(String),

    /// The RSA private key PEM could not be parsed.
    #[error("invalid RSA private key: {0}")]
    InvalidPrivateKey(String),

    /// A built byte string was not valid UTF-8.
    #[error("string conversion failed")]
    EncodingError,

    /// The RSA signing primitive reported failure.
    #[error("RSA signing failed")]
    SigningFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encryption_errors_convert_into_sign_errors() {
        let err: SignError = EncryptionError::EmptyKey.into();
        assert_eq!(err, SignError::Encryption(EncryptionError::EmptyKey));
    }

    #[test]
    fn display_carries_the_offending_method_name() {
        let err = EncryptionError::UnexpectedHashType("HMAC-SHA3".to_string());
        assert_eq!(err.to_string(), "unsupported signature method: HMAC-SHA3");
    }
}
