//! HTTP request collaborator.
//!
//! The signer only needs four things from a request: its method, its
//! absolute URL, the ability to replace that URL (query-string
//! transmission), and the ability to insert a header (header
//! transmission). The body is never inspected or modified.
//!
//! [`OwnedHttpRequest`] is provided for callers without a preexisting
//! request type. Support for common community crates can be enabled with
//! the following **features**, all off by default:
//! - `http`: enables support for the [http](https://crates.io/crates/http)
//!   crate's `Request` type.

use std::collections::HashMap;

use url::Url;

/// The view of an outgoing HTTP request required by
/// [`sign`](crate::sign).
pub trait HttpRequest {
    /// The HTTP method, e.g. `"GET"`. Any token is accepted; the signer
    /// uppercases it when building the base string.
    fn method(&self) -> &str;

    /// The absolute request URL, or `None` when the request does not
    /// carry one (for example an origin-form request target).
    fn url(&self) -> Option<Url>;

    /// Replace the request URL. Used to append OAuth query parameters.
    fn set_url(&mut self, url: &Url);

    /// Insert (or replace) a header. Used to set `Authorization`.
    fn insert_header(&mut self, name: &str, value: &str);
}

/// A minimal [`HttpRequest`] implementation that owns its data, for
/// callers who do not have a request struct of their own.
#[derive(Debug, Clone)]
pub struct OwnedHttpRequest {
    method: String,
    url: Url,
    headers: HashMap<String, String>,
}

impl OwnedHttpRequest {
    /// Build a request from a method and an absolute URL.
    pub fn new(method: impl Into<String>, url: Url) -> Self {
        Self {
            method: method.into(),
            url,
            headers: HashMap::new(),
        }
    }

    /// Header value by name, if one has been inserted.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

impl HttpRequest for OwnedHttpRequest {
    fn method(&self) -> &str {
        &self.method
    }

    fn url(&self) -> Option<Url> {
        Some(self.url.clone())
    }

    fn set_url(&mut self, url: &Url) {
        self.url = url.clone();
    }

    fn insert_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_string(), value.to_string());
    }
}

/// Adds support for using the [http](https://crates.io/crates/http)
/// crate's `Request` type as an implementation of [`HttpRequest`].
///
/// Requires the `http` feature to be enabled.
#[cfg(feature = "http")]
mod http_request {
    use url::Url;

    use super::HttpRequest;

    impl<B> HttpRequest for http::Request<B> {
        fn method(&self) -> &str {
            self.method().as_str()
        }

        fn url(&self) -> Option<Url> {
            // Origin-form targets have no scheme or authority and fail
            // to parse, which the signer reports as a bad request.
            Url::parse(&self.uri().to_string()).ok()
        }

        fn set_url(&mut self, url: &Url) {
            *self.uri_mut() = url
                .as_str()
                .parse()
                .expect("serialized URL is a valid URI");
        }

        fn insert_header(&mut self, name: &str, value: &str) {
            self.headers_mut().insert(
                http::header::HeaderName::from_bytes(name.as_bytes())
                    .expect("Invalid header name"),
                http::header::HeaderValue::from_str(value).expect("Invalid header value"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owned_request_replaces_url_and_headers() {
        let mut request =
            OwnedHttpRequest::new("GET", Url::parse("https://example.com/a").unwrap());
        request.set_url(&Url::parse("https://example.com/a?x=1").unwrap());
        request.insert_header("Authorization", "OAuth …");
        assert_eq!(request.url().unwrap().as_str(), "https://example.com/a?x=1");
        assert_eq!(request.header("Authorization"), Some("OAuth …"));
    }

    #[cfg(feature = "http")]
    #[test]
    fn http_request_without_an_absolute_uri_has_no_url() {
        let request = http::Request::builder()
            .method("GET")
            .uri("/relative/path")
            .body(Vec::<u8>::new())
            .unwrap();
        assert!(HttpRequest::url(&request).is_none());
    }

    #[cfg(feature = "http")]
    #[test]
    fn http_request_exposes_method_and_url() {
        let request = http::Request::builder()
            .method("POST")
            .uri("https://example.com/path?x=1")
            .body(Vec::<u8>::new())
            .unwrap();
        assert_eq!(HttpRequest::method(&request), "POST");
        assert_eq!(
            HttpRequest::url(&request).unwrap().as_str(),
            "https://example.com/path?x=1"
        );
    }
}
