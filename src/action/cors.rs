//! CORS header sets.
//!
//! Two distinct sets are in use: the tip endpoint's own set on every regular
//! response, and the action protocol's standard set on the invalid-account
//! rejection. They differ in the allowed methods and in `Content-Type`.

use axum::http::{header, HeaderName, HeaderValue};

const ALLOW_HEADERS: &str = "Content-Type, Authorization, Content-Encoding, Accept-Encoding";

/// Headers attached to every discovery, transaction and general error response.
pub const TIP_CORS_HEADERS: [(HeaderName, HeaderValue); 3] = [
    (
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    ),
    (
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
    ),
    (
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    ),
];

/// The action protocol's predefined headers, used for the invalid-account response.
pub const ACTIONS_CORS_HEADERS: [(HeaderName, HeaderValue); 4] = [
    (
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    ),
    (
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET,POST,PUT,OPTIONS"),
    ),
    (
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    ),
    (
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    ),
];
