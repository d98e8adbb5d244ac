//! Retrieval Error Types
//!
//! Every operation in this crate either returns data or fails with exactly one
//! of four kinds. Remote failures arrive as an [`ErrorEnvelope`] and are mapped
//! onto [`RetrievalError`] one-to-one; local validation failures are raised
//! before any network call is made.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// The kind of identifier the remote service did not recognize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReferenceKind {
    /// Asset identifier
    Asset,
    /// Connection the asset was reached through
    Connection,
    /// Schema type identifier (parent of a schema attribute page)
    Schema,
    /// Any other element identifier (comment, note log, ...)
    Element,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReferenceKind::Asset => "asset",
            ReferenceKind::Connection => "connection",
            ReferenceKind::Schema => "schema",
            ReferenceKind::Element => "element",
        };
        f.write_str(name)
    }
}

impl ReferenceKind {
    fn from_property(value: Option<&String>) -> Self {
        match value.map(String::as_str) {
            Some("asset") => ReferenceKind::Asset,
            Some("connection") => ReferenceKind::Connection,
            Some("schema") => ReferenceKind::Schema,
            _ => ReferenceKind::Element,
        }
    }
}

/// Discriminant of a [`RetrievalError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidParameter,
    UnrecognizedReference,
    Unauthorized,
    ServiceUnavailable,
}

/// Retrieval failures
///
/// The same taxonomy is used by the transport contract and by every
/// collection and graph operation; failures pass through unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RetrievalError {
    /// Bad identifier, configuration value, or out-of-range page request
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter { parameter: String, reason: String },

    /// Asset, connection, schema or element identifier unknown upstream
    #[error("Unrecognized {kind} reference: {id}")]
    UnrecognizedReference { kind: ReferenceKind, id: String },

    /// Calling identity may not read the requested metadata
    #[error("User '{user_id}' is not authorized: {message}")]
    Unauthorized { user_id: String, message: String },

    /// Transport or decode failure
    #[error("Service unavailable: {context}")]
    ServiceUnavailable { context: String },
}

impl RetrievalError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create an unrecognized reference error
    pub fn unrecognized_reference(kind: ReferenceKind, id: impl Into<String>) -> Self {
        Self::UnrecognizedReference {
            kind,
            id: id.into(),
        }
    }

    /// Create an unauthorized error
    pub fn unauthorized(user_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unauthorized {
            user_id: user_id.into(),
            message: message.into(),
        }
    }

    /// Create a service unavailable error
    pub fn service_unavailable(context: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            context: context.into(),
        }
    }

    /// The discriminant of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParameter { .. } => ErrorKind::InvalidParameter,
            Self::UnrecognizedReference { .. } => ErrorKind::UnrecognizedReference,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::ServiceUnavailable { .. } => ErrorKind::ServiceUnavailable,
        }
    }
}

impl From<serde_json::Error> for RetrievalError {
    fn from(err: serde_json::Error) -> Self {
        Self::service_unavailable(format!("failed to decode bean: {}", err))
    }
}

/// Exception kinds carried by the wire error envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExceptionKind {
    InvalidParameter,
    UnrecognizedReference,
    Unauthorized,
    ServiceUnavailable,
    /// Kinds added to the service after this client was built
    #[serde(other)]
    Unknown,
}

/// Uniform error envelope returned by every remote call
///
/// ```json
/// {
///   "exceptionKind": "UNRECOGNIZED_REFERENCE",
///   "message": "asset 7f0c... is not known to server cocoMDS1",
///   "systemAction": "The request was rejected",
///   "userAction": "Check the asset identifier",
///   "properties": { "referenceKind": "asset", "referenceId": "7f0c..." }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub exception_kind: ExceptionKind,

    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_action: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_action: Option<String>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub properties: HashMap<String, String>,
}

impl ErrorEnvelope {
    /// Create an envelope with no actions or properties
    pub fn new(exception_kind: ExceptionKind, message: impl Into<String>) -> Self {
        Self {
            exception_kind,
            message: message.into(),
            system_action: None,
            user_action: None,
            properties: HashMap::new(),
        }
    }

    /// Attach one property
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

impl From<ErrorEnvelope> for RetrievalError {
    fn from(envelope: ErrorEnvelope) -> Self {
        let ErrorEnvelope {
            exception_kind,
            message,
            mut properties,
            ..
        } = envelope;

        match exception_kind {
            ExceptionKind::InvalidParameter => {
                let parameter = properties
                    .remove("parameterName")
                    .unwrap_or_else(|| "request".to_string());
                Self::invalid_parameter(parameter, message)
            }
            ExceptionKind::UnrecognizedReference => {
                let kind = ReferenceKind::from_property(properties.get("referenceKind"));
                let id = properties.remove("referenceId").unwrap_or_default();
                Self::unrecognized_reference(kind, id)
            }
            ExceptionKind::Unauthorized => {
                let user_id = properties.remove("userId").unwrap_or_default();
                Self::unauthorized(user_id, message)
            }
            ExceptionKind::ServiceUnavailable | ExceptionKind::Unknown => {
                Self::service_unavailable(message)
            }
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, RetrievalError>;
