//! Transport Layer
//!
//! This module defines the boundary to the remote catalog service:
//!
//! - `TransportClient` - The two reads the retrieval layer consumes
//! - `RetrievalError` / `ErrorEnvelope` - Failure taxonomy and wire mapping
//! - `InMemoryCatalog` - Offline catalog honouring the same contract
//!
//! The concrete wire transport and authentication are supplied by the
//! embedding application as a `TransportClient` implementation.

mod error;
pub mod memory;
mod transport;

pub use error::{ErrorEnvelope, ErrorKind, ExceptionKind, ReferenceKind, Result, RetrievalError};
pub use memory::{InMemoryCatalog, RecordedCall};
pub use transport::{AssetSummary, PageRequest, PageResponse, TransportClient};
