//! Background operations against the REST service.
//!
//! Every intent that needs the network is turned into a [`WorkerMessage`],
//! executed on its own task by [`MovieWorker`], and reported back as a
//! [`WorkerResponse`].
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Operation execution and rejection-message mapping

pub mod handler;
pub mod messages;

pub use handler::MovieWorker;
pub use messages::{OperationKind, TraceContext, WorkerMessage, WorkerResponse};
