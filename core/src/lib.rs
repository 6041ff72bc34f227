//! Client core for the goshop order and payment services.
//!
//! # Overview
//! Turns typed intent (create an order, deposit funds, check a balance) into
//! HTTP requests against a configurable service origin and hands the raw
//! responses back to the caller without interpreting them.
//!
//! # Design
//! - `Origin` is resolved once at startup and passed explicitly into the
//!   `Dispatcher`; nothing reads configuration per call.
//! - `Dispatcher` sends one request per call through a `Transport` and
//!   returns the response as-is. Error statuses are responses, not errors.
//! - `GoshopClient` splits each operation into a pure `build_*` step and an
//!   async call, so request shapes can be checked without a network.

pub mod client;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod origin;
pub mod types;

pub use client::{encode_component, GoshopClient};
pub use dispatch::{Dispatcher, HttpTransport, Transport};
pub use error::{ClientError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use origin::Origin;
pub use types::{Amount, CreateAccount, CreateOrder, Deposit};
