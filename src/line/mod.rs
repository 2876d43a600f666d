//! LINE Messaging API passthrough: a transport seam plus one client method
//! per endpoint the service forwards to.

pub mod client;
pub mod transport;

pub use client::LineClient;
pub use transport::{
    BinaryResponse, HttpTransport, LineError, LineRequest, LineResponse, LineTransport, RequestBody,
};
