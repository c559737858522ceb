//! Relays: single client requests to be serviced against a hosted blockchain.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{chain::Blockchain, proof::ServiceProof};

/// The kind of a [`Payload`], used for dispatch and error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    /// A plain HTTP request.
    Http,

    /// A websocket frame.
    WebSocket,
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadKind::Http => f.write_str("http"),
            PayloadKind::WebSocket => f.write_str("websocket"),
        }
    }
}

/// The data payload of a relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payload {
    /// An HTTP request body sent to the hosted chain's endpoint.
    Http {
        /// The raw request body.
        #[serde(with = "hex::serde")]
        data: Vec<u8>,

        /// The HTTP method. Defaulted during validation when unset.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        method: Option<String>,

        /// An optional path appended to the hosted chain's URL.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<String>,
    },

    /// A websocket frame.
    WebSocket {
        /// The raw frame.
        #[serde(with = "hex::serde")]
        data: Vec<u8>,
    },
}

impl Payload {
    /// Creates an HTTP payload without method or path.
    pub fn http(data: impl Into<Vec<u8>>) -> Self {
        Payload::Http {
            data: data.into(),
            method: None,
            path: None,
        }
    }

    /// Returns the kind of the payload.
    pub const fn kind(&self) -> PayloadKind {
        match self {
            Payload::Http { .. } => PayloadKind::Http,
            Payload::WebSocket { .. } => PayloadKind::WebSocket,
        }
    }

    /// Returns the raw payload bytes.
    pub fn data(&self) -> &[u8] {
        match self {
            Payload::Http { data, .. } | Payload::WebSocket { data } => data,
        }
    }

    /// Returns the HTTP method, if this is an HTTP payload with a method set.
    pub fn method(&self) -> Option<&str> {
        match self {
            Payload::Http { method, .. } => method.as_deref(),
            Payload::WebSocket { .. } => None,
        }
    }
}

/// A read/write API request against a hosted blockchain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relay {
    /// The hosted blockchain the request targets.
    pub blockchain: Blockchain,

    /// The request itself.
    pub payload: Payload,

    /// The proof of the work this relay represents.
    pub proof: ServiceProof,
}
