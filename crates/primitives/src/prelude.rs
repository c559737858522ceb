//! Re-exports of the most commonly used primitives.

pub use crate::{
    application::{Application, StakeStatus},
    chain::Blockchain,
    errors::{ErrorKind, ParseError},
    events::{Attribute, Event},
    keys::{Address, PublicKey},
    node::Node,
    proof::{ProofError, ProofId, ServiceProof, UnsignedServiceProof},
    relay::{Payload, PayloadKind, Relay},
    session::{SessionBlockId, SessionHeader},
    tokens::Tokens,
    types::{BlockHeight, RelayIndex},
};
