//! Session membership: whether this node serves a given application and chain in a session.

use std::fmt;

use relay_primitives::prelude::{Blockchain, Node, PublicKey, SessionBlockId};
use thiserror::Error;

/// Errors reported by a [`SessionOracle`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// This node is not one of the nodes serving the session.
    #[error("node is not in the session of application {application} on {chain} at {session_block_id}")]
    NotInSession {
        /// The application of the session.
        application: PublicKey,
        /// The blockchain of the session.
        chain: Blockchain,
        /// The block that opened the session.
        session_block_id: SessionBlockId,
    },

    /// The active node set is empty so no session can be formed.
    #[error("no active nodes to form a session")]
    NoActiveNodes,
}

/// Answers whether this node is authorized to serve an application on a chain in a session.
///
/// How sessions are derived is up to the implementor.
pub trait SessionOracle: fmt::Debug + Send + Sync {
    /// Returns the public key of the node this oracle answers for.
    fn node(&self) -> &PublicKey;

    /// Verifies that this node is a member of the session of `application` on `chain` opened at
    /// `session_block_id`, given the network's `active_nodes`.
    fn verify_self(
        &self,
        application: &PublicKey,
        chain: &Blockchain,
        session_block_id: &SessionBlockId,
        active_nodes: &[Node],
    ) -> Result<(), SessionError>;
}

/// A permissive oracle for standalone deployments.
///
/// It only checks that this node is part of the active set and staked for the chain, i.e., it
/// treats every session as including every eligible active node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSetOracle {
    node: PublicKey,
}

impl ActiveSetOracle {
    /// Creates an oracle for the node with the given public key.
    pub const fn new(node: PublicKey) -> Self {
        Self { node }
    }
}

impl SessionOracle for ActiveSetOracle {
    fn node(&self) -> &PublicKey {
        &self.node
    }

    fn verify_self(
        &self,
        application: &PublicKey,
        chain: &Blockchain,
        session_block_id: &SessionBlockId,
        active_nodes: &[Node],
    ) -> Result<(), SessionError> {
        if active_nodes.is_empty() {
            return Err(SessionError::NoActiveNodes);
        }

        let is_member = active_nodes
            .iter()
            .any(|node| node.public_key == self.node && node.serves(chain));

        if is_member {
            Ok(())
        } else {
            Err(SessionError::NotInSession {
                application: *application,
                chain: chain.clone(),
                session_block_id: *session_block_id,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use relay_test_utils::{generate_public_key, generate_session_block_id};

    use super::*;

    #[test]
    fn test_active_set_membership() {
        let me = generate_public_key();
        let app = generate_public_key();
        let session = generate_session_block_id();
        let chain = Blockchain::new("0001");
        let oracle = ActiveSetOracle::new(me);

        assert_eq!(
            oracle.verify_self(&app, &chain, &session, &[]),
            Err(SessionError::NoActiveNodes)
        );

        let others = vec![Node {
            public_key: generate_public_key(),
            chains: BTreeSet::from([chain.clone()]),
        }];
        assert!(matches!(
            oracle.verify_self(&app, &chain, &session, &others),
            Err(SessionError::NotInSession { .. })
        ));

        let with_me = vec![Node {
            public_key: me,
            chains: BTreeSet::from([chain.clone()]),
        }];
        assert_eq!(oracle.verify_self(&app, &chain, &session, &with_me), Ok(()));
        assert!(oracle
            .verify_self(&app, &Blockchain::new("0002"), &session, &with_me)
            .is_err());
    }
}
