//! Applications: client entities that stake tokens to consume relay service.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{
    chain::Blockchain,
    keys::{Address, PublicKey},
    tokens::Tokens,
    types::BlockHeight,
};

/// Where an application stands in the staking lifecycle.
///
/// Jailing is tracked separately via [`Application::jailed`] since an application can be jailed
/// while staked or while unstaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StakeStatus {
    /// The application has not staked yet.
    Unstaked,

    /// The application's stake is active.
    Staked,

    /// The application has begun unstaking; its tokens are released at `completion_height`.
    Unstaking {
        /// The block height at which the tokens are released.
        completion_height: BlockHeight,
    },
}

/// A staked client application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    /// The address derived from [`Self::public_key`].
    pub address: Address,

    /// The public key that signs the application's service proofs.
    pub public_key: PublicKey,

    /// The hosted blockchains the application is staked to consume.
    pub chains: BTreeSet<Blockchain>,

    /// The amount of staked tokens.
    pub tokens: Tokens,

    /// Whether the application has been jailed.
    pub jailed: bool,

    /// The lifecycle status of the stake.
    pub status: StakeStatus,
}

impl Application {
    /// Creates a new, not yet staked application.
    pub fn new(
        public_key: PublicKey,
        chains: impl IntoIterator<Item = Blockchain>,
        tokens: Tokens,
    ) -> Self {
        Self {
            address: public_key.address(),
            public_key,
            chains: chains.into_iter().collect(),
            tokens,
            jailed: false,
            status: StakeStatus::Unstaked,
        }
    }

    /// Returns the staked tokens.
    pub const fn tokens(&self) -> Tokens {
        self.tokens
    }

    /// Returns `true` if the application is jailed.
    pub const fn is_jailed(&self) -> bool {
        self.jailed
    }

    /// Returns `true` if the stake is active.
    pub const fn is_staked(&self) -> bool {
        matches!(self.status, StakeStatus::Staked)
    }

    /// Returns `true` if the application has begun unstaking.
    pub const fn is_unstaking(&self) -> bool {
        matches!(self.status, StakeStatus::Unstaking { .. })
    }

    /// Returns `true` if the application is staked for the given chain.
    pub fn requests(&self, chain: &Blockchain) -> bool {
        self.chains.contains(chain)
    }

    /// Returns `true` if relays may be served on behalf of this application.
    pub const fn can_be_served(&self) -> bool {
        self.is_staked() && !self.jailed
    }
}

#[cfg(test)]
mod tests {
    use secp256k1::{Keypair, SecretKey, SECP256K1};

    use super::*;

    #[test]
    fn test_new_application_is_unstaked() {
        let sk = SecretKey::from_slice(&[3u8; 32]).unwrap();
        let key = PublicKey::new(Keypair::from_secret_key(SECP256K1, &sk).x_only_public_key().0);

        let app = Application::new(key, [Blockchain::new("0001")], Tokens::new(10));

        assert_eq!(app.address, key.address());
        assert_eq!(app.status, StakeStatus::Unstaked);
        assert!(app.requests(&Blockchain::new("0001")));
        assert!(!app.requests(&Blockchain::new("0002")));
        assert!(!app.can_be_served());
    }

    #[test]
    fn test_only_staked_free_application_can_be_served() {
        let sk = SecretKey::from_slice(&[4u8; 32]).unwrap();
        let key = PublicKey::new(Keypair::from_secret_key(SECP256K1, &sk).x_only_public_key().0);
        let mut app = Application::new(key, [Blockchain::new("0001")], Tokens::new(10));

        app.status = StakeStatus::Staked;
        assert!(app.can_be_served());

        app.jailed = true;
        assert!(!app.can_be_served());

        app.jailed = false;
        app.status = StakeStatus::Unstaking {
            completion_height: 20,
        };
        assert!(!app.can_be_served());
    }
}
