//! Per-session accrual of service proofs.
//!
//! Every session a node serves gets one [`RelayBatch`], created with the first proof accepted for
//! it. A batch never holds more than its cap and never holds two proofs with the same
//! [`ProofId`]. Batches are owned by [`ProofBatches`], which is the only way to mutate them.

use std::{
    collections::{hash_map::Entry, HashMap, HashSet},
    fmt,
    sync::Arc,
};

use parking_lot::{Mutex, RwLock};
use relay_primitives::prelude::{
    BlockHeight, Blockchain, ErrorKind, ProofId, PublicKey, ServiceProof, SessionBlockId,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while accruing a proof.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    /// The session's batch already holds its maximum number of proofs.
    #[error("batch is full ({max_relays} relays)")]
    BatchFull {
        /// The cap of the batch.
        max_relays: u64,
    },

    /// A proof with the same identity was already accepted for the session.
    #[error("duplicate proof {0}")]
    DuplicateProof(ProofId),
}

impl BatchError {
    /// Returns the stable classification of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            BatchError::BatchFull { .. } => ErrorKind::BatchFull,
            BatchError::DuplicateProof(_) => ErrorKind::DuplicateProof,
        }
    }
}

/// The result type for batch operations.
pub type BatchResult<T> = Result<T, BatchError>;

/// Identifies the session a proof was earned in, from the point of view of the serving node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionKey {
    /// The block that opened the session.
    pub session_block_id: SessionBlockId,

    /// The height of that block.
    pub session_block_height: BlockHeight,

    /// The application served in the session.
    pub client: PublicKey,

    /// The blockchain served in the session.
    pub blockchain: Blockchain,

    /// The node serving the session.
    pub servicer: PublicKey,
}

impl SessionKey {
    /// Derives the key of the session `proof` was earned in.
    ///
    /// The height and servicer are taken from the proof, so callers must only pass proofs that
    /// validated against this node and the session opened at `session_block_id`.
    pub fn new(proof: &ServiceProof, session_block_id: SessionBlockId) -> Self {
        Self {
            session_block_id,
            session_block_height: proof.session_block_height,
            client: proof.client,
            blockchain: proof.blockchain.clone(),
            servicer: proof.servicer,
        }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}/{}/{}/{}",
            self.session_block_id,
            self.session_block_height,
            self.client,
            self.blockchain,
            self.servicer
        )
    }
}

/// The proofs accepted for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayBatch {
    key: SessionKey,
    max_relays: u64,
    proofs: Vec<ServiceProof>,
    ids: HashSet<ProofId>,
}

impl RelayBatch {
    fn new(key: SessionKey, max_relays: u64) -> Self {
        Self {
            key,
            max_relays,
            proofs: Vec::new(),
            ids: HashSet::new(),
        }
    }

    /// Returns the session of this batch.
    pub const fn key(&self) -> &SessionKey {
        &self.key
    }

    /// Returns the cap of this batch, fixed when the batch was created.
    pub const fn max_relays(&self) -> u64 {
        self.max_relays
    }

    /// Returns the accepted proofs in the order they were accepted.
    pub fn proofs(&self) -> &[ServiceProof] {
        &self.proofs
    }

    /// Returns the number of accepted proofs.
    pub fn len(&self) -> usize {
        self.proofs.len()
    }

    /// Returns `true` if no proof was accepted.
    pub fn is_empty(&self) -> bool {
        self.proofs.is_empty()
    }

    /// Returns `true` if the batch cannot accept more proofs.
    pub fn is_full(&self) -> bool {
        self.proofs.len() as u64 >= self.max_relays
    }

    /// Returns `true` if a proof with identity `id` was accepted.
    pub fn contains(&self, id: &ProofId) -> bool {
        self.ids.contains(id)
    }

    fn check(&self, id: &ProofId) -> BatchResult<()> {
        if self.is_full() {
            return Err(BatchError::BatchFull {
                max_relays: self.max_relays,
            });
        }

        if self.contains(id) {
            return Err(BatchError::DuplicateProof(*id));
        }

        Ok(())
    }

    fn push(&mut self, proof: ServiceProof) -> BatchResult<usize> {
        let id = proof.id();
        self.check(&id)?;

        self.ids.insert(id);
        self.proofs.push(proof);

        Ok(self.proofs.len())
    }
}

/// A snapshot of a batch for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// The session of the batch.
    pub key: SessionKey,

    /// The number of accepted proofs.
    pub proofs: usize,

    /// The cap of the batch.
    pub max_relays: u64,
}

impl From<&RelayBatch> for BatchSummary {
    fn from(batch: &RelayBatch) -> Self {
        Self {
            key: batch.key.clone(),
            proofs: batch.len(),
            max_relays: batch.max_relays,
        }
    }
}

type BatchMap = HashMap<SessionKey, Mutex<RelayBatch>>;

/// The registry of all proof batches of this node.
///
/// Clones share the same batches. The map lock is only held for writing to insert or remove whole
/// batches, so accruing proofs for different sessions does not contend.
#[derive(Debug, Clone, Default)]
pub struct ProofBatches {
    batches: Arc<RwLock<BatchMap>>,
}

impl ProofBatches {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts `proof` into the batch of its session, creating the batch with cap `max_relays`
    /// if it does not exist yet.
    ///
    /// Returns the number of proofs in the batch after insertion.
    pub fn add_proof(
        &self,
        proof: ServiceProof,
        session_block_id: SessionBlockId,
        max_relays: u64,
    ) -> BatchResult<usize> {
        let key = SessionKey::new(&proof, session_block_id);

        {
            let batches = self.batches.read();
            if let Some(batch) = batches.get(&key) {
                return batch.lock().push(proof);
            }
        }

        // The batch is built and filled before it is published so that no reader ever sees an
        // empty batch.
        let mut batches = self.batches.write();
        match batches.entry(key) {
            Entry::Occupied(entry) => entry.into_mut().get_mut().push(proof),
            Entry::Vacant(entry) => {
                let mut batch = RelayBatch::new(entry.key().clone(), max_relays);
                let len = batch.push(proof)?;

                debug!(session = %entry.key(), %max_relays, "created relay batch");
                entry.insert(Mutex::new(batch));

                Ok(len)
            }
        }
    }

    /// Checks whether [`Self::add_proof`] would currently accept `proof`, without accepting it.
    pub fn precheck(
        &self,
        proof: &ServiceProof,
        session_block_id: SessionBlockId,
        max_relays: u64,
    ) -> BatchResult<()> {
        let key = SessionKey::new(proof, session_block_id);
        let batches = self.batches.read();

        match batches.get(&key) {
            Some(batch) => batch.lock().check(&proof.id()),
            None if max_relays == 0 => Err(BatchError::BatchFull { max_relays }),
            None => Ok(()),
        }
    }

    /// Returns the number of proofs accepted for the session.
    pub fn proof_count(&self, key: &SessionKey) -> usize {
        self.batches
            .read()
            .get(key)
            .map_or(0, |batch| batch.lock().len())
    }

    /// Returns a copy of the batch of the session.
    pub fn batch(&self, key: &SessionKey) -> Option<RelayBatch> {
        self.batches
            .read()
            .get(key)
            .map(|batch| batch.lock().clone())
    }

    /// Returns a copy of every batch ordered by session.
    pub fn batches(&self) -> Vec<RelayBatch> {
        let mut batches: Vec<_> = self
            .batches
            .read()
            .values()
            .map(|batch| batch.lock().clone())
            .collect();
        batches.sort_by(|a, b| a.key.cmp(&b.key));

        batches
    }

    /// Summarizes every batch ordered by session.
    pub fn summary(&self) -> Vec<BatchSummary> {
        let mut summary: Vec<_> = self
            .batches
            .read()
            .values()
            .map(|batch| BatchSummary::from(&*batch.lock()))
            .collect();
        summary.sort_by(|a, b| a.key.cmp(&b.key));

        summary
    }

    /// Returns the number of sessions with a batch.
    pub fn len(&self) -> usize {
        self.batches.read().len()
    }

    /// Returns `true` if there are no batches.
    pub fn is_empty(&self) -> bool {
        self.batches.read().is_empty()
    }

    /// Removes and returns the batch of the session.
    pub fn remove(&self, key: &SessionKey) -> Option<RelayBatch> {
        self.batches
            .write()
            .remove(key)
            .map(Mutex::into_inner)
    }

    /// Removes and returns every batch of sessions opened below `height`, ordered by session.
    pub fn evict_before(&self, height: BlockHeight) -> Vec<RelayBatch> {
        let mut batches = self.batches.write();

        let expired: Vec<_> = batches
            .keys()
            .filter(|key| key.session_block_height < height)
            .cloned()
            .collect();

        let mut evicted: Vec<_> = expired
            .iter()
            .filter_map(|key| batches.remove(key))
            .map(Mutex::into_inner)
            .collect();
        evicted.sort_by(|a, b| a.key.cmp(&b.key));

        if !evicted.is_empty() {
            info!(count = evicted.len(), %height, "evicted relay batches");
        }

        evicted
    }
}
