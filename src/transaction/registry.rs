use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use log::{trace, warn};

use crate::{
    protocol::proxybound::CompoundTag,
    transaction::id_sequence::IdSequence,
    types::{BlockState, TransactionId, UNKNOWN_BLOCK},
};

pub type SingleContinuation = Box<dyn FnOnce(BlockState) + Send>;
pub type BatchContinuation = Box<dyn FnOnce(Vec<BlockState>) + Send>;
pub type CompoundContinuation = Box<dyn FnOnce(Option<CompoundTag>) + Send>;

/// A stored callback waiting on one outstanding transaction. All three
/// request shapes share one id space, so they live in one table behind a
/// single tag.
enum PendingContinuation {
    Single(SingleContinuation),
    Batch(BatchContinuation),
    Compound(CompoundContinuation),
}

impl PendingContinuation {
    /// Invokes the continuation with its shape's failure sentinel.
    fn resolve_failed(self) {
        match self {
            PendingContinuation::Single(resolve) => resolve(UNKNOWN_BLOCK),
            PendingContinuation::Batch(resolve) => resolve(Vec::new()),
            PendingContinuation::Compound(resolve) => resolve(None),
        }
    }
}

struct RegistryInner {
    pending: HashMap<TransactionId, PendingContinuation>,
    sequence: IdSequence,
}

/// Correlation table for in-flight side-channel requests.
///
/// Registration happens on the per-session game-loop context, resolution on
/// the network-receiving context; the table is the only state shared between
/// the two, guarded by one lock with remove-and-return semantics so a
/// register/resolve race can never double-deliver or leak an entry.
/// Resolution is consume-once: a resolved id is gone, and resolving an
/// unknown, late, or duplicate id is an expected no-op rather than an error.
pub struct TransactionRegistry {
    inner: Mutex<RegistryInner>,
}

impl TransactionRegistry {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(RegistryInner {
                pending: HashMap::new(),
                sequence: IdSequence::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RegistryInner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            // A poisoned lock only means another thread panicked mid-access;
            // the table itself is still structurally sound.
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Allocates a transaction id that no outstanding request is using.
    pub fn allocate_id(&self) -> TransactionId {
        let mut inner = self.lock();
        loop {
            let id = inner.sequence.advance();
            if !inner.pending.contains_key(&id) {
                return id;
            }
        }
    }

    pub fn register_single(
        &self,
        id: TransactionId,
        continuation: impl FnOnce(BlockState) + Send + 'static,
    ) {
        self.register(id, PendingContinuation::Single(Box::new(continuation)));
    }

    pub fn register_batch(
        &self,
        id: TransactionId,
        continuation: impl FnOnce(Vec<BlockState>) + Send + 'static,
    ) {
        self.register(id, PendingContinuation::Batch(Box::new(continuation)));
    }

    pub fn register_compound(
        &self,
        id: TransactionId,
        continuation: impl FnOnce(Option<CompoundTag>) + Send + 'static,
    ) {
        self.register(id, PendingContinuation::Compound(Box::new(continuation)));
    }

    fn register(&self, id: TransactionId, continuation: PendingContinuation) {
        let displaced = self.lock().pending.insert(id, continuation);
        if let Some(displaced) = displaced {
            // Ids come from allocate_id, so this indicates a caller bug.
            // Fail the displaced continuation rather than strand its caller.
            warn!("transaction id {id} registered twice; failing the displaced continuation");
            displaced.resolve_failed();
        }
    }

    /// Removes and invokes the single continuation for `id`, if one exists.
    /// Returns whether it did. A batch or compound entry under the same id is
    /// left untouched.
    pub fn resolve_single(&self, id: TransactionId, value: BlockState) -> bool {
        let taken = {
            let mut inner = self.lock();
            match inner.pending.get(&id) {
                Some(PendingContinuation::Single(_)) => inner.pending.remove(&id),
                _ => None,
            }
        };
        let Some(PendingContinuation::Single(resolve)) = taken else {
            trace!("no single continuation pending for transaction {id}");
            return false;
        };
        resolve(value);
        true
    }

    /// Removes and invokes the batch continuation for `id`, if one exists.
    pub fn resolve_batch(&self, id: TransactionId, values: Vec<BlockState>) -> bool {
        let taken = {
            let mut inner = self.lock();
            match inner.pending.get(&id) {
                Some(PendingContinuation::Batch(_)) => inner.pending.remove(&id),
                _ => None,
            }
        };
        let Some(PendingContinuation::Batch(resolve)) = taken else {
            trace!("no batch continuation pending for transaction {id}");
            return false;
        };
        resolve(values);
        true
    }

    /// Removes and invokes the compound continuation for `id`, if one exists.
    pub fn resolve_compound(&self, id: TransactionId, value: Option<CompoundTag>) -> bool {
        let taken = {
            let mut inner = self.lock();
            match inner.pending.get(&id) {
                Some(PendingContinuation::Compound(_)) => inner.pending.remove(&id),
                _ => None,
            }
        };
        let Some(PendingContinuation::Compound(resolve)) = taken else {
            trace!("no compound continuation pending for transaction {id}");
            return false;
        };
        resolve(value);
        true
    }

    /// Resolves the continuation for `id` with its failure sentinel: an
    /// unknown-block id for a single lookup, an empty sequence for a batch,
    /// `None` for a compound. The backend does not say which shape failed,
    /// so the stored shape decides. An id with no pending entry is dropped
    /// silently.
    pub fn fail_lookup(&self, id: TransactionId) {
        let taken = self.lock().pending.remove(&id);
        match taken {
            Some(continuation) => continuation.resolve_failed(),
            None => trace!("lookup failure for unknown transaction {id} dropped"),
        }
    }

    /// Removes the continuation for `id` without invoking it. Used by the
    /// bridge's timeout path, after which the late response resolves as an
    /// inert no-op. Returns whether an entry existed.
    pub fn discard(&self, id: TransactionId) -> bool {
        self.lock().pending.remove(&id).is_some()
    }

    /// Fails every pending continuation. Called on channel teardown so no
    /// caller stays blocked past the end of the session.
    pub fn drop_all(&self) {
        let drained: Vec<PendingContinuation> = {
            let mut inner = self.lock();
            inner.pending.drain().map(|(_, c)| c).collect()
        };
        for continuation in drained {
            continuation.resolve_failed();
        }
    }

    pub fn pending_count(&self) -> usize {
        self.lock().pending.len()
    }

    #[cfg(test)]
    fn set_next_id(&self, id: TransactionId) {
        self.lock().sequence = IdSequence::starting_at(id);
    }
}

impl Default for TransactionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::*;

    #[test]
    fn resolve_consumes_the_continuation() {
        let registry = TransactionRegistry::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let calls_clone = calls.clone();
        registry.register_single(7, move |value| {
            assert_eq!(value, 42);
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert!(registry.resolve_single(7, 42));
        assert!(!registry.resolve_single(7, 42));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn wrong_shape_resolve_leaves_entry_pending() {
        let registry = TransactionRegistry::new();
        registry.register_batch(3, |_| {});

        assert!(!registry.resolve_single(3, 1));
        assert_eq!(registry.pending_count(), 1);
        assert!(registry.resolve_batch(3, vec![1]));
    }

    #[test]
    fn allocate_skips_pending_ids_across_wraparound() {
        let registry = TransactionRegistry::new();
        registry.register_single(0, |_| {});

        // Place the counter at the wrap point; after issuing MAX it must
        // skip the still-pending id 0 and land on 1.
        registry.set_next_id(TransactionId::MAX);
        assert_eq!(registry.allocate_id(), TransactionId::MAX);
        assert_eq!(registry.allocate_id(), 1);
    }

    #[test]
    fn discard_makes_late_resolve_inert() {
        let registry = TransactionRegistry::new();
        registry.register_single(11, |_| panic!("discarded continuation must not run"));

        assert!(registry.discard(11));
        assert!(!registry.resolve_single(11, 5));
    }
}
