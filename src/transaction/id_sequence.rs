use crate::types::TransactionId;

/// Generates transaction ids from a monotonic wrapping counter.
///
/// Uniqueness among outstanding ids is the registry's job: it advances the
/// sequence until it lands on an id with no pending entry, so a wrapped
/// counter can never collide with a request that is still in flight.
pub struct IdSequence {
    next: TransactionId,
}

impl IdSequence {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    #[cfg(test)]
    pub fn starting_at(next: TransactionId) -> Self {
        Self { next }
    }

    /// Returns the next id and advances the counter, wrapping at the integer
    /// boundary.
    pub fn advance(&mut self) -> TransactionId {
        let id = self.next;
        self.next = self.next.wrapping_add(1);
        id
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}
