use std::sync::{Arc, Mutex, MutexGuard};

use log::debug;
use uuid::Uuid;

use crate::{
    protocol::backendbound::BackendboundPacket,
    session::{error::SessionError, transport::BackendSender},
    transaction::registry::TransactionRegistry,
    types::TransactionId,
};

/// Lifecycle of a channel session. Binding is only legal from `Unbound` or,
/// for a reconnect, from `Closed`; sending is only legal while `Bound`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Unbound,
    Bound,
    Closed,
}

impl Lifecycle {
    fn name(&self) -> &'static str {
        match self {
            Lifecycle::Unbound => "Unbound",
            Lifecycle::Bound => "Bound",
            Lifecycle::Closed => "Closed",
        }
    }
}

struct SessionInner {
    lifecycle: Lifecycle,
    transport: Option<Arc<dyn BackendSender>>,
}

/// One player session's side channel to the backend.
///
/// Owns the transport handle, its open/close lifecycle, and the transaction
/// registry. The synchronous bridge and the inbound dispatcher both reach
/// the registry through here; neither touches the correlation tables
/// directly, so the registry's register/resolve contract is the single set
/// of mutation rules even though two execution contexts use it.
pub struct ChannelSession {
    registry: TransactionRegistry,
    inner: Mutex<SessionInner>,
}

impl ChannelSession {
    /// Creates a new session in the `Unbound` state.
    pub fn new() -> Self {
        Self {
            registry: TransactionRegistry::new(),
            inner: Mutex::new(SessionInner {
                lifecycle: Lifecycle::Unbound,
                transport: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn registry(&self) -> &TransactionRegistry {
        &self.registry
    }

    /// Allocates a transaction id for the next outbound request. All three
    /// request shapes draw from this one id space.
    pub fn next_transaction_id(&self) -> TransactionId {
        self.registry.allocate_id()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lock().lifecycle
    }

    pub fn is_bound(&self) -> bool {
        self.lifecycle() == Lifecycle::Bound
    }

    /// Attaches a transport and performs the handshake, transitioning the
    /// session to `Bound`. Binding while already bound is an error; binding
    /// again after a `close` starts a fresh channel over the drained
    /// registry. A handshake send failure leaves the channel closed.
    ///
    /// The handshake goes out while the state lock is held and the session
    /// only becomes `Bound` afterward, so a concurrent `send` cannot put a
    /// request packet on the wire ahead of `Initialize`.
    pub fn bind(
        &self,
        transport: Arc<dyn BackendSender>,
        player_uuid: Uuid,
    ) -> Result<(), SessionError> {
        {
            let mut inner = self.lock();
            if inner.lifecycle == Lifecycle::Bound {
                return Err(SessionError::AlreadyBound);
            }

            if let Err(error) = transport.send(BackendboundPacket::Initialize { player_uuid }) {
                inner.lifecycle = Lifecycle::Closed;
                drop(inner);
                transport.close();
                self.registry.drop_all();
                return Err(error.into());
            }

            inner.transport = Some(transport);
            inner.lifecycle = Lifecycle::Bound;
        }

        debug!("side channel bound for player {player_uuid}");
        Ok(())
    }

    /// Sends a packet to the backend. Valid only while `Bound`; an unbound
    /// or closed channel fails fast so the bridge can fall back instead of
    /// hanging.
    pub fn send(&self, packet: BackendboundPacket) -> Result<(), SessionError> {
        let transport = {
            let inner = self.lock();
            match inner.lifecycle {
                Lifecycle::Bound => inner.transport.clone(),
                state => {
                    return Err(SessionError::ChannelUnavailable {
                        state: state.name(),
                    })
                }
            }
        };
        let Some(transport) = transport else {
            return Err(SessionError::ChannelUnavailable { state: "Bound" });
        };
        transport.send(packet)?;
        Ok(())
    }

    /// Transitions to `Closed`, releases the transport, and fails every
    /// pending continuation so no caller stays blocked past teardown.
    /// Idempotent; closing an unbound session is a no-op apart from the
    /// state change.
    pub fn close(&self) {
        let transport = {
            let mut inner = self.lock();
            inner.lifecycle = Lifecycle::Closed;
            inner.transport.take()
        };
        if let Some(transport) = transport {
            transport.close();
        }
        self.registry.drop_all();
    }
}

impl Default for ChannelSession {
    fn default() -> Self {
        Self::new()
    }
}
