//! # Erosion Link
//! Side channel letting a protocol-translation proxy, which holds no
//! authoritative world data, query block state and container data from a
//! separate backend process while presenting a synchronous, blocking API to
//! the proxy's per-player game logic.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod bridge;
mod dispatch;
mod lookup;
mod protocol;
mod relay;
mod session;
mod transaction;
mod types;

pub use bridge::{
    error::BridgeError,
    pick_block::{PickBlockHandle, PickBlockResult},
    world_bridge::{BridgeConfig, WorldBridge},
    world_source::WorldSource,
};
pub use dispatch::inbound::InboundDispatcher;
pub use lookup::BlockLookups;
pub use protocol::{
    backendbound::BackendboundPacket,
    position::BlockPos,
    proxybound::{CompoundTag, ProxyboundPacket},
    region::{BlockRegion, BlockRegionIter},
};
pub use relay::{
    event_relay::GameplayEventRelay,
    executor::{SessionExecutor, SessionTask},
    piston::{PistonAction, PistonMotionState},
    session_state::SessionState,
    sink::{ClientEffectPacket, ClientPacketSink},
};
pub use session::{
    channel_session::{ChannelSession, Lifecycle},
    error::{SessionError, TransportError},
    transport::BackendSender,
};
pub use transaction::registry::{
    BatchContinuation, CompoundContinuation, SingleContinuation, TransactionRegistry,
};
pub use types::{BlockState, Direction, TransactionId, UNKNOWN_BLOCK};
