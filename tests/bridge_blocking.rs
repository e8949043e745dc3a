/// End-to-end tests for the synchronous bridge: blocking round trips through
/// a loopback backend, timeout expiry, fallback routing, and teardown
/// unblocking.
use std::{
    sync::{Arc, Mutex},
    thread,
    time::Duration,
};

use crossbeam::channel::{unbounded, Sender};
use uuid::Uuid;

use erosion_link::{
    BackendSender, BackendboundPacket, BlockLookups, BlockPos, BlockRegion, BlockState,
    BridgeConfig, BridgeError, ChannelSession, ClientEffectPacket, ClientPacketSink, CompoundTag,
    Direction, GameplayEventRelay, InboundDispatcher, ProxyboundPacket, SessionExecutor,
    SessionState, SessionTask, TransportError, WorldBridge, WorldSource, UNKNOWN_BLOCK,
};

struct ChannelTransport {
    outbound: Sender<BackendboundPacket>,
}

impl BackendSender for ChannelTransport {
    fn send(&self, packet: BackendboundPacket) -> Result<(), TransportError> {
        self.outbound
            .send(packet)
            .map_err(|_| TransportError::Disconnected {
                reason: "backend hung up".to_string(),
            })
    }

    fn close(&self) {}
}

struct TableLookups;

impl BlockLookups for TableLookups {
    fn block_state_for(&self, block_data: &str) -> Option<BlockState> {
        match block_data {
            "minecraft:stone" => Some(1),
            _ => None,
        }
    }

    fn piston_orientation(&self, _block_id: BlockState) -> Direction {
        Direction::East
    }

    fn can_piston_move(&self, _block_id: BlockState, _extend: bool) -> bool {
        true
    }

    fn client_block_id(&self, block_id: BlockState) -> i32 {
        block_id + 1000
    }
}

struct InlineExecutor {
    state: Mutex<SessionState>,
}

impl SessionExecutor for InlineExecutor {
    fn execute(&self, task: SessionTask) {
        task(&mut self.state.lock().unwrap());
    }
}

struct NullSink;

impl ClientPacketSink for NullSink {
    fn send(&self, _packet: ClientEffectPacket) {}
}

fn state_sum(pos: BlockPos) -> BlockState {
    pos.x + pos.y + pos.z
}

/// Binds a session to a loopback backend thread that answers every request
/// with deterministic values derived from the request position(s).
fn bound_session_with_backend() -> Arc<ChannelSession> {
    let session = Arc::new(ChannelSession::new());
    let (outbound, inbound) = unbounded();
    session
        .bind(Arc::new(ChannelTransport { outbound }), Uuid::new_v4())
        .unwrap();

    let executor = Arc::new(InlineExecutor {
        state: Mutex::new(SessionState::new()),
    });
    let relay = GameplayEventRelay::new(executor, Arc::new(NullSink), Arc::new(TableLookups));
    let dispatcher = InboundDispatcher::new(session.clone(), Arc::new(TableLookups), relay);

    thread::spawn(move || {
        while let Ok(packet) = inbound.recv() {
            match packet {
                BackendboundPacket::Initialize { .. } => {}
                BackendboundPacket::BlockRequest {
                    transaction_id,
                    pos,
                } => dispatcher.dispatch(ProxyboundPacket::BlockId {
                    transaction_id,
                    block_id: state_sum(pos),
                }),
                BackendboundPacket::BatchBlockRequest {
                    transaction_id,
                    region,
                } => dispatcher.dispatch(ProxyboundPacket::BatchBlockId {
                    transaction_id,
                    blocks: region.iter().map(state_sum).collect(),
                }),
                BackendboundPacket::PickBlockRequest { transaction_id, .. } => {
                    dispatcher.dispatch(ProxyboundPacket::PickBlock {
                        transaction_id,
                        data: Some(CompoundTag(vec![1, 2, 3])),
                    })
                }
            }
        }
    });

    session
}

/// Binds a session to a transport that accepts sends but never answers.
fn bound_session_with_silent_backend() -> Arc<ChannelSession> {
    let session = Arc::new(ChannelSession::new());
    let (outbound, inbound) = unbounded();
    // Keep the receiving side alive so sends keep succeeding.
    std::mem::forget(inbound);
    session
        .bind(Arc::new(ChannelTransport { outbound }), Uuid::new_v4())
        .unwrap();
    session
}

struct FixedWorld {
    block: BlockState,
}

impl WorldSource for FixedWorld {
    fn block_at(&self, _pos: BlockPos) -> BlockState {
        self.block
    }

    fn blocks_at(&self, region: &BlockRegion) -> Vec<BlockState> {
        vec![self.block; region.len()]
    }

    fn pick_block_data(&self, _pos: BlockPos) -> Option<CompoundTag> {
        None
    }
}

#[test]
fn block_at_round_trips_through_the_backend() {
    let session = bound_session_with_backend();
    let bridge = WorldBridge::new(session, None, BridgeConfig::default());

    assert_eq!(bridge.block_at(BlockPos::new(1, 2, 3)), Ok(6));
}

#[test]
fn blocks_at_mirrors_region_order() {
    let session = bound_session_with_backend();
    let bridge = WorldBridge::new(session, None, BridgeConfig::default());

    let region = BlockRegion::new(BlockPos::new(0, 0, 0), 3, 1, 1);
    let expected: Vec<BlockState> = region.iter().map(state_sum).collect();

    assert_eq!(bridge.blocks_at(&region), Ok(expected));
}

#[test]
fn pick_block_handle_resolves_without_blocking_the_caller() {
    let session = bound_session_with_backend();
    let bridge = WorldBridge::new(session, None, BridgeConfig::default());

    let handle = bridge.pick_block_data(BlockPos::new(0, 64, 0)).unwrap();
    let result = handle.wait_timeout(Duration::from_secs(5)).unwrap();

    assert_eq!(result, Some(CompoundTag(vec![1, 2, 3])));
}

#[test]
fn timed_out_lookup_resolves_as_unknown_and_clears_the_registry() {
    let session = bound_session_with_silent_backend();
    let config = BridgeConfig {
        request_timeout: Duration::from_millis(50),
    };
    let bridge = WorldBridge::new(session.clone(), None, config);

    assert_eq!(bridge.block_at(BlockPos::new(0, 0, 0)), Ok(UNKNOWN_BLOCK));
    // The timed-out registration was discarded; a late response is inert.
    assert_eq!(session.registry().pending_count(), 0);
}

#[test]
fn timed_out_batch_lookup_resolves_as_empty() {
    let session = bound_session_with_silent_backend();
    let config = BridgeConfig {
        request_timeout: Duration::from_millis(50),
    };
    let bridge = WorldBridge::new(session.clone(), None, config);

    let region = BlockRegion::new(BlockPos::new(0, 0, 0), 2, 2, 2);
    assert_eq!(bridge.blocks_at(&region), Ok(Vec::new()));
    assert_eq!(session.registry().pending_count(), 0);
}

#[test]
fn unbound_session_routes_to_the_fallback_source() {
    let session = Arc::new(ChannelSession::new());
    let fallback = Arc::new(FixedWorld { block: 77 });
    let bridge = WorldBridge::new(session, Some(fallback), BridgeConfig::default());

    assert_eq!(bridge.block_at(BlockPos::new(0, 0, 0)), Ok(77));

    let region = BlockRegion::new(BlockPos::new(0, 0, 0), 2, 1, 1);
    assert_eq!(bridge.blocks_at(&region), Ok(vec![77, 77]));
}

#[test]
fn unbound_session_without_fallback_reports_no_backend() {
    let session = Arc::new(ChannelSession::new());
    let bridge = WorldBridge::new(session, None, BridgeConfig::default());

    assert_eq!(
        bridge.block_at(BlockPos::new(0, 0, 0)),
        Err(BridgeError::NoBackend)
    );
}

#[test]
fn closing_the_channel_unblocks_a_waiting_caller() {
    let session = bound_session_with_silent_backend();
    let bridge = WorldBridge::new(session.clone(), None, BridgeConfig::default());

    let waiter = thread::spawn(move || bridge.block_at(BlockPos::new(0, 0, 0)));

    // Give the waiter time to register and block, then tear down.
    thread::sleep(Duration::from_millis(100));
    session.close();

    assert_eq!(waiter.join().unwrap(), Ok(UNKNOWN_BLOCK));
}

#[test]
fn pick_block_falls_back_when_unbound() {
    let session = Arc::new(ChannelSession::new());
    let fallback = Arc::new(FixedWorld { block: 1 });
    let bridge = WorldBridge::new(session, Some(fallback), BridgeConfig::default());

    let handle = bridge.pick_block_data(BlockPos::new(0, 0, 0)).unwrap();
    assert_eq!(handle.try_take(), Some(None));
}
