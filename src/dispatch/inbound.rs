use std::sync::Arc;

use log::warn;

use crate::{
    lookup::BlockLookups,
    protocol::proxybound::ProxyboundPacket,
    relay::event_relay::GameplayEventRelay,
    session::channel_session::ChannelSession,
    types::UNKNOWN_BLOCK,
};

/// Routes decoded backend packets: correlated responses into the transaction
/// registry, unsolicited gameplay events into the relay.
///
/// Runs on the network-receiving context. Late or duplicate responses fall
/// through the registry as no-ops; an unrecognized frame kind is logged and
/// dropped without disturbing the channel.
pub struct InboundDispatcher {
    session: Arc<ChannelSession>,
    lookups: Arc<dyn BlockLookups>,
    relay: GameplayEventRelay,
}

impl InboundDispatcher {
    pub fn new(
        session: Arc<ChannelSession>,
        lookups: Arc<dyn BlockLookups>,
        relay: GameplayEventRelay,
    ) -> Self {
        Self {
            session,
            lookups,
            relay,
        }
    }

    pub fn dispatch(&self, packet: ProxyboundPacket) {
        let registry = self.session.registry();
        match packet {
            ProxyboundPacket::BlockId {
                transaction_id,
                block_id,
            } => {
                registry.resolve_single(transaction_id, block_id);
            }
            ProxyboundPacket::BlockData {
                transaction_id,
                block_data,
            } => {
                // Identifiers missing from the lookup table resolve as
                // unknown, same as a reported lookup failure.
                let block_id = self
                    .lookups
                    .block_state_for(&block_data)
                    .unwrap_or(UNKNOWN_BLOCK);
                registry.resolve_single(transaction_id, block_id);
            }
            ProxyboundPacket::BatchBlockId {
                transaction_id,
                blocks,
            } => {
                registry.resolve_batch(transaction_id, blocks);
            }
            ProxyboundPacket::PickBlock {
                transaction_id,
                data,
            } => {
                registry.resolve_compound(transaction_id, data);
            }
            ProxyboundPacket::BlockLookupFail { transaction_id } => {
                registry.fail_lookup(transaction_id);
            }
            ProxyboundPacket::BlockPlace { pos, block_id } => {
                self.relay.handle_block_place(pos, block_id);
            }
            ProxyboundPacket::PistonEvent {
                pos,
                block_id,
                extend,
                sticky,
                attached,
            } => {
                self.relay
                    .handle_piston_event(pos, block_id, extend, sticky, attached);
            }
            ProxyboundPacket::Unrecognized { kind } => {
                warn!("dropping side-channel frame with unrecognized kind {kind}");
            }
        }
    }
}
