pub mod error;
pub mod pick_block;
pub mod world_bridge;
pub mod world_source;
