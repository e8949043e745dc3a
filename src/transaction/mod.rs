pub mod id_sequence;
pub mod registry;
