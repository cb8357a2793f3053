//! Enumerations shared across the block decoders.

mod enums;

pub use enums::{BlockType, ScopeType, VarDir, VarType};
