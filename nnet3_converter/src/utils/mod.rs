//! Shared primitive types used by the lexical layer, the value readers and logging.

pub mod position;

pub use position::Position;
