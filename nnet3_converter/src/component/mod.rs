//! Component IR: variants, attribute tables, the record and its read loop

pub mod attributes;
pub mod kind;
pub mod record;
pub mod synthesized;

pub use attributes::{AttributeKey, AttributeRule, AttributeTable, PROMOTED_KEYS};
pub use kind::ComponentKind;
pub use record::Component;
