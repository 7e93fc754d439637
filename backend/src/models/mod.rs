//! Zoo records and the enumerations they are built from.
//!
//! Relations are stored as foreign keys on the child record (an animal knows
//! its category, enclosure and zoo; an enclosure knows its zoo). The id lists
//! on [`Category`], [`Enclosure`] and [`Zoo`] are derived when the record is
//! read and are never stored on their own.

pub mod macros;

pub mod animal;
pub mod category;
pub mod enclosure;
pub mod enums;
pub mod ids;
pub mod zoo;

pub use animal::*;
pub use category::*;
pub use enclosure::*;
pub use enums::*;
pub use ids::*;
pub use zoo::*;

use serde::Serialize;

/// One entry of an enumeration's option table, as served to select lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnumOption {
    /// Stored integer value
    pub value: i32,
    /// Wire name (what JSON bodies carry)
    pub name: &'static str,
    /// Human-readable label
    pub label: &'static str,
}
