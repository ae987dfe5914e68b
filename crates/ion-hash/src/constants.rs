//! Sentinel bytes and TQ (type/qualifier) constants fixed by the Ion Hash
//! wire-level canonical form. See spec §4.1.

use crate::model::IonType;

/// Begin-marker byte: brackets every hashed unit on its left.
pub const BEGIN_MARKER: u8 = 0x0B;
/// End-marker byte: brackets every hashed unit on its right.
pub const END_MARKER: u8 = 0x0E;
/// Escape byte: precedes any begin/end/escape byte found inside a
/// representation so framing can never be confused with payload data.
pub const ESCAPE_BYTE: u8 = 0x0C;

/// TQ byte for an annotation wrapper: `B TQ_ANNOTATED_VALUE <annotations> <value> E`.
pub const TQ_ANNOTATED_VALUE: u8 = 0xE0;

/// TQ byte for a symbol token whose SID is 0 (the unknown symbol).
pub const TQ_SYMBOL_SID0: u8 = 0x71;

/// Returns the upper-nibble TQ byte associated with an Ion type.
pub const fn tq_for_type(ion_type: IonType) -> u8 {
    match ion_type {
        IonType::Null => 0x0F,
        IonType::Bool => 0x10,
        IonType::Int => 0x20,
        IonType::Float => 0x40,
        IonType::Decimal => 0x50,
        IonType::Timestamp => 0x60,
        IonType::Symbol => 0x70,
        IonType::String => 0x80,
        IonType::Clob => 0x90,
        IonType::Blob => 0xA0,
        IonType::List => 0xB0,
        IonType::Sexp => 0xC0,
        IonType::Struct => 0xD0,
    }
}

/// TQ byte for the typed null of `ion_type` (e.g. `null.int`).
pub const fn tq_for_null(ion_type: IonType) -> u8 {
    tq_for_type(ion_type) | tq_for_type(IonType::Null)
}
