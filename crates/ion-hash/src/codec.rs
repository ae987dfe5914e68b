//! Canonical byte encoding: the escape rule and the TQ/representation
//! split. Grounded on `_escape`, `_scalar_or_null_split_parts`, and
//! `_get_length_length` in `ionhash/hasher.py`.

use crate::constants::{tq_for_null, tq_for_type, ESCAPE_BYTE, TQ_SYMBOL_SID0};
use crate::error::{IonHashError, IonHashResult};
use crate::model::{IonType, SymbolToken};

/// If `bytes` contains any begin/end/escape byte, returns a copy with each
/// one preceded by a single escape byte. Otherwise returns a borrowed copy
/// of the input unchanged (no reallocation in the common case of
/// `bytes` containing none of the sentinel bytes would require a `Cow`;
/// this crate favors the simpler, always-owning signature the way
/// `_escape` in the original does, at the cost of one allocation per
/// call).
pub fn escape(bytes: &[u8]) -> Vec<u8> {
    use crate::constants::{BEGIN_MARKER, END_MARKER};

    let needs_escaping = bytes
        .iter()
        .any(|&b| b == BEGIN_MARKER || b == END_MARKER || b == ESCAPE_BYTE);
    if !needs_escaping {
        return bytes.to_vec();
    }

    let mut out = Vec::with_capacity(bytes.len() + 4);
    for &b in bytes {
        if b == BEGIN_MARKER || b == END_MARKER || b == ESCAPE_BYTE {
            out.push(ESCAPE_BYTE);
        }
        out.push(b);
    }
    out
}

/// Counts the bytes occupied by an Ion binary value's `length` field: if
/// the low nibble of the first byte is `0x0E` ("length follows as a
/// VarUInt"), scans forward for the first byte with its high bit set and
/// returns that index; otherwise returns 0 (the length is encoded in the
/// low nibble itself, or there is no representation).
fn length_of_length(bytes: &[u8]) -> IonHashResult<usize> {
    if bytes.is_empty() {
        return Ok(0);
    }
    if bytes[0] & 0x0F == 0x0E {
        for (i, &b) in bytes.iter().enumerate().skip(1) {
            if b & 0x80 != 0 {
                return Ok(i);
            }
        }
        return Err(IonHashError::MalformedScalarEncoding);
    }
    Ok(0)
}

/// Splits the Ion-binary encoding of a scalar (or symbol token) into its
/// canonical `(tq, representation)` pair per spec §4.1: the TQ byte has its
/// low nibble zeroed unless `ion_type` is `Bool` or `Symbol`, or the byte
/// is already a null marker (low nibble `0x0F`).
pub fn split_tq_and_representation(
    ion_type: IonType,
    bytes: &[u8],
) -> IonHashResult<(u8, Vec<u8>)> {
    if bytes.is_empty() {
        return Err(IonHashError::MalformedScalarEncoding);
    }
    let length_count = length_of_length(bytes)?;
    let offset = 1 + length_count;
    let representation = bytes.get(offset..).unwrap_or(&[]).to_vec();

    let mut tq = bytes[0];
    let is_null_marker = tq & 0x0F == 0x0F;
    if !matches!(ion_type, IonType::Bool | IonType::Symbol) && !is_null_marker {
        tq &= 0xF0;
    }

    Ok((tq, representation))
}

/// The one-byte encoding of a typed null: `TQ(ion_type) | TQ(Null)`.
pub fn encode_null(ion_type: IonType) -> Vec<u8> {
    vec![tq_for_null(ion_type)]
}

/// Encodes a symbol token per spec §4.1: SID 0 is a single
/// `TQ_SYMBOL_SID0` byte; otherwise it's `TQ(Symbol)` followed by the
/// token's UTF-8 text.
///
/// A bare SID (no resolved text) other than 0 has no canonical text form
/// available to this crate (symbol table resolution is a reader concern);
/// callers are expected to resolve symbol text before constructing
/// events, same as `ion-rs`'s own hashing support requires a resolved
/// `SymbolToken`.
pub fn encode_symbol_token(token: &SymbolToken) -> Vec<u8> {
    if token.is_sid_zero() {
        return vec![TQ_SYMBOL_SID0];
    }
    let mut out = vec![tq_for_type(IonType::Symbol)];
    match token {
        SymbolToken::Text(text) => out.extend_from_slice(text.as_bytes()),
        SymbolToken::Sid(sid) => out.extend_from_slice(sid.to_string().as_bytes()),
    }
    out
}
