//! A content-addressed, canonical cryptographic hash over values encoded
//! in the Amazon Ion data model.
//!
//! This crate implements the normalization and hash-composition engine:
//! given a stream of typed value events (or a fully materialized
//! [`model::Value`] tree), it produces a fixed-length digest such that
//! semantically equal Ion values yield identical digests regardless of
//! surface form, field ordering inside structs, or incidental
//! serialization choices.
//!
//! What this crate does *not* do (by design, see the module-level docs of
//! each piece for the rationale): read or write real Ion text/binary,
//! implement a cryptographic hash primitive, or resolve symbol tables.
//! Those are external collaborators; see [`provider::HashFunctionProvider`]
//! for the one boundary this crate depends on.

pub mod adapter;
pub mod codec;
pub mod comparator;
pub mod constants;
pub mod driver;
pub mod error;
pub mod frame;
pub mod model;
pub mod provider;

pub use driver::HashDriver;
pub use error::{IonHashError, IonHashResult};
pub use model::{AnnotatedValue, Event, EventKind, IonType, SymbolToken, Value};
pub use provider::{DigestHashFunctionProvider, HashAccumulator, HashFunctionProvider};

/// Hashes a fully materialized [`Value`] tree in one shot, driving the
/// incremental event API internally.
///
/// Grounded on the real `amazon-ion/ion-hash` crate's
/// `IonHasher::hash_element` one-shot helper (see
/// `other_examples/02fdaed6_..._ion_hash_tests.rs.rs`), which offers the
/// same convenience over a materialized `Element` tree instead of a raw
/// event stream.
pub fn hash_value<P: HashFunctionProvider>(
    value: &AnnotatedValue,
    provider: P,
) -> IonHashResult<Vec<u8>> {
    let mut driver = HashDriver::new(provider);
    drive_value(&mut driver, value, None, 0)?;
    driver.digest()
}

fn drive_value<P: HashFunctionProvider>(
    driver: &mut HashDriver<P>,
    value: &AnnotatedValue,
    field_name: Option<SymbolToken>,
    depth: usize,
) -> IonHashResult<()> {
    match &value.value {
        Value::Null(ion_type) => {
            let event = Event::scalar(*ion_type, None, depth)
                .with_annotations(value.annotations.clone())
                .with_field_name(field_name);
            driver.scalar(&event)
        }
        Value::Scalar { ion_type, bytes } => {
            let event = Event::scalar(*ion_type, Some(bytes.clone()), depth)
                .with_annotations(value.annotations.clone())
                .with_field_name(field_name);
            driver.scalar(&event)
        }
        Value::Sequence { ion_type, elements } => {
            let start = Event::container_start(*ion_type, depth)
                .with_annotations(value.annotations.clone())
                .with_field_name(field_name);
            driver.step_in(&start)?;
            for element in elements {
                drive_value(driver, element, None, depth + 1)?;
            }
            driver.step_out()
        }
        Value::Struct { fields } => {
            let start = Event::container_start(IonType::Struct, depth)
                .with_annotations(value.annotations.clone())
                .with_field_name(field_name);
            driver.step_in(&start)?;
            for (name, field_value) in fields {
                drive_value(driver, field_value, Some(name.clone()), depth + 1)?;
            }
            driver.step_out()
        }
    }
}
