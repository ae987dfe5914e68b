//! Per-container serializer frames: the `Frame` sum type spec §9 suggests
//! as an alternative expression of the original's `_Serializer`/
//! `_StructSerializer` class hierarchy (`ionhash/hasher.py`).
//!
//! A [`Frame`] owns a (possibly shared) hash accumulator and knows how to
//! fold a `scalar`/`step_in`/`step_out` event into it.
//! [`crate::driver::HashDriver`] owns a stack of these and routes events
//! to the top one.
//!
//! Non-struct containers share their accumulator with their children (list
//! and sexp element order is already significant, so there's no need to
//! isolate children); the driver arranges this by cloning an `Rc` rather
//! than creating a fresh accumulator. A plain [`Acc`] value can't be
//! shared this way in Rust the way a Python object reference can, so each
//! frame holds `Rc<RefCell<Acc>>` instead.

use std::cell::RefCell;
use std::rc::Rc;

use crate::codec;
use crate::constants::{tq_for_type, BEGIN_MARKER, END_MARKER, TQ_ANNOTATED_VALUE};
use crate::error::IonHashResult;
use crate::model::{Event, IonType, SymbolToken};
use crate::provider::HashAccumulator;

/// A hash accumulator shared by however many frames are currently
/// accumulating into it (just one, except while a non-struct container's
/// children are streaming into their parent's accumulator).
pub type SharedAccumulator<Acc> = Rc<RefCell<Acc>>;

pub fn new_shared<Acc>(accumulator: Acc) -> SharedAccumulator<Acc> {
    Rc::new(RefCell::new(accumulator))
}

/// A non-struct serializer frame: handles `null`, every scalar type, and
/// the `list`/`sexp` container frames.
pub struct PlainFrame<Acc> {
    accumulator: SharedAccumulator<Acc>,
    has_container_annotations: bool,
    depth: usize,
}

impl<Acc: HashAccumulator> PlainFrame<Acc> {
    pub fn new(accumulator: SharedAccumulator<Acc>, depth: usize) -> Self {
        PlainFrame {
            accumulator,
            has_container_annotations: false,
            depth,
        }
    }

    /// The accumulator backing this frame, for a child frame of a
    /// non-struct container to share via `Rc::clone`.
    pub fn shared_accumulator(&self) -> SharedAccumulator<Acc> {
        Rc::clone(&self.accumulator)
    }

    fn begin(&self) {
        self.accumulator.borrow_mut().update(&[BEGIN_MARKER]);
    }

    fn end(&self) {
        self.accumulator.borrow_mut().update(&[END_MARKER]);
    }

    fn update(&self, bytes: &[u8]) {
        self.accumulator.borrow_mut().update(bytes);
    }

    /// Emits a framed symbol token (used for annotations and field names):
    /// `B <tq> <escaped representation, if any> E`.
    fn write_symbol(&self, token: &SymbolToken) {
        self.begin();
        let bytes = codec::encode_symbol_token(token);
        // The split is applied with an effective ion type of Symbol so the
        // low nibble (e.g. SID 0's 0x71) survives.
        let (tq, representation) =
            codec::split_tq_and_representation(IonType::Symbol, &bytes).expect(
                "encode_symbol_token always produces a well-formed single-byte-header value",
            );
        self.update(&[tq]);
        if !representation.is_empty() {
            self.update(&codec::escape(&representation));
        }
        self.end();
    }

    fn handle_field_name(&self, event: &Event) {
        if let Some(field_name) = &event.field_name {
            if self.depth > 0 {
                self.write_symbol(field_name);
            }
        }
    }

    fn handle_annotations_begin(&mut self, event: &Event, is_container: bool) {
        if !event.annotations.is_empty() {
            self.begin();
            self.update(&[TQ_ANNOTATED_VALUE]);
            for annotation in &event.annotations {
                self.write_symbol(annotation);
            }
            if is_container {
                self.has_container_annotations = true;
            }
        }
    }

    fn handle_annotations_end(&mut self, event: Option<&Event>, is_container: bool) {
        let has_scalar_annotations = event.map(|e| !e.annotations.is_empty()).unwrap_or(false);
        if has_scalar_annotations || (is_container && self.has_container_annotations) {
            self.end();
            if is_container {
                self.has_container_annotations = false;
            }
        }
    }

    pub fn scalar(&mut self, event: &Event) -> IonHashResult<()> {
        self.handle_annotations_begin(event, false);
        self.begin();
        let ion_type = event.ion_type.expect("scalar events carry an ion_type");
        let scalar_bytes = match &event.value {
            Some(bytes) => bytes.clone(),
            None => codec::encode_null(ion_type),
        };
        let (tq, representation) = codec::split_tq_and_representation(ion_type, &scalar_bytes)?;
        self.update(&[tq]);
        if !representation.is_empty() {
            self.update(&codec::escape(&representation));
        }
        self.end();
        self.handle_annotations_end(Some(event), false);
        Ok(())
    }

    pub fn step_in(&mut self, event: &Event) {
        self.handle_field_name(event);
        self.handle_annotations_begin(event, true);
        self.begin();
        let ion_type = event
            .ion_type
            .expect("container_start events carry an ion_type");
        self.update(&[tq_for_type(ion_type)]);
    }

    pub fn step_out(&mut self) {
        self.end();
        self.handle_annotations_end(None, true);
    }

    /// Returns the accumulator's digest, resetting it.
    pub fn digest(&mut self) -> Vec<u8> {
        self.accumulator.borrow_mut().digest()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// A struct serializer frame: collects one sub-digest per field, sorts
/// them, and composes them into the struct's own digest at `step_out`.
/// Grounded on `_StructSerializer` in `ionhash/hasher.py`.
///
/// `scalar_serializer` is always a freshly created accumulator -- each
/// field's name+value pair needs its own isolated digest to sort. `base`
/// (the struct's own framing bytes) follows the same accumulator-sharing
/// rule as any other frame: the driver passes it a fresh accumulator only
/// when *this struct's parent* is itself a struct; a struct nested inside
/// a list or at the top level shares its parent's accumulator.
pub struct StructFrame<Acc> {
    base: PlainFrame<Acc>,
    scalar_serializer: PlainFrame<Acc>,
    field_hashes: Vec<Vec<u8>>,
}

impl<Acc: HashAccumulator> StructFrame<Acc> {
    pub fn new(
        accumulator: SharedAccumulator<Acc>,
        scalar_accumulator: SharedAccumulator<Acc>,
        depth: usize,
    ) -> Self {
        StructFrame {
            base: PlainFrame::new(accumulator, depth),
            scalar_serializer: PlainFrame::new(scalar_accumulator, depth + 1),
            field_hashes: Vec::new(),
        }
    }

    /// A direct scalar child of this struct is routed through the
    /// dedicated scalar sub-serializer: its field name and value are
    /// hashed together into a fresh accumulator, then the resulting
    /// digest is appended to `field_hashes` for later sorting.
    pub fn scalar(&mut self, event: &Event) -> IonHashResult<()> {
        if let Some(field_name) = &event.field_name {
            self.scalar_serializer.write_symbol(field_name);
        }
        self.scalar_serializer.scalar(event)?;
        let digest = self.scalar_serializer.digest();
        self.append_field_hash(digest);
        Ok(())
    }

    pub fn step_in(&mut self, event: &Event) {
        self.base.step_in(event);
    }

    pub fn step_out(&mut self) {
        crate::comparator::sort_field_hashes(&mut self.field_hashes);
        for digest in &self.field_hashes {
            self.base.update(&codec::escape(digest));
        }
        self.base.step_out();
    }

    pub fn digest(&mut self) -> Vec<u8> {
        self.base.digest()
    }

    pub fn append_field_hash(&mut self, digest: Vec<u8>) {
        self.field_hashes.push(digest);
    }

    pub fn depth(&self) -> usize {
        self.base.depth()
    }
}

/// A frame on the driver's stack: either a plain (non-struct) frame or a
/// struct frame.
pub enum Frame<Acc> {
    Plain(PlainFrame<Acc>),
    Struct(StructFrame<Acc>),
}

impl<Acc: HashAccumulator> Frame<Acc> {
    pub fn depth(&self) -> usize {
        match self {
            Frame::Plain(f) => f.depth(),
            Frame::Struct(f) => f.depth(),
        }
    }

    pub fn scalar(&mut self, event: &Event) -> IonHashResult<()> {
        match self {
            Frame::Plain(f) => f.scalar(event),
            Frame::Struct(f) => f.scalar(event),
        }
    }

    pub fn step_in(&mut self, event: &Event) {
        match self {
            Frame::Plain(f) => f.step_in(event),
            Frame::Struct(f) => f.step_in(event),
        }
    }

    pub fn step_out(&mut self) {
        match self {
            Frame::Plain(f) => f.step_out(),
            Frame::Struct(f) => f.step_out(),
        }
    }

    pub fn digest(&mut self) -> Vec<u8> {
        match self {
            Frame::Plain(f) => f.digest(),
            Frame::Struct(f) => f.digest(),
        }
    }

    pub fn is_struct(&self) -> bool {
        matches!(self, Frame::Struct(_))
    }

    /// The accumulator backing this frame, to be shared (via `Rc::clone`)
    /// with a non-struct child container.
    pub fn shared_accumulator(&self) -> SharedAccumulator<Acc> {
        match self {
            Frame::Plain(f) => f.shared_accumulator(),
            Frame::Struct(f) => f.base.shared_accumulator(),
        }
    }

    /// Appends a just-popped child frame's raw (not yet escaped) digest to
    /// this frame's field hashes. Only valid when `self` is a struct
    /// frame; the driver only calls this after confirming `is_struct()`.
    ///
    /// Escaping is applied exactly once, inside [`StructFrame::step_out`]'s
    /// iteration over `field_hashes` -- not here. Escaping at both append
    /// time and emission time would double-escape nested container
    /// digests (see spec §9's open question, resolved in favor of
    /// emission-time escaping).
    pub fn append_field_hash(&mut self, digest: Vec<u8>) {
        match self {
            Frame::Struct(f) => f.append_field_hash(digest),
            Frame::Plain(_) => {
                debug_assert!(false, "append_field_hash called on a non-struct frame");
            }
        }
    }
}
