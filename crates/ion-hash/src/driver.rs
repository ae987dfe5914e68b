//! The hasher driver: a stack of [`Frame`]s, one per level of container
//! nesting, routing `scalar`/`step_in`/`step_out`/`digest` to whichever
//! frame is on top. Grounded on `_Hasher` in `ionhash/hasher.py`.

use crate::error::{IonHashError, IonHashResult};
use crate::frame::{new_shared, Frame, PlainFrame, StructFrame};
use crate::model::{Event, IonType};
use crate::provider::HashFunctionProvider;

/// Default maximum container nesting depth, matching the deep-nesting
/// boundary case in spec §8 ("any depth <= 1024 must succeed").
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Drives the Ion Hash normalization engine over a sequence of `scalar`/
/// `step_in`/`step_out` calls, maintaining the stack of per-container
/// serializer frames described in spec §3 and §4.5.
///
/// Once any method returns an `Err`, the driver is considered poisoned
/// (spec §7) and must be discarded; no method attempts recovery.
pub struct HashDriver<P: HashFunctionProvider> {
    provider: P,
    stack: Vec<Frame<P::Accumulator>>,
    max_depth: Option<usize>,
}

impl<P: HashFunctionProvider> HashDriver<P> {
    /// Creates a driver with the default maximum depth
    /// ([`DEFAULT_MAX_DEPTH`]).
    pub fn new(provider: P) -> Self {
        Self::with_max_depth(provider, Some(DEFAULT_MAX_DEPTH))
    }

    /// Creates a driver with an explicit (or absent) maximum nesting depth.
    /// `max_depth = None` disables the check entirely.
    pub fn with_max_depth(provider: P, max_depth: Option<usize>) -> Self {
        let root_accumulator = new_shared(provider.new_accumulator());
        let root = Frame::Plain(PlainFrame::new(root_accumulator, 0));
        HashDriver {
            provider,
            stack: vec![root],
            max_depth,
        }
    }

    fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    fn top(&self) -> &Frame<P::Accumulator> {
        self.stack
            .last()
            .expect("stack is never empty by construction")
    }

    fn top_mut(&mut self) -> &mut Frame<P::Accumulator> {
        self.stack
            .last_mut()
            .expect("stack is never empty by construction")
    }

    /// Feeds a scalar (non-container) event to the current frame.
    pub fn scalar(&mut self, event: &Event) -> IonHashResult<()> {
        self.top_mut().scalar(event)
    }

    /// Pushes a new frame for a just-started container and feeds it the
    /// `container_start` event.
    ///
    /// Per spec §4.5: if the current top frame is a struct, the new
    /// frame gets a *fresh* accumulator from the provider (so its digest
    /// can be compared and sorted alongside its siblings); otherwise the
    /// new frame shares the current top's accumulator, since a
    /// list/sexp's element order is already significant and needs no
    /// per-element isolation. This choice depends only on the *parent's*
    /// kind, not the new frame's -- a struct nested directly inside a
    /// list still shares the list's accumulator for its own framing
    /// bytes, even though its fields are isolated internally.
    pub fn step_in(&mut self, event: &Event) -> IonHashResult<()> {
        let new_depth = self.depth() + 1;
        if let Some(max_depth) = self.max_depth {
            if new_depth > max_depth {
                return Err(IonHashError::DepthLimitExceeded { max_depth });
            }
        }

        let ion_type = event
            .ion_type
            .expect("container_start events carry an ion_type");

        // Selecting the new frame's primary accumulator depends only on
        // the *parent's* kind; a struct nested inside a list still gets
        // the list's (shared) accumulator here -- it's the struct's
        // always-fresh `scalar_serializer` accumulator, set up below,
        // that isolates its fields.
        let accumulator = if self.top().is_struct() {
            new_shared(self.provider.new_accumulator())
        } else {
            self.top().shared_accumulator()
        };

        let mut new_frame = if ion_type == IonType::Struct {
            let scalar_accumulator = new_shared(self.provider.new_accumulator());
            Frame::Struct(StructFrame::new(accumulator, scalar_accumulator, new_depth))
        } else {
            Frame::Plain(PlainFrame::new(accumulator, new_depth))
        };

        new_frame.step_in(event);
        self.stack.push(new_frame);
        Ok(())
    }

    /// Pops the current frame, closing it out. If the new top is a struct
    /// frame, the popped frame's digest becomes one more field hash for it.
    pub fn step_out(&mut self) -> IonHashResult<()> {
        if self.depth() == 0 {
            return Err(IonHashError::StackUnderflow);
        }
        self.top_mut().step_out();
        let mut popped = self.stack.pop().expect("checked depth > 0 above");
        if self.top().is_struct() {
            let digest = popped.digest();
            self.top_mut().append_field_hash(digest);
        }
        Ok(())
    }

    /// Returns the digest of the sole remaining (root) frame. Only legal
    /// at depth 0; resets the underlying accumulator as a side effect.
    pub fn digest(&mut self) -> IonHashResult<Vec<u8>> {
        let depth = self.depth();
        if depth != 0 {
            return Err(IonHashError::PrematureDigest {
                open_containers: depth,
            });
        }
        Ok(self.top_mut().digest())
    }
}
