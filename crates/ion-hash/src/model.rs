//! The event and value data model the hashing engine operates over.
//!
//! Per spec §1, a real Ion reader/writer is an external collaborator; this
//! module only defines the shapes the engine consumes. Anything that can
//! adapt its own event stream into [`Event`] (or its own value tree into
//! [`Value`]) can be hashed.

use std::fmt;

/// An Ion type tag, independent of any particular reader/writer
/// implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IonType {
    Null,
    Bool,
    Int,
    Float,
    Decimal,
    Timestamp,
    Symbol,
    String,
    Clob,
    Blob,
    List,
    Sexp,
    Struct,
}

impl IonType {
    pub const fn is_container(self) -> bool {
        matches!(self, IonType::List | IonType::Sexp | IonType::Struct)
    }
}

/// A symbolic identifier: either resolved text, or a raw symbol ID (SID).
///
/// A SID of `0` denotes the unknown symbol and is encoded specially
/// (see [`crate::constants::TQ_SYMBOL_SID0`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SymbolToken {
    Text(String),
    Sid(u64),
}

impl SymbolToken {
    /// `true` if this token is the unknown symbol, SID 0.
    pub fn is_sid_zero(&self) -> bool {
        matches!(self, SymbolToken::Sid(0))
    }
}

impl fmt::Display for SymbolToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolToken::Text(t) => write!(f, "{t}"),
            SymbolToken::Sid(sid) => write!(f, "${sid}"),
        }
    }
}

/// The pre-serialized bytes the external scalar serializer produced for a
/// non-null scalar value, in Ion binary form (type+length prefix +
/// representation). The engine only ever reads these bytes through the
/// TQ/representation split of spec §4.1; it never interprets them further.
pub type ScalarBytes = Vec<u8>;

/// A kind of event in the stream the engine is driven by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Scalar,
    ContainerStart,
    ContainerEnd,
    StreamEnd,
}

/// One event in the value stream fed to [`crate::driver::HashDriver`].
///
/// For a `ContainerEnd`/`StreamEnd` event only `kind` and `depth` matter;
/// the other fields are left at their defaults.
#[derive(Debug, Clone)]
pub struct Event {
    pub kind: EventKind,
    /// The Ion type; required for `Scalar` and `ContainerStart`.
    pub ion_type: Option<IonType>,
    /// Pre-serialized scalar bytes; `None` denotes a typed null (or is
    /// irrelevant for container/stream-end events).
    pub value: Option<ScalarBytes>,
    pub annotations: Vec<SymbolToken>,
    /// Present only when the enclosing container is a struct and this
    /// event is a direct child of it.
    pub field_name: Option<SymbolToken>,
    pub depth: usize,
}

impl Event {
    pub fn scalar(ion_type: IonType, value: Option<ScalarBytes>, depth: usize) -> Self {
        Event {
            kind: EventKind::Scalar,
            ion_type: Some(ion_type),
            value,
            annotations: Vec::new(),
            field_name: None,
            depth,
        }
    }

    pub fn container_start(ion_type: IonType, depth: usize) -> Self {
        Event {
            kind: EventKind::ContainerStart,
            ion_type: Some(ion_type),
            value: None,
            annotations: Vec::new(),
            field_name: None,
            depth,
        }
    }

    pub fn container_end(depth: usize) -> Self {
        Event {
            kind: EventKind::ContainerEnd,
            ion_type: None,
            value: None,
            annotations: Vec::new(),
            field_name: None,
            depth,
        }
    }

    pub fn stream_end(depth: usize) -> Self {
        Event {
            kind: EventKind::StreamEnd,
            ion_type: None,
            value: None,
            annotations: Vec::new(),
            field_name: None,
            depth,
        }
    }

    pub fn with_annotations(mut self, annotations: Vec<SymbolToken>) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn with_field_name(mut self, field_name: Option<SymbolToken>) -> Self {
        self.field_name = field_name;
        self
    }
}

/// An owned Ion value tree, used by [`crate::hash_value`] for one-shot
/// hashing of a fully materialized value (as opposed to driving the
/// incremental event API directly).
///
/// Grounded on the real `ion-hash` crate's `IonHasher::hash_element`
/// one-shot helper, which operates over a materialized `Element` tree
/// rather than a raw event stream.
#[derive(Debug, Clone)]
pub enum Value {
    Null(IonType),
    Scalar {
        ion_type: IonType,
        bytes: ScalarBytes,
    },
    Sequence {
        ion_type: IonType, // List or Sexp
        elements: Vec<AnnotatedValue>,
    },
    Struct {
        fields: Vec<(SymbolToken, AnnotatedValue)>,
    },
}

/// A [`Value`] together with its (possibly empty) sequence of annotations.
#[derive(Debug, Clone)]
pub struct AnnotatedValue {
    pub annotations: Vec<SymbolToken>,
    pub value: Value,
}

impl AnnotatedValue {
    pub fn new(value: Value) -> Self {
        AnnotatedValue {
            annotations: Vec::new(),
            value,
        }
    }

    pub fn annotated(annotations: Vec<SymbolToken>, value: Value) -> Self {
        AnnotatedValue { annotations, value }
    }

    pub(crate) fn ion_type(&self) -> IonType {
        match &self.value {
            Value::Null(t) => *t,
            Value::Scalar { ion_type, .. } => *ion_type,
            Value::Sequence { ion_type, .. } => *ion_type,
            Value::Struct { .. } => IonType::Struct,
        }
    }
}
