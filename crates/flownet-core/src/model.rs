//! Entity model for the flow network: process units and the material
//! streams that connect them.
//!
//! Units and streams reference each other by id only; the id-keyed maps
//! in [`crate::graph::FlowGraph`] are the sole owners of both entity
//! kinds, so there are no reference cycles and nothing to tear down.

use serde::Serialize;

/// The two kinds of process unit.
///
/// The distinction is purely nominal — no behavior differs between the
/// kinds — and exists for downstream labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Primary,
    Secondary,
}

impl UnitKind {
    /// Map the source row's type flag: nonzero is secondary.
    #[must_use]
    pub const fn from_flag(type_flag: i64) -> Self {
        if type_flag == 0 {
            Self::Primary
        } else {
            Self::Secondary
        }
    }
}

/// A process unit node in the flow network.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub id: i64,
    pub name: String,
    pub kind: UnitKind,
    /// Optional capacity, unset until a load-max row assigns it.
    pub load_max: Option<f64>,
    /// Ids of streams this unit consumes, in link-row order.
    pub inputs: Vec<i64>,
    /// Ids of streams this unit produces, in link-row order.
    pub outputs: Vec<i64>,
}

impl Unit {
    #[must_use]
    pub const fn new(id: i64, name: String, kind: UnitKind) -> Self {
        Self {
            id,
            name,
            kind,
            load_max: None,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn set_load_max(&mut self, load_max: f64) {
        self.load_max = Some(load_max);
    }

    /// Register a consumed stream. Idempotent: re-linking the same
    /// stream keeps its first position, as a keyed insert would.
    pub fn add_input(&mut self, stream_id: i64) {
        if !self.inputs.contains(&stream_id) {
            self.inputs.push(stream_id);
        }
    }

    /// Register a produced stream. Same idempotence contract as
    /// [`Unit::add_input`].
    pub fn add_output(&mut self, stream_id: i64) {
        if !self.outputs.contains(&stream_id) {
            self.outputs.push(stream_id);
        }
    }
}

/// A directed material flow connecting producing and consuming units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stream {
    pub id: i64,
    pub name: String,
    /// Ids of units producing this stream, in link-row order.
    pub where_from: Vec<i64>,
    /// Ids of units consuming this stream, in link-row order.
    pub where_to: Vec<i64>,
}

impl Stream {
    #[must_use]
    pub const fn new(id: i64, name: String) -> Self {
        Self {
            id,
            name,
            where_from: Vec::new(),
            where_to: Vec::new(),
        }
    }

    pub fn add_where_from(&mut self, unit_id: i64) {
        self.where_from.push(unit_id);
    }

    pub fn add_where_to(&mut self, unit_id: i64) {
        self.where_to.push(unit_id);
    }

    /// A stream nothing produces and nothing consumes.
    #[must_use]
    pub fn is_unused(&self) -> bool {
        self.where_from.is_empty() && self.where_to.is_empty()
    }

    /// A stream feeding more than one consuming unit.
    #[must_use]
    pub fn is_multiply_consumed(&self) -> bool {
        self.where_to.len() > 1
    }
}
