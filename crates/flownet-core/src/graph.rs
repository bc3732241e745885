//! Graph construction from the flowsheet row sets.
//!
//! # Overview
//!
//! [`FlowGraph::build`] turns the four source row sets — units, streams,
//! unit/stream links, load-max values — into a fully linked in-memory
//! graph. Linking is strictly sequential and must complete before any
//! report deriver runs; the derivers in [`crate::report`] assume a fully
//! populated graph.
//!
//! ## Ordering
//!
//! Row order is load-bearing. Units and streams are registered in row
//! order, link rows are applied in row order, and every per-entity list
//! (`inputs`, `outputs`, `where_from`, `where_to`) ends up in
//! source-derived order. Reports depend on this for stable output
//! across runs.
//!
//! ## Failure policy
//!
//! A link or load-max row naming an unknown unit or stream id aborts
//! construction: a partially linked graph would silently produce wrong
//! reports. Duplicate unit or stream ids abort for the same reason — an
//! overwrite would drop links already wired to the first entity.

use std::collections::HashMap;

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::{debug, instrument};

use crate::db::query::{self, LinkRow, LoadMaxRow, StreamRow, UnitRow};
use crate::model::{Stream, Unit, UnitKind};

/// Errors from graph construction. All are fatal: no partial graph
/// escapes [`FlowGraph::build`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// A unit id appeared twice in the `unit` rows.
    #[error("duplicate unit id {id} (second occurrence named {name:?})")]
    DuplicateUnit { id: i64, name: String },

    /// A stream id appeared twice in the `stream` rows.
    #[error("duplicate stream id {id} (second occurrence named {name:?})")]
    DuplicateStream { id: i64, name: String },

    /// A link row referenced a unit id with no `unit` row.
    #[error(
        "link row (unit {unit_id}, stream {stream_id}, feed {feed_flag}) references unknown unit {unit_id}"
    )]
    UnknownLinkUnit {
        unit_id: i64,
        stream_id: i64,
        feed_flag: i64,
    },

    /// A link row referenced a stream id with no `stream` row.
    #[error(
        "link row (unit {unit_id}, stream {stream_id}, feed {feed_flag}) references unknown stream {stream_id}"
    )]
    UnknownLinkStream {
        unit_id: i64,
        stream_id: i64,
        feed_flag: i64,
    },

    /// A load-max row referenced a unit id with no `unit` row.
    #[error("load_max row (unit {unit_id}, load_max {load_max}) references unknown unit")]
    UnknownLoadMaxUnit { unit_id: i64, load_max: f64 },
}

/// The fully linked unit/stream graph for one run.
///
/// Owns every [`Unit`] and [`Stream`]; entities reference each other by
/// id through these maps. Immutable after construction — the report
/// derivers only read it.
#[derive(Debug)]
pub struct FlowGraph {
    units: HashMap<i64, Unit>,
    streams: HashMap<i64, Stream>,
    unit_order: Vec<i64>,
    stream_order: Vec<i64>,
}

impl FlowGraph {
    /// Build the graph from the four row sets.
    ///
    /// # Errors
    ///
    /// Returns a [`GraphError`] on duplicate unit/stream ids or on a
    /// link or load-max row referencing an unknown id.
    pub fn build(
        units: &[UnitRow],
        streams: &[StreamRow],
        links: &[LinkRow],
        load_max: &[LoadMaxRow],
    ) -> Result<Self, GraphError> {
        let mut graph = Self {
            units: HashMap::with_capacity(units.len()),
            streams: HashMap::with_capacity(streams.len()),
            unit_order: Vec::with_capacity(units.len()),
            stream_order: Vec::with_capacity(streams.len()),
        };

        for row in units {
            let unit = Unit::new(row.id, row.name.clone(), UnitKind::from_flag(row.type_flag));
            if graph.units.insert(row.id, unit).is_some() {
                return Err(GraphError::DuplicateUnit {
                    id: row.id,
                    name: row.name.clone(),
                });
            }
            graph.unit_order.push(row.id);
        }

        for row in streams {
            let stream = Stream::new(row.id, row.name.clone());
            if graph.streams.insert(row.id, stream).is_some() {
                return Err(GraphError::DuplicateStream {
                    id: row.id,
                    name: row.name.clone(),
                });
            }
            graph.stream_order.push(row.id);
        }

        for link in links {
            graph.apply_link(link)?;
        }

        for row in load_max {
            let unit = graph
                .units
                .get_mut(&row.unit_id)
                .ok_or(GraphError::UnknownLoadMaxUnit {
                    unit_id: row.unit_id,
                    load_max: row.load_max,
                })?;
            unit.set_load_max(row.load_max);
        }

        debug!(
            units = graph.unit_order.len(),
            streams = graph.stream_order.len(),
            links = links.len(),
            "flow graph linked"
        );

        Ok(graph)
    }

    /// Load the four row sets from `conn` and build the graph.
    ///
    /// # Errors
    ///
    /// Returns an error if any query fails or if construction fails.
    #[instrument(skip(conn))]
    pub fn from_source(conn: &Connection) -> Result<Self> {
        let units = query::load_units(conn)?;
        let streams = query::load_streams(conn)?;
        let links = query::load_links(conn)?;
        let load_max = query::load_load_max(conn)?;

        Self::build(&units, &streams, &links, &load_max).context("build flow graph")
    }

    /// Wire one link row into both sides of the graph.
    fn apply_link(&mut self, link: &LinkRow) -> Result<(), GraphError> {
        let unit = self
            .units
            .get_mut(&link.unit_id)
            .ok_or(GraphError::UnknownLinkUnit {
                unit_id: link.unit_id,
                stream_id: link.stream_id,
                feed_flag: link.feed_flag,
            })?;
        let stream = self
            .streams
            .get_mut(&link.stream_id)
            .ok_or(GraphError::UnknownLinkStream {
                unit_id: link.unit_id,
                stream_id: link.stream_id,
                feed_flag: link.feed_flag,
            })?;

        if link.feed_flag == 0 {
            unit.add_output(link.stream_id);
            stream.add_where_from(link.unit_id);
        } else {
            unit.add_input(link.stream_id);
            stream.add_where_to(link.unit_id);
        }

        Ok(())
    }

    /// Look up a unit by id.
    #[must_use]
    pub fn unit(&self, id: i64) -> Option<&Unit> {
        self.units.get(&id)
    }

    /// Look up a stream by id.
    #[must_use]
    pub fn stream(&self, id: i64) -> Option<&Stream> {
        self.streams.get(&id)
    }

    /// Units in construction (source row) order.
    pub fn units_in_order(&self) -> impl Iterator<Item = &Unit> {
        self.unit_order.iter().filter_map(|id| self.units.get(id))
    }

    /// Streams in construction (source row) order.
    pub fn streams_in_order(&self) -> impl Iterator<Item = &Stream> {
        self.stream_order.iter().filter_map(|id| self.streams.get(id))
    }

    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn stream_count(&self) -> usize {
        self.streams.len()
    }
}
