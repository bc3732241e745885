//! Report derivers: pure, read-only traversals over a completed
//! [`FlowGraph`].
//!
//! All three derivers are independent — none mutates the graph, and
//! they may run in any order. Output ordering follows construction
//! order (and link order within an entity), so a given database always
//! produces byte-identical reports.

use serde::Serialize;

use crate::graph::FlowGraph;

/// One unused stream: nothing produces it, nothing consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnusedStream {
    pub id: i64,
    pub name: String,
}

/// A stream feeding more than one consuming unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MultiConsumerStream {
    pub stream: String,
    /// Consumer unit names in link order.
    pub consumers: Vec<String>,
}

/// Input and output stream names for one unit.
///
/// The two columns are positionally independent: row N of `inputs` and
/// row N of `outputs` are unrelated facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitStreams {
    pub unit: String,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

/// Streams with no producer and no consumer, in construction order.
#[must_use]
pub fn unused_streams(graph: &FlowGraph) -> Vec<UnusedStream> {
    graph
        .streams_in_order()
        .filter(|stream| stream.is_unused())
        .map(|stream| UnusedStream {
            id: stream.id,
            name: stream.name.clone(),
        })
        .collect()
}

/// Streams consumed by more than one unit, in construction order, with
/// consumer unit names in link order.
#[must_use]
pub fn multi_consumer_streams(graph: &FlowGraph) -> Vec<MultiConsumerStream> {
    graph
        .streams_in_order()
        .filter(|stream| stream.is_multiply_consumed())
        .map(|stream| MultiConsumerStream {
            stream: stream.name.clone(),
            consumers: unit_names(graph, &stream.where_to),
        })
        .collect()
}

/// Per-unit input and output stream name lists, one entry per unit in
/// construction order.
#[must_use]
pub fn unit_stream_table(graph: &FlowGraph) -> Vec<UnitStreams> {
    graph
        .units_in_order()
        .map(|unit| UnitStreams {
            unit: unit.name.clone(),
            inputs: stream_names(graph, &unit.inputs),
            outputs: stream_names(graph, &unit.outputs),
        })
        .collect()
}

/// Diagnostic listing of every consuming link as a
/// `(unit name, stream name)` pair, in link order per unit.
///
/// Not a report — callers surface this at debug level only.
#[must_use]
pub fn feed_pairs(graph: &FlowGraph) -> Vec<(String, String)> {
    graph
        .units_in_order()
        .flat_map(|unit| {
            stream_names(graph, &unit.inputs)
                .into_iter()
                .map(|stream| (unit.name.clone(), stream))
        })
        .collect()
}

fn unit_names(graph: &FlowGraph, ids: &[i64]) -> Vec<String> {
    ids.iter()
        .filter_map(|id| graph.unit(*id))
        .map(|unit| unit.name.clone())
        .collect()
}

fn stream_names(graph: &FlowGraph, ids: &[i64]) -> Vec<String> {
    ids.iter()
        .filter_map(|id| graph.stream(*id))
        .map(|stream| stream.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{feed_pairs, multi_consumer_streams, unit_stream_table, unused_streams};
    use crate::db::query::{LinkRow, StreamRow, UnitRow};
    use crate::graph::FlowGraph;

    fn unit_row(id: i64, name: &str, type_flag: i64) -> UnitRow {
        UnitRow {
            id,
            name: name.into(),
            type_flag,
        }
    }

    fn stream_row(id: i64, name: &str) -> StreamRow {
        StreamRow {
            id,
            name: name.into(),
        }
    }

    const fn link(unit_id: i64, stream_id: i64, feed_flag: i64) -> LinkRow {
        LinkRow {
            unit_id,
            stream_id,
            feed_flag,
        }
    }

    fn scenario() -> FlowGraph {
        FlowGraph::build(
            &[unit_row(1, "Reactor", 0), unit_row(2, "Separator", 1)],
            &[
                stream_row(10, "Feed"),
                stream_row(11, "Product"),
                stream_row(12, "Waste"),
            ],
            &[link(1, 10, 1), link(1, 11, 0), link(2, 11, 1), link(2, 12, 0)],
            &[],
        )
        .expect("scenario builds")
    }

    #[test]
    fn scenario_has_no_unused_and_no_multi_consumer_streams() {
        let graph = scenario();
        // Every stream has at least one link row, so none is unused
        // (Waste has a producer even though nothing consumes it).
        assert!(unused_streams(&graph).is_empty());
        assert!(multi_consumer_streams(&graph).is_empty());
    }

    #[test]
    fn stream_with_zero_links_is_unused() {
        let graph = FlowGraph::build(
            &[unit_row(1, "Reactor", 0)],
            &[
                stream_row(10, "Orphan A"),
                stream_row(11, "Used"),
                stream_row(12, "Orphan B"),
            ],
            &[link(1, 11, 0)],
            &[],
        )
        .expect("build");

        let unused = unused_streams(&graph);
        let names: Vec<&str> = unused.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Orphan A", "Orphan B"]);
        assert_eq!(unused[0].id, 10);
        assert_eq!(unused[1].id, 12);
    }

    #[test]
    fn multi_consumer_listing_keeps_link_order() {
        let graph = FlowGraph::build(
            &[
                unit_row(1, "Reactor", 0),
                unit_row(2, "Separator", 1),
                unit_row(3, "Blender", 1),
            ],
            &[stream_row(10, "Recycle"), stream_row(11, "Purge")],
            // Recycle consumed by 3, then 1, then 2; Purge by 2 only.
            &[
                link(3, 10, 1),
                link(1, 10, 1),
                link(2, 10, 1),
                link(2, 11, 1),
            ],
            &[],
        )
        .expect("build");

        let multi = multi_consumer_streams(&graph);
        assert_eq!(multi.len(), 1);
        assert_eq!(multi[0].stream, "Recycle");
        assert_eq!(multi[0].consumers, ["Blender", "Reactor", "Separator"]);
    }

    #[test]
    fn unit_table_lists_streams_in_insertion_order() {
        let graph = scenario();
        let table = unit_stream_table(&graph);

        assert_eq!(table.len(), 2);
        assert_eq!(table[0].unit, "Reactor");
        assert_eq!(table[0].inputs, ["Feed"]);
        assert_eq!(table[0].outputs, ["Product"]);
        assert_eq!(table[1].unit, "Separator");
        assert_eq!(table[1].inputs, ["Product"]);
        assert_eq!(table[1].outputs, ["Waste"]);
    }

    #[test]
    fn unit_table_covers_units_with_no_streams() {
        let graph = FlowGraph::build(&[unit_row(1, "Idle", 0)], &[], &[], &[]).expect("build");
        let table = unit_stream_table(&graph);

        assert_eq!(table.len(), 1);
        assert!(table[0].inputs.is_empty());
        assert!(table[0].outputs.is_empty());
    }

    #[test]
    fn feed_pairs_lists_every_consuming_link() {
        let graph = scenario();
        let pairs = feed_pairs(&graph);
        assert_eq!(
            pairs,
            [
                ("Reactor".to_string(), "Feed".to_string()),
                ("Separator".to_string(), "Product".to_string()),
            ]
        );
    }
}
