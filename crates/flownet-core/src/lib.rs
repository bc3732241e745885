//! flownet-core library.
//!
//! Loads an industrial process-unit network from a SQLite flowsheet
//! database and builds an in-memory graph of units and the material
//! streams that connect them. Three report derivers read the completed
//! graph back out: unused streams, streams feeding multiple consumers,
//! and the per-unit input/output stream table.
//!
//! # Conventions
//!
//! - **Errors**: graph construction returns the typed
//!   [`graph::GraphError`]; database access returns `anyhow::Result`
//!   with context attached at each boundary.
//! - **Logging**: use `tracing` macros (`info!`, `warn!`, `error!`,
//!   `debug!`, `trace!`).

pub mod db;
pub mod graph;
pub mod model;
pub mod report;
