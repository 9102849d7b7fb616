//! Common utilities for the Trellis layout engine.
//!
//! This crate provides shared infrastructure used by the layout core and the CLI:
//! - **Warning System** - deduplicated, coloured terminal output for layout anomalies
//! - **Layout Tracing** - the [`layout_trace!`] macro, compiled in only with the
//!   `layout-trace` feature

pub mod trace;
pub mod warning;
