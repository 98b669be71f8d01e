//! VCR-style playback of a single sorting run
//!
//! This module provides the snapshot/history controller:
//! - [`engine`]: the [`Player`], its [`RunStatus`] lifecycle and [`StepOutcome`]s
//! - [`record`]: finalize records and the sinks that persist them
//!
//! # Playback Model
//!
//! The player exposes one state (array, highlights, counters, elapsed time)
//! that the presentation layer reads. Every forward move pushes the exposed
//! state onto a bounded history; stepping back pops it and pushes the state it
//! left onto a future stack. Stepping forward replays the future without
//! calling the producer, and only pulls a new frame once the future is empty.
//! Advancing the producer directly always discards the future first.
//!
//! Counter totals travel inside snapshots and are reinstated through
//! [`CounterRegistry::set_absolute`](crate::counters::CounterRegistry::set_absolute),
//! so navigation never adds comparisons or swaps.

pub mod engine;
pub mod record;

pub use engine::{Player, RunStatus, StepOutcome};
pub use record::{JsonLinesSink, MemorySink, RecordSink, RunRecord, SinkError};
