//! # Introduction
//!
//! sortty runs instrumented sorting algorithms one step at a time, capturing a
//! snapshot of the visible state before each step. The snapshot history is
//! navigated forward and backward through a terminal UI built with
//! [ratatui](https://docs.rs/ratatui), or raced head to head in an arena.
//!
//! ## Pipeline
//!
//! ```text
//! Seed array → StepProducer → Player (history/future) → TUI
//!                          ↘ Arena (two producers)   ↗
//! ```
//!
//! 1. [`counters`]: comparison and swap tallies, global and per named instance.
//! 2. [`algorithms`]: selection, binary-insertion, quick and pancake sort as
//!    resumable state machines yielding [`algorithms::Highlights`].
//! 3. [`snapshot`]: captured states and the bounded stacks holding them.
//! 4. [`playback`]: the [`playback::Player`]: play, pause, step back and forward,
//!    run to completion, and the finalize [`playback::RunRecord`].
//! 5. [`arena`]: two producers advanced in lockstep, first to finish wins.
//! 6. [`config`]: size limits, value ranges, delays and array generation.
//! 7. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Headless use
//!
//! ```
//! use sortty::algorithms::Algorithm;
//! use sortty::config::PlaybackConfig;
//! use sortty::playback::{Player, StepOutcome};
//!
//! let mut player = Player::new(PlaybackConfig::default());
//! player.start(vec![5, 2, 4, 6, 1, 3], Algorithm::BinaryInsertion, 0);
//! let StepOutcome::Completed(record) = player.run_to_completion().unwrap() else {
//!     unreachable!()
//! };
//! assert_eq!(player.array(), &[1, 2, 3, 4, 5, 6]);
//! assert_eq!(record.comparisons, 10);
//! ```

pub mod algorithms;
pub mod arena;
pub mod config;
pub mod counters;
pub mod playback;
pub mod snapshot;
pub mod ui;
