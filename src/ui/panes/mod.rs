//! TUI pane rendering modules
//!
//! Every pane is a stateless render function over data read from a
//! [`Player`](crate::playback::Player) or an [`Arena`](crate::arena::Arena).
//!
//! # Pane Modules
//!
//! - [`bars`]: the array as a bar chart, coloured by highlights and swap heat
//! - [`counters`]: comparison/swap tallies, elapsed time and history depth
//! - [`status`]: status bar with keybindings and run state

pub mod bars;
pub mod counters;
pub mod status;

pub use bars::{bar_color, render_bars_pane, BarsRenderData};
pub use counters::{render_counters_pane, CountersRenderData};
pub use status::{render_status_bar, StatusIndicator};
