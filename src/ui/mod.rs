//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state, keyboard event loop, solo and arena screens
//! - **[`panes`]**: stateless render functions for each visible pane (bars,
//!   counters, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with [`App::solo`] or
//! [`App::arena`] and call [`App::run`] to start the event loop.
//!
//! [`App::solo`]: app::App::solo
//! [`App::arena`]: app::App::arena
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
