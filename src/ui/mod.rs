//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]** — application state, keyboard event loop, pane focus, playback
//! - **[`panes`]** — stateless render functions for each visible pane
//!   (expression, tokens, nodes, tree, status bar)
//! - **[`theme`]** — centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a recorded
//! [`Session`] and call [`App::run`] to start the event loop. Stepping
//! moves an index through the session's snapshots, so going backward is
//! as cheap as going forward.
//!
//! [`Session`]: crate::trace::Session
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
