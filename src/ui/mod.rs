//! Terminal output helpers
//!
//! Status lines for the `fetch`, `cache` and `config` commands, and a
//! stderr spinner for the report. Everything degrades to plain text in
//! CI and when stderr is not a terminal.

mod context;
mod output;
mod progress;

pub use context::UiContext;
pub use output::{step_info, step_ok, step_ok_detail, step_warn_hint};
pub use progress::TaskSpinner;
