//! Campaign dispatch engine.

pub mod dispatcher;

pub use dispatcher::{run_dispatch, DispatchOptions};
