pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod predict;
pub mod simulate;
