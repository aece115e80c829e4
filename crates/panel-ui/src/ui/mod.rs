//! Minimal retained UI on embedded-graphics.

pub mod area;
pub mod canvas;
pub mod label;
pub mod runtime;
pub mod screen;

pub use area::Area;
pub use label::Label;
pub use runtime::{
    FlushPort, FlushReady, InputPort, ProcessReport, Runtime, RuntimeError, MAX_INVALID_AREAS,
};
pub use screen::HomeScreen;
