//! A small event-loop runtime for ratatui applications.
//!
//! [`Runtime::run`] drives an [`App`] with three kinds of events: periodic
//! ticks carrying the real time elapsed since the previous tick, render
//! requests, and terminal input.

pub use self::{app::App, event_loop::RenderMode, runtime::Runtime};

mod app;
mod event;
mod event_loop;
mod runtime;
