//! Test fixtures for overlay-planner.
//!
//! Provides:
//! - Real San Francisco coordinates and API response bodies
//! - A scripted transport and a recording renderer

pub mod fakes;
pub mod san_francisco;

pub use fakes::*;
pub use san_francisco::*;
