//! route-scout client core
//!
//! Interaction-state and geometry engine for an interactive city-routing
//! client: point-selection mode machine, marker lifecycle, route key-point
//! reduction, distance/time statistics, and the backend HTTP adapter.

pub mod traits;
pub mod geometry;
pub mod stats;
pub mod markers;
pub mod mode;
pub mod render;
pub mod backend;
pub mod session;
pub mod debounce;
