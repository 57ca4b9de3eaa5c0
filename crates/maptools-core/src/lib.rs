//! **maptools-core**: geometry primitives for layered grid maps.
//!
//! A map is an unbounded integer grid replicated across `z` layers. Movement
//! happens within a layer, in one of the eight compass [`Direction`]s, so a
//! [`Position`] never changes its `z` coordinate when stepped.

pub mod geom;

pub use geom::{Direction, Position};
