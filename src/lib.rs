//! # lsys-turtle
//!
//! A deterministic L-System production engine paired with a 2D turtle interpreter.
//!
//! An [`LSystem`] rewrites its axiom through a [`RuleTable`], caching every iteration
//! along with a per-symbol *generation count* (how many marker derivations each symbol
//! descends from). A [`Turtle`] walks a produced sequence and emits [`Geometry`], whose
//! vertices carry those counts so renderers can colour by depth. A [`SpatialIndex`]
//! partitions the vertices into a few bounding boxes for cheap hit-testing, and a
//! [`Shape`] ties the three together, recomputing lazily when its inputs change.
//!
//! Rendering, colouring and file I/O are left to the caller; configuration types
//! implement `serde` traits so any format can persist them.

pub mod error;
pub mod geometry;
pub mod interpreter;
pub mod lsystem;
pub mod rules;
pub mod shape;
pub mod turtle;

pub use error::*;
pub use geometry::*;
pub use interpreter::*;
pub use lsystem::*;
pub use rules::*;
pub use shape::*;
pub use turtle::*;
