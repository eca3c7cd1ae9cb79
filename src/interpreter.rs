//! Interpreter that walks a produced symbol sequence with a turtle and emits 2D geometry.
//!
//! The entry point is [`Turtle`]. Bind symbols to operations in an
//! [`InterpretationMap`] (or start from [`InterpretationMap::standard`]), build a
//! turtle from [`DrawingParameters`] and the sequence's generation counts, then call
//! [`Turtle::run`]. [`compute_vertices`] does production and interpretation in one call.

use crate::error::{LSystemError, Result};
use crate::lsystem::LSystem;
use crate::turtle::{DrawingParameters, TurtleOp, TurtleState};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Symbol-to-operation bindings. Unbound symbols are [`TurtleOp::Ignore`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterpretationMap {
    ops: BTreeMap<char, TurtleOp>,
}

impl InterpretationMap {
    /// Creates an empty map: every symbol is ignored.
    pub fn new() -> Self {
        Self::default()
    }

    /// The conventional bindings: `F`/`G` forward, `+`/`-` turns, `[`/`]` push and pop.
    pub fn standard() -> Self {
        let mappings = [
            ('F', TurtleOp::Forward),
            ('G', TurtleOp::Forward),
            ('+', TurtleOp::TurnLeft),
            ('-', TurtleOp::TurnRight),
            ('[', TurtleOp::Push),
            (']', TurtleOp::Pop),
        ];
        mappings
            .into_iter()
            .fold(Self::new(), |map, (sym, op)| map.with_op(sym, op))
    }

    /// Binds `symbol` to `op` (builder pattern).
    pub fn with_op(mut self, symbol: char, op: TurtleOp) -> Self {
        self.set_op(symbol, op);
        self
    }

    /// Binds `symbol` to `op`, replacing any previous binding.
    pub fn set_op(&mut self, symbol: char, op: TurtleOp) {
        self.ops.insert(symbol, op);
    }

    /// Unbinds `symbol`, returning its previous operation.
    pub fn remove_op(&mut self, symbol: char) -> Option<TurtleOp> {
        self.ops.remove(&symbol)
    }

    pub fn get_op(&self, symbol: char) -> TurtleOp {
        self.ops.get(&symbol).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, TurtleOp)> + '_ {
        self.ops.iter().map(|(&sym, &op)| (sym, op))
    }
}

/// What produced a [`Vertex`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VertexKind {
    /// The starting position, emitted once before any symbol.
    Origin,
    /// The end of a forward step.
    Forward,
    /// A pen-up move caused by a pop: renderers should not draw a segment into it.
    Jump,
}

/// A point emitted by the turtle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub position: Vec2,
    pub kind: VertexKind,
}

/// Output of one interpretation pass.
///
/// `vertices` and `generations` are parallel arrays of equal length.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    pub vertices: Vec<Vertex>,
    pub generations: Vec<u32>,
    /// Highest generation count of the interpreted sequence.
    pub max_generation: u32,
}

impl Geometry {
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterates over the vertices emitted by forward steps.
    pub fn forward_vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices
            .iter()
            .filter(|v| v.kind == VertexKind::Forward)
    }

    /// Line segments to draw: one per forward vertex, starting from the previous vertex.
    pub fn segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.vertices.windows(2).filter_map(|w| match w[1].kind {
            VertexKind::Forward => Some((w[0].position, w[1].position)),
            _ => None,
        })
    }
}

/// A single-use turtle machine.
///
/// Holds the active cursor, the stack of saved cursors and the geometry emitted so
/// far. [`run`](Self::run) consumes it, so no state survives between passes.
pub struct Turtle<'a> {
    parameters: &'a DrawingParameters,
    counts: &'a [u32],
    cursor: TurtleState,
    stack: Vec<TurtleState>,
    geometry: Geometry,
}

impl<'a> Turtle<'a> {
    /// Creates a turtle at the starting position and heading of `parameters`.
    ///
    /// `counts` are the generation counts of the sequence that will be interpreted.
    pub fn new(parameters: &'a DrawingParameters, counts: &'a [u32]) -> Self {
        let cursor = TurtleState::new(parameters.starting_position, parameters.starting_angle);
        let mut geometry = Geometry {
            max_generation: counts.iter().copied().max().unwrap_or(0),
            ..Geometry::default()
        };
        geometry.vertices.push(Vertex {
            position: cursor.position,
            kind: VertexKind::Origin,
        });
        geometry.generations.push(counts.first().copied().unwrap_or(0));

        Self {
            parameters,
            counts,
            cursor,
            stack: Vec::new(),
            geometry,
        }
    }

    fn emit(&mut self, position: Vec2, kind: VertexKind, generation: u32) {
        self.geometry.vertices.push(Vertex { position, kind });
        self.geometry.generations.push(generation);
    }

    /// Interprets every symbol of `sequence` in order.
    ///
    /// # Errors
    ///
    /// [`LSystemError::StackUnderflow`] if a pop has no matching push. The partial
    /// geometry is discarded with the turtle.
    pub fn run(mut self, sequence: &str, map: &InterpretationMap) -> Result<Geometry> {
        debug_assert_eq!(self.counts.len(), sequence.chars().count());
        for (i, symbol) in sequence.chars().enumerate() {
            let generation = self.counts.get(i).copied().unwrap_or(0);

            match map.get_op(symbol) {
                TurtleOp::Forward => {
                    self.cursor.advance(self.parameters.step);
                    self.emit(self.cursor.position, VertexKind::Forward, generation);
                }
                TurtleOp::TurnLeft => self.cursor.turn(self.parameters.delta_angle),
                TurtleOp::TurnRight => self.cursor.turn(-self.parameters.delta_angle),
                TurtleOp::Push => {
                    let saved = self.cursor;
                    self.stack.push(saved);
                    self.cursor.depth += 1;
                }
                TurtleOp::Pop => {
                    let restored = self
                        .stack
                        .pop()
                        .ok_or(LSystemError::StackUnderflow { position: i })?;
                    // Lift the pen from the branch end back to the saved cursor.
                    self.emit(self.cursor.position, VertexKind::Jump, generation);
                    self.emit(restored.position, VertexKind::Jump, generation);
                    self.cursor = restored;
                }
                TurtleOp::Ignore => {}
            }
        }

        debug_assert_eq!(
            self.geometry.vertices.len(),
            self.geometry.generations.len()
        );
        Ok(self.geometry)
    }
}

/// Produces iteration `parameters.iterations` of `lsys` and interprets it.
///
/// A malformed sequence aborts the pass with [`LSystemError::StackUnderflow`]; the
/// L-System and its cache are left as they were after production.
pub fn compute_vertices(
    lsys: &mut LSystem,
    map: &InterpretationMap,
    parameters: &DrawingParameters,
) -> Result<Geometry> {
    let generation = lsys.produce(parameters.iterations)?;
    Turtle::new(parameters, &generation.counts)
        .run(&generation.sequence, map)
}
