//! Turtle state, drawing parameters and the primitive operation alphabet.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Parameters that drive a turtle pass.
///
/// Angles are in radians. A positive turn is counter-clockwise in a y-up frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrawingParameters {
    /// Where the turtle starts, in world space.
    pub starting_position: Vec2,

    /// Initial heading.
    pub starting_angle: f32,

    /// Heading change applied by a single turn.
    pub delta_angle: f32,

    /// Distance travelled by a single forward step.
    pub step: f32,

    /// The L-System iteration to interpret.
    pub iterations: usize,
}

impl Default for DrawingParameters {
    fn default() -> Self {
        Self {
            starting_position: Vec2::ZERO,
            starting_angle: 0.0,
            delta_angle: 90.0f32.to_radians(),
            step: 10.0,
            iterations: 0,
        }
    }
}

/// The active cursor of the turtle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurtleState {
    /// Current world-space position of the cursor.
    pub position: Vec2,

    /// Current heading in radians.
    pub heading: f32,

    /// Number of states saved beneath this one.
    pub depth: usize,
}

impl TurtleState {
    pub fn new(position: Vec2, heading: f32) -> Self {
        Self {
            position,
            heading,
            depth: 0,
        }
    }

    /// Unit vector pointing along the current heading.
    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.heading)
    }

    /// Moves the cursor `step` units along its heading.
    pub fn advance(&mut self, step: f32) {
        self.position += self.direction() * step;
    }

    /// Turns the cursor by `angle` radians (counter-clockwise when positive).
    pub fn turn(&mut self, angle: f32) {
        self.heading += angle;
    }
}

/// Operations the turtle understands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurtleOp {
    /// Move forward one step and emit a vertex (`F`, `G`).
    Forward,
    /// Increase the heading by the angle delta (`+`).
    TurnLeft,
    /// Decrease the heading by the angle delta (`-`).
    TurnRight,
    /// Save the cursor onto the stack (`[`).
    Push,
    /// Restore the most recently saved cursor (`]`).
    Pop,
    /// No-op: the symbol has no geometric meaning.
    #[default]
    Ignore,
}
