// SPDX-License-Identifier: Apache-2.0
//! Scene data model for the Orrery viewer.
//!
//! This crate defines the node/edge tables the viewer renders and the
//! resolution step that turns edges into literal line segments. It is
//! pure data — GPU upload and windowing live in `orrery-viewer`.
//!
//! Nodes are immutable for the session: a [`SceneDef`] is built once and
//! handed to the viewport at mount time. The built-in table lives in
//! [`SceneDef::sample`]; any other table can be passed through the same
//! constructor.

mod sample;
mod types;

pub use types::{EdgeDef, EdgeSegment, NodeDef, ResolvedEdges, SceneDef};

/// Scene background color, sRGB components of `#0b0f19`.
pub const BACKGROUND_SRGB: [f32; 3] = [0.043137256, 0.05882353, 0.098039216];

/// Radius of the translucent enclosing sphere.
pub const VEIL_RADIUS: f32 = 1.5;

/// Opacity of the translucent enclosing sphere.
pub const VEIL_OPACITY: f32 = 0.08;

/// Radius of each node marker sphere.
pub const MARKER_RADIUS: f32 = 0.2;
