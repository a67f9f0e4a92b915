// SPDX-License-Identifier: Apache-2.0
//! Node/edge tables and edge resolution.

use std::collections::HashMap;

/// A single node: unique string key, world position, display color.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeDef {
    /// Unique identifier within the scene.
    pub key: String,
    /// World-space position [x, y, z].
    pub position: [f32; 3],
    /// Linear RGB marker color.
    pub color: [f32; 3],
}

/// A directed edge between two node keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeDef {
    /// Key of the start node.
    pub from: String,
    /// Key of the end node.
    pub to: String,
}

/// A resolved edge: start point then end point, six floats total.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeSegment {
    /// Start position (the edge's `from` node).
    pub start: [f32; 3],
    /// End position (the edge's `to` node).
    pub end: [f32; 3],
}

impl EdgeSegment {
    /// The segment as a contiguous `[sx, sy, sz, ex, ey, ez]` run.
    pub fn to_floats(self) -> [f32; 6] {
        let [sx, sy, sz] = self.start;
        let [ex, ey, ez] = self.end;
        [sx, sy, sz, ex, ey, ez]
    }
}

/// Outcome of resolving a scene's edge table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolvedEdges {
    /// One segment per edge whose both endpoints exist, in table order.
    pub segments: Vec<EdgeSegment>,
    /// Number of edges dropped because an endpoint key was unknown.
    pub dropped: usize,
}

/// A complete scene: node table plus edge table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneDef {
    /// All nodes, in insertion order.
    pub nodes: Vec<NodeDef>,
    /// All edges, in insertion order.
    pub edges: Vec<EdgeDef>,
}

impl SceneDef {
    /// Build a scene from explicit node and edge tables.
    pub fn new(nodes: Vec<NodeDef>, edges: Vec<EdgeDef>) -> Self {
        Self { nodes, edges }
    }

    /// Resolve every edge into a line segment by endpoint lookup.
    ///
    /// Edges referencing a key absent from the node table emit no
    /// segment; each such edge is logged and counted, and resolution
    /// never fails.
    pub fn resolve_edges(&self) -> ResolvedEdges {
        let by_key: HashMap<&str, [f32; 3]> = self
            .nodes
            .iter()
            .map(|n| (n.key.as_str(), n.position))
            .collect();

        let mut out = ResolvedEdges::default();
        for edge in &self.edges {
            match (by_key.get(edge.from.as_str()), by_key.get(edge.to.as_str())) {
                (Some(&start), Some(&end)) => out.segments.push(EdgeSegment { start, end }),
                _ => {
                    tracing::warn!(
                        from = %edge.from,
                        to = %edge.to,
                        "edge references unknown node, skipping"
                    );
                    out.dropped += 1;
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(key: &str, position: [f32; 3]) -> NodeDef {
        NodeDef {
            key: key.into(),
            position,
            color: [1.0, 1.0, 1.0],
        }
    }

    fn edge(from: &str, to: &str) -> EdgeDef {
        EdgeDef {
            from: from.into(),
            to: to.into(),
        }
    }

    #[test]
    fn resolves_edge_endpoints_in_order() {
        let scene = SceneDef::new(
            vec![node("center", [0.0, 0.0, 0.0]), node("n1", [1.2, 0.2, 0.0])],
            vec![edge("center", "n1")],
        );
        let resolved = scene.resolve_edges();
        assert_eq!(resolved.dropped, 0);
        assert_eq!(resolved.segments.len(), 1);
        assert_eq!(
            resolved.segments[0].to_floats(),
            [0.0, 0.0, 0.0, 1.2, 0.2, 0.0]
        );
    }

    #[test]
    fn unknown_endpoint_drops_edge_without_failing() {
        let scene = SceneDef::new(
            vec![node("center", [0.0, 0.0, 0.0]), node("n1", [1.2, 0.2, 0.0])],
            vec![edge("center", "ghost"), edge("center", "n1")],
        );
        let resolved = scene.resolve_edges();
        assert_eq!(resolved.dropped, 1);
        assert_eq!(resolved.segments.len(), 1);
        assert_eq!(resolved.segments[0].end, [1.2, 0.2, 0.0]);
    }

    #[test]
    fn both_endpoints_unknown_still_resolves_rest() {
        let scene = SceneDef::new(
            vec![node("a", [1.0, 0.0, 0.0]), node("b", [0.0, 1.0, 0.0])],
            vec![edge("x", "y"), edge("b", "a")],
        );
        let resolved = scene.resolve_edges();
        assert_eq!(resolved.dropped, 1);
        assert_eq!(resolved.segments.len(), 1);
        assert_eq!(resolved.segments[0].start, [0.0, 1.0, 0.0]);
        assert_eq!(resolved.segments[0].end, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn empty_scene_resolves_to_nothing() {
        let resolved = SceneDef::default().resolve_edges();
        assert!(resolved.segments.is_empty());
        assert_eq!(resolved.dropped, 0);
    }
}
