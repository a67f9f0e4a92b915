// SPDX-License-Identifier: Apache-2.0
//! The built-in demo scene: a hub node with satellites, fully inside
//! the translucent veil sphere.

use crate::{EdgeDef, NodeDef, SceneDef};

fn node(key: &str, position: [f32; 3], color: [f32; 3]) -> NodeDef {
    NodeDef {
        key: key.into(),
        position,
        color,
    }
}

fn edge(from: &str, to: &str) -> EdgeDef {
    EdgeDef {
        from: from.into(),
        to: to.into(),
    }
}

impl SceneDef {
    /// The fixed table the binary renders when no other scene is given.
    pub fn sample() -> Self {
        let nodes = vec![
            node("center", [0.0, 0.0, 0.0], [0.92, 0.90, 0.85]),
            node("n1", [1.2, 0.2, 0.0], [0.95, 0.35, 0.30]),
            node("n2", [-0.8, 0.7, 0.5], [0.20, 0.75, 0.70]),
            node("n3", [0.4, -0.6, 0.9], [0.95, 0.80, 0.25]),
            node("n4", [-0.5, -0.4, -1.0], [0.60, 0.40, 0.90]),
            node("n5", [0.7, 0.9, -0.6], [0.35, 0.60, 0.95]),
        ];
        let edges = vec![
            edge("center", "n1"),
            edge("center", "n2"),
            edge("center", "n3"),
            edge("center", "n4"),
            edge("center", "n5"),
            edge("n1", "n2"),
            edge("n3", "n5"),
        ];
        Self::new(nodes, edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VEIL_RADIUS;
    use std::collections::HashSet;

    #[test]
    fn sample_keys_are_unique() {
        let scene = SceneDef::sample();
        let keys: HashSet<&str> = scene.nodes.iter().map(|n| n.key.as_str()).collect();
        assert_eq!(keys.len(), scene.nodes.len());
    }

    #[test]
    fn sample_edges_all_resolve() {
        let scene = SceneDef::sample();
        let resolved = scene.resolve_edges();
        assert_eq!(resolved.dropped, 0);
        assert_eq!(resolved.segments.len(), scene.edges.len());
    }

    #[test]
    fn sample_nodes_sit_inside_the_veil() {
        for n in SceneDef::sample().nodes {
            let [x, y, z] = n.position;
            let r = (x * x + y * y + z * z).sqrt();
            assert!(r < VEIL_RADIUS, "{} is outside the veil", n.key);
        }
    }
}
