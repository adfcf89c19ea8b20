use egui::{
    emath::RectTransform, pos2, Align2, Color32, FontId, Painter, Pos2, Rect, Response, Sense,
    Stroke, Ui, Widget,
};

use crate::graph::{EdgeKey, Graph, NodeId};
use crate::session::Session;
use crate::settings::SettingsStyle;
use crate::traversal::{format_distance, Snapshot};

/// How a node is highlighted. Later variants win over earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NodeRole {
    Idle,
    Pending,
    Visited,
    Current,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EdgeRole {
    Idle,
    Traversed,
    Tree,
}

pub fn node_role(snapshot: Option<&Snapshot>, id: NodeId) -> NodeRole {
    let Some(s) = snapshot else {
        return NodeRole::Idle;
    };

    if s.current == Some(id) {
        NodeRole::Current
    } else if s.is_visited(id) {
        NodeRole::Visited
    } else if s.is_pending(id) {
        NodeRole::Pending
    } else {
        NodeRole::Idle
    }
}

pub fn edge_role(snapshot: Option<&Snapshot>, key: EdgeKey) -> EdgeRole {
    let Some(s) = snapshot else {
        return EdgeRole::Idle;
    };

    if s.is_tree_edge(key) {
        EdgeRole::Tree
    } else if s.is_traversed(key) {
        EdgeRole::Traversed
    } else {
        EdgeRole::Idle
    }
}

/// Paints `graph` into `rect`, colored by the traversal state in `snapshot`.
///
/// Node locations are normalized, they are mapped onto `rect` minus a margin of two
/// node radii so circles at the border stay fully visible.
pub fn draw(
    painter: &Painter,
    rect: Rect,
    graph: &Graph,
    snapshot: Option<&Snapshot>,
    style: &SettingsStyle,
) {
    let to_screen = RectTransform::from_to(
        Rect::from_min_max(Pos2::ZERO, pos2(1., 1.)),
        rect.shrink(style.node_radius * 2.),
    );
    let screen_pos = |id: NodeId| graph.node(id).map(|n| to_screen.transform_pos(n.location()));

    for e in graph.edges() {
        let (Some(from), Some(to)) = (screen_pos(e.from), screen_pos(e.to)) else {
            continue;
        };
        let stroke = match edge_role(snapshot, e.key()) {
            EdgeRole::Idle => Stroke::new(style.edge_width, style.edge_idle),
            EdgeRole::Traversed => Stroke::new(style.highlight_width, style.edge_traversed),
            EdgeRole::Tree => Stroke::new(style.highlight_width, style.edge_tree),
        };
        painter.line_segment([from, to], stroke);

        if graph.is_weighted() && style.show_weights {
            painter.text(
                from.lerp(to, 0.5),
                Align2::CENTER_CENTER,
                e.weight.to_string(),
                FontId::proportional(style.node_radius * 0.9),
                stroke.color,
            );
        }
    }

    for n in graph.nodes() {
        let center = to_screen.transform_pos(n.location());
        let fill = node_color(node_role(snapshot, n.id()), style);
        painter.circle_filled(center, style.node_radius, fill);
        painter.text(
            center,
            Align2::CENTER_CENTER,
            n.label(),
            FontId::monospace(style.node_radius),
            style.label,
        );

        // tentative distance under the node
        if let Some(s) = snapshot.filter(|s| !s.distances.is_empty()) {
            painter.text(
                center + egui::vec2(0., style.node_radius * 1.8),
                Align2::CENTER_CENTER,
                format_distance(s.distance(n.id())),
                FontId::monospace(style.node_radius * 0.8),
                fill,
            );
        }
    }
}

fn node_color(role: NodeRole, style: &SettingsStyle) -> Color32 {
    match role {
        NodeRole::Idle => style.node_idle,
        NodeRole::Pending => style.node_pending,
        NodeRole::Visited => style.node_visited,
        NodeRole::Current => style.node_current,
    }
}

/// Read-only widget painting a session's graph and the traversal running on it.
pub struct TraversalView<'a> {
    graph: &'a Graph,
    snapshot: Option<Snapshot>,
    style: &'a SettingsStyle,
}

impl<'a> TraversalView<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self {
            graph: session.graph(),
            snapshot: session.snapshot(),
            style: &session.settings().style,
        }
    }

    /// Paints `graph` alone, without any traversal state.
    pub fn from_graph(graph: &'a Graph, style: &'a SettingsStyle) -> Self {
        Self {
            graph,
            snapshot: None,
            style,
        }
    }
}

impl Widget for TraversalView<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
        draw(
            &painter,
            response.rect,
            self.graph,
            self.snapshot.as_ref(),
            self.style,
        );

        response
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::algorithms::Algorithm;
    use crate::graph::Edge;
    use crate::traversal::Traversal;

    fn snapshot_after(algorithm: Algorithm, steps: usize) -> Snapshot {
        let g = Graph::from_parts(
            ["A", "B", "C"],
            [Edge::new(0, 1, 2), Edge::new(1, 2, 3), Edge::new(0, 2, 9)],
        )
        .unwrap();
        let mut t = Traversal::start(algorithm, Arc::new(g));
        for _ in 0..steps {
            t.step();
        }
        t.snapshot()
    }

    #[test]
    fn no_traversal_means_idle() {
        assert_eq!(node_role(None, 0), NodeRole::Idle);
        assert_eq!(edge_role(None, EdgeKey::new(0, 1)), EdgeRole::Idle);
    }

    #[test]
    fn node_roles_follow_bfs_frontier() {
        let s = snapshot_after(Algorithm::Bfs, 1);
        assert_eq!(node_role(Some(&s), 0), NodeRole::Current);
        assert_eq!(node_role(Some(&s), 1), NodeRole::Pending);
        assert_eq!(node_role(Some(&s), 2), NodeRole::Pending);

        let s = snapshot_after(Algorithm::Bfs, 2);
        assert_eq!(node_role(Some(&s), 0), NodeRole::Visited);
        assert_eq!(node_role(Some(&s), 1), NodeRole::Current);
    }

    #[test]
    fn tree_edges_win_over_traversed() {
        let mut s = snapshot_after(Algorithm::Kruskal, 1);
        assert_eq!(edge_role(Some(&s), EdgeKey::new(0, 1)), EdgeRole::Tree);
        assert_eq!(edge_role(Some(&s), EdgeKey::new(0, 2)), EdgeRole::Idle);

        s.traversed.push(EdgeKey::new(0, 2));
        assert_eq!(edge_role(Some(&s), EdgeKey::new(0, 2)), EdgeRole::Traversed);
    }

    #[test]
    fn finished_traversal_has_no_current_node() {
        let s = snapshot_after(Algorithm::Dijkstra, 20);
        assert!(s.finished);
        assert_eq!(s.current, None);
        assert!((0..3).all(|id| node_role(Some(&s), id) == NodeRole::Visited));
    }
}
