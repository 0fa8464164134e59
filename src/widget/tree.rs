use super::Node;

/// Stable handle to a top-level widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

/// Top-level widgets in insertion order (paint and dispatch order)
#[derive(Debug, Default)]
pub struct WidgetTree {
    nodes: Vec<(WidgetId, Node)>,
    next_id: u64,
}

impl WidgetTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: impl Into<Node>) -> WidgetId {
        let id = WidgetId(self.next_id);
        self.next_id += 1;
        self.nodes.push((id, node.into()));
        id
    }

    /// Detach a widget. Ids are never reused.
    pub fn remove(&mut self, id: WidgetId) -> Option<Node> {
        let pos = self.nodes.iter().position(|(node_id, _)| *node_id == id)?;
        Some(self.nodes.remove(pos).1)
    }

    pub fn get(&self, id: WidgetId) -> Option<&Node> {
        self.nodes
            .iter()
            .find(|(node_id, _)| *node_id == id)
            .map(|(_, node)| node)
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut Node> {
        self.nodes
            .iter_mut()
            .find(|(node_id, _)| *node_id == id)
            .map(|(_, node)| node)
    }

    pub fn iter(&self) -> impl Iterator<Item = (WidgetId, &Node)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (WidgetId, &mut Node)> {
        self.nodes.iter_mut().map(|(id, node)| (*id, node))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
