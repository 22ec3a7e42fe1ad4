//! Search engines. [astar::PathFinder] searches a [Graph](crate::Graph) for the fastest route,
//! [cells::CellPathFinder] searches a [CostGrid](crate::CostGrid) for the cheapest route of a
//! possibly multi-cell agent. Both report their progress to a [SearchObserver].
pub mod astar;
pub mod cells;

/// Callbacks invoked while a search runs. `N` is the node type of the searched space. All
/// methods default to doing nothing.
pub trait SearchObserver<N> {
    /// A node was taken off the open set to be expanded.
    fn on_node_visited(&mut self, _node: N) {}
    /// A node was put on the open set, either for the first time or with a lower cost.
    fn on_node_opened(&mut self, _node: N) {}
    /// All neighbours of a visited node were considered.
    fn on_node_closed(&mut self, _node: N) {}
}

/// A [SearchObserver] that ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl<N> SearchObserver<N> for NoopObserver {}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchStep<N> {
    Visited(N),
    Opened(N),
    Closed(N),
}

/// Records every event of a search in order, for replaying or inspecting it afterwards.
#[derive(Clone, Debug)]
pub struct SearchRecorder<N> {
    pub steps: Vec<SearchStep<N>>,
}

impl<N> Default for SearchRecorder<N> {
    fn default() -> SearchRecorder<N> {
        SearchRecorder { steps: Vec::new() }
    }
}

impl<N: Copy + PartialEq> SearchRecorder<N> {
    pub fn new() -> SearchRecorder<N> {
        SearchRecorder::default()
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    /// Nodes in the order they were visited.
    pub fn visited(&self) -> Vec<N> {
        self.steps
            .iter()
            .filter_map(|s| match s {
                SearchStep::Visited(n) => Some(*n),
                _ => None,
            })
            .collect()
    }

    pub fn was_visited(&self, node: N) -> bool {
        self.steps.contains(&SearchStep::Visited(node))
    }
}

impl<N> SearchObserver<N> for SearchRecorder<N> {
    fn on_node_visited(&mut self, node: N) {
        self.steps.push(SearchStep::Visited(node));
    }
    fn on_node_opened(&mut self, node: N) {
        self.steps.push(SearchStep::Opened(node));
    }
    fn on_node_closed(&mut self, node: N) {
        self.steps.push(SearchStep::Closed(node));
    }
}
