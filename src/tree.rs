//! Quasi-linear component-tree construction.
//!
//! The parser simulates a monotone flood-fill: nodes are popped from the
//! frontier in value order while a stack of open components mirrors the
//! descending path from the tree root to the component currently being
//! grown. Stack levels are strictly monotone, smallest on top, with a
//! sentinel at `inf` at the bottom that is never popped.

use crate::analyzer::ComponentAnalyzer;
use crate::graph::{GraphAccessor, PriorityFrontier};

/// Drives a [`GraphAccessor`] / [`PriorityFrontier`] / [`ComponentAnalyzer`]
/// triple and returns the analyzer's result.
///
/// In inverted mode the roles of `INF`/`MINF` and of the value order swap,
/// so the same loop extracts max-trees instead of min-trees.
#[derive(Clone, Copy, Debug)]
pub struct ComponentTreeParser {
    inverted: bool,
}

impl ComponentTreeParser {
    pub fn new(inverted: bool) -> Self {
        Self { inverted }
    }

    pub fn inverted(&self) -> bool {
        self.inverted
    }

    #[inline]
    fn less<V: Ord>(&self, a: V, b: V) -> bool {
        if self.inverted {
            b < a
        } else {
            a < b
        }
    }

    #[inline]
    fn inf<G: GraphAccessor>(&self) -> G::Value {
        if self.inverted {
            G::MINF
        } else {
            G::INF
        }
    }

    /// Parses the graph reachable from `graph.source()`.
    ///
    /// Every reachable node ends up in exactly one `new_component_at` or
    /// `add_node` event; disconnected parts of the graph are never visited.
    pub fn parse<G, P, A>(&self, graph: &mut G, frontier: &mut P, mut analyzer: A) -> A::Result
    where
        G: GraphAccessor,
        P: PriorityFrontier<NodeIndex = G::NodeIndex, Value = G::Value>,
        A: ComponentAnalyzer<NodeIndex = G::NodeIndex, Value = G::Value>,
    {
        let mut stack = ComponentStack::new(analyzer.new_component(self.inf::<G>()));

        let source = graph.source();
        frontier.push(source, graph.value(source));
        let mut flowing_down = true;

        while let Some(mut current) = frontier.pop() {
            self.raise_to(&mut stack, &mut analyzer, graph.value(current));

            while let Some(neighbor) = graph.next_neighbor(current) {
                if self.less(graph.value(neighbor), graph.value(current)) {
                    // Strictly lower neighbor: abandon `current` to the
                    // frontier and keep descending. Equal values never
                    // descend; they are popped later as peers.
                    flowing_down = true;
                    frontier.push(current, graph.value(current));
                    current = neighbor;
                } else {
                    frontier.push(neighbor, graph.value(neighbor));
                }
            }

            if flowing_down {
                // Cursor exhausted while flowing down: `current` is a local
                // extremum and opens a new component.
                let component = analyzer.new_component_at(current, graph.value(current));
                stack.push(component);
                flowing_down = false;
            } else {
                analyzer.add_node(current, graph.value(current), stack.top());
            }
        }

        // Flush every open component into the sentinel so the analyzer sees
        // the outermost levels too.
        self.raise_to(&mut stack, &mut analyzer, self.inf::<G>());
        analyzer.into_result()
    }

    /// Restores the stack contract after the flood level moved to `level`:
    /// on return the top component sits at `level`, or only the sentinel is
    /// left.
    fn raise_to<A>(
        &self,
        stack: &mut ComponentStack<A::ComponentRef>,
        analyzer: &mut A,
        level: A::Value,
    ) where
        A: ComponentAnalyzer,
        A::Value: Ord,
    {
        while self.less(analyzer.level_of(stack.top()), level) {
            // The sentinel bounds the loop, so a second entry exists here.
            let next = analyzer.level_of(stack.below_top());
            if self.less(level, next) {
                analyzer.raise_level(stack.top(), level);
            } else {
                // Ties take the merge path; merging happens at `next`, the
                // lower of the two joined levels, which keeps stack levels
                // strictly monotone.
                let top = stack.pop();
                analyzer.merge_into(top, stack.top(), next);
            }
        }
    }
}

/// Stack of open components; index 0 holds the sentinel.
struct ComponentStack<C> {
    components: Vec<C>,
}

impl<C: Copy> ComponentStack<C> {
    fn new(sentinel: C) -> Self {
        Self {
            components: vec![sentinel],
        }
    }

    fn push(&mut self, component: C) {
        self.components.push(component);
    }

    fn pop(&mut self) -> C {
        self.components.pop().unwrap()
    }

    fn top(&self) -> C {
        *self.components.last().unwrap()
    }

    fn below_top(&self) -> C {
        self.components[self.components.len() - 2]
    }
}
