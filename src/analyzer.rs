//! Consumer side of the parse: receives node and component events from the
//! parser and accumulates whatever the caller wants out of the component
//! tree.

/// Event sink of the component-tree parser.
///
/// Components live inside the analyzer; the parser only holds opaque
/// `ComponentRef` handles and never inspects them beyond `level_of`. After a
/// `merge_into` the `src` handle is invalid and must not be used again.
pub trait ComponentAnalyzer {
    type NodeIndex: Copy;
    type Value: Copy;
    type ComponentRef: Copy;
    type Result;

    /// Opens an empty component at `level`. The parser calls this once per
    /// parse, for the stack sentinel.
    fn new_component(&mut self, level: Self::Value) -> Self::ComponentRef;

    /// Opens a component born at `node`, a freshly discovered local extremum.
    fn new_component_at(
        &mut self,
        node: Self::NodeIndex,
        level: Self::Value,
    ) -> Self::ComponentRef;

    /// Attaches `node` at `level` to an open component. If `level` lies past
    /// the component's current level, the component is advanced first,
    /// recording one history step per unit of level.
    fn add_node(&mut self, node: Self::NodeIndex, level: Self::Value, component: Self::ComponentRef);

    /// Advances a component's level without attaching a node; same history
    /// obligation as `add_node`.
    fn raise_level(&mut self, component: Self::ComponentRef, level: Self::Value);

    /// Folds `src` into `dst` at `level`; `dst` survives. Both operands are
    /// advanced to `level` before their statistics are combined.
    fn merge_into(&mut self, src: Self::ComponentRef, dst: Self::ComponentRef, level: Self::Value);

    /// Current level of an open component.
    fn level_of(&self, component: Self::ComponentRef) -> Self::Value;

    /// Finalizes and hands back the accumulated output.
    fn into_result(self) -> Self::Result;
}
