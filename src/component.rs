use crate::markup::Node;

/// Something that renders to markup as a pure function of its current state.
///
/// Lifecycle hooks default to no-ops; hosts call `mounted` once after
/// construction, `updated` after each state change and `unmounted` on teardown.
pub trait Component {
    fn render(&self) -> Node;

    fn mounted(&mut self) {}

    fn updated(&mut self) {}

    fn unmounted(&mut self) {}
}
