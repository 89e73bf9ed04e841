//! Pointer-cycle tracking for a single traversal.

/// Addresses being dereferenced on the active path, with the depth each was
/// first seen at.
///
/// Callers [`leave`](Self::leave) the addresses they added once the pointee
/// is rendered, so only ancestors of the current value remain.
#[derive(Debug, Default)]
pub(crate) struct PointerChain {
    entries: Vec<(usize, usize)>,
}

impl PointerChain {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Forget pointers recorded at `depth` or deeper.
    ///
    /// Those belong to sibling branches that were already exited.
    pub(crate) fn purge(&mut self, depth: usize) {
        self.entries.retain(|&(_, seen)| seen < depth);
    }

    /// Record `addr` at `depth`.
    ///
    /// `addr` is an ancestor when it was recorded at a depth strictly less
    /// than `depth`: following it would loop.
    pub(crate) fn enter(&mut self, addr: usize, depth: usize) -> Entry {
        if self.entries.iter().any(|&(a, seen)| a == addr && seen < depth) {
            tracing::trace!(addr = format_args!("{:#x}", addr), depth, "circular reference");
            return Entry::Ancestor;
        }
        if self.entries.iter().any(|&(a, _)| a == addr) {
            return Entry::Known;
        }
        self.entries.push((addr, depth));
        Entry::Added
    }

    /// Forget `addrs` once the branch that added them is finished.
    pub(crate) fn leave(&mut self, addrs: &[usize]) {
        self.entries.retain(|(a, _)| !addrs.contains(a));
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Outcome of [`PointerChain::enter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Entry {
    /// Newly recorded; the caller must [`leave`](PointerChain::leave) it.
    Added,
    /// Already recorded at this depth.
    Known,
    /// Recorded by an enclosing value.
    Ancestor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ancestor_is_a_cycle() {
        let mut chain = PointerChain::new();
        assert_eq!(chain.enter(0x10, 0), Entry::Added);
        assert_eq!(chain.enter(0x20, 1), Entry::Added);
        assert_eq!(chain.enter(0x10, 2), Entry::Ancestor);
    }

    #[test]
    fn test_same_depth_is_not_a_cycle() {
        let mut chain = PointerChain::new();
        assert_eq!(chain.enter(0x10, 1), Entry::Added);
        assert_eq!(chain.enter(0x10, 1), Entry::Known);
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn test_purge_forgets_siblings() {
        let mut chain = PointerChain::new();
        chain.enter(0x10, 0);
        chain.enter(0x20, 1);
        chain.enter(0x30, 2);

        chain.purge(1);

        assert_eq!(chain.len(), 1);
        assert_eq!(chain.enter(0x20, 2), Entry::Added);
        assert_eq!(chain.enter(0x10, 2), Entry::Ancestor);
    }

    #[test]
    fn test_left_pointer_is_not_an_ancestor() {
        let mut chain = PointerChain::new();
        chain.enter(0x10, 0);
        chain.enter(0x20, 1);

        chain.leave(&[0x20]);

        assert_eq!(chain.len(), 1);
        assert_eq!(chain.enter(0x20, 3), Entry::Added);
    }
}
