// SPDX-License-Identifier: Apache-2.0
//! Disposal manifest for GPU allocations.
//!
//! Every scene resource allocated at mount time is registered here, and
//! teardown drains the whole set in one pass. Completeness of release is
//! the manifest's invariant: the drain count must equal the registration
//! count, which keeps resource symmetry checkable.

/// A handle whose underlying allocation can be released exactly once.
pub trait Disposable {
    /// Release the underlying allocation.
    fn dispose(self);
}

/// A scene buffer registered for release. wgpu handles are internally
/// reference counted, so the manifest holds clones and `destroy`
/// releases the underlying allocation regardless of other clones.
/// Render attachments are not scene resources; they are released with
/// the renderer itself.
pub struct GpuHandle(pub wgpu::Buffer);

impl Disposable for GpuHandle {
    fn dispose(self) {
        self.0.destroy();
    }
}

/// Manifest of disposable handles, built during construction and
/// drained during teardown.
pub struct DisposalSet<T> {
    items: Vec<T>,
}

impl<T: Disposable> Default for DisposalSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Disposable> DisposalSet<T> {
    /// An empty manifest.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Register a handle for release at teardown.
    pub fn track(&mut self, item: T) {
        self.items.push(item);
    }

    /// Number of handles currently registered.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the manifest holds nothing.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Release every registered handle and return how many were
    /// released. A second drain releases nothing.
    pub fn drain(&mut self) -> usize {
        let n = self.items.len();
        for item in self.items.drain(..) {
            item.dispose();
        }
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Counted(Rc<Cell<usize>>);

    impl Disposable for Counted {
        fn dispose(self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn drain_releases_every_tracked_handle() {
        let released = Rc::new(Cell::new(0));
        let mut set = DisposalSet::new();
        for _ in 0..5 {
            set.track(Counted(Rc::clone(&released)));
        }
        assert_eq!(set.len(), 5);
        assert_eq!(set.drain(), 5);
        assert_eq!(released.get(), 5);
        assert!(set.is_empty());
    }

    #[test]
    fn second_drain_releases_nothing() {
        let released = Rc::new(Cell::new(0));
        let mut set = DisposalSet::new();
        set.track(Counted(Rc::clone(&released)));
        assert_eq!(set.drain(), 1);
        assert_eq!(set.drain(), 0);
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn empty_manifest_drains_to_zero() {
        let mut set: DisposalSet<Counted> = DisposalSet::new();
        assert_eq!(set.drain(), 0);
    }
}
