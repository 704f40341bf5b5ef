//! Integration tests for tree structure and lifecycle.

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use easel::{
        Result, UpdateContext, Widget,
        geom::Size,
        state::Lifecycle,
        testing::Harness,
    };

    /// A widget that counts its lifecycle hook invocations.
    struct Probe {
        /// Ready hook count.
        ready: Arc<AtomicUsize>,
        /// Destroy hook count.
        destroyed: Arc<AtomicUsize>,
    }

    impl Probe {
        fn new(ready: &Arc<AtomicUsize>, destroyed: &Arc<AtomicUsize>) -> Self {
            Self {
                ready: Arc::clone(ready),
                destroyed: Arc::clone(destroyed),
            }
        }
    }

    impl Widget for Probe {
        fn on_ready(&mut self, _ctx: &mut UpdateContext) -> Result<()> {
            self.ready.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }

        fn on_destroy(&mut self) {
            self.destroyed.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn free_is_deferred_until_batch_free() -> Result<()> {
        let ready = Arc::new(AtomicUsize::new(0));
        let destroyed = Arc::new(AtomicUsize::new(0));
        let mut h = Harness::new(Size::new(100.0, 100.0));
        let root = h.root();
        let node = h.add_under(root, Probe::new(&ready, &destroyed))?;
        let child = h.add_under(node, Probe::new(&ready, &destroyed))?;

        h.scene_mut().free(node)?;

        // Still attached: teardown waits for the batch-free phase.
        assert!(h.scene().get(root)?.children().contains(&node));
        assert_eq!(h.scene().lifecycle(node), Lifecycle::Destroying);
        assert_eq!(h.scene().lifecycle(child), Lifecycle::Destroying);
        assert_eq!(destroyed.load(Ordering::Relaxed), 0);

        h.step()?;

        assert!(!h.scene().get(root)?.children().contains(&node));
        assert_eq!(h.scene().lifecycle(node), Lifecycle::Destroyed);
        assert_eq!(h.scene().lifecycle(child), Lifecycle::Destroyed);
        // The subtree's destroy hooks ran in the same sweep.
        assert_eq!(destroyed.load(Ordering::Relaxed), 2);

        Ok(())
    }

    #[test]
    fn free_is_idempotent() -> Result<()> {
        let ready = Arc::new(AtomicUsize::new(0));
        let destroyed = Arc::new(AtomicUsize::new(0));
        let mut h = Harness::new(Size::new(100.0, 100.0));
        let root = h.root();
        let node = h.add_under(root, Probe::new(&ready, &destroyed))?;

        h.scene_mut().free(node)?;
        h.scene_mut().free(node)?;
        h.step()?;

        assert_eq!(destroyed.load(Ordering::Relaxed), 1);
        Ok(())
    }

    #[test]
    fn ready_fires_once_when_first_attached() -> Result<()> {
        let ready = Arc::new(AtomicUsize::new(0));
        let destroyed = Arc::new(AtomicUsize::new(0));
        let mut h = Harness::new(Size::new(100.0, 100.0));
        let root = h.root();

        // Created detached: no ready yet.
        let id = h.scene_mut().add(Probe::new(&ready, &destroyed)).into();
        assert_eq!(h.scene().lifecycle(id), Lifecycle::Created);
        assert_eq!(ready.load(Ordering::Relaxed), 0);

        // Attaching under the ready root fires the hook once.
        h.scene_mut().attach(root, id)?;
        assert_eq!(h.scene().lifecycle(id), Lifecycle::Ready);
        assert_eq!(ready.load(Ordering::Relaxed), 1);

        // Re-attaching elsewhere does not fire it again.
        h.scene_mut().detach(id)?;
        h.scene_mut().attach(root, id)?;
        assert_eq!(ready.load(Ordering::Relaxed), 1);

        Ok(())
    }

    #[test]
    fn ready_propagates_to_descendants_on_attach() -> Result<()> {
        let ready = Arc::new(AtomicUsize::new(0));
        let destroyed = Arc::new(AtomicUsize::new(0));
        let mut h = Harness::new(Size::new(100.0, 100.0));
        let root = h.root();

        // Build a detached subtree first.
        let parent = h.scene_mut().add(Probe::new(&ready, &destroyed)).into();
        let child = h.scene_mut().add(Probe::new(&ready, &destroyed)).into();
        h.scene_mut().attach(parent, child)?;
        assert_eq!(ready.load(Ordering::Relaxed), 0);
        assert_eq!(h.scene().lifecycle(child), Lifecycle::Created);

        h.scene_mut().attach(root, parent)?;
        assert_eq!(ready.load(Ordering::Relaxed), 2);
        assert_eq!(h.scene().lifecycle(child), Lifecycle::Ready);

        Ok(())
    }

    #[test]
    fn freed_node_cannot_be_reattached() -> Result<()> {
        let ready = Arc::new(AtomicUsize::new(0));
        let destroyed = Arc::new(AtomicUsize::new(0));
        let mut h = Harness::new(Size::new(100.0, 100.0));
        let root = h.root();
        let node = h.add_under(root, Probe::new(&ready, &destroyed))?;

        h.scene_mut().free(node)?;
        h.scene_mut().detach(node)?;
        assert!(h.scene_mut().attach(root, node).is_err());
        Ok(())
    }
}
