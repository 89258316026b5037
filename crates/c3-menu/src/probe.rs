#![forbid(unsafe_code)]

//! Dimension probe: rendered size of the menu container.
//!
//! The menu's reveal radius depends on how tall its container renders,
//! which is only known after layout. The probe turns a node handle into a
//! reactive [`Dimensions`] value:
//!
//! 1. [`attach`](DimensionProbe::attach) takes the node and subscribes to
//!    the host's viewport resize source.
//! 2. [`after_paint`](DimensionProbe::after_paint) takes the first
//!    measurement. Measurements before the first paint are unreliable
//!    (often 0), so resizes that arrive earlier are ignored.
//! 3. Every later resize re-measures, either immediately or, with a
//!    debounce window, once the burst goes quiet. The window is measured
//!    on the probe's own frame clock, moved forward by
//!    [`advance`](DimensionProbe::advance), so the same input sequence
//!    always re-measures on the same frame.
//! 4. [`detach`](DimensionProbe::detach), or dropping the probe, releases
//!    the subscription.
//!
//! A probe with no node, or whose node cannot be measured, keeps reporting
//! its last value (zero if it never measured). It never fails.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use c3_core::geometry::Dimensions;
use c3_core::reactive::{Observable, Subscription};
use c3_core::resize_coalescer::ResizeCoalescer;
use tracing::trace;
use web_time::Instant;

/// A rendered node whose size can be read after layout.
pub trait NodeHandle {
    /// Current bounding size, or `None` while the node is not in the tree.
    fn measure(&self) -> Option<Dimensions>;
}

/// A node whose size is set by the host, for headless hosts and tests.
#[derive(Debug, Default)]
pub struct SimulatedNode {
    size: Cell<Option<Dimensions>>,
    reads: Cell<u64>,
}

impl SimulatedNode {
    /// A node already laid out at `size`.
    #[must_use]
    pub fn new(size: Dimensions) -> Self {
        Self {
            size: Cell::new(Some(size)),
            reads: Cell::new(0),
        }
    }

    /// A node that is not in the tree.
    #[must_use]
    pub fn detached() -> Self {
        Self::default()
    }

    /// Change the laid-out size.
    pub fn set_size(&self, size: Dimensions) {
        self.size.set(Some(size));
    }

    /// Remove the node from the tree.
    pub fn remove(&self) {
        self.size.set(None);
    }

    /// How many times the node has been measured.
    #[must_use]
    pub fn reads(&self) -> u64 {
        self.reads.get()
    }
}

impl NodeHandle for SimulatedNode {
    fn measure(&self) -> Option<Dimensions> {
        self.reads.set(self.reads.get() + 1);
        self.size.get()
    }
}

/// Shared between the probe and its resize callback.
struct ProbeShared {
    node: RefCell<Option<Rc<dyn NodeHandle>>>,
    output: Observable<Dimensions>,
    coalescer: RefCell<ResizeCoalescer>,
    painted: Cell<bool>,
    /// Frame clock: `origin` plus the frame time advanced so far.
    origin: Instant,
    elapsed: Cell<Duration>,
}

impl ProbeShared {
    fn now(&self) -> Instant {
        self.origin + self.elapsed.get()
    }

    fn measure(&self) -> Dimensions {
        let measured = self.node.borrow().as_ref().and_then(|node| node.measure());
        if let Some(dims) = measured {
            trace!(width = dims.width, height = dims.height, "menu container measured");
            self.output.set(dims);
        }
        self.output.get()
    }

    fn on_resize(&self, viewport: Dimensions) {
        if !self.painted.get() {
            return;
        }
        let released = self.coalescer.borrow_mut().push(viewport, self.now());
        if released.is_some() {
            self.measure();
        }
    }
}

/// Reactive size of a mounted container.
pub struct DimensionProbe {
    shared: Rc<ProbeShared>,
    subscription: Option<Subscription>,
}

impl fmt::Debug for DimensionProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DimensionProbe")
            .field("dimensions", &self.shared.output.get())
            .field("attached", &self.shared.node.borrow().is_some())
            .field("painted", &self.shared.painted.get())
            .field("listening", &self.subscription.is_some())
            .finish()
    }
}

impl Default for DimensionProbe {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl DimensionProbe {
    /// A detached probe. `debounce` is the resize quiet window.
    #[must_use]
    pub fn new(debounce: Duration) -> Self {
        Self {
            shared: Rc::new(ProbeShared {
                node: RefCell::new(None),
                output: Observable::new(Dimensions::ZERO),
                coalescer: RefCell::new(ResizeCoalescer::new(debounce)),
                painted: Cell::new(false),
                origin: Instant::now(),
                elapsed: Cell::new(Duration::ZERO),
            }),
            subscription: None,
        }
    }

    /// Attach to `node` and start listening to `viewport` resizes.
    ///
    /// Re-attaching replaces the previous node and subscription.
    pub fn attach(&mut self, node: Rc<dyn NodeHandle>, viewport: &Observable<Dimensions>) {
        self.subscription = None;
        *self.shared.node.borrow_mut() = Some(node);
        let shared = Rc::clone(&self.shared);
        self.subscription = Some(viewport.subscribe(move |size| shared.on_resize(*size)));
    }

    /// Signal that the first frame has been painted and measure.
    pub fn after_paint(&mut self) -> Dimensions {
        self.shared.painted.set(true);
        self.shared.measure()
    }

    /// Move the frame clock forward by `dt` and release a coalesced
    /// resize whose quiet window has passed.
    ///
    /// Returns the new measurement when one was taken.
    pub fn advance(&mut self, dt: Duration) -> Option<Dimensions> {
        let shared = &self.shared;
        shared.elapsed.set(shared.elapsed.get().saturating_add(dt));
        let released = shared.coalescer.borrow_mut().poll(shared.now());
        released.map(|_| shared.measure())
    }

    /// Measure right now, regardless of paint or debounce state.
    pub fn measure(&self) -> Dimensions {
        self.shared.measure()
    }

    /// Stop listening and forget the node. The last value is kept.
    pub fn detach(&mut self) {
        self.subscription = None;
        *self.shared.node.borrow_mut() = None;
        self.shared.coalescer.borrow_mut().flush();
        self.shared.painted.set(false);
    }

    /// Latest measurement (zero before the first one).
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.shared.output.get()
    }

    /// Handle to the reactive output.
    #[must_use]
    pub fn output(&self) -> Observable<Dimensions> {
        self.shared.output.clone()
    }

    /// Whether a resize subscription is held.
    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.subscription.is_some()
    }

    /// Whether a resize is waiting for its quiet window.
    #[must_use]
    pub fn has_pending_resize(&self) -> bool {
        self.shared.coalescer.borrow().has_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(h: f64) -> Dimensions {
        Dimensions::new(300.0, h)
    }

    fn mounted(h: f64, debounce: Duration) -> (DimensionProbe, Rc<SimulatedNode>, Observable<Dimensions>) {
        let node = Rc::new(SimulatedNode::new(dims(h)));
        let viewport = Observable::new(dims(h));
        let mut probe = DimensionProbe::new(debounce);
        probe.attach(node.clone(), &viewport);
        (probe, node, viewport)
    }

    #[test]
    fn default_before_first_paint() {
        let (probe, node, _viewport) = mounted(800.0, Duration::ZERO);
        assert_eq!(probe.dimensions(), Dimensions::ZERO);
        assert_eq!(node.reads(), 0);
    }

    #[test]
    fn measures_after_paint() {
        let (mut probe, _node, _viewport) = mounted(800.0, Duration::ZERO);
        assert_eq!(probe.after_paint(), dims(800.0));
        assert_eq!(probe.dimensions().height, 800.0);
    }

    #[test]
    fn resize_before_paint_ignored() {
        let (probe, node, viewport) = mounted(800.0, Duration::ZERO);
        node.set_size(dims(900.0));
        viewport.set(dims(900.0));
        assert_eq!(node.reads(), 0);
        assert_eq!(probe.dimensions(), Dimensions::ZERO);
    }

    #[test]
    fn resize_remeasures() {
        let (mut probe, node, viewport) = mounted(800.0, Duration::ZERO);
        probe.after_paint();
        node.set_size(dims(640.0));
        viewport.set(dims(640.0));
        assert_eq!(probe.dimensions().height, 640.0);
    }

    #[test]
    fn debounced_resize_waits_for_quiet_frames() {
        let (mut probe, node, viewport) = mounted(800.0, Duration::from_millis(50));
        probe.after_paint();
        for h in [700.0, 650.0, 600.0] {
            node.set_size(dims(h));
            viewport.set(dims(h));
        }
        assert!(probe.has_pending_resize());
        assert_eq!(probe.dimensions().height, 800.0);

        assert_eq!(probe.advance(Duration::from_millis(16)), None);
        assert_eq!(probe.advance(Duration::from_millis(16)), None);
        assert_eq!(probe.advance(Duration::from_millis(16)), None);
        assert_eq!(probe.advance(Duration::from_millis(16)), Some(dims(600.0)));
        assert!(!probe.has_pending_resize());
        assert_eq!(probe.advance(Duration::from_millis(100)), None);
        assert_eq!(node.reads(), 2);
    }

    #[test]
    fn resize_during_window_restarts_it() {
        let (mut probe, node, viewport) = mounted(800.0, Duration::from_millis(50));
        probe.after_paint();
        node.set_size(dims(700.0));
        viewport.set(dims(700.0));
        assert_eq!(probe.advance(Duration::from_millis(40)), None);

        node.set_size(dims(500.0));
        viewport.set(dims(500.0));
        assert_eq!(probe.advance(Duration::from_millis(40)), None);
        assert_eq!(probe.advance(Duration::from_millis(10)), Some(dims(500.0)));
    }

    #[test]
    fn never_attached_returns_default() {
        let mut probe = DimensionProbe::default();
        assert_eq!(probe.after_paint(), Dimensions::ZERO);
        assert!(!probe.is_listening());
    }

    #[test]
    fn detached_node_keeps_last_value() {
        let (mut probe, node, _viewport) = mounted(800.0, Duration::ZERO);
        probe.after_paint();
        node.remove();
        assert_eq!(probe.measure().height, 800.0);
    }

    #[test]
    fn detach_releases_subscription() {
        let (mut probe, _node, viewport) = mounted(800.0, Duration::ZERO);
        assert_eq!(viewport.live_subscriber_count(), 1);
        probe.detach();
        assert!(!probe.is_listening());
        assert_eq!(viewport.live_subscriber_count(), 0);
    }

    #[test]
    fn drop_releases_subscription() {
        let (probe, _node, viewport) = mounted(800.0, Duration::ZERO);
        drop(probe);
        assert_eq!(viewport.live_subscriber_count(), 0);
        viewport.set(dims(10.0));
    }

    #[test]
    fn reattach_does_not_double_subscribe() {
        let (mut probe, node, viewport) = mounted(800.0, Duration::ZERO);
        probe.attach(node, &viewport);
        assert_eq!(viewport.live_subscriber_count(), 1);
    }

    #[test]
    fn output_is_reactive() {
        let (mut probe, node, viewport) = mounted(800.0, Duration::ZERO);
        let seen = Rc::new(Cell::new(0.0));
        let s = Rc::clone(&seen);
        let _sub = probe.output().subscribe(move |d| s.set(d.height));
        probe.after_paint();
        assert_eq!(seen.get(), 800.0);
        node.set_size(dims(500.0));
        viewport.set(dims(500.0));
        assert_eq!(seen.get(), 500.0);
    }
}
