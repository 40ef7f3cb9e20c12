//! Host listener registration scoped to a mounted carousel.
//!
//! A host (window, canvas, terminal) hands out listener handles for the
//! event kinds a carousel needs. [`MountedCarousel`] acquires all of them on
//! mount and gives every one back when it is dropped, including when the
//! drop happens halfway through a drag.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use slidekit_ui::Carousel;

/// Event kinds a carousel listens to on its host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostEventKind {
    PointerDown,
    PointerMove,
    PointerUp,
    PointerCancel,
    Resize,
    Frame,
}

impl HostEventKind {
    pub const ALL: [HostEventKind; 6] = [
        HostEventKind::PointerDown,
        HostEventKind::PointerMove,
        HostEventKind::PointerUp,
        HostEventKind::PointerCancel,
        HostEventKind::Resize,
        HostEventKind::Frame,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HostListenerId(pub u64);

/// Listener registration offered by the embedding environment.
pub trait Host {
    fn add_listener(&mut self, kind: HostEventKind) -> HostListenerId;

    /// Returns false when `id` was not registered.
    fn remove_listener(&mut self, id: HostListenerId) -> bool;
}

impl<H: Host + ?Sized> Host for &mut H {
    fn add_listener(&mut self, kind: HostEventKind) -> HostListenerId {
        (**self).add_listener(kind)
    }

    fn remove_listener(&mut self, id: HostListenerId) -> bool {
        (**self).remove_listener(id)
    }
}

#[derive(Debug, Default)]
struct RecordingInner {
    next_id: u64,
    active: FxHashMap<HostListenerId, HostEventKind>,
    added: usize,
    removed: usize,
}

/// In-memory host that records registrations. Clones share state, so a
/// clone kept outside the shell can inspect listeners after unmount.
#[derive(Clone, Debug, Default)]
pub struct RecordingHost {
    inner: Rc<RefCell<RecordingInner>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_count(&self) -> usize {
        self.inner.borrow().active.len()
    }

    pub fn is_listening(&self, kind: HostEventKind) -> bool {
        self.inner.borrow().active.values().any(|active| *active == kind)
    }

    /// Total `(added, removed)` registrations over the host's lifetime.
    pub fn totals(&self) -> (usize, usize) {
        let inner = self.inner.borrow();
        (inner.added, inner.removed)
    }
}

impl Host for RecordingHost {
    fn add_listener(&mut self, kind: HostEventKind) -> HostListenerId {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = HostListenerId(inner.next_id);
        inner.active.insert(id, kind);
        inner.added += 1;
        id
    }

    fn remove_listener(&mut self, id: HostListenerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let removed = inner.active.remove(&id).is_some();
        if removed {
            inner.removed += 1;
        }
        removed
    }
}

/// A carousel attached to a host for as long as this value lives.
pub struct MountedCarousel<H: Host> {
    host: H,
    carousel: Carousel,
    listeners: SmallVec<[(HostEventKind, HostListenerId); 6]>,
}

impl<H: Host> MountedCarousel<H> {
    pub fn mount(mut host: H, carousel: Carousel) -> Self {
        let listeners = HostEventKind::ALL
            .iter()
            .map(|kind| (*kind, host.add_listener(*kind)))
            .collect();
        log::debug!("carousel mounted with {} pages", carousel.item_count());
        Self {
            host,
            carousel,
            listeners,
        }
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn carousel_mut(&mut self) -> &mut Carousel {
        &mut self.carousel
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn is_mounted(&self) -> bool {
        !self.listeners.is_empty()
    }

    /// Whether events of `kind` should still be delivered.
    pub fn listens_to(&self, kind: HostEventKind) -> bool {
        self.listeners.iter().any(|(listening, _)| *listening == kind)
    }

    /// Releases every host listener and tears down carousel state.
    /// Safe to call more than once.
    pub fn unmount(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        if self.carousel.is_dragging() {
            log::debug!("unmounting carousel mid-drag");
        }
        self.carousel.unmount();
        for (kind, id) in self.listeners.drain(..) {
            if !self.host.remove_listener(id) {
                log::warn!("host listener {id:?} for {kind:?} was already gone");
            }
        }
    }
}

impl<H: Host> Drop for MountedCarousel<H> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidekit_ui::{CarouselConfig, PointerEvent};

    fn carousel() -> Carousel {
        let mut carousel = Carousel::new(3, CarouselConfig::default()).unwrap();
        carousel.on_viewport_resized(320.0);
        carousel
    }

    #[test]
    fn mount_registers_every_kind() {
        let host = RecordingHost::new();
        let mounted = MountedCarousel::mount(host.clone(), carousel());
        for kind in HostEventKind::ALL {
            assert!(host.is_listening(kind));
            assert!(mounted.listens_to(kind));
        }
        assert_eq!(host.active_count(), 6);
    }

    #[test]
    fn drop_mid_drag_releases_listeners() {
        let host = RecordingHost::new();
        {
            let mut mounted = MountedCarousel::mount(host.clone(), carousel());
            mounted
                .carousel_mut()
                .on_pointer_event(&PointerEvent::down(100.0, 0));
            mounted
                .carousel_mut()
                .on_pointer_event(&PointerEvent::moved(90.0, 200));
            assert!(mounted.carousel().is_dragging());
        }
        assert_eq!(host.active_count(), 0);
        assert_eq!(host.totals(), (6, 6));
    }

    #[test]
    fn unmount_is_idempotent() {
        let host = RecordingHost::new();
        let mut mounted = MountedCarousel::mount(host.clone(), carousel());
        mounted.unmount();
        mounted.unmount();
        assert!(!mounted.is_mounted());
        drop(mounted);
        assert_eq!(host.totals(), (6, 6));
    }

    #[test]
    fn borrowed_host_works() {
        let mut host = RecordingHost::new();
        {
            let _mounted = MountedCarousel::mount(&mut host, carousel());
        }
        assert_eq!(host.active_count(), 0);
    }
}
