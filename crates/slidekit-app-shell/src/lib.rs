//! Frame-driven shell that embeds one carousel into a host.
//!
//! The shell turns raw host input (cursor positions, button presses,
//! resizes, frame callbacks) into carousel calls. It owns the wall clock, so
//! pointer timestamps and frame times come from the same source.

mod host;
mod pointer_tracker;

use std::fmt;

use slidekit_foundation::{PointerButton, PointerButtons, PointerEvent, PointerEventKind, PointerId};
use slidekit_ui::{
    log_carousel_state, Carousel, CarouselConfig, CarouselSnapshot, ConfigError, GestureOutcome,
};
// WASM-compatible time - web-time is what winit uses internally
use web_time::Instant;

pub use host::{Host, HostEventKind, HostListenerId, MountedCarousel, RecordingHost};
use pointer_tracker::PointerTracker;

const NANOS_PER_MS: u64 = 1_000_000;

/// Input delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    PointerDown { pointer: PointerId, x: f32, y: f32 },
    PointerMove { pointer: PointerId, x: f32, y: f32 },
    PointerUp { pointer: PointerId },
    PointerCancel { pointer: PointerId },
    Resize { width: f32, height: f32 },
    Frame,
}

impl HostEvent {
    pub fn kind(&self) -> HostEventKind {
        match self {
            HostEvent::PointerDown { .. } => HostEventKind::PointerDown,
            HostEvent::PointerMove { .. } => HostEventKind::PointerMove,
            HostEvent::PointerUp { .. } => HostEventKind::PointerUp,
            HostEvent::PointerCancel { .. } => HostEventKind::PointerCancel,
            HostEvent::Resize { .. } => HostEventKind::Resize,
            HostEvent::Frame => HostEventKind::Frame,
        }
    }
}

/// Where frame and pointer timestamps come from.
#[derive(Clone, Copy, Debug)]
pub enum ShellClock {
    Wall(Instant),
    /// Advanced only by [`CarouselShell::advance_clock_ms`].
    Manual(u64),
}

impl ShellClock {
    pub fn wall() -> Self {
        ShellClock::Wall(Instant::now())
    }

    pub fn now_nanos(&self) -> u64 {
        match self {
            ShellClock::Wall(start) => Instant::now()
                .checked_duration_since(*start)
                .unwrap_or_default()
                .as_nanos() as u64,
            ShellClock::Manual(nanos) => *nanos,
        }
    }
}

#[derive(Debug)]
pub enum ShellError {
    Config(ConfigError),
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::Config(err) => write!(f, "invalid carousel configuration: {err}"),
        }
    }
}

impl std::error::Error for ShellError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShellError::Config(err) => Some(err),
        }
    }
}

impl From<ConfigError> for ShellError {
    fn from(err: ConfigError) -> Self {
        ShellError::Config(err)
    }
}

/// Rectangle the carousel occupies inside the host surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CarouselBounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CarouselBounds {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

pub struct CarouselShell<H: Host> {
    mounted: MountedCarousel<H>,
    clock: ShellClock,
    bounds: CarouselBounds,
    cursor: (f32, f32),
    /// Tracks which mouse buttons are currently pressed
    buttons_pressed: PointerButtons,
    pointers: PointerTracker,
    is_dirty: bool,
}

impl<H: Host> CarouselShell<H> {
    /// Mounts a carousel of `item_count` pages on `host`, timed by the wall
    /// clock.
    pub fn new(host: H, item_count: usize, config: CarouselConfig) -> Result<Self, ShellError> {
        Self::with_clock(host, item_count, config, ShellClock::wall())
    }

    pub fn with_clock(
        host: H,
        item_count: usize,
        config: CarouselConfig,
        clock: ShellClock,
    ) -> Result<Self, ShellError> {
        let carousel = Carousel::new(item_count, config)?;
        Ok(Self {
            mounted: MountedCarousel::mount(host, carousel),
            clock,
            bounds: CarouselBounds::default(),
            cursor: (0.0, 0.0),
            buttons_pressed: PointerButtons::NONE,
            pointers: PointerTracker::new(),
            is_dirty: true,
        })
    }

    pub fn carousel(&self) -> &Carousel {
        self.mounted.carousel()
    }

    pub fn carousel_mut(&mut self) -> &mut Carousel {
        self.mark_dirty();
        self.mounted.carousel_mut()
    }

    pub fn host(&self) -> &H {
        self.mounted.host()
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        self.mounted.carousel().snapshot()
    }

    pub fn bounds(&self) -> CarouselBounds {
        self.bounds
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_mounted()
    }

    pub fn now_nanos(&self) -> u64 {
        self.clock.now_nanos()
    }

    fn now_ms(&self) -> u64 {
        self.clock.now_nanos() / NANOS_PER_MS
    }

    /// Moves a manual clock forward. No effect on the wall clock.
    pub fn advance_clock_ms(&mut self, ms: u64) {
        if let ShellClock::Manual(nanos) = &mut self.clock {
            *nanos += ms * NANOS_PER_MS;
        } else {
            log::warn!("advance_clock_ms ignored: shell runs on the wall clock");
        }
    }

    /// Places the carousel inside the host surface and reports its width.
    pub fn set_bounds(&mut self, bounds: CarouselBounds) {
        self.bounds = bounds;
        self.mounted.carousel_mut().on_viewport_resized(bounds.width);
        self.mark_dirty();
    }

    /// Returns true if the shell needs to redraw (dirty flag or active animations).
    pub fn needs_redraw(&self) -> bool {
        self.is_mounted() && (self.is_dirty || self.mounted.carousel().needs_frame())
    }

    pub fn mark_dirty(&mut self) {
        self.is_dirty = true;
    }

    /// Routes one host event. Events of kinds the shell no longer listens
    /// to (after unmount) are dropped.
    pub fn handle(&mut self, event: HostEvent) -> bool {
        if !self.mounted.listens_to(event.kind()) {
            log::trace!("dropping {:?}: no listener", event.kind());
            return false;
        }
        match event {
            HostEvent::PointerDown { pointer, x, y } => self.pointer_down(pointer, x, y),
            HostEvent::PointerMove { pointer, x, y } => self.pointer_move(pointer, x, y),
            HostEvent::PointerUp { pointer } => self.pointer_up(pointer),
            HostEvent::PointerCancel { pointer } => self.pointer_cancel(pointer),
            HostEvent::Resize { width, height } => {
                let bounds = CarouselBounds {
                    width,
                    height,
                    ..self.bounds
                };
                self.set_bounds(bounds);
                true
            }
            HostEvent::Frame => {
                self.update();
                true
            }
        }
    }

    pub fn set_cursor(&mut self, x: f32, y: f32) -> bool {
        self.cursor = (x, y);
        // Hover moves never reach the carousel; only the pressed pointer does.
        if self.buttons_pressed.is_empty() {
            return false;
        }
        self.pointer_move(PointerId::PRIMARY, x, y)
    }

    pub fn pointer_pressed(&mut self) -> bool {
        self.buttons_pressed.insert(PointerButton::Primary);
        let (x, y) = self.cursor;
        self.pointer_down(PointerId::PRIMARY, x, y)
    }

    pub fn pointer_released(&mut self) -> bool {
        // Up reports the buttons still held after the release.
        self.buttons_pressed.remove(PointerButton::Primary);
        self.pointer_up(PointerId::PRIMARY)
    }

    /// Cancels any active gesture. Call when the host loses focus or the
    /// pointer leaves the surface with a button held.
    pub fn cancel_gesture(&mut self) {
        self.buttons_pressed = PointerButtons::NONE;
        for (pointer, (x, _)) in self.pointers.clear() {
            let event = PointerEvent::cancel(self.local_x(x), self.now_ms()).with_id(pointer);
            self.dispatch(event);
        }
    }

    fn pointer_down(&mut self, pointer: PointerId, x: f32, y: f32) -> bool {
        if !self.is_mounted() || !self.bounds.contains(x, y) {
            return false;
        }
        self.pointers.track(pointer, x, y);
        let event = PointerEvent::down(self.local_x(x), self.now_ms())
            .with_id(pointer)
            .with_y(y - self.bounds.y);
        self.dispatch(event);
        true
    }

    fn pointer_move(&mut self, pointer: PointerId, x: f32, y: f32) -> bool {
        if !self.pointers.update(pointer, x, y) {
            return false;
        }
        let event = PointerEvent::moved(self.local_x(x), self.now_ms())
            .with_id(pointer)
            .with_y(y - self.bounds.y);
        self.dispatch(event);
        true
    }

    fn pointer_up(&mut self, pointer: PointerId) -> bool {
        let Some((x, y)) = self.pointers.release(pointer) else {
            return false;
        };
        let event = PointerEvent::up(self.local_x(x), self.now_ms())
            .with_id(pointer)
            .with_y(y - self.bounds.y);
        self.dispatch(event);
        true
    }

    fn pointer_cancel(&mut self, pointer: PointerId) -> bool {
        let Some((x, _)) = self.pointers.release(pointer) else {
            return false;
        };
        let event = PointerEvent::cancel(self.local_x(x), self.now_ms()).with_id(pointer);
        self.dispatch(event);
        true
    }

    fn local_x(&self, x: f32) -> f32 {
        x - self.bounds.x
    }

    fn dispatch(&mut self, event: PointerEvent) -> GestureOutcome {
        let outcome = self.mounted.carousel_mut().on_pointer_event(&event);
        if !outcome.is_ignored() {
            self.mark_dirty();
        }
        if event.kind == PointerEventKind::Down && outcome.is_ignored() {
            // Pressed inside but the carousel does not drag (grid, disabled).
            self.pointers.release(event.id);
        }
        outcome
    }

    /// Advances the carousel to the clock's current time.
    pub fn update(&mut self) -> f32 {
        let now = self.clock.now_nanos();
        self.update_at(now)
    }

    pub fn update_at(&mut self, frame_nanos: u64) -> f32 {
        let offset = self.mounted.carousel_mut().on_frame(frame_nanos);
        // Clear dirty flag after update (frame has been processed)
        self.is_dirty = false;
        offset
    }

    pub fn log_debug_info(&self) {
        log_carousel_state(&self.snapshot());
    }

    /// Releases host listeners now instead of at drop.
    pub fn unmount(&mut self) {
        self.pointers.clear();
        self.buttons_pressed = PointerButtons::NONE;
        self.mounted.unmount();
    }
}
