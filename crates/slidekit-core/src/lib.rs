//! Core state for SlideKit carousels: the authoritative page index and the
//! listener plumbing used to announce index changes to the host.
//!
//! Everything here is plain owned data. A carousel instance owns exactly one
//! [`IndexState`]; there are no globals and no thread-locals.

pub mod index_state;
pub mod listeners;

pub use index_state::{Direction, IndexChange, IndexState};
pub use listeners::{ListenerRegistry, Subscription};

pub mod prelude {
    pub use crate::index_state::{Direction, IndexChange, IndexState};
    pub use crate::listeners::{ListenerRegistry, Subscription};
}
