//! Host document abstraction.
//!
//! The reconciler never touches a concrete DOM. It drives a [`HostDocument`],
//! which hands out opaque [`NodeId`] handles. Two implementations ship with the
//! crate:
//!
//! - [`MemoryDocument`]: an in-memory tree with a mutation counter and HTML
//!   serialization, used natively and in tests.
//! - `WebDocument` (wasm32 only): the browser DOM via `web-sys`.
//!
//! A [`Container`] ties a host node to the [`Scheduler`](crate::reactive::Scheduler)
//! shared by everything mounted beneath it.

mod container;
mod event;
mod host;
mod memory;
#[cfg(target_arch = "wasm32")]
mod web;

pub use container::Container;
pub use event::{Event, EventType};
pub use host::{HostDocument, NodeId};
pub use memory::MemoryDocument;
#[cfg(target_arch = "wasm32")]
pub use web::WebDocument;
