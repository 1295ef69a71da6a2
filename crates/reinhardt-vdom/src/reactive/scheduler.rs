//! Update scheduler.
//!
//! Setters never render synchronously. They mark their owning instance dirty
//! and queue it here. The queue is drained by [`Scheduler::flush`], which runs
//! automatically when the outermost [`Scheduler::batch`] exits. Mount, event
//! dispatch and navigation all run inside a batch, so every update they cause
//! coalesces into a single render per instance.
//!
//! On wasm32 a setter fired outside any batch (a timer, a fetch continuation)
//! queues a microtask that flushes. Native embedders call `flush` themselves.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::component::InstanceCore;
use crate::config::RuntimeConfig;
use crate::error::RenderError;
use crate::{debug_log, error_log};

/// Batches re-renders of dirty component instances.
pub struct Scheduler {
	queue: RefCell<Vec<Weak<InstanceCore>>>,
	/// Mounted roots, kept alive until unmounted even if their handle is dropped.
	roots: RefCell<Vec<Rc<InstanceCore>>>,
	batch_depth: Cell<usize>,
	flushing: Cell<bool>,
	max_passes: usize,
	warn_on_stale_updates: bool,
	#[cfg(target_arch = "wasm32")]
	deferred: Cell<bool>,
	#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
	self_ref: Weak<Scheduler>,
}

impl Scheduler {
	/// Creates a scheduler with default settings.
	pub fn new() -> Rc<Self> {
		Self::with_config(&RuntimeConfig::default())
	}

	/// Creates a scheduler using the pass limit and warning settings of `config`.
	pub fn with_config(config: &RuntimeConfig) -> Rc<Self> {
		Rc::new_cyclic(|self_ref| Self {
			queue: RefCell::new(Vec::new()),
			roots: RefCell::new(Vec::new()),
			batch_depth: Cell::new(0),
			flushing: Cell::new(false),
			max_passes: config.max_flush_passes.max(1),
			warn_on_stale_updates: config.warn_on_stale_updates,
			#[cfg(target_arch = "wasm32")]
			deferred: Cell::new(false),
			self_ref: self_ref.clone(),
		})
	}

	/// Number of instances waiting for a render.
	pub fn pending(&self) -> usize {
		self.queue.borrow().len()
	}

	/// Number of mounted root components.
	pub fn root_count(&self) -> usize {
		self.roots.borrow().len()
	}

	pub(crate) fn retain_root(&self, root: Rc<InstanceCore>) {
		self.roots.borrow_mut().push(root);
	}

	pub(crate) fn release_root(&self, root: &InstanceCore) {
		let released: Vec<_> = {
			let mut roots = self.roots.borrow_mut();
			let (released, kept) = roots
				.drain(..)
				.partition(|retained| std::ptr::eq(Rc::as_ptr(retained), root));
			*roots = kept;
			released
		};
		drop(released);
	}

	/// Returns `true` while inside [`batch`](Self::batch).
	pub fn is_batching(&self) -> bool {
		self.batch_depth.get() > 0
	}

	/// Returns `true` while a flush is running.
	pub fn is_flushing(&self) -> bool {
		self.flushing.get()
	}

	pub(crate) fn warns_on_stale_updates(&self) -> bool {
		self.warn_on_stale_updates
	}

	/// Queues an instance for re-rendering. Already-dirty instances are not queued twice.
	pub(crate) fn schedule(&self, instance: &Rc<InstanceCore>) {
		if instance.mark_dirty() {
			return;
		}
		debug_log!("scheduled `{}`", instance.name());
		self.queue.borrow_mut().push(Rc::downgrade(instance));
		if !self.is_batching() && !self.is_flushing() {
			self.request_flush();
		}
	}

	/// Runs `f`, then flushes if this was the outermost batch.
	///
	/// Errors from that flush are logged, since `f`'s caller (usually an event
	/// handler) has nowhere to return them.
	pub fn batch<R>(&self, f: impl FnOnce() -> R) -> R {
		let result = {
			let _guard = BatchGuard::enter(self);
			f()
		};
		if !self.is_batching()
			&& !self.is_flushing()
			&& let Err(e) = self.flush()
		{
			error_log!("flush after batch failed: {}", e);
		}
		result
	}

	/// Like [`batch`](Self::batch), but returns flush errors to the caller.
	///
	/// An error from `f` takes precedence over an error from the flush.
	pub fn batch_with<R>(
		&self,
		f: impl FnOnce() -> Result<R, RenderError>,
	) -> Result<R, RenderError> {
		let result = {
			let _guard = BatchGuard::enter(self);
			f()
		};
		if self.is_batching() || self.is_flushing() {
			return result;
		}
		let flushed = self.flush();
		match (result, flushed) {
			(Err(e), Err(flush_error)) => {
				error_log!("flush after batch failed: {}", flush_error);
				Err(e)
			}
			(Err(e), Ok(_)) => Err(e),
			(Ok(_), Err(flush_error)) => Err(flush_error),
			(Ok(value), Ok(_)) => Ok(value),
		}
	}

	/// Re-renders every dirty, still-mounted instance.
	///
	/// Shallower instances render first, so a parent that re-renders a child
	/// clears the child's dirty flag before the child's own entry is reached.
	/// Updates scheduled while flushing are drained in further passes.
	///
	/// Returns the number of renders performed. A re-entrant call returns
	/// `Ok(0)` without doing anything.
	///
	/// # Errors
	///
	/// Returns the first render error encountered (later ones are logged), or
	/// [`RenderError::UpdateLimitExceeded`] when the queue has not drained after
	/// the configured number of passes.
	pub fn flush(&self) -> Result<usize, RenderError> {
		if self.flushing.replace(true) {
			debug_log!("re-entrant flush refused");
			return Ok(0);
		}
		let _guard = FlushGuard(self);

		let mut rendered = 0;
		let mut first_error = None;
		let mut pass = 0;
		loop {
			let queued = std::mem::take(&mut *self.queue.borrow_mut());
			if queued.is_empty() {
				break;
			}
			if pass == self.max_passes {
				for instance in queued.iter().filter_map(Weak::upgrade) {
					instance.clear_dirty();
				}
				return Err(RenderError::UpdateLimitExceeded(self.max_passes));
			}
			pass += 1;

			let mut live: Vec<Rc<InstanceCore>> = queued.iter().filter_map(Weak::upgrade).collect();
			live.sort_by_key(|instance| instance.depth());
			for instance in live {
				if !instance.is_dirty() {
					continue;
				}
				if !instance.is_mounted() {
					instance.clear_dirty();
					continue;
				}
				match instance.rerender() {
					Ok(()) => rendered += 1,
					Err(e) if first_error.is_none() => first_error = Some(e),
					Err(e) => error_log!("render of `{}` failed: {}", instance.name(), e),
				}
			}
		}

		first_error.map_or(Ok(rendered), Err)
	}

	#[cfg(target_arch = "wasm32")]
	fn request_flush(&self) {
		if self.deferred.replace(true) {
			return;
		}
		let scheduler = self.self_ref.clone();
		wasm_bindgen_futures::spawn_local(async move {
			let Some(scheduler) = scheduler.upgrade() else {
				return;
			};
			scheduler.deferred.set(false);
			if let Err(e) = scheduler.flush() {
				error_log!("deferred flush failed: {}", e);
			}
		});
	}

	#[cfg(not(target_arch = "wasm32"))]
	fn request_flush(&self) {
		debug_log!("update queued outside a batch; waiting for an explicit flush");
	}
}

impl fmt::Debug for Scheduler {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Scheduler")
			.field("pending", &self.pending())
			.field("batch_depth", &self.batch_depth.get())
			.field("flushing", &self.flushing.get())
			.field("max_passes", &self.max_passes)
			.finish()
	}
}

struct BatchGuard<'a>(&'a Scheduler);

impl<'a> BatchGuard<'a> {
	fn enter(scheduler: &'a Scheduler) -> Self {
		scheduler.batch_depth.set(scheduler.batch_depth.get() + 1);
		Self(scheduler)
	}
}

impl Drop for BatchGuard<'_> {
	fn drop(&mut self) {
		self.0.batch_depth.set(self.0.batch_depth.get() - 1);
	}
}

struct FlushGuard<'a>(&'a Scheduler);

impl Drop for FlushGuard<'_> {
	fn drop(&mut self) {
		self.0.flushing.set(false);
	}
}
