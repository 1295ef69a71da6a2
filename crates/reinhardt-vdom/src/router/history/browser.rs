//! Browser History API backend (wasm32 only).

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;

use super::{History, PathListener, SubscriptionId};
use crate::warn_log;

type PopStateHandler = Closure<dyn FnMut(web_sys::Event)>;

/// [`History`] backed by `window.history` and `popstate`.
pub struct BrowserHistory {
	window: web_sys::Window,
	handlers: RefCell<HashMap<SubscriptionId, PopStateHandler>>,
	next_id: Cell<u64>,
}

impl BrowserHistory {
	/// Uses the global window. Returns `None` outside a browser context.
	pub fn new() -> Option<Self> {
		let window = web_sys::window()?;
		Some(Self {
			window,
			handlers: RefCell::new(HashMap::new()),
			next_id: Cell::new(0),
		})
	}

	fn location_path(window: &web_sys::Window) -> String {
		let location = window.location();
		let path = location.pathname().unwrap_or_else(|_| "/".to_string());
		let search = location.search().unwrap_or_default();
		if path.is_empty() {
			format!("/{}", search)
		} else {
			format!("{}{}", path, search)
		}
	}

	fn history(&self) -> Option<web_sys::History> {
		self.window.history().ok()
	}
}

impl History for BrowserHistory {
	fn current_path(&self) -> String {
		Self::location_path(&self.window)
	}

	fn push(&self, path: &str) {
		let pushed = self
			.history()
			.map(|history| history.push_state_with_url(&JsValue::NULL, "", Some(path)));
		if !matches!(pushed, Some(Ok(()))) {
			warn_log!("history.pushState failed for {}", path);
		}
	}

	fn replace(&self, path: &str) {
		let replaced = self
			.history()
			.map(|history| history.replace_state_with_url(&JsValue::NULL, "", Some(path)));
		if !matches!(replaced, Some(Ok(()))) {
			warn_log!("history.replaceState failed for {}", path);
		}
	}

	fn subscribe(&self, listener: PathListener) -> SubscriptionId {
		let id = SubscriptionId::new(self.next_id.get());
		self.next_id.set(self.next_id.get() + 1);

		let window = self.window.clone();
		let handler = Closure::wrap(Box::new(move |_event: web_sys::Event| {
			listener(&Self::location_path(&window));
		}) as Box<dyn FnMut(_)>);
		if self
			.window
			.add_event_listener_with_callback("popstate", handler.as_ref().unchecked_ref())
			.is_err()
		{
			warn_log!("failed to register popstate listener");
		}
		self.handlers.borrow_mut().insert(id, handler);
		id
	}

	fn unsubscribe(&self, id: SubscriptionId) {
		if let Some(handler) = self.handlers.borrow_mut().remove(&id) {
			let _ = self
				.window
				.remove_event_listener_with_callback("popstate", handler.as_ref().unchecked_ref());
		}
	}
}

impl Drop for BrowserHistory {
	fn drop(&mut self) {
		for (_, handler) in self.handlers.borrow_mut().drain() {
			let _ = self
				.window
				.remove_event_listener_with_callback("popstate", handler.as_ref().unchecked_ref());
		}
	}
}
