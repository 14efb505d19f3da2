//! History strategies.
//!
//! A [`History`] owns the list of visited entries and the notion of "where
//! the user is". The router writes to it on every navigation and reads it
//! once at start-up.
//!
//! - [`WebHistory`] uses path-based URLs through the browser History API
//!   (`pushState`/`replaceState`/`popstate`). Off the browser it keeps an
//!   in-process entry stack with the same semantics.
//! - [`MemoryHistory`] never touches the address bar.

use crate::error::RouterError;
use serde::{Deserialize, Serialize};

/// Callback invoked when the browser moves through history on its own
/// (back/forward buttons). Receives the base-relative location and the
/// state stored with the entry, if any.
pub type HistoryListener = Box<dyn Fn(String, Option<HistoryState>)>;

/// State stored alongside every history entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HistoryState {
	/// Location of the previous entry.
	pub back: Option<String>,
	/// Location of this entry.
	pub current: String,
	/// Location of the next entry, if the user went back.
	pub forward: Option<String>,
	/// Index of this entry in the session.
	pub position: usize,
	/// Whether this entry was written by `replace`.
	pub replaced: bool,
}

impl HistoryState {
	/// Creates the state for a fresh entry.
	pub fn new(current: impl Into<String>) -> Self {
		Self {
			current: current.into(),
			..Self::default()
		}
	}

	fn pushed_after(previous: &HistoryState, to: &str) -> Self {
		Self {
			back: Some(previous.current.clone()),
			current: to.to_string(),
			forward: None,
			position: previous.position + 1,
			replaced: false,
		}
	}

	fn replacing(previous: &HistoryState, to: &str) -> Self {
		Self {
			back: previous.back.clone(),
			current: to.to_string(),
			forward: previous.forward.clone(),
			position: previous.position,
			replaced: true,
		}
	}
}

/// How a navigation affects the history stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationType {
	/// A new entry is added.
	Push,
	/// The current entry is overwritten.
	Replace,
	/// The user moved to an existing entry.
	Pop,
}

/// A history strategy.
pub trait History {
	/// Normalized base path, without a trailing slash (`""` for the root).
	fn base(&self) -> &str;

	/// Current location relative to the base, including query and hash.
	fn location(&self) -> String;

	/// State stored with the current entry.
	fn state(&self) -> Option<HistoryState>;

	/// Adds an entry for `to`.
	fn push(&mut self, to: &str) -> Result<(), RouterError>;

	/// Overwrites the current entry with `to`.
	fn replace(&mut self, to: &str) -> Result<(), RouterError>;

	/// Moves `delta` entries through history.
	///
	/// Returns the new location when the move was applied synchronously.
	/// Returns `None` when nothing moved or when the move completes later
	/// through a listener.
	fn go(&mut self, delta: isize) -> Option<String>;

	/// Registers a callback for moves that the router did not start.
	fn listen(&mut self, listener: HistoryListener) -> Result<(), RouterError>;

	/// Builds the `href` for a base-relative location.
	fn create_href(&self, location: &str) -> String {
		format!("{}{}", self.base(), location)
	}
}

/// Normalizes a base path: leading `/`, no trailing `/`, `""` for root.
pub fn normalize_base(base: &str) -> String {
	let trimmed = base.trim().trim_end_matches('/');
	if trimmed.is_empty() {
		String::new()
	} else if trimmed.starts_with('/') {
		trimmed.to_string()
	} else {
		format!("/{}", trimmed)
	}
}

/// Removes the base from an absolute location.
///
/// Locations outside the base are returned unchanged.
pub fn strip_base(base: &str, location: &str) -> String {
	if base.is_empty() {
		return location.to_string();
	}
	match location.strip_prefix(base) {
		Some("") => "/".to_string(),
		Some(rest) if rest.starts_with(['/', '?', '#']) => {
			if rest.starts_with('/') {
				rest.to_string()
			} else {
				format!("/{}", rest)
			}
		}
		_ => location.to_string(),
	}
}

/// History kept entirely in process memory.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
	base: String,
	entries: Vec<HistoryState>,
	index: usize,
}

impl MemoryHistory {
	/// Creates a memory history starting at `/`.
	pub fn new(base: &str) -> Self {
		Self {
			base: normalize_base(base),
			entries: vec![HistoryState::new("/")],
			index: 0,
		}
	}

	/// Number of entries in the stack, including the start entry.
	pub fn entry_count(&self) -> usize {
		self.entries.len()
	}

	/// Cursor into the stack.
	pub fn index(&self) -> usize {
		self.index
	}

	fn current(&self) -> &HistoryState {
		&self.entries[self.index]
	}
}

impl History for MemoryHistory {
	fn base(&self) -> &str {
		&self.base
	}

	fn location(&self) -> String {
		self.current().current.clone()
	}

	fn state(&self) -> Option<HistoryState> {
		Some(self.current().clone())
	}

	fn push(&mut self, to: &str) -> Result<(), RouterError> {
		let state = HistoryState::pushed_after(self.current(), to);
		self.entries[self.index].forward = Some(to.to_string());
		self.entries.truncate(self.index + 1);
		self.entries.push(state);
		self.index += 1;
		Ok(())
	}

	fn replace(&mut self, to: &str) -> Result<(), RouterError> {
		let state = HistoryState::replacing(self.current(), to);
		self.entries[self.index] = state;
		Ok(())
	}

	fn go(&mut self, delta: isize) -> Option<String> {
		let last = self.entries.len() - 1;
		let target = self.index.saturating_add_signed(delta).min(last);
		if target == self.index {
			return None;
		}
		self.index = target;
		Some(self.location())
	}

	fn listen(&mut self, _listener: HistoryListener) -> Result<(), RouterError> {
		// Memory history only moves when the router asks it to.
		Ok(())
	}
}

/// Path-based history backed by the browser History API.
pub struct WebHistory {
	base: String,
	#[cfg(not(target_arch = "wasm32"))]
	entries: MemoryHistory,
	#[cfg(target_arch = "wasm32")]
	listeners: Vec<wasm_bindgen::closure::Closure<dyn FnMut(web_sys::PopStateEvent)>>,
}

impl std::fmt::Debug for WebHistory {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("WebHistory")
			.field("base", &self.base)
			.finish()
	}
}

/// Creates a path-based history rooted at `base`.
pub fn create_web_history(base: &str) -> WebHistory {
	WebHistory::new(base)
}

/// Creates an in-memory history rooted at `base`.
pub fn create_memory_history(base: &str) -> MemoryHistory {
	MemoryHistory::new(base)
}

#[cfg(not(target_arch = "wasm32"))]
impl WebHistory {
	/// Creates a web history. Off the browser the entries live in memory.
	pub fn new(base: &str) -> Self {
		let base = normalize_base(base);
		Self {
			entries: MemoryHistory::new(&base),
			base,
		}
	}
}

#[cfg(not(target_arch = "wasm32"))]
impl History for WebHistory {
	fn base(&self) -> &str {
		&self.base
	}

	fn location(&self) -> String {
		self.entries.location()
	}

	fn state(&self) -> Option<HistoryState> {
		self.entries.state()
	}

	fn push(&mut self, to: &str) -> Result<(), RouterError> {
		self.entries.push(to)
	}

	fn replace(&mut self, to: &str) -> Result<(), RouterError> {
		self.entries.replace(to)
	}

	fn go(&mut self, delta: isize) -> Option<String> {
		self.entries.go(delta)
	}

	fn listen(&mut self, _listener: HistoryListener) -> Result<(), RouterError> {
		Ok(())
	}
}

#[cfg(target_arch = "wasm32")]
mod browser {
	use super::{HistoryState, normalize_base, strip_base};
	use crate::error::RouterError;
	use wasm_bindgen::JsValue;

	pub(super) fn window() -> Result<web_sys::Window, RouterError> {
		web_sys::window()
			.ok_or_else(|| RouterError::NavigationFailed("window is not available".to_string()))
	}

	pub(super) fn history() -> Result<web_sys::History, RouterError> {
		window()?
			.history()
			.map_err(|e| RouterError::NavigationFailed(format!("{:?}", e)))
	}

	/// Reads `pathname + search + hash` and strips the base.
	pub(super) fn read_location(base: &str) -> String {
		let Ok(window) = window() else {
			return "/".to_string();
		};
		let location = window.location();
		let path = location.pathname().unwrap_or_default();
		let search = location.search().unwrap_or_default();
		let hash = location.hash().unwrap_or_default();
		strip_base(&normalize_base(base), &format!("{}{}{}", path, search, hash))
	}

	pub(super) fn decode_state(value: JsValue) -> Option<HistoryState> {
		value
			.as_string()
			.and_then(|raw| serde_json::from_str(&raw).ok())
	}

	pub(super) fn encode_state(state: &HistoryState) -> Result<JsValue, RouterError> {
		serde_json::to_string(state)
			.map(|raw| JsValue::from_str(&raw))
			.map_err(|e| RouterError::NavigationFailed(e.to_string()))
	}
}

#[cfg(target_arch = "wasm32")]
impl WebHistory {
	/// Creates a web history and seeds the current entry's state.
	pub fn new(base: &str) -> Self {
		let history = Self {
			base: normalize_base(base),
			listeners: Vec::new(),
		};
		if history.state().is_none() {
			let location = history.location();
			let seeded = browser::encode_state(&HistoryState::new(location.clone())).and_then(
				|state| {
					browser::history()?
						.replace_state_with_url(&state, "", Some(&history.create_href(&location)))
						.map_err(|e| RouterError::NavigationFailed(format!("{:?}", e)))
				},
			);
			if let Err(e) = seeded {
				tracing::warn!(error = %e, "Failed to seed initial history state");
			}
		}
		history
	}

	fn write(&self, state: &HistoryState, replace: bool) -> Result<(), RouterError> {
		let history = browser::history()?;
		let data = browser::encode_state(state)?;
		let url = self.create_href(&state.current);
		let result = if replace {
			history.replace_state_with_url(&data, "", Some(&url))
		} else {
			history.push_state_with_url(&data, "", Some(&url))
		};
		result.map_err(|e| RouterError::NavigationFailed(format!("{:?}", e)))
	}
}

#[cfg(target_arch = "wasm32")]
impl History for WebHistory {
	fn base(&self) -> &str {
		&self.base
	}

	fn location(&self) -> String {
		browser::read_location(&self.base)
	}

	fn state(&self) -> Option<HistoryState> {
		browser::history()
			.ok()
			.and_then(|h| h.state().ok())
			.and_then(browser::decode_state)
	}

	fn push(&mut self, to: &str) -> Result<(), RouterError> {
		let current = self
			.state()
			.unwrap_or_else(|| HistoryState::new(self.location()));

		// Record where we are going on the entry we are leaving.
		let mut leaving = current.clone();
		leaving.forward = Some(to.to_string());
		self.write(&leaving, true)?;

		self.write(&HistoryState::pushed_after(&current, to), false)
	}

	fn replace(&mut self, to: &str) -> Result<(), RouterError> {
		let current = self
			.state()
			.unwrap_or_else(|| HistoryState::new(self.location()));
		self.write(&HistoryState::replacing(&current, to), true)
	}

	fn go(&mut self, delta: isize) -> Option<String> {
		let moved = browser::history().and_then(|h| {
			h.go_with_delta(delta as i32)
				.map_err(|e| RouterError::NavigationFailed(format!("{:?}", e)))
		});
		if let Err(e) = moved {
			tracing::warn!(delta, error = %e, "history.go failed");
		}
		// The browser reports the move through `popstate`.
		None
	}

	fn listen(&mut self, listener: HistoryListener) -> Result<(), RouterError> {
		use wasm_bindgen::JsCast;
		use wasm_bindgen::closure::Closure;

		let base = self.base.clone();
		let closure = Closure::wrap(Box::new(move |event: web_sys::PopStateEvent| {
			let location = browser::read_location(&base);
			listener(location, browser::decode_state(event.state()));
		}) as Box<dyn FnMut(web_sys::PopStateEvent)>);

		browser::window()?
			.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
			.map_err(|e| RouterError::NavigationFailed(format!("{:?}", e)))?;

		self.listeners.push(closure);
		Ok(())
	}
}

#[cfg(target_arch = "wasm32")]
impl Drop for WebHistory {
	fn drop(&mut self) {
		use wasm_bindgen::JsCast;

		if let Ok(window) = browser::window() {
			for closure in &self.listeners {
				let _ = window
					.remove_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
			}
		}
	}
}
