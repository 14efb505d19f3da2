//! Signal - observable value holder.
//!
//! `Signal<T>` holds a value shared by every clone and notifies subscribers
//! whenever it is replaced. The router keeps the current route in a signal
//! so the application shell can observe navigation without a global.
//!
//! ## Example
//!
//! ```
//! use mapview_router::Signal;
//!
//! let count = Signal::new(0);
//! count.set(42);
//! assert_eq!(count.get(), 42);
//!
//! count.update(|n| *n += 1);
//! assert_eq!(count.get(), 43);
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

type Subscriber<T> = Rc<dyn Fn(&T)>;

/// Handle returned by [`Signal::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A shared, observable value.
///
/// Signals are single-threaded: all clones share the value via
/// `Rc<RefCell<T>>`. Subscribers run after the value has been replaced and
/// receive a shared borrow of it; they may read the signal but must not set
/// it.
pub struct Signal<T: 'static> {
	value: Rc<RefCell<T>>,
	subscribers: Rc<RefCell<Vec<(SubscriptionId, Subscriber<T>)>>>,
	next_id: Rc<Cell<u64>>,
}

impl<T: 'static> Clone for Signal<T> {
	fn clone(&self) -> Self {
		Self {
			value: Rc::clone(&self.value),
			subscribers: Rc::clone(&self.subscribers),
			next_id: Rc::clone(&self.next_id),
		}
	}
}

impl<T: 'static> Signal<T> {
	/// Create a new Signal with the given initial value.
	pub fn new(value: T) -> Self {
		Self {
			value: Rc::new(RefCell::new(value)),
			subscribers: Rc::new(RefCell::new(Vec::new())),
			next_id: Rc::new(Cell::new(0)),
		}
	}

	/// Get a clone of the current value.
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		self.value.borrow().clone()
	}

	/// Runs `f` with a shared borrow of the current value.
	pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		f(&*self.value.borrow())
	}

	/// Replace the value and notify subscribers.
	pub fn set(&self, value: T) {
		*self.value.borrow_mut() = value;
		self.notify();
	}

	/// Mutate the value in place and notify subscribers once.
	pub fn update<F>(&self, f: F)
	where
		F: FnOnce(&mut T),
	{
		f(&mut *self.value.borrow_mut());
		self.notify();
	}

	/// Registers a callback invoked after every change.
	pub fn subscribe<F>(&self, f: F) -> SubscriptionId
	where
		F: Fn(&T) + 'static,
	{
		let id = SubscriptionId(self.next_id.get());
		self.next_id.set(id.0 + 1);
		self.subscribers.borrow_mut().push((id, Rc::new(f)));
		id
	}

	/// Removes a subscriber. Returns `false` if it was not registered.
	pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
		let mut subscribers = self.subscribers.borrow_mut();
		let before = subscribers.len();
		subscribers.retain(|(sub_id, _)| *sub_id != id);
		subscribers.len() != before
	}

	/// Number of registered subscribers.
	pub fn subscriber_count(&self) -> usize {
		self.subscribers.borrow().len()
	}

	/// Returns `true` if both handles share the same value.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.value, &other.value)
	}

	fn notify(&self) {
		// Snapshot so subscribers can (un)subscribe while being notified.
		let subscribers: Vec<Subscriber<T>> = self
			.subscribers
			.borrow()
			.iter()
			.map(|(_, f)| Rc::clone(f))
			.collect();
		let value = self.value.borrow();
		for subscriber in subscribers {
			subscriber(&*value);
		}
	}
}

impl<T: fmt::Debug + 'static> fmt::Debug for Signal<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Signal")
			.field("value", &*self.value.borrow())
			.field("subscribers", &self.subscriber_count())
			.finish()
	}
}
