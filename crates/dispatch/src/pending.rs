//! Outstanding-request counter.

use std::sync::Arc;

use tokio::sync::watch;

/// Number of global mutation calls currently awaiting the service.
///
/// The count tracks "any request outstanding", not "any request succeeded":
/// the [`PendingGuard`] returned by [`begin`] decrements on drop, so success,
/// failure and a dropped future all release it.
///
/// [`begin`]: PendingCounter::begin
#[derive(Debug, Clone)]
pub struct PendingCounter {
	tx: Arc<watch::Sender<usize>>,
}

impl Default for PendingCounter {
	fn default() -> Self {
		Self::new()
	}
}

impl PendingCounter {
	/// Creates a counter at zero.
	pub fn new() -> Self {
		let (tx, _rx) = watch::channel(0);
		Self { tx: Arc::new(tx) }
	}

	/// Current number of outstanding calls.
	pub fn get(&self) -> usize {
		*self.tx.borrow()
	}

	/// Receiver notified whenever the count changes.
	pub fn subscribe(&self) -> watch::Receiver<usize> {
		self.tx.subscribe()
	}

	/// Marks one call outstanding until the guard is dropped.
	pub fn begin(&self) -> PendingGuard {
		self.tx.send_modify(|count| *count += 1);
		PendingGuard {
			tx: Arc::clone(&self.tx),
		}
	}
}

/// Releases one outstanding call on drop.
#[derive(Debug)]
#[must_use = "dropping the guard releases the pending slot immediately"]
pub struct PendingGuard {
	tx: Arc<watch::Sender<usize>>,
}

impl Drop for PendingGuard {
	fn drop(&mut self) {
		self.tx.send_modify(|count| *count = count.saturating_sub(1));
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn guards_release_on_drop() {
		let counter = PendingCounter::new();
		let first = counter.begin();
		let second = counter.begin();
		assert_eq!(counter.get(), 2);
		drop(first);
		assert_eq!(counter.get(), 1);
		drop(second);
		assert_eq!(counter.get(), 0);
	}

	#[test]
	fn subscribers_see_changes() {
		let counter = PendingCounter::new();
		let mut rx = counter.subscribe();
		let guard = counter.begin();
		assert!(rx.has_changed().unwrap());
		assert_eq!(*rx.borrow_and_update(), 1);
		drop(guard);
		assert_eq!(*rx.borrow_and_update(), 0);
	}
}
