//! Debounced suggestions that never let an older answer replace a newer one.

use std::{
	future::Future,
	sync::atomic::{AtomicU64, Ordering},
	time::Duration,
};

use tracing::trace;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

/// Wraps a lookup so that only the latest input is ever answered.
///
/// Each call to [`Typeahead::query`] starts a new generation. A call waits out the
/// debounce interval and gives up if a newer call arrived meanwhile; once its lookup
/// returns it gives up again if it was superseded while waiting on the lookup.
pub struct Typeahead<F> {
	lookup: F,
	debounce: Duration,
	generation: AtomicU64,
}

impl<F> Typeahead<F> {
	pub fn new(debounce: Duration, lookup: F) -> Self {
		Self {
			lookup,
			debounce,
			generation: AtomicU64::new(0),
		}
	}

	/// Supersedes any call in flight, e.g. when the input is cleared.
	pub fn cancel(&self) {
		self.generation.fetch_add(1, Ordering::SeqCst);
	}

	fn is_current(&self, generation: u64) -> bool {
		self.generation.load(Ordering::SeqCst) == generation
	}
}

impl<F, Fut, T> Typeahead<F>
where
	F: Fn(String) -> Fut,
	Fut: Future<Output = T>,
{
	/// `None` when this input was superseded before its answer could be shown.
	pub async fn query(&self, input: impl Into<String>) -> Option<T> {
		let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

		tokio::time::sleep(self.debounce).await;
		if !self.is_current(generation) {
			trace!(generation, "Typeahead input superseded during debounce");
			return None;
		}

		let answer = (self.lookup)(input.into()).await;
		if !self.is_current(generation) {
			trace!(generation, "Discarding stale typeahead answer");
			return None;
		}

		Some(answer)
	}
}
