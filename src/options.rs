use std::time::Duration;

pub const DEFAULT_BUFF_SIZE: usize = 1024;
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_millis(25);

/// What to do with a query parameter or a header line that cannot be split
/// into a key and a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MalformedEntryPolicy {
	/// Log it, count it and keep going.
	Skip,
	/// Fail the whole request with `RequestMalformed`.
	Reject,
}

impl Default for MalformedEntryPolicy {
	fn default() -> Self {
		Self::Skip
	}
}

#[derive(Clone, Debug)]
pub struct Options {
	capacity: usize,
	grace_period: Duration,
	policy: MalformedEntryPolicy,
}

impl Default for Options {
	fn default() -> Self {
		Self {
			capacity: DEFAULT_BUFF_SIZE,
			grace_period: DEFAULT_GRACE_PERIOD,
			policy: MalformedEntryPolicy::default(),
		}
	}
}

impl Options {
	pub fn set_capacity(mut self, capacity: usize) -> Self {
		self.capacity = capacity;
		self
	}

	/// Pause after each flushed response so that a slow sink can drain
	/// before the caller tears the transport down. Zero disables it.
	pub fn set_grace_period(mut self, grace_period: Duration) -> Self {
		self.grace_period = grace_period;
		self
	}

	pub fn set_policy(mut self, policy: MalformedEntryPolicy) -> Self {
		self.policy = policy;
		self
	}

	pub fn capacity(&self) -> usize {
		self.capacity
	}

	pub fn grace_period(&self) -> Duration {
		self.grace_period
	}

	pub fn policy(&self) -> MalformedEntryPolicy {
		self.policy
	}
}
