use crate::pair::{lookup, KeyValuePair};
use std::borrow::Cow;

/// A decoded request. The body is an owned copy, independent of the buffer
/// the request was read into.
#[derive(Debug, Default)]
pub struct ParsedRequest {
	pub(crate) method: String,
	pub(crate) path: String,
	pub(crate) version: String,
	pub(crate) query_params: Vec<KeyValuePair>,
	pub(crate) headers: Vec<KeyValuePair>,
	pub(crate) body_offset: usize,
	pub(crate) body: Vec<u8>,
	pub(crate) skipped: usize,
}

impl ParsedRequest {
	pub fn method(&self) -> &str {
		&self.method
	}

	pub fn path(&self) -> &str {
		&self.path
	}

	pub fn version(&self) -> &str {
		&self.version
	}

	pub fn headers(&self) -> &[KeyValuePair] {
		&self.headers
	}

	pub fn query_params(&self) -> &[KeyValuePair] {
		&self.query_params
	}

	/// Value of the first header named exactly `key`, or an empty string.
	pub fn header(&self, key: &str) -> &str {
		lookup(&self.headers, key)
	}

	/// Value of the first query parameter named exactly `key`, or an empty
	/// string.
	pub fn query_param(&self, key: &str) -> &str {
		lookup(&self.query_params, key)
	}

	pub fn body_offset(&self) -> usize {
		self.body_offset
	}

	pub fn body_len(&self) -> usize {
		self.body.len()
	}

	pub fn body(&self) -> &[u8] {
		&self.body
	}

	pub fn body_as_str(&self) -> Cow<'_, str> {
		String::from_utf8_lossy(&self.body)
	}

	/// Malformed query parameters and header lines that were ignored.
	pub fn skipped_entries(&self) -> usize {
		self.skipped
	}

	pub(crate) fn clear(&mut self) {
		*self = Self::default();
	}
}
