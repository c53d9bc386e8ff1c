use crate::error::ErrorCode;
use crate::transport::ByteSource;

/// Fixed-capacity storage for the raw request bytes.
#[derive(Debug)]
pub struct RequestBuffer {
	data: Box<[u8]>,
	capacity: usize,
	filled: usize,
}

impl RequestBuffer {
	pub fn new(capacity: usize) -> Self {
		Self {
			data: vec![0; capacity].into_boxed_slice(),
			capacity,
			filled: 0,
		}
	}

	pub fn capacity(&self) -> usize {
		self.capacity
	}

	pub fn filled(&self) -> usize {
		self.filled
	}

	pub fn as_bytes(&self) -> &[u8] {
		&self.data[..self.filled]
	}

	pub fn is_allocated(&self) -> bool {
		self.data.len() == self.capacity
	}

	/// Forgets the current content, allocating the storage again if it was
	/// released.
	pub fn reset(&mut self) {
		if !self.is_allocated() {
			self.data = vec![0; self.capacity].into_boxed_slice();
		}
		self.filled = 0;
	}

	pub fn release(&mut self) {
		self.data = Box::default();
		self.filled = 0;
	}

	/// Reads from the source for as long as it reports available bytes. This
	/// never waits for more data to show up.
	pub fn drain_from<S: ByteSource + ?Sized>(
		&mut self,
		source: &mut S,
	) -> Result<usize, ErrorCode> {
		while source.available() > 0 {
			if self.filled >= self.data.len() {
				return Err(ErrorCode::BufferOverflow);
			}
			match source.read_byte() {
				Some(b) => {
					self.data[self.filled] = b;
					self.filled += 1;
				}
				None => break,
			}
			if self.filled >= self.data.len() {
				return Err(ErrorCode::BufferOverflow);
			}
		}
		Ok(self.filled)
	}
}
