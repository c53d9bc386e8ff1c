use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Stdin, Stdout, Write};

pub const LINE_END: &[u8] = b"\r\n";

/// Where request bytes come from.
pub trait ByteSource {
	/// Number of bytes that can be read right now without waiting.
	fn available(&mut self) -> usize;

	fn read_byte(&mut self) -> Option<u8>;
}

/// Where response bytes go.
pub trait ByteSink {
	fn write_bytes(&mut self, data: &[u8]) -> io::Result<()>;

	fn flush(&mut self) -> io::Result<()>;

	fn write_line(&mut self, line: &str) -> io::Result<()> {
		self.write_bytes(line.as_bytes())?;
		self.write_bytes(LINE_END)
	}
}

impl<T: ByteSource + ?Sized> ByteSource for &mut T {
	fn available(&mut self) -> usize {
		(**self).available()
	}

	fn read_byte(&mut self) -> Option<u8> {
		(**self).read_byte()
	}
}

impl<T: ByteSink + ?Sized> ByteSink for &mut T {
	fn write_bytes(&mut self, data: &[u8]) -> io::Result<()> {
		(**self).write_bytes(data)
	}

	fn flush(&mut self) -> io::Result<()> {
		(**self).flush()
	}
}

/// In-memory transport. Input pushed later on models a peer whose bytes
/// arrive in several fragments.
#[derive(Debug, Default)]
pub struct MemoryTransport {
	input: VecDeque<u8>,
	output: Vec<u8>,
	flushes: usize,
}

impl MemoryTransport {
	pub fn new(input: &[u8]) -> Self {
		Self {
			input: input.iter().copied().collect(),
			..Self::default()
		}
	}

	pub fn push_input(&mut self, data: &[u8]) {
		self.input.extend(data.iter().copied());
	}

	pub fn output(&self) -> &[u8] {
		&self.output
	}

	pub fn flush_count(&self) -> usize {
		self.flushes
	}
}

impl ByteSource for MemoryTransport {
	fn available(&mut self) -> usize {
		self.input.len()
	}

	fn read_byte(&mut self) -> Option<u8> {
		self.input.pop_front()
	}
}

impl ByteSink for MemoryTransport {
	fn write_bytes(&mut self, data: &[u8]) -> io::Result<()> {
		self.output.extend_from_slice(data);
		Ok(())
	}

	fn flush(&mut self) -> io::Result<()> {
		self.flushes += 1;
		Ok(())
	}
}

/// Standard input and output, as handed over by inetd or socat.
///
/// The first call to `available` blocks until the peer sent something. After
/// that, only bytes already sitting in the read buffer are reported, so a
/// request split over several writes may be read short.
pub struct StdioTransport<R = Stdin, W: Write = Stdout> {
	reader: BufReader<R>,
	writer: BufWriter<W>,
	primed: bool,
}

impl StdioTransport {
	pub fn new(capacity: usize) -> Self {
		Self::from_parts(io::stdin(), io::stdout(), capacity)
	}
}

impl<R: Read, W: Write> StdioTransport<R, W> {
	pub fn from_parts(reader: R, writer: W, capacity: usize) -> Self {
		// one extra byte so that an oversized request is noticed
		Self {
			reader: BufReader::with_capacity(capacity.saturating_add(1), reader),
			writer: BufWriter::new(writer),
			primed: false,
		}
	}

	pub fn writer(&self) -> &W {
		self.writer.get_ref()
	}
}

impl<R: Read, W: Write> ByteSource for StdioTransport<R, W> {
	fn available(&mut self) -> usize {
		if !self.primed {
			self.primed = true;
			return match self.reader.fill_buf() {
				Ok(buf) => buf.len(),
				Err(e) => {
					log::error!("unable to read the request: {e}");
					0
				}
			};
		}
		self.reader.buffer().len()
	}

	fn read_byte(&mut self) -> Option<u8> {
		let b = *self.reader.buffer().first()?;
		self.reader.consume(1);
		Some(b)
	}
}

impl<R: Read, W: Write> ByteSink for StdioTransport<R, W> {
	fn write_bytes(&mut self, data: &[u8]) -> io::Result<()> {
		self.writer.write_all(data)
	}

	fn flush(&mut self) -> io::Result<()> {
		self.writer.flush()
	}
}
