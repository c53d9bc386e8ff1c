use crate::transport::ByteSink;
use anyhow::Result;
use std::time::Duration;

pub const HTTP_VERSION: &str = "HTTP/1.1";
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";
const HEADER_CONNECTION: &str = "Connection: close";

pub struct ResponseWriter<'a, W: ByteSink + ?Sized> {
	sink: &'a mut W,
	grace_period: Duration,
}

impl<'a, W: ByteSink + ?Sized> ResponseWriter<'a, W> {
	pub fn new(sink: &'a mut W, grace_period: Duration) -> Self {
		Self { sink, grace_period }
	}

	/// Status line and `Connection: close`, no body.
	pub fn status(self, code: u16, message: &str) -> Result<()> {
		log::debug!("responding with {code} {message}");
		self.sink.write_line(&format!("{HTTP_VERSION} {code} {message}"))?;
		self.sink.write_line(HEADER_CONNECTION)?;
		self.sink.write_line("")?;
		self.finish()
	}

	/// `200 OK` with `body` sent verbatim, followed by an empty line.
	pub fn ok(self, content_type: &str, body: &[u8]) -> Result<()> {
		log::debug!("responding with {} bytes of {content_type}", body.len());
		self.sink.write_line(&format!("{HTTP_VERSION} 200 OK"))?;
		self.sink.write_line(HEADER_CONNECTION)?;
		self.sink.write_line(&format!("Content-Type: {content_type}"))?;
		self.sink.write_line(&format!("Content-Length: {}", body.len()))?;
		self.sink.write_line("")?;
		self.sink.write_bytes(body)?;
		self.sink.write_line("")?;
		self.finish()
	}

	fn finish(self) -> Result<()> {
		self.sink.flush()?;
		if !self.grace_period.is_zero() {
			// the sink has no way to tell when the peer got everything
			std::thread::sleep(self.grace_period);
		}
		Ok(())
	}
}
