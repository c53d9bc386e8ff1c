//! Bounded-memory HTTP/1.1 request parser and minimal responder.
//!
//! Bytes are drained from a [`ByteSource`] into a fixed-capacity buffer, split
//! into lines and decoded into a [`ParsedRequest`]. Responses are written to a
//! [`ByteSink`] with `Connection: close`.

pub mod body;
pub mod buffer;
pub mod error;
pub mod headers;
pub mod lines;
pub mod options;
pub mod pair;
pub mod parser;
pub mod query;
pub mod request;
pub mod request_line;
pub mod response;
pub mod transport;

pub use error::ErrorCode;
pub use options::{MalformedEntryPolicy, Options};
pub use pair::KeyValuePair;
pub use parser::{HttpParser, ParseState};
pub use request::ParsedRequest;
pub use transport::{ByteSink, ByteSource, MemoryTransport, StdioTransport};

#[macro_export]
macro_rules! display_bytes {
	($bytes: expr) => {
		$bytes
			.iter()
			.map(|b| {
				let v: Vec<u8> = std::ascii::escape_default(*b).collect();
				String::from_utf8_lossy(&v).to_string()
			})
			.collect::<String>()
	};
}
