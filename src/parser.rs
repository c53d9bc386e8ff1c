use crate::body::slice_body;
use crate::buffer::RequestBuffer;
use crate::error::ErrorCode;
use crate::headers::scan_headers;
use crate::lines::{split_lines, LineSpan};
use crate::options::Options;
use crate::query::decode_query;
use crate::request::ParsedRequest;
use crate::request_line::RequestLine;
use crate::response::{ResponseWriter, DEFAULT_CONTENT_TYPE};
use crate::transport::{ByteSink, ByteSource};
use anyhow::Result;

/// Progress of the current `receive` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseState {
	Idle,
	Reading,
	LinesSplit,
	RequestLineParsed,
	QueryParsed,
	HeadersScanned,
	BodySliced,
	Done,
	Failed(ErrorCode),
}

/// Reads one request at a time from a transport and answers it.
///
/// Every buffer and sequence is owned by the instance: two parsers never
/// share anything.
pub struct HttpParser<T> {
	transport: T,
	options: Options,
	buffer: RequestBuffer,
	lines: Vec<LineSpan>,
	request: ParsedRequest,
	state: ParseState,
	failed_at: Option<ParseState>,
	error: ErrorCode,
}

impl<T: ByteSource + ByteSink> HttpParser<T> {
	pub fn new(transport: T, options: Options) -> Self {
		Self {
			transport,
			buffer: RequestBuffer::new(options.capacity()),
			options,
			lines: Vec::new(),
			request: ParsedRequest::default(),
			state: ParseState::Idle,
			failed_at: None,
			error: ErrorCode::None,
		}
	}

	/// Drains whatever the transport has available right now and parses it.
	/// When nothing at all could be read, the previous request is left as is.
	pub fn receive(&mut self) -> Result<(), ErrorCode> {
		self.state = ParseState::Reading;
		self.failed_at = None;
		self.buffer.reset();
		let read_res = self.buffer.drain_from(&mut self.transport);
		log::trace!(
			"read {} bytes: {}",
			self.buffer.filled(),
			crate::display_bytes!(self.buffer.as_bytes())
		);
		if let Err(code) = read_res {
			log::debug!(
				"buffer overflow while reading from client ({} bytes)",
				self.buffer.capacity()
			);
			self.request.clear();
			self.lines.clear();
			return self.fail(code);
		}
		if self.buffer.filled() == 0 {
			log::debug!("no data read from client");
			return self.fail(ErrorCode::StreamUnavailable);
		}
		self.request.clear();
		self.lines.clear();
		self.error = ErrorCode::None;
		match self.parse() {
			Ok(()) => {
				log::debug!("receive success");
				self.state = ParseState::Done;
				Ok(())
			}
			Err(code) => self.fail(code),
		}
	}

	fn fail(&mut self, code: ErrorCode) -> Result<(), ErrorCode> {
		log::debug!("unable to receive the request: {code}");
		self.error = code;
		self.failed_at = Some(self.state);
		self.state = ParseState::Failed(code);
		Err(code)
	}

	fn parse(&mut self) -> Result<(), ErrorCode> {
		let data = self.buffer.as_bytes();
		let policy = self.options.policy();
		self.lines = split_lines(data);
		self.state = ParseState::LinesSplit;
		log::debug!("request split into {} lines", self.lines.len());

		let first = *self.lines.first().ok_or(ErrorCode::RequestMalformed)?;
		let request_line = RequestLine::from_bytes(first.slice(data))?;
		log::debug!(
			"request line: {} {} {}",
			request_line.method,
			request_line.path,
			request_line.version
		);
		self.request.method = request_line.method;
		self.request.path = request_line.path;
		self.request.version = request_line.version;
		let mut cursor = first.consumed();
		self.state = ParseState::RequestLineParsed;

		let query_params = &mut self.request.query_params;
		self.request.skipped += decode_query(&request_line.query, policy, query_params)?;
		self.state = ParseState::QueryParsed;

		let scan = scan_headers(data, &self.lines, 1, policy, &mut self.request.headers)?;
		self.request.skipped += scan.skipped;
		cursor += scan.consumed;
		self.state = ParseState::HeadersScanned;
		match self.lines.get(scan.line) {
			Some(line) if line.is_blank(data) => cursor += line.consumed(),
			_ => {
				log::debug!("headers are not followed by an empty line");
				return Err(ErrorCode::RequestMalformed);
			}
		}

		let (offset, body) = slice_body(data, cursor);
		self.request.body_offset = offset;
		self.request.body = body;
		self.state = ParseState::BodySliced;
		Ok(())
	}

	fn writer(&mut self) -> ResponseWriter<'_, T> {
		ResponseWriter::new(&mut self.transport, self.options.grace_period())
	}

	pub fn respond_status(&mut self, code: u16, message: &str) -> Result<()> {
		self.writer().status(code, message)
	}

	pub fn respond_text(&mut self, body: &str) -> Result<()> {
		self.respond_with(DEFAULT_CONTENT_TYPE, body)
	}

	pub fn respond_with(&mut self, content_type: &str, body: &str) -> Result<()> {
		self.respond_bytes(content_type, body.as_bytes())
	}

	pub fn respond_bytes(&mut self, content_type: &str, body: &[u8]) -> Result<()> {
		self.writer().ok(content_type, body)
	}

	/// Releases every buffer and goes back to `Idle`. Safe to call at any
	/// time, including before the first `receive`.
	pub fn end(&mut self) {
		self.lines = Vec::new();
		self.request.clear();
		self.buffer.release();
		self.state = ParseState::Idle;
		self.failed_at = None;
		self.error = ErrorCode::None;
		if let Err(e) = ByteSink::flush(&mut self.transport) {
			log::warn!("unable to flush the transport: {e}");
		}
	}

	pub fn request(&self) -> &ParsedRequest {
		&self.request
	}

	pub fn error(&self) -> ErrorCode {
		self.error
	}

	/// Once `receive` returned, this is either `Done` or `Failed`.
	pub fn state(&self) -> ParseState {
		self.state
	}

	/// Last state reached by a failed `receive` before it gave up.
	pub fn failed_at(&self) -> Option<ParseState> {
		self.failed_at
	}

	pub fn transport(&self) -> &T {
		&self.transport
	}

	pub fn transport_mut(&mut self) -> &mut T {
		&mut self.transport
	}

	pub fn into_inner(self) -> T {
		self.transport
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::options::MalformedEntryPolicy;
	use crate::pair::KeyValuePair;
	use crate::transport::MemoryTransport;
	use std::time::Duration;

	const GET_QUERY: &[u8] = include_bytes!("../test_samples/get_query.txt");
	const POST_JSON: &[u8] = include_bytes!("../test_samples/post_json.txt");
	const NO_TERMINATOR: &[u8] = include_bytes!("../test_samples/no_terminator.txt");
	const BROKEN_HEADER: &[u8] = b"GET / HTTP/1.1\r\nHost: a\r\nbroken\r\n\r\nok";

	fn options() -> Options {
		Options::default().set_grace_period(Duration::ZERO)
	}

	fn parser(input: &[u8]) -> HttpParser<MemoryTransport> {
		HttpParser::new(MemoryTransport::new(input), options())
	}

	#[test]
	fn get_with_query() {
		let mut p = parser(GET_QUERY);
		assert_eq!(p.receive(), Ok(()));
		assert_eq!(p.state(), ParseState::Done);
		assert_eq!(p.error(), ErrorCode::None);
		let req = p.request();
		assert_eq!(req.method(), "GET");
		assert_eq!(req.path(), "/items");
		assert_eq!(req.version(), "HTTP/1.1");
		assert_eq!(
			req.query_params(),
			&[
				KeyValuePair::new("id", "42"),
				KeyValuePair::new("sort", "asc"),
			]
		);
		assert_eq!(req.query_param("id"), "42");
		assert_eq!(req.header("Host"), "example.com");
		assert_eq!(req.header("Accept"), "*/*");
		assert_eq!(req.header("X-Missing"), "");
		assert_eq!(req.headers().len(), 3);
		assert_eq!(req.body_len(), 0);
		assert_eq!(req.body_offset(), GET_QUERY.len());
	}

	#[test]
	fn post_with_body() {
		let mut p = parser(POST_JSON);
		assert_eq!(p.receive(), Ok(()));
		let req = p.request();
		assert_eq!(req.method(), "POST");
		assert_eq!(req.path(), "/api/led");
		assert!(req.query_params().is_empty());
		assert_eq!(req.body(), b"{\"state\":\"on\",\"level\":128}\n");
		assert_eq!(req.body_as_str(), "{\"state\":\"on\",\"level\":128}\n");
		assert_eq!(req.body_offset(), POST_JSON.len() - req.body_len());
		let length: usize = req.header("Content-Length").parse().unwrap();
		assert_eq!(length, req.body_len());
	}

	#[test]
	fn missing_terminator() {
		let mut p = parser(NO_TERMINATOR);
		assert_eq!(p.receive(), Err(ErrorCode::RequestMalformed));
		assert_eq!(p.error(), ErrorCode::RequestMalformed);
		assert_eq!(p.state(), ParseState::Failed(ErrorCode::RequestMalformed));
		assert_eq!(p.request().body_len(), 0);
	}

	#[test]
	fn failure_keeps_the_step_reached() {
		let mut p = parser(NO_TERMINATOR);
		assert!(p.receive().is_err());
		assert_eq!(p.failed_at(), Some(ParseState::HeadersScanned));

		let mut p = parser(b"GET /a b HTTP/1.1\r\n\r\n");
		assert!(p.receive().is_err());
		assert_eq!(p.failed_at(), Some(ParseState::LinesSplit));

		let mut p = HttpParser::new(
			MemoryTransport::new(b"GET /?oops HTTP/1.1\r\n\r\n"),
			options().set_policy(MalformedEntryPolicy::Reject),
		);
		assert!(p.receive().is_err());
		assert_eq!(p.failed_at(), Some(ParseState::RequestLineParsed));

		let mut p = HttpParser::new(MemoryTransport::new(POST_JSON), options().set_capacity(16));
		assert!(p.receive().is_err());
		assert_eq!(p.failed_at(), Some(ParseState::Reading));

		let mut p = parser(GET_QUERY);
		assert_eq!(p.failed_at(), None);
		p.receive().unwrap();
		assert_eq!(p.failed_at(), None);
		assert_eq!(p.receive(), Err(ErrorCode::StreamUnavailable));
		assert_eq!(p.failed_at(), Some(ParseState::Reading));
		p.end();
		assert_eq!(p.failed_at(), None);
	}

	#[test]
	fn request_line_only() {
		let mut p = parser(b"GET / HTTP/1.1");
		assert_eq!(p.receive(), Err(ErrorCode::RequestMalformed));
		assert_eq!(p.request().method(), "GET");
	}

	#[test]
	fn overflow() {
		let transport = MemoryTransport::new(POST_JSON);
		let mut p = HttpParser::new(transport, options().set_capacity(32));
		assert_eq!(p.receive(), Err(ErrorCode::BufferOverflow));
		assert_eq!(p.error(), ErrorCode::BufferOverflow);
		assert_eq!(p.transport_mut().available(), POST_JSON.len() - 32);
		assert_eq!(p.request().method(), "");
	}

	#[test]
	fn empty_input_keeps_previous_request() {
		let mut p = parser(GET_QUERY);
		p.receive().unwrap();
		assert_eq!(p.receive(), Err(ErrorCode::StreamUnavailable));
		assert_eq!(p.state(), ParseState::Failed(ErrorCode::StreamUnavailable));
		assert_eq!(p.request().path(), "/items");
		assert_eq!(p.request().query_param("sort"), "asc");
	}

	#[test]
	fn invalid_request_line() {
		let mut p = parser(b"GET /a b HTTP/1.1\r\n\r\n");
		assert_eq!(p.receive(), Err(ErrorCode::InvalidPath));
		assert_eq!(p.request().method(), "");
		assert_eq!(p.request().path(), "");
		assert_eq!(p.request().version(), "");
	}

	#[test]
	fn skip_broken_header() {
		let mut p = parser(BROKEN_HEADER);
		assert_eq!(p.receive(), Ok(()));
		assert_eq!(p.request().skipped_entries(), 1);
		assert_eq!(p.request().headers(), &[KeyValuePair::new("Host", "a")]);
		assert_eq!(p.request().body(), b"ok");
	}

	#[test]
	fn reject_broken_header() {
		let mut p = HttpParser::new(
			MemoryTransport::new(BROKEN_HEADER),
			options().set_policy(MalformedEntryPolicy::Reject),
		);
		assert_eq!(p.receive(), Err(ErrorCode::RequestMalformed));
	}

	#[test]
	fn reject_broken_query() {
		let mut p = HttpParser::new(
			MemoryTransport::new(b"GET /?a=1&oops HTTP/1.1\r\n\r\n"),
			options().set_policy(MalformedEntryPolicy::Reject),
		);
		assert_eq!(p.receive(), Err(ErrorCode::RequestMalformed));
		assert_eq!(p.state(), ParseState::Failed(ErrorCode::RequestMalformed));
	}

	#[test]
	fn nul_byte_ends_a_header_line() {
		let data = b"GET / HTTP/1.1\r\nA: 1\0B: 2\r\n\r\nxyz";
		let mut p = parser(data);
		assert_eq!(p.receive(), Ok(()));
		assert_eq!(p.request().header("A"), "1");
		assert_eq!(p.request().header("B"), "2");
		assert_eq!(p.request().body(), b"xyz");
		assert_eq!(p.request().body_offset(), data.len() - 3);
	}

	#[test]
	fn short_read() {
		let mut p = parser(b"POST /log HTTP/1.1\r\n\r\nhel");
		assert_eq!(p.receive(), Ok(()));
		assert_eq!(p.request().body(), b"hel");
		p.transport_mut().push_input(b"lo");
		assert_eq!(p.transport_mut().available(), 2);
	}

	#[test]
	fn end_then_receive_again() {
		let mut p = parser(GET_QUERY);
		p.end();
		assert_eq!(p.state(), ParseState::Idle);
		p.receive().unwrap();
		p.end();
		assert_eq!(p.state(), ParseState::Idle);
		assert_eq!(p.request().method(), "");
		assert!(p.request().headers().is_empty());
		p.transport_mut().push_input(POST_JSON);
		assert_eq!(p.receive(), Ok(()));
		assert_eq!(p.request().method(), "POST");
		assert_eq!(p.transport().flush_count(), 2);
	}

	#[test]
	fn independent_instances() {
		let mut a = parser(GET_QUERY);
		let mut b = parser(POST_JSON);
		a.receive().unwrap();
		b.receive().unwrap();
		assert_eq!(a.request().method(), "GET");
		assert_eq!(b.request().method(), "POST");
		assert!(a.request().body().is_empty());
		b.end();
		assert_eq!(a.request().header("Host"), "example.com");
	}

	#[test]
	fn respond_forms() {
		let mut p = parser(GET_QUERY);
		p.receive().unwrap();
		p.respond_text("42").unwrap();
		p.end();
		assert_eq!(
			p.into_inner().output(),
			&b"HTTP/1.1 200 OK\r\nConnection: close\r\n\
				Content-Type: text/plain\r\nContent-Length: 2\r\n\r\n42\r\n"[..]
		);

		let mut p = parser(b"");
		assert_eq!(p.receive(), Err(ErrorCode::StreamUnavailable));
		p.respond_status(400, "Bad Request").unwrap();
		p.respond_with("application/json", "{}").unwrap();
		let out = p.into_inner();
		let status = b"HTTP/1.1 400 Bad Request\r\nConnection: close\r\n\r\n";
		let json = b"Content-Type: application/json\r\nContent-Length: 2\r\n\r\n{}\r\n";
		assert!(out.output().starts_with(status));
		assert!(out.output().ends_with(json));
		assert_eq!(out.flush_count(), 2);
	}
}
