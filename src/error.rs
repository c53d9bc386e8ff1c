use std::fmt;

/// Terminal outcome of a parse attempt. `None` means success.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
	None,
	BufferOverflow,
	RequestMalformed,
	InvalidPath,
	// reserved: no method validation is performed
	InvalidOrUnsupportedMethod,
	// reserved
	InvalidRequest,
	StreamUnavailable,
}

impl ErrorCode {
	pub fn is_none(&self) -> bool {
		*self == Self::None
	}
}

impl Default for ErrorCode {
	fn default() -> Self {
		Self::None
	}
}

impl fmt::Display for ErrorCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			Self::None => "no error",
			Self::BufferOverflow => "request does not fit in the buffer",
			Self::RequestMalformed => "malformed request",
			Self::InvalidPath => "invalid request line",
			Self::InvalidOrUnsupportedMethod => "invalid or unsupported method",
			Self::InvalidRequest => "invalid request",
			Self::StreamUnavailable => "no data available on the stream",
		};
		f.write_str(s)
	}
}

impl std::error::Error for ErrorCode {}
