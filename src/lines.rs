pub const LINE_DELIMITER: u8 = b'\n';
pub const BLANK_LINE: &[u8] = b"\r";

/// A line inside a byte buffer. The delimiter is not part of the span, a
/// trailing carriage return is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineSpan {
	pub start: usize,
	pub len: usize,
}

impl LineSpan {
	pub fn end(&self) -> usize {
		self.start + self.len
	}

	pub fn slice<'a>(&self, data: &'a [u8]) -> &'a [u8] {
		&data[self.start..self.end()]
	}

	/// Bytes consumed by this line, delimiter included.
	pub fn consumed(&self) -> usize {
		self.len + 1
	}

	pub fn is_blank(&self, data: &[u8]) -> bool {
		self.slice(data) == BLANK_LINE
	}
}

fn is_delimiter(c: u8, delimiter: u8) -> bool {
	// a NUL byte ends a piece as well
	c == delimiter || c == 0
}

/// Splits `data` on `delimiter`. Empty pieces between two delimiters are
/// kept, an empty trailing piece is not.
pub fn split_spans(data: &[u8], delimiter: u8) -> Vec<LineSpan> {
	let mut spans = Vec::new();
	let mut start = 0;
	for (i, &c) in data.iter().enumerate() {
		if is_delimiter(c, delimiter) {
			spans.push(LineSpan {
				start,
				len: i - start,
			});
			start = i + 1;
		}
	}
	if start < data.len() {
		spans.push(LineSpan {
			start,
			len: data.len() - start,
		});
	}
	spans
}

pub fn split_lines(data: &[u8]) -> Vec<LineSpan> {
	split_spans(data, LINE_DELIMITER)
}
