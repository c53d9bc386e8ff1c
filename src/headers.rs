use crate::error::ErrorCode;
use crate::lines::LineSpan;
use crate::options::MalformedEntryPolicy;
use crate::pair::KeyValuePair;

pub const HEADER_SEPARATOR: u8 = b':';

/// Where a header scan stopped.
#[derive(Debug, PartialEq, Eq)]
pub struct HeaderScan {
	/// Index of the first line that was not consumed as a header.
	pub line: usize,
	/// Bytes consumed by the header lines, delimiters included.
	pub consumed: usize,
	pub skipped: usize,
}

/// Reads header lines starting at `lines[first]` until the blank line or the
/// end of the sequence.
pub fn scan_headers(
	data: &[u8],
	lines: &[LineSpan],
	first: usize,
	policy: MalformedEntryPolicy,
	headers: &mut Vec<KeyValuePair>,
) -> Result<HeaderScan, ErrorCode> {
	let mut scan = HeaderScan {
		line: first,
		consumed: 0,
		skipped: 0,
	};
	while let Some(line) = lines.get(scan.line) {
		if line.is_blank(data) {
			break;
		}
		let raw = line.slice(data);
		match KeyValuePair::from_bytes(raw, HEADER_SEPARATOR) {
			Ok(header) => {
				log::trace!("header: {}: {}", header.key, header.value);
				headers.push(header);
			}
			Err(e) => {
				log::warn!("malformed header: {}: {e}", crate::display_bytes!(raw));
				match policy {
					MalformedEntryPolicy::Skip => scan.skipped += 1,
					MalformedEntryPolicy::Reject => return Err(ErrorCode::RequestMalformed),
				}
			}
		}
		scan.line += 1;
		scan.consumed += line.consumed();
	}
	Ok(scan)
}
