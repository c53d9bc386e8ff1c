use crate::error::ErrorCode;
use crate::lines::split_spans;
use crate::options::MalformedEntryPolicy;
use crate::pair::KeyValuePair;

pub const PARAM_DELIMITER: u8 = b'&';
pub const PARAM_SEPARATOR: u8 = b'=';

/// Decodes `k1=v1&k2=v2` into `params`, in order. Values are kept as
/// written, no percent-decoding takes place. Returns the number of skipped
/// tokens.
pub fn decode_query(
	query: &str,
	policy: MalformedEntryPolicy,
	params: &mut Vec<KeyValuePair>,
) -> Result<usize, ErrorCode> {
	let data = query.as_bytes();
	let tokens = split_spans(data, PARAM_DELIMITER);
	log::debug!("extracted {} query parameters", tokens.len());
	let mut skipped = 0;
	for token in tokens {
		let raw = token.slice(data);
		match KeyValuePair::from_bytes(raw, PARAM_SEPARATOR) {
			Ok(pair) => params.push(pair),
			Err(e) => {
				log::warn!(
					"malformed query parameter: {}: {e}",
					crate::display_bytes!(raw)
				);
				match policy {
					MalformedEntryPolicy::Skip => skipped += 1,
					MalformedEntryPolicy::Reject => return Err(ErrorCode::RequestMalformed),
				}
			}
		}
	}
	Ok(skipped)
}
