use crate::error::ErrorCode;
use nom::bytes::complete::{tag, take_till};
use nom::combinator::all_consuming;
use nom::IResult;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct RequestLine {
	pub method: String,
	pub path: String,
	pub query: String,
	pub version: String,
}

impl RequestLine {
	/// Decodes `METHOD TARGET VERSION`. Exactly two spaces are allowed; the
	/// target is split on its first `?` into the path and the raw query.
	pub fn from_bytes(line: &[u8]) -> Result<Self, ErrorCode> {
		let (_, (method, target, version)) =
			parse_request_line(line).map_err(|_| ErrorCode::InvalidPath)?;
		let target = String::from_utf8_lossy(target);
		let (path, query) = target.split_once('?').unwrap_or((&*target, ""));
		Ok(Self {
			method: String::from_utf8_lossy(method).trim().to_string(),
			path: path.trim().to_string(),
			query: query.to_string(),
			version: String::from_utf8_lossy(version).trim().to_string(),
		})
	}
}

fn is_space(c: u8) -> bool {
	c == b' '
}

fn parse_separator(input: &[u8]) -> IResult<&[u8], &[u8]> {
	tag(" ")(input)
}

fn parse_request_line(input: &[u8]) -> IResult<&[u8], (&[u8], &[u8], &[u8])> {
	let (input, method) = take_till(is_space)(input)?;
	let (input, _) = parse_separator(input)?;
	let (input, target) = take_till(is_space)(input)?;
	let (input, _) = parse_separator(input)?;
	let (input, version) = all_consuming(take_till(is_space))(input)?;
	Ok((input, (method, target, version)))
}
