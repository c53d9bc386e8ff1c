use nom::bytes::complete::take_till;
use nom::character::complete::char;
use nom::combinator::rest;
use nom::sequence::separated_pair;
use nom::IResult;

/// A header or a query parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyValuePair {
	pub key: String,
	pub value: String,
}

impl KeyValuePair {
	pub fn new(key: &str, value: &str) -> Self {
		Self {
			key: key.to_string(),
			value: value.to_string(),
		}
	}

	/// Splits `input` on the first `separator`. Both sides are trimmed. The
	/// separator must be present and the trimmed key must not be empty.
	pub fn from_bytes(input: &[u8], separator: u8) -> Result<Self, String> {
		let (_, (key, value)) = parse_pair(input, separator)
			.map_err(|_| format!("missing '{}' separator", separator as char))?;
		let key = String::from_utf8_lossy(key);
		let key = key.trim();
		if key.is_empty() {
			return Err(String::from("empty key"));
		}
		let value = String::from_utf8_lossy(value);
		Ok(Self::new(key, value.trim()))
	}
}

fn parse_pair(input: &[u8], separator: u8) -> IResult<&[u8], (&[u8], &[u8])> {
	separated_pair(
		take_till(|c: u8| c == separator),
		char(separator as char),
		rest,
	)(input)
}

/// First value stored under `key`, or an empty string.
pub fn lookup<'a>(pairs: &'a [KeyValuePair], key: &str) -> &'a str {
	pairs
		.iter()
		.find(|p| p.key == key)
		.map(|p| p.value.as_str())
		.unwrap_or("")
}
