use clap::{ArgAction, Parser};
use serial_http::options::{DEFAULT_BUFF_SIZE, DEFAULT_GRACE_PERIOD};
use serial_http::{MalformedEntryPolicy, Options};
use std::fs;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Config {
	#[arg(short, long, value_name = "BYTES")]
	buffer_size: Option<NonZeroUsize>,
	#[arg(short, long, value_name = "MILLISECONDS")]
	grace_period: Option<u64>,
	#[arg(short, long)]
	strict: bool,
	#[arg(short, long, value_name = "FILE")]
	file: Option<PathBuf>,
	#[arg(short, long, value_name = "TYPE")]
	content_type: Option<String>,
	#[arg(short, long, action = ArgAction::Count)]
	verbose: u8,
	#[arg(skip)]
	file_content: Option<Vec<u8>>,
}

impl Config {
	pub fn init() -> Result<Self, String> {
		let mut cnf = Self::parse();
		if let Some(path) = &cnf.file {
			let content = fs::read(path).map_err(|e| format!("{}: {e}", path.display()))?;
			cnf.file_content = Some(content);
		} else if cnf.content_type.is_some() {
			return Err(String::from("--content-type requires --file"));
		}
		Ok(cnf)
	}

	pub fn buffer_size(&self) -> usize {
		self.buffer_size
			.map(NonZeroUsize::get)
			.unwrap_or(DEFAULT_BUFF_SIZE)
	}

	pub fn grace_period(&self) -> Duration {
		self.grace_period
			.map(Duration::from_millis)
			.unwrap_or(DEFAULT_GRACE_PERIOD)
	}

	pub fn policy(&self) -> MalformedEntryPolicy {
		if self.strict {
			MalformedEntryPolicy::Reject
		} else {
			MalformedEntryPolicy::Skip
		}
	}

	pub fn file_content(&self) -> Option<&[u8]> {
		self.file_content.as_deref()
	}

	pub fn content_type(&self) -> &str {
		self.content_type.as_deref().unwrap_or(DEFAULT_CONTENT_TYPE)
	}

	pub fn log_level(&self) -> &'static str {
		match self.verbose {
			0 => "warn",
			1 => "info",
			2 => "debug",
			_ => "trace",
		}
	}

	pub fn parser_options(&self) -> Options {
		Options::default()
			.set_capacity(self.buffer_size())
			.set_grace_period(self.grace_period())
			.set_policy(self.policy())
	}
}
