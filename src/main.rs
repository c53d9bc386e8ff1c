mod config;
mod logs;

use config::Config;
use serial_http::{ErrorCode, HttpParser, ParsedRequest, StdioTransport};

const LOG_LEVEL_ENV_VAR: &str = "SERIAL_HTTP_LOG_LEVEL";
const LOG_STYLE_ENV_VAR: &str = "SERIAL_HTTP_LOG_STYLE";

fn main() -> Result<(), Box<dyn std::error::Error>> {
	match Config::init() {
		Ok(cnf) => {
			logs::init_log_system(cnf.log_level());
			log::debug!("{cnf:?}");
			if let Err(e) = serve_one(&cnf) {
				log::error!("unable to answer the request: {e:#}");
			}
		}
		Err(e) => eprintln!("{e}"),
	}
	Ok(())
}

fn serve_one(cnf: &Config) -> anyhow::Result<()> {
	let transport = StdioTransport::new(cnf.buffer_size());
	let mut parser = HttpParser::new(transport, cnf.parser_options());
	let res = match parser.receive() {
		Ok(()) => {
			let req = parser.request();
			log::info!("{} {} {}", req.method(), req.path(), req.version());
			match cnf.file_content() {
				Some(content) => parser.respond_bytes(cnf.content_type(), content),
				None => {
					let summary = summarize(parser.request());
					parser.respond_text(&summary)
				}
			}
		}
		Err(code) => {
			log::warn!("invalid request: {code}");
			match error_status(code) {
				Some((status, message)) => parser.respond_status(status, message),
				None => Ok(()),
			}
		}
	};
	parser.end();
	res
}

fn error_status(code: ErrorCode) -> Option<(u16, &'static str)> {
	match code {
		ErrorCode::None | ErrorCode::StreamUnavailable => None,
		ErrorCode::BufferOverflow => Some((413, "Payload Too Large")),
		ErrorCode::InvalidOrUnsupportedMethod => Some((501, "Not Implemented")),
		ErrorCode::RequestMalformed | ErrorCode::InvalidPath | ErrorCode::InvalidRequest => {
			Some((400, "Bad Request"))
		}
	}
}

fn summarize(req: &ParsedRequest) -> String {
	let mut lines = vec![
		format!("method: {}", req.method()),
		format!("path: {}", req.path()),
		format!("version: {}", req.version()),
	];
	for p in req.query_params() {
		lines.push(format!("param: {}={}", p.key, p.value));
	}
	for h in req.headers() {
		lines.push(format!("header: {}: {}", h.key, h.value));
	}
	lines.push(format!("body: {} bytes", req.body_len()));
	if req.skipped_entries() > 0 {
		lines.push(format!("skipped: {}", req.skipped_entries()));
	}
	lines.join("\n")
}
