use env_logger::{Builder, Env, Target};

/// Logs always go to stderr: stdout is the HTTP connection. The level comes
/// from `SERIAL_HTTP_LOG_LEVEL` when set, from the `-v` count otherwise.
pub fn init_log_system(default_level: &str) {
	let env = Env::new()
		.filter_or(crate::LOG_LEVEL_ENV_VAR, default_level)
		.write_style_or(crate::LOG_STYLE_ENV_VAR, "never");
	let mut builder = Builder::from_env(env);
	builder.target(Target::Stderr);
	builder.init();
}
