//! Minimal CLI parsing for one-shot commands and overrides.

use std::env;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliOptions {
    /// Print the GraphQL SDL and exit instead of serving
    pub print_schema: bool,
    pub port_override: Option<u16>,
}

impl CliOptions {
    pub fn from_args() -> Self {
        Self::parse(env::args().skip(1))
    }

    /// Parse options from an argument list (without the program name).
    /// Unknown arguments are ignored.
    pub fn parse<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut options = CliOptions::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--print-schema" => options.print_schema = true,
                "--port" => {
                    if let Some(value) = args.next() {
                        options.port_override = value.parse().ok();
                    }
                }
                _ if arg.starts_with("--port=") => {
                    if let Some(value) = arg.split_once('=').map(|(_, v)| v) {
                        options.port_override = value.parse().ok();
                    }
                }
                _ => {}
            }
        }
        options
    }
}
