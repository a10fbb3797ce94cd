//! Command-line options.
//!
//! Flags are parsed by hand; the surface is five flags and one path.

use std::path::PathBuf;

use irule_diagnostic::emitter::ColorMode;

use crate::CliError;

pub const USAGE: &str = "\
Usage: irule [options] [file]

Validates an F5 iRule. Without a file, starts an interactive session.

Options:
  -d, --debug          Trace the parse and print tokens and the parsed program
  -p, --print-errors   Print diagnostics (otherwise only the exit code reports)
      --color=<when>   Colour diagnostics: auto, always or never
  -h, --help           Print this help
  -v, --version        Print the version";

/// What the invocation asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Check(PathBuf),
    Repl,
    Help,
    Version,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub path: Option<PathBuf>,
    pub debug: bool,
    pub print_errors: bool,
    pub color: ColorMode,
}

impl CliOptions {
    /// Parse arguments, program name excluded.
    ///
    /// `-h` and `-v` win as soon as they are seen, so `irule -h --bogus`
    /// still prints help.
    pub fn parse<I>(args: I) -> Result<(Command, CliOptions), CliError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut options = CliOptions::default();
        for arg in args {
            let arg: String = arg.into();
            match arg.as_str() {
                "-h" | "--help" => return Ok((Command::Help, options)),
                "-v" | "--version" => return Ok((Command::Version, options)),
                "-d" | "--debug" => options.debug = true,
                "-p" | "--print-errors" => options.print_errors = true,
                _ => {
                    if let Some(value) = arg.strip_prefix("--color=") {
                        options.color = ColorMode::from_flag(value)
                            .ok_or_else(|| CliError::InvalidColor(value.to_string()))?;
                    } else if arg.starts_with('-') && arg.len() > 1 {
                        return Err(CliError::UnknownFlag(arg));
                    } else if let Some(first) = &options.path {
                        return Err(CliError::ExtraPath {
                            first: first.display().to_string(),
                            second: arg,
                        });
                    } else {
                        options.path = Some(PathBuf::from(arg));
                    }
                }
            }
        }

        let command = match &options.path {
            Some(path) => Command::Check(path.clone()),
            None => Command::Repl,
        };
        Ok((command, options))
    }
}

#[cfg(test)]
mod tests;
