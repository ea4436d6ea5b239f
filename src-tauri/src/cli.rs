//! Usage: Command-line flags for the shell process.

use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;

#[derive(Debug, Parser)]
#[command(name = "desktop-shell", version, about = "Desktop Shell")]
struct Cli {
    /// Console diagnostics, devtools and live reload of the settings file.
    #[arg(long)]
    dev: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ParsedArgs {
    pub(crate) dev: bool,
    /// Parse error text, logged once logging is up. OS launchers and the autostart entry may
    /// pass arguments we do not know about.
    pub(crate) ignored: Option<String>,
}

pub(crate) fn parse_from<I, T>(args: I) -> ParsedArgs
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    match Cli::try_parse_from(args.iter().cloned()) {
        Ok(cli) => ParsedArgs {
            dev: cli.dev,
            ignored: None,
        },
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => ParsedArgs {
            dev: args.iter().skip(1).any(|arg| arg == "--dev"),
            ignored: Some(err.to_string().trim().to_string()),
        },
    }
}

pub(crate) fn parse() -> ParsedArgs {
    parse_from(std::env::args_os())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_is_normal_mode() {
        assert_eq!(parse_from(["desktop-shell"]), ParsedArgs::default());
    }

    #[test]
    fn dev_flag_enables_dev_mode() {
        let parsed = parse_from(["desktop-shell", "--dev"]);
        assert!(parsed.dev);
        assert_eq!(parsed.ignored, None);
    }

    #[test]
    fn unknown_arguments_are_ignored_but_dev_still_counts() {
        let parsed = parse_from(["desktop-shell", "--minimized", "--dev"]);
        assert!(parsed.dev);
        assert!(parsed.ignored.is_some());

        let parsed = parse_from(["desktop-shell", "-psn_0_12345"]);
        assert!(!parsed.dev);
        assert!(parsed.ignored.is_some());
    }
}
