use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// How the extracted metadata is printed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// One `"name": {...}` catalog entry, indented for concatenation.
    Fragment,
    /// A standalone JSON object.
    Json,
}

/// Top-level CLI parser for the `metaparse` binary.
#[derive(Debug, Parser)]
#[command(
    name = "metaparse",
    version,
    about = "Extract test metadata from an LTP C test source"
)]
pub struct Cli {
    /// Verbose mode (debug logging of includes, macros and array sizes)
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Quiet mode (only errors are logged)
    #[arg(short, long)]
    pub quiet: bool,

    /// Add an include search directory, consulted after the source's own
    #[arg(short = 'I', value_name = "DIR")]
    pub include: Vec<PathBuf>,

    /// Output format: fragment, json
    #[arg(short, long, default_value = "fragment")]
    pub format: OutputFormat,

    /// Test source file
    pub input: PathBuf,
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn include_dirs_repeat_in_order() {
        let cli = Cli::try_parse_from(["metaparse", "-I", "include", "-I../lib", "-v", "foo01.c"])
            .expect("cli should parse");

        assert_eq!(
            cli.include,
            [PathBuf::from("include"), PathBuf::from("../lib")]
        );
        assert!(cli.verbose);
        assert!(!cli.quiet);
        assert_eq!(cli.format, OutputFormat::Fragment);
        assert_eq!(cli.input, PathBuf::from("foo01.c"));
    }

    #[test]
    fn input_is_required() {
        let err = Cli::try_parse_from(["metaparse", "-v"]).unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["metaparse", "-v", "-q", "foo01.c"]).is_err());
    }

    #[test]
    fn json_format() {
        let cli = Cli::try_parse_from(["metaparse", "--format", "json", "foo01.c"])
            .expect("cli should parse");
        assert_eq!(cli.format, OutputFormat::Json);
    }
}
