//! Command-line interface for mdhtml.

use clap::Parser;
use mdhtml_config::ErrorPolicy;
use std::path::PathBuf;

/// mdhtml - convert Markdown to HTML one line at a time.
///
/// Each input file is converted independently; list and code block state
/// never carries over from one file to the next.
#[derive(Parser, Debug)]
#[command(
    name = "mdhtml",
    author = "mdhtml Contributors",
    version,
    about = "Convert Markdown to an HTML fragment, line by line",
    after_help = "Examples:\n  \
                  cat README.md | mdhtml\n  \
                  mdhtml notes.md -o notes.html\n  \
                  mdhtml --on-error skip -c '[output]\\nSkipEmpty = true' notes.md"
)]
pub struct Cli {
    /// Input files to process (reads from stdin if not provided)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Write HTML to this file instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(short = 'l', long = "loglevel", default_value = "warn")]
    pub log_level: String,

    /// Use a custom config file or inline TOML
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// What to do with a line that fails to parse (abort, skip, passthrough)
    #[arg(long = "on-error", value_name = "POLICY")]
    pub on_error: Option<ErrorPolicy>,

    /// Show configuration paths and exit
    #[arg(long = "paths")]
    pub show_paths: bool,
}

impl Cli {
    /// Check if we should read from stdin.
    pub fn should_read_stdin(&self) -> bool {
        self.files.is_empty()
    }
}

/// Show paths information.
pub fn show_paths() {
    use mdhtml_config::Config;

    let config_path = Config::config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(not found)".to_string());

    println!("paths:");
    println!("  config                {}", config_path);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_default() {
        let cli = Cli::parse_from(["mdhtml"]);
        assert!(cli.files.is_empty());
        assert!(cli.output.is_none());
        assert_eq!(cli.log_level, "warn");
        assert!(cli.on_error.is_none());
        assert!(cli.should_read_stdin());
    }

    #[test]
    fn test_cli_parse_with_files() {
        let cli = Cli::parse_from(["mdhtml", "a.md", "b.md", "-o", "out.html"]);
        assert_eq!(cli.files, vec![PathBuf::from("a.md"), PathBuf::from("b.md")]);
        assert_eq!(cli.output, Some(PathBuf::from("out.html")));
        assert!(!cli.should_read_stdin());
    }

    #[test]
    fn test_cli_parse_with_options() {
        let cli = Cli::parse_from([
            "mdhtml",
            "-l", "debug",
            "--on-error", "passthrough",
            "-c", "[output]\nNewline = false",
            "--paths",
        ]);
        assert_eq!(cli.log_level, "debug");
        assert_eq!(cli.on_error, Some(ErrorPolicy::Passthrough));
        assert_eq!(cli.config.as_deref(), Some("[output]\nNewline = false"));
        assert!(cli.show_paths);
    }

    #[test]
    fn test_cli_rejects_unknown_policy() {
        assert!(Cli::try_parse_from(["mdhtml", "--on-error", "maybe"]).is_err());
    }
}
