//! mdhtml - convert Markdown to HTML one line at a time.
//!
//! This binary is the I/O driver around the mdhtml parser: it reads lines
//! from files or stdin and writes the HTML fragments to stdout or a file.

mod cli;
mod convert;

use clap::Parser as ClapParser;
use cli::Cli;
use log::{debug, error, info, LevelFilter};
use mdhtml_config::Config;
use mdhtml_core::Result;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};

fn main() {
    let cli = <Cli as ClapParser>::parse();

    // Handle --paths flag
    if cli.show_paths {
        cli::show_paths();
        return;
    }

    setup_logging(&cli.log_level);
    info!("mdhtml v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&cli) {
        error!("Error: {}", e);
        eprintln!("mdhtml: {}", e);
        std::process::exit(1);
    }
}

/// Set up logging based on the log level argument.
fn setup_logging(level: &str) {
    let filter = match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Warn,
    };

    env_logger::Builder::new()
        .filter_level(filter)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

/// Main application logic.
fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    debug!("Loaded config: {:?}", config);

    let mut sink: Box<dyn Write> = match cli.output {
        Some(ref path) => {
            info!("Writing to {}", path.display());
            Box::new(BufWriter::new(File::create(path)?))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    if cli.should_read_stdin() {
        if atty::is(atty::Stream::Stdin) {
            info!("Reading from terminal; end input with Ctrl-D");
        } else {
            info!("Reading from stdin");
        }
        let stdin = io::stdin();
        convert::convert(stdin.lock(), &mut sink, &config, "<stdin>")?;
    } else {
        for path in &cli.files {
            info!("Processing file: {}", path.display());
            let reader = BufReader::new(File::open(path)?);
            let stats = convert::convert(reader, &mut sink, &config, &path.display().to_string())?;
            info!(
                "{}: {} lines converted, {} failed",
                path.display(),
                stats.lines,
                stats.failed
            );
        }
    }

    sink.flush()?;
    Ok(())
}

/// Load configuration, then apply the config override and CLI flags.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load_with_override(cli.config.as_deref())?;

    if let Some(policy) = cli.on_error {
        debug!("Error policy from command line: {}", policy);
        config.errors.on_error = policy;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdhtml_config::ErrorPolicy;

    #[test]
    fn test_cli_policy_overrides_config() {
        let cli = Cli::parse_from([
            "mdhtml",
            "-c",
            "[errors]\nOnError = \"passthrough\"",
            "--on-error",
            "skip",
        ]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.errors.on_error, ErrorPolicy::Skip);
    }

    #[test]
    fn test_inline_config_override() {
        let cli = Cli::parse_from(["mdhtml", "-c", "[output]\nNewline = false"]);
        let config = load_config(&cli).unwrap();
        assert!(!config.output.newline);
    }
}
