#![forbid(unsafe_code)]

//! Command-line argument parsing for the console binary.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.
//! Supports environment variable overrides via `PROMPTDECK_*` prefix.

use std::env;
use std::path::PathBuf;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
PromptDeck — simulated AI command console

USAGE:
    promptdeck [OPTIONS]

OPTIONS:
    --no-mouse           Disable mouse event capture
    --no-splash          Skip the boot splash sequence
    --tour               Start the guided tour immediately
    --exit-after-ms=N    Auto-quit after N milliseconds (for testing)
    --log-file=PATH      Write tracing output to PATH
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    1-9             Press console buttons 1-9
    Tab             Cycle through applications
    Up / Down       Turn the dial
    m               Run the macro chain
    r               Trigger the actions ring
    t               Start the guided tour
    Enter           Tour: next step
    Esc             Tour: skip / dismiss
    q / Ctrl+C      Quit

ENVIRONMENT VARIABLES:
    PROMPTDECK_EXIT_AFTER_MS   Override --exit-after-ms
    PROMPTDECK_LOG_FILE        Override --log-file
    PROMPTDECK_LOG             Tracing filter (env-filter syntax)";

/// Parsed command-line options.
pub struct Opts {
    /// Whether mouse events are enabled.
    pub mouse: bool,
    /// Whether the boot splash plays.
    pub splash: bool,
    /// Start the tour as soon as the console appears.
    pub start_tour: bool,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
    /// Tracing log destination, if any.
    pub log_file: Option<PathBuf>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            mouse: true,
            splash: true,
            start_tour: false,
            exit_after_ms: 0,
            log_file: None,
        }
    }
}

impl Opts {
    /// Parse command-line arguments and environment variables.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags.
    pub fn parse() -> Self {
        let mut opts = Self::default();

        if let Ok(val) = env::var("PROMPTDECK_EXIT_AFTER_MS")
            && let Ok(n) = val.parse()
        {
            opts.exit_after_ms = n;
        }
        if let Ok(val) = env::var("PROMPTDECK_LOG_FILE") {
            opts.log_file = Some(PathBuf::from(val));
        }

        let args: Vec<String> = env::args().skip(1).collect();
        for arg in &args {
            match arg.as_str() {
                "--help" | "-h" => {
                    println!("{HELP_TEXT}");
                    process::exit(0);
                }
                "--version" | "-V" => {
                    println!("promptdeck {VERSION}");
                    process::exit(0);
                }
                "--no-mouse" => {
                    opts.mouse = false;
                }
                "--no-splash" => {
                    opts.splash = false;
                }
                "--tour" => {
                    opts.start_tour = true;
                }
                other => {
                    if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        match val.parse() {
                            Ok(n) => opts.exit_after_ms = n,
                            Err(_) => {
                                eprintln!("Invalid --exit-after-ms value: {val}");
                                process::exit(1);
                            }
                        }
                    } else if let Some(val) = other.strip_prefix("--log-file=") {
                        opts.log_file = Some(PathBuf::from(val));
                    } else {
                        eprintln!("Unknown argument: {other}");
                        eprintln!("Run with --help for usage information.");
                        process::exit(1);
                    }
                }
            }
        }

        opts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_opts() {
        let opts = Opts::default();
        assert!(opts.mouse);
        assert!(opts.splash);
        assert!(!opts.start_tour);
        assert_eq!(opts.exit_after_ms, 0);
        assert!(opts.log_file.is_none());
    }

    #[test]
    fn version_string_nonempty() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn help_text_covers_keybindings_and_env() {
        assert!(HELP_TEXT.contains("--no-splash"));
        assert!(HELP_TEXT.contains("Tab"));
        assert!(HELP_TEXT.contains("PROMPTDECK_EXIT_AFTER_MS"));
        assert!(HELP_TEXT.contains("PROMPTDECK_LOG"));
    }
}
