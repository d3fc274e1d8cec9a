// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Commute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Commute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Commute CLI entrypoint.
//!
//! Runs the interactive terminal editor. Logging is off unless `--log-level` or `RUST_LOG`
//! turns it on; log lines go to stderr, so redirect it when running the TUI.

use std::error::Error;
use std::str::FromStr;

use log::{debug, info, LevelFilter};

use commute::config::load_config;
use commute::editor::Editor;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--config <path>] [--log-level <level>] [--dump]\n\n--config reads settings and extra keybindings from a TOML file; without it,\n`commute/config.toml` and then the platform config directory are tried.\n--log-level is one of off, error, warn, info, debug, trace (default: RUST_LOG, else off).\n--dump prints the starting diagram and exits instead of opening the editor.\n\nctrl+q quits the editor."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    config: Option<String>,
    log_level: Option<LevelFilter>,
    dump: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                if options.config.is_some() {
                    return Err(());
                }
                let path = args.next().ok_or(())?;
                options.config = Some(path);
            }
            "--log-level" => {
                if options.log_level.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let level = LevelFilter::from_str(&raw).map_err(|_| ())?;
                options.log_level = Some(level);
            }
            "--dump" => {
                if options.dump {
                    return Err(());
                }
                options.dump = true;
            }
            _ => return Err(()),
        }
    }

    Ok(options)
}

fn init_logging(level: Option<LevelFilter>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.init();
}

fn main() {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "commute".to_owned());

    let options = match parse_options(args) {
        Ok(options) => options,
        Err(()) => {
            print_usage(&program);
            std::process::exit(2);
        }
    };

    init_logging(options.log_level);
    debug!(options:?; "Parsed arguments");

    let result = (|| -> Result<(), Box<dyn Error>> {
        let config = load_config(options.config.as_deref())?;
        let keymap = config.keymap()?;
        let editor = Editor::starting(config.settings());

        if options.dump {
            println!("{}", editor.diagram());
            return Ok(());
        }

        info!("Starting editor");
        commute::tui::run(editor, keymap)
    })();

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use log::LevelFilter;

    use super::{parse_options, CliOptions};

    fn args(raw: &[&str]) -> impl Iterator<Item = String> {
        raw.iter()
            .map(|arg| (*arg).to_owned())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn parses_empty_args() {
        let options = parse_options(std::iter::empty()).expect("parse options");
        assert_eq!(options, CliOptions::default());
    }

    #[test]
    fn parses_config_path() {
        let options = parse_options(args(&["--config", "my.toml"])).expect("parse options");
        assert_eq!(options.config.as_deref(), Some("my.toml"));
        assert!(!options.dump);
        assert_eq!(options.log_level, None);
    }

    #[test]
    fn parses_log_level_case_insensitively() {
        let options = parse_options(args(&["--log-level", "DEBUG"])).expect("parse options");
        assert_eq!(options.log_level, Some(LevelFilter::Debug));
    }

    #[test]
    fn parses_dump_with_other_flags() {
        let options = parse_options(args(&["--dump", "--log-level", "warn", "--config", "c.toml"]))
            .expect("parse options");
        assert!(options.dump);
        assert_eq!(options.log_level, Some(LevelFilter::Warn));
        assert_eq!(options.config.as_deref(), Some("c.toml"));
    }

    #[test]
    fn rejects_missing_values() {
        assert!(parse_options(args(&["--config"])).is_err());
        assert!(parse_options(args(&["--log-level"])).is_err());
    }

    #[test]
    fn rejects_bad_log_level() {
        assert!(parse_options(args(&["--log-level", "loud"])).is_err());
    }

    #[test]
    fn rejects_repeated_flags() {
        assert!(parse_options(args(&["--dump", "--dump"])).is_err());
        assert!(parse_options(args(&["--config", "a", "--config", "b"])).is_err());
    }

    #[test]
    fn rejects_unknown_args() {
        assert!(parse_options(args(&["--demo"])).is_err());
        assert!(parse_options(args(&["session-dir"])).is_err());
    }
}
