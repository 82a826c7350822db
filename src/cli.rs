use std::path::PathBuf;

use sysmon_config::{DisplayMode, SysmonConfig};

pub const USAGE: &str = "\
Usage: sysmon [--config <path>] [--interval <ms>] [--mode <text|chart|detail|json>] [--per-core] [--once] [--no-color]
       sysmon --help | --version";

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(Args),
    Help,
    Version,
}

/// Overrides layered on top of the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    pub config:   Option<PathBuf>,
    pub interval: Option<u64>,
    pub mode:     Option<DisplayMode>,
    pub per_core: bool,
    pub once:     bool,
    pub no_color: bool,
}

impl Args {
    /// Apply the flags to a freshly loaded config. Called again after every
    /// reload so the command line keeps winning over the file.
    pub fn apply(&self, config: &mut SysmonConfig) {
        if let Some(ms) = self.interval {
            config.general.interval_ms = ms;
        }
        if let Some(mode) = self.mode {
            config.display.mode = mode;
        }
        if self.per_core {
            config.display.per_core = true;
        }
        if self.no_color {
            config.theme.color = false;
        }
    }
}

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Command, String> {
    let mut it = args.into_iter();
    let _prog = it.next();
    let mut parsed = Args::default();

    while let Some(arg) = it.next() {
        // Accept both `--flag value` and `--flag=value`.
        let (flag, inline) = match arg.split_once('=') {
            Some((f, v)) if f.starts_with("--") => (f.to_string(), Some(v.to_string())),
            _ => (arg, None),
        };
        let mut value = |name: &str| {
            inline
                .clone()
                .or_else(|| it.next())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| format!("{name} needs a value\n{USAGE}"))
        };

        match flag.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "-c" | "--config" => parsed.config = Some(PathBuf::from(value("--config")?)),
            "-i" | "--interval" => {
                let raw = value("--interval")?;
                let ms = raw
                    .parse::<u64>()
                    .map_err(|_| format!("invalid interval '{raw}' (milliseconds)\n{USAGE}"))?;
                parsed.interval = Some(ms);
            }
            "-m" | "--mode" => {
                let mode = value("--mode")?.parse().map_err(|e| format!("{e}\n{USAGE}"))?;
                parsed.mode = Some(mode);
            }
            "--per-core" => parsed.per_core = true,
            "--once" => parsed.once = true,
            "--no-color" => parsed.no_color = true,
            other => return Err(format!("unexpected argument '{other}'\n{USAGE}")),
        }
    }

    Ok(Command::Run(parsed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, String> {
        parse_args(std::iter::once("sysmon").chain(args.iter().copied()).map(String::from))
    }

    fn run(args: &[&str]) -> Args {
        match parse(args) {
            Ok(Command::Run(a)) => a,
            other => panic!("expected Run, got {other:?}"),
        }
    }

    #[test]
    fn no_args_runs_with_file_settings() {
        assert_eq!(run(&[]), Args::default());
    }

    #[test]
    fn all_flags() {
        let a = run(&[
            "--config", "/tmp/s.toml", "--interval=500", "-m", "mini-chart", "--per-core", "--once",
            "--no-color",
        ]);
        assert_eq!(a.config, Some(PathBuf::from("/tmp/s.toml")));
        assert_eq!(a.interval, Some(500));
        assert_eq!(a.mode, Some(DisplayMode::Chart));
        assert!(a.per_core);
        assert!(a.once);
        assert!(a.no_color);
    }

    #[test]
    fn help_and_version_short_circuit() {
        assert_eq!(parse(&["--once", "--help"]), Ok(Command::Help));
        assert_eq!(parse(&["-V"]), Ok(Command::Version));
    }

    #[test]
    fn bad_input_is_reported() {
        assert!(parse(&["--interval", "soon"]).unwrap_err().contains("invalid interval"));
        assert!(parse(&["--mode"]).unwrap_err().contains("--mode needs a value"));
        assert!(parse(&["--mode", "3d"]).unwrap_err().contains("unknown display mode"));
        assert!(parse(&["extra"]).unwrap_err().contains("unexpected argument"));
    }

    #[test]
    fn overrides_win_over_file() {
        let mut cfg = SysmonConfig::default();
        run(&["--interval", "250", "--mode", "json", "--per-core", "--no-color"]).apply(&mut cfg);
        assert_eq!(cfg.general.interval_ms, 250);
        assert!(cfg.display.per_core);
        assert_eq!(cfg.display.mode, DisplayMode::Json);
        assert!(!cfg.theme.color);
    }
}
