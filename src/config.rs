/// Command-line configuration.
///
/// ```text
/// sketch [-v...] [--dump] [--no-wait] [--size WxH] <file>
/// ```
///
/// Log lines go to stderr; redirect it (`2> sketch.log`) for a verbose replay.
use crate::error::ConfigError;
use log::LevelFilter;
use std::path::PathBuf;

/// default drawing area, in file units
pub const DEFAULT_WIDTH: usize = 640;
pub const DEFAULT_HEIGHT: usize = 480;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    /// draw the sketch in the terminal
    Replay,
    /// list the decoded instructions
    Dump,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub path: PathBuf,
    pub mode: Mode,
    pub width: usize,
    pub height: usize,
    /// wait for a key once the sketch has finished drawing
    pub wait_at_end: bool,
    pub log_level: LevelFilter,
}

impl Config {
    /// parse arguments, not including the program name
    pub fn from_args<I, S>(args: I) -> Result<Config, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut path = None;
        let mut mode = Mode::Replay;
        let (mut width, mut height) = (DEFAULT_WIDTH, DEFAULT_HEIGHT);
        let mut wait_at_end = true;
        let mut verbosity = 0;

        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--dump" => mode = Mode::Dump,
                "--no-wait" => wait_at_end = false,
                "--size" => {
                    let value = args
                        .next()
                        .ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                    let (w, h) = parse_size(&value)?;
                    width = w;
                    height = h;
                }
                flag if is_verbosity(flag) => verbosity += flag.len() - 1,
                flag if flag.starts_with('-') => {
                    return Err(ConfigError::UnknownOption(flag.to_string()))
                }
                _ => match path {
                    None => path = Some(PathBuf::from(&arg)),
                    Some(_) => return Err(ConfigError::UnexpectedArgument(arg.clone())),
                },
            }
        }

        Ok(Config {
            path: path.ok_or(ConfigError::MissingPath)?,
            mode,
            width,
            height,
            wait_at_end,
            log_level: level_for(verbosity),
        })
    }
}

// -v, -vv, -vvv ...
fn is_verbosity(flag: &str) -> bool {
    flag.len() > 1 && flag.starts_with('-') && flag[1..].chars().all(|c| c == 'v')
}

/// quiet unless asked
fn level_for(verbosity: usize) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn parse_size(value: &str) -> Result<(usize, usize), ConfigError> {
    let bad = || ConfigError::BadSize(value.to_string());
    let (w, h) = value.split_once(|c| c == 'x' || c == 'X').ok_or_else(bad)?;
    let w: usize = w.trim().parse().map_err(|_| bad())?;
    let h: usize = h.trim().parse().map_err(|_| bad())?;
    if w == 0 || h == 0 {
        return Err(bad());
    }
    Ok((w, h))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() -> Result<(), ConfigError> {
        let c = Config::from_args(vec!["drawing.sk"])?;
        assert_eq!(c.path, PathBuf::from("drawing.sk"));
        assert_eq!(c.mode, Mode::Replay);
        assert_eq!((c.width, c.height), (640, 480));
        assert!(c.wait_at_end);
        assert_eq!(c.log_level, LevelFilter::Warn);
        Ok(())
    }

    #[test]
    fn test_all_options() -> Result<(), ConfigError> {
        let c = Config::from_args(vec!["-vv", "--dump", "--no-wait", "--size", "320x200", "a.sk"])?;
        assert_eq!(c.mode, Mode::Dump);
        assert!(!c.wait_at_end);
        assert_eq!((c.width, c.height), (320, 200));
        assert_eq!(c.log_level, LevelFilter::Debug);
        Ok(())
    }

    #[test]
    fn test_verbosity_adds_up() -> Result<(), ConfigError> {
        let c = Config::from_args(vec!["-v", "a.sk", "-vv"])?;
        assert_eq!(c.log_level, LevelFilter::Trace);
        Ok(())
    }

    #[test]
    fn test_missing_path() {
        assert_eq!(
            Config::from_args(vec!["--dump"]),
            Err(ConfigError::MissingPath)
        );
    }

    #[test]
    fn test_unknown_option() {
        assert_eq!(
            Config::from_args(vec!["--colour", "a.sk"]),
            Err(ConfigError::UnknownOption("--colour".to_string()))
        );
    }

    #[test]
    fn test_two_paths() {
        assert_eq!(
            Config::from_args(vec!["a.sk", "b.sk"]),
            Err(ConfigError::UnexpectedArgument("b.sk".to_string()))
        );
    }

    #[test]
    fn test_bad_sizes() {
        for s in ["640", "x480", "0x10", "axb"] {
            assert_eq!(
                Config::from_args(vec!["--size", s, "a.sk"]),
                Err(ConfigError::BadSize(s.to_string()))
            );
        }
        assert_eq!(
            Config::from_args(vec!["a.sk", "--size"]),
            Err(ConfigError::MissingValue("--size".to_string()))
        );
    }
}
