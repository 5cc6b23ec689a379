use crate::consts;
use crate::game::GameRules;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Gameplay parameters
    #[serde(default)]
    pub(crate) game: GameConfig,

    /// Display settings
    #[serde(default)]
    pub(crate) display: DisplayConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("snake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                tracing::debug!(path = %path.display(), "No configuration file; using defaults");
                return Ok(Config::default());
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        let config = toml::from_str::<Config>(&content)?;
        tracing::debug!(path = %path.display(), ?config, "Loaded configuration");
        Ok(config)
    }

    /// Return the gameplay parameters described by the configuration
    pub(crate) fn rules(&self) -> GameRules {
        GameRules::from(self.game)
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawGameConfig")]
pub(crate) struct GameConfig {
    board_size: u16,
    initial_size: usize,
    initial_delay: Duration,
    delay_step: Duration,
    min_delay: Duration,
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        let rules = GameRules::default();
        GameConfig {
            board_size: rules.board_size,
            initial_size: rules.initial_size,
            initial_delay: rules.initial_delay,
            delay_step: rules.delay_step,
            min_delay: rules.min_delay,
        }
    }
}

impl From<GameConfig> for GameRules {
    fn from(value: GameConfig) -> GameRules {
        GameRules {
            board_size: value.board_size,
            initial_size: value.initial_size,
            initial_delay: value.initial_delay,
            delay_step: value.delay_step,
            min_delay: value.min_delay,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawGameConfig {
    board_size: u16,
    initial_size: usize,
    initial_delay_ms: u64,
    delay_step_ms: u64,
    min_delay_ms: u64,
}

impl Default for RawGameConfig {
    fn default() -> RawGameConfig {
        RawGameConfig {
            board_size: consts::BOARD_SIZE,
            initial_size: consts::INITIAL_SIZE,
            initial_delay_ms: duration_millis(consts::INITIAL_DELAY),
            delay_step_ms: duration_millis(consts::DELAY_STEP),
            min_delay_ms: duration_millis(consts::MIN_DELAY),
        }
    }
}

fn duration_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = InvalidConfig;

    fn try_from(value: RawGameConfig) -> Result<GameConfig, InvalidConfig> {
        if !(2..=consts::BOARD_SIZE_MAX).contains(&value.board_size) {
            return Err(InvalidConfig::BoardSize(value.board_size));
        }
        if value.initial_size == 0 {
            return Err(InvalidConfig::InitialSize);
        }
        if value.min_delay_ms > value.initial_delay_ms {
            return Err(InvalidConfig::MinDelay {
                min: value.min_delay_ms,
                initial: value.initial_delay_ms,
            });
        }
        Ok(GameConfig {
            board_size: value.board_size,
            initial_size: value.initial_size,
            initial_delay: Duration::from_millis(value.initial_delay_ms),
            delay_step: Duration::from_millis(value.delay_step_ms),
            min_delay: Duration::from_millis(value.min_delay_ms),
        })
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct DisplayConfig {
    /// Maximum number of frames drawn per second
    pub(crate) fps: u32,

    /// Path to the font used to draw the score
    pub(crate) font_file: PathBuf,
}

impl Default for DisplayConfig {
    fn default() -> DisplayConfig {
        DisplayConfig {
            fps: consts::FPS_CAP,
            font_file: PathBuf::from(consts::FONT_FILE),
        }
    }
}

impl DisplayConfig {
    /// Return the time allotted to each frame.  A frame rate of zero is
    /// treated as one frame per second.
    pub(crate) fn frame_period(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum InvalidConfig {
    #[error("board-size must be between 2 and {}, got {}", consts::BOARD_SIZE_MAX, .0)]
    BoardSize(u16),
    #[error("initial-size must be positive")]
    InitialSize,
    #[error("min-delay-ms ({min}) must not exceed initial-delay-ms ({initial})")]
    MinDelay { min: u64, initial: u64 },
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn empty_config() {
        let config = toml::from_str::<Config>("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.rules(), GameRules::default());
        assert_eq!(config.display.frame_period(), Duration::from_nanos(33_333_333));
    }

    #[test]
    fn full_config() {
        let src = concat!(
            "[game]\n",
            "board-size = 30\n",
            "initial-size = 4\n",
            "initial-delay-ms = 150\n",
            "delay-step-ms = 5\n",
            "min-delay-ms = 60\n",
            "\n",
            "[display]\n",
            "fps = 60\n",
            "font-file = \"/usr/share/snake/font.toml\"\n",
        );
        let config = toml::from_str::<Config>(src).unwrap();
        assert_eq!(
            config.rules(),
            GameRules {
                board_size: 30,
                initial_size: 4,
                initial_delay: Duration::from_millis(150),
                delay_step: Duration::from_millis(5),
                min_delay: Duration::from_millis(60),
            }
        );
        assert_eq!(config.display.fps, 60);
        assert_eq!(
            config.display.font_file,
            PathBuf::from("/usr/share/snake/font.toml")
        );
    }

    #[test]
    fn partial_game_config() {
        let config = toml::from_str::<Config>("[game]\nboard-size = 12\n").unwrap();
        assert_eq!(
            config.rules(),
            GameRules {
                board_size: 12,
                ..GameRules::default()
            }
        );
    }

    #[test]
    fn tiny_board() {
        assert!(toml::from_str::<Config>("[game]\nboard-size = 1\n").is_err());
    }

    #[test]
    fn board_size_limits() {
        let config = toml::from_str::<Config>("[game]\nboard-size = 70\n").unwrap();
        assert_eq!(config.rules().board_size, consts::BOARD_SIZE_MAX);
        for size in [71, 65535] {
            let src = format!("[game]\nboard-size = {size}\n");
            assert!(toml::from_str::<Config>(&src).is_err());
        }
        let r = GameConfig::try_from(RawGameConfig {
            board_size: 71,
            ..RawGameConfig::default()
        });
        assert_eq!(r, Err(InvalidConfig::BoardSize(71)));
    }

    #[test]
    fn min_delay_above_initial() {
        assert!(toml::from_str::<Config>("[game]\nmin-delay-ms = 500\n").is_err());
    }

    #[test]
    fn zero_fps() {
        let config = toml::from_str::<Config>("[display]\nfps = 0\n").unwrap();
        assert_eq!(config.display.frame_period(), Duration::from_secs(1));
    }

    #[test]
    fn load_missing() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("config.toml");
        assert_eq!(Config::load(&path, true).unwrap(), Config::default());
        assert!(matches!(
            Config::load(&path, false),
            Err(ConfigError::Read(_))
        ));
    }

    #[test]
    fn load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[display]\nfps = 10").unwrap();
        let config = Config::load(file.path(), false).unwrap();
        assert_eq!(config.display.fps, 10);
        assert_eq!(config.game, GameConfig::default());
    }

    #[test]
    fn load_garbage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[display\nfps = ").unwrap();
        assert!(matches!(
            Config::load(file.path(), false),
            Err(ConfigError::Parse(_))
        ));
    }
}
