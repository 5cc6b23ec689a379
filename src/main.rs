mod app;
mod command;
mod config;
mod consts;
mod font;
mod game;
mod util;
use crate::app::App;
use crate::config::{Config, ConfigError};
use crate::font::{FontError, ScoreFont};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use lexopt::{Arg, Parser};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, Eq, PartialEq)]
enum Invocation {
    Run(Arguments),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    font: Option<PathBuf>,
    log_file: Option<PathBuf>,
}

impl Invocation {
    fn from_parser(mut parser: Parser) -> Result<Invocation, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("font") => args.font = Some(PathBuf::from(parser.value()?)),
                Arg::Short('l') | Arg::Long("log-file") => {
                    args.log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Invocation::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Invocation::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Invocation::Run(args))
    }
}

impl Default for Invocation {
    fn default() -> Invocation {
        Invocation::Run(Arguments::default())
    }
}

static USAGE: &str = concat!(
    "Usage: snake [-c|--config FILE] [--font FILE] [-l|--log-file FILE]\n",
    "\n",
    "Play Snake on a wraparound board in the terminal.\n",
    "\n",
    "Keys: arrows or WASD steer, Space ends the round, F11 or f toggles\n",
    "fullscreen, Esc or q quits.\n",
    "\n",
    "Options:\n",
    "  -c, --config FILE     Read configuration from FILE\n",
    "      --font FILE       Draw the score with the font in FILE\n",
    "  -l, --log-file FILE   Write log messages to FILE\n",
    "  -h, --help            Display this help message and exit\n",
    "  -V, --version         Show the program version and exit\n",
);

fn main() -> ExitCode {
    match Invocation::from_parser(Parser::from_env()) {
        Ok(Invocation::Run(args)) => match run(args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                report(&e);
                ExitCode::from(e.exit_code())
            }
        },
        Ok(Invocation::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Invocation::Version) => {
            println!("snake {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("snake: {e}");
            ExitCode::from(4)
        }
    }
}

fn run(args: Arguments) -> Result<(), StartupError> {
    if let Some(ref path) = args.log_file {
        init_logging(path)?;
    }
    let config = match args.config {
        Some(ref path) => Config::load(path, false)?,
        None => Config::load(&Config::default_path()?, true)?,
    };
    let font_path = args.font.unwrap_or_else(|| config.display.font_file.clone());
    let font = ScoreFont::load(&font_path).map_err(|source| StartupError::Font {
        path: font_path.clone(),
        source,
    })?;
    let app = App::new(config.rules(), font, config.display.frame_period());

    chain_panic_hook(restore_terminal);
    enable_raw_mode().map_err(StartupError::Window)?;
    if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(StartupError::Window(e));
    }
    let terminal = match Terminal::new(CrosstermBackend::new(io::stdout())) {
        Ok(terminal) => terminal,
        Err(e) => {
            restore_terminal();
            return Err(StartupError::Renderer(e));
        }
    };
    let r = app.run(terminal);
    restore_terminal();
    match r {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        Err(e) => Err(StartupError::Runtime(e)),
    }
}

fn restore_terminal() {
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// Install a panic hook that calls `cleanup` before handing the panic to the
/// previously installed hook, so a panic mid-game leaves the terminal usable
fn chain_panic_hook<F>(cleanup: F)
where
    F: Fn() + Send + Sync + 'static,
{
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        cleanup();
        hook(info);
    }));
}

fn init_logging(path: &Path) -> Result<(), StartupError> {
    let file = fs_err::File::create(path).map_err(StartupError::Log)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// Print an error and its chain of sources to stderr
fn report(e: &dyn std::error::Error) {
    tracing::error!(error = %e, "Fatal error");
    eprintln!("snake: {e}");
    let mut source = e.source();
    while let Some(src) = source {
        eprintln!("  caused by: {src}");
        source = src.source();
    }
}

#[derive(Debug, Error)]
enum StartupError {
    #[error("failed to set up the terminal window")]
    Window(#[source] io::Error),
    #[error("failed to create the terminal renderer")]
    Renderer(#[source] io::Error),
    #[error("failed to load font from {}", path.display())]
    Font {
        path: PathBuf,
        #[source]
        source: FontError,
    },
    #[error("failed to load configuration")]
    Config(#[from] ConfigError),
    #[error("failed to open log file")]
    Log(#[source] io::Error),
    #[error("terminal I/O failed")]
    Runtime(#[source] io::Error),
}

impl StartupError {
    /// Process exit status for this error
    fn exit_code(&self) -> u8 {
        match self {
            StartupError::Window(_) => 1,
            StartupError::Renderer(_) => 2,
            StartupError::Font { .. } => 3,
            StartupError::Config(_) | StartupError::Log(_) => 4,
            StartupError::Runtime(_) => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn parse(args: &[&str]) -> Result<Invocation, lexopt::Error> {
        Invocation::from_parser(Parser::from_iter(
            std::iter::once("snake").chain(args.iter().copied()),
        ))
    }

    #[test]
    fn no_args() {
        assert_eq!(parse(&[]).unwrap(), Invocation::default());
    }

    #[test]
    fn all_args() {
        assert_eq!(
            parse(&["--config", "c.toml", "--font", "f.toml", "-l", "snake.log"]).unwrap(),
            Invocation::Run(Arguments {
                config: Some(PathBuf::from("c.toml")),
                font: Some(PathBuf::from("f.toml")),
                log_file: Some(PathBuf::from("snake.log")),
            })
        );
    }

    #[test]
    fn help_and_version() {
        assert_eq!(parse(&["--font", "f.toml", "-h"]).unwrap(), Invocation::Help);
        assert_eq!(parse(&["-V"]).unwrap(), Invocation::Version);
    }

    #[test]
    fn bad_args() {
        assert!(parse(&["--speed", "9"]).is_err());
        assert!(parse(&["--config"]).is_err());
        assert!(parse(&["extra"]).is_err());
    }

    #[test]
    fn panic_restores_terminal_first() {
        static CLEANED_UP: AtomicBool = AtomicBool::new(false);
        chain_panic_hook(|| CLEANED_UP.store(true, Ordering::SeqCst));
        let r = std::panic::catch_unwind(|| panic!("the snake bit itself"));
        drop(std::panic::take_hook());
        assert!(r.is_err());
        assert!(CLEANED_UP.load(Ordering::SeqCst));
    }

    #[test]
    fn missing_font_is_fatal() {
        let tmpdir = tempfile::tempdir().unwrap();
        let config = tmpdir.path().join("config.toml");
        fs_err::write(&config, "").unwrap();
        let e = run(Arguments {
            config: Some(config),
            font: Some(tmpdir.path().join("missing.toml")),
            log_file: None,
        })
        .unwrap_err();
        assert!(matches!(e, StartupError::Font { .. }));
        assert_eq!(e.exit_code(), 3);
    }

    #[test]
    fn missing_config_is_fatal() {
        let e = run(Arguments {
            config: Some(PathBuf::from("/nonexistent/snake/config.toml")),
            font: None,
            log_file: None,
        })
        .unwrap_err();
        assert!(matches!(e, StartupError::Config(ConfigError::Read(_))));
        assert_eq!(e.exit_code(), 4);
    }
}
