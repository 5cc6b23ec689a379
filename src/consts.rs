//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::{Margin, Size},
    style::{Color, Style},
};
use std::time::Duration;

/// Side length of the (square) board when not overridden by the
/// configuration file
pub(crate) const BOARD_SIZE: u16 = 20;

/// Largest board side accepted from the configuration file: a board this size
/// still fits inside [`MAX_DISPLAY_SIZE`] with one row per cell and a border.
pub(crate) const BOARD_SIZE_MAX: u16 = MAX_DISPLAY_SIZE.height - 2;

/// Target length of the snake before any food has been eaten
pub(crate) const INITIAL_SIZE: usize = 2;

/// Time between movements of the snake at the start of a round
pub(crate) const INITIAL_DELAY: Duration = Duration::from_millis(200);

/// How much the time between movements shrinks each time the snake eats
pub(crate) const DELAY_STEP: Duration = Duration::from_millis(2);

/// The time between movements never drops below this
pub(crate) const MIN_DELAY: Duration = Duration::from_millis(40);

/// Maximum number of frames drawn per second
pub(crate) const FPS_CAP: u32 = 30;

/// Default location of the bitmap font used to draw the score
pub(crate) const FONT_FILE: &str = "assets/score-font.toml";

/// In windowed mode, the display area is never smaller than this (unless the
/// terminal itself is smaller).
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// The display area is never larger than this.  In fullscreen mode it is the
/// whole terminal up to this size.
pub(crate) const MAX_DISPLAY_SIZE: Size = Size {
    width: 256,
    height: 72,
};

/// Columns and rows left free on each side of the display area in windowed
/// mode
pub(crate) const WINDOW_MARGIN: Margin = Margin {
    horizontal: 2,
    vertical: 1,
};

/// Fraction (in percent) of the smaller display dimension taken up by the
/// board
pub(crate) const BOARD_SCALE_PERCENT: u16 = 80;

/// Offset of the score from the top-left corner of the display area
pub(crate) const SCORE_OFFSET: (u16, u16) = (2, 1);

/// Glyph used for the "on" pixels of the score font
pub(crate) const FONT_PIXEL_SYMBOL: char = '█';

/// Background of the display area
pub(crate) const BACKGROUND_STYLE: Style = Style::new().fg(Color::Black).bg(Color::White);

/// Style for the border around the board
pub(crate) const BORDER_STYLE: Style = Style::new().fg(Color::Black).bg(Color::White);

/// Style for the score
pub(crate) const SCORE_STYLE: Style = Style::new().fg(Color::Black).bg(Color::White);

/// Fill for unoccupied board cells
pub(crate) const EMPTY_STYLE: Style = Style::new().bg(Color::White);

/// Fill for the snake's body
pub(crate) const BODY_STYLE: Style = Style::new().bg(Color::Red);

/// Fill for the snake's head
pub(crate) const HEAD_STYLE: Style = Style::new().bg(Color::Yellow);

/// Fill for the food
pub(crate) const FOOD_STYLE: Style = Style::new().bg(Color::Green);
