use crate::consts;
use ratatui::layout::{Flex, Layout, Rect, Size};

/// Return the area of the terminal that the game draws in.  In windowed mode
/// this is the terminal minus [`consts::WINDOW_MARGIN`], but no smaller than
/// [`consts::DISPLAY_SIZE`]; in fullscreen mode it is the whole terminal.
/// Either way it is capped at [`consts::MAX_DISPLAY_SIZE`] and centered, and
/// it follows the terminal as it is resized.
pub(crate) fn get_display_area(buffer_area: Rect, fullscreen: bool) -> Rect {
    let available = if fullscreen {
        buffer_area.as_size()
    } else {
        let inset = buffer_area.inner(consts::WINDOW_MARGIN);
        Size {
            width: inset.width.max(consts::DISPLAY_SIZE.width),
            height: inset.height.max(consts::DISPLAY_SIZE.height),
        }
    };
    let size = Size {
        width: available.width.min(consts::MAX_DISPLAY_SIZE.width),
        height: available.height.min(consts::MAX_DISPLAY_SIZE.height),
    };
    center_rect(buffer_area, size)
}

/// Return a rectangle of size `size` centered in `area`, shrunk to fit if
/// necessary
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [rect] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(rect);
    rect
}

/// Placement of the board within the display area
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct BoardLayout {
    /// The area covered by the board's cells, not including the border
    pub(crate) inner: Rect,

    /// Number of terminal rows per board cell.  Each cell is twice as many
    /// columns wide so that it appears square.
    pub(crate) scale: u16,
}

impl BoardLayout {
    /// Lay out a board with `board_size` cells per side inside `display`.
    /// The board's side is [`consts::BOARD_SCALE_PERCENT`] percent of the
    /// smaller display dimension (counting columns in pairs), rounded down
    /// to a whole number of terminal rows per cell, but never less than one.
    ///
    /// The floor of one row per cell takes precedence over the percentage:
    /// when the display is too small for that, the board fills more than
    /// [`consts::BOARD_SCALE_PERCENT`] percent of it (the default 20-cell
    /// board in an 80×24 display takes 20 of 24 rows), and a board that does
    /// not fit at all is clipped by [`BoardLayout::cell_rect`].
    pub(crate) fn new(display: Rect, board_size: u16) -> BoardLayout {
        let units = (display.width / 2).min(display.height);
        let side = u32::from(units) * u32::from(consts::BOARD_SCALE_PERCENT) / 100;
        let scale = u16::try_from(side / u32::from(board_size.max(1)))
            .unwrap_or(u16::MAX)
            .max(1);
        let inner_size = Size {
            width: board_size.saturating_mul(scale).saturating_mul(2),
            height: board_size.saturating_mul(scale),
        };
        let outer = center_rect(
            display,
            Size {
                width: inner_size.width.saturating_add(2),
                height: inner_size.height.saturating_add(2),
            },
        );
        let inner = Rect {
            x: outer.x.saturating_add(1),
            y: outer.y.saturating_add(1),
            width: inner_size.width.min(outer.width.saturating_sub(2)),
            height: inner_size.height.min(outer.height.saturating_sub(2)),
        };
        BoardLayout { inner, scale }
    }

    /// The area including a one-cell border around the board
    pub(crate) fn outer(&self) -> Rect {
        Rect {
            x: self.inner.x.saturating_sub(1),
            y: self.inner.y.saturating_sub(1),
            width: self.inner.width.saturating_add(2),
            height: self.inner.height.saturating_add(2),
        }
    }

    /// The terminal area covered by the board cell at `(x, y)`, clipped to
    /// the board
    pub(crate) fn cell_rect(&self, x: u16, y: u16) -> Rect {
        let width = self.scale.saturating_mul(2);
        Rect {
            x: self.inner.x.saturating_add(x.saturating_mul(width)),
            y: self.inner.y.saturating_add(y.saturating_mul(self.scale)),
            width,
            height: self.scale,
        }
        .intersection(self.inner)
    }
}
