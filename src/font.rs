//! Bitmap font used for drawing the score in large digits
use crate::consts;
use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// A font mapping each decimal digit to a block-pixel glyph.  Every glyph
/// has the same height; widths may differ between glyphs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ScoreFont {
    height: u16,
    glyphs: HashMap<char, Glyph>,
}

impl ScoreFont {
    /// Read a font from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read, is not valid TOML, or
    /// does not describe a glyph for each digit.
    pub(crate) fn load(path: &Path) -> Result<ScoreFont, FontError> {
        let content = fs_err::read_to_string(path)?;
        let font = ScoreFont::try_from(toml::from_str::<RawFont>(&content)?)?;
        tracing::debug!(path = %path.display(), height = font.height, "Loaded score font");
        Ok(font)
    }

    pub(crate) fn height(&self) -> u16 {
        self.height
    }

    fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }

    /// Return the width of `text` when rendered in this font, with one blank
    /// column between consecutive glyphs
    pub(crate) fn text_width(&self, text: &str) -> u16 {
        let glyphs = text.chars().filter_map(|ch| self.glyph(ch));
        let mut width = 0u16;
        for (i, g) in glyphs.enumerate() {
            if i > 0 {
                width = width.saturating_add(1);
            }
            width = width.saturating_add(g.width);
        }
        width
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct Glyph {
    width: u16,
    /// Row-major pixels; `true` is drawn
    pixels: Vec<bool>,
}

impl Glyph {
    fn lit(&self, x: u16, y: u16) -> bool {
        let i = usize::from(y) * usize::from(self.width) + usize::from(x);
        self.pixels.get(i).copied().unwrap_or(false)
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
struct RawFont {
    height: u16,
    glyphs: HashMap<String, Vec<String>>,
}

impl TryFrom<RawFont> for ScoreFont {
    type Error = FontError;

    fn try_from(value: RawFont) -> Result<ScoreFont, FontError> {
        if value.height == 0 {
            return Err(FontError::ZeroHeight);
        }
        let mut glyphs = HashMap::with_capacity(value.glyphs.len());
        for (key, rows) in value.glyphs {
            let mut chars = key.chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                return Err(FontError::BadKey(key));
            };
            if rows.len() != usize::from(value.height) {
                return Err(FontError::BadHeight {
                    ch,
                    expected: value.height,
                    got: rows.len(),
                });
            }
            let width = rows.first().map_or(0, |r| r.chars().count());
            if rows.iter().any(|r| r.chars().count() != width) {
                return Err(FontError::Ragged(ch));
            }
            let width = u16::try_from(width).map_err(|_| FontError::Ragged(ch))?;
            let pixels = rows
                .iter()
                .flat_map(|r| r.chars())
                .map(|c| !c.is_whitespace() && c != '.')
                .collect();
            glyphs.insert(ch, Glyph { width, pixels });
        }
        if let Some(ch) = ('0'..='9').find(|d| !glyphs.contains_key(d)) {
            return Err(FontError::MissingDigit(ch));
        }
        Ok(ScoreFont {
            height: value.height,
            glyphs,
        })
    }
}

/// A widget drawing a number in a [`ScoreFont`]
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ScoreText<'a> {
    font: &'a ScoreFont,
    text: String,
    style: Style,
}

impl<'a> ScoreText<'a> {
    pub(crate) fn new(font: &'a ScoreFont, value: u32) -> ScoreText<'a> {
        ScoreText {
            font,
            text: value.to_string(),
            style: consts::SCORE_STYLE,
        }
    }

    pub(crate) fn width(&self) -> u16 {
        self.font.text_width(&self.text)
    }
}

impl Widget for ScoreText<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        let mut x0 = area.x;
        for g in self.text.chars().filter_map(|ch| self.font.glyph(ch)) {
            for gy in 0..self.font.height().min(area.height) {
                for gx in 0..g.width {
                    let x = x0.saturating_add(gx);
                    if x >= area.right() {
                        break;
                    }
                    if g.lit(gx, gy) {
                        if let Some(cell) = buf.cell_mut((x, area.y + gy)) {
                            cell.set_char(consts::FONT_PIXEL_SYMBOL);
                            cell.set_style(self.style);
                        }
                    }
                }
            }
            x0 = x0.saturating_add(g.width).saturating_add(1);
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum FontError {
    #[error("failed to read font file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse font file")]
    Parse(#[from] toml::de::Error),
    #[error("font height must be positive")]
    ZeroHeight,
    #[error("glyph key {0:?} is not a single character")]
    BadKey(String),
    #[error("glyph {ch:?} has {got} rows, expected {expected}")]
    BadHeight { ch: char, expected: u16, got: usize },
    #[error("rows of glyph {0:?} are not all the same width")]
    Ragged(char),
    #[error("font has no glyph for digit {0:?}")]
    MissingDigit(char),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ratatui::buffer::Cell;
    use std::io::Write;

    fn bundled() -> ScoreFont {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(consts::FONT_FILE);
        ScoreFont::load(&path).unwrap()
    }

    #[test]
    fn load_bundled_font() {
        let font = bundled();
        assert_eq!(font.height(), 5);
        assert_eq!(font.text_width("0"), 3);
        assert_eq!(font.text_width("10"), 7);
        assert_eq!(font.text_width(""), 0);
    }

    #[test]
    fn render_score() {
        let font = bundled();
        let area = Rect::new(0, 0, 9, 5);
        let mut buffer = Buffer::empty(area);
        ScoreText::new(&font, 17).render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            "  █ ███  ",
            "  █   █  ",
            "  █   █  ",
            "  █   █  ",
            "  █   █  ",
        ]);
        for pos in area.positions() {
            if expected.cell(pos).is_some_and(|c| c.symbol() == "█") {
                expected.set_style(Rect::new(pos.x, pos.y, 1, 1), consts::SCORE_STYLE);
            }
        }
        assert_eq!(buffer, expected);
    }

    #[test]
    fn render_clipped() {
        let font = bundled();
        let area = Rect::new(0, 0, 2, 2);
        let mut buffer = Buffer::empty(area);
        ScoreText::new(&font, 0).render(area, &mut buffer);
        assert_eq!(buffer.cell((0, 0)).map(Cell::symbol), Some("█"));
        assert_eq!(buffer.cell((0, 1)).map(Cell::symbol), Some("█"));
        assert_eq!(buffer.cell((1, 1)).map(Cell::symbol), Some(" "));
    }

    #[test]
    fn missing_file() {
        let tmpdir = tempfile::tempdir().unwrap();
        let r = ScoreFont::load(&tmpdir.path().join("nope.toml"));
        assert!(matches!(r, Err(FontError::Read(_))));
    }

    #[test]
    fn missing_digit() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "height = 1\n[glyphs]\n\"0\" = [\"#\"]").unwrap();
        let r = ScoreFont::load(file.path());
        assert!(matches!(r, Err(FontError::MissingDigit('1'))));
    }

    #[test]
    fn ragged_glyph() {
        let raw = toml::from_str::<RawFont>("height = 2\n[glyphs]\n\"0\" = [\"##\", \"#\"]\n")
            .unwrap();
        assert!(matches!(ScoreFont::try_from(raw), Err(FontError::Ragged('0'))));
    }

    #[test]
    fn wrong_height() {
        let r = ScoreFont::try_from(RawFont {
            height: 2,
            glyphs: HashMap::from([(String::from("0"), vec![String::from("#")])]),
        });
        assert!(matches!(
            r,
            Err(FontError::BadHeight {
                ch: '0',
                expected: 2,
                got: 1
            })
        ));
    }
}
