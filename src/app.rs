use crate::command::Command;
use crate::consts;
use crate::font::{ScoreFont, ScoreText};
use crate::game::{Direction, Game, GameRules};
use crate::util::get_display_area;
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Offset, Rect},
    widgets::{Block, Widget},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// The game loop: reads input, advances the game, and draws it, at most once
/// per frame period
#[derive(Clone, Debug)]
pub(crate) struct App<R = rand::rngs::ThreadRng> {
    game: Game<R>,
    font: ScoreFont,
    frame_period: Duration,
    fullscreen: bool,
    quitting: bool,
}

impl App<rand::rngs::ThreadRng> {
    pub(crate) fn new(rules: GameRules, font: ScoreFont, frame_period: Duration) -> Self {
        App::with_game(Game::new(rules, Instant::now()), font, frame_period)
    }
}

impl<R: Rng> App<R> {
    pub(crate) fn with_game(game: Game<R>, font: ScoreFont, frame_period: Duration) -> App<R> {
        App {
            game,
            font,
            frame_period,
            fullscreen: false,
            quitting: false,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        tracing::info!(
            board_size = self.game.board_size(),
            frame_ms = self.frame_period.as_millis(),
            "Starting game"
        );
        let mut last_frame: Option<Instant> = None;
        while !self.quitting {
            if let Some(last) = last_frame {
                let wait = (last + self.frame_period).saturating_duration_since(Instant::now());
                if !wait.is_zero() {
                    std::thread::sleep(wait);
                }
            }
            while poll(Duration::ZERO)? {
                self.handle_event(read()?);
            }
            if self.quitting {
                break;
            }
            self.tick(Instant::now());
            terminal.draw(|frame| self.draw(frame))?;
            last_frame = Some(Instant::now());
        }
        tracing::info!(score = self.game.score(), "Quitting");
        Ok(())
    }

    /// Restart the game if the round has ended, then move the snake if it is
    /// due to move
    fn tick(&mut self, now: Instant) {
        if self.game.is_over() {
            tracing::info!(
                score = self.game.score(),
                move_delay_ms = self.game.move_delay().as_millis(),
                "Round over"
            );
            self.game.reset(now);
        }
        self.game.update(now);
    }
}

impl<R> App<R> {
    fn handle_event(&mut self, event: Event) {
        let Some(ev) = event.as_key_press_event() else {
            return;
        };
        let Some(cmd) = Command::from_key_event(ev) else {
            return;
        };
        match cmd {
            Command::Quit => self.quitting = true,
            Command::Fullscreen => {
                self.fullscreen = !self.fullscreen;
                tracing::info!(fullscreen = self.fullscreen, "Toggled fullscreen");
            }
            Command::Up => self.game.turn(Direction::North),
            Command::Down => self.game.turn(Direction::South),
            Command::Left => self.game.turn(Direction::West),
            Command::Right => self.game.turn(Direction::East),
            Command::EndRound => self.game.end_round(),
        }
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        self.render(frame.area(), frame.buffer_mut());
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area, self.fullscreen);
        Block::new()
            .style(consts::BACKGROUND_STYLE)
            .render(display, buf);
        (&self.game).render(display, buf);
        let score = ScoreText::new(&self.font, self.game.score());
        let (dx, dy) = consts::SCORE_OFFSET;
        let score_area = Rect {
            width: score.width(),
            height: self.font.height(),
            ..display.offset(Offset {
                x: dx.into(),
                y: dy.into(),
            })
        }
        .intersection(display);
        score.render(score_area, buf);
    }
}
