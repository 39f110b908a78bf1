pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
    Frame,
};
use unicode_width::UnicodeWidthStr;
use word_drop::{
    difficulty::Difficulty,
    game::Game,
    matcher::matched_prefix_len,
    session::{FallingWord, Phase, PlayArea},
};

use crate::App;

const HORIZONTAL_MARGIN: u16 = 2;
const HEART: &str = "♥";
const LOST_HEART: &str = "♡";

pub fn draw(app: &mut App, f: &mut Frame) {
    let mut screen = screen::current_screen(&app.state);
    screen.render(app, f);
}

fn label(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "Easy",
        Difficulty::Medium => "Medium",
        Difficulty::Hard => "Hard",
    }
}

/// Difficulty picker
pub struct Menu<'a> {
    pub selection: usize,
    pub notice: Option<&'a str>,
}

impl Widget for Menu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);

        let mut lines = vec![
            Line::from(Span::styled(
                "WORD DROP",
                Style::default().patch(bold_style).fg(Color::Cyan),
            )),
            Line::from(""),
            Line::from(Span::styled("choose a difficulty", dim_style)),
            Line::from(""),
        ];

        for (idx, difficulty) in Difficulty::ALL.iter().enumerate() {
            let text = format!("{}  {}", idx + 1, label(*difficulty));
            lines.push(if idx == self.selection {
                Line::from(Span::styled(
                    format!("> {text} <"),
                    Style::default().patch(bold_style).fg(Color::Green),
                ))
            } else {
                Line::from(Span::raw(format!("  {text}  ")))
            });
        }

        lines.push(Line::from(""));
        if let Some(notice) = self.notice {
            lines.push(Line::from(Span::styled(
                notice.to_string(),
                Style::default().fg(Color::Yellow),
            )));
        }
        lines.push(Line::from(Span::styled(
            "↑/↓ enter · 1-3 · (e)asy (m)edium (h)ard · (esc)ape",
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        )));

        let height = lines.len() as u16;
        let top = area.y + area.height.saturating_sub(height) / 2;
        let rect = Rect::new(area.x, top, area.width, height.min(area.height));
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(rect, buf);
    }
}

/// Terminal cell for a word, or `None` while it is above the visible area.
/// A word exactly on the floor sits on the last row.
pub fn word_cell(word: &FallingWord, play_area: &PlayArea, inner: Rect) -> Option<(u16, u16)> {
    if word.y < 0.0 || inner.width == 0 || inner.height == 0 {
        return None;
    }
    let col = (word.x / play_area.width * f64::from(inner.width)).floor() as u16;
    let row = (word.y / play_area.height * f64::from(inner.height)).floor() as u16;

    Some((
        inner.x + col.min(inner.width - 1),
        inner.y + row.min(inner.height - 1),
    ))
}

/// The game screen: header, falling words, input line and overlays
pub struct GameView<'a> {
    pub game: &'a Game,
}

impl Widget for GameView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let game = self.game;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints(
                [
                    Constraint::Length(1),
                    Constraint::Min(3),
                    Constraint::Length(3),
                    Constraint::Length(1),
                ]
                .as_ref(),
            )
            .split(area);

        render_header(game, chunks[0], buf);

        let field = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", label(game.config().difficulty)));
        let inner = field.inner(chunks[1]);
        field.render(chunks[1], buf);
        render_words(game, inner, buf);

        Paragraph::new(Line::from(vec![
            Span::styled("> ", Style::default().add_modifier(Modifier::DIM)),
            Span::styled(
                game.input().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled("▏", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]))
        .block(Block::default().borders(Borders::ALL))
        .render(chunks[2], buf);

        let hint = match game.phase() {
            Phase::NotStarted => "(enter) start · (esc) menu",
            Phase::Running => "type the words · (esc) menu",
            Phase::Over => "(r)estart · (esc) menu",
        };
        Paragraph::new(Span::styled(
            hint,
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

        match game.phase() {
            Phase::NotStarted => render_overlay(
                vec![Line::from(Span::styled(
                    "press Enter to start",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))],
                inner,
                buf,
            ),
            Phase::Over => render_game_over(game, inner, buf),
            Phase::Running => {}
        }
    }
}

fn render_header(game: &Game, area: Rect, buf: &mut Buffer) {
    let lives = game.lives() as usize;
    let lost = (game.config().starting_lives as usize).saturating_sub(lives);

    let spans = vec![
        Span::styled(HEART.repeat(lives), Style::default().fg(Color::Red)),
        Span::styled(
            LOST_HEART.repeat(lost),
            Style::default().add_modifier(Modifier::DIM),
        ),
        Span::raw("   "),
        Span::styled(
            format!("score {}", game.score()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(
            format!("best {}", game.high_score()),
            Style::default().fg(Color::Magenta),
        ),
    ];
    Paragraph::new(Line::from(spans)).render(area, buf);
}

fn render_words(game: &Game, inner: Rect, buf: &mut Buffer) {
    let typed_style = Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD);
    let rest_style = Style::default().add_modifier(Modifier::BOLD);

    for word in game.active_words() {
        let Some((x, y)) = word_cell(word, &game.config().play_area, inner) else {
            continue;
        };
        let room = usize::from(inner.right().saturating_sub(x));

        let typed = matched_prefix_len(&word.text, game.input());
        let split = word
            .text
            .char_indices()
            .nth(typed)
            .map_or(word.text.len(), |(i, _)| i);
        let (head, tail) = word.text.split_at(split);

        let (x, _) = buf.set_stringn(x, y, head, room, typed_style);
        let room = room.saturating_sub(head.width());
        buf.set_stringn(x, y, tail, room, rest_style);
    }
}

fn render_game_over(game: &Game, inner: Rect, buf: &mut Buffer) {
    let Some(summary) = game.summary() else {
        return;
    };
    let bold_style = Style::default().add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled(
            "GAME OVER",
            Style::default().patch(bold_style).fg(Color::Red),
        )),
        Line::from(""),
        Line::from(Span::styled(format!("score {}", summary.score), bold_style)),
        Line::from(format!("best {}", summary.high_score)),
    ];
    if summary.is_new_best {
        lines.push(Line::from(Span::styled(
            "NEW BEST!",
            Style::default().patch(bold_style).fg(Color::Green),
        )));
    }
    lines.push(Line::from(format!(
        "{} wpm · {} cpm",
        summary.speed.words_per_minute, summary.speed.chars_per_minute
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "(r)estart or (enter) · (esc) menu",
        Style::default().add_modifier(Modifier::ITALIC),
    )));

    render_overlay(lines, inner, buf);
}

/// Boxed lines centered over `area`
fn render_overlay(lines: Vec<Line>, area: Rect, buf: &mut Buffer) {
    let widest = lines.iter().map(Line::width).max().unwrap_or(0) as u16;
    let rect = centered_rect(widest + 4, lines.len() as u16 + 2, area);

    Clear.render(rect, buf);
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
        .render(rect, buf);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
