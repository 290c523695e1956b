use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Direction, GameState, Position};
use crate::session::{Hud, Phase};

/// Segments past this index are drawn in the darker body colour
const BRIGHT_SEGMENTS: usize = 4;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, hud: &Hud) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, hud), chunks[0]);

        let game_area = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if hud.phase == Phase::GameOver {
            frame.render_widget(self.render_game_over(state, hud), game_area);
        } else {
            frame.render_widget(self.render_grid(state, hud.phase), game_area);
        }

        frame.render_widget(self.render_controls(hud.phase), chunks[2]);
    }

    fn head_span(direction: Option<Direction>) -> Span<'static> {
        let glyph = match direction {
            Some(Direction::Up) => "▲ ",
            Some(Direction::Down) => "▼ ",
            Some(Direction::Left) => "◀ ",
            Some(Direction::Right) => "▶ ",
            None => "◆ ",
        };
        Span::styled(
            glyph,
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )
    }

    fn render_grid(&self, state: &GameState, phase: Phase) -> Paragraph<'_> {
        let mut lines = Vec::with_capacity(state.grid_height);

        for y in 0..state.grid_height {
            let mut spans = Vec::with_capacity(state.grid_width);

            for x in 0..state.grid_width {
                let pos = Position::new(x as i32, y as i32);
                let segment = state.snake.body.iter().position(|p| *p == pos);

                let cell = match segment {
                    Some(0) => Self::head_span(state.snake.direction),
                    Some(index) if index < BRIGHT_SEGMENTS => {
                        Span::styled("■ ", Style::default().fg(Color::Green))
                    }
                    Some(_) => Span::styled("■ ", Style::default().fg(Color::DarkGray)),
                    None if pos == state.food => Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ),
                    None => Span::styled("· ", Style::default().fg(Color::Rgb(45, 55, 72))),
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        let (title, border) = match phase {
            Phase::Idle => (" Snake - press Enter ", Color::Gray),
            Phase::Paused => (" Snake - paused ", Color::Yellow),
            Phase::Running | Phase::GameOver => (" Snake ", Color::White),
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, state: &GameState, hud: &Hud) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(hud.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(hud.speed.label(), value),
            Span::raw("    "),
            Span::styled("Ticks: ", label),
            Span::styled(state.steps.to_string(), value),
            Span::raw("    "),
            Span::styled("Sound: ", label),
            Span::styled(if hud.muted { "off" } else { "on" }, value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState, hud: &Hud) -> Paragraph<'_> {
        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        if hud.new_high_score {
            text.push(Line::from(vec![Span::styled(
                "New high score!",
                Style::default()
                    .fg(Color::LightYellow)
                    .add_modifier(Modifier::BOLD),
            )]));
        }

        text.extend([
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to play again or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ]);

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, phase: Phase) -> Paragraph<'_> {
        let key = Style::default().fg(Color::Cyan);
        let pause_label = if phase == Phase::Paused { " resume | " } else { " pause | " };

        let text = vec![Line::from(vec![
            Span::styled("↑↓←→/WASD", key),
            Span::raw(" move | "),
            Span::styled("Enter", key),
            Span::raw(" start | "),
            Span::styled("Space", key),
            Span::raw(pause_label),
            Span::styled("R", key),
            Span::raw(" restart | "),
            Span::styled("1-4", key),
            Span::raw(" speed | "),
            Span::styled("M", key),
            Span::raw(" sound | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
