use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph},
};

use crate::game::{Direction, FoodKind, GameState, ObstacleKind, Phase, Position};
use crate::metrics::GameMetrics;

/// Stateless projection of a game snapshot onto the terminal. Every frame
/// repaints the whole board, so nothing stale survives a move.
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        metrics: &GameMetrics,
        tick_rate: u32,
    ) {
        let [header, life, board_row, footer] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .areas(frame.area());

        frame.render_widget(self.header_widget(state, metrics, tick_rate), header);
        frame.render_widget(self.life_gauge(state), life);

        let [_, board, _] = Layout::horizontal([
            Constraint::Percentage(10),
            Constraint::Percentage(80),
            Constraint::Percentage(10),
        ])
        .areas(board_row);

        match state.phase {
            Phase::Running | Phase::Paused => {
                frame.render_widget(self.board_widget(state), board);
            }
            Phase::Over => {
                frame.render_widget(self.game_over_widget(state), board);
            }
        }

        frame.render_widget(self.footer_widget(), footer);
    }

    fn header_widget(
        &self,
        state: &GameState,
        metrics: &GameMetrics,
        tick_rate: u32,
    ) -> Paragraph<'_> {
        let stats = [
            ("Score", state.score.to_string()),
            ("High", state.high_score.to_string()),
            ("Level", state.level.to_string()),
            ("Speed", tick_rate.to_string()),
            ("Time", metrics.session_time()),
        ];

        let mut spans = Vec::new();
        for (label, value) in stats {
            if !spans.is_empty() {
                spans.push(Span::raw("   "));
            }
            spans.push(Span::styled(
                format!("{}: ", label),
                Style::default().fg(Color::Yellow),
            ));
            spans.push(Span::styled(
                value,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn life_gauge(&self, state: &GameState) -> Gauge<'_> {
        let life = state.life.clamp(0.0, 100.0);
        let color = match life {
            l if l > 50.0 => Color::Green,
            l if l > 20.0 => Color::Yellow,
            _ => Color::Red,
        };

        Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(" Life "))
            .gauge_style(Style::default().fg(color))
            .ratio(f64::from(life) / 100.0)
            .label(format!("{}%", life.floor() as u32))
    }

    fn board_widget(&self, state: &GameState) -> Paragraph<'_> {
        let mut lines = Vec::with_capacity(state.grid_size);
        for y in 0..state.grid_size {
            let spans: Vec<Span> = (0..state.grid_size)
                .map(|x| cell_span(state, Position::new(x as i32, y as i32)))
                .collect();
            lines.push(Line::from(spans));
        }

        let (title, border_color) = match state.phase {
            Phase::Paused => (" Paused ", Color::Yellow),
            _ => (" Garden Snake ", Color::White),
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border_color))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn game_over_widget(&self, state: &GameState) -> Paragraph<'_> {
        let headline = Line::from(Span::styled(
            "GAME OVER",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));

        let score_line = Line::from(vec![
            Span::styled("Final score ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        let best_line = Line::from(vec![
            Span::styled("Best this run ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.high_score.to_string(),
                Style::default().fg(Color::White),
            ),
        ]);

        let hint = Line::from(vec![
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::styled(" plays again, ", Style::default().fg(Color::Gray)),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::styled(" leaves", Style::default().fg(Color::Gray)),
        ]);

        let text = vec![
            Line::from(""),
            headline,
            Line::from(""),
            score_line,
            best_line,
            Line::from(""),
            hint,
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn footer_widget(&self) -> Paragraph<'_> {
        let text = Line::from(vec![
            Span::styled("↑↓←→/WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" steer | "),
            Span::styled("Space", Style::default().fg(Color::Yellow)),
            Span::raw(" pause | "),
            Span::styled("1-9 +/-", Style::default().fg(Color::Yellow)),
            Span::raw(" speed | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn cell_span(state: &GameState, pos: Position) -> Span<'static> {
    if pos == state.snake.head() {
        return Span::styled(
            head_glyph(state.snake.direction),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    }
    if state.snake.occupies(pos) {
        return Span::styled("■ ", Style::default().fg(Color::Green));
    }
    if pos == state.food.pos {
        let (glyph, color) = food_sprite(state.food.kind);
        return Span::styled(glyph, Style::default().fg(color).add_modifier(Modifier::BOLD));
    }
    if let Some(idx) = state.obstacle_at(pos) {
        let (glyph, color) = obstacle_sprite(state.obstacles[idx].kind);
        return Span::styled(glyph, Style::default().fg(color));
    }
    Span::styled("· ", Style::default().fg(Color::DarkGray))
}

/// The head points where the snake is about to go
fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "▲ ",
        Direction::Down => "▼ ",
        Direction::Left => "◀ ",
        Direction::Right => "▶ ",
    }
}

fn food_sprite(kind: FoodKind) -> (&'static str, Color) {
    match kind {
        FoodKind::Apple => ("o ", Color::Red),
        FoodKind::Pear => ("o ", Color::Yellow),
        FoodKind::Cherry => ("o ", Color::LightRed),
        FoodKind::Plum => ("o ", Color::Magenta),
        FoodKind::Berry => ("o ", Color::LightMagenta),
    }
}

fn obstacle_sprite(kind: ObstacleKind) -> (&'static str, Color) {
    match kind {
        ObstacleKind::Bush => ("♣ ", Color::LightGreen),
        ObstacleKind::Tree => ("♠ ", Color::Green),
        ObstacleKind::Rock => ("● ", Color::Gray),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Food, Snake};

    fn sample_state() -> GameState {
        GameState {
            snake: Snake::new(Position::new(4, 4), Direction::Right, 3),
            food: Food {
                pos: Position::new(7, 7),
                kind: FoodKind::Apple,
            },
            obstacles: vec![crate::game::Obstacle {
                pos: Position::new(1, 1),
                kind: ObstacleKind::Rock,
            }],
            grid_size: 10,
            score: 0,
            life: 100.0,
            level: 1,
            phase: Phase::Running,
            high_score: 0,
        }
    }

    #[test]
    fn test_every_entity_gets_its_own_glyph() {
        let state = sample_state();

        let head = cell_span(&state, Position::new(4, 4));
        assert_eq!(head.content, "▶ ");

        let body = cell_span(&state, Position::new(3, 4));
        assert_eq!(body.content, "■ ");

        let food = cell_span(&state, Position::new(7, 7));
        assert_eq!(food.content, "o ");

        let rock = cell_span(&state, Position::new(1, 1));
        assert_eq!(rock.content, "● ");

        let empty = cell_span(&state, Position::new(9, 9));
        assert_eq!(empty.content, "· ");
    }

    #[test]
    fn test_head_glyph_tracks_direction() {
        assert_eq!(head_glyph(Direction::Up), "▲ ");
        assert_eq!(head_glyph(Direction::Down), "▼ ");
        assert_eq!(head_glyph(Direction::Left), "◀ ");
        assert_eq!(head_glyph(Direction::Right), "▶ ");
    }
}
