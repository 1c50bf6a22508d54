//! Interactive play mode
//!
//! Owns the scheduling around the game state machine: one `tokio::select!`
//! loop multiplexes the game tick timer, the slower hazard spawn timer, a
//! render timer and the terminal event stream. All state mutation happens
//! serially inside this loop.

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{self, interval};

use crate::game::{Action, Direction, GameConfig, GameEngine, GameState, Phase};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

type PlayTerminal = Terminal<CrosstermBackend<Stderr>>;

/// Frame period of the render timer, independent of the game tick
const FRAME_PERIOD: Duration = Duration::from_millis(33);

pub struct PlayMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    /// Most recent steer since the last tick; only this one is applied
    pending_direction: Option<Direction>,
    tick_rate: u32,
}

impl PlayMode {
    pub fn new(config: GameConfig) -> Self {
        let tick_rate = config
            .initial_tick_rate
            .clamp(config.min_tick_rate, config.max_tick_rate);
        let mut engine = GameEngine::new(config);
        let state = engine.start();

        Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            pending_direction: None,
            tick_rate,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;

        let result = self.event_loop(&mut terminal).await;

        // Restore the terminal even when the loop errored out
        restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut PlayTerminal) -> Result<()> {
        let mut events = EventStream::new();

        let mut tick_timer = interval(self.tick_period());
        let mut scheduled_rate = self.tick_rate;

        // Hazards arrive on their own fixed period, unaffected by the
        // tick rate
        let mut obstacle_timer =
            interval(Duration::from_millis(self.engine.config().obstacle_period_ms));

        let mut render_timer = interval(FRAME_PERIOD);

        while !self.should_quit {
            tokio::select! {
                maybe_event = events.next() => {
                    if let Some(Ok(Event::Key(key))) = maybe_event {
                        self.on_key(key);
                    }
                }

                _ = tick_timer.tick() => {
                    if self.state.phase == Phase::Running {
                        self.advance_tick();
                    }
                }

                _ = obstacle_timer.tick() => {
                    if self.state.phase == Phase::Running {
                        self.engine.spawn_obstacle(&mut self.state);
                    }
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics, self.tick_rate);
                    }).context("drawing frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            // A rate change drops the in-flight wait; the next tick fires
            // one full fresh period from now
            if self.tick_rate != scheduled_rate {
                scheduled_rate = self.tick_rate;
                let period = self.tick_period();
                tick_timer = time::interval_at(time::Instant::now() + period, period);
            }
        }

        Ok(())
    }

    fn tick_period(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.tick_rate))
    }

    fn on_key(&mut self, key: KeyEvent) {
        // Key releases also arrive on some terminals; only act on presses
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Steer(direction) => self.pending_direction = Some(direction),
            KeyAction::TogglePause => self.toggle_pause(),
            KeyAction::Restart => self.reset_game(),
            KeyAction::SetSpeed(rate) => self.set_tick_rate(rate),
            KeyAction::SpeedUp => self.set_tick_rate(self.tick_rate + 1),
            KeyAction::SpeedDown => self.set_tick_rate(self.tick_rate.saturating_sub(1)),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn advance_tick(&mut self) {
        let action = self
            .pending_direction
            .take()
            .map(Action::Steer)
            .unwrap_or(Action::Continue);

        let outcome = self.engine.tick(&mut self.state, action);

        if outcome.terminated {
            self.metrics.on_game_over();
        }
    }

    fn toggle_pause(&mut self) {
        self.state.phase = match self.state.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            // Over only leaves via restart
            Phase::Over => Phase::Over,
        };
    }

    fn set_tick_rate(&mut self, rate: u32) {
        let config = self.engine.config();
        self.tick_rate = rate.clamp(config.min_tick_rate, config.max_tick_rate);
    }

    fn reset_game(&mut self) {
        self.engine.reset(&mut self.state);
        self.metrics.on_game_start();
        self.pending_direction = None;
    }
}

fn setup_terminal() -> Result<PlayTerminal> {
    enable_raw_mode().context("enabling raw mode")?;
    let mut out = stderr();
    execute!(out, EnterAlternateScreen).context("entering alternate screen")?;

    let mut terminal =
        Terminal::new(CrosstermBackend::new(out)).context("creating terminal")?;
    terminal.hide_cursor().context("hiding cursor")?;
    terminal.clear().context("clearing terminal")?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut PlayTerminal) -> Result<()> {
    disable_raw_mode().context("disabling raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("leaving alternate screen")?;
    terminal.show_cursor().context("showing cursor")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_starts_running_at_configured_speed() {
        let mode = PlayMode::new(GameConfig::with_tick_rate(5));
        assert_eq!(mode.state.phase, Phase::Running);
        assert_eq!(mode.state.score, 0);
        assert_eq!(mode.tick_rate, 5);
    }

    #[test]
    fn test_restart_keeps_the_high_score() {
        let mut mode = PlayMode::new(GameConfig::default());
        mode.state.score = 120;
        mode.state.high_score = 120;
        mode.state.phase = Phase::Over;

        mode.reset_game();

        assert_eq!(mode.state.score, 0);
        assert_eq!(mode.state.phase, Phase::Running);
        assert_eq!(mode.state.high_score, 120);
    }

    #[test]
    fn test_tick_rate_clamped_to_config_range() {
        let mut mode = PlayMode::new(GameConfig::default());

        mode.set_tick_rate(25);
        assert_eq!(mode.tick_rate, 10);

        mode.set_tick_rate(0);
        assert_eq!(mode.tick_rate, 1);

        mode.set_tick_rate(7);
        assert_eq!(mode.tick_rate, 7);
    }

    #[test]
    fn test_pause_toggles_but_never_revives() {
        let mut mode = PlayMode::new(GameConfig::default());

        mode.toggle_pause();
        assert_eq!(mode.state.phase, Phase::Paused);

        mode.toggle_pause();
        assert_eq!(mode.state.phase, Phase::Running);

        mode.state.phase = Phase::Over;
        mode.toggle_pause();
        assert_eq!(mode.state.phase, Phase::Over);
    }

    #[test]
    fn test_latest_steer_wins() {
        let mut mode = PlayMode::new(GameConfig::default());

        mode.pending_direction = Some(Direction::Up);
        mode.pending_direction = Some(Direction::Down);
        mode.advance_tick();

        // Right to Down is a legal turn, so the last steer applied
        assert_eq!(mode.state.snake.direction, Direction::Down);
        assert_eq!(mode.pending_direction, None);
    }
}
