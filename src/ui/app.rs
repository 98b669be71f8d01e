//! Main TUI application state and logic

use crate::algorithms::{Algorithm, SortError};
use crate::arena::{Arena, ArenaTick, Side};
use crate::config::{generate_array, SizeLimits, ARENA_SIZE, ARENA_VALUES, SOLO_SIZE, SOLO_VALUES};
use crate::playback::{Player, RunStatus, StepOutcome};
use crate::ui::panes::{
    render_bars_pane, render_counters_pane, render_status_bar, BarsRenderData, CountersRenderData,
    StatusIndicator,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Size change per `+`/`-` press
const SIZE_STEP: usize = 5;

/// Delay change per `[`/`]` press
const DELAY_STEP: Duration = Duration::from_millis(25);

const MAX_DELAY: Duration = Duration::from_secs(2);

/// State of an arena race on screen
pub struct ArenaScreen {
    pub arena: Option<Arena>,
    pub left: Algorithm,
    pub right: Algorithm,
    pub paused: bool,
}

/// Which screen is showing, with its run state
pub enum Screen {
    Solo {
        player: Player,
        algorithm: Algorithm,
    },
    Arena(ArenaScreen),
}

/// The main application state
pub struct App {
    pub screen: Screen,

    /// Array size used by the next run
    pub size: usize,

    /// Interval between automatic steps
    pub delay: Duration,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    rng: SmallRng,

    /// Last time space was pressed (for debouncing)
    last_space_press: Option<Instant>,
}

impl App {
    /// Create the solo screen and start a first run
    pub fn solo(player: Player, algorithm: Algorithm, size: usize, seed: u64) -> Self {
        let delay = player.delay();
        let mut app = App {
            screen: Screen::Solo { player, algorithm },
            size: SOLO_SIZE.clamp(size),
            delay,
            should_quit: false,
            status_message: String::from("Ready!"),
            rng: SmallRng::seed_from_u64(seed),
            last_space_press: None,
        };
        app.new_run();
        app
    }

    /// Create the arena screen and start a first race
    pub fn arena(left: Algorithm, right: Algorithm, size: usize, delay: Duration, seed: u64) -> Self {
        let mut app = App {
            screen: Screen::Arena(ArenaScreen {
                arena: None,
                left,
                right,
                paused: false,
            }),
            size: ARENA_SIZE.clamp(size),
            delay,
            should_quit: false,
            status_message: String::from("Ready!"),
            rng: SmallRng::seed_from_u64(seed),
            last_space_press: None,
        };
        app.new_run();
        app
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.update(Instant::now());

            // Poll with a short timeout so auto-play keeps moving
            let timeout = self.delay.clamp(Duration::from_millis(1), Duration::from_millis(50));
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    fn limits(&self) -> SizeLimits {
        match self.screen {
            Screen::Solo { .. } => SOLO_SIZE,
            Screen::Arena(_) => ARENA_SIZE,
        }
    }

    /// Advance whichever run is on screen if its delay has elapsed
    pub fn update(&mut self, now: Instant) {
        match &mut self.screen {
            Screen::Solo { player, .. } => {
                let outcome = player.tick(now);
                self.report_solo(outcome);
            }
            Screen::Arena(screen) => {
                if screen.paused {
                    return;
                }
                if let Some(arena) = screen.arena.as_mut() {
                    let was_finished = arena.is_finished();
                    if let ArenaTick::Finished { .. } = arena.tick(now) {
                        if !was_finished {
                            self.status_message = arena_result(arena);
                        }
                    }
                }
            }
        }
    }

    fn report_solo(&mut self, outcome: Result<StepOutcome, SortError>) {
        match outcome {
            Ok(StepOutcome::Completed(record)) => {
                self.status_message = format!(
                    "Sorted: {} comparisons, {} swaps in {:.1} ms",
                    record.comparisons, record.swaps, record.elapsed_ms
                );
            }
            Ok(StepOutcome::SteppedBack) => self.status_message = "Stepped backward".to_string(),
            Ok(StepOutcome::Replayed) => self.status_message = "Replayed".to_string(),
            Ok(StepOutcome::Advanced) | Ok(StepOutcome::NothingToDo) => {}
            Err(fault) => self.status_message = format!("Cancelled: {fault}"),
        }
    }

    /// Start a new run (or race) on a freshly generated array
    fn new_run(&mut self) {
        let seed: u64 = self.rng.random();
        match &mut self.screen {
            Screen::Solo { player, algorithm } => {
                let array = generate_array(self.size, SOLO_VALUES, &mut self.rng);
                player.set_delay(self.delay);
                player.start(array, *algorithm, seed);
                self.status_message = format!("Sorting {} values with {}", self.size, algorithm);
            }
            Screen::Arena(screen) => {
                let array = generate_array(self.size, ARENA_VALUES, &mut self.rng);
                screen.arena = Some(Arena::new(screen.left, screen.right, array, seed, self.delay));
                screen.paused = false;
                self.status_message = format!("{} vs {}", screen.left, screen.right);
            }
        }
    }

    fn set_delay(&mut self, delay: Duration) {
        self.delay = delay.min(MAX_DELAY);
        match &mut self.screen {
            Screen::Solo { player, .. } => player.set_delay(self.delay),
            Screen::Arena(screen) => {
                if let Some(arena) = screen.arena.as_mut() {
                    arena.set_delay(self.delay);
                }
            }
        }
        self.status_message = format!("Delay {} ms", self.delay.as_millis());
    }

    fn indicator(&self) -> StatusIndicator {
        match &self.screen {
            Screen::Solo { player, .. } => match player.status() {
                RunStatus::Idle => StatusIndicator::Idle,
                RunStatus::Running | RunStatus::Stepping => StatusIndicator::Playing,
                RunStatus::Paused => StatusIndicator::Paused,
                RunStatus::Completed => StatusIndicator::Done,
                RunStatus::Cancelled => StatusIndicator::Cancelled,
            },
            Screen::Arena(screen) => match &screen.arena {
                None => StatusIndicator::Idle,
                Some(arena) if arena.is_finished() => StatusIndicator::Done,
                Some(_) if screen.paused => StatusIndicator::Paused,
                Some(_) => StatusIndicator::Playing,
            },
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        match &self.screen {
            Screen::Solo { player, algorithm } => render_solo(frame, main_chunks[0], player, *algorithm),
            Screen::Arena(screen) => render_arena(frame, main_chunks[0], screen),
        }

        render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.size,
            self.delay,
            self.indicator(),
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        self.handle_key(key.code, Instant::now());
    }

    pub fn handle_key(&mut self, code: KeyCode, now: Instant) {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                // Toggle auto-play, debounced against key repeat
                let debounced = self
                    .last_space_press
                    .is_some_and(|last| now.saturating_duration_since(last) < Duration::from_millis(200));
                if !debounced {
                    self.last_space_press = Some(now);
                    self.toggle_play();
                }
            }
            KeyCode::Left => self.step_backward(),
            KeyCode::Right => self.step_forward(),
            KeyCode::Enter => self.finish(),
            KeyCode::Char('n') => self.new_run(),
            KeyCode::Char('s') => self.stop(),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.size = self.limits().clamp(self.size + SIZE_STEP);
                self.status_message = format!("Size {} (press n for a new run)", self.size);
            }
            KeyCode::Char('-') => {
                self.size = self.limits().clamp(self.size.saturating_sub(SIZE_STEP));
                self.status_message = format!("Size {} (press n for a new run)", self.size);
            }
            KeyCode::Char('[') => self.set_delay(self.delay.saturating_sub(DELAY_STEP)),
            KeyCode::Char(']') => self.set_delay(self.delay + DELAY_STEP),
            KeyCode::Char('a') => self.cycle_algorithm(Side::Left),
            KeyCode::Char('b') => self.cycle_algorithm(Side::Right),
            _ => {}
        }
    }

    fn toggle_play(&mut self) {
        match &mut self.screen {
            Screen::Solo { player, .. } => {
                player.toggle_pause();
                self.status_message = match player.status() {
                    RunStatus::Running => "Playing...".to_string(),
                    RunStatus::Paused => "Paused".to_string(),
                    _ => return,
                };
            }
            Screen::Arena(screen) => {
                if screen.arena.as_ref().is_some_and(|a| !a.is_finished()) {
                    screen.paused = !screen.paused;
                    self.status_message = if screen.paused { "Paused" } else { "Playing..." }.to_string();
                }
            }
        }
    }

    fn step_forward(&mut self) {
        match &mut self.screen {
            Screen::Solo { player, .. } => {
                player.pause();
                let outcome = player.step_forward();
                if let Ok(StepOutcome::Advanced) = outcome {
                    self.status_message = "Stepped forward".to_string();
                }
                self.report_solo(outcome);
            }
            Screen::Arena(screen) => {
                screen.paused = true;
                if let Some(arena) = screen.arena.as_mut() {
                    if let ArenaTick::Finished { .. } = arena.step() {
                        self.status_message = arena_result(arena);
                    } else {
                        self.status_message = "Stepped forward".to_string();
                    }
                }
            }
        }
    }

    fn step_backward(&mut self) {
        match &mut self.screen {
            Screen::Solo { player, .. } => {
                player.pause();
                let outcome = player.step_back();
                if outcome == StepOutcome::NothingToDo {
                    self.status_message = "Cannot step backward".to_string();
                }
                self.report_solo(Ok(outcome));
            }
            Screen::Arena(_) => {
                self.status_message = "Races cannot be rewound".to_string();
            }
        }
    }

    fn finish(&mut self) {
        match &mut self.screen {
            Screen::Solo { player, .. } => {
                let outcome = player.run_to_completion();
                self.report_solo(outcome);
            }
            Screen::Arena(screen) => {
                if let Some(arena) = screen.arena.as_mut() {
                    arena.run_to_completion();
                    self.status_message = arena_result(arena);
                }
            }
        }
    }

    fn stop(&mut self) {
        match &mut self.screen {
            Screen::Solo { player, .. } => player.stop(),
            Screen::Arena(screen) => screen.arena = None,
        }
        self.status_message = "Stopped".to_string();
    }

    fn cycle_algorithm(&mut self, side: Side) {
        match &mut self.screen {
            Screen::Solo { algorithm, .. } => {
                *algorithm = algorithm.next();
                self.status_message = format!("{} (press n for a new run)", algorithm);
            }
            Screen::Arena(screen) => {
                let slot = match side {
                    Side::Left => &mut screen.left,
                    Side::Right => &mut screen.right,
                };
                *slot = slot.next();
                self.status_message = format!("{} vs {} (press n to race)", screen.left, screen.right);
            }
        }
    }
}

fn arena_result(arena: &Arena) -> String {
    arena
        .winner_label()
        .unwrap_or_else(|| "No winner".to_string())
}

fn render_solo(frame: &mut Frame, area: Rect, player: &Player, algorithm: Algorithm) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(28)])
        .split(area);

    let title = player.algorithm().unwrap_or(algorithm).to_string();
    render_bars_pane(
        frame,
        columns[0],
        &BarsRenderData {
            title,
            array: player.array(),
            highlights: player.highlights(),
            heat: Some((player.heat(), player.heat_threshold())),
            emphasized: player.status() == RunStatus::Completed,
        },
    );

    let banner = player.fault().map(|fault| (fault.to_string(), true));
    render_counters_pane(
        frame,
        columns[1],
        &CountersRenderData {
            title: "Counters",
            counts: player.counts(),
            elapsed: Some(player.elapsed()),
            history: Some((
                player.history().len(),
                player.future().len(),
                player.config().history_limit,
            )),
            banner,
        },
    );
}

fn render_arena(frame: &mut Frame, area: Rect, screen: &ArenaScreen) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (side, column) in [(Side::Left, columns[0]), (Side::Right, columns[1])] {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(6)])
            .split(column);

        let Some(arena) = &screen.arena else {
            let algorithm = match side {
                Side::Left => screen.left,
                Side::Right => screen.right,
            };
            render_bars_pane(
                frame,
                rows[0],
                &BarsRenderData {
                    title: algorithm.to_string(),
                    array: &[],
                    highlights: Default::default(),
                    heat: None,
                    emphasized: false,
                },
            );
            continue;
        };

        let competitor = arena.competitor(side);
        let won = arena.winner() == Some(side);
        render_bars_pane(
            frame,
            rows[0],
            &BarsRenderData {
                title: competitor.algorithm().to_string(),
                array: competitor.array(),
                highlights: competitor.highlights(),
                heat: None,
                emphasized: won,
            },
        );

        let banner = if let Some(fault) = competitor.fault() {
            Some((fault.to_string(), true))
        } else if won {
            arena.winner_label().map(|label| (label, false))
        } else {
            None
        };
        render_counters_pane(
            frame,
            rows[1],
            &CountersRenderData {
                title: side.instance(),
                counts: arena.counts(side),
                elapsed: None,
                history: None,
                banner,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlaybackConfig;
    use crate::counters::Counts;
    use ratatui::backend::TestBackend;

    fn solo_app() -> App {
        App::solo(
            Player::new(PlaybackConfig::default().with_delay(Duration::ZERO)),
            Algorithm::Selection,
            10,
            1,
        )
    }

    fn player(app: &App) -> &Player {
        match &app.screen {
            Screen::Solo { player, .. } => player,
            Screen::Arena(_) => panic!("not a solo screen"),
        }
    }

    #[test]
    fn test_solo_starts_running() {
        let app = solo_app();
        assert_eq!(player(&app).status(), RunStatus::Running);
        assert_eq!(player(&app).array().len(), 10);
    }

    #[test]
    fn test_arrow_keys_pause_and_step() {
        let mut app = solo_app();
        let now = Instant::now();
        app.handle_key(KeyCode::Right, now);
        app.handle_key(KeyCode::Right, now);
        assert_eq!(player(&app).status(), RunStatus::Paused);
        assert_eq!(player(&app).counts().comparisons, 1);

        app.handle_key(KeyCode::Left, now);
        assert_eq!(player(&app).counts(), Counts::default());
        assert_eq!(player(&app).future().len(), 1);
    }

    #[test]
    fn test_space_is_debounced() {
        let mut app = solo_app();
        let now = Instant::now();
        app.handle_key(KeyCode::Char(' '), now);
        assert_eq!(player(&app).status(), RunStatus::Paused);
        app.handle_key(KeyCode::Char(' '), now + Duration::from_millis(50));
        assert_eq!(player(&app).status(), RunStatus::Paused);
        app.handle_key(KeyCode::Char(' '), now + Duration::from_millis(300));
        assert_eq!(player(&app).status(), RunStatus::Running);
    }

    #[test]
    fn test_enter_finishes_run() {
        let mut app = solo_app();
        app.handle_key(KeyCode::Enter, Instant::now());
        assert_eq!(player(&app).status(), RunStatus::Completed);
        assert!(app.status_message.starts_with("Sorted"));
    }

    #[test]
    fn test_size_and_delay_keys_clamp() {
        let mut app = solo_app();
        let now = Instant::now();
        for _ in 0..10 {
            app.handle_key(KeyCode::Char('-'), now);
        }
        assert_eq!(app.size, SOLO_SIZE.min);

        app.handle_key(KeyCode::Char('['), now);
        assert_eq!(app.delay, Duration::ZERO);
        app.handle_key(KeyCode::Char(']'), now);
        assert_eq!(player(&app).delay(), DELAY_STEP);
    }

    #[test]
    fn test_new_run_uses_cycled_algorithm() {
        let mut app = solo_app();
        let now = Instant::now();
        app.handle_key(KeyCode::Char('a'), now);
        app.handle_key(KeyCode::Char('n'), now);
        assert_eq!(player(&app).algorithm(), Some(Algorithm::BinaryInsertion));
    }

    #[test]
    fn test_stop_and_quit() {
        let mut app = solo_app();
        let now = Instant::now();
        app.handle_key(KeyCode::Char('s'), now);
        assert_eq!(player(&app).status(), RunStatus::Idle);
        app.handle_key(KeyCode::Char('q'), now);
        assert!(app.should_quit);
    }

    #[test]
    fn test_arena_finish_announces_winner() {
        let mut app = App::arena(
            Algorithm::Selection,
            Algorithm::BinaryInsertion,
            20,
            Duration::ZERO,
            4,
        );
        app.handle_key(KeyCode::Enter, Instant::now());
        assert_eq!(app.status_message, "Binary Insertion Sort WINS!");
    }

    #[test]
    fn test_render_both_screens() {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();

        let mut app = solo_app();
        app.update(Instant::now());
        terminal.draw(|f| app.render(f)).unwrap();

        let mut app = App::arena(Algorithm::Quick, Algorithm::Pancake, 30, Duration::ZERO, 2);
        app.handle_key(KeyCode::Enter, Instant::now());
        terminal.draw(|f| app.render(f)).unwrap();
        app.handle_key(KeyCode::Char('s'), Instant::now());
        terminal.draw(|f| app.render(f)).unwrap();
    }
}
