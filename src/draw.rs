use std::{
    io::{self, Write},
    thread,
    time::{Duration, Instant},
};

use crossterm::{
    terminal::{
        self,
        EnterAlternateScreen, LeaveAlternateScreen,
        enable_raw_mode, disable_raw_mode,
        SetTitle,
    },
    cursor::{ MoveTo, Show, Hide },
    style::{ Color, Print, ResetColor, SetForegroundColor },
    execute,
    queue,
    event::{
        self,
        Event,
        KeyEvent,
        KeyModifiers,
        KeyCode, KeyEventKind,
    },
};
use tracing::{debug, info};

use crate::{
    config::{MAX_RUN_STEPS, MAX_SIDE, MIN_SIDE, PROBABILITY_STEP_PCT},
    proc::Grid,
    sim::Simulation,
};

type Err = Box<dyn std::error::Error>;
type Result<T> = std::result::Result<T, Err>;

/// Autoplay delays in milliseconds, slowest last.
static DELAYS: [u64; 14] = [1, 10, 20, 40, 60, 100, 150, 200, 300, 450, 800, 1200, 1500, 2000];
const DEFAULT_DELAY: usize = 9;

/// How long the dashboard waits for a key when nothing is playing.
const IDLE_POLL: Duration = Duration::from_millis(150);

const LIVE_COLOR: Color = Color::Yellow;
const DEAD_COLOR: Color = Color::DarkMagenta;
const LIVE_GLYPH: &str = "██";
const DEAD_GLYPH: &str = "··";

/// Lines drawn above and below the grid.
const HEADER_LINES: u16 = 4;
const FOOTER_LINES: u16 = 6;

pub const RULES: &str =
    "Rules: a live cell survives with 2 neighbors; any cell is born with exactly 3 live neighbors.";

#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Rect{
    w: u16, // columns
    h: u16, // lines
}

impl Rect {
    #[inline]
    pub fn new(width: u16, height: u16) -> Self {
        Rect{w: width, h: height}
    }

    #[inline]
    pub fn term_size() -> Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Rect{w: width, h: height})
    }

    #[inline]
    pub fn w(&self) -> u16 {
        self.w
    }

    #[inline]
    pub fn h(&self) -> u16 {
        self.h
    }

    /// Screen area needed to show a grid plus `extra_lines` of text.
    pub fn for_grid(grid: &Grid, extra_lines: u16) -> Self {
        Self::for_dims(grid.rows(), grid.cols(), extra_lines)
    }

    /// Same as [`Rect::for_grid`] for a grid of `rows x cols` that does not exist yet.
    pub fn for_dims(rows: usize, cols: usize, extra_lines: u16) -> Self {
        Rect {
            w: u16::try_from(cols.saturating_mul(2)).unwrap_or(u16::MAX),
            h: u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(extra_lines),
        }
    }

    /// Both sides at least as large as `other`'s.
    pub fn contains(&self, other: &Rect) -> bool {
        self.w >= other.w && self.h >= other.h
    }
}

/// One user request to the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    StepOnce,
    Run,
    MoreRunSteps,
    FewerRunSteps,
    Randomize,
    Clear,
    Resize { rows: isize, cols: isize },
    MoreLive,
    FewerLive,
    ToggleAutoplay,
    Slower,
    Faster,
    Quit,
}

/// Dashboard state: the simulation plus the controls around it.
pub struct App {
    sim: Simulation,
    probability_pct: u8,
    run_steps: u64,
    autoplay: bool,
    delay: usize,
    should_exit: bool,
    status: Option<String>,
    screen: Option<Rect>,
}

impl App {

    #[inline]
    pub fn new(sim: Simulation, probability_pct: u8, run_steps: u64) -> Self {
        App {
            sim,
            probability_pct: probability_pct.min(100),
            run_steps: run_steps.clamp(1, MAX_RUN_STEPS),
            autoplay: false,
            delay: DEFAULT_DELAY,
            should_exit: false,
            status: None,
            screen: None,
        }
    }

    /// Terminal area resizes must fit into. Without one, only the side bounds apply.
    #[inline]
    pub fn set_screen(&mut self, screen: Rect) {
        self.screen = Some(screen);
    }

    #[inline]
    pub fn sim(&self) -> &Simulation {
        &self.sim
    }

    #[inline]
    pub fn probability(&self) -> f64 {
        f64::from(self.probability_pct) / 100.0
    }

    #[inline]
    pub fn run_steps(&self) -> u64 {
        self.run_steps
    }

    #[inline]
    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    #[inline]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(DELAYS[self.delay])
    }

    #[inline]
    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    #[inline]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Applies one action. Core errors end up in the status line, never abort the dashboard.
    pub fn apply(&mut self, action: Action) {
        self.status = None;
        let res = match action {
            Action::StepOnce => self.sim.step_once(),
            Action::Run => self.sim.advance(self.run_steps),
            Action::MoreRunSteps => {
                self.run_steps = (self.run_steps + 1).min(MAX_RUN_STEPS);
                Ok(())
            }
            Action::FewerRunSteps => {
                self.run_steps = self.run_steps.saturating_sub(1).max(1);
                Ok(())
            }
            Action::Randomize => self.sim.randomize(self.probability()),
            Action::Clear => {
                self.sim.clear();
                Ok(())
            }
            Action::Resize { rows, cols } => {
                let next = (
                    self.sim.rows().checked_add_signed(rows),
                    self.sim.cols().checked_add_signed(cols),
                );
                match next {
                    (Some(r), Some(c)) if in_bounds(r) && in_bounds(c) => {
                        let needed = Rect::for_dims(r, c, HEADER_LINES + FOOTER_LINES);
                        match self.screen {
                            Some(screen) if !screen.contains(&needed) => {
                                self.status = Some(too_small(needed, screen).to_string());
                                Ok(())
                            }
                            _ => self.sim.resize(r, c, self.probability()),
                        }
                    }
                    _ => {
                        self.status = Some(format!("size is limited to {MIN_SIDE}..={MAX_SIDE}"));
                        Ok(())
                    }
                }
            }
            Action::MoreLive => {
                self.probability_pct =
                    self.probability_pct.saturating_add(PROBABILITY_STEP_PCT).min(100);
                Ok(())
            }
            Action::FewerLive => {
                self.probability_pct = self.probability_pct.saturating_sub(PROBABILITY_STEP_PCT);
                Ok(())
            }
            Action::ToggleAutoplay => {
                self.autoplay = !self.autoplay;
                Ok(())
            }
            Action::Slower => {
                self.delay = (self.delay + 1).min(DELAYS.len() - 1);
                Ok(())
            }
            Action::Faster => {
                self.delay = self.delay.saturating_sub(1);
                Ok(())
            }
            Action::Quit => {
                self.should_exit = true;
                Ok(())
            }
        };
        if let Err(e) = res {
            debug!(error = %e, ?action, "action rejected");
            self.status = Some(e.to_string());
        }
    }

    fn header(&self) -> [String; 2] {
        let sim = &self.sim;
        [
            format!(
                "Step: {}   Size: {}x{}   Population: {}",
                sim.step(),
                sim.rows(),
                sim.cols(),
                sim.grid().population(),
            ),
            format!(
                "Live probability: {:.2}   Run steps: {}   Autoplay: {} ({} ms)",
                self.probability(),
                self.run_steps,
                if self.autoplay { "on" } else { "off" },
                DELAYS[self.delay],
            ),
        ]
    }
}

fn in_bounds(side: usize) -> bool {
    (MIN_SIDE..=MAX_SIDE).contains(&side)
}

/// Maps a key press to a dashboard action.
pub fn action_for(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }
    let action = match key.code {
        KeyCode::Char('s') | KeyCode::Char(' ') => Action::StepOnce,
        KeyCode::Char('r') => Action::Run,
        KeyCode::Char('+') | KeyCode::Char('=') => Action::MoreRunSteps,
        KeyCode::Char('-') => Action::FewerRunSteps,
        KeyCode::Char('n') => Action::Randomize,
        KeyCode::Char('c') => Action::Clear,
        KeyCode::Up => Action::Resize { rows: -1, cols: 0 },
        KeyCode::Down => Action::Resize { rows: 1, cols: 0 },
        KeyCode::Left => Action::Resize { rows: 0, cols: -1 },
        KeyCode::Right => Action::Resize { rows: 0, cols: 1 },
        KeyCode::Char(']') => Action::MoreLive,
        KeyCode::Char('[') => Action::FewerLive,
        KeyCode::Char('p') => Action::ToggleAutoplay,
        KeyCode::Char('j') => Action::Slower,
        KeyCode::Char('k') => Action::Faster,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => return None,
    };
    Some(action)
}

/// Prints the initial grid and the grid after each of `steps` generations.
pub fn print_demo<W: Write>(sim: &mut Simulation, steps: u64, out: &mut W) -> Result<()> {
    writeln!(out, "Initial board:\n{}", sim.grid())?;
    for _ in 0..steps {
        sim.step_once()?;
        writeln!(out, "\nBoard after step {}:\n{}", sim.step(), sim.grid())?;
    }
    Ok(())
}

/// Redraws the grid in place for `steps` generations, pausing between frames.
pub fn animate(sim: &mut Simulation, steps: u64, pause: Duration) -> Result<()> {
    let needed = Rect::for_grid(sim.grid(), 2);
    let terminal = Rect::term_size()?;
    if !terminal.contains(&needed) {
        return Err(too_small(needed, terminal));
    }

    let mut out = io::stdout();
    for k in 1..=steps {
        sim.step_once()?;
        queue!(out, terminal::Clear(terminal::ClearType::All), MoveTo(0, 0))?;
        queue!(out, Print(format!("Board state at step {}\n", sim.step())))?;
        draw_grid(&mut out, sim.grid(), "\n")?;
        queue!(out, ResetColor)?;
        out.flush()?;

        if k < steps {
            sleep(pause);
        }
    }
    Ok(())
}

/// Runs the interactive dashboard until the user quits.
pub fn run(mut a: App) -> Result<()> {
    let needed = Rect::for_grid(a.sim().grid(), HEADER_LINES + FOOTER_LINES);
    let terminal = Rect::term_size()?;
    if !terminal.contains(&needed) {
        return Err(too_small(needed, terminal));
    }
    a.set_screen(terminal);

    runup()?;
    let d = draw(&mut a);
    shutdown()?;
    d?;
    info!(step = a.sim().step(), "dashboard closed");
    Ok(())
}

fn runup() -> Result<()> {
    execute!(io::stdout(), EnterAlternateScreen, SetTitle("Life board"), Hide)?;
    enable_raw_mode()?;
    Ok(())
}

fn shutdown() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), ResetColor, LeaveAlternateScreen, Show)?;
    Ok(())
}

fn draw(a: &mut App) -> Result<()> {
    let mut out = io::stdout();
    let mut last_tick = Instant::now();

    render(&mut out, a)?;
    while !a.should_exit() {
        let timeout = if a.autoplay() {
            a.delay().saturating_sub(last_tick.elapsed())
        } else {
            IDLE_POLL
        };

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(action) = action_for(key) {
                        a.apply(action);
                        if action == Action::ToggleAutoplay {
                            last_tick = Instant::now();
                        }
                    }
                }
                Event::Resize(w, h) => a.set_screen(Rect::new(w, h)),
                _ => {}
            }
        }

        if a.autoplay() && last_tick.elapsed() >= a.delay() {
            a.apply(Action::StepOnce);
            last_tick = Instant::now();
        }

        render(&mut out, a)?;
    }
    Ok(())
}

fn render<W: Write>(out: &mut W, a: &App) -> Result<()> {
    queue!(out, terminal::Clear(terminal::ClearType::All), MoveTo(0, 0))?;
    queue!(out, Print("Conway's Game of Life\r\n"))?;
    for line in a.header() {
        queue!(out, Print(line), Print("\r\n"))?;
    }
    queue!(out, Print("\r\n"))?;

    draw_grid(out, a.sim().grid(), "\r\n")?;
    queue!(out, ResetColor)?;

    queue!(
        out,
        Print("\r\n"),
        Print(RULES),
        Print("\r\n"),
        Print("s/space step  r run  +/- run steps  n randomize  c clear\r\n"),
        Print("arrows resize  [/] live probability  p autoplay  j/k slower/faster  q quit\r\n"),
    )?;
    if let Some(status) = a.status() {
        queue!(out, Print(status), Print("\r\n"))?;
    }
    out.flush()?;
    Ok(())
}

fn draw_grid<W: Write>(out: &mut W, grid: &Grid, newline: &str) -> Result<()> {
    for r in grid.cells() {
        for c in r {
            if *c {
                queue!(out, SetForegroundColor(LIVE_COLOR), Print(LIVE_GLYPH))?;
            } else {
                queue!(out, SetForegroundColor(DEAD_COLOR), Print(DEAD_GLYPH))?;
            }
        }
        queue!(out, Print(newline))?;
    }
    Ok(())
}

fn too_small(needed: Rect, terminal: Rect) -> Err {
    format!(
        "terminal is {}x{}, the grid needs at least {}x{}",
        terminal.w(),
        terminal.h(),
        needed.w(),
        needed.h(),
    )
    .into()
}

fn sleep(t: Duration) {
    thread::sleep(t)
}
