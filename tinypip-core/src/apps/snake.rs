//! SNAKE
//!
//! The board is a 14x10 grid filling the content rows, two characters per
//! cell. The snake steps every `STEP_MS`; the D-pad is read on every
//! frame so a quick tap between steps still turns it.

use heapless::Vec;
use tinypip_display::{Button, InputSource, Screen};

use super::text;
use crate::app::{App, AppContext, CONTENT_TOP};
use crate::log::info;
use crate::traits::Board;

pub const GRID_W: i8 = 14;
pub const GRID_H: i8 = 10;

const CELLS: usize = (GRID_W as usize) * (GRID_H as usize);

/// Time between steps
pub const STEP_MS: u64 = 220;

type Cell = (i8, i8);

/// xorshift32
#[derive(Debug, Clone, Copy)]
struct Rng(u32);

impl Rng {
    fn new(seed: u64) -> Self {
        let folded = (seed ^ (seed >> 32)) as u32;
        Self(if folded == 0 { 0x9E37_79B9 } else { folded })
    }

    fn next(&mut self) -> u32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        x
    }
}

#[derive(Debug)]
pub struct SnakeApp {
    /// Head first
    body: Vec<Cell, CELLS>,
    direction: Cell,
    food: Cell,
    alive: bool,
    last_step_ms: u64,
    rng: Rng,
}

impl SnakeApp {
    /// New game; `seed_ms` seeds food placement
    pub fn new(seed_ms: u64) -> Self {
        let mut app = Self {
            body: Vec::new(),
            direction: (1, 0),
            food: (8, 5),
            alive: true,
            last_step_ms: 0,
            rng: Rng::new(seed_ms),
        };
        app.restart(0);
        app
    }

    fn restart(&mut self, now_ms: u64) {
        self.body.clear();
        for cell in [(5, 5), (4, 5), (3, 5)] {
            let _ = self.body.push(cell);
        }
        self.direction = (1, 0);
        self.food = (8, 5);
        self.alive = true;
        self.last_step_ms = now_ms;
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn length(&self) -> usize {
        self.body.len()
    }

    pub fn head(&self) -> Cell {
        self.body.first().copied().unwrap_or((0, 0))
    }

    fn steer(&mut self, input: &mut dyn InputSource) {
        let (dx, dy) = self.direction;
        if input.is_pressed(Button::Up) && (dx, dy) != (0, 1) {
            self.direction = (0, -1);
        } else if input.is_pressed(Button::Down) && (dx, dy) != (0, -1) {
            self.direction = (0, 1);
        } else if input.is_pressed(Button::Left) && (dx, dy) != (1, 0) {
            self.direction = (-1, 0);
        } else if input.is_pressed(Button::Right) && (dx, dy) != (-1, 0) {
            self.direction = (1, 0);
        }
    }

    fn step(&mut self) {
        let (hx, hy) = self.head();
        let next = (hx + self.direction.0, hy + self.direction.1);

        let off_grid = next.0 < 0 || next.0 >= GRID_W || next.1 < 0 || next.1 >= GRID_H;
        if off_grid || self.body.contains(&next) {
            info!("snake: game over at length {}", self.body.len());
            self.alive = false;
            return;
        }

        let ate = next == self.food;
        if !ate {
            self.body.pop();
        }
        if self.body.insert(0, next).is_err() {
            self.alive = false;
            return;
        }
        if ate {
            match self.spawn_food() {
                Some(food) => self.food = food,
                // Board full
                None => self.alive = false,
            }
        }
    }

    fn spawn_food(&mut self) -> Option<Cell> {
        for _ in 0..32 {
            let r = self.rng.next();
            let cell = (
                (r % GRID_W as u32) as i8,
                ((r >> 8) % GRID_H as u32) as i8,
            );
            if !self.body.contains(&cell) {
                return Some(cell);
            }
        }
        (0..GRID_H)
            .flat_map(|y| (0..GRID_W).map(move |x| (x, y)))
            .find(|cell| !self.body.contains(cell))
    }

    fn draw(&self, screen: &mut Screen) {
        for y in 0..GRID_H {
            let row = CONTENT_TOP + y as usize;
            screen.set_text(row, 0, "|");
            screen.set_text(row, 1 + 2 * GRID_W as usize, "|");
        }
        let (fx, fy) = self.food;
        screen.set_text(CONTENT_TOP + fy as usize, 1 + 2 * fx as usize, "<>");
        for (i, &(x, y)) in self.body.iter().enumerate() {
            let cell = if i == 0 { "@@" } else { "##" };
            screen.set_text(CONTENT_TOP + y as usize, 1 + 2 * x as usize, cell);
        }
    }
}

impl App for SnakeApp {
    fn title(&self) -> &'static str {
        "SNAKE"
    }

    fn footer(&self) -> (&'static str, &'static str) {
        if self.alive {
            ("B: BACK", "")
        } else {
            ("B: BACK", "A: RESTART")
        }
    }

    fn enter(&mut self, _ctx: &mut AppContext, board: &mut Board<'_>) {
        self.restart(board.clock.now_ticks_ms());
    }

    fn frame(&mut self, ctx: &mut AppContext, board: &mut Board<'_>, screen: &mut Screen) {
        let now = board.clock.now_ticks_ms();

        if !self.alive {
            if ctx.pressed(&mut *board.input, Button::Confirm, now) {
                self.restart(now);
            } else {
                screen.set_centered(CONTENT_TOP + 3, "GAME OVER");
                screen.set_centered(
                    CONTENT_TOP + 5,
                    &text(format_args!("LENGTH: {}", self.body.len())),
                );
                return;
            }
        }

        self.steer(&mut *board.input);
        if now.saturating_sub(self.last_step_ms) > STEP_MS {
            self.last_step_ms = now;
            self.step();
        }
        self.draw(screen);
    }

    fn frame_ms(&self, _ctx: &AppContext) -> u16 {
        if self.alive {
            20
        } else {
            100
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::run_frame;
    use crate::config::{DeviceConfig, Settings};
    use crate::testing::FakeBoard;

    fn setup() -> (FakeBoard, AppContext, Screen, SnakeApp) {
        let mut fakes = FakeBoard::new(0);
        let mut ctx = AppContext::new(DeviceConfig::default(), Settings::default(), 0);
        let mut app = SnakeApp::new(12_345);
        app.enter(&mut ctx, &mut fakes.board());
        (fakes, ctx, Screen::new(), app)
    }

    fn run_until(
        fakes: &mut FakeBoard,
        ctx: &mut AppContext,
        screen: &mut Screen,
        app: &mut SnakeApp,
        ms: u64,
    ) {
        while fakes.clock.now_ms() < ms {
            run_frame(app, ctx, &mut fakes.board(), screen);
        }
    }

    #[test]
    fn test_eats_food_and_grows() {
        let (mut fakes, mut ctx, mut screen, mut app) = setup();
        // Steps at 240, 480 and 720 ms reach the food at (8, 5)
        run_until(&mut fakes, &mut ctx, &mut screen, &mut app, 730);
        assert_eq!(app.head(), (8, 5));
        assert_eq!(app.length(), 4);
        assert!(app.is_alive());
        assert_ne!(app.food, (8, 5));
        assert!(!app.body.contains(&app.food));
    }

    #[test]
    fn test_reversal_ignored() {
        let (mut fakes, mut ctx, mut screen, mut app) = setup();
        fakes.buttons.hold(Button::Left, 0, 300);
        run_until(&mut fakes, &mut ctx, &mut screen, &mut app, 250);
        assert_eq!(app.direction, (1, 0));
        assert_eq!(app.head(), (6, 5));
    }

    #[test]
    fn test_turn_between_steps() {
        let (mut fakes, mut ctx, mut screen, mut app) = setup();
        fakes.buttons.tap(Button::Up, 100);
        run_until(&mut fakes, &mut ctx, &mut screen, &mut app, 250);
        assert_eq!(app.head(), (5, 4));
        assert!(screen.get_line(CONTENT_TOP + 4).unwrap().contains("@@"));
    }

    #[test]
    fn test_wall_ends_game_and_confirm_restarts() {
        let (mut fakes, mut ctx, mut screen, mut app) = setup();
        // Eight steps reach x = 13, the ninth at 2160 ms leaves the grid
        run_until(&mut fakes, &mut ctx, &mut screen, &mut app, 2_420);
        assert!(!app.is_alive());
        run_frame(&mut app, &mut ctx, &mut fakes.board(), &mut screen);
        assert!(screen.contains("GAME OVER"));

        fakes.buttons.tap(Button::Confirm, fakes.clock.now_ms());
        run_frame(&mut app, &mut ctx, &mut fakes.board(), &mut screen);
        assert!(app.is_alive());
        assert_eq!(app.length(), 3);
        assert_eq!(app.head(), (5, 5));
    }

    #[test]
    fn test_rng_never_sticks_at_zero() {
        let mut rng = Rng::new(0);
        assert_ne!(rng.next(), 0);
    }
}
