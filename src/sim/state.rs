//! Game state and core simulation types
//!
//! Everything a session mutates lives in [`GameState`]; the shell owns one
//! instance and passes it by reference to the tick and the renderer.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use crate::consts::*;
use crate::{Rect, Tuning, Viewport};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing simulated
    Start,
    /// Active gameplay
    Playing,
    /// Run ended, final score shown
    GameOver,
}

/// Direction the astronaut faces (sprite is mirrored for `Left`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Advance a sprite animation: frame steps once the timer passes the threshold
fn step_animation(frame: &mut u32, timer: &mut u32) {
    *timer += 1;
    if *timer > ANIMATION_TICKS {
        *frame = (*frame + 1) % ANIMATION_FRAMES;
        *timer = 0;
    }
}

/// The astronaut
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub facing: Facing,
    /// Sprite frame (0..ANIMATION_FRAMES)
    pub frame: u32,
    pub anim_timer: u32,
    /// Landed on a platform this tick
    pub on_ground: bool,
}

impl Player {
    /// Spawn centered horizontally, above the start platform
    pub fn spawn(viewport: Viewport) -> Self {
        Self {
            pos: Vec2::new(viewport.width / 2.0, viewport.height - PLAYER_SPAWN_OFFSET),
            vel: Vec2::ZERO,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            facing: Facing::Right,
            frame: 0,
            anim_timer: 0,
            on_ground: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    /// Continuous run cycle, independent of movement
    pub fn animate(&mut self) {
        step_animation(&mut self.frame, &mut self.anim_timer);
    }

    /// Wrap across the horizontal canvas edges once half the body is off-screen
    pub fn wrap(&mut self, canvas_width: f32) {
        let half = self.size.x / 2.0;
        if self.pos.x < -half {
            self.pos.x = canvas_width + half;
        } else if self.pos.x > canvas_width + half {
            self.pos.x = -half;
        }
    }
}

/// Platform archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlatformKind {
    #[default]
    Normal,
    /// Slides horizontally, bouncing off the canvas edges
    Moving,
    /// Breaks on first landing, then falls away
    Breakable,
}

/// A platform entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: PlatformKind,
    /// -1.0 or 1.0 (moving platforms only)
    pub move_dir: f32,
    /// px/tick (moving platforms only)
    pub move_speed: f32,
    /// Once set, never cleared for this platform
    pub broken: bool,
    /// Ticks since breaking (0 while intact)
    pub break_timer: u32,
}

impl Platform {
    pub fn new(id: u32, pos: Vec2, kind: PlatformKind) -> Self {
        Self {
            id,
            pos,
            size: Vec2::new(PLATFORM_WIDTH, PLATFORM_HEIGHT),
            kind,
            move_dir: 1.0,
            move_speed: 0.0,
            broken: false,
            break_timer: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    /// Broken platforms stop catching the player
    pub fn is_solid(&self) -> bool {
        !(self.broken && self.break_timer > 0)
    }

    /// Mark a breakable platform as broken; no-op for other kinds
    pub fn break_apart(&mut self) -> bool {
        if self.kind != PlatformKind::Breakable || self.broken {
            return false;
        }
        self.broken = true;
        self.break_timer = 1;
        true
    }

    /// Per-tick motion: slide moving platforms, drop broken ones
    pub fn step(&mut self, canvas_width: f32, tuning: &Tuning) {
        if self.kind == PlatformKind::Moving {
            let max_x = (canvas_width - self.size.x).max(0.0);
            self.pos.x += self.move_dir * self.move_speed;
            if self.pos.x <= 0.0 || self.pos.x >= max_x {
                self.pos.x = self.pos.x.clamp(0.0, max_x);
                self.move_dir = -self.move_dir;
            }
        }

        if self.kind == PlatformKind::Breakable && self.broken {
            self.break_timer += 1;
            if self.break_timer > tuning.break_delay_ticks {
                self.pos.y += tuning.break_fall_speed;
            }
        }
    }
}

/// A collectible coin floating above a platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub frame: u32,
    pub anim_timer: u32,
    pub collected: bool,
}

impl Coin {
    /// Coin centered over a platform, lifted above its top edge
    pub fn above(id: u32, platform: &Platform) -> Self {
        Self {
            id,
            pos: Vec2::new(
                platform.pos.x + platform.size.x / 2.0 - COIN_SIZE / 2.0,
                platform.pos.y - COIN_LIFT,
            ),
            size: Vec2::splat(COIN_SIZE),
            frame: 0,
            anim_timer: 0,
            collected: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    /// Spin the sprite and bob vertically on a sine of the sim clock
    pub fn animate(&mut self, time_ms: f64) {
        step_animation(&mut self.frame, &mut self.anim_timer);
        let phase = time_ms * 0.005 + self.pos.x as f64 * 0.01;
        self.pos.y += (phase.sin() * 0.5) as f32;
    }
}

/// A visual particle (jump dust, platform debris, coin sparkle)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining life in ticks
    pub life: u32,
    pub max_life: u32,
    /// RGB
    pub color: [u8; 3],
    pub size: f32,
}

impl Particle {
    /// Opacity follows remaining life
    pub fn alpha(&self) -> f32 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f32 / self.max_life as f32
        }
    }
}

/// Things that happened during a tick, drained by the shell (audio, HUD)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player bounced off a platform at (x, y)
    Jumped { x: f32, y: f32 },
    PlatformBroke { platform_id: u32 },
    CoinCollected { coin_id: u32 },
    /// Score went up (fires once per increase, not every frame)
    ScoreIncreased { score: u64 },
    GameOver { score: u64 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Session RNG; every random draw in the sim goes through it
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub viewport: Viewport,
    pub phase: GamePhase,
    /// Simulation tick counter (drives coin bobbing)
    pub time_ticks: u64,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub coins: Vec<Coin>,
    pub particles: Vec<Particle>,
    pub camera: Camera,
    pub coins_collected: u64,
    /// Always `coins_collected * points_per_coin`
    pub score: u64,
    pub speed_multiplier: f32,
    /// Events from the most recent ticks, oldest first
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a session on the title screen with the opening platforms laid out
    pub fn new(seed: u64, viewport: Viewport, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            viewport,
            phase: GamePhase::Start,
            time_ticks: 0,
            player: Player::spawn(viewport),
            platforms: Vec::new(),
            coins: Vec::new(),
            particles: Vec::with_capacity(MAX_PARTICLES),
            camera: Camera::default(),
            coins_collected: 0,
            score: 0,
            speed_multiplier: 1.0,
            events: Vec::new(),
            next_id: 1,
        };

        super::world::generate_initial_platforms(&mut state);

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Current gravity after difficulty scaling
    pub fn gravity(&self) -> f32 {
        self.tuning.gravity * self.speed_multiplier
    }

    /// Current upward jump impulse magnitude after difficulty scaling
    pub fn jump_impulse(&self) -> f32 {
        self.tuning.jump_force * self.speed_multiplier
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Canvas was re-measured (orientation change)
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Bottom edge of the visible window in world coordinates
    pub fn view_bottom(&self) -> f32 {
        self.camera.y + self.viewport.height
    }

    /// Clear score and transient collections (shared by restart and exit)
    pub(crate) fn clear_progress(&mut self) {
        self.score = 0;
        self.coins_collected = 0;
        self.speed_multiplier = 1.0;
        self.particles.clear();
        self.coins.clear();
        self.camera = Camera::default();
        self.events.clear();
    }

    /// Fresh player and platform set for a new run
    pub(crate) fn reset_run(&mut self) {
        self.clear_progress();
        self.player = Player::spawn(self.viewport);
        super::world::generate_initial_platforms(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuning() -> Tuning {
        Tuning::default()
    }

    #[test]
    fn test_new_state_is_on_title_screen() {
        let state = GameState::new(7, Viewport::new(400.0, 700.0), tuning());
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.score, 0);
        assert_eq!(state.platforms.len(), 30);
        assert_eq!(state.player.pos, Vec2::new(200.0, 500.0));
    }

    #[test]
    fn test_moving_platform_reverses_and_stays_in_bounds() {
        let mut p = Platform::new(1, Vec2::new(275.0, 0.0), PlatformKind::Moving);
        p.move_speed = 2.0;
        p.move_dir = 1.0;
        p.step(400.0, &tuning());
        assert_eq!(p.pos.x, 277.0);
        p.step(400.0, &tuning());
        assert_eq!(p.pos.x, 279.0);
        p.step(400.0, &tuning());
        // 281 would overshoot 280, so it clamps and turns around
        assert_eq!(p.pos.x, 280.0);
        assert_eq!(p.move_dir, -1.0);
        p.step(400.0, &tuning());
        assert_eq!(p.pos.x, 278.0);
    }

    #[test]
    fn test_broken_platform_falls_after_delay() {
        let t = tuning();
        let mut p = Platform::new(1, Vec2::new(10.0, 100.0), PlatformKind::Breakable);
        assert!(p.break_apart());
        assert!(!p.is_solid());
        for _ in 0..29 {
            p.step(400.0, &t);
        }
        assert_eq!(p.break_timer, 30);
        assert_eq!(p.pos.y, 100.0);
        p.step(400.0, &t);
        assert_eq!(p.pos.y, 105.0);
        assert!(p.broken);
    }

    #[test]
    fn test_only_breakables_break() {
        let mut p = Platform::new(1, Vec2::ZERO, PlatformKind::Normal);
        assert!(!p.break_apart());
        assert!(!p.broken);
        assert!(p.is_solid());
    }

    #[test]
    fn test_player_wraps_across_edges() {
        let mut player = Player::spawn(Viewport::new(400.0, 700.0));
        player.pos.x = -26.0;
        player.wrap(400.0);
        assert_eq!(player.pos.x, 425.0);
        player.pos.x = 426.0;
        player.wrap(400.0);
        assert_eq!(player.pos.x, -25.0);
    }

    #[test]
    fn test_animation_cycles_four_frames() {
        let mut player = Player::spawn(Viewport::default());
        for _ in 0..9 {
            player.animate();
        }
        assert_eq!(player.frame, 1);
        for _ in 0..27 {
            player.animate();
        }
        assert_eq!(player.frame, 0);
    }

    #[test]
    fn test_coin_centers_over_platform() {
        let platform = Platform::new(1, Vec2::new(100.0, 300.0), PlatformKind::Normal);
        let coin = Coin::above(2, &platform);
        assert_eq!(coin.pos, Vec2::new(145.0, 270.0));
        assert_eq!(coin.rect().center_x(), platform.rect().center_x());
    }
}
