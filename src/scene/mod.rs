//! The scene orchestrator: owns every texture, the font, the entities and
//! the state machine, and turns window messages into state changes.

pub mod screens;
pub mod state;

pub use state::{SceneState, Transition, on_command};

use glam::Vec3;
use log::{debug, info, warn};

use crate::config::GameConfig;
use crate::entity::{Action, BulletMotion, BulletPool, Enemy, Player, SpriteSheet};
use crate::error::InitError;
use crate::input::{ActionMap, Command, WindowMessage, default_bindings};
use crate::parallax::{Parallax, ScrollDirection};
use crate::renderer::draw::DrawList;
use crate::renderer::text::Font;
use crate::renderer::texture::{SamplerOptions, TextureId, TextureLoader};

pub const PLAYER_START: Vec3 = Vec3::new(0.0, -0.65, -2.0);
pub const PLAYER_SCALE: f32 = 0.25;
pub const ENEMY_ROW_Y: f32 = 0.65;
pub const ENEMY_Z: f32 = -5.0;
pub const ENEMY_SCALE: f32 = 0.3;
pub const BULLET_SCALE: f32 = 0.05;

/// Handles to every texture the scene draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneTextures {
    pub landing: TextureId,
    pub menu_background: TextureId,
    pub help: TextureId,
    pub font: TextureId,
    pub player: TextureId,
    pub enemy: TextureId,
    pub bullet: TextureId,
    pub background: TextureId,
}

pub struct Scene {
    state: SceneState,
    quit_requested: bool,
    width: f32,
    height: f32,
    textures: SceneTextures,
    font: Font,
    bindings: ActionMap<Command>,
    player: Player,
    enemies: Vec<Enemy>,
    bullets: BulletPool,
    parallax: Parallax,
    scroll_direction: ScrollDirection,
}

impl Scene {
    /// Load every asset through `loader` and build the scene.
    ///
    /// Any texture or the font description failing to load is fatal. A font
    /// that loads but cannot draw only logs a warning; text is then invisible.
    pub fn init(config: &GameConfig, loader: &mut dyn TextureLoader) -> Result<Self, InitError> {
        let assets = &config.assets;
        let mut load = |asset: &'static str, file: &str, options: SamplerOptions| -> Result<TextureId, InitError> {
            let path = assets.resolve(file);
            let id = loader
                .load_texture(&path, options)
                .map_err(|source| InitError::Texture { asset, source })?;
            info!("loaded {asset} texture from {}", path.display());
            Ok(id)
        };

        let menu_background = load("menu background", &assets.menu_background, SamplerOptions::SCREEN)?;
        let font_texture = load("font", &assets.font_texture, SamplerOptions::SCREEN)?;
        let help = load("help", &assets.help, SamplerOptions::SCREEN)?;

        let font_path = assets.resolve(&assets.font_data);
        let font = Font::load(&font_path).map_err(InitError::Font)?;
        for warning in font.warnings() {
            warn!("{}: {warning}; text will not be drawn", font_path.display());
        }
        info!("loaded font {} ({} glyphs)", font_path.display(), font.glyphs.len());

        let landing = load("landing page", &assets.landing, SamplerOptions::SCREEN)?;
        let player = load("player", &assets.player, SamplerOptions::SPRITE)?;
        let enemy = load("enemy", &assets.enemy, SamplerOptions::SPRITE)?;
        let bullet = load("bullet", &assets.bullet, SamplerOptions::SPRITE)?;
        let background = load("background", &assets.background, SamplerOptions::SCROLLING)?;
        debug!("scene textures ready, last handle {:?}", loader.last_loaded());

        let textures = SceneTextures {
            landing,
            menu_background,
            help,
            font: font_texture,
            player,
            enemy,
            bullet,
            background,
        };
        Ok(Self::new(config, textures, font))
    }

    /// Build a scene from already-loaded assets, in the `Landing` state.
    pub fn new(config: &GameConfig, textures: SceneTextures, font: Font) -> Self {
        let g = &config.gameplay;

        let player_sheet = SpriteSheet::new(g.player_sheet[0], g.player_sheet[1]);
        let enemy_sheet = SpriteSheet::new(g.enemy_sheet[0], g.enemy_sheet[1]);

        let player = Player::new(PLAYER_START, PLAYER_SCALE, player_sheet, g.player_speed, g.player_frame_ms);
        let enemies = (0..g.enemy_count)
            .map(|i| {
                let position = Vec3::new(-0.5 + i as f32, ENEMY_ROW_Y, ENEMY_Z);
                Enemy::new(position, ENEMY_SCALE, enemy_sheet, g.enemy_frame_ms)
            })
            .collect();
        let bullets = BulletPool::new(
            g.bullet_pool,
            BULLET_SCALE,
            BulletMotion {
                step: g.bullet_step,
                interval_ms: g.bullet_interval_ms,
                ceiling: g.bullet_ceiling,
            },
        );

        Self {
            state: SceneState::Landing,
            quit_requested: false,
            width: config.window.width as f32,
            height: config.window.height as f32,
            textures,
            font,
            bindings: default_bindings(),
            player,
            enemies,
            bullets,
            parallax: Parallax::new(g.scroll_step, g.scroll_interval_ms),
            scroll_direction: g.scroll_direction,
        }
    }

    pub fn state(&self) -> SceneState {
        self.state
    }

    /// Set once a quit transition fires. The host exits its loop on it.
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn textures(&self) -> &SceneTextures {
        &self.textures
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn bullets(&self) -> &BulletPool {
        &self.bullets
    }

    pub fn parallax(&self) -> &Parallax {
        &self.parallax
    }

    pub fn handle_message(&mut self, message: WindowMessage) {
        match message {
            WindowMessage::Resize { width, height } => {
                self.width = width as f32;
                self.height = height as f32;
            }
            WindowMessage::KeyDown(key) => {
                for command in self.bindings.actions_for(key) {
                    if self.command(command) {
                        break;
                    }
                }
            }
            WindowMessage::KeyUp(key) => {
                for command in self.bindings.actions_for(key) {
                    match command {
                        Command::WalkLeft => self.player.release(Action::WalkLeft),
                        Command::WalkRight => self.player.release(Action::WalkRight),
                        _ => {}
                    }
                }
            }
            WindowMessage::Click { x, y } => {
                let command = match self.state {
                    SceneState::Landing => Some(Command::Confirm),
                    SceneState::Menu => screens::menu_hit(self.width, self.height, x, y),
                    _ => None,
                };
                if let Some(command) = command {
                    self.command(command);
                }
            }
        }
    }

    /// Apply one command. Returns whether the current state accepted it.
    pub fn command(&mut self, command: Command) -> bool {
        if self.state == SceneState::Game {
            match command {
                Command::Fire => {
                    self.fire();
                    return true;
                }
                Command::WalkLeft => {
                    self.player.set_action(Action::WalkLeft);
                    return true;
                }
                Command::WalkRight => {
                    self.player.set_action(Action::WalkRight);
                    return true;
                }
                _ => {}
            }
        }

        match on_command(self.state, command) {
            Some(Transition::Goto(next)) => {
                info!("scene: {:?} -> {:?} on {:?}", self.state, next, command);
                self.state = next;
                true
            }
            Some(Transition::Quit) => {
                info!("scene: quit requested from {:?}", self.state);
                self.quit_requested = true;
                true
            }
            None => false,
        }
    }

    /// Launch a bullet from the player's position. Only works in `Game`;
    /// returns the pool slot used, or `None` when the pool is exhausted.
    pub fn fire(&mut self) -> Option<usize> {
        if self.state != SceneState::Game {
            return None;
        }
        self.bullets.fire(self.player.position())
    }

    /// Advance the current state by one frame of `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        (state::handlers(self.state).update)(self, dt);
    }

    /// Rebuild `list` with this frame's draw commands.
    pub fn draw(&self, list: &mut DrawList) {
        (state::handlers(self.state).draw)(self, list);
    }
}
