// ── Tests ─────────────────────────────────────────────────────────────────────

use std::path::{Path, PathBuf};
use std::time::Duration;

use scrollshot::config::GameConfig;
use scrollshot::engine::Color;
use scrollshot::entity::{Action, AtlasRect};
use scrollshot::error::{AssetError, InitError};
use scrollshot::input::{Command, KeyCode, WindowMessage};
use scrollshot::renderer::draw::DrawList;
use scrollshot::renderer::projection::Projection;
use scrollshot::renderer::text::Font;
use scrollshot::renderer::texture::{SamplerOptions, TextureId, TextureLoader};
use scrollshot::scene::screens::{GAME_CLEAR, POPUP_FILL, menu_item_rect};
use scrollshot::scene::{Scene, SceneState, SceneTextures};

// ── helpers ───────────────────────────────────────────────────────────────────

/// Hands out sequential ids and records every request. Paths whose file name
/// equals `fail_on` fail like an unreadable image.
#[derive(Default)]
struct FakeLoader {
    loaded: Vec<(PathBuf, SamplerOptions)>,
    fail_on: Option<&'static str>,
    last: Option<TextureId>,
}

impl TextureLoader for FakeLoader {
    fn load_texture(&mut self, path: &Path, options: SamplerOptions) -> Result<TextureId, AssetError> {
        if self.fail_on.is_some_and(|name| path.ends_with(name)) {
            return Err(AssetError::Image {
                path: path.to_path_buf(),
                source: image::ImageError::IoError(std::io::Error::from(std::io::ErrorKind::NotFound)),
            });
        }
        let id = TextureId(self.loaded.len() as u32);
        self.loaded.push((path.to_path_buf(), options));
        self.last = Some(id);
        Ok(id)
    }

    fn last_loaded(&self) -> Option<TextureId> {
        self.last
    }
}

const FONT: &str = "common lineHeight=24 base=19 scaleW=256 scaleH=256\n\
                    char id=32 xadvance=8\n\
                    char id=101 x=0 y=0 width=10 height=12 xadvance=11\n\
                    char id=113 x=10 y=0 width=10 height=12 xadvance=11\n";

fn textures() -> SceneTextures {
    SceneTextures {
        landing: TextureId(0),
        menu_background: TextureId(1),
        help: TextureId(2),
        font: TextureId(3),
        player: TextureId(4),
        enemy: TextureId(5),
        bullet: TextureId(6),
        background: TextureId(7),
    }
}

fn scene_with(config: &GameConfig) -> Scene {
    let mut scene = Scene::new(config, textures(), Font::parse(FONT));
    scene.handle_message(WindowMessage::Resize { width: 800, height: 600 });
    scene
}

fn scene() -> Scene {
    scene_with(&GameConfig::default())
}

fn key(scene: &mut Scene, code: KeyCode) {
    scene.handle_message(WindowMessage::KeyDown(code));
}

fn in_game() -> Scene {
    let mut s = scene();
    key(&mut s, KeyCode::Enter);
    key(&mut s, KeyCode::KeyN);
    assert_eq!(s.state(), SceneState::Game);
    s
}

fn drawn(scene: &Scene) -> DrawList {
    let mut list = DrawList::new();
    scene.draw(&mut list);
    list
}

// ── Transitions ───────────────────────────────────────────────────────────────

#[test]
fn starts_on_landing() {
    let s = scene();
    assert_eq!(s.state(), SceneState::Landing);
    assert!(!s.quit_requested());
}

#[test]
fn menu_start_pause_pause_returns_to_game() {
    let mut s = scene();
    key(&mut s, KeyCode::Enter);
    assert_eq!(s.state(), SceneState::Menu);

    let mut seen = Vec::new();
    for code in [KeyCode::KeyN, KeyCode::KeyP, KeyCode::KeyP] {
        key(&mut s, code);
        seen.push(s.state());
    }
    assert_eq!(seen, vec![SceneState::Game, SceneState::Paused, SceneState::Game]);
}

#[test]
fn escape_steps_back_one_screen() {
    let mut s = in_game();
    key(&mut s, KeyCode::Escape);
    assert_eq!(s.state(), SceneState::Paused);
    key(&mut s, KeyCode::Escape);
    assert_eq!(s.state(), SceneState::Game);

    let mut s = scene();
    key(&mut s, KeyCode::Enter);
    key(&mut s, KeyCode::KeyH);
    assert_eq!(s.state(), SceneState::Help);
    key(&mut s, KeyCode::Escape);
    assert_eq!(s.state(), SceneState::Menu);
    key(&mut s, KeyCode::Escape);
    assert_eq!(s.state(), SceneState::Landing);
    key(&mut s, KeyCode::Escape);
    assert_eq!(s.state(), SceneState::Landing);
}

#[test]
fn help_returns_to_menu_on_m() {
    let mut s = scene();
    key(&mut s, KeyCode::Enter);
    key(&mut s, KeyCode::KeyH);
    key(&mut s, KeyCode::KeyM);
    assert_eq!(s.state(), SceneState::Menu);
}

#[test]
fn menu_exit_requests_quit_without_changing_state() {
    let mut s = scene();
    key(&mut s, KeyCode::Enter);
    key(&mut s, KeyCode::KeyE);
    assert!(s.quit_requested());
    assert_eq!(s.state(), SceneState::Menu);
}

#[test]
fn confirm_while_paused_requests_quit() {
    let mut s = in_game();
    key(&mut s, KeyCode::KeyP);
    key(&mut s, KeyCode::Enter);
    assert!(s.quit_requested());
}

#[test]
fn inputs_outside_the_table_are_ignored() {
    let mut s = scene();
    for code in [KeyCode::KeyN, KeyCode::KeyH, KeyCode::KeyP, KeyCode::Space, KeyCode::KeyQ] {
        key(&mut s, code);
        assert_eq!(s.state(), SceneState::Landing, "{code:?} moved landing");
    }
    assert!(!s.command(Command::Pause));
}

// ── Pointer ───────────────────────────────────────────────────────────────────

#[test]
fn click_on_landing_opens_menu() {
    let mut s = scene();
    s.handle_message(WindowMessage::Click { x: 1.0, y: 1.0 });
    assert_eq!(s.state(), SceneState::Menu);
}

#[test]
fn click_on_menu_items() {
    let mut s = scene();
    key(&mut s, KeyCode::Enter);
    let help = menu_item_rect(800.0, 600.0, 1);
    s.handle_message(WindowMessage::Click { x: help.x + 5.0, y: help.y + 5.0 });
    assert_eq!(s.state(), SceneState::Help);

    key(&mut s, KeyCode::KeyM);
    s.handle_message(WindowMessage::Click { x: 5.0, y: 5.0 });
    assert_eq!(s.state(), SceneState::Menu, "click outside items is ignored");

    let start = menu_item_rect(800.0, 600.0, 0);
    s.handle_message(WindowMessage::Click { x: start.x, y: start.y });
    assert_eq!(s.state(), SceneState::Game);
}

#[test]
fn click_in_game_is_ignored() {
    let mut s = in_game();
    s.handle_message(WindowMessage::Click { x: 400.0, y: 300.0 });
    assert_eq!(s.state(), SceneState::Game);
}

// ── Bullets ───────────────────────────────────────────────────────────────────

#[test]
fn fire_outside_game_does_nothing() {
    let mut s = scene();
    assert_eq!(s.fire(), None);
    assert_eq!(s.bullets().active_count(), 0);
}

#[test]
fn fire_starts_bullet_at_player() {
    let mut s = in_game();
    key(&mut s, KeyCode::Space);
    assert_eq!(s.bullets().active_count(), 1);
    let bullet = s.bullets().iter_live().next().unwrap();
    assert_eq!(bullet.sprite.position, s.player().position());
}

#[test]
fn fire_on_exhausted_pool_leaves_pool_unchanged() {
    let mut config = GameConfig::default();
    config.gameplay.bullet_pool = 3;
    let mut s = scene_with(&config);
    key(&mut s, KeyCode::Enter);
    key(&mut s, KeyCode::KeyN);

    for expected in 0..3 {
        assert_eq!(s.fire(), Some(expected));
    }
    let before: Vec<_> = s.bullets().iter_live().map(|b| b.sprite.position).collect();

    assert_eq!(s.fire(), None);
    assert_eq!(s.bullets().active_count(), 3);
    assert_eq!(s.bullets().capacity(), 3);
    let after: Vec<_> = s.bullets().iter_live().map(|b| b.sprite.position).collect();
    assert_eq!(before, after);
}

// ── Player movement ───────────────────────────────────────────────────────────

#[test]
fn arrows_walk_and_release_stands() {
    let mut s = in_game();
    key(&mut s, KeyCode::ArrowRight);
    assert_eq!(s.player().action(), Action::WalkRight);

    let x0 = s.player().position().x;
    s.update(0.5);
    assert!(s.player().position().x > x0);

    s.handle_message(WindowMessage::KeyUp(KeyCode::ArrowLeft));
    assert_eq!(s.player().action(), Action::WalkRight, "other key's release is ignored");
    s.handle_message(WindowMessage::KeyUp(KeyCode::ArrowRight));
    assert_eq!(s.player().action(), Action::Stand);
}

// ── Per-frame update ──────────────────────────────────────────────────────────

/// Everything `Scene::update` may move: the parallax window, each enemy's
/// sheet frame and each live bullet's height.
fn world_snapshot(s: &Scene) -> (AtlasRect, Vec<AtlasRect>, Vec<f32>) {
    (
        s.parallax().window(),
        s.enemies().iter().map(|e| e.sprite().frame).collect(),
        s.bullets().iter_live().map(|b| b.sprite.position.y).collect(),
    )
}

/// One update after every zero-interval timer has had time to expire.
fn tick(s: &mut Scene) {
    std::thread::sleep(Duration::from_millis(2));
    s.update(0.016);
}

fn unthrottled_scene() -> Scene {
    let mut config = GameConfig::default();
    config.gameplay.scroll_interval_ms = 0;
    config.gameplay.enemy_frame_ms = 0;
    config.gameplay.bullet_interval_ms = 0;
    config.gameplay.enemy_sheet = [2, 1];
    scene_with(&config)
}

#[test]
fn screens_outside_game_leave_world_untouched() {
    let mut s = unthrottled_scene();
    let start = world_snapshot(&s);

    for (code, expected) in [
        (None, SceneState::Landing),
        (Some(KeyCode::Enter), SceneState::Menu),
        (Some(KeyCode::KeyH), SceneState::Help),
    ] {
        if let Some(code) = code {
            key(&mut s, code);
        }
        assert_eq!(s.state(), expected);
        tick(&mut s);
        assert_eq!(world_snapshot(&s), start, "world moved in {expected:?}");
    }
}

#[test]
fn game_advances_parallax_enemies_and_bullets() {
    let mut s = unthrottled_scene();
    key(&mut s, KeyCode::Enter);
    key(&mut s, KeyCode::KeyN);
    s.fire();

    let (window, frames, heights) = world_snapshot(&s);
    tick(&mut s);
    let (window2, frames2, heights2) = world_snapshot(&s);

    assert_eq!(window2.x_min, window.x_min - GameConfig::default().gameplay.scroll_step);
    assert!(frames.iter().zip(&frames2).all(|(a, b)| a != b), "enemy frames did not advance");
    assert_eq!(heights.len(), 1);
    assert!(heights2[0] > heights[0], "bullet did not rise");
}

#[test]
fn paused_freezes_parallax_enemies_and_bullets() {
    let mut s = unthrottled_scene();
    key(&mut s, KeyCode::Enter);
    key(&mut s, KeyCode::KeyN);
    s.fire();
    key(&mut s, KeyCode::KeyP);
    assert_eq!(s.state(), SceneState::Paused);

    let before = world_snapshot(&s);
    tick(&mut s);
    assert_eq!(world_snapshot(&s), before);
    assert_eq!(before.2.len(), 1, "bullet stays live while paused");
}

#[test]
fn paused_world_does_not_move() {
    let mut s = in_game();
    key(&mut s, KeyCode::ArrowLeft);
    key(&mut s, KeyCode::KeyP);
    let x0 = s.player().position().x;
    s.update(1.0);
    assert_eq!(s.player().position().x, x0);
}

// ── Drawing ───────────────────────────────────────────────────────────────────

#[test]
fn landing_draws_one_full_screen_quad() {
    let s = scene();
    let list = drawn(&s);
    assert_eq!(list.clear_color, Color::WHITE);
    assert_eq!(list.quad_count(), 1);
    let batch = &list.batches[0];
    assert_eq!(batch.projection, Projection::Screen);
    assert_eq!(batch.texture, Some(textures().landing));
    assert_eq!(batch.vertices[3].position, [800.0, 600.0, 0.0]);
}

#[test]
fn menu_draws_background_then_black_text() {
    let mut s = scene();
    key(&mut s, KeyCode::Enter);
    let list = drawn(&s);
    assert_eq!(list.batches[0].texture, Some(textures().menu_background));
    let text = &list.batches[1];
    assert_eq!(text.texture, Some(textures().font));
    assert!(text.quad_count() > 0);
    assert!(text.vertices.iter().all(|v| v.color == Color::BLACK.0));
}

#[test]
fn game_draws_background_player_enemies_bullets_in_order() {
    let mut s = in_game();
    s.fire();
    let list = drawn(&s);
    assert_eq!(list.clear_color, GAME_CLEAR);

    let t = textures();
    let order: Vec<_> = list.batches.iter().map(|b| b.texture).collect();
    assert_eq!(order, vec![Some(t.background), Some(t.player), Some(t.enemy), Some(t.bullet)]);
    assert!(list.batches.iter().all(|b| b.projection == Projection::World));
    assert_eq!(list.batches[2].quad_count(), 2, "two live enemies");
    assert_eq!(list.batches[3].quad_count(), 1);
}

#[test]
fn paused_draws_world_under_popup() {
    let mut s = in_game();
    key(&mut s, KeyCode::KeyP);
    let list = drawn(&s);
    assert_eq!(list.batches[0].texture, Some(textures().background));

    let popup = list
        .batches
        .iter()
        .find(|b| b.texture.is_none())
        .expect("popup batch");
    assert_eq!(popup.projection, Projection::Screen);
    assert_eq!(popup.vertices[0].color, POPUP_FILL.0);
    assert_eq!(popup.vertices[0].position, [225.0, 250.0, 0.0]);
    assert_eq!(list.batches.last().unwrap().texture, Some(textures().font));
}

#[test]
fn undrawable_font_draws_no_text() {
    let mut s = Scene::new(&GameConfig::default(), textures(), Font::default());
    key(&mut s, KeyCode::Enter);
    let list = drawn(&s);
    assert_eq!(list.batches.len(), 1, "menu background only");
}

// ── Scene::init ───────────────────────────────────────────────────────────────

fn font_config(tag: &str) -> (GameConfig, PathBuf) {
    let dir = std::env::temp_dir().join(format!("scrollshot-scene-{tag}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("retro_deco.fnt"), FONT).unwrap();
    let mut config = GameConfig::default();
    config.assets.root = dir.clone();
    (config, dir)
}

#[test]
fn init_loads_textures_in_order_with_sampler_options() {
    let (config, dir) = font_config("order");
    let mut loader = FakeLoader::default();
    let scene = Scene::init(&config, &mut loader);
    std::fs::remove_dir_all(&dir).ok();
    let scene = scene.unwrap();

    let names: Vec<_> = loader
        .loaded
        .iter()
        .map(|(p, _)| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "menu_background.png",
            "retro_deco.png",
            "help.png",
            "landing_page.png",
            "player.png",
            "mon.png",
            "b.png",
            "prlx.jpg",
        ]
    );
    assert_eq!(loader.loaded[0].1, SamplerOptions::SCREEN);
    assert_eq!(loader.loaded[4].1, SamplerOptions::SPRITE);
    assert_eq!(loader.loaded[7].1, SamplerOptions::SCROLLING);
    assert!(loader.loaded.iter().all(|(p, _)| p.starts_with(&dir)));

    assert_eq!(scene.textures().font, TextureId(1));
    assert_eq!(scene.textures().background, TextureId(7));
    assert_eq!(scene.font().glyphs.len(), 3);
}

#[test]
fn init_texture_failure_names_the_asset() {
    let (config, dir) = font_config("fail");
    let mut loader = FakeLoader { fail_on: Some("mon.png"), ..FakeLoader::default() };
    let result = Scene::init(&config, &mut loader);
    std::fs::remove_dir_all(&dir).ok();
    let err = result.err().expect("enemy texture should fail");
    match err {
        InitError::Texture { asset, source: AssetError::Image { path, .. } } => {
            assert_eq!(asset, "enemy");
            assert!(path.ends_with("mon.png"));
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(loader.loaded.len(), 5, "loading stops at the failure");
}

#[test]
fn init_missing_font_file_is_fatal() {
    let mut config = GameConfig::default();
    config.assets.root = PathBuf::from("definitely/not/a/dir");
    let mut loader = FakeLoader::default();
    let err = Scene::init(&config, &mut loader).err().expect("font should fail");
    assert!(matches!(err, InitError::Font(AssetError::FontNotFound { .. })), "got {err:?}");
    assert_eq!(loader.loaded.len(), 3, "font data loads after the help screen");
}
