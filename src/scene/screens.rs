//! Per-state update and draw routines, plus the menu layout they share with
//! pointer hit-testing.

use crate::engine::Color;
use crate::input::Command;
use crate::renderer::draw::DrawList;
use crate::renderer::projection::Projection;
use crate::renderer::text::generate_text_mesh;

use super::Scene;

/// Clear colour behind the game world.
pub const GAME_CLEAR: Color = Color([0.0, 0.4, 0.0, 1.0]);
/// Pause popup fill: black at 75% opacity.
pub const POPUP_FILL: Color = Color([0.0, 0.0, 0.0, 0.75]);
pub const POPUP_SIZE: [f32; 2] = [350.0, 100.0];

pub const MENU_ITEMS: [(&str, Command); 3] = [
    ("new game: 'n'", Command::Start),
    ("help: 'h'", Command::Help),
    ("exit: press e", Command::Exit),
];
pub const MENU_SPACING: f32 = 60.0;
pub const MENU_BUTTON_SIZE: [f32; 2] = [250.0, 50.0];

pub const HELP_TEXT: &str = "press [esc] to return to menu";
pub const QUIT_PROMPT: &str = "quit game?";
pub const QUIT_OPTIONS: &str = "yes (enter) / no (esc)";

/// Axis-aligned rectangle in screen pixels. Contains its top and left edges
/// but not its bottom and right ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }
}

/// Clickable area of menu item `index` on a `width × height` screen. The item's
/// label is drawn at the rectangle's top-left corner.
pub fn menu_item_rect(width: f32, height: f32, index: usize) -> Rect {
    Rect {
        x: width / 2.0 - 75.0,
        y: height / 2.0 - 50.0 + index as f32 * MENU_SPACING,
        w: MENU_BUTTON_SIZE[0],
        h: MENU_BUTTON_SIZE[1],
    }
}

/// The command of the menu item under `(x, y)`, if any.
pub fn menu_hit(width: f32, height: f32, x: f32, y: f32) -> Option<Command> {
    MENU_ITEMS
        .iter()
        .enumerate()
        .find(|(i, _)| menu_item_rect(width, height, *i).contains(x, y))
        .map(|(_, &(_, command))| command)
}

/// Top-left corner of the centred pause popup.
pub fn popup_origin(width: f32, height: f32) -> [f32; 2] {
    [(width - POPUP_SIZE[0]) / 2.0, (height - POPUP_SIZE[1]) / 2.0]
}

// ── Update ───────────────────────────────────────────────────────────────────

/// Screens without a simulated world.
pub fn update_idle(_scene: &mut Scene, _dt: f32) {}

pub fn update_game(scene: &mut Scene, dt: f32) {
    scene.player.update(dt);
    for enemy in &mut scene.enemies {
        enemy.update();
    }
    scene.bullets.update();
    scene.parallax.scroll(scene.scroll_direction);
}

// ── Draw ─────────────────────────────────────────────────────────────────────

fn draw_text(scene: &Scene, list: &mut DrawList, text: &str, x: f32, y: f32, color: Color) {
    let (vertices, indices) = generate_text_mesh(text, &scene.font, [x, y], color);
    list.push_mesh(Projection::Screen, Some(scene.textures.font), &vertices, &indices);
}

pub fn draw_landing(scene: &Scene, list: &mut DrawList) {
    list.reset(Color::WHITE);
    list.push_screen_rect(Some(scene.textures.landing), 0.0, 0.0, scene.width, scene.height, Color::WHITE);
}

pub fn draw_menu(scene: &Scene, list: &mut DrawList) {
    list.reset(Color::WHITE);
    list.push_screen_rect(
        Some(scene.textures.menu_background),
        0.0,
        0.0,
        scene.width,
        scene.height,
        Color::WHITE,
    );
    for (i, (label, _)) in MENU_ITEMS.iter().enumerate() {
        let r = menu_item_rect(scene.width, scene.height, i);
        draw_text(scene, list, label, r.x, r.y, Color::BLACK);
    }
}

pub fn draw_help(scene: &Scene, list: &mut DrawList) {
    list.reset(Color::WHITE);
    list.push_screen_rect(Some(scene.textures.help), 0.0, 0.0, scene.width, scene.height, Color::WHITE);
    draw_text(scene, list, HELP_TEXT, 50.0, scene.height - 50.0, Color::WHITE);
}

/// Background, then the player, then live enemies, then live bullets.
pub fn draw_game(scene: &Scene, list: &mut DrawList) {
    list.reset(GAME_CLEAR);
    let t = &scene.textures;
    scene.parallax.draw(t.background, scene.width, scene.height, list);
    scene.player.draw(t.player, list);
    for enemy in &scene.enemies {
        enemy.draw(t.enemy, list);
    }
    scene.bullets.draw(t.bullet, list);
}

/// The frozen game world under a quit prompt.
pub fn draw_paused(scene: &Scene, list: &mut DrawList) {
    draw_game(scene, list);
    let [x, y] = popup_origin(scene.width, scene.height);
    list.push_screen_rect(None, x, y, POPUP_SIZE[0], POPUP_SIZE[1], POPUP_FILL);
    draw_text(scene, list, QUIT_PROMPT, x + 50.0, y + 20.0, Color::WHITE);
    draw_text(scene, list, QUIT_OPTIONS, x + 50.0, y + 50.0, Color::WHITE);
}
