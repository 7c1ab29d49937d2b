use crate::input::Command;
use crate::renderer::draw::DrawList;

use super::Scene;
use super::screens;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneState {
    Landing,
    Menu,
    Help,
    Game,
    Paused,
}

impl SceneState {
    fn index(self) -> usize {
        self as usize
    }
}

/// Outcome of a command that the current state accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Goto(SceneState),
    /// Leave the program. Not a stored state; the host observes it.
    Quit,
}

/// Every accepted `(state, command)` pair. Anything else is a no-op.
#[rustfmt::skip]
pub const TRANSITIONS: &[(SceneState, Command, Transition)] = &[
    (SceneState::Landing, Command::Confirm, Transition::Goto(SceneState::Menu)),
    (SceneState::Menu,    Command::Start,   Transition::Goto(SceneState::Game)),
    (SceneState::Menu,    Command::Help,    Transition::Goto(SceneState::Help)),
    (SceneState::Menu,    Command::Exit,    Transition::Quit),
    (SceneState::Menu,    Command::Cancel,  Transition::Goto(SceneState::Landing)),
    (SceneState::Help,    Command::Back,    Transition::Goto(SceneState::Menu)),
    (SceneState::Game,    Command::Pause,   Transition::Goto(SceneState::Paused)),
    (SceneState::Paused,  Command::Confirm, Transition::Quit),
    (SceneState::Paused,  Command::Cancel,  Transition::Goto(SceneState::Game)),
    (SceneState::Paused,  Command::Pause,   Transition::Goto(SceneState::Game)),
];

/// Look up the transition for `command` in `state`.
pub fn on_command(state: SceneState, command: Command) -> Option<Transition> {
    TRANSITIONS
        .iter()
        .find(|(from, trigger, _)| *from == state && *trigger == command)
        .map(|&(_, _, transition)| transition)
}

// ── Dispatch ─────────────────────────────────────────────────────────────────

/// Per-state frame routines.
#[derive(Clone, Copy)]
pub struct StateHandlers {
    pub update: fn(&mut Scene, f32),
    pub draw: fn(&Scene, &mut DrawList),
}

/// Indexed by [`SceneState`] declaration order.
static DISPATCH: [StateHandlers; 5] = [
    StateHandlers { update: screens::update_idle, draw: screens::draw_landing },
    StateHandlers { update: screens::update_idle, draw: screens::draw_menu },
    StateHandlers { update: screens::update_idle, draw: screens::draw_help },
    StateHandlers { update: screens::update_game, draw: screens::draw_game },
    StateHandlers { update: screens::update_idle, draw: screens::draw_paused },
];

pub fn handlers(state: SceneState) -> &'static StateHandlers {
    &DISPATCH[state.index()]
}
