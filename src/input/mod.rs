use std::collections::{HashMap, HashSet};
use std::hash::Hash;

pub use winit::keyboard::KeyCode;

/// The four external signals the scene consumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowMessage {
    Resize { width: u32, height: u32 },
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    /// Primary-button click at a position in window pixels.
    Click { x: f32, y: f32 },
}

/// Logical commands issued by key bindings and menu clicks.
///
/// Declaration order is the order [`ActionMap::actions_for`] reports
/// commands bound to the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Command {
    Confirm,
    Cancel,
    Start,
    Help,
    Exit,
    Back,
    Pause,
    Fire,
    WalkLeft,
    WalkRight,
}

/// Raw keyboard and pointer state tracked by the host between events.
#[derive(Debug, Default)]
pub struct InputState {
    pub keys_held: HashSet<KeyCode>,
    pub mouse_pos: [f32; 2],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns `false` for auto-repeats of a key that is
    /// already held.
    pub fn press(&mut self, key: KeyCode) -> bool {
        self.keys_held.insert(key)
    }

    pub fn release(&mut self, key: KeyCode) {
        self.keys_held.remove(&key);
    }
}

/// Maps logical actions to one or more keys.
#[derive(Debug, Clone)]
pub struct ActionMap<A: Hash + Eq + Copy> {
    bindings: HashMap<A, Vec<KeyCode>>,
}

impl<A: Hash + Eq + Copy> ActionMap<A> {
    pub fn new() -> Self {
        Self { bindings: HashMap::new() }
    }

    pub fn bind(&mut self, action: A, key: KeyCode) {
        self.bindings.entry(action).or_default().push(key);
    }

    /// Every action bound to `key`, in the action type's order.
    pub fn actions_for(&self, key: KeyCode) -> Vec<A>
    where
        A: Ord,
    {
        let mut actions: Vec<A> = self
            .bindings
            .iter()
            .filter(|(_, keys)| keys.contains(&key))
            .map(|(action, _)| *action)
            .collect();
        actions.sort();
        actions
    }
}

impl<A: Hash + Eq + Copy> Default for ActionMap<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// The fixed key layout of the game.
pub fn default_bindings() -> ActionMap<Command> {
    let mut map = ActionMap::new();
    map.bind(Command::Confirm, KeyCode::Enter);
    map.bind(Command::Confirm, KeyCode::NumpadEnter);
    map.bind(Command::Cancel, KeyCode::Escape);
    map.bind(Command::Back, KeyCode::Escape);
    map.bind(Command::Back, KeyCode::KeyM);
    map.bind(Command::Pause, KeyCode::Escape);
    map.bind(Command::Pause, KeyCode::KeyP);
    map.bind(Command::Start, KeyCode::KeyN);
    map.bind(Command::Help, KeyCode::KeyH);
    map.bind(Command::Exit, KeyCode::KeyE);
    map.bind(Command::Fire, KeyCode::Space);
    map.bind(Command::WalkLeft, KeyCode::ArrowLeft);
    map.bind(Command::WalkRight, KeyCode::ArrowRight);
    map
}
