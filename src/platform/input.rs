//! Keyboard state
//!
//! Key events flip entries in a held-key set keyed by `KeyboardEvent.code`.
//! The frame loop samples the set once per frame through `KeyBindings`.

use std::collections::HashSet;

use crate::sim::RoundInput;

/// Keys currently held down
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashSet<String>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, code: &str) {
        self.held.insert(code.to_string());
    }

    pub fn release(&mut self, code: &str) {
        self.held.remove(code);
    }

    /// Forget everything (window lost focus, so key-ups will never arrive)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, code: &str) -> bool {
        self.held.contains(code)
    }
}

/// Which key codes drive which action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub repair: Vec<String>,
    /// Toggles the demo bot
    pub autopilot: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: vec!["ArrowLeft".into(), "KeyA".into()],
            right: vec!["ArrowRight".into(), "KeyD".into()],
            repair: vec!["Space".into()],
            autopilot: "KeyI".into(),
        }
    }
}

impl KeyBindings {
    /// Snapshot the held keys into a frame input
    pub fn sample(&self, keys: &KeyState) -> RoundInput {
        let any = |codes: &[String]| codes.iter().any(|c| keys.is_held(c));
        RoundInput {
            left: any(&self.left),
            right: any(&self.right),
            repair: any(&self.repair),
        }
    }

    /// True for codes the game consumes (the page should not scroll on them)
    pub fn is_bound(&self, code: &str) -> bool {
        self.left
            .iter()
            .chain(&self.right)
            .chain(&self.repair)
            .any(|c| c == code)
            || self.autopilot == code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut keys = KeyState::new();
        keys.press("ArrowLeft");
        assert!(keys.is_held("ArrowLeft"));
        keys.release("ArrowLeft");
        assert!(!keys.is_held("ArrowLeft"));
    }

    #[test]
    fn test_sample_maps_default_bindings() {
        let bindings = KeyBindings::default();
        let mut keys = KeyState::new();
        assert_eq!(bindings.sample(&keys), RoundInput::default());

        keys.press("ArrowRight");
        keys.press("Space");
        let input = bindings.sample(&keys);
        assert!(input.right && input.repair && !input.left);

        keys.press("KeyA");
        assert!(bindings.sample(&keys).left);
    }

    #[test]
    fn test_clear_drops_held_keys() {
        let bindings = KeyBindings::default();
        let mut keys = KeyState::new();
        keys.press("Space");
        keys.press("KeyD");
        keys.clear();
        assert_eq!(bindings.sample(&keys), RoundInput::default());
    }

    #[test]
    fn test_unbound_keys_are_ignored() {
        let bindings = KeyBindings::default();
        let mut keys = KeyState::new();
        keys.press("KeyQ");
        assert_eq!(bindings.sample(&keys), RoundInput::default());
        assert!(!bindings.is_bound("KeyQ"));
        assert!(bindings.is_bound("Space"));
        assert!(bindings.is_bound("KeyI"));
    }
}
