//! Input sampling
//!
//! Key events arrive whenever the platform delivers them; `sample` folds the
//! current key set into one per-frame snapshot. Held keys give a normalized
//! movement axis, while ultimate and pause report only on the frame the key
//! first went down.

use std::collections::HashSet;

use crate::config::ControlsConfig;

/// One frame of player intent, consumed by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputSnapshot {
    /// Normalized horizontal axis in [-1, 1].
    pub move_x: f32,
    /// Normalized vertical axis in [-1, 1]; positive is down.
    pub move_y: f32,
    pub ultimate_pressed: bool,
    pub pause_pressed: bool,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self {
            move_x: 0.0,
            move_y: 0.0,
            ultimate_pressed: false,
            pause_pressed: false,
        }
    }
}

/// Tracks held keys plus edge-triggered presses between samples.
#[derive(Debug, Default)]
pub struct InputState {
    bindings: Bindings,
    pressed_keys: HashSet<String>,
    pressed_this_frame: HashSet<String>,
}

#[derive(Debug, Clone)]
struct Bindings {
    up: String,
    down: String,
    left: String,
    right: String,
    ultimate: String,
    pause: String,
}

impl Default for Bindings {
    fn default() -> Self {
        Self {
            up: "ArrowUp".into(),
            down: "ArrowDown".into(),
            left: "ArrowLeft".into(),
            right: "ArrowRight".into(),
            ultimate: "KeyZ".into(),
            pause: "KeyX".into(),
        }
    }
}

impl InputState {
    pub fn new(controls: &ControlsConfig) -> Self {
        Self {
            bindings: Bindings {
                up: controls.up.clone(),
                down: controls.down.clone(),
                left: controls.left.clone(),
                right: controls.right.clone(),
                ultimate: controls.ultimate.clone(),
                pause: controls.pause.clone(),
            },
            pressed_keys: HashSet::new(),
            pressed_this_frame: HashSet::new(),
        }
    }

    /// Auto-repeat from the platform arrives as repeated key-down events;
    /// only the first counts as a press.
    pub fn key_down(&mut self, code: &str) {
        if !self.pressed_keys.contains(code) {
            self.pressed_this_frame.insert(code.to_string());
        }
        self.pressed_keys.insert(code.to_string());
    }

    pub fn key_up(&mut self, code: &str) {
        self.pressed_keys.remove(code);
    }

    /// Fold current key state into a snapshot and clear the edge set.
    pub fn sample(&mut self) -> InputSnapshot {
        let horizontal = self.axis(&self.bindings.right) - self.axis(&self.bindings.left);
        let vertical = self.axis(&self.bindings.down) - self.axis(&self.bindings.up);

        let magnitude = horizontal.hypot(vertical);
        let (move_x, move_y) = if magnitude > 0.0 {
            (horizontal / magnitude, vertical / magnitude)
        } else {
            (0.0, 0.0)
        };

        let snapshot = InputSnapshot {
            move_x,
            move_y,
            ultimate_pressed: self.pressed_this_frame.contains(&self.bindings.ultimate),
            pause_pressed: self.pressed_this_frame.contains(&self.bindings.pause),
        };

        self.pressed_this_frame.clear();
        snapshot
    }

    pub fn clear(&mut self) {
        self.pressed_keys.clear();
        self.pressed_this_frame.clear();
    }

    fn axis(&self, code: &str) -> f32 {
        if self.pressed_keys.contains(code) {
            1.0
        } else {
            0.0
        }
    }
}
