//! Keyboard input routing
//!
//! The host delivers raw key transitions through [`InputRouter::key_down`]
//! and [`InputRouter::key_up`]; tasks and scripts subscribe to "just
//! pressed" and held-repeat events. One-shot subscriptions are removed
//! after firing, which is what backs the write-once latch of a
//! wait-for-key task.

use choreo_core::{Latch, Task};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

type KeyCallback = Box<dyn FnMut()>;

struct Subscriber {
    callback: KeyCallback,
    once: bool,
}

type Subscribers = SmallVec<[Subscriber; 2]>;

#[derive(Clone, Copy, Default)]
struct KeyStatus {
    down: bool,
    held: bool,
}

/// Keyboard subscription manager
#[derive(Default)]
pub struct InputRouter {
    keys: FxHashMap<String, KeyStatus>,
    just_pressed: FxHashMap<String, Subscribers>,
    held: FxHashMap<String, Subscribers>,
    any_just_pressed: Subscribers,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key went down this instant (not a repeat).
    pub fn is_key_just_pressed(&self, key: &str) -> bool {
        self.keys
            .get(key)
            .map(|status| status.down && !status.held)
            .unwrap_or(false)
    }

    /// Key is currently down, freshly pressed or held.
    pub fn is_key_pressed(&self, key: &str) -> bool {
        self.keys
            .get(key)
            .map(|status| status.down || status.held)
            .unwrap_or(false)
    }

    /// Subscribe to the next fresh press of `key`.
    pub fn on_key_just_pressed(
        &mut self,
        key: impl Into<String>,
        callback: impl FnMut() + 'static,
        once: bool,
    ) {
        self.just_pressed.entry(key.into()).or_default().push(Subscriber {
            callback: Box::new(callback),
            once,
        });
    }

    /// Subscribe to held repeats of `key`.
    pub fn on_key_pressed(
        &mut self,
        key: impl Into<String>,
        callback: impl FnMut() + 'static,
        once: bool,
    ) {
        self.held.entry(key.into()).or_default().push(Subscriber {
            callback: Box::new(callback),
            once,
        });
    }

    /// Subscribe to the next fresh press of any key.
    pub fn on_any_key_just_pressed(&mut self, callback: impl FnMut() + 'static, once: bool) {
        self.any_just_pressed.push(Subscriber {
            callback: Box::new(callback),
            once,
        });
    }

    /// Host entry point for a key-down event.
    pub fn key_down(&mut self, key: &str) {
        if key.is_empty() {
            return;
        }
        let repeat = self.keys.get(key).map(|status| status.down).unwrap_or(false);
        if repeat {
            if let Some(status) = self.keys.get_mut(key) {
                status.held = true;
            }
            if let Some(subscribers) = self.held.get_mut(key) {
                fire(subscribers);
            }
        } else {
            self.keys.insert(
                key.to_string(),
                KeyStatus {
                    down: true,
                    held: false,
                },
            );
            fire(&mut self.any_just_pressed);
            if let Some(subscribers) = self.just_pressed.get_mut(key) {
                fire(subscribers);
            }
        }
    }

    /// Host entry point for a key-up event.
    pub fn key_up(&mut self, key: &str) {
        self.keys.insert(key.to_string(), KeyStatus::default());
    }

    /// Build a task that blocks until the next press of `key`, or of any
    /// key when `key` is `None`.
    ///
    /// The one-shot subscription is registered here, before the event can
    /// possibly fire; constructing the task after the press means the press
    /// is simply missed.
    pub fn wait_key(&mut self, key: Option<&str>) -> Task {
        let latch = Latch::new();
        let tripped = latch.clone();
        match key {
            Some(key) => self.on_key_just_pressed(key, move || tripped.set(), true),
            None => self.on_any_key_just_pressed(move || tripped.set(), true),
        }
        Task::wait_latch(latch)
    }
}

/// Invoke every subscriber in subscription order, dropping one-shots.
fn fire(subscribers: &mut Subscribers) {
    subscribers.retain(|subscriber| {
        (subscriber.callback)();
        !subscriber.once
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn key_status_tracks_press_hold_release() {
        let mut inputs = InputRouter::new();
        assert!(!inputs.is_key_pressed("a"));

        inputs.key_down("a");
        assert!(inputs.is_key_just_pressed("a"));
        assert!(inputs.is_key_pressed("a"));

        inputs.key_down("a"); // repeat
        assert!(!inputs.is_key_just_pressed("a"));
        assert!(inputs.is_key_pressed("a"));

        inputs.key_up("a");
        assert!(!inputs.is_key_pressed("a"));
    }

    #[test]
    fn one_shot_subscription_fires_once() {
        let count = Rc::new(Cell::new(0));
        let seen = count.clone();
        let mut inputs = InputRouter::new();
        inputs.on_key_just_pressed("x", move || seen.set(seen.get() + 1), true);

        inputs.key_down("x");
        inputs.key_up("x");
        inputs.key_down("x");
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn persistent_subscription_fires_every_press() {
        let count = Rc::new(Cell::new(0));
        let seen = count.clone();
        let mut inputs = InputRouter::new();
        inputs.on_key_just_pressed("x", move || seen.set(seen.get() + 1), false);

        inputs.key_down("x");
        inputs.key_up("x");
        inputs.key_down("x");
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn held_subscribers_fire_on_repeat_only() {
        let count = Rc::new(Cell::new(0));
        let seen = count.clone();
        let mut inputs = InputRouter::new();
        inputs.on_key_pressed("z", move || seen.set(seen.get() + 1), false);

        inputs.key_down("z");
        assert_eq!(count.get(), 0);
        inputs.key_down("z");
        inputs.key_down("z");
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn wait_key_task_completes_on_matching_press() {
        let mut inputs = InputRouter::new();
        let mut task = inputs.wait_key(Some("Enter"));

        task.update(1.0);
        assert!(!task.is_done());

        inputs.key_down("a");
        assert!(!task.is_done());

        inputs.key_down("Enter");
        task.update(1.0);
        assert!(task.is_done());
    }

    #[test]
    fn wait_any_key_task_completes_on_any_press() {
        let mut inputs = InputRouter::new();
        let task = inputs.wait_key(None);
        assert!(!task.is_done());
        inputs.key_down("q");
        assert!(task.is_done());
    }
}
