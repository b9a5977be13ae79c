/// Discrete input events an effect can react to.
///
/// Pointer movement is not an event: it is sampled into
/// [`PointerState`](super::pointer::PointerState) and read at render time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A click/tap at canvas coordinates (x, y).
    Click { x: f32, y: f32 },
    /// A key was pressed. `key_code` follows `KeyboardEvent.keyCode`.
    KeyDown { key_code: u32 },
    /// The viewport changed size.
    Resize { width: f32, height: f32 },
}

impl InputEvent {
    pub const KEY_ENTER: u32 = 13;
    pub const KEY_SPACE: u32 = 32;

    /// Click, Enter or Space: the "activate" gesture.
    pub fn is_activation(&self) -> bool {
        match self {
            InputEvent::Click { .. } => true,
            InputEvent::KeyDown { key_code } => {
                *key_code == Self::KEY_ENTER || *key_code == Self::KEY_SPACE
            }
            InputEvent::Resize { .. } => false,
        }
    }
}

/// A queue of input events.
/// Browser handlers push events; the runner drains them once per frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Clicks in arrival order.
    pub fn clicks(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.events.iter().filter_map(|e| match e {
            InputEvent::Click { x, y } => Some((*x, *y)),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<InputEvent> for InputQueue {
    fn from_iter<I: IntoIterator<Item = InputEvent>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Click { x: 10.0, y: 20.0 });
        q.push(InputEvent::KeyDown { key_code: 32 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn clicks_filter_other_events() {
        let q: InputQueue = [
            InputEvent::Resize { width: 800.0, height: 600.0 },
            InputEvent::Click { x: 1.0, y: 2.0 },
            InputEvent::KeyDown { key_code: 65 },
        ]
        .into_iter()
        .collect();
        assert_eq!(q.clicks().collect::<Vec<_>>(), vec![(1.0, 2.0)]);
    }

    #[test]
    fn activation_keys() {
        assert!(InputEvent::Click { x: 0.0, y: 0.0 }.is_activation());
        assert!(InputEvent::KeyDown { key_code: InputEvent::KEY_SPACE }.is_activation());
        assert!(InputEvent::KeyDown { key_code: InputEvent::KEY_ENTER }.is_activation());
        assert!(!InputEvent::KeyDown { key_code: 65 }.is_activation());
        assert!(!InputEvent::Resize { width: 1.0, height: 1.0 }.is_activation());
    }
}
