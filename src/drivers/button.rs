//! Tick-driven debouncers for the front-panel buttons.
//!
//! ## Hardware
//!
//! Both buttons are active-low momentary switches with pull-ups.  The panel
//! adapter converts the pin level into `pressed: bool`; the state machines
//! here only see that level and the monotonic time, once per control tick.
//! Nothing in this module ever blocks.
//!
//! ## Behaviour
//!
//! | Button  | Accepts a press when                                    |
//! |---------|---------------------------------------------------------|
//! | Start   | level held for the settle interval; re-arms on release  |
//! | Switch  | released → pressed edge, outside the debounce window    |

/// Button events emitted after debouncing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    Pressed,
}

/// Internal state machine for the start button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StartState {
    /// Released and ready for a press.
    Armed,
    /// Level went active; waiting for it to stay active through the settle
    /// interval.
    Confirming { since_ms: u32 },
    /// Press accepted; nothing more until the button is let go.
    Held,
}

/// Settle-and-confirm debouncer for the start button.
///
/// A press is reported once, after the level has stayed asserted for
/// `settle_ms`.  A bounce back to released during the settle window
/// discards the press.  After reporting, the button must be released
/// before another press can register.
pub struct StartButton {
    settle_ms: u32,
    state: StartState,
}

impl StartButton {
    pub fn new(settle_ms: u32) -> Self {
        Self {
            settle_ms,
            state: StartState::Armed,
        }
    }

    /// Call from the main loop at each control tick.
    pub fn tick(&mut self, pressed: bool, now_ms: u32) -> Option<ButtonEvent> {
        match self.state {
            StartState::Armed => {
                if pressed {
                    self.state = StartState::Confirming { since_ms: now_ms };
                }
                None
            }

            StartState::Confirming { since_ms } => {
                if !pressed {
                    self.state = StartState::Armed;
                    return None;
                }
                if now_ms.wrapping_sub(since_ms) >= self.settle_ms {
                    self.state = StartState::Held;
                    return Some(ButtonEvent::Pressed);
                }
                None
            }

            StartState::Held => {
                if !pressed {
                    self.state = StartState::Armed;
                }
                None
            }
        }
    }
}

/// Press-edge detector for the station-switch button.
///
/// Reports the released → pressed transition only.  Edges closer than
/// `debounce_ms` to the previous accepted edge are treated as contact
/// bounce and ignored.
pub struct EdgeButton {
    debounce_ms: u32,
    was_pressed: bool,
    last_edge_ms: Option<u32>,
}

impl EdgeButton {
    pub fn new(debounce_ms: u32) -> Self {
        Self {
            debounce_ms,
            was_pressed: false,
            last_edge_ms: None,
        }
    }

    /// Call from the main loop at each control tick.
    pub fn tick(&mut self, pressed: bool, now_ms: u32) -> Option<ButtonEvent> {
        let edge = pressed && !self.was_pressed;
        self.was_pressed = pressed;
        if !edge {
            return None;
        }

        let settled = self
            .last_edge_ms
            .is_none_or(|last| now_ms.wrapping_sub(last) >= self.debounce_ms);
        if !settled {
            return None;
        }

        self.last_edge_ms = Some(now_ms);
        Some(ButtonEvent::Pressed)
    }
}
