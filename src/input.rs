/// Frozen snapshot of the movement controls for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub float: bool,
    pub fast_fall: bool,
}

/// Control a physical key maps to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Left,
    Right,
    Jump,
    Float,
    FastFall,
}

impl Control {
    /// Map a `KeyboardEvent.code` value.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Control::Left),
            "ArrowRight" | "KeyD" => Some(Control::Right),
            "ArrowUp" | "KeyW" => Some(Control::Jump),
            "Space" => Some(Control::Float),
            "ArrowDown" | "KeyS" => Some(Control::FastFall),
            _ => None,
        }
    }
}

impl InputState {
    pub fn set(&mut self, control: Control, pressed: bool) {
        match control {
            Control::Left => self.left = pressed,
            Control::Right => self.right = pressed,
            Control::Jump => self.jump = pressed,
            Control::Float => self.float = pressed,
            Control::FastFall => self.fast_fall = pressed,
        }
    }

    /// Returns true when the code was a game control (caller should
    /// suppress the browser default).
    pub fn apply_key(&mut self, code: &str, pressed: bool) -> bool {
        match Control::from_code(code) {
            Some(c) => {
                self.set(c, pressed);
                true
            }
            None => false,
        }
    }

    pub fn horizontal(&self) -> f64 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}
