/// Discrete input actions and how they act on a mesh
use crate::geometry::Mesh;

/// One input request, already decoded from whatever device produced it.
///
/// Momentum deltas are in degrees per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Stop all motion and return to the initial pose.
    ResetAll,
    Pitch(f32),
    Roll(f32),
    Yaw(f32),
    /// Stop all motion, keeping the current pose.
    Stop,
    Quit,
}

impl Mesh {
    /// Apply an input action. Returns `false` for [`Action::Quit`], which
    /// is left to the caller.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::ResetAll => self.reset(),
            Action::Pitch(deg) => self.add_pitch(deg),
            Action::Roll(deg) => self.add_roll(deg),
            Action::Yaw(deg) => self.add_yaw(deg),
            Action::Stop => self.stop(),
            Action::Quit => return false,
        }
        true
    }
}
