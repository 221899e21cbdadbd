use std::fmt;

use serde::{Deserialize, Serialize};

/// Editor interaction mode. Selects which entity kinds the engine works on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mode {
    /// Scene objects and groups.
    #[default]
    Object,
    /// Edit bones and bone groups of the active armature.
    EditArmature,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object => write!(f, "object"),
            Self::EditArmature => write!(f, "armature edit"),
        }
    }
}

/// Read-only view of host-managed session state.
pub trait HostSession {
    /// The editor's current mode.
    fn current_mode(&self) -> Mode;

    /// Name of the armature being edited. Only meaningful in
    /// [`Mode::EditArmature`].
    fn active_armature_name(&self) -> Option<&str>;
}

/// A plain session value for hosts that do not track their own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Current mode.
    pub mode: Mode,
    /// Armature being edited, if any.
    pub active_armature: Option<String>,
}

impl Session {
    /// A session in object mode.
    pub fn object_mode() -> Self {
        Self::default()
    }

    /// A session editing the named armature.
    pub fn edit_armature(armature: impl Into<String>) -> Self {
        Self {
            mode: Mode::EditArmature,
            active_armature: Some(armature.into()),
        }
    }
}

impl HostSession for Session {
    fn current_mode(&self) -> Mode {
        self.mode
    }

    fn active_armature_name(&self) -> Option<&str> {
        self.active_armature.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_session_is_object_mode() {
        let session = Session::default();
        assert_eq!(session.current_mode(), Mode::Object);
        assert!(session.active_armature_name().is_none());
    }

    #[test]
    fn edit_armature_session() {
        let session = Session::edit_armature("Arm");
        assert_eq!(session.current_mode(), Mode::EditArmature);
        assert_eq!(session.active_armature_name(), Some("Arm"));
    }
}
