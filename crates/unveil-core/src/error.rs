use crate::session::Mode;

/// Alias for `Result<T, UnveilError>`.
pub type UnveilResult<T> = Result<T, UnveilError>;

/// Errors that can occur when querying or revealing hidden entities.
#[derive(Debug, thiserror::Error)]
pub enum UnveilError {
    /// A name did not resolve to an existing object, group, armature, bone,
    /// or bone group. Also raised when acting on a stale catalogue.
    #[error("{what} not found: \"{name}\"")]
    NotFound {
        /// What kind of record was looked up.
        what: &'static str,
        /// The unresolved name.
        name: String,
    },

    /// A catalogue id matched no entry, so its kind cannot be determined.
    #[error("cannot determine kind of \"{id}\": no catalogue entry matches")]
    AmbiguousKind {
        /// The requested catalogue id.
        id: String,
    },

    /// The selector does not apply to the session's current mode.
    #[error("selector requires {expected} mode, but the editor is in {actual} mode")]
    WrongMode {
        /// Mode the selector operates in.
        expected: Mode,
        /// Mode the session is currently in.
        actual: Mode,
    },

    /// Armature-edit mode is active but no armature is being edited.
    #[error("no active armature in armature edit mode")]
    NoActiveArmature,

    /// A name is already taken within its namespace.
    #[error("{what} already exists: \"{name}\"")]
    DuplicateName {
        /// What kind of record was added.
        what: &'static str,
        /// The duplicated name.
        name: String,
    },

    /// A scene snapshot document could not be parsed.
    #[error("invalid scene snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

impl UnveilError {
    pub(crate) fn not_found(what: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            what,
            name: name.into(),
        }
    }

    pub(crate) fn duplicate(what: &'static str, name: impl Into<String>) -> Self {
        Self::DuplicateName {
            what,
            name: name.into(),
        }
    }

    /// Returns true if this error comes from a name that failed to resolve.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
