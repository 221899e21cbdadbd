use std::fmt;

use serde::{Deserialize, Serialize};

/// The type of a scene object. Extensible via `Custom(String)` for host types
/// the engine does not know about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ObjectKind {
    /// Polygon mesh.
    Mesh,
    /// Bezier or NURBS curve.
    Curve,
    /// NURBS surface.
    Surface,
    /// Metaball.
    Meta,
    /// Text object.
    Font,
    /// Skeleton made of bones.
    Armature,
    /// Deformation lattice.
    Lattice,
    /// Empty transform helper.
    Empty,
    /// Camera.
    Camera,
    /// Light source.
    Lamp,
    /// Sound emitter.
    Speaker,
    /// A host-defined type not covered by the built-in kinds.
    Custom(String),
}

impl ObjectKind {
    /// Returns the host's upper-case type tag (`"MESH"`, `"LAMP"`, ...).
    pub fn as_tag(&self) -> &str {
        match self {
            Self::Mesh => "MESH",
            Self::Curve => "CURVE",
            Self::Surface => "SURFACE",
            Self::Meta => "META",
            Self::Font => "FONT",
            Self::Armature => "ARMATURE",
            Self::Lattice => "LATTICE",
            Self::Empty => "EMPTY",
            Self::Camera => "CAMERA",
            Self::Lamp => "LAMP",
            Self::Speaker => "SPEAKER",
            Self::Custom(s) => s.as_str(),
        }
    }

    /// Parse a host type tag. Matching is case-insensitive; unknown tags
    /// become `Custom` with the tag kept as given.
    pub fn parse(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "MESH" => Self::Mesh,
            "CURVE" => Self::Curve,
            "SURFACE" => Self::Surface,
            "META" => Self::Meta,
            "FONT" => Self::Font,
            "ARMATURE" => Self::Armature,
            "LATTICE" => Self::Lattice,
            "EMPTY" => Self::Empty,
            "CAMERA" => Self::Camera,
            "LAMP" | "LIGHT" => Self::Lamp,
            "SPEAKER" => Self::Speaker,
            _ => Self::Custom(s.to_string()),
        }
    }
}

impl From<String> for ObjectKind {
    fn from(tag: String) -> Self {
        Self::parse(&tag)
    }
}

impl From<ObjectKind> for String {
    fn from(kind: ObjectKind) -> Self {
        match kind {
            ObjectKind::Custom(tag) => tag,
            other => other.as_tag().to_string(),
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

/// An object in the scene. Only its visibility and selection flags are ever
/// changed by the reveal engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    /// Name of the object, unique within the scene.
    pub name: String,
    /// The object's type.
    pub kind: ObjectKind,
    /// Whether the object is hidden in the viewport.
    #[serde(default)]
    pub hidden: bool,
    /// Whether the object is selected.
    #[serde(default)]
    pub selected: bool,
}

impl SceneObject {
    /// Create a visible, unselected object.
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
            hidden: false,
            selected: false,
        }
    }

    /// Create a hidden, unselected object.
    pub fn hidden(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            hidden: true,
            ..Self::new(name, kind)
        }
    }
}

/// A named collection of scene objects. Membership is by object name; the
/// group does not own its members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Name of the group, unique within the scene.
    pub name: String,
    /// Names of member objects, in insertion order.
    #[serde(default)]
    pub objects: Vec<String>,
}

impl Group {
    /// Create an empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: Vec::new(),
        }
    }

    /// Add a member by name. Adding the same name twice has no effect.
    pub fn with_member(mut self, object: impl Into<String>) -> Self {
        let object = object.into();
        if !self.contains(&object) {
            self.objects.push(object);
        }
        self
    }

    /// Returns true if the named object is a member.
    pub fn contains(&self, object: &str) -> bool {
        self.objects.iter().any(|m| m == object)
    }
}
