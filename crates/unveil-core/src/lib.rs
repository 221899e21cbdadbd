//! Selective reveal for hidden scene content.
//!
//! The crate answers "what is hidden right now?" for a host scene graph and
//! reveals exactly the requested part of it: one object, the hidden members
//! of a group, every hidden object of a kind, or, while editing an armature,
//! one bone or the hidden bones of a bone group.
//!
//! ```
//! use unveil_core::{ObjectKind, Scene, SceneObject, Selector, Session};
//!
//! let mut scene = Scene::new("Shot");
//! scene.add_object(SceneObject::hidden("Cube", ObjectKind::Mesh))?;
//!
//! let session = Session::object_mode();
//! let catalogue = unveil_core::list_search_catalogue(&scene, &session)?;
//! let selector = catalogue.selector_for("Cube")?;
//! unveil_core::reveal(&mut scene, &session, &selector)?;
//!
//! assert!(!scene.object("Cube").unwrap().hidden);
//! assert_eq!(selector, Selector::object("Cube"));
//! # Ok::<(), unveil_core::UnveilError>(())
//! ```

/// Armature edit bones and bone groups.
pub mod armature;
/// Flat, searchable catalogue of hidden items. Never refreshed after it is built.
pub mod catalogue;
/// Reveal and search tunables.
pub mod config;
/// Error types used throughout the crate.
pub mod error;
/// Visibility queries over objects and bones. Every query re-scans the scene.
pub mod index;
/// Scene objects, object kinds, and groups.
pub mod object;
/// Selectors and the reveal operation: resolve every name first, then apply.
pub mod reveal;
/// The host scene graph.
pub mod scene;
/// Editor mode and active armature.
pub mod session;

/// Re-export armature types.
pub use armature::{Armature, Bone, BoneGroup};
/// Re-export catalogue types.
pub use catalogue::{Catalogue, CatalogueEntry, KindTag};
/// Re-export configuration.
pub use config::UnveilConfig;
/// Re-export error types.
pub use error::{UnveilError, UnveilResult};
/// Re-export visibility queries.
pub use index::{
    HiddenContainer, HiddenEntity, Pipeline, VisibilityIndex, list_hidden_containers,
    list_hidden_entities, list_hidden_types, list_search_catalogue,
};
/// Re-export object types.
pub use object::{Group, ObjectKind, SceneObject};
/// Re-export reveal operations.
pub use reveal::{RevealReport, Selector, reveal, reveal_with};
/// Re-export the scene graph.
pub use scene::Scene;
/// Re-export session types.
pub use session::{HostSession, Mode, Session};
