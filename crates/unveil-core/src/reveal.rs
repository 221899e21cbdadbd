use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalogue::KindTag;
use crate::config::UnveilConfig;
use crate::error::{UnveilError, UnveilResult};
use crate::object::ObjectKind;
use crate::scene::Scene;
use crate::session::{HostSession, Mode};

/// Which entities to reveal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "selector", rename_all = "snake_case")]
pub enum Selector {
    /// One scene object.
    SingleObject {
        /// Object name.
        name: String,
    },
    /// Hidden members of a group.
    Group {
        /// Group name.
        name: String,
    },
    /// One edit bone. Also becomes the armature's active bone.
    SingleBone {
        /// Armature name.
        armature: String,
        /// Bone name.
        bone: String,
    },
    /// Hidden bones of a bone group.
    BoneGroup {
        /// Armature name.
        armature: String,
        /// Bone group name.
        group: String,
    },
    /// Every hidden object of one kind.
    AllOfType {
        /// Object kind.
        kind: ObjectKind,
    },
    /// Everything hidden in the current mode, via the host's bulk unhide.
    RevealAll,
}

impl Selector {
    /// Select one object by name.
    pub fn object(name: impl Into<String>) -> Self {
        Self::SingleObject { name: name.into() }
    }

    /// Select the hidden members of a group.
    pub fn group(name: impl Into<String>) -> Self {
        Self::Group { name: name.into() }
    }

    /// Select one bone of an armature.
    pub fn bone(armature: impl Into<String>, bone: impl Into<String>) -> Self {
        Self::SingleBone {
            armature: armature.into(),
            bone: bone.into(),
        }
    }

    /// Select the hidden bones of a bone group.
    pub fn bone_group(armature: impl Into<String>, group: impl Into<String>) -> Self {
        Self::BoneGroup {
            armature: armature.into(),
            group: group.into(),
        }
    }

    /// Select every hidden object of a kind.
    pub fn all_of_type(kind: ObjectKind) -> Self {
        Self::AllOfType { kind }
    }

    /// Build the selector a catalogue entry stands for. Bone and bone group
    /// tags need the armature the catalogue was built against.
    pub fn from_tag(kind: KindTag, name: &str, armature: Option<&str>) -> UnveilResult<Self> {
        match kind {
            KindTag::Object => Ok(Self::object(name)),
            KindTag::Group => Ok(Self::group(name)),
            KindTag::Bone => {
                let armature = armature.ok_or(UnveilError::NoActiveArmature)?;
                Ok(Self::bone(armature, name))
            }
            KindTag::BoneGroup => {
                let armature = armature.ok_or(UnveilError::NoActiveArmature)?;
                Ok(Self::bone_group(armature, name))
            }
        }
    }

    /// The mode this selector operates in. `None` for [`Selector::RevealAll`],
    /// which follows the session.
    pub fn mode(&self) -> Option<Mode> {
        match self {
            Self::SingleObject { .. } | Self::Group { .. } | Self::AllOfType { .. } => {
                Some(Mode::Object)
            }
            Self::SingleBone { .. } | Self::BoneGroup { .. } => Some(Mode::EditArmature),
            Self::RevealAll => None,
        }
    }

    /// Resolve the selector against the scene without changing anything.
    pub fn resolve(&self, scene: &Scene) -> UnveilResult<Resolved> {
        match self {
            Self::SingleObject { name } => {
                let index = scene
                    .object_position(name)
                    .ok_or_else(|| UnveilError::not_found("object", name.as_str()))?;
                Ok(Resolved::Objects(vec![index]))
            }
            Self::Group { name } => {
                let group = scene
                    .group(name)
                    .ok_or_else(|| UnveilError::not_found("group", name.as_str()))?;
                let members: HashSet<&str> = group.objects.iter().map(String::as_str).collect();
                for dangling in members.iter().filter(|m| scene.object(m).is_none()) {
                    log::debug!("group \"{name}\" member \"{dangling}\" is not in the scene");
                }
                let indices = scene
                    .objects()
                    .iter()
                    .enumerate()
                    .filter(|(_, o)| o.hidden && members.contains(o.name.as_str()))
                    .map(|(i, _)| i)
                    .collect();
                Ok(Resolved::Objects(indices))
            }
            Self::SingleBone { armature, bone } => {
                let arm = scene
                    .armature(armature)
                    .ok_or_else(|| UnveilError::not_found("armature", armature.as_str()))?;
                let index = arm
                    .bone_position(bone)
                    .ok_or_else(|| UnveilError::not_found("bone", bone.as_str()))?;
                Ok(Resolved::Bones {
                    armature: armature.clone(),
                    indices: vec![index],
                })
            }
            Self::BoneGroup { armature, group } => {
                let arm = scene
                    .armature(armature)
                    .ok_or_else(|| UnveilError::not_found("armature", armature.as_str()))?;
                if arm.bone_group(group).is_none() {
                    return Err(UnveilError::not_found("bone group", group.as_str()));
                }
                let indices = arm
                    .bones()
                    .iter()
                    .enumerate()
                    .filter(|(_, b)| b.hidden && b.is_in_group(group))
                    .map(|(i, _)| i)
                    .collect();
                Ok(Resolved::Bones {
                    armature: armature.clone(),
                    indices,
                })
            }
            Self::AllOfType { kind } => {
                let indices = scene
                    .objects()
                    .iter()
                    .enumerate()
                    .filter(|(_, o)| o.hidden && o.kind == *kind)
                    .map(|(i, _)| i)
                    .collect();
                Ok(Resolved::Objects(indices))
            }
            Self::RevealAll => Ok(Resolved::Everything),
        }
    }
}

/// The entities a selector resolved to, as positions in scene or armature
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// Positions in the scene's object list.
    Objects(Vec<usize>),
    /// Positions in one armature's bone list.
    Bones {
        /// Armature name.
        armature: String,
        /// Bone positions.
        indices: Vec<usize>,
    },
    /// Every hidden entity of the current mode.
    Everything,
}

impl Resolved {
    /// Returns true if the selector resolved to no specific entity.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Objects(indices) | Self::Bones { indices, .. } => indices.is_empty(),
            Self::Everything => false,
        }
    }
}

/// What a reveal changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RevealReport {
    /// Entities whose hidden flag was cleared by this reveal.
    pub revealed: Vec<String>,
    /// Every entity the selector resolved to, in visiting order.
    pub touched: Vec<String>,
    /// The active object or bone after the reveal, if it was updated.
    pub active: Option<String>,
}

impl RevealReport {
    /// Returns true if no hidden flag changed.
    pub fn is_noop(&self) -> bool {
        self.revealed.is_empty()
    }
}

/// Reveal with the default configuration.
pub fn reveal(
    scene: &mut Scene,
    session: &impl HostSession,
    selector: &Selector,
) -> UnveilResult<RevealReport> {
    reveal_with(scene, session, selector, &UnveilConfig::default())
}

/// Reveal the entities `selector` resolves to.
///
/// Fails with `WrongMode` when the selector belongs to the other mode, and
/// with `NotFound` when a name does not resolve. On error nothing changes.
pub fn reveal_with(
    scene: &mut Scene,
    session: &impl HostSession,
    selector: &Selector,
    config: &UnveilConfig,
) -> UnveilResult<RevealReport> {
    let actual = session.current_mode();
    if let Some(expected) = selector.mode()
        && expected != actual
    {
        return Err(UnveilError::WrongMode { expected, actual });
    }

    let resolved = selector.resolve(scene).inspect_err(|e| {
        log::warn!("reveal {selector:?} failed: {e}");
    })?;

    let report = match resolved {
        Resolved::Objects(indices) => reveal_objects(scene, &indices, config)?,
        Resolved::Bones { armature, indices } => {
            reveal_bones(scene, &armature, &indices, config)?
        }
        Resolved::Everything => reveal_everything(scene, session)?,
    };

    log::debug!(
        "reveal {selector:?}: {} touched, {} revealed",
        report.touched.len(),
        report.revealed.len()
    );
    Ok(report)
}

fn reveal_objects(
    scene: &mut Scene,
    indices: &[usize],
    config: &UnveilConfig,
) -> UnveilResult<RevealReport> {
    let mut report = RevealReport::default();
    for &i in indices {
        let object = scene.object_at_mut(i);
        if object.hidden {
            object.hidden = false;
            if config.select_revealed {
                object.selected = true;
            }
            report.revealed.push(object.name.clone());
        }
        report.touched.push(object.name.clone());
    }
    if config.update_active
        && let Some(last) = report.touched.last()
    {
        scene.set_active_object(last)?;
        report.active = Some(last.clone());
    }
    Ok(report)
}

fn reveal_bones(
    scene: &mut Scene,
    armature: &str,
    indices: &[usize],
    config: &UnveilConfig,
) -> UnveilResult<RevealReport> {
    let arm = scene
        .armature_mut(armature)
        .ok_or_else(|| UnveilError::not_found("armature", armature))?;
    let mut report = RevealReport::default();
    for &i in indices {
        let bone = arm.bone_at_mut(i);
        if bone.hidden {
            bone.hidden = false;
            if config.select_revealed {
                bone.selected = true;
            }
            report.revealed.push(bone.name.clone());
        }
        report.touched.push(bone.name.clone());
    }
    if config.update_active
        && let Some(last) = report.touched.last()
    {
        arm.set_active_bone(last)?;
        report.active = Some(last.clone());
    }
    Ok(report)
}

// Delegates to the host's bulk unhide, which leaves the active pointer alone.
fn reveal_everything(scene: &mut Scene, session: &impl HostSession) -> UnveilResult<RevealReport> {
    let revealed = match session.current_mode() {
        Mode::Object => scene.unhide_all_objects(),
        Mode::EditArmature => {
            let name = session
                .active_armature_name()
                .ok_or(UnveilError::NoActiveArmature)?;
            scene
                .armature_mut(name)
                .ok_or_else(|| UnveilError::not_found("armature", name))?
                .unhide_all_bones()
        }
    };
    Ok(RevealReport {
        touched: revealed.clone(),
        revealed,
        active: None,
    })
}
