use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{UnveilError, UnveilResult};

/// An edit bone of an armature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bone {
    /// Name of the bone, unique within its armature.
    pub name: String,
    /// Whether the bone is hidden in the viewport.
    #[serde(default)]
    pub hidden: bool,
    /// Whether the bone is selected.
    #[serde(default)]
    pub selected: bool,
    /// Name of the bone group this bone belongs to, if any.
    #[serde(default)]
    pub bone_group: Option<String>,
}

impl Bone {
    /// Create a visible, unselected bone with no group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hidden: false,
            selected: false,
            bone_group: None,
        }
    }

    /// Mark the bone as hidden.
    pub fn hide(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Assign the bone to a bone group.
    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.bone_group = Some(group.into());
        self
    }

    /// Returns true if the bone belongs to the named bone group.
    pub fn is_in_group(&self, group: &str) -> bool {
        self.bone_group.as_deref() == Some(group)
    }
}

/// A named bone group. Members are implicit: every bone whose `bone_group`
/// equals this name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoneGroup {
    /// Name of the bone group, unique within its armature.
    pub name: String,
}

impl BoneGroup {
    /// Create a bone group.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The edit representation of an armature: its bones, bone groups, and
/// active bone.
#[derive(Debug, Clone)]
pub struct Armature {
    /// Name of the armature, unique within the scene.
    pub name: String,
    bones: Vec<Bone>,
    bone_groups: Vec<BoneGroup>,
    active_bone: Option<String>,

    // Indexes
    bone_index: HashMap<String, usize>,
    group_index: HashMap<String, usize>,
}

impl Armature {
    /// Create an armature with no bones.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bones: Vec::new(),
            bone_groups: Vec::new(),
            active_bone: None,
            bone_index: HashMap::new(),
            group_index: HashMap::new(),
        }
    }

    /// Add a bone. Fails if a bone with the same name already exists.
    pub fn add_bone(&mut self, bone: Bone) -> UnveilResult<()> {
        if self.bone_index.contains_key(&bone.name) {
            return Err(UnveilError::duplicate("bone", bone.name));
        }
        self.bone_index.insert(bone.name.clone(), self.bones.len());
        self.bones.push(bone);
        Ok(())
    }

    /// Add a bone group. Fails if a group with the same name already exists.
    pub fn add_bone_group(&mut self, group: BoneGroup) -> UnveilResult<()> {
        if self.group_index.contains_key(&group.name) {
            return Err(UnveilError::duplicate("bone group", group.name));
        }
        self.group_index
            .insert(group.name.clone(), self.bone_groups.len());
        self.bone_groups.push(group);
        Ok(())
    }

    /// Builder form of [`add_bone`](Self::add_bone).
    pub fn with_bone(mut self, bone: Bone) -> UnveilResult<Self> {
        self.add_bone(bone)?;
        Ok(self)
    }

    /// Builder form of [`add_bone_group`](Self::add_bone_group).
    pub fn with_bone_group(mut self, group: BoneGroup) -> UnveilResult<Self> {
        self.add_bone_group(group)?;
        Ok(self)
    }

    /// All edit bones, in armature order.
    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    /// All bone groups, in armature order.
    pub fn bone_groups(&self) -> &[BoneGroup] {
        &self.bone_groups
    }

    /// Look up a bone by name.
    pub fn bone(&self, name: &str) -> Option<&Bone> {
        self.bone_index.get(name).map(|&i| &self.bones[i])
    }

    /// Position of a bone in armature order.
    pub fn bone_position(&self, name: &str) -> Option<usize> {
        self.bone_index.get(name).copied()
    }

    pub(crate) fn bone_at_mut(&mut self, index: usize) -> &mut Bone {
        &mut self.bones[index]
    }

    /// Look up a bone group by name.
    pub fn bone_group(&self, name: &str) -> Option<&BoneGroup> {
        self.group_index.get(name).map(|&i| &self.bone_groups[i])
    }

    /// Name of the active bone, if any.
    pub fn active_bone(&self) -> Option<&str> {
        self.active_bone.as_deref()
    }

    /// Set the active bone. Fails if the bone does not exist.
    pub fn set_active_bone(&mut self, name: &str) -> UnveilResult<()> {
        if !self.bone_index.contains_key(name) {
            return Err(UnveilError::not_found("bone", name));
        }
        self.active_bone = Some(name.to_string());
        Ok(())
    }

    /// Native bulk unhide: reveal and select every hidden bone. The active
    /// bone is left unchanged. Returns the names of revealed bones.
    pub fn unhide_all_bones(&mut self) -> Vec<String> {
        self.bones
            .iter_mut()
            .filter(|b| b.hidden)
            .map(|b| {
                b.hidden = false;
                b.selected = true;
                b.name.clone()
            })
            .collect()
    }
}
