use std::collections::HashMap;

use serde::Deserialize;

use crate::armature::{Armature, Bone, BoneGroup};
use crate::error::{UnveilError, UnveilResult};
use crate::object::{Group, SceneObject};

/// The host scene graph: objects in native order, groups, and the edit
/// representations of armatures.
///
/// The scene owns every entity. The visibility index only reads it, and the
/// reveal engine only flips `hidden`/`selected` flags and the active
/// pointers.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Name of the scene.
    pub name: String,
    objects: Vec<SceneObject>,
    groups: Vec<Group>,
    armatures: Vec<Armature>,
    active_object: Option<String>,

    // Indexes
    object_index: HashMap<String, usize>,
    group_index: HashMap<String, usize>,
    armature_index: HashMap<String, usize>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Build a scene from a JSON snapshot of host state.
    ///
    /// ```json
    /// {
    ///   "name": "Scene",
    ///   "objects": [{ "name": "Cube", "kind": "MESH", "hidden": true }],
    ///   "groups": [{ "name": "G1", "objects": ["Cube"] }],
    ///   "armatures": [{ "name": "Arm", "bones": [{ "name": "b1", "bone_group": "BG1" }],
    ///                   "bone_groups": [{ "name": "BG1" }] }]
    /// }
    /// ```
    pub fn from_json(json: &str) -> UnveilResult<Self> {
        let snapshot: SceneSnapshot = serde_json::from_str(json)?;
        snapshot.into_scene()
    }

    // -----------------------------------------------------------------------
    // Objects
    // -----------------------------------------------------------------------

    /// Append an object to the scene. Fails if the name is already taken.
    pub fn add_object(&mut self, object: SceneObject) -> UnveilResult<()> {
        if self.object_index.contains_key(&object.name) {
            return Err(UnveilError::duplicate("object", object.name));
        }
        self.object_index
            .insert(object.name.clone(), self.objects.len());
        self.objects.push(object);
        Ok(())
    }

    /// All objects, in the scene's native order.
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Look up an object by name.
    pub fn object(&self, name: &str) -> Option<&SceneObject> {
        self.object_index.get(name).map(|&i| &self.objects[i])
    }

    /// Mutable access to an object's flags. Renaming must go through
    /// [`rename_object`](Self::rename_object) to keep the name index valid.
    pub fn object_mut(&mut self, name: &str) -> Option<&mut SceneObject> {
        let index = *self.object_index.get(name)?;
        Some(&mut self.objects[index])
    }

    /// Position of an object in scene order.
    pub fn object_position(&self, name: &str) -> Option<usize> {
        self.object_index.get(name).copied()
    }

    pub(crate) fn object_at_mut(&mut self, index: usize) -> &mut SceneObject {
        &mut self.objects[index]
    }

    /// Remove an object from the scene. Group memberships naming it are left
    /// in place and simply stop resolving.
    pub fn remove_object(&mut self, name: &str) -> UnveilResult<SceneObject> {
        let index = self
            .object_index
            .remove(name)
            .ok_or_else(|| UnveilError::not_found("object", name))?;
        let object = self.objects.remove(index);
        for (i, obj) in self.objects.iter().enumerate().skip(index) {
            self.object_index.insert(obj.name.clone(), i);
        }
        if self.active_object.as_deref() == Some(name) {
            self.active_object = None;
        }
        Ok(object)
    }

    /// Rename an object. Group memberships are not rewritten.
    pub fn rename_object(&mut self, old: &str, new: impl Into<String>) -> UnveilResult<()> {
        let new = new.into();
        if self.object_index.contains_key(&new) {
            return Err(UnveilError::duplicate("object", new));
        }
        let index = self
            .object_index
            .remove(old)
            .ok_or_else(|| UnveilError::not_found("object", old))?;
        self.objects[index].name = new.clone();
        if self.active_object.as_deref() == Some(old) {
            self.active_object = Some(new.clone());
        }
        self.object_index.insert(new, index);
        Ok(())
    }

    /// Name of the active object, if any.
    pub fn active_object(&self) -> Option<&str> {
        self.active_object.as_deref()
    }

    /// Set the active object. Fails if the object does not exist.
    pub fn set_active_object(&mut self, name: &str) -> UnveilResult<()> {
        if !self.object_index.contains_key(name) {
            return Err(UnveilError::not_found("object", name));
        }
        self.active_object = Some(name.to_string());
        Ok(())
    }

    /// Native bulk unhide: reveal and select every hidden object. The active
    /// object is left unchanged. Returns the names of revealed objects.
    pub fn unhide_all_objects(&mut self) -> Vec<String> {
        self.objects
            .iter_mut()
            .filter(|o| o.hidden)
            .map(|o| {
                o.hidden = false;
                o.selected = true;
                o.name.clone()
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Groups
    // -----------------------------------------------------------------------

    /// Add a group. Fails if the name is already taken.
    pub fn add_group(&mut self, group: Group) -> UnveilResult<()> {
        if self.group_index.contains_key(&group.name) {
            return Err(UnveilError::duplicate("group", group.name));
        }
        self.group_index.insert(group.name.clone(), self.groups.len());
        self.groups.push(group);
        Ok(())
    }

    /// All groups, in insertion order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Look up a group by name.
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.group_index.get(name).map(|&i| &self.groups[i])
    }

    // -----------------------------------------------------------------------
    // Armatures
    // -----------------------------------------------------------------------

    /// Add an armature's edit representation. Fails if the name is taken.
    pub fn add_armature(&mut self, armature: Armature) -> UnveilResult<()> {
        if self.armature_index.contains_key(&armature.name) {
            return Err(UnveilError::duplicate("armature", armature.name));
        }
        self.armature_index
            .insert(armature.name.clone(), self.armatures.len());
        self.armatures.push(armature);
        Ok(())
    }

    /// All armatures, in insertion order.
    pub fn armatures(&self) -> &[Armature] {
        &self.armatures
    }

    /// Look up an armature by name.
    pub fn armature(&self, name: &str) -> Option<&Armature> {
        self.armature_index.get(name).map(|&i| &self.armatures[i])
    }

    /// Mutable access to an armature by name.
    pub fn armature_mut(&mut self, name: &str) -> Option<&mut Armature> {
        let index = *self.armature_index.get(name)?;
        Some(&mut self.armatures[index])
    }

    // -----------------------------------------------------------------------
    // Statistics
    // -----------------------------------------------------------------------

    /// Number of objects in the scene.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Number of hidden objects in the scene.
    pub fn hidden_object_count(&self) -> usize {
        self.objects.iter().filter(|o| o.hidden).count()
    }
}

#[derive(Debug, Deserialize)]
struct SceneSnapshot {
    #[serde(default)]
    name: String,
    #[serde(default)]
    objects: Vec<SceneObject>,
    #[serde(default)]
    groups: Vec<Group>,
    #[serde(default)]
    armatures: Vec<ArmatureSnapshot>,
    #[serde(default)]
    active_object: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ArmatureSnapshot {
    name: String,
    #[serde(default)]
    bones: Vec<Bone>,
    #[serde(default)]
    bone_groups: Vec<BoneGroup>,
    #[serde(default)]
    active_bone: Option<String>,
}

impl SceneSnapshot {
    fn into_scene(self) -> UnveilResult<Scene> {
        let mut scene = Scene::new(self.name);
        for object in self.objects {
            scene.add_object(object)?;
        }
        for group in self.groups {
            scene.add_group(group)?;
        }
        for snapshot in self.armatures {
            let mut armature = Armature::new(snapshot.name);
            for group in snapshot.bone_groups {
                armature.add_bone_group(group)?;
            }
            for bone in snapshot.bones {
                armature.add_bone(bone)?;
            }
            if let Some(active) = snapshot.active_bone {
                armature.set_active_bone(&active)?;
            }
            scene.add_armature(armature)?;
        }
        if let Some(active) = self.active_object {
            scene.set_active_object(&active)?;
        }
        Ok(scene)
    }
}
