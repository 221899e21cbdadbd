use std::collections::HashSet;

use crate::armature::{Armature, Bone, BoneGroup};
use crate::catalogue::{Catalogue, CatalogueEntry, KindTag};
use crate::error::{UnveilError, UnveilResult};
use crate::object::{Group, ObjectKind, SceneObject};
use crate::scene::Scene;
use crate::session::{HostSession, Mode};

/// A hidden entity: a scene object or an edit bone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HiddenEntity<'s> {
    /// A hidden scene object.
    Object(&'s SceneObject),
    /// A hidden edit bone.
    Bone(&'s Bone),
}

impl<'s> HiddenEntity<'s> {
    /// Name of the entity.
    pub fn name(&self) -> &'s str {
        match *self {
            Self::Object(o) => &o.name,
            Self::Bone(b) => &b.name,
        }
    }

    /// Catalogue tag for this entity.
    pub fn kind_tag(&self) -> KindTag {
        match self {
            Self::Object(_) => KindTag::Object,
            Self::Bone(_) => KindTag::Bone,
        }
    }
}

/// A container with at least one hidden member: a group or a bone group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HiddenContainer<'s> {
    /// A group of scene objects.
    Group(&'s Group),
    /// A bone group.
    BoneGroup(&'s BoneGroup),
}

impl<'s> HiddenContainer<'s> {
    /// Name of the container.
    pub fn name(&self) -> &'s str {
        match *self {
            Self::Group(g) => &g.name,
            Self::BoneGroup(g) => &g.name,
        }
    }

    /// Catalogue tag for this container.
    pub fn kind_tag(&self) -> KindTag {
        match self {
            Self::Group(_) => KindTag::Group,
            Self::BoneGroup(_) => KindTag::BoneGroup,
        }
    }
}

/// The four visibility queries, implemented once per entity-kind pair.
pub trait Pipeline<'s> {
    /// Hidden entities, in native order.
    fn hidden_entities(&self) -> Vec<HiddenEntity<'s>>;

    /// Containers with at least one hidden member, de-duplicated by name,
    /// in container order.
    fn hidden_containers(&self) -> Vec<HiddenContainer<'s>>;

    /// Distinct kinds among hidden objects, first-seen order.
    fn hidden_types(&self) -> Vec<ObjectKind>;

    /// Armature the pipeline scans, if it scans bones.
    fn armature_name(&self) -> Option<&'s str> {
        None
    }

    /// Hidden entities followed by hidden containers, as one addressable
    /// catalogue.
    fn catalogue(&self) -> Catalogue {
        let entities = self
            .hidden_entities()
            .into_iter()
            .map(|e| CatalogueEntry::new(e.name(), e.kind_tag()));
        let containers = self
            .hidden_containers()
            .into_iter()
            .map(|c| CatalogueEntry::new(c.name(), c.kind_tag()));
        Catalogue::new(
            entities.chain(containers).collect(),
            self.armature_name().map(str::to_string),
        )
    }
}

// ---------------------------------------------------------------------------
// Object mode
// ---------------------------------------------------------------------------

/// Scene objects and groups.
#[derive(Debug, Clone, Copy)]
pub struct ObjectPipeline<'s> {
    scene: &'s Scene,
}

impl<'s> ObjectPipeline<'s> {
    /// Scan the given scene.
    pub fn new(scene: &'s Scene) -> Self {
        Self { scene }
    }

    /// Hidden objects in scene order.
    pub fn hidden_objects(&self) -> impl Iterator<Item = &'s SceneObject> + use<'s> {
        self.scene.objects().iter().filter(|o| o.hidden)
    }

    /// Hidden objects of one kind, in scene order.
    pub fn hidden_of_type<'k>(
        &self,
        kind: &'k ObjectKind,
    ) -> impl Iterator<Item = &'s SceneObject> + use<'s, 'k> {
        self.hidden_objects().filter(move |o| o.kind == *kind)
    }

    /// Groups with at least one hidden member.
    pub fn hidden_groups(&self) -> Vec<&'s Group> {
        let hidden: HashSet<&str> = self.hidden_objects().map(|o| o.name.as_str()).collect();
        let mut seen = HashSet::new();
        self.scene
            .groups()
            .iter()
            .filter(|g| {
                for m in g.objects.iter().filter(|m| self.scene.object(m).is_none()) {
                    log::debug!("group {:?} lists missing object {m:?}; skipped", g.name);
                }
                g.objects.iter().any(|m| hidden.contains(m.as_str()))
            })
            .filter(|&g| seen.insert(g.name.as_str()))
            .collect()
    }
}

impl<'s> Pipeline<'s> for ObjectPipeline<'s> {
    fn hidden_entities(&self) -> Vec<HiddenEntity<'s>> {
        self.hidden_objects().map(HiddenEntity::Object).collect()
    }

    fn hidden_containers(&self) -> Vec<HiddenContainer<'s>> {
        self.hidden_groups()
            .into_iter()
            .map(HiddenContainer::Group)
            .collect()
    }

    fn hidden_types(&self) -> Vec<ObjectKind> {
        let mut kinds: Vec<ObjectKind> = Vec::new();
        for object in self.hidden_objects() {
            if !kinds.contains(&object.kind) {
                kinds.push(object.kind.clone());
            }
        }
        kinds
    }
}

// ---------------------------------------------------------------------------
// Armature edit mode
// ---------------------------------------------------------------------------

/// Edit bones and bone groups of one armature.
#[derive(Debug, Clone, Copy)]
pub struct BonePipeline<'s> {
    armature: &'s Armature,
}

impl<'s> BonePipeline<'s> {
    /// Scan the given armature.
    pub fn new(armature: &'s Armature) -> Self {
        Self { armature }
    }

    /// Hidden bones in armature order.
    pub fn hidden_bones(&self) -> impl Iterator<Item = &'s Bone> + use<'s> {
        self.armature.bones().iter().filter(|b| b.hidden)
    }

    /// Bone groups with at least one hidden bone.
    pub fn hidden_bone_groups(&self) -> Vec<&'s BoneGroup> {
        let hidden: HashSet<&str> = self
            .hidden_bones()
            .filter_map(|b| b.bone_group.as_deref())
            .collect();
        let mut seen = HashSet::new();
        self.armature
            .bone_groups()
            .iter()
            .filter(|g| hidden.contains(g.name.as_str()))
            .filter(|&g| seen.insert(g.name.as_str()))
            .collect()
    }
}

impl<'s> Pipeline<'s> for BonePipeline<'s> {
    fn hidden_entities(&self) -> Vec<HiddenEntity<'s>> {
        self.hidden_bones().map(HiddenEntity::Bone).collect()
    }

    fn hidden_containers(&self) -> Vec<HiddenContainer<'s>> {
        self.hidden_bone_groups()
            .into_iter()
            .map(HiddenContainer::BoneGroup)
            .collect()
    }

    // Types only apply to scene objects.
    fn hidden_types(&self) -> Vec<ObjectKind> {
        Vec::new()
    }

    fn armature_name(&self) -> Option<&'s str> {
        Some(&self.armature.name)
    }
}

// ---------------------------------------------------------------------------
// Mode dispatch
// ---------------------------------------------------------------------------

/// The pipeline for the session's current mode.
#[derive(Debug, Clone, Copy)]
pub enum VisibilityIndex<'s> {
    /// Object mode.
    Objects(ObjectPipeline<'s>),
    /// Armature edit mode.
    Bones(BonePipeline<'s>),
}

impl<'s> VisibilityIndex<'s> {
    /// Pick the pipeline for the session's mode. In armature edit mode the
    /// active armature must be named and present in the scene.
    pub fn new(scene: &'s Scene, session: &impl HostSession) -> UnveilResult<Self> {
        match session.current_mode() {
            Mode::Object => Ok(Self::Objects(ObjectPipeline::new(scene))),
            Mode::EditArmature => {
                let name = session
                    .active_armature_name()
                    .ok_or(UnveilError::NoActiveArmature)?;
                let armature = scene
                    .armature(name)
                    .ok_or_else(|| UnveilError::not_found("armature", name))?;
                Ok(Self::Bones(BonePipeline::new(armature)))
            }
        }
    }

    /// The mode this index scans.
    pub fn mode(&self) -> Mode {
        match self {
            Self::Objects(_) => Mode::Object,
            Self::Bones(_) => Mode::EditArmature,
        }
    }

    /// Returns true if nothing is hidden in this mode.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Objects(p) => p.hidden_objects().next().is_none(),
            Self::Bones(p) => p.hidden_bones().next().is_none(),
        }
    }
}

impl<'s> Pipeline<'s> for VisibilityIndex<'s> {
    fn hidden_entities(&self) -> Vec<HiddenEntity<'s>> {
        match self {
            Self::Objects(p) => p.hidden_entities(),
            Self::Bones(p) => p.hidden_entities(),
        }
    }

    fn hidden_containers(&self) -> Vec<HiddenContainer<'s>> {
        match self {
            Self::Objects(p) => p.hidden_containers(),
            Self::Bones(p) => p.hidden_containers(),
        }
    }

    fn hidden_types(&self) -> Vec<ObjectKind> {
        match self {
            Self::Objects(p) => p.hidden_types(),
            Self::Bones(p) => p.hidden_types(),
        }
    }

    fn armature_name(&self) -> Option<&'s str> {
        match self {
            Self::Objects(p) => p.armature_name(),
            Self::Bones(p) => p.armature_name(),
        }
    }
}

/// Hidden objects (object mode) or hidden bones of the active armature.
pub fn list_hidden_entities<'s>(
    scene: &'s Scene,
    session: &impl HostSession,
) -> UnveilResult<Vec<HiddenEntity<'s>>> {
    Ok(VisibilityIndex::new(scene, session)?.hidden_entities())
}

/// Groups (object mode) or bone groups with at least one hidden member.
pub fn list_hidden_containers<'s>(
    scene: &'s Scene,
    session: &impl HostSession,
) -> UnveilResult<Vec<HiddenContainer<'s>>> {
    Ok(VisibilityIndex::new(scene, session)?.hidden_containers())
}

/// Flat search catalogue of hidden entities and containers.
pub fn list_search_catalogue(
    scene: &Scene,
    session: &impl HostSession,
) -> UnveilResult<Catalogue> {
    Ok(VisibilityIndex::new(scene, session)?.catalogue())
}

/// Distinct kinds of hidden objects. Empty in armature edit mode.
pub fn list_hidden_types(
    scene: &Scene,
    session: &impl HostSession,
) -> UnveilResult<Vec<ObjectKind>> {
    Ok(VisibilityIndex::new(scene, session)?.hidden_types())
}
