use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::UnveilConfig;
use crate::error::{UnveilError, UnveilResult};
use crate::reveal::Selector;

/// What a catalogue entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KindTag {
    /// A scene object.
    Object,
    /// A group of scene objects.
    Group,
    /// An edit bone.
    Bone,
    /// A bone group.
    #[serde(rename = "Bone Group")]
    BoneGroup,
}

impl KindTag {
    /// Returns the display tag (`"Object"`, `"Bone Group"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Object => "Object",
            Self::Group => "Group",
            Self::Bone => "Bone",
            Self::BoneGroup => "Bone Group",
        }
    }

    /// Parse a display tag. Returns `None` for unknown tags.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Object" => Some(Self::Object),
            "Group" => Some(Self::Group),
            "Bone" => Some(Self::Bone),
            "Bone Group" => Some(Self::BoneGroup),
            _ => None,
        }
    }

    /// Returns true for groups and bone groups.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Group | Self::BoneGroup)
    }
}

impl fmt::Display for KindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One addressable hidden item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueEntry {
    /// Lookup key: the entity or container name.
    pub id: String,
    /// Text shown to the user.
    pub label: String,
    /// What the id refers to.
    pub kind: KindTag,
}

impl CatalogueEntry {
    /// An entry whose label is its id.
    pub fn new(id: impl Into<String>, kind: KindTag) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            kind,
        }
    }
}

/// Hidden entities followed by hidden containers for one mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalogue {
    entries: Vec<CatalogueEntry>,
    armature: Option<String>,
}

impl Catalogue {
    /// Wrap entries. `armature` names the armature bone entries belong to.
    pub fn new(entries: Vec<CatalogueEntry>, armature: Option<String>) -> Self {
        Self { entries, armature }
    }

    /// All entries, in catalogue order.
    pub fn entries(&self) -> &[CatalogueEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the catalogue has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Armature the bone entries belong to, if built in armature edit mode.
    pub fn armature(&self) -> Option<&str> {
        self.armature.as_deref()
    }

    /// Every entry with the given id, in catalogue order.
    pub fn matches<'c, 'i>(
        &'c self,
        id: &'i str,
    ) -> impl Iterator<Item = &'c CatalogueEntry> + use<'c, 'i> {
        self.entries.iter().filter(move |e| e.id == id)
    }

    /// The first entry with the given id. When names collide across
    /// namespaces the earliest entry wins.
    pub fn lookup(&self, id: &str) -> UnveilResult<&CatalogueEntry> {
        let mut matches = self.matches(id);
        let first = matches.next().ok_or_else(|| UnveilError::AmbiguousKind {
            id: id.to_string(),
        })?;
        let others = matches.count();
        if others > 0 {
            log::debug!(
                "catalogue id \"{id}\" matches {} entries, using {}",
                others + 1,
                first.kind
            );
        }
        Ok(first)
    }

    /// Incremental search: entries whose id or label contains `query`
    /// (case-insensitive), in catalogue order, up to the configured limit.
    pub fn search(&self, query: &str, config: &UnveilConfig) -> Vec<&CatalogueEntry> {
        let query_lower = query.to_lowercase();
        let hits = self.entries.iter().filter(|e| {
            e.id.to_lowercase().contains(&query_lower)
                || e.label.to_lowercase().contains(&query_lower)
        });
        match config.search_limit {
            Some(limit) => hits.take(limit).collect(),
            None => hits.collect(),
        }
    }

    /// The reveal selector for a catalogue id, chosen by its kind tag.
    pub fn selector_for(&self, id: &str) -> UnveilResult<Selector> {
        let entry = self.lookup(id)?;
        Selector::from_tag(entry.kind, &entry.id, self.armature())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalogue() -> Catalogue {
        Catalogue::new(
            vec![
                CatalogueEntry::new("Cube", KindTag::Object),
                CatalogueEntry::new("Props", KindTag::Object),
                CatalogueEntry::new("Lamp", KindTag::Object),
                CatalogueEntry::new("Props", KindTag::Group),
            ],
            None,
        )
    }

    #[test]
    fn kind_tag_display_and_parse() {
        assert_eq!(KindTag::BoneGroup.to_string(), "Bone Group");
        assert_eq!(KindTag::parse("Bone Group"), Some(KindTag::BoneGroup));
        assert_eq!(KindTag::parse("Object"), Some(KindTag::Object));
        assert_eq!(KindTag::parse("object"), None);
        assert!(KindTag::Group.is_container());
        assert!(!KindTag::Bone.is_container());
    }

    #[test]
    fn lookup_first_match_wins() {
        let catalogue = catalogue();
        let entry = catalogue.lookup("Props").unwrap();
        assert_eq!(entry.kind, KindTag::Object);
        assert_eq!(catalogue.matches("Props").count(), 2);
    }

    #[test]
    fn lookup_unknown_id_is_ambiguous() {
        let catalogue = catalogue();
        assert!(matches!(
            catalogue.lookup("Ghost"),
            Err(UnveilError::AmbiguousKind { .. })
        ));
    }

    #[test]
    fn search_is_case_insensitive() {
        let catalogue = catalogue();
        let hits = catalogue.search("PRO", &UnveilConfig::default());
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].kind, KindTag::Object);
        assert_eq!(hits[1].kind, KindTag::Group);
    }

    #[test]
    fn search_respects_limit() {
        let catalogue = catalogue();
        let config = UnveilConfig::default().with_search_limit(2);
        let hits = catalogue.search("", &config);
        let ids: Vec<&str> = hits.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["Cube", "Props"]);
    }

    #[test]
    fn selector_for_uses_kind_tag() {
        let catalogue = catalogue();
        assert_eq!(
            catalogue.selector_for("Lamp").unwrap(),
            Selector::object("Lamp")
        );
        assert_eq!(
            catalogue.selector_for("Props").unwrap(),
            Selector::object("Props")
        );
    }

    #[test]
    fn bone_selectors_carry_armature() {
        let catalogue = Catalogue::new(
            vec![
                CatalogueEntry::new("spine", KindTag::Bone),
                CatalogueEntry::new("Legs", KindTag::BoneGroup),
            ],
            Some("Arm".to_string()),
        );
        assert_eq!(
            catalogue.selector_for("spine").unwrap(),
            Selector::bone("Arm", "spine")
        );
        assert_eq!(
            catalogue.selector_for("Legs").unwrap(),
            Selector::bone_group("Arm", "Legs")
        );
    }
}
