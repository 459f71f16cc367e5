use serde::{Deserialize, Serialize};

/// Response of `/api/resource`: communities and study material for an exam or technology.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceBundle {
    #[serde(default)]
    pub groups: Vec<StudyGroup>,
    #[serde(default)]
    pub materials: Vec<StudyMaterial>,
}

impl ResourceBundle {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.materials.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudyGroup {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub members: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudyMaterial {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}
