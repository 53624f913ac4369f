use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryNode {
    pub name: String,
    /// Path relative to the analyzed root, `/`-separated.
    pub path: String,
    pub is_dir: bool,
    pub children: Vec<DirectoryNode>,
}

impl DirectoryNode {
    pub fn child(&self, name: &str) -> Option<&DirectoryNode> {
        self.children.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn has_dir(&self, name: &str) -> bool {
        self.child(name).map(|c| c.is_dir).unwrap_or(false)
    }

    pub fn has_file(&self, name: &str) -> bool {
        self.child(name).map(|c| !c.is_dir).unwrap_or(false)
    }

    pub fn subdirectories(&self) -> impl Iterator<Item = &DirectoryNode> {
        self.children.iter().filter(|c| c.is_dir)
    }

    /// Every node below this one, depth first.
    pub fn descendants(&self) -> Vec<&DirectoryNode> {
        let mut nodes = Vec::new();
        for child in &self.children {
            nodes.push(child);
            nodes.extend(child.descendants());
        }
        nodes
    }

    /// Relative paths of all files below this node.
    pub fn file_paths(&self) -> Vec<String> {
        self.descendants()
            .into_iter()
            .filter(|n| !n.is_dir)
            .map(|n| n.path.clone())
            .collect()
    }
}
