use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::components::mesh::TextureId;

/// Asset manifest describing the textures a scene uses.
/// Loaded from JSON at runtime; the host fetches the files and Rust only
/// keeps the handles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Texture list. A texture's index is its `TextureId`.
    #[serde(default)]
    pub textures: Vec<TextureDescriptor>,
    /// Material name → texture name (e.g. "flat_earth" → "albedo").
    #[serde(default)]
    pub materials: HashMap<String, String>,
}

/// Describes a single texture file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextureDescriptor {
    /// Human-readable name (e.g., "albedo").
    pub name: String,
    /// URL or relative path of the image.
    pub path: String,
    #[serde(default)]
    pub color_space: ColorSpace,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpace {
    #[default]
    Srgb,
    Linear,
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Look up a texture by its own name.
    pub fn texture(&self, name: &str) -> Option<TextureId> {
        self.textures
            .iter()
            .position(|t| t.name == name)
            .map(|idx| TextureId(idx as u32))
    }

    /// Texture bound to a material name, falling back to a texture of the
    /// same name. `None` means the material renders untextured.
    pub fn texture_for_material(&self, material: &str) -> Option<TextureId> {
        match self.materials.get(material) {
            Some(texture) => self.texture(texture),
            None => self.texture(material),
        }
    }
}
