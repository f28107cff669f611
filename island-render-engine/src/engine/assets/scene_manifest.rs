use bevy::image::{ImageAddressMode, ImageFilterMode, ImageSamplerDescriptor};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Texture wrapping for a sub-scene wide texture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextureWrap {
    #[default]
    Repeat,
    Clamp,
}

impl TextureWrap {
    fn address_mode(self) -> ImageAddressMode {
        match self {
            TextureWrap::Repeat => ImageAddressMode::Repeat,
            TextureWrap::Clamp => ImageAddressMode::ClampToEdge,
        }
    }

    /// Linear filtering with this wrap mode on both axes.
    pub fn sampler(self) -> ImageSamplerDescriptor {
        ImageSamplerDescriptor {
            address_mode_u: self.address_mode(),
            address_mode_v: self.address_mode(),
            mag_filter: ImageFilterMode::Linear,
            min_filter: ImageFilterMode::Linear,
            mipmap_filter: ImageFilterMode::Linear,
            ..default()
        }
    }
}

/// One independently loaded glTF file placed in the island scene.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SceneConfig {
    /// Unique sub-scene name, also the key of the hidden-by-default table.
    pub name: String,
    /// Asset path of the glTF file.
    pub scene_url: String,
    /// Texture applied to every mesh of the sub-scene, replacing its materials.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture_url: Option<String>,
    #[serde(default)]
    pub texture_wrap: TextureWrap,
    #[serde(default)]
    pub position: [f32; 3],
    /// Euler XYZ rotation in radians.
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
}

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl SceneConfig {
    pub fn transform(&self) -> Transform {
        let [rx, ry, rz] = self.rotation;
        Transform {
            translation: Vec3::from_array(self.position),
            rotation: Quat::from_euler(EulerRot::XYZ, rx, ry, rz),
            scale: Vec3::from_array(self.scale),
        }
    }
}

/// Scene manifest as a Bevy asset. Mirrors the JSON structure exactly.
#[derive(Asset, Debug, Clone, Serialize, Deserialize, TypePath)]
pub struct SceneManifest {
    /// Sub-scenes in load order.
    pub scenes: Vec<SceneConfig>,
    /// glTF file whose camera nodes become the camera registry.
    pub cameras_url: String,
}

impl SceneManifest {
    pub fn scene(&self, name: &str) -> Option<&SceneConfig> {
        self.scenes.iter().find(|scene| scene.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_manifest_with_defaults() {
        let json = r#"{
            "scenes": [
                { "name": "islands-scene", "scene_url": "static/islands.glb",
                  "texture_url": "static/islands.png" },
                { "name": "water-scene", "scene_url": "static/water.glb",
                  "texture_wrap": "clamp", "position": [0.0, -0.5, 0.0] }
            ],
            "cameras_url": "static/cameras.glb"
        }"#;

        let manifest: SceneManifest = serde_json::from_str(json).unwrap();
        assert_eq!(manifest.scenes.len(), 2);

        let islands = manifest.scene("islands-scene").unwrap();
        assert_eq!(islands.texture_url.as_deref(), Some("static/islands.png"));
        assert_eq!(islands.texture_wrap, TextureWrap::Repeat);
        assert_eq!(islands.transform(), Transform::IDENTITY);

        let water = manifest.scene("water-scene").unwrap();
        assert_eq!(water.texture_wrap, TextureWrap::Clamp);
        assert_eq!(water.transform().translation, Vec3::new(0.0, -0.5, 0.0));
    }
}
