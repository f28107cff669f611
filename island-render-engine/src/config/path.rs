/// Scene manifest listing every sub-scene and the camera description.
pub const MANIFEST_PATH: &str = "static/manifest.json";

/// Directory holding per-object textures named after their node (`<name>.png`).
pub const NAMED_TEXTURE_DIR: &str = "static";

pub fn named_texture_path(node_name: &str) -> String {
    format!("{}/{}.png", NAMED_TEXTURE_DIR, node_name)
}
