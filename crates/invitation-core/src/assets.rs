//! Static asset locations.
//!
//! Assets are addressed by a path relative to a base prefix supplied by the
//! host. The prefix is treated as an opaque string and is never parsed.

use serde::{Deserialize, Serialize};

/// Default audio asset.
pub const DEFAULT_AUDIO: &str = "bonita.mp3";

/// The assets the view references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetManifest {
    /// Prefix prepended to every relative path.
    pub base: String,
    /// Background music, relative to `base`.
    pub audio: String,
    /// Decorative images, relative to `base`.
    pub images: Vec<String>,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            base: "./".to_string(),
            audio: DEFAULT_AUDIO.to_string(),
            images: Vec::new(),
        }
    }
}

impl AssetManifest {
    /// Creates a manifest rooted at `base` with the default audio file.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            ..Default::default()
        }
    }

    /// Resolves `relative` against the base prefix.
    pub fn resolve(&self, relative: &str) -> String {
        format!("{}{}", self.base, relative)
    }

    /// Returns the resolved audio location.
    pub fn audio_url(&self) -> String {
        self.resolve(&self.audio)
    }

    /// Returns the resolved image locations, in manifest order.
    pub fn image_urls(&self) -> Vec<String> {
        self.images.iter().map(|image| self.resolve(image)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_manifest() {
        let manifest = AssetManifest::default();
        assert_eq!(manifest.audio_url(), "./bonita.mp3");
        assert!(manifest.image_urls().is_empty());
    }

    #[test]
    fn prefix_is_concatenated_verbatim() {
        let manifest = AssetManifest::new("/invitacion/");
        assert_eq!(manifest.audio_url(), "/invitacion/bonita.mp3");

        // No separator is inserted or collapsed.
        let manifest = AssetManifest::new("https://cdn.example.test/v2");
        assert_eq!(manifest.resolve("hearts.png"), "https://cdn.example.test/v2hearts.png");
        let manifest = AssetManifest::new("base//");
        assert_eq!(manifest.resolve("/x.png"), "base///x.png");
    }

    #[test]
    fn images_keep_order() {
        let manifest = AssetManifest {
            base: "assets/".into(),
            images: vec!["b.jpg".into(), "a.jpg".into()],
            ..Default::default()
        };
        assert_eq!(manifest.image_urls(), ["assets/b.jpg", "assets/a.jpg"]);
    }
}
