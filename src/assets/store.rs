use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::assets::decode::{DecodedImage, decode_image, placeholder_image, solid_image};
use crate::audio::clip::{AudioClip, AudioCue, MIX_SAMPLE_RATE, decode_clip_file};
use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{BannerError, BannerResult};
use crate::scene::model::SpriteId;

/// Source of sprite images and audio clips.
pub trait AssetProvider {
    /// Load and decode one sprite.
    fn load_image(&self, sprite: SpriteId) -> BannerResult<DecodedImage>;
    /// Load and decode one audio cue at the mix sample rate.
    fn load_clip(&self, cue: AudioCue) -> BannerResult<AudioClip>;
}

/// Assets read from `<root>/img/<name>.png` and `<root>/audio/<cue>.wav`.
#[derive(Clone, Debug)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    /// Provider rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Asset root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a sprite image.
    pub fn image_path(&self, sprite: SpriteId) -> PathBuf {
        self.root.join("img").join(sprite.file_name())
    }

    /// Path of an audio clip.
    pub fn clip_path(&self, cue: AudioCue) -> PathBuf {
        self.root.join("audio").join(cue.file_name())
    }
}

impl AssetProvider for DirAssets {
    fn load_image(&self, sprite: SpriteId) -> BannerResult<DecodedImage> {
        let path = self.image_path(sprite);
        let bytes = std::fs::read(&path)
            .map_err(|e| BannerError::asset(format!("read '{}': {e}", path.display())))?;
        decode_image(&bytes)
            .map_err(|e| BannerError::asset(format!("'{}': {e}", path.display())))
    }

    fn load_clip(&self, cue: AudioCue) -> BannerResult<AudioClip> {
        decode_clip_file(&self.clip_path(cue), MIX_SAMPLE_RATE)
    }
}

/// In-memory provider: encoded image bytes and pre-decoded clips.
#[derive(Clone, Debug, Default)]
pub struct MemoryAssets {
    images: HashMap<SpriteId, Vec<u8>>,
    clips: HashMap<AudioCue, AudioClip>,
}

impl MemoryAssets {
    /// Add encoded image bytes for `sprite`.
    pub fn with_image(mut self, sprite: SpriteId, encoded: Vec<u8>) -> Self {
        self.images.insert(sprite, encoded);
        self
    }

    /// Add a decoded clip for `cue`.
    pub fn with_clip(mut self, cue: AudioCue, clip: AudioClip) -> Self {
        self.clips.insert(cue, clip);
        self
    }
}

impl AssetProvider for MemoryAssets {
    fn load_image(&self, sprite: SpriteId) -> BannerResult<DecodedImage> {
        let bytes = self
            .images
            .get(&sprite)
            .ok_or_else(|| BannerError::asset(format!("no image for '{sprite}'")))?;
        decode_image(bytes)
    }

    fn load_clip(&self, cue: AudioCue) -> BannerResult<AudioClip> {
        self.clips
            .get(&cue)
            .cloned()
            .ok_or_else(|| BannerError::audio(format!("no clip for '{}'", cue.file_name())))
    }
}

/// Decoded sprite table for one run. Every sprite resolves to an image.
#[derive(Clone, Debug)]
pub struct SpriteStore {
    images: Vec<DecodedImage>,
    missing: Vec<SpriteId>,
}

impl SpriteStore {
    /// Load every sprite, substituting a placeholder for anything that fails.
    ///
    /// A missing `white` sheet falls back to a 1x1 white pixel instead of magenta so the
    /// backdrop and flash keep their colour.
    #[tracing::instrument(skip_all)]
    pub fn load(provider: &dyn AssetProvider) -> Self {
        let mut images = Vec::with_capacity(SpriteId::ALL.len());
        let mut missing = Vec::new();
        for sprite in SpriteId::ALL {
            match provider.load_image(sprite) {
                Ok(img) => {
                    tracing::debug!(%sprite, width = img.width, height = img.height, "loaded sprite");
                    images.push(img);
                }
                Err(e) => {
                    tracing::warn!(%sprite, error = %e, "sprite unavailable, using placeholder");
                    missing.push(sprite);
                    images.push(if sprite == SpriteId::White {
                        solid_image(1, 1, Rgba8Premul::WHITE)
                    } else {
                        placeholder_image()
                    });
                }
            }
        }
        tracing::info!(
            loaded = images.len() - missing.len(),
            missing = missing.len(),
            "sprite table ready"
        );
        Self { images, missing }
    }

    /// Image for `sprite`.
    pub fn get(&self, sprite: SpriteId) -> &DecodedImage {
        &self.images[sprite.index()]
    }

    /// Sprites that were replaced by a placeholder.
    pub fn missing(&self) -> &[SpriteId] {
        &self.missing
    }

    /// All sprites with their images, in index order.
    pub fn iter(&self) -> impl Iterator<Item = (SpriteId, &DecodedImage)> {
        SpriteId::ALL.into_iter().zip(self.images.iter())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
