//! Textures and audio clips referenced by the judgments.
use std::collections::HashMap;

use hitscore_core::judgment::Judgment;

use crate::host::Handle;

/// Loads assets from disk into the host.
pub trait AssetLoader {
    /// Loads the image at `path` as a texture.
    fn load_texture(&mut self, path: &str) -> Option<Handle>;
    /// Loads the sound at `path` as an audio clip.
    fn load_audio_clip(&mut self, path: &str) -> Option<Handle>;
}

/// Memoizes an [`AssetLoader`] by path.
///
/// Failed loads are remembered too, so a missing file is only looked up once per scene.
#[derive(Debug)]
pub struct AssetCache<L> {
    loader: L,
    textures: HashMap<String, Option<Handle>>,
    audio_clips: HashMap<String, Option<Handle>>,
}

impl<L: AssetLoader> AssetCache<L> {
    /// Creates an empty `AssetCache` over `loader`.
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            textures: HashMap::new(),
            audio_clips: HashMap::new(),
        }
    }

    /// Returns the underlying loader.
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Returns the texture at `path`, loading it on first use.
    pub fn texture(&mut self, path: &str) -> Option<Handle> {
        if let Some(texture) = self.textures.get(path) {
            return *texture;
        }

        let texture = self.loader.load_texture(path);
        if texture.is_none() {
            warn!("couldn't load texture {path:?}");
        }
        self.textures.insert(path.to_owned(), texture);
        texture
    }

    /// Returns the audio clip at `path`, loading it on first use.
    pub fn audio_clip(&mut self, path: &str) -> Option<Handle> {
        if let Some(clip) = self.audio_clips.get(path) {
            return *clip;
        }

        let clip = self.loader.load_audio_clip(path);
        if clip.is_none() {
            warn!("couldn't load audio clip {path:?}");
        }
        self.audio_clips.insert(path.to_owned(), clip);
        clip
    }

    /// Forgets every loaded asset.
    ///
    /// Handles from the previous scene are no longer valid after the host unloads it.
    pub fn clear(&mut self) {
        self.textures.clear();
        self.audio_clips.clear();
    }

    /// Loads every image and sound the judgments refer to.
    pub fn preload(&mut self, judgments: &[Judgment]) {
        for judgment in judgments {
            if let Some(path) = &judgment.image_path {
                self.texture(path);
            }
            if let Some(path) = &judgment.sound_path {
                self.audio_clip(path);
            }
        }

        debug!(
            "preloaded {} textures and {} audio clips",
            self.textures.values().flatten().count(),
            self.audio_clips.values().flatten().count(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingLoader {
        loads: usize,
    }

    impl AssetLoader for CountingLoader {
        fn load_texture(&mut self, path: &str) -> Option<Handle> {
            self.loads += 1;
            (path != "missing.png").then(|| Handle::new(1).unwrap())
        }

        fn load_audio_clip(&mut self, _path: &str) -> Option<Handle> {
            self.loads += 1;
            Handle::new(2)
        }
    }

    #[test]
    fn loads_once_per_path() {
        let mut cache = AssetCache::new(CountingLoader::default());

        assert!(cache.texture("a.png").is_some());
        assert!(cache.texture("a.png").is_some());
        assert_eq!(cache.texture("missing.png"), None);
        assert_eq!(cache.texture("missing.png"), None);
        assert_eq!(cache.loader().loads, 2);

        cache.clear();
        cache.texture("a.png");
        assert_eq!(cache.loader().loads, 3);
    }

    #[test]
    fn preload() {
        let mut cache = AssetCache::new(CountingLoader::default());
        let judgments = [
            Judgment {
                threshold: 100,
                image_path: Some("a.png".to_owned()),
                sound_path: Some("a.ogg".to_owned()),
                ..Judgment::default()
            },
            Judgment {
                threshold: 0,
                image_path: Some("a.png".to_owned()),
                ..Judgment::default()
            },
        ];

        cache.preload(&judgments);
        assert_eq!(cache.loader().loads, 2);
        cache.audio_clip("a.ogg");
        assert_eq!(cache.loader().loads, 2);
    }
}
