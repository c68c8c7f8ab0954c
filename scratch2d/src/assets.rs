use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::render::Surface;

/// File extensions tried, in order, when resolving an image key on disk.
const IMAGE_EXTENSIONS: &[&str] = &["png", "gif", "jpg", "jpeg", "bmp"];

/// Image registry keyed by name, e.g. `"alien"` for `images/alien.png`.
pub struct Assets {
    root: PathBuf,
    images: HashMap<String, Arc<Surface>>,
}

impl Assets {
    /// Create a registry that resolves keys against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            images: HashMap::new(),
        }
    }

    /// Directory image keys are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Register an in-memory image under `key`, replacing any previous entry.
    pub fn insert(&mut self, key: impl Into<String>, surface: Surface) -> Arc<Surface> {
        let surface = Arc::new(surface);
        self.images.insert(key.into(), Arc::clone(&surface));
        surface
    }

    /// Decode encoded image bytes and cache them under `key`.
    pub fn insert_bytes(&mut self, key: impl Into<String>, bytes: &[u8]) -> Result<Arc<Surface>> {
        let surface = Surface::from_bytes(bytes)?;
        Ok(self.insert(key, surface))
    }

    /// Resolve an image, loading it from disk the first time it is asked for.
    ///
    /// Keys are looked up as `<root>/<key>.<ext>` for the known extensions.
    pub fn load(&mut self, key: &str) -> Result<Arc<Surface>> {
        // Check cache first
        if let Some(surface) = self.images.get(key) {
            return Ok(Arc::clone(surface));
        }

        let path = self
            .find_file(key)
            .ok_or_else(|| Error::UnknownImage(key.to_string()))?;
        log::debug!("loading image {key:?} from {}", path.display());
        let surface = Surface::load(&path)?;
        Ok(self.insert(key, surface))
    }

    /// Get a cached image without touching the disk.
    pub fn get(&self, key: &str) -> Option<Arc<Surface>> {
        self.images.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.images.contains_key(key)
    }

    /// Drop a cached image; it will be reloaded on next access.
    pub fn unload(&mut self, key: &str) {
        self.images.remove(key);
    }

    pub fn clear(&mut self) {
        self.images.clear();
    }

    fn find_file(&self, key: &str) -> Option<PathBuf> {
        IMAGE_EXTENSIONS
            .iter()
            .map(|ext| self.root.join(format!("{key}.{ext}")))
            .find(|path| path.is_file())
    }
}

impl Default for Assets {
    fn default() -> Self {
        Self::new("images")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Color;

    #[test]
    fn inserted_images_are_shared() {
        let mut assets = Assets::new("does-not-exist");
        let inserted = assets.insert("alien", Surface::filled(2, 2, Color::WHITE));
        let loaded = assets.load("alien").unwrap();
        assert!(Arc::ptr_eq(&inserted, &loaded));
    }

    #[test]
    fn missing_image_is_reported_by_name() {
        let mut assets = Assets::new("does-not-exist");
        match assets.load("ghost") {
            Err(Error::UnknownImage(key)) => assert_eq!(key, "ghost"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn loads_from_disk_and_caches() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        Surface::filled(3, 2, Color::WHITE)
            .as_image()
            .save(dir.path().join("box.png"))?;

        let mut assets = Assets::new(dir.path());
        let surface = assets.load("box")?;
        assert_eq!(surface.size(), (3, 2));
        assert!(assets.contains("box"));
        assert!(Arc::ptr_eq(&surface, &assets.load("box")?));
        Ok(())
    }
}
