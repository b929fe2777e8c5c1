//! Name-sorted clip storage.

use std::sync::Arc;

use log::warn;

use crate::clip::AnimationClip;

#[derive(Clone, Debug, Default)]
pub struct ClipLibrary {
    /// Sorted by clip name, names unique.
    items: Vec<Arc<AnimationClip>>,
}

impl ClipLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, name: &str) -> Result<usize, usize> {
        self.items.binary_search_by(|c| c.name().cmp(name))
    }

    /// Insert a clip, replacing any clip with the same name.
    pub fn insert(&mut self, clip: AnimationClip) -> Arc<AnimationClip> {
        let clip = Arc::new(clip);
        match self.position(clip.name()) {
            Ok(i) => {
                warn!("clip library: replacing clip '{}'", clip.name());
                self.items[i] = Arc::clone(&clip);
            }
            Err(i) => self.items.insert(i, Arc::clone(&clip)),
        }
        clip
    }

    pub fn get(&self, name: &str) -> Option<&Arc<AnimationClip>> {
        self.position(name).ok().map(|i| &self.items[i])
    }

    pub fn remove(&mut self, name: &str) -> Option<Arc<AnimationClip>> {
        self.position(name).ok().map(|i| self.items.remove(i))
    }

    /// Drop every clip. Controllers still linked keep their clips alive.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Clip names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|c| c.name())
    }
}
