//! LayeredSource: stack several volume sources into one.
//!
//! Layers are consulted in order and their volumes concatenated, so with the
//! resolver's first-match policy an earlier layer shadows a later one that
//! reports the same id. A platform service can sit on top with a cruder
//! fallback (such as a parsed mount table) beneath it.

use crate::{Error, MountedVolume, Result, VolumeSource};

/// A boxed volume source.
pub type SourceBox = Box<dyn VolumeSource>;

/// An ordered stack of volume sources.
#[derive(Default)]
pub struct LayeredSource {
    layers: Vec<SourceBox>,
}

impl LayeredSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer below the existing ones.
    pub fn add_layer(&mut self, source: impl VolumeSource + 'static) {
        self.layers.push(Box::new(source));
    }

    /// Builder form of [`add_layer`](Self::add_layer).
    #[must_use]
    pub fn with_layer(mut self, source: impl VolumeSource + 'static) -> Self {
        self.add_layer(source);
        self
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl VolumeSource for LayeredSource {
    /// Failing layers are skipped. The stack fails only when every layer
    /// failed; the last failure is returned.
    fn list_volumes(&self) -> Result<Vec<MountedVolume>> {
        let mut volumes = Vec::new();
        let mut last_error: Option<Error> = None;
        let mut any_succeeded = self.layers.is_empty();

        for (i, layer) in self.layers.iter().enumerate() {
            match layer.list_volumes() {
                Ok(found) => {
                    any_succeeded = true;
                    volumes.extend(found);
                }
                Err(error) => {
                    log::debug!("Skipping volume layer {}: {}", i, error);
                    last_error = Some(error);
                }
            }
        }

        match last_error {
            Some(error) if !any_succeeded => Err(error),
            _ => Ok(volumes),
        }
    }
}
