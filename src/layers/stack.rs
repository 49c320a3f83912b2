//! Layer Stack
//!
//! The editor's ordered, mutable set of layers. A stack always holds at
//! least one layer; a fresh stack starts with the default "main" layer.

use serde::{Deserialize, Serialize};

use super::combiner::combine_layers;
use super::layer::{AudioLayer, UNITY_VOLUME};
use crate::error::{LoFieldError, Result};

/// Ordered collection of composition layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredLayerStack")]
pub struct LayerStack {
    layers: Vec<AudioLayer>,
    /// Creation counter, drives palette assignment
    created: usize,
}

/// Serialized form; restored through [`LayerStack::from_layers`]
#[derive(Deserialize)]
struct StoredLayerStack {
    #[serde(default)]
    layers: Vec<AudioLayer>,
    #[serde(default)]
    created: usize,
}

impl From<StoredLayerStack> for LayerStack {
    fn from(stored: StoredLayerStack) -> Self {
        let mut stack = Self::from_layers(stored.layers);
        stack.created = stack.created.max(stored.created);
        stack
    }
}

impl Default for LayerStack {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerStack {
    /// Create a stack holding only the default "main" layer
    pub fn new() -> Self {
        Self {
            layers: vec![AudioLayer::main("")],
            created: 1,
        }
    }

    /// Wrap existing layers. An empty list gets the default layer.
    pub fn from_layers(layers: Vec<AudioLayer>) -> Self {
        if layers.is_empty() {
            return Self::new();
        }
        let created = layers.len();
        Self { layers, created }
    }

    /// Append a new layer
    ///
    /// # Returns
    /// The id of the newly added layer
    pub fn add_layer(&mut self, name: impl Into<String>, code: impl Into<String>) -> String {
        let layer = AudioLayer::new(name, code, self.created);
        self.created += 1;
        let id = layer.id.clone();
        self.layers.push(layer);
        id
    }

    /// Remove a layer by id. The last remaining layer cannot be removed.
    pub fn remove_layer(&mut self, id: &str) -> Result<AudioLayer> {
        let index = self.index_of(id)?;
        if self.layers.len() == 1 {
            return Err(LoFieldError::LayerError {
                reason: "cannot remove the only layer".to_string(),
            });
        }
        Ok(self.layers.remove(index))
    }

    /// Move a layer between positions; both indices are clamped
    pub fn move_layer(&mut self, from: usize, to: usize) {
        let Some(last) = self.layers.len().checked_sub(1) else {
            return;
        };
        let from = from.min(last);
        let to = to.min(last);
        if from != to {
            let layer = self.layers.remove(from);
            self.layers.insert(to, layer);
        }
    }

    /// Get the index of a layer by id
    pub fn index_of(&self, id: &str) -> Result<usize> {
        self.layers
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| LoFieldError::LayerNotFound { id: id.to_string() })
    }

    pub fn get(&self, id: &str) -> Result<&AudioLayer> {
        let index = self.index_of(id)?;
        Ok(&self.layers[index])
    }

    pub fn get_mut(&mut self, id: &str) -> Result<&mut AudioLayer> {
        let index = self.index_of(id)?;
        Ok(&mut self.layers[index])
    }

    pub fn set_code(&mut self, id: &str, code: impl Into<String>) -> Result<()> {
        self.get_mut(id)?.code = code.into();
        Ok(())
    }

    pub fn rename(&mut self, id: &str, name: impl Into<String>) -> Result<()> {
        self.get_mut(id)?.name = name.into();
        Ok(())
    }

    /// Set volume, clamped to 0..=100
    pub fn set_volume(&mut self, id: &str, volume: i32) -> Result<()> {
        self.get_mut(id)?.volume = volume.clamp(0, UNITY_VOLUME);
        Ok(())
    }

    /// Toggle mute, returning the new state
    pub fn toggle_mute(&mut self, id: &str) -> Result<bool> {
        let layer = self.get_mut(id)?;
        layer.muted = !layer.muted;
        Ok(layer.muted)
    }

    /// Toggle solo, returning the new state
    pub fn toggle_solo(&mut self, id: &str) -> Result<bool> {
        let layer = self.get_mut(id)?;
        layer.soloed = !layer.soloed;
        Ok(layer.soloed)
    }

    pub fn any_soloed(&self) -> bool {
        self.layers.iter().any(|l| l.soloed)
    }

    pub fn layers(&self) -> &[AudioLayer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// False for any stack built through this API or deserialized
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Render the playable program for the current layers
    pub fn combine(&self) -> String {
        combine_layers(&self.layers)
    }
}
