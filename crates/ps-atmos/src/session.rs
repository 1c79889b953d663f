//! One-load-at-a-time ownership of the current model.

use crate::context::ModelAtmosphere;
use crate::error::AtmosResult;
use crate::loader::{LoadSettings, ModelLoader};
use crate::raw::RawModel;
use tracing::warn;

/// Owns the loader and whichever model was loaded last.
///
/// A load replaces the previous model wholesale. A failed load leaves no
/// model behind, so callers never read state from an earlier, unrelated
/// load after an error.
#[derive(Debug, Default)]
pub struct AtmosphereSession {
    loader: ModelLoader,
    current: Option<ModelAtmosphere>,
}

impl AtmosphereSession {
    pub fn new(loader: ModelLoader) -> Self {
        Self {
            loader,
            current: None,
        }
    }

    pub fn load(
        &mut self,
        tag: &str,
        raw: &RawModel,
        settings: &LoadSettings,
    ) -> AtmosResult<&ModelAtmosphere> {
        self.current = None;
        match self.loader.load(tag, raw, settings) {
            Ok(model) => Ok(&*self.current.insert(model)),
            Err(e) => {
                warn!(error = %e, "model load failed; session cleared");
                Err(e)
            }
        }
    }

    pub fn current(&self) -> Option<&ModelAtmosphere> {
        self.current.as_ref()
    }
}
