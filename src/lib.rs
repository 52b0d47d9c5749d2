pub mod catalog;
pub mod dsp;
pub mod error;
pub mod layout;

use std::path::Path;

pub use crate::catalog::{Catalog, CatalogEntry, Manifest, Recipe, VerifyReport};
pub use crate::dsp::{SAMPLE_RATE, Sample, Waveform};
pub use crate::error::{AssetError, Result};
pub use crate::layout::{CompositeParams, Placement, compute_placement};

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Render the built-in storefront sound set under `base`.
pub fn generate_storefront_sounds(base: &Path) -> Result<Manifest> {
    Catalog::storefront().generate(base)
}

/// Render a single recipe to WAV bytes.
pub fn render_recipe_wav(recipe: &Recipe) -> Result<Vec<u8>> {
    dsp::renderer::encode_wav(&recipe.render())
}
