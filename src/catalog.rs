//! Sound catalog: the fixed set of effects the storefront ships.
//!
//! A catalog maps relative output paths to [`Recipe`]s. The built-in
//! [`Catalog::storefront`] reproduces the published asset set; a JSON
//! catalog with the same shape can replace it.

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::dsp::{Waveform, sample_count};
use crate::dsp::mixer::concat;
use crate::dsp::renderer::{encode_wav, write_file};
use crate::dsp::synth::{
    self, DEFAULT_CLICK_DURATION, DEFAULT_FADE_OUT, DEFAULT_IMPACT_VOLUME, DEFAULT_SUCCESS_DURATION,
    DEFAULT_SUCCESS_VOLUME, DEFAULT_VOLUME,
};
use crate::error::{AssetError, Result};

/// Default output root, relative to the storefront checkout.
pub const DEFAULT_BASE: &str = "public/sounds";

/// Longest sound a catalog entry may describe.
pub const MAX_SOUND_SECONDS: f64 = 600.0;

fn default_base() -> PathBuf {
    PathBuf::from(DEFAULT_BASE)
}
fn default_volume() -> f64 {
    DEFAULT_VOLUME
}
fn default_fade_out() -> f64 {
    DEFAULT_FADE_OUT
}
fn default_impact_volume() -> f64 {
    DEFAULT_IMPACT_VOLUME
}
fn default_click_duration() -> f64 {
    DEFAULT_CLICK_DURATION
}
fn default_success_duration() -> f64 {
    DEFAULT_SUCCESS_DURATION
}
fn default_success_volume() -> f64 {
    DEFAULT_SUCCESS_VOLUME
}

// ── Recipes ─────────────────────────────────────────────────

/// One generator call, or a composition of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum Recipe {
    Tone {
        frequency: f64,
        duration: f64,
        #[serde(default = "default_volume")]
        volume: f64,
        #[serde(default = "default_fade_out")]
        fade_out: f64,
    },
    Sweep {
        start_freq: f64,
        end_freq: f64,
        duration: f64,
        #[serde(default = "default_volume")]
        volume: f64,
    },
    Impact {
        duration: f64,
        #[serde(default = "default_impact_volume")]
        volume: f64,
    },
    Click {
        #[serde(default = "default_click_duration")]
        duration: f64,
        #[serde(default = "default_volume")]
        volume: f64,
    },
    Success {
        #[serde(default = "default_success_duration")]
        duration: f64,
        #[serde(default = "default_success_volume")]
        volume: f64,
    },
    /// Parts rendered back to back.
    Sequence { parts: Vec<Recipe> },
    /// One recipe rendered `times` times back to back.
    Repeat { times: usize, recipe: Box<Recipe> },
}

impl Recipe {
    pub fn tone(frequency: f64, duration: f64, volume: f64, fade_out: f64) -> Self {
        Recipe::Tone {
            frequency,
            duration,
            volume,
            fade_out,
        }
    }

    pub fn sweep(start_freq: f64, end_freq: f64, duration: f64, volume: f64) -> Self {
        Recipe::Sweep {
            start_freq,
            end_freq,
            duration,
            volume,
        }
    }

    pub fn impact(duration: f64, volume: f64) -> Self {
        Recipe::Impact { duration, volume }
    }

    pub fn click(duration: f64, volume: f64) -> Self {
        Recipe::Click { duration, volume }
    }

    pub fn success(duration: f64, volume: f64) -> Self {
        Recipe::Success { duration, volume }
    }

    pub fn sequence(parts: Vec<Recipe>) -> Self {
        Recipe::Sequence { parts }
    }

    pub fn repeat(times: usize, recipe: Recipe) -> Self {
        Recipe::Repeat {
            times,
            recipe: Box::new(recipe),
        }
    }

    /// Sample count the recipe renders to, without rendering it.
    /// Saturates instead of overflowing.
    pub fn planned_len(&self) -> usize {
        match self {
            Recipe::Tone { duration, .. }
            | Recipe::Sweep { duration, .. }
            | Recipe::Impact { duration, .. }
            | Recipe::Click { duration, .. }
            | Recipe::Success { duration, .. } => sample_count(*duration),
            Recipe::Sequence { parts } => parts
                .iter()
                .fold(0usize, |len, part| len.saturating_add(part.planned_len())),
            Recipe::Repeat { times, recipe } => times.saturating_mul(recipe.planned_len()),
        }
    }

    /// Synthesize the recipe.
    pub fn render(&self) -> Waveform {
        match self {
            Recipe::Tone {
                frequency,
                duration,
                volume,
                fade_out,
            } => synth::tone(*frequency, *duration, *volume, *fade_out),
            Recipe::Sweep {
                start_freq,
                end_freq,
                duration,
                volume,
            } => synth::sweep(*start_freq, *end_freq, *duration, *volume),
            Recipe::Impact { duration, volume } => synth::impact(*duration, *volume),
            Recipe::Click { duration, volume } => synth::click(*duration, *volume),
            Recipe::Success { duration, volume } => synth::success(*duration, *volume),
            Recipe::Sequence { parts } => {
                let rendered: Vec<Waveform> = parts.iter().map(Recipe::render).collect();
                concat(&rendered)
            }
            Recipe::Repeat { times, recipe } => {
                let once = recipe.render();
                concat(std::iter::repeat_n(&once, *times))
            }
        }
    }
}

// ── Catalog ─────────────────────────────────────────────────

/// A sound to generate, relative to the catalog base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Display group, usually the mini-game name or `ui`.
    pub group: String,
    /// Output path relative to the base directory.
    pub path: String,
    pub recipe: Recipe,
}

impl CatalogEntry {
    pub fn new(group: &str, path: &str, recipe: Recipe) -> Self {
        CatalogEntry {
            group: group.to_string(),
            path: path.to_string(),
            recipe,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default = "default_base")]
    pub base: PathBuf,
    pub entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// The storefront's published sound set.
    ///
    /// Files keep their historical `.mp3` names because the storefront
    /// references them; the content is WAV and browsers sniff it.
    pub fn storefront() -> Self {
        let mg = |game: &str, effect: &str| format!("mini-games/{game}/{effect}.mp3");
        let mut entries = Vec::new();
        let mut push = |group: &str, path: String, recipe: Recipe| {
            entries.push(CatalogEntry::new(group, &path, recipe));
        };

        push("pachinko", mg("pachinko", "ball-drop"), Recipe::sweep(800.0, 400.0, 0.5, 0.3));
        push("pachinko", mg("pachinko", "peg-hit"), Recipe::click(0.03, 0.2));
        push("pachinko", mg("pachinko", "slot-win"), Recipe::success(1.0, 0.4));

        push("wheel", mg("wheel", "spin-start"), Recipe::sweep(200.0, 600.0, 0.4, 0.3));
        push("wheel", mg("wheel", "tick"), Recipe::click(0.02, 0.15));
        push("wheel", mg("wheel", "win"), Recipe::success(1.2, 0.5));

        push("dice", mg("dice", "roll"), Recipe::sweep(300.0, 500.0, 0.3, 0.3));
        push("dice", mg("dice", "bounce"), Recipe::impact(0.15, 0.3));
        push("dice", mg("dice", "land"), Recipe::impact(0.3, 0.4));

        // Loop: alternating A4/A5 blips.
        let blips = Recipe::sequence(vec![
            Recipe::tone(440.0, 0.05, 0.2, DEFAULT_FADE_OUT),
            Recipe::tone(880.0, 0.05, 0.2, DEFAULT_FADE_OUT),
        ]);
        push("slots", mg("slots", "spin"), Recipe::repeat(3, blips));
        push("slots", mg("slots", "stop"), Recipe::impact(0.2, 0.3));
        push("slots", mg("slots", "jackpot"), Recipe::success(2.0, 0.6));

        push("coin", mg("coin", "flip"), Recipe::sweep(600.0, 800.0, 0.2, 0.3));
        // Loop: twenty short tones rising 10 Hz each.
        let whirr = (0..20)
            .map(|i| Recipe::tone(800.0 + i as f64 * 10.0, 0.1, 0.2, 0.05))
            .collect();
        push("coin", mg("coin", "spin"), Recipe::sequence(whirr));
        push("coin", mg("coin", "land"), Recipe::impact(0.25, 0.4));

        push(
            "scratch",
            mg("scratch", "scratch"),
            Recipe::repeat(10, Recipe::sweep(2000.0, 3000.0, 0.1, 0.1)),
        );
        push("scratch", mg("scratch", "reveal"), Recipe::success(1.0, 0.5));

        push("ui", "ui/click.mp3".into(), Recipe::click(0.05, 0.3));
        push("ui", "ui/hover.mp3".into(), Recipe::tone(600.0, 0.03, 0.15, 0.01));
        push("ui", "ui/success.mp3".into(), Recipe::success(0.5, 0.4));
        push("ui", "ui/error.mp3".into(), Recipe::sweep(400.0, 200.0, 0.3, 0.3));
        push("ui", "ui/notification.mp3".into(), Recipe::tone(800.0, 0.2, 0.3, 0.05));

        Catalog {
            base: default_base(),
            entries,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reject entries that would write outside the base directory or
    /// render more than [`MAX_SOUND_SECONDS`] of audio.
    pub fn validate(&self) -> Result<()> {
        let max_len = sample_count(MAX_SOUND_SECONDS);
        for entry in &self.entries {
            let path = Path::new(&entry.path);
            let contained = path
                .components()
                .any(|c| matches!(c, Component::Normal(_)))
                && path
                    .components()
                    .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
            if !contained {
                return Err(AssetError::InvalidCatalog(format!(
                    "{}: path must stay inside the base directory",
                    entry.path
                )));
            }
            if entry.recipe.planned_len() > max_len {
                return Err(AssetError::InvalidCatalog(format!(
                    "{}: longer than {MAX_SOUND_SECONDS} s",
                    entry.path
                )));
            }
        }
        Ok(())
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| AssetError::io(path, e))?;
        Self::from_json_str(&json)
    }

    /// Group names in first-seen order.
    pub fn groups(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.entries
            .iter()
            .map(|e| e.group.as_str())
            .filter(|g| seen.insert(*g))
            .collect()
    }

    /// Keep only entries whose group is listed. An empty list keeps all.
    pub fn select<S: AsRef<str>>(&self, groups: &[S]) -> Catalog {
        if groups.is_empty() {
            return self.clone();
        }
        let entries = self
            .entries
            .iter()
            .filter(|e| groups.iter().any(|g| g.as_ref() == e.group))
            .cloned()
            .collect();
        Catalog {
            base: self.base.clone(),
            entries,
        }
    }

    /// Render every entry and write it under `base`.
    ///
    /// Stops at the first I/O failure.
    pub fn generate(&self, base: &Path) -> Result<Manifest> {
        self.validate()?;
        let mut manifest = Manifest::default();
        let mut current_group: Option<&str> = None;

        for entry in &self.entries {
            if current_group != Some(entry.group.as_str()) {
                info!("{}:", entry.group);
                current_group = Some(entry.group.as_str());
            }

            let rendered = RenderedEntry::render(entry)?;
            let path = base.join(&entry.path);
            write_file(&path, &rendered.bytes)?;
            info!(
                path = %path.display(),
                samples = rendered.samples,
                "created"
            );
            manifest.entries.push(rendered.into_manifest_entry(entry));
        }

        Ok(manifest)
    }

    /// Re-render every entry and compare against the files under `base`.
    pub fn verify(&self, base: &Path) -> Result<VerifyReport> {
        self.validate()?;
        let mut report = VerifyReport::default();

        for entry in &self.entries {
            let rendered = RenderedEntry::render(entry)?;
            let path = base.join(&entry.path);
            match fs::read(&path) {
                Ok(existing) if sha256_hex(&existing) == rendered.sha256 => {
                    debug!(path = %path.display(), "matches");
                    report.matched.push(entry.path.clone());
                }
                Ok(_) => {
                    warn!(path = %path.display(), "differs from regenerated audio");
                    report.mismatched.push(entry.path.clone());
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    warn!(path = %path.display(), "missing");
                    report.missing.push(entry.path.clone());
                }
                Err(e) => return Err(AssetError::io(path, e)),
            }
        }

        Ok(report)
    }
}

/// Encoded audio for one entry.
struct RenderedEntry {
    bytes: Vec<u8>,
    samples: usize,
    duration: f64,
    sha256: String,
}

impl RenderedEntry {
    fn render(entry: &CatalogEntry) -> Result<Self> {
        debug!(path = %entry.path, recipe = ?entry.recipe, "rendering");
        let wave = entry.recipe.render();
        let bytes = encode_wav(&wave)?;
        let sha256 = sha256_hex(&bytes);
        Ok(RenderedEntry {
            bytes,
            samples: wave.len(),
            duration: wave.duration(),
            sha256,
        })
    }

    fn into_manifest_entry(self, entry: &CatalogEntry) -> ManifestEntry {
        ManifestEntry {
            group: entry.group.clone(),
            path: entry.path.clone(),
            samples: self.samples,
            duration: self.duration,
            sha256: self.sha256,
        }
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

// ── Reports ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub group: String,
    pub path: String,
    pub samples: usize,
    /// Seconds.
    pub duration: f64,
    /// Hex SHA-256 of the written file.
    pub sha256: String,
}

/// Record of a generation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        write_file(path, self.to_json()?.as_bytes())
    }
}

/// Outcome of [`Catalog::verify`], as relative paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyReport {
    pub matched: Vec<String>,
    pub mismatched: Vec<String>,
    pub missing: Vec<String>,
}

impl VerifyReport {
    pub fn is_clean(&self) -> bool {
        self.mismatched.is_empty() && self.missing.is_empty()
    }
}
