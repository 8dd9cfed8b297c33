use std::path::{Path, PathBuf};

use crate::{
    composition::model::FontFace,
    foundation::error::{PostcraftError, PostcraftResult},
    ingest::normalize::ResizeFilter,
};

/// Directory scanned for default font file names.
pub const ENV_FONT_DIR: &str = "POSTCRAFT_FONT_DIR";
/// Resampling kernel override, e.g. `lanczos3`.
pub const ENV_RESIZE_FILTER: &str = "POSTCRAFT_RESIZE_FILTER";

/// Runtime configuration for the studio.
///
/// Output dimensions and JPEG qualities are fixed constants and deliberately
/// absent here.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StudioConfig {
    /// Font files per face.
    pub fonts: FontsConfig,
    /// Upload normalization knobs.
    pub ingest: IngestConfig,
}

/// Font file locations. Relative paths resolve against the config file's directory.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontsConfig {
    /// Regular sans-serif face (Standard, Pop, Neon).
    pub sans: Option<PathBuf>,
    /// Regular serif face.
    pub serif: Option<PathBuf>,
    /// Heavy display face (Impact).
    pub heavy: Option<PathBuf>,
    /// Faces consulted for glyphs the primary face lacks, in order.
    pub fallback: Vec<PathBuf>,
}

/// Upload normalization settings.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IngestConfig {
    /// Kernel used when downscaling.
    pub resize_filter: ResizeFilter,
}

impl FontsConfig {
    /// Configured path for `face`.
    pub fn path(&self, face: FontFace) -> Option<&Path> {
        match face {
            FontFace::Sans => self.sans.as_deref(),
            FontFace::Serif => self.serif.as_deref(),
            FontFace::Heavy => self.heavy.as_deref(),
        }
    }

    fn slot_mut(&mut self, face: FontFace) -> &mut Option<PathBuf> {
        match face {
            FontFace::Sans => &mut self.sans,
            FontFace::Serif => &mut self.serif,
            FontFace::Heavy => &mut self.heavy,
        }
    }

    fn resolve_relative(&mut self, base: &Path) {
        let fix = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        for face in [FontFace::Sans, FontFace::Serif, FontFace::Heavy] {
            if let Some(p) = self.slot_mut(face) {
                fix(p);
            }
        }
        self.fallback.iter_mut().for_each(fix);
    }

    /// Fill unset faces from `sans`/`serif`/`heavy`/`fallback` files (`.ttf` or `.otf`) in `dir`.
    pub fn scan_dir(&mut self, dir: &Path) -> PostcraftResult<()> {
        if !dir.is_dir() {
            return Err(PostcraftError::config(format!(
                "font directory '{}' does not exist",
                dir.display()
            )));
        }
        let find = |stem: &str| {
            ["ttf", "otf"]
                .iter()
                .map(|ext| dir.join(format!("{stem}.{ext}")))
                .find(|p| p.is_file())
        };
        for (face, stem) in [
            (FontFace::Sans, "sans"),
            (FontFace::Serif, "serif"),
            (FontFace::Heavy, "heavy"),
        ] {
            let slot = self.slot_mut(face);
            if slot.is_none() {
                *slot = find(stem);
            }
        }
        if let Some(p) = find("fallback")
            && !self.fallback.contains(&p)
        {
            self.fallback.push(p);
        }
        Ok(())
    }
}

impl StudioConfig {
    /// Read a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> PostcraftResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            PostcraftError::config(format!("read '{}': {e}", path.display()))
        })?;
        let mut cfg = Self::from_json(&text)?;
        if let Some(base) = path.parent() {
            cfg.fonts.resolve_relative(base);
        }
        Ok(cfg)
    }

    /// Parse config JSON. Relative paths are left as written.
    pub fn from_json(text: &str) -> PostcraftResult<Self> {
        serde_json::from_str(text).map_err(|e| PostcraftError::config(format!("parse config: {e}")))
    }

    /// Defaults plus the process environment.
    pub fn from_env() -> PostcraftResult<Self> {
        let mut cfg = Self::default();
        cfg.apply_env(|k| std::env::var(k).ok())?;
        Ok(cfg)
    }

    /// Apply `POSTCRAFT_*` overrides using `lookup` to read variables.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> PostcraftResult<()> {
        if let Some(dir) = lookup(ENV_FONT_DIR).filter(|v| !v.trim().is_empty()) {
            self.fonts.scan_dir(Path::new(dir.trim()))?;
        }
        if let Some(filter) = lookup(ENV_RESIZE_FILTER).filter(|v| !v.trim().is_empty()) {
            self.ingest.resize_filter = ResizeFilter::parse(&filter)?;
        }
        tracing::debug!(config = ?self, "applied environment overrides");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
