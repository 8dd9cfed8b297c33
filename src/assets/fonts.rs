use std::{collections::BTreeMap, path::Path, sync::Arc};

use crate::{
    composition::model::FontFace,
    foundation::{
        config::FontsConfig,
        error::{PostcraftError, PostcraftResult},
    },
};

/// Font bytes for each face the designs draw with, plus shared fallbacks.
///
/// The book is plain data; faces are only parsed when a
/// [`crate::Compositor`] is built from it.
#[derive(Clone, Debug, Default)]
pub struct FontBook {
    faces: BTreeMap<FontFace, Arc<[u8]>>,
    fallback: Vec<Arc<[u8]>>,
}

impl FontBook {
    /// Empty book. Rendering non-empty text with it fails with a font error.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`FontBook::set_face`].
    pub fn with_face(mut self, face: FontFace, bytes: impl Into<Vec<u8>>) -> Self {
        self.set_face(face, bytes);
        self
    }

    /// Builder form of [`FontBook::push_fallback`].
    pub fn with_fallback(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.push_fallback(bytes);
        self
    }

    /// Install (or replace) the primary bytes for `face`.
    pub fn set_face(&mut self, face: FontFace, bytes: impl Into<Vec<u8>>) {
        let bytes: Vec<u8> = bytes.into();
        self.faces.insert(face, Arc::from(bytes));
    }

    /// Append a fallback face consulted after every primary.
    pub fn push_fallback(&mut self, bytes: impl Into<Vec<u8>>) {
        let bytes: Vec<u8> = bytes.into();
        self.fallback.push(Arc::from(bytes));
    }

    /// Read `path` into `face`.
    pub fn load_face(&mut self, face: FontFace, path: impl AsRef<Path>) -> PostcraftResult<()> {
        let bytes = read_font(path.as_ref())?;
        self.set_face(face, bytes);
        Ok(())
    }

    /// Read `path` as a fallback face.
    pub fn load_fallback(&mut self, path: impl AsRef<Path>) -> PostcraftResult<()> {
        let bytes = read_font(path.as_ref())?;
        self.push_fallback(bytes);
        Ok(())
    }

    /// Load every face named in `cfg`.
    pub fn from_config(cfg: &FontsConfig) -> PostcraftResult<Self> {
        let mut book = Self::new();
        for face in [FontFace::Sans, FontFace::Serif, FontFace::Heavy] {
            if let Some(path) = cfg.path(face) {
                book.load_face(face, path)?;
            }
        }
        for path in &cfg.fallback {
            book.load_fallback(path)?;
        }
        tracing::debug!(
            faces = book.faces.len(),
            fallbacks = book.fallback.len(),
            "loaded font book"
        );
        Ok(book)
    }

    /// Primary bytes for `face`, if installed.
    pub fn face(&self, face: FontFace) -> Option<&[u8]> {
        self.faces.get(&face).map(|b| &b[..])
    }

    /// True when `face` has primary bytes.
    pub fn has_face(&self, face: FontFace) -> bool {
        self.faces.contains_key(&face)
    }

    pub(crate) fn faces(&self) -> impl Iterator<Item = (FontFace, &[u8])> {
        self.faces.iter().map(|(f, b)| (*f, &b[..]))
    }

    pub(crate) fn fallbacks(&self) -> impl Iterator<Item = &[u8]> {
        self.fallback.iter().map(|b| &b[..])
    }
}

fn read_font(path: &Path) -> PostcraftResult<Vec<u8>> {
    let bytes = std::fs::read(path)
        .map_err(|e| PostcraftError::font(format!("read '{}': {e}", path.display())))?;
    if bytes.is_empty() {
        return Err(PostcraftError::font(format!(
            "font file '{}' is empty",
            path.display()
        )));
    }
    Ok(bytes)
}
