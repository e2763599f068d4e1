use std::path::Path;

use crate::foundation::error::{ReelError, ReelResult};

/// Font bytes ready for shaping, plus the face to use within them.
#[derive(Clone, Debug)]
pub struct FontFile {
    /// Raw font file (TTF, OTF or TTC).
    pub bytes: Vec<u8>,
    /// Face index inside a collection; 0 for single-face files.
    pub index: u32,
    /// Family name of the selected face when it came from the system database.
    pub family: Option<String>,
}

/// Resolves caption `font` settings to font bytes.
///
/// A value that names an existing file, or looks like a path (`/`, `\` or a font extension), is
/// read from disk. Anything else is treated as a family name (`"liberation-sans"`,
/// `"DejaVu Sans"`) and looked up among the installed system fonts. Matching ignores case and
/// punctuation, and also accepts PostScript names such as `LiberationSans-Bold`.
///
/// The system database is only scanned on the first family lookup.
#[derive(Default)]
pub struct FontLibrary {
    db: Option<fontdb::Database>,
}

impl FontLibrary {
    /// Create a library; no fonts are scanned yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `font` to bytes. Unknown files and families are [`ReelError::MissingAsset`].
    pub fn resolve(&mut self, font: &str) -> ReelResult<FontFile> {
        let font = font.trim();
        if font.is_empty() {
            return Err(ReelError::invalid_input("caption font must not be empty"));
        }

        let path = Path::new(font);
        if path.is_file() || looks_like_path(font) {
            return Ok(FontFile {
                bytes: load_font(path)?,
                index: 0,
                family: None,
            });
        }
        self.resolve_family(font)
    }

    /// Sorted, de-duplicated family names of the installed fonts.
    pub fn families(&mut self) -> Vec<String> {
        let mut out = self
            .db()
            .faces()
            .filter_map(|face| face.families.first().map(|(name, _)| name.clone()))
            .collect::<Vec<_>>();
        out.sort_by_key(|name| name.to_lowercase());
        out.dedup();
        out
    }

    fn resolve_family(&mut self, name: &str) -> ReelResult<FontFile> {
        let key = normalize_family(name);
        let db = self.db();
        let best = db
            .faces()
            .filter(|face| {
                normalize_family(&face.post_script_name) == key
                    || face
                        .families
                        .iter()
                        .any(|(family, _)| normalize_family(family) == key)
            })
            .min_by_key(|face| {
                (
                    face.style != fontdb::Style::Normal,
                    face.weight.0.abs_diff(fontdb::Weight::NORMAL.0),
                )
            })
            .ok_or_else(|| {
                ReelError::missing_asset(format!(
                    "font family '{name}' is not installed (list families with `reelforge fonts`)"
                ))
            })?;

        let family = best.families.first().map(|(family, _)| family.clone());
        let (bytes, index) = db
            .with_face_data(best.id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| {
                ReelError::missing_asset(format!("font family '{name}': face data unreadable"))
            })?;
        tracing::debug!(family = ?family, index, "resolved caption font family");
        Ok(FontFile {
            bytes,
            index,
            family,
        })
    }

    fn db(&mut self) -> &fontdb::Database {
        self.db.get_or_insert_with(|| {
            let mut db = fontdb::Database::new();
            db.load_system_fonts();
            tracing::debug!(faces = db.len(), "loaded system font database");
            db
        })
    }
}

/// Family names of every installed font, sorted.
pub fn system_font_families() -> Vec<String> {
    FontLibrary::new().families()
}

/// Read a font file. A missing or unreadable file is a [`ReelError::MissingAsset`].
pub fn load_font(path: &Path) -> ReelResult<Vec<u8>> {
    std::fs::read(path)
        .map_err(|e| ReelError::missing_asset(format!("font '{}': {e}", path.display())))
}

fn looks_like_path(s: &str) -> bool {
    if s.contains('/') || s.contains('\\') {
        return true;
    }
    Path::new(s)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| matches!(e.to_ascii_lowercase().as_str(), "ttf" | "otf" | "ttc"))
}

fn normalize_family(s: &str) -> String {
    s.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/caption/fonts.rs"]
mod tests;
