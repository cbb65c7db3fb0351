//! Symbol image catalog.
//!
//! Each tape symbol is drawn from an image file in the configured symbol
//! directory. The catalog is an immutable value built for one tile size;
//! zooming builds a fresh catalog at the new size and swaps it in wholesale,
//! so a frame never observes a partially reloaded set.
//!
//! Lookup runs in three tiers: the literal character, then the alias table
//! for characters a filename cannot carry, then the `ERR` glyph. The `ERR`
//! entry is synthesized at load time when the directory does not provide
//! one, so resolution can never fail.

use std::collections::HashMap;
use std::path::Path;

use egui::{Color32, ColorImage};
use image::imageops::FilterType;
use log::warn;

/// Key of the designated fallback glyph.
pub const ERROR_KEY: &str = "ERR";

/// Filename aliases for symbols that cannot name a file directly.
const ALIASES: &[(char, &str)] = &[
    ('*', "star"),
    ('<', "langbrack"),
    ('>', "rangbrack"),
    ('│', "vline"),
    ('─', "hline"),
    ('┐', "ldcorn"),
    ('┌', "rdcorn"),
    ('└', "rucorn"),
    ('┘', "lucorn"),
    ('\'', "quote"),
    ('"', "dquote"),
    ('?', "qmark"),
    (';', "semicolon"),
    ('|', "pipe"),
];

/// All symbol images scaled to one tile size.
#[derive(Clone)]
pub struct SymbolCatalog {
    tile_size: u32,
    images: HashMap<String, ColorImage>,
}

impl SymbolCatalog {
    /// Read every image in `dir`, scaled to `tile_size`.
    ///
    /// The file stem is the catalog key; a trailing underscore is stripped
    /// so reserved names stay usable as filenames (`ERR_` reads as `ERR`).
    /// Unreadable files are skipped with a warning, and a placeholder `ERR`
    /// glyph is synthesized when the directory does not supply one.
    pub fn load(dir: &Path, tile_size: u32) -> Self {
        let mut images = HashMap::new();

        match std::fs::read_dir(dir) {
            Ok(entries) => {
                for entry in entries.flatten() {
                    let path = entry.path();
                    let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                        continue;
                    };
                    let key = stem.strip_suffix('_').unwrap_or(stem);

                    match image::open(&path) {
                        Ok(img) => {
                            let scaled = img
                                .resize_exact(tile_size, tile_size, FilterType::Triangle)
                                .to_rgba8();
                            images.insert(
                                key.to_string(),
                                ColorImage::from_rgba_unmultiplied(
                                    [tile_size as usize, tile_size as usize],
                                    scaled.as_raw(),
                                ),
                            );
                        }
                        Err(e) => warn!("skipping unreadable symbol image {:?}: {}", path, e),
                    }
                }
            }
            Err(e) => warn!("cannot read symbol directory {:?}: {}", dir, e),
        }

        images
            .entry(ERROR_KEY.to_string())
            .or_insert_with(|| error_glyph(tile_size));

        Self { tile_size, images }
    }

    /// Resolve a symbol to its catalog key and image.
    ///
    /// Falls through literal -> alias -> `ERR`; the `ERR` entry always
    /// exists, so this cannot fail.
    pub fn resolve(&self, symbol: char) -> (&str, &ColorImage) {
        let mut buf = [0u8; 4];
        let literal: &str = symbol.encode_utf8(&mut buf);
        if let Some((key, img)) = self.images.get_key_value(literal) {
            return (key.as_str(), img);
        }

        if let Some(name) = alias(symbol) {
            if let Some((key, img)) = self.images.get_key_value(name) {
                return (key.as_str(), img);
            }
        }

        let (key, img) = self
            .images
            .get_key_value(ERROR_KEY)
            .expect("ERR glyph is synthesized at load");
        (key.as_str(), img)
    }

    /// Tile size this catalog was scaled to
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Number of catalog entries, the synthesized `ERR` included
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

fn alias(symbol: char) -> Option<&'static str> {
    ALIASES
        .iter()
        .find(|(c, _)| *c == symbol)
        .map(|(_, name)| *name)
}

/// Magenta square with a dark cross, visible at any tile size.
fn error_glyph(tile_size: u32) -> ColorImage {
    let n = tile_size as usize;
    let mut img = ColorImage::new([n, n], Color32::from_rgb(180, 0, 180));
    for i in 0..n {
        img.pixels[i * n + i] = Color32::BLACK;
        img.pixels[i * n + (n - 1 - i)] = Color32::BLACK;
    }
    img
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::path::PathBuf;

    /// Build a throwaway symbol directory with 8x8 single-color PNGs.
    fn symbol_dir(name: &str, files: &[&str]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tapescope_assets_{}", name));
        std::fs::remove_dir_all(&dir).ok();
        std::fs::create_dir_all(&dir).unwrap();
        for file in files {
            RgbaImage::from_pixel(8, 8, Rgba([40, 120, 200, 255]))
                .save(dir.join(format!("{}.png", file)))
                .unwrap();
        }
        dir
    }

    #[test]
    fn test_literal_lookup_wins() {
        let dir = symbol_dir("literal", &["a", "star"]);
        let catalog = SymbolCatalog::load(&dir, 16);
        assert_eq!(catalog.resolve('a').0, "a");
    }

    #[test]
    fn test_alias_lookup_covers_reserved_characters() {
        let dir = symbol_dir("alias", &["star", "qmark", "vline"]);
        let catalog = SymbolCatalog::load(&dir, 16);
        assert_eq!(catalog.resolve('*').0, "star");
        assert_eq!(catalog.resolve('?').0, "qmark");
        assert_eq!(catalog.resolve('│').0, "vline");
    }

    #[test]
    fn test_unmapped_symbol_resolves_to_error_glyph() {
        let dir = symbol_dir("unmapped", &["star"]);
        let catalog = SymbolCatalog::load(&dir, 16);
        // 'z' has no file and no alias entry
        assert_eq!(catalog.resolve('z').0, ERROR_KEY);
        // '<' has an alias, but no langbrack file exists
        assert_eq!(catalog.resolve('<').0, ERROR_KEY);
    }

    #[test]
    fn test_trailing_underscore_is_stripped() {
        let dir = symbol_dir("underscore", &["ERR_", "con_"]);
        let catalog = SymbolCatalog::load(&dir, 16);
        assert_eq!(catalog.resolve('z').0, ERROR_KEY);
        assert!(catalog.images.contains_key("con"));
    }

    #[test]
    fn test_missing_directory_still_yields_err_glyph() {
        let catalog = SymbolCatalog::load(Path::new("/nonexistent/symbols"), 16);
        assert_eq!(catalog.len(), 1);
        let (key, img) = catalog.resolve('*');
        assert_eq!(key, ERROR_KEY);
        assert_eq!(img.size, [16, 16]);
    }

    #[test]
    fn test_images_are_scaled_to_tile_size() {
        let dir = symbol_dir("scaled", &["star"]);
        for tile_size in [4, 32, 128] {
            let catalog = SymbolCatalog::load(&dir, tile_size);
            let (_, img) = catalog.resolve('*');
            assert_eq!(img.size, [tile_size as usize, tile_size as usize]);
            assert_eq!(catalog.tile_size(), tile_size);
        }
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        let dir = symbol_dir("corrupt", &["star"]);
        std::fs::write(dir.join("bad.png"), b"not an image").unwrap();
        let catalog = SymbolCatalog::load(&dir, 16);
        // star + synthesized ERR; bad.png dropped
        assert_eq!(catalog.len(), 2);
    }
}
