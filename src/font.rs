use crate::error::RouletteError;
use rusttype::Font;
use std::path::{Path, PathBuf};

/// Fonts tried in order when no path is configured.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

pub fn load_font_file(path: &Path) -> Result<Font<'static>, RouletteError> {
    let data = std::fs::read(path).map_err(|source| RouletteError::FontRead {
        path: path.to_path_buf(),
        source,
    })?;
    Font::try_from_vec(data).ok_or_else(|| RouletteError::FontParse(path.to_path_buf()))
}

/// Loads the configured font, or the first usable system font when none is
/// configured. An explicit path that can't be loaded is an error; a failed
/// system search yields `None` and the wheel is drawn without labels.
pub fn load_font(configured: Option<&Path>) -> Result<Option<Font<'static>>, RouletteError> {
    if let Some(path) = configured {
        let font = load_font_file(path)?;
        log::info!("Using font {}", path.display());
        return Ok(Some(font));
    }

    let found = SYSTEM_FONTS
        .iter()
        .map(PathBuf::from)
        .filter(|path| path.is_file())
        .find_map(|path| match load_font_file(&path) {
            Ok(font) => {
                log::info!("Using system font {}", path.display());
                Some(font)
            }
            Err(e) => {
                log::debug!("Skipping font: {}", e);
                None
            }
        });

    if found.is_none() {
        log::warn!("No usable font found, labels will not be drawn (pass --font to pick one)");
    }
    Ok(found)
}
