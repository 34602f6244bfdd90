//! Font setup.
//!
//! egui's bundled fonts have no CJK glyphs, so the Chinese catalog would render
//! as boxes. We look for a system CJK font and append it as a fallback to both
//! families; the default Latin fonts stay first.

use eframe::egui::{FontData, FontDefinitions, FontFamily};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const CJK_FONT_NAME: &str = "cjk-fallback";

/// Well-known CJK font locations, most specific first.
pub fn cjk_font_candidates() -> Vec<PathBuf> {
    [
        // Linux
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
        "/usr/share/fonts/wenquanyi/wqy-microhei/wqy-microhei.ttc",
        // macOS
        "/System/Library/Fonts/PingFang.ttc",
        "/System/Library/Fonts/STHeiti Light.ttc",
        // Windows
        "C:\\Windows\\Fonts\\msyh.ttc",
        "C:\\Windows\\Fonts\\simhei.ttf",
    ]
    .iter()
    .map(PathBuf::from)
    .collect()
}

/// Default fonts plus the first readable CJK fallback, if any.
pub fn setup_fonts() -> FontDefinitions {
    setup_fonts_from(&cjk_font_candidates())
}

pub fn setup_fonts_from(candidates: &[PathBuf]) -> FontDefinitions {
    let mut fonts = FontDefinitions::default();

    let Some((path, bytes)) = candidates.iter().find_map(|p| read_font(p)) else {
        tracing::warn!("no CJK font found, Chinese text may not render");
        return fonts;
    };
    tracing::debug!("using CJK fallback font {}", path.display());

    fonts
        .font_data
        .insert(CJK_FONT_NAME.to_owned(), Arc::new(FontData::from_owned(bytes)));
    for family in [FontFamily::Proportional, FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(CJK_FONT_NAME.to_owned());
    }
    fonts
}

fn read_font(path: &Path) -> Option<(&Path, Vec<u8>)> {
    std::fs::read(path).ok().map(|bytes| (path, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fonts_leave_defaults() {
        let fonts = setup_fonts_from(&[PathBuf::from("/definitely/not/here.ttc")]);
        assert!(!fonts.font_data.contains_key(CJK_FONT_NAME));
        assert_eq!(
            fonts.families.get(&FontFamily::Proportional),
            FontDefinitions::default().families.get(&FontFamily::Proportional)
        );
    }

    #[test]
    fn test_fallback_is_appended_last() {
        let dir = tempfile::tempdir().unwrap();
        let font = dir.path().join("fake.ttc");
        std::fs::write(&font, b"not really a font").unwrap();

        let fonts = setup_fonts_from(&[dir.path().join("missing.ttc"), font]);
        assert!(fonts.font_data.contains_key(CJK_FONT_NAME));
        let proportional = &fonts.families[&FontFamily::Proportional];
        assert_eq!(proportional.last().map(String::as_str), Some(CJK_FONT_NAME));
        assert!(proportional.len() > 1);
    }
}
