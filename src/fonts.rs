use ab_glyph::FontVec;
use anyhow::anyhow;
use log::warn;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

const BOLD_FONT: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf";
const REGULAR_FONT: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";
const MONO_FONT: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf";

const FONT_ROOT: &str = "/usr/share/fonts";

const FALLBACK_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
];

/// The three faces the renderer draws with. Point sizes are applied per
/// draw call, so a face covers every size of its role.
pub struct FontSet {
    pub bold: FontVec,
    pub regular: FontVec,
    pub mono: FontVec,
}

impl FontSet {
    /// Loads the preferred DejaVu faces, falling back per role to common
    /// system fonts and finally to anything found under `/usr/share/fonts`.
    /// Fallback is reported once as a warning, not an error.
    pub fn load() -> anyhow::Result<Self> {
        let mut fell_back = false;
        let bold = load_role(BOLD_FONT, &mut fell_back)?;
        let regular = load_role(REGULAR_FONT, &mut fell_back)?;
        let mono = load_role(MONO_FONT, &mut fell_back)?;
        if fell_back {
            warn!("⚠ Preferred fonts unavailable, substituting a default font");
        }
        Ok(FontSet {
            bold,
            regular,
            mono,
        })
    }
}

fn load_role(preferred: &str, fell_back: &mut bool) -> anyhow::Result<FontVec> {
    if let Some(face) = load_face(Path::new(preferred)) {
        return Ok(face);
    }
    *fell_back = true;
    FALLBACK_FONTS
        .iter()
        .find_map(|candidate| load_face(Path::new(candidate)))
        .or_else(scan_system_fonts)
        .ok_or_else(|| anyhow!("no usable font found under {}", FONT_ROOT))
}

fn load_face(path: &Path) -> Option<FontVec> {
    let data = fs::read(path).ok()?;
    FontVec::try_from_vec(data).ok()
}

/// Last resort: first loadable `.ttf` anywhere in the system font tree.
fn scan_system_fonts() -> Option<FontVec> {
    WalkDir::new(FONT_ROOT)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("ttf"))
        })
        .find_map(|entry| load_face(entry.path()))
}
