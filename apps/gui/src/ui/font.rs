// egui ships no CJK glyphs and cannot fall back to system fonts on its own
// Issue to track: https://github.com/emilk/egui/issues/5233

use egui::{Context, FontData, FontDefinitions, FontFamily};
use font_kit::{
    family_name::FamilyName, handle::Handle, properties::Properties, source::SystemSource,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

const CJK_FONT_NAME: &str = "cjk";

/// Families covering Traditional Chinese, most specific first
const CJK_FAMILIES: &[&str] = &[
    "Noto Sans CJK TC",
    "Noto Sans TC",
    "Source Han Sans TW",
    "Microsoft JhengHei",
    "PingFang TC",
    "Heiti TC",
    "WenQuanYi Zen Hei",
    "Noto Sans CJK SC",
];

fn load_font_file(path: &Path) -> Option<Vec<u8>> {
    match std::fs::read(path) {
        Ok(bytes) => {
            info!("Loaded font from {}", path.display());
            Some(bytes)
        }
        Err(e) => {
            warn!("Could not load configured font {}: {e}", path.display());
            None
        }
    }
}

/// Attempt to load a system font by any of the given `family_names`, returning the first match.
fn load_font_family(family_names: &[&str]) -> Option<Vec<u8>> {
    let system_source = SystemSource::new();
    for &name in family_names {
        let font_handle = system_source
            .select_best_match(&[FamilyName::Title(name.to_string())], &Properties::new());
        match font_handle {
            Ok(Handle::Memory { bytes, .. }) => {
                info!("Loaded {name} from memory.");
                return Some(bytes.to_vec());
            }
            Ok(Handle::Path { path, .. }) => {
                info!("Loaded {name} from path: {}", path.display());
                match std::fs::read(&path) {
                    Ok(data) => return Some(data),
                    Err(e) => debug!("Could not read {}: {e}", path.display()),
                }
            }
            Err(e) => debug!("Could not load {name}: {e:?}"),
        }
    }
    None
}

/// The configured font wins, otherwise the system is asked by family name
fn load_cjk_font(configured: Option<&Path>) -> Option<Vec<u8>> {
    configured
        .and_then(load_font_file)
        .or_else(|| load_font_family(CJK_FAMILIES))
}

/// Keeps egui's default fonts and puts a CJK capable one in front of them.
/// Without one the UI still works but Chinese text renders as boxes.
pub fn setup_fonts(ctx: &Context, configured: Option<&Path>) {
    let Some(bytes) = load_cjk_font(configured) else {
        warn!("No CJK font found, set `ui.font-path` in the config file");
        return;
    };

    let mut fonts = FontDefinitions::default();
    fonts.font_data.insert(
        CJK_FONT_NAME.to_owned(),
        Arc::new(FontData::from_owned(bytes)),
    );

    for family in [FontFamily::Proportional, FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .insert(0, CJK_FONT_NAME.to_owned());
    }

    ctx.set_fonts(fonts);
}
