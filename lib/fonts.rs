//! Font-index maintenance and global-default helpers.
//!
//! These are thin pass-throughs to the backend; the only added behavior is
//! sorting and de-duplicating listings.

use std::path::PathBuf;
use itertools::Itertools;
use tracing::{ debug, info };
use crate::backend::{ Backend, FontManager };

/// Weight alias that makes Times New Roman render bold on some systems.
pub const ROMAN_WEIGHT_ALIAS: &str = "roman";

/// Restore every global drawing default to the backend's factory state.
pub fn reset_defaults<B>(backend: &mut B)
where B: Backend + ?Sized
{
    backend.reset_rc();
    debug!("global defaults reset");
}

/// Rescan installed fonts and rebuild the backend's font index.
pub fn regenerate_fonts<F>(fonts: &mut F)
where F: FontManager + ?Sized
{
    fonts.rebuild_cache();
    info!("font cache regenerated");
}

/// Sorted, de-duplicated family names of every indexed font.
pub fn list_font_names<F>(fonts: &F) -> Vec<String>
where F: FontManager + ?Sized
{
    fonts.fonts().into_iter()
        .map(|entry| entry.name)
        .sorted()
        .dedup()
        .collect()
}

/// Sorted, de-duplicated paths of every indexed font file.
pub fn list_font_files<F>(fonts: &F) -> Vec<PathBuf>
where F: FontManager + ?Sized
{
    fonts.fonts().into_iter()
        .map(|entry| entry.path)
        .sorted()
        .dedup()
        .collect()
}

/// Stop Times New Roman from rendering bold by dropping the `roman` weight
/// alias, then regenerate the font index. The index is regenerated even if the
/// alias was already gone.
pub fn fix_bold_times_new_roman<F>(fonts: &mut F)
where F: FontManager + ?Sized
{
    if fonts.remove_weight_alias(ROMAN_WEIGHT_ALIAS) {
        debug!(alias = ROMAN_WEIGHT_ALIAS, "removed weight alias");
    }
    regenerate_fonts(fonts);
}
