//! Named style presets and their resolution into a single set of options.
//!
//! A [`Preset`] bundles the three things a style can change: post-draw
//! [`StyleOptions`], global [`RcParams`], and optionally the default color
//! palette. Presets live in a [`PresetRegistry`]; resolving a [`StyleSpec`]
//! against it always starts from the [`BASELINE`] preset, layers the named
//! presets in order, and finally the caller's overrides.

use std::collections::BTreeMap;
use serde::{ Deserialize, Serialize };
use tracing::debug;
use crate::{
    colors::{ ColorSet, Rgb },
    error::{ StyleError, StyleResult },
    style::{ BASELINE, RcParams, RcValue, StyleOptions, StyleSpec },
};

/// A named bundle of style settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Preset {
    /// Default color cycle, if the preset replaces it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub palette: Option<Vec<Rgb>>,
    /// Options applied to an axes after drawing.
    #[serde(default)]
    pub fix: StyleOptions,
    /// Global drawing defaults.
    #[serde(default)]
    pub rc: RcParams,
}

impl Preset {
    pub fn new() -> Self { Self::default() }

    pub fn with_fix(mut self, fix: StyleOptions) -> Self {
        self.fix = fix;
        self
    }

    pub fn with_rc(mut self, rc: RcParams) -> Self {
        self.rc = rc;
        self
    }

    pub fn with_palette(mut self, palette: Vec<Rgb>) -> Self {
        self.palette = Some(palette);
        self
    }
}

/// Global settings produced by resolving a style.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolvedStyle {
    pub rc: RcParams,
    pub palette: Option<Vec<Rgb>>,
}

fn rc<const N: usize>(entries: [(&str, RcValue); N]) -> RcParams {
    entries.into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

fn list<const N: usize>(items: [RcValue; N]) -> RcValue {
    RcValue::List(items.into())
}

/// Lookup table from preset name to [`Preset`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PresetRegistry {
    presets: BTreeMap<String, Preset>,
}

impl PresetRegistry {
    /// A registry with no presets at all, not even the baseline.
    pub fn empty() -> Self { Self::default() }

    /// The built-in presets.
    ///
    /// | Name        | Post-draw options                                        |
    /// |:------------|:---------------------------------------------------------|
    /// | `basic`     | clean spines, draggable legend/text, tight layout, labelpad 10 |
    /// | `article`   | spines kept                                              |
    /// | `article_s` | spines kept, labelpad 5, spine width 0.5                 |
    /// | `poster`    |                                                          |
    /// | `B&W`       |                                                          |
    /// | `talk`      | spines kept                                              |
    /// | `origin`    | spines kept                                              |
    /// | `latex`     |                                                          |
    pub fn builtin() -> Self {
        let mut reg = Self::empty();

        reg.insert(
            BASELINE,
            Preset::new()
                .with_fix(
                    StyleOptions::new()
                        .clean_spines(true)
                        .draggable_legend(true)
                        .draggable_text(true)
                        .tight_layout(true)
                        .labelpad(10.0)
                )
                .with_rc(rc([
                    ("axes.labelsize",    "large".into()),
                    ("axes.linewidth",    1.0.into()),
                    ("axes.titlesize",    "large".into()),
                    ("figure.dpi",        100.0.into()),
                    ("font.size",         14.0.into()),
                    ("legend.fancybox",   false.into()),
                    ("legend.fontsize",   "medium".into()),
                    ("legend.framealpha", 0.8.into()),
                    ("lines.linewidth",   1.5.into()),
                    ("lines.markersize",  6.0.into()),
                    ("savefig.bbox",      "tight".into()),
                    ("savefig.dpi",       300.0.into()),
                    ("xtick.direction",   "in".into()),
                    ("xtick.major.size",  5.0.into()),
                    ("xtick.minor.size",  3.0.into()),
                    ("ytick.direction",   "in".into()),
                    ("ytick.major.size",  5.0.into()),
                    ("ytick.minor.size",  3.0.into()),
                ]))
                .with_palette(ColorSet::Publication.colors()),
        );

        reg.insert(
            "article",
            Preset::new()
                .with_fix(StyleOptions::new().clean_spines(false))
                .with_rc(rc([
                    ("axes.labelsize",  "medium".into()),
                    ("figure.figsize",  list([3.5.into(), 2.625.into()])),
                    ("font.family",     "serif".into()),
                    ("font.size",       10.0.into()),
                    ("lines.linewidth", 1.0.into()),
                ])),
        );

        reg.insert(
            "article_s",
            Preset::new()
                .with_fix(
                    StyleOptions::new()
                        .clean_spines(false)
                        .labelpad(5.0)
                        .spine_linewidth(0.5)
                )
                .with_rc(rc([
                    ("axes.linewidth",    0.5.into()),
                    ("figure.figsize",    list([3.0.into(), 2.25.into()])),
                    ("font.size",         8.0.into()),
                    ("lines.linewidth",   0.8.into()),
                    ("xtick.major.width", 0.5.into()),
                    ("ytick.major.width", 0.5.into()),
                ])),
        );

        reg.insert(
            "poster",
            Preset::new()
                .with_rc(rc([
                    ("axes.linewidth",   2.0.into()),
                    ("figure.figsize",   list([10.0.into(), 7.5.into()])),
                    ("font.size",        24.0.into()),
                    ("lines.linewidth",  3.0.into()),
                    ("lines.markersize", 10.0.into()),
                ])),
        );

        reg.insert(
            "B&W",
            Preset::new()
                .with_rc(rc([
                    ("image.cmap", "gray".into()),
                ]))
                .with_palette(ColorSet::Grayscale.colors()),
        );

        reg.insert(
            "talk",
            Preset::new()
                .with_fix(StyleOptions::new().clean_spines(false))
                .with_rc(rc([
                    ("axes.grid",       true.into()),
                    ("font.size",       18.0.into()),
                    ("lines.linewidth", 2.5.into()),
                ])),
        );

        reg.insert(
            "origin",
            Preset::new()
                .with_fix(StyleOptions::new().clean_spines(false))
                .with_rc(rc([
                    ("axes.linewidth",  1.5.into()),
                    ("font.family",     "sans-serif".into()),
                    ("font.sans-serif", list(["Arial".into()])),
                    ("xtick.top",       true.into()),
                    ("ytick.right",     true.into()),
                ])),
        );

        reg.insert(
            "latex",
            Preset::new()
                .with_rc(rc([
                    ("font.family", "serif".into()),
                    ("font.serif",  list(["Computer Modern Roman".into()])),
                    ("text.usetex", true.into()),
                ])),
        );

        reg
    }

    /// Register or replace a preset, returning the one it replaced.
    pub fn insert(&mut self, name: &str, preset: Preset) -> Option<Preset> {
        self.presets.insert(name.to_string(), preset)
    }

    /// Copy every preset of `other` into `self`, replacing same-named ones.
    pub fn extend(&mut self, other: PresetRegistry) {
        self.presets.extend(other.presets);
    }

    pub fn contains(&self, name: &str) -> bool { self.presets.contains_key(name) }

    /// Sorted preset names.
    pub fn names(&self) -> Vec<String> { self.presets.keys().cloned().collect() }

    pub fn len(&self) -> usize { self.presets.len() }

    pub fn is_empty(&self) -> bool { self.presets.is_empty() }

    /// Look up a preset by name.
    pub fn get(&self, name: &str) -> StyleResult<&Preset> {
        self.presets.get(name)
            .ok_or_else(|| StyleError::UnknownStyle {
                name: name.to_string(),
                available: self.names(),
            })
    }

    /// Look up every preset in `style`, with the baseline prepended, in
    /// application order. Fails on the first unknown name.
    pub fn presets_for(&self, style: &StyleSpec)
        -> StyleResult<Vec<(String, &Preset)>>
    {
        style.with_baseline()
            .into_iter()
            .map(|name| self.get(&name).map(|p| (name, p)))
            .collect()
    }

    /// Merge post-draw options: baseline, then each preset of `style`, then
    /// `overrides`.
    pub fn resolve(&self, style: &StyleSpec, overrides: &StyleOptions)
        -> StyleResult<StyleOptions>
    {
        let presets = self.presets_for(style)?;
        let mut opts = StyleOptions::new();
        presets.iter()
            .for_each(|(_, preset)| opts.layer(&preset.fix));
        opts.layer(overrides);
        debug!(
            styles = ?presets.iter().map(|(n, _)| n.as_str()).collect::<Vec<_>>(),
            options = ?opts.keys(),
            "resolved style options"
        );
        Ok(opts)
    }

    /// Merge global settings: baseline, then each preset of `style`, then
    /// `overrides`. The last preset that sets a palette wins.
    ///
    /// Rc keys of the overrides and of every involved preset are checked
    /// before anything is merged.
    pub fn resolve_global(&self, style: &StyleSpec, overrides: &RcParams)
        -> StyleResult<ResolvedStyle>
    {
        overrides.validate()?;
        let presets = self.presets_for(style)?;
        presets.iter()
            .try_for_each(|(_, preset)| preset.rc.validate())?;
        let mut resolved = ResolvedStyle::default();
        for (_, preset) in presets.iter() {
            resolved.rc.layer(&preset.rc);
            if let Some(palette) = &preset.palette {
                resolved.palette = Some(palette.clone());
            }
        }
        resolved.rc.layer(overrides);
        debug!(
            styles = ?presets.iter().map(|(n, _)| n.as_str()).collect::<Vec<_>>(),
            rc_count = resolved.rc.len(),
            "resolved global style"
        );
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_rc_keys_are_well_formed() {
        let reg = PresetRegistry::builtin();
        for name in reg.names() {
            reg.get(&name).unwrap().rc.validate().unwrap();
        }
        assert!(reg.contains(BASELINE));
        assert_eq!(reg.len(), 8);
    }

    #[test]
    fn article_s_layers_over_basic() {
        let reg = PresetRegistry::builtin();
        let opts = reg.resolve(&"article_s".into(), &StyleOptions::new()).unwrap();
        assert_eq!(opts.clean_spines, Some(false));
        assert_eq!(opts.draggable_legend, Some(true));
        assert_eq!(opts.labelpad, Some(5.0));
        assert_eq!(opts.spine_linewidth, Some(0.5));
    }

    #[test]
    fn palette_follows_last_preset_that_sets_one() {
        let reg = PresetRegistry::builtin();
        let global = reg.resolve_global(&["article", "B&W"].into(), &RcParams::new()).unwrap();
        assert_eq!(global.palette, Some(ColorSet::Grayscale.colors()));
        assert_eq!(global.rc.get("font.size"), Some(&RcValue::Float(10.0)));
        assert_eq!(global.rc.get("image.cmap"), Some(&RcValue::from("gray")));

        let global = reg.resolve_global(&"article".into(), &RcParams::new()).unwrap();
        assert_eq!(global.palette, Some(ColorSet::Publication.colors()));
    }

    #[test]
    fn missing_baseline_is_reported() {
        let mut reg = PresetRegistry::empty();
        reg.insert("article", Preset::new());
        match reg.resolve(&"article".into(), &StyleOptions::new()) {
            Err(StyleError::UnknownStyle { name, available }) => {
                assert_eq!(name, "basic");
                assert_eq!(available, vec!["article".to_string()]);
            },
            other => panic!("unexpected result {:?}", other),
        }
    }
}
