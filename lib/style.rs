//! Typed style options and the global drawing defaults ("rc params") a preset
//! carries.
//!
//! Options that can only be applied to an axes after it has been drawn on are
//! collected in [`StyleOptions`]. Every field is optional so that presets and
//! caller overrides can be layered on top of one another with
//! [`StyleOptions::layer`]; the final, fully-defaulted set consumed by
//! [`fix_axes`][crate::fixups::fix_axes] is [`FixParams`].

use std::{
    collections::BTreeMap,
    fmt,
    sync::OnceLock,
};
use regex::Regex;
use serde::{ Deserialize, Serialize };
use crate::error::{ StyleError, StyleResult };

/// Name of the baseline preset that is always applied first.
pub const BASELINE: &str = "basic";

/// An ordered list of preset names.
///
/// Constructed from a single name or any collection of names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleSpec(Vec<String>);

impl StyleSpec {
    /// The names as given, without the baseline prepended.
    pub fn names(&self) -> &[String] { &self.0 }

    /// The names in application order: the baseline first unless it already
    /// leads the list.
    pub fn with_baseline(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::with_capacity(self.0.len() + 1);
        if self.0.first().map(|s| s.as_str()) != Some(BASELINE) {
            names.push(BASELINE.to_string());
        }
        names.extend(self.0.iter().cloned());
        names
    }
}

impl Default for StyleSpec {
    fn default() -> Self { Self(vec![BASELINE.to_string()]) }
}

impl From<&str> for StyleSpec {
    fn from(name: &str) -> Self { Self(vec![name.to_string()]) }
}

impl From<String> for StyleSpec {
    fn from(name: String) -> Self { Self(vec![name]) }
}

impl From<&[&str]> for StyleSpec {
    fn from(names: &[&str]) -> Self {
        Self(names.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for StyleSpec {
    fn from(names: [&str; N]) -> Self {
        Self(names.iter().map(|s| s.to_string()).collect())
    }
}

impl From<Vec<String>> for StyleSpec {
    fn from(names: Vec<String>) -> Self { Self(names) }
}

impl From<Vec<&str>> for StyleSpec {
    fn from(names: Vec<&str>) -> Self {
        Self(names.into_iter().map(|s| s.to_string()).collect())
    }
}

/// A single rc parameter value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RcValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<RcValue>),
}

impl RcValue {
    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Boolean view of the value, if it has one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for RcValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{:?}", x),
            Self::Str(s) => write!(f, "{:?}", s),
            Self::List(items) => {
                write!(f, "[")?;
                for (k, item) in items.iter().enumerate() {
                    if k > 0 { write!(f, ", ")?; }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            },
        }
    }
}

impl From<bool> for RcValue {
    fn from(b: bool) -> Self { Self::Bool(b) }
}

impl From<i64> for RcValue {
    fn from(i: i64) -> Self { Self::Int(i) }
}

impl From<i32> for RcValue {
    fn from(i: i32) -> Self { Self::Int(i.into()) }
}

impl From<f64> for RcValue {
    fn from(f: f64) -> Self { Self::Float(f) }
}

impl From<&str> for RcValue {
    fn from(s: &str) -> Self { Self::Str(s.to_string()) }
}

impl From<String> for RcValue {
    fn from(s: String) -> Self { Self::Str(s) }
}

fn rc_key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-z][a-z0-9_\-]*(\.[a-z][a-z0-9_\-]*)*$")
            .expect("rc key pattern is valid")
    })
}

/// Return `Ok` if `key` looks like a dotted rc parameter name, e.g.
/// `lines.linewidth` or `xtick.major.size`.
pub fn check_rc_key(key: &str) -> StyleResult<()> {
    if rc_key_pattern().is_match(key) {
        Ok(())
    } else {
        Err(StyleError::InvalidRcKey(key.to_string()))
    }
}

/// Global drawing defaults, applied verbatim to the backend.
///
/// Keys are not interpreted; they are only checked to be well-formed dotted
/// names.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RcParams(BTreeMap<String, RcValue>);

impl RcParams {
    pub fn new() -> Self { Self::default() }

    /// Insert a value, rejecting malformed keys.
    pub fn insert<V>(&mut self, key: &str, value: V) -> StyleResult<Option<RcValue>>
    where V: Into<RcValue>
    {
        check_rc_key(key)?;
        Ok(self.0.insert(key.to_string(), value.into()))
    }

    /// Builder-style [`insert`][Self::insert].
    pub fn with<V>(mut self, key: &str, value: V) -> StyleResult<Self>
    where V: Into<RcValue>
    {
        self.insert(key, value)?;
        Ok(self)
    }

    pub fn get(&self, key: &str) -> Option<&RcValue> { self.0.get(key) }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RcValue)> + '_ {
        self.0.iter()
    }

    /// Copy every entry of `other` over `self`.
    pub fn layer(&mut self, other: &RcParams) {
        other.iter()
            .for_each(|(k, v)| { self.0.insert(k.clone(), v.clone()); });
    }

    /// Check every key; used after deserialization, which bypasses
    /// [`insert`][Self::insert].
    pub fn validate(&self) -> StyleResult<()> {
        self.0.keys().try_for_each(|k| check_rc_key(k))
    }
}

impl FromIterator<(String, RcValue)> for RcParams {
    fn from_iter<I>(iter: I) -> Self
    where I: IntoIterator<Item = (String, RcValue)>
    {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RcParams {
    type Item = (&'a String, &'a RcValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, RcValue>;

    fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

/// Names of the options recognized by [`StyleOptions::set`].
pub const OPTION_NAMES: &[&str] = &[
    "clean_spines",
    "draggable_legend",
    "draggable_text",
    "tight_layout",
    "labelpad",
    "spine_linewidth",
];

/// Post-draw styling options, each one possibly unset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleOptions {
    /// Hide the top and right spines and keep ticks on the left and bottom.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clean_spines: Option<bool>,
    /// Make an attached legend draggable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draggable_legend: Option<bool>,
    /// Make every annotation draggable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draggable_text: Option<bool>,
    /// Compact the figure layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tight_layout: Option<bool>,
    /// Axis label padding, in points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labelpad: Option<f64>,
    /// Line width of all four spines, in points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spine_linewidth: Option<f64>,
}

fn want_bool(key: &str, value: &RcValue) -> StyleResult<bool> {
    value.as_bool()
        .ok_or_else(|| StyleError::InvalidOption {
            key: key.to_string(),
            expected: "a boolean",
            got: value.to_string(),
        })
}

fn want_number(key: &str, value: &RcValue) -> StyleResult<f64> {
    value.as_f64()
        .ok_or_else(|| StyleError::InvalidOption {
            key: key.to_string(),
            expected: "a number",
            got: value.to_string(),
        })
}

impl StyleOptions {
    pub fn new() -> Self { Self::default() }

    pub fn clean_spines(mut self, onoff: bool) -> Self {
        self.clean_spines = Some(onoff);
        self
    }

    pub fn draggable_legend(mut self, onoff: bool) -> Self {
        self.draggable_legend = Some(onoff);
        self
    }

    pub fn draggable_text(mut self, onoff: bool) -> Self {
        self.draggable_text = Some(onoff);
        self
    }

    pub fn tight_layout(mut self, onoff: bool) -> Self {
        self.tight_layout = Some(onoff);
        self
    }

    pub fn labelpad(mut self, pad: f64) -> Self {
        self.labelpad = Some(pad);
        self
    }

    pub fn spine_linewidth(mut self, width: f64) -> Self {
        self.spine_linewidth = Some(width);
        self
    }

    /// Set an option by name.
    ///
    /// Unrecognized names are rejected rather than silently carried along;
    /// use [`RcParams`] for arbitrary backend parameters.
    pub fn set<V>(&mut self, key: &str, value: V) -> StyleResult<()>
    where V: Into<RcValue>
    {
        let value: RcValue = value.into();
        match key {
            "clean_spines" =>
                self.clean_spines = Some(want_bool(key, &value)?),
            "draggable_legend" =>
                self.draggable_legend = Some(want_bool(key, &value)?),
            "draggable_text" =>
                self.draggable_text = Some(want_bool(key, &value)?),
            "tight_layout" =>
                self.tight_layout = Some(want_bool(key, &value)?),
            "labelpad" =>
                self.labelpad = Some(want_number(key, &value)?),
            "spine_linewidth" =>
                self.spine_linewidth = Some(want_number(key, &value)?),
            _ => {
                return Err(StyleError::UnknownOption {
                    key: key.to_string(),
                    known: OPTION_NAMES.iter().map(|s| s.to_string()).collect(),
                });
            },
        }
        Ok(())
    }

    /// Build from `(name, value)` pairs, failing on the first unrecognized
    /// name.
    pub fn from_pairs<I, K, V>(pairs: I) -> StyleResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<RcValue>,
    {
        let mut opts = Self::new();
        for (k, v) in pairs.into_iter() {
            opts.set(k.as_ref(), v)?;
        }
        Ok(opts)
    }

    /// Overwrite every option that is set in `other`.
    pub fn layer(&mut self, other: &StyleOptions) {
        if other.clean_spines.is_some() { self.clean_spines = other.clean_spines; }
        if other.draggable_legend.is_some() { self.draggable_legend = other.draggable_legend; }
        if other.draggable_text.is_some() { self.draggable_text = other.draggable_text; }
        if other.tight_layout.is_some() { self.tight_layout = other.tight_layout; }
        if other.labelpad.is_some() { self.labelpad = other.labelpad; }
        if other.spine_linewidth.is_some() { self.spine_linewidth = other.spine_linewidth; }
    }

    /// Names of the options that are set, in declaration order.
    pub fn keys(&self) -> Vec<&'static str> {
        let set = [
            self.clean_spines.is_some(),
            self.draggable_legend.is_some(),
            self.draggable_text.is_some(),
            self.tight_layout.is_some(),
            self.labelpad.is_some(),
            self.spine_linewidth.is_some(),
        ];
        OPTION_NAMES.iter().zip(set)
            .filter_map(|(name, is_set)| is_set.then_some(*name))
            .collect()
    }
}

/// Fully-resolved post-draw options.
///
/// Unset boolean options are off, and an unset label padding falls back to
/// [`FixParams::DEFAULT_LABELPAD`]. An unset spine line width leaves the
/// spines alone.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixParams {
    pub clean_spines: bool,
    pub draggable_legend: bool,
    pub draggable_text: bool,
    pub tight_layout: bool,
    pub labelpad: f64,
    pub spine_linewidth: Option<f64>,
}

impl FixParams {
    /// Label padding used when no preset sets one.
    pub const DEFAULT_LABELPAD: f64 = 10.0;
}

impl From<&StyleOptions> for FixParams {
    fn from(opts: &StyleOptions) -> Self {
        Self {
            clean_spines: opts.clean_spines.unwrap_or(false),
            draggable_legend: opts.draggable_legend.unwrap_or(false),
            draggable_text: opts.draggable_text.unwrap_or(false),
            tight_layout: opts.tight_layout.unwrap_or(false),
            labelpad: opts.labelpad.unwrap_or(Self::DEFAULT_LABELPAD),
            spine_linewidth: opts.spine_linewidth,
        }
    }
}

impl From<StyleOptions> for FixParams {
    fn from(opts: StyleOptions) -> Self { (&opts).into() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_prepended_once() {
        assert_eq!(StyleSpec::from("article").with_baseline(), vec!["basic", "article"]);
        assert_eq!(StyleSpec::from(["basic", "poster"]).with_baseline(), vec!["basic", "poster"]);
        assert_eq!(
            StyleSpec::from(["article", "basic"]).with_baseline(),
            vec!["basic", "article", "basic"],
        );
        assert_eq!(StyleSpec::from(Vec::<String>::new()).with_baseline(), vec!["basic"]);
    }

    #[test]
    fn set_rejects_unknown_and_mistyped() {
        let mut opts = StyleOptions::new();
        opts.set("labelpad", 4).unwrap();
        assert_eq!(opts.labelpad, Some(4.0));
        assert!(matches!(
            opts.set("title_offset", 1.1),
            Err(StyleError::UnknownOption { key, .. }) if key == "title_offset"
        ));
        assert!(matches!(
            opts.set("clean_spines", "yes"),
            Err(StyleError::InvalidOption { expected: "a boolean", .. })
        ));
    }

    #[test]
    fn layer_only_overwrites_set_fields() {
        let mut base = StyleOptions::new().clean_spines(true).labelpad(10.0);
        base.layer(&StyleOptions::new().clean_spines(false));
        assert_eq!(base, StyleOptions::new().clean_spines(false).labelpad(10.0));
        assert_eq!(base.keys(), vec!["clean_spines", "labelpad"]);
    }

    #[test]
    fn rc_keys_are_checked() {
        let mut rc = RcParams::new();
        assert!(rc.insert("lines.linewidth", 2.0).is_ok());
        assert!(rc.insert("xtick.major.size", 3).is_ok());
        assert!(matches!(rc.insert("Lines..width", 1), Err(StyleError::InvalidRcKey(_))));
        assert_eq!(rc.len(), 2);
    }

    #[test]
    fn fix_params_defaults() {
        let params = FixParams::from(StyleOptions::new().tight_layout(true));
        assert!(params.tight_layout);
        assert!(!params.clean_spines);
        assert_eq!(params.labelpad, FixParams::DEFAULT_LABELPAD);
        assert_eq!(params.spine_linewidth, None);
    }
}
