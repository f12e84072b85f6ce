//! Styling commands for [`matplotlib`].
//!
//! Each type here renders part of a style as Python run against `plt` and the
//! current `ax`, so that a style resolved in Rust can be applied to a
//! matplotlib figure built with [`Mpl`].

pub use matplotlib::{
    Mpl,
    Matplotlib,
    MplError,
    MplResult,
    commands,
};

pub use matplotlib::serde_json;

use crate::{
    colors::Rgb,
    error::StyleResult,
    fixups::{ MINOR_SUBDIVISIONS, TITLE_OFFSET },
    preset::{ PresetRegistry, ResolvedStyle },
    style::{ FixParams, RcParams, RcValue, StyleSpec },
};

fn py_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn py_float(f: f64) -> String {
    if f.is_nan() {
        "float(\"nan\")".to_string()
    } else if f == f64::INFINITY {
        "float(\"inf\")".to_string()
    } else if f == f64::NEG_INFINITY {
        "float(\"-inf\")".to_string()
    } else {
        format!("{:?}", f)
    }
}

fn py_value(value: &RcValue) -> String {
    match value {
        RcValue::Bool(true) => "True".to_string(),
        RcValue::Bool(false) => "False".to_string(),
        RcValue::Int(i) => i.to_string(),
        RcValue::Float(f) => py_float(*f),
        RcValue::Str(s) => py_str(s),
        RcValue::List(items) => {
            let inner: Vec<String> = items.iter().map(py_value).collect();
            format!("[{}]", inner.join(", "))
        },
    }
}

fn py_colors(colors: &[Rgb]) -> String {
    let inner: Vec<String>
        = colors.iter()
        .map(|c| py_str(&c.to_string()))
        .collect();
    format!("[{}]", inner.join(", "))
}

/// Global part of a style: `rcParams` updates and the default color cycle.
///
/// ```text
/// plt.rcParams[{key}] = {value}
/// ...
/// from cycler import cycler
/// plt.rcParams["axes.prop_cycle"] = cycler(color={palette})
/// ```
///
/// Prelude: **Yes**
///
/// JSON data: **None**
#[derive(Clone, Debug, PartialEq)]
pub struct SetStyle {
    pub rc: RcParams,
    pub palette: Option<Vec<Rgb>>,
}

impl SetStyle {
    /// Resolve `style` against `registry` with `rc` overrides.
    pub fn resolve<S>(registry: &PresetRegistry, style: S, rc: &RcParams)
        -> StyleResult<Self>
    where S: Into<StyleSpec>
    {
        registry.resolve_global(&style.into(), rc).map(Self::from)
    }
}

impl From<ResolvedStyle> for SetStyle {
    fn from(resolved: ResolvedStyle) -> Self {
        Self { rc: resolved.rc, palette: resolved.palette }
    }
}

impl Matplotlib for SetStyle {
    fn is_prelude(&self) -> bool { true }

    fn data(&self) -> Option<serde_json::value::Value> { None }

    fn py_cmd(&self) -> String {
        let mut code = String::new();
        for (key, value) in self.rc.iter() {
            code.push_str(&format!("plt.rcParams[{}] = {}\n", py_str(key), py_value(value)));
        }
        if let Some(palette) = &self.palette {
            code.push_str("from cycler import cycler\n");
            code.push_str(&format!(
                "plt.rcParams[\"axes.prop_cycle\"] = cycler(color={})\n",
                py_colors(palette),
            ));
        }
        code
    }
}

/// Post-draw part of a style, applied to `ax`.
///
/// Prelude: **No**
///
/// JSON data: **None**
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixStyle {
    pub params: FixParams,
}

impl FixStyle {
    pub fn new(params: FixParams) -> Self { Self { params } }
}

impl From<FixParams> for FixStyle {
    fn from(params: FixParams) -> Self { Self::new(params) }
}

impl Matplotlib for FixStyle {
    fn is_prelude(&self) -> bool { false }

    fn data(&self) -> Option<serde_json::value::Value> { None }

    fn py_cmd(&self) -> String {
        let p = &self.params;
        let mut code = String::new();
        if let Some(width) = p.spine_linewidth {
            code.push_str(&format!(
                "for _spine in [\"left\", \"bottom\", \"right\", \"top\"]:\n    \
                ax.spines[_spine].set_linewidth({})\n",
                py_float(width),
            ));
        }
        if p.clean_spines {
            code.push_str("ax.yaxis.set_ticks_position(\"left\")\n");
            code.push_str("ax.xaxis.set_ticks_position(\"bottom\")\n");
            code.push_str("ax.spines[\"right\"].set_visible(False)\n");
            code.push_str("ax.spines[\"top\"].set_visible(False)\n");
        }
        if p.tight_layout {
            code.push_str("plt.tight_layout()\n");
        }
        code.push_str(&format!("ax.xaxis.labelpad = {}\n", py_float(p.labelpad)));
        code.push_str(&format!("ax.yaxis.labelpad = {}\n", py_float(p.labelpad)));
        code.push_str(&format!("ax.title.set_y({:?})\n", TITLE_OFFSET));
        code.push_str("import matplotlib.ticker as mticker\n");
        for axis in ["x", "y"] {
            code.push_str(&format!(
                "if ax.get_{0}scale() != \"log\":\n    \
                ax.{0}axis.set_minor_locator(mticker.AutoMinorLocator({1}))\n",
                axis,
                MINOR_SUBDIVISIONS,
            ));
        }
        if p.draggable_legend {
            code.push_str(
                "_legend = ax.get_legend()\n\
                if _legend is not None:\n    \
                _legend.set_draggable(True)\n"
            );
        }
        if p.draggable_text {
            code.push_str(
                "import matplotlib.text as mtext\n\
                for _child in ax.get_children():\n    \
                if isinstance(_child, mtext.Annotation):\n        \
                _child.draggable(True)\n"
            );
        }
        code
    }
}

/// Restore matplotlib's factory `rcParams`.
///
/// ```text
/// plt.rcdefaults()
/// ```
///
/// Prelude: **Yes**
///
/// JSON data: **None**
#[derive(Copy, Clone, Debug)]
pub struct ResetDefaults;

impl Matplotlib for ResetDefaults {
    fn is_prelude(&self) -> bool { true }

    fn data(&self) -> Option<serde_json::value::Value> { None }

    fn py_cmd(&self) -> String { "plt.rcdefaults()".to_string() }
}

const PY_REBUILD_FONTS: &str = "\
import matplotlib.font_manager as mfont
mfont.fontManager = mfont._load_fontmanager(try_read_cache=False)";

/// Rebuild matplotlib's font cache.
///
/// ```text
/// import matplotlib.font_manager as mfont
/// mfont.fontManager = mfont._load_fontmanager(try_read_cache=False)
/// ```
///
/// Prelude: **Yes**
///
/// JSON data: **None**
#[derive(Copy, Clone, Debug)]
pub struct RegenerateFonts;

impl Matplotlib for RegenerateFonts {
    fn is_prelude(&self) -> bool { true }

    fn data(&self) -> Option<serde_json::value::Value> { None }

    fn py_cmd(&self) -> String { PY_REBUILD_FONTS.to_string() }
}

/// Drop the `roman` weight alias that makes Times New Roman render bold, then
/// rebuild the font cache.
///
/// Prelude: **Yes**
///
/// JSON data: **None**
#[derive(Copy, Clone, Debug)]
pub struct FixBoldTimesNewRoman;

impl Matplotlib for FixBoldTimesNewRoman {
    fn is_prelude(&self) -> bool { true }

    fn data(&self) -> Option<serde_json::value::Value> { None }

    fn py_cmd(&self) -> String {
        format!(
            "{}\nmfont.weight_dict.pop(\"roman\", None)\n{}",
            PY_REBUILD_FONTS.lines().next().unwrap_or_default(),
            PY_REBUILD_FONTS,
        )
    }
}

/// Make the next series on `ax` reuse the previous series' color.
///
/// Matplotlib keeps the cycle position as an index, so this steps it back
/// directly:
///
/// ```text
/// _lines = ax._get_lines
/// _lines._idx = (_lines._idx - 1) % len(_lines._cycler_items)
/// ```
///
/// Prelude: **No**
///
/// JSON data: **None**
#[derive(Copy, Clone, Debug)]
pub struct KeepColor;

impl Matplotlib for KeepColor {
    fn is_prelude(&self) -> bool { false }

    fn data(&self) -> Option<serde_json::value::Value> { None }

    fn py_cmd(&self) -> String {
        "_lines = ax._get_lines\n\
        _lines._idx = (_lines._idx - 1) % len(_lines._cycler_items)"
            .to_string()
    }
}

/// Construct a new [`Mpl`] with [`DefPrelude`][commands::DefPrelude], the
/// global part of `style` (baseline prepended), and
/// [`DefInit`][commands::DefInit].
pub fn mpl_styled<S>(registry: &PresetRegistry, style: S, rc: &RcParams)
    -> StyleResult<Mpl>
where S: Into<StyleSpec>
{
    let set_style = SetStyle::resolve(registry, style, rc)?;
    Ok(
        Mpl::default()
            & commands::DefPrelude
            & set_style
            & commands::DefInit
    )
}

/// [`mpl_styled`] with the built-in baseline style.
pub fn mpl() -> StyleResult<Mpl> {
    mpl_styled(&PresetRegistry::builtin(), StyleSpec::default(), &RcParams::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleOptions;

    #[test]
    fn set_style_renders_rc_and_palette() {
        let rc = RcParams::new().with("text.usetex", true).unwrap();
        let cmd = SetStyle::resolve(&PresetRegistry::builtin(), "B&W", &rc).unwrap();
        let code = cmd.py_cmd();
        assert!(code.contains("plt.rcParams[\"text.usetex\"] = True\n"));
        assert!(code.contains("plt.rcParams[\"image.cmap\"] = \"gray\"\n"));
        assert!(code.contains("cycler(color=[\"#000000\", "));
    }

    #[test]
    fn fix_style_gates_on_options() {
        let params = FixParams::from(StyleOptions::new().labelpad(5.0));
        let code = FixStyle::new(params).py_cmd();
        assert!(code.contains("ax.xaxis.labelpad = 5.0\n"));
        assert!(code.contains("ax.title.set_y(1.05)\n"));
        assert!(code.contains("AutoMinorLocator(2)"));
        assert!(!code.contains("set_visible(False)"));
        assert!(!code.contains("tight_layout"));
        assert!(!code.contains("set_draggable"));
    }

    #[test]
    fn fix_style_with_every_option() {
        let opts = StyleOptions::new()
            .clean_spines(true)
            .draggable_legend(true)
            .draggable_text(true)
            .tight_layout(true)
            .labelpad(10.0)
            .spine_linewidth(0.5);
        let code = FixStyle::from(FixParams::from(opts)).py_cmd();
        assert!(code.contains("ax.spines[_spine].set_linewidth(0.5)\n"));
        assert!(code.contains("ax.spines[\"top\"].set_visible(False)\n"));
        assert!(code.contains("ax.yaxis.set_ticks_position(\"left\")\n"));
        assert!(code.contains("plt.tight_layout()\n"));
        assert!(code.contains(
            "if ax.get_yscale() != \"log\":\n    \
            ax.yaxis.set_minor_locator(mticker.AutoMinorLocator(2))\n"
        ));
        assert!(code.contains(
            "if _legend is not None:\n    _legend.set_draggable(True)\n"
        ));
        assert!(code.contains(
            "if isinstance(_child, mtext.Annotation):\n        _child.draggable(True)\n"
        ));
    }

    #[test]
    fn keep_color_rewinds_cycle_index() {
        let code = KeepColor.py_cmd();
        assert!(code.contains(
            "_lines._idx = (_lines._idx - 1) % len(_lines._cycler_items)"
        ));
        assert!(!KeepColor.is_prelude());
    }

    #[test]
    fn font_commands() {
        assert_eq!(ResetDefaults.py_cmd(), "plt.rcdefaults()");
        assert!(ResetDefaults.is_prelude());

        let rebuild = "mfont.fontManager = mfont._load_fontmanager(try_read_cache=False)";
        assert!(RegenerateFonts.py_cmd().ends_with(rebuild));

        let code = FixBoldTimesNewRoman.py_cmd();
        assert!(code.starts_with("import matplotlib.font_manager as mfont\n"));
        let pop = code.find("mfont.weight_dict.pop(\"roman\", None)").unwrap();
        let rebuilt = code.find(rebuild).unwrap();
        assert!(pop < rebuilt);
    }

    #[test]
    fn styled_mpl_builders() {
        assert!(mpl().is_ok());
        let rc = RcParams::new().with("lines.linewidth", 2.0).unwrap();
        assert!(mpl_styled(&PresetRegistry::builtin(), ["article", "latex"], &rc).is_ok());
        assert!(matches!(
            mpl_styled(&PresetRegistry::builtin(), "nope", &rc),
            Err(crate::error::StyleError::UnknownStyle { .. })
        ));
    }

    #[test]
    fn python_literals() {
        let v = RcValue::List(vec![1.5.into(), "a\"b".into(), false.into()]);
        assert_eq!(py_value(&v), "[1.5, \"a\\\"b\", False]");
        assert_eq!(py_value(&RcValue::Float(f64::NAN)), "float(\"nan\")");
        assert_eq!(py_value(&RcValue::Float(f64::NEG_INFINITY)), "float(\"-inf\")");
        assert_eq!(py_str("a\rb\tc\u{1}"), "\"a\\rb\\tc\\u0001\"");
    }
}
