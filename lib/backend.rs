//! The surface a plotting backend has to expose to be styled.
//!
//! Nothing here draws anything. [`Axes`] is one plot area, [`Backend`] owns
//! every axes plus the global drawing defaults, and [`FontManager`] is the
//! backend's installed-font index.

use std::path::PathBuf;
use crate::{
    colors::Rgb,
    cycle::ColorSource,
    error::StyleResult,
    style::RcValue,
};

/// One of the two axes of a plot area.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];
}

/// One of the four borders of a plot area.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Spine {
    Left,
    Bottom,
    Right,
    Top,
}

impl Spine {
    pub const ALL: [Spine; 4] = [Spine::Left, Spine::Bottom, Spine::Right, Spine::Top];

    pub fn name(self) -> &'static str {
        match self {
            Self::Left   => "left",
            Self::Bottom => "bottom",
            Self::Right  => "right",
            Self::Top    => "top",
        }
    }
}

/// Axis scale.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Scale {
    #[default]
    Linear,
    Log,
    SymLog,
    Logit,
}

/// Which borders carry tick marks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum TickPosition {
    /// Ticks on both opposing borders.
    #[default]
    Both,
    /// Ticks on the left border only (y axis).
    Left,
    /// Ticks on the bottom border only (x axis).
    Bottom,
}

/// Minor tick placement.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum MinorLocator {
    /// Whatever the backend does by default.
    #[default]
    Auto,
    /// Split each major interval into `n` equal parts.
    Subdivide(u32),
}

/// A single plot area.
pub trait Axes {
    /// The axes' automatic series color cycle.
    type Cycle: ColorSource<Color = Rgb>;

    fn scale(&self, axis: Axis) -> Scale;

    fn set_minor_locator(&mut self, axis: Axis, locator: MinorLocator);

    fn set_ticks_position(&mut self, axis: Axis, position: TickPosition);

    fn set_spine_visible(&mut self, spine: Spine, visible: bool);

    fn set_spine_linewidth(&mut self, spine: Spine, width: f64);

    fn set_labelpad(&mut self, axis: Axis, pad: f64);

    /// Vertical position of the title, in axes coordinates (`1.0` is the top
    /// border).
    fn set_title_y(&mut self, y: f64);

    /// Mark the attached legend draggable. Returns `false` when no legend is
    /// attached.
    fn set_legend_draggable(&mut self, draggable: bool) -> bool;

    /// Mark every annotation child draggable, returning how many were found.
    fn set_annotations_draggable(&mut self, draggable: bool) -> usize;

    /// Ask the owning figure to compact its layout.
    fn request_tight_layout(&mut self);

    fn color_cycle(&mut self) -> &mut Self::Cycle;
}

/// A plotting session: the set of live axes plus global defaults.
pub trait Backend {
    type Axes: Axes;
    /// Stable handle to one axes.
    type AxesId: Copy + std::fmt::Debug;

    /// The axes most recently created or selected, if any.
    fn current_axes(&self) -> Option<Self::AxesId>;

    fn axes_mut(&mut self, id: Self::AxesId) -> Option<&mut Self::Axes>;

    /// Set one global drawing default.
    fn set_rc(&mut self, key: &str, value: &RcValue) -> StyleResult<()>;

    /// Install the default color cycle for axes created from now on.
    fn set_palette(&mut self, colors: &[Rgb]);

    /// Restore every global default to the backend's factory state.
    fn reset_rc(&mut self);
}

/// An entry in the installed-font index.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontEntry {
    /// Family name.
    pub name: String,
    /// Backing font file.
    pub path: PathBuf,
}

impl FontEntry {
    pub fn new<P>(name: &str, path: P) -> Self
    where P: Into<PathBuf>
    {
        Self { name: name.to_string(), path: path.into() }
    }
}

/// The backend's font index.
pub trait FontManager {
    /// Rescan installed fonts and rebuild the index.
    fn rebuild_cache(&mut self);

    /// Every indexed font.
    fn fonts(&self) -> Vec<FontEntry>;

    /// Remove a weight-name alias (e.g. `"roman"` → regular), returning
    /// whether it was present.
    fn remove_weight_alias(&mut self, alias: &str) -> bool;
}
