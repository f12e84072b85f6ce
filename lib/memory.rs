//! A retained, in-memory backend.
//!
//! [`MemoryBackend`] keeps every piece of state the styling operations touch
//! so that it can be inspected afterwards. It draws nothing. Besides testing,
//! it is useful for working out what a style will do before handing the same
//! calls to a real backend.

use std::{
    collections::BTreeSet,
    fmt,
};
use tracing::trace;
use crate::{
    backend::{
        Axes,
        Axis,
        Backend,
        FontEntry,
        FontManager,
        MinorLocator,
        Scale,
        Spine,
        TickPosition,
    },
    colors::{ ColorSet, Rgb },
    cycle::{ ColorCycle, ColorSource },
    error::{ StyleError, StyleResult },
    style::{ RcParams, RcValue },
};

/// Default axis label padding, in points.
pub const DEFAULT_LABELPAD: f64 = 4.0;

/// Default spine line width, in points.
pub const DEFAULT_SPINE_LINEWIDTH: f64 = 0.8;

fn axis_idx(axis: Axis) -> usize {
    match axis {
        Axis::X => 0,
        Axis::Y => 1,
    }
}

fn spine_idx(spine: Spine) -> usize {
    match spine {
        Spine::Left   => 0,
        Spine::Bottom => 1,
        Spine::Right  => 2,
        Spine::Top    => 3,
    }
}

/// State of one plot border.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpineState {
    pub visible: bool,
    pub linewidth: f64,
}

impl Default for SpineState {
    fn default() -> Self {
        Self { visible: true, linewidth: DEFAULT_SPINE_LINEWIDTH }
    }
}

/// A text annotation attached to an axes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Annotation {
    pub text: String,
    pub draggable: bool,
}

/// A legend attached to an axes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Legend {
    pub draggable: bool,
}

/// In-memory plot area.
#[derive(Clone, Debug, PartialEq)]
pub struct MemoryAxes {
    scales: [Scale; 2],
    minor: [MinorLocator; 2],
    ticks: [TickPosition; 2],
    labelpad: [f64; 2],
    spines: [SpineState; 4],
    title_y: f64,
    legend: Option<Legend>,
    annotations: Vec<Annotation>,
    tight_layout: bool,
    cycle: ColorCycle<Rgb>,
    series: Vec<Rgb>,
}

impl MemoryAxes {
    /// New axes drawing series colors from `cycle`.
    pub fn new(cycle: ColorCycle<Rgb>) -> Self {
        Self {
            scales: [Scale::Linear; 2],
            minor: [MinorLocator::Auto; 2],
            ticks: [TickPosition::Both; 2],
            labelpad: [DEFAULT_LABELPAD; 2],
            spines: [SpineState::default(); 4],
            title_y: 1.0,
            legend: None,
            annotations: Vec::new(),
            tight_layout: false,
            cycle,
            series: Vec::new(),
        }
    }

    pub fn set_scale(&mut self, axis: Axis, scale: Scale) {
        self.scales[axis_idx(axis)] = scale;
    }

    /// Attach a (non-draggable) legend.
    pub fn legend(&mut self) { self.legend = Some(Legend::default()); }

    pub fn annotate(&mut self, text: &str) {
        self.annotations.push(Annotation { text: text.to_string(), draggable: false });
    }

    /// Draw a series in the next cycle color, returning that color.
    pub fn plot(&mut self) -> StyleResult<Rgb> {
        let color = self.cycle.next_color().ok_or(StyleError::EmptyCycle)?;
        trace!(%color, "series drawn");
        self.series.push(color);
        Ok(color)
    }

    /// Draw a series in an explicit color. The cycle is not advanced.
    pub fn plot_with(&mut self, color: Rgb) {
        self.series.push(color);
    }

    pub fn minor_locator(&self, axis: Axis) -> MinorLocator { self.minor[axis_idx(axis)] }

    pub fn ticks_position(&self, axis: Axis) -> TickPosition { self.ticks[axis_idx(axis)] }

    pub fn labelpad(&self, axis: Axis) -> f64 { self.labelpad[axis_idx(axis)] }

    pub fn spine(&self, spine: Spine) -> SpineState { self.spines[spine_idx(spine)] }

    pub fn title_y(&self) -> f64 { self.title_y }

    pub fn attached_legend(&self) -> Option<Legend> { self.legend }

    pub fn annotations(&self) -> &[Annotation] { &self.annotations }

    pub fn tight_layout_requested(&self) -> bool { self.tight_layout }

    /// Colors of every series drawn so far.
    pub fn series(&self) -> &[Rgb] { &self.series }

    pub fn cycle(&self) -> &ColorCycle<Rgb> { &self.cycle }
}

impl Axes for MemoryAxes {
    type Cycle = ColorCycle<Rgb>;

    fn scale(&self, axis: Axis) -> Scale { self.scales[axis_idx(axis)] }

    fn set_minor_locator(&mut self, axis: Axis, locator: MinorLocator) {
        self.minor[axis_idx(axis)] = locator;
    }

    fn set_ticks_position(&mut self, axis: Axis, position: TickPosition) {
        self.ticks[axis_idx(axis)] = position;
    }

    fn set_spine_visible(&mut self, spine: Spine, visible: bool) {
        self.spines[spine_idx(spine)].visible = visible;
    }

    fn set_spine_linewidth(&mut self, spine: Spine, width: f64) {
        self.spines[spine_idx(spine)].linewidth = width;
    }

    fn set_labelpad(&mut self, axis: Axis, pad: f64) {
        self.labelpad[axis_idx(axis)] = pad;
    }

    fn set_title_y(&mut self, y: f64) { self.title_y = y; }

    fn set_legend_draggable(&mut self, draggable: bool) -> bool {
        match self.legend.as_mut() {
            Some(legend) => { legend.draggable = draggable; true },
            None => false,
        }
    }

    fn set_annotations_draggable(&mut self, draggable: bool) -> usize {
        self.annotations.iter_mut()
            .for_each(|a| { a.draggable = draggable; });
        self.annotations.len()
    }

    fn request_tight_layout(&mut self) { self.tight_layout = true; }

    fn color_cycle(&mut self) -> &mut ColorCycle<Rgb> { &mut self.cycle }
}

/// Handle to an axes owned by a [`MemoryBackend`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AxesHandle(usize);

impl fmt::Display for AxesHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "axes#{}", self.0)
    }
}

/// In-memory plotting session.
#[derive(Clone, Debug)]
pub struct MemoryBackend {
    axes: Vec<MemoryAxes>,
    current: Option<usize>,
    rc: RcParams,
    palette: Vec<Rgb>,
    forward_only: bool,
    installed: Vec<FontEntry>,
    font_index: Vec<FontEntry>,
    weight_aliases: BTreeSet<String>,
    cache_generation: u64,
}

impl Default for MemoryBackend {
    fn default() -> Self { Self::new() }
}

impl MemoryBackend {
    /// Factory palette for new axes.
    pub const FACTORY_PALETTE: ColorSet = ColorSet::Matplotlib;

    pub fn new() -> Self {
        Self {
            axes: Vec::new(),
            current: None,
            rc: RcParams::new(),
            palette: Self::FACTORY_PALETTE.colors(),
            forward_only: false,
            installed: Vec::new(),
            font_index: Vec::new(),
            weight_aliases: ["roman", "regular", "normal"].iter()
                .map(|s| s.to_string())
                .collect(),
            cache_generation: 0,
        }
    }

    /// Give every new axes a cycle without random access.
    pub fn forward_only(mut self) -> Self {
        self.forward_only = true;
        self
    }

    /// Install fonts; they are indexed immediately.
    pub fn with_fonts<I>(mut self, fonts: I) -> Self
    where I: IntoIterator<Item = FontEntry>
    {
        self.installed.extend(fonts);
        self.font_index = self.installed.clone();
        self
    }

    /// Install a font on "disk". It is not indexed until the cache is rebuilt.
    pub fn install_font(&mut self, entry: FontEntry) {
        self.installed.push(entry);
    }

    /// Create new axes with the current default palette and make them current.
    pub fn add_axes(&mut self) -> AxesHandle {
        let cycle = ColorCycle::new(self.palette.clone());
        let cycle = if self.forward_only { cycle.forward_only() } else { cycle };
        self.axes.push(MemoryAxes::new(cycle));
        self.current = Some(self.axes.len() - 1);
        AxesHandle(self.axes.len() - 1)
    }

    /// Make `handle` the current axes.
    pub fn select(&mut self, handle: AxesHandle) -> StyleResult<()> {
        if handle.0 < self.axes.len() {
            self.current = Some(handle.0);
            Ok(())
        } else {
            Err(StyleError::UnknownAxes(handle.to_string()))
        }
    }

    pub fn axes(&self, handle: AxesHandle) -> Option<&MemoryAxes> { self.axes.get(handle.0) }

    pub fn rc(&self) -> &RcParams { &self.rc }

    pub fn palette(&self) -> &[Rgb] { &self.palette }

    pub fn weight_aliases(&self) -> &BTreeSet<String> { &self.weight_aliases }

    /// Number of times the font cache has been rebuilt.
    pub fn cache_generation(&self) -> u64 { self.cache_generation }
}

impl Backend for MemoryBackend {
    type Axes = MemoryAxes;
    type AxesId = AxesHandle;

    fn current_axes(&self) -> Option<AxesHandle> { self.current.map(AxesHandle) }

    fn axes_mut(&mut self, id: AxesHandle) -> Option<&mut MemoryAxes> {
        self.axes.get_mut(id.0)
    }

    fn set_rc(&mut self, key: &str, value: &RcValue) -> StyleResult<()> {
        self.rc.insert(key, value.clone()).map(|_| ())
    }

    fn set_palette(&mut self, colors: &[Rgb]) {
        self.palette = colors.to_vec();
    }

    fn reset_rc(&mut self) {
        self.rc = RcParams::new();
        self.palette = Self::FACTORY_PALETTE.colors();
    }
}

impl FontManager for MemoryBackend {
    fn rebuild_cache(&mut self) {
        self.font_index = self.installed.clone();
        self.cache_generation += 1;
    }

    fn fonts(&self) -> Vec<FontEntry> { self.font_index.clone() }

    fn remove_weight_alias(&mut self, alias: &str) -> bool {
        self.weight_aliases.remove(alias)
    }
}
