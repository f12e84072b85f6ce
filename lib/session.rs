//! The main entry point: a backend paired with a preset registry.
//!
//! ```
//! use pubstyle::{ memory::MemoryBackend, session::Session, style::{ RcParams, StyleOptions } };
//!
//! let mut session = Session::new(MemoryBackend::new());
//! session.set_style("article", &RcParams::new()).unwrap();
//! let ax = session.backend_mut().add_axes();
//! session.fix_style("article", Some(ax), &StyleOptions::new()).unwrap();
//! ```
//!
//! The baseline preset is applied by [`Session::init`], or on first use if
//! `init` was never called. Merely creating a session changes nothing on the
//! backend.

use std::path::PathBuf;
use tracing::{ debug, info };
use crate::{
    backend::{ Axes, Backend, FontManager },
    colors::Rgb,
    cycle::CycleTracker,
    error::{ StyleError, StyleResult },
    fixups::fix_axes,
    fonts,
    preset::PresetRegistry,
    style::{ FixParams, RcParams, StyleOptions, StyleSpec },
};

fn target<B>(backend: &mut B, ax: Option<B::AxesId>) -> StyleResult<&mut B::Axes>
where B: Backend
{
    let id = ax.or_else(|| backend.current_axes())
        .ok_or(StyleError::NoActiveAxes)?;
    backend.axes_mut(id)
        .ok_or_else(|| StyleError::UnknownAxes(format!("{:?}", id)))
}

/// A styled plotting session.
#[derive(Debug)]
pub struct Session<B>
where B: Backend
{
    backend: B,
    registry: PresetRegistry,
    tracker: CycleTracker,
    initialized: bool,
}

impl<B> Session<B>
where B: Backend
{
    /// Pair `backend` with the built-in presets.
    pub fn new(backend: B) -> Self {
        Self::with_registry(backend, PresetRegistry::builtin())
    }

    pub fn with_registry(backend: B, registry: PresetRegistry) -> Self {
        Self {
            backend,
            registry,
            tracker: CycleTracker::default(),
            initialized: false,
        }
    }

    /// Use a custom bound on color-cycle period discovery.
    pub fn with_tracker(mut self, tracker: CycleTracker) -> Self {
        self.tracker = tracker;
        self
    }

    /// Apply the baseline style. Safe to call more than once.
    pub fn init(&mut self) -> StyleResult<()> {
        self.set_style(StyleSpec::default(), &RcParams::new())
    }

    fn ensure_init(&mut self) -> StyleResult<()> {
        if self.initialized { Ok(()) } else { self.init() }
    }

    pub fn is_initialized(&self) -> bool { self.initialized }

    pub fn backend(&self) -> &B { &self.backend }

    pub fn backend_mut(&mut self) -> &mut B { &mut self.backend }

    pub fn into_backend(self) -> B { self.backend }

    pub fn registry(&self) -> &PresetRegistry { &self.registry }

    pub fn registry_mut(&mut self) -> &mut PresetRegistry { &mut self.registry }

    /// Apply the global part of a style: rc params and palette of the
    /// baseline, then of each named preset, then `rc` (highest priority).
    ///
    /// Every name is checked before anything is applied, so an unknown name
    /// leaves the backend untouched.
    pub fn set_style<S>(&mut self, style: S, rc: &RcParams) -> StyleResult<()>
    where S: Into<StyleSpec>
    {
        let style: StyleSpec = style.into();
        let resolved = self.registry.resolve_global(&style, rc)?;
        for (key, value) in resolved.rc.iter() {
            self.backend.set_rc(key, value)?;
        }
        if let Some(palette) = &resolved.palette {
            self.backend.set_palette(palette);
        }
        self.initialized = true;
        info!(style = ?style.names(), "style set");
        Ok(())
    }

    /// Resolve the post-draw options of a style without applying them.
    pub fn resolve<S>(&self, style: S, overrides: &StyleOptions)
        -> StyleResult<StyleOptions>
    where S: Into<StyleSpec>
    {
        self.registry.resolve(&style.into(), overrides)
    }

    /// Apply the post-draw part of a style to `ax`, or to the current axes
    /// if `ax` is `None`. `overrides` take priority over every preset.
    pub fn fix_style<S>(
        &mut self,
        style: S,
        ax: Option<B::AxesId>,
        overrides: &StyleOptions,
    ) -> StyleResult<()>
    where S: Into<StyleSpec>
    {
        let style: StyleSpec = style.into();
        let opts = self.registry.resolve(&style, overrides)?;
        self.ensure_init()?;
        let axes = target(&mut self.backend, ax)?;
        fix_axes(axes, &FixParams::from(&opts));
        Ok(())
    }

    /// The color the next series on `ax` (or the current axes) will get. The
    /// color cycle is left as it was.
    pub fn get_next_color(&mut self, ax: Option<B::AxesId>) -> StyleResult<Rgb> {
        self.ensure_init()?;
        let tracker = self.tracker;
        let axes = target(&mut self.backend, ax)?;
        tracker.peek(axes.color_cycle())
    }

    /// Like [`get_next_color`][Self::get_next_color], but the color is
    /// consumed: the next series on the axes gets the one after it.
    pub fn take_next_color(&mut self, ax: Option<B::AxesId>) -> StyleResult<Rgb> {
        self.ensure_init()?;
        let tracker = self.tracker;
        let axes = target(&mut self.backend, ax)?;
        tracker.advance(axes.color_cycle())
    }

    /// Make the next series on `ax` (or the current axes) reuse the color of
    /// the previous one.
    pub fn keep_color(&mut self, ax: Option<B::AxesId>) -> StyleResult<()> {
        self.ensure_init()?;
        let tracker = self.tracker;
        let axes = target(&mut self.backend, ax)?;
        tracker.keep(axes.color_cycle())
    }

    /// Restore the backend's factory defaults. This counts as initialization,
    /// so the baseline style is not re-applied behind the caller's back
    /// afterwards.
    pub fn reset_defaults(&mut self) {
        fonts::reset_defaults(&mut self.backend);
        self.initialized = true;
    }
}

impl<B> Session<B>
where B: Backend + FontManager
{
    /// See [`fonts::regenerate_fonts`].
    pub fn regenerate_fonts(&mut self) { fonts::regenerate_fonts(&mut self.backend); }

    /// See [`fonts::list_font_names`].
    pub fn list_font_names(&self) -> Vec<String> { fonts::list_font_names(&self.backend) }

    /// See [`fonts::list_font_files`].
    pub fn list_font_files(&self) -> Vec<PathBuf> { fonts::list_font_files(&self.backend) }

    /// See [`fonts::fix_bold_times_new_roman`].
    pub fn fix_bold_times_new_roman(&mut self) {
        fonts::fix_bold_times_new_roman(&mut self.backend);
        debug!("bold Times New Roman fix applied");
    }
}
