//! Peeking at and rewinding an axes' automatic color cycle.
//!
//! Backends hand out series colors from a cycle that can usually only be
//! advanced. Two operations are built on top of that:
//!
//! - [`peek_color`]: report the color the next series will get, leaving the
//!   cycle exactly where it was;
//! - [`keep_color`]: step the cycle back by one so that the next series reuses
//!   the color of the previous one.
//!
//! Sources that expose their position through [`SeekCycle`] are handled with
//! plain index arithmetic. Forward-only sources are handled by drawing until
//! the first color comes around again, which gives the period `n`, and then
//! drawing enough extra colors to land on the wanted position modulo `n`.
//!
//! # Limitation
//! The forward-only path finds the period by comparing colors, so a palette in
//! which some color appears twice per period is measured short and will be
//! restored to the wrong position. A source that never repeats its first color
//! is stopped after a fixed number of draws with
//! [`StyleError::DegenerateCycle`].

use std::fmt;
use tracing::{ debug, trace };
use crate::{
    colors::{ ColorSet, Rgb },
    error::{ StyleError, StyleResult },
};

/// Default bound on the number of draws made while looking for the period.
pub const DEFAULT_PERIOD_CAP: usize = 1024;

/// Random access to a cycle's position.
pub trait SeekCycle {
    /// Number of entries in one period.
    fn period(&self) -> usize;

    /// Index of the entry the next draw will return.
    fn position(&self) -> usize;

    /// Move so that the next draw returns entry `position % period`.
    fn seek(&mut self, position: usize);
}

/// Anything that hands out colors one at a time, forever.
pub trait ColorSource {
    type Color: Clone + PartialEq + fmt::Debug;

    /// Draw the next color, or `None` if the source is empty.
    fn next_color(&mut self) -> Option<Self::Color>;

    /// Random access, if the source supports it.
    fn as_seek(&mut self) -> Option<&mut dyn SeekCycle> { None }
}

/// Adapter for any iterator treated as a forward-only color source, e.g.
/// `ForwardOnly(colors.iter().copied().cycle())`.
#[derive(Clone, Debug)]
pub struct ForwardOnly<I>(pub I);

impl<I> ColorSource for ForwardOnly<I>
where
    I: Iterator,
    I::Item: Clone + PartialEq + fmt::Debug,
{
    type Color = I::Item;

    fn next_color(&mut self) -> Option<I::Item> { self.0.next() }
}

/// A finite palette repeated forever, with random access.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorCycle<C = Rgb> {
    colors: Vec<C>,
    pos: usize,
    seekable: bool,
}

impl<C> ColorCycle<C> {
    pub fn new(colors: Vec<C>) -> Self {
        Self { colors, pos: 0, seekable: true }
    }

    /// Hide random access, so that the cycle behaves like one from a backend
    /// that can only advance.
    pub fn forward_only(mut self) -> Self {
        self.seekable = false;
        self
    }

    pub fn colors(&self) -> &[C] { &self.colors }

    pub fn is_empty(&self) -> bool { self.colors.is_empty() }
}

impl ColorCycle<Rgb> {
    pub fn from_set(set: ColorSet) -> Self { Self::new(set.colors()) }
}

impl<C> SeekCycle for ColorCycle<C> {
    fn period(&self) -> usize { self.colors.len() }

    fn position(&self) -> usize { self.pos }

    fn seek(&mut self, position: usize) {
        self.pos = if self.colors.is_empty() { 0 } else { position % self.colors.len() };
    }
}

impl<C> ColorSource for ColorCycle<C>
where C: Clone + PartialEq + fmt::Debug
{
    type Color = C;

    fn next_color(&mut self) -> Option<C> {
        let color = self.colors.get(self.pos).cloned()?;
        self.pos = (self.pos + 1) % self.colors.len();
        Some(color)
    }

    fn as_seek(&mut self) -> Option<&mut dyn SeekCycle> {
        if self.seekable { Some(self) } else { None }
    }
}

/// Peek/rewind driver with a configurable bound on period discovery.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CycleTracker {
    cap: usize,
}

impl Default for CycleTracker {
    fn default() -> Self { Self { cap: DEFAULT_PERIOD_CAP } }
}

impl CycleTracker {
    pub fn new() -> Self { Self::default() }

    /// Give up on period discovery after `cap` draws past the first.
    pub fn with_cap(cap: usize) -> Self { Self { cap: cap.max(1) } }

    pub fn cap(&self) -> usize { self.cap }

    /// Draw until the first color comes around again.
    ///
    /// Returns the first color and the period `n`. The source is left
    /// advanced by `n + 1` draws, i.e. one position past where it started.
    pub fn discover<S>(&self, source: &mut S) -> StyleResult<(S::Color, usize)>
    where S: ColorSource + ?Sized
    {
        let first = source.next_color().ok_or(StyleError::EmptyCycle)?;
        let mut n: usize = 0;
        loop {
            let color = source.next_color().ok_or(StyleError::EmptyCycle)?;
            n += 1;
            if color == first { break; }
            if n >= self.cap {
                return Err(StyleError::DegenerateCycle { cap: self.cap });
            }
        }
        trace!(period = n, "color cycle period found");
        Ok((first, n))
    }

    // After discovery the source sits at +1 (mod n); draw until it sits at
    // `target` (mod n).
    fn settle<S>(source: &mut S, n: usize, target: usize)
    where S: ColorSource + ?Sized
    {
        let extra = (target % n + n - 1) % n;
        trace!(period = n, extra, "restoring color cycle position");
        for _ in 0..extra {
            source.next_color();
        }
    }

    /// Return the color the next series will be drawn with, without changing
    /// what the next draw returns.
    pub fn peek<S>(&self, source: &mut S) -> StyleResult<S::Color>
    where S: ColorSource + ?Sized
    {
        if let Some(seek) = source.as_seek() {
            let pos = seek.position();
            let color = source.next_color().ok_or(StyleError::EmptyCycle)?;
            if let Some(seek) = source.as_seek() { seek.seek(pos); }
            return Ok(color);
        }
        let (first, n) = self.discover(source)?;
        Self::settle(source, n, 0);
        Ok(first)
    }

    /// Return the color the next series would get and consume it, so the next
    /// draw gets the one after.
    pub fn advance<S>(&self, source: &mut S) -> StyleResult<S::Color>
    where S: ColorSource + ?Sized
    {
        let color = source.next_color().ok_or(StyleError::EmptyCycle)?;
        trace!(?color, "color cycle advanced");
        Ok(color)
    }

    /// Step the cycle back by one, so the next draw repeats the previous
    /// color.
    pub fn keep<S>(&self, source: &mut S) -> StyleResult<()>
    where S: ColorSource + ?Sized
    {
        if let Some(seek) = source.as_seek() {
            let n = seek.period();
            if n == 0 { return Err(StyleError::EmptyCycle); }
            let pos = seek.position();
            seek.seek((pos + n - 1) % n);
            debug!(from = pos, period = n, "rewound color cycle");
            return Ok(());
        }
        let (_, n) = self.discover(source)?;
        Self::settle(source, n, n - 1);
        debug!(period = n, "rewound forward-only color cycle");
        Ok(())
    }
}

/// [`CycleTracker::peek`] with the default bound.
pub fn peek_color<S>(source: &mut S) -> StyleResult<S::Color>
where S: ColorSource + ?Sized
{
    CycleTracker::default().peek(source)
}

/// [`CycleTracker::keep`] with the default bound.
pub fn keep_color<S>(source: &mut S) -> StyleResult<()>
where S: ColorSource + ?Sized
{
    CycleTracker::default().keep(source)
}
