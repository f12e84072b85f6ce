//! Post-draw styling of a single axes.
//!
//! Some style choices cannot be expressed as global defaults because they act
//! on things that only exist once an axes has been drawn on (its legend, its
//! annotations, its final scales). [`fix_axes`] applies those.

use tracing::{ debug, trace };
use crate::{
    backend::{ Axes, Axis, MinorLocator, Scale, Spine, TickPosition },
    style::FixParams,
};

/// Vertical title position, relative to the default of `1.0`.
pub const TITLE_OFFSET: f64 = 1.05;

/// Minor ticks per major interval on non-logarithmic axes.
pub const MINOR_SUBDIVISIONS: u32 = 2;

/// Apply a resolved set of options to `ax`.
///
/// Mutations are independent of each other:
///
/// | Option             | Effect |
/// |:-------------------|:-------|
/// | `spine_linewidth`  | line width of all four spines, if set |
/// | `clean_spines`     | ticks on left/bottom only, right/top spines hidden |
/// | `tight_layout`     | figure layout compaction is requested |
/// | `labelpad`         | padding of both axis labels (always) |
/// | *(none)*           | title raised to [`TITLE_OFFSET`] (always) |
/// | *(none)*           | [`MINOR_SUBDIVISIONS`] minor ticks on each non-log axis (always) |
/// | `draggable_legend` | the legend, if there is one, becomes draggable |
/// | `draggable_text`   | every annotation becomes draggable |
pub fn fix_axes<A>(ax: &mut A, params: &FixParams)
where A: Axes + ?Sized
{
    if let Some(width) = params.spine_linewidth {
        Spine::ALL.into_iter()
            .for_each(|spine| ax.set_spine_linewidth(spine, width));
    }

    if params.clean_spines {
        ax.set_ticks_position(Axis::Y, TickPosition::Left);
        ax.set_ticks_position(Axis::X, TickPosition::Bottom);
        ax.set_spine_visible(Spine::Right, false);
        ax.set_spine_visible(Spine::Top, false);
    }

    if params.tight_layout {
        ax.request_tight_layout();
    }

    Axis::ALL.into_iter()
        .for_each(|axis| ax.set_labelpad(axis, params.labelpad));
    ax.set_title_y(TITLE_OFFSET);

    for axis in Axis::ALL {
        if ax.scale(axis) == Scale::Log {
            trace!(?axis, "log scale; minor locator left alone");
        } else {
            ax.set_minor_locator(axis, MinorLocator::Subdivide(MINOR_SUBDIVISIONS));
        }
    }

    if params.draggable_legend && !ax.set_legend_draggable(true) {
        trace!("no legend to make draggable");
    }

    if params.draggable_text {
        let count = ax.set_annotations_draggable(true);
        trace!(count, "annotations made draggable");
    }

    debug!(?params, "axes fixed");
}
