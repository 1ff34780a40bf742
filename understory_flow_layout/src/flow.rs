// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout engine: row capacity, section insets, and cell placement.

use alloc::vec::Vec;

use kurbo::{Insets, Rect, Size};

use crate::util::floor_index;
use crate::{ConfigError, FlowAlignment, FlowConfig, FlowPass};

/// Number of uniform cells that fit in one row.
///
/// This is `floor(container_width / (item_width + 2 * spacing))`. It is `0`
/// whenever the container is narrower than one cell pitch, and it never
/// decreases as `container_width` grows.
#[must_use]
pub fn items_per_row(container_width: f64, item_width: f64, spacing: f64) -> usize {
    let pitch = item_width + 2.0 * spacing;
    if pitch.is_nan() || pitch <= 0.0 || !container_width.is_finite() {
        return 0;
    }
    floor_index(container_width / pitch)
}

/// Result of [`FlowLayout::metrics`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FlowMetrics {
    /// See [`items_per_row`].
    pub items_per_row: usize,
    /// Section insets (`x0` left, `y0` top, `x1` right, `y1` bottom).
    pub insets: Insets,
}

impl FlowMetrics {
    /// The insets in top/left/bottom/right order.
    #[must_use]
    pub fn section_insets(&self) -> SectionInsets {
        self.insets.into()
    }
}

/// Section insets named by edge, in top/left/bottom/right order.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SectionInsets {
    /// Inset above the first row.
    pub top: f64,
    /// Inset before the first cell of each row.
    pub left: f64,
    /// Inset below the last row.
    pub bottom: f64,
    /// Inset after the last cell of each row.
    pub right: f64,
}

impl From<Insets> for SectionInsets {
    fn from(insets: Insets) -> Self {
        Self {
            top: insets.y0,
            left: insets.x0,
            bottom: insets.y1,
            right: insets.x1,
        }
    }
}

impl From<SectionInsets> for Insets {
    fn from(insets: SectionInsets) -> Self {
        Self::new(insets.left, insets.top, insets.right, insets.bottom)
    }
}

/// Flow layout over a validated [`FlowConfig`].
///
/// A [`FlowLayout`] always holds a configuration that passed
/// [`FlowConfig::validate`]. Every query is a pure function of that
/// configuration and the container width passed in, so hosts can call them
/// on each layout invalidation (for example, a container resize).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlowLayout {
    config: FlowConfig,
}

impl FlowLayout {
    /// Creates a layout, rejecting invalid configurations.
    pub fn new(config: FlowConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// Replaces the configuration.
    ///
    /// On error the previous configuration stays active.
    pub fn set_config(&mut self, config: FlowConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Section insets for this configuration.
    ///
    /// Explicit insets always win. Without them both alignment modes use
    /// zero insets; leading packing is expressed through cell placement, not
    /// through an inset.
    #[must_use]
    pub fn section_insets(&self) -> Insets {
        self.config.inset.unwrap_or(Insets::ZERO)
    }

    /// Row capacity for a container of the given width.
    #[must_use]
    pub fn items_per_row(&self, container_width: f64) -> usize {
        items_per_row(
            container_width,
            self.config.item_size.width,
            self.config.spacing,
        )
    }

    /// Row capacity and section insets for a container of the given width.
    #[must_use]
    pub fn metrics(&self, container_width: f64) -> FlowMetrics {
        FlowMetrics {
            items_per_row: self.items_per_row(container_width),
            insets: self.section_insets(),
        }
    }

    /// Places `len` cells into a container of the given width.
    ///
    /// Rows hold `items_per_row` cells, further capped to what fits between
    /// the left and right insets, and never fewer than one: a container
    /// narrower than one cell still stacks one cell per row. Rows start at
    /// the top inset
    /// and are `item_height + spacing` apart. Within a row:
    ///
    /// - [`FlowAlignment::Leading`] places cells from the left inset with
    ///   exactly `spacing` between them.
    /// - [`FlowAlignment::Default`] spreads a full row's leftover width
    ///   evenly between its cells (never closer than `spacing`). Partial
    ///   rows reuse that gap from the left inset, and a row with a single
    ///   cell is centered.
    ///
    /// Negative or non-finite widths are treated as zero.
    #[must_use]
    pub fn layout(&self, container_width: f64, len: usize) -> FlowPass {
        let container_width = if container_width.is_finite() {
            container_width.max(0.0)
        } else {
            0.0
        };
        let FlowConfig {
            item_size,
            spacing,
            alignment,
            ..
        } = self.config;
        let insets = self.section_insets();
        let items_per_row = self.items_per_row(container_width);
        let available = (container_width - insets.x0 - insets.x1).max(0.0);
        let fits_inside_insets = floor_index((available + spacing) / (item_size.width + spacing));
        let columns = items_per_row.min(fits_inside_insets).max(1);

        let justified_gap = if columns > 1 {
            let leftover = available - columns as f64 * item_size.width;
            (leftover / (columns - 1) as f64).max(spacing)
        } else {
            spacing
        };
        let row_pitch = item_size.height + spacing;

        let mut frames = Vec::with_capacity(len);
        let mut widest = 0.0_f64;
        for index in 0..len {
            let row = index / columns;
            let column = index % columns;
            let row_len = (len - row * columns).min(columns);
            let x = match alignment {
                FlowAlignment::Leading => insets.x0 + column as f64 * (item_size.width + spacing),
                FlowAlignment::Default if row_len == 1 => {
                    insets.x0 + ((available - item_size.width) / 2.0).max(0.0)
                }
                FlowAlignment::Default => {
                    insets.x0 + column as f64 * (item_size.width + justified_gap)
                }
            };
            let y = insets.y0 + row as f64 * row_pitch;
            let frame = Rect::from_origin_size((x, y), item_size);
            widest = widest.max(frame.x1);
            frames.push(frame);
        }

        let rows = len.div_ceil(columns);
        let rows_extent = if rows == 0 {
            0.0
        } else {
            rows as f64 * row_pitch - spacing
        };
        let content_size = Size::new(
            container_width.max(widest + insets.x1),
            insets.y0 + rows_extent + insets.y1,
        );

        FlowPass {
            container_width,
            items_per_row,
            columns,
            insets,
            item_size,
            spacing,
            frames,
            content_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FlowLayout, SectionInsets, items_per_row};
    use crate::{FlowAlignment, FlowConfig};
    use kurbo::{Insets, Rect, Size};

    fn layout(config: FlowConfig) -> FlowLayout {
        FlowLayout::new(config).unwrap()
    }

    #[test]
    fn items_per_row_uses_double_spacing_pitch() {
        // 250 / (100 + 2 * 10) = 2.08
        assert_eq!(items_per_row(250.0, 100.0, 10.0), 2);
        assert_eq!(items_per_row(240.0, 100.0, 10.0), 2);
        assert_eq!(items_per_row(239.0, 100.0, 10.0), 1);
        assert_eq!(items_per_row(99.0, 100.0, 0.0), 0);
        assert_eq!(items_per_row(0.0, 100.0, 0.0), 0);
        assert_eq!(items_per_row(-10.0, 100.0, 0.0), 0);
        assert_eq!(items_per_row(f64::NAN, 100.0, 0.0), 0);
    }

    #[test]
    fn explicit_inset_wins_over_alignment() {
        let inset = Insets::uniform(10.0);
        for alignment in [FlowAlignment::Leading, FlowAlignment::Default] {
            let flow = layout(
                FlowConfig::default()
                    .with_inset(inset)
                    .with_alignment(alignment),
            );
            let metrics = flow.metrics(250.0);
            assert_eq!(metrics.insets, Insets::uniform(10.0));
        }
    }

    #[test]
    fn section_insets_name_each_edge() {
        let inset = Insets::new(1.0, 2.0, 3.0, 4.0);
        let flow = layout(FlowConfig::default().with_inset(inset));
        let edges = flow.metrics(300.0).section_insets();
        assert_eq!(
            edges,
            SectionInsets {
                top: 2.0,
                left: 1.0,
                bottom: 4.0,
                right: 3.0,
            }
        );
        assert_eq!(Insets::from(edges), inset);
    }

    #[test]
    fn horizontal_insets_cap_cells_per_row() {
        let inset = Insets::new(50.0, 0.0, 50.0, 0.0);
        for alignment in [FlowAlignment::Leading, FlowAlignment::Default] {
            let flow = layout(
                FlowConfig::default()
                    .with_inset(inset)
                    .with_alignment(alignment),
            );
            let pass = flow.layout(250.0, 2);
            // Capacity stays 250 / 100, but only one cell fits in 150.
            assert_eq!(pass.items_per_row(), 2);
            assert_eq!(pass.columns(), 1);
            assert_eq!(pass.row_count(), 2);
            for frame in pass.frames() {
                assert!(frame.x0 >= 50.0, "{frame:?} enters the left inset");
                assert!(frame.x1 <= 200.0, "{frame:?} enters the right inset");
            }
            assert_eq!(pass.content_size().width, 250.0);
        }
    }

    #[test]
    fn no_inset_means_zero_insets() {
        let flow = layout(FlowConfig::default().with_alignment(FlowAlignment::Default));
        assert_eq!(flow.section_insets(), Insets::ZERO);
        let flow = layout(FlowConfig::default());
        assert_eq!(flow.section_insets(), Insets::ZERO);
    }

    #[test]
    fn invalid_config_is_rejected_and_previous_retained() {
        let mut flow = layout(FlowConfig::default().with_spacing(4.0));
        let bad = FlowConfig::default().with_item_size(Size::new(-1.0, 10.0));
        assert!(flow.set_config(bad).is_err());
        assert_eq!(flow.config().spacing, 4.0);
        assert_eq!(flow.config().item_size, Size::new(100.0, 100.0));
    }

    #[test]
    fn leading_rows_pack_from_the_left() {
        let flow = layout(
            FlowConfig::default()
                .with_item_size(Size::new(100.0, 50.0))
                .with_spacing(10.0),
        );
        // Capacity 2 in a 250 wide container; the third cell wraps.
        let pass = flow.layout(250.0, 3);
        assert_eq!(pass.frame(0), Some(Rect::new(0.0, 0.0, 100.0, 50.0)));
        assert_eq!(pass.frame(1), Some(Rect::new(110.0, 0.0, 210.0, 50.0)));
        assert_eq!(pass.frame(2), Some(Rect::new(0.0, 60.0, 100.0, 110.0)));
        assert_eq!(pass.content_size(), Size::new(250.0, 110.0));
    }

    #[test]
    fn default_rows_are_justified_and_lone_cells_centered() {
        let flow = layout(
            FlowConfig::default()
                .with_item_size(Size::new(100.0, 50.0))
                .with_spacing(10.0)
                .with_alignment(FlowAlignment::Default),
        );
        let pass = flow.layout(250.0, 3);
        // Full row: 50 leftover width becomes the gap.
        assert_eq!(pass.frame(0), Some(Rect::new(0.0, 0.0, 100.0, 50.0)));
        assert_eq!(pass.frame(1), Some(Rect::new(150.0, 0.0, 250.0, 50.0)));
        // Lone cell in the last row is centered.
        assert_eq!(pass.frame(2), Some(Rect::new(75.0, 60.0, 175.0, 110.0)));
    }

    #[test]
    fn partial_default_row_keeps_full_row_gap() {
        let flow = layout(
            FlowConfig::default()
                .with_item_size(Size::new(50.0, 50.0))
                .with_alignment(FlowAlignment::Default),
        );
        // Capacity 4 in 230: leftover 30 spread over 3 gaps.
        let pass = flow.layout(230.0, 6);
        assert_eq!(pass.items_per_row(), 4);
        assert_eq!(pass.frame(4).map(|r| r.x0), Some(0.0));
        assert_eq!(pass.frame(5).map(|r| r.x0), Some(60.0));
    }

    #[test]
    fn narrow_container_stacks_one_cell_per_row() {
        let flow = layout(FlowConfig::default());
        let pass = flow.layout(50.0, 3);
        assert_eq!(pass.items_per_row(), 0);
        assert_eq!(pass.row_count(), 3);
        assert_eq!(pass.frame(2), Some(Rect::new(0.0, 200.0, 100.0, 300.0)));
        // Overflowing cells widen the content.
        assert_eq!(pass.content_size(), Size::new(100.0, 300.0));
    }

    #[test]
    fn insets_offset_cells_and_content() {
        let flow = layout(
            FlowConfig::default()
                .with_item_size(Size::new(10.0, 10.0))
                .with_inset(Insets::new(5.0, 7.0, 5.0, 3.0)),
        );
        let pass = flow.layout(100.0, 1);
        assert_eq!(pass.frame(0), Some(Rect::new(5.0, 7.0, 15.0, 17.0)));
        assert_eq!(pass.content_size(), Size::new(100.0, 20.0));
    }

    #[test]
    fn empty_layout_has_only_insets() {
        let flow = layout(FlowConfig::default().with_inset(Insets::uniform(4.0)));
        let pass = flow.layout(300.0, 0);
        assert!(pass.is_empty());
        assert_eq!(pass.row_count(), 0);
        assert_eq!(pass.content_size(), Size::new(300.0, 8.0));
    }
}
