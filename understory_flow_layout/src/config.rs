// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout configuration and its validation.

use kurbo::{Insets, Size};

/// Horizontal packing mode for the cells of a row.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FlowAlignment {
    /// Pack cells flush to the leading edge of each row, separated by exactly
    /// `spacing`, leaving any leftover width as trailing empty space.
    #[default]
    Leading,
    /// Native flow behavior: full rows are justified across the available
    /// width and a row holding a single cell is centered.
    Default,
}

/// Reasons a [`FlowConfig`] is rejected.
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Cell width or height is zero or negative.
    #[error("invalid configuration: item size must be positive, got {width}x{height}")]
    NonPositiveItemSize {
        /// Rejected width.
        width: f64,
        /// Rejected height.
        height: f64,
    },
    /// Spacing is negative.
    #[error("invalid configuration: spacing must not be negative, got {0}")]
    NegativeSpacing(f64),
    /// Some size, spacing, or inset value is NaN or infinite.
    #[error("invalid configuration: sizes, spacing and insets must be finite")]
    NonFiniteValue,
}

/// Parameters for one layout pass.
///
/// All cells share `item_size`. `spacing` is used both between rows and
/// between cells in a row. When `inset` is set it is used verbatim as the
/// section inset regardless of `alignment`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FlowConfig {
    /// Uniform cell size.
    pub item_size: Size,
    /// Gap between rows and between cells in a row.
    pub spacing: f64,
    /// Explicit section insets (`x0` left, `y0` top, `x1` right, `y1` bottom).
    pub inset: Option<Insets>,
    /// Row packing mode.
    pub alignment: FlowAlignment,
}

impl FlowConfig {
    /// Cell size used when none is given: 100×100.
    pub const DEFAULT_ITEM_SIZE: Size = Size::new(100.0, 100.0);

    /// Returns this configuration with a different cell size.
    #[must_use]
    pub const fn with_item_size(mut self, item_size: Size) -> Self {
        self.item_size = item_size;
        self
    }

    /// Returns this configuration with a different spacing.
    #[must_use]
    pub const fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    /// Returns this configuration with explicit section insets.
    #[must_use]
    pub const fn with_inset(mut self, inset: Insets) -> Self {
        self.inset = Some(inset);
        self
    }

    /// Returns this configuration with a different alignment.
    #[must_use]
    pub const fn with_alignment(mut self, alignment: FlowAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Checks that sizes are positive, spacing is non-negative, and every
    /// value is finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Size { width, height } = self.item_size;
        let inset_finite = self.inset.is_none_or(|i| {
            i.x0.is_finite() && i.y0.is_finite() && i.x1.is_finite() && i.y1.is_finite()
        });
        if !(width.is_finite() && height.is_finite() && self.spacing.is_finite() && inset_finite) {
            return Err(ConfigError::NonFiniteValue);
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(ConfigError::NonPositiveItemSize { width, height });
        }
        if self.spacing < 0.0 {
            return Err(ConfigError::NegativeSpacing(self.spacing));
        }
        Ok(())
    }
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            item_size: Self::DEFAULT_ITEM_SIZE,
            spacing: 0.0,
            inset: None,
            alignment: FlowAlignment::Leading,
        }
    }
}
