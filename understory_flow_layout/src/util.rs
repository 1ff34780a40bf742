// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// `floor(x)` as an index. Negative values and NaN map to `0`.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Value is non-negative, so truncation is floor; the cast saturates"
)]
pub(crate) fn floor_index(x: f64) -> usize {
    if x.is_nan() || x <= 0.0 {
        return 0;
    }
    x as usize
}

/// `ceil(x)` as an index. Negative values and NaN map to `0`.
pub(crate) fn ceil_index(x: f64) -> usize {
    let i = floor_index(x);
    if (i as f64) < x { i + 1 } else { i }
}
