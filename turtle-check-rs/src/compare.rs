//! Alpha-channel raster comparison.
//!
//! Two drawings are the same picture when every pixel has the same coverage.
//! Color is ignored, so a learner may pick any pen color.

use crate::snapshot::PixelSnapshot;
use std::fmt;

/// Whether `a` and `b` have equal length and identical alpha bytes.
///
/// Symmetric and exact. Snapshots of different length never match.
pub fn compare(a: &PixelSnapshot, b: &PixelSnapshot) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.alphas().eq(b.alphas())
}

/// Where two snapshots disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphaDiff {
    Identical,
    /// Buffers differ in length; `(width, height)` of each side.
    DimensionMismatch {
        left: (u32, u32),
        right: (u32, u32),
    },
    /// `count` pixels differ in alpha; `first` is the first in row-major
    /// order, in the left snapshot's coordinates.
    Mismatch { count: usize, first: (u32, u32) },
}

impl AlphaDiff {
    pub fn is_match(&self) -> bool {
        matches!(self, AlphaDiff::Identical)
    }
}

impl fmt::Display for AlphaDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlphaDiff::Identical => write!(f, "alpha channels are identical"),
            AlphaDiff::DimensionMismatch { left, right } => write!(
                f,
                "size mismatch: {}x{} vs {}x{}",
                left.0, left.1, right.0, right.1
            ),
            AlphaDiff::Mismatch { count, first } => write!(
                f,
                "{count} pixel(s) differ in alpha, first at ({}, {})",
                first.0, first.1
            ),
        }
    }
}

/// Describe how the alpha channels of `a` and `b` differ.
pub fn diff_alpha(a: &PixelSnapshot, b: &PixelSnapshot) -> AlphaDiff {
    if a.len() != b.len() {
        return AlphaDiff::DimensionMismatch {
            left: (a.width(), a.height()),
            right: (b.width(), b.height()),
        };
    }

    let mut count = 0;
    let mut first = None;
    for (i, (left, right)) in a.alphas().zip(b.alphas()).enumerate() {
        if left != right {
            count += 1;
            first.get_or_insert(i);
        }
    }

    match first {
        None => AlphaDiff::Identical,
        Some(i) => {
            let width = a.width() as usize;
            AlphaDiff::Mismatch {
                count,
                first: ((i % width) as u32, (i / width) as u32),
            }
        }
    }
}
