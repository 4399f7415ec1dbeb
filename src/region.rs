use crate::geom::{Point, Size};
use std::collections::TryReserveError;
use thiserror::Error;

/// Errors produced while building a region.
///
/// Allocation failure is the only non-logical error. Degenerate inputs
/// (zero-size rectangles, empty operands, out-of-range query points) produce
/// well-defined empty or `false` results instead of errors.
#[derive(Debug, Error)]
pub enum RegionError {
    #[error("region storage allocation failed: {0}")]
    Alloc(#[from] TryReserveError),
}

// Band
// -----------------------------------------------------------------------------

/// A horizontal strip `[y1, y2)` of a region.
///
/// `walls` is an even-length, strictly increasing list of x-coordinates at
/// which membership toggles: each pair `(walls[2k], walls[2k+1])` is a
/// half-open x-interval `[enter, exit)` inside the region on this strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Band {
    pub y1: i32,
    pub y2: i32, // exclusive
    pub walls: Vec<i32>,
}

// Boolean operators
// -----------------------------------------------------------------------------

/// A 2-input Boolean operator over the (inside-A, inside-B) parity bits.
///
/// The merge engine is agnostic to which operator it is handed; adding an
/// operator is a new variant plus one `apply` arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionOp {
    Union,
    Intersect,
    Subtract, // A minus B; the only non-commutative operator
    Xor,
}

impl RegionOp {
    #[inline]
    pub fn apply(self, in_a: bool, in_b: bool) -> bool {
        match self {
            RegionOp::Union => in_a || in_b,
            RegionOp::Intersect => in_a && in_b,
            RegionOp::Subtract => in_a && !in_b,
            RegionOp::Xor => in_a != in_b,
        }
    }
}

// Region
// -----------------------------------------------------------------------------

/// A finite union of axis-aligned integer rectangles, stored as y-sorted,
/// y-disjoint bands.
///
/// The representation is canonical: no band is empty, and two vertically
/// touching bands never carry identical wall vectors (they would have been
/// fused into one). Canonical form makes derived equality set equality: two
/// regions denote the same point set iff their band lists compare equal.
///
/// Regions are values with exclusive ownership. Set operations read their
/// operands and return freshly allocated results; nothing is shared between
/// regions, so `&Region` access from multiple threads is safe.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Region {
    bands: Vec<Band>,
}

// Growth
// -----------------------------------------------------------------------------

const INITIAL_CAPACITY: usize = 8;

/// Make room for one more element: first growth to `INITIAL_CAPACITY`, then
/// doubling, with failures surfaced instead of aborting.
#[inline]
fn reserve_for_push<T>(v: &mut Vec<T>) -> Result<(), RegionError> {
    if v.len() == v.capacity() {
        let additional = if v.capacity() == 0 {
            INITIAL_CAPACITY
        } else {
            v.capacity()
        };
        v.try_reserve(additional)?;
    }
    Ok(())
}

// Merge engine
// -----------------------------------------------------------------------------

const NO_WALLS: &[i32] = &[];

/// Append the strip `[y1, y2)` to `out` with walls merged from `r_walls` and
/// `s_walls` under `op`.
///
/// Walks both wall lists in lockstep. Three parity bits track inside-R,
/// inside-S, and inside-result; a wall is emitted exactly where
/// `op(in_r, in_s)` flips, so the produced vector is even-length and strictly
/// increasing by construction.
///
/// A strip that produces no walls is discarded. Otherwise, if the previous
/// band in `out` touches this one (`prev.y2 == y1`) with identical walls, the
/// previous band is extended instead of appending. This tail fuse is the only
/// mechanism that keeps the band list canonical, so every append must go
/// through here.
fn merge_bands(
    y1: i32,
    y2: i32,
    r_walls: &[i32],
    s_walls: &[i32],
    op: RegionOp,
    out: &mut Region,
) -> Result<(), RegionError> {
    debug_assert!(y1 < y2, "merged strip must have positive height");

    let mut walls: Vec<i32> = Vec::new();
    let (mut i, mut j) = (0usize, 0usize);
    let (mut in_r, mut in_s, mut in_out) = (false, false, false);

    while i < r_walls.len() || j < s_walls.len() {
        let x = match (r_walls.get(i), s_walls.get(j)) {
            (Some(&rx), Some(&sx)) => rx.min(sx),
            (Some(&rx), None) => rx,
            (None, Some(&sx)) => sx,
            (None, None) => break,
        };
        if i < r_walls.len() && r_walls[i] == x {
            in_r = !in_r;
            i += 1;
        }
        if j < s_walls.len() && s_walls[j] == x {
            in_s = !in_s;
            j += 1;
        }
        if op.apply(in_r, in_s) != in_out {
            in_out = !in_out;
            reserve_for_push(&mut walls)?;
            walls.push(x);
        }
    }

    if walls.is_empty() {
        return Ok(());
    }

    if let Some(prev) = out.bands.last_mut() {
        if prev.y2 == y1 && prev.walls == walls {
            prev.y2 = y2;
            return Ok(());
        }
    }

    reserve_for_push(&mut out.bands)?;
    out.bands.push(Band { y1, y2, walls });
    Ok(())
}

// Construction and set algebra
// -----------------------------------------------------------------------------

impl Region {
    /// The empty region.
    #[inline]
    pub const fn new() -> Region {
        Region { bands: Vec::new() }
    }

    /// A single rectangle at `pos` with extent `size`, or the empty region if
    /// either extent is non-positive.
    pub fn from_rect(pos: Point, size: Size) -> Region {
        if size.h <= 0 || size.w <= 0 {
            return Region::new();
        }
        Region {
            bands: vec![Band {
                y1: pos.y,
                y2: pos.y + size.h,
                walls: vec![pos.x, pos.x + size.w],
            }],
        }
    }

    /// Union of a list of rectangles.
    pub fn from_rects(rects: &[(Point, Size)]) -> Result<Region, RegionError> {
        let mut region = Region::new();
        for &(pos, size) in rects {
            region = region.union(&Region::from_rect(pos, size))?;
        }
        Ok(region)
    }

    /// Merge two regions under `op` with a downward y-scanline sweep.
    ///
    /// The sweep emits one strip per maximal y-interval over which the pair
    /// of active bands is constant; a side with no active band contributes
    /// the empty wall list. `scanline` is carried explicitly as the bottom of
    /// the last requested strip. It must not be re-read from
    /// `out.bands.last()`, which lags whenever the last strip merged to
    /// nothing and was discarded.
    pub fn combine(a: &Region, b: &Region, op: RegionOp) -> Result<Region, RegionError> {
        let mut out = Region::new();
        let a_bands = a.bands.as_slice();
        let b_bands = b.bands.as_slice();
        let (mut i, mut j) = (0usize, 0usize);

        let mut scanline = match (a_bands.first(), b_bands.first()) {
            (Some(r), Some(s)) => r.y1.min(s.y1),
            (Some(r), None) => r.y1,
            (None, Some(s)) => s.y1,
            (None, None) => return Ok(out),
        };

        while i < a_bands.len() && j < b_bands.len() {
            let r = &a_bands[i];
            let s = &b_bands[j];
            if r.y1 <= s.y1 {
                if scanline < r.y1 {
                    scanline = r.y1;
                }
                if r.y2 <= s.y1 {
                    // R ends before S begins.
                    merge_bands(scanline, r.y2, &r.walls, NO_WALLS, op, &mut out)?;
                    scanline = r.y2;
                    i += 1;
                } else {
                    if scanline < s.y1 {
                        merge_bands(scanline, s.y1, &r.walls, NO_WALLS, op, &mut out)?;
                        scanline = s.y1;
                    }
                    if r.y2 <= s.y2 {
                        merge_bands(s.y1, r.y2, &r.walls, &s.walls, op, &mut out)?;
                        scanline = r.y2;
                        if r.y2 == s.y2 {
                            j += 1;
                        }
                        i += 1;
                    } else {
                        merge_bands(s.y1, s.y2, &r.walls, &s.walls, op, &mut out)?;
                        scanline = s.y2;
                        j += 1;
                    }
                }
            } else {
                if scanline < s.y1 {
                    scanline = s.y1;
                }
                if s.y2 <= r.y1 {
                    // S ends before R begins.
                    merge_bands(scanline, s.y2, NO_WALLS, &s.walls, op, &mut out)?;
                    scanline = s.y2;
                    j += 1;
                } else {
                    if scanline < r.y1 {
                        merge_bands(scanline, r.y1, NO_WALLS, &s.walls, op, &mut out)?;
                        scanline = r.y1;
                    }
                    if s.y2 <= r.y2 {
                        merge_bands(r.y1, s.y2, &r.walls, &s.walls, op, &mut out)?;
                        scanline = s.y2;
                        if s.y2 == r.y2 {
                            i += 1;
                        }
                        j += 1;
                    } else {
                        merge_bands(r.y1, r.y2, &r.walls, &s.walls, op, &mut out)?;
                        scanline = r.y2;
                        i += 1;
                    }
                }
            }
        }

        // Drain whichever side is left, still through the full per-band merge:
        // the engine may not assume op(0, 0) == 0 holds for every operator.
        // Only the first drained band can overlap the already-swept area.
        while i < a_bands.len() {
            let r = &a_bands[i];
            merge_bands(r.y1.max(scanline), r.y2, &r.walls, NO_WALLS, op, &mut out)?;
            scanline = r.y2;
            i += 1;
        }
        while j < b_bands.len() {
            let s = &b_bands[j];
            merge_bands(s.y1.max(scanline), s.y2, NO_WALLS, &s.walls, op, &mut out)?;
            scanline = s.y2;
            j += 1;
        }

        Ok(out)
    }

    pub fn union(&self, other: &Region) -> Result<Region, RegionError> {
        Region::combine(self, other, RegionOp::Union)
    }

    pub fn intersect(&self, other: &Region) -> Result<Region, RegionError> {
        Region::combine(self, other, RegionOp::Intersect)
    }

    /// `self` minus `other`.
    pub fn subtract(&self, other: &Region) -> Result<Region, RegionError> {
        Region::combine(self, other, RegionOp::Subtract)
    }

    /// Symmetric difference.
    pub fn xor(&self, other: &Region) -> Result<Region, RegionError> {
        Region::combine(self, other, RegionOp::Xor)
    }
}

// Queries
// -----------------------------------------------------------------------------

impl Region {
    /// The canonical band list.
    #[inline]
    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    #[inline]
    pub fn is_nonempty(&self) -> bool {
        !self.bands.is_empty()
    }

    /// True when the region is exactly one rectangle.
    #[inline]
    pub fn is_rect(&self) -> bool {
        self.bands.len() == 1 && self.bands[0].walls.len() == 2
    }

    /// Number of rectangles `rects()` will yield.
    pub fn rect_count(&self) -> usize {
        self.bands.iter().map(|b| b.walls.len() / 2).sum()
    }

    /// Point membership in O(log bands + log walls).
    ///
    /// Both intervals are half-open, so a point on a bottom or right edge is
    /// outside.
    pub fn contains(&self, p: Point) -> bool {
        let idx = self.bands.partition_point(|band| band.y1 <= p.y);
        if idx == 0 {
            return false;
        }
        let band = &self.bands[idx - 1];
        if p.y >= band.y2 {
            return false;
        }
        // A point is inside iff an odd number of walls lie at or before it.
        let crossings = band.walls.partition_point(|&w| w <= p.x);
        crossings % 2 == 1
    }

    /// Tight bounding rectangle, or `None` for the empty region.
    pub fn bounds(&self) -> Option<(Point, Size)> {
        let first = self.bands.first()?;
        let last = self.bands.last()?;
        let mut x1 = i32::MAX;
        let mut x2 = i32::MIN;
        for band in &self.bands {
            x1 = x1.min(band.walls[0]);
            x2 = x2.max(band.walls[band.walls.len() - 1]);
        }
        Some((
            Point::new(first.y1, x1),
            Size::new(last.y2 - first.y1, x2 - x1),
        ))
    }

    /// Decompose the region into disjoint rectangles, in band order then
    /// left-to-right. Equal regions always enumerate identically.
    #[inline]
    pub fn rects(&self) -> Rects<'_> {
        Rects {
            bands: &self.bands,
            band_i: 0,
            wall_i: 0,
        }
    }

    /// One line per band, `Band(y1, y2, walls=[..])`. Diagnostics only; the
    /// format is not a stability contract.
    pub fn debug_string(&self) -> String {
        let mut out = String::new();
        for band in &self.bands {
            out.push_str(&format!(
                "Band({}, {}, walls={:?})\n",
                band.y1, band.y2, band.walls
            ));
        }
        out
    }

    pub fn debug_print(&self) {
        print!("{}", self.debug_string());
    }
}

// Rect enumeration
// -----------------------------------------------------------------------------

pub struct Rects<'a> {
    bands: &'a [Band],
    band_i: usize,
    wall_i: usize,
}

impl<'a> Iterator for Rects<'a> {
    type Item = (Point, Size);

    fn next(&mut self) -> Option<(Point, Size)> {
        let band = self.bands.get(self.band_i)?;
        let x1 = band.walls[self.wall_i];
        let x2 = band.walls[self.wall_i + 1];
        self.wall_i += 2;
        if self.wall_i >= band.walls.len() {
            self.wall_i = 0;
            self.band_i += 1;
        }
        Some((
            Point::new(band.y1, x1),
            Size::new(band.y2 - band.y1, x2 - x1),
        ))
    }
}

// Tests
// -----------------------------------------------------------------------------
