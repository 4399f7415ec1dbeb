// Library crate root.
//
// A band/wall region algebra over axis-aligned integer rectangles in a 2-D
// grid, built for terminal-graphics consumers. A region is a finite union of
// disjoint rectangles; all set operations flow through one scanline merge
// engine and always return the canonical band representation.

pub mod geom;
pub mod region;

// Optional JSON rect-list descriptions.
#[cfg(feature = "desc-io")]
pub mod desc;

#[cfg(test)]
pub mod test_helpers;
