use crate::geom::{Point, Size};
use crate::region::Region;

/// Build a region from an ascii grid: `#` is inside, `.` is outside. Row 0
/// maps to y 0, column 0 to x 0. Built as a union of per-row runs, so the
/// result is canonical like any other region.
pub fn region_from_ascii(grid: &str) -> Region {
    let rows: Vec<&str> = grid
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    assert!(!rows.is_empty(), "grid must have at least one non-empty row");
    let w = rows[0].len();
    assert!(w > 0, "grid rows must be non-empty");
    for r in &rows {
        assert_eq!(r.len(), w, "all rows must have equal length");
    }

    let mut region = Region::new();
    for (y, row) in rows.iter().enumerate() {
        let bytes = row.as_bytes();
        let mut x = 0usize;
        while x < bytes.len() {
            if bytes[x] == b'#' {
                let run_start = x;
                while x < bytes.len() && bytes[x] == b'#' {
                    x += 1;
                }
                let run = Region::from_rect(
                    Point::new(y as i32, run_start as i32),
                    Size::new(1, (x - run_start) as i32),
                );
                region = region.union(&run).expect("fixture union");
            } else {
                assert_eq!(bytes[x], b'.', "grid cells must be '#' or '.'");
                x += 1;
            }
        }
    }
    region
}

/// Render the `[0, h) x [0, w)` window of a region as an ascii grid.
pub fn region_to_ascii(region: &Region, w: i32, h: i32) -> String {
    let mut out = String::new();
    for y in 0..h {
        for x in 0..w {
            out.push(if region.contains(Point::new(y, x)) {
                '#'
            } else {
                '.'
            });
        }
        out.push('\n');
    }
    out
}

/// Check every representation invariant, with a message naming the one that
/// broke.
pub fn assert_canonical(region: &Region) {
    let bands = region.bands();
    for b in bands {
        assert!(
            b.y1 < b.y2,
            "invariant: band must have positive height, got [{}, {})",
            b.y1,
            b.y2
        );
        assert!(
            !b.walls.is_empty(),
            "invariant: no stored band may have an empty wall vector"
        );
        assert!(
            b.walls.len() % 2 == 0,
            "invariant: wall vector length must be even, got {:?}",
            b.walls
        );
        for pair in b.walls.windows(2) {
            assert!(
                pair[0] < pair[1],
                "invariant: walls must be strictly increasing, got {:?}",
                b.walls
            );
        }
    }
    for pair in bands.windows(2) {
        assert!(
            pair[0].y2 <= pair[1].y1,
            "invariant: bands must be y-sorted and y-disjoint"
        );
        if pair[0].y2 == pair[1].y1 {
            assert_ne!(
                pair[0].walls, pair[1].walls,
                "invariant: touching bands with identical walls must be fused"
            );
        }
    }
}
