use crate::geom::{Point, Size};
use crate::region::{Region, RegionError};
use serde::Deserialize;

/// One axis-aligned rectangle in a region description: position `(y, x)`,
/// extent `(h, w)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RectDesc {
    pub y: i32,
    pub x: i32,
    pub h: i32,
    pub w: i32,
}

pub fn parse_rects_json(json_text: &str) -> Result<Vec<RectDesc>, serde_json::Error> {
    serde_json::from_str(json_text)
}

/// Union fold over a rect list. Rects with non-positive extents contribute
/// nothing, matching `Region::from_rect`.
pub fn region_from_rect_descs(descs: &[RectDesc]) -> Result<Region, RegionError> {
    let mut region = Region::new();
    for d in descs {
        let rect = Region::from_rect(Point::new(d.y, d.x), Size::new(d.h, d.w));
        region = region.union(&rect)?;
    }
    Ok(region)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::Band;

    #[test]
    fn rect_descs_deserialize_sample_json() {
        let sample = r#"
        [
            { "y": 0, "x": 0, "h": 1, "w": 2 },
            { "y": 0, "x": 2, "h": 1, "w": 3 },
            { "y": 5, "x": 1, "h": 0, "w": 4 }
        ]
        "#;

        let descs = parse_rects_json(sample).expect("sample json should deserialize");
        assert_eq!(descs.len(), 3);
        assert_eq!(
            descs[0],
            RectDesc {
                y: 0,
                x: 0,
                h: 1,
                w: 2
            }
        );

        // The two abutting rects fuse; the zero-height one vanishes.
        let region = region_from_rect_descs(&descs).unwrap();
        assert_eq!(
            region.bands(),
            &[Band {
                y1: 0,
                y2: 1,
                walls: vec![0, 5]
            }]
        );
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse_rects_json("[{ \"y\": 0 }]").is_err());
        assert!(parse_rects_json("not json").is_err());
    }
}
