//! Composite Albers USA projection and viewport fitting.
//!
//! The conterminous states use an Albers equal-area conic; Alaska and Hawaii
//! are drawn as insets below the southwest corner, Alaska at 0.35 scale.
//! Each panel has a clip extent; positions outside every panel are not part
//! of the map. Output units are arbitrary and are fitted to the viewport
//! afterwards.

use std::f64::consts::PI;

const RADIANS: f64 = PI / 180.0;

/// Albers equal-area conic for a pair of standard parallels.
#[derive(Debug, Clone, Copy)]
struct ConicEqualArea {
    n: f64,
    c: f64,
    r0: f64,
}

impl ConicEqualArea {
    fn new(parallel0: f64, parallel1: f64) -> Self {
        let sy0 = (parallel0 * RADIANS).sin();
        let n = (sy0 + (parallel1 * RADIANS).sin()) / 2.0;
        let c = 1.0 + sy0 * (2.0 * n - sy0);
        let r0 = c.sqrt() / n;
        Self { n, c, r0 }
    }

    /// Project radians to planar coordinates with y pointing north.
    fn project(&self, lambda: f64, phi: f64) -> (f64, f64) {
        let r = (self.c - 2.0 * self.n * phi.sin()).max(0.0).sqrt() / self.n;
        let theta = lambda * self.n;
        (r * theta.sin(), self.r0 - r * theta.cos())
    }
}

/// One panel of the composite: a rotated conic placed at an offset.
#[derive(Debug, Clone, Copy)]
struct Inset {
    rotate: f64,
    conic: ConicEqualArea,
    center: (f64, f64),
    scale: f64,
    offset: (f64, f64),
    extent: Bounds,
}

impl Inset {
    fn new(
        rotate: f64,
        center: (f64, f64),
        parallels: (f64, f64),
        scale: f64,
        offset: (f64, f64),
        extent: ((f64, f64), (f64, f64)),
    ) -> Self {
        let conic = ConicEqualArea::new(parallels.0, parallels.1);
        // Center is given in rotated coordinates.
        let center = conic.project(center.0 * RADIANS, center.1 * RADIANS);
        let ((min_x, min_y), (max_x, max_y)) = extent;
        Self {
            rotate,
            conic,
            center,
            scale,
            offset,
            extent: Bounds {
                min_x,
                min_y,
                max_x,
                max_y,
            },
        }
    }

    /// Project degrees to screen-oriented units (y grows downward).
    fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        let lambda = wrap_degrees(lon + self.rotate) * RADIANS;
        let (x, y) = self.conic.project(lambda, lat * RADIANS);
        (
            self.offset.0 + self.scale * (x - self.center.0),
            self.offset.1 - self.scale * (y - self.center.1),
        )
    }
}

fn wrap_degrees(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 && lon > 0.0 {
        180.0
    } else {
        wrapped
    }
}

/// Which panel of the composite a polygon belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Lower48,
    Alaska,
    Hawaii,
}

impl Region {
    /// Candidate panel for a position by longitude and latitude. The position
    /// may still fall outside that panel's extent.
    pub fn of(lon: f64, lat: f64) -> Self {
        if lat >= 50.0 && (lon <= -129.0 || lon >= 170.0) {
            Region::Alaska
        } else if (18.0..=23.0).contains(&lat) && (-161.0..=-154.0).contains(&lon) {
            Region::Hawaii
        } else {
            Region::Lower48
        }
    }
}

/// Composite projection for the United States.
#[derive(Debug, Clone, Copy)]
pub struct AlbersUsa {
    lower48: Inset,
    alaska: Inset,
    hawaii: Inset,
}

impl Default for AlbersUsa {
    fn default() -> Self {
        Self {
            lower48: Inset::new(
                96.0,
                (-0.6, 38.7),
                (29.5, 45.5),
                1.0,
                (0.0, 0.0),
                ((-0.455, -0.238), (0.455, 0.238)),
            ),
            alaska: Inset::new(
                154.0,
                (-2.0, 58.5),
                (55.0, 65.0),
                0.35,
                (-0.307, 0.201),
                ((-0.425, 0.120), (-0.214, 0.234)),
            ),
            hawaii: Inset::new(
                157.0,
                (-3.0, 19.9),
                (8.0, 18.0),
                1.0,
                (-0.205, 0.212),
                ((-0.214, 0.166), (-0.115, 0.234)),
            ),
        }
    }
}

impl AlbersUsa {
    fn inset(&self, region: Region) -> &Inset {
        match region {
            Region::Lower48 => &self.lower48,
            Region::Alaska => &self.alaska,
            Region::Hawaii => &self.hawaii,
        }
    }

    /// Project a position using an explicit panel, without clipping.
    pub fn project_in(&self, region: Region, lon: f64, lat: f64) -> (f64, f64) {
        self.inset(region).project(lon, lat)
    }

    /// Panel a position is drawn in, or None when it lies outside every
    /// panel's extent (e.g. Puerto Rico).
    pub fn locate(&self, lon: f64, lat: f64) -> Option<Region> {
        let region = Region::of(lon, lat);
        let point = self.project_in(region, lon, lat);
        self.inset(region).extent.contains(point).then_some(region)
    }

    /// Project a position, choosing the panel from the position itself.
    pub fn project(&self, lon: f64, lat: f64) -> Option<(f64, f64)> {
        let region = self.locate(lon, lat)?;
        Some(self.project_in(region, lon, lat))
    }
}

/// Axis-aligned bounds of projected points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    pub fn extend(&mut self, (x, y): (f64, f64)) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn contains(&self, (x, y): (f64, f64)) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Affine transform from projected units into viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    pub scale: f64,
    pub translate: (f64, f64),
}

impl Fit {
    /// Fit `bounds` into a `width` x `height` box, centered, keeping aspect.
    pub fn to_viewport(bounds: &Bounds, width: f64, height: f64, padding: f64) -> Self {
        if bounds.is_empty() {
            return Self {
                scale: 1.0,
                translate: (0.0, 0.0),
            };
        }

        let avail_w = (width - 2.0 * padding).max(1.0);
        let avail_h = (height - 2.0 * padding).max(1.0);
        let scale = match (bounds.width() > 0.0, bounds.height() > 0.0) {
            (true, true) => (avail_w / bounds.width()).min(avail_h / bounds.height()),
            (true, false) => avail_w / bounds.width(),
            (false, true) => avail_h / bounds.height(),
            (false, false) => 1.0,
        };

        let cx = (bounds.min_x + bounds.max_x) / 2.0;
        let cy = (bounds.min_y + bounds.max_y) / 2.0;
        Self {
            scale,
            translate: (width / 2.0 - scale * cx, height / 2.0 - scale * cy),
        }
    }

    pub fn apply(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (
            self.translate.0 + self.scale * x,
            self.translate.1 + self.scale * y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_projects_to_origin() {
        let projection = AlbersUsa::default();
        // Lower-48 center is 96.6W, 38.7N
        let (x, y) = projection.project(-96.6, 38.7).unwrap();
        assert!(x.abs() < 1e-9, "x = {}", x);
        assert!(y.abs() < 1e-9, "y = {}", y);
    }

    #[test]
    fn test_north_is_up_and_east_is_right() {
        let projection = AlbersUsa::default();
        let (west_x, _) = projection.project(-120.0, 40.0).unwrap();
        let (east_x, _) = projection.project(-75.0, 40.0).unwrap();
        assert!(west_x < east_x);

        let (_, south_y) = projection.project(-96.0, 30.0).unwrap();
        let (_, north_y) = projection.project(-96.0, 47.0).unwrap();
        assert!(north_y < south_y);
    }

    #[test]
    fn test_region_classification() {
        assert_eq!(Region::of(-150.0, 61.2), Region::Alaska);
        assert_eq!(Region::of(173.0, 52.9), Region::Alaska);
        assert_eq!(Region::of(-157.8, 21.3), Region::Hawaii);
        assert_eq!(Region::of(-97.7, 30.3), Region::Lower48);
        // Washington state is north of 45 but east of the Alaska cutoff
        assert_eq!(Region::of(-122.3, 47.6), Region::Lower48);
    }

    #[test]
    fn test_insets_sit_southwest_of_lower48() {
        let projection = AlbersUsa::default();
        let (seattle_x, _) = projection.project(-122.3, 47.6).unwrap();
        let (_, miami_y) = projection.project(-80.2, 25.8).unwrap();
        let (anchorage_x, anchorage_y) = projection.project(-149.9, 61.2).unwrap();
        let (honolulu_x, honolulu_y) = projection.project(-157.8, 21.3).unwrap();

        assert!(anchorage_x < seattle_x + 0.1);
        assert!(honolulu_x < 0.0);
        // Both insets hang around the bottom edge of the conterminous states
        assert!(anchorage_y > 0.0);
        assert!(honolulu_y > 0.0);
        assert!((honolulu_y - miami_y).abs() < 0.1);
    }

    #[test]
    fn test_aleutians_across_antimeridian_stay_near_alaska() {
        let projection = AlbersUsa::default();
        let (west_x, _) = projection.project(-179.0, 51.5).unwrap();
        let (east_x, _) = projection.project(179.0, 51.5).unwrap();
        assert!((west_x - east_x).abs() < 0.05);
    }

    #[test]
    fn test_puerto_rico_is_outside_every_panel() {
        let projection = AlbersUsa::default();
        assert_eq!(projection.locate(-66.5, 18.2), None);
        assert_eq!(projection.project(-66.5, 18.2), None);
        // Unclipped it would land past the lower-48 extent
        let (x, y) = projection.project_in(Region::Lower48, -66.5, 18.2);
        assert!(x > 0.455 && y > 0.238);
    }

    #[test]
    fn test_extreme_states_stay_inside_their_panels() {
        let projection = AlbersUsa::default();
        let cases = [
            (-81.8, 24.55, Region::Lower48),
            (-66.95, 47.46, Region::Lower48),
            (-124.7, 48.4, Region::Lower48),
            (-156.8, 71.3, Region::Alaska),
            (-130.0, 55.3, Region::Alaska),
            (173.0, 52.9, Region::Alaska),
            (-159.7, 22.2, Region::Hawaii),
            (-155.7, 18.9, Region::Hawaii),
        ];
        for (lon, lat, region) in cases {
            assert_eq!(projection.locate(lon, lat), Some(region), "{}, {}", lon, lat);
        }
    }

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_eq!(wrap_degrees(190.0), -170.0);
        assert_eq!(wrap_degrees(-190.0), 170.0);
        assert_eq!(wrap_degrees(180.0), 180.0);
    }

    #[test]
    fn test_fit_centers_and_preserves_aspect() {
        let mut bounds = Bounds::empty();
        bounds.extend((0.0, 0.0));
        bounds.extend((2.0, 1.0));

        let fit = Fit::to_viewport(&bounds, 100.0, 100.0, 0.0);
        assert_eq!(fit.scale, 50.0);
        assert_eq!(fit.apply((0.0, 0.0)), (0.0, 25.0));
        assert_eq!(fit.apply((2.0, 1.0)), (100.0, 75.0));
    }

    #[test]
    fn test_bounds_ignore_non_finite() {
        let mut bounds = Bounds::empty();
        assert!(bounds.is_empty());
        bounds.extend((f64::NAN, 1.0));
        assert!(bounds.is_empty());
        bounds.extend((1.0, 1.0));
        assert!(!bounds.is_empty());
    }
}
