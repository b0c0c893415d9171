//! Coordinate conversion between document point space and raster pixel space.
//!
//! All persisted boxes live in unrotated page point space. Canvas (raster)
//! space is the pixel grid of one specific page render and depends on raster
//! resolution and rotation. The display zoom is a separate uniform factor
//! applied on top by callers and never enters these transforms.
//!
//! Clamping at the page edges is intentionally lossy: boxes reaching more
//! than [`PDF_CLAMP_EPSILON_PTS`] past the page are clipped, so the
//! canvas -> pdf -> canvas round trip is exact only for in-bounds input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::PDF_CLAMP_EPSILON_PTS;

/// Errors from coordinate transforms and render metadata validation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    /// A box contained NaN or an infinity.
    #[error("box contains a non-finite coordinate")]
    NonFiniteBox,

    /// Rotation was not one of 0, 90, 180, 270 degrees.
    #[error("unsupported rotation: {0} degrees")]
    UnsupportedRotation(u16),

    /// Page or raster dimensions were zero, negative, or non-finite.
    #[error("page and raster dimensions must be strictly positive")]
    InvalidPageDims,

    /// Display scale was zero, negative, or non-finite.
    #[error("display scale must be strictly positive")]
    InvalidScale,
}

pub type GeometryResult<T> = Result<T, GeometryError>;

/// A position in either point space or raster space (contextual).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned box, normalized so `x1 <= x2` and `y1 <= y2`.
///
/// Whether the coordinates are points or raster pixels is contextual; the
/// two spaces are only ever bridged through [`pdf_to_canvas`] and
/// [`canvas_to_pdf`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BBox {
    /// Construct a box, swapping coordinates as needed to normalize.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let (x1, x2) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let (y1, y2) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        Self { x1, y1, x2, y2 }
    }

    /// Normalized box spanned by two corner points.
    pub fn from_points(a: Point, b: Point) -> Self {
        Self::new(a.x, a.y, b.x, b.y)
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    pub fn center(&self) -> Point {
        Point::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    pub fn is_finite(&self) -> bool {
        self.x1.is_finite() && self.y1.is_finite() && self.x2.is_finite() && self.y2.is_finite()
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x1 && p.x <= self.x2 && p.y >= self.y1 && p.y <= self.y2
    }

    /// Rectangle intersection; rejects only when fully separated on an axis.
    pub fn intersects(&self, other: &BBox) -> bool {
        !(other.x2 < self.x1 || other.x1 > self.x2 || other.y2 < self.y1 || other.y1 > self.y2)
    }

    /// Grow (or shrink, for negative margins) the box on every side.
    pub fn expand(&self, margin: f64) -> Self {
        Self::new(
            self.x1 - margin,
            self.y1 - margin,
            self.x2 + margin,
            self.y2 + margin,
        )
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            x1: self.x1 + dx,
            y1: self.y1 + dy,
            x2: self.x2 + dx,
            y2: self.y2 + dy,
        }
    }

    pub fn approx_eq(&self, other: &BBox, eps: f64) -> bool {
        (self.x1 - other.x1).abs() < eps
            && (self.y1 - other.y1).abs() < eps
            && (self.x2 - other.x2).abs() < eps
            && (self.y2 - other.y2).abs() < eps
    }
}

/// Page rotation applied when rasterizing. Only quarter turns exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    pub fn from_degrees(degrees: u16) -> GeometryResult<Self> {
        match degrees {
            0 => Ok(Self::R0),
            90 => Ok(Self::R90),
            180 => Ok(Self::R180),
            270 => Ok(Self::R270),
            other => Err(GeometryError::UnsupportedRotation(other)),
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Self::R0 => 0,
            Self::R90 => 90,
            Self::R180 => 180,
            Self::R270 => 270,
        }
    }
}

impl TryFrom<u16> for Rotation {
    type Error = GeometryError;

    fn try_from(value: u16) -> GeometryResult<Self> {
        Self::from_degrees(value)
    }
}

impl From<Rotation> for u16 {
    fn from(value: Rotation) -> Self {
        value.degrees()
    }
}

/// Immutable metadata for one page render: page size in points, raster size
/// in pixels, and the rotation applied to the raster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderMeta {
    pub page_width_pts: f64,
    pub page_height_pts: f64,
    pub raster_width_px: f64,
    pub raster_height_px: f64,
    pub rotation: Rotation,
}

impl RenderMeta {
    pub fn new(
        page_width_pts: f64,
        page_height_pts: f64,
        raster_width_px: f64,
        raster_height_px: f64,
        rotation: Rotation,
    ) -> GeometryResult<Self> {
        let dims = [
            page_width_pts,
            page_height_pts,
            raster_width_px,
            raster_height_px,
        ];
        if dims.iter().any(|d| !d.is_finite() || *d <= 0.0) {
            return Err(GeometryError::InvalidPageDims);
        }
        Ok(Self {
            page_width_pts,
            page_height_pts,
            raster_width_px,
            raster_height_px,
            rotation,
        })
    }

    /// Horizontal raster pixels per point. Non-uniform scale is expected.
    pub fn scale_x(&self) -> f64 {
        self.raster_width_px / self.page_width_pts
    }

    /// Vertical raster pixels per point.
    pub fn scale_y(&self) -> f64 {
        self.raster_height_px / self.page_height_pts
    }
}

fn clamp_pdf(bbox: BBox, meta: &RenderMeta) -> BBox {
    let cx = |v: f64| {
        v.clamp(
            -PDF_CLAMP_EPSILON_PTS,
            meta.page_width_pts + PDF_CLAMP_EPSILON_PTS,
        )
    };
    let cy = |v: f64| {
        v.clamp(
            -PDF_CLAMP_EPSILON_PTS,
            meta.page_height_pts + PDF_CLAMP_EPSILON_PTS,
        )
    };
    BBox::new(cx(bbox.x1), cy(bbox.y1), cx(bbox.x2), cy(bbox.y2))
}

/// Project a point-space box onto the rotated raster pixel grid.
pub fn pdf_to_canvas(bbox: BBox, meta: &RenderMeta) -> GeometryResult<BBox> {
    if !bbox.is_finite() {
        return Err(GeometryError::NonFiniteBox);
    }
    let b = clamp_pdf(bbox, meta);
    let (sx, sy) = (meta.scale_x(), meta.scale_y());
    let scaled = BBox::new(b.x1 * sx, b.y1 * sy, b.x2 * sx, b.y2 * sy);

    let rw = meta.raster_width_px;
    let rh = meta.raster_height_px;
    let rotate = |x: f64, y: f64| match meta.rotation {
        Rotation::R0 => (x, y),
        Rotation::R90 => (rw - y, x),
        Rotation::R180 => (rw - x, rh - y),
        Rotation::R270 => (y, rh - x),
    };
    let (ax, ay) = rotate(scaled.x1, scaled.y1);
    let (bx, by) = rotate(scaled.x2, scaled.y2);
    Ok(BBox::new(ax, ay, bx, by))
}

/// Map a raster pixel box back into clamped point space.
pub fn canvas_to_pdf(bbox: BBox, meta: &RenderMeta) -> GeometryResult<BBox> {
    if !bbox.is_finite() {
        return Err(GeometryError::NonFiniteBox);
    }
    let b = BBox::new(bbox.x1, bbox.y1, bbox.x2, bbox.y2);

    let rw = meta.raster_width_px;
    let rh = meta.raster_height_px;
    let unrotate = |x: f64, y: f64| match meta.rotation {
        Rotation::R0 => (x, y),
        Rotation::R90 => (y, rw - x),
        Rotation::R180 => (rw - x, rh - y),
        Rotation::R270 => (rh - y, x),
    };
    let (ax, ay) = unrotate(b.x1, b.y1);
    let (bx, by) = unrotate(b.x2, b.y2);
    let u = BBox::new(ax, ay, bx, by);

    let (sx, sy) = (meta.scale_x(), meta.scale_y());
    Ok(clamp_pdf(
        BBox::new(u.x1 / sx, u.y1 / sy, u.x2 / sx, u.y2 / sy),
        meta,
    ))
}

/// Canvas -> pdf -> canvas composition, the anchor for regression tests.
pub fn roundtrip_canvas(bbox: BBox, meta: &RenderMeta) -> GeometryResult<BBox> {
    pdf_to_canvas(canvas_to_pdf(bbox, meta)?, meta)
}
