/// Bounding box representation with format conversion utilities.
///
/// Supports the two formats the tracker works in:
/// - TLBR: Top-Left X, Top-Left Y, Bottom-Right X, Bottom-Right Y
///   (the detector input and output format)
/// - XYSR: Center X, Center Y, Scale (area), aspect Ratio (w/h)
///   (the motion filter's observation format)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// Top-left x coordinate
    pub x: f32,
    /// Top-left y coordinate
    pub y: f32,
    /// Width of the bounding box
    pub width: f32,
    /// Height of the bounding box
    pub height: f32,
}

impl Rect {
    /// Create a new Rect from top-left coordinates and dimensions (TLWH format).
    #[inline]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a Rect from TLBR format (top-left x, top-left y, bottom-right x, bottom-right y).
    #[inline]
    pub fn from_tlbr(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
        }
    }

    /// Create a Rect from XYSR format (center x, center y, scale, aspect ratio).
    ///
    /// A non-positive scale makes the square root non-finite; the resulting
    /// coordinates carry NaN, which downstream code reads as an invalid box.
    /// No clamping happens here.
    #[inline]
    pub fn from_xysr(cx: f32, cy: f32, scale: f32, aspect_ratio: f32) -> Self {
        let width = (scale * aspect_ratio).sqrt();
        let height = scale / width;
        Self {
            x: cx - width / 2.0,
            y: cy - height / 2.0,
            width,
            height,
        }
    }

    /// Convert to TLBR format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [f32; 4] {
        [self.x, self.y, self.x + self.width, self.y + self.height]
    }

    /// Convert to XYSR format: (center_x, center_y, scale, aspect_ratio).
    #[inline]
    pub fn to_xysr(&self) -> [f32; 4] {
        let cx = self.x + self.width / 2.0;
        let cy = self.y + self.height / 2.0;
        [cx, cy, self.width * self.height, self.width / self.height]
    }

    /// Get the area of the bounding box.
    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Whether all four coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }

    /// Calculate Intersection over Union (IoU) with another bounding box.
    pub fn iou(&self, other: &Rect) -> f32 {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = (self.x + self.width).min(other.x + other.width);
        let y2 = (self.y + self.height).min(other.y + other.height);

        let inter_width = (x2 - x1).max(0.0);
        let inter_height = (y2 - y1).max(0.0);
        let inter_area = inter_width * inter_height;

        let union_area = self.area() + other.area() - inter_area;

        if union_area > 0.0 {
            inter_area / union_area
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_conversions() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);

        // TLBR
        assert_eq!(rect.to_tlbr(), [10.0, 20.0, 40.0, 60.0]);

        // XYSR
        let xysr = rect.to_xysr();
        assert_eq!(xysr[0], 25.0); // cx
        assert_eq!(xysr[1], 40.0); // cy
        assert_eq!(xysr[2], 1200.0); // scale = 30*40
        assert!((xysr[3] - 0.75).abs() < 1e-6); // aspect ratio = 30/40
    }

    #[test]
    fn test_from_tlbr() {
        let rect = Rect::from_tlbr(10.0, 20.0, 40.0, 60.0);
        assert_eq!(rect.to_tlbr(), [10.0, 20.0, 40.0, 60.0]);
        assert_eq!(rect.width, 30.0);
        assert_eq!(rect.height, 40.0);
    }

    #[test]
    fn test_from_xysr_roundtrip() {
        let rect = Rect::from_xysr(25.0, 40.0, 1200.0, 0.75);
        assert!((rect.x - 10.0).abs() < 1e-3);
        assert!((rect.y - 20.0).abs() < 1e-3);
        assert!((rect.width - 30.0).abs() < 1e-3);
        assert!((rect.height - 40.0).abs() < 1e-3);
    }

    #[test]
    fn test_from_xysr_negative_scale_is_non_finite() {
        let rect = Rect::from_xysr(25.0, 40.0, -100.0, 0.75);
        assert!(!rect.is_finite());
    }

    #[test]
    fn test_iou() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);

        // Intersection: 5x5 = 25
        // Union: 100 + 100 - 25 = 175
        let iou = a.iou(&b);
        assert!((iou - 25.0 / 175.0).abs() < 1e-6);
    }

    #[test]
    fn test_iou_no_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 20.0, 10.0, 10.0);
        assert_eq!(a.iou(&b), 0.0);
    }

    #[test]
    fn test_iou_same_box() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!((a.iou(&a) - 1.0).abs() < 1e-6);
    }
}
