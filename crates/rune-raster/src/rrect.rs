use tiny_skia::{Path, PathBuilder};

use crate::scene::{Rect, RoundedRadii, RoundedRect};

/// Clamp a rounded rect to drawable geometry.
///
/// When either side is shorter than twice the largest corner radius the
/// shape collapses to a sharp rectangle of at least 1×1.
pub fn resolve_rounded_rect(rect: Rect, radii: RoundedRadii) -> RoundedRect {
    let radii = radii.sanitized();
    let r = radii.max();
    if rect.w < 2.0 * r || rect.h < 2.0 * r {
        return RoundedRect {
            rect: Rect::new(rect.x, rect.y, rect.w.max(1.0), rect.h.max(1.0)),
            radii: RoundedRadii::default(),
        };
    }
    RoundedRect { rect, radii }
}

/// Outline with quadratic corners whose control point is the box corner.
pub fn rounded_rect_path(rr: &RoundedRect) -> Option<Path> {
    let Rect { x, y, w, h } = rr.rect;
    let RoundedRadii { tl, tr, br, bl } = rr.radii;
    let mut pb = PathBuilder::new();
    pb.move_to(x + tl, y);
    pb.line_to(x + w - tr, y);
    pb.quad_to(x + w, y, x + w, y + tr);
    pb.line_to(x + w, y + h - br);
    pb.quad_to(x + w, y + h, x + w - br, y + h);
    pb.line_to(x + bl, y + h);
    pb.quad_to(x, y + h, x, y + h - bl);
    pb.line_to(x, y + tl);
    pb.quad_to(x, y, x + tl, y);
    pb.close();
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_radius_when_it_fits() {
        let rr = resolve_rounded_rect(Rect::new(0.0, 0.0, 100.0, 30.0), RoundedRadii::uniform(5.0));
        assert_eq!(rr.radii, RoundedRadii::uniform(5.0));
        assert_eq!(rr.rect.w, 100.0);
    }

    #[test]
    fn test_degenerate_guard() {
        let cases = [
            (0.0, 0.0, 1.0),
            (4.0, 30.0, 3.0),
            (30.0, 4.0, 3.0),
            (0.5, 0.2, 10.0),
            (9.9, 9.9, 5.0),
        ];
        for (w, h, r) in cases {
            let rr = resolve_rounded_rect(Rect::new(0.0, 0.0, w, h), RoundedRadii::uniform(r));
            assert!(rr.radii.is_zero(), "{w}x{h} r{r}");
            assert!(rr.rect.w >= 1.0 && rr.rect.h >= 1.0);
        }
    }

    #[test]
    fn test_guard_uses_largest_corner() {
        let radii = RoundedRadii::from_corners([1.0, 1.0, 12.0, 1.0]);
        let rr = resolve_rounded_rect(Rect::new(0.0, 0.0, 20.0, 40.0), radii);
        assert!(rr.radii.is_zero());
    }

    #[test]
    fn test_negative_radii_sanitized() {
        let rr = resolve_rounded_rect(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            RoundedRadii::from_corners([-2.0, f32::NAN, 2.0, 0.0]),
        );
        assert_eq!(rr.radii, RoundedRadii::from_corners([0.0, 0.0, 2.0, 0.0]));
    }

    #[test]
    fn test_path_bounds() {
        let rr = resolve_rounded_rect(Rect::new(2.0, 3.0, 40.0, 20.0), RoundedRadii::uniform(4.0));
        let path = rounded_rect_path(&rr).unwrap();
        let b = path.bounds();
        assert_eq!((b.left(), b.top(), b.right(), b.bottom()), (2.0, 3.0, 42.0, 23.0));
    }
}
