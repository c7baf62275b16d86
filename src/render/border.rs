//! Border compositor: solid, concentric ("inside-out") and image borders.
//!
//! Every function takes the border's stroke centre-line rectangle, the same
//! rectangle [`crate::layout::compute_geometry`] reports. Nothing here fails:
//! unusable slots are skipped, and an image border with nothing drawable
//! degrades to a solid stroke.

use crate::types::{
    BorderConfig, ColorMode, Corners, ImageBorder, ImageSlot, ImageSource, Rect, SideMode,
    SizingStrategy,
};

use super::backend::Surface;

/// Orientation of a side region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideAxis {
    /// Top and bottom sides: tiles advance along X.
    Horizontal,
    /// Left and right sides: tiles advance along Y.
    Vertical,
}

/// Build a rounded rectangle path with quadratic corners.
///
/// The radius is clamped to half the shorter edge.
pub fn rounded_rect_path<S: Surface + ?Sized>(surface: &mut S, rect: Rect, radius: f64) {
    let r = clamp_radius(rect, radius);
    let (x, y, right, bottom) = (rect.x, rect.y, rect.right(), rect.bottom());

    surface.begin_path();
    surface.move_to(x + r, y);
    surface.line_to(right - r, y);
    surface.quadratic_curve_to(right, y, right, y + r);
    surface.line_to(right, bottom - r);
    surface.quadratic_curve_to(right, bottom, right - r, bottom);
    surface.line_to(x + r, bottom);
    surface.quadratic_curve_to(x, bottom, x, bottom - r);
    surface.line_to(x, y + r);
    surface.quadratic_curve_to(x, y, x + r, y);
    surface.close_path();
}

fn clamp_radius(rect: Rect, radius: f64) -> f64 {
    let max = rect.width.min(rect.height) / 2.0;
    if radius.is_finite() {
        radius.clamp(0.0, max.max(0.0))
    } else {
        0.0
    }
}

fn stroke_rounded<S: Surface + ?Sized>(
    surface: &mut S,
    rect: Rect,
    radius: f64,
    line_width: f64,
    color: &str,
) {
    rounded_rect_path(surface, rect, radius);
    surface.stroke(line_width, color);
}

/// Draw the border around `rect` (the stroke centre line).
pub fn draw_border<S: Surface>(surface: &mut S, border: &BorderConfig<S::Image>, rect: Rect) {
    let bw = border.width;
    if !border.enabled || !bw.is_finite() || bw <= 0.0 {
        return;
    }

    match border.color_mode {
        ColorMode::Solid => stroke_rounded(surface, rect, border.radius, bw, &border.color),
        ColorMode::InsideOut => draw_inside_out(surface, border, rect),
        ColorMode::Images => {
            if border.image_border.any_ready() {
                draw_image_border(surface, &border.image_border, rect, bw, border.radius);
            } else {
                log::debug!("image border has no ready slot, falling back to solid stroke");
                stroke_rounded(surface, rect, border.radius, bw, &border.color);
            }
        }
    }
}

/// Concentric strokes sharing the band's inner edge.
///
/// Stroke `i` is `(i + 1) × width / N` wide. The widest goes down first and
/// each narrower one paints over it, so the first palette color ends up as
/// the innermost ring. Missing palette entries use the solid color.
pub fn draw_inside_out<S: Surface + ?Sized, I>(
    surface: &mut S,
    border: &BorderConfig<I>,
    rect: Rect,
) {
    let bw = border.width;
    let n = border.inside_out_colors.len().max(1);
    #[allow(clippy::cast_precision_loss)]
    let step = bw / n as f64;

    for i in (0..n).rev() {
        #[allow(clippy::cast_precision_loss)]
        let stroke_width = (i + 1) as f64 * step;
        let inset = bw / 2.0 - stroke_width / 2.0;
        let ring = rect.inset(inset);
        let color = border
            .inside_out_colors
            .get(i)
            .map_or(border.color.as_str(), String::as_str);
        stroke_rounded(surface, ring, (border.radius - inset).max(0.0), stroke_width, color);
    }
}

/// Draw size of a corner slot.
///
/// Fixed strategy and non-ready slots get a `border_width` square; auto
/// scales the source to the border width in height, keeping its aspect.
pub fn corner_size<I: ImageSource>(
    slot: &ImageSlot<I>,
    border_width: f64,
    strategy: SizingStrategy,
) -> (f64, f64) {
    let square = (border_width.max(1.0), border_width.max(1.0));
    let Some(image) = slot.ready_image() else {
        return square;
    };
    if strategy == SizingStrategy::Fixed {
        return square;
    }
    let (sw, sh) = image.natural_size();
    if sw <= 0.0 || sh <= 0.0 || !sw.is_finite() || !sh.is_finite() {
        return square;
    }
    let height = border_width.max(1.0);
    let width = (sw * border_width / sh).round().max(1.0);
    (width, height)
}

/// Composite an image border around `rect`.
///
/// Everything is clipped to the rounded outer edge of the band. Corners are
/// anchored to the outer corners, sides fill the gaps between them.
pub fn draw_image_border<S: Surface>(
    surface: &mut S,
    images: &ImageBorder<S::Image>,
    rect: Rect,
    border_width: f64,
    radius: f64,
) {
    let half = border_width / 2.0;
    let outer = rect.inset(-half);

    surface.save();
    rounded_rect_path(surface, outer, radius + half);
    surface.clip();

    let sizes: Corners<(f64, f64)> = images
        .corners
        .map(|slot| corner_size(slot, border_width, images.sizing_strategy));

    let (tl_w, tl_h) = sizes.top_left;
    let (tr_w, tr_h) = sizes.top_right;
    let (br_w, br_h) = sizes.bottom_right;
    let (bl_w, bl_h) = sizes.bottom_left;

    let corners = [
        (&images.corners.top_left, Rect::new(outer.x, outer.y, tl_w, tl_h)),
        (
            &images.corners.top_right,
            Rect::new(outer.right() - tr_w, outer.y, tr_w, tr_h),
        ),
        (
            &images.corners.bottom_right,
            Rect::new(outer.right() - br_w, outer.bottom() - br_h, br_w, br_h),
        ),
        (
            &images.corners.bottom_left,
            Rect::new(outer.x, outer.bottom() - bl_h, bl_w, bl_h),
        ),
    ];
    for (slot, dest) in corners {
        if let Some(image) = slot.ready_image() {
            draw_slot_image(surface, image, slot, dest);
        }
    }

    let top_h = tl_h.max(tr_h).max(border_width);
    let bottom_h = bl_h.max(br_h).max(border_width);
    let left_w = tl_w.max(bl_w).max(border_width);
    let right_w = tr_w.max(br_w).max(border_width);

    let sides = [
        (
            &images.sides.top,
            Rect::new(outer.x + tl_w, outer.y, outer.width - tl_w - tr_w, top_h),
            SideAxis::Horizontal,
        ),
        (
            &images.sides.bottom,
            Rect::new(
                outer.x + bl_w,
                outer.bottom() - bottom_h,
                outer.width - bl_w - br_w,
                bottom_h,
            ),
            SideAxis::Horizontal,
        ),
        (
            &images.sides.left,
            Rect::new(outer.x, outer.y + tl_h, left_w, outer.height - tl_h - bl_h),
            SideAxis::Vertical,
        ),
        (
            &images.sides.right,
            Rect::new(
                outer.right() - right_w,
                outer.y + tr_h,
                right_w,
                outer.height - tr_h - br_h,
            ),
            SideAxis::Vertical,
        ),
    ];
    for (slot, dest, axis) in sides {
        if slot.is_ready() {
            draw_side_image(surface, slot, dest, axis, images.side_mode);
        }
    }

    surface.restore();
}

/// Shortest repeat tile along a side, in px. Bounds the tile count by the
/// side length for sliver-thin sources.
pub const MIN_TILE_LENGTH: f64 = 1.0;

/// Fill one side region with its slot image.
///
/// `Stretch` draws once into `dest`. `Repeat` lays full-size tiles at the
/// source aspect ratio from the start edge while the position is short of
/// the end; the last tile overhangs and is cut by a clip to `dest`. Tiles
/// are never shorter than [`MIN_TILE_LENGTH`].
pub fn draw_side_image<S: Surface + ?Sized>(
    surface: &mut S,
    slot: &ImageSlot<S::Image>,
    dest: Rect,
    axis: SideAxis,
    mode: SideMode,
) {
    let Some(image) = slot.ready_image() else {
        return;
    };
    if dest.width <= 0.0 || dest.height <= 0.0 {
        return;
    }

    match mode {
        SideMode::Stretch => draw_slot_image(surface, image, slot, dest),
        SideMode::Repeat => {
            let (sw, sh) = image.natural_size();
            if sw <= 0.0 || sh <= 0.0 {
                draw_slot_image(surface, image, slot, dest);
                return;
            }

            surface.save();
            surface.begin_path();
            surface.move_to(dest.x, dest.y);
            surface.line_to(dest.right(), dest.y);
            surface.line_to(dest.right(), dest.bottom());
            surface.line_to(dest.x, dest.bottom());
            surface.close_path();
            surface.clip();

            match axis {
                SideAxis::Horizontal => {
                    let tile = (sw * dest.height / sh).max(MIN_TILE_LENGTH);
                    for pos in tile_offsets(dest.x, dest.width, tile) {
                        let tile_rect = Rect::new(pos, dest.y, tile, dest.height);
                        draw_slot_image(surface, image, slot, tile_rect);
                    }
                }
                SideAxis::Vertical => {
                    let tile = (sh * dest.width / sw).max(MIN_TILE_LENGTH);
                    for pos in tile_offsets(dest.y, dest.height, tile) {
                        let tile_rect = Rect::new(dest.x, pos, dest.width, tile);
                        draw_slot_image(surface, image, slot, tile_rect);
                    }
                }
            }

            surface.restore();
        }
    }
}

/// Start offsets of the tiles covering `span` from `start`. Counted up
/// front so the walk ends even where `start + tile` rounds back to `start`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn tile_offsets(start: f64, span: f64, tile: f64) -> impl Iterator<Item = f64> {
    let count = if tile.is_finite() && tile > 0.0 && span.is_finite() {
        (span / tile).ceil().max(0.0) as usize
    } else {
        0
    };
    (0..count).map(move |i| start + i as f64 * tile)
}

/// Draw `image` into `dest`, applying the slot's rotation and flips about
/// the centre of `dest`.
pub fn draw_slot_image<S: Surface + ?Sized>(
    surface: &mut S,
    image: &S::Image,
    slot: &ImageSlot<S::Image>,
    dest: Rect,
) {
    let rotation = slot.rotation.rem_euclid(360);
    if rotation == 0 && !slot.flip_x && !slot.flip_y {
        surface.draw_image(image, dest.x, dest.y, dest.width, dest.height);
        return;
    }

    let cx = dest.x + dest.width / 2.0;
    let cy = dest.y + dest.height / 2.0;
    // Quarter turns swap the drawn extent so the result still fills `dest`.
    let (w, h) = if rotation == 90 || rotation == 270 {
        (dest.height, dest.width)
    } else {
        (dest.width, dest.height)
    };

    surface.save();
    surface.translate(cx, cy);
    if rotation != 0 {
        surface.rotate(f64::from(rotation).to_radians());
    }
    surface.scale(
        if slot.flip_x { -1.0 } else { 1.0 },
        if slot.flip_y { -1.0 } else { 1.0 },
    );
    surface.draw_image(image, -w / 2.0, -h / 2.0, w, h);
    surface.restore();
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::render::recording::{DrawCommand, ImageRef, RecordingSurface};
    use crate::types::SlotStatus;

    fn ready(id: &str, w: f64, h: f64) -> ImageSlot<ImageRef> {
        ImageSlot {
            image: Some(ImageRef::new(id, w, h)),
            status: SlotStatus::Ready,
            ..Default::default()
        }
    }

    #[test]
    fn test_radius_clamped_to_half_shorter_edge() {
        let mut s = RecordingSurface::new(100, 100);
        rounded_rect_path(&mut s, Rect::new(0.0, 0.0, 40.0, 10.0), 50.0);
        assert_eq!(s.commands()[1], DrawCommand::MoveTo { x: 5.0, y: 0.0 });
    }

    #[test]
    fn test_solid_is_single_stroke() {
        let mut s = RecordingSurface::new(100, 100);
        let border: BorderConfig<ImageRef> = BorderConfig::default();
        draw_border(&mut s, &border, Rect::new(10.0, 10.0, 80.0, 80.0));
        assert_eq!(s.strokes(), vec![(4.0, "#111827")]);
    }

    #[test]
    fn test_disabled_draws_nothing() {
        let mut s = RecordingSurface::new(100, 100);
        let border: BorderConfig<ImageRef> = BorderConfig {
            enabled: false,
            ..Default::default()
        };
        draw_border(&mut s, &border, Rect::new(10.0, 10.0, 80.0, 80.0));
        assert!(s.commands().is_empty());
    }

    #[test]
    fn test_inside_out_widest_first_palette_order() {
        let mut s = RecordingSurface::new(100, 100);
        let border: BorderConfig<ImageRef> = BorderConfig {
            width: 6.0,
            color_mode: ColorMode::InsideOut,
            inside_out_colors: vec!["#aa0000".to_string(), "#00aa00".to_string()],
            color: "#000000".to_string(),
            ..Default::default()
        };
        draw_border(&mut s, &border, Rect::new(10.0, 10.0, 80.0, 80.0));
        assert_eq!(s.strokes(), vec![(6.0, "#00aa00"), (3.0, "#aa0000")]);
    }

    #[test]
    fn test_inside_out_empty_palette_uses_color() {
        let mut s = RecordingSurface::new(100, 100);
        let border: BorderConfig<ImageRef> = BorderConfig {
            color_mode: ColorMode::InsideOut,
            ..Default::default()
        };
        draw_border(&mut s, &border, Rect::new(10.0, 10.0, 80.0, 80.0));
        assert_eq!(s.strokes(), vec![(4.0, "#111827")]);
    }

    #[test]
    fn test_corner_size_auto_keeps_aspect() {
        let slot = ready("c", 30.0, 10.0);
        assert_eq!(corner_size(&slot, 8.0, SizingStrategy::Auto), (24.0, 8.0));
        assert_eq!(corner_size(&slot, 8.0, SizingStrategy::Fixed), (8.0, 8.0));
        let empty: ImageSlot<ImageRef> = ImageSlot::default();
        assert_eq!(corner_size(&empty, 8.0, SizingStrategy::Auto), (8.0, 8.0));
    }

    #[test]
    fn test_corner_size_floors_at_one_pixel() {
        let slot = ready("thin", 1.0, 100.0);
        assert_eq!(corner_size(&slot, 10.0, SizingStrategy::Auto), (1.0, 10.0));
    }

    #[test]
    fn test_stretch_side_draws_once() {
        let mut s = RecordingSurface::new(100, 100);
        let slot = ready("side", 10.0, 10.0);
        draw_side_image(
            &mut s,
            &slot,
            Rect::new(0.0, 0.0, 25.0, 10.0),
            SideAxis::Horizontal,
            SideMode::Stretch,
        );
        assert_eq!(s.image_draws(), vec![("side", 0.0, 0.0, 25.0, 10.0)]);
    }

    #[test]
    fn test_vertical_repeat_tiles_along_y() {
        let mut s = RecordingSurface::new(100, 100);
        let slot = ready("v", 4.0, 8.0);
        draw_side_image(
            &mut s,
            &slot,
            Rect::new(0.0, 0.0, 4.0, 20.0),
            SideAxis::Vertical,
            SideMode::Repeat,
        );
        let ys: Vec<f64> = s.image_draws().iter().map(|d| d.2).collect();
        assert_eq!(ys, vec![0.0, 8.0, 16.0]);
        assert_eq!(s.save_depth(), 0);
    }

    #[test]
    fn test_rotated_slot_swaps_extent() {
        let mut s = RecordingSurface::new(100, 100);
        let mut slot = ready("r", 10.0, 20.0);
        slot.rotation = 90;
        let image = slot.image.clone().unwrap();
        draw_slot_image(&mut s, &image, &slot, Rect::new(0.0, 0.0, 20.0, 10.0));
        assert_eq!(s.image_draws(), vec![("r", -5.0, -10.0, 10.0, 20.0)]);
        assert!(s.commands().contains(&DrawCommand::Translate { x: 10.0, y: 5.0 }));
        assert_eq!(s.save_depth(), 0);
    }

    #[test]
    fn test_flip_scales_negative() {
        let mut s = RecordingSurface::new(100, 100);
        let mut slot = ready("f", 10.0, 10.0);
        slot.flip_x = true;
        let image = slot.image.clone().unwrap();
        draw_slot_image(&mut s, &image, &slot, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(s.commands().contains(&DrawCommand::Scale { x: -1.0, y: 1.0 }));
        assert!(!s
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::Rotate { .. })));
    }

    #[test]
    fn test_image_border_anchors_corners_to_outer_edge() {
        let mut s = RecordingSurface::new(200, 200);
        let mut images: ImageBorder<ImageRef> = ImageBorder::default();
        images.corners.bottom_right = ready("br", 10.0, 10.0);
        draw_image_border(&mut s, &images, Rect::new(12.0, 12.0, 100.0, 50.0), 8.0, 0.0);
        // Outer edge is 8..116 x 8..66.
        assert_eq!(s.image_draws(), vec![("br", 108.0, 58.0, 8.0, 8.0)]);
        assert_eq!(s.save_depth(), 0);
    }
}
