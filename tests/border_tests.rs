//! Border compositor tests over the recording surface.
//!
//! Covers solid and concentric strokes, image corners and sides, tiling
//! without compression, and the solid fallback when no slot is drawable.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{broken_slot, ready_slot};
use test_case::test_case;
use textframe::render::{
    draw_border, draw_image_border, draw_side_image, DrawCommand, ImageRef, RecordingSurface,
    SideAxis, MIN_TILE_LENGTH,
};
use textframe::types::{
    BorderConfig, ColorMode, ImageBorder, ImageSlot, Rect, SideMode, SizingStrategy,
};

fn images_border(image_border: ImageBorder<ImageRef>) -> BorderConfig<ImageRef> {
    BorderConfig {
        width: 8.0,
        radius: 0.0,
        color_mode: ColorMode::Images,
        color: "#123456".to_string(),
        image_border,
        ..Default::default()
    }
}

const RECT: Rect = Rect::new(12.0, 12.0, 100.0, 50.0);

// ============================================================================
// Repeat tiling
// ============================================================================

#[test]
fn test_repeat_tiles_are_never_compressed() {
    let mut surface = RecordingSurface::new(100, 100);
    let slot = ready_slot("tile", 10.0, 10.0);
    draw_side_image(
        &mut surface,
        &slot,
        Rect::new(0.0, 0.0, 25.0, 10.0),
        SideAxis::Horizontal,
        SideMode::Repeat,
    );

    assert_eq!(
        surface.image_draws(),
        vec![
            ("tile", 0.0, 0.0, 10.0, 10.0),
            ("tile", 10.0, 0.0, 10.0, 10.0),
            ("tile", 20.0, 0.0, 10.0, 10.0),
        ]
    );

    // The overhanging last tile is cut by a clip to the side rectangle.
    let clip_at = surface
        .commands()
        .iter()
        .position(|c| *c == DrawCommand::Clip)
        .unwrap();
    let first_draw = surface
        .commands()
        .iter()
        .position(|c| matches!(c, DrawCommand::DrawImage { .. }))
        .unwrap();
    assert!(clip_at < first_draw);
    assert_eq!(surface.save_depth(), 0);
}

#[test]
fn test_repeat_tile_length_follows_source_aspect() {
    let mut surface = RecordingSurface::new(100, 100);
    // 30x10 source in a 20px tall side: tiles are 60px long.
    let slot = ready_slot("wide", 30.0, 10.0);
    draw_side_image(
        &mut surface,
        &slot,
        Rect::new(5.0, 0.0, 100.0, 20.0),
        SideAxis::Horizontal,
        SideMode::Repeat,
    );
    let draws = surface.image_draws();
    assert_eq!(draws.len(), 2);
    assert_eq!((draws[0].1, draws[0].3), (5.0, 60.0));
    assert_eq!((draws[1].1, draws[1].3), (65.0, 60.0));
}

#[test_case(SideAxis::Horizontal, Rect::new(0.0, 0.0, 25.0, 10.0) ; "horizontal side")]
#[test_case(SideAxis::Vertical, Rect::new(0.0, 0.0, 10.0, 25.0) ; "vertical side")]
fn test_sliver_source_tiles_are_floored(axis: SideAxis, side: Rect) {
    let mut surface = RecordingSurface::new(100, 100);
    let slot = match axis {
        SideAxis::Horizontal => ready_slot("sliver", 1e-12, 1.0),
        SideAxis::Vertical => ready_slot("sliver", 1.0, 1e-12),
    };
    draw_side_image(&mut surface, &slot, side, axis, SideMode::Repeat);

    let draws = surface.image_draws();
    assert_eq!(draws.len(), 25);
    for d in &draws {
        let length = match axis {
            SideAxis::Horizontal => d.3,
            SideAxis::Vertical => d.4,
        };
        assert_eq!(length, MIN_TILE_LENGTH);
    }
}

#[test]
fn test_repeat_terminates_far_from_origin() {
    // At this offset one tile length is below the spacing of adjacent f64s.
    let mut surface = RecordingSurface::new(100, 100);
    let slot = ready_slot("tile", 1.0, 1.0);
    draw_side_image(
        &mut surface,
        &slot,
        Rect::new(1e17, 0.0, 5.0, 1.0),
        SideAxis::Horizontal,
        SideMode::Repeat,
    );
    assert_eq!(surface.image_draws().len(), 5);
}

#[test]
fn test_empty_side_region_draws_nothing() {
    let mut surface = RecordingSurface::new(100, 100);
    let slot = ready_slot("tile", 10.0, 10.0);
    draw_side_image(
        &mut surface,
        &slot,
        Rect::new(0.0, 0.0, 0.0, 10.0),
        SideAxis::Horizontal,
        SideMode::Repeat,
    );
    assert!(surface.commands().is_empty());
}

// ============================================================================
// Fallback stroke
// ============================================================================

#[test]
fn test_all_slots_empty_falls_back_to_one_stroke() {
    let mut surface = RecordingSurface::new(200, 200);
    draw_border(&mut surface, &images_border(ImageBorder::default()), RECT);

    assert_eq!(surface.strokes(), vec![(8.0, "#123456")]);
    assert!(surface.image_draws().is_empty());
}

#[test]
fn test_all_slots_broken_falls_back_to_one_stroke() {
    let mut images = ImageBorder::default();
    images.corners.top_left = broken_slot();
    images.corners.bottom_right = broken_slot();
    images.sides.top = broken_slot();
    images.sides.left = broken_slot();

    let mut surface = RecordingSurface::new(200, 200);
    draw_border(&mut surface, &images_border(images), RECT);

    assert_eq!(surface.strokes(), vec![(8.0, "#123456")]);
    assert!(surface.image_draws().is_empty());
}

#[test]
fn test_one_ready_slot_suppresses_fallback() {
    let mut images = ImageBorder::default();
    images.corners.top_left = broken_slot();
    images.sides.right = ready_slot("r", 8.0, 8.0);

    let mut surface = RecordingSurface::new(200, 200);
    draw_border(&mut surface, &images_border(images), RECT);

    assert!(surface.strokes().is_empty());
    assert_eq!(surface.image_draws().len(), 1);
}

// ============================================================================
// Image border geometry
// ============================================================================

#[test]
fn test_sides_span_between_corners() {
    let mut images = ImageBorder::default();
    images.side_mode = SideMode::Repeat;
    images.sides.top = ready_slot("top", 16.0, 8.0);

    let mut surface = RecordingSurface::new(200, 200);
    draw_image_border(&mut surface, &images, RECT, 8.0, 0.0);

    // Outer edge runs 8..116; empty corners reserve 8px each end.
    let xs: Vec<f64> = surface.image_draws().iter().map(|d| d.1).collect();
    assert_eq!(xs, vec![16.0, 32.0, 48.0, 64.0, 80.0, 96.0]);
    assert!(surface.image_draws().iter().all(|d| d.3 == 16.0 && d.4 == 8.0));
    assert_eq!(surface.save_depth(), 0);
}

#[test]
fn test_auto_corner_widens_side_offset() {
    let mut images = ImageBorder::default();
    images.corners.top_left = ready_slot("tl", 24.0, 8.0);
    images.sides.top = ready_slot("top", 8.0, 8.0);

    let mut surface = RecordingSurface::new(200, 200);
    draw_image_border(&mut surface, &images, RECT, 8.0, 0.0);

    let draws = surface.image_draws();
    assert_eq!(draws[0], ("tl", 8.0, 8.0, 24.0, 8.0));
    // Stretched top side from the corner's right edge to the top-right corner.
    assert_eq!(draws[1], ("top", 32.0, 8.0, 76.0, 8.0));
}

#[test]
fn test_fixed_strategy_forces_square_corners() {
    let mut images = ImageBorder::default();
    images.sizing_strategy = SizingStrategy::Fixed;
    images.corners.top_right = ready_slot("tr", 24.0, 8.0);

    let mut surface = RecordingSurface::new(200, 200);
    draw_image_border(&mut surface, &images, RECT, 8.0, 0.0);

    assert_eq!(surface.image_draws(), vec![("tr", 108.0, 8.0, 8.0, 8.0)]);
}

#[test]
fn test_vertical_side_thickness_tracks_corners() {
    let mut images = ImageBorder::default();
    images.corners.top_left = ready_slot("tl", 24.0, 8.0);
    images.sides.left = ready_slot("left", 8.0, 8.0);

    let mut surface = RecordingSurface::new(200, 200);
    draw_image_border(&mut surface, &images, RECT, 8.0, 0.0);

    let left = surface
        .image_draws()
        .into_iter()
        .find(|d| d.0 == "left")
        .unwrap();
    // Below the top-left corner, as wide as the widest adjacent corner.
    assert_eq!(left, ("left", 8.0, 16.0, 24.0, 42.0));
}

#[test]
fn test_image_border_clips_to_rounded_outer_edge() {
    let mut images = ImageBorder::default();
    images.corners.top_left = ready_slot("tl", 8.0, 8.0);

    let mut surface = RecordingSurface::new(200, 200);
    draw_image_border(&mut surface, &images, RECT, 8.0, 12.0);

    let cmds = surface.commands();
    assert_eq!(cmds[0], DrawCommand::Save);
    assert_eq!(cmds[1], DrawCommand::BeginPath);
    // Radius grows by half the stroke on the outer edge.
    assert_eq!(cmds[2], DrawCommand::MoveTo { x: 24.0, y: 8.0 });
    assert!(cmds.contains(&DrawCommand::Clip));
    assert_eq!(cmds.last(), Some(&DrawCommand::Restore));
}

#[test]
fn test_rotated_corner_draws_about_its_centre() {
    let mut images = ImageBorder::default();
    let mut slot = ready_slot("tl", 8.0, 8.0);
    slot.rotation = 180;
    slot.flip_y = true;
    images.corners.top_left = slot;

    let mut surface = RecordingSurface::new(200, 200);
    draw_image_border(&mut surface, &images, RECT, 8.0, 0.0);

    let cmds = surface.commands();
    assert!(cmds.contains(&DrawCommand::Translate { x: 12.0, y: 12.0 }));
    assert!(cmds.iter().any(|c| matches!(
        c,
        DrawCommand::Rotate { radians } if (radians - std::f64::consts::PI).abs() < 1e-12
    )));
    assert!(cmds.contains(&DrawCommand::Scale { x: 1.0, y: -1.0 }));
    assert_eq!(surface.image_draws(), vec![("tl", -4.0, -4.0, 8.0, 8.0)]);
    assert_eq!(surface.save_depth(), 0);
}

// ============================================================================
// Strokes
// ============================================================================

#[test]
fn test_inside_out_rings_share_inner_edge() {
    let border: BorderConfig<ImageRef> = BorderConfig {
        width: 9.0,
        radius: 0.0,
        color_mode: ColorMode::InsideOut,
        inside_out_colors: vec![
            "#FF0000".to_string(),
            "#00FF00".to_string(),
            "#0000FF".to_string(),
        ],
        ..Default::default()
    };
    let mut surface = RecordingSurface::new(200, 200);
    draw_border(&mut surface, &border, RECT);

    assert_eq!(
        surface.strokes(),
        vec![(9.0, "#0000FF"), (6.0, "#00FF00"), (3.0, "#FF0000")]
    );

    // Each ring's inner edge sits at RECT inset by half the border width.
    let starts: Vec<f64> = surface
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::MoveTo { y, .. } => Some(*y),
            _ => None,
        })
        .collect();
    let widths = [9.0, 6.0, 3.0];
    for (y, w) in starts.iter().zip(widths) {
        assert!((y + w / 2.0 - (RECT.y + 4.5)).abs() < 1e-9);
    }
}

#[test]
fn test_zero_width_border_draws_nothing() {
    let border: BorderConfig<ImageRef> = BorderConfig {
        width: 0.0,
        ..Default::default()
    };
    let mut surface = RecordingSurface::new(200, 200);
    draw_border(&mut surface, &border, RECT);
    assert!(surface.commands().is_empty());
}

#[test]
fn test_empty_slot_default_is_not_ready() {
    let slot: ImageSlot<ImageRef> = ImageSlot::default();
    assert!(!slot.is_ready());
}
