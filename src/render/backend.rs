//! Drawing surface trait for pluggable rendering targets.
//!
//! This module defines the `Surface` trait that abstracts the 2D drawing
//! primitives the painter and border compositor need, allowing the Canvas 2D
//! backend and the headless recording backend to be used interchangeably.

use crate::error::Result;
use crate::types::ImageSource;

/// A 2D drawing surface with Canvas-like semantics.
///
/// Path state is built with `begin_path` / `move_to` / `line_to` /
/// `quadratic_curve_to` / `close_path` and consumed by `stroke`, `fill` or
/// `clip`. `save` / `restore` bracket clip and transform changes.
pub trait Surface {
    /// Drawable image type accepted by [`Surface::draw_image`].
    type Image: ImageSource;

    /// Current width in CSS pixels.
    fn width(&self) -> u32;

    /// Current height in CSS pixels.
    fn height(&self) -> u32;

    /// Resize the backing store. Resizing clears the surface.
    fn resize(&mut self, width: u32, height: u32);

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str);

    fn begin_path(&mut self);

    fn move_to(&mut self, x: f64, y: f64);

    fn line_to(&mut self, x: f64, y: f64);

    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64);

    fn close_path(&mut self);

    /// Intersect the clip region with the current path.
    fn clip(&mut self);

    fn save(&mut self);

    fn restore(&mut self);

    /// Stroke the current path.
    fn stroke(&mut self, line_width: f64, color: &str);

    /// Fill the current path.
    fn fill(&mut self, color: &str);

    /// Draw `image` scaled into the destination rectangle.
    fn draw_image(&mut self, image: &Self::Image, x: f64, y: f64, w: f64, h: f64);

    /// Draw text with its alphabetic baseline at `y`.
    fn fill_text(&mut self, text: &str, font: &str, color: &str, x: f64, y: f64);

    fn translate(&mut self, x: f64, y: f64);

    /// Rotate the transform by `radians`, clockwise.
    fn rotate(&mut self, radians: f64);

    fn scale(&mut self, x: f64, y: f64);

    /// Serialize the surface as a `data:image/png;base64,...` URL.
    fn to_png_data_url(&self) -> Result<String>;
}
