//! Border configuration and border-art slots.
//!
//! Slots exist in two forms: [`RawImageSlot`] is what the border-assignment
//! state stores (an image id plus a transform), [`ImageSlot`] is the
//! renderable view produced by [`resolve_slot`] against an [`ImageLibrary`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::canvas::{BackgroundMode, Padding};

/// How the border band is painted.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ColorMode {
    #[default]
    Solid,
    /// Concentric strokes, one per palette entry.
    InsideOut,
    /// Corner and side images.
    Images,
}

/// Corner image scaling policy.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SizingStrategy {
    /// Scale to the border width, keeping the source aspect ratio.
    #[default]
    Auto,
    /// Force a border-width square.
    Fixed,
}

/// Side image fill policy.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SideMode {
    #[default]
    Stretch,
    Repeat,
}

/// Resolution status of a slot.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SlotStatus {
    Ready,
    /// The slot references an image id the library no longer has.
    Broken,
    #[default]
    Empty,
}

/// Natural pixel dimensions of a drawable image.
pub trait ImageSource {
    /// `(width, height)` in source pixels. Zero means "not decoded yet".
    fn natural_size(&self) -> (f64, f64);
}

/// Lookup capability over the external image library.
pub trait ImageLibrary {
    type Image: ImageSource + Clone;

    fn get_image_by_id(&self, id: &str) -> Option<Self::Image>;
}

impl<I: ImageSource + Clone> ImageLibrary for HashMap<String, I> {
    type Image = I;

    fn get_image_by_id(&self, id: &str) -> Option<I> {
        self.get(id).cloned()
    }
}

/// Slot as stored by the border-assignment state.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawImageSlot {
    #[serde(default)]
    pub image_id: Option<String>,
    /// Degrees, normally 0/90/180/270.
    #[serde(default)]
    pub rotation: i32,
    #[serde(default)]
    pub flip_x: bool,
    #[serde(default)]
    pub flip_y: bool,
}

/// Slot ready for the compositor.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSlot<I> {
    pub image: Option<I>,
    pub status: SlotStatus,
    pub rotation: i32,
    pub flip_x: bool,
    pub flip_y: bool,
}

impl<I> Default for ImageSlot<I> {
    fn default() -> Self {
        Self {
            image: None,
            status: SlotStatus::Empty,
            rotation: 0,
            flip_x: false,
            flip_y: false,
        }
    }
}

impl<I> ImageSlot<I> {
    /// The image, when the slot resolved to a drawable.
    pub fn ready_image(&self) -> Option<&I> {
        match self.status {
            SlotStatus::Ready => self.image.as_ref(),
            SlotStatus::Broken | SlotStatus::Empty => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready_image().is_some()
    }
}

/// Resolve a raw slot against the image library.
///
/// No id yields `Empty`; an id the library does not know yields `Broken`.
/// Transforms are carried over in every case.
pub fn resolve_slot<L: ImageLibrary + ?Sized>(
    raw: &RawImageSlot,
    library: &L,
) -> ImageSlot<L::Image> {
    let (image, status) = match raw.image_id.as_deref() {
        None => (None, SlotStatus::Empty),
        Some(id) => match library.get_image_by_id(id) {
            Some(image) => (Some(image), SlotStatus::Ready),
            None => (None, SlotStatus::Broken),
        },
    };
    ImageSlot {
        image,
        status,
        rotation: raw.rotation,
        flip_x: raw.flip_x,
        flip_y: raw.flip_y,
    }
}

/// One value per border corner.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Corners<T> {
    #[serde(default)]
    pub top_left: T,
    #[serde(default)]
    pub top_right: T,
    #[serde(default)]
    pub bottom_right: T,
    #[serde(default)]
    pub bottom_left: T,
}

impl<T> Corners<T> {
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        [
            &self.top_left,
            &self.top_right,
            &self.bottom_right,
            &self.bottom_left,
        ]
        .into_iter()
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Corners<U> {
        Corners {
            top_left: f(&self.top_left),
            top_right: f(&self.top_right),
            bottom_right: f(&self.bottom_right),
            bottom_left: f(&self.bottom_left),
        }
    }
}

/// One value per border side.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Sides<T> {
    #[serde(default)]
    pub top: T,
    #[serde(default)]
    pub right: T,
    #[serde(default)]
    pub bottom: T,
    #[serde(default)]
    pub left: T,
}

impl<T> Sides<T> {
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        [&self.top, &self.right, &self.bottom, &self.left].into_iter()
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Sides<U> {
        Sides {
            top: f(&self.top),
            right: f(&self.right),
            bottom: f(&self.bottom),
            left: f(&self.left),
        }
    }
}

/// Image border in renderable form.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBorder<I> {
    pub corners: Corners<ImageSlot<I>>,
    pub sides: Sides<ImageSlot<I>>,
    pub sizing_strategy: SizingStrategy,
    pub side_mode: SideMode,
}

impl<I> Default for ImageBorder<I> {
    fn default() -> Self {
        Self {
            corners: Corners {
                top_left: ImageSlot::default(),
                top_right: ImageSlot::default(),
                bottom_right: ImageSlot::default(),
                bottom_left: ImageSlot::default(),
            },
            sides: Sides {
                top: ImageSlot::default(),
                right: ImageSlot::default(),
                bottom: ImageSlot::default(),
                left: ImageSlot::default(),
            },
            sizing_strategy: SizingStrategy::Auto,
            side_mode: SideMode::Stretch,
        }
    }
}

impl<I> ImageBorder<I> {
    /// Whether any of the eight slots holds a drawable image.
    pub fn any_ready(&self) -> bool {
        self.corners.iter().any(ImageSlot::is_ready) || self.sides.iter().any(ImageSlot::is_ready)
    }
}

/// Read-only border description for one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct BorderConfig<I> {
    pub enabled: bool,
    /// Stroke width in CSS pixels.
    pub width: f64,
    pub radius: f64,
    pub color_mode: ColorMode,
    pub color: String,
    pub inside_out_colors: Vec<String>,
    pub image_border: ImageBorder<I>,
    pub background_mode: BackgroundMode,
    pub background_color: String,
    /// Padding between the border and the text.
    pub padding: Padding,
}

impl<I> Default for BorderConfig<I> {
    fn default() -> Self {
        Self {
            enabled: true,
            width: 4.0,
            radius: 12.0,
            color_mode: ColorMode::Solid,
            color: "#111827".to_string(),
            inside_out_colors: Vec::new(),
            image_border: ImageBorder::default(),
            background_mode: BackgroundMode::Solid,
            background_color: "#FFFFFF".to_string(),
            padding: Padding::uniform(16.0),
        }
    }
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

    #[derive(Debug, Clone, PartialEq)]
    struct Img(f64, f64);

    impl ImageSource for Img {
        fn natural_size(&self) -> (f64, f64) {
            (self.0, self.1)
        }
    }

    fn library() -> HashMap<String, Img> {
        let mut lib = HashMap::new();
        lib.insert("leaf".to_string(), Img(32.0, 16.0));
        lib
    }

    #[test]
    fn test_resolve_known_id_is_ready() {
        let raw = RawImageSlot {
            image_id: Some("leaf".to_string()),
            rotation: 90,
            flip_x: true,
            flip_y: false,
        };
        let slot = resolve_slot(&raw, &library());
        assert_eq!(slot.status, SlotStatus::Ready);
        assert_eq!(slot.image, Some(Img(32.0, 16.0)));
        assert_eq!(slot.rotation, 90);
        assert!(slot.flip_x);
    }

    #[test]
    fn test_resolve_missing_id_is_broken() {
        let raw = RawImageSlot {
            image_id: Some("deleted".to_string()),
            ..Default::default()
        };
        let slot = resolve_slot(&raw, &library());
        assert_eq!(slot.status, SlotStatus::Broken);
        assert!(slot.image.is_none());
        assert!(!slot.is_ready());
    }

    #[test]
    fn test_resolve_no_id_is_empty() {
        let slot = resolve_slot(&RawImageSlot::default(), &library());
        assert_eq!(slot.status, SlotStatus::Empty);
        assert!(slot.image.is_none());
    }

    #[test]
    fn test_any_ready() {
        let mut border: ImageBorder<Img> = ImageBorder::default();
        assert!(!border.any_ready());
        border.sides.left = ImageSlot {
            image: Some(Img(4.0, 4.0)),
            status: SlotStatus::Ready,
            ..Default::default()
        };
        assert!(border.any_ready());
    }

    #[test]
    fn test_color_mode_serde_names() {
        let mode: ColorMode = serde_json::from_str("\"inside-out\"").unwrap();
        assert_eq!(mode, ColorMode::InsideOut);
        let mode: ColorMode = serde_json::from_str("\"images\"").unwrap();
        assert_eq!(mode, ColorMode::Images);
    }
}
