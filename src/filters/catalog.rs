//! Named single-pass filters.
//!
//! A filter is picked by its display name and applied to a whole buffer. The
//! set is closed: every name resolves to one [`FilterKind`], and each kind is
//! a pure function of its input. Output width and height always match the
//! input; the channel count may change (grayscale and edge maps are single
//! channel, the color remap is always RGB).
//!
//! | Name(s) | Kind |
//! |---------|------|
//! | `Grayscale`, `Sketch` | [`FilterKind::Grayscale`] |
//! | `Pencil` | [`FilterKind::PencilSketch`] |
//! | `Edge Detection`, `EdgeDetect` | [`FilterKind::EdgeDetect`] |
//! | `Color Filter`, `ColorRemap` | [`FilterKind::ColorRemap`] |
//! | `Blur`, `GaussianBlur` | [`FilterKind::GaussianBlur`] |
//! | `Sepia` | [`FilterKind::SepiaMatrix`] |
//! | `Negative` | [`FilterKind::Negative`] |
//! | `Emboss` | [`FilterKind::EmbossKernel`] |

use std::fmt;
use std::str::FromStr;

use ndarray::{Array3, ArrayView3};

use super::blur::{gaussian_blur_u8, CATALOG_BLUR_SIZE};
use super::color_adjust::{color_remap_u8, negative_u8, sepia_u8};
use super::edge::{canny_u8, CANNY_HIGH, CANNY_LOW};
use super::grayscale::grayscale_u8;
use super::stylize::emboss_u8;
use crate::error::{CartoonError, Result};

/// Menu entry that leaves the cartoon result untouched.
pub const PASSTHROUGH: &str = "Cartoon";

/// Menu order of the interactive front end.
const MENU: [&str; 10] = [
    PASSTHROUGH,
    "Sketch",
    "Pencil",
    "Color Filter",
    "Grayscale",
    "Blur",
    "Edge Detection",
    "Sepia",
    "Negative",
    "Emboss",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Grayscale,
    EdgeDetect,
    ColorRemap,
    GaussianBlur,
    SepiaMatrix,
    Negative,
    EmbossKernel,
    PencilSketch,
}

impl FilterKind {
    pub const ALL: [FilterKind; 8] = [
        FilterKind::Grayscale,
        FilterKind::EdgeDetect,
        FilterKind::ColorRemap,
        FilterKind::GaussianBlur,
        FilterKind::SepiaMatrix,
        FilterKind::Negative,
        FilterKind::EmbossKernel,
        FilterKind::PencilSketch,
    ];

    /// Resolve a display name. Matching is exact and case-sensitive.
    pub fn from_name(name: &str) -> Option<FilterKind> {
        let kind = match name {
            "Grayscale" | "Sketch" => FilterKind::Grayscale,
            "Pencil" => FilterKind::PencilSketch,
            "Edge Detection" | "EdgeDetect" => FilterKind::EdgeDetect,
            "Color Filter" | "ColorRemap" => FilterKind::ColorRemap,
            "Blur" | "GaussianBlur" => FilterKind::GaussianBlur,
            "Sepia" => FilterKind::SepiaMatrix,
            "Negative" => FilterKind::Negative,
            "Emboss" => FilterKind::EmbossKernel,
            _ => return None,
        };
        Some(kind)
    }

    /// Canonical display name.
    pub fn name(self) -> &'static str {
        match self {
            FilterKind::Grayscale => "Grayscale",
            FilterKind::EdgeDetect => "Edge Detection",
            FilterKind::ColorRemap => "Color Filter",
            FilterKind::GaussianBlur => "Blur",
            FilterKind::SepiaMatrix => "Sepia",
            FilterKind::Negative => "Negative",
            FilterKind::EmbossKernel => "Emboss",
            FilterKind::PencilSketch => "Pencil",
        }
    }

    /// Run this filter over a whole buffer.
    pub fn apply(self, image: ArrayView3<u8>) -> Array3<u8> {
        match self {
            FilterKind::Grayscale => grayscale_u8(image),
            // Pencil shares the edge detector
            FilterKind::EdgeDetect | FilterKind::PencilSketch => canny_u8(image, CANNY_LOW, CANNY_HIGH),
            FilterKind::ColorRemap => color_remap_u8(image),
            FilterKind::GaussianBlur => gaussian_blur_u8(image, CATALOG_BLUR_SIZE, 0.0),
            FilterKind::SepiaMatrix => sepia_u8(image),
            FilterKind::Negative => negative_u8(image),
            FilterKind::EmbossKernel => emboss_u8(image),
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = CartoonError;

    fn from_str(s: &str) -> Result<Self> {
        FilterKind::from_name(s).ok_or_else(|| CartoonError::UnknownFilter(s.to_string()))
    }
}

/// Entry point for applying filters by name.
pub struct FilterCatalog;

impl FilterCatalog {
    /// Apply the filter called `name`.
    ///
    /// Unknown names, including [`PASSTHROUGH`], return a copy of the input.
    pub fn apply(image: ArrayView3<u8>, name: &str) -> Array3<u8> {
        match FilterKind::from_name(name) {
            Some(kind) => kind.apply(image),
            None => {
                if name != PASSTHROUGH {
                    log::debug!("no filter named {name:?}, returning input unchanged");
                }
                image.to_owned()
            }
        }
    }

    /// Like [`FilterCatalog::apply`] but rejects unknown names.
    ///
    /// [`PASSTHROUGH`] is accepted and returns a copy of the input.
    pub fn try_apply(image: ArrayView3<u8>, name: &str) -> Result<Array3<u8>> {
        if name == PASSTHROUGH {
            return Ok(image.to_owned());
        }
        let kind: FilterKind = name.parse()?;
        Ok(kind.apply(image))
    }

    /// Names offered by the interactive menu, in display order.
    pub fn menu_names() -> &'static [&'static str] {
        &MENU
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(height: usize, width: usize) -> Array3<u8> {
        Array3::from_shape_fn((height, width, 3), |(y, x, c)| ((y * 17 + x * 5 + c * 40) % 256) as u8)
    }

    #[test]
    fn test_from_name_aliases() {
        assert_eq!(FilterKind::from_name("Sketch"), Some(FilterKind::Grayscale));
        assert_eq!(FilterKind::from_name("Grayscale"), Some(FilterKind::Grayscale));
        assert_eq!(FilterKind::from_name("Pencil"), Some(FilterKind::PencilSketch));
        assert_eq!(FilterKind::from_name("EdgeDetect"), Some(FilterKind::EdgeDetect));
        assert_eq!(FilterKind::from_name("Color Filter"), Some(FilterKind::ColorRemap));
        assert_eq!(FilterKind::from_name("sepia"), None);
        assert_eq!(FilterKind::from_name(PASSTHROUGH), None);
    }

    #[test]
    fn test_name_roundtrips() {
        for kind in FilterKind::ALL {
            assert_eq!(FilterKind::from_name(kind.name()), Some(kind));
            assert_eq!(kind.to_string().parse::<FilterKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_from_str_unknown() {
        let err = "Posterize".parse::<FilterKind>().unwrap_err();
        assert!(matches!(err, CartoonError::UnknownFilter(ref n) if n == "Posterize"));
    }

    #[test]
    fn test_menu_names_resolve() {
        let names = FilterCatalog::menu_names();
        assert_eq!(names.len(), 10);
        assert_eq!(names[0], PASSTHROUGH);
        for name in &names[1..] {
            assert!(FilterKind::from_name(name).is_some(), "{name}");
        }
    }

    #[test]
    fn test_apply_unknown_is_identity() {
        let img = gradient(6, 7);
        assert_eq!(FilterCatalog::apply(img.view(), "Watercolor"), img);
        assert_eq!(FilterCatalog::apply(img.view(), PASSTHROUGH), img);
        assert_eq!(FilterCatalog::apply(img.view(), ""), img);
    }

    #[test]
    fn test_try_apply() {
        let img = gradient(6, 7);
        assert_eq!(FilterCatalog::try_apply(img.view(), PASSTHROUGH).unwrap(), img);
        assert!(FilterCatalog::try_apply(img.view(), "Watercolor").is_err());
        assert_eq!(
            FilterCatalog::try_apply(img.view(), "Negative").unwrap(),
            FilterCatalog::apply(img.view(), "Negative")
        );
    }

    #[test]
    fn test_every_filter_keeps_dimensions() {
        let img = gradient(9, 13);
        for kind in FilterKind::ALL {
            let out = kind.apply(img.view());
            assert_eq!((out.dim().0, out.dim().1), (9, 13), "{kind}");
        }
    }

    #[test]
    fn test_channel_counts() {
        let img = gradient(5, 5);
        assert_eq!(FilterKind::Grayscale.apply(img.view()).dim().2, 1);
        assert_eq!(FilterKind::EdgeDetect.apply(img.view()).dim().2, 1);
        assert_eq!(FilterKind::PencilSketch.apply(img.view()).dim().2, 1);
        assert_eq!(FilterKind::ColorRemap.apply(img.view()).dim().2, 3);
        assert_eq!(FilterKind::Negative.apply(img.view()).dim().2, 3);
    }

    #[test]
    fn test_pencil_matches_edge_detect() {
        let img = gradient(12, 12);
        assert_eq!(
            FilterKind::PencilSketch.apply(img.view()),
            FilterKind::EdgeDetect.apply(img.view())
        );
    }
}
