//! Background and logo shared by every slide.

use crate::common::{Emu, inches};
use crate::pptx::format::ImageData;
use crate::pptx::writer::{Frame, Slide};
use log::trace;

use super::config::{LogoSpec, PageSize};

/// Loaded images and geometry applied to each new slide.
#[derive(Debug, Clone)]
pub struct Backdrop {
    pub background: ImageData,
    pub logo: ImageData,
    pub page_width: Emu,
    pub page_height: Emu,
    pub logo_size: Emu,
    pub logo_margin: Emu,
}

impl Backdrop {
    pub fn new(background: ImageData, logo: ImageData, page: &PageSize, logo_spec: &LogoSpec) -> Self {
        Self {
            background,
            logo,
            page_width: page.width(),
            page_height: page.height(),
            logo_size: inches(logo_spec.size_in),
            logo_margin: inches(logo_spec.margin_in),
        }
    }

    /// Full-page frame of the background.
    pub fn background_frame(&self) -> Frame {
        Frame::new(0, 0, self.page_width, self.page_height)
    }

    /// Square logo frame, `margin` away from the right and bottom edges.
    pub fn logo_frame(&self) -> Frame {
        Frame::new(
            self.page_width - self.logo_size - self.logo_margin,
            self.page_height - self.logo_size - self.logo_margin,
            self.logo_size,
            self.logo_size,
        )
    }

    /// Draw the background, then the logo on top of it.
    pub fn apply(&self, slide: &mut Slide) {
        let bg = self.background_frame();
        slide.add_image(
            &self.background,
            bg.x,
            bg.y,
            bg.width,
            bg.height,
            Some("Background".to_string()),
        );

        let logo = self.logo_frame();
        slide.add_image(
            &self.logo,
            logo.x,
            logo.y,
            logo.width,
            logo.height,
            Some("Logo".to_string()),
        );
        trace!("slide {}: background and logo applied", slide.slide_id());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pptx::writer::Presentation;

    fn image() -> ImageData {
        ImageData::from_bytes(b"GIF89a\x01\x00\x01\x00".to_vec()).unwrap()
    }

    #[test]
    fn test_logo_anchored_bottom_right() {
        let backdrop = Backdrop::new(image(), image(), &PageSize::default(), &LogoSpec::default());
        let logo = backdrop.logo_frame();
        assert_eq!(logo.width, 1_097_280);
        assert_eq!(logo.right(), backdrop.page_width - 274_320);
        assert_eq!(logo.bottom(), backdrop.page_height - 274_320);
    }

    #[test]
    fn test_apply_draws_background_first() {
        let backdrop = Backdrop::new(image(), image(), &PageSize::default(), &LogoSpec::default());
        let mut pres = Presentation::new();
        let slide = pres.add_slide();
        backdrop.apply(slide);

        assert_eq!(slide.shape_count(), 2);
        assert_eq!(slide.shapes()[0].frame(), backdrop.background_frame());
        assert_eq!(slide.shapes()[1].frame(), backdrop.logo_frame());
        assert_eq!(
            backdrop.background_frame(),
            Frame::new(0, 0, 12_191_695, 6_858_000)
        );
    }
}
