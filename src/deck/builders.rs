//! Slide builders.
//!
//! Each builder appends a blank slide, applies the backdrop, lays out its
//! text boxes at fixed positions and styles every paragraph.

use crate::common::inches;
use crate::error::Result;
use crate::pptx::format::Alignment;
use crate::pptx::writer::{Presentation, Slide, TextFrame};
use log::debug;

use super::compositor::Backdrop;
use super::content::{ContentNode, PictureSpec, flatten};
use super::styling::{style_paragraph, style_with};

/// Box geometry in inches: x, y, width, height.
type BoxIn = (f64, f64, f64, f64);

const TITLE_SLIDE_TITLE: BoxIn = (0.7, 1.5, 12.0, 2.0);
const TITLE_SLIDE_SUBTITLE: BoxIn = (0.7, 3.5, 12.0, 1.5);
const BULLETS_TITLE: BoxIn = (0.5, 0.3, 12.0, 1.5);
const BULLETS_BODY: BoxIn = (1.0, 1.8, 11.5, 5.5);
const CONCLUSION_TITLE: BoxIn = (0.5, 0.8, 12.0, 1.5);
const CONCLUSION_BODY: BoxIn = (1.0, 2.5, 11.5, 4.0);

fn add_text_box(slide: &mut Slide, (x, y, w, h): BoxIn) -> &mut TextFrame {
    let frame = slide.add_text_box(inches(x), inches(y), inches(w), inches(h));
    frame.set_word_wrap(true);
    frame
}

/// Text box whose every line is styled the same way.
fn add_styled_box(
    slide: &mut Slide,
    geometry: BoxIn,
    text: &str,
    font_size: f64,
    bold: bool,
    align: Alignment,
) {
    let frame = add_text_box(slide, geometry);
    frame.set_text(text);
    for paragraph in frame.paragraphs_mut() {
        style_paragraph(paragraph, font_size, bold, false, align);
    }
}

fn new_slide<'a>(pres: &'a mut Presentation, backdrop: &Backdrop) -> &'a mut Slide {
    let slide = pres.add_slide();
    backdrop.apply(slide);
    slide
}

/// Title slide: a 48 pt title and an optional 24 pt subtitle, both centered.
pub fn add_title_slide<'a>(
    pres: &'a mut Presentation,
    backdrop: &Backdrop,
    title: &str,
    subtitle: Option<&str>,
) -> &'a mut Slide {
    let slide = new_slide(pres, backdrop);
    add_styled_box(slide, TITLE_SLIDE_TITLE, title, 48.0, true, Alignment::Center);

    if let Some(subtitle) = subtitle.filter(|s| !s.is_empty()) {
        add_styled_box(slide, TITLE_SLIDE_SUBTITLE, subtitle, 24.0, false, Alignment::Center);
    }
    debug!("title slide {:?}", title);
    slide
}

/// Bullet slide: a 32 pt centered title over a list of content nodes.
///
/// Leaves are styled with their own settings; nesting sets the paragraph
/// level.
pub fn add_bullets_slide<'a>(
    pres: &'a mut Presentation,
    backdrop: &Backdrop,
    title: &str,
    items: &[ContentNode],
) -> &'a mut Slide {
    let slide = new_slide(pres, backdrop);
    add_styled_box(slide, BULLETS_TITLE, title, 32.0, true, Alignment::Center);

    let body = add_text_box(slide, BULLETS_BODY);
    body.clear();
    let leaves = flatten(items);
    for (level, leaf) in &leaves {
        let paragraph = body.next_paragraph();
        paragraph.set_text(&leaf.text);
        paragraph.set_level(*level);
        style_with(paragraph, &leaf.style);
    }
    debug!("bullets slide {:?} with {} paragraphs", title, leaves.len());
    slide
}

/// Closing slide: a 40 pt centered title over 24 pt bullet points.
pub fn add_conclusion_slide<'a>(
    pres: &'a mut Presentation,
    backdrop: &Backdrop,
    title: &str,
    points: &[String],
) -> &'a mut Slide {
    let slide = new_slide(pres, backdrop);
    add_styled_box(slide, CONCLUSION_TITLE, title, 40.0, true, Alignment::Center);

    if !points.is_empty() {
        let body = add_text_box(slide, CONCLUSION_BODY);
        body.clear();
        for point in points {
            let paragraph = body.next_paragraph();
            paragraph.set_text(point);
            style_paragraph(paragraph, 24.0, false, true, Alignment::Left);
        }
    }
    debug!("conclusion slide {:?}", title);
    slide
}

/// Draw chart or screenshot images on top of a built slide.
pub fn add_pictures(slide: &mut Slide, pictures: &[PictureSpec]) -> Result<()> {
    for picture in pictures {
        slide.add_picture(
            &picture.path,
            inches(picture.x),
            inches(picture.y),
            inches(picture.width),
            inches(picture.height),
        )?;
        debug!("picture {} added", picture.path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::config::{LogoSpec, PageSize};
    use crate::deck::content::LeafStyle;
    use crate::pptx::format::ImageData;
    use crate::pptx::writer::Shape;

    fn backdrop() -> Backdrop {
        let gif = ImageData::from_bytes(b"GIF89a\x01\x00\x01\x00".to_vec()).unwrap();
        Backdrop::new(gif.clone(), gif, &PageSize::default(), &LogoSpec::default())
    }

    fn frames(slide: &Slide) -> Vec<&TextFrame> {
        slide.text_frames().collect()
    }

    #[test]
    fn test_title_slide_layout() {
        let mut pres = Presentation::new();
        let slide = add_title_slide(&mut pres, &backdrop(), "BLACKBERRY", Some("subtitle"));

        assert_eq!(slide.shape_count(), 4);
        let title_shape = &slide.shapes()[2];
        assert_eq!(title_shape.frame().x, inches(0.7));
        assert_eq!(title_shape.frame().height, inches(2.0));

        let texts = frames(slide);
        assert_eq!(texts[0].text(), "BLACKBERRY");
        assert!(texts[0].word_wrap());
        let run = &texts[0].paragraphs()[0].runs()[0];
        assert_eq!(run.format.size, Some(48.0));
        assert_eq!(run.format.bold, Some(true));
        assert_eq!(texts[1].paragraphs()[0].runs()[0].format.size, Some(24.0));
        assert_eq!(texts[1].paragraphs()[0].alignment(), Some(Alignment::Center));
    }

    #[test]
    fn test_title_slide_without_subtitle() {
        let mut pres = Presentation::new();
        let slide = add_title_slide(&mut pres, &backdrop(), "Only", None);
        assert_eq!(slide.text_frames().count(), 1);
        let slide = add_title_slide(&mut pres, &backdrop(), "Only", Some(""));
        assert_eq!(slide.text_frames().count(), 1);
    }

    #[test]
    fn test_bullets_levels_and_prefix() {
        let mut pres = Presentation::new();
        let items = vec![
            ContentNode::leaf("Major Flaws: "),
            ContentNode::group(["Touch response lag", "• Clicks felt unnatural"]),
            ContentNode::leaf("Result"),
        ];
        let slide = add_bullets_slide(&mut pres, &backdrop(), "BlackBerry Storm", &items);

        let body = frames(slide)[1];
        let got: Vec<(u8, String)> = body
            .paragraphs()
            .iter()
            .map(|p| (p.level(), p.text()))
            .collect();
        assert_eq!(
            got,
            vec![
                (0, "• Major Flaws: ".to_string()),
                (1, "• Touch response lag".to_string()),
                (1, "• Clicks felt unnatural".to_string()),
                (0, "• Result".to_string()),
            ]
        );
        let body_shape: &Shape = &slide.shapes()[3];
        assert_eq!(body_shape.frame().y, inches(1.8));
    }

    #[test]
    fn test_bullets_headings_are_not_prefixed() {
        let mut pres = Presentation::new();
        let heading = LeafStyle {
            bullet: false,
            font_size: 22.0,
            bold: true,
            align: Alignment::Left,
        };
        let items = vec![
            ContentNode::styled("1. The Rise of BYOD (2010–2015):", heading),
            ContentNode::group(["By 2012, 78% of companies supported BYOD."]),
        ];
        let slide = add_bullets_slide(&mut pres, &backdrop(), "How BYOD Killed BlackBerry", &items);

        let body = frames(slide)[1];
        assert_eq!(body.paragraphs()[0].text(), "1. The Rise of BYOD (2010–2015):");
        let run = &body.paragraphs()[0].runs()[0];
        assert_eq!(run.format.font.as_deref(), Some("Times New Roman"));
        assert_eq!(run.format.size, Some(22.0));
        assert_eq!(body.paragraphs()[1].level(), 1);
        assert_eq!(body.paragraphs()[1].runs()[0].format.font.as_deref(), Some("Calibri"));
    }

    #[test]
    fn test_conclusion_has_no_leading_empty_paragraph() {
        let mut pres = Presentation::new();
        let points = vec!["one".to_string(), "two".to_string()];
        let slide = add_conclusion_slide(&mut pres, &backdrop(), "Final Takeaways", &points);

        let body = frames(slide)[1];
        let texts: Vec<String> = body.paragraphs().iter().map(|p| p.text()).collect();
        assert_eq!(texts, vec!["• one", "• two"]);
        assert_eq!(body.paragraphs()[0].runs()[0].format.size, Some(24.0));
    }

    #[test]
    fn test_conclusion_without_points_has_only_title() {
        let mut pres = Presentation::new();
        let slide = add_conclusion_slide(&mut pres, &backdrop(), "Conclusion", &[]);
        assert_eq!(slide.text_frames().count(), 1);
    }

    #[test]
    fn test_add_pictures_missing_file() {
        let mut pres = Presentation::new();
        let slide = add_bullets_slide(&mut pres, &backdrop(), "t", &[]);
        let err = add_pictures(slide, &[PictureSpec::new("missing/Sales.jpg", 2.0, 3.75, 5.5, 3.5)])
            .unwrap_err();
        assert!(err.to_string().contains("Sales.jpg"));
    }
}
