//! The deck pipeline: render the background, build every slide, save.

use crate::error::Result;
use crate::pptx::format::ImageData;
use crate::pptx::writer::Presentation;
use log::info;
use std::path::PathBuf;

use super::builders::{add_bullets_slide, add_conclusion_slide, add_pictures, add_title_slide};
use super::compositor::Backdrop;
use super::config::DeckConfig;
use super::content::SlideSpec;

/// What a pipeline run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub background: PathBuf,
    pub output: PathBuf,
    pub slide_count: usize,
}

/// Build the presentation described by `config` in memory.
///
/// The background image must already exist at `config.background`.
pub fn build_presentation(config: &DeckConfig) -> Result<Presentation> {
    let background = ImageData::from_file(&config.background)?;
    let logo = ImageData::from_file(&config.logo.path)?;
    let backdrop = Backdrop::new(background, logo, &config.page, &config.logo);

    let mut pres = Presentation::new();
    pres.set_slide_width(config.page.width());
    pres.set_slide_height(config.page.height());
    if let Some(title) = &config.title {
        pres.set_title(title.clone());
    }

    for spec in &config.slides {
        match spec {
            SlideSpec::Title { title, subtitle } => {
                add_title_slide(&mut pres, &backdrop, title, subtitle.as_deref());
            },
            SlideSpec::Bullets {
                title,
                items,
                pictures,
            } => {
                let slide = add_bullets_slide(&mut pres, &backdrop, title, items);
                add_pictures(slide, pictures)?;
            },
            SlideSpec::Conclusion { title, points } => {
                add_conclusion_slide(&mut pres, &backdrop, title, points);
            },
        }
    }

    Ok(pres)
}

/// Run the whole pipeline and write both output files.
pub fn run(config: &DeckConfig) -> Result<Report> {
    info!(
        "rendering {}x{} background to {}",
        config.gradient.width,
        config.gradient.height,
        config.background.display()
    );
    config.gradient.write(&config.background)?;

    info!("building {} slides", config.slides.len());
    let pres = build_presentation(config)?;

    info!("saving {}", config.output.display());
    pres.save(&config.output)?;

    Ok(Report {
        background: config.background.clone(),
        output: config.output.clone(),
        slide_count: pres.slide_count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::RGBColor;
    use crate::deck::config::{LogoSpec, PageSize};
    use crate::deck::content::{ContentNode, PictureSpec};
    use crate::deck::styling::BULLET_GLYPH;
    use crate::error::Error;
    use crate::gradient::GradientSpec;
    use crate::pptx::inspect::PresentationSummary;
    use crate::pptx::writer::Frame;
    use std::path::Path;

    fn write_png(path: &Path, width: u32, height: u32, shade: u8) {
        image::RgbImage::from_pixel(width, height, image::Rgb([shade, shade, shade]))
            .save(path)
            .unwrap();
    }

    fn write_jpeg(path: &Path) {
        image::RgbImage::from_pixel(8, 8, image::Rgb([200, 40, 40]))
            .save(path)
            .unwrap();
    }

    /// The built-in deck with every path inside `dir` and a small gradient.
    fn config_in(dir: &Path) -> DeckConfig {
        write_png(&dir.join("logomain.png"), 16, 16, 255);
        write_jpeg(&dir.join("Sales.jpg"));
        write_png(&dir.join("storm.png"), 12, 9, 90);

        let mut config = DeckConfig::default();
        config.background = dir.join("bb_gradient_bg.png");
        config.output = dir.join("blackberry_with_logo.pptx");
        config.gradient = GradientSpec::new(96, 54, RGBColor::new(10, 15, 25), RGBColor::new(5, 35, 70));
        config.logo.path = dir.join("logomain.png");
        for spec in &mut config.slides {
            if let SlideSpec::Bullets { pictures, .. } = spec {
                for picture in pictures {
                    picture.path = dir.join(&picture.path);
                }
            }
        }
        config
    }

    #[test]
    fn test_run_builtin_deck() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let report = run(&config).unwrap();
        assert_eq!(report.slide_count, config.slides.len());
        assert!(report.background.exists());

        let summary = PresentationSummary::open(&report.output).unwrap();
        assert_eq!(summary.slide_count(), config.slides.len());
        assert_eq!(summary.slide_width, 12_191_695);
        assert_eq!(summary.slide_height, 6_858_000);
    }

    #[test]
    fn test_every_slide_has_full_page_background_and_anchored_logo() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let report = run(&config).unwrap();
        let summary = PresentationSummary::open(&report.output).unwrap();

        let page = Frame::new(0, 0, summary.slide_width, summary.slide_height);
        let margin = 274_320;
        for slide in &summary.slides {
            let background = &slide.pictures[0];
            assert_eq!(background.frame, page);

            let logo = &slide.pictures[1];
            assert_eq!(logo.frame.width, 1_097_280);
            assert_eq!(logo.frame.right(), summary.slide_width - margin);
            assert_eq!(logo.frame.bottom(), summary.slide_height - margin);
            assert_ne!(background.media, logo.media);
        }

        let background_parts: std::collections::HashSet<_> = summary
            .slides
            .iter()
            .map(|s| s.pictures[0].media.clone())
            .collect();
        assert_eq!(background_parts.len(), 1);
    }

    #[test]
    fn test_chart_pictures_land_on_their_slides() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let report = run(&config).unwrap();
        let summary = PresentationSummary::open(&report.output).unwrap();

        let picture_counts: Vec<usize> = summary.slides.iter().map(|s| s.pictures.len()).collect();
        assert_eq!(picture_counts, vec![2, 2, 3, 2, 3, 2, 2, 2, 2, 2]);

        let chart = &summary.slides[2].pictures[2];
        assert_eq!(
            chart.frame,
            Frame::new(1_828_800, 3_429_000, 5_029_200, 3_200_400)
        );
        assert!(chart.media.as_deref().unwrap().ends_with(".jpg"));
    }

    #[test]
    fn test_bullets_and_levels_survive_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let report = run(&config).unwrap();
        let summary = PresentationSummary::open(&report.output).unwrap();

        let storm = &summary.slides[4];
        let body: Vec<(u8, &str)> = storm.paragraphs[1..]
            .iter()
            .map(|p| (p.level, p.text.as_str()))
            .collect();
        assert_eq!(body[1], (0, "• Major Flaws: "));
        assert_eq!(body[2], (1, "• Touch response lag"));
        assert_eq!(body[5], (1, "• App support was weak vs Apple App Store"));
        assert_eq!(body[6].0, 0);

        for slide in &summary.slides {
            for para in &slide.paragraphs {
                assert!(para.text.matches(BULLET_GLYPH).count() <= 1, "{:?}", para.text);
                assert_eq!(para.color, Some(RGBColor::WHITE));
            }
        }

        let byod = &summary.slides[8];
        assert_eq!(byod.paragraphs[1].text, "1. The Rise of BYOD (2010–2015):");
        assert_eq!(byod.paragraphs[1].bold, Some(true));
        assert_eq!(byod.paragraphs[1].font_size, Some(22.0));

        let conclusion = &summary.slides[9];
        assert_eq!(conclusion.paragraphs.len(), 4);
        assert!(conclusion.paragraphs[1].text.starts_with("• BlackBerry’s fall"));
    }

    #[test]
    fn test_runs_are_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        run(&config).unwrap();
        let first_bg = std::fs::read(&config.background).unwrap();
        let first_pptx = std::fs::read(&config.output).unwrap();

        run(&config).unwrap();
        assert_eq!(std::fs::read(&config.background).unwrap(), first_bg);
        assert_eq!(std::fs::read(&config.output).unwrap(), first_pptx);
    }

    #[test]
    fn test_missing_logo_fails_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.logo.path = dir.path().join("nologo.png");

        let err = run(&config).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("nologo.png"));
        assert!(!config.output.exists());
    }

    #[test]
    fn test_custom_deck() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("logo.png"), 4, 4, 255);
        write_png(&dir.path().join("chart.png"), 4, 4, 30);

        let config = DeckConfig {
            background: dir.path().join("bg.png"),
            output: dir.path().join("deck.pptx"),
            title: None,
            page: PageSize {
                width_in: 10.0,
                height_in: 7.5,
            },
            gradient: GradientSpec::new(8, 6, RGBColor::BLACK, RGBColor::WHITE),
            logo: LogoSpec {
                path: dir.path().join("logo.png"),
                size_in: 1.0,
                margin_in: 0.5,
            },
            slides: vec![
                SlideSpec::Bullets {
                    title: "Nested".into(),
                    items: vec![
                        ContentNode::leaf("top"),
                        ContentNode::Group(vec![
                            ContentNode::leaf("one"),
                            ContentNode::group(["two"]),
                        ]),
                    ],
                    pictures: vec![PictureSpec::new(dir.path().join("chart.png"), 1.0, 1.0, 2.0, 2.0)],
                },
                SlideSpec::Conclusion {
                    title: "End".into(),
                    points: vec![],
                },
            ],
        };

        let report = run(&config).unwrap();
        assert_eq!(report.slide_count, 2);

        let summary = PresentationSummary::open(&config.output).unwrap();
        assert_eq!(summary.slide_width, 9_144_000);
        let levels: Vec<u8> = summary.slides[0].paragraphs[1..].iter().map(|p| p.level).collect();
        assert_eq!(levels, vec![0, 1, 2]);
        assert_eq!(summary.slides[1].texts(), vec!["End"]);

        let logo = &summary.slides[1].pictures[1].frame;
        assert_eq!(logo.right(), 9_144_000 - 457_200);
    }
}
