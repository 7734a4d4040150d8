//! Deck configuration.
//!
//! Everything the pipeline needs is in one [`DeckConfig`]: output paths,
//! page size, gradient parameters, logo placement and the slides. The
//! default value is the built-in deck; a YAML file may override any part of
//! it.

use crate::common::{Emu, inches};
use crate::error::{Error, Result};
use crate::gradient::GradientSpec;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_saphyr::{Options, SerializerOptions};
use std::path::{Path, PathBuf};

use super::content::{LeafStyle, SlideSpec, flatten};
use super::defaults::builtin_slides;

/// Font sizes PresentationML accepts on a run, in points.
pub const FONT_SIZE_RANGE: std::ops::RangeInclusive<f64> = 1.0..=4000.0;

/// Parse YAML with YAML 1.2 booleans, so keys such as `y` and plain
/// scalars such as `No` stay strings.
pub(crate) fn parse_yaml<T: DeserializeOwned>(yaml: &str) -> std::result::Result<T, serde_saphyr::Error> {
    serde_saphyr::from_str_with_options(
        yaml,
        Options {
            strict_booleans: true,
            ..Default::default()
        },
    )
}

/// Emit plain or quoted scalars only; folded block scalars inside sequences
/// do not read back.
fn yaml_serializer_options() -> SerializerOptions {
    SerializerOptions {
        prefer_block_scalars: false,
        ..Default::default()
    }
}

/// Page size in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSize {
    pub width_in: f64,
    pub height_in: f64,
}

impl Default for PageSize {
    /// 16:9 widescreen.
    fn default() -> Self {
        Self {
            width_in: 13.333,
            height_in: 7.5,
        }
    }
}

impl PageSize {
    pub fn width(&self) -> Emu {
        inches(self.width_in)
    }

    pub fn height(&self) -> Emu {
        inches(self.height_in)
    }
}

/// Logo image and its square placement in the bottom-right corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogoSpec {
    pub path: PathBuf,
    /// Edge length in inches
    pub size_in: f64,
    /// Distance from the right and bottom page edges in inches
    pub margin_in: f64,
}

impl Default for LogoSpec {
    fn default() -> Self {
        Self {
            path: PathBuf::from("logomain.png"),
            size_in: 1.2,
            margin_in: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Where the rendered gradient background is written
    pub background: PathBuf,
    /// Where the presentation is written
    pub output: PathBuf,
    /// Document title stored in the package properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub page: PageSize,
    pub gradient: GradientSpec,
    pub logo: LogoSpec,
    pub slides: Vec<SlideSpec>,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            background: PathBuf::from("bb_gradient_bg.png"),
            output: PathBuf::from("blackberry_with_logo.pptx"),
            title: Some("BLACKBERRY".to_string()),
            page: PageSize::default(),
            gradient: GradientSpec::default(),
            logo: LogoSpec::default(),
            slides: builtin_slides(),
        }
    }
}

impl DeckConfig {
    /// Parse a YAML configuration. Missing fields keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = parse_yaml(yaml).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_yaml_str(&yaml).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_saphyr::to_string_with_options(self, yaml_serializer_options())
            .map_err(|e| Error::Config(e.to_string()))
    }

    /// Reject text styles that cannot be written as a run size.
    pub fn validate(&self) -> Result<()> {
        for (index, spec) in self.slides.iter().enumerate() {
            if let SlideSpec::Bullets { items, .. } = spec {
                for (_, leaf) in flatten(items) {
                    check_style(index, &leaf.text, &leaf.style)?;
                }
            }
        }
        Ok(())
    }
}

fn check_style(slide: usize, text: &str, style: &LeafStyle) -> Result<()> {
    if FONT_SIZE_RANGE.contains(&style.font_size) {
        return Ok(());
    }
    Err(Error::Config(format!(
        "slide {}: font_size {} of {:?} is outside {}..={} pt",
        slide + 1,
        style.font_size,
        text,
        FONT_SIZE_RANGE.start(),
        FONT_SIZE_RANGE.end()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::RGBColor;
    use crate::deck::content::{ContentNode, PictureSpec};

    #[test]
    fn test_default_matches_builtin_deck() {
        let config = DeckConfig::default();
        assert_eq!(config.page.width(), 12_191_695);
        assert_eq!(config.page.height(), 6_858_000);
        assert_eq!(config.gradient.width, 1920);
        assert_eq!(config.gradient.top, RGBColor::new(10, 15, 25));
        assert_eq!(config.output, PathBuf::from("blackberry_with_logo.pptx"));
        assert_eq!(config.slides.len(), 10);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = DeckConfig::from_yaml_str(
            r#"
output: out/deck.pptx
gradient:
  width: 64
  height: 36
  top: [0, 0, 0]
  bottom: [255, 255, 255]
slides:
  - kind: title
    title: Hello
"#,
        )
        .unwrap();
        assert_eq!(config.output, PathBuf::from("out/deck.pptx"));
        assert_eq!(config.background, PathBuf::from("bb_gradient_bg.png"));
        assert_eq!(config.gradient.bottom, RGBColor::WHITE);
        assert_eq!(config.logo, LogoSpec::default());
        assert_eq!(config.slides.len(), 1);
    }

    #[test]
    fn test_yaml_round_trip_of_builtin_deck() {
        let config = DeckConfig::default();
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("kind: conclusion"));
        assert!(!yaml.contains(">-"));
        let reparsed = DeckConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(reparsed, config);
    }

    #[test]
    fn test_single_letter_keys_and_yes_no_text_stay_strings() {
        let config = DeckConfig::from_yaml_str(
            r#"
slides:
  - kind: bullets
    title: Answers
    items:
      - Yes
      - - No
        - off
    pictures:
      - { path: chart.png, x: 1.0, y: 2.0, width: 3.0, height: 4.0 }
"#,
        )
        .unwrap();
        let SlideSpec::Bullets { items, pictures, .. } = &config.slides[0] else {
            panic!("expected a bullets slide, got {:?}", config.slides[0]);
        };
        let texts: Vec<&str> = flatten(items).into_iter().map(|(_, l)| l.text.as_str()).collect();
        assert_eq!(texts, vec!["Yes", "No", "off"]);
        assert_eq!(pictures[0], PictureSpec::new("chart.png", 1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn test_long_nested_text_round_trips() {
        let mut config = DeckConfig::default();
        let long = "BlackBerry kept its physical keyboard and its enterprise focus while the \
                    market moved to touch screens and app stores within a few short years";
        config.slides = vec![SlideSpec::Bullets {
            title: "Long".into(),
            items: vec![ContentNode::leaf(long), ContentNode::group([long, "short"])],
            pictures: vec![PictureSpec::new("storm.png", 6.5, 1.5, 7.75, 5.75)],
        }];

        let yaml = config.to_yaml().unwrap();
        assert_eq!(DeckConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn test_out_of_range_font_size_is_rejected() {
        for size in ["-4", "0", "5000"] {
            let yaml = format!(
                "slides:\n  - kind: bullets\n    title: T\n    items:\n      - text: bad\n        font_size: {size}\n"
            );
            let err = DeckConfig::from_yaml_str(&yaml).unwrap_err();
            assert!(matches!(err, Error::Config(_)), "{size}: {err}");
        }

        let mut config = DeckConfig::default();
        config.slides = vec![SlideSpec::Bullets {
            title: "T".into(),
            items: vec![ContentNode::Group(vec![ContentNode::styled(
                "nan",
                LeafStyle {
                    font_size: f64::NAN,
                    ..LeafStyle::default()
                },
            )])],
            pictures: Vec::new(),
        }];
        assert!(matches!(config.validate(), Err(Error::Config(_))));
        assert!(DeckConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let err = DeckConfig::from_yaml_str("slides: [{kind: spiral}]").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.yaml");
        std::fs::write(&path, "page: nonsense").unwrap();
        let err = DeckConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("deck.yaml"));

        let missing = DeckConfig::load(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(missing, Error::Io { .. }));
    }
}
