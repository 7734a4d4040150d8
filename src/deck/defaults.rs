//! The built-in deck: the rise and fall of BlackBerry.

use crate::pptx::format::Alignment;

use super::content::{ContentNode, LeafStyle, PictureSpec, SlideSpec};

fn section_heading(text: &str) -> ContentNode {
    ContentNode::styled(
        text,
        LeafStyle {
            bullet: false,
            font_size: 22.0,
            bold: true,
            align: Alignment::Left,
        },
    )
}

fn leaves(items: &[&str]) -> Vec<ContentNode> {
    items.iter().copied().map(ContentNode::leaf).collect()
}

fn bullets(title: &str, items: Vec<ContentNode>) -> SlideSpec {
    SlideSpec::Bullets {
        title: title.to_string(),
        items,
        pictures: Vec::new(),
    }
}

/// Slides of the built-in deck, in presentation order.
pub fn builtin_slides() -> Vec<SlideSpec> {
    vec![
        SlideSpec::Title {
            title: "BLACKBERRY".to_string(),
            subtitle: Some(
                "A concise analysis of strategy, product, and market shifts".to_string(),
            ),
        },
        bullets(
            "Why did it fail?",
            leaves(&[
                "Google’s Android devices quickly followed iPhone with large multitouch screens and no physical keyboard—plus more customization.",
                "BlackBerry believed physical QWERTY keyboards were irreplaceable for professionals.",
                "Focused heavily on productivity, not entertainment or media consumption.",
                "Design philosophy: small screen + keyboard = best professional device.",
            ]),
        ),
        SlideSpec::Bullets {
            title: "Major three reasons for the failure".to_string(),
            items: leaves(&[
                "Slow adaptation to touchscreens and modern smartphone trends",
                "Strategic missteps in the app ecosystem",
                "Overconfidence in enterprise market dominance",
            ]),
            pictures: vec![PictureSpec::new("Sales.jpg", 2.0, 3.75, 5.5, 3.5)],
        },
        bullets(
            "1) Slow Adaptation to Touchscreens & Modern Smartphone Trends",
            leaves(&[
                "Relied on physical keyboards while iPhone & Android embraced large touchscreens.",
                "Underestimated consumer demand for multimedia, apps, and gesture-based navigation.",
                "First touchscreen phone (BlackBerry Storm, 2008) had poor performance and clunky “SurePress” screen.",
                "Delayed response allowed rivals to capture both consumer and enterprise markets.",
                "Developers shifted focus to iOS/Android, widening BlackBerry’s innovation gap.",
                "Failure to redesign OS for touch led to an awkward, outdated user experience.",
            ]),
        ),
        SlideSpec::Bullets {
            title: "BlackBerry Storm (“SurePress”)".to_string(),
            items: vec![
                ContentNode::leaf(
                    "First touchscreen phone (BlackBerry Storm, 2008): tried to mimic pressing a real key.",
                ),
                ContentNode::leaf("Major Flaws: "),
                ContentNode::group([
                    "Touch response lag",
                    "Clicks felt unnatural and tiring",
                    "OS not designed for touch → awkward navigation",
                    "App support was weak vs Apple App Store",
                ]),
                ContentNode::leaf("Result: negative reviews, high return rates, and product failure."),
            ],
            pictures: vec![PictureSpec::new("storm.png", 6.5, 1.5, 7.75, 5.75)],
        },
        bullets(
            "2) BlackBerry’s Strategic Missteps in the App Ecosystem",
            leaves(&[
                "Prioritized secure email and BBM, neglecting a modern, user-friendly app store.",
                "Did not recognize early enough that a wide variety of mobile apps was becoming crucial.",
                "Provided limited tools/incentives for third-party developers → slow innovation & fewer apps.",
                "Overlooked the speed of iOS/Android platform evolution to attract users and developers.",
            ]),
        ),
        bullets(
            "Consequences of Underestimating the App Ecosystem",
            leaves(&[
                "Most developers shifted to iOS and Android → a “BlackBerry app gap.”",
                "Users faced restricted choices for social, entertainment, productivity, and lifestyle apps.",
                "Frustrated by missing/outdated apps, many migrated to competitors with richer ecosystems.",
                "This app shortfall drove loss of relevance and a steep decline in global market share.",
            ]),
        ),
        bullets(
            "3) Overconfidence in Enterprise Market Dominance",
            vec![
                ContentNode::leaf(
                    "2009 Peak: Controlled 50% of the U.S. smartphone market, with 20% globally (Forbes).",
                ),
                ContentNode::leaf(
                    "Government/Corporate Reliance: Used by 90% of Fortune 500 companies and governments (BBC).",
                ),
                ContentNode::leaf(
                    "Assumption: Believed businesses would prioritize security over employee preferences (WSJ).",
                ),
                ContentNode::leaf("Why it failed:"),
                ContentNode::group([
                    "Ignored BYOD: By 2012, 78% of companies allowed employees to use personal devices (Gartner).",
                    "Slow to Adapt: BlackBerry’s CEO called BYOD a 'passing trend' in 2012 (The Verge).",
                    "Security Myth: iOS/Android adopted MDM (Mobile Device Management), matching BlackBerry’s security (CNBC).",
                ]),
            ],
        ),
        bullets(
            "How BYOD Killed BlackBerry",
            vec![
                section_heading("1. The Rise of BYOD (2010–2015):"),
                ContentNode::group([
                    "Employees wanted iPhones & Android phones (better apps, touchscreens).",
                    "Companies allowed it due to cost savings and higher employee satisfaction.",
                    "By 2012, 78% of companies supported BYOD.",
                ]),
                section_heading("2. Blackberry's mistake - Ignoring BYOD:"),
                ContentNode::group([
                    "Assumed enterprises would stick with BlackBerry for security.",
                    "Reality: Apple & Google rapidly improved mobile security and MDM.",
                    "Employees disliked carrying two phones (work BlackBerry + personal iPhone).",
                    "Outcome: rapid migration to iOS/Android, erosion of BlackBerry’s enterprise base.",
                ]),
            ],
        ),
        SlideSpec::Conclusion {
            title: "Final Takeaways".to_string(),
            points: vec![
                "BlackBerry’s fall was not due to one mistake, but a series of missed shifts.".to_string(),
                "Failure to adapt to consumer trends and app ecosystems proved fatal.".to_string(),
                "Lesson: In technology, adaptability and user experience matter as much as security and performance.".to_string(),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::content::flatten;

    #[test]
    fn test_builtin_deck_shape() {
        let slides = builtin_slides();
        assert_eq!(slides.len(), 10);
        assert!(matches!(slides[0], SlideSpec::Title { .. }));
        assert!(matches!(slides[9], SlideSpec::Conclusion { .. }));

        let with_pictures: Vec<&str> = slides
            .iter()
            .filter_map(|s| match s {
                SlideSpec::Bullets { title, pictures, .. } if !pictures.is_empty() => {
                    Some(title.as_str())
                },
                _ => None,
            })
            .collect();
        assert_eq!(
            with_pictures,
            vec!["Major three reasons for the failure", "BlackBerry Storm (“SurePress”)"]
        );
    }

    #[test]
    fn test_byod_slide_structure() {
        let slides = builtin_slides();
        let SlideSpec::Bullets { items, .. } = &slides[8] else {
            panic!("expected bullets slide");
        };
        let flat = flatten(items);
        let levels: Vec<u8> = flat.iter().map(|(level, _)| *level).collect();
        assert_eq!(levels, vec![0, 1, 1, 1, 0, 1, 1, 1, 1]);
        assert!(!flat[0].1.style.bullet);
        assert!(flat[0].1.style.bold);
        assert!(flat[1].1.style.bullet);
    }
}
