//! Carousel slide layout and self-contained HTML rendering.

use std::fmt::Write as _;

use crate::application::markup::escape_html;
use crate::domain::carousel::{Platform, Slide, SlideKind, Tip};
use crate::domain::Post;
use crate::port::outbound::photo::StockPhoto;

/// Visual settings shared by every slide.
#[derive(Debug, Clone)]
pub struct SlideStyle {
    pub site_name: String,
    pub accent_color: String,
    pub cta_text: String,
}

/// Cover, one slide per tip (capped at the platform budget), then the
/// call-to-action slide.
#[must_use]
pub fn build(
    platform: Platform,
    post: &Post,
    tips: &[Tip],
    photo: Option<&StockPhoto>,
    style: &SlideStyle,
    link: &str,
) -> Vec<Slide> {
    let background = photo.map(|p| p.url.clone());
    let tips = &tips[..tips.len().min(platform.tip_budget())];
    let mut slides = Vec::with_capacity(tips.len() + 2);

    slides.push(Slide {
        index: 0,
        kind: SlideKind::Cover,
        heading: post.title.clone(),
        body: format!("{} tips inside. Swipe →", tips.len()),
        background: background.clone(),
    });

    for (i, tip) in tips.iter().enumerate() {
        slides.push(Slide {
            index: i + 1,
            kind: SlideKind::Tip,
            heading: format!("{}. {}", i + 1, tip.heading),
            body: tip.text.clone(),
            background: None,
        });
    }

    let cta_body = match platform {
        Platform::Instagram => format!("Link in bio · {}", display_url(link)),
        Platform::Pinterest => display_url(link),
    };
    slides.push(Slide {
        index: tips.len() + 1,
        kind: SlideKind::CallToAction,
        heading: style.cta_text.clone(),
        body: cta_body,
        background,
    });

    slides
}

/// URL without its scheme, for display on a slide.
fn display_url(link: &str) -> String {
    link.trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/')
        .to_string()
}

/// Quote a CSS color; only simple hex, rgb() and named colors survive.
fn css_color(color: &str) -> &str {
    let ok = color
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '#' | '(' | ')' | ',' | '.' | ' ' | '%'));
    if ok && !color.is_empty() {
        color
    } else {
        "#0e7490"
    }
}

/// Render one slide as a standalone HTML document at `width`x`height`.
#[must_use]
pub fn render_html(
    slide: &Slide,
    total: usize,
    width: u32,
    height: u32,
    style: &SlideStyle,
    credit: Option<&str>,
) -> String {
    let accent = css_color(&style.accent_color);
    let background = match &slide.background {
        Some(url) => format!(
            "background: linear-gradient(rgba(0,0,0,.45), rgba(0,0,0,.65)), url(\"{}\") center / cover no-repeat;",
            escape_html(url)
        ),
        None if slide.kind == SlideKind::Tip => "background: #f8fafc;".to_string(),
        None => format!("background: {accent};"),
    };
    let (text_color, heading_size) = match slide.kind {
        SlideKind::Tip if slide.background.is_none() => ("#0f172a", 64),
        SlideKind::Cover => ("#ffffff", 84),
        _ => ("#ffffff", 64),
    };

    let mut html = String::with_capacity(2048);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape_html(&slide.heading));
    html.push_str("<style>\n");
    html.push_str("* { margin: 0; padding: 0; box-sizing: border-box; }\n");
    let _ = writeln!(
        html,
        "body {{ width: {width}px; height: {height}px; overflow: hidden; {background} color: {text_color}; \
         font-family: 'Helvetica Neue', Arial, sans-serif; display: flex; flex-direction: column; \
         justify-content: center; padding: 96px; }}"
    );
    let _ = writeln!(html, "h1 {{ font-size: {heading_size}px; line-height: 1.1; margin-bottom: 40px; }}");
    html.push_str("p { font-size: 40px; line-height: 1.4; }\n");
    let _ = writeln!(
        html,
        ".brand {{ position: absolute; top: 56px; left: 96px; font-size: 28px; font-weight: 700; \
         letter-spacing: 2px; text-transform: uppercase; color: {accent}; }}"
    );
    html.push_str(".page { position: absolute; bottom: 56px; right: 96px; font-size: 28px; opacity: .8; }\n");
    html.push_str(".credit { position: absolute; bottom: 56px; left: 96px; font-size: 20px; opacity: .7; }\n");
    html.push_str("</style>\n</head>\n<body>\n");

    let _ = writeln!(html, "<div class=\"brand\">{}</div>", escape_html(&style.site_name));
    let _ = writeln!(html, "<h1>{}</h1>", escape_html(&slide.heading));
    let _ = writeln!(html, "<p>{}</p>", escape_html(&slide.body));
    let _ = writeln!(html, "<div class=\"page\">{}/{}</div>", slide.index + 1, total);
    if let (Some(credit), Some(_)) = (credit, &slide.background) {
        let _ = writeln!(html, "<div class=\"credit\">{}</div>", escape_html(credit));
    }
    html.push_str("</body>\n</html>\n");
    html
}
