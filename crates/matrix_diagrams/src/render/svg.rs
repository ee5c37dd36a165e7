//! SVG backend
//!
//! Emits one self-contained SVG document per scene. Sizes are in points and
//! the scene origin is moved to the document center with a group transform.

use std::fmt::Write as _;
use std::path::Path;

use super::backend::RenderBackend;
use super::commands::{DrawCommand, Stroke};
use super::{RenderError, RenderResult};
use crate::color::Color;
use crate::core::config::DiagramConfig;
use crate::scene::{HorizontalAlign, Scene};

/// Writes scenes as SVG documents
pub struct SvgBackend {
    background: Color,
    font_family: String,
    document: Option<String>,
}

impl SvgBackend {
    /// Create a backend with a background and font family
    pub fn new(background: Color, font_family: impl Into<String>) -> Self {
        Self {
            background,
            font_family: font_family.into(),
            document: None,
        }
    }

    /// Create a backend from configuration
    pub fn from_config(config: &DiagramConfig) -> Self {
        Self::new(config.canvas.background, config.font.family.clone())
    }

    /// The rendered document, if any
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    fn write_command(out: &mut String, command: &DrawCommand) -> std::fmt::Result {
        match command {
            DrawCommand::Rect { min, size, fill, stroke } => {
                write!(
                    out,
                    r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" {}"#,
                    min.x, min.y, size.x, size.y,
                    fill.map_or_else(|| "fill=\"none\"".to_string(), |c| paint("fill", c)),
                )?;
                if let Some(stroke) = stroke {
                    write!(out, " {}", stroke_attributes(stroke))?;
                }
                writeln!(out, "/>")
            }
            DrawCommand::Line { from, to, stroke } => writeln!(
                out,
                r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" {}/>"#,
                from.x, from.y, to.x, to.y,
                stroke_attributes(stroke),
            ),
            DrawCommand::Text { anchor, text, size, color, align } => {
                let text_anchor = match align {
                    HorizontalAlign::Left => "start",
                    HorizontalAlign::Center => "middle",
                    HorizontalAlign::Right => "end",
                };
                writeln!(
                    out,
                    r#"<text x="{:.2}" y="{:.2}" font-size="{:.2}" text-anchor="{}" dominant-baseline="central" {}>{}</text>"#,
                    anchor.x, anchor.y, size, text_anchor,
                    paint("fill", *color),
                    escape_xml(text),
                )
            }
        }
    }

    fn build_document(&self, scene: &Scene) -> Result<String, std::fmt::Error> {
        let mut out = String::new();
        let (w, h) = (scene.width, scene.height);

        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.2}pt" height="{h:.2}pt" viewBox="0 0 {w:.2} {h:.2}">"#,
        )?;
        writeln!(out, r#"<rect width="100%" height="100%" {}/>"#, paint("fill", self.background))?;
        writeln!(
            out,
            r#"<g transform="translate({:.2} {:.2})" font-family="{}">"#,
            w / 2.0,
            h / 2.0,
            escape_xml(&self.font_family),
        )?;

        for command in &scene.draw_list() {
            Self::write_command(&mut out, command)?;
        }

        writeln!(out, "</g>")?;
        writeln!(out, "</svg>")?;
        Ok(out)
    }
}

impl RenderBackend for SvgBackend {
    fn render(&mut self, scene: &Scene) -> RenderResult<()> {
        if !(scene.width > 0.0 && scene.height > 0.0) {
            return Err(RenderError::InvalidCanvas {
                width: scene.width,
                height: scene.height,
            });
        }

        let document = self
            .build_document(scene)
            .map_err(|e| RenderError::Io(std::io::Error::other(e)))?;
        self.document = Some(document);
        Ok(())
    }

    fn save(&self, path: &Path) -> RenderResult<()> {
        let document = self.document.as_ref().ok_or(RenderError::NotRendered)?;
        std::fs::write(path, document)?;
        Ok(())
    }
}

/// `name="#rrggbb"` plus an opacity attribute when not opaque
fn paint(name: &str, color: Color) -> String {
    if color.a >= 1.0 {
        format!(r#"{name}="{}""#, color.to_hex())
    } else {
        format!(r#"{name}="{}" {name}-opacity="{:.3}""#, color.to_hex(), color.a)
    }
}

fn stroke_attributes(stroke: &Stroke) -> String {
    format!(r#"{} stroke-width="{:.2}""#, paint("stroke", stroke.color), stroke.width)
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;
    use crate::scene::{place_right_of, Positioned};
    use crate::widgets::{OperatorGlyph, TextLabel};

    fn render(scene: &Scene) -> String {
        let mut backend = SvgBackend::new(Color::WHITE, "sans-serif");
        backend.render(scene).unwrap();
        backend.document().unwrap().to_string()
    }

    #[test]
    fn test_document_frame() {
        let scene = Scene::new(120.0, 40.0);
        let svg = render(&scene);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 120.00 40.00""#));
        assert!(svg.contains("translate(60.00 20.00)"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut scene = Scene::new(100.0, 40.0);
        scene.add(Positioned::at_origin(TextLabel::new("a < b & c", 12.0)));
        let svg = render(&scene);
        assert!(svg.contains("a &lt; b &amp; c"));
        assert!(svg.contains(r#"text-anchor="middle""#));
    }

    #[test]
    fn test_commands_in_paint_order() {
        let mut scene = Scene::new(100.0, 40.0);
        let first = Positioned::new(TextLabel::new("first", 10.0), Vec2::new(-20.0, 0.0));
        let second = place_right_of(&first, OperatorGlyph::new("=", 10.0), 4.0);
        scene.add(first).add(second);
        let svg = render(&scene);
        let a = svg.find("first").unwrap();
        let b = svg.find(">=<").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_translucent_fill_has_opacity() {
        assert_eq!(paint("fill", Color::BLACK), r##"fill="#000000""##);
        assert_eq!(
            paint("fill", Color::BLACK.with_alpha(0.25)),
            r##"fill="#000000" fill-opacity="0.250""##
        );
    }

    #[test]
    fn test_zero_sized_scene_is_rejected() {
        let mut backend = SvgBackend::new(Color::WHITE, "serif");
        let result = backend.render(&Scene::new(0.0, 0.0));
        assert!(matches!(result, Err(RenderError::InvalidCanvas { .. })));
    }
}
