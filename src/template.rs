use std::borrow::Cow;

/// Rounded corner radius for a square of `size` pixels: 22.5% of the edge,
/// to the nearest pixel.
pub fn corner_radius(size: u32) -> u32 {
    (f64::from(size) * 0.225).round() as u32
}

/// Font size of the glyph for a square of `size` pixels: 65% of the edge,
/// truncated.
pub fn font_size(size: u32) -> u32 {
    (f64::from(size) * 0.65) as u32
}

/// The vector description rendered for every icon size: a filled rounded
/// square with a single centered glyph.
#[derive(Debug, Clone)]
pub struct SvgTemplate {
    glyph: Cow<'static, str>,
    font_family: Cow<'static, str>,
    font_weight: u16,
    background: Cow<'static, str>,
    foreground: Cow<'static, str>,
}

impl Default for SvgTemplate {
    fn default() -> Self {
        SvgTemplate {
            glyph: Cow::Borrowed("a"),
            font_family: Cow::Borrowed("SF Pro, Helvetica, Arial, sans-serif"),
            font_weight: 500,
            background: Cow::Borrowed("white"),
            foreground: Cow::Borrowed("black"),
        }
    }
}

impl SvgTemplate {
    /// Text drawn in the middle of the icon. Defaults to `a`.
    pub fn glyph(mut self, glyph: impl Into<Cow<'static, str>>) -> Self {
        self.glyph = glyph.into();
        self
    }

    pub fn font_family(mut self, family: impl Into<Cow<'static, str>>) -> Self {
        self.font_family = family.into();
        self
    }

    pub fn font_weight(mut self, weight: u16) -> Self {
        self.font_weight = weight;
        self
    }

    /// Fill of the rounded square, any SVG paint value.
    pub fn background(mut self, fill: impl Into<Cow<'static, str>>) -> Self {
        self.background = fill.into();
        self
    }

    /// Fill of the glyph, any SVG paint value.
    pub fn foreground(mut self, fill: impl Into<Cow<'static, str>>) -> Self {
        self.foreground = fill.into();
        self
    }

    /// Renders the SVG document for a `size` x `size` icon.
    pub fn render(&self, size: u32) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg width="{size}" height="{size}" xmlns="http://www.w3.org/2000/svg">
  <rect width="{size}" height="{size}" fill="{background}" rx="{radius}"/>
  <text x="50%" y="50%"
        font-family="{family}"
        font-size="{font_size}"
        font-weight="{weight}"
        fill="{foreground}"
        text-anchor="middle"
        dominant-baseline="central">{glyph}</text>
</svg>"#,
            background = escape(&self.background),
            radius = corner_radius(size),
            family = escape(&self.font_family),
            font_size = font_size(size),
            weight = self.font_weight,
            foreground = escape(&self.foreground),
            glyph = escape(&self.glyph),
        )
    }
}

fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_radius_and_font_with_size() {
        assert_eq!(corner_radius(16), 4);
        assert_eq!(font_size(16), 10);
        assert_eq!(corner_radius(32), 7);
        assert_eq!(font_size(32), 20);
        assert_eq!(corner_radius(128), 29);
        assert_eq!(font_size(128), 83);
        assert_eq!(corner_radius(1024), 230);
        assert_eq!(font_size(1024), 665);
    }

    #[test]
    fn renders_size_16() {
        let svg = SvgTemplate::default().render(16);

        assert!(svg.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(svg.contains(r#"<svg width="16" height="16""#));
        assert!(svg.contains(r#"<rect width="16" height="16" fill="white" rx="4"/>"#));
        assert!(svg.contains(r#"font-size="10""#));
        assert!(svg.contains(r#"font-weight="500""#));
        assert!(svg.contains(r#"dominant-baseline="central">a</text>"#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn escapes_markup_in_glyph() {
        let svg = SvgTemplate::default()
            .glyph("<&>")
            .background("#1e90ff")
            .render(64);

        assert!(svg.contains(">&lt;&amp;&gt;</text>"));
        assert!(svg.contains(r##"fill="#1e90ff""##));
    }
}
