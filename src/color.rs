use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// An 8-bit sRGB triple, shared by the web and native frontends.
pub type Rgb = [u8; 3];

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            [
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            ]
        })
        .collect()
}

/// `#rrggbb`, the form the chart specification carries.
pub fn to_hex([r, g, b]: Rgb) -> String {
    format!("#{:x}", Srgb::new(r, g, b))
}

/// Parse a chart colour: `#rrggbb` (or `#rgb`) or an SVG/CSS colour name.
pub fn parse_color(color: &str) -> Option<Rgb> {
    let rgb: Srgb<u8> = if color.starts_with('#') {
        color.parse().ok()?
    } else {
        palette::named::from_str(color)?
    };
    let (r, g, b) = rgb.into_components();
    Some([r, g, b])
}

// ---------------------------------------------------------------------------
// Color mapping: category label → colour
// ---------------------------------------------------------------------------

/// Maps category labels (booster version categories) to distinct colours.
///
/// Built once from the full table so a category keeps its colour no matter
/// which subset a chart shows.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: Vec<(String, Rgb)>,
    default_color: Rgb,
}

impl ColorMap {
    /// Build a colour map from labels in display order.
    pub fn new(labels: &[String]) -> Self {
        let mapping = labels
            .iter()
            .cloned()
            .zip(generate_palette(labels.len()))
            .collect();

        ColorMap {
            mapping,
            default_color: [128, 128, 128],
        }
    }

    /// Look up the colour for a label.
    pub fn color_for(&self, label: &str) -> Rgb {
        self.mapping
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, c)| *c)
            .unwrap_or(self.default_color)
    }
}
