use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Fallback colour for categories outside the map.
pub const DEFAULT_COLOR: Srgb<u8> = Srgb::new(128, 128, 128);

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Srgb<u8>> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            rgb.into_format::<u8>()
        })
        .collect()
}

/// `#RRGGBB` form used in the chart output.
pub fn to_hex(color: Srgb<u8>) -> String {
    format!("#{:02X}{:02X}{:02X}", color.red, color.green, color.blue)
}

/// Parse `#RRGGBB` (or `RRGGBB`, or the 3-digit short form).
pub fn parse_hex(text: &str) -> Option<Srgb<u8>> {
    text.trim().parse::<Srgb<u8>>().ok()
}

// ---------------------------------------------------------------------------
// Color mapping: category → colour
// ---------------------------------------------------------------------------

/// Ordinal colour scale over a fixed, ordered set of categories.
///
/// Categories take the scheme's colours in order and wrap around when there
/// are more categories than colours. An empty scheme falls back to
/// [`generate_palette`].
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: Vec<(String, Srgb<u8>)>,
    default_color: Srgb<u8>,
}

impl ColorMap {
    /// Build a colour map for `categories` from `scheme`.
    pub fn new(categories: &[String], scheme: &[Srgb<u8>]) -> Self {
        let colors = if scheme.is_empty() {
            generate_palette(categories.len())
        } else {
            scheme.to_vec()
        };

        let mapping = categories
            .iter()
            .zip(colors.iter().cycle())
            .map(|(c, color)| (c.clone(), *color))
            .collect();

        ColorMap {
            mapping,
            default_color: DEFAULT_COLOR,
        }
    }

    /// Look up the colour for a category.
    pub fn color_for(&self, category: &str) -> Srgb<u8> {
        self.mapping
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, color)| *color)
            .unwrap_or(self.default_color)
    }

    /// Return the legend entries (category → hex colour) in category order.
    pub fn legend_entries(&self) -> Vec<(String, String)> {
        self.mapping
            .iter()
            .map(|(c, color)| (c.clone(), to_hex(*color)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn categories(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn scheme() -> Vec<Srgb<u8>> {
        ["#FF6347", "#4682B4", "#32CD32"]
            .iter()
            .filter_map(|s| parse_hex(s))
            .collect()
    }

    #[test]
    fn hex_round_trip() {
        let tomato = parse_hex("#FF6347").unwrap();
        assert_eq!(tomato, Srgb::new(255, 99, 71));
        assert_eq!(to_hex(tomato), "#FF6347");
        assert_eq!(parse_hex("not a colour"), None);
    }

    #[test]
    fn categories_take_scheme_in_order() {
        let map = ColorMap::new(&categories(&["setosa", "versicolor", "virginica"]), &scheme());

        assert_eq!(to_hex(map.color_for("setosa")), "#FF6347");
        assert_eq!(to_hex(map.color_for("virginica")), "#32CD32");
        assert_eq!(map.color_for("unknown"), DEFAULT_COLOR);
        assert_eq!(
            map.legend_entries(),
            vec![
                ("setosa".to_string(), "#FF6347".to_string()),
                ("versicolor".to_string(), "#4682B4".to_string()),
                ("virginica".to_string(), "#32CD32".to_string()),
            ]
        );
    }

    #[test]
    fn scheme_wraps_around() {
        let map = ColorMap::new(&categories(&["a", "b", "c", "d"]), &scheme());
        assert_eq!(map.color_for("d"), map.color_for("a"));
    }

    #[test]
    fn empty_scheme_generates_distinct_hues() {
        let map = ColorMap::new(&categories(&["a", "b", "c"]), &[]);
        let a = map.color_for("a");
        let b = map.color_for("b");
        let c = map.color_for("c");
        assert!(a != b && b != c && a != c);
        assert_eq!(generate_palette(0), Vec::new());
    }
}
