use std::path::Path;

use anyhow::Context;
use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::color::parse_hex;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "IRIS_PLOTS_CONFIG";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("chart area is {width}x{height} after margins; both must be positive")]
    EmptyChartArea { width: f64, height: f64 },

    #[error("band padding {0} is outside [0, 1]")]
    BandPadding(f64),

    #[error("'{0}' is not a #RRGGBB colour")]
    InvalidColor(String),
}

// ---------------------------------------------------------------------------
// Config types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Margin {
            top: 20.0,
            right: 30.0,
            bottom: 40.0,
            left: 50.0,
        }
    }
}

/// Which dataset columns feed the charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Columns {
    /// Scatter x axis.
    pub x: String,
    /// Scatter y axis.
    pub y: String,
    /// Box-plot observations.
    pub value: String,
    /// Group key for colours and boxes.
    pub category: String,
}

impl Default for Columns {
    fn default() -> Self {
        Columns {
            x: "petalLength".into(),
            y: "petalWidth".into(),
            value: "petalLength".into(),
            category: "species".into(),
        }
    }
}

/// Chart geometry and data selection shared by both charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Outer SVG width, margins included.
    pub width: f64,
    /// Outer SVG height, margins included.
    pub height: f64,
    pub margin: Margin,
    pub columns: Columns,
    pub x_label: String,
    pub y_label: String,
    /// Box-plot y axis label.
    pub value_label: String,
    /// Added on both sides of the scatter data extent.
    pub domain_padding: f64,
    /// Band padding for the box-plot categories.
    pub band_padding: f64,
    pub point_radius: f64,
    /// Colour scheme for categories, `#RRGGBB`. Empty generates hues.
    pub colors: Vec<String>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            width: 800.0,
            height: 600.0,
            margin: Margin::default(),
            columns: Columns::default(),
            x_label: "Petal Length".into(),
            y_label: "Petal Width".into(),
            value_label: "Petal Length".into(),
            domain_padding: 0.5,
            band_padding: 0.2,
            point_radius: 5.0,
            colors: vec!["#FF6347".into(), "#4682B4".into(), "#32CD32".into()],
        }
    }
}

impl ChartConfig {
    /// Drawable width inside the margins.
    pub fn inner_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    /// Drawable height inside the margins.
    pub fn inner_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.inner_width(), self.inner_height());
        if !(width > 0.0 && height > 0.0) {
            return Err(ConfigError::EmptyChartArea { width, height });
        }
        if !(0.0..=1.0).contains(&self.band_padding) {
            return Err(ConfigError::BandPadding(self.band_padding));
        }
        self.color_scheme().map(|_| ())
    }

    /// Parsed colour scheme.
    pub fn color_scheme(&self) -> Result<Vec<Srgb<u8>>, ConfigError> {
        self.colors
            .iter()
            .map(|c| parse_hex(c).ok_or_else(|| ConfigError::InvalidColor(c.clone())))
            .collect()
    }

    /// Read a config from a JSON file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: ChartConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the file named by [`CONFIG_ENV`], or fall back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                log::info!("using chart config {}", path.to_string_lossy());
                Self::from_file(Path::new(&path))
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn defaults_give_720_by_540_chart_area() {
        let config = ChartConfig::default();
        assert_eq!(config.inner_width(), 720.0);
        assert_eq!(config.inner_height(), 540.0);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config: ChartConfig = serde_json::from_str(
            r#"{ "width": 460, "height": 400,
                 "margin": { "top": 10, "right": 30, "bottom": 30, "left": 60 },
                 "columns": { "category": "Species" } }"#,
        )
        .unwrap();

        assert_eq!(config.inner_width(), 370.0);
        assert_eq!(config.inner_height(), 360.0);
        assert_eq!(config.columns.category, "Species");
        assert_eq!(config.columns.x, "petalLength");
        assert_eq!(config.band_padding, 0.2);
    }

    #[test]
    fn rejects_margins_wider_than_chart() {
        let config = ChartConfig {
            width: 60.0,
            ..ChartConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyChartArea {
                width: -20.0,
                height: 540.0
            })
        );
    }

    #[test]
    fn rejects_bad_padding_and_colours() {
        let padded = ChartConfig {
            band_padding: 1.5,
            ..ChartConfig::default()
        };
        assert_eq!(padded.validate(), Err(ConfigError::BandPadding(1.5)));

        let coloured = ChartConfig {
            colors: vec!["#FF6347".into(), "tomato-ish".into()],
            ..ChartConfig::default()
        };
        assert_eq!(
            coloured.validate(),
            Err(ConfigError::InvalidColor("tomato-ish".into()))
        );
    }

    #[test]
    fn from_file_validates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "band_padding": -0.1 }}"#).unwrap();

        let err = ChartConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("band padding"));
    }
}
