use palette::Srgb;

use crate::color::ColorMap;
use crate::config::{ChartConfig, ConfigError};
use crate::data::coerce::coerce_fields;
use crate::data::filter::plottable_indices;
use crate::data::model::{DataError, Dataset};
use crate::stats::{Summary, summarize};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Everything derived from one loaded dataset, independent of output format.
pub struct AppState {
    pub config: ChartConfig,
    color_scheme: Vec<Srgb<u8>>,

    /// Coerced dataset (None until one is set).
    pub dataset: Option<Dataset>,

    /// Category values in first-seen order.
    pub categories: Vec<String>,

    /// Rows whose scatter x and y are finite numbers.
    pub visible_indices: Vec<usize>,

    /// Box-plot summary per category, in category order.
    pub summaries: Vec<(String, Option<Summary>)>,

    /// Colours for the categories.
    pub color_map: Option<ColorMap>,
}

impl AppState {
    pub fn new(config: ChartConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let color_scheme = config.color_scheme()?;
        Ok(Self {
            config,
            color_scheme,
            dataset: None,
            categories: Vec::new(),
            visible_indices: Vec::new(),
            summaries: Vec::new(),
            color_map: None,
        })
    }

    /// Ingest a newly loaded dataset: coerce, partition, summarise, colour.
    ///
    /// Every derived field is rebuilt from `raw`; nothing from a previous
    /// dataset survives. On error the current state is left as it was.
    pub fn set_dataset(&mut self, raw: Dataset) -> Result<(), DataError> {
        let columns = &self.config.columns;
        for column in [&columns.x, &columns.y, &columns.value, &columns.category] {
            raw.require_column(column)?;
        }

        let dataset = coerce_fields(
            &raw,
            &[columns.x.as_str(), columns.y.as_str(), columns.value.as_str()],
        );

        let visible_indices =
            plottable_indices(&dataset, &[columns.x.as_str(), columns.y.as_str()])?;
        let skipped = dataset.len() - visible_indices.len();
        if skipped > 0 {
            log::warn!(
                "{skipped} of {} rows have a non-numeric '{}' or '{}' and are left off the scatter plot",
                dataset.len(),
                columns.x,
                columns.y
            );
        }

        let groups = dataset.group_by(&columns.category)?;
        let categories: Vec<String> = groups.keys().map(str::to_string).collect();
        let summaries = summarize(&dataset, &groups, &columns.value)?;
        for (category, summary) in &summaries {
            if summary.is_none() {
                log::warn!("no numeric '{}' values for category '{category}'", columns.value);
            }
        }

        let color_map = ColorMap::new(&categories, &self.color_scheme);

        log::info!(
            "dataset ready: {} rows, {} plottable, categories {:?}",
            dataset.len(),
            visible_indices.len(),
            categories
        );

        self.categories = categories;
        self.visible_indices = visible_indices;
        self.summaries = summaries;
        self.color_map = Some(color_map);
        self.dataset = Some(dataset);
        Ok(())
    }

    /// Summary for one category, if the category exists and had data.
    pub fn summary_for(&self, category: &str) -> Option<&Summary> {
        self.summaries
            .iter()
            .find(|(c, _)| c == category)
            .and_then(|(_, s)| s.as_ref())
    }
}
