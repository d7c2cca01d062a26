//! Page template descriptors
//!
//! A descriptor is everything that used to differ between the hand-copied
//! page shells: title, which slots appear and in what order, which suffix the
//! target chart uses, the grid width and the footer.

use std::collections::HashSet;
use std::path::PathBuf;

use super::error::TemplateError;
use super::location::{FragmentSlot, LocationKey, SuffixTable};
use crate::config::PageConfig;

/// Placeholder substituted with the location's display name
pub const LOCATION_PLACEHOLDER: &str = "{location}";

const DEFAULT_TITLE: &str = "SARS-CoV-2: {location}";

/// Source attribution shown under every built-in page
pub const DEFAULT_FOOTER: &str = concat!(
    "Data from the <a href=\"https://github.com/CSSEGISandData/COVID-19\">JHU CSSE COVID-19 Dataset</a> ",
    "and the <a href=\"https://www.census.gov/data/datasets/time-series/demo/popest/2010s-counties-total.html\">US Census Bureau</a>.<br />\n",
    "Source code and data available from <a href=\"https://github.com/richwiss/covid\">github</a>. ",
    "Pull requests and comments welcome.<br />\n",
    "Created by <a href=\"https://twitter.com/richwiss/\">@richwiss</a>"
);

/// Route path with trailing slashes removed; `/state/` and `/state` name the
/// same page. Applied to configured paths and to request paths alike.
pub fn normalize_route_path(path: &str) -> &str {
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

#[derive(Debug, Clone)]
pub struct PageTemplateDescriptor {
    pub name: String,
    /// Request path the page is served on
    pub path: String,
    /// Literal title, or a pattern containing `{location}`
    pub title: String,
    pub slots: Vec<FragmentSlot>,
    pub suffixes: SuffixTable,
    /// Its modification time is the page's freshness timestamp
    pub data_source: PathBuf,
    /// Trusted HTML, rendered verbatim
    pub footer: String,
    pub columns: usize,
}

impl PageTemplateDescriptor {
    pub fn title_for(&self, key: &LocationKey) -> String {
        self.title
            .replace(LOCATION_PLACEHOLDER, &key.display_name())
    }

    /// County page: the original 2x2 grid
    pub fn county(data_source: PathBuf) -> Self {
        Self {
            name: "county".to_string(),
            path: "/".to_string(),
            title: DEFAULT_TITLE.to_string(),
            slots: vec![
                FragmentSlot::NewCases,
                FragmentSlot::Target,
                FragmentSlot::Trend,
                FragmentSlot::PosNeg,
            ],
            suffixes: SuffixTable::default(),
            data_source,
            footer: DEFAULT_FOOTER.to_string(),
            columns: 2,
        }
    }

    /// State page: one row, per-capita chart in the target slot
    pub fn state(data_source: PathBuf) -> Self {
        Self {
            name: "state".to_string(),
            path: "/state".to_string(),
            title: DEFAULT_TITLE.to_string(),
            slots: vec![
                FragmentSlot::NewCases,
                FragmentSlot::Trend,
                FragmentSlot::Target,
            ],
            suffixes: SuffixTable::per_capita(),
            data_source,
            footer: DEFAULT_FOOTER.to_string(),
            columns: 3,
        }
    }

    /// Per-state summary table page
    pub fn table(data_source: PathBuf) -> Self {
        Self {
            name: "table".to_string(),
            path: "/table".to_string(),
            title: "Covid-19 Graphs for {location}".to_string(),
            slots: vec![FragmentSlot::Table],
            suffixes: SuffixTable::default(),
            data_source,
            footer: DEFAULT_FOOTER.to_string(),
            columns: 1,
        }
    }

    pub fn builtin(data_source: &std::path::Path) -> Vec<Self> {
        vec![
            Self::county(data_source.to_path_buf()),
            Self::state(data_source.to_path_buf()),
            Self::table(data_source.to_path_buf()),
        ]
    }

    /// Build a descriptor from a `[[dashboard.pages]]` entry. Unset fields
    /// inherit the dashboard-wide data source and the default footer.
    pub fn from_config(page: &PageConfig, data_source: &std::path::Path) -> Result<Self, TemplateError> {
        let mut slots = Vec::with_capacity(page.slots.len());
        for raw in &page.slots {
            let slot: FragmentSlot = raw.parse().map_err(|slot| TemplateError::UnknownSlot {
                page: page.name.clone(),
                slot,
            })?;
            if slots.contains(&slot) {
                return Err(TemplateError::DuplicateSlot {
                    page: page.name.clone(),
                    slot: slot.as_str(),
                });
            }
            slots.push(slot);
        }

        let descriptor = Self {
            name: page.name.clone(),
            path: normalize_route_path(&page.path).to_string(),
            title: page.title.clone(),
            slots,
            suffixes: page.suffixes.clone(),
            data_source: page
                .data_source
                .as_ref()
                .map_or_else(|| data_source.to_path_buf(), PathBuf::from),
            footer: page
                .footer
                .clone()
                .unwrap_or_else(|| DEFAULT_FOOTER.to_string()),
            columns: page.columns,
        };
        descriptor.validate()?;
        Ok(descriptor)
    }

    pub fn validate(&self) -> Result<(), TemplateError> {
        if !self.path.starts_with('/') {
            return Err(TemplateError::InvalidPath {
                page: self.name.clone(),
                path: self.path.clone(),
            });
        }
        if self.slots.is_empty() {
            return Err(TemplateError::NoSlots {
                page: self.name.clone(),
            });
        }
        if self.columns == 0 {
            return Err(TemplateError::ZeroColumns {
                page: self.name.clone(),
            });
        }
        self.suffixes.validate(&self.name, &self.slots)
    }
}

/// Templates from config, or the built-in set when none are configured
pub fn load_templates(
    pages: &[PageConfig],
    data_source: &std::path::Path,
) -> Result<Vec<PageTemplateDescriptor>, TemplateError> {
    let templates = if pages.is_empty() {
        PageTemplateDescriptor::builtin(data_source)
    } else {
        pages
            .iter()
            .map(|page| PageTemplateDescriptor::from_config(page, data_source))
            .collect::<Result<Vec<_>, _>>()?
    };

    let mut paths = HashSet::new();
    for template in &templates {
        if !paths.insert(template.path.as_str()) {
            return Err(TemplateError::DuplicatePath {
                path: template.path.clone(),
            });
        }
    }
    Ok(templates)
}
