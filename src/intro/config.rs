//! Intro configuration: copy, colors, chart data, timings and asset paths.
//!
//! Every field has a default, so `{}` is a valid config file that reproduces the stock
//! sequences. Asset paths are relative to the directory of the config file.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::assets::store::AssetStore;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{ReelError, ReelResult};
use crate::style::color::Color;

/// Which sequence to build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Brand reveal on a lifted card, then the value proposition.
    #[default]
    CardIntro,
    /// Card-less brand reveal, value proposition, final CTA and a gold-price histogram.
    ProductTour,
    /// Standalone gold price bar chart.
    GoldChart,
    /// Gold price chart with a sweep marker, followed by a logo outro.
    ChartOutro,
}

impl Variant {
    /// All variants, in listing order.
    pub const ALL: [Variant; 4] = [
        Variant::CardIntro,
        Variant::ProductTour,
        Variant::GoldChart,
        Variant::ChartOutro,
    ];

    /// Kebab-case name used on the command line and in config files.
    pub fn name(self) -> &'static str {
        match self {
            Self::CardIntro => "card-intro",
            Self::ProductTour => "product-tour",
            Self::GoldChart => "gold-chart",
            Self::ChartOutro => "chart-outro",
        }
    }

    /// One-line description.
    pub fn summary(self) -> &'static str {
        match self {
            Self::CardIntro => "brand reveal on a card, fade, value proposition sliding out",
            Self::ProductTour => "brand reveal, value proposition, final CTA and histogram",
            Self::GoldChart => "staggered gold price bars with value labels and callout",
            Self::ChartOutro => "gold price chart with sweep marker, then logo outro",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = ReelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|v| v.name() == norm)
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|v| v.name()).collect();
                ReelError::validation(format!(
                    "unknown variant '{s}' (expected one of: {})",
                    known.join(", ")
                ))
            })
    }
}

/// Colors of the brand scenes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Canvas background.
    pub background: Color,
    /// Card fill.
    pub card: Color,
    /// Primary text.
    pub text: Color,
    /// Secondary text.
    pub muted: Color,
    /// Accent for underlines, chip dots and the CTA.
    pub accent: Color,
    /// Histogram bars.
    pub gold: Color,
    /// Glow under the highlighted histogram bar.
    pub gold_soft: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::rgb(0x0B, 0x10, 0x20),
            card: Color::rgba(255, 255, 255, 0.08),
            text: Color::rgb(0xF4, 0xF7, 0xFF),
            muted: Color::rgba(244, 247, 255, 0.72),
            accent: Color::rgb(0x6E, 0xE7, 0xFF),
            gold: Color::rgb(0xF5, 0xC5, 0x42),
            gold_soft: Color::rgba(245, 197, 66, 0.25),
        }
    }
}

/// Colors of the standalone gold chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoldPalette {
    /// Canvas background.
    pub background: Color,
    /// Title and value labels.
    pub text: Color,
    /// Unit line.
    pub muted: Color,
    /// Inner grid lines.
    pub grid: Color,
    /// Outer grid lines and baseline.
    pub grid_strong: Color,
    /// Bar gradient top.
    pub gold_a: Color,
    /// Bar gradient bottom.
    pub gold_b: Color,
}

impl Default for GoldPalette {
    fn default() -> Self {
        Self {
            background: Color::rgb(0x07, 0x0A, 0x12),
            text: Color::rgba(245, 247, 255, 0.92),
            muted: Color::rgba(245, 247, 255, 0.65),
            grid: Color::rgba(245, 247, 255, 0.10),
            grid_strong: Color::rgba(245, 247, 255, 0.16),
            gold_a: Color::rgb(0xFF, 0xD3, 0x6A),
            gold_b: Color::rgb(0xFF, 0xB2, 0x00),
        }
    }
}

/// Colors of the chart with outro.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutroPalette {
    /// Canvas background, also used for labels drawn inside bars.
    pub background: Color,
    /// Title, outro name and labels above bars.
    pub text: Color,
    /// Unit line, axis labels, month labels and tagline.
    pub muted: Color,
    /// Axis and grid lines.
    pub axis: Color,
    /// Bars and the sweep marker.
    pub bar: Color,
}

impl Default for OutroPalette {
    fn default() -> Self {
        Self {
            background: Color::rgb(0x0B, 0x0F, 0x1A),
            text: Color::rgb(0xF8, 0xFA, 0xFC),
            muted: Color::rgb(0x94, 0xA3, 0xB8),
            axis: Color::rgb(0x24, 0x30, 0x47),
            bar: Color::rgb(0xD4, 0xAF, 0x37),
        }
    }
}

/// Marketing copy of the brand scenes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandCopy {
    /// Product name, also the monogram source when no logo is configured.
    pub app_name: String,
    /// Line under the name.
    pub tagline: String,
    /// Value proposition headline.
    pub value_line: String,
    /// Feature chips, staggered left to right.
    pub chips: Vec<String>,
    /// Button label of the value proposition scene.
    pub cta: String,
    /// Headline of the final CTA scene.
    pub final_cta: String,
    /// Subline of the final CTA scene.
    pub final_subline: String,
    /// Button label of the final CTA scene.
    pub final_button: String,
}

impl Default for BrandCopy {
    fn default() -> Self {
        Self {
            app_name: "iAccountant".to_owned(),
            tagline: "Invoices. Expenses. Reports. Done.".to_owned(),
            value_line: "Your clean, fast accounting companion.".to_owned(),
            chips: vec![
                "Smart invoices".to_owned(),
                "Expense tracking".to_owned(),
                "Instant reports".to_owned(),
            ],
            cta: "Get started".to_owned(),
            final_cta: "Try it now!".to_owned(),
            final_subline: "Start in minutes. Stay on top of your numbers.".to_owned(),
            final_button: "Open iAccountant".to_owned(),
        }
    }
}

/// One bar of a chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Category label, e.g. a month.
    pub label: String,
    /// Bar value.
    pub value: f64,
}

/// Chart title and data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartData {
    /// Headline.
    pub title: String,
    /// Unit line under the headline.
    pub unit: String,
    /// Footer note of the histogram scene.
    pub footnote: String,
    /// Bars, left to right.
    pub points: Vec<ChartPoint>,
}

impl Default for ChartData {
    fn default() -> Self {
        const GOLD_2024: [(&str, f64); 12] = [
            ("Jan", 2039.0),
            ("Feb", 2024.0),
            ("Mar", 2160.0),
            ("Apr", 2330.0),
            ("May", 2327.0),
            ("Jun", 2339.0),
            ("Jul", 2426.0),
            ("Aug", 2503.0),
            ("Sep", 2634.0),
            ("Oct", 2735.0),
            ("Nov", 2672.0),
            ("Dec", 2650.0),
        ];
        Self {
            title: "Gold Price 2024".to_owned(),
            unit: "USD per troy ounce".to_owned(),
            footnote: "2024 monthly close (approx.)".to_owned(),
            points: GOLD_2024
                .iter()
                .map(|&(label, value)| ChartPoint {
                    label: label.to_owned(),
                    value,
                })
                .collect(),
        }
    }
}

impl ChartData {
    /// Smallest and largest value; `(0, 0)` for an empty chart.
    pub fn bounds(&self) -> (f64, f64) {
        let mut it = self.points.iter().map(|p| p.value);
        let Some(first) = it.next() else {
            return (0.0, 0.0);
        };
        it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)))
    }

    /// Index of the first largest value.
    pub fn max_index(&self) -> Option<usize> {
        let (_, hi) = self.bounds();
        self.points.iter().position(|p| p.value == hi)
    }
}

/// Name and tagline shown by the chart outro.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutroCopy {
    /// Product name.
    pub name: String,
    /// Line under the name.
    pub tagline: String,
}

impl Default for OutroCopy {
    fn default() -> Self {
        Self {
            name: "iObserver".to_owned(),
            tagline: "we track everything".to_owned(),
        }
    }
}

/// Scene and transition lengths in frames.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Brand reveal.
    pub brand: u64,
    /// Value proposition.
    pub value_prop: u64,
    /// Final CTA.
    pub final_cta: u64,
    /// Histogram.
    pub histogram: u64,
    /// Each crossfade between scenes.
    pub fade: u64,
    /// Slide-out at the end of the value proposition.
    pub slide_out: u64,
    /// Standalone gold chart.
    pub gold_chart: u64,
    /// Chart with outro, outro included.
    pub chart_outro: u64,
    /// Outro part of the chart with outro.
    pub outro: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            brand: 95,
            value_prop: 95,
            final_cta: 80,
            histogram: 150,
            fade: 16,
            slide_out: 20,
            gold_chart: 150,
            chart_outro: 210,
            outro: 40,
        }
    }
}

/// Full configuration of an intro render.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroConfig {
    /// Sequence to build.
    pub variant: Variant,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Frames per second.
    pub fps: u32,
    /// Brand scene colors.
    pub palette: Palette,
    /// Standalone gold chart colors.
    pub gold_palette: GoldPalette,
    /// Chart with outro colors.
    pub outro_palette: OutroPalette,
    /// Brand scene copy.
    pub copy: BrandCopy,
    /// Chart title and data.
    pub chart: ChartData,
    /// Chart outro copy.
    pub outro: OutroCopy,
    /// Scene lengths.
    pub timings: Timings,
    /// Logo image (PNG, JPEG or SVG). A monogram of the app name is drawn when unset.
    pub logo: Option<PathBuf>,
    /// Font file for all text. The system sans-serif face is used when unset.
    pub font: Option<PathBuf>,
    /// Directory asset paths are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            width: 1920,
            height: 1080,
            fps: 30,
            palette: Palette::default(),
            gold_palette: GoldPalette::default(),
            outro_palette: OutroPalette::default(),
            copy: BrandCopy::default(),
            chart: ChartData::default(),
            outro: OutroCopy::default(),
            timings: Timings::default(),
            logo: None,
            font: None,
            base_dir: PathBuf::from("."),
        }
    }
}

impl IntroConfig {
    /// Parse a JSON config; asset paths resolve against the working directory.
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read a JSON config file; asset paths resolve against its directory.
    pub fn from_path(path: &Path) -> ReelResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let mut cfg = Self::from_json_str(&s)?;
        cfg.base_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        Ok(cfg)
    }

    /// Check sizes, frame rate and data.
    pub fn validate(&self) -> ReelResult<()> {
        self.canvas()?;
        self.fps()?;
        let charted = matches!(
            self.variant,
            Variant::ProductTour | Variant::GoldChart | Variant::ChartOutro
        );
        if charted && self.chart.points.is_empty() {
            return Err(ReelError::validation(format!(
                "variant '{}' needs at least one chart point",
                self.variant
            )));
        }
        if self.chart.points.iter().any(|p| !p.value.is_finite()) {
            return Err(ReelError::validation("chart values must be finite"));
        }
        Ok(())
    }

    /// Output canvas.
    pub fn canvas(&self) -> ReelResult<Canvas> {
        Canvas::new(self.width, self.height)
    }

    /// Frame rate.
    pub fn fps(&self) -> ReelResult<Fps> {
        Fps::new(self.fps, 1)
    }

    /// Load the logo and font into a fresh asset store rooted at `base_dir`.
    ///
    /// A configured asset that cannot be read is an error. Without a configured font the
    /// system sans-serif face is tried.
    pub fn load_assets(&self) -> ReelResult<AssetStore> {
        let mut store = AssetStore::new(&self.base_dir);
        if let Some(logo) = &self.logo {
            store.load_image(LOGO_KEY, &path_str(logo)?)?;
        }
        match &self.font {
            Some(font) => store.load_font(&path_str(font)?)?,
            None => {
                if !store.load_system_font() {
                    tracing::debug!("no system font found");
                }
            }
        }
        Ok(store)
    }
}

/// Asset key of the logo image.
pub const LOGO_KEY: &str = "logo";

fn path_str(p: &Path) -> ReelResult<String> {
    p.to_str()
        .map(str::to_owned)
        .ok_or_else(|| ReelError::validation(format!("non UTF-8 asset path '{}'", p.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/intro/config.rs"]
mod tests;
