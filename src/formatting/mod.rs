use clap::ValueEnum;
use colored::*;
use std::env;
use std::io::IsTerminal;

use crate::classification::Zone;
use crate::engine::GaugeResult;

/// When to emit ANSI colors. Selected with `--color` or the
/// `NO_COLOR` / `CLICOLOR` / `CLICOLOR_FORCE` variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorMode {
    /// Color only when stdout is a capable terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }

    /// Mode implied by the color variables, `None` when they say nothing.
    /// `CLICOLOR_FORCE=1` beats `NO_COLOR`, which beats `CLICOLOR=0`.
    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        if lookup("CLICOLOR_FORCE").is_some_and(|v| v == "1") {
            Some(Self::Always)
        } else if lookup("NO_COLOR").is_some() || lookup("CLICOLOR").is_some_and(|v| v == "0") {
            Some(Self::Never)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormattingConfig {
    pub color: ColorMode,
    /// Draw gauges with box-drawing characters instead of ASCII
    pub unicode: bool,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            unicode: true,
        }
    }
}

impl FormattingConfig {
    pub fn from_env() -> Self {
        Self {
            color: ColorMode::from_vars(|name| env::var(name).ok()).unwrap_or_default(),
            ..Self::default()
        }
    }

    /// ASCII glyphs and no colors
    pub fn plain() -> Self {
        Self {
            color: ColorMode::Never,
            unicode: false,
        }
    }

    /// An explicit `--color` choice wins over the environment.
    pub fn with_color(self, color: Option<ColorMode>) -> Self {
        match color {
            Some(color) => Self { color, ..self },
            None => self,
        }
    }
}

/// Applies zone colors and emphasis to terminal text.
#[derive(Debug, Clone, Copy)]
pub struct Styler {
    config: FormattingConfig,
    color: bool,
}

impl Styler {
    pub fn new(config: FormattingConfig) -> Self {
        let color = config.color.should_use_color();
        colored::control::set_override(color);
        Self { config, color }
    }

    pub fn plain() -> Self {
        Self {
            config: FormattingConfig::plain(),
            color: false,
        }
    }

    pub fn config(&self) -> FormattingConfig {
        self.config
    }

    pub fn uses_color(&self) -> bool {
        self.color
    }

    /// Same glyphs, no escape codes. For text laid out by width.
    pub fn without_color(self) -> Self {
        Self {
            color: false,
            ..self
        }
    }

    /// Green for good, yellow for adequate, red for critical.
    pub fn zone(&self, zone: Zone, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        match zone {
            Zone::Good => text.green().to_string(),
            Zone::Adequate => text.yellow().to_string(),
            Zone::Critical => text.red().to_string(),
            Zone::NotAvailable => text.dimmed().to_string(),
        }
    }

    pub fn header(&self, text: &str) -> String {
        if self.color {
            text.blue().bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn bold(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn error(&self, text: &str) -> String {
        if self.color {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn success(&self, text: &str) -> String {
        if self.color {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    /// One-line drawing of a gauge, `width` cells wide.
    pub fn gauge_bar(&self, result: &GaugeResult, width: usize) -> String {
        let (fill, marker, empty) = if self.config.unicode {
            ("━", "●", "┄")
        } else {
            ("=", "O", ".")
        };
        if width == 0 {
            return String::new();
        }

        let marker_cell = result.marker_pct.map(|pct| cell_index(pct, width));
        (0..width)
            .map(|cell| {
                let center = (cell as f64 + 0.5) / width as f64 * 100.0;
                let zone = result
                    .bands
                    .iter()
                    .find(|band| center >= band.start_pct && center <= band.end_pct)
                    .map(|band| band.zone);
                let glyph = if marker_cell == Some(cell) {
                    marker
                } else if zone.is_some() {
                    fill
                } else {
                    empty
                };
                match zone {
                    Some(zone) if marker_cell != Some(cell) => self.zone(zone, glyph),
                    _ => self.bold(glyph),
                }
            })
            .collect()
    }
}

fn cell_index(pct: f64, width: usize) -> usize {
    let last = width.saturating_sub(1);
    ((pct / 100.0 * last as f64).round() as usize).min(last)
}

fn detect_color_support() -> bool {
    // Check if we're in a dumb terminal
    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    std::io::stdout().is_terminal()
}
