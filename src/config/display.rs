use serde::{Deserialize, Serialize};

/// Layout settings shared by every gauge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Middle band width (percent of the bar) at or below which the middle
    /// caption is abbreviated (default: 18.0)
    #[serde(default = "default_middle_caption_min_width")]
    pub middle_caption_min_width: f64,

    /// Distance (percent) the value caption keeps from either end of the
    /// bar (default: 2.0)
    #[serde(default = "default_bubble_margin")]
    pub bubble_margin: f64,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            middle_caption_min_width: default_middle_caption_min_width(),
            bubble_margin: default_bubble_margin(),
        }
    }
}

fn default_middle_caption_min_width() -> f64 {
    18.0
}

fn default_bubble_margin() -> f64 {
    2.0
}
