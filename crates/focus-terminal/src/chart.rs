//! Horizontal bar charts
//!
//! Renders `label │ ▇▇▇▇ value` rows, scaling the longest bar to the space
//! left over after the label and value columns.

use colored::Colorize;

pub const BAR_CHART_CHAR: &str = "▇";

/// Narrowest bar area used even on very small terminals
const MIN_BAR_WIDTH: usize = 10;
const DEFAULT_WIDTH: usize = 80;

/// Width of the attached terminal, or 80 columns when there is none
pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(terminal_size::Width(w), _)| w as usize)
        .unwrap_or(DEFAULT_WIDTH)
}

/// A horizontal bar chart of non-negative values
#[derive(Debug, Clone, Default)]
pub struct BarChart {
    bars: Vec<(String, u64)>,
}

impl BarChart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bar(mut self, label: impl Into<String>, value: u64) -> Self {
        self.bars.push((label.into(), value));
        self
    }

    /// Render the chart to fit within `width` columns
    pub fn render(&self, width: usize) -> String {
        let label_width = self
            .bars
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);
        let max_value = self.bars.iter().map(|(_, v)| *v).max().unwrap_or(0);
        let value_width = max_value.to_string().len();
        // " │ " before the bar and " " before the value
        let bar_space = width
            .saturating_sub(label_width + value_width + 4)
            .max(MIN_BAR_WIDTH);

        let mut output = String::new();
        for (label, value) in &self.bars {
            let len = bar_length(*value, max_value, bar_space);
            output.push_str(&format!(
                "{label:<label_width$} │ {} {value}\n",
                BAR_CHART_CHAR.repeat(len).cyan()
            ));
        }
        output
    }
}

fn bar_length(value: u64, max_value: u64, space: usize) -> usize {
    if max_value == 0 {
        return 0;
    }
    ((value as f64 / max_value as f64) * space as f64).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_length_scaling() {
        assert_eq!(bar_length(0, 0, 40), 0);
        assert_eq!(bar_length(50, 100, 40), 20);
        assert_eq!(bar_length(100, 100, 40), 40);
        assert_eq!(bar_length(1, 1000, 40), 0);
    }

    #[test]
    fn test_render_aligns_labels() {
        colored::control::set_override(false);

        let chart = BarChart::new()
            .with_bar("Sunday", 30)
            .with_bar("Monday", 0)
            .with_bar("Wednesday", 60);
        let output = chart.render(40);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Sunday    │ "));
        assert!(lines[1].starts_with("Monday    │  0"));
        assert!(lines[2].starts_with("Wednesday │ "));
        assert!(lines[2].ends_with(" 60"));
        // 40 - (9 + 2 + 4) leaves 25 columns for the longest bar
        assert_eq!(lines[2].matches(BAR_CHART_CHAR).count(), 25);
        assert_eq!(lines[0].matches(BAR_CHART_CHAR).count(), 13);
    }

    #[test]
    fn test_render_empty_chart() {
        assert_eq!(BarChart::new().render(80), "");
    }
}
