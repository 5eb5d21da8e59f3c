// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use super::commands::{ModelSummary, SimplifiedLayer};
use crate::interpolation::HeightGrid;
use colored::*;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    fn rule() {
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report the layer stack of a model
    pub fn report_model(file: &str, summary: &ModelSummary) {
        println!();
        Self::rule();
        println!("{} {}", "Model:".bold(), file.cyan());
        Self::rule();
        println!(
            "  {} {} ({} primary, {} secondary)",
            "Layers:".bright_black(),
            summary.layers.to_string().cyan(),
            summary.primary,
            summary.secondary()
        );
        for (index, (vertices, z)) in summary.vertices.iter().zip(&summary.elevations).enumerate() {
            println!(
                "    {} z={} {} vertices",
                format!("#{}", index).bright_black(),
                format!("{:.2}", z).yellow(),
                vertices
            );
        }
        println!("  {} {}", "Splits:".bright_black(), summary.splits.to_string().cyan());
        println!(
            "  {} {} ({})",
            "Roof points:".bright_black(),
            summary.roof_points.to_string().cyan(),
            summary.method
        );
        Self::rule();
    }

    pub fn report_simplify(layers: &[SimplifiedLayer]) {
        for layer in layers {
            let after = if layer.after < layer.before {
                layer.after.to_string().green()
            } else {
                layer.after.to_string().bright_black()
            };
            println!(
                "  {} {} -> {}",
                format!("Layer #{}:", layer.index).bright_black(),
                layer.before,
                after
            );
        }
    }

    /// Report a roof height grid
    pub fn report_grid(grid: &HeightGrid, duration: Duration) {
        println!();
        Self::rule();
        println!(
            "{} {}x{} over [0, {}]",
            "Roof grid:".bold(),
            grid.resolution,
            grid.resolution,
            grid.extent
        );
        Self::rule();
        let range = match (grid.min(), grid.max()) {
            (Some(min), Some(max)) => format!("{:.3} .. {:.3}", min, max),
            _ => "empty".to_string(),
        };
        println!("  {} {}", "Heights:".bright_black(), range.cyan());
        println!(
            "  {} {}",
            "Time:".bright_black(),
            Self::format_duration(duration).yellow()
        );
        Self::rule();
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        println!("\n{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Report info
    pub fn report_info(message: &str) {
        println!("{} {}", "ℹ️".bright_blue(), message);
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }

    /// Print success message
    pub fn success(message: &str) {
        println!("{} {}", "✅".green(), message.green());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(
            Reporter::format_duration(Duration::from_micros(500)),
            "500µs"
        );
        assert_eq!(
            Reporter::format_duration(Duration::from_millis(5)),
            "5.00ms"
        );
        assert_eq!(Reporter::format_duration(Duration::from_secs(2)), "2.00s");
    }
}
