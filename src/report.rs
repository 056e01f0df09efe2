use crate::catalog::{Catalog, Priority};
use crate::schema::FusionResult;
use colored::Colorize;

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    pub color: bool,
    pub show_notes: bool,
    pub show_raw_text: bool,
}

fn heading(text: &str, color: bool) -> String {
    if color {
        text.bold().cyan().to_string()
    } else {
        text.to_string()
    }
}

fn tier_heading(priority: Priority, color: bool) -> String {
    let text = format!("{} ({})", priority.action(), priority);
    if !color {
        return text;
    }
    match priority {
        Priority::Green => text.bold().green().to_string(),
        Priority::Orange => text.bold().yellow().to_string(),
        Priority::Red => text.bold().red().to_string(),
    }
}

/// Render a fusion result as a grouped, human-readable report.
pub fn render(result: &FusionResult, catalog: &Catalog, options: &ReportOptions) -> String {
    let mut lines: Vec<String> = Vec::new();

    if result.degraded {
        let banner = "Detector unavailable: showing sample findings";
        lines.push(if options.color {
            banner.yellow().to_string()
        } else {
            banner.to_string()
        });
        lines.push(String::new());
    }

    lines.push(heading("Located:", options.color));
    if result.boxed_findings.is_empty() {
        lines.push("  none".to_string());
    }
    for b in &result.boxed_findings {
        lines.push(format!(
            "  {} {} [{}] {:.2} at ({:.2}, {:.2})-({:.2}, {:.2})",
            b.id, b.label, b.priority, b.score, b.bbox.x0, b.bbox.y0, b.bbox.x1, b.bbox.y1
        ));
    }

    for priority in Priority::ALL {
        lines.push(String::new());
        lines.push(tier_heading(priority, options.color));
        let findings = result.prioritized_findings.get(priority);
        if findings.is_empty() {
            lines.push("  none".to_string());
        }
        for f in findings {
            lines.push(format!("  - {} {:.2} ({})", f.label, f.confidence, f.source.as_str()));
            if options.show_notes
                && let Some(notes) = f
                    .key
                    .as_deref()
                    .and_then(|key| catalog.get(key))
                    .and_then(|item| item.notes.as_deref())
            {
                lines.push(format!("      {}", notes));
            }
        }
    }

    if !result.unboxed_findings.is_empty() {
        lines.push(String::new());
        lines.push(heading("Also detected (no location):", options.color));
        for u in &result.unboxed_findings {
            lines.push(format!(
                "  - {} [{}] {:.2} ({})",
                u.label,
                u.priority,
                u.confidence,
                u.source.as_str()
            ));
        }
    }

    if options.show_raw_text
        && let Some(text) = &result.raw_text
    {
        lines.push(String::new());
        lines.push(heading("OCR text:", options.color));
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            lines.push(format!("  {}", line.trim()));
        }
    }

    lines.join("\n")
}

/// Render the catalog grouped by tier.
pub fn render_catalog(catalog: &Catalog, color: bool) -> String {
    let mut lines: Vec<String> = Vec::new();

    for (i, priority) in Priority::ALL.into_iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(tier_heading(priority, color));
        for item in catalog.iter().filter(|item| item.priority == priority) {
            lines.push(format!("  {:<18} {}", item.key, item.label));
        }
    }

    lines.join("\n")
}
