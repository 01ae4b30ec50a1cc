//! Markdown output generation for diagrams, suggestions and result tables.

use benchcat_core::{table_cells, Diagram, KeyPath, ResultRecord, Suggestion};
use std::fmt::{self, Write};

/// Longest cell shown in a result table before truncation.
const MAX_CELL_CHARS: usize = 50;

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

fn shorten(text: &str) -> String {
    if text.chars().count() > MAX_CELL_CHARS {
        let head: String = text.chars().take(MAX_CELL_CHARS - 3).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

fn format_number(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.4}", v))
}

/// Generate a markdown summary of a diagram.
pub fn diagram_summary(diagram: &Diagram<'_>) -> String {
    let mut output = String::new();
    write_diagram_summary(&mut output, diagram).expect("writing to a String cannot fail");
    output
}

fn write_diagram_summary(output: &mut String, diagram: &Diagram<'_>) -> fmt::Result {
    writeln!(output, "# Diagram: {} vs {}", diagram.y_path, diagram.x_path)?;
    writeln!(output)?;
    writeln!(output, "Generated: {}", chrono::Utc::now().to_rfc3339())?;
    writeln!(output)?;
    writeln!(output, "## Sites")?;
    writeln!(output)?;

    if diagram.is_empty() {
        writeln!(output, "No plottable results.")?;
    } else {
        writeln!(output, "| Site | Points | X range | Slope | Intercept | R² |")?;
        writeln!(output, "|------|--------|---------|-------|-----------|----|")?;
        for series in &diagram.series {
            let regression = diagram
                .regressions
                .iter()
                .find(|r| r.site.id == series.site.id)
                .map(|r| r.regression);
            let range = match (series.points.first(), series.points.last()) {
                (Some(first), Some(last)) => format!("{} to {}", first.x, last.x),
                _ => "-".to_string(),
            };
            writeln!(
                output,
                "| {} | {} | {} | {} | {} | {} |",
                escape_cell(series.site.label()),
                series.points.len(),
                range,
                format_number(regression.map(|r| r.slope)),
                format_number(regression.map(|r| r.intercept)),
                format_number(regression.and_then(|r| r.r_squared)),
            )?;
        }
    }

    writeln!(output)?;
    writeln!(output, "## Rejected results")?;
    writeln!(output)?;
    if diagram.rejected.is_empty() {
        writeln!(output, "All results were plotted.")?;
    } else {
        for warning in diagram.warnings() {
            writeln!(output, "- {}", warning)?;
        }
    }

    writeln!(output)?;
    writeln!(output, "---")?;
    writeln!(
        output,
        "Plotted {} of {} results",
        diagram.series.point_count(),
        diagram.series.point_count() + diagram.rejected.len()
    )?;
    Ok(())
}

/// Generate a markdown table of suggested fields.
pub fn suggestions_table(suggestions: &[Suggestion]) -> String {
    let mut output = String::new();
    write_suggestions_table(&mut output, suggestions).expect("writing to a String cannot fail");
    output
}

fn write_suggestions_table(output: &mut String, suggestions: &[Suggestion]) -> fmt::Result {
    if suggestions.is_empty() {
        writeln!(output, "No suggested fields")?;
        return Ok(());
    }

    writeln!(output, "| Field | Description |")?;
    writeln!(output, "|-------|-------------|")?;
    for suggestion in suggestions {
        writeln!(
            output,
            "| {} | {} |",
            suggestion.field,
            escape_cell(suggestion.description.as_deref().unwrap_or(""))
        )?;
    }
    Ok(())
}

/// Generate a markdown table of results with custom key-path columns.
pub fn results_table(results: &[ResultRecord], columns: &[KeyPath]) -> String {
    let mut output = String::new();
    write_results_table(&mut output, results, columns).expect("writing to a String cannot fail");
    output
}

fn write_results_table(
    output: &mut String,
    results: &[ResultRecord],
    columns: &[KeyPath],
) -> fmt::Result {
    write!(output, "| Result | Site | Benchmark |")?;
    for column in columns {
        write!(output, " {} |", column)?;
    }
    writeln!(output)?;
    write!(output, "|--------|------|-----------|")?;
    for _ in columns {
        write!(output, "---|")?;
    }
    writeln!(output)?;

    for result in results {
        let id = result.id.as_ref().map(|id| id.as_str()).unwrap_or("-");
        write!(
            output,
            "| {} | {} | {} |",
            escape_cell(id),
            escape_cell(result.site.label()),
            escape_cell(result.benchmark.label())
        )?;
        for cell in table_cells(result, columns) {
            write!(output, " {} |", escape_cell(&shorten(&cell)))?;
        }
        writeln!(output)?;
    }

    writeln!(output)?;
    writeln!(output, "Total results: {}", results.len())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchcat_core::{derive_suggestions, Reference};
    use serde_json::json;

    fn path(s: &str) -> KeyPath {
        KeyPath::parse(s).unwrap()
    }

    fn sample() -> Vec<ResultRecord> {
        vec![
            ResultRecord::new(Reference::new("A").with_name("Alpha"), Reference::new("b"), json!({"cpu": 1, "score": 10})).with_id("1"),
            ResultRecord::new(Reference::new("A"), Reference::new("b"), json!({"cpu": 2, "score": 5})).with_id("2"),
            ResultRecord::new(Reference::new("B"), Reference::new("b"), json!({"cpu": "bad", "score": 1})).with_id("3"),
        ]
    }

    #[test]
    fn test_diagram_summary() {
        let results = sample();
        let diagram = Diagram::build(&results, &path("cpu"), &path("score"));
        let summary = diagram_summary(&diagram);

        assert!(summary.starts_with("# Diagram: score vs cpu"));
        assert!(summary.contains("| Alpha | 2 | 1 to 2 | -5.0000 | 15.0000 | 1.0000 |"));
        assert!(summary.contains("- Result 3 from site B: X axis value not numeric"));
        assert!(summary.contains("Plotted 2 of 3 results"));
    }

    #[test]
    fn test_diagram_summary_without_points() {
        let results = sample();
        let diagram = Diagram::build(&results, &path("missing"), &path("score"));
        let summary = diagram_summary(&diagram);
        assert!(summary.contains("No plottable results."));
        assert!(summary.contains("Plotted 0 of 3 results"));
    }

    #[test]
    fn test_single_point_site_has_no_fit() {
        let results = vec![ResultRecord::new(Reference::new("A"), Reference::new("b"), json!({"x": 1, "y": 1}))];
        let diagram = Diagram::build(&results, &path("x"), &path("y"));
        let summary = diagram_summary(&diagram);
        assert!(summary.contains("| A | 1 | 1 to 1 | - | - | - |"));
        assert!(summary.contains("All results were plotted."));
    }

    #[test]
    fn test_suggestions_table() {
        let schema = json!({"properties": {
            "score": {"suggestToUser": true, "description": "Higher | better"},
            "cpu": {"properties": {"cores": {"suggestToUser": true}}}
        }});
        let table = suggestions_table(&derive_suggestions(&schema));
        assert!(table.contains("| score | Higher \\| better |"));
        assert!(table.contains("| cpu.cores |  |"));
        assert_eq!(suggestions_table(&[]), "No suggested fields\n");
    }

    #[test]
    fn test_results_table() {
        let results = sample();
        let table = results_table(&results, &[path("score"), path("gpu")]);
        assert!(table.contains("| Result | Site | Benchmark | score | gpu |"));
        assert!(table.contains("| 1 | Alpha | b | 10 | not found |"));
        assert!(table.contains("Total results: 3"));
    }

    #[test]
    fn test_empty_results_table() {
        let table = results_table(&[], &[path("score")]);
        assert_eq!(
            table,
            "| Result | Site | Benchmark | score |\n|--------|------|-----------|---|\n\nTotal results: 0\n"
        );
    }

    #[test]
    fn test_long_cells_are_shortened() {
        let long = "x".repeat(80);
        let results = vec![ResultRecord::new(Reference::new("A"), Reference::new("b"), json!({"note": long}))];
        let table = results_table(&results, &[path("note")]);
        assert!(table.contains(&format!("{}...", "x".repeat(47))));
    }
}
