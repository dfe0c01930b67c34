use annealforge::config::AnnealParams;
use annealforge::scorer::QualityReport;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

pub fn print_benchmark_report(report: &QualityReport) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Problem").add_attribute(Attribute::Bold),
        Cell::new("Optimizer").add_attribute(Attribute::Bold),
        Cell::new("Cost").fg(Color::Cyan),
        Cell::new("Transitions"),
        Cell::new("Evals"),
    ]);

    for i in 2..=4 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for s in &report.samples {
        table.add_row(vec![
            Cell::new(s.problem.to_string()).add_attribute(Attribute::Bold),
            Cell::new(&s.optimizer),
            Cell::new(format!("{:.2}", s.cost)).fg(Color::Cyan),
            Cell::new(s.transitions),
            Cell::new(s.cost_evaluations),
        ]);
    }
    println!("\n{}", table);
    println!("Quality (geomean): {:.4}", report.quality);
}

pub fn print_params(title: &str, params: &AnnealParams) {
    println!("\n{}", title);
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    let rows = [
        ("Initial temperature", format!("{}", params.initial_temperature)),
        ("Cooling steps", params.cooling_steps.to_string()),
        ("Cooling fraction", format!("{}", params.cooling_fraction)),
        ("Steps per temperature", params.steps_per_temperature.to_string()),
    ];
    for (name, value) in rows {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}", table);
}

pub fn format_coefficients(coeffs: &[f64]) -> String {
    let parts: Vec<String> = coeffs.iter().map(|c| c.to_string()).collect();
    format!("[{}]", parts.join(", "))
}
