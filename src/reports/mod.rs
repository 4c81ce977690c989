use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use weightforge::algorithms::Algorithm;
use weightforge::optimizer::{Comparison, RunResult};

fn algorithm_color(algo: Algorithm) -> Color {
    match algo {
        Algorithm::Ga => Color::Blue,
        Algorithm::Pso => Color::Red,
        Algorithm::Aco => Color::Green,
        Algorithm::Tabu => Color::Magenta,
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn print_run_summary(result: &RunResult) {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Algorithm").add_attribute(Attribute::Bold),
        Cell::new("Best Fitness"),
        Cell::new("Test Accuracy").fg(Color::Cyan),
        Cell::new("Iterations"),
        Cell::new("Time (s)"),
    ]);

    let iterations = result.history.best_fitness.len().saturating_sub(1);
    table.add_row(vec![
        Cell::new(result.algorithm.full_name()).fg(algorithm_color(result.algorithm)),
        Cell::new(format!("{:.6}", result.best_fitness)),
        Cell::new(format!("{:.4}", result.best_accuracy)).fg(Color::Cyan),
        Cell::new(iterations),
        Cell::new(format!("{:.3}", result.execution_time.as_secs_f64())),
    ]);

    for i in 1..=4 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
    println!("\n{}", table);
}

/// Every `every`-th history entry, plus the last one.
pub fn print_history(result: &RunResult, every: usize) {
    let h = &result.history;
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Iter").add_attribute(Attribute::Bold),
        Cell::new("Best Fitness"),
        Cell::new("Best Accuracy").fg(Color::Cyan),
        Cell::new(h.secondary_kind.to_string()),
    ]);

    let last = h.best_fitness.len().saturating_sub(1);
    for i in (0..h.best_fitness.len()).filter(|&i| i % every.max(1) == 0 || i == last) {
        table.add_row(vec![
            Cell::new(i),
            Cell::new(format!("{:.6}", h.best_fitness[i])),
            Cell::new(format!("{:.4}", h.best_accuracy[i])),
            Cell::new(format!("{:.6}", h.secondary[i])),
        ]);
    }

    for i in 0..=3 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
    println!("\n{}", table);
}

pub fn print_ranking(results: &[RunResult], comparison: &Comparison) {
    let mut ranked: Vec<&RunResult> = results.iter().collect();
    ranked.sort_by(|a, b| b.best_accuracy.total_cmp(&a.best_accuracy));

    let mut table = new_table();
    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Algorithm").add_attribute(Attribute::Bold),
        Cell::new("Test Accuracy").fg(Color::Cyan),
        Cell::new("Best Fitness"),
        Cell::new("Time (s)"),
    ]);

    for (rank, r) in ranked.iter().enumerate() {
        let mut name = Cell::new(r.algorithm.label()).fg(algorithm_color(r.algorithm));
        if Some(r.algorithm) == comparison.best_algorithm {
            name = name.add_attribute(Attribute::Bold);
        }
        table.add_row(vec![
            Cell::new(rank + 1),
            name,
            Cell::new(format!("{:.4}", r.best_accuracy)),
            Cell::new(format!("{:.6}", r.best_fitness)),
            Cell::new(format!("{:.3}", r.execution_time.as_secs_f64())),
        ]);
    }

    for i in 2..=4 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
    println!("\n{}", table);
    if let Some(best) = comparison.best_algorithm {
        println!(
            "{} performed best with accuracy: {:.4}",
            best.label(),
            comparison.best_accuracy
        );
    }
}

/// Side-by-side accuracy traces, sampled every `every` iterations.
pub fn print_accuracy_series(comparison: &Comparison, every: usize) {
    let series = comparison.accuracy_series();
    let longest = series.iter().map(|s| s.values.len()).max().unwrap_or(0);
    if longest == 0 {
        return;
    }

    let mut table = new_table();
    let mut header = vec![Cell::new("Iter").add_attribute(Attribute::Bold)];
    for s in &series {
        header.push(Cell::new(format!("{} ({})", s.label, s.color)));
    }
    table.set_header(header);

    let last = longest - 1;
    for i in (0..longest).filter(|&i| i % every.max(1) == 0 || i == last) {
        let mut row = vec![Cell::new(i)];
        for s in &series {
            row.push(match s.values.get(i) {
                Some(v) => Cell::new(format!("{:.4}", v)),
                None => Cell::new("-"),
            });
        }
        table.add_row(row);
    }
    println!("\n{}", table);
}
