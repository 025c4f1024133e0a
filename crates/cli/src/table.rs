use ynab_peak_core::{ConversionRate, YearlyReport};

/// Render the report as an aligned ASCII table.
pub fn render(report: &YearlyReport, rate: &ConversionRate) -> String {
    if report.rows.is_empty() {
        return "(no accounts)\n".to_string();
    }

    let headers = [
        "Name".to_string(),
        format!("Max Balance {}", rate.base),
        format!("Max Balance {}", rate.quote),
        "Start Date".to_string(),
        "End Date".to_string(),
    ];
    let rows: Vec<Vec<String>> = report
        .rows
        .iter()
        .map(|row| {
            vec![
                row.account_name.clone(),
                format_amount(row.balance_base, &rate.base),
                format_amount(row.balance_quote, &rate.quote),
                row.start.format("%Y-%m-%d").to_string(),
                row.end.format("%Y-%m-%d").to_string(),
            ]
        })
        .collect();

    render_cells(&headers, &rows)
}

fn format_amount(amount: f64, currency: &str) -> String {
    match currency {
        "EUR" => format!("€{amount:.2}"),
        "USD" => format!("${amount:.2}"),
        "GBP" => format!("£{amount:.2}"),
        other => format!("{other} {amount:.2}"),
    }
}

fn render_cells(headers: &[String], rows: &[Vec<String>]) -> String {
    let cols = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().take(cols).enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
        out.push('|');
        for (i, w) in widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let pad = w.saturating_sub(cell.chars().count());
            out.push(' ');
            out.push_str(cell);
            out.push_str(&" ".repeat(pad));
            out.push_str(" |");
        }
        out.push('\n');
    }

    fn push_sep(out: &mut String, widths: &[usize]) {
        out.push('|');
        for w in widths {
            out.push_str(&"-".repeat(w + 2));
            out.push('|');
        }
        out.push('\n');
    }

    let mut out = String::new();
    push_row(&mut out, headers, &widths);
    push_sep(&mut out, &widths);
    for row in rows {
        push_row(&mut out, row, &widths);
    }
    out
}
