use crate::types::report::{ScoreReport, ScoreRow};

pub fn to_markdown(report: &ScoreReport) -> String {
    let mut output = String::new();
    output.push_str("# BRR Score Report\n\n");
    output.push_str(&format!(
        "Source: {} (sheet {}, {} data rows, sample row {})\n\n",
        report.source.path, report.source.sheet, report.source.data_rows, report.sample_row
    ));
    output.push_str(&format!(
        "Total possible score: {}\n\n",
        report.total_possible_score
    ));

    output.push_str("## Columns\n\n");
    output.push_str(&column_line("binary (Yes/No)", &report.categories.binary));
    output.push_str(&column_line("range (1-4)", &report.categories.range));
    output.push_str(&column_line("list (P1,P2,...)", &report.categories.list));
    output.push('\n');

    output.push_str("## Scores\n\n");
    push_score_table(&mut output, &report.rows);

    output.push_str("## Data Quality\n\n");
    if report.warnings.is_empty() {
        output.push_str("- none\n\n");
    } else {
        for warning in &report.warnings {
            output.push_str(&format!("- {warning}\n"));
        }
        output.push('\n');
    }

    let analytics = &report.analytics;
    output.push_str("## Mean Score by Sector\n\n");
    for mean in &analytics.sector_means {
        output.push_str(&format!(
            "- {}: {:.3} ({} rows)\n",
            mean.key, mean.mean, mean.count
        ));
    }
    output.push('\n');

    output.push_str("## Mean Percentage by Year\n\n");
    for mean in &analytics.year_means {
        output.push_str(&format!(
            "- {}: {:.3} ({} rows)\n",
            mean.key, mean.mean, mean.count
        ));
    }
    output.push('\n');

    output.push_str("## Top Performers\n\n");
    push_score_table(&mut output, &analytics.top);
    output.push_str("## Bottom Performers\n\n");
    push_score_table(&mut output, &analytics.bottom);

    output.push_str("## Year-over-Year Change\n\n");
    if analytics.year_over_year.is_empty() {
        output.push_str("- none\n\n");
    } else {
        output.push_str("| Company | Sector | From | To | Change |\n");
        output.push_str("|---|---|---|---|---|\n");
        for delta in &analytics.year_over_year {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {:+.3} |\n",
                delta.company, delta.sector, delta.previous_year, delta.year, delta.delta
            ));
        }
        output.push('\n');
    }

    output.push_str("## Score Distribution\n\n");
    for bin in &analytics.distribution {
        output.push_str(&format!(
            "- {:.3} to {:.3}: {}\n",
            bin.lower, bin.upper, bin.count
        ));
    }
    output.push('\n');

    output.push_str("## Sector Representation\n\n");
    for share in &analytics.sector_representation {
        output.push_str(&format!(
            "- {}: {} ({:.1}%)\n",
            share.sector,
            share.count,
            share.share * 100.0
        ));
    }

    output
}

fn column_line(label: &str, columns: &[String]) -> String {
    if columns.is_empty() {
        format!("- {label}: none\n")
    } else {
        format!("- {label}: {}\n", columns.join(", "))
    }
}

fn push_score_table(output: &mut String, rows: &[ScoreRow]) {
    if rows.is_empty() {
        output.push_str("- none\n\n");
        return;
    }
    output.push_str("| Company | Year | Sector | Calculated Score | Percentage Score |\n");
    output.push_str("|---|---|---|---|---|\n");
    for row in rows {
        output.push_str(&format!(
            "| {} | {} | {} | {:.3} | {:.3} |\n",
            row.company, row.year, row.sector, row.calculated_score, row.percentage_score
        ));
    }
    output.push('\n');
}
