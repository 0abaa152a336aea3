use crate::types::config::AnalyticsConfig;
use crate::types::report::{
    Analytics, GroupMean, HistogramBin, Period, ScoreRow, SectorShare, YearOverYear,
};
use crate::types::scoring::Score;
use std::collections::BTreeMap;

pub fn analyze(rows: &[ScoreRow], config: &AnalyticsConfig, top_n: Option<usize>) -> Analytics {
    let n = top_n.unwrap_or(config.top_n);
    Analytics {
        sector_means: sector_means(rows),
        year_means: year_means(rows),
        top: top(rows, n),
        bottom: bottom(rows, n),
        year_over_year: year_over_year(rows),
        distribution: histogram(rows, config.histogram_bins),
        sector_representation: sector_representation(rows),
    }
}

fn grouped_mean<K: Ord + Clone>(
    rows: &[ScoreRow],
    key: impl Fn(&ScoreRow) -> K,
    value: impl Fn(&ScoreRow) -> Score,
) -> Vec<GroupMean<K>> {
    let mut groups: BTreeMap<K, (Score, usize)> = BTreeMap::new();
    for row in rows {
        let entry = groups.entry(key(row)).or_insert((0.0, 0));
        entry.0 += value(row);
        entry.1 += 1;
    }
    groups
        .into_iter()
        .map(|(key, (sum, count))| GroupMean {
            key,
            mean: sum / count as Score,
            count,
        })
        .collect()
}

/// Mean calculated score per sector, sorted by sector.
pub fn sector_means(rows: &[ScoreRow]) -> Vec<GroupMean<String>> {
    grouped_mean(rows, |row| row.sector.clone(), |row| row.calculated_score)
}

/// Mean percentage score per reporting period, in period order.
pub fn year_means(rows: &[ScoreRow]) -> Vec<GroupMean<Period>> {
    grouped_mean(rows, |row| row.year.clone(), |row| row.percentage_score)
}

/// Highest `n` rows by calculated score; ties keep source order.
pub fn top(rows: &[ScoreRow], n: usize) -> Vec<ScoreRow> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| b.calculated_score.total_cmp(&a.calculated_score));
    sorted.truncate(n);
    sorted
}

/// Lowest `n` rows by calculated score; ties keep source order.
pub fn bottom(rows: &[ScoreRow], n: usize) -> Vec<ScoreRow> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| a.calculated_score.total_cmp(&b.calculated_score));
    sorted.truncate(n);
    sorted
}

/// Percentage change between consecutive reporting periods of each company.
///
/// Each company's rows are ordered by period first, so the result does not
/// depend on worksheet row order. Rows sharing a period keep their source
/// order. A company's earliest period has no predecessor and yields nothing.
pub fn year_over_year(rows: &[ScoreRow]) -> Vec<YearOverYear> {
    let mut by_company: BTreeMap<&str, Vec<&ScoreRow>> = BTreeMap::new();
    for row in rows {
        by_company.entry(row.company.as_str()).or_default().push(row);
    }

    let mut deltas = Vec::new();
    for history in by_company.values_mut() {
        history.sort_by(|a, b| a.year.cmp(&b.year));
        for pair in history.windows(2) {
            let (previous, current) = (pair[0], pair[1]);
            deltas.push(YearOverYear {
                company: current.company.clone(),
                sector: current.sector.clone(),
                previous_year: previous.year.clone(),
                year: current.year.clone(),
                previous_percentage: previous.percentage_score,
                percentage: current.percentage_score,
                delta: current.percentage_score - previous.percentage_score,
            });
        }
    }
    deltas
}

/// Equal-width bins spanning the observed calculated scores.
pub fn histogram(rows: &[ScoreRow], bins: usize) -> Vec<HistogramBin> {
    if rows.is_empty() || bins == 0 {
        return Vec::new();
    }
    let scores = rows.iter().map(|row| row.calculated_score);
    let min = scores.clone().fold(Score::INFINITY, Score::min);
    let max = scores.clone().fold(Score::NEG_INFINITY, Score::max);
    if min == max {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: rows.len(),
        }];
    }

    let width = (max - min) / bins as Score;
    let mut counts = vec![0usize; bins];
    for score in scores {
        let slot = (((score - min) / width) as usize).min(bins - 1);
        counts[slot] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(slot, count)| HistogramBin {
            lower: min + width * slot as Score,
            upper: min + width * (slot + 1) as Score,
            count,
        })
        .collect()
}

pub fn sector_representation(rows: &[ScoreRow]) -> Vec<SectorShare> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for row in rows {
        *counts.entry(row.sector.as_str()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(sector, count)| SectorShare {
            sector: sector.to_string(),
            count,
            share: count as Score / rows.len() as Score,
        })
        .collect()
}

/// Rows whose sector equals `sector`, in source order.
pub fn filter_by_sector(rows: &[ScoreRow], sector: &str) -> Vec<ScoreRow> {
    rows.iter()
        .filter(|row| row.sector == sector)
        .cloned()
        .collect()
}

/// One filtered subset per distinct sector, keyed and sorted by sector.
pub fn partition_by_sector(rows: &[ScoreRow]) -> BTreeMap<String, Vec<ScoreRow>> {
    let mut partitions: BTreeMap<String, Vec<ScoreRow>> = BTreeMap::new();
    for row in rows {
        partitions
            .entry(row.sector.clone())
            .or_default()
            .push(row.clone());
    }
    partitions
}
