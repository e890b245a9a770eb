use crate::data::filter::FilteredDataset;

/// Pearson correlations between every pair of numeric columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// Row-major, `values[i][j]` correlates `columns[i]` with `columns[j]`.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Pearson coefficient of paired samples.
///
/// NaN with fewer than two pairs or when either side is constant.
pub fn pearson(pairs: &[(f64, f64)]) -> f64 {
    if pairs.len() < 2 {
        return f64::NAN;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for &(x, y) in pairs {
        let (dx, dy) = (x - mean_x, y - mean_y);
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    (cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0)
}

/// Correlate the numeric columns of the visible rows, skipping rows where
/// either cell of a pair is missing.
pub fn correlation_matrix(view: &FilteredDataset) -> CorrelationMatrix {
    let dataset = view.source();
    let ids: Vec<_> = dataset.numeric_column_ids().collect();
    let data: Vec<Vec<Option<f64>>> = ids
        .iter()
        .map(|&id| view.column_values(id).map(|v| v.as_f64()).collect())
        .collect();

    let k = ids.len();
    let mut values = vec![vec![f64::NAN; k]; k];
    for i in 0..k {
        for j in i..k {
            let pairs: Vec<(f64, f64)> = data[i]
                .iter()
                .zip(&data[j])
                .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
                .collect();
            let r = pearson(&pairs);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix {
        columns: ids
            .iter()
            .map(|&id| dataset.column(id).name.clone())
            .collect(),
        values,
    }
}
