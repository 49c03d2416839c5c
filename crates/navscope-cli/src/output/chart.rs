use navscope_core::NavChart;

const AXIS_LABEL_WIDTH: usize = 12;

/// Plain-text line chart of `chart`, `width` columns by `height` rows.
///
/// Each column is one downsampled value; the y axis is labelled with the
/// maximum on the top row and the minimum on the bottom row.
pub fn draw(chart: &NavChart, width: usize, height: usize) -> Vec<String> {
    let values = chart.downsample(width);
    if values.is_empty() || height == 0 {
        return Vec::new();
    }

    let rows = values
        .iter()
        .map(|value| row_for(*value, chart.min, chart.span(), height))
        .collect::<Vec<_>>();

    let mut lines = Vec::with_capacity(height + 2);
    for row in (0..height).rev() {
        let label = if row == height - 1 {
            format!("{:.4}", chart.max)
        } else if row == 0 {
            format!("{:.4}", chart.min)
        } else {
            String::new()
        };

        let plot = rows
            .iter()
            .map(|value_row| if *value_row == row { '*' } else { ' ' })
            .collect::<String>();
        lines.push(format!(
            "{label:>width$} |{}",
            plot.trim_end(),
            width = AXIS_LABEL_WIDTH
        ));
    }

    lines.push(format!(
        "{:>width$} +{}",
        "",
        "-".repeat(values.len()),
        width = AXIS_LABEL_WIDTH
    ));

    let start = chart.start.to_string();
    let end = chart.end.to_string();
    let gap = values.len().saturating_sub(start.len() + end.len()).max(1);
    lines.push(format!(
        "{:>width$}  {start}{}{end}",
        "",
        " ".repeat(gap),
        width = AXIS_LABEL_WIDTH
    ));

    lines
}

/// Row index of `value`, `0` at the bottom. A flat series sits in the middle.
fn row_for(value: f64, min: f64, span: f64, height: usize) -> usize {
    if span <= f64::EPSILON {
        return height / 2;
    }

    let scaled = ((value - min) / span * (height - 1) as f64).round();
    (scaled.max(0.0) as usize).min(height - 1)
}

#[cfg(test)]
mod tests {
    use navscope_core::{NavDate, NavPoint, NavSeries};

    use super::*;

    fn chart(values: &[f64]) -> NavChart {
        let points = values
            .iter()
            .enumerate()
            .map(|(day, value)| {
                let date = NavDate::parse(&format!("{:02}-01-2023", day + 1)).expect("valid date");
                NavPoint::new(date, *value)
            })
            .collect();
        NavChart::from_series(&NavSeries::from_unsorted(points)).expect("non-empty")
    }

    #[test]
    fn labels_bounds_and_dates() {
        let lines = draw(&chart(&[10.0, 12.0, 11.0]), 30, 5);

        assert_eq!(lines.len(), 7);
        assert!(lines[0].trim_start().starts_with("12.0000 |"));
        assert!(lines[4].trim_start().starts_with("10.0000 |"));
        assert!(lines[6].contains("01-01-2023"));
        assert!(lines[6].contains("03-01-2023"));
    }

    #[test]
    fn each_column_plots_one_point() {
        let lines = draw(&chart(&[1.0, 2.0, 3.0, 4.0]), 4, 4);
        let stars = lines.iter().map(|line| line.matches('*').count()).sum::<usize>();
        assert_eq!(stars, 4);
    }

    #[test]
    fn flat_series_sits_on_middle_row() {
        assert_eq!(row_for(5.0, 5.0, 0.0, 9), 4);
        assert_eq!(row_for(5.0, 0.0, 10.0, 11), 5);
    }
}
