//! demos/graph_data.rs
//!
//! Generates a synthetic year of weather and plots the daily temperature next
//! to its 7-day rolling mean.
//!
//! To run this demo:
//! cargo run --example graph_data --features examples

use std::error::Error;

use plotlars::{Axis, Legend, Line, Plot, Rgb, Text, TimeSeriesPlot};
use polars::prelude::*;
use weather_dashboard::{Metric, WeatherSession};

fn main() -> Result<(), Box<dyn Error>> {
    let mut session = WeatherSession::new()?;
    println!("Generating 2023 with seed {}...", session.default_seed());
    let table = session.table().year(2023).call()?;

    let key = table.key_metrics();
    println!(
        "{} days, mean temperature {:.1} {}, {} rainy days, {} with an extreme value",
        key.count,
        key.mean_temperature.unwrap_or_default(),
        Metric::Temperature.unit(),
        key.rainy_days,
        key.extreme_days
    );

    let rolling: Vec<Option<f64>> = table
        .time_series(Metric::Temperature, Some(7))?
        .into_iter()
        .map(|p| p.rolling)
        .collect();
    let mut data = table.to_frame()?;
    data.with_column(Column::new("temperature_7d".into(), rolling))?;

    println!("Generating temperature plot...");
    plot_temperature(&data);
    println!("Plot shown in browser.");

    Ok(())
}

fn plot_temperature(data: &DataFrame) {
    let metric = Metric::Temperature;
    let y_title = format!("{} ({})", metric, metric.unit());
    TimeSeriesPlot::builder()
        .data(data)
        .x("date")
        .y("temperature")
        .additional_series(vec!["temperature_7d"])
        .size(8)
        .colors(vec![Rgb(235, 117, 0), Rgb(69, 157, 230)])
        .lines(vec![Line::Dot, Line::Solid])
        .plot_title(Text::from("Synthetic Weather 2023").font("Arial").size(18))
        .legend(&Legend::new().x(0.05).y(0.9))
        .x_title("date")
        .y_title(Text::from(y_title.as_str()).color(Rgb(0, 0, 0)))
        .y_axis(
            &Axis::new()
                .value_color(Rgb(0, 0, 0))
                .show_grid(false)
                .zero_line_color(Rgb(0, 0, 0)),
        )
        .build()
        .plot();
}
