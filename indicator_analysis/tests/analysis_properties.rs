use approx::assert_relative_eq;
use chrono::{Datelike, NaiveDate, Weekday};
use indexmap::IndexMap;
use indicator_analysis::align::align;
use indicator_analysis::data::{parse_observations, parse_series_map, RawObservation};
use indicator_analysis::forecast::forecast_with_rng;
use indicator_analysis::{
    correlate, forecast, moving_averages, volatility, AnalyticsError, ForecastSettings, Frequency,
    NoiseMode, Observation, RawSeriesMap,
};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rstest::rstest;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

// The five-day series used throughout the worked examples
fn sample_series() -> Vec<Observation> {
    let raw = vec![
        RawObservation::new("2024-01-01", "100"),
        RawObservation::new("2024-01-02", "102"),
        RawObservation::new("2024-01-03", "101"),
        RawObservation::new("2024-01-04", "105"),
        RawObservation::new("2024-01-05", "110"),
    ];
    parse_observations("SP500", &raw)
}

fn raw_map() -> RawSeriesMap {
    let mut raw = RawSeriesMap::new();
    raw.insert(
        "UNRATE".to_string(),
        vec![
            RawObservation::new("2024-01-01", "3.7"),
            RawObservation::new("2024-02-01", "3.9"),
            RawObservation::new("2024-03-01", "3.8"),
            RawObservation::new("2024-04-01", "4.0"),
        ],
    );
    raw.insert(
        "FEDFUNDS".to_string(),
        vec![
            RawObservation::new("2024-01-01", "5.33"),
            RawObservation::new("2024-01-15", "5.30"),
            RawObservation::new("2024-02-01", "."),
            RawObservation::new("2024-03-01", "5.31"),
            RawObservation::new("2024-04-01", "5.20"),
        ],
    );
    raw.insert(
        "DGS10".to_string(),
        vec![
            RawObservation::new("2024-01-15", "4.05"),
            RawObservation::new("2024-02-01", "4.10"),
            RawObservation::new("2024-03-01", "4.25"),
            RawObservation::new("2024-04-01", "4.60"),
        ],
    );
    raw
}

#[test]
fn test_alignment_covers_every_distinct_date() {
    let series = parse_series_map(&raw_map());
    let aligned = align(&series);

    // 2024-01-01, 01-15, 02-01, 03-01, 04-01
    assert_eq!(aligned.len(), 5);
    for id in ["UNRATE", "FEDFUNDS", "DGS10"] {
        assert_eq!(aligned.column(id).unwrap().len(), aligned.len());
    }

    // Forward-filled gaps
    assert_eq!(aligned.column("UNRATE").unwrap()[1], Some(3.7));
    assert_eq!(aligned.column("FEDFUNDS").unwrap()[2], Some(5.30));
    // Nothing to carry before the first observation
    assert_eq!(aligned.column("DGS10").unwrap()[0], None);
    assert_eq!(aligned.valid_indices, vec![1, 2, 3, 4]);
}

#[test]
fn test_alignment_duplicate_dates_last_wins() {
    let mut series = IndexMap::new();
    series.insert(
        "A".to_string(),
        vec![
            Observation::new(date("2024-01-01"), 1.0),
            Observation::new(date("2024-01-01"), 2.0),
            Observation::new(date("2024-01-02"), 3.0),
        ],
    );

    let aligned = align(&series);
    assert_eq!(aligned.column("A").unwrap(), &[Some(2.0), Some(3.0)]);
}

#[test]
fn test_correlation_matrix_properties() {
    let series = parse_series_map(&raw_map());
    let result = correlate(&series, &IndexMap::new());
    let ids = ["UNRATE", "FEDFUNDS", "DGS10"];

    assert_eq!(result.observations, 4);
    for a in ids {
        assert_eq!(result.get(a, a), Some(1.0));
        for b in ids {
            assert_eq!(result.get(a, b), result.get(b, a));
            if let Some(r) = result.get(a, b) {
                assert!((-1.0..=1.0).contains(&r), "{} vs {} = {}", a, b, r);
            }
        }
    }
}

#[rstest]
#[case(1, 5)]
#[case(2, 4)]
#[case(3, 3)]
#[case(5, 1)]
#[case(6, 0)]
fn test_moving_average_window_counts(#[case] window: usize, #[case] expected: usize) {
    let observations = sample_series();
    let result = moving_averages("SP500", &observations, &[window]).unwrap();
    let ma = result.window(window).unwrap();

    assert_eq!(ma.values.len(), expected);
    if expected > 0 {
        let first: f64 =
            observations[..window].iter().map(|obs| obs.value).sum::<f64>() / window as f64;
        assert_relative_eq!(ma.values[0].value, first, epsilon = 1e-4);
    }
}

#[test]
fn test_moving_average_example_scenario() {
    let result = moving_averages("SP500", &sample_series(), &[5]).unwrap();
    let ma = result.window(5).unwrap();

    assert_eq!(ma.values.len(), 1);
    assert_eq!(ma.values[0].date, date("2024-01-05"));
    assert_eq!(ma.values[0].value, 103.6);
}

#[test]
fn test_volatility_example_scenario() {
    let result = volatility("SP500", &sample_series(), 2).unwrap();

    let returns: Vec<f64> = result.returns.iter().map(|p| p.value).collect();
    assert_relative_eq!(returns[0], 2.0);
    assert_relative_eq!(returns[1], -0.98, epsilon = 0.01);
    assert_relative_eq!(returns[2], 3.96, epsilon = 0.01);
    assert_relative_eq!(returns[3], 4.76, epsilon = 0.01);

    assert_eq!(result.volatility[0].date, date("2024-01-03"));
    assert_relative_eq!(result.volatility[0].value, 1.49, epsilon = 0.01);
}

#[test]
fn test_volatility_survives_zero_values() {
    let observations = vec![
        Observation::new(date("2024-01-01"), 1.0),
        Observation::new(date("2024-01-02"), 0.0),
        Observation::new(date("2024-01-03"), 0.0),
        Observation::new(date("2024-01-04"), 2.0),
    ];
    let result = volatility("SERIES", &observations, 2).unwrap();

    let returns: Vec<f64> = result.returns.iter().map(|p| p.value).collect();
    assert_eq!(returns, vec![-100.0, 0.0, 0.0]);
    assert_eq!(result.volatility.len(), 2);
    assert!(result.volatility.iter().all(|p| p.value.is_finite()));
}

#[test]
fn test_forecast_dgs10_uses_weekdays() {
    let observations = vec![
        Observation::new(date("2024-01-02"), 3.95),
        Observation::new(date("2024-01-03"), 3.91),
        Observation::new(date("2024-01-04"), 3.99),
        Observation::new(date("2024-01-05"), 4.05),
    ];
    let settings = ForecastSettings {
        noise: NoiseMode::Disabled,
        seed: None,
    };

    let result = forecast("DGS10", &observations, 10, "arima", &settings).unwrap();

    assert_eq!(result.frequency, Frequency::Daily);
    assert_eq!(result.forecast.len(), 10);
    assert_eq!(result.forecast[0].date, date("2024-01-08"));
    for pair in result.forecast.windows(2) {
        assert!(pair[0].date < pair[1].date);
    }
    for point in &result.forecast {
        assert!(!matches!(point.date.weekday(), Weekday::Sat | Weekday::Sun));
        assert!(point.lower <= point.value && point.value <= point.upper);
    }
}

#[test]
fn test_forecast_without_noise() {
    let settings = ForecastSettings {
        noise: NoiseMode::Disabled,
        seed: None,
    };
    let result = forecast("SP500", &sample_series(), 3, "arima", &settings).unwrap();

    assert_eq!(result.trend, 2.5);
    let triples: Vec<(f64, f64, f64)> = result
        .forecast
        .iter()
        .map(|p| (p.value, p.lower, p.upper))
        .collect();
    assert_eq!(
        triples,
        vec![(112.5, 107.5, 117.5), (115.0, 105.0, 125.0), (117.5, 102.5, 132.5)]
    );
}

#[test]
fn test_seeded_forecast_is_reproducible() {
    let settings = ForecastSettings {
        noise: NoiseMode::Uniform,
        seed: Some(42),
    };

    let first = forecast("UNRATE", &sample_series(), 5, "arima", &settings).unwrap();
    let second = forecast("UNRATE", &sample_series(), 5, "arima", &settings).unwrap();
    assert_eq!(first, second);

    let mut rng = StdRng::seed_from_u64(42);
    let explicit =
        forecast_with_rng("UNRATE", &sample_series(), 5, "arima", NoiseMode::Uniform, &mut rng)
            .unwrap();
    assert_eq!(first.forecast, explicit.forecast);

    // Noise stays within ten percent of the last value around the trend line
    for (step, point) in first.forecast.iter().enumerate() {
        let center = 110.0 + 2.5 * (step + 1) as f64;
        assert!((point.value - center).abs() <= 11.0 + 1e-3);
    }
}

#[test]
fn test_oversized_windows_return_empty_output() {
    let result = moving_averages("SP500", &sample_series(), &[usize::MAX]).unwrap();
    assert!(result.window(usize::MAX).unwrap().values.is_empty());
    assert_eq!(result.data.len(), 5);

    let result = volatility("SP500", &sample_series(), usize::MAX).unwrap();
    assert_eq!(result.returns.len(), 4);
    assert!(result.volatility.is_empty());
}

#[test]
fn test_forecast_horizon_past_calendar_is_an_error() {
    let settings = ForecastSettings {
        noise: NoiseMode::Disabled,
        seed: None,
    };

    let err = forecast("UNRATE", &sample_series(), usize::MAX, "arima", &settings).unwrap_err();
    assert!(matches!(err, AnalyticsError::InvalidParameter(_)));
}

#[test]
fn test_moving_average_after_large_value_leaves_window() {
    let mut observations = vec![Observation::new(date("2024-01-01"), 1e16)];
    for day in 2..=11 {
        observations.push(Observation::new(
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            0.1,
        ));
    }

    let result = moving_averages("SERIES", &observations, &[2]).unwrap();
    let last = result.window(2).unwrap().values.last().copied().unwrap();

    assert_eq!(last.date, date("2024-01-11"));
    assert_eq!(last.value, 0.1);
}
