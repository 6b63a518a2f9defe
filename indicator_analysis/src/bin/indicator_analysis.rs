use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use indexmap::IndexMap;
use indicator_analysis::config::AnalysisConfig;
use indicator_analysis::data::{filter_range, parse_series_map, select_series};
use indicator_analysis::{
    correlate, forecast, known_info, moving_averages, source, summarize, transform, volatility,
    AnalysisOutcome, NoiseMode, Observation, RawSeriesMap, SeriesMap,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(version, about = "Economic indicator time-series analytics")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Args)]
struct Common {
    /// JSON object of series id -> observations, or a series_id,date,value CSV
    #[arg(long, value_name = "FILE")]
    input: PathBuf,
    /// Series to analyze, comma separated (default: every series in the input)
    #[arg(long, value_delimiter = ',')]
    series: Vec<String>,
    #[arg(long, value_name = "YYYY-MM-DD")]
    start_date: Option<NaiveDate>,
    #[arg(long, value_name = "YYYY-MM-DD")]
    end_date: Option<NaiveDate>,
    /// TOML analysis configuration; flags override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Write the JSON result here instead of stdout
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Pairwise correlation matrix of the selected series
    Correlation {
        #[command(flatten)]
        common: Common,
    },
    /// Trend forecast with confidence bounds
    Forecast {
        #[command(flatten)]
        common: Common,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        periods: Option<usize>,
        /// Seed the noise generator for reproducible output
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        no_noise: bool,
    },
    /// Simple moving averages
    MovingAverages {
        #[command(flatten)]
        common: Common,
        #[arg(long, value_delimiter = ',')]
        windows: Vec<usize>,
    },
    /// Rolling volatility of percentage returns
    Volatility {
        #[command(flatten)]
        common: Common,
        #[arg(long)]
        window: Option<usize>,
    },
    /// Descriptive statistics per series
    Summary {
        #[command(flatten)]
        common: Common,
    },
    /// Forward-filled records with ma_5, ma_20 and percent change
    Transform {
        #[command(flatten)]
        common: Common,
    },
}

impl Cmd {
    fn common(&self) -> &Common {
        match self {
            Cmd::Correlation { common }
            | Cmd::Forecast { common, .. }
            | Cmd::MovingAverages { common, .. }
            | Cmd::Volatility { common, .. }
            | Cmd::Summary { common }
            | Cmd::Transform { common } => common,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let result = run(&cli.cmd)?;
    let json = serde_json::to_string_pretty(&result)?;

    write_output(cli.cmd.common().output.as_deref(), &json)
}

fn run(cmd: &Cmd) -> Result<serde_json::Value> {
    let common = cmd.common();

    let mut config = match &common.config {
        Some(path) => AnalysisConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    let raw = source::load_path(&common.input)
        .with_context(|| format!("failed to read observations from {}", common.input.display()))?;
    let series = prepare(common, &raw);

    let value = match cmd {
        Cmd::Correlation { .. } => {
            let metadata = series
                .keys()
                .map(|id| (id.clone(), known_info(id).unwrap_or_default()))
                .collect();
            serde_json::to_value(correlate(&series, &metadata))?
        }
        Cmd::Forecast {
            model,
            periods,
            seed,
            no_noise,
            ..
        } => {
            if let Some(model) = model {
                config.forecast.model = model.clone();
            }
            if let Some(periods) = periods {
                config.forecast.periods = *periods;
            }
            if seed.is_some() {
                config.forecast.seed = *seed;
            }
            if *no_noise {
                config.forecast.noise = NoiseMode::Disabled;
            }
            let settings = config.forecast_settings();
            serde_json::to_value(per_series(&series, |id, observations| {
                forecast(
                    id,
                    observations,
                    config.forecast.periods,
                    &config.forecast.model,
                    &settings,
                )
            }))?
        }
        Cmd::MovingAverages { windows, .. } => {
            if !windows.is_empty() {
                config.moving_average.windows = windows.clone();
            }
            let windows = &config.moving_average.windows;
            serde_json::to_value(per_series(&series, |id, observations| {
                moving_averages(id, observations, windows)
            }))?
        }
        Cmd::Volatility { window, .. } => {
            let window = window.unwrap_or(config.volatility.window);
            serde_json::to_value(per_series(&series, |id, observations| {
                volatility(id, observations, window)
            }))?
        }
        Cmd::Summary { .. } => serde_json::to_value(summarize(&series))?,
        Cmd::Transform { common } => serde_json::to_value(transform_all(common, &raw))?,
    };

    Ok(value)
}

/// Parse, date-filter and select the requested series
fn prepare(common: &Common, raw: &RawSeriesMap) -> SeriesMap {
    let parsed: SeriesMap = parse_series_map(raw)
        .into_iter()
        .map(|(id, observations)| {
            let kept = filter_range(&observations, common.start_date, common.end_date);
            (id, kept)
        })
        .collect();
    select_series(&parsed, &common.series)
}

fn per_series<T, F>(series: &SeriesMap, analysis: F) -> IndexMap<String, AnalysisOutcome<T>>
where
    F: Fn(&str, &[Observation]) -> indicator_analysis::Result<T>,
{
    series
        .iter()
        .map(|(id, observations)| (id.clone(), analysis(id, observations).into()))
        .collect()
}

// Transform works on the raw provider rows, so the date range is applied to
// its output records.
fn transform_all(
    common: &Common,
    raw: &RawSeriesMap,
) -> IndexMap<String, AnalysisOutcome<indicator_analysis::TransformOutput>> {
    let ids: Vec<String> = if common.series.is_empty() {
        raw.keys().cloned().collect()
    } else {
        common.series.clone()
    };

    ids.iter()
        .map(|id| {
            let rows = raw.get(id).map(Vec::as_slice).unwrap_or(&[]);
            let result = transform(id, rows).map(|mut output| {
                output.records.retain(|record| {
                    common.start_date.map_or(true, |start| record.date >= start)
                        && common.end_date.map_or(true, |end| record.date <= end)
                });
                output
            });
            (id.clone(), result.into())
        })
        .collect()
}

fn write_output(path: Option<&Path>, json: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("wrote result to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
