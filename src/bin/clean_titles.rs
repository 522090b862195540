use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use netflix_eda::data::aggregate::{
    duration_distribution, histogram, top_countries, top_genres, yearly_trend,
    DurationDistribution,
};
use netflix_eda::data::clean::{clean, CleanReport};
use netflix_eda::data::export::export_file;
use netflix_eda::data::filter::TypeFilter;
use netflix_eda::data::loader::load_file;
use netflix_eda::data::model::Catalog;
use netflix_eda::report;
use netflix_eda::Settings;

/// Clean the raw Netflix catalog, print summary tables and write the
/// cleaned file used by the dashboard.
#[derive(Parser, Debug)]
#[command(name = "clean_titles", version, about, long_about = None)]
struct Cli {
    /// Raw catalog (.csv or .parquet) [default: netflix_titles.csv]
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Cleaned output (.csv or .parquet) [default: netflix_cleaned.csv]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Rows in the top-genre and top-country tables
    #[arg(short = 'k', long)]
    top: Option<usize>,

    /// Only clean and write; skip the summary tables
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(input) = cli.input {
        settings.raw_path = input;
    }
    if let Some(output) = cli.output {
        settings.cleaned_path = output;
    }
    if let Some(top) = cli.top {
        settings.top_k = top;
    }

    let mut catalog = load_file(&settings.raw_path)
        .with_context(|| format!("loading {}", settings.raw_path.display()))?;
    let clean_report = clean(&mut catalog).context("cleaning catalog")?;

    if !cli.quiet {
        print_summary(&catalog, &clean_report, &settings)?;
    }

    export_file(&catalog, &settings.cleaned_path)
        .with_context(|| format!("exporting {}", settings.cleaned_path.display()))?;
    Ok(())
}

fn print_summary(catalog: &Catalog, clean_report: &CleanReport, settings: &Settings) -> Result<()> {
    let k = settings.top_k;

    println!("{}", report::preview(catalog, 5)?);
    println!("{}", report::column_summary(catalog)?);
    println!(
        "{} titles, {} unparsable dates, {} durations without a number, {} without genres",
        catalog.len(),
        clean_report.unparsed_dates,
        clean_report.unparsed_durations,
        clean_report.empty_genres
    );

    println!("\nTop {k} genres");
    println!("{}", report::counts_table("genre", &top_genres(&catalog.records, k))?);

    println!("\nTitles per release year");
    println!("{}", report::counts_table("release_year", &yearly_trend(&catalog.records))?);

    println!("\nTop {k} countries");
    println!("{}", report::counts_table("country", &top_countries(&catalog.records, k))?);

    if let DurationDistribution::Minutes(minutes) =
        duration_distribution(&catalog.records, TypeFilter::Movie)
    {
        println!("\nMovie duration distribution");
        let bins = histogram(&minutes, settings.movie_bins);
        println!("{}", report::histogram_table("minutes", &bins)?);
    }

    if let DurationDistribution::Seasons(seasons) =
        duration_distribution(&catalog.records, TypeFilter::TvShow)
    {
        println!("\nTV show season count distribution");
        println!("{}", report::counts_table("seasons", &seasons)?);
    }

    Ok(())
}
