use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use super::filter::TypeFilter;
use super::model::TitleRecord;

/// How many distinct season counts the TV show distribution keeps.
pub const TOP_SEASON_VALUES: usize = 10;

// ---------------------------------------------------------------------------
// Counting helpers
// ---------------------------------------------------------------------------

/// Count keys, keeping buckets in order of first appearance.
fn counts_in_first_seen_order<K, I>(keys: I) -> Vec<(K, usize)>
where
    K: Hash + Eq + Clone,
    I: IntoIterator<Item = K>,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();
    for key in keys {
        match slots.get(&key) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }
    counts
}

/// Highest `k` counts. The sort is stable, so ties keep first-seen order.
fn top_k<K>(mut counts: Vec<(K, usize)>, k: usize) -> Vec<(K, usize)> {
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(k);
    counts
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// One `(title, genre)` pair per genre of every title.
pub fn explode_genres<'a, I>(titles: I) -> Vec<(&'a TitleRecord, &'a str)>
where
    I: IntoIterator<Item = &'a TitleRecord>,
{
    titles
        .into_iter()
        .flat_map(|rec| rec.genres.iter().map(move |g| (rec, g.as_str())))
        .collect()
}

/// The `k` most frequent genres, most frequent first.
///
/// Empty genre strings (titles without `listed_in`) are not a genre and are
/// left out of the count.
pub fn top_genres<'a, I>(titles: I, k: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a TitleRecord>,
{
    let genres = explode_genres(titles)
        .into_iter()
        .map(|(_, genre)| genre)
        .filter(|genre| !genre.is_empty());
    top_k(counts_in_first_seen_order(genres), k)
        .into_iter()
        .map(|(genre, count)| (genre.to_string(), count))
        .collect()
}

/// Titles per release year, ascending by year.
pub fn yearly_trend<'a, I>(titles: I) -> Vec<(i32, usize)>
where
    I: IntoIterator<Item = &'a TitleRecord>,
{
    let mut per_year: BTreeMap<i32, usize> = BTreeMap::new();
    for rec in titles {
        *per_year.entry(rec.release_year).or_default() += 1;
    }
    per_year.into_iter().collect()
}

/// The `k` countries with the most titles. "Unknown" counts as a country.
pub fn top_countries<'a, I>(titles: I, k: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a TitleRecord>,
{
    let countries = titles.into_iter().map(TitleRecord::country_label);
    top_k(counts_in_first_seen_order(countries), k)
        .into_iter()
        .map(|(country, count)| (country.to_string(), count))
        .collect()
}

/// Duration values for one content type.
#[derive(Debug, Clone, PartialEq)]
pub enum DurationDistribution {
    /// Movie running times in minutes, one value per movie.
    Minutes(Vec<u32>),
    /// `(seasons, shows)` for the most frequent season counts.
    Seasons(Vec<(u32, usize)>),
    /// No single content type was selected.
    NotApplicable,
}

impl DurationDistribution {
    pub fn is_empty(&self) -> bool {
        match self {
            DurationDistribution::Minutes(v) => v.is_empty(),
            DurationDistribution::Seasons(v) => v.is_empty(),
            DurationDistribution::NotApplicable => true,
        }
    }
}

/// Duration distribution of the titles of the selected type.
///
/// Titles of the other type contribute nothing. `TypeFilter::All` yields
/// [`DurationDistribution::NotApplicable`]: minutes and seasons do not share
/// an axis.
pub fn duration_distribution<'a, I>(titles: I, filter: TypeFilter) -> DurationDistribution
where
    I: IntoIterator<Item = &'a TitleRecord>,
{
    match filter {
        TypeFilter::All => DurationDistribution::NotApplicable,
        TypeFilter::Movie => DurationDistribution::Minutes(
            titles
                .into_iter()
                .filter_map(TitleRecord::duration_minutes)
                .collect(),
        ),
        TypeFilter::TvShow => {
            let seasons = titles.into_iter().filter_map(TitleRecord::num_seasons);
            DurationDistribution::Seasons(top_k(
                counts_in_first_seen_order(seasons),
                TOP_SEASON_VALUES,
            ))
        }
    }
}

// ---------------------------------------------------------------------------
// Histogram bucketing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Split `values` into `bins` equal-width bins spanning `[min, max]`.
/// The last bin includes `max`.
pub fn histogram(values: &[u32], bins: usize) -> Vec<HistogramBin> {
    let (Some(&min), Some(&max)) = (values.iter().min(), values.iter().max()) else {
        return Vec::new();
    };
    if bins == 0 {
        return Vec::new();
    }

    let (lo, hi) = if min == max {
        (f64::from(min) - 0.5, f64::from(max) + 0.5)
    } else {
        (f64::from(min), f64::from(max))
    };
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = ((f64::from(v) - lo) / width) as usize;
        counts[idx.min(bins - 1)] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: lo + i as f64 * width,
            end: lo + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Summary – everything one dashboard page shows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub filter: TypeFilter,
    pub titles: usize,
    pub top_genres: Vec<(String, usize)>,
    pub yearly_trend: Vec<(i32, usize)>,
    pub top_countries: Vec<(String, usize)>,
    pub durations: DurationDistribution,
}

impl Summary {
    /// Run every query over titles that already passed `filter`.
    pub fn compute(titles: &[&TitleRecord], filter: TypeFilter, top_k: usize) -> Self {
        Summary {
            filter,
            titles: titles.len(),
            top_genres: top_genres(titles.iter().copied(), top_k),
            yearly_trend: yearly_trend(titles.iter().copied()),
            top_countries: top_countries(titles.iter().copied(), top_k),
            durations: duration_distribution(titles.iter().copied(), filter),
        }
    }
}

impl Default for Summary {
    fn default() -> Self {
        Summary::compute(&[], TypeFilter::All, 0)
    }
}
