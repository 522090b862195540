//! Write a small synthetic raw catalog (`sample_titles.csv`) in the layout of
//! `netflix_titles.csv`, including the kinds of gaps the cleaner tolerates.

use anyhow::{Context, Result};

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August",
    "September", "October", "November", "December",
];
const COUNTRIES: [&str; 6] = [
    "United States", "India", "United Kingdom", "Japan", "South Korea", "Spain",
];
const MOVIE_GENRES: [&str; 6] = [
    "Dramas", "Comedies", "International Movies", "Documentaries", "Action & Adventure",
    "Thrillers",
];
const SHOW_GENRES: [&str; 5] = [
    "International TV Shows", "TV Dramas", "TV Comedies", "Crime TV Shows", "Kids' TV",
];
const DIRECTORS: [&str; 4] = ["Ava Lindqvist", "Rahul Mehta", "Kenji Sato", "Maria Lopez"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform integer in `lo..=hi`.
    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64() % (hi - lo + 1)
    }

    fn chance(&mut self, percent: u64) -> bool {
        self.range(1, 100) <= percent
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.range(0, items.len() as u64 - 1) as usize]
    }

    /// One to three distinct genres joined with ", ".
    fn genres(&mut self, pool: &[&str]) -> String {
        let mut chosen: Vec<&str> = Vec::new();
        for _ in 0..self.range(1, 3) {
            let g = self.pick(pool);
            if !chosen.contains(&g) {
                chosen.push(g);
            }
        }
        chosen.join(", ")
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let mut rng = SimpleRng::new(42);
    let output_path = "sample_titles.csv";

    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record([
        "show_id", "type", "title", "director", "cast", "country", "date_added",
        "release_year", "rating", "duration", "listed_in", "description",
    ])?;

    let n_titles = 200;
    for i in 1..=n_titles {
        let is_movie = rng.chance(70);
        let release_year = rng.range(1990, 2021);

        let date_added = if rng.chance(3) {
            "not-a-date".to_string()
        } else if rng.chance(2) {
            String::new()
        } else {
            let year = rng.range(release_year.max(2008), 2021);
            let month = MONTHS[rng.range(0, 11) as usize];
            format!("{month} {}, {year}", rng.range(1, 28))
        };

        let (kind, duration, listed_in, rating) = if is_movie {
            (
                "Movie",
                format!("{} min", rng.range(60, 180)),
                rng.genres(&MOVIE_GENRES),
                rng.pick(&["PG", "PG-13", "R", "TV-MA"]),
            )
        } else {
            let seasons = rng.range(1, 6);
            let unit = if seasons == 1 { "Season" } else { "Seasons" };
            (
                "TV Show",
                format!("{seasons} {unit}"),
                rng.genres(&SHOW_GENRES),
                rng.pick(&["TV-Y", "TV-14", "TV-MA"]),
            )
        };

        let director = if is_movie && rng.chance(80) { rng.pick(&DIRECTORS) } else { "" };
        let country = if rng.chance(90) { rng.pick(&COUNTRIES) } else { "" };
        let cast = if rng.chance(85) { "Lead Actor, Supporting Actor" } else { "" };

        writer.write_record([
            format!("s{i}"),
            kind.to_string(),
            format!("Sample Title {i}"),
            director.to_string(),
            cast.to_string(),
            country.to_string(),
            date_added,
            release_year.to_string(),
            rating.to_string(),
            duration,
            listed_in,
            format!("Synthetic description for title {i}."),
        ])?;
    }
    writer.flush()?;

    println!("Wrote {n_titles} titles to {output_path}");
    Ok(())
}
