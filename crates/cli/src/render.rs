//! Terminal rendering of result snapshots.

use movielookup_core::{DisplayStatus, MovieSummary, ResultSnapshot};

/// Height of one result line in viewport units.
pub const ROW_HEIGHT: f64 = 1.0;

pub fn movie_line(index: usize, movie: &MovieSummary) -> String {
    let year: &str = if movie.year.is_empty() { "?" } else { &movie.year };
    let mut line = format!("{:>4}. {} ({})  IMDb: {}", index + 1, movie.title, year, movie.id);
    if !movie.poster_url.is_empty() && movie.poster_url != "N/A" {
        line.push_str("  ");
        line.push_str(&movie.poster_url);
    }
    line
}

/// Lines to print for the transition from `previous` to `next`.
///
/// Appended pages print only the new rows; a replaced list is printed again
/// from the top.
pub fn render_update(previous: &ResultSnapshot, next: &ResultSnapshot) -> Vec<String> {
    let mut lines = Vec::new();

    if next.loading {
        if !previous.loading {
            lines.push("Searching...".to_string());
        }
        return lines;
    }

    let appended = !previous.movies.is_empty()
        && next.movies.len() > previous.movies.len()
        && next.movies.starts_with(&previous.movies);

    if appended {
        lines.extend(
            next.movies
                .iter()
                .enumerate()
                .skip(previous.movies.len())
                .map(|(i, movie)| movie_line(i, movie)),
        );
    } else if next.movies != previous.movies {
        if !next.movies.is_empty() {
            lines.push(format!("-- {} results --", next.movies.len()));
        }
        lines.extend(
            next.movies
                .iter()
                .enumerate()
                .map(|(i, movie)| movie_line(i, movie)),
        );
    }

    match next.status() {
        DisplayStatus::Error => lines.push(format!("Error: {}", next.error)),
        DisplayStatus::NothingFound => lines.push("Nothing found".to_string()),
        DisplayStatus::Results => {}
    }

    lines
}
