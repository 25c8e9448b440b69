use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use marquee_models::{Movie, RecommendedMovie, Review, SearchCandidate, Theme, NOT_AVAILABLE};

/// Base table styled for the current theme
pub fn themed_table(theme: Theme) -> Table {
    let mut table = Table::new();
    match theme {
        Theme::Dark => {
            table.load_preset(presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
        }
        Theme::Light => {
            table.load_preset(presets::ASCII_FULL);
        }
    }
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn header_cell(theme: Theme, text: &str) -> Cell {
    let color = match theme {
        Theme::Dark => Color::Cyan,
        Theme::Light => Color::DarkBlue,
    };
    Cell::new(text).fg(color).add_attribute(Attribute::Bold)
}

fn headers(theme: Theme, names: &[&str]) -> Vec<Cell> {
    names.iter().map(|n| header_cell(theme, n)).collect()
}

pub fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

pub fn candidates_table(theme: Theme, candidates: &[SearchCandidate]) -> Table {
    let mut table = themed_table(theme);
    table.set_header(headers(theme, &["#", "IMDb ID", "Title", "Year", "Type"]));
    for (i, c) in candidates.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&c.imdb_id),
            Cell::new(&c.title),
            Cell::new(&c.year),
            Cell::new(&c.media_type),
        ]);
    }
    table
}

pub fn movies_table(theme: Theme, movies: &[&Movie]) -> Table {
    let mut table = themed_table(theme);
    table.set_header(headers(
        theme,
        &["IMDb ID", "Title", "Year", "Genre", "Director", "Rating", "Category"],
    ));
    for m in movies {
        table.add_row(vec![
            Cell::new(&m.imdb_id),
            Cell::new(&m.title),
            Cell::new(&m.year),
            Cell::new(m.primary_genre().unwrap_or(NOT_AVAILABLE)),
            Cell::new(m.primary_director().unwrap_or(NOT_AVAILABLE)),
            Cell::new(&m.imdb_rating),
            Cell::new(m.category_or_default()),
        ]);
    }
    table
}

/// Key/value card for one full movie record
pub fn movie_card(theme: Theme, movie: &Movie) -> Table {
    let mut table = themed_table(theme);
    table.set_header(vec![
        header_cell(theme, &movie.title),
        Cell::new(&movie.year),
    ]);
    let rows = [
        ("IMDb ID", movie.imdb_id.as_str()),
        ("Genre", movie.genre.as_str()),
        ("Director", movie.director.as_str()),
        ("Actors", movie.actors.as_str()),
        ("IMDb rating", movie.imdb_rating.as_str()),
        ("Plot", movie.plot.as_str()),
        ("Poster", if movie.has_poster() { movie.poster.as_str() } else { NOT_AVAILABLE }),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    if let Some(category) = &movie.category {
        table.add_row(vec![Cell::new("Category"), Cell::new(category)]);
    }
    table
}

pub fn reviews_table(theme: Theme, reviews: &[&Review]) -> Table {
    let mut table = themed_table(theme);
    table.set_header(headers(
        theme,
        &["ID", "Movie", "Name", "Rating", "Recommend", "Date", "Comment"],
    ));
    for r in reviews {
        table.add_row(vec![
            Cell::new(&r.id),
            Cell::new(&r.movie_id),
            Cell::new(&r.name),
            Cell::new(stars(r.rating)),
            Cell::new(r.recommend.map_or("-", |rec| rec.as_str())),
            Cell::new(&r.date),
            Cell::new(&r.comment),
        ]);
    }
    table
}

pub fn recommendations_table(theme: Theme, recommendations: &[RecommendedMovie]) -> Table {
    let mut table = themed_table(theme);
    table.set_header(headers(theme, &["ID", "Title", "Reason", "Date"]));
    for r in recommendations {
        table.add_row(vec![
            Cell::new(&r.id),
            Cell::new(&r.title),
            Cell::new(&r.reason),
            Cell::new(&r.date),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stars() {
        assert_eq!(stars(0), "☆☆☆☆☆");
        assert_eq!(stars(3), "★★★☆☆");
        assert_eq!(stars(9), "★★★★★");
    }

    #[test]
    fn test_candidates_table_lists_every_candidate() {
        let candidates = vec![SearchCandidate {
            imdb_id: "tt1375666".to_string(),
            title: "Inception".to_string(),
            year: "2010".to_string(),
            poster: NOT_AVAILABLE.to_string(),
            media_type: "movie".to_string(),
        }];
        let rendered = candidates_table(Theme::Light, &candidates).to_string();
        assert!(rendered.contains("Inception"));
        assert!(rendered.contains("tt1375666"));
    }

    #[test]
    fn test_movies_table_shows_first_director() {
        let movie = Movie {
            imdb_id: "tt0133093".to_string(),
            title: "The Matrix".to_string(),
            year: "1999".to_string(),
            poster: NOT_AVAILABLE.to_string(),
            plot: NOT_AVAILABLE.to_string(),
            genre: "Action, Sci-Fi".to_string(),
            imdb_rating: "8.7".to_string(),
            director: "Lana Wachowski, Lilly Wachowski".to_string(),
            actors: "Keanu Reeves".to_string(),
            category: None,
        };
        let rendered = movies_table(Theme::Light, &[&movie]).to_string();
        assert!(rendered.contains("Lana Wachowski"));
        assert!(!rendered.contains("Lilly Wachowski"));
        assert!(rendered.contains("Uncategorized"));
    }
}
