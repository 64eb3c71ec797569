use serde::{Deserialize, Serialize};

/// Sentinel the movies file uses for a movie without genres
pub const NO_GENRES_LISTED: &str = "(no genres listed)";

/// A catalog entry with its release year split out of the title
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub movie_id: i64,
    /// Title with any trailing `(YYYY)` removed
    pub title: String,
    pub year: Option<i32>,
    pub genres: Vec<String>,
}

impl Movie {
    /// Builds a movie from the raw `title` and `genres` columns
    pub fn from_raw(movie_id: i64, raw_title: &str, raw_genres: &str) -> Self {
        let (title, year) = parse_title(raw_title);
        Self {
            movie_id,
            title,
            year,
            genres: parse_genres(raw_genres),
        }
    }

    /// Case-insensitive genre membership, folding with Unicode lowercase
    pub fn has_genre(&self, genre: &str) -> bool {
        let genre = genre.to_lowercase();
        self.genres.iter().any(|g| g.to_lowercase() == genre)
    }
}

/// A movie joined with its poster link
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieMetadata {
    pub movie_id: i64,
    pub title: String,
    pub year: Option<i32>,
    pub genres: Vec<String>,
    pub poster_link: Option<String>,
}

impl MovieMetadata {
    pub fn new(movie: Movie, poster_link: Option<String>) -> Self {
        Self {
            movie_id: movie.movie_id,
            title: movie.title,
            year: movie.year,
            genres: movie.genres,
            poster_link,
        }
    }
}

/// Splits a trailing `(YYYY)` off a title.
///
/// The year must be exactly four ASCII digits in parentheses at the very end
/// of the string. Whitespace between the title and the year is dropped. A
/// title without a trailing year comes back unchanged with no year.
pub fn parse_title(raw: &str) -> (String, Option<i32>) {
    let Some(inner) = raw.strip_suffix(')') else {
        return (raw.to_string(), None);
    };

    if inner.len() < 5 || !inner.is_char_boundary(inner.len() - 5) {
        return (raw.to_string(), None);
    }

    let (head, tail) = inner.split_at(inner.len() - 5);
    let Some(digits) = tail.strip_prefix('(') else {
        return (raw.to_string(), None);
    };

    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return (raw.to_string(), None);
    }

    match digits.parse::<i32>() {
        Ok(year) => (head.trim_end().to_string(), Some(year)),
        Err(_) => (raw.to_string(), None),
    }
}

/// Splits a pipe-delimited genre string, mapping the sentinel to no genres
pub fn parse_genres(raw: &str) -> Vec<String> {
    if raw == NO_GENRES_LISTED {
        return Vec::new();
    }

    raw.split('|')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_title_with_year() {
        assert_eq!(
            parse_title("Toy Story (1995)"),
            ("Toy Story".to_string(), Some(1995))
        );
    }

    #[test]
    fn test_parse_title_is_idempotent() {
        let (title, year) = parse_title("Toy Story (1995)");
        assert_eq!(year, Some(1995));
        assert_eq!(parse_title(&title), ("Toy Story".to_string(), None));
    }

    #[test]
    fn test_parse_title_without_year() {
        assert_eq!(
            parse_title("Babylon 5"),
            ("Babylon 5".to_string(), None)
        );
    }

    #[test]
    fn test_parse_title_only_strips_trailing_year() {
        assert_eq!(
            parse_title("Dracula (1931) Remastered"),
            ("Dracula (1931) Remastered".to_string(), None)
        );
        assert_eq!(
            parse_title("City of Lost Children, The (Cité des enfants perdus, La) (1995)"),
            (
                "City of Lost Children, The (Cité des enfants perdus, La)".to_string(),
                Some(1995)
            )
        );
    }

    #[test]
    fn test_parse_title_rejects_non_year_parentheses() {
        assert_eq!(parse_title("Movie (abcd)"), ("Movie (abcd)".to_string(), None));
        assert_eq!(parse_title("Movie (19955)"), ("Movie (19955)".to_string(), None));
        assert_eq!(parse_title("(1995)"), (String::new(), Some(1995)));
    }

    #[test]
    fn test_parse_title_multibyte_does_not_panic() {
        assert_eq!(parse_title("Amélie)"), ("Amélie)".to_string(), None));
        assert_eq!(parse_title("éé)"), ("éé)".to_string(), None));
    }

    #[test]
    fn test_parse_genres() {
        assert_eq!(parse_genres("Comedy|Romance"), vec!["Comedy", "Romance"]);
        assert!(parse_genres(NO_GENRES_LISTED).is_empty());
    }

    #[test]
    fn test_movie_from_raw_toy_story() {
        let movie = Movie::from_raw(
            1,
            "Toy Story (1995)",
            "Adventure|Animation|Children|Comedy|Fantasy",
        );
        assert_eq!(movie.title, "Toy Story");
        assert_eq!(movie.year, Some(1995));
        assert_eq!(
            movie.genres,
            vec!["Adventure", "Animation", "Children", "Comedy", "Fantasy"]
        );
    }

    #[test]
    fn test_has_genre_is_case_insensitive() {
        let movie = Movie::from_raw(2, "Jumanji (1995)", "Adventure|Children|Fantasy");
        assert!(movie.has_genre("fantasy"));
        assert!(movie.has_genre("ADVENTURE"));
        assert!(!movie.has_genre("Comedy"));

        let amelie = Movie::from_raw(4973, "Amélie (2001)", "Comédie|Romance");
        assert!(amelie.has_genre("COMÉDIE"));
    }
}
