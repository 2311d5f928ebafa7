//! Movie <-> item conversion functions.
//!
//! Pure functions for converting between attribute maps and movie types.
//! These are testable in isolation without store access.

use crate::attribute::{
    get_number, get_optional_number, get_optional_string, get_string, number, string, CodecError,
    Item,
};
use crate::expression::UpdateExpression;

use super::keys::{PLOT, RANK, TITLE, YEAR};
use super::{Movie, MovieDetails, MovieInfo};

/// Convert a Movie to an item.
pub fn movie_to_item(movie: &Movie) -> Item {
    let mut item = Item::new();
    item.insert(YEAR.to_string(), number(movie.year));
    item.insert(TITLE.to_string(), string(movie.title.clone()));
    item
}

/// Convert a patch into a `SET` update. Absent fields are left out.
pub fn info_to_update(info: &MovieInfo) -> UpdateExpression {
    let mut update = UpdateExpression::new();
    if let Some(plot) = &info.plot {
        update = update.set(PLOT, string(plot.clone()));
    }
    if let Some(rank) = info.rank {
        update = update.set(RANK, number(rank));
    }
    update
}

/// Convert an item to a Movie. Both key attributes must be present and well-formed.
pub fn item_to_movie(item: &Item) -> Result<Movie, CodecError> {
    Ok(Movie {
        year: get_number(item, YEAR)?,
        title: get_string(item, TITLE)?,
    })
}

/// Convert an item to MovieDetails.
///
/// Key attributes are required. Malformed `Plot`/`Rank` are dropped with a
/// warning rather than failing the whole item.
pub fn item_to_details(item: &Item) -> Result<MovieDetails, CodecError> {
    let movie = item_to_movie(item)?;

    let plot = get_optional_string(item, PLOT).unwrap_or_else(|err| {
        tracing::warn!(key = %movie.key(), error = %err, "Ignoring malformed attribute");
        None
    });
    let rank = get_optional_number(item, RANK).unwrap_or_else(|err| {
        tracing::warn!(key = %movie.key(), error = %err, "Ignoring malformed attribute");
        None
    });

    Ok(MovieDetails {
        movie,
        info: MovieInfo { plot, rank },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::AttributeValue;

    #[test]
    fn test_movie_round_trip() {
        let movie = Movie::new(1999, "The Matrix");
        let parsed = item_to_movie(&movie_to_item(&movie)).unwrap();
        assert_eq!(parsed, movie);
    }

    #[test]
    fn test_movie_item_has_only_key_attributes() {
        let item = movie_to_item(&Movie::new(2013, "Rush"));
        assert_eq!(item.len(), 2);
        assert_eq!(item.get("Year").unwrap().as_n().unwrap(), "2013");
        assert_eq!(item.get("Title").unwrap().as_s().unwrap(), "Rush");
    }

    #[test]
    fn test_info_to_update_skips_absent_fields() {
        let update = info_to_update(&MovieInfo::new().with_rank(3));
        assert_eq!(update.set, vec![("Rank".to_string(), number(3))]);

        let update = info_to_update(&MovieInfo::new().with_plot("p").with_rank(1));
        assert_eq!(update.set.len(), 2);

        assert!(info_to_update(&MovieInfo::new()).is_empty());
    }

    #[test]
    fn test_item_to_movie_missing_title() {
        let mut item = Item::new();
        item.insert("Year".to_string(), number(1999));

        assert_eq!(
            item_to_movie(&item),
            Err(CodecError::Missing {
                field: "Title".to_string()
            })
        );
    }

    #[test]
    fn test_item_to_details_with_info() {
        let mut item = movie_to_item(&Movie::new(1999, "The Matrix"));
        item.insert("Plot".to_string(), string("Neo wakes up."));
        item.insert("Rank".to_string(), number(1));

        let details = item_to_details(&item).unwrap();

        assert_eq!(details.movie, Movie::new(1999, "The Matrix"));
        assert_eq!(
            details.info,
            MovieInfo::new().with_plot("Neo wakes up.").with_rank(1)
        );
    }

    #[test]
    fn test_item_to_details_drops_malformed_info() {
        let mut item = movie_to_item(&Movie::new(1999, "The Matrix"));
        item.insert("Plot".to_string(), AttributeValue::Bool(true));
        item.insert("Rank".to_string(), AttributeValue::N("first".to_string()));

        let details = item_to_details(&item).unwrap();

        assert!(details.info.is_empty());
    }
}
