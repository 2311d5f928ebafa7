mod conversions;
pub mod keys;
mod mapper;
mod types;

pub use conversions::{info_to_update, item_to_details, item_to_movie, movie_to_item};
pub use mapper::{decode_items, decode_movies, DecodeFault, Decoded};
pub use types::{Movie, MovieDetails, MovieInfo, MovieKey, YearRange, YearRangeError};
