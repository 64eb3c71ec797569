pub mod credits;
pub mod movie;
pub mod rating;
pub mod recommendation;

pub use credits::{CastCrew, PosterLink};
pub use movie::{parse_genres, parse_title, Movie, MovieMetadata};
pub use rating::{Rating, UserRating};
pub use recommendation::RecommendationItem;
