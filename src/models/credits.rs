use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One row of the poster links file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PosterLink {
    #[serde(rename = "movieId")]
    pub movie_id: i64,
    pub poster_link: String,
}

/// One row of the cast and crew file.
///
/// Only `movieId` is interpreted. Every other column is kept as-is, keyed by
/// its header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CastCrew {
    pub movie_id: i64,
    pub fields: BTreeMap<String, String>,
}
