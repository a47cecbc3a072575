use serde::{Deserialize, Deserializer, Serialize};

use crate::entities::{director, genre, movie};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MovieView {
    pub id: i32,
    pub title: Option<String>,
    pub description: Option<String>,
    pub trailer: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<f64>,
}

impl From<movie::Model> for MovieView {
    fn from(m: movie::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            trailer: m.trailer,
            year: m.year,
            rating: m.rating,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DirectorView {
    pub id: i32,
    pub name: Option<String>,
}

impl From<director::Model> for DirectorView {
    fn from(d: director::Model) -> Self {
        Self { id: d.id, name: d.name }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GenreView {
    pub id: i32,
    pub name: Option<String>,
}

impl From<genre::Model> for GenreView {
    fn from(g: genre::Model) -> Self {
        Self { id: g.id, name: g.name }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MovieFilter {
    pub director_id: Option<i32>,
    pub genre_id: Option<i32>,
}

/// Raw `GET /movies/` query parameters.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MovieQuery {
    pub director_id: Option<String>,
    pub genre_id: Option<String>,
}

impl MovieQuery {
    /// Returns `None` when a present parameter is not an integer. No foreign
    /// key can equal such a value, so the caller answers with an empty list.
    pub fn into_filter(self) -> Option<MovieFilter> {
        Some(MovieFilter {
            director_id: parse_id(self.director_id)?,
            genre_id: parse_id(self.genre_id)?,
        })
    }
}

fn parse_id(raw: Option<String>) -> Option<Option<i32>> {
    match raw {
        None => Some(None),
        Some(s) => s.trim().parse().ok().map(Some),
    }
}

/// Writable movie columns as sent by clients.
///
/// The outer `Option` records whether a key was present at all, the inner one
/// whether it was `null`. Creation treats absent and `null` alike; updates
/// only touch present keys.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MovieFields {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub trailer: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub year: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present")]
    pub rating: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub genre_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present")]
    pub director_id: Option<Option<i32>>,
}

impl MovieFields {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.trailer.is_none()
            && self.year.is_none()
            && self.rating.is_none()
            && self.genre_id.is_none()
            && self.director_id.is_none()
    }
}

fn present<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

/// Fixture loaded by [`crate::store::Store::seed`].
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub directors: Vec<NamedRow>,
    #[serde(default)]
    pub genres: Vec<NamedRow>,
    #[serde(default)]
    pub movies: Vec<SeedMovie>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NamedRow {
    pub id: i32,
    pub name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SeedMovie {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub trailer: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub genre_id: Option<i32>,
    pub director_id: Option<i32>,
}
