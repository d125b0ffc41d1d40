//! Transfer representations: the flat JSON shapes accepted and returned by the
//! HTTP layer, and their field-by-field mapping from stored rows.

use serde::{Deserialize, Serialize};

use crate::entities::{director, genre, movie};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovieOut {
    pub id: i32,
    pub title: Option<String>,
    pub description: Option<String>,
    pub trailer: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub genre_id: Option<i32>,
    pub director_id: Option<i32>,
}

impl From<movie::Model> for MovieOut {
    fn from(m: movie::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            trailer: m.trailer,
            year: m.year,
            rating: m.rating,
            genre_id: m.genre_id,
            director_id: m.director_id,
        }
    }
}

/// Movie with the names of its genre and director inlined as plain strings.
/// A name is `null` when the reference is unset or points at a deleted row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovieDetailOut {
    #[serde(flatten)]
    pub movie: MovieOut,
    pub genre: Option<String>,
    pub director: Option<String>,
}

/// Body of `POST /movies/`. Every column is optional, including `id`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewMovie {
    pub id: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub trailer: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub genre_id: Option<i32>,
    pub director_id: Option<i32>,
}

/// Body of `PUT /movies/{id}`. Absent keys deserialize to `None` and overwrite
/// the stored value with null. Other keys (`id`, expanded names) are ignored so
/// a body fetched with GET can be sent back as is.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MovieChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub trailer: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub genre_id: Option<i32>,
    pub director_id: Option<i32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectorOut {
    pub id: i32,
    pub name: Option<String>,
}

impl From<director::Model> for DirectorOut {
    fn from(d: director::Model) -> Self {
        Self { id: d.id, name: d.name }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenreOut {
    pub id: i32,
    pub name: Option<String>,
}

impl From<genre::Model> for GenreOut {
    fn from(g: genre::Model) -> Self {
        Self { id: g.id, name: g.name }
    }
}

/// Body of `POST /directors/` and `POST /genres/`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewNamed {
    pub id: Option<i32>,
    pub name: Option<String>,
}

/// Body of `PUT /directors/{id}` and `PUT /genres/{id}`; keys other than
/// `name` are ignored.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NamedChanges {
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn movie_out_keeps_flat_shape_with_nulls() {
        let out = MovieOut::from(movie::Model {
            id: 7,
            title: Some("Up".into()),
            description: None,
            trailer: None,
            year: Some(2009),
            rating: Some(8.3),
            genre_id: Some(2),
            director_id: None,
        });
        assert_eq!(
            serde_json::to_value(&out).unwrap(),
            json!({
                "id": 7,
                "title": "Up",
                "description": null,
                "trailer": null,
                "year": 2009,
                "rating": 8.3,
                "genre_id": 2,
                "director_id": null,
            })
        );
    }

    #[test]
    fn detail_inlines_names_next_to_ids() {
        let detail = MovieDetailOut {
            movie: MovieOut::from(movie::Model {
                id: 1,
                title: None,
                description: None,
                trailer: None,
                year: None,
                rating: None,
                genre_id: Some(4),
                director_id: Some(9),
            }),
            genre: Some("Animation".into()),
            director: None,
        };
        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["genre_id"], 4);
        assert_eq!(value["genre"], "Animation");
        assert_eq!(value["director_id"], 9);
        assert!(value["director"].is_null());
    }

    #[test]
    fn changes_default_missing_keys_to_none() {
        let changes: MovieChanges = serde_json::from_value(json!({ "title": "Heat" })).unwrap();
        assert_eq!(changes.title.as_deref(), Some("Heat"));
        assert!(changes.year.is_none());
        assert!(changes.director_id.is_none());
    }

    #[test]
    fn unknown_keys_are_rejected_on_create() {
        assert!(serde_json::from_value::<NewMovie>(json!({ "titel": "typo" })).is_err());
        assert!(serde_json::from_value::<NewNamed>(json!({ "name": "x", "bio": "" })).is_err());
    }

    #[test]
    fn replacement_ignores_extra_keys() {
        let changes: MovieChanges = serde_json::from_value(json!({
            "id": 3,
            "title": "Heat",
            "genre": "Crime",
            "director": "Michael Mann",
        }))
        .unwrap();
        assert_eq!(changes.title.as_deref(), Some("Heat"));

        let named: NamedChanges = serde_json::from_value(json!({ "id": 3, "name": "B" })).unwrap();
        assert_eq!(named.name.as_deref(), Some("B"));
    }
}
