use std::collections::{BTreeSet, HashMap};

use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, DatabaseConnection,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use crate::{
    entities::{director, genre, movie},
    error::{AppError, AppResult},
    schemas::{MovieChanges, MovieDetailOut, MovieOut, NamedChanges, NewMovie, NewNamed},
};

/// Optional equality predicates on the movie collection. Present predicates are
/// combined with AND; an empty filter matches every movie.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MovieFilter {
    pub director_id: Option<i32>,
    pub genre_id: Option<i32>,
}

impl MovieFilter {
    fn condition(self) -> Condition {
        let mut cond = Condition::all();
        if let Some(id) = self.director_id {
            cond = cond.add(movie::Column::DirectorId.eq(id));
        }
        if let Some(id) = self.genre_id {
            cond = cond.add(movie::Column::GenreId.eq(id));
        }
        cond
    }
}

/// Data access for movies, directors and genres. Every method issues its
/// queries directly against the connection; nothing is cached.
#[derive(Clone)]
pub struct Store {
    db: DatabaseConnection,
}

impl Store {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_movies(&self, filter: MovieFilter) -> AppResult<Vec<movie::Model>> {
        let movies = movie::Entity::find()
            .filter(filter.condition())
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;
        debug!(?filter, count = movies.len(), "listed movies");
        Ok(movies)
    }

    /// Resolves genre and director names for `movies` with one `IN` query per
    /// referenced table.
    pub async fn movies_with_names(
        &self,
        movies: Vec<movie::Model>,
    ) -> AppResult<Vec<MovieDetailOut>> {
        let director_ids: BTreeSet<i32> = movies.iter().filter_map(|m| m.director_id).collect();
        let genre_ids: BTreeSet<i32> = movies.iter().filter_map(|m| m.genre_id).collect();

        let directors: HashMap<i32, Option<String>> = if director_ids.is_empty() {
            HashMap::new()
        } else {
            director::Entity::find()
                .filter(director::Column::Id.is_in(director_ids))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|d| (d.id, d.name))
                .collect()
        };

        let genres: HashMap<i32, Option<String>> = if genre_ids.is_empty() {
            HashMap::new()
        } else {
            genre::Entity::find()
                .filter(genre::Column::Id.is_in(genre_ids))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|g| (g.id, g.name))
                .collect()
        };

        Ok(movies
            .into_iter()
            .map(|m| {
                let director = m.director_id.and_then(|id| directors.get(&id).cloned().flatten());
                let genre = m.genre_id.and_then(|id| genres.get(&id).cloned().flatten());
                MovieDetailOut { movie: MovieOut::from(m), genre, director }
            })
            .collect())
    }

    pub async fn get_movie(&self, id: i32) -> AppResult<movie::Model> {
        movie::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound { entity: "movie", id })
    }

    pub async fn create_movie(&self, new: NewMovie) -> AppResult<i32> {
        if let Some(id) = new.id {
            if movie::Entity::find_by_id(id).one(&self.db).await?.is_some() {
                return Err(AppError::Conflict(format!("movie {id} already exists")));
            }
        }

        let model = movie::ActiveModel {
            id: new.id.map_or(NotSet, Set),
            title: Set(new.title),
            description: Set(new.description),
            trailer: Set(new.trailer),
            year: Set(new.year),
            rating: Set(new.rating),
            genre_id: Set(new.genre_id),
            director_id: Set(new.director_id),
        };
        let res = movie::Entity::insert(model).exec(&self.db).await?;
        debug!(id = res.last_insert_id, "created movie");
        Ok(res.last_insert_id)
    }

    /// Overwrites every mutable column of movie `id` with `changes`.
    pub async fn replace_movie(&self, id: i32, changes: MovieChanges) -> AppResult<()> {
        let mut model = self.get_movie(id).await?.into_active_model();
        model.title = Set(changes.title);
        model.description = Set(changes.description);
        model.trailer = Set(changes.trailer);
        model.year = Set(changes.year);
        model.rating = Set(changes.rating);
        model.genre_id = Set(changes.genre_id);
        model.director_id = Set(changes.director_id);
        model.update(&self.db).await?;
        debug!(id, "replaced movie");
        Ok(())
    }

    pub async fn delete_movie(&self, id: i32) -> AppResult<()> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound { entity: "movie", id });
        }
        debug!(id, "deleted movie");
        Ok(())
    }

    pub async fn list_directors(&self) -> AppResult<Vec<director::Model>> {
        Ok(director::Entity::find().order_by_asc(director::Column::Id).all(&self.db).await?)
    }

    pub async fn get_director(&self, id: i32) -> AppResult<director::Model> {
        director::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound { entity: "director", id })
    }

    pub async fn create_director(&self, new: NewNamed) -> AppResult<i32> {
        if let Some(id) = new.id {
            if director::Entity::find_by_id(id).one(&self.db).await?.is_some() {
                return Err(AppError::Conflict(format!("director {id} already exists")));
            }
        }

        let model = director::ActiveModel { id: new.id.map_or(NotSet, Set), name: Set(new.name) };
        let res = director::Entity::insert(model).exec(&self.db).await?;
        debug!(id = res.last_insert_id, "created director");
        Ok(res.last_insert_id)
    }

    pub async fn replace_director(&self, id: i32, changes: NamedChanges) -> AppResult<()> {
        let mut model = self.get_director(id).await?.into_active_model();
        model.name = Set(changes.name);
        model.update(&self.db).await?;
        debug!(id, "replaced director");
        Ok(())
    }

    /// Movies referring to the deleted director keep their `director_id`.
    pub async fn delete_director(&self, id: i32) -> AppResult<()> {
        let res = director::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound { entity: "director", id });
        }
        debug!(id, "deleted director");
        Ok(())
    }

    pub async fn list_genres(&self) -> AppResult<Vec<genre::Model>> {
        Ok(genre::Entity::find().order_by_asc(genre::Column::Id).all(&self.db).await?)
    }

    pub async fn get_genre(&self, id: i32) -> AppResult<genre::Model> {
        genre::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound { entity: "genre", id })
    }

    pub async fn create_genre(&self, new: NewNamed) -> AppResult<i32> {
        if let Some(id) = new.id {
            if genre::Entity::find_by_id(id).one(&self.db).await?.is_some() {
                return Err(AppError::Conflict(format!("genre {id} already exists")));
            }
        }

        let model = genre::ActiveModel { id: new.id.map_or(NotSet, Set), name: Set(new.name) };
        let res = genre::Entity::insert(model).exec(&self.db).await?;
        debug!(id = res.last_insert_id, "created genre");
        Ok(res.last_insert_id)
    }

    pub async fn replace_genre(&self, id: i32, changes: NamedChanges) -> AppResult<()> {
        let mut model = self.get_genre(id).await?.into_active_model();
        model.name = Set(changes.name);
        model.update(&self.db).await?;
        debug!(id, "replaced genre");
        Ok(())
    }

    /// Movies referring to the deleted genre keep their `genre_id`.
    pub async fn delete_genre(&self, id: i32) -> AppResult<()> {
        let res = genre::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound { entity: "genre", id });
        }
        debug!(id, "deleted genre");
        Ok(())
    }
}
