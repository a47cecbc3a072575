use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, Set, TransactionTrait,
};

use crate::{
    entities::{director, genre, movie},
    error::AppResult,
    models::{MovieFields, MovieFilter, SeedData},
};

/// Persistence context handed to every handler.
///
/// Cloning is cheap; each statement checks a connection out of the pool and
/// returns it when the statement completes.
#[derive(Clone)]
pub struct Store {
    db: DatabaseConnection,
}

impl Store {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_movies(&self, filter: MovieFilter) -> AppResult<Vec<movie::Model>> {
        let mut query = movie::Entity::find();
        if let Some(director_id) = filter.director_id {
            query = query.filter(movie::Column::DirectorId.eq(director_id));
        }
        if let Some(genre_id) = filter.genre_id {
            query = query.filter(movie::Column::GenreId.eq(genre_id));
        }
        Ok(query.all(&self.db).await?)
    }

    pub async fn get_movie(&self, id: i32) -> AppResult<Option<movie::Model>> {
        Ok(movie::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn create_movie(&self, fields: MovieFields) -> AppResult<i32> {
        let model = movie::ActiveModel {
            id: NotSet,
            title: Set(fields.title.flatten()),
            description: Set(fields.description.flatten()),
            trailer: Set(fields.trailer.flatten()),
            year: Set(fields.year.flatten()),
            rating: Set(fields.rating.flatten()),
            genre_id: Set(fields.genre_id.flatten()),
            director_id: Set(fields.director_id.flatten()),
        };
        let res = movie::Entity::insert(model).exec(&self.db).await?;
        Ok(res.last_insert_id)
    }

    /// Applies `changes` to every row with this id in one statement and
    /// returns the number of rows touched.
    pub async fn update_movie(&self, id: i32, changes: MovieFields) -> AppResult<u64> {
        let mut model = movie::ActiveModel::default();
        if let Some(v) = changes.title {
            model.title = Set(v);
        }
        if let Some(v) = changes.description {
            model.description = Set(v);
        }
        if let Some(v) = changes.trailer {
            model.trailer = Set(v);
        }
        if let Some(v) = changes.year {
            model.year = Set(v);
        }
        if let Some(v) = changes.rating {
            model.rating = Set(v);
        }
        if let Some(v) = changes.genre_id {
            model.genre_id = Set(v);
        }
        if let Some(v) = changes.director_id {
            model.director_id = Set(v);
        }

        let res = movie::Entity::update_many()
            .set(model)
            .filter(movie::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected)
    }

    /// Returns `false` when no movie has this id.
    pub async fn delete_movie(&self, id: i32) -> AppResult<bool> {
        let Some(movie) = movie::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(false);
        };
        movie.delete(&self.db).await?;
        Ok(true)
    }

    pub async fn list_directors(&self) -> AppResult<Vec<director::Model>> {
        Ok(director::Entity::find().all(&self.db).await?)
    }

    pub async fn get_director(&self, id: i32) -> AppResult<Option<director::Model>> {
        Ok(director::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn list_genres(&self) -> AppResult<Vec<genre::Model>> {
        Ok(genre::Entity::find().all(&self.db).await?)
    }

    pub async fn get_genre(&self, id: i32) -> AppResult<Option<genre::Model>> {
        Ok(genre::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Loads `data` in one transaction unless any catalog table already has
    /// rows. Returns whether anything was inserted.
    pub async fn seed(&self, data: SeedData) -> AppResult<bool> {
        let existing = director::Entity::find().count(&self.db).await?
            + genre::Entity::find().count(&self.db).await?
            + movie::Entity::find().count(&self.db).await?;
        if existing > 0 {
            return Ok(false);
        }

        let txn = self.db.begin().await?;

        for row in data.directors {
            let model = director::ActiveModel { id: Set(row.id), name: Set(Some(row.name)) };
            director::Entity::insert(model).exec(&txn).await?;
        }

        for row in data.genres {
            let model = genre::ActiveModel { id: Set(row.id), name: Set(Some(row.name)) };
            genre::Entity::insert(model).exec(&txn).await?;
        }

        for row in data.movies {
            let model = movie::ActiveModel {
                id: Set(row.id),
                title: Set(Some(row.title)),
                description: Set(row.description),
                trailer: Set(row.trailer),
                year: Set(row.year),
                rating: Set(row.rating),
                genre_id: Set(row.genre_id),
                director_id: Set(row.director_id),
            };
            movie::Entity::insert(model).exec(&txn).await?;
        }

        txn.commit().await?;

        Ok(true)
    }
}
