use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Directors::Table)
                    .if_not_exists()
                    .col(pk_auto(Directors::Id))
                    .col(string_null(Directors::Name))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Genres::Table)
                    .if_not_exists()
                    .col(pk_auto(Genres::Id))
                    .col(string_null(Genres::Name))
                    .to_owned(),
            )
            .await?;

        // No cascade rules: deleting a director or genre is not exposed over HTTP.
        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(pk_auto(Movies::Id))
                    .col(string_null(Movies::Title))
                    .col(string_null(Movies::Description))
                    .col(string_null(Movies::Trailer))
                    .col(integer_null(Movies::Year))
                    .col(double_null(Movies::Rating))
                    .col(integer_null(Movies::GenreId))
                    .col(integer_null(Movies::DirectorId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movies_genre_id")
                            .from(Movies::Table, Movies::GenreId)
                            .to(Genres::Table, Genres::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movies_director_id")
                            .from(Movies::Table, Movies::DirectorId)
                            .to(Directors::Table, Directors::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movies_director_id")
                    .table(Movies::Table)
                    .col(Movies::DirectorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movies_genre_id")
                    .table(Movies::Table)
                    .col(Movies::GenreId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Movies::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Genres::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Directors::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Directors {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Genres {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Movies {
    Table,
    Id,
    Title,
    Description,
    Trailer,
    Year,
    Rating,
    GenreId,
    DirectorId,
}
