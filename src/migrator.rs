use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20241018_000001_create_seeds_table::Migration)]
    }
}

mod m20241018_000001_create_seeds_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20241018_000001_create_seeds_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // AUTOINCREMENT on SQLite keeps deleted row ids from being handed out again.
            manager
                .create_table(
                    Table::create()
                        .table(Seeds::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Seeds::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Seeds::SeedId)
                                .string_len(10)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Seeds::SeedName).string_len(100).not_null())
                        .col(ColumnDef::new(Seeds::SeedType).string_len(100).not_null())
                        .col(ColumnDef::new(Seeds::Quantity).integer().not_null())
                        .col(ColumnDef::new(Seeds::Supplier).string_len(100).not_null())
                        .col(
                            ColumnDef::new(Seeds::Status)
                                .string_len(50)
                                .not_null()
                                .default("Available"),
                        )
                        .col(
                            ColumnDef::new(Seeds::DateAdded)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_seeds_status")
                        .table(Seeds::Table)
                        .col(Seeds::Status)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Seeds::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Seeds {
        Table,
        Id,
        SeedId,
        SeedName,
        SeedType,
        Quantity,
        Supplier,
        Status,
        DateAdded,
    }
}
