use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SearchAnalytics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SearchAnalytics::Term)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SearchAnalytics::SearchCount)
                            .big_integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(SearchAnalytics::LastSearchedAt)
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
                    .name("idx_search_analytics_count")
                    .table(SearchAnalytics::Table)
                    .col(SearchAnalytics::SearchCount)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SearchAnalytics::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SearchAnalytics {
    Table,
    Term,
    SearchCount,
    LastSearchedAt,
}
