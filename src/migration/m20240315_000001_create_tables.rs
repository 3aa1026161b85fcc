use sea_orm::Schema;
use sea_orm_migration::prelude::*;

use crate::entity::{products, users, wishlist_items, wishlists};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Tables are derived from the entities so Postgres and SQLite share one schema.
        let schema = Schema::new(manager.get_database_backend());

        manager
            .create_table(schema.create_table_from_entity(users::Entity).if_not_exists().to_owned())
            .await?;
        manager
            .create_table(schema.create_table_from_entity(products::Entity).if_not_exists().to_owned())
            .await?;
        manager
            .create_table(schema.create_table_from_entity(wishlists::Entity).if_not_exists().to_owned())
            .await?;
        manager
            .create_table(
                schema
                    .create_table_from_entity(wishlist_items::Entity)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_wishlists_user_id")
                    .table(wishlists::Entity)
                    .col(wishlists::Column::UserId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_wishlist_items_wishlist_id")
                    .table(wishlist_items::Entity)
                    .col(wishlist_items::Column::WishlistId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(wishlist_items::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(wishlists::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(products::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(users::Entity).to_owned())
            .await
    }
}
