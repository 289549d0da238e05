use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum RepairStatuses {
    Table,
    Id,
    Status,
    UpdatedBy,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Repairs {
    Table,
    Id,
    UserId,
    RepairStatusId,
    Product,
    Category,
    Description,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RepairStatuses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RepairStatuses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RepairStatuses::Status).string().not_null())
                    .col(ColumnDef::new(RepairStatuses::UpdatedBy).string().not_null())
                    .col(
                        ColumnDef::new(RepairStatuses::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Repairs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Repairs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Repairs::UserId).string().not_null())
                    .col(
                        ColumnDef::new(Repairs::RepairStatusId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Repairs::Product).string().not_null())
                    .col(ColumnDef::new(Repairs::Category).string().not_null())
                    .col(ColumnDef::new(Repairs::Description).text().not_null())
                    .col(ColumnDef::new(Repairs::Status).string().not_null())
                    .col(
                        ColumnDef::new(Repairs::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Repairs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_repairs_repair_status_id")
                            .from(Repairs::Table, Repairs::RepairStatusId)
                            .to(RepairStatuses::Table, RepairStatuses::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_repairs_user_id")
                    .table(Repairs::Table)
                    .col(Repairs::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Repairs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RepairStatuses::Table).to_owned())
            .await
    }
}
