use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Evaluations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Evaluations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::RegistrationId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Evaluations::TeacherId).integer().null())
                    .col(ColumnDef::new(Evaluations::Level).string_len(30).not_null())
                    .col(ColumnDef::new(Evaluations::Percent).double().not_null())
                    .col(
                        ColumnDef::new(Evaluations::Note)
                            .string_len(300)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Evaluations::EvaluatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Evaluations::Table, Evaluations::RegistrationId)
                            .to(Registrations::Table, Registrations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Evaluations::Table, Evaluations::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Evaluations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Evaluations {
    Table,
    Id,
    RegistrationId,
    TeacherId,
    Level,
    Percent,
    Note,
    EvaluatedAt,
}

#[derive(Iden)]
enum Registrations {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
