use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ExamRegistration::Table)
                    .col(
                        ColumnDef::new(ExamRegistration::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                    )
                    .col(
                        ColumnDef::new(ExamRegistration::UserId)
                            .uuid()
                            .not_null()
                    )
                    .col(
                        ColumnDef::new(ExamRegistration::FullName)
                            .string()
                            .not_null()
                    )
                    .col(
                        ColumnDef::new(ExamRegistration::VarsityId)
                            .string_len(8)
                            .null()
                    )
                    .col(
                        ColumnDef::new(ExamRegistration::Session)
                            .string_len(7)
                            .null()
                    )
                    .col(
                        ColumnDef::new(ExamRegistration::PhoneNumber)
                            .string_len(11)
                            .null()
                    )
                    .col(
                        ColumnDef::new(ExamRegistration::PaymentStatus)
                            .string_len(3)
                            .not_null()
                    )
                    .col(
                        ColumnDef::new(ExamRegistration::PaymentSlip)
                            .string()
                            .null()
                            .unique_key()
                    )
                    .col(
                        ColumnDef::new(ExamRegistration::StudentStatus)
                            .string_len(12)
                            .not_null()
                    )
                    .col(
                        ColumnDef::new(ExamRegistration::Courses)
                            .json_binary()
                            .not_null()
                    )
                    .col(
                        ColumnDef::new(ExamRegistration::HallName)
                            .string()
                            .null()
                    )
                    .col(
                        ColumnDef::new(ExamRegistration::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                    )
                    .col(
                        ColumnDef::new(ExamRegistration::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_exam_registration_user")
                            .from(ExamRegistration::Table, ExamRegistration::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade)
                    )
                    .to_owned()
            )
            .await?;

        // One registration per user, enforced by the storage layer so two
        // concurrent submissions cannot both land.
        manager
            .create_index(
                Index::create()
                    .name("uq_exam_registration_user")
                    .table(ExamRegistration::Table)
                    .col(ExamRegistration::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(ExamRegistration::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum ExamRegistration {
    Table,
    Id,
    UserId,
    FullName,
    VarsityId,
    Session,
    PhoneNumber,
    PaymentStatus,
    PaymentSlip,
    StudentStatus,
    Courses,
    HallName,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}
