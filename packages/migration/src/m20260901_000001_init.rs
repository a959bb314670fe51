use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Customers {
    Table,
    Id,
    FirstName,
    LastName,
    Street,
    City,
    State,
    ZipCode,
    PhoneNumber,
    Ssn,
    Username,
    Password,
}

#[derive(Iden)]
enum Sequences {
    Table,
    Name,
    CurrentValue,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // customers: ids come from the "Customer" sequence, never auto-increment
        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Customers::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Customers::FirstName).string().not_null())
                    .col(ColumnDef::new(Customers::LastName).string().not_null())
                    .col(ColumnDef::new(Customers::Street).string().not_null())
                    .col(ColumnDef::new(Customers::City).string().not_null())
                    .col(ColumnDef::new(Customers::State).string().not_null())
                    .col(ColumnDef::new(Customers::ZipCode).string().not_null())
                    .col(ColumnDef::new(Customers::PhoneNumber).string().not_null())
                    .col(ColumnDef::new(Customers::Ssn).string().not_null())
                    .col(ColumnDef::new(Customers::Username).string().not_null())
                    .col(ColumnDef::new(Customers::Password).string().not_null())
                    .to_owned(),
            )
            .await?;

        // SSN is a lookup key but not constrained unique
        manager
            .create_index(
                Index::create()
                    .name("ix_customers_ssn")
                    .table(Customers::Table)
                    .col(Customers::Ssn)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_customers_username_password")
                    .table(Customers::Table)
                    .col(Customers::Username)
                    .col(Customers::Password)
                    .to_owned(),
            )
            .await?;

        // sequences
        manager
            .create_table(
                Table::create()
                    .table(Sequences::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sequences::Name)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Sequences::CurrentValue)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order + drop index before table
        manager
            .drop_table(Table::drop().table(Sequences::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ix_customers_username_password")
                    .table(Customers::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ix_customers_ssn")
                    .table(Customers::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Customers::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}
