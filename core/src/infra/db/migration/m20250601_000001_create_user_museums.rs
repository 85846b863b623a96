//! Creates the table holding per-user museum annotations.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
	async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
		manager
			.create_table(
				Table::create()
					.table(UserMuseums::Table)
					.if_not_exists()
					.col(
						ColumnDef::new(UserMuseums::Id)
							.string()
							.not_null()
							.primary_key(),
					)
					.col(ColumnDef::new(UserMuseums::UserId).string().not_null())
					.col(ColumnDef::new(UserMuseums::MuseumId).string().not_null())
					.col(
						ColumnDef::new(UserMuseums::Visited)
							.boolean()
							.not_null()
							.default(false),
					)
					.col(
						ColumnDef::new(UserMuseums::Wish)
							.boolean()
							.not_null()
							.default(false),
					)
					.col(
						ColumnDef::new(UserMuseums::Notes)
							.text()
							.not_null()
							.default(""),
					)
					.col(
						ColumnDef::new(UserMuseums::CreatedAt)
							.timestamp()
							.not_null()
							.default(Expr::current_timestamp()),
					)
					.col(
						ColumnDef::new(UserMuseums::UpdatedAt)
							.timestamp()
							.not_null()
							.default(Expr::current_timestamp()),
					)
					.to_owned(),
			)
			.await?;

		// Every reconciliation lists one user's annotations
		manager
			.create_index(
				Index::create()
					.if_not_exists()
					.name("idx_user_museums_user_id")
					.table(UserMuseums::Table)
					.col(UserMuseums::UserId)
					.to_owned(),
			)
			.await?;

		Ok(())
	}

	async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
		manager
			.drop_table(
				Table::drop()
					.table(UserMuseums::Table)
					.if_exists()
					.to_owned(),
			)
			.await?;

		Ok(())
	}
}

#[derive(DeriveIden)]
enum UserMuseums {
	Table,
	Id,
	UserId,
	MuseumId,
	Visited,
	Wish,
	Notes,
	CreatedAt,
	UpdatedAt,
}
