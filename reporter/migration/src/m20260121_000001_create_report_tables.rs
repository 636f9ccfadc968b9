use carnage_db::prelude::*;
use sea_orm::EntityTrait;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

fn idx<E: EntityTrait>(s: &sea_orm::Schema, e: E) -> Vec<IndexCreateStatement> {
    s.create_index_from_entity(e)
}

// Every statement is "if not exists": the tables may predate the migration
// bookkeeping when the schema was provisioned by hand.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        let s = sea_orm::Schema::new(m.get_database_backend());
        let tables = [
            s.create_table_from_entity(Games),
            s.create_table_from_entity(Players),
            s.create_table_from_entity(PlayerMedals),
            s.create_table_from_entity(PlayerCustomStats),
        ];
        for mut t in tables {
            t.if_not_exists();
            m.create_table(t).await?;
        }
        let s = &s;
        let all_idx = [
            idx(s, Games),
            idx(s, Players),
            idx(s, PlayerMedals),
            idx(s, PlayerCustomStats),
        ]
        .into_iter()
        .flatten();
        for mut i in all_idx {
            i.if_not_exists();
            m.create_index(i).await?;
        }
        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(
            Table::drop()
                .table(PlayerCustomStats)
                .if_exists()
                .to_owned(),
        )
        .await
        .inspect_err(log_err("drop player_custom_stats"))?;
        m.drop_table(Table::drop().table(PlayerMedals).if_exists().to_owned())
            .await
            .inspect_err(log_err("drop player_medals"))?;
        m.drop_table(Table::drop().table(Players).if_exists().to_owned())
            .await
            .inspect_err(log_err("drop players"))?;
        m.drop_table(Table::drop().table(Games).if_exists().to_owned())
            .await
            .inspect_err(log_err("drop games"))?;
        Ok(())
    }
}

fn log_err<'a>(ctx: &'a str) -> impl FnOnce(&DbErr) + 'a {
    move |e| {
        log::error!("{ctx}: {e}");
    }
}
