use sea_orm::prelude::Uuid;
use sea_orm::{DatabaseTransaction, DbErr, EntityTrait, Set, TransactionError, TransactionTrait};
use sea_query::OnConflict;

use carnage_db as db;

use crate::report::{PlayerRecord, Report};

#[derive(Debug)]
pub struct UploadError {
    pub context: String,
    pub db_error: DbErr,
}

impl std::fmt::Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.context, self.db_error)
    }
}

impl std::error::Error for UploadError {}

fn with_context<S: Into<String>>(context: S) -> impl FnOnce(DbErr) -> UploadError {
    move |db_error| UploadError {
        context: context.into(),
        db_error,
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadSummary {
    // The game row was already present; its players were inserted again.
    pub game_existed: bool,
    pub players: usize,
    pub medals: usize,
    pub custom_stats: usize,
}

/// Writes one report in a single transaction.
///
/// The game row is upserted: on an existing `game_unique_id` only the map
/// name is refreshed. Players and their medals and custom stats are always
/// inserted. Any error rolls back every write of the report.
pub async fn upload<C: TransactionTrait>(
    db: &C,
    report: Report,
) -> Result<UploadSummary, UploadError> {
    let game_id = report.game.game_unique_id;
    db.transaction(|txn| Box::pin(async move { write_report(txn, report).await }))
        .await
        .map_err(|e| match e {
            TransactionError::Connection(db_error) => UploadError {
                context: format!("Transaction for game {game_id} failed"),
                db_error,
            },
            TransactionError::Transaction(e) => e,
        })
}

async fn write_report(
    txn: &DatabaseTransaction,
    report: Report,
) -> Result<UploadSummary, UploadError> {
    let Report { game, players } = report;
    let game_id = game.game_unique_id;
    let game_existed = db::games::Entity::find_by_id(game_id)
        .one(txn)
        .await
        .map_err(with_context(format!("Failed to look up game {game_id}")))?
        .is_some();
    let row = db::games::ActiveModel {
        game_unique_id: Set(game_id),
        game_enum: Set(game.game_enum),
        is_matchmaking: Set(game.is_matchmaking),
        has_network_members_in_party: Set(game.has_network_members_in_party),
        party_size: Set(game.party_size),
        last_match_incomplete: Set(game.last_match_incomplete),
        is_teams_enabled: Set(game.is_teams_enabled),
        hopper_id: Set(game.hopper_id),
        hopper_name: Set(game.hopper_name),
        game_type_name: Set(game.game_type_name),
        map_name: Set(game.map_name),
        timestamp: Set(game.timestamp),
    };
    db::games::Entity::insert(row)
        .on_conflict(
            OnConflict::column(db::games::Column::GameUniqueId)
                .update_column(db::games::Column::MapName)
                .to_owned(),
        )
        .exec_without_returning(txn)
        .await
        .map_err(with_context(format!("Failed to upsert game {game_id}")))?;

    let mut summary = UploadSummary {
        game_existed,
        ..Default::default()
    };
    for (i, player) in players.iter().enumerate() {
        let player_id = db::players::Entity::insert(player_row(game_id, player))
            .exec(txn)
            .await
            .map_err(with_context(format!(
                "Failed to insert player {i} ({}) of game {game_id}",
                player.gamertag
            )))?
            .last_insert_id;
        let PlayerRecord {
            medals,
            custom_stats,
            ..
        } = player;
        if !medals.is_empty() {
            let rows = medals.iter().map(|m| db::player_medals::ActiveModel {
                player_id: Set(player_id),
                medal_id: Set(m.medal_id),
                count: Set(m.count),
                ..Default::default()
            });
            db::player_medals::Entity::insert_many(rows)
                .exec_without_returning(txn)
                .await
                .map_err(with_context(format!(
                    "Failed to insert medals of player {player_id} of game {game_id}"
                )))?;
        }
        if !custom_stats.is_empty() {
            let rows = custom_stats
                .iter()
                .map(|s| db::player_custom_stats::ActiveModel {
                    player_id: Set(player_id),
                    stat_name: Set(s.stat_name.clone()),
                    value_display: Set(s.value_display.clone()),
                    ..Default::default()
                });
            db::player_custom_stats::Entity::insert_many(rows)
                .exec_without_returning(txn)
                .await
                .map_err(with_context(format!(
                    "Failed to insert custom stats of player {player_id} of game {game_id}"
                )))?;
        }
        summary.players += 1;
        summary.medals += medals.len();
        summary.custom_stats += custom_stats.len();
    }
    Ok(summary)
}

fn player_row(game_id: Uuid, p: &PlayerRecord) -> db::players::ActiveModel {
    db::players::ActiveModel {
        game_unique_id: Set(game_id),
        xbox_user_id: Set(p.xbox_user_id.clone()),
        is_guest: Set(p.is_guest),
        game_mode: Set(p.game_mode),
        gamertag: Set(p.gamertag.clone()),
        clan_tag: Set(p.clan_tag.clone()),
        service_id: Set(p.service_id.clone()),
        team_id: Set(p.team_id),
        score: Set(p.score),
        standing: Set(p.standing),
        total_medal_count: Set(p.total_medal_count),
        kills: Set(p.kills),
        deaths: Set(p.deaths),
        assists: Set(p.assists),
        betrayals: Set(p.betrayals),
        suicides: Set(p.suicides),
        most_kills_in_a_row: Set(p.most_kills_in_a_row),
        seconds_alive: Set(p.seconds_alive),
        kills_weapon: Set(p.kills_weapon),
        kills_grenade: Set(p.kills_grenade),
        kills_melee: Set(p.kills_melee),
        kills_other: Set(p.kills_other),
        completed_game: Set(p.completed_game),
        seconds_played: Set(p.seconds_played),
        killed_most_player_index: Set(p.killed_most_player_index),
        killed_most_player_count: Set(p.killed_most_player_count),
        most_killed_by_player_index: Set(p.most_killed_by_player_index),
        most_killed_by_player_count: Set(p.most_killed_by_player_count),
        most_used_weapon: Set(p.most_used_weapon),
        most_used_weapon_count: Set(p.most_used_weapon_count),
        ..Default::default()
    }
}
