use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "players")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(indexed)]
    pub game_unique_id: Uuid,
    pub xbox_user_id: String,
    pub is_guest: bool,
    pub game_mode: i32,
    pub gamertag: String,
    pub clan_tag: String,
    pub service_id: String,
    pub team_id: i32,
    pub score: i32,
    pub standing: i32,
    pub total_medal_count: i32,
    pub kills: i32,
    pub deaths: i32,
    pub assists: i32,
    pub betrayals: i32,
    pub suicides: i32,
    pub most_kills_in_a_row: i32,
    pub seconds_alive: i32,
    pub kills_weapon: i32,
    pub kills_grenade: i32,
    pub kills_melee: i32,
    pub kills_other: i32,
    pub completed_game: i32,
    pub seconds_played: i32,
    // Indices refer to the player's position in the report, not to `id`.
    pub killed_most_player_index: i32,
    pub killed_most_player_count: i32,
    pub most_killed_by_player_index: i32,
    pub most_killed_by_player_count: i32,
    pub most_used_weapon: i32,
    pub most_used_weapon_count: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::games::Entity",
        from = "Column::GameUniqueId",
        to = "super::games::Column::GameUniqueId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Games,
    #[sea_orm(has_many = "super::player_medals::Entity")]
    PlayerMedals,
    #[sea_orm(has_many = "super::player_custom_stats::Entity")]
    PlayerCustomStats,
}

impl Related<super::games::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Games.def()
    }
}

impl Related<super::player_medals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlayerMedals.def()
    }
}

impl Related<super::player_custom_stats::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlayerCustomStats.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
