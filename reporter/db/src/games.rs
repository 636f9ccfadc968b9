use sea_orm::entity::prelude::*;

// One row per match. Re-ingesting a report only refreshes `map_name`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub game_unique_id: Uuid,
    pub game_enum: i32,
    pub is_matchmaking: bool,
    pub has_network_members_in_party: bool,
    pub party_size: i32,
    pub last_match_incomplete: bool,
    pub is_teams_enabled: bool,
    pub hopper_id: i32,
    pub hopper_name: String,
    pub game_type_name: String,
    pub map_name: String,
    #[sea_orm(indexed)]
    pub timestamp: TimeDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::players::Entity")]
    Players,
}

impl Related<super::players::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Players.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
