pub use super::games::Entity as Games;
pub use super::player_custom_stats::Entity as PlayerCustomStats;
pub use super::player_medals::Entity as PlayerMedals;
pub use super::players::Entity as Players;
