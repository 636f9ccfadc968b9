pub mod prelude;

pub mod games;
pub mod player_custom_stats;
pub mod player_medals;
pub mod players;
