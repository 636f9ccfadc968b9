use derive_more::Display;
use regex::Regex;
use roxmltree::Node;
use sea_orm::prelude::{TimeDateTimeWithTimeZone, Uuid};
use std::sync::LazyLock;
use std::time::SystemTime;
use time::macros::format_description;
use time::PrimitiveDateTime;

use crate::maps;

#[derive(Debug, Display, Clone, Eq, PartialEq)]
pub enum Error {
    #[display(fmt = "report is not valid UTF-8")]
    Encoding,
    #[display(fmt = "invalid XML: {}", _0)]
    Xml(String),
    #[display(fmt = "missing node <{}>", _0)]
    MissingNode(String),
    #[display(fmt = "node <{}> has no attribute {}", node, attribute)]
    MissingAttribute {
        node: String,
        attribute: &'static str,
    },
    #[display(fmt = "attribute {} of <{}> has invalid value {:?}", attribute, node, value)]
    InvalidValue {
        node: String,
        attribute: &'static str,
        value: String,
    },
}

impl std::error::Error for Error {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameRecord {
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
    // Derived from the file name, not from the document.
    pub map_name: String,
    pub timestamp: TimeDateTimeWithTimeZone,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MedalRecord {
    pub medal_id: i32,
    pub count: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomStatRecord {
    pub stat_name: String,
    pub value_display: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerRecord {
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
    pub killed_most_player_index: i32,
    pub killed_most_player_count: i32,
    pub most_killed_by_player_index: i32,
    pub most_killed_by_player_count: i32,
    pub most_used_weapon: i32,
    pub most_used_weapon_count: i32,
    pub medals: Vec<MedalRecord>,
    pub custom_stats: Vec<CustomStatRecord>,
}

/// One parsed report: the game and its players in document order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub game: GameRecord,
    pub players: Vec<PlayerRecord>,
}

static TIMESTAMP_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2}-[0-9]{2}-[0-9]{2}-[0-9]{2}")
        .expect("Timestamp pattern must compile")
});

/// Match time encoded in the file name as `YYYY-MM-DD-HH-MM-SS` (UTC), or
/// `modified` when the name carries no valid timestamp.
pub fn match_time(filename: &str, modified: SystemTime) -> TimeDateTimeWithTimeZone {
    TIMESTAMP_PATTERN
        .find(filename)
        .and_then(|m| {
            PrimitiveDateTime::parse(
                m.as_str(),
                format_description!("[year]-[month]-[day]-[hour]-[minute]-[second]"),
            )
            .inspect_err(|e| {
                log::debug!("Ignoring timestamp {} in {filename}: {e}", m.as_str());
            })
            .ok()
        })
        .map_or_else(
            || TimeDateTimeWithTimeZone::from(modified),
            PrimitiveDateTime::assume_utc,
        )
}

// A located element plus its path in the document, for error messages.
struct Element<'a, 'input> {
    node: Node<'a, 'input>,
    path: String,
}

impl<'a, 'input> Element<'a, 'input> {
    fn child(&self, name: &str) -> Option<Element<'a, 'input>> {
        self.node
            .children()
            .find(|n| n.has_tag_name(name))
            .map(|node| Element {
                node,
                path: format!("{}/{name}", self.path),
            })
    }

    fn required_child(&self, name: &str) -> Result<Element<'a, 'input>, Error> {
        self.child(name)
            .ok_or_else(|| Error::MissingNode(format!("{}/{name}", self.path)))
    }

    fn children(&self, name: &'static str) -> impl Iterator<Item = Element<'a, 'input>> + '_ {
        self.node
            .children()
            .filter(move |n| n.has_tag_name(name))
            .enumerate()
            .map(move |(i, node)| Element {
                node,
                path: format!("{}/{name}[{i}]", self.path),
            })
    }

    fn text(&self, attribute: &'static str) -> Result<&'a str, Error> {
        self.node
            .attribute(attribute)
            .ok_or_else(|| Error::MissingAttribute {
                node: self.path.clone(),
                attribute,
            })
    }

    fn string(&self, attribute: &'static str) -> Result<String, Error> {
        self.text(attribute).map(str::to_owned)
    }

    fn int(&self, attribute: &'static str) -> Result<i32, Error> {
        let value = self.text(attribute)?;
        value
            .trim()
            .parse()
            .map_err(|_| self.invalid(attribute, value))
    }

    fn flag(&self, attribute: &'static str) -> Result<bool, Error> {
        Ok(self.text(attribute)?.eq_ignore_ascii_case("true"))
    }

    fn uuid(&self, attribute: &'static str) -> Result<Uuid, Error> {
        let value = self.text(attribute)?;
        Uuid::parse_str(value.trim()).map_err(|_| self.invalid(attribute, value))
    }

    fn invalid(&self, attribute: &'static str, value: &str) -> Error {
        Error::InvalidValue {
            node: self.path.clone(),
            attribute,
            value: value.to_owned(),
        }
    }
}

/// Parses one report file. `filename` is the base name of the file and
/// `modified` its last modification time; both feed the derived game fields.
pub fn parse(report: &[u8], filename: &str, modified: SystemTime) -> Result<Report, Error> {
    let xml = std::str::from_utf8(report).map_err(|_| Error::Encoding)?;
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
    let doc = roxmltree::Document::parse(xml).map_err(|e| Error::Xml(e.to_string()))?;
    let root = Element {
        node: doc.root_element(),
        path: doc.root_element().tag_name().name().to_owned(),
    };
    let game = GameRecord {
        game_unique_id: root.required_child("GameUniqueId")?.uuid("GameUniqueId")?,
        game_enum: root.required_child("GameEnum")?.int("mGameEnum")?,
        is_matchmaking: root.required_child("IsMatchmaking")?.flag("IsMatchmaking")?,
        has_network_members_in_party: root
            .required_child("mHasNetworkMembersInParty")?
            .flag("mHasNetworkMembersInParty")?,
        party_size: root.required_child("mPartySize")?.int("mPartySize")?,
        last_match_incomplete: root
            .required_child("mLastMatchIncomplete")?
            .flag("mLastMatchIncomplete")?,
        is_teams_enabled: root.required_child("IsTeamsEnabled")?.flag("IsTeamsEnabled")?,
        hopper_id: root.required_child("HopperId")?.int("HopperId")?,
        hopper_name: root.required_child("HopperName")?.string("HopperName")?,
        game_type_name: root.required_child("GameTypeName")?.string("GameTypeName")?,
        map_name: maps::map_name(filename).to_owned(),
        timestamp: match_time(filename, modified),
    };
    let players = root
        .required_child("Players")?
        .children("Player")
        .map(|p| parse_player(&p))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Report { game, players })
}

fn parse_player(p: &Element) -> Result<PlayerRecord, Error> {
    let mut medals = Vec::new();
    if let Some(container) = p.child("MedalsCount") {
        for medal in container.children("Medal") {
            let count = medal.int("mCount")?;
            if count > 0 {
                medals.push(MedalRecord {
                    medal_id: medal.int("mId")?,
                    count,
                });
            }
        }
    }
    let mut custom_stats = Vec::new();
    if let Some(container) = p.child("CustomStats") {
        for stat in container.children("CustomStat") {
            let stat_name = stat.string("mStatName")?;
            if !stat_name.is_empty() {
                custom_stats.push(CustomStatRecord {
                    stat_name,
                    value_display: stat.string("mValueForDisplay")?,
                });
            }
        }
    }
    Ok(PlayerRecord {
        xbox_user_id: p.string("mXboxUserId")?,
        is_guest: p.flag("isGuest")?,
        game_mode: p.int("mGameMode")?,
        gamertag: p.string("mGamertagText")?,
        clan_tag: p.string("ClantagText")?,
        service_id: p.string("ServiceId")?,
        team_id: p.int("mTeamId")?,
        score: p.int("Score")?,
        standing: p.int("mStanding")?,
        total_medal_count: p.int("mTotalMedalCount")?,
        kills: p.int("mKills")?,
        deaths: p.int("mDeaths")?,
        assists: p.int("mAssists")?,
        betrayals: p.int("mBetrayals")?,
        suicides: p.int("mSuicides")?,
        most_kills_in_a_row: p.int("mMostKillsInARow")?,
        seconds_alive: p.int("mSecondsAlive")?,
        kills_weapon: p.int("mKillsWeapon")?,
        kills_grenade: p.int("mKillsGrenade")?,
        kills_melee: p.int("mKillsMelee")?,
        kills_other: p.int("mKillsOther")?,
        completed_game: p.int("mCompletedGame")?,
        seconds_played: p.int("mSecondsPlayed")?,
        killed_most_player_index: p.int("mKilledMostPlayerIndex")?,
        killed_most_player_count: p.int("mKilledMostPlayerCount")?,
        most_killed_by_player_index: p.int("mMostKilledByPlayerIndex")?,
        most_killed_by_player_count: p.int("mMostKilledByPlayerCount")?,
        most_used_weapon: p.int("mMostUsedWeapon")?,
        most_used_weapon_count: p.int("mMostUsedWeaponCount")?,
        medals,
        custom_stats,
    })
}
