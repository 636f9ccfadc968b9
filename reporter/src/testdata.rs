// Report fixtures shaped like the files the game client writes.

pub const GAME_ID: &str = "8c2f8e0e-3d4b-4a57-9a54-6f1f0a4b2c11";
pub const OTHER_GAME_ID: &str = "0d6b5f7a-91c2-4e1f-8f3e-2b7a9c4d5e60";

pub fn game_nodes(game_id: &str) -> String {
    format!(
        r#"
  <GameUniqueId GameUniqueId="{game_id}" />
  <GameEnum mGameEnum="3" />
  <IsMatchmaking IsMatchmaking="true" />
  <mHasNetworkMembersInParty mHasNetworkMembersInParty="False" />
  <mPartySize mPartySize="4" />
  <mLastMatchIncomplete mLastMatchIncomplete="false" />
  <IsTeamsEnabled IsTeamsEnabled="true" />
  <HopperId HopperId="112" />
  <HopperName HopperName="Team Slayer" />
  <GameTypeName GameTypeName="Slayer" />"#
    )
}

pub fn player_attributes(gamertag: &str, index: usize) -> String {
    format!(
        r#"mXboxUserId="253327480000000{index}" isGuest="True" mGameMode="1" mGamertagText="{gamertag}" ClantagText="H3" ServiceId="A{index}" mTeamId="{team}" Score="15" mStanding="{standing}" mTotalMedalCount="3" mKills="15" mDeaths="9" mAssists="4" mBetrayals="0" mSuicides="1" mMostKillsInARow="5" mSecondsAlive="480" mKillsWeapon="10" mKillsGrenade="2" mKillsMelee="3" mKillsOther="0" mCompletedGame="1" mSecondsPlayed="600" mKilledMostPlayerIndex="2" mKilledMostPlayerCount="6" mMostKilledByPlayerIndex="3" mMostKilledByPlayerCount="4" mMostUsedWeapon="7" mMostUsedWeaponCount="11""#,
        team = index % 2,
        standing = index + 1,
    )
}

// Every player carries one medal with a zero count, one with count 3,
// one unnamed custom stat and one named custom stat.
pub fn report_xml(game_id: &str, gamertags: &[&str]) -> String {
    let players = gamertags
        .iter()
        .enumerate()
        .map(|(i, gamertag)| {
            format!(
                r#"
    <Player {}>
      <MedalsCount>
        <Medal mId="5" mCount="0" />
        <Medal mId="12" mCount="3" />
      </MedalsCount>
      <CustomStats>
        <CustomStat mStatName="" mValueForDisplay="0" />
        <CustomStat mStatName="Flag Captures" mValueForDisplay=" 3 / 5 " />
      </CustomStats>
    </Player>"#,
                player_attributes(gamertag, i)
            )
        })
        .collect::<String>();
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<CarnageReport>{}
  <Players>{players}
  </Players>
</CarnageReport>
"#,
        game_nodes(game_id)
    )
}

pub async fn memory_db() -> sea_orm::DatabaseConnection {
    let db = sea_orm::Database::connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory sqlite DB.");
    migration::ensure_schema(&db, "h3mcc")
        .await
        .expect("Applying DB migrations failed");
    db
}
