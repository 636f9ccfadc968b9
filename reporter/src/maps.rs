// Internal map file name fragments as they appear in report file names.
// Order matters: the first matching fragment wins.
pub const MAP_NAMES: &[(&str, &str)] = &[
    ("asq_chill", "Narrows"),
    ("asq_constru", "Construct"),
    ("asq_guardia", "Guardian"),
    ("asq_cyberdy", "The Pit"),
    ("asq_warehou", "Foundry (Onslaught)"),
    ("asq_midship", "Heretic"),
    ("asq_epitaph", "Epitaph"),
    ("asq_high_ground", "High Ground"),
    ("asq_isolation", "Isolation"),
    ("asq_last_resort", "Last Resort"),
    ("asq_sandtrap", "Sandtrap"),
    ("asq_snowbound", "Snowbound"),
    ("asq_the_pit", "The Pit"),
    ("asq_valhalla", "Valhalla"),
    ("asq_blackout", "Blackout"),
    ("asq_ghost_town", "Ghost Town"),
    ("asq_rat_nest", "Rat's Nest"),
    ("asq_standoff", "Standoff"),
    ("asq_avalanche", "Avalanche"),
    ("asq_foundry", "Foundry"),
    ("asq_boundless", "Snowbound (Boundless)"),
];

pub const UNKNOWN_MAP: &str = "Unknown";

/// Human readable map name for a report file name.
pub fn map_name(filename: &str) -> &'static str {
    let filename = filename.to_lowercase();
    MAP_NAMES
        .iter()
        .find(|(fragment, _)| filename.contains(fragment))
        .map_or(UNKNOWN_MAP, |&(_, name)| name)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_known_maps() {
        assert_eq!(map_name("CYR1X-asq_valhalla-mpcarnagereport1.xml"), "Valhalla");
        assert_eq!(map_name("asq_chill_2_mpcarnagereport1_1_0_0.xml"), "Narrows");
        assert_eq!(map_name("asq_rat_nest.xml"), "Rat's Nest");
    }

    #[test]
    fn test_unknown_map() {
        assert_eq!(
            map_name("CYR1X-2026-01-20-18-14-04-mpcarnagereport1_3528_0_0.xml"),
            UNKNOWN_MAP
        );
        assert_eq!(map_name(""), UNKNOWN_MAP);
    }

    #[test]
    fn test_first_entry_wins() {
        // Both fragments occur; "asq_valhalla" comes first in the table.
        assert_eq!(map_name("asq_foundry_then_asq_valhalla.xml"), "Valhalla");
        assert_eq!(map_name("asq_valhalla_then_asq_chill.xml"), "Narrows");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(map_name("ASQ_Sandtrap_mpcarnagereport.XML"), "Sandtrap");
    }
}
