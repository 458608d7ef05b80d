//! Preset calendar definitions served by the custom-url endpoint.
//!
//! Each preset groups the teams of one organisation with the
//! championships they currently play in. Ids are Faceit business data.

/// One team inside a preset calendar.
#[derive(Debug, Clone, Copy)]
pub struct CalendarTeam {
    pub name: &'static str,
    pub team_id: &'static str,
    pub championship_id: &'static str,
}

/// A named grouping exported as a single calendar.
#[derive(Debug, Clone, Copy)]
pub struct CustomCalendar {
    pub name: &'static str,
    pub teams: &'static [CalendarTeam],
}

pub const CUSTOM_CALENDARS: &[CustomCalendar] = &[
    CustomCalendar {
        name: "fruchtlabor_esport",
        teams: &[
            CalendarTeam {
                name: "FruchtLabor",
                team_id: "0f335cdd-c371-484e-ac5a-8f505b8c5b50",
                championship_id: "91014c95-f0ec-4f25-a140-cee60d16af06",
            },
            CalendarTeam {
                name: "FruchtLabor X",
                team_id: "64ea35e4-dd22-4157-acfd-4ebf2131b58c",
                championship_id: "c729d5cb-d5f3-4b79-8f7f-4c3cd7978056",
            },
        ],
    },
    CustomCalendar {
        name: "fruchtlabor_competitive",
        teams: &[
            CalendarTeam {
                name: "A Scorpion",
                team_id: "0f492f1c-9196-4a95-9c3b-55fb750e9840",
                championship_id: "5d3fd88f-80cc-48f9-a1c2-a1cdda19293d",
            },
            CalendarTeam {
                name: "Bananenpflücker",
                team_id: "ef5e3c3d-d843-40c7-a75c-f9819acce422",
                championship_id: "4ee6b6af-3543-4733-be87-37efaf9f886f",
            },
            CalendarTeam {
                name: "DeadlySins",
                team_id: "904e2983-8192-4e53-a863-b39134a2ae39",
                championship_id: "4ee6b6af-3543-4733-be87-37efaf9f886f",
            },
            CalendarTeam {
                name: "Fiere_Five",
                team_id: "152a6da7-8d3b-483d-b5d7-18b484467051",
                championship_id: "4ee6b6af-3543-4733-be87-37efaf9f886f",
            },
            CalendarTeam {
                name: "Manzanilla de la muerte",
                team_id: "6c38a09a-e559-4884-bba8-14f8750741c0",
                championship_id: "4ee6b6af-3543-4733-be87-37efaf9f886f",
            },
            CalendarTeam {
                name: "Saft Syndikat",
                team_id: "4d8734fd-9e2b-43a9-838c-5f4519b5cc25",
                championship_id: "4ee6b6af-3543-4733-be87-37efaf9f886f",
            },
            CalendarTeam {
                name: "TacTix",
                team_id: "9ddc21a2-d930-4965-9c84-1255265a97ed",
                championship_id: "c068b599-8974-4988-857c-d9a8925c6060",
            },
            CalendarTeam {
                name: "TimeLuckSquad",
                team_id: "cf87f0bc-04d4-4982-af05-07667ae950e4",
                championship_id: "4ee6b6af-3543-4733-be87-37efaf9f886f",
            },
        ],
    },
    CustomCalendar {
        name: "arrow",
        teams: &[
            CalendarTeam {
                name: "ARROW",
                team_id: "9cec4577-cf49-46a1-bd8e-86ed4b799d0b",
                championship_id: "0606a6dc-8129-4370-bf46-849d16c0ed94",
            },
            CalendarTeam {
                name: "ARROW Gold",
                team_id: "2a14747b-4a4a-4931-856a-646b97b4ac7a",
                championship_id: "4ee6b6af-3543-4733-be87-37efaf9f886f",
            },
        ],
    },
];

/// Look up a preset by its query-parameter name.
pub fn custom_calendar(name: &str) -> Option<&'static CustomCalendar> {
    CUSTOM_CALENDARS.iter().find(|c| c.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_preset() {
        let preset = custom_calendar("arrow").unwrap();
        assert_eq!(preset.teams.len(), 2);
        assert_eq!(preset.teams[0].name, "ARROW");
    }

    #[test]
    fn test_lookup_unknown_preset() {
        assert!(custom_calendar("nope").is_none());
    }

    #[test]
    fn test_preset_names_are_unique() {
        let mut names: Vec<_> = CUSTOM_CALENDARS.iter().map(|c| c.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CUSTOM_CALENDARS.len());
    }
}
