use crate::market::domain::UNKNOWN_STATE;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Postal code and display label for every US state, plus DC.
const STATES: &[(&str, &str)] = &[
    ("AL", "Alabama"),
    ("AK", "Alaska"),
    ("AZ", "Arizona"),
    ("AR", "Arkansas"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DE", "Delaware"),
    ("DC", "Washington DC"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("IA", "Iowa"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("ME", "Maine"),
    ("MD", "Maryland"),
    ("MA", "Massachusetts"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MS", "Mississippi"),
    ("MO", "Missouri"),
    ("MT", "Montana"),
    ("NE", "Nebraska"),
    ("NV", "Nevada"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NY", "New York"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VT", "Vermont"),
    ("VA", "Virginia"),
    ("WA", "Washington"),
    ("WV", "West Virginia"),
    ("WI", "Wisconsin"),
    ("WY", "Wyoming"),
];

/// Additional spellings that show up in scraped location fields.
const STATE_ALIASES: &[(&str, &str)] = &[
    ("district of columbia", "DC"),
    ("d.c.", "DC"),
    ("washington d.c.", "DC"),
];

static STATE_LOOKUP: OnceLock<HashMap<String, &'static str>> = OnceLock::new();
static STATE_LABELS: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

fn state_lookup() -> &'static HashMap<String, &'static str> {
    STATE_LOOKUP.get_or_init(|| {
        let mut map = HashMap::with_capacity(STATES.len() * 2 + STATE_ALIASES.len());
        for (code, label) in STATES {
            map.insert(code.to_lowercase(), *code);
            map.insert(label.to_lowercase(), *code);
        }
        for (alias, code) in STATE_ALIASES {
            map.insert((*alias).to_string(), *code);
        }
        map
    })
}

fn state_labels() -> &'static HashMap<&'static str, &'static str> {
    STATE_LABELS.get_or_init(|| STATES.iter().copied().collect())
}

/// Maps a state code or spelled-out name to its postal code.
pub fn resolve_state(text: &str) -> Option<&'static str> {
    let normalized = text.trim().to_lowercase();
    state_lookup().get(normalized.as_str()).copied()
}

/// Display label for a resolved state code. Anything unresolved,
/// including the unknown sentinel, labels as `Unknown`.
pub fn state_label(code: &str) -> &'static str {
    state_labels().get(code).copied().unwrap_or("Unknown")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLocation {
    pub city: Option<String>,
    pub state: &'static str,
}

impl ParsedLocation {
    fn unknown() -> Self {
        Self {
            city: None,
            state: UNKNOWN_STATE,
        }
    }
}

/// Splits a raw location on its last comma and resolves the tail as a
/// state. Commas inside the city part are preserved. Text that carries
/// no resolvable state, such as `Remote`, falls back to the unknown
/// sentinel with no city.
pub fn normalize_location(raw: Option<&str>) -> ParsedLocation {
    let Some(text) = raw.map(str::trim).filter(|text| !text.is_empty()) else {
        return ParsedLocation::unknown();
    };

    if let Some((city, state)) = text.rsplit_once(',') {
        let Some(code) = resolve_state(state) else {
            return ParsedLocation::unknown();
        };
        let city = city.trim();
        return ParsedLocation {
            city: (!city.is_empty()).then(|| city.to_string()),
            state: code,
        };
    }

    match resolve_state(text) {
        Some(code) => ParsedLocation {
            city: None,
            state: code,
        },
        None => ParsedLocation::unknown(),
    }
}
