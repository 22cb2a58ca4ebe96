//! Closed vocabularies for jurisdiction codes

/// Sentinel for registration states that cannot be resolved.
pub const UNKNOWN_STATE: &str = "UNKNOWN";

/// The 50 states, DC, and the five inhabited US territories.
pub const VALID_STATES: [&str; 56] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY", // states
    "DC", // district
    "PR", "GU", "VI", "AS", "MP", // territories
];

/// Known misspellings and long-form abbreviations, already uppercased.
pub const STATE_TYPOS: [(&str, &str); 24] = [
    ("N.Y", "NY"),
    ("N.Y.", "NY"),
    ("NEWY", "NY"),
    ("N.J", "NJ"),
    ("N.J.", "NJ"),
    ("PENN", "PA"),
    ("PENNA", "PA"),
    ("CALIF", "CA"),
    ("CONN", "CT"),
    ("MASS", "MA"),
    ("FLA", "FL"),
    ("FLOR", "FL"),
    ("TEX", "TX"),
    ("TEXAS", "TX"),
    ("MICH", "MI"),
    ("ILL", "IL"),
    ("WASH", "WA"),
    ("VIRG", "VA"),
    ("GEOR", "GA"),
    ("OHIO", "OH"),
    ("MD.", "MD"),
    ("D.C", "DC"),
    ("D.C.", "DC"),
    ("P.R", "PR"),
];

/// Borough abbreviations used on summonses, mapped to full borough names.
pub const BOROUGH_ABBREVIATIONS: [(&str, &str); 10] = [
    ("MAN", "MANHATTAN"),
    ("MH", "MANHATTAN"),
    ("NY", "MANHATTAN"),
    ("BX", "BRONX"),
    ("BK", "BROOKLYN"),
    ("K", "BROOKLYN"),
    ("Q", "QUEENS"),
    ("QN", "QUEENS"),
    ("R", "STATEN ISLAND"),
    ("ST", "STATEN ISLAND"),
];

/// Full borough names after abbreviation mapping.
pub const BOROUGHS: [&str; 5] = ["MANHATTAN", "BRONX", "BROOKLYN", "QUEENS", "STATEN ISLAND"];

pub fn is_valid_state(code: &str) -> bool {
    VALID_STATES.contains(&code)
}

pub fn state_typo(code: &str) -> Option<&'static str> {
    STATE_TYPOS
        .iter()
        .find(|(typo, _)| *typo == code)
        .map(|(_, state)| *state)
}

pub fn borough_for(abbreviation: &str) -> Option<&'static str> {
    BOROUGH_ABBREVIATIONS
        .iter()
        .find(|(abbr, _)| *abbr == abbreviation)
        .map(|(_, borough)| *borough)
}
