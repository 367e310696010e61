use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelKind {
    Support,
    Resistance,
}

/// A support or resistance price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub price: f64,
    pub kind: LevelKind,
    /// How many bars confirmed this price as a local extremum.
    pub touches: u32,
    /// Unix timestamp (milliseconds) of the latest confirming bar.
    pub last_confirmed: i64,
}

/// Levels on each side, highest price first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportResistance {
    pub support: Vec<Level>,
    pub resistance: Vec<Level>,
}
