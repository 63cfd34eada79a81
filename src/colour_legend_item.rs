use crate::decode::decode_as_is;
use serde::{Deserialize, Serialize};

/// Legend entry for the colours used by the map tiles.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ColourLegendItem {
    /// "Fast", "Medium", "Slow" or "Unknown".
    #[serde(default)]
    pub name: Option<String>,

    /// Web colour, e.g. `#FF0000`.
    #[serde(default)]
    pub colour: Option<String>,
}

decode_as_is!(ColourLegendItem);
