use lazy_static::lazy_static;
use num_bigint::BigInt;
use num_rational::BigRational;
use serde::{Deserialize, Serialize};

use super::decimal::{format_decimal, parse_decimal};
use super::error::Result;
use super::frequency::Frequency;
use super::granularity::GranularityCollection;
use super::grid::Grid;

// flexible C band grid, 768 slots of 6.25 GHz starting at 191.325 THz
pub const C_BAND_SLOT_COUNT:usize = 768;

lazy_static! {
    pub static ref C_BAND_EDGE:Frequency = Frequency::from_hz(191_325_000_000_000);
    pub static ref C_BAND_GRANULARITY_GHZ:BigRational = BigRational::new(BigInt::from(25),BigInt::from(4));
    // used when no node on a path declares a center frequency granularity
    pub static ref DEFAULT_CENTER_GRANULARITY_GHZ:BigRational = BigRational::new(BigInt::from(25),BigInt::from(4));
}

// grid description as it comes out of topology configuration,
// decimals are strings so no binary float sits between the file and the math
#[derive(Clone,Debug,PartialEq,Eq,Serialize,Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub edge_thz:String,
    pub granularity_ghz:String,
    pub slot_count:usize,
    pub default_center_granularity_ghz:String
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            edge_thz:format_decimal(&C_BAND_EDGE.thz()),
            granularity_ghz:format_decimal(&C_BAND_GRANULARITY_GHZ),
            slot_count:C_BAND_SLOT_COUNT,
            default_center_granularity_ghz:format_decimal(&DEFAULT_CENTER_GRANULARITY_GHZ)
        }
    }
}

impl GridConfig {
    pub fn grid(&self) -> Result<Grid> {
        let edge = Frequency::parse_thz(&self.edge_thz)?;
        let granularity = parse_decimal(&self.granularity_ghz)?;
        Grid::new(edge, granularity, self.slot_count)
    }
    // an empty collection falling back to the configured default granularity
    pub fn granularities(&self) -> Result<GranularityCollection> {
        GranularityCollection::new(&parse_decimal(&self.default_center_granularity_ghz)?)
    }
}
