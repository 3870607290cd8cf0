// center frequency granularities declared along a path and their least common multiple,
// the coarsest grid every node on the path can honor.
// granularities are kept as whole Hz so the LCM is plain integer arithmetic

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::ToPrimitive;
use tracing::debug;

use super::config::DEFAULT_CENTER_GRANULARITY_GHZ;
use super::decimal::{format_decimal, require_positive, to_integer};
use super::error::{Result, SpectrumError};
use super::frequency::HZ_PER_GHZ;

type HashSet<K> = std::collections::hash_set::HashSet<K,nohash::BuildNoHashHasher<u64>>;

fn scale_to_hz(ghz:&BigRational) -> Result<u64> {
    require_positive(ghz,"granularity")?;
    let hz = ghz * BigRational::from_integer(BigInt::from(HZ_PER_GHZ));
    to_integer(&hz).and_then(|hz| hz.to_u64()).ok_or_else(|| SpectrumError::invalid_argument(
        format!("granularity {} GHz is not a whole number of Hz",format_decimal(ghz))
    ))
}

// whole Hz over 10^9 always reduces to a terminating GHz decimal
fn descale_to_ghz(hz:&BigUint) -> BigRational {
    BigRational::new(BigInt::from(hz.clone()),BigInt::from(HZ_PER_GHZ))
}

fn nests(a:u64,b:u64) -> bool {
    a % b == 0 || b % a == 0
}

fn least_common_multiple(granularities_hz:&[u64]) -> BigUint {
    granularities_hz.iter()
        .map(|hz| BigUint::from(*hz))
        .fold(BigUint::from(1u8),|acc,hz| acc.lcm(&hz))
}

#[derive(Clone,Debug)]
pub struct GranularityCollection {
    default_hz:u64,
    seen:HashSet<u64>,
    // distinct granularities in Hz, in insertion order
    granularities:Vec<u64>
}

impl GranularityCollection {
    pub fn new(default_ghz:&BigRational) -> Result<Self> {
        Ok(Self {
            default_hz:scale_to_hz(default_ghz)?,
            seen:HashSet::with_hasher(nohash::BuildNoHashHasher::default()),
            granularities:vec![]
        })
    }

    // false when the same granularity, once scaled to Hz, is already present
    pub fn add(&mut self,granularity_ghz:&BigRational) -> Result<bool> {
        let hz = scale_to_hz(granularity_ghz)?;
        if !self.seen.insert(hz) {
            return Ok(false);
        }
        self.granularities.push(hz);
        Ok(true)
    }

    pub fn len(&self) -> usize {
        self.granularities.len()
    }
    pub fn is_empty(&self) -> bool {
        self.granularities.is_empty()
    }
    pub fn default_ghz(&self) -> BigRational {
        BigRational::new(BigInt::from(self.default_hz),BigInt::from(HZ_PER_GHZ))
    }
    pub fn granularities_ghz(&self) -> Vec<BigRational> {
        self.granularities.iter()
            .map(|hz| BigRational::new(BigInt::from(*hz),BigInt::from(HZ_PER_GHZ)))
            .collect()
    }

    fn granularities_or_default(&self) -> Vec<u64> {
        if self.granularities.is_empty() {
            vec![self.default_hz]
        }else{
            self.granularities.clone()
        }
    }

    pub fn least_common_multiple_ghz(&self) -> BigRational {
        let ghz = descale_to_ghz(&least_common_multiple(&self.granularities_or_default()));
        debug!(granularities = self.granularities.len(), lcm = %format_decimal(&ghz), "computed common center grid");
        ghz
    }

    // how many `target` slots the common grid spans, the target itself takes part in the LCM.
    // every declared granularity has to nest with the base (default) grid,
    // i.e. be a whole multiple or a whole divisor of it
    pub fn slots(&self,target_ghz:&BigRational) -> Result<u64> {
        let target_hz = scale_to_hz(target_ghz)?;
        let mut granularities = self.granularities_or_default();
        if let Some(off_grid) = granularities.iter().find(|hz| !nests(**hz, self.default_hz)) {
            return Err(SpectrumError::least_common_multiple(format!(
                "center granularity {} GHz does not nest with the base grid {} GHz",
                format_decimal(&descale_to_ghz(&BigUint::from(*off_grid))),
                format_decimal(&self.default_ghz())
            )));
        }
        if !granularities.contains(&target_hz) {
            granularities.push(target_hz);
        }
        let lcm = least_common_multiple(&granularities);
        // the target is one of the LCM's inputs, so it divides exactly
        let slots = &lcm / BigUint::from(target_hz);
        slots.to_u64().ok_or_else(|| SpectrumError::least_common_multiple(
            format!("common grid {} GHz spans too many slots",format_decimal(&descale_to_ghz(&lcm)))
        ))
    }
}

impl Default for GranularityCollection {
    fn default() -> Self {
        Self {
            default_hz:*DEFAULT_CENTER_GRANULARITY_HZ,
            seen:HashSet::with_hasher(nohash::BuildNoHashHasher::default()),
            granularities:vec![]
        }
    }
}

lazy_static::lazy_static! {
    static ref DEFAULT_CENTER_GRANULARITY_HZ:u64 = {
        // the configured default is a plain constant, scaling it cannot fail
        match scale_to_hz(&DEFAULT_CENTER_GRANULARITY_GHZ) {
            Ok(hz) => hz,
            Err(err) => panic!("default center granularity is invalid: {err}")
        }
    };
}
