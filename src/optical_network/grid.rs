use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive};
use tracing::debug;

use super::decimal::{format_decimal, require_positive, to_integer};
use super::error::{RangeBound, Result, SpectrumError};
use super::frequency::{Frequency, HZ_PER_GHZ};

// maps absolute frequencies onto slot indices of one fixed grid
// implementations must be pure, the spectrum engine only ever sees this trait
pub trait SlotIndexer {
    // slot containing the frequency, rounds down inside a slot
    fn index(&self,frequency:&Frequency) -> Result<usize>;
    // first slot boundary at or above the frequency, rounds up inside a slot
    fn covering_index(&self,frequency:&Frequency) -> Result<usize>;
    fn slot_count(&self) -> usize;
    // slot indices run over the closed range [0, slot_count]
    fn vector_len(&self) -> usize {
        self.slot_count() + 1
    }
}

fn check_grid(edge:&Frequency,granularity_ghz:&BigRational,slot_count:usize) -> Result<()> {
    if edge.hz() == 0 {
        return Err(SpectrumError::invalid_argument("grid edge frequency must be non-zero"));
    }
    require_positive(granularity_ghz,"grid granularity")?;
    if slot_count == 0 {
        return Err(SpectrumError::invalid_argument("grid slot count must be non-zero"));
    }
    Ok(())
}

fn granularity_hz(granularity_ghz:&BigRational) -> BigRational {
    granularity_ghz * BigRational::from_integer(BigInt::from(HZ_PER_GHZ))
}

// (frequency - edge) / granularity, exact, with every bound checked
fn slot_offset(edge:&Frequency,granularity_ghz:&BigRational,slot_count:usize,frequency:&Frequency) -> Result<BigRational> {
    check_grid(edge, granularity_ghz, slot_count)?;

    let step = granularity_hz(granularity_ghz);
    let edge_hz = BigRational::from_integer(BigInt::from(edge.hz()));
    let top_hz = &edge_hz + &step * BigRational::from_integer(BigInt::from(slot_count));
    let target_hz = BigRational::from_integer(BigInt::from(frequency.hz()));

    if target_hz < edge_hz {
        return Err(SpectrumError::OutOfRange{frequency:*frequency,bound:RangeBound::BelowMinimum});
    }
    if target_hz > top_hz {
        return Err(SpectrumError::OutOfRange{frequency:*frequency,bound:RangeBound::AboveMaximum});
    }
    Ok((target_hz - edge_hz) / step)
}

fn checked_index(index:BigInt,slot_count:usize,frequency:&Frequency) -> Result<usize> {
    if index.is_negative() || index > BigInt::from(slot_count) {
        return Err(SpectrumError::OutOfRange{frequency:*frequency,bound:RangeBound::NotInRange});
    }
    index.to_usize()
        .ok_or(SpectrumError::OutOfRange{frequency:*frequency,bound:RangeBound::NotInRange})
}

// floor((frequency - edge) / granularity)
pub fn slot_index(edge:&Frequency,granularity_ghz:&BigRational,slot_count:usize,frequency:&Frequency) -> Result<usize> {
    let offset = slot_offset(edge, granularity_ghz, slot_count, frequency)?;
    let index = checked_index(offset.floor().to_integer(), slot_count, frequency)?;
    debug!(%frequency, index, "mapped frequency to slot");
    Ok(index)
}

// ceil((frequency - edge) / granularity), the exclusive end of every slot the frequency touches
pub fn covering_slot_index(edge:&Frequency,granularity_ghz:&BigRational,slot_count:usize,frequency:&Frequency) -> Result<usize> {
    let offset = slot_offset(edge, granularity_ghz, slot_count, frequency)?;
    checked_index(offset.ceil().to_integer(), slot_count, frequency)
}

#[derive(Clone,Debug,PartialEq,Eq,Hash)]
pub struct Grid {
    edge:Frequency,
    granularity_ghz:BigRational,
    slot_count:usize
}

impl Grid {
    pub fn new(edge:Frequency,granularity_ghz:BigRational,slot_count:usize) -> Result<Self> {
        check_grid(&edge, &granularity_ghz, slot_count)?;
        Ok(Self {edge,granularity_ghz,slot_count})
    }
    pub fn edge(&self) -> &Frequency {
        &self.edge
    }
    pub fn granularity_ghz(&self) -> &BigRational {
        &self.granularity_ghz
    }
    // inverse of `index`: edge + index*granularity
    pub fn frequency_at(&self,index:usize) -> Result<Frequency> {
        if index > self.slot_count {
            return Err(SpectrumError::invalid_argument(
                format!("slot index {index} is outside [0, {}]",self.slot_count)
            ));
        }
        let offset = &self.granularity_ghz * BigRational::from_integer(BigInt::from(index));
        self.edge.checked_add_ghz(&offset)
    }
    pub fn upper_edge(&self) -> Result<Frequency> {
        self.frequency_at(self.slot_count)
    }
    // number of grid slots a width occupies, None when it is not a whole number
    pub fn slots_for_width(&self,width_ghz:&BigRational) -> Option<usize> {
        if width_ghz.is_negative() {return None}
        to_integer(&(width_ghz / &self.granularity_ghz))?.to_usize()
    }
}

impl SlotIndexer for Grid {
    fn index(&self,frequency:&Frequency) -> Result<usize> {
        slot_index(&self.edge, &self.granularity_ghz, self.slot_count, frequency)
    }
    fn covering_index(&self,frequency:&Frequency) -> Result<usize> {
        covering_slot_index(&self.edge, &self.granularity_ghz, self.slot_count, frequency)
    }
    fn slot_count(&self) -> usize {
        self.slot_count
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f,"{} slots of {} GHz from {}",self.slot_count,format_decimal(&self.granularity_ghz),self.edge)
    }
}
