// needed-vs-available spectrum as bit vectors over one grid
// bit i set means slot i is part of the set, vectors are slot_count+1 long
// no operation here ever mutates the vectors or intervals it is handed

use tracing::debug;

use super::error::{Result, SpectrumError};
use super::frequency::Frequency;
use super::grid::SlotIndexer;
use super::range_set::FrequencyInterval;
use crate::dsa::bitset::BitSet;

pub struct SpectrumEngine<'a,I:SlotIndexer + ?Sized> {
    indexer:&'a I
}

impl<'a,I:SlotIndexer + ?Sized> SpectrumEngine<'a,I> {
    pub fn new(indexer:&'a I) -> Self {
        Self {indexer}
    }

    pub fn empty_vector(&self) -> BitSet {
        BitSet::zeros(self.indexer.vector_len())
    }

    fn check_len(&self,vector:&BitSet) -> Result<()> {
        let expected = self.indexer.vector_len();
        if vector.len() != expected {
            return Err(SpectrumError::invalid_argument(
                format!("spectrum vector has {} bits, grid needs {expected}",vector.len())
            ));
        }
        Ok(())
    }

    // sets [index(lower), index(upper)) for every interval,
    // an open ended interval runs through the last slot
    pub fn to_bit_vector(&self,intervals:&[FrequencyInterval]) -> Result<BitSet> {
        self.fill(intervals, |upper| self.indexer.index(upper))
    }

    // sets every slot an interval touches, even partially: the upper bound rounds up.
    // this is the view of occupied spectrum, a slot that is partly in use is not free
    pub fn to_covering_bit_vector(&self,intervals:&[FrequencyInterval]) -> Result<BitSet> {
        self.fill(intervals, |upper| self.indexer.covering_index(upper))
    }

    fn fill(&self,intervals:&[FrequencyInterval],upper_index:impl Fn(&Frequency) -> Result<usize>) -> Result<BitSet> {
        let mut vector = self.empty_vector();
        for interval in intervals {
            let lower = self.indexer.index(&interval.lower())?;
            let upper = match interval.upper() {
                Some(upper) => upper_index(&upper)?,
                None => self.indexer.slot_count() + 1
            };
            vector.set_range(lower..upper).ok_or_else(|| SpectrumError::invalid_argument(
                format!("slot range {lower}..{upper} does not fit the grid")
            ))?;
        }
        Ok(vector)
    }

    pub fn intersect(&self,intervals:&[FrequencyInterval],available:&BitSet) -> Result<BitSet> {
        self.check_len(available)?;
        let needed = self.to_bit_vector(intervals)?;
        needed.and(available).ok_or_else(|| SpectrumError::invalid_argument("spectrum vector length mismatch"))
    }

    pub fn union(&self,intervals:&[FrequencyInterval],available:&BitSet) -> Result<BitSet> {
        self.check_len(available)?;
        let needed = self.to_bit_vector(intervals)?;
        self.merge(&needed, available)
    }

    pub fn merge(&self,left:&BitSet,right:&BitSet) -> Result<BitSet> {
        self.check_len(left)?;
        self.check_len(right)?;
        left.or(right).ok_or_else(|| SpectrumError::invalid_argument("spectrum vector length mismatch"))
    }

    // the needle's vector when every needle slot is available, an all clear vector otherwise.
    // exactly one of needle/available being empty is never a subset
    pub fn subset_of(&self,needle:&[FrequencyInterval],available:&BitSet) -> Result<BitSet> {
        self.check_len(available)?;
        let needed = self.to_bit_vector(needle)?;
        if needed.none() != available.none() {
            return Ok(self.empty_vector());
        }
        match needed.is_subset_of(available) {
            Some(true) => Ok(needed),
            _ => {
                debug!(needed = needed.count_ones(), available = available.count_ones(), "needed spectrum is not available");
                Ok(self.empty_vector())
            }
        }
    }
}
