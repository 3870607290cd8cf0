// picks a concrete frequency slot for one candidate path.
// the caller hands over the path's node capabilities, its declared center granularities
// and the spectrum still free on the path, and gets either a slot or the reason there is none

use num_rational::BigRational;
use tracing::debug;

use super::capability::{DiagnosticSink, McCapabilities};
use super::error::{Result, SpectrumError};
use super::frequency::Frequency;
use super::granularity::GranularityCollection;
use super::grid::{Grid, SlotIndexer};
use super::range_set::{FrequencyInterval, RangeSet};
use super::spectrum::SpectrumEngine;
use crate::dsa::bitset::BitSet;

#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub struct SelectedSlot {
    pub first_slot:usize,
    pub slot_count:usize,
    pub lower:Frequency,
    pub upper:Frequency
}

// a slot is available only when no occupied range touches it
pub fn occupied_to_available(grid:&Grid,occupied:&RangeSet) -> Result<BitSet> {
    let engine = SpectrumEngine::new(grid);
    Ok(engine.to_covering_bit_vector(&occupied.intervals())?.complement())
}

// lowest run of `width_slots` available slots whose first slot is a multiple of `alignment_slots`
pub fn select_first_fit(grid:&Grid,available:&BitSet,width_slots:usize,alignment_slots:usize) -> Result<Option<SelectedSlot>> {
    if width_slots == 0 || alignment_slots == 0 {
        return Err(SpectrumError::invalid_argument(
            format!("cannot fit {width_slots} slots on an alignment of {alignment_slots} slots")
        ));
    }
    let Some(last_start) = grid.slot_count().checked_sub(width_slots) else {
        return Ok(None);
    };
    let engine = SpectrumEngine::new(grid);
    for start in (0..=last_start).step_by(alignment_slots) {
        let lower = grid.frequency_at(start)?;
        let upper = grid.frequency_at(start + width_slots)?;
        let candidate = [FrequencyInterval::new(lower, upper)?];
        if engine.subset_of(&candidate, available)?.any() {
            debug!(%lower, %upper, first_slot = start, width_slots, "selected frequency slot");
            return Ok(Some(SelectedSlot {first_slot:start,slot_count:width_slots,lower,upper}));
        }
    }
    Ok(None)
}

#[derive(Clone,Debug)]
pub struct PathRequest {
    pub bandwidth_ghz:BigRational,
    pub capabilities:McCapabilities,
    pub granularities:GranularityCollection
}

#[derive(Clone,Debug,PartialEq,Eq)]
pub enum Rejection {
    // the bandwidth is not a whole number of grid slots
    UnsupportedWidth,
    IncompatibleNode,
    NoCommonGrid(String),
    NoFreeSpectrum
}

#[derive(Clone,Debug,PartialEq,Eq)]
pub enum PathVerdict {
    Allocated(SelectedSlot),
    Rejected(Rejection)
}

pub fn evaluate_path(grid:&Grid,request:&PathRequest,available:&BitSet,sink:&mut dyn DiagnosticSink) -> Result<PathVerdict> {
    let width_slots = match grid.slots_for_width(&request.bandwidth_ghz) {
        Some(slots) if slots > 0 => slots,
        _ => return Ok(PathVerdict::Rejected(Rejection::UnsupportedWidth))
    };

    if !request.capabilities.is_compatible_service(grid.granularity_ghz(), width_slots as u64, sink) {
        return Ok(PathVerdict::Rejected(Rejection::IncompatibleNode));
    }

    let alignment = match request.granularities.slots(grid.granularity_ghz()) {
        // an alignment beyond usize leaves slot 0 as the only candidate
        Ok(slots) => usize::try_from(slots).unwrap_or(usize::MAX),
        Err(SpectrumError::LeastCommonMultiple{reason}) => {
            sink.report(&reason);
            return Ok(PathVerdict::Rejected(Rejection::NoCommonGrid(reason)));
        },
        Err(err) => return Err(err)
    };

    match select_first_fit(grid, available, width_slots, alignment)? {
        Some(slot) => Ok(PathVerdict::Allocated(slot)),
        None => Ok(PathVerdict::Rejected(Rejection::NoFreeSpectrum))
    }
}
