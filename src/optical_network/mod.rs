// spectrum allocation on a flexible DWDM grid
// a path crosses several network elements, each with its own slot granularity
// and admissible channel widths, and one contiguous frequency slot has to satisfy all of them

/* suppose a grid of N slots, every link of a path is a 1 by N row of used/free slots
a channel of width w takes w consecutive slots, and the same slots on every link of the path,
so the free spectrum of a path is the AND of its links' rows.
all the arithmetic is exact, a 4.6875 GHz slot rounded by a float is a mis-provisioned laser */

pub mod allocation;
pub mod capability;
pub mod config;
pub mod decimal;
pub mod error;
pub mod frequency;
pub mod granularity;
pub mod grid;
pub mod range_set;
pub mod spectrum;

pub use allocation::{PathRequest, PathVerdict, Rejection, SelectedSlot, evaluate_path, occupied_to_available, select_first_fit};
pub use capability::{CollectingSink, DiagnosticSink, McCapabilities, McCapability, NoOpSink, TracingSink};
pub use config::GridConfig;
pub use error::{RangeBound, Result, SpectrumError};
pub use frequency::Frequency;
pub use granularity::GranularityCollection;
pub use grid::{Grid, SlotIndexer, covering_slot_index, slot_index};
pub use range_set::{ExactArithmetic, FrequencyArithmetic, FrequencyInterval, RangeSet};
pub use spectrum::SpectrumEngine;
