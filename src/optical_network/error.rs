use std::fmt::Display;

use thiserror::Error;

use super::frequency::Frequency;

// which bound a frequency failed when it was placed on a grid
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum RangeBound {
    BelowMinimum,
    AboveMaximum,
    NotInRange
}

impl Display for RangeBound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RangeBound::BelowMinimum => write!(f,"below minimum"),
            RangeBound::AboveMaximum => write!(f,"above maximum"),
            RangeBound::NotInRange => write!(f,"not in range"),
        }
    }
}

#[derive(Error,Debug,Clone,PartialEq,Eq)]
pub enum SpectrumError {
    #[error("invalid argument: {reason}")]
    InvalidArgument{reason:String},
    #[error("frequency {frequency} is {bound} of the grid")]
    OutOfRange{frequency:Frequency,bound:RangeBound},
    #[error("invalid frequency range, lower bound {lower} is above upper bound {upper}")]
    InvalidFrequencyRange{lower:Frequency,upper:Frequency},
    #[error("no common grid possible: {reason}")]
    LeastCommonMultiple{reason:String}
}

impl SpectrumError {
    pub(crate) fn invalid_argument(reason:impl Into<String>) -> Self {
        Self::InvalidArgument{reason:reason.into()}
    }
    pub(crate) fn least_common_multiple(reason:impl Into<String>) -> Self {
        Self::LeastCommonMultiple{reason:reason.into()}
    }
}

pub type Result<T> = std::result::Result<T,SpectrumError>;
