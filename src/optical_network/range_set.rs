use std::collections::BTreeMap;

use num_bigint::BigInt;
use num_rational::BigRational;
use tracing::debug;

use super::error::{Result, SpectrumError};
use super::frequency::Frequency;

// turns center + width into interval bounds
// the range set does not care how, it only needs both bounds back
pub trait FrequencyArithmetic {
    fn lower(&self,center:&Frequency,width_ghz:&BigRational) -> Result<Frequency>;
    fn upper(&self,center:&Frequency,width_ghz:&BigRational) -> Result<Frequency>;
}

// center -/+ width/2, exact down to the Hz
#[derive(Clone,Copy,Debug,Default)]
pub struct ExactArithmetic;

fn half(width_ghz:&BigRational) -> BigRational {
    width_ghz / BigRational::from_integer(BigInt::from(2u8))
}

impl FrequencyArithmetic for ExactArithmetic {
    fn lower(&self,center:&Frequency,width_ghz:&BigRational) -> Result<Frequency> {
        center.checked_sub_ghz(&half(width_ghz))
    }
    fn upper(&self,center:&Frequency,width_ghz:&BigRational) -> Result<Frequency> {
        center.checked_add_ghz(&half(width_ghz))
    }
}

// an interval handed to the spectrum engine
// a missing upper bound means "up to the top of the band"
#[derive(Clone,Copy,Debug,PartialEq,Eq,Hash)]
pub struct FrequencyInterval {
    lower:Frequency,
    upper:Option<Frequency>
}

impl FrequencyInterval {
    pub fn new(lower:Frequency,upper:Frequency) -> Result<Self> {
        if lower > upper {
            return Err(SpectrumError::InvalidFrequencyRange{lower,upper});
        }
        Ok(Self {lower,upper:Some(upper)})
    }
    pub fn open_ended(lower:Frequency) -> Self {
        Self {lower,upper:None}
    }
    pub fn lower(&self) -> Frequency {
        self.lower
    }
    pub fn upper(&self) -> Option<Frequency> {
        self.upper
    }
}

// sorted, non overlapping frequency intervals keyed by their lower bound
// an insert that would overlap a stored interval is refused, never merged
#[derive(Clone,Debug,Default,PartialEq,Eq,Hash)]
pub struct RangeSet {
    ranges:BTreeMap<Frequency,Frequency>
}

impl RangeSet {
    pub fn new() -> Self {
        Self {ranges:BTreeMap::new()}
    }

    // Ok(false) when [lower,upper) overlaps something already stored,
    // intervals that only share an endpoint do not overlap
    pub fn add(&mut self,lower:Frequency,upper:Frequency) -> Result<bool> {
        if lower > upper {
            return Err(SpectrumError::InvalidFrequencyRange{lower,upper});
        }
        if self.ranges.contains_key(&lower) {
            debug!(%lower, %upper, "range rejected, lower bound already stored");
            return Ok(false);
        }
        let overlaps = self.ranges.range(..upper).any(|(_,stored_upper)| *stored_upper > lower);
        if overlaps {
            debug!(%lower, %upper, "range rejected, overlaps a stored range");
            return Ok(false);
        }
        self.ranges.insert(lower, upper);
        Ok(true)
    }

    // true iff at least one of `other`'s intervals was taken in
    pub fn add_range_set(&mut self,other:&RangeSet) -> bool {
        let mut added = false;
        for (lower,upper) in other.ranges.iter() {
            // stored intervals always satisfy lower <= upper
            if let Ok(true) = self.add(*lower, *upper) {
                added = true;
            }
        }
        added
    }

    pub fn add_centered(&mut self,center:&Frequency,width_ghz:&BigRational,arithmetic:&impl FrequencyArithmetic) -> Result<bool> {
        let lower = arithmetic.lower(center, width_ghz)?;
        let upper = arithmetic.upper(center, width_ghz)?;
        self.add(lower, upper)
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
    pub fn ranges(&self) -> &BTreeMap<Frequency,Frequency> {
        &self.ranges
    }
    pub fn ranges_thz(&self) -> BTreeMap<BigRational,BigRational> {
        self.ranges.iter().map(|(lower,upper)| (lower.thz(),upper.thz())).collect()
    }
    pub fn ranges_hz(&self) -> BTreeMap<u64,u64> {
        self.ranges.iter().map(|(lower,upper)| (lower.hz(),upper.hz())).collect()
    }
    pub fn intervals(&self) -> Vec<FrequencyInterval> {
        self.ranges.iter().map(|(lower,upper)| FrequencyInterval {lower:*lower,upper:Some(*upper)}).collect()
    }
}

#[cfg(test)]
mod tests {
    use num_rational::BigRational;
    use rand::Rng;

    use super::{ExactArithmetic, FrequencyArithmetic, FrequencyInterval, RangeSet};
    use crate::optical_network::decimal::parse_decimal;
    use crate::optical_network::error::{Result, SpectrumError};
    use crate::optical_network::frequency::Frequency;

    fn thz(text:&str) -> Frequency {
        Frequency::parse_thz(text).unwrap()
    }

    #[test]
    fn test_add_rejects_inverted_bounds() {
        let mut set = RangeSet::new();
        let err = set.add(thz("192.2"),thz("192.1")).unwrap_err();
        assert_eq!(err,SpectrumError::InvalidFrequencyRange{lower:thz("192.2"),upper:thz("192.1")});
        assert!(set.is_empty());
        assert!(FrequencyInterval::new(thz("192.2"),thz("192.1")).is_err());
    }
    #[test]
    fn test_overlap_is_rejected_without_mutation() {
        let mut set = RangeSet::new();
        assert!(set.add(thz("192.1"),thz("192.2")).unwrap());
        let before = set.clone();
        assert!(!set.add(thz("192.15"),thz("192.25")).unwrap());
        assert!(!set.add(thz("192.0"),thz("192.15")).unwrap());
        assert!(!set.add(thz("192.0"),thz("192.3")).unwrap());
        assert!(!set.add(thz("192.12"),thz("192.13")).unwrap());
        assert_eq!(set,before);
    }
    #[test]
    fn test_touching_ranges_are_accepted() {
        let mut set = RangeSet::new();
        assert!(set.add(thz("192.1"),thz("192.2")).unwrap());
        assert!(set.add(thz("192.2"),thz("192.3")).unwrap());
        assert!(set.add(thz("192.0"),thz("192.1")).unwrap());
        assert_eq!(set.len(),3);
    }
    #[test]
    fn test_re_adding_is_refused() {
        let mut set = RangeSet::new();
        assert!(set.add(thz("192.1"),thz("192.2")).unwrap());
        assert!(!set.add(thz("192.1"),thz("192.2")).unwrap());
        assert!(set.add(thz("193"),thz("193")).unwrap());
        assert!(!set.add(thz("193"),thz("193")).unwrap());
        assert_eq!(set.len(),2);
    }
    #[test]
    fn test_disjoint_inserts_commute() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            let mut points:Vec<u64> = (0..4).map(|_| rng.random_range(191_000_000_000_000..197_000_000_000_000)).collect();
            points.sort();
            let (a,b,c,d) = (points[0],points[1],points[2],points[3]);
            let mut forward = RangeSet::new();
            forward.add(Frequency::from_hz(a),Frequency::from_hz(b)).unwrap();
            forward.add(Frequency::from_hz(c),Frequency::from_hz(d)).unwrap();
            let mut backward = RangeSet::new();
            backward.add(Frequency::from_hz(c),Frequency::from_hz(d)).unwrap();
            backward.add(Frequency::from_hz(a),Frequency::from_hz(b)).unwrap();
            assert_eq!(forward,backward);
        }
    }
    #[test]
    fn test_add_range_set() {
        let mut left = RangeSet::new();
        left.add(thz("192.1"),thz("192.2")).unwrap();
        let mut right = RangeSet::new();
        right.add(thz("192.15"),thz("192.18")).unwrap();
        right.add(thz("192.3"),thz("192.4")).unwrap();

        assert!(left.add_range_set(&right));
        assert_eq!(left.len(),2);
        // nothing new the second time around
        assert!(!left.add_range_set(&right));
    }
    #[test]
    fn test_add_centered() {
        let mut set = RangeSet::new();
        let width = parse_decimal("50").unwrap();
        assert!(set.add_centered(&thz("193.1"),&width,&ExactArithmetic).unwrap());
        assert_eq!(set.ranges().get(&thz("193.075")),Some(&thz("193.125")));
        assert!(!set.add_centered(&thz("193.1125"),&parse_decimal("12.5").unwrap(),&ExactArithmetic).unwrap());
        // zero width is a point range, a negative one turns the bounds around
        assert!(set.add_centered(&thz("193.2"),&parse_decimal("0").unwrap(),&ExactArithmetic).unwrap());
        assert_eq!(set.ranges().get(&thz("193.2")),Some(&thz("193.2")));
        assert!(matches!(set.add_centered(&thz("193.3"),&parse_decimal("-12.5").unwrap(),&ExactArithmetic),
            Err(SpectrumError::InvalidFrequencyRange{..})));
    }

    // widens every channel by a 1 GHz guard band on both sides
    struct GuardBanded;
    fn guarded_half(width_ghz:&BigRational) -> BigRational {
        width_ghz / BigRational::from_integer(2.into()) + BigRational::from_integer(1.into())
    }
    impl FrequencyArithmetic for GuardBanded {
        fn lower(&self,center:&Frequency,width_ghz:&BigRational) -> Result<Frequency> {
            center.checked_sub_ghz(&guarded_half(width_ghz))
        }
        fn upper(&self,center:&Frequency,width_ghz:&BigRational) -> Result<Frequency> {
            center.checked_add_ghz(&guarded_half(width_ghz))
        }
    }

    #[test]
    fn test_add_centered_uses_the_given_arithmetic() {
        let mut set = RangeSet::new();
        assert!(set.add_centered(&thz("193.1"),&parse_decimal("50").unwrap(),&GuardBanded).unwrap());
        assert_eq!(set.ranges().get(&thz("193.074")),Some(&thz("193.126")));
        // exact bounds of [193.15, 193.2] fit next to it, the same channel guard banded does not
        assert!(set.add_centered(&thz("193.175"),&parse_decimal("50").unwrap(),&ExactArithmetic).unwrap());
        assert!(!set.add_centered(&thz("193.2"),&parse_decimal("50").unwrap(),&GuardBanded).unwrap());
        assert_eq!(set.len(),2);
    }
    #[test]
    fn test_views_agree() {
        let mut set = RangeSet::new();
        set.add(thz("192.1"),thz("192.2")).unwrap();
        set.add(thz("191.5"),thz("191.6")).unwrap();
        let thz_view:Vec<_> = set.ranges_thz().into_iter().collect();
        assert_eq!(thz_view[0],(parse_decimal("191.5").unwrap(),parse_decimal("191.6").unwrap()));
        let hz_view:Vec<_> = set.ranges_hz().into_iter().collect();
        assert_eq!(hz_view[1],(192_100_000_000_000,192_200_000_000_000));
        assert_eq!(set.intervals()[1].upper(),Some(thz("192.2")));
    }
}
