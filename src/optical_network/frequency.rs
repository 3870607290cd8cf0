use std::fmt::Display;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::ToPrimitive;

use super::decimal::{format_decimal, parse_decimal, to_integer};
use super::error::{Result, SpectrumError};

pub const HZ_PER_GHZ:u64 = 1_000_000_000;
pub const HZ_PER_THZ:u64 = 1_000_000_000_000;

// absolute optical frequency, stored as whole Hz
// ordering and equality are the ordering and equality of the Hz count
#[derive(Clone,Copy,Debug,Default,PartialEq,Eq,PartialOrd,Ord,Hash)]
pub struct Frequency {
    hz:u64
}

fn scaled(value:&BigRational,factor:u64) -> BigRational {
    value * BigRational::from_integer(BigInt::from(factor))
}

fn exact_hz(value:BigRational,what:&str) -> Result<u64> {
    let hz = to_integer(&value).ok_or_else(|| SpectrumError::invalid_argument(
        format!("{what} {} Hz is not a whole number of Hz",format_decimal(&value))
    ))?;
    hz.to_u64().ok_or_else(|| SpectrumError::invalid_argument(
        format!("{what} {hz} Hz is outside the representable frequency range")
    ))
}

impl Frequency {
    pub const fn from_hz(hz:u64) -> Self {
        Self {hz}
    }
    pub fn from_thz(thz:&BigRational) -> Result<Self> {
        let hz = exact_hz(scaled(thz,HZ_PER_THZ),"frequency")?;
        Ok(Self {hz})
    }
    pub fn from_ghz(ghz:&BigRational) -> Result<Self> {
        let hz = exact_hz(scaled(ghz,HZ_PER_GHZ),"frequency")?;
        Ok(Self {hz})
    }
    // "192.1" -> 192.1 THz
    pub fn parse_thz(text:&str) -> Result<Self> {
        Self::from_thz(&parse_decimal(text)?)
    }
    pub const fn hz(&self) -> u64 {
        self.hz
    }
    pub fn thz(&self) -> BigRational {
        BigRational::new(BigInt::from(self.hz),BigInt::from(HZ_PER_THZ))
    }
    pub fn ghz(&self) -> BigRational {
        BigRational::new(BigInt::from(self.hz),BigInt::from(HZ_PER_GHZ))
    }
    pub fn checked_add_ghz(&self,ghz:&BigRational) -> Result<Self> {
        let hz = BigRational::from_integer(BigInt::from(self.hz)) + scaled(ghz,HZ_PER_GHZ);
        Ok(Self {hz:exact_hz(hz,"sum")?})
    }
    pub fn checked_sub_ghz(&self,ghz:&BigRational) -> Result<Self> {
        let hz = BigRational::from_integer(BigInt::from(self.hz)) - scaled(ghz,HZ_PER_GHZ);
        Ok(Self {hz:exact_hz(hz,"difference")?})
    }
    // signed distance from self up to `other`, in GHz
    pub fn distance_ghz(&self,other:&Frequency) -> BigRational {
        let delta = BigInt::from(other.hz) - BigInt::from(self.hz);
        BigRational::new(delta,BigInt::from(HZ_PER_GHZ))
    }
}

impl Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f,"{} THz",format_decimal(&self.thz()))
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::Frequency;
    use crate::optical_network::decimal::parse_decimal;

    #[test]
    fn test_thz_round_trip_is_exact() {
        let f = Frequency::parse_thz("191.325").unwrap();
        assert_eq!(f.hz(),191_325_000_000_000);
        assert_eq!(f.thz(),parse_decimal("191.325").unwrap());
        assert_eq!(f.to_string(),"191.325 THz");
    }
    #[test]
    fn test_sub_hz_is_rejected() {
        assert!(Frequency::parse_thz("191.0000000000001").is_err());
        assert!(Frequency::parse_thz("-1").is_err());
    }
    #[test]
    fn test_repeated_additions_do_not_drift() {
        let step = parse_decimal("6.25").unwrap();
        let mut f = Frequency::parse_thz("191.325").unwrap();
        for _ in 0..768 {
            f = f.checked_add_ghz(&step).unwrap();
        }
        assert_eq!(f,Frequency::parse_thz("196.125").unwrap());
        let back = parse_decimal("4800").unwrap();
        assert_eq!(f.checked_sub_ghz(&back).unwrap(),Frequency::parse_thz("191.325").unwrap());
    }
    #[test]
    fn test_ordering_follows_hz() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            let a:u64 = rng.random_range(0..u64::MAX/2);
            let b:u64 = rng.random_range(0..u64::MAX/2);
            assert_eq!(Frequency::from_hz(a).cmp(&Frequency::from_hz(b)),a.cmp(&b));
        }
    }
    #[test]
    fn test_distance() {
        let low = Frequency::parse_thz("192.1").unwrap();
        let high = Frequency::parse_thz("192.2").unwrap();
        assert_eq!(low.distance_ghz(&high),parse_decimal("100").unwrap());
        assert_eq!(high.distance_ghz(&low),parse_decimal("-100").unwrap());
    }
}
