// exact decimal helpers, every GHz/THz quantity in this crate is a BigRational
// so that 6.25, 3.125 or 4.6875 never pick up binary rounding

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use super::error::{Result, SpectrumError};

pub fn pow10(exp:u32) -> BigInt {
    num_traits::pow(BigInt::from(10u8), exp as usize)
}

// "6.25" -> 25/4, also accepts "+1", "-0.5", ".5" and "50."
pub fn parse_decimal(text:&str) -> Result<BigRational> {
    let invalid = || SpectrumError::invalid_argument(format!("'{text}' is not a decimal number"));
    let trimmed = text.trim();
    let (negative,unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true,&trimmed[1..]),
        Some(b'+') => (false,&trimmed[1..]),
        _ => (false,trimmed)
    };
    let (int_part,frac_part) = unsigned.split_once('.').unwrap_or((unsigned,""));
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid());
    }
    if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let digits = format!("{int_part}{frac_part}");
    let numer = BigInt::parse_bytes(digits.as_bytes(), 10).ok_or_else(invalid)?;
    let value = BigRational::new(numer, pow10(frac_part.len() as u32));
    Ok(if negative {-value} else {value})
}

// shortest exact decimal form, falls back to "n/d" for non terminating values
pub fn format_decimal(value:&BigRational) -> String {
    let denom = value.denom().clone();
    let two = BigInt::from(2u8);
    let five = BigInt::from(5u8);
    let mut rest = denom.clone();
    let (mut twos,mut fives) = (0u32,0u32);
    while rest.is_even() && !rest.is_zero() {
        rest /= &two;
        twos += 1;
    }
    while (&rest % &five).is_zero() {
        rest /= &five;
        fives += 1;
    }
    if !rest.is_one() {
        return format!("{}/{}",value.numer(),denom);
    }
    let places = twos.max(fives);
    let scaled = value.numer() * (pow10(places) / &denom);
    let digits = scaled.abs().to_string();
    let sign = if scaled.is_negative() {"-"} else {""};
    if places == 0 {
        return format!("{sign}{digits}");
    }
    let places = places as usize;
    let padded = format!("{digits:0>width$}",width = places + 1);
    let (int_part,frac_part) = padded.split_at(padded.len() - places);
    format!("{sign}{int_part}.{frac_part}")
}

// Some(n) iff the value is a whole number
pub fn to_integer(value:&BigRational) -> Option<BigInt> {
    if value.is_integer() {Some(value.to_integer())} else {None}
}

pub(crate) fn require_positive(value:&BigRational,what:&str) -> Result<()> {
    if value.is_positive() {
        Ok(())
    }else{
        Err(SpectrumError::invalid_argument(format!("{what} must be positive, got {}",format_decimal(value))))
    }
}
