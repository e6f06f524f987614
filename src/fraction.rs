//! Exact rational arithmetic for musical positions.
//!
//! Positions advance by 1/24 of a quarter note per MIDI clock pulse.
//! Accumulating 1/24 in binary floating point never lands exactly on an
//! integer again, so quarter-note boundary detection would drift after
//! enough pulses. A reduced numerator/denominator pair keeps the boundary
//! test (`is_whole`) exact for an unbounded pulse count.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Rem, Sub};

/// A non-negative rational number, always reduced to lowest terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fraction {
    num: u64,
    den: u64,
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

impl Fraction {
    pub const ZERO: Fraction = Fraction { num: 0, den: 1 };

    /// Creates a fraction reduced to lowest terms.
    ///
    /// # Panics
    ///
    /// Panics if `den` is zero.
    pub fn new(num: u64, den: u64) -> Self {
        assert!(den != 0, "fraction denominator must be nonzero");
        let g = gcd(num, den);
        Fraction {
            num: num / g,
            den: den / g,
        }
    }

    pub fn numerator(&self) -> u64 {
        self.num
    }

    pub fn denominator(&self) -> u64 {
        self.den
    }

    /// True when the fraction reduces to a whole number.
    pub fn is_whole(&self) -> bool {
        self.den == 1
    }

    /// Largest integer not greater than the fraction.
    pub fn floor(&self) -> u64 {
        self.num / self.den
    }
}

impl From<u64> for Fraction {
    fn from(value: u64) -> Self {
        Fraction { num: value, den: 1 }
    }
}

impl Add for Fraction {
    type Output = Fraction;

    fn add(self, rhs: Fraction) -> Fraction {
        Fraction::new(self.num * rhs.den + rhs.num * self.den, self.den * rhs.den)
    }
}

impl AddAssign for Fraction {
    fn add_assign(&mut self, rhs: Fraction) {
        *self = *self + rhs;
    }
}

impl Sub for Fraction {
    type Output = Fraction;

    fn sub(self, rhs: Fraction) -> Fraction {
        let lhs_num = self.num * rhs.den;
        let rhs_num = rhs.num * self.den;
        assert!(lhs_num >= rhs_num, "fraction subtraction would underflow");
        Fraction::new(lhs_num - rhs_num, self.den * rhs.den)
    }
}

impl Mul for Fraction {
    type Output = Fraction;

    fn mul(self, rhs: Fraction) -> Fraction {
        Fraction::new(self.num * rhs.num, self.den * rhs.den)
    }
}

impl Div for Fraction {
    type Output = Fraction;

    fn div(self, rhs: Fraction) -> Fraction {
        assert!(rhs.num != 0, "fraction division by zero");
        Fraction::new(self.num * rhs.den, self.den * rhs.num)
    }
}

impl Rem for Fraction {
    type Output = Fraction;

    fn rem(self, rhs: Fraction) -> Fraction {
        let whole = Fraction::from((self / rhs).floor());
        self - rhs * whole
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Fraction) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Fraction) -> Ordering {
        // Cross-multiplied in u128 so large positions cannot overflow.
        let lhs = u128::from(self.num) * u128::from(other.den);
        let rhs = u128::from(other.num) * u128::from(self.den);
        lhs.cmp(&rhs)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}
