//! Integer arithmetic modulo n: canonical reduction, gcd, inverses, primality
//! and a generic square-and-multiply used by every layer above it.

use log::debug;

use crate::error::{Error, ErrorKind, Result};

/// Reduce `value` into `[0, n)`, also for negative `value`.
#[inline]
pub fn posmod(value: i64, n: i64) -> Result<i64> {
    if n <= 0 {
        return Err(Error::invalid(format!("modulus must be positive, got {n}")));
    }
    Ok(value.rem_euclid(n))
}

/// `(a * b) mod n` with the product formed in 128 bits. `n` must be positive.
#[inline]
pub(crate) fn mul_mod(a: i64, b: i64, n: i64) -> i64 {
    debug_assert!(n > 0);
    ((a as i128 * b as i128).rem_euclid(n as i128)) as i64
}

/// `(a * b) mod n`, reduced into `[0, n)`. Fails if `n ≤ 0`.
#[inline]
pub fn multiply_mod(a: i64, b: i64, n: i64) -> Result<i64> {
    if n <= 0 {
        return Err(Error::invalid(format!("modulus must be positive, got {n}")));
    }
    Ok(mul_mod(a, b, n))
}

/// Greatest common divisor via the Euclidean algorithm.
pub fn gcd(a: i64, b: i64) -> Result<i64> {
    if a <= 0 || b <= 0 {
        return Err(Error::invalid(format!(
            "gcd arguments must be positive, got ({a}, {b})"
        )));
    }

    let (mut a, mut b) = (a, b);
    while b != 0 {
        let remainder = a % b;
        a = b;
        b = remainder;
    }
    Ok(a)
}

/// Multiplicative inverse of `value` modulo `n` using the extended Euclidean
/// algorithm.
///
/// `value` must already lie in `(0, n)`. When `n` shares a factor with
/// `value` the Bézout coefficient does not invert it and
/// [`Error::NotInvertible`] is returned.
pub fn mod_inverse(n: i64, value: i64) -> Result<i64> {
    if value <= 0 || n <= 0 {
        return Err(Error::invalid(format!(
            "value ({value}) and modulus ({n}) must be positive"
        )));
    }
    if value >= n {
        return Err(Error::invalid(format!(
            "value ({value}) must be smaller than modulus ({n})"
        )));
    }

    // gcd(value, n) = n*s + value*t; only t is needed.
    let (mut r0, mut r1) = (n, value);
    let (mut t0, mut t1) = (0i64, 1i64);
    while r1 != 0 {
        let quotient = r0 / r1;
        (r0, r1) = (r1, r0 - quotient * r1);
        (t0, t1) = (t1, t0 - quotient * t1);
    }

    let inv = t0.rem_euclid(n);
    if mul_mod(value, inv, n) != 1 {
        return Err(Error::NotInvertible { value, modulus: n });
    }
    Ok(inv)
}

/// Trial-division primality test.
///
/// Odd candidates are tested against every odd divisor in `[3, value/2)`.
/// The excluded bound `value/2` is never a proper divisor of an odd number,
/// so no prime is misclassified.
pub fn is_prime(value: i64) -> bool {
    if value < 2 {
        return false;
    }
    if value == 2 {
        return true;
    }
    if value % 2 == 0 {
        return false;
    }

    let limit = value / 2;
    let mut check = 3;
    while check < limit {
        if value % check == 0 {
            return false;
        }
        check += 2;
    }
    true
}

/// Compute `base^exponent` for any associative operation, with distinct
/// squaring and multiplication steps.
///
/// The exponent is scanned from its most significant bit: the running value
/// starts at `base`, and for every lower bit it is squared and then, if the
/// bit is set, multiplied by `base`. `identity` is returned only for a zero
/// exponent and `base` is returned unchanged for an exponent of one.
pub fn square_and_multiply_ex<T, S, M>(
    identity: T,
    base: T,
    exponent: i64,
    square: S,
    multiply: M,
) -> Result<T>
where
    T: Clone,
    S: Fn(&T, &T) -> Result<T>,
    M: Fn(&T, &T) -> Result<T>,
{
    if exponent < 0 {
        return Err(Error::invalid(format!(
            "negative exponents are not supported: {exponent}"
        )));
    }
    if exponent == 0 {
        return Ok(identity);
    }
    if exponent == 1 {
        return Ok(base);
    }

    let top = 63 - exponent.leading_zeros();
    let mut result = base.clone();
    for bit in (0..top).rev() {
        result = square(&result, &result)?;
        if (exponent >> bit) & 1 == 1 {
            result = multiply(&result, &base)?;
        }
    }
    Ok(result)
}

/// [`square_and_multiply_ex`] where squaring is the operation applied to
/// the value and itself.
#[inline]
pub fn square_and_multiply<T, F>(identity: T, base: T, exponent: i64, op: F) -> Result<T>
where
    T: Clone,
    F: Fn(&T, &T) -> Result<T>,
{
    square_and_multiply_ex(identity, base, exponent, &op, &op)
}

/// `value^pow mod n`.
pub fn raise_power(value: i64, pow: i64, n: i64) -> Result<i64> {
    let base = posmod(value, n)?;
    square_and_multiply(1 % n, base, pow, |x, y| Ok(mul_mod(*x, *y, n)))
}

/// Multiplicative order of `alpha` in `(Z/nZ)*`: the first `k` with
/// `alpha^k = 1`.
pub fn element_order(n: i64, alpha: i64) -> Result<i64> {
    if n < 3 {
        return Err(Error::invalid(format!("modulus must be 3 or greater, got {n}")));
    }
    if alpha < 1 || alpha > n - 1 {
        return Err(Error::invalid(format!("alpha must lie in [1, {}], got {alpha}", n - 1)));
    }

    let mut element = 1;
    for k in 1..n {
        element = mul_mod(element, alpha, n);
        if element == 1 {
            return Ok(k);
        }
    }
    Err(Error::consistency(format!(
        "unable to find the identity among powers of {alpha} mod {n}"
    )))
}

/// True when the powers of `alpha` reach every element of `[1, n)`.
pub fn is_generator(n: i64, alpha: i64) -> Result<bool> {
    let order = element_order(n, alpha)?;
    debug!("{alpha} has order {order} modulo {n}");
    Ok(order == n - 1)
}

/// Every generator of `(Z/nZ)*`, in increasing order.
pub fn generators(n: i64) -> Result<Vec<i64>> {
    if n < 3 {
        return Err(Error::invalid(format!("modulus must be 3 or greater, got {n}")));
    }

    let mut gens = Vec::new();
    for alpha in 1..n {
        // Elements that share a factor with n never reach 1.
        match is_generator(n, alpha) {
            Ok(true) => gens.push(alpha),
            Ok(false) => {}
            Err(err) if err.kind() == ErrorKind::Consistency => {}
            Err(err) => return Err(err),
        }
    }
    Ok(gens)
}

/// Confirm that every element of `[1, n)` has an inverse modulo `n`.
pub fn group_inverses(n: i64) -> Result<()> {
    if n <= 0 {
        return Err(Error::invalid(format!("modulus must be positive, got {n}")));
    }
    for value in 1..n {
        mod_inverse(n, value)?;
    }
    debug!("every element of [1, {n}) is invertible");
    Ok(())
}
