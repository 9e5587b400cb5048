/// Parity via the remainder operator.
pub fn is_even_modulo(value: i32) -> bool {
    value % 2 == 0
}

/// Parity via the lowest bit. Two's complement keeps this correct for
/// negative values too.
pub fn is_even_bitwise(value: i32) -> bool {
    (value & 1) == 0
}
