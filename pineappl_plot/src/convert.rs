// `f64` has a 52-bit mantissa, every index that occurs in a plot is exactly representable
#[allow(clippy::cast_precision_loss)]
pub const fn f64_from_usize(x: usize) -> f64 {
    x as f64
}
