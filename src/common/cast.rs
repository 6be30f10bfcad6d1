use num_traits::ToPrimitive;

// Saturating float to pixel conversions
//------------------------------------------------------------------------------

/// Rounds to the nearest pixel, clamping to `0..=u32::MAX`. NaN maps to 0.
pub fn f64_to_px(num: f64) -> u32 {
    let num = num.round();
    match num.to_u32() {
        Some(px) => px,
        None if num > 0.0 => u32::MAX,
        None => 0,
    }
}

/// Rounds to the nearest signed pixel, clamping to the `i32` range. NaN maps to 0.
pub fn f64_to_i32(num: f64) -> i32 {
    let num = num.round();
    match num.to_i32() {
        Some(v) => v,
        None if num > 0.0 => i32::MAX,
        None if num < 0.0 => i32::MIN,
        None => 0,
    }
}
