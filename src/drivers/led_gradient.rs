//! Progress-to-colour gradient for the station indicator.
//!
//! Maps a dispensing progress fraction onto a fixed four-stop gradient:
//!
//! | Progress | Colour | RGB           |
//! |----------|--------|---------------|
//! | 0        | Blue   | (0, 0, 255)   |
//! | 1/3      | Green  | (0, 255, 0)   |
//! | 2/3      | Orange | (255, 128, 0) |
//! | 1        | Red    | (255, 0, 0)   |
//!
//! Each segment interpolates linearly between its two stops.  The
//! breakpoints and endpoints land exactly on the stop colours.

/// Colour as (R, G, B) tuple, each 0–255.
pub type Rgb = (u8, u8, u8);

pub const COLOUR_OFF: Rgb = (0, 0, 0);
pub const COLOUR_BLUE: Rgb = (0, 0, 255);
pub const COLOUR_GREEN: Rgb = (0, 255, 0);
pub const COLOUR_ORANGE: Rgb = (255, 128, 0);
pub const COLOUR_RED: Rgb = (255, 0, 0);
/// Shown when the drone reservoir overflow switch trips.
pub const COLOUR_ALERT: Rgb = COLOUR_RED;

const FIRST_BREAK: f32 = 1.0 / 3.0;
const SECOND_BREAK: f32 = 2.0 / 3.0;

/// Colour for a progress fraction.  Input is clamped to `[0, 1]`; NaN is
/// treated as 0.
pub fn colour_from_progress(progress: f32) -> Rgb {
    let p = clamp_unit(progress);

    if p < FIRST_BREAK {
        lerp_rgb(COLOUR_BLUE, COLOUR_GREEN, p / FIRST_BREAK)
    } else if p < SECOND_BREAK {
        lerp_rgb(COLOUR_GREEN, COLOUR_ORANGE, (p - FIRST_BREAK) / FIRST_BREAK)
    } else {
        lerp_rgb(COLOUR_ORANGE, COLOUR_RED, (p - SECOND_BREAK) / (1.0 - SECOND_BREAK))
    }
}

/// Clamp to `[0, 1]`, mapping NaN to 0.
pub fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

fn lerp_rgb(from: Rgb, to: Rgb, t: f32) -> Rgb {
    let t = clamp_unit(t);
    (
        lerp_channel(from.0, to.0, t),
        lerp_channel(from.1, to.1, t),
        lerp_channel(from.2, to.2, t),
    )
}

fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    let a = a as f32;
    let b = b as f32;
    (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
}
