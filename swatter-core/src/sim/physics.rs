use super::{Board, Bug};

/// Advances one bug by one frame, reflecting off the four walls.
///
/// Each axis is handled independently: a coordinate that would leave
/// `[0, max]` is clamped to the wall it crossed and its velocity component
/// is flipped to point back inside. A corner hit reflects both axes.
pub fn step_bug(bug: &mut Bug, board: Board) {
    let (x, vx) = reflect_axis(bug.x + bug.vx, bug.vx, board.max_x());
    let (y, vy) = reflect_axis(bug.y + bug.vy, bug.vy, board.max_y());
    bug.x = x;
    bug.y = y;
    bug.vx = vx;
    bug.vy = vy;
}

#[inline]
fn reflect_axis(next: f64, velocity: f64, max: f64) -> (f64, f64) {
    if next < 0.0 {
        (0.0, velocity.abs())
    } else if next > max {
        (max, -velocity.abs())
    } else {
        (next, velocity)
    }
}
