//! Camera domain: damped-spring smoothing and easing curves.

/// Critically damped approach of `current` toward `target`.
///
/// Follows the usual game-engine formulation: a spring with angular
/// frequency `2 / smooth_time`, integrated with a cubic approximation of the
/// exponential decay, that never overshoots the target. `velocity` carries
/// the spring state between calls.
pub fn smooth_damp(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    dt: f32,
) -> f32 {
    if dt <= 0.0 {
        return current;
    }
    let smooth_time = smooth_time.max(0.0001);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;
    let mut output = target + (change + temp) * decay;

    // Clamp overshoot
    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = 0.0;
    }
    output
}

/// Quadratic ease-out on `t` in [0, 1]
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}
