//! Cutoff-and-Gaussian repulsion from point sources.

use nalgebra::Vector2;

/// Repulsive contribution from nearby point sources.
///
/// Per source, the displacement `d = self - source` is zeroed when its
/// squared magnitude exceeds `cutoff_sq`; surviving displacements are
/// accumulated independently per axis as `exp(-d_axis² / variance) ·
/// d_axis`. The formula is deliberately axis-separable rather than a true
/// radial potential; downstream behavior depends on reproducing it as is.
pub fn repulsion(
    self_position: Vector2<f64>,
    sources: &[Vector2<f64>],
    cutoff_sq: f64,
    variance: f64,
) -> Vector2<f64> {
    let mut accumulated = Vector2::zeros();
    for source in sources {
        let d = self_position - source;
        if d.norm_squared() > cutoff_sq {
            continue;
        }
        for axis in 0..2 {
            accumulated[axis] += (-d[axis] * d[axis] / variance).exp() * d[axis];
        }
    }
    accumulated
}
