//! Adaptive Gauss–Kronrod quadrature.
//!
//! Each segment is integrated with the 15-point Kronrod rule and the embedded
//! 7-point Gauss rule; their difference is the segment's error estimate.
//! The segment with the largest estimate is bisected until the summed
//! estimate meets the configured tolerance.

mod config;
mod error;
mod solution;

pub use config::Config;
pub use error::Error;
pub use solution::{Solution, Status};

use std::error::Error as StdError;

/// Kronrod abscissae on `[0, 1)`, outermost first, ending at the center.
const XGK: [f64; 8] = [
    0.991_455_371_120_812_6,
    0.949_107_912_342_758_5,
    0.864_864_423_359_769_1,
    0.741_531_185_599_394_4,
    0.586_087_235_467_691_1,
    0.405_845_151_377_397_2,
    0.207_784_955_007_898_5,
    0.0,
];

/// Kronrod weights matching [`XGK`].
const WGK: [f64; 8] = [
    0.022_935_322_010_529_22,
    0.063_092_092_629_978_55,
    0.104_790_010_322_250_18,
    0.140_653_259_715_525_92,
    0.169_004_726_639_267_9,
    0.190_350_578_064_785_4,
    0.204_432_940_075_298_9,
    0.209_482_141_084_727_83,
];

/// Gauss weights for the odd-indexed abscissae of [`XGK`] and the center.
const WG: [f64; 4] = [
    0.129_484_966_168_869_7,
    0.279_705_391_489_276_7,
    0.381_830_050_505_118_9,
    0.417_959_183_673_469_4,
];

/// A subinterval with its Kronrod estimate and error estimate.
#[derive(Debug, Clone, Copy)]
struct Segment {
    lower: f64,
    upper: f64,
    value: f64,
    error: f64,
}

/// Integrates `f` over `bounds` with adaptive Gauss–Kronrod quadrature.
///
/// Bounds may be given in either order; reversed bounds negate the result.
/// Equal bounds yield an exact zero.
/// Reaching the subdivision limit is not an error: the solution carries
/// [`Status::SubdivisionLimit`] and its error estimate, and the caller decides
/// whether that is acceptable.
///
/// # Errors
///
/// Returns an error if the config is invalid, a bound is non-finite, or the
/// integrand fails or returns a non-finite value.
pub fn integrate<F, E>(mut f: F, bounds: [f64; 2], config: &Config) -> Result<Solution, Error>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: StdError + Send + Sync + 'static,
{
    config
        .validate()
        .map_err(|reason| Error::InvalidConfig { reason })?;

    let [from, to] = bounds;
    for value in [from, to] {
        if !value.is_finite() {
            return Err(Error::NonFiniteBound { value });
        }
    }

    if from == to {
        return Ok(Solution {
            status: Status::Converged,
            value: 0.0,
            error_estimate: 0.0,
            segments: 0,
            evals: 0,
        });
    }

    let (lower, upper, sign) = if from < to {
        (from, to, 1.0)
    } else {
        (to, from, -1.0)
    };

    let mut evals = 0;
    let mut segments = vec![kronrod_segment(&mut f, lower, upper, &mut evals)?];

    let status = loop {
        let value: f64 = segments.iter().map(|s| s.value).sum();
        let error: f64 = segments.iter().map(|s| s.error).sum();

        if error <= config.abs_tol.max(config.rel_tol * value.abs()) {
            break Status::Converged;
        }
        if segments.len() >= config.max_subdivisions {
            break Status::SubdivisionLimit;
        }

        let worst = worst_segment(&segments);
        let Segment { lower, upper, .. } = segments[worst];
        let mid = 0.5 * (lower + upper);

        if mid <= lower || mid >= upper {
            break Status::SubdivisionLimit;
        }

        segments[worst] = kronrod_segment(&mut f, lower, mid, &mut evals)?;
        segments.push(kronrod_segment(&mut f, mid, upper, &mut evals)?);
    };

    let value: f64 = segments.iter().map(|s| s.value).sum();
    let error_estimate: f64 = segments.iter().map(|s| s.error).sum();

    Ok(Solution {
        status,
        value: sign * value,
        error_estimate,
        segments: segments.len(),
        evals,
    })
}

/// Index of the segment with the largest error estimate.
fn worst_segment(segments: &[Segment]) -> usize {
    segments
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.error.total_cmp(&b.error))
        .map_or(0, |(index, _)| index)
}

/// Applies the 15-point Kronrod rule and embedded 7-point Gauss rule to one segment.
fn kronrod_segment<F, E>(
    f: &mut F,
    lower: f64,
    upper: f64,
    evals: &mut usize,
) -> Result<Segment, Error>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: StdError + Send + Sync + 'static,
{
    let center = 0.5 * (lower + upper);
    let half_width = 0.5 * (upper - lower);

    let f_center = evaluate(f, center, evals)?;
    let mut kronrod = WGK[7] * f_center;
    let mut gauss = WG[3] * f_center;

    for (j, (&node, &weight)) in XGK.iter().zip(&WGK).take(7).enumerate() {
        let dx = half_width * node;
        let pair = evaluate(f, center - dx, evals)? + evaluate(f, center + dx, evals)?;
        kronrod += weight * pair;
        if j % 2 == 1 {
            gauss += WG[j / 2] * pair;
        }
    }

    Ok(Segment {
        lower,
        upper,
        value: kronrod * half_width,
        error: ((kronrod - gauss) * half_width).abs(),
    })
}

fn evaluate<F, E>(f: &mut F, x: f64, evals: &mut usize) -> Result<f64, Error>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: StdError + Send + Sync + 'static,
{
    *evals += 1;
    let value = f(x).map_err(|source| Error::Integrand {
        x,
        source: Box::new(source),
    })?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::NonFiniteIntegrand { x, value })
    }
}
