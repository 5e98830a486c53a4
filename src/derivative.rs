//! Finite differences of a [`Curve`] with respect to its parameter.
//!
//! Steps that follow a run of dropped duplicates are wider than the
//! grid spacing, so the derivative there is smaller than the local one
//! and the next step shows a jump.  This is left as is: it is where
//! the colormap is quantized.

use rgb::RGB;
use tracing::{debug, trace};
use crate::curve::Curve;
use crate::error::{Error, Result};
use crate::model::PerceptualModel;

/// Derivatives of a [`Curve`], located at the middle of each pair of
/// consecutive samples.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivativeCurve {
    model: PerceptualModel,
    midpoint_parameters: Vec<f64>,
    midpoint_device_colors: Vec<RGB<f64>>,
    derivatives: Vec<[f64; 3]>,
}

/// Minimum, median and maximum of the derivative magnitudes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub min: f64,
    pub median: f64,
    pub max: f64,
}

impl Summary {
    /// `max / median`.  Large values point to a region where the
    /// colormap speeds up, or to a quantized one.
    pub fn spike_ratio(&self) -> f64 { self.max / self.median }
}

impl DerivativeCurve {
    /// Forward differences `(v[i+1] - v[i]) / (q[i+1] - q[i])` of the
    /// perceptual coordinates of `curve`.
    ///
    /// Fails with [`Error::InsufficientSamples`] if the curve has less
    /// than 2 samples and with [`Error::DegenerateStep`] if a parameter
    /// does not exceed its predecessor by more than `f64::EPSILON`.
    pub fn from_curve(curve: &Curve) -> Result<DerivativeCurve> {
        let n = curve.len();
        if n < 2 { return Err(Error::InsufficientSamples(n)) }
        let q = curve.parameters();
        let v = curve.perceptual_coords();
        let c = curve.device_colors();
        let mut midpoint_parameters = Vec::with_capacity(n - 1);
        let mut midpoint_device_colors = Vec::with_capacity(n - 1);
        let mut derivatives = Vec::with_capacity(n - 1);
        for i in 0 .. n - 1 {
            let dq = q[i + 1] - q[i];
            if !(dq.is_finite() && dq > f64::EPSILON) {
                trace!(index = i, dq, "degenerate step");
                return Err(Error::DegenerateStep { index: i, parameter: q[i] })
            }
            let (v0, v1) = (v[i], v[i + 1]);
            derivatives.push([(v1[0] - v0[0]) / dq,
                              (v1[1] - v0[1]) / dq,
                              (v1[2] - v0[2]) / dq]);
            midpoint_parameters.push(0.5 * (q[i] + q[i + 1]));
            let (c0, c1) = (c[i], c[i + 1]);
            midpoint_device_colors.push(RGB { r: 0.5 * (c0.r + c1.r),
                                              g: 0.5 * (c0.g + c1.g),
                                              b: 0.5 * (c0.b + c1.b) });
        }
        debug!(n = n - 1, model = %curve.model(), "differentiated curve");
        Ok(DerivativeCurve { model: curve.model(), midpoint_parameters,
                             midpoint_device_colors, derivatives })
    }

    /// Model in which the derivatives are expressed.
    pub fn model(&self) -> PerceptualModel { self.model }

    /// Number of derivatives, one less than the samples of the curve.
    pub fn len(&self) -> usize { self.derivatives.len() }

    /// Always `false`: a derivative curve has at least one element.
    pub fn is_empty(&self) -> bool { self.derivatives.is_empty() }

    /// Means of consecutive parameters.
    pub fn midpoint_parameters(&self) -> &[f64] { &self.midpoint_parameters }

    /// Means of consecutive device colors, to color plots of the
    /// derivatives.
    pub fn midpoint_device_colors(&self) -> &[RGB<f64>] {
        &self.midpoint_device_colors
    }

    /// Derivatives of each perceptual coordinate.
    pub fn derivatives(&self) -> &[[f64; 3]] { &self.derivatives }

    /// Euclidean norm of each derivative: the speed at which the
    /// colormap travels through the perceptual model.
    pub fn magnitudes(&self) -> Vec<f64> {
        self.derivatives.iter()
            .map(|d| (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt())
            .collect()
    }

    /// Statistics of [`DerivativeCurve::magnitudes`].
    pub fn summary(&self) -> Summary {
        let mut m = self.magnitudes();
        m.sort_by(f64::total_cmp);
        let n = m.len();
        let median = if n % 2 == 1 { m[n / 2] }
                     else { 0.5 * (m[n / 2 - 1] + m[n / 2]) };
        Summary { min: m[0], median, max: m[n - 1] }
    }
}

impl Curve {
    /// See [`DerivativeCurve::from_curve`].
    #[inline]
    pub fn differentiate(&self) -> Result<DerivativeCurve> {
        DerivativeCurve::from_curve(self)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use crate::curve::ExtractOptions;

    fn linear_curve(n: usize) -> Curve {
        let q: Vec<f64> = (0 .. n).map(|i| i as f64 / (n - 1) as f64).collect();
        let c = q.iter().map(|&x| RGB::new(x, x, x)).collect();
        let v = q.iter().map(|&x| [x, 2. * x, -3. * x]).collect();
        Curve::from_parts(PerceptualModel::Oklab, q, c, v).unwrap()
    }

    #[test]
    fn constant_slopes() {
        let d = linear_curve(11).differentiate().unwrap();
        assert_eq!(d.len(), 10);
        for v in d.derivatives() {
            assert_abs_diff_eq!(v[0], 1., epsilon = 1e-12);
            assert_abs_diff_eq!(v[1], 2., epsilon = 1e-12);
            assert_abs_diff_eq!(v[2], -3., epsilon = 1e-12);
        }
        for m in d.magnitudes() {
            assert_abs_diff_eq!(m, 14f64.sqrt(), epsilon = 1e-12);
        }
        let s = d.summary();
        assert_abs_diff_eq!(s.spike_ratio(), 1., epsilon = 1e-12);
    }

    #[test]
    fn midpoints() {
        let d = linear_curve(3).differentiate().unwrap();
        assert_eq!(d.midpoint_parameters(), [0.25, 0.75]);
        assert_eq!(d.midpoint_device_colors(),
                   [RGB::new(0.25, 0.25, 0.25), RGB::new(0.75, 0.75, 0.75)]);
    }

    #[test]
    fn too_few_samples() {
        let one = Curve::from_parts(PerceptualModel::Oklab, vec![0.],
                                    vec![RGB::new(0., 0., 0.)], vec![[0.; 3]])
            .unwrap();
        assert_eq!(one.differentiate(), Err(Error::InsufficientSamples(1)));
        let constant = |q: &[f64]| vec![RGB::new(10., 20., 30.); q.len()];
        let curve = Curve::extract(&constant, &ExtractOptions::default())
            .unwrap();
        assert_eq!(curve.differentiate(), Err(Error::InsufficientSamples(1)));
    }

    #[test]
    fn repeated_parameter() {
        let c = vec![RGB::new(0., 0., 0.), RGB::new(0.5, 0., 0.),
                     RGB::new(1., 0., 0.)];
        let curve = Curve::from_parts(PerceptualModel::CieLab,
                                      vec![0., 0.5, 0.5], c,
                                      vec![[0.; 3], [1.; 3], [2.; 3]])
            .unwrap();
        assert_eq!(curve.differentiate(),
                   Err(Error::DegenerateStep { index: 1, parameter: 0.5 }));
    }

    #[test]
    fn decreasing_parameter() {
        let c = vec![RGB::new(0., 0., 0.); 3];
        let curve = Curve::from_parts(PerceptualModel::Oklab,
                                      vec![0., 1., 0.5], c,
                                      vec![[0.; 3], [1.; 3], [2.; 3]])
            .unwrap();
        assert_eq!(curve.differentiate(),
                   Err(Error::DegenerateStep { index: 1, parameter: 1. }));
        let nan = Curve::from_parts(PerceptualModel::Oklab,
                                    vec![0., f64::NAN],
                                    vec![RGB::new(0., 0., 0.); 2],
                                    vec![[0.; 3]; 2])
            .unwrap();
        assert!(matches!(nan.differentiate(),
                         Err(Error::DegenerateStep { index: 0, .. })));
    }

    #[test]
    fn median_of_even_count() {
        let q = vec![0., 0.25, 0.5, 0.75, 1.];
        let c = vec![RGB::new(0., 0., 0.); 5];
        // Speeds 4, 8, 12, 40.
        let v = vec![[0., 0., 0.], [1., 0., 0.], [3., 0., 0.],
                     [6., 0., 0.], [16., 0., 0.]];
        let d = Curve::from_parts(PerceptualModel::Oklab, q, c, v).unwrap()
            .differentiate().unwrap();
        assert_eq!(d.summary(), Summary { min: 4., median: 10., max: 40. });
    }
}
