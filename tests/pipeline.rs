use colormap_lens::{convert, palettes, ColorRange, Curve, Error,
                    ExtractOptions, PerceptualModel, RGBColor};
use proptest::prelude::*;
use rgb::{RGB, RGB8, RGBA};

fn models() -> impl Strategy<Value = PerceptualModel> {
    prop::sample::select(PerceptualModel::ALL.to_vec())
}

fn gray_ramp(q: &[f64]) -> Vec<RGB<f64>> {
    q.iter().map(|&x| RGB::new(255. * x, 255. * x, 255. * x)).collect()
}

proptest! {
    #[test]
    fn constant_colormap_has_one_sample(r in any::<u8>(), g in any::<u8>(),
                                        b in any::<u8>(),
                                        n in 2usize .. 3000,
                                        model in models()) {
        let cmap = |q: &[f64]| vec![RGB8::new(r, g, b); q.len()];
        let opts = ExtractOptions::default().resolution(n).model(model);
        let curve = Curve::extract(&cmap, &opts).unwrap();
        prop_assert_eq!(curve.len(), 1);
        prop_assert_eq!(curve.parameters(), &[0.][..]);
        prop_assert_eq!(curve.differentiate(),
                        Err(Error::InsufficientSamples(1)));
    }

    #[test]
    fn varying_colormap_keeps_everything(n in 2usize .. 5000) {
        let opts = ExtractOptions::default().resolution(n);
        let curve = Curve::extract(&gray_ramp, &opts).unwrap();
        prop_assert_eq!(curve.len(), n);
        prop_assert_eq!(curve.dropped(), 0);
    }

    #[test]
    fn curves_are_aligned(levels in 1usize .. 300, n in 2usize .. 3000,
                          model in models()) {
        let cmap = RGBA::<f64>::viridis().gradient().quantized(levels).sampled();
        let opts = ExtractOptions::default().resolution(n).model(model);
        let curve = Curve::extract(&cmap, &opts).unwrap();
        prop_assert!(curve.len() <= levels.max(1));
        prop_assert_eq!(curve.device_colors().len(), curve.len());
        prop_assert_eq!(curve.perceptual_coords().len(), curve.len());
        for (c, v) in curve.device_colors().iter()
                          .zip(curve.perceptual_coords()) {
            prop_assert_eq!(convert(&[*c], model)[0], *v);
        }
        prop_assert!(curve.parameters().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn derivatives_sit_between_samples(levels in 2usize .. 300,
                                       n in 2usize .. 3000,
                                       model in models()) {
        let cmap = RGB8::HUE.quantized(levels).sampled();
        let opts = ExtractOptions::default().resolution(n).model(model);
        let curve = Curve::extract(&cmap, &opts).unwrap();
        prop_assume!(curve.len() >= 2);
        let d = curve.differentiate().unwrap();
        prop_assert_eq!(d.len(), curve.len() - 1);
        prop_assert_eq!(d.model(), model);
        let q = curve.parameters();
        for (i, &m) in d.midpoint_parameters().iter().enumerate() {
            prop_assert_eq!(m, 0.5 * (q[i] + q[i + 1]));
            prop_assert!(q[i] < m && m < q[i + 1]);
        }
        prop_assert!(d.midpoint_parameters().windows(2).all(|w| w[0] < w[1]));
        prop_assert!(d.derivatives().iter().flatten().all(|x| x.is_finite()));
    }
}

#[test]
fn grayscale_lightness_increases() {
    let opts = ExtractOptions::default().resolution(5);
    let curve = Curve::extract(&gray_ramp, &opts).unwrap();
    assert_eq!(curve.parameters(), [0., 0.25, 0.5, 0.75, 1.]);
    let d = curve.differentiate().unwrap();
    assert_eq!(d.midpoint_parameters(), [0.125, 0.375, 0.625, 0.875]);
    let dl: Vec<f64> = d.derivatives().iter().map(|v| v[0]).collect();
    assert!(dl.iter().all(|&x| x > 0.), "{dl:?}");
    let (min, max) = dl.iter().fold((f64::INFINITY, 0f64),
                                    |(a, b), &x| (a.min(x), b.max(x)));
    assert!(max < 2.5 * min, "{dl:?}");
    // Grays have no chroma.
    for v in d.derivatives() {
        assert!(v[1].abs() < 1e-3 && v[2].abs() < 1e-3, "{v:?}");
    }
}

#[test]
fn resolution_one_is_rejected_before_sampling() {
    let cmap = |_: &[f64]| -> Vec<RGB8> { panic!("colormap evaluated") };
    let opts = ExtractOptions::default().resolution(1);
    assert_eq!(Curve::extract(&cmap, &opts), Err(Error::InvalidResolution(1)));
}

#[test]
fn quantized_viridis_has_uniform_steps() {
    let viridis = palettes::colormap::<RGBA<f64>>("viridis").unwrap();
    let cmap = viridis.quantized(256).sampled();
    let curve = Curve::extract(&cmap, &ExtractOptions::default()).unwrap();
    assert_eq!(curve.len(), 256);
    assert_eq!(curve.dropped(), 10_000 - 256);
    let d = curve.differentiate().unwrap();
    assert_eq!(d.len(), 255);
    // Each kept sample opens a new table entry.
    let dq: Vec<f64> = curve.parameters().windows(2).map(|w| w[1] - w[0])
        .collect();
    assert!(dq.iter().all(|&x| (x - 1. / 256.).abs() < 2e-4), "{dq:?}");
    let s = d.summary();
    assert!(s.min > 0. && s.min <= s.median && s.median <= s.max);
}

#[test]
fn step_after_a_run_spans_it() {
    // Gray held at 0.2 over [0.2, 0.6), ramps around it.
    let cmap = |q: &[f64]| -> Vec<RGB<f64>> {
        q.iter().map(|&x| {
            let g = if x < 0.2 { x } else if x < 0.6 { 0.2 } else { x - 0.35 };
            RGB::new(255. * g, 255. * g, 255. * g)
        }).collect()
    };
    let opts = ExtractOptions::default().resolution(11)
        .model(PerceptualModel::CieLab);
    let curve = Curve::extract(&cmap, &opts).unwrap();
    assert_eq!(curve.dropped(), 3);
    let q = curve.parameters();
    assert_eq!(&q[..4], [0., 0.1, 0.2, 0.6]);
    let v = curve.perceptual_coords();
    let d = curve.differentiate().unwrap();
    assert!((d.midpoint_parameters()[2] - 0.4).abs() < 1e-12);
    // Plain quotients over the wide step, nothing redistributed.
    for i in 0 .. d.len() {
        let dq = q[i + 1] - q[i];
        for k in 0 .. 3 {
            assert_eq!(d.derivatives()[i][k], (v[i + 1][k] - v[i][k]) / dq);
        }
    }
    let dl: Vec<f64> = d.derivatives().iter().map(|x| x[0]).collect();
    assert!(dl[2] < dl[1] && dl[2] < dl[3], "{dl:?}");
}

#[test]
fn named_model_and_colormap() {
    let magma = palettes::colormap::<RGB8>("magma").unwrap().sampled();
    let curve = Curve::extract_named(&magma, "CIE LCHab", 2000).unwrap();
    assert_eq!(curve.model(), PerceptualModel::CieLch);
    let h = curve.hue().unwrap();
    assert!(h.iter().all(|&x| (0. .. 2. * std::f64::consts::PI).contains(&x)));
    assert_eq!(Curve::extract_named(&magma, "RGB", 2000),
               Err(Error::UnsupportedModel("RGB".into())));
}
