//! Tab separated output, one block per colormap.

use std::io::{self, Write};
use colormap_lens::{Curve, DerivativeCurve};
use rgb::RGB;

/// Write a block headed by `# title`: the parameter, the sRGB color
/// and one column per element of `columns`.
fn block(w: &mut impl Write, title: &str, labels: &[&str],
         q: &[f64], colors: &[RGB<f64>], columns: &[Vec<f64>])
         -> io::Result<()> {
    writeln!(w, "# {title}")?;
    write!(w, "q\tr\tg\tb")?;
    for l in labels { write!(w, "\t{l}")?; }
    writeln!(w)?;
    for (i, (&q, c)) in q.iter().zip(colors).enumerate() {
        write!(w, "{q:.6}\t{:.6}\t{:.6}\t{:.6}", c.r, c.g, c.b)?;
        for col in columns { write!(w, "\t{:.6}", col[i])?; }
        writeln!(w)?;
    }
    Ok(())
}

/// Split coordinates into their three columns.
fn axes(v: &[[f64; 3]]) -> Vec<Vec<f64>> {
    (0 .. 3).map(|k| v.iter().map(|x| x[k]).collect()).collect()
}

/// Quantity of a [`Curve`] to print.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Coords,
    Lightness,
    Chroma,
    Hue,
}

/// Fails for chroma and hue when the model has no polar form.
pub fn curve(w: &mut impl Write, name: &str, curve: &Curve, view: View)
             -> anyhow::Result<()> {
    let title = format!("{name} ({})", curve.model());
    let (labels, columns) = match view {
        View::Coords => (curve.model().axis_labels().to_vec(),
                         axes(curve.perceptual_coords())),
        View::Lightness => (vec!["lightness"], vec![curve.lightness()]),
        View::Chroma => (vec!["chroma"], vec![curve.chroma()?]),
        View::Hue => (vec!["hue (rad)"], vec![curve.hue()?]),
    };
    block(w, &title, &labels, curve.parameters(), curve.device_colors(),
          &columns)?;
    Ok(())
}

/// Derivatives at the midpoints, all axes or only their norm.
pub fn derivatives(w: &mut impl Write, name: &str, dv: &DerivativeCurve,
                   norm: bool) -> io::Result<()> {
    let title = format!("{name} ({})", dv.model());
    let (labels, columns) = if norm {
        (vec!["|dv|".to_string()], vec![dv.magnitudes()])
    } else {
        (dv.model().axis_labels().iter().map(|l| format!("d{l}")).collect(),
         axes(dv.derivatives()))
    };
    let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
    block(w, &title, &labels, dv.midpoint_parameters(),
          dv.midpoint_device_colors(), &columns)
}

pub fn summary_header(w: &mut impl Write) -> io::Result<()> {
    writeln!(w, "name\tmodel\tresolution\tkept\tdropped\
                 \tmin|dv|\tmedian|dv|\tmax|dv|\tmax/median")
}

pub fn summary(w: &mut impl Write, name: &str, curve: &Curve,
               dv: &DerivativeCurve) -> io::Result<()> {
    let s = dv.summary();
    writeln!(w, "{name}\t{}\t{}\t{}\t{}\t{:.6}\t{:.6}\t{:.6}\t{:.2}",
             curve.model(), curve.resolution(), curve.len(), curve.dropped(),
             s.min, s.median, s.max, s.spike_ratio())
}


#[cfg(test)]
mod tests {
    use super::*;
    use colormap_lens::{ExtractOptions, PerceptualModel};

    fn ramp() -> Curve {
        let gray = |q: &[f64]| -> Vec<RGB<f64>> {
            q.iter().map(|&x| RGB::new(255. * x, 255. * x, 255. * x)).collect()
        };
        let opts = ExtractOptions::default().resolution(3)
            .model(PerceptualModel::CieLab);
        Curve::extract(&gray, &opts).unwrap()
    }

    #[test]
    fn coords_block() {
        let mut out = Vec::new();
        curve(&mut out, "gray", &ramp(), View::Coords).unwrap();
        let s = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines[0], "# gray (CIE Lab)");
        assert_eq!(lines[1], "q\tr\tg\tb\tL\ta\tb");
        assert_eq!(lines.len(), 2 + 3);
        assert!(lines[2].starts_with("0.000000\t0.000000\t0.000000\t0.000000\t"));
        assert!(lines[4].starts_with("1.000000\t1.000000"));
    }

    #[test]
    fn hue_needs_a_polar_form() {
        let red = |q: &[f64]| -> Vec<RGB<f64>> {
            q.iter().map(|&x| RGB::new(255. * x, 0., 0.)).collect()
        };
        let opts = ExtractOptions::default().resolution(3)
            .model(PerceptualModel::CieXyz);
        let c = Curve::extract(&red, &opts).unwrap();
        let mut out = Vec::new();
        assert!(curve(&mut out, "red", &c, View::Hue).is_err());
        assert!(curve(&mut out, "red", &c, View::Lightness).is_ok());
    }

    #[test]
    fn derivative_blocks() {
        let dv = ramp().differentiate().unwrap();
        let mut out = Vec::new();
        derivatives(&mut out, "gray", &dv, false).unwrap();
        let s = String::from_utf8(out).unwrap();
        assert_eq!(s.lines().nth(1), Some("q\tr\tg\tb\tdL\tda\tdb"));
        assert_eq!(s.lines().count(), 2 + 2);
        let mut out = Vec::new();
        derivatives(&mut out, "gray", &dv, true).unwrap();
        let s = String::from_utf8(out).unwrap();
        assert_eq!(s.lines().nth(1), Some("q\tr\tg\tb\t|dv|"));
        assert!(s.lines().nth(2).unwrap().starts_with("0.250000\t0.250000"));
    }

    #[test]
    fn summary_line() {
        let c = ramp();
        let dv = c.differentiate().unwrap();
        let mut out = Vec::new();
        summary(&mut out, "gray", &c, &dv).unwrap();
        let s = String::from_utf8(out).unwrap();
        let fields: Vec<&str> = s.trim_end().split('\t').collect();
        assert_eq!(fields[..5], ["gray", "CIE Lab", "3", "3", "0"]);
        assert_eq!(fields.len(), 9);
    }
}
