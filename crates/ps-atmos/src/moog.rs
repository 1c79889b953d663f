//! MOOG model-atmosphere files.
//!
//! Layout, one item per line unless noted:
//!
//! ```text
//! WEBMARCS                         format tag
//!  free-text description
//! NTAU       2
//! 5000.0                           reference wavelength, WEBMARCS only
//!  0.01 5000.0 1e14 1e5            one row per layer
//!  1.00 6000.0 1e15 1e6
//!          1.500                   microturbulence
//! NATOMS        1     -0.500       count and metallicity offset
//!   26  7.30                       (Z, log eps) pairs, any line breaks
//! NMOL          2                  count
//!   606.0  106.0                   species codes, any line breaks
//! ```
//!
//! WEBMARCS rows are either `tauref T Ne Pgas` or the seven-column
//! `i i log10(tau) i T Pe Pg` form. KURUCZ rows are
//! `rhox T Pgas Ne kaprefmass`, extra columns ignored.

use crate::abundance::AbundanceOverride;
use crate::error::{AtmosError, AtmosResult};
use crate::format::{ColumnLayout, ModelFormat};
use crate::grid::check_depth_count;
use crate::loader::LoadSettings;
use crate::raw::RawModel;
use ps_core::constants::KM_S_TO_CM_S;
use ps_species::{Element, SpeciesCode};
use std::fmt::Write as _;
use std::path::Path;
use tracing::{debug, instrument, warn};

/// Microturbulence below this is in km/s.
const VTURB_KM_S_LIMIT: f64 = 100.0;

/// A parsed MOOG model file.
#[derive(Debug, Clone, PartialEq)]
pub struct MoogModel {
    pub format: ModelFormat,
    pub description: String,
    /// Wavelength the tabulated optical depth refers to [Å]
    pub reference_wavelength: Option<f64>,
    /// Rows in the loader's column layout for `format`
    pub raw: RawModel,
    pub abscale: f64,
    pub overrides: Vec<AbundanceOverride>,
    pub species: Vec<SpeciesCode>,
}

impl MoogModel {
    /// Load settings carried by the file itself.
    pub fn settings(&self) -> LoadSettings {
        LoadSettings {
            abscale: self.abscale,
            overrides: self.overrides.clone(),
            species: self.species.clone(),
            reference_wavelength: self.reference_wavelength,
            ..LoadSettings::default()
        }
    }
}

struct Lines<'a> {
    inner: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.lines().enumerate(),
        }
    }

    /// Next line with its 1-based number.
    fn next_line(&mut self, what: &str) -> AtmosResult<(usize, &'a str)> {
        match self.inner.next() {
            Some((i, line)) => Ok((i + 1, line)),
            None => Err(AtmosError::Parse {
                line: 0,
                message: format!("unexpected end of file, expected {what}"),
            }),
        }
    }

    /// Remaining whitespace-separated tokens with their line numbers.
    fn tokens(self) -> Vec<(usize, &'a str)> {
        self.inner
            .flat_map(|(i, line)| line.split_whitespace().map(move |t| (i + 1, t)))
            .collect()
    }
}

/// Parse a number, accepting Fortran `D` exponents.
fn parse_number(token: &str, line: usize) -> AtmosResult<f64> {
    token
        .replace(['D', 'd'], "E")
        .parse::<f64>()
        .map_err(|_| AtmosError::Parse {
            line,
            message: format!("expected a number, found '{token}'"),
        })
}

/// Non-negative integer that fits in `u32`.
fn parse_count(token: &str, line: usize) -> AtmosResult<u32> {
    let value = parse_number(token, line)?;
    if !value.is_finite()
        || value < 0.0
        || value.fract() != 0.0
        || value > f64::from(u32::MAX)
    {
        return Err(AtmosError::Parse {
            line,
            message: format!("expected a count, found '{token}'"),
        });
    }
    Ok(value as u32)
}

fn parse_row(line: &str, number: usize) -> AtmosResult<Vec<f64>> {
    line.split_whitespace()
        .map(|t| parse_number(t, number))
        .collect()
}

/// Read a model from MOOG text.
#[instrument(skip_all)]
pub fn read_model(text: &str) -> AtmosResult<MoogModel> {
    let mut lines = Lines::new(text);

    let (_, tag) = lines.next_line("format tag")?;
    let spec = ModelFormat::resolve(tag)?;
    let format = spec.format;
    let layout = spec.layout;
    let (_, description) = lines.next_line("description")?;

    let (n, ntau_line) = lines.next_line("NTAU")?;
    let mut fields = ntau_line.split_whitespace();
    if !fields
        .next()
        .is_some_and(|k| k.eq_ignore_ascii_case("NTAU"))
    {
        return Err(AtmosError::Parse {
            line: n,
            message: format!("expected 'NTAU <n>', found '{}'", ntau_line.trim()),
        });
    }
    let ntau = match fields.next() {
        Some(t) => parse_count(t, n)? as usize,
        None => {
            return Err(AtmosError::Parse {
                line: n,
                message: "NTAU has no count".into(),
            });
        }
    };
    check_depth_count(ntau)?;

    let reference_wavelength = if format == ModelFormat::WebMarcs {
        let (n, line) = lines.next_line("reference wavelength")?;
        Some(parse_number(line.trim(), n)?)
    } else {
        None
    };

    let mut rows = Vec::with_capacity(ntau);
    for i in 0..ntau {
        let (n, line) = lines.next_line("layer row")?;
        let values = parse_row(line, n)?;
        let row = match layout {
            ColumnLayout::TauTempNePgas if values.len() >= 7 => {
                vec![values[2], values[4], values[5], values[6]]
            }
            _ if values.len() < layout.width() => {
                return Err(AtmosError::MalformedRow {
                    row: i,
                    expected: layout.width(),
                    found: values.len(),
                });
            }
            _ => values[..layout.width()].to_vec(),
        };
        rows.push(row);
    }

    let (n, vturb_line) = lines.next_line("microturbulence")?;
    let vturb = parse_number(vturb_line.trim(), n)?;
    if vturb <= 0.0 {
        warn!(vturb, "invalid microturbulence");
    }
    let vturb = if vturb < VTURB_KM_S_LIMIT {
        vturb * KM_S_TO_CM_S
    } else {
        vturb
    };

    let mut tokens = lines.tokens().into_iter();
    let mut abscale = 0.0;
    let mut overrides = Vec::new();
    let mut species = Vec::new();

    if let Some((n, keyword)) = tokens.next() {
        expect_keyword(keyword, "NATOMS", n)?;
        let (n, count) = next_token(&mut tokens, "NATOMS count")?;
        let natoms = parse_count(count, n)?;
        let (n, scale) = next_token(&mut tokens, "NATOMS abscale")?;
        abscale = parse_number(scale, n)?;
        for _ in 0..natoms {
            let (n, z) = next_token(&mut tokens, "atomic number")?;
            let element = Element::new(parse_count(z, n)?)?;
            let (n, log_eps) = next_token(&mut tokens, "log epsilon")?;
            overrides.push(AbundanceOverride::new(element, parse_number(log_eps, n)?));
        }

        if let Some((n, keyword)) = tokens.next() {
            expect_keyword(keyword, "NMOL", n)?;
            let (n, count) = next_token(&mut tokens, "NMOL count")?;
            let nmol = parse_count(count, n)?;
            for _ in 0..nmol {
                let (n, code) = next_token(&mut tokens, "species code")?;
                species.push(SpeciesCode::from_f64(parse_number(code, n)?)?);
            }
        }
    }

    debug!(
        %format,
        ntau,
        natoms = overrides.len(),
        nmol = species.len(),
        "read MOOG model"
    );
    Ok(MoogModel {
        format,
        description: description.trim().to_string(),
        reference_wavelength,
        raw: RawModel::new(rows).with_vturb(vturb),
        abscale,
        overrides,
        species,
    })
}

fn expect_keyword(found: &str, keyword: &str, line: usize) -> AtmosResult<()> {
    if found.eq_ignore_ascii_case(keyword) {
        Ok(())
    } else {
        Err(AtmosError::Parse {
            line,
            message: format!("expected {keyword}, found '{found}'"),
        })
    }
}

fn next_token<'a>(
    tokens: &mut impl Iterator<Item = (usize, &'a str)>,
    what: &str,
) -> AtmosResult<(usize, &'a str)> {
    tokens.next().ok_or_else(|| AtmosError::Parse {
        line: 0,
        message: format!("unexpected end of file, expected {what}"),
    })
}

/// Read a model from a file on disk.
pub fn read_model_file(path: impl AsRef<Path>) -> AtmosResult<MoogModel> {
    let text = std::fs::read_to_string(path)?;
    read_model(&text)
}

/// Render a model as MOOG text.
///
/// WEBMARCS rows are written in the four-column form.
pub fn write_model(model: &MoogModel) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "{}", model.format.tag());
    let _ = writeln!(out, " {}", model.description);
    let _ = writeln!(out, "NTAU       {}", model.raw.ntau());
    if model.format == ModelFormat::WebMarcs {
        let wavelength = model
            .reference_wavelength
            .unwrap_or(crate::format::DEFAULT_REFERENCE_WAVELENGTH);
        let _ = writeln!(out, "{wavelength:.1}");
    }
    for row in &model.raw.rows {
        for value in row {
            let _ = write!(out, " {value:.8e}");
        }
        out.push('\n');
    }

    if model.raw.vturb <= 0.0 {
        warn!(vturb = model.raw.vturb, "invalid microturbulence");
    }
    let vturb_km_s = model.raw.vturb / KM_S_TO_CM_S;
    if vturb_km_s < VTURB_KM_S_LIMIT {
        let _ = writeln!(out, "         {vturb_km_s}");
    } else {
        let _ = writeln!(out, "         {:.1}", model.raw.vturb);
    }

    let _ = writeln!(out, "NATOMS        {}     {}", model.overrides.len(), model.abscale);
    for o in &model.overrides {
        let _ = writeln!(out, "  {:>2}  {}", o.element.z(), o.log_eps);
    }
    let _ = writeln!(out, "NMOL          {}", model.species.len());
    for chunk in model.species.chunks(8) {
        for code in chunk {
            let _ = write!(out, "  {code}");
        }
        out.push('\n');
    }
    out
}

/// Write a model to a file on disk.
pub fn write_model_file(model: &MoogModel, path: impl AsRef<Path>) -> AtmosResult<()> {
    std::fs::write(path, write_model(model))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEBMARCS: &str = "\
WEBMARCS
 MARCS 2011 spherical, Teff/logg/[M/H]/xi 5777/4.440/0.000/1.000
NTAU       3
5000.0
   1   1 -4.000D+00   1  4.000e+03  1.000e-01  2.000e+02
   2   2 -2.000e+00   2  4.800e+03  1.000e+00  2.000e+03
   3   3  0.500e+00   3  6.500e+03  1.000e+02  1.000e+05
         1.000
NATOMS        0     0.000
NMOL          0
";

    #[test]
    fn reads_seven_column_webmarcs() {
        let model = read_model(WEBMARCS).unwrap();
        assert_eq!(model.format, ModelFormat::WebMarcs);
        assert_eq!(model.reference_wavelength, Some(5000.0));
        assert_eq!(model.raw.ntau(), 3);
        assert_eq!(model.raw.rows[0], vec![-4.0, 4000.0, 0.1, 200.0]);
        assert_eq!(model.raw.vturb, 1.0e5);
        assert!(model.overrides.is_empty());
        assert!(model.species.is_empty());
    }

    #[test]
    fn reads_atoms_and_molecules_across_lines() {
        let text = "\
KURUCZ
 test
NTAU 1
 1.0e-3 4000.0 1.0e2 1.0e10 2.0e-2 0.0 0.0
 2.0e5
NATOMS 2 -0.5
 26 7.30
 6 8.1
NMOL 3
 606.0 106.0
 26.1
";
        let model = read_model(text).unwrap();
        assert_eq!(model.raw.rows[0].len(), 5);
        assert_eq!(model.raw.vturb, 2.0e5);
        assert_eq!(model.abscale, -0.5);
        assert_eq!(model.overrides.len(), 2);
        assert_eq!(model.overrides[0].element, Element::FE);
        assert_eq!(model.species.len(), 3);
        assert_eq!(model.species[2].to_string(), "26.1");
        assert!(model.reference_wavelength.is_none());
    }

    #[test]
    fn disabled_tag_fails_at_read() {
        let err = read_model("NEXTGEN\nx\nNTAU 1\n").unwrap_err();
        assert!(matches!(err, AtmosError::UnsupportedModelType { .. }));
    }

    #[test]
    fn ntau_cap_checked_before_rows() {
        let err = read_model("KURUCZ\nx\nNTAU 101\n").unwrap_err();
        assert!(matches!(err, AtmosError::TooManyDepthPoints { ntau: 101, .. }));
    }

    #[test]
    fn short_kurucz_row() {
        let err = read_model("KURUCZ\nx\nNTAU 1\n 1.0 2.0 3.0\n").unwrap_err();
        assert!(matches!(err, AtmosError::MalformedRow { row: 0, expected: 5, found: 3 }));
    }

    #[test]
    fn out_of_range_atomic_number_rejected() {
        let text = "KURUCZ\nx\nNTAU 1\n 1.0 4000.0 1e2 1e10 1e-2\n 2.0\nNATOMS 1 0.0\n 4294967322 7.0\n";
        let err = read_model(text).unwrap_err();
        assert!(matches!(err, AtmosError::Parse { line: 7, .. }));
    }

    #[test]
    fn unknown_atomic_number_rejected() {
        let text = "KURUCZ\nx\nNTAU 1\n 1.0 4000.0 1e2 1e10 1e-2\n 2.0\nNATOMS 1 0.0\n 96 7.0\n";
        let err = read_model(text).unwrap_err();
        assert!(matches!(err, AtmosError::Species(_)));
    }

    #[test]
    fn zero_microturbulence_still_reads() {
        let text = "KURUCZ\nx\nNTAU 1\n 1.0 4000.0 1e2 1e10 1e-2\n 0.0\n";
        let model = read_model(text).unwrap();
        assert_eq!(model.raw.vturb, 0.0);
        assert!(write_model(&model).contains("NATOMS"));
    }

    #[test]
    fn bad_number_reports_line() {
        let err = read_model("KURUCZ\nx\nNTAU 1\n 1.0 2.0 abc 4.0 5.0\n").unwrap_err();
        assert!(matches!(err, AtmosError::Parse { line: 4, .. }));
    }

    #[test]
    fn written_text_reads_back() {
        let mut model = read_model(WEBMARCS).unwrap();
        model.overrides.push(AbundanceOverride::new(Element::FE, 7.3));
        model.species = vec!["606.0".parse().unwrap(), "26.1".parse().unwrap()];
        let again = read_model(&write_model(&model)).unwrap();
        assert_eq!(again.format, model.format);
        assert_eq!(again.raw.rows, model.raw.rows);
        assert_eq!(again.overrides, model.overrides);
        assert_eq!(again.species, model.species);
        assert!((again.raw.vturb - model.raw.vturb).abs() < 1e-6);
    }
}
