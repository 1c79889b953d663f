//! MOOG files on disk: read, load, write, read again.

use ps_atmos::moog::{read_model_file, write_model_file};
use ps_atmos::{ModelFormat, ModelLoader, TauScale};
use ps_species::Element;
use std::io::Write;
use tempfile::NamedTempFile;

const MARCS: &str = "\
WEBMARCS
 MARCS 2011 spherical, Teff/logg/[M/H]/xi 5000/4.500/-0.500/1.200
NTAU       4
5000.0
   1   1 -4.000e+00   1  3.900e+03  3.000e-03  1.000e+02
   2   2 -2.500e+00   2  4.200e+03  4.000e-02  9.000e+02
   3   3 -1.000e+00   3  4.900e+03  1.000e+00  6.000e+03
   4   4  0.500e+00   4  6.800e+03  1.000e+02  2.500e+04
         1.200
NATOMS        1     -0.500
  12  7.40
NMOL          0
";

fn temp_with(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

#[test]
fn marcs_file_loads_end_to_end() {
    let file = temp_with(MARCS);
    let moog = read_model_file(file.path()).unwrap();
    assert_eq!(moog.format, ModelFormat::WebMarcs);
    assert_eq!(moog.abscale, -0.5);

    let model = ModelLoader::with_builtin()
        .load(moog.format.tag(), &moog.raw, &moog.settings())
        .unwrap();

    // Negative head: tabulated as log10(tau).
    assert_eq!(model.tau_scale, TauScale::Logarithmic);
    assert_eq!(model.grid.first().xref, -4.0);
    assert!((model.grid.first().tauref - 1e-4).abs() < 1e-18);
    // Electron pressure columns are converted to number density.
    assert!(model.conversions.ne_from_pressure);
    // File override wins over the scaled default.
    let expected = 10f64.powf(7.40) / model.abundances.xhyd();
    assert!((model.abundances.get(Element::MG) - expected).abs() < 1e-18);
    assert!(model.grid.layers().iter().all(|l| l.vturb == 1.2e5));
}

#[test]
fn write_then_read_preserves_model() {
    let original = read_model_file(temp_with(MARCS).path()).unwrap();
    let out = NamedTempFile::new().unwrap();
    write_model_file(&original, out.path()).unwrap();

    let again = read_model_file(out.path()).unwrap();
    assert_eq!(again.format, original.format);
    assert_eq!(again.description, original.description);
    assert_eq!(again.reference_wavelength, original.reference_wavelength);
    assert_eq!(again.raw.rows, original.raw.rows);
    assert_eq!(again.overrides, original.overrides);
    assert_eq!(again.abscale, original.abscale);
    assert!((again.raw.vturb - original.raw.vturb).abs() < 1e-6);
}

#[test]
fn kurucz_written_file_reads_back() {
    let text = "\
KURUCZ
 Castelli-Kurucz 2004 grid
NTAU       2
 1.00000000e-03  4.000e+03 1.000e+02 1.000e+10 2.000e-02
 5.00000000e+00  8.000e+03 1.000e+06 1.000e+15 3.000e+00
         2.000
NATOMS        0     0.000
NMOL          2
  101.0  606.0
";
    let original = read_model_file(temp_with(text).path()).unwrap();
    let out = NamedTempFile::new().unwrap();
    write_model_file(&original, out.path()).unwrap();
    let again = read_model_file(out.path()).unwrap();
    assert_eq!(again.raw.rows, original.raw.rows);
    assert_eq!(again.species, original.species);
    assert_eq!(again.species.len(), 2);

    let model = ModelLoader::with_builtin()
        .load(again.format.tag(), &again.raw, &again.settings())
        .unwrap();
    // Explicit list plus the tracked species it lacks.
    assert!(model.candidates.len() > 2);
    assert_eq!(model.grid.first().tauref, 1e-3 * 2e-2);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_model_file(dir.path().join("absent.moog")).unwrap_err();
    assert!(matches!(err, ps_atmos::AtmosError::Io(_)));
}
