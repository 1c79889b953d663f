//! Model-atmosphere input formats.
//!
//! Every recognized layout is one [`ModelFormat`] variant. A variant that is
//! enabled returns a [`FormatSpec`] describing how its raw columns map onto
//! the depth grid and how reference optical depth and opacity are
//! reconstructed. Historical layouts are recognized but disabled; enabling
//! one means giving it a `FormatSpec` here.

use crate::error::{AtmosError, AtmosResult};
use std::fmt;

/// Default reference wavelength [Å] for formats tabulated on a τ₅₀₀₀ scale.
pub const DEFAULT_REFERENCE_WAVELENGTH: f64 = 5000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelFormat {
    /// MARCS web-grid models, tabulated on τ₅₀₀₀.
    WebMarcs,
    /// ATLAS/Kurucz models, tabulated on mass column density.
    Kurucz,
    NewMarcs,
    Web2Marc,
    NextGen,
    Begn,
    KurType,
    KurPadova,
    Generic,
}

/// Raw column order of a layer row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnLayout {
    /// `(tauref, T, Ne, Pgas)`
    TauTempNePgas,
    /// `(rhox, T, Pgas, Ne, kaprefmass)`
    RhoxTempPgasNeKappa,
}

impl ColumnLayout {
    /// Number of columns a row must carry.
    pub fn width(self) -> usize {
        match self {
            ColumnLayout::TauTempNePgas => 4,
            ColumnLayout::RhoxTempPgasNeKappa => 5,
        }
    }
}

/// How reference optical depth and opacity are obtained after loading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OpticalDepthStrategy {
    /// Integrate `kaprefmass` over `rhox`; `kapref = kaprefmass·rho`.
    IntegrateMassOpacity,
    /// Keep the loaded `tauref`; ask the opacity calculator for `kapref`.
    ReferenceOpacity,
}

/// Per-format capabilities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormatSpec {
    pub format: ModelFormat,
    pub layout: ColumnLayout,
    pub optical_depth: OpticalDepthStrategy,
    /// Reference wavelength [Å] for opacity evaluation, if the format has one.
    pub reference_wavelength: Option<f64>,
    /// Format carries its own mean molecular weight per layer.
    pub supplies_molweight: bool,
    /// Format carries mass density per layer.
    pub supplies_density: bool,
}

impl ModelFormat {
    pub const ALL: [ModelFormat; 9] = [
        ModelFormat::WebMarcs,
        ModelFormat::Kurucz,
        ModelFormat::NewMarcs,
        ModelFormat::Web2Marc,
        ModelFormat::NextGen,
        ModelFormat::Begn,
        ModelFormat::KurType,
        ModelFormat::KurPadova,
        ModelFormat::Generic,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            ModelFormat::WebMarcs => "WEBMARCS",
            ModelFormat::Kurucz => "KURUCZ",
            ModelFormat::NewMarcs => "NEWMARCS",
            ModelFormat::Web2Marc => "WEB2MARC",
            ModelFormat::NextGen => "NEXTGEN",
            ModelFormat::Begn => "BEGN",
            ModelFormat::KurType => "KURTYPE",
            ModelFormat::KurPadova => "KUR-PADOVA",
            ModelFormat::Generic => "GENERIC",
        }
    }

    /// Capabilities of an enabled format; `None` for disabled ones.
    pub fn spec(self) -> Option<FormatSpec> {
        match self {
            ModelFormat::WebMarcs => Some(FormatSpec {
                format: self,
                layout: ColumnLayout::TauTempNePgas,
                optical_depth: OpticalDepthStrategy::ReferenceOpacity,
                reference_wavelength: Some(DEFAULT_REFERENCE_WAVELENGTH),
                supplies_molweight: false,
                supplies_density: false,
            }),
            ModelFormat::Kurucz => Some(FormatSpec {
                format: self,
                layout: ColumnLayout::RhoxTempPgasNeKappa,
                optical_depth: OpticalDepthStrategy::IntegrateMassOpacity,
                reference_wavelength: None,
                supplies_molweight: false,
                supplies_density: false,
            }),
            _ => None,
        }
    }

    pub fn is_enabled(self) -> bool {
        self.spec().is_some()
    }

    /// Tags of every enabled format.
    pub fn enabled_tags() -> Vec<&'static str> {
        Self::ALL
            .iter()
            .filter(|f| f.is_enabled())
            .map(|f| f.tag())
            .collect()
    }

    /// Resolve a tag to an enabled format.
    ///
    /// Unknown and disabled tags fail the same way.
    pub fn resolve(tag: &str) -> AtmosResult<FormatSpec> {
        tag.parse::<ModelFormat>()
            .ok()
            .and_then(ModelFormat::spec)
            .ok_or_else(|| AtmosError::UnsupportedModelType {
                tag: tag.trim().to_string(),
                recognized: Self::enabled_tags(),
            })
    }
}

impl fmt::Display for ModelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl std::str::FromStr for ModelFormat {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.tag() == tag)
            .ok_or("unknown model type")
    }
}
