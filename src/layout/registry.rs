use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layout::Layout;

/// Named layouts offered by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Preset {
    Half,
    Single,
    Double,
    Quadruple,
    Octuple,
    BFloat16,
    TensorFloat32,
    Fp8E4M3,
    Fp8E5M2,
}

impl Preset {
    pub const ALL: [Preset; 9] = [
        Preset::Half,
        Preset::Single,
        Preset::Double,
        Preset::Quadruple,
        Preset::Octuple,
        Preset::BFloat16,
        Preset::TensorFloat32,
        Preset::Fp8E4M3,
        Preset::Fp8E5M2,
    ];

    pub const fn layout(self) -> Layout {
        match self {
            Preset::Half => Layout::HALF,
            Preset::Single => Layout::SINGLE,
            Preset::Double => Layout::DOUBLE,
            Preset::Quadruple => Layout::QUADRUPLE,
            Preset::Octuple => Layout::OCTUPLE,
            Preset::BFloat16 => Layout::BFLOAT16,
            Preset::TensorFloat32 => Layout::TENSOR_FLOAT32,
            Preset::Fp8E4M3 => Layout::FP8_E4M3,
            Preset::Fp8E5M2 => Layout::FP8_E5M2,
        }
    }

    /// Canonical name, the first entry of [`Self::aliases`].
    pub const fn name(self) -> &'static str {
        self.aliases()[0]
    }

    /// Every name the preset is known by, lowercase.
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Preset::Half => &["half", "float16", "binary16", "fp16"],
            Preset::Single => &["single", "float32", "binary32", "fp32", "float"],
            Preset::Double => &["double", "float64", "binary64", "fp64"],
            Preset::Quadruple => &["quadruple", "float128", "binary128", "fp128", "quad"],
            Preset::Octuple => &["octuple", "float256", "binary256", "fp256"],
            Preset::BFloat16 => &["bfloat16", "bf16", "brain-float"],
            Preset::TensorFloat32 => &["tensorfloat32", "tensor-float32", "tf32"],
            Preset::Fp8E4M3 => &["fp8-e4m3", "fp8_e4m3", "e4m3"],
            Preset::Fp8E5M2 => &["fp8-e5m2", "fp8_e5m2", "e5m2"],
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Case-insensitive lookup over every alias.
impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        Preset::ALL
            .into_iter()
            .find(|preset| preset.aliases().contains(&name.as_str()))
            .ok_or_else(|| Error::UnknownPreset(s.to_owned()))
    }
}

impl From<Preset> for Layout {
    fn from(preset: Preset) -> Self {
        preset.layout()
    }
}

/// Resolves a preset name (or alias) to its layout.
///
/// ```rust
/// use flexfloat_codec::{Layout, get_predefined_layout};
///
/// assert_eq!(get_predefined_layout("Float32").unwrap(), Layout::SINGLE);
/// assert!(get_predefined_layout("float12").is_err());
/// ```
pub fn get_predefined_layout(name: &str) -> Result<Layout> {
    name.parse::<Preset>().map(Preset::layout)
}
