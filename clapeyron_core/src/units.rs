//! # Unit Types
//!
//! Type-safe wrappers for the engine's units plus the fixed set of input
//! units a load form may offer.
//!
//! ## Engine Units (fixed)
//!
//! Every value that reaches the moment engine is already in:
//! - Length: metres (m)
//! - Force: kilonewtons (kN)
//! - Distributed load: kilonewtons per metre (kN/m)
//! - Moment: kilonewton-metres (kN·m)
//!
//! ## Input Units
//!
//! A caller may enter values in `m | cm | mm`, `kN | N | kg | t`,
//! `kN/m | N/m | kg/m` and `kN·m | N·m | kg·m`. Mass-based units are turned
//! into forces with standard gravity. Conversion happens once, on input,
//! through [`UnitSelection`]; nothing else is supported.
//!
//! ## Example
//!
//! ```rust
//! use clapeyron_core::units::{Centimeters, ForceUnit, KiloNewtons, Meters};
//!
//! let pos: Meters = Centimeters(250.0).into();
//! assert_eq!(pos.0, 2.5);
//!
//! let p: KiloNewtons = ForceUnit::Tonne.to_kn(2.0);
//! assert!((p.0 - 19.6133).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Standard gravity (m/s²) used for mass-based input units
pub const STANDARD_GRAVITY: f64 = 9.80665;

/// Declare a transparent `f64` unit wrapper with the arithmetic a load
/// value needs: summing like quantities and scaling by a factor.
macro_rules! unit_newtype {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub f64);

        impl $name {
            /// Raw value in this unit
            pub fn value(self) -> f64 {
                self.0
            }
        }

        impl Add for $name {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                $name(self.0 + rhs.0)
            }
        }

        impl Sub for $name {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                $name(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $name {
            type Output = Self;
            fn mul(self, factor: f64) -> Self {
                $name(self.0 * factor)
            }
        }
    };
}

// ============================================================================
// Length Units
// ============================================================================

unit_newtype!(
    /// Length in metres
    Meters
);
unit_newtype!(
    /// Length in centimetres
    Centimeters
);
unit_newtype!(
    /// Length in millimetres
    Millimeters
);

impl From<Centimeters> for Meters {
    fn from(cm: Centimeters) -> Self {
        Meters(cm.0 / 100.0)
    }
}

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

// ============================================================================
// Force Units
// ============================================================================

unit_newtype!(
    /// Force in kilonewtons
    KiloNewtons
);
unit_newtype!(
    /// Force in newtons
    Newtons
);

impl From<Newtons> for KiloNewtons {
    fn from(n: Newtons) -> Self {
        KiloNewtons(n.0 / 1000.0)
    }
}

impl KiloNewtons {
    /// Weight of a mass in kilograms under standard gravity
    pub fn from_kg(mass: f64) -> Self {
        KiloNewtons::from(Newtons(mass * STANDARD_GRAVITY))
    }
}

// ============================================================================
// Distributed Load and Moment Units
// ============================================================================

unit_newtype!(
    /// Distributed load in kN/m
    KnPerMeter
);
unit_newtype!(
    /// Moment in kN·m
    KnMeters
);

impl KnPerMeter {
    /// Line load carrying `force` on every metre of length
    pub fn per_meter(force: KiloNewtons) -> Self {
        KnPerMeter(force.0)
    }
}

impl KnMeters {
    /// Couple of `force` acting on a 1 m lever arm
    pub fn over_meter(force: KiloNewtons) -> Self {
        KnMeters(force.0)
    }
}

// ============================================================================
// Input Unit Selections
// ============================================================================

/// Length unit accepted on input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LengthUnit {
    #[default]
    #[serde(rename = "m")]
    Meter,
    #[serde(rename = "cm")]
    Centimeter,
    #[serde(rename = "mm")]
    Millimeter,
}

impl LengthUnit {
    /// Convert a value in this unit to metres
    pub fn to_m(self, value: f64) -> Meters {
        match self {
            LengthUnit::Meter => Meters(value),
            LengthUnit::Centimeter => Centimeters(value).into(),
            LengthUnit::Millimeter => Millimeters(value).into(),
        }
    }

    /// Unit symbol
    pub fn symbol(self) -> &'static str {
        match self {
            LengthUnit::Meter => "m",
            LengthUnit::Centimeter => "cm",
            LengthUnit::Millimeter => "mm",
        }
    }
}

/// Force unit accepted on input (`kg` and `t` are masses under gravity)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ForceUnit {
    #[default]
    #[serde(rename = "kN")]
    KiloNewton,
    #[serde(rename = "N")]
    Newton,
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "t")]
    Tonne,
}

impl ForceUnit {
    /// Convert a value in this unit to kN
    pub fn to_kn(self, value: f64) -> KiloNewtons {
        match self {
            ForceUnit::KiloNewton => KiloNewtons(value),
            ForceUnit::Newton => Newtons(value).into(),
            ForceUnit::Kilogram => KiloNewtons::from_kg(value),
            ForceUnit::Tonne => KiloNewtons::from_kg(value * 1000.0),
        }
    }

    /// Unit symbol
    pub fn symbol(self) -> &'static str {
        match self {
            ForceUnit::KiloNewton => "kN",
            ForceUnit::Newton => "N",
            ForceUnit::Kilogram => "kg",
            ForceUnit::Tonne => "t",
        }
    }
}

/// Distributed load unit accepted on input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LineLoadUnit {
    #[default]
    #[serde(rename = "kN/m")]
    KiloNewtonPerMeter,
    #[serde(rename = "N/m")]
    NewtonPerMeter,
    #[serde(rename = "kg/m")]
    KilogramPerMeter,
}

impl LineLoadUnit {
    /// Convert a value in this unit to kN/m
    pub fn to_kn_per_m(self, value: f64) -> KnPerMeter {
        match self {
            LineLoadUnit::KiloNewtonPerMeter => KnPerMeter(value),
            LineLoadUnit::NewtonPerMeter => KnPerMeter::per_meter(Newtons(value).into()),
            LineLoadUnit::KilogramPerMeter => KnPerMeter::per_meter(KiloNewtons::from_kg(value)),
        }
    }

    /// Unit symbol
    pub fn symbol(self) -> &'static str {
        match self {
            LineLoadUnit::KiloNewtonPerMeter => "kN/m",
            LineLoadUnit::NewtonPerMeter => "N/m",
            LineLoadUnit::KilogramPerMeter => "kg/m",
        }
    }
}

/// Moment unit accepted on input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MomentUnit {
    #[default]
    #[serde(rename = "kN·m", alias = "kN*m", alias = "kNm")]
    KiloNewtonMeter,
    #[serde(rename = "N·m", alias = "N*m", alias = "Nm")]
    NewtonMeter,
    #[serde(rename = "kg·m", alias = "kg*m", alias = "kgm")]
    KilogramMeter,
}

impl MomentUnit {
    /// Convert a value in this unit to kN·m
    pub fn to_kn_m(self, value: f64) -> KnMeters {
        match self {
            MomentUnit::KiloNewtonMeter => KnMeters(value),
            MomentUnit::NewtonMeter => KnMeters::over_meter(Newtons(value).into()),
            MomentUnit::KilogramMeter => KnMeters::over_meter(KiloNewtons::from_kg(value)),
        }
    }

    /// Unit symbol
    pub fn symbol(self) -> &'static str {
        match self {
            MomentUnit::KiloNewtonMeter => "kN·m",
            MomentUnit::NewtonMeter => "N·m",
            MomentUnit::KilogramMeter => "kg·m",
        }
    }
}

/// The units a set of input values was entered in.
///
/// Defaults to the engine units, so an absent selection is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UnitSelection {
    pub length: LengthUnit,
    pub force: ForceUnit,
    pub line_load: LineLoadUnit,
    pub moment: MomentUnit,
}

impl UnitSelection {
    /// True when every unit is already an engine unit
    pub fn is_si(&self) -> bool {
        *self == UnitSelection::default()
    }
}
