//! Per-satellite telemetry normalization.
//!
//! Decoders hand over raw register digits; a [`Normalizer`] turns them
//! into physical quantities using the equations from each satellite's
//! telemetry documentation, and rejects frames that do not plausibly
//! belong to the satellite. The registry maps satellite names and NORAD
//! ids to their tables.

pub mod acrux1;
pub mod lightsail2;

use crate::dataset::frames::{FieldValue, TelemetryFrame};
use crate::error::{Error, Result};

pub use acrux1::Acrux1;
pub use lightsail2::Lightsail2;

/// One entry of a normalization table: where the raw value lives, how it
/// becomes a physical quantity, and which unit that quantity carries.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub source: &'static str,
    pub transform: fn(f64) -> f64,
    pub unit: Option<&'static str>,
    pub description: &'static str,
}

impl Field {
    pub const fn new(
        source: &'static str,
        transform: fn(f64) -> f64,
        unit: Option<&'static str>,
        description: &'static str,
    ) -> Self {
        Self {
            source,
            transform,
            unit,
            description,
        }
    }
}

/// Per-satellite normalization: a field table plus frame validation.
pub trait Normalizer: std::fmt::Debug {
    /// Display name of the satellite this table belongs to.
    fn name(&self) -> &'static str;

    /// The normalization table.
    fn fields(&self) -> &'static [Field];

    /// Whether a frame plausibly belongs to this satellite. The default
    /// accepts everything.
    fn validate_frame(&self, _frame: &TelemetryFrame) -> bool {
        true
    }

    /// Applies the table to one frame. Listed numeric fields get their
    /// transform and unit; text fields and anything not in the table pass
    /// through untouched.
    fn normalize_frame(&self, frame: &TelemetryFrame) -> TelemetryFrame {
        let mut normalized = frame.clone();
        for field in self.fields() {
            if let Some(entry) = normalized.fields.get_mut(field.source) {
                if let Some(raw) = entry.value.as_f64() {
                    entry.value = FieldValue::Number((field.transform)(raw));
                    entry.unit = field.unit.map(str::to_string);
                }
            }
        }
        normalized
    }
}

/// Normalizes a batch of frames, then drops every frame the normalizer
/// fails to validate.
pub fn normalize_frames(
    normalizer: &dyn Normalizer,
    frames: &[TelemetryFrame],
) -> Vec<TelemetryFrame> {
    frames
        .iter()
        .map(|frame| normalizer.normalize_frame(frame))
        .filter(|frame| normalizer.validate_frame(frame))
        .collect()
}

/// A satellite the tool knows about.
#[derive(Debug, Clone, Copy)]
pub struct Satellite {
    pub name: &'static str,
    pub norad_id: &'static str,
    normalizer: Option<fn() -> Box<dyn Normalizer>>,
}

impl Satellite {
    pub fn has_normalizer(&self) -> bool {
        self.normalizer.is_some()
    }

    /// Builds this satellite's normalizer, or fails with
    /// [`Error::NoNormalizer`] when none is registered.
    pub fn normalizer(&self) -> Result<Box<dyn Normalizer>> {
        match self.normalizer {
            Some(build) => Ok(build()),
            None => Err(Error::NoNormalizer(self.name.to_string())),
        }
    }
}

fn build_acrux1() -> Box<dyn Normalizer> {
    Box::new(Acrux1)
}

fn build_lightsail2() -> Box<dyn Normalizer> {
    Box::new(Lightsail2)
}

static SATELLITES: &[Satellite] = &[
    Satellite {
        name: "ACRUX-1",
        norad_id: "44369",
        normalizer: Some(build_acrux1),
    },
    Satellite {
        name: "ELFIN-A",
        norad_id: "43617",
        normalizer: None,
    },
    Satellite {
        name: "LightSail-2",
        norad_id: "44420",
        normalizer: Some(build_lightsail2),
    },
];

/// Every registered satellite, in registry order.
pub fn satellites() -> &'static [Satellite] {
    SATELLITES
}

/// Looks a satellite up by display name or NORAD id.
pub fn find_satellite(query: &str) -> Result<&'static Satellite> {
    SATELLITES
        .iter()
        .find(|sat| sat.name == query || sat.norad_id == query)
        .ok_or_else(|| Error::NoSuchSatellite(query.to_string()))
}
