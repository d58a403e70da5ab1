//! Normalization table for ACRUX-1.
//!
//! Converts the raw ADC digits decoded from AX.25 frames into SI units
//! using the equations from the published telemetry documentation.

use crate::normalize::{Field, Normalizer};

fn identity(x: f64) -> f64 {
    x
}

/// 16-bit ADC spanning a 40-unit range: volts and amps.
fn adc_vi(x: f64) -> f64 {
    x * (40.0 / 65536.0)
}

/// 16-bit ADC spanning a 256-unit range: temperatures.
fn adc_temp(x: f64) -> f64 {
    x * (256.0 / 65536.0)
}

static FIELDS: &[Field] = &[
    Field::new("dest_callsign", identity, None, "AX25 Destination Callsign"),
    Field::new("src_callsign", identity, None, "AX25 Source Callsign"),
    Field::new("src_ssid", identity, None, "AX25 Source SSID"),
    Field::new("dest_ssid", identity, None, "AX25 Destination SSID"),
    Field::new("ctl", identity, None, "AX25 CTL"),
    Field::new("pid", identity, None, "AX25 PID"),
    Field::new("tx_count", identity, None, "TX byte count"),
    Field::new("rx_count", identity, None, "RX byte count"),
    Field::new("rx_valid", identity, None, "n.a."),
    Field::new("payload_type", identity, None, "Payload type"),
    Field::new("comouti1", adc_vi, Some("A"), "COM Out I1"),
    Field::new("comoutv1", adc_vi, Some("V"), "COM Out V1"),
    Field::new("comouti2", adc_vi, Some("A"), "COM Out I2"),
    Field::new("comoutv2", adc_vi, Some("V"), "COM Out V2"),
    Field::new("comt2", adc_temp, Some("degC"), "COM Temperature 2"),
    Field::new("epsadcbatv1", adc_vi, Some("V"), "EPS ADC Bat V1"),
    Field::new("epsloadi1", adc_vi, Some("A"), "EPS Load 1"),
    Field::new("epsadcbatv2", adc_vi, Some("V"), "EPS ADC Bat V2"),
    Field::new("epsboostini2", adc_vi, Some("A"), "EPS boost inrush current"),
    Field::new("epsrail1", adc_vi, Some("V"), "EPS rail 1 voltage"),
    Field::new("epsrail2", adc_vi, Some("V"), "EPS rail 2 voltage"),
    Field::new("epstoppanelv", adc_vi, Some("V"), "EPS top panel voltage"),
    Field::new("epstoppaneli", adc_vi, Some("A"), "EPS top panel current"),
    Field::new("epst1", adc_temp, Some("degC"), "EPS Temperature 1"),
    Field::new("epst2", adc_temp, Some("degC"), "EPS Temperature 2"),
    Field::new("xposv", adc_vi, Some("V"), "+X panel voltage"),
    Field::new("xposi", adc_vi, Some("A"), "+X panel current"),
    Field::new("xpost1", adc_temp, Some("degC"), "+X panel temperature"),
    Field::new("yposv", adc_vi, Some("V"), "+Y panel voltage"),
    Field::new("yposi", adc_vi, Some("A"), "+Y panel current"),
    Field::new("ypost1", adc_temp, Some("degC"), "+Y panel temperature"),
    Field::new("xnegv", adc_vi, Some("V"), "-X panel voltage"),
    Field::new("xnegi", adc_vi, Some("A"), "-X panel current"),
    Field::new("xnegt1", adc_temp, Some("degC"), "-X panel temperature"),
    Field::new("ynegv", adc_vi, Some("V"), "-Y panel voltage"),
    Field::new("ynegi", adc_vi, Some("A"), "-Y panel current"),
    Field::new("ynegt1", adc_temp, Some("degC"), "-Y panel temperature"),
    Field::new("znegv", adc_vi, Some("V"), "-Z panel voltage"),
    Field::new("znegi", adc_vi, Some("A"), "-Z panel current"),
    Field::new("znegt1", adc_temp, Some("degC"), "-Z panel temperature"),
    Field::new("zpost", adc_temp, Some("degC"), "+Z panel temperature"),
    Field::new("cdhtime", identity, Some("s"), "Timestamp"),
    Field::new("swcdhlastreboot", identity, Some("s"), "Timestamp"),
    Field::new("swsequence", identity, None, "n.a."),
    Field::new("outreachmessage", identity, None, "Textmessage"),
];

/// ACRUX-1, a 1U CubeSat built by the Melbourne Space Program.
#[derive(Debug, Clone, Copy, Default)]
pub struct Acrux1;

impl Normalizer for Acrux1 {
    fn name(&self) -> &'static str {
        "ACRUX-1"
    }

    fn fields(&self) -> &'static [Field] {
        FIELDS
    }
}
