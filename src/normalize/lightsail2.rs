//! Normalization table for LightSail-2.
//!
//! Converts the raw digits decoded from AX.25 frames into SI units using
//! the equations from the published telemetry documentation. Frames are
//! validated against the satellite's source callsign.

use crate::dataset::frames::TelemetryFrame;
use crate::normalize::{Field, Normalizer};

fn identity(x: f64) -> f64 {
    x
}

fn temp(x: f64) -> f64 {
    x * 0.5 - 75.0
}

fn volt(x: f64) -> f64 {
    x / 32.0
}

fn cpu_curr(x: f64) -> f64 {
    x / 2048.0
}

fn load_curr(x: f64) -> f64 {
    x / 128.0
}

fn panel_curr(x: f64) -> f64 {
    x / 64.0
}

fn gyro(x: f64) -> f64 {
    x / 8.0
}

static FIELDS: &[Field] = &[
    Field::new("dest_callsign", identity, None, "Destination Callsign"),
    Field::new("src_callsign", identity, None, "Source Callsign"),
    Field::new("src_ssid", identity, None, "Source SSID"),
    Field::new("dest_ssid", identity, None, "Destination SSID"),
    Field::new("ctl", identity, None, "CTL"),
    Field::new("pid", identity, None, "PID"),
    Field::new("type", identity, None, "Type is always 1"),
    Field::new("daughter_atmp", temp, Some("degC"), "Daughter Board A Temperature"),
    Field::new("daughter_btmp", temp, Some("degC"), "Daughter Board B Temperature"),
    Field::new("rf_amptmp", temp, Some("degC"), "RF Amplifier Temperature"),
    Field::new("threev_pltmp", temp, Some("degC"), "3V3 Payload Temperature"),
    Field::new("atmelpwrcurr", cpu_curr, Some("A"), "CPU Power Current"),
    Field::new("atmelpwrbusv", volt, Some("V"), "CPU Power Voltage"),
    Field::new("threev_pwrcurr", cpu_curr, Some("A"), "3V3 Power Current"),
    Field::new("threev_pwrbusv", volt, Some("V"), "3V3 Power Voltage"),
    Field::new("threev_plpwrcurr", load_curr, Some("A"), "3V3 Payload Current"),
    Field::new("threev_plpwrbusv", volt, Some("V"), "3V3 Payload Voltage"),
    Field::new("fivev_plpwrcurr", load_curr, Some("A"), "5V Payload Current"),
    Field::new("fivev_plpwrbusv", volt, Some("V"), "5V Payload Voltage"),
    Field::new("nx_tmp", temp, Some("degC"), "-X Temperature"),
    Field::new("nx_intpwrcurr", panel_curr, Some("A"), "-X Int Power Current"),
    Field::new("nx_intpwrbusv", volt, Some("V"), "-X Int Power Voltage"),
    Field::new("nx_extpwrcurr", panel_curr, Some("A"), "-X Ext Power Current"),
    Field::new("nx_extpwrbusv", volt, Some("V"), "-X Ext Power Voltage"),
    Field::new("px_tmp", temp, Some("degC"), "+X Temperature"),
    Field::new("px_intpwrcurr", panel_curr, Some("A"), "+X Int Power Current"),
    Field::new("px_intpwrbusv", volt, Some("V"), "+X Int Power Voltage"),
    Field::new("px_extpwrcurr", panel_curr, Some("A"), "+X Ext Power Current"),
    Field::new("px_extpwrbusv", volt, Some("V"), "+X Ext Power Voltage"),
    Field::new("ny_tmp", temp, Some("degC"), "-Y Temperature"),
    Field::new("py_tmp", temp, Some("degC"), "+Y Temperature"),
    Field::new("nz_tmp", temp, Some("degC"), "-Z Temperature"),
    Field::new("pz_tmp", temp, Some("degC"), "+Z Temperature"),
    Field::new("usercputime", identity, Some("s"), "User CPU Time"),
    Field::new("syscputime", identity, Some("s"), "System CPU Time"),
    Field::new("idlecputime", identity, Some("s"), "Idle CPU Time"),
    Field::new("processes", identity, None, "Processes"),
    Field::new("memfree", identity, Some("kB"), "Memory Free"),
    Field::new("buffers", identity, Some("kB"), "Memory Buffered"),
    Field::new("cached", identity, Some("kB"), "Memory Cached"),
    Field::new("datafree", identity, Some("kB"), "Data Free"),
    Field::new("beaconcnt", identity, None, "Beacon Count"),
    Field::new("time", identity, None, "RTC"),
    Field::new("boottime", identity, None, "Boot Time"),
    Field::new("adcs_mode", identity, None, "ADCS Mode"),
    Field::new("gyro_px", gyro, None, "X Payload Gyro"),
    Field::new("gyro_py", gyro, None, "Y Payload Gyro"),
    Field::new("gyro_pz", gyro, None, "Z Payload Gyro"),
    Field::new("gyro_ix", gyro, None, "X Internal Gyro"),
    Field::new("gyro_iy", gyro, None, "Y Internal Gyro"),
    Field::new("gyro_iz", gyro, None, "Z Internal Gyro"),
    Field::new("bat0_curr", load_curr, Some("A"), "Battery 0 Current"),
    Field::new("bat0_volt", volt, Some("V"), "Battery 0 Voltage"),
    Field::new("bat0_temp", temp, Some("degC"), "Battery 0 Temperature"),
    Field::new("bat0_flags", identity, None, "Battery 0 Flags"),
    Field::new("bat1_curr", load_curr, Some("A"), "Battery 1 Current"),
    Field::new("bat1_volt", volt, Some("V"), "Battery 1 Voltage"),
    Field::new("bat1_temp", temp, Some("degC"), "Battery 1 Temperature"),
    Field::new("bat1_flags", identity, None, "Battery 1 Flags"),
    Field::new("comm_rxcount", identity, None, "RX Packets"),
    Field::new("comm_txcount", identity, None, "TX Packets"),
    Field::new("comm_rxbytes", identity, None, "RX Bytes"),
    Field::new("comm_txbytes", identity, None, "TX Bytes"),
];

/// LightSail-2, The Planetary Society's solar-sail CubeSat.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lightsail2;

impl Normalizer for Lightsail2 {
    fn name(&self) -> &'static str {
        "LightSail-2"
    }

    fn fields(&self) -> &'static [Field] {
        FIELDS
    }

    /// The satellite transmits as KK6HIT; anything else is another bird
    /// picked up on the same frequency.
    fn validate_frame(&self, frame: &TelemetryFrame) -> bool {
        frame
            .fields
            .get("src_callsign")
            .and_then(|field| field.value.as_str())
            .is_some_and(|callsign| callsign.eq_ignore_ascii_case("kk6hit"))
    }
}
