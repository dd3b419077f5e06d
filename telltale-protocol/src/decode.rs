//! Identifier-indexed frame decoding.
//!
//! Most telemetry identifiers map to one or more fixed-point fields via a
//! static descriptor table. A few identifiers carry non-gauge semantics
//! (wall clock, knock warning) and are decoded as explicit [`FrameEffect`]
//! variants rather than table entries.

use crate::clock::{ClockError, DateTime, CLOCK_REQUEST_ID, CLOCK_SET_ID};
use heapless::Vec;

// Telemetry identifiers broadcast by the engine controller
pub const ID_RPM: u32 = 1520;
pub const ID_SPARK_AFR_TARGET: u32 = 1521;
pub const ID_MAP_TEMPS: u32 = 1522;
pub const ID_BATTERY_AFR: u32 = 1523;
pub const ID_KNOCK_INPUT: u32 = 1524;
pub const ID_EGT: u32 = 1542;
pub const ID_VEHICLE_SPEED: u32 = 1562;
pub const ID_PORT_STATUS: u32 = 1571;
pub const ID_KNOCK_RETARD: u32 = 1572;

/// Maximum independent fields packed in one frame
pub const MAX_FIELDS_PER_FRAME: usize = 4;

/// Offset of the AFR target byte within frame 1521
const AFR_TARGET_OFFSET: usize = 4;

/// Identifiers the cluster recognizes but does not act on. Kept explicit so
/// they are not reported as unknown traffic.
const IGNORED_IDS: &[u32] = &[
    ID_KNOCK_INPUT,
    1533,
    1537,
    1538,
    ID_PORT_STATUS,
    // Wideband controller chatter on the shared bus
    156_583_992,
    33_920,
    2_131_072,
];

/// Display gauge addressed by a decoded field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GaugeId {
    /// Manifold absolute pressure, 0.1 kPa
    Map,
    /// Measured air/fuel ratio, 0.1 ratio
    Afr,
    /// Commanded air/fuel ratio target, 0.1 ratio
    AfrTarget,
    /// Engine speed, 1 rpm
    Rpm,
    /// Vehicle speed, 1 mph
    VehicleSpeed,
    /// Total spark advance, 0.1 degree
    Spark,
    /// Exhaust gas temperature, 1 degF
    Egt,
    /// Coolant temperature, 0.1 degF
    Coolant,
    /// Manifold air temperature, 0.1 degF
    ManifoldAir,
    /// Oil temperature, 0.1 degF (sampled locally, not bus-fed)
    OilTemp,
    /// Battery voltage, 0.1 V
    Battery,
    /// Time-of-day readout
    Clock,
    /// Full-width warning text line
    Warning,
}

impl GaugeId {
    /// All gauges, in registry order
    pub const ALL: [GaugeId; 13] = [
        GaugeId::Map,
        GaugeId::Afr,
        GaugeId::AfrTarget,
        GaugeId::Rpm,
        GaugeId::VehicleSpeed,
        GaugeId::Spark,
        GaugeId::Egt,
        GaugeId::Coolant,
        GaugeId::ManifoldAir,
        GaugeId::OilTemp,
        GaugeId::Battery,
        GaugeId::Clock,
        GaugeId::Warning,
    ];

    /// Stable index into the gauge registry
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Width of one wire field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldWidth {
    Byte,
    Word,
}

/// Rational post-scale applied after field extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Scale {
    num: i32,
    den: i32,
}

const UNSCALED: Scale = Scale { num: 1, den: 1 };

/// Descriptor for one field within a telemetry frame
struct FieldSpec {
    gauge: GaugeId,
    offset: usize,
    width: FieldWidth,
    signed: bool,
    scale: Scale,
}

const fn field(gauge: GaugeId, offset: usize, width: FieldWidth, signed: bool) -> FieldSpec {
    FieldSpec {
        gauge,
        offset,
        width,
        signed,
        scale: UNSCALED,
    }
}

/// Telemetry decode table. Byte offsets and signedness are the wire
/// contract with the engine controller and must not change.
const FRAME_TABLE: &[(u32, &[FieldSpec])] = &[
    (
        ID_RPM,
        &[field(GaugeId::Rpm, 6, FieldWidth::Word, false)],
    ),
    (
        ID_MAP_TEMPS,
        &[
            field(GaugeId::Map, 2, FieldWidth::Word, false),
            field(GaugeId::ManifoldAir, 4, FieldWidth::Word, true),
            field(GaugeId::Coolant, 6, FieldWidth::Word, true),
        ],
    ),
    (
        ID_BATTERY_AFR,
        &[
            field(GaugeId::Battery, 2, FieldWidth::Word, false),
            field(GaugeId::Afr, 5, FieldWidth::Byte, false),
        ],
    ),
    (
        ID_EGT,
        &[field(GaugeId::Egt, 0, FieldWidth::Word, true)],
    ),
    (
        ID_VEHICLE_SPEED,
        // Speed sensor reports 4.4 counts per mph
        &[FieldSpec {
            gauge: GaugeId::VehicleSpeed,
            offset: 0,
            width: FieldWidth::Word,
            signed: false,
            scale: Scale { num: 5, den: 22 },
        }],
    ),
];

/// One decoded gauge field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GaugeUpdate {
    /// Gauge this field addresses
    pub gauge: GaugeId,
    /// Field value in the gauge's native raw units
    pub value: i32,
}

/// Effect of one received frame on the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameEffect {
    /// One or more plain gauge updates
    Updates(Vec<GaugeUpdate, MAX_FIELDS_PER_FRAME>),
    /// Spark advance plus AFR target; the target also retargets the
    /// measured-AFR gauge's threshold bounds
    SparkAndAfrTarget {
        /// Total spark advance, 0.1 degree
        spark: i32,
        /// AFR target, 0.1 ratio
        afr_target: u8,
    },
    /// Knock retard warning condition (asserted while retard is non-zero)
    KnockWarning { active: bool },
    /// Request for the cluster's current wall-clock time
    ClockRequest,
    /// Set the cluster's wall clock
    ClockSet(DateTime),
    /// Recognized identifier with no dashboard effect
    Ignored,
}

/// Errors from the decode step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Identifier is not part of the wire contract; carries the raw id
    /// for diagnostics
    Unrecognized(u32),
    /// Payload too short for a field the identifier promises
    Truncated(u32),
    /// Malformed clock-set payload
    BadClock(ClockError),
}

/// Extract one field from the payload.
///
/// 16-bit fields are reassembled big-endian; signedness is applied by
/// reinterpreting the reassembled 16-bit pattern, not the raw bytes.
fn extract(spec: &FieldSpec, id: u32, payload: &[u8]) -> Result<i32, DecodeError> {
    let raw: i32 = match spec.width {
        FieldWidth::Byte => {
            let byte = *payload.get(spec.offset).ok_or(DecodeError::Truncated(id))?;
            if spec.signed {
                byte as i8 as i32
            } else {
                byte as i32
            }
        }
        FieldWidth::Word => {
            if payload.len() < spec.offset + 2 {
                return Err(DecodeError::Truncated(id));
            }
            let word = u16::from_be_bytes([payload[spec.offset], payload[spec.offset + 1]]);
            if spec.signed {
                word as i16 as i32
            } else {
                word as i32
            }
        }
    };
    Ok(raw * spec.scale.num / spec.scale.den)
}

/// Decode one received frame into its dashboard effect.
///
/// Pure function: no state, no I/O. Unknown identifiers are reported, not
/// fatal - the caller logs and drops them.
pub fn decode(id: u32, payload: &[u8]) -> Result<FrameEffect, DecodeError> {
    // Non-gauge special cases first
    match id {
        CLOCK_REQUEST_ID => return Ok(FrameEffect::ClockRequest),
        CLOCK_SET_ID => {
            let dt = DateTime::from_clock_set(payload).map_err(DecodeError::BadClock)?;
            return Ok(FrameEffect::ClockSet(dt));
        }
        ID_SPARK_AFR_TARGET => {
            let spark = extract(
                &field(GaugeId::Spark, 0, FieldWidth::Word, true),
                id,
                payload,
            )?;
            let target = *payload
                .get(AFR_TARGET_OFFSET)
                .ok_or(DecodeError::Truncated(id))?;
            return Ok(FrameEffect::SparkAndAfrTarget {
                spark,
                afr_target: target,
            });
        }
        ID_KNOCK_RETARD => {
            let retard = extract(
                &field(GaugeId::Warning, 2, FieldWidth::Word, false),
                id,
                payload,
            )?;
            return Ok(FrameEffect::KnockWarning { active: retard > 0 });
        }
        _ => {}
    }

    if let Some((_, fields)) = FRAME_TABLE.iter().find(|(table_id, _)| *table_id == id) {
        let mut updates = Vec::new();
        for spec in fields.iter() {
            let value = extract(spec, id, payload)?;
            // Cannot overflow: the table never has more than
            // MAX_FIELDS_PER_FRAME fields per identifier
            let _ = updates.push(GaugeUpdate {
                gauge: spec.gauge,
                value,
            });
        }
        return Ok(FrameEffect::Updates(updates));
    }

    if IGNORED_IDS.contains(&id) {
        return Ok(FrameEffect::Ignored);
    }

    Err(DecodeError::Unrecognized(id))
}
