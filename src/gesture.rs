use thiserror::Error;

use crate::types::JointName;

/// One detected joint as handed over by the estimator: `[name, x, y]`, with
/// the coordinates still in string form.
pub type RawJointRecord = [String; 3];

/// Records reordered into canonical slots, one per joint name. Slots the
/// input never filled stay at the zero record.
pub type CanonicalPoseTable = [RawJointRecord; JointName::COUNT];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GestureError {
    #[error("unknown joint name in estimator output: {0:?}")]
    UnknownJointName(String),
}

fn zero_record() -> RawJointRecord {
    ["0".to_string(), "0".to_string(), "0".to_string()]
}

/// Reorder a flat record list into the canonical table. An unknown joint name
/// is a contract violation by the estimator and fails hard; a repeated name
/// silently keeps the later record.
pub fn canonicalize(records: &[RawJointRecord]) -> Result<CanonicalPoseTable, GestureError> {
    let mut table: CanonicalPoseTable = std::array::from_fn(|_| zero_record());

    for record in records {
        let name = JointName::from_name(&record[0])
            .ok_or_else(|| GestureError::UnknownJointName(record[0].clone()))?;
        table[name as usize] = record.clone();
    }

    Ok(table)
}

/// Evaluate the single hard-coded reference gesture over a canonical table.
///
/// Coordinates parse with a 0.0 fallback, and 0.0 doubles as the
/// absent-joint sentinel: the origin is the image's top-left corner, so a
/// real landmark essentially never sits exactly on it. The caller cannot
/// tell a parse failure from a genuine zero; that ambiguity is accepted.
pub fn matches_reference_gesture(table: &CanonicalPoseTable) -> bool {
    let right_ankle = slot_xy(table, JointName::RightAnkle);
    let right_wrist = slot_xy(table, JointName::RightWrist);
    let right_elbow = slot_xy(table, JointName::RightElbow);
    let left_elbow = slot_xy(table, JointName::LeftElbow);
    let left_wrist = slot_xy(table, JointName::LeftWrist);
    let left_shoulder = slot_xy(table, JointName::LeftShoulder);
    let left_ankle = slot_xy(table, JointName::LeftAnkle);

    // Anchor joints missing means there is no body to match against.
    if right_ankle.0 == 0.0 || left_elbow.0 == 0.0 || left_wrist.1 == 0.0 || right_elbow.1 == 0.0 {
        return false;
    }

    right_ankle.0 < right_wrist.0
        && right_wrist.0 < right_elbow.0
        && left_elbow.0 < left_wrist.0
        && left_wrist.0 < left_shoulder.0
        && left_shoulder.0 < left_ankle.0
        && left_wrist.1 < left_shoulder.1
        && left_shoulder.1 < left_elbow.1
        && right_elbow.1 < right_wrist.1
}

/// Canonicalize then match.
pub fn classify(records: &[RawJointRecord]) -> Result<bool, GestureError> {
    let table = canonicalize(records)?;
    Ok(matches_reference_gesture(&table))
}

fn slot_xy(table: &CanonicalPoseTable, name: JointName) -> (f32, f32) {
    let record = &table[name as usize];
    (coord(&record[1]), coord(&record[2]))
}

fn coord(field: &str) -> f32 {
    field.parse().unwrap_or(0.0)
}
