use std::{collections::HashMap, time::Instant};

#[derive(Clone, Debug)]
pub struct Frame {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub timestamp: Instant,
}

impl Frame {
    pub fn new(rgba: Vec<u8>, width: u32, height: u32) -> Self {
        Frame {
            rgba,
            width,
            height,
            timestamp: Instant::now(),
        }
    }
}

/// The 17 body landmarks the upstream estimator reports. The discriminants
/// are the canonical slot order the classifier indexes by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum JointName {
    RightKnee = 0,
    RightAnkle = 1,
    RightShoulder = 2,
    RightHip = 3,
    RightWrist = 4,
    RightEar = 5,
    RightEye = 6,
    RightElbow = 7,
    LeftKnee = 8,
    LeftAnkle = 9,
    LeftShoulder = 10,
    LeftHip = 11,
    LeftWrist = 12,
    LeftEar = 13,
    LeftEye = 14,
    LeftElbow = 15,
    Nose = 16,
}

impl JointName {
    pub const COUNT: usize = 17;

    /// Canonical slot order.
    pub const ALL: [JointName; Self::COUNT] = [
        JointName::RightKnee,
        JointName::RightAnkle,
        JointName::RightShoulder,
        JointName::RightHip,
        JointName::RightWrist,
        JointName::RightEar,
        JointName::RightEye,
        JointName::RightElbow,
        JointName::LeftKnee,
        JointName::LeftAnkle,
        JointName::LeftShoulder,
        JointName::LeftHip,
        JointName::LeftWrist,
        JointName::LeftEar,
        JointName::LeftEye,
        JointName::LeftElbow,
        JointName::Nose,
    ];

    /// Parse an estimator joint label. Returns `None` for anything outside
    /// the fixed vocabulary; callers decide whether that is fatal.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "rightKnee" => Some(Self::RightKnee),
            "rightAnkle" => Some(Self::RightAnkle),
            "rightShoulder" => Some(Self::RightShoulder),
            "rightHip" => Some(Self::RightHip),
            "rightWrist" => Some(Self::RightWrist),
            "rightEar" => Some(Self::RightEar),
            "rightEye" => Some(Self::RightEye),
            "rightElbow" => Some(Self::RightElbow),
            "leftKnee" => Some(Self::LeftKnee),
            "leftAnkle" => Some(Self::LeftAnkle),
            "leftShoulder" => Some(Self::LeftShoulder),
            "leftHip" => Some(Self::LeftHip),
            "leftWrist" => Some(Self::LeftWrist),
            "leftEar" => Some(Self::LeftEar),
            "leftEye" => Some(Self::LeftEye),
            "leftElbow" => Some(Self::LeftElbow),
            "nose" => Some(Self::Nose),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::RightKnee => "rightKnee",
            Self::RightAnkle => "rightAnkle",
            Self::RightShoulder => "rightShoulder",
            Self::RightHip => "rightHip",
            Self::RightWrist => "rightWrist",
            Self::RightEar => "rightEar",
            Self::RightEye => "rightEye",
            Self::RightElbow => "rightElbow",
            Self::LeftKnee => "leftKnee",
            Self::LeftAnkle => "leftAnkle",
            Self::LeftShoulder => "leftShoulder",
            Self::LeftHip => "leftHip",
            Self::LeftWrist => "leftWrist",
            Self::LeftEar => "leftEar",
            Self::LeftEye => "leftEye",
            Self::LeftElbow => "leftElbow",
            Self::Nose => "nose",
        }
    }
}

/// One localized landmark. `is_valid` is false when the estimator could not
/// place the joint (occluded, out of frame); such joints are never drawn and
/// never enter classification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Joint {
    pub name: JointName,
    pub position: (f32, f32),
    pub is_valid: bool,
}

/// All joints detected for one body in one frame. At most one joint per name.
#[derive(Clone, Debug, Default)]
pub struct Pose {
    joints: HashMap<JointName, Joint>,
}

impl Pose {
    pub fn from_joints(joints: impl IntoIterator<Item = Joint>) -> Self {
        Pose {
            joints: joints.into_iter().map(|j| (j.name, j)).collect(),
        }
    }

    pub fn joint(&self, name: JointName) -> Option<&Joint> {
        self.joints.get(&name)
    }

    pub fn valid_joint(&self, name: JointName) -> Option<&Joint> {
        self.joints.get(&name).filter(|j| j.is_valid)
    }

    pub fn valid_joints(&self) -> impl Iterator<Item = &Joint> {
        self.joints.values().filter(|j| j.is_valid)
    }
}
