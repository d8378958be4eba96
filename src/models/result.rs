use serde::{Deserialize, Serialize};

/// Outcome of one engine call.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineResult {
    pub code: i32,
    pub phrase: String,
    pub json: String,
    pub num_zones: usize,
}

impl EngineResult {
    pub fn new(code: i32, phrase: &str, json: &str, num_zones: usize) -> Self {
        EngineResult {
            code,
            phrase: phrase.to_string(),
            json: json.to_string(),
            num_zones,
        }
    }

    pub fn bodyless(code: i32, phrase: &str) -> Self {
        Self::new(code, phrase, "", 0)
    }

    pub fn bodyless_ok() -> Self {
        Self::bodyless(0, "OK")
    }

    pub fn is_ok(&self) -> bool {
        self.code == 0
    }

    /// Decode the payload of a processing call. An empty body decodes to an
    /// empty payload.
    pub fn payload(&self) -> serde_json::Result<RecognitionPayload> {
        if self.json.trim().is_empty() {
            return Ok(RecognitionPayload::default());
        }
        serde_json::from_str(&self.json)
    }
}

/// Payload of a processing call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecognitionPayload {
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub frame_id: Option<u64>,
    #[serde(default)]
    pub zones: Vec<Zone>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Zone {
    #[serde(default, rename = "warpedBox")]
    pub warped_box: Vec<f32>,
    #[serde(default)]
    pub lines: Vec<Line>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Line {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub confidence: f32,
    #[serde(default, rename = "warpedBox")]
    pub warped_box: Vec<f32>,
}

/// Lines at or above this confidence count as plausible.
pub const MIN_CONFIDENCE_PLAUSIBLE: f32 = 80.0;

impl Zone {
    /// Corners as (x, y) pairs, or `None` unless the box has 8 coordinates.
    pub fn corners(&self) -> Option<[(f32, f32); 4]> {
        corners_of(&self.warped_box)
    }

    /// A zone looks plausible when its lines share one length and every
    /// confidence reaches [`MIN_CONFIDENCE_PLAUSIBLE`]. This is not MRZ
    /// validation; see the check-digit validator for that.
    pub fn looks_plausible(&self) -> bool {
        let expected = match self.lines.first() {
            Some(line) => line.text.len(),
            None => return true,
        };
        self.lines
            .iter()
            .all(|line| line.confidence >= MIN_CONFIDENCE_PLAUSIBLE && line.text.len() == expected)
    }

    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|line| line.text.as_str()).collect()
    }
}

impl Line {
    /// Line boxes are all -1 on trial licenses.
    pub fn corners(&self) -> Option<[(f32, f32); 4]> {
        corners_of(&self.warped_box).filter(|c| c[3].1 != -1.0)
    }
}

fn corners_of(warped_box: &[f32]) -> Option<[(f32, f32); 4]> {
    if warped_box.len() != 8 {
        return None;
    }
    Some([
        (warped_box[0], warped_box[1]),
        (warped_box[2], warped_box[3]),
        (warped_box[4], warped_box[5]),
        (warped_box[6], warped_box[7]),
    ])
}
