use mrzkit::models::{DecodedImage, EngineResult, PixelLayout};
use mrzkit::MrzEngine;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Init(String),
    Process {
        layout: PixelLayout,
        width: u32,
        height: u32,
        stride: usize,
        orientation: u8,
        bytes: usize,
    },
    Deinit,
    RuntimeKey(bool),
}

/// Records every call and answers with scripted results.
#[derive(Default)]
pub struct RecordingEngine {
    pub calls: Vec<Call>,
    pub init_result: Option<EngineResult>,
    pub process_result: Option<EngineResult>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_init(phrase: &str) -> Self {
        RecordingEngine {
            init_result: Some(EngineResult::bodyless(-1, phrase)),
            ..Default::default()
        }
    }

    pub fn failing_process(phrase: &str) -> Self {
        RecordingEngine {
            process_result: Some(EngineResult::bodyless(-2, phrase)),
            ..Default::default()
        }
    }

    pub fn init_config(&self) -> Option<serde_json::Value> {
        self.calls.iter().find_map(|call| match call {
            Call::Init(json) => Some(serde_json::from_str(json).unwrap()),
            _ => None,
        })
    }

    pub fn count(&self, wanted: fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|call| wanted(call)).count()
    }
}

impl MrzEngine for RecordingEngine {
    fn init(&mut self, json_config: &str) -> EngineResult {
        self.calls.push(Call::Init(json_config.to_string()));
        self.init_result.clone().unwrap_or_else(EngineResult::bodyless_ok)
    }

    fn process(&mut self, image: &DecodedImage) -> EngineResult {
        self.calls.push(Call::Process {
            layout: image.layout,
            width: image.width,
            height: image.height,
            stride: image.stride_or_zero(),
            orientation: image.exif_orientation,
            bytes: image.pixels.len(),
        });
        self.process_result.clone().unwrap_or_else(|| {
            EngineResult::new(
                0,
                "OK",
                r#"{"duration":3,"frame_id":0,"zones":[{"warpedBox":[1,1,30,1,30,10,1,10],"lines":[{"text":"P<UTOERIKSSON","confidence":91.5,"warpedBox":[1,1,30,1,30,5,1,5]}]}]}"#,
                1,
            )
        })
    }

    fn deinit(&mut self) -> EngineResult {
        self.calls.push(Call::Deinit);
        EngineResult::bodyless_ok()
    }

    fn request_runtime_license_key(&mut self, raw: bool) -> EngineResult {
        self.calls.push(Call::RuntimeKey(raw));
        EngineResult::new(0, "OK", "RUNTIME-KEY", 0)
    }
}

pub fn is_process(call: &Call) -> bool {
    matches!(call, Call::Process { .. })
}

pub fn is_deinit(call: &Call) -> bool {
    matches!(call, Call::Deinit)
}
