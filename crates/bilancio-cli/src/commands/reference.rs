use serde_json::{json, Value};

use bilancio_core::reference::ReferenceData;

pub fn run_reference(rd: &ReferenceData) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(json!({ "result": rd }))
}
