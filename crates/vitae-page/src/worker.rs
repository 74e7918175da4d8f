//! Render Program
//!
//! What runs inside each pool unit: decode the serialized composer,
//! render it to an HTML string. Decode failures come back as failed
//! outcomes; the per-child recovery inside the codec already keeps one
//! corrupt subtree from taking the block down.

use vitae_compose::decode;
use vitae_pool::WorkerProgram;

#[derive(Debug, Default, Clone, Copy)]
pub struct RenderProgram;

impl WorkerProgram for RenderProgram {
    fn name(&self) -> &str {
        "vitae-render"
    }

    fn run(&self, payload: &str) -> Result<String, String> {
        let composer = decode(payload).map_err(|error| format!("decode failed: {error}"))?;
        Ok(composer.to_html_string())
    }
}
