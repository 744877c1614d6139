/// The final rendered artifact handed to the transport layer.
///
/// Produced once per request, never mutated, discarded after the response
/// body is written.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub filename: String,
}
