//! Compiled rule records.

use golem_language::markup::Node;
use golem_language::{CompiledPattern, PatternError, RawCategory};

/// One rule: a compiled pattern triple plus its template body.
///
/// Immutable after construction. The `seq` number records declaration order
/// and breaks priority ties deterministically.
#[derive(Debug, Clone)]
pub struct Category {
    pub pattern: CompiledPattern,
    pub that: Option<CompiledPattern>,
    pub topic: Option<CompiledPattern>,
    pub template: Vec<Node>,
    pub seq: u64,
}

impl Category {
    /// Compile a structurally parsed category. The `that` and `topic`
    /// context patterns share the pattern grammar and its validation.
    pub fn compile(raw: &RawCategory, seq: u64) -> Result<Self, PatternError> {
        let pattern = CompiledPattern::compile(&raw.pattern)?;
        let that = raw
            .that
            .as_deref()
            .map(CompiledPattern::compile)
            .transpose()?;
        let topic = raw
            .topic
            .as_deref()
            .map(CompiledPattern::compile)
            .transpose()?;
        Ok(Self {
            pattern,
            that,
            topic,
            template: raw.template.clone(),
            seq,
        })
    }

    /// Index key: the normalized (pattern, that, topic) triple.
    pub fn key(&self) -> (String, String, String) {
        (
            self.pattern.text().to_string(),
            self.that.as_ref().map(|p| p.text().to_string()).unwrap_or_default(),
            self.topic.as_ref().map(|p| p.text().to_string()).unwrap_or_default(),
        )
    }
}
