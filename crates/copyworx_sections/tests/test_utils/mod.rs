//! Shared helpers for section workflow tests.

#![allow(dead_code)]

use async_trait::async_trait;
use copyworx_core::{FormInputs, GenerateRequest, GenerateResponse, SectionDefinition, SectionKind};
use copyworx_error::{CopyworxResult, GenerationError, GenerationErrorKind};
use copyworx_interface::GenerationDriver;
use copyworx_sections::SectionTable;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Scripted reply for the mock driver.
pub enum Reply {
    Text(String),
    Fail(GenerationErrorKind),
}

/// Mock driver that records every prompt and answers from a script.
///
/// When the script runs out it echoes the section number it was asked for.
#[derive(Default)]
pub struct MockDriver {
    replies: Mutex<VecDeque<Reply>>,
    prompts: Mutex<Vec<String>>,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerationDriver for MockDriver {
    async fn generate(&self, req: &GenerateRequest) -> CopyworxResult<GenerateResponse> {
        let prompt = req
            .messages()
            .last()
            .map(|m| m.content().clone())
            .unwrap_or_default();
        let call = {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(prompt);
            prompts.len()
        };

        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Text(text)) => Ok(GenerateResponse::text(text)),
            Some(Reply::Fail(kind)) => Err(GenerationError::new(kind).into()),
            None => Ok(GenerateResponse::text(format!("<p>generated {}</p>", call))),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model-v1"
    }
}

pub fn inputs() -> FormInputs {
    FormInputs::new()
        .with("goal", "launch")
        .with("tone", "professional")
}

/// Three-section table used by the lifecycle scenarios.
pub fn three_section_table() -> SectionTable {
    SectionTable::new(
        "mini",
        "Three section test table",
        vec![
            SectionDefinition::new(SectionKind::Hero, "Hero", "Open strong.", 1, 50),
            SectionDefinition::new(SectionKind::Solutions, "Solutions", "List benefits.", 1, 50),
            SectionDefinition::new(SectionKind::Cta, "Call to Action", "Ask for a demo.", 1, 50),
        ],
    )
    .unwrap()
}
