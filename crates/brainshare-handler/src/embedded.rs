//! Credential extraction from free-text message content.
//!
//! Basic messages may embed credentials in fenced markdown code blocks
//! tagged `vc+json` (a credential as JSON) or `vc+jwt` (a compact JWT).
//! Parsing faults are caught per block: one malformed block never aborts
//! its siblings.

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};

use brainshare_vc::{credential_from_jwt, VerifiableCredential};

/// Extract every parseable embedded credential from markdown content.
pub fn extract_embedded_credentials(content: &str) -> Vec<VerifiableCredential> {
    let mut credentials = Vec::new();
    let mut fence_lang: Option<String> = None;
    let mut block = String::new();

    for event in Parser::new(content) {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(lang))) => {
                fence_lang = Some(lang.to_string());
                block.clear();
            }
            Event::Text(text) if fence_lang.is_some() => block.push_str(&text),
            Event::End(TagEnd::CodeBlock) => {
                if let Some(lang) = fence_lang.take() {
                    match lang.as_str() {
                        "vc+jwt" => {
                            // Compact JWTs may be wrapped; strip all whitespace.
                            let compact: String =
                                block.chars().filter(|c| !c.is_whitespace()).collect();
                            match credential_from_jwt(&compact) {
                                Ok(vc) => credentials.push(vc),
                                Err(e) => {
                                    tracing::debug!(error = %e, "skipping malformed vc+jwt block");
                                }
                            }
                        }
                        "vc+json" => match serde_json::from_str(&block) {
                            Ok(vc) => credentials.push(vc),
                            Err(e) => {
                                tracing::debug!(error = %e, "skipping malformed vc+json block");
                            }
                        },
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    credentials
}
