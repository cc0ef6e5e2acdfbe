// ABOUTME: Output-language instruction blocks appended to every generated prompt
// ABOUTME: Each supported language gets a native instruction; unknown tags get an English one
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Salesgem Project

use crate::models::Language;

/// Build the output-language section for a prompt body
///
/// The six supported languages carry an instruction written in that language,
/// which external chat tools follow far more reliably than an English request
/// to switch. Any other tag falls back to an English instruction naming the
/// language.
#[must_use]
pub fn instruction_block(language: &Language) -> String {
    let instruction = match language {
        Language::Ja => {
            "重要: 出力はすべて日本語で書いてください。見出しや箇条書きも日本語に統一してください。"
                .to_owned()
        }
        Language::En => {
            "Important: Write every response in English, including headings and bullet points."
                .to_owned()
        }
        Language::Zh => "重要:请用中文撰写所有输出,包括标题和要点。".to_owned(),
        Language::Ko => {
            "중요: 모든 출력은 한국어로 작성해 주세요. 제목과 목록도 한국어로 통일해 주세요."
                .to_owned()
        }
        Language::Es => {
            "Importante: Escribe todas las respuestas en español, incluidos los títulos y las listas."
                .to_owned()
        }
        Language::Fr => {
            "Important : Rédigez toutes les réponses en français, y compris les titres et les listes."
                .to_owned()
        }
        Language::Other(_) => format!(
            "Important: Write every response in {name}, including headings and bullet points.",
            name = language.display_name(),
        ),
    };

    format!("## Output language\n\n{instruction}\n")
}
