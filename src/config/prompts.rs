//! Prompt templates for Tavle.

use serde::{Deserialize, Serialize};

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Prompts {
    pub classify: ClassifyPrompts,
}

/// Prompt for the summarize-and-classify call.
///
/// The reply must follow the literal two-line format the parser expects:
/// `摘要：<summary>` then `主題分類：<category>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyPrompts {
    pub user: String,
}

impl Default for ClassifyPrompts {
    fn default() -> Self {
        Self {
            user: r#"以下是社群貼文內容：
{{text}}

請以繁體中文：
1. 生成一段100字內摘要
2. 判斷主題屬於以下類別之一：生活、美食、科技、時事、旅遊、娛樂、學習、其他
請以如下格式回覆：
摘要：...
主題分類：...
"#
            .to_string(),
        }
    }
}

impl Prompts {
    /// Render the classify prompt for a piece of extracted text.
    pub fn render_classify(&self, text: &str) -> String {
        self.classify.user.replace("{{text}}", text)
    }
}
