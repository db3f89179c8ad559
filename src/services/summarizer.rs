//! LLM 摘要服务 - 业务能力层
//!
//! 只负责"对一段论文文本生成结构化摘要"能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Azure, Gemini, Doubao 等）

use anyhow::Result;
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::paper::SummaryRecord;

const SYSTEM_PROMPT: &str = "你是一个专业的论文阅读助手，擅长从论文原文中提炼核心思想。\
                             你只输出 JSON，不输出任何其他内容。";

/// LLM 摘要服务
///
/// 职责：
/// - 调用 LLM API，把论文文本转换为结构化的 SummaryRecord
/// - 只处理单篇论文的文本
/// - 不出现 Vec<PaperRef>
/// - 不关心流程顺序
pub struct Summarizer {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl Summarizer {
    /// 创建新的摘要服务
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.llm_model_name.clone(),
        }
    }

    /// 对论文文本生成结构化摘要
    pub async fn summarize(&self, paper_text: &str) -> Result<SummaryRecord> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("论文文本长度: {} 字符", paper_text.chars().count());

        let system_msg = ChatCompletionRequestSystemMessageArgs::default()
            .content(SYSTEM_PROMPT)
            .build()?;

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(build_user_message(paper_text))
            .build()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![
                ChatCompletionRequestMessage::System(system_msg),
                ChatCompletionRequestMessage::User(user_msg),
            ])
            .temperature(0.3)
            .max_tokens(2048u32)
            .build()?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            anyhow::anyhow!("LLM API 调用失败: {}", e)
        })?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| anyhow::anyhow!("LLM 返回内容为空"))?;

        parse_summary(&content)
    }
}

fn build_user_message(paper_text: &str) -> String {
    format!(
        r#"请阅读下面的论文内容（取自论文前几页），输出一个 JSON 对象，字段如下：
- "title": 论文英文标题
- "translated_title": 标题的中文翻译
- "core_idea_summary": 论文核心思想的中文概述（3-5 句话）
- "innovations": 创新点列表（中文，字符串数组）
- "methodology": 研究方法列表（中文，字符串数组）
- "conclusions": 研究结论列表（中文，字符串数组）
- "repo_url": 论文中给出的代码仓库链接；没有则为 null

只返回 JSON 对象本身，不要加任何解释或 Markdown 代码块。

论文内容：
{}"#,
        paper_text
    )
}

/// 从 LLM 响应中解析出摘要记录
///
/// 模型偶尔会在 JSON 外包一层代码块或说明文字，
/// 这里取第一个 `{` 到最后一个 `}` 之间的内容再解析。
fn parse_summary(response: &str) -> Result<SummaryRecord> {
    let start = response
        .find('{')
        .ok_or_else(|| anyhow::anyhow!("LLM 响应中没有 JSON 对象: {}", response))?;
    let end = response
        .rfind('}')
        .ok_or_else(|| anyhow::anyhow!("LLM 响应中的 JSON 对象不完整: {}", response))?;

    let record = serde_json::from_str(&response[start..=end])
        .map_err(|e| anyhow::anyhow!("解析 LLM 返回的 JSON 失败: {}", e))?;

    Ok(record)
}
