/// 來源文字，從輸入檔讀入後不做任何結構假設
#[derive(Debug, Clone)]
pub struct SourceText {
    pub body: String,
}

/// 模型回傳的 Markdown，內容原樣保留
#[derive(Debug, Clone)]
pub struct ConversionResult {
    pub markdown: String,
    pub usage: Option<TokenUsage>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub response_tokens: u32,
    pub total_tokens: u32,
}
