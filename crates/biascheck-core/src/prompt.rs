/// Maximum number of characters of article text sent to a provider.
pub const MAX_ARTICLE_CHARS: usize = 4000;

/// Classification rubric for Japanese news articles.
///
/// Asks for a bare `{"left", "center", "right"}` JSON object; the article body
/// is appended after the final line.
pub const BIAS_PROMPT: &str = "あなたは日本のメディアバイアス分析の専門家です。以下のニュース記事を分析し、政治的傾向を判定してください。

【日本における政治的バイアスの判定基準】

■ 左派・リベラル傾向の特徴:
- 憲法9条改正に反対、護憲的立場
- 政権・与党（自民党）に批判的
- 防衛費増額・安全保障強化に懐疑的
- 原発再稼働に反対
- 多文化共生・移民受入れに肯定的
- ジェンダー平等・LGBT権利を重視
- 歴史問題で謝罪・反省を重視
- 社会福祉・再分配を重視
- 労働者・弱者の視点を強調

■ 右派・保守傾向の特徴:
- 憲法改正に積極的
- 政権・与党（自民党）を支持・擁護
- 防衛力強化・日米同盟重視
- 原発再稼働を支持
- 移民政策に慎重・国境管理重視
- 伝統的家族観を重視
- 歴史問題で自国の立場を強調
- 経済成長・規制緩和を重視
- 国益・愛国心を強調

■ 中立の特徴:
- 複数の立場を公平に紹介
- 事実報道に徹し、意見を控える
- 賛否両論を併記

【重要】
- 「中立」は本当にバランスが取れている場合のみ高くしてください
- 多くの記事は何らかの傾向を持っています
- 微妙な言葉遣いや論調からもバイアスを読み取ってください

以下のJSON形式のみで回答（説明不要）:
{\"left\": 0.0-1.0, \"center\": 0.0-1.0, \"right\": 0.0-1.0}

合計は1.0にしてください。

本文:
";

/// First `MAX_ARTICLE_CHARS` characters of `text`, cut on a char boundary.
pub fn truncate_article(text: &str) -> &str {
    match text.char_indices().nth(MAX_ARTICLE_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Rubric followed by the (truncated) article text.
pub fn build_prompt(text: &str) -> String {
    let article = truncate_article(text);
    let mut prompt = String::with_capacity(BIAS_PROMPT.len() + article.len());
    prompt.push_str(BIAS_PROMPT);
    prompt.push_str(article);
    prompt
}
