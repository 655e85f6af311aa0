//! Prompt construction for the business analysis call

/// Build the analysis prompt for one document's worth of extracted text.
///
/// The template is fixed and the company details are the only interpolated
/// value, so equal input yields a byte-identical prompt.
pub fn build_analysis_prompt(company_details: &str) -> String {
    format!(
        r#"### Company Details:
{company_details}

### INSTRUCTION:
Analyze the provided startup company details and generate a structured business analysis with the following sections:

🧠 Business Health Assessment:
- Provide an overall assessment of the company's business health based on financial data, market position, growth stage, and other available indicators.

💡 Business Reasoning:
- Explain the reasoning behind the health assessment.
- Highlight strengths, weaknesses, market trends, and internal challenges or advantages.

✅ Recommended Best Actions:
- Offer 3-5 actionable recommendations to improve or sustain the startup's success.
- Base your suggestions on industry standards, financial health, product-market fit, or scalability.

### OUTPUT FORMAT (JSON):
{{
  "Business_Health_Assessment": "<summary of health: e.g., Stable, At Risk, Rapid Growth, Needs Improvement>",
  "Business_Reasoning": "<reasoned explanation with evidence from the company details>",
  "Recommended_Best_Actions": [
    "<Action 1>",
    "<Action 2>",
    "<Action 3>",
    "<Action 4>",
    "<Action 5>"
  ]
}}"#
    )
}
