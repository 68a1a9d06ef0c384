//! Prompt for the second model call: Google Ads assets from a brief.
//!
//! The section markers spelled out here (`AD COPY VARIATION n`,
//! `Headlines:`, `Descriptions:`, `SITELINKS:`, `STRUCTURED SNIPPETS:`,
//! `Header:`, `CALLOUTS:`) are the tokens `parser` looks for.

use crate::domain::model::MarketingBrief;

pub const HEADLINE_COUNT: usize = 25;
pub const HEADLINE_MAX_CHARS: usize = 30;
pub const DESCRIPTION_COUNT: usize = 10;
pub const DESCRIPTION_MAX_CHARS: usize = 90;
pub const SITELINK_TEXT_MAX_CHARS: usize = 25;
pub const SITELINK_DESCRIPTION_MAX_CHARS: usize = 35;
pub const SNIPPET_VALUE_MAX_CHARS: usize = 25;
pub const CALLOUT_MAX_CHARS: usize = 25;

pub fn build(brief: &MarketingBrief) -> String {
    format!(
        r#"
You are the world's unparalleled Google Ads copywriter and the pinnacle of prompt engineering.
Your mission is to generate Google Ads assets based on the following Marketing Brief.

MARKETING BRIEF:
---
{brief}
---

INSTRUCTIONS:
1.  **Ad Copy Variations:**
    * Analyze the "Specific Services/Product Lines to Feature" section of the Marketing Brief. Count the number of distinct services listed (N) that have actual descriptions (not "Could not determine..." or "could not be verified/detailed"). These lines typically start with "Service/Product [number]".
    * Generate exactly N distinct "AD COPY VARIATION" blocks. If N is 0 (no services with valid descriptions found), generate one (1) general ad copy variation based on the "Overall Product/Service Category" and "Business Name" from the brief.
    * For each "AD COPY VARIATION [i]" (where [i] is 1 to N):
        * Extract the service name from the "Service/Product [i]..." line in the brief. For example, if the line is "Service/Product 1 (User Specified: Smart Thermostats): Smart Thermostats are available...", the service focus is "Smart Thermostats". If it's "Service/Product 2: Custom Software Development: We build custom software...", the focus is "Custom Software Development".
        * Clearly state which service it focuses on (e.g., "AD COPY VARIATION 1 (Service Focus: [Extracted Service Name from Brief])"). If it's a general ad copy, state "AD COPY VARIATION 1 (General Focus)".
        * **Geo-Targeting:** Analyze the "Target Geographic Location(s):" section of the Marketing Brief. If specific locations are identified (and not a "Could not determine..." message for that section), naturally incorporate these location names or location-specific phrases (e.g., "Available in [City]", "[Service] near [Location]", "Your Local [Product] Experts in [Region]") into a reasonable subset of the headlines and descriptions to enhance local relevance. Do this subtly and where appropriate. If the brief indicates a national/global service or no specific locations were determined, focus on broader appeal.
        * **You MUST include the label "Headlines:" followed by the list of headlines.** List them using a dash (-) prefix. Each headline MUST BE **STRICTLY {headline_max} characters or less**. ABSOLUTELY NO MORE THAN {headline_max} characters. You MUST generate **EXACTLY {headline_count} distinct headlines**. NO MORE, NO LESS. If generating specific headlines for the service focus is challenging, you MUST provide **EXACTLY {headline_count} relevant generic headlines** related to the business name or overall product/service category from the Marketing Brief. ALWAYS include the "Headlines:" label and ensure the list under it is NOT empty and contains {headline_count} items.
        * **You MUST include the label "Descriptions:" followed by the list of descriptions.** List them using a dash (-) prefix. Each description MUST BE **STRICTLY {description_max} characters or less**. ABSOLUTELY NO MORE THAN {description_max} characters. You MUST generate **EXACTLY {description_count} distinct descriptions**. NO MORE, NO LESS. If generating specific descriptions for the service focus is challenging, you MUST provide **EXACTLY {description_count} relevant generic descriptions** related to the business name or overall product/service category from the Marketing Brief. ALWAYS include the "Descriptions:" label and ensure the list under it is NOT empty and contains {description_count} items.
    * Adhere to all Google Ads policies & best practices: hyper-relevance, keyword integration (from brief's "Primary Keywords" if available), clarity, professionalism, no gimmicks, benefit-centricity, strong CTAs (from brief's "Desired Call-to-Action" if available), USP amplification (from brief's "USPs" if available), ethical urgency/scarcity if applicable, social proof if applicable, pain point agitation & solution.
    * Ensure headline/description variety for A/B testing. Each piece must stand alone or combine effectively.

2.  **Sitelinks (4-6 variations):**
    * Based on the Marketing Brief (especially services, USPs, CTAs, and overall category, if this information was successfully determined).
    * Each Sitelink MUST adhere to the following STRICT character limits:
        * Sitelink Text: **STRICTLY {sitelink_text_max} characters or less. ABSOLUTELY NO MORE THAN {sitelink_text_max} characters.**
        * Description Line 1: **STRICTLY {sitelink_desc_max} characters or less. ABSOLUTELY NO MORE THAN {sitelink_desc_max} characters.**
        * Description Line 2: **STRICTLY {sitelink_desc_max} characters or less. ABSOLUTELY NO MORE THAN {sitelink_desc_max} characters.**
    * Format:
        SITELINKS:
        - Sitelink Text: [Text, adhering to {sitelink_text_max} char limit]
          Description Line 1: [Text, adhering to {sitelink_desc_max} char limit]
          Description Line 2: [Text, adhering to {sitelink_desc_max} char limit]
        (Repeat for 4-6 variations. Ensure each part meets its specific character limit. If the brief has insufficient detail for specific sitelinks, provide generic ones based on business name/category or state 'Insufficient detail in brief for specific Sitelinks.')

3.  **Structured Snippets (2-3 distinct headers):**
    * Choose appropriate headers (e.g., Services, Types, Brands, Destinations, Models, Courses, Styles) based on the Marketing Brief's "Overall Product/Service Category" and "Specific Services/Product Lines" (if this information was successfully determined).
    * For each header, list 3-5 relevant values from the brief. Each value MUST BE **STRICTLY {snippet_max} characters or less. ABSOLUTELY NO MORE THAN {snippet_max} characters.**
    * Format:
        STRUCTURED SNIPPETS:
        Header: [Chosen Header e.g., Services]
        - [Value 1, adhering to {snippet_max} char limit]
        - [Value 2, adhering to {snippet_max} char limit]
        - [Value 3, adhering to {snippet_max} char limit]
        (Repeat for more values if applicable)
        Header: [Chosen Header e.g., Types]
        - [Value 1, adhering to {snippet_max} char limit]
        - ...
        (Repeat for 2-3 headers. If the brief has insufficient detail for specific snippets, provide generic ones or state 'Insufficient detail in brief for specific Structured Snippets.')

4.  **Callouts (4-6 variations):**
    * Highlight key benefits, USPs, or offers from the Marketing Brief (especially "USPs", "Promotions/Offers", if this information was successfully determined).
    * Each callout MUST BE **STRICTLY {callout_max} characters or less. ABSOLUTELY NO MORE THAN {callout_max} characters.**
    * Format:
        CALLOUTS:
        - [Callout Text 1, adhering to {callout_max} char limit]
        - [Callout Text 2, adhering to {callout_max} char limit]
        (Repeat for 4-6 variations. If the brief has insufficient detail for specific callouts, provide generic ones or state 'Insufficient detail in brief for specific Callouts.')

Output all sections clearly separated. Ensure absolutely no truncation of text within character limits. Maximize character usage where impactful but never exceed.
STRICTLY ADHERE TO THE "- " PREFIX FOR LISTS OF HEADLINES, DESCRIPTIONS, SITELINK VALUES, STRUCTURED SNIPPET VALUES, AND CALLOUTS. NO OTHER NUMBERS OR BULLETS.
"#,
        brief = brief.text(),
        headline_max = HEADLINE_MAX_CHARS,
        headline_count = HEADLINE_COUNT,
        description_max = DESCRIPTION_MAX_CHARS,
        description_count = DESCRIPTION_COUNT,
        sitelink_text_max = SITELINK_TEXT_MAX_CHARS,
        sitelink_desc_max = SITELINK_DESCRIPTION_MAX_CHARS,
        snippet_max = SNIPPET_VALUE_MAX_CHARS,
        callout_max = CALLOUT_MAX_CHARS,
    )
}
