//! Prompt for the first model call: a marketing brief for one website.
//!
//! Every section asks the model to fall back to a fixed
//! "Could not determine <section> <source>." phrase. The ad-copy prompt
//! relies on that phrase to tell empty sections from real ones.

use crate::domain::model::GenerationRequest;

/// Wording that depends on whether the model may use web search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceClauses {
    /// How the model should gather information.
    pub method: String,
    /// Where the information came from, reused in every sentinel phrase.
    pub source: String,
}

impl SourceClauses {
    pub fn new(url: &str, website_only: bool) -> Self {
        if website_only {
            Self {
                method: format!("analyze the content found directly on the website {}", url),
                source: format!("from the website {}", url),
            }
        } else {
            Self {
                method: format!(
                    "use your Google Search tool to find information about the website {}",
                    url
                ),
                source: format!("via Google Search for {}", url),
            }
        }
    }

    /// The "no data" phrase for one section.
    pub fn not_found(&self, section: &str) -> String {
        format!("Could not determine {} {}.", section, self.source)
    }
}

/// User-supplied names end up inside `[...]` instruction brackets.
fn strip_brackets(service: &str) -> String {
    service.replace(['[', ']'], "")
}

fn safe_services(request: &GenerationRequest, separator: &str) -> String {
    request
        .focus_services()
        .iter()
        .map(|service| strip_brackets(service))
        .collect::<Vec<_>>()
        .join(separator)
}

fn services_section(request: &GenerationRequest, url: &str, clauses: &SourceClauses) -> String {
    let website_only = request.use_website_only();
    let source = &clauses.source;

    if request.focus_services().is_empty() {
        return format!(
            r#"
Specific Services/Product Lines to Feature:
(To determine this, {method} to identify its key specific services or product lines. List all clearly identifiable and distinct services/products with concise descriptions based *solely* on the website's content/search findings.)
Service/Product 1: [Concise description of Service/Product 1 identified {source}, or '{missing_1}']
Service/Product 2: [Concise description of Service/Product 2 identified {source}, or '{missing_2}']
(Continue listing Service/Product 3, Service/Product 4, etc., if clearly identifiable and distinct {source})
"#,
            method = clauses.method,
            source = source,
            missing_1 = clauses.not_found("specific service 1"),
            missing_2 = clauses.not_found("specific service 2"),
        );
    }

    let search_instruction = if website_only {
        "by reviewing its content directly"
    } else {
        "using Google Search if needed to find relevant pages *within* that site or directly related official information"
    };
    let analysis_mode = if website_only {
        "when analyzing its content directly"
    } else {
        "even with Google Search"
    };

    let mut service_lines = String::new();
    for (index, service) in request.focus_services().iter().enumerate() {
        let safe = strip_brackets(service);
        service_lines.push_str(&format!(
            "Service/Product {n} (User Specified: {safe}): [Analyze {url} ({search_instruction}) to confirm and describe \"{safe}\". If not found or detailed {source}, state 'User-specified service \"{safe}\" could not be verified/detailed {source}'. Provide concise description from website content if found.]\n",
            n = index + 1,
        ));
    }
    let next = request.focus_services().len() + 1;

    format!(
        r#"
Specific Services/Product Lines to Feature:
The user has expressed a specific interest in the following products/services from the website:
{services}

Your task for this section:
1.  For each "User Specified" service line below, analyze the website at {url} ({search_instruction}) to gather details about it.
2.  Fill in the description for each. If a user-specified service cannot be clearly identified or detailed based on the content of {url} ({analysis_mode}), explicitly state that in its description field (e.g., 'User-specified service "XYZ" could not be verified or detailed based on {url}'s content {source}').
3.  After addressing all user-specified services, if there are other prominent and distinct services/product lines clearly featured on {url} that were not mentioned by the user, you MAY list and describe up to 2-3 *additional* distinct services/products, continuing the "Service/Product [number]: [description]" format (e.g., Service/Product {next}: [description]).

{service_lines}
(If applicable, continue with additional services found on {url} by you, ensuring you continue the numbering, e.g.:
Service/Product {next}: [Concise description of an additional service found {source}]
Service/Product {after}: [Concise description of another additional service found {source}]
)
"#,
        services = safe_services(request, "\n"),
        after = next + 1,
    )
}

/// Renders the full marketing-brief prompt.
pub fn build(request: &GenerationRequest) -> String {
    let url = request.url();
    let website_only = request.use_website_only();
    let clauses = SourceClauses::new(url, website_only);
    let method = &clauses.method;
    let source = &clauses.source;

    let user_focus = if request.focus_services().is_empty() {
        String::new()
    } else {
        format!(
            "\nIMPORTANT USER FOCUS: The user has specifically requested to focus on the following products/services: \"{}\". Please ensure your analysis, especially for \"Specific Services/Product Lines to Feature\", prioritizes these. For other sections, consider how these focused services might influence the overall strategy.\n",
            safe_services(request, ", ")
        )
    };

    let competitors_missing = if website_only {
        format!(
            "Competitive landscape cannot be determined from website content alone for {}",
            url
        )
    } else {
        clauses.not_found("competitive landscape")
    };

    format!(
        r#"
IMPORTANT: You MUST generate the complete marketing brief structure as outlined below. For every section, provide the requested information based on your analysis of the website {url} {analysis}. If, after attempting to {method}, you cannot find specific information for a section, you MUST explicitly write a '{missing_generic}' message (e.g., '{missing_business}') within that section. DO NOT return an empty response or omit sections. The entire structure must be present in your output. Any sections for which information cannot be found MUST contain the appropriate 'Could not determine...' phrase.

You are an expert marketing strategist. Your mission is to analyze the website at the URL "{url}" and generate a comprehensive Marketing Brief. For each section below, you will {method} to find the relevant information. If information for a section cannot be found after a reasonable attempt, explicitly state '{missing_relevant}'. Address ALL sections.
{user_focus}
Marketing Brief for Website: {url}

Business Name:
(To determine this, {method}. Based on your findings, state the business name. If not clearly identifiable, state '{missing_business}')

Campaign Goal:
(To determine this, {method}. Explain your choice briefly based on your findings. If unclear, state '{missing_goal}')

Overall Product/Service Category:
(To determine this, {method}. Based on your findings, describe the category. If unclear, state '{missing_category}')

{services}

Target Geographic Location(s):
(To determine this, {method}. Describe based on your findings. If not determinable or if the service is global/national without specific local focus, state '{missing_geo}, or service appears to be national/global'.)

Target Audience Profile(s):
(To determine this, {method}. Describe one primary persona. If multiple distinct personas are clearly evident from your findings for {url}, describe a second one.)
Persona 1 Name (e.g., "Tech-Savvy Startup Founder"): [Describe Demographics, Psychographics, Needs, Pain Points, What they value most, as inferred {source}. If not determinable, state '{missing_persona}'.]
(Persona 2 Name (e.g., "Established Enterprise CTO"): [Describe Demographics, Psychographics, Needs, Pain Points, What they value most, as inferred {source} if a second distinct persona is evident. Otherwise, omit or state 'Second distinct persona not clearly identifiable {source}'.])

Primary Keywords (High Intent):
(To determine this, {method}. List 5-8 of these keywords based on your findings for {url}. If not determinable, state '{missing_keywords}')
- [Keyword 1 identified {source}]
- [Keyword 2 identified {source}]
- ...

Unique Selling Propositions (USPs) / Core Differentiators:
(To determine this, {method}. List 1-3 USPs based on your findings for {url}. If not determinable, state '{missing_usps}')
- [USP 1 identified {source}]
- ...

Competitive Landscape (Optional but Recommended):
(To determine this, {method}. Briefly mention 1-2 competitors and a key differentiator for {url} based on your findings. If not determinable, state '{competitors_missing}'.)

Desired Call-to-Action (CTA):
(To determine this, {method}. State the main CTA based on your findings for {url}. If multiple, choose the most prominent. If not determinable, state '{missing_cta}')

Brand Voice / Tone:
(To determine this, {method} and describe: "What is the brand voice or tone of the website {url} (e.g., Authoritative & Innovative, Inspiring & Exclusive, Reliable & Empathetic)?". Justify briefly based on your findings. If not determinable, state '{missing_voice}')

Any Current Promotions/Offers:
(To determine this, {method}. If yes, describe them based on your findings. If no clear promotions are found on {url}, state 'No current promotions/offers found {source}'.)

Implicit Negative Intents to Avoid:
(To determine this, based on the understanding of {url} {source}, suggest: "What are 1-2 keyword intents or search terms that the website {url} should AVOID targeting (e.g., 'free' if it's a premium service)?". If not determinable, state '{missing_negative}')
"#,
        analysis = if website_only { "content" } else { "using Google Search" },
        missing_generic = clauses.not_found("[section name]"),
        missing_relevant = clauses.not_found("[Relevant Section Name]"),
        missing_business = clauses.not_found("Business Name"),
        missing_goal = clauses.not_found("primary campaign goal"),
        missing_category = clauses.not_found("overall product/service category"),
        services = services_section(request, url, &clauses),
        missing_geo = clauses
            .not_found("specific target geographic locations")
            .trim_end_matches('.'),
        missing_persona = clauses.not_found("Persona 1 details"),
        missing_keywords = clauses.not_found("primary keywords"),
        missing_usps = clauses.not_found("USPs"),
        missing_cta = clauses.not_found("primary CTA"),
        missing_voice = clauses.not_found("brand voice/tone"),
        missing_negative = clauses.not_found("implicit negative intents"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(url: &str, services: &[&str], website_only: bool) -> GenerationRequest {
        GenerationRequest::new(
            url,
            services.iter().map(|s| s.to_string()).collect(),
            website_only,
        )
    }

    #[test]
    fn test_website_only_method_clause() {
        let prompt = build(&request("https://example.com", &[], true));

        assert!(prompt.contains("analyze the content found directly on the website https://example.com"));
        assert!(prompt.contains("Could not determine Business Name from the website https://example.com."));
        assert!(!prompt.contains("Google Search tool"));
        assert!(prompt.contains(
            "Competitive landscape cannot be determined from website content alone for https://example.com"
        ));
    }

    #[test]
    fn test_search_method_clause() {
        let prompt = build(&request("https://example.com", &[], false));

        assert!(prompt.contains(
            "use your Google Search tool to find information about the website https://example.com"
        ));
        assert!(prompt.contains("Could not determine competitive landscape via Google Search for https://example.com."));
    }

    #[test]
    fn test_open_ended_services_start_at_one() {
        let prompt = build(&request("https://example.com", &[], true));

        assert!(prompt.contains("Service/Product 1: [Concise description of Service/Product 1"));
        assert!(prompt.contains("Could not determine specific service 2 from the website"));
        assert!(!prompt.contains("User Specified"));
        assert!(!prompt.contains("IMPORTANT USER FOCUS"));
    }

    #[test]
    fn test_user_services_are_numbered_and_continued() {
        let prompt = build(&request(
            "https://example.com",
            &["Smart [Thermostats]", "Solar Panels"],
            false,
        ));

        assert!(prompt.contains("Service/Product 1 (User Specified: Smart Thermostats):"));
        assert!(prompt.contains("Service/Product 2 (User Specified: Solar Panels):"));
        assert!(prompt.contains("Service/Product 3: [Concise description of an additional service"));
        assert!(prompt.contains("Service/Product 4: [Concise description of another additional service"));
        assert!(prompt.contains("IMPORTANT USER FOCUS"));
        assert!(!prompt.contains("[Thermostats]"));
        assert!(prompt.contains(
            "specific interest in the following products/services from the website:\nSmart Thermostats\nSolar Panels\n"
        ));
        assert!(prompt.contains(
            "focus on the following products/services: \"Smart Thermostats, Solar Panels\""
        ));
    }

    #[test]
    fn test_every_section_is_requested() {
        let prompt = build(&request("https://example.com", &[], false));
        for section in [
            "Business Name:",
            "Campaign Goal:",
            "Overall Product/Service Category:",
            "Specific Services/Product Lines to Feature:",
            "Target Geographic Location(s):",
            "Target Audience Profile(s):",
            "Primary Keywords (High Intent):",
            "Unique Selling Propositions (USPs) / Core Differentiators:",
            "Competitive Landscape (Optional but Recommended):",
            "Desired Call-to-Action (CTA):",
            "Brand Voice / Tone:",
            "Any Current Promotions/Offers:",
            "Implicit Negative Intents to Avoid:",
        ] {
            assert!(prompt.contains(section), "missing section {}", section);
        }
    }
}
