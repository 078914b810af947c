use crate::llm::Prompt;
use crate::workflows::scoring::domain::{Lead, Offer};

const SYSTEM_INSTRUCTION: &str = "You are an expert B2B sales analyst. Classify prospect buying intent (High/Medium/Low) based on the product/offer and prospect data. Respond in exactly two lines: 'Intent: <High|Medium|Low>' and 'Reasoning: <one or two concise sentences>'.";

/// Render the classification prompt. Same inputs always yield the same prompt.
pub(crate) fn build_prompt(lead: &Lead, offer: &Offer) -> Prompt {
    let user = format!(
        "Product/Offer Context\n\
         Name: {offer_name}\n\
         Value Propositions: {value_props}\n\
         Ideal Use Cases: {use_cases}\n\
         \n\
         Prospect Data\n\
         Name: {name}\n\
         Role: {role}\n\
         Company: {company}\n\
         Industry: {industry}\n\
         Location: {location}\n\
         LinkedIn Bio: {bio}\n\
         \n\
         Classify intent and explain.",
        offer_name = offer.name,
        value_props = offer.value_props.join(", "),
        use_cases = offer.ideal_use_cases.join(", "),
        name = lead.name,
        role = lead.role,
        company = lead.company,
        industry = lead.industry,
        location = lead.location,
        bio = lead.linkedin_bio,
    );

    Prompt {
        system: SYSTEM_INSTRUCTION.to_string(),
        user,
    }
}
