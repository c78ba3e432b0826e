//! Prompt construction for the chat-completion service.

use std::fmt::Write as _;

use crate::types::ClassificationRequest;

/// Characters of the answer shown to the model for language detection.
const LANGUAGE_SAMPLE_CHARS: usize = 200;

/// Build the classification prompt for one answer.
///
/// When the brand is not mentioned, an extra block tells the model to judge
/// the absence by the question: absence from a "what to avoid" question is
/// favorable, absence from a question about the brand itself is not.
#[must_use]
pub fn build_classification_prompt(request: &ClassificationRequest<'_>) -> String {
    let brand = request.brand;
    let sample = language_sample(request.answer);
    let mut prompt = String::with_capacity(request.answer.len() + 3_000);

    let _ = write!(
        prompt,
        "STEP 1 - LANGUAGE DETECTION (CRITICAL):\n\
         Identify the language of this text sample: \"{sample}\"\n\
         You MUST write ALL of your output in THAT SAME LANGUAGE.\n\
         \n\
         STEP 2 - Read the following question and answer about the brand \"{brand}\" and classify the answer.\n\
         \n\
         QUESTION:\n{question}\n\
         \n\
         ANSWER:\n{answer}\n",
        question = request.question,
        answer = request.answer,
    );

    if !request.mentioned {
        prompt.push_str(&absent_brand_context(brand));
    }

    let _ = write!(
        prompt,
        "\nCLASSIFICATION RULES:\n\
         - OPPORTUNITY: the answer is favorable to {brand}. It recommends it, highlights its benefits or presents it well; \
         or the question is negative (problems, what to avoid) and {brand} is NOT mentioned.\n\
         - WARNING: the answer is neutral or mixed, or purely informational with no clear stance.\n\
         - CRITICAL: the answer is unfavorable to {brand}. It criticizes it, highlights problems or recommends alternatives instead; \
         or the question asks about {brand} directly and it is NOT mentioned.\n\
         \n\
         SENTIMENT IS NOT POSITION:\n\
         - Judge the words used about {brand}, not where it appears in a list.\n\
         - Appearing last or in a lower tier with positive wording (\"great for X\", \"good value\") is not negative.\n\
         - CRITICAL needs actual negative statements: criticism, warnings, problems or explicit discouragement.\n\
         \n\
         Weigh the question context and the answer content together, including what NOT being mentioned implies for this kind of question.\n\
         \n\
         Respond with JSON only. EVERY TEXT FIELD MUST BE IN THE SAME LANGUAGE AS THE ANSWER:\n\
         {{\n  \
           \"detected_language\": \"English/Spanish/French/...\",\n  \
           \"classification\": \"CRITICAL/WARNING/OPPORTUNITY\",\n  \
           \"reason\": \"short reason, at most 15 words\",\n  \
           \"triggers_detected\": [\n    \
             {{\n      \
               \"trigger\": \"problematic phrase or topic\",\n      \
               \"type\": \"WARNING or CRITICAL\",\n      \
               \"context\": \"exact quote from the answer, at most 100 characters\",\n      \
               \"reason\": \"why it is a problem\"\n    \
             }}\n  \
           ],\n  \
           \"psychological_impact\": \"3-5 sentences: how a reader perceives the answer, which biases it activates \
         (recency, framing, anchoring, social proof, loss aversion), whether a pros/cons layout leaves the reader positive \
         or negative, the effect of competitor comparisons, and the effect on the purchase decision\"\n\
         }}\n\
         \n\
         RULES:\n\
         - triggers_detected is only for WARNING or CRITICAL. For OPPORTUNITY return an empty array [].\n\
         - If the answer is in English, every field is in English. If it is in Spanish, every field is in Spanish. \
         The same holds for any other language.\n\
         - Never mix languages."
    );

    prompt
}

fn absent_brand_context(brand: &str) -> String {
    format!(
        "\nIMPORTANT CONTEXT: the brand \"{brand}\" is NOT mentioned in this answer.\n\
         Use the QUESTION to decide whether that is good or bad:\n\
         - If the question asks about problems, complaints or what to avoid, NOT being mentioned is POSITIVE (OPPORTUNITY).\n\
         - If the question asks about {brand} directly, NOT being mentioned is NEGATIVE (CRITICAL).\n\
         - If the question is a general comparison, NOT being mentioned is neutral (WARNING) or negative (CRITICAL).\n"
    )
}

/// Build the prompt asking for a brand's main competitors, one per line.
#[must_use]
pub fn build_competitor_prompt(brand: &str, industry: &str, country: &str) -> String {
    format!(
        "List the 15-20 main competitors of {brand} in the {industry} market in {country}.\n\
         \n\
         IMPORTANT:\n\
         - Return ONLY brand or company names, one per line\n\
         - No explanations, numbering or descriptions\n\
         \n\
         Example format:\n\
         CompetitorA\n\
         CompetitorB\n\
         CompetitorC"
    )
}

/// Leading slice of `answer` of at most [`LANGUAGE_SAMPLE_CHARS`] characters.
fn language_sample(answer: &str) -> &str {
    match answer.char_indices().nth(LANGUAGE_SAMPLE_CHARS) {
        Some((idx, _)) => &answer[..idx],
        None => answer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request<'a>(question: &'a str, answer: &'a str, mentioned: bool) -> ClassificationRequest<'a> {
        ClassificationRequest {
            brand: "Betfair",
            question,
            answer,
            mentioned,
        }
    }

    #[test]
    fn absent_brand_adds_question_polarity_guidance() {
        let prompt = build_classification_prompt(&request(
            "What should I avoid when choosing a bookmaker?",
            "Avoid unlicensed sites and slow payouts.",
            false,
        ));
        assert!(prompt.contains("\"Betfair\" is NOT mentioned"));
        assert!(prompt.contains("what to avoid, NOT being mentioned is POSITIVE (OPPORTUNITY)"));
        assert!(prompt.contains("asks about Betfair directly, NOT being mentioned is NEGATIVE (CRITICAL)"));
    }

    #[test]
    fn mentioned_brand_omits_absence_block() {
        let prompt = build_classification_prompt(&request("Is Betfair good?", "Betfair is great.", true));
        assert!(!prompt.contains("IMPORTANT CONTEXT"));
        assert!(prompt.contains("QUESTION:\nIs Betfair good?"));
        assert!(prompt.contains("ANSWER:\nBetfair is great."));
    }

    #[test]
    fn prompt_requests_all_result_fields_in_answer_language() {
        let prompt = build_classification_prompt(&request("q", "a", true));
        for field in [
            "\"classification\"",
            "\"reason\"",
            "\"triggers_detected\"",
            "\"trigger\"",
            "\"type\"",
            "\"context\"",
            "\"psychological_impact\"",
        ] {
            assert!(prompt.contains(field), "missing {field}");
        }
        assert!(prompt.contains("SAME LANGUAGE AS THE ANSWER"));
        assert!(prompt.contains("For OPPORTUNITY return an empty array []"));
    }

    #[test]
    fn language_sample_is_capped_on_char_boundary() {
        let answer = "ñ".repeat(250);
        let sample = language_sample(&answer);
        assert_eq!(sample.chars().count(), 200);
        assert_eq!(language_sample("short"), "short");
    }

    #[test]
    fn competitor_prompt_names_market() {
        let prompt = build_competitor_prompt("Betfair", "betting", "Spain");
        assert!(prompt.starts_with("List the 15-20 main competitors of Betfair in the betting market in Spain."));
    }
}
