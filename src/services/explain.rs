use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::models::{ScoredCard, UserProfile};

/// The structured slice of a recommendation handed to the explanation
/// collaborator: the card's name and its rounded net value. The generator
/// works from this data directly, so nothing is ever scraped back out of
/// prompt strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationSummary {
    pub card_name: String,
    pub net_annual_value: f64,
}

impl From<&ScoredCard> for RecommendationSummary {
    fn from(scored: &ScoredCard) -> Self {
        Self {
            card_name: scored.card.name.clone(),
            net_annual_value: scored.net_annual_value,
        }
    }
}

/// Formats a rupee amount with Indian digit grouping (last three digits,
/// then pairs): 600000 becomes "6,00,000".
pub fn format_inr(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.abs().to_string();
    let n = digits.len();

    let grouped = if n <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(n - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 2 {
            groups.push(&head[end - 2..end]);
            end -= 2;
        }
        groups.push(&head[..end]);
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };

    if rounded < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Builds the advisor prompt for the AI collaborator from the structured
/// recommendation list and the profile's top spending areas.
pub fn comparative_prompt(
    recommendations: &[RecommendationSummary],
    profile: &UserProfile,
) -> String {
    let mut spending: Vec<_> = profile.spending.iter().collect();
    spending.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    let top_spending = spending
        .iter()
        .take(2)
        .map(|(category, amount)| format!("{} (₹{}/month)", category.label(), format_inr(*amount)))
        .collect::<Vec<_>>()
        .join(" and ");

    let top_name = recommendations
        .first()
        .map(|r| r.card_name.as_str())
        .unwrap_or("the top card");

    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "You are an expert financial advisor in India providing a single, holistic comparative analysis for a user."
    );
    let _ = writeln!(
        prompt,
        "The user's profile: Annual income of ₹{}, credit score of {}, and top spending areas in {}.",
        format_inr(profile.income),
        profile.credit_score,
        top_spending
    );
    let _ = writeln!(prompt);
    let _ = writeln!(
        prompt,
        "Here are the top {} recommendations:",
        recommendations.len()
    );
    for (index, rec) in recommendations.iter().enumerate() {
        let _ = writeln!(
            prompt,
            "{}. {} (Net Value: ₹{})",
            index + 1,
            rec.card_name,
            format_inr(rec.net_annual_value)
        );
    }
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Your task is to generate a single, cohesive explanation.");
    let _ = writeln!(
        prompt,
        "- Start with a \"#### Top Recommendation\" section for the #1 card, \"{}\". Explain in detail why it is the absolute best choice. Directly compare its key reward rates to the other cards, showing how it specifically maximizes value on the user's top spending.",
        top_name
    );
    let _ = writeln!(
        prompt,
        "- Then, create a \"#### Other Strong Options\" section. For each of the other cards, write a very brief (1-2 sentences) summary of its main strength and why it's a good, but not the best, alternative for this specific user."
    );
    let _ = writeln!(
        prompt,
        "- Conclude with a final sentence that builds trust in this data-driven comparative recommendation."
    );
    let _ = write!(
        prompt,
        "- Format the entire response in simple markdown. Use bolding for emphasis."
    );
    prompt
}

/// Deterministic templated explanation, used whenever the AI collaborator is
/// unavailable or fails. Card names come straight from the structured
/// recommendation list.
pub fn standard_explanation(
    recommendations: &[RecommendationSummary],
    new_to_credit: bool,
) -> String {
    let top_name = recommendations
        .first()
        .map(|r| r.card_name.as_str())
        .unwrap_or("This card");

    if new_to_credit {
        return format!(
            "#### Your First Step to Building Credit\n\
             As you're new to credit, the **{}** is the perfect starting point. This is a \
             **Secured Credit Card**, which means it's issued against a fixed deposit, \
             guaranteeing approval and eliminating risk for the bank. By using this card for \
             small, regular purchases and paying the bill in full each month, you will begin to \
             build a positive CIBIL history. This is the most important financial step you can \
             take right now to unlock better financial products in the future. The other cards \
             shown are also excellent secured options to begin your credit journey.",
            top_name
        );
    }

    let other_names = if recommendations.len() > 1 {
        recommendations[1..]
            .iter()
            .map(|r| r.card_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    } else {
        "other options".to_string()
    };

    let sections = [
        format!(
            "#### Standard Analysis: Your Top Match\n\
             Based on our data, the **{}** is an excellent choice for your profile. It provides \
             the strongest overall value by aligning well with your spending habits and \
             financial details. It offers a superior balance of rewards and benefits compared \
             to {}, making it the most logical recommendation.",
            top_name, other_names
        ),
        "#### Standard Analysis: A Strong Contender\n\
         This card is a great alternative, offering solid rewards and benefits that fit well \
         with your profile."
            .to_string(),
        "#### Standard Analysis: A Solid Option\n\
         This is another worthwhile card to consider, with valuable perks that could be \
         beneficial for you."
            .to_string(),
        "#### Standard Analysis: Another Good Choice\n\
         This card also presents a good value proposition based on your profile."
            .to_string(),
    ];
    sections.join("\n\n")
}
