use listing_core::{Step, SubmissionState, WizardViewModel};

pub fn render(view: &WizardViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    if view.closed {
        lines.push("Listing discarded.".to_string());
        return lines;
    }

    let stepper: Vec<String> = view
        .steps
        .iter()
        .map(|step| {
            let marker = if step.completed {
                "✓".to_string()
            } else {
                step.number.to_string()
            };
            if step.active {
                format!("[{marker} {}]", step.label)
            } else {
                format!(" {marker} {} ", step.label)
            }
        })
        .collect();
    lines.push(stepper.join(" - "));

    if let Some(message) = &view.error_message {
        lines.push(format!("! {message}"));
    }

    match view.step {
        Step::Details => lines.push(
            "What are you selling? Set title, price, category, condition and description."
                .to_string(),
        ),
        Step::Photos => {
            lines.push("Add Photos. The first photo will be the main one.".to_string());
            if view.images.is_empty() {
                lines.push("  (no photos yet, you can upload up to 5)".to_string());
            }
            for (position, tile) in view.images.iter().enumerate() {
                let main = if tile.is_main { " (Main)" } else { "" };
                lines.push(format!("  {}. {}{}", position + 1, tile.uri, main));
            }
            if view.can_add_more && !view.images.is_empty() {
                lines.push("  + add more".to_string());
            }
        }
        Step::Contact => lines.push(
            "Contact & Location. Set contactMethod (in-app or phone), phone and location."
                .to_string(),
        ),
        Step::Review => {
            if let Some(review) = &view.review {
                lines.push("Review Your Listing".to_string());
                lines.push(format!("  {}  {}", review.title, review.price));
                lines.push(format!("  Condition: {}", review.condition));
                lines.push(format!("  Category:  {}", review.category));
                lines.push(format!("  Location:  {}", review.location));
                lines.push(format!("  Contact:   {}", review.contact));
                lines.push(format!(
                    "  Photos:    {} (main: {})",
                    review.photo_count,
                    review.main_image.as_deref().unwrap_or("No Image")
                ));
                lines.push(format!("  {}", review.description));
                lines.push(format!(
                    "  Seller: [{}] {}, {}",
                    review.seller_initial, review.seller_name, review.seller_university
                ));
            }
        }
        Step::Submitted => lines.push("Listing published.".to_string()),
    }

    if view.submission == SubmissionState::Pending {
        lines.push("Publishing...".to_string());
    } else if view.step != Step::Submitted {
        let back = if view.can_go_back { "back | " } else { "" };
        lines.push(format!("> {back}{}", view.primary_action));
    }
    lines
}
